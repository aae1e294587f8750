//! Builder dispatch tests against a recording backend.
//!
//! The stub answers every call with canned data and remembers what it was
//! asked, so these tests pin down exactly what reaches the service.

use std::cell::RefCell;

use handysheet_core::model::{SortSpec, to_rows};
use handysheet_core::{
    AppendSummary, Backend, BackendError, BatchSummary, CellValue, Dimension, GridRange,
    HandySheetError, MergeType, Request, Rows, SortOrder, SpreadSheet, TabInfo, UpdateSummary,
    ValueInputOption,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Get(String, String),
    Update(String, String, Rows, ValueInputOption),
    Append(String, String, Rows, ValueInputOption),
    Batch(String, Vec<Request>),
    ListTabs(String),
}

#[derive(Default)]
struct RecordingBackend {
    calls: RefCell<Vec<Call>>,
    rows: Rows,
    fail_with: Option<BackendError>,
}

impl RecordingBackend {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<(), BackendError> {
        self.calls.borrow_mut().push(call);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl Backend for RecordingBackend {
    fn get(&self, spreadsheet_id: &str, range: &str) -> Result<Rows, BackendError> {
        self.record(Call::Get(spreadsheet_id.into(), range.into()))?;
        Ok(self.rows.clone())
    }

    fn update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &Rows,
        input: ValueInputOption,
    ) -> Result<UpdateSummary, BackendError> {
        self.record(Call::Update(spreadsheet_id.into(), range.into(), values.clone(), input))?;
        Ok(UpdateSummary {
            updated_range: range.to_string(),
            updated_rows: 2,
            updated_columns: 2,
            updated_cells: 4,
        })
    }

    fn append(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &Rows,
        input: ValueInputOption,
    ) -> Result<AppendSummary, BackendError> {
        self.record(Call::Append(spreadsheet_id.into(), range.into(), values.clone(), input))?;
        Ok(AppendSummary {
            table_range: Some("Sheet1!A1:C3".into()),
            updates: UpdateSummary {
                updated_range: "Sheet1!A4:C4".into(),
                updated_rows: 1,
                updated_columns: 3,
                updated_cells: 3,
            },
        })
    }

    fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: &[Request],
    ) -> Result<BatchSummary, BackendError> {
        self.record(Call::Batch(spreadsheet_id.into(), requests.to_vec()))?;
        Ok(BatchSummary {
            spreadsheet_id: spreadsheet_id.into(),
            replies: requests.len(),
        })
    }

    fn list_tabs(&self, spreadsheet_id: &str) -> Result<Vec<TabInfo>, BackendError> {
        self.record(Call::ListTabs(spreadsheet_id.into()))?;
        Ok(["Sheet1", "Summary"]
            .iter()
            .enumerate()
            .map(|(i, title)| TabInfo {
                sheet_id: i as u32 * 100,
                title: title.to_string(),
                index: i as u32,
                row_count: 1000,
                column_count: 26,
            })
            .collect())
    }
}

fn batch_request(backend: &RecordingBackend) -> Request {
    match backend.calls().as_slice() {
        [Call::Batch(id, requests)] => {
            assert_eq!(id, "doc");
            assert_eq!(requests.len(), 1);
            requests[0].clone()
        }
        other => panic!("expected one batch call, got {:?}", other),
    }
}

#[test]
fn test_read_composes_sheet_address() {
    let backend = RecordingBackend::default();
    SpreadSheet::new(&backend)
        .with_id("doc")
        .on_sheet("Sheet1")
        .to_range("A1:C3")
        .read_values()
        .unwrap();
    assert_eq!(backend.calls(), vec![Call::Get("doc".into(), "Sheet1!A1:C3".into())]);
}

#[test]
fn test_read_from_corners_uses_same_address() {
    let backend = RecordingBackend::default();
    SpreadSheet::new(&backend)
        .with_id("doc")
        .on_sheet("Sheet1")
        .from_cell(1, 1)
        .to_cell(3, 3)
        .read_values()
        .unwrap();
    assert_eq!(backend.calls(), vec![Call::Get("doc".into(), "Sheet1!A1:C3".into())]);
}

#[test]
fn test_read_normalizes_lowercase_and_trims_trailing_empty() {
    let backend = RecordingBackend {
        rows: vec![
            vec![CellValue::from("a"), CellValue::Empty, CellValue::from("")],
            vec![CellValue::Empty, CellValue::from("b")],
        ],
        ..RecordingBackend::default()
    };
    let rows = SpreadSheet::new(&backend)
        .with_id("doc")
        .to_range("Sheet1!b2:c3")
        .read_values()
        .unwrap();
    assert_eq!(backend.calls(), vec![Call::Get("doc".into(), "Sheet1!B2:C3".into())]);
    assert_eq!(rows, vec![vec![CellValue::from("a")], vec![CellValue::Empty, CellValue::from("b")]]);
}

#[test]
fn test_write_values_end_to_end() {
    let backend = RecordingBackend::default();
    let summary = SpreadSheet::new(&backend)
        .with_id("doc")
        .on_sheet("Sheet1")
        .to_range("A1:B2")
        .with_value_input_option(ValueInputOption::UserEntered)
        .write_values([["A1", "B1"], ["A2", "B2"]])
        .unwrap();

    assert_eq!(
        backend.calls(),
        vec![Call::Update(
            "doc".into(),
            "Sheet1!A1:B2".into(),
            to_rows([["A1", "B1"], ["A2", "B2"]]),
            ValueInputOption::UserEntered,
        )]
    );
    assert_eq!(summary.updated_rows, 2);
    assert_eq!(summary.updated_cells, 4);
}

#[test]
fn test_append_passes_raw_option() {
    let backend = RecordingBackend::default();
    let summary = SpreadSheet::new(&backend)
        .with_id("doc")
        .on_sheet("Sheet1")
        .to_range("A4:E4")
        .with_value_input_option(ValueInputOption::Raw)
        .append_values([["one", "two", "three"]])
        .unwrap();
    assert_eq!(
        backend.calls(),
        vec![Call::Append(
            "doc".into(),
            "Sheet1!A4:E4".into(),
            to_rows([["one", "two", "three"]]),
            ValueInputOption::Raw,
        )]
    );
    assert_eq!(summary.updates.updated_range, "Sheet1!A4:C4");
}

#[test]
fn test_value_operations_require_sheet_and_id() {
    let backend = RecordingBackend::default();
    let no_sheet = SpreadSheet::new(&backend).with_id("doc").to_range("A1:B2");
    assert!(matches!(
        no_sheet.read_values(),
        Err(HandySheetError::MissingConfiguration("sheet"))
    ));
    let no_id = SpreadSheet::new(&backend).on_sheet("Sheet1").to_range("A1:B2");
    assert!(matches!(
        no_id.write_values([["x"]]),
        Err(HandySheetError::MissingConfiguration("spreadsheet id"))
    ));
    let no_range = SpreadSheet::new(&backend).with_id("doc").on_sheet("Sheet1");
    assert!(matches!(
        no_range.append_values([["x"]]),
        Err(HandySheetError::MissingConfiguration("range"))
    ));
    assert!(backend.calls().is_empty());
}

#[test]
fn test_malformed_literal_is_invalid_format() {
    let backend = RecordingBackend::default();
    let result = SpreadSheet::new(&backend)
        .with_id("doc")
        .on_sheet("Sheet1")
        .to_range("A1C3")
        .read_values();
    assert!(matches!(result, Err(HandySheetError::InvalidFormat(_))));
    assert!(backend.calls().is_empty());
}

#[test]
fn test_tab_title_with_bang_is_invalid_format() {
    let backend = RecordingBackend::default();
    let sheet = SpreadSheet::new(&backend).with_id("doc").on_sheet("A!B");
    assert!(matches!(
        sheet.clone().to_range("A1:B2").write_values([["x", "y"]]),
        Err(HandySheetError::InvalidFormat(_))
    ));
    assert!(matches!(
        sheet.select(Dimension::Rows).from(0).to(1).delete(),
        Err(HandySheetError::InvalidFormat(_))
    ));
    assert!(backend.calls().is_empty());
}

#[test]
fn test_insert_without_dimension_never_dispatches() {
    let backend = RecordingBackend::default();
    let result = SpreadSheet::new(&backend)
        .with_id("doc")
        .on_sheet("Sheet1")
        .from(0)
        .to(1)
        .insert_empty();
    assert!(matches!(
        result,
        Err(HandySheetError::MissingConfiguration("dimension"))
    ));
    assert!(backend.calls().is_empty());
}

#[test]
fn test_insert_inherit_before_at_zero_is_invalid() {
    let backend = RecordingBackend::default();
    let result = SpreadSheet::new(&backend)
        .with_id("doc")
        .select(Dimension::Rows)
        .from(0)
        .to(2)
        .inherit_from_before(true)
        .insert_empty();
    assert!(matches!(result, Err(HandySheetError::InvalidBounds(_))));
    assert!(backend.calls().is_empty());
}

#[test]
fn test_insert_rows_request() {
    let backend = RecordingBackend::default();
    SpreadSheet::new(&backend)
        .with_id("doc")
        .on_sheet("Sheet1")
        .select(Dimension::Rows)
        .from(0)
        .to(1)
        .insert_empty()
        .unwrap();

    match batch_request(&backend) {
        Request::InsertDimension(req) => {
            assert_eq!(req.range.sheet.as_deref(), Some("Sheet1"));
            assert_eq!(req.range.dimension, Dimension::Rows);
            assert_eq!((req.range.start_index, req.range.end_index), (0, 1));
            assert!(!req.inherit_from_before);
        }
        other => panic!("unexpected request {:?}", other),
    }
}

#[test]
fn test_insert_columns_shorthand() {
    let backend = RecordingBackend::default();
    SpreadSheet::new(&backend)
        .with_id("doc")
        .insert_columns(2, 4, true)
        .unwrap();
    match batch_request(&backend) {
        Request::InsertDimension(req) => {
            assert_eq!(req.range.sheet, None);
            assert_eq!(req.range.dimension, Dimension::Columns);
            assert_eq!((req.range.start_index, req.range.end_index), (2, 4));
            assert!(req.inherit_from_before);
        }
        other => panic!("unexpected request {:?}", other),
    }
}

#[test]
fn test_delete_rejects_empty_span() {
    let backend = RecordingBackend::default();
    let result = SpreadSheet::new(&backend)
        .with_id("doc")
        .select(Dimension::Columns)
        .from(3)
        .to(2)
        .delete();
    assert!(matches!(result, Err(HandySheetError::InvalidBounds(_))));
    assert!(backend.calls().is_empty());
}

#[test]
fn test_delete_request() {
    let backend = RecordingBackend::default();
    SpreadSheet::new(&backend)
        .with_id("doc")
        .on_sheet("Sheet1")
        .select(Dimension::Columns)
        .from(2)
        .to(3)
        .delete()
        .unwrap();
    match batch_request(&backend) {
        Request::DeleteDimension(req) => {
            assert_eq!(req.range.dimension, Dimension::Columns);
            assert_eq!((req.range.start_index, req.range.end_index), (2, 3));
        }
        other => panic!("unexpected request {:?}", other),
    }
}

#[test]
fn test_merge_corners_become_half_open_grid() {
    let backend = RecordingBackend::default();
    SpreadSheet::new(&backend)
        .with_id("doc")
        .on_sheet("Sheet1")
        .from_cell(2, 2)
        .to_cell(4, 4)
        .with_merge_type(MergeType::MergeRows)
        .merge_cells()
        .unwrap();
    match batch_request(&backend) {
        Request::MergeCells(req) => {
            assert_eq!(
                req.range,
                GridRange {
                    sheet: Some("Sheet1".into()),
                    start_row_index: 1,
                    end_row_index: 4,
                    start_column_index: 1,
                    end_column_index: 4,
                }
            );
            assert_eq!(req.merge_type, MergeType::MergeRows);
        }
        other => panic!("unexpected request {:?}", other),
    }
}

#[test]
fn test_merge_rejects_reversed_corners() {
    let backend = RecordingBackend::default();
    let result = SpreadSheet::new(&backend)
        .with_id("doc")
        .from_cell(4, 4)
        .to_cell(2, 2)
        .merge_cells();
    assert!(matches!(result, Err(HandySheetError::InvalidBounds(_))));
    assert!(backend.calls().is_empty());
}

#[test]
fn test_sort_requires_dimension() {
    let backend = RecordingBackend::default();
    let result = SpreadSheet::new(&backend)
        .with_id("doc")
        .to_range("A1:C5")
        .sort();
    assert!(matches!(
        result,
        Err(HandySheetError::MissingConfiguration("dimension"))
    ));
}

#[test]
fn test_sort_keys_on_first_column() {
    let backend = RecordingBackend::default();
    SpreadSheet::new(&backend)
        .with_id("doc")
        .on_sheet("Sheet1")
        .to_range("B2:D9")
        .select(Dimension::Rows)
        .with_sort_order(SortOrder::Descending)
        .sort()
        .unwrap();
    match batch_request(&backend) {
        Request::SortRange(req) => {
            assert_eq!(req.dimension, Dimension::Rows);
            assert_eq!(
                req.sort_specs,
                vec![SortSpec {
                    dimension_index: 1,
                    sort_order: SortOrder::Descending,
                }]
            );
        }
        other => panic!("unexpected request {:?}", other),
    }
}

#[test]
fn test_list_tabs_returns_titles() {
    let backend = RecordingBackend::default();
    let tabs = SpreadSheet::new(&backend).with_id("doc").list_tabs().unwrap();
    assert_eq!(tabs, vec!["Sheet1", "Summary"]);

    assert!(matches!(
        SpreadSheet::new(&backend).list_tabs(),
        Err(HandySheetError::MissingConfiguration("spreadsheet id"))
    ));
}

#[test]
fn test_backend_errors_pass_through() {
    let backend = RecordingBackend {
        fail_with: Some(BackendError::Quota("read requests per minute".into())),
        ..RecordingBackend::default()
    };
    let result = SpreadSheet::new(&backend)
        .with_id("doc")
        .on_sheet("Sheet1")
        .to_range("A1:A1")
        .read_values();
    match result {
        Err(HandySheetError::Backend(err)) => {
            assert_eq!(err, BackendError::Quota("read requests per minute".into()))
        }
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(backend.calls().len(), 1);
}

#[test]
fn test_builder_is_reusable() {
    let backend = RecordingBackend::default();
    let range = SpreadSheet::new(&backend)
        .with_id("doc")
        .on_sheet("Sheet1")
        .to_range("A1:A2");
    range.read_values().unwrap();
    range.read_values().unwrap();
    range.clone().on_sheet("Other").read_values().unwrap();
    assert_eq!(
        backend.calls(),
        vec![
            Call::Get("doc".into(), "Sheet1!A1:A2".into()),
            Call::Get("doc".into(), "Sheet1!A1:A2".into()),
            Call::Get("doc".into(), "Other!A1:A2".into()),
        ]
    );
}

#[test]
fn test_request_wire_names() {
    let request = Request::InsertDimension(handysheet_core::model::InsertDimensionRequest {
        range: handysheet_core::DimensionRange {
            sheet: None,
            dimension: Dimension::Columns,
            start_index: 2,
            end_index: 3,
        },
        inherit_from_before: true,
    });
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "insertDimension": {
                "range": {"dimension": "COLUMNS", "startIndex": 2, "endIndex": 3},
                "inheritFromBefore": true
            }
        })
    );
}

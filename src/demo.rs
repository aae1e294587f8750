//! Scripted walk-through of every builder operation against an in-memory sheet.

use handysheet_core::{
    Dimension, GridRange, HandySheetError, MemoryBackend, Rows, SortOrder, SpreadSheet,
    ValueInputOption,
};

use crate::config::Settings;
use crate::error::{DemoError, Result};

/// Tab created next to the configured one, so listing tabs shows more than one.
pub const SUMMARY_SHEET: &str = "Summary";

/// What the demo did and the state it left behind.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub steps: Vec<String>,
    pub tabs: Vec<String>,
    pub rows: Rows,
    pub merges: Vec<GridRange>,
}

fn step<T>(name: &'static str, result: handysheet_core::Result<T>) -> Result<T> {
    result.map_err(|source: HandySheetError| DemoError::Step { step: name, source })
}

/// Run the walk-through on a fresh spreadsheet inside `backend`.
pub fn run(backend: &MemoryBackend, settings: &Settings) -> Result<DemoReport> {
    backend.add_spreadsheet(&settings.spreadsheet_id, &[settings.sheet.as_str(), SUMMARY_SHEET])?;
    let spreadsheet = SpreadSheet::new(backend).with_id(settings.spreadsheet_id.as_str());
    let sheet = spreadsheet.clone().on_sheet(settings.sheet.as_str());
    let mut steps = Vec::new();

    let values = [["A1", "B1", "C1"], ["A2", "B2", "C2"], ["A3", "B3", "C3"]];
    let written = step(
        "write",
        sheet
            .clone()
            .to_range("A1:C3")
            .with_value_input_option(settings.value_input_option)
            .write_values(values),
    )?;
    steps.push(format!(
        "Wrote {} cells to {}",
        written.updated_cells, written.updated_range
    ));

    let appended = step(
        "append",
        sheet
            .clone()
            .to_range("A4:E4")
            .with_value_input_option(ValueInputOption::Raw)
            .append_values([["one", "two", "three"]]),
    )?;
    steps.push(format!("Appended a row at {}", appended.updates.updated_range));

    step(
        "insert",
        sheet.clone().select(Dimension::Rows).from(0).to(1).insert_empty(),
    )?;
    steps.push("Inserted one empty row at the top".to_string());

    step(
        "delete",
        sheet.clone().select(Dimension::Columns).from(2).to(3).delete(),
    )?;
    steps.push("Deleted column C".to_string());

    step(
        "sort",
        sheet
            .clone()
            .to_range("A2:B5")
            .select(Dimension::Rows)
            .with_sort_order(SortOrder::Descending)
            .sort(),
    )?;
    steps.push("Sorted A2:B5 by column A, descending".to_string());

    step(
        "merge",
        sheet.clone().from_cell(2, 2).to_cell(4, 4).merge_cells(),
    )?;
    steps.push("Merged B2:D4".to_string());

    let tabs = step("list tabs", spreadsheet.list_tabs())?;
    let rows = backend.snapshot(&settings.spreadsheet_id, &settings.sheet)?;
    let merges = backend.merges(&settings.spreadsheet_id, &settings.sheet)?;
    log::info!("demo finished with {} steps", steps.len());

    Ok(DemoReport {
        steps,
        tabs,
        rows,
        merges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use handysheet_core::model::to_rows;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_demo_final_state() {
        let backend = MemoryBackend::new();
        let report = run(&backend, &Settings::default()).unwrap();

        let mut expected = to_rows([vec!["one", "two"], vec!["A3"], vec!["A2"], vec!["A1", "B1"]]);
        expected.insert(0, Vec::new());
        assert_eq!(report.rows, expected);
        assert_eq!(report.tabs, vec!["Sheet1", SUMMARY_SHEET]);
        assert_eq!(report.steps.len(), 6);
        assert_eq!(report.merges.len(), 1);
        assert_eq!(report.merges[0].to_numeric().to_literal(), "B2:D4");
    }

    #[test]
    fn test_demo_honours_sheet_name() {
        let backend = MemoryBackend::new();
        let settings = Settings {
            sheet: "Budget".into(),
            ..Settings::default()
        };
        let report = run(&backend, &settings).unwrap();
        assert_eq!(report.tabs[0], "Budget");
        assert!(report.steps[0].contains("Budget!A1:C3"));
    }
}

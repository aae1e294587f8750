//! Tab-qualified range addresses (`Sheet1!A1:C3`).
//!
//! The wire address handed to a backend is always `<tab>!<literal range>`,
//! with the tab name copied verbatim. Parsing is more lenient and also
//! accepts the quoted form (`'My Tab'!A1:B2`).

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::error::{RangeError, Result};
use super::numeric::NumericRange;

/// A numeric range with an optional tab name.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct SheetRange {
    pub sheet: Option<String>,
    pub range: NumericRange,
}

impl SheetRange {
    pub fn new(sheet: Option<String>, range: NumericRange) -> SheetRange {
        SheetRange { sheet, range }
    }

    /// Parse `"A1:C3"`, `"Sheet1!A1:C3"` or `"'My Tab'!A1:C3"`.
    pub fn parse(address: &str) -> Result<SheetRange> {
        let address = address.trim();
        let caps = address_re().captures(address).ok_or_else(|| {
            RangeError::InvalidFormat(format!("invalid range address: {address:?}"))
        })?;

        let sheet = caps.name("sheet").map(|m| unquote_sheet(m.as_str()));
        if sheet.as_deref() == Some("") {
            return Err(RangeError::InvalidFormat(format!(
                "empty tab name in {address:?}"
            )));
        }
        let range = NumericRange::parse(&caps["range"])?;
        Ok(SheetRange { sheet, range })
    }

    /// The wire-level address: `<tab>!<literal>`, or just the literal when no tab is set.
    pub fn address(&self) -> String {
        match &self.sheet {
            Some(sheet) => sheet_address(sheet, &self.range),
            None => self.range.to_literal(),
        }
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address())
    }
}

impl FromStr for SheetRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Compose the wire-level address for a range on a tab.
pub fn sheet_address(sheet: &str, range: &NumericRange) -> String {
    format!("{}!{}", sheet, range.to_literal())
}

fn address_re() -> &'static Regex {
    static ADDRESS_RE: OnceLock<Regex> = OnceLock::new();
    ADDRESS_RE.get_or_init(|| {
        Regex::new(r"^(?:(?<sheet>'(?:[^']|'')*'|[^!']*)!)?(?<range>[^!]+)$")
            .expect("range address regex must compile")
    })
}

fn unquote_sheet(raw: &str) -> String {
    match raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        Some(inner) => inner.replace("''", "'"),
        None => raw.to_string(),
    }
}

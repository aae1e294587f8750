//! Markdown rendering of sheet contents.

use handysheet_core::Rows;
use handysheet_range::column_to_letters;
use std::io::Write;
use std::path::Path;

/// Write `rows` as a markdown table headed by column letters.
pub fn write_markdown<W: Write>(w: &mut W, title: &str, rows: &Rows) -> std::io::Result<()> {
    writeln!(w, "# {}", escape_markdown(title))?;
    writeln!(w)?;

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        writeln!(w, "*Empty sheet*")?;
        return Ok(());
    }

    write!(w, "|   |")?;
    for col in 1..=width as u32 {
        write!(w, " {} |", column_to_letters(col))?;
    }
    writeln!(w)?;

    write!(w, "|---|")?;
    for _ in 0..width {
        write!(w, "---|")?;
    }
    writeln!(w)?;

    for (i, row) in rows.iter().enumerate() {
        write!(w, "| {} |", i + 1)?; // 1-based row numbers
        for col in 0..width {
            let display = row.get(col).map(|v| v.to_string()).unwrap_or_default();
            write!(w, " {} |", escape_markdown(&display))?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Write `rows` as a markdown file
pub fn export_markdown(path: &Path, title: &str, rows: &Rows) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_markdown(&mut file, title, rows)
}

fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}

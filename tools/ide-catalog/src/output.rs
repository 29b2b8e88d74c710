//! Output formatting for catalog commands.

use std::io::{self, Write};
use std::str::FromStr;

use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};
use wsp_ide_images::IdeImageEntry;

use crate::error::CliError;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(CliError::UnknownFormat(other.to_string())),
        }
    }
}

/// One table row per IDE image entry.
#[derive(Debug, Serialize, Tabled)]
pub struct EntryRow {
    #[tabled(rename = "IDE")]
    pub identifier: String,

    #[tabled(rename = "Image")]
    pub image_repository: String,

    #[tabled(rename = "Pinned", display = "display_pinned")]
    pub pinned_version: Option<String>,
}

fn display_pinned(pinned: &Option<String>) -> String {
    pinned.as_deref().unwrap_or("-").to_string()
}

impl From<&IdeImageEntry> for EntryRow {
    fn from(entry: &IdeImageEntry) -> Self {
        Self {
            identifier: entry.identifier.clone(),
            image_repository: entry.image_repository.to_string(),
            pinned_version: entry.pinned_version.clone(),
        }
    }
}

/// Write rows in the specified format.
pub fn write_output<T: Serialize + Tabled>(
    out: &mut impl Write,
    data: &[T],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                writeln!(out, "{}", "No entries.".dimmed())
            } else {
                writeln!(out, "{}", Table::new(data))
            }
        }
        OutputFormat::Json => writeln!(out, "{}", format_json(data, "[]")),
    }
}

/// Write a single JSON value.
pub fn write_json<T: Serialize>(out: &mut impl Write, data: &T) -> io::Result<()> {
    writeln!(out, "{}", format_json(data, "{}"))
}

/// Write a success message.
pub fn write_success(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "Success:".green().bold(), message)
}

/// Write an info message.
pub fn write_info(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "Info:".blue().bold(), message)
}

fn format_json<T: Serialize + ?Sized>(data: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use wsp_ide_images::{ids, IdeImageTable};

    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(CliError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_entry_row() {
        let table = IdeImageTable::builtin();

        let row = EntryRow::from(table.entry(ids::GOLAND).unwrap());
        assert_eq!(row.identifier, "goland");
        assert_eq!(row.image_repository, "ide/goland");
        assert_eq!(display_pinned(&row.pinned_version), "-");

        let row = EntryRow::from(table.entry(ids::CODE).unwrap());
        assert!(display_pinned(&row.pinned_version).starts_with("commit-"));
    }

    #[test]
    fn test_rows_render_as_table_and_json() {
        let table = IdeImageTable::builtin();
        let rows: Vec<EntryRow> = table.iter().map(EntryRow::from).collect();

        let mut rendered = Vec::new();
        write_output(&mut rendered, &rows, OutputFormat::Table).unwrap();
        let rendered = String::from_utf8(rendered).unwrap();
        assert!(rendered.contains("ide/xterm-web"));
        assert!(rendered.contains("Pinned"));

        let mut rendered = Vec::new();
        write_output(&mut rendered, &rows, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&rendered).unwrap();
        assert_eq!(json.as_array().unwrap().len(), table.len());
        assert_eq!(json[0]["identifier"], "clion");
    }

    #[test]
    fn test_empty_rows() {
        let mut rendered = Vec::new();
        write_output::<EntryRow>(&mut rendered, &[], OutputFormat::Table).unwrap();
        assert!(String::from_utf8(rendered).unwrap().contains("No entries."));
    }
}

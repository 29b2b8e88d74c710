//! Error handling and display for the catalog tool.

use colored::Colorize;
use thiserror::Error;
use wsp_ide_images::IdeImageError;

/// Tool-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown output format '{0}' (expected 'table' or 'json')")]
    UnknownFormat(String),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let Some(table_err) = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<IdeImageError>())
    else {
        return;
    };

    if table_err.is_unknown_identifier() {
        eprintln!(
            "\n{}",
            "Hint: Run `wsp-ide-catalog list` to see the known identifiers.".yellow()
        );
    } else if table_err.is_validation_error() || matches!(table_err, IdeImageError::Parse(_)) {
        eprintln!(
            "\n{}",
            "Hint: Fix the table file or unset WSP_IDE_TABLE to use the built-in table.".yellow()
        );
    }
}

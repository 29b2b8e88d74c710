//! Catalog commands.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use wsp_ide_images::{IdeImageError, IdeImageTable, ImageReference};

use crate::config::Config;
use crate::output::{write_info, write_json, write_output, write_success, EntryRow, OutputFormat};

/// Inspect the IDE image table used for workspace provisioning.
#[derive(Debug, Parser)]
#[command(name = "wsp-ide-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Substitute IDE image table (TOML). Overrides WSP_IDE_TABLE.
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every IDE image entry.
    List,

    /// Show the image repository of an IDE.
    Lookup(IdentifierArgs),

    /// Show the pinned version of an IDE, if any.
    Pinned(IdentifierArgs),

    /// Compose the full image reference of an IDE.
    Reference(ReferenceArgs),

    /// Validate the configured table.
    Check,

    /// Print the configured table as TOML.
    Export,
}

#[derive(Debug, Args)]
struct IdentifierArgs {
    /// IDE identifier, e.g. `code` or `goland`.
    identifier: String,
}

#[derive(Debug, Args)]
struct ReferenceArgs {
    /// IDE identifier, e.g. `code` or `goland`.
    identifier: String,

    /// Registry prefix. Overrides WSP_IMAGE_REGISTRY.
    #[arg(long)]
    registry: Option<String>,

    /// Tag for images without a pinned version. Overrides WSP_IMAGE_TAG.
    #[arg(long)]
    tag: Option<String>,
}

impl Cli {
    /// Run the command against the configured table, printing to stdout.
    pub fn run(self, config: Config) -> Result<()> {
        let stdout = std::io::stdout();
        self.run_with(config, &mut stdout.lock())
    }

    /// Run the command against the configured table, writing to `out`.
    pub fn run_with(self, mut config: Config, out: &mut impl Write) -> Result<()> {
        let format: OutputFormat = self.format.parse()?;

        if let Some(path) = self.table {
            config.table_path = Some(path);
        }

        let table = load_table(&config)?;

        match self.command {
            Commands::List => list(&table, format, out),
            Commands::Lookup(args) => lookup(&table, args, format, out),
            Commands::Pinned(args) => pinned(&table, args, format, out),
            Commands::Reference(args) => reference(&table, &config, args, format, out),
            Commands::Check => check(&table, &config, format, out),
            Commands::Export => export(&table, out),
        }
    }
}

/// Load the substitute table if one is configured, otherwise the built-in one.
fn load_table(config: &Config) -> Result<IdeImageTable> {
    let Some(path) = &config.table_path else {
        debug!("Using built-in IDE image table");
        return Ok(IdeImageTable::builtin());
    };

    IdeImageTable::from_path(path).map_err(|e| match e {
        // Already names the file.
        IdeImageError::Io { .. } => anyhow::Error::new(e),
        other => anyhow::Error::new(other)
            .context(format!("invalid IDE image table {}", path.display())),
    })
}

fn list(table: &IdeImageTable, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let rows: Vec<EntryRow> = table.iter().map(EntryRow::from).collect();
    write_output(out, &rows, format)?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct LookupOutput<'a> {
    identifier: &'a str,
    image_repository: &'a str,
}

fn lookup(
    table: &IdeImageTable,
    args: IdentifierArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let repository = table.lookup(&args.identifier)?;

    match format {
        OutputFormat::Table => writeln!(out, "{}", repository)?,
        OutputFormat::Json => write_json(
            out,
            &LookupOutput {
                identifier: &args.identifier,
                image_repository: repository.as_str(),
            },
        )?,
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct PinnedOutput<'a> {
    identifier: &'a str,
    pinned_version: Option<&'a str>,
}

fn pinned(
    table: &IdeImageTable,
    args: IdentifierArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    // Unknown identifiers are an error here, not "no pin".
    let entry = table.entry(&args.identifier)?;
    let pinned_version = entry.pinned_version.as_deref();

    match (format, pinned_version) {
        (OutputFormat::Table, Some(version)) => writeln!(out, "{}", version)?,
        (OutputFormat::Table, None) => write_info(
            out,
            &format!(
                "'{}' has no pinned version; the default tag applies",
                args.identifier
            ),
        )?,
        (OutputFormat::Json, _) => write_json(
            out,
            &PinnedOutput {
                identifier: &args.identifier,
                pinned_version,
            },
        )?,
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct ReferenceOutput<'a> {
    reference: String,
    #[serde(flatten)]
    details: &'a ImageReference,
}

fn reference(
    table: &IdeImageTable,
    config: &Config,
    args: ReferenceArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let registry = args.registry.as_deref().unwrap_or(&config.registry);
    let default_tag = args.tag.as_deref().unwrap_or(&config.default_tag);

    let image = table.image_reference(&args.identifier, registry, default_tag)?;

    match format {
        OutputFormat::Table => writeln!(out, "{}", image)?,
        OutputFormat::Json => write_json(
            out,
            &ReferenceOutput {
                reference: image.to_string(),
                details: &image,
            },
        )?,
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    source: String,
    entries: usize,
    pinned: usize,
}

fn check(
    table: &IdeImageTable,
    config: &Config,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let output = CheckOutput {
        source: config
            .table_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string()),
        entries: table.len(),
        pinned: table.pinned().count(),
    };

    match format {
        OutputFormat::Table => write_success(
            out,
            &format!(
                "{} table is valid: {} entries, {} pinned",
                output.source, output.entries, output.pinned
            ),
        )?,
        OutputFormat::Json => write_json(out, &output)?,
    }

    Ok(())
}

fn export(table: &IdeImageTable, out: &mut impl Write) -> Result<()> {
    write!(out, "{}", table.to_toml_string()?)?;
    Ok(())
}

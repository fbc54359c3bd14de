//! CLI command handling for relabel
//!
//! Every command replays a recorded backend snapshot, so the engine can be
//! exercised without a live analysis service.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use relabel_config::{logging, RelabelConfig};
use relabel_engine::lsp::{self, ColumnEncoding};
use relabel_engine::{RefactorEngine, SnapshotBackend, StageOutcome};
use relabel_foundation::text::apply_edits;
use relabel_foundation::{BufferHandle, RefactorRequest, SourcePosition};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::Instrument;

/// Exit status when no rename applies at the requested position
pub const EXIT_NOT_APPLICABLE: u8 = 1;
/// Exit status for configuration, I/O and engine errors
pub const EXIT_ERROR: u8 = 2;

/// The main CLI struct.
#[derive(Parser)]
#[command(name = "relabel")]
#[command(about = "Safe local rename of variables and parameters")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to relabel.toml or .relabel/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// The available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List the refactorings available at a position
    List {
        #[command(flatten)]
        target: Target,
    },
    /// Rename the variable or parameter at a position
    Rename {
        #[command(flatten)]
        target: Target,

        /// Replacement name
        #[arg(long)]
        new_name: String,

        /// Print the file with the edits applied instead of the edits
        #[arg(long, conflicts_with = "lsp")]
        apply: bool,

        /// Print the edits as an LSP code action
        #[arg(long)]
        lsp: bool,

        /// Count LSP columns in characters (`utf-32`) instead of UTF-16 code units
        #[arg(long, requires = "lsp")]
        utf32: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Buffer and cursor a command operates on
#[derive(Args)]
pub struct Target {
    /// Recorded backend answers (JSON)
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Source file the snapshot was recorded for
    #[arg(long)]
    pub file: PathBuf,

    /// Zero-based row of the cursor
    #[arg(long)]
    pub row: u32,

    /// Zero-based column of the cursor
    #[arg(long)]
    pub column: u32,
}

impl Target {
    fn position(&self) -> SourcePosition {
        SourcePosition::new(self.row, self.column)
    }

    fn buffer(&self) -> BufferHandle {
        BufferHandle::for_path(&self.file)
    }

    async fn engine(&self, config: &RelabelConfig) -> Result<RefactorEngine> {
        let backend = SnapshotBackend::load(&self.snapshot)
            .await
            .with_context(|| format!("Failed to load snapshot {}", self.snapshot.display()))?;
        Ok(RefactorEngine::with_config(Arc::new(backend), &config.rename)?)
    }
}

pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let workspace_root = std::env::current_dir().context("Failed to resolve working directory")?;
    let config = RelabelConfig::load(&workspace_root, cli.config.as_deref())?;
    logging::initialize(&config);

    match cli.command {
        Commands::List { target } => {
            let span = logging::request_span(&target.buffer().id, "list");
            handle_list(&config, &target).instrument(span).await
        }
        Commands::Rename {
            target,
            new_name,
            apply,
            lsp: as_code_action,
            utf32,
        } => {
            let span = logging::request_span(&target.buffer().id, "rename");
            let encoding = as_code_action.then_some(if utf32 {
                ColumnEncoding::Utf32
            } else {
                ColumnEncoding::Utf16
            });
            handle_rename(&config, &target, new_name, apply, encoding)
                .instrument(span)
                .await
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn handle_list(config: &RelabelConfig, target: &Target) -> Result<ExitCode> {
    let engine = target.engine(config).await?;
    let offers = engine
        .list_refactorings(&target.buffer(), target.position())
        .await;

    print_json(&serde_json::to_value(&offers)?)?;
    Ok(ExitCode::SUCCESS)
}

async fn handle_rename(
    config: &RelabelConfig,
    target: &Target,
    new_name: String,
    apply: bool,
    code_action: Option<ColumnEncoding>,
) -> Result<ExitCode> {
    let engine = target.engine(config).await?;
    let buffer = target.buffer();
    let request = RefactorRequest::rename(target.position(), new_name)?;

    let result = match engine.refactor_outcome(&buffer, &request).await? {
        StageOutcome::Ready(result) => result,
        StageOutcome::NotApplicable(reason) => {
            eprintln!("Rename not applicable: {}", reason);
            return Ok(ExitCode::from(EXIT_NOT_APPLICABLE));
        }
    };

    if apply {
        let text = tokio::fs::read_to_string(&target.file)
            .await
            .with_context(|| format!("Failed to read {}", target.file.display()))?;
        let edits = result.edits_for(&target.file).unwrap_or_default();
        print!("{}", apply_edits(&text, edits)?);
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(encoding) = code_action {
        let text = tokio::fs::read_to_string(&target.file)
            .await
            .with_context(|| format!("Failed to read {}", target.file.display()))?;
        let edit = lsp::to_workspace_edit_in(&result, encoding, |path| {
            if path == target.file {
                Ok(text.clone())
            } else {
                Ok(std::fs::read_to_string(path)?)
            }
        })?;

        let offer = engine
            .list_refactorings(&buffer, target.position())
            .await
            .into_iter()
            .next();
        let value = match offer {
            Some(descriptor) => serde_json::to_value(lsp::to_code_action(&descriptor, edit))?,
            None => serde_json::to_value(edit)?,
        };
        print_json(&value)?;
        return Ok(ExitCode::SUCCESS);
    }

    print_json(&serde_json::to_value(&result)?)?;
    Ok(ExitCode::SUCCESS)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

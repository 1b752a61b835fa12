//! Command-line interface for the xpdl-editor utility
//!
//! Works on project snapshots: the JSON the editor saves and loads.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use xpdl_editor::core::audit::audit_project;
use xpdl_editor::core::factory::create_project;
use xpdl_editor::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use xpdl_editor::model::normalize_process;
use xpdl_editor::{project_from_json, project_to_json, Identified, Process, Project};

/// XPDL Editor - create, inspect, and repair process-diagram snapshots
#[derive(Parser)]
#[command(name = "xpdl-editor")]
#[command(about = "Work with XPDL process-diagram editor project snapshots")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a fresh project with one empty process
    New {
        /// Output file for the snapshot (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Project name
        #[arg(long)]
        name: Option<String>,
    },

    /// Summarize the processes in a snapshot
    Inspect {
        /// Input snapshot (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Check a snapshot for broken references and inconsistent flags
    Check {
        /// Input snapshot (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Re-derive join/split flags from the transitions
    Normalize {
        /// Input snapshot (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the normalized snapshot (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Per-process counts printed by `inspect`
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSummary {
    pub id: u32,
    pub xpdl_id: String,
    pub name: String,
    pub actors: usize,
    pub activities: usize,
    pub transitions: usize,
    pub applications: usize,
}

impl From<&Process> for ProcessSummary {
    fn from(process: &Process) -> Self {
        Self {
            id: process.id(),
            xpdl_id: process.detail.xpdl_id.clone(),
            name: process.detail.name.clone(),
            actors: process.actors.len(),
            activities: process.nodes.iter().filter(|n| n.is_activity()).count(),
            transitions: process.edges.iter().filter(|e| e.is_transition()).count(),
            applications: process.detail.applications.len(),
        }
    }
}

/// Main CLI application
#[derive(Default)]
pub struct XpdlEditorApp;

impl XpdlEditorApp {
    /// Create a new application instance
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // environment variables take precedence over flags
        let log_level_str = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("xpdl-editor v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::New { output, name } => self.new_command(output, name, cli.verbose),
            Commands::Inspect { input, json } => self.inspect_command(input, json, cli.verbose),
            Commands::Check { input } => self.check_command(input, cli.verbose),
            Commands::Normalize { input, output } => {
                self.normalize_command(input, output, cli.verbose)
            }
        }
    }

    /// Handle the new command
    fn new_command(&self, output: Option<PathBuf>, name: Option<String>, verbose: bool) -> Result<()> {
        let mut project = create_project(chrono::Utc::now());
        if let Some(name) = name {
            project.detail.name = name;
        }
        info!(xpdl_id = %project.detail.xpdl_id, "Created project");
        if verbose {
            eprintln!("Created project '{}'", project.detail.name);
        }
        self.write_output(output, &project_to_json(&project)?)
    }

    /// Handle the inspect command
    fn inspect_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let project = self.read_project(input, verbose)?;
        let summaries: Vec<ProcessSummary> =
            project.processes.iter().map(ProcessSummary::from).collect();

        if json {
            let report = serde_json::json!({
                "project": project.detail,
                "processes": summaries,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("Project: {} ({})", project.detail.name, project.detail.xpdl_id);
            for summary in &summaries {
                println!(
                    "  {} {}: {} activities, {} transitions, {} actors, {} applications",
                    summary.xpdl_id,
                    summary.name,
                    summary.activities,
                    summary.transitions,
                    summary.actors,
                    summary.applications
                );
            }
            println!();
            println!("Total: {} processes", summaries.len());
        }
        Ok(())
    }

    /// Handle the check command
    fn check_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let project = self.read_project(input, verbose)?;
        let violations = audit_project(&project);
        debug!(violations = violations.len(), "Audit finished");

        if violations.is_empty() {
            println!("✓ Valid project ({} processes)", project.processes.len());
            return Ok(());
        }
        for violation in &violations {
            println!("✗ {}", violation);
        }
        bail!("{} problems found", violations.len())
    }

    /// Handle the normalize command
    fn normalize_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let mut project = self.read_project(input, verbose)?;
        let changed: usize = project.processes.iter_mut().map(normalize_process).sum();
        info!(changed, "Join/split flags normalized");
        if verbose {
            eprintln!("Updated {} activities", changed);
        }
        self.write_output(output, &project_to_json(&project)?)
    }

    fn read_project(&self, input: Option<PathBuf>, verbose: bool) -> Result<Project> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }
        let project = project_from_json(&content)?;
        if project.processes.is_empty() {
            return Err(anyhow!("Project '{}' has no processes", project.detail.xpdl_id));
        }
        Ok(project)
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file '{}'", path.display())),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content)
                    .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

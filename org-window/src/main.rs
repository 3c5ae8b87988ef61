use std::{
    io::{self, BufRead, IsTerminal},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use org_window::date::AbsoluteDay;
use org_window::query::Highlight;
use org_window::session::{COMMAND_NAMES, CollaboratorError, SessionSnapshot};
use org_window::{CalendarDisplay, Command, CompiledQuery, DocumentFilter, Session, WindowConfig};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "org-window",
    about = "Steer an Org sparse-tree date window and print its match string",
    version
)]
struct Cli {
    /// Enable verbose logging for debugging.
    #[arg(long, global = true)]
    verbose: bool,
    /// TOML file with filter groups and window defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay window commands and print the resulting query.
    Run(RunArgs),

    /// List the accepted command names.
    Commands,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Commands such as `shift-range-forward:3`; read from stdin (one per line) when omitted.
    commands: Vec<String>,
    /// Treat this date (YYYY-MM-DD) as today.
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Emit JSON instead of a human-readable report.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    match cli.command {
        Commands::Run(args) => handle_run(args, cli.config.as_deref()),
        Commands::Commands => {
            for name in COMMAND_NAMES {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        tracing::debug!(error = %err, "tracing subscriber already set, continuing");
    }
    Ok(())
}

/* ------------------------------ Collaborators ------------------------------ */

/// Calendar with a fixed "today" that remembers what it was asked to show.
#[derive(Debug)]
struct FixedCalendar {
    today: AbsoluteDay,
    cursor: Option<AbsoluteDay>,
    painted: Vec<Highlight>,
}

impl FixedCalendar {
    fn new(today: AbsoluteDay) -> Self {
        Self {
            today,
            cursor: None,
            painted: vec![],
        }
    }
}

impl CalendarDisplay for FixedCalendar {
    fn today(&self) -> AbsoluteDay {
        self.today
    }

    fn paint(&mut self, highlights: &[Highlight]) -> Result<(), CollaboratorError> {
        self.painted = highlights.to_vec();
        Ok(())
    }

    fn focus(&mut self, day: AbsoluteDay) -> Result<(), CollaboratorError> {
        self.cursor = Some(day);
        Ok(())
    }
}

/// Records every query handed to the document.
#[derive(Debug, Default)]
struct RecordingFilter {
    applied: Vec<String>,
}

impl DocumentFilter for RecordingFilter {
    fn apply(&mut self, query: &str) -> Result<(), CollaboratorError> {
        self.applied.push(query.to_string());
        Ok(())
    }
}

/* --------------------------------- Run --------------------------------- */

fn handle_run(args: RunArgs, config_path: Option<&Path>) -> Result<()> {
    let RunArgs {
        commands,
        today,
        json,
    } = args;

    let config = match config_path {
        Some(path) => WindowConfig::load(path)?,
        None => WindowConfig::default(),
    };
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let lines = if commands.is_empty() {
        read_commands(io::stdin().lock()).context("reading commands from stdin")?
    } else {
        commands
    };

    let mut session = replay(&config, AbsoluteDay::from_date(today), &lines)?;
    let compiled = session.compile()?;
    let snapshot = session.snapshot();
    let (calendar, document) = session.into_parts();

    if json {
        print_json(&compiled, &snapshot, &calendar, &document)
    } else {
        print_text(&compiled, &snapshot, &calendar, &document)
    }
}

fn replay(
    config: &WindowConfig,
    today: AbsoluteDay,
    lines: &[String],
) -> Result<Session<FixedCalendar, RecordingFilter>> {
    let mut session = Session::new(config, FixedCalendar::new(today), RecordingFilter::default());
    for line in lines {
        let command: Command = line
            .parse()
            .with_context(|| format!("parsing command {line:?}"))?;
        session
            .execute(command)
            .with_context(|| format!("executing {line:?}"))?;
    }
    Ok(session)
}

/// One command per line; blank lines and `#` comments are skipped.
fn read_commands(reader: impl BufRead) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        out.push(trimmed.to_string());
    }
    Ok(out)
}

fn print_text(
    compiled: &CompiledQuery,
    snapshot: &SessionSnapshot,
    calendar: &FixedCalendar,
    document: &RecordingFilter,
) -> Result<()> {
    println!("query: {}", compiled.text().unwrap_or("(none)"));
    if let Some(bounds) = snapshot.bounds {
        println!(
            "window: {} .. {} (midpoint {}, selector {:?})",
            bounds.left.format_iso()?,
            bounds.right.format_iso()?,
            bounds.midpoint.format_iso()?,
            bounds.selector
        );
    }
    println!(
        "time mode: {:?}, auto-apply: {}",
        snapshot.time_mode, snapshot.auto_apply
    );

    if !compiled.highlights.is_empty() {
        let marks = compiled
            .highlights
            .iter()
            .map(|h| -> Result<String> {
                let date = h.day.format_iso()?;
                Ok(if h.is_midpoint {
                    format!("[{date}]")
                } else {
                    date
                })
            })
            .collect::<Result<Vec<_>>>()?;
        println!("highlights: {}", marks.join(" "));
    }
    if let Some(cursor) = calendar.cursor {
        println!(
            "calendar cursor: {} ({} day(s) painted)",
            cursor.format_iso()?,
            calendar.painted.len()
        );
    }
    for query in &document.applied {
        println!("applied: {query}");
    }
    Ok(())
}

fn print_json(
    compiled: &CompiledQuery,
    snapshot: &SessionSnapshot,
    calendar: &FixedCalendar,
    document: &RecordingFilter,
) -> Result<()> {
    #[derive(Serialize)]
    struct JsonHighlight {
        date: String,
        midpoint: bool,
    }

    #[derive(Serialize)]
    struct JsonOutput<'a> {
        query: Option<&'a str>,
        state: &'a SessionSnapshot,
        highlights: Vec<JsonHighlight>,
        cursor: Option<String>,
        applied: &'a [String],
    }

    let highlights = compiled
        .highlights
        .iter()
        .map(|h| -> Result<JsonHighlight> {
            Ok(JsonHighlight {
                date: h.day.format_iso()?,
                midpoint: h.is_midpoint,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let payload = JsonOutput {
        query: compiled.text(),
        state: snapshot,
        highlights,
        cursor: calendar.cursor.map(|d| d.format_iso()).transpose()?,
        applied: &document.applied,
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

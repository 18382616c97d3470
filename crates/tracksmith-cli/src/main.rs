//! Tracksmith CLI.
//!
//! Generates typed event records and tracker dispatch code from a directory
//! of JSON-Schema event definitions.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use tracing_subscriber::EnvFilter;

use tracksmith_compiler::{CheckResult, CompileResult, Compiler, CompilerConfig, Gap, SkippedSchema, TrackerConfig};

mod ui;

#[derive(Parser)]
#[command(name = "tracksmith", version)]
#[command(about = "Tracksmith - generates typed analytics event code from JSON Schema")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Options for `generate` when no command is given
    #[command(flatten)]
    generate: GenerateArgs,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate records, dispatch entries and the payload validator (default)
    Generate(GenerateArgs),

    /// Parse and lower every schema without writing anything
    Check(GenerateArgs),

    /// Generate, then regenerate whenever the schema directory changes
    Watch {
        #[command(flatten)]
        args: GenerateArgs,

        /// Debounce window in milliseconds
        #[arg(long, default_value_t = 500)]
        debounce_ms: u64,
    },
}

#[derive(Args, Clone, Debug)]
struct GenerateArgs {
    /// Directory containing *.json event schemas
    #[arg(short, long, default_value = "Schema")]
    schemas: PathBuf,

    /// Output directory for generated sources
    #[arg(short, long, default_value = "Sources")]
    output: PathBuf,

    /// Target language (swift, typescript)
    #[arg(short, long, default_value = "swift")]
    target: String,

    /// Root property whose items are flattened into per-field columns
    #[arg(long, default_value = "productItems")]
    line_items: String,

    /// File stem of the shared dispatch file
    #[arg(long, default_value = "TrackerExtension")]
    dispatch_file: String,

    /// Module the dispatch file imports the tracker from
    #[arg(long, default_value = "RakutenAnalytics")]
    tracker_module: String,

    /// Tracker type the dispatch entries are attached to
    #[arg(long, default_value = "RAnalyticsRATTracker")]
    tracker_type: String,
}

impl GenerateArgs {
    fn into_config(self) -> CompilerConfig {
        CompilerConfig {
            schema_dir: self.schemas,
            out_dir: self.output,
            target: self.target,
            line_items_field: self.line_items,
            dispatch_file: self.dispatch_file,
            tracker: TrackerConfig {
                module: self.tracker_module,
                type_name: self.tracker_type,
            },
        }
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        None => generate(cli.generate),
        Some(Commands::Generate(args)) => generate(args),
        Some(Commands::Check(args)) => check(args),
        Some(Commands::Watch { args, debounce_ms }) => watch(args, Duration::from_millis(debounce_ms)),
    }
}

fn generate(args: GenerateArgs) -> miette::Result<()> {
    ui::print_compact_header(env!("CARGO_PKG_VERSION"));
    println!();

    let compiler = Compiler::new(args.into_config());
    let spinner = ui::spinner("Generating event code...");
    let start = Instant::now();

    match compiler.compile() {
        Ok(result) => {
            spinner.finish_and_clear();
            print_compile_result(compiler.config(), &result);
            println!();
            ui::timing("Done", start.elapsed().as_millis());
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::nope_header();
            Err(e.into())
        }
    }
}

fn check(args: GenerateArgs) -> miette::Result<()> {
    let compiler = Compiler::new(args.into_config());
    let spinner = ui::spinner("Checking event schemas...");

    let result = compiler.check();
    spinner.finish_and_clear();
    let result = result.map_err(|e| {
        ui::nope_header();
        miette::Report::from(e)
    })?;

    print_check_result(&result);
    if result.skipped.is_empty() {
        Ok(())
    } else {
        Err(miette::miette!(
            "{} would be skipped",
            ui::count(result.skipped.len(), "schema", "schemas")
        ))
    }
}

fn watch(args: GenerateArgs, debounce: Duration) -> miette::Result<()> {
    let schema_dir = args.schemas.clone();
    let compiler = Compiler::new(args.into_config());

    ui::info(&format!("Watching for changes in {}", schema_dir.display()));
    println!();
    run_once(&compiler);

    let (tx, rx) = mpsc::channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(debounce, tx).into_diagnostic()?;
    debouncer
        .watcher()
        .watch(&schema_dir, RecursiveMode::NonRecursive)
        .into_diagnostic()?;

    println!();
    ui::info("Ready! Waiting for changes...");

    // Runs are sequential: a change during a run is picked up by the next one.
    for result in rx {
        match result {
            Ok(events) if events.iter().any(|e| is_schema_file(&e.path)) => {
                println!();
                run_once(&compiler);
                println!();
                ui::info("Ready! Waiting for changes...");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "file watcher error"),
        }
    }

    ui::dim("Stopping watch mode.");
    Ok(())
}

/// One watch-mode compilation. Failures are reported, not fatal.
fn run_once(compiler: &Compiler) {
    let spinner = ui::spinner("Regenerating...");
    let start = Instant::now();
    match compiler.compile() {
        Ok(result) => {
            spinner.finish_and_clear();
            ui::success(&format!(
                "Generated {} and {} in {}ms",
                ui::count(result.schemas, "schema", "schemas"),
                ui::count(result.entries_added, "new dispatch entry", "new dispatch entries"),
                start.elapsed().as_millis()
            ));
            print_problems(&result.gaps, &result.skipped);
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::error(&e.to_string());
        }
    }
}

fn is_schema_file(path: &Path) -> bool {
    path.extension().map(|ext| ext == "json").unwrap_or(false)
}

fn print_compile_result(config: &CompilerConfig, result: &CompileResult) {
    ui::success(&format!(
        "Generated {} ({})",
        ui::count(result.schemas, "schema", "schemas"),
        ui::count(result.records, "record", "records")
    ));
    println!();

    ui::box_header("FILES");
    ui::box_line("");
    for file in &result.files {
        let shown = file.strip_prefix(&config.out_dir).unwrap_or(file);
        ui::box_line(&format!(" {} {}", ui::symbols::TRIANGLE, shown.display()));
    }
    ui::box_line("");
    ui::box_footer();
    println!();

    ui::info(&format!(
        "Dispatch: {} added {} {} already present",
        result.entries_added,
        ui::symbols::DOT,
        result.entries_existing
    ));
    if !result.dispatch_written {
        ui::dim("Dispatch file unchanged.");
    }
    print_problems(&result.gaps, &result.skipped);
}

fn print_check_result(result: &CheckResult) {
    if result.skipped.is_empty() {
        ui::looking_good();
    } else {
        ui::nope_header();
    }
    println!();
    println!(
        "    {} {} {} {} {} pending",
        ui::count(result.schemas, "schema", "schemas"),
        ui::symbols::DOT,
        ui::count(result.records, "record", "records"),
        ui::symbols::DOT,
        ui::count(result.entries_pending, "dispatch entry", "dispatch entries"),
    );
    print_problems(&result.gaps, &result.skipped);
}

fn print_problems(gaps: &[Gap], skipped: &[SkippedSchema]) {
    if gaps.is_empty() && skipped.is_empty() {
        return;
    }
    println!();
    for schema in skipped {
        ui::error(&format!("Skipped {}: {}", schema.path.display(), schema.reason));
    }
    for gap in gaps {
        ui::warn(&format!("{}: {}, typed as Any", gap.location, gap.detail));
    }
}

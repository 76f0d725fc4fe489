//! yannlib: STEP model generator and KiCad setup tool for YannLib.
//!
//! Generates the 3D models of the library's components and registers the
//! library in a KiCad project's library tables.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use yannlib_tools::components::{self, ComponentModel};
use yannlib_tools::config::{self, Config};
use yannlib_tools::kicad::{LibTableError, LibrarySetup};
use yannlib_tools::model::ModelError;
use yannlib_tools::LIBRARY_NAME;

/// STEP model generator and KiCad setup tool for the YannLib library.
#[derive(Parser, Debug)]
#[command(name = "yannlib")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(long, global = true, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Library root directory (defaults to the configured path)
    #[arg(long, global = true, value_name = "DIR")]
    library_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate STEP models into YannLib.3dmodels
    Generate {
        /// Components to generate (all when omitted)
        #[arg(value_name = "COMPONENT")]
        components: Vec<String>,
    },

    /// List the components that can be generated
    List,

    /// Add YannLib to the project's fp-lib-table and sym-lib-table
    Setup {
        /// Project root (defaults to two levels above the library)
        #[arg(long, value_name = "DIR")]
        project_dir: Option<PathBuf>,
    },
}

/// Failures of a single command.
#[derive(Debug, Error)]
enum CommandError {
    #[error("Unknown component '{0}' (see `yannlib list`)")]
    UnknownComponent(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    LibTable(#[from] LibTableError),
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Picks the library root: CLI flag, then config, then the source tree.
fn resolve_library_dir(cli: Option<&Path>, cfg: &Config) -> PathBuf {
    cli.or(cfg.library_path.as_deref())
        .map_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")), Path::to_path_buf)
}

/// Resolves component names, keeping the catalogue order when none given.
fn select_components(names: &[String]) -> Result<Vec<Box<dyn ComponentModel>>, CommandError> {
    if names.is_empty() {
        return Ok(components::catalogue());
    }
    names
        .iter()
        .map(|name| {
            components::find(name).ok_or_else(|| CommandError::UnknownComponent(name.clone()))
        })
        .collect()
}

fn generate(names: &[String], library_dir: &Path, cfg: &Config) -> Result<(), CommandError> {
    let tessellation = cfg.tessellation();
    for model in select_components(names)? {
        info!(component = model.name(), "Generating model");
        let assembly = model.build(&tessellation)?;
        let path = model.output_path(library_dir);
        assembly.save(&path)?;
        println!("STEP file saved to: {}", path.display());
    }
    Ok(())
}

fn list() {
    for model in components::catalogue() {
        println!("{:<12} {}", model.name(), model.description());
    }
}

fn setup(library_dir: &Path, project_dir: Option<&Path>) -> Result<(), CommandError> {
    let setup = LibrarySetup::new(library_dir, project_dir)?;

    println!("{LIBRARY_NAME} Setup");
    println!("=============");
    println!("Library path: {}", setup.library_dir().display());
    println!("Project root: {}", setup.project_dir().display());
    println!("Relative path: {}", setup.relative_path());
    println!();

    for (kind, status) in setup.register_all()? {
        println!("✓ {kind}: {status}");
    }

    println!();
    println!("Done! Restart KiCAD to use {LIBRARY_NAME}.");
    Ok(())
}

/// Entry point for the yannlib tool.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    run(&args, &cfg, &mut std::io::stderr())
}

/// Runs the selected command, reporting a failure on `stderr`.
fn run(args: &Args, cfg: &Config, stderr: &mut impl Write) -> ExitCode {
    let library_dir = resolve_library_dir(args.library_dir.as_deref(), cfg);
    info!(library = %library_dir.display(), "Using library directory");

    let result = match &args.command {
        Command::Generate { components } => generate(components, &library_dir, cfg),
        Command::List => {
            list();
            Ok(())
        }
        Command::Setup { project_dir } => setup(&library_dir, project_dir.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            let _ = writeln!(stderr, "Error: {e}");
            ExitCode::FAILURE
        }
    }
}

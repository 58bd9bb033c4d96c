use crate::{
    bump::{
        prompt::{Selection, run_and_report, select_init_files},
        update::UpdateOptions,
    },
    types::{target::Target, version::IncrementKind},
    utils::{
        config::Config,
        fs::get_cwd,
        logger::{LogLevel, Logger},
        semver,
        signature::get_signature,
        version::get_version,
    },
};
use clap::CommandFactory;
use clap::FromArgMatches;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::io;

mod bump;
mod types;
mod utils;

#[derive(Parser)]
#[command(name = "verbump")]
#[command(author = "Labscend Studios")]
#[command(about = "Bump semantic versions in setup.py and __init__.py files")]
struct Cli {
    /// Path to a verbump.toml (defaults to the nearest one above the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BumpArgs {
    /// Increment type: major | minor | patch | prealpha | prebeta | prerc | pre<label>
    #[arg(short = 't', long = "type")]
    kind: Option<String>,

    /// Do not create a .bak copy of the original file
    #[arg(long, default_value_t = false)]
    no_backup: bool,

    /// Show the new version without writing anything
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Bump the version="..." keyword in setup.py
    Setup {
        #[command(flatten)]
        bump: BumpArgs,

        /// Path to setup.py
        #[arg(short, long, default_value = "setup.py")]
        file: PathBuf,
    },

    /// Bump __version__ in a package __init__.py
    Init {
        #[command(flatten)]
        bump: BumpArgs,

        /// Path to __init__.py (searched recursively when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Directory to search when no file is given
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Update every discovered file without prompting
        #[arg(short, long, default_value_t = false)]
        all: bool,
    },

    /// Print the version that follows CURRENT without touching any file
    Next {
        /// Current version; omit for a project without one yet
        current: Option<String>,

        /// Increment type: major | minor | patch | pre<label>
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let version = get_version();
    let signature = get_signature(&version);

    let version_static: &'static str = Box::leak(format!("v{}", version).into_boxed_str());
    let signature_static: &'static str = Box::leak(signature.into_boxed_str());

    let raw_args: Vec<String> = std::env::args().collect();
    if raw_args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", signature_static);
        return Ok(());
    }

    let cmd = Cli::command().version(version_static);
    let matches = cmd.get_matches();
    let cli = Cli::from_arg_matches(&matches).map_err(|e| io::Error::other(e.to_string()))?;

    let cwd = get_cwd().map_err(io::Error::other)?;
    let config = Config::load(cli.config.as_deref(), &cwd).map_err(io::Error::other)?;
    if config.bump.verbose {
        Logger::enable_debug();
    }
    if let Some(source) = &config.source {
        Logger::new().debug(&format!("Using config {}", source.display()));
    }

    let result = match cli.command {
        Commands::Setup { bump, file } => {
            run_bump(&config, &bump, Target::Setup, vec![cwd.join(file)]).await
        }

        Commands::Init {
            bump,
            file,
            dir,
            all,
        } => {
            let paths = match file {
                Some(f) => vec![cwd.join(f)],
                None => {
                    let root = dir.map(|d| cwd.join(d)).unwrap_or_else(|| cwd.clone());
                    match select_init_files(&root, &config.search.ignore, all) {
                        Ok(Selection::Files(files)) => files,
                        Ok(Selection::Aborted) => {
                            Logger::new().log_message(LogLevel::Warning, "Aborted by user.");
                            return Ok(());
                        }
                        Err(e) => return Err(fail(e)),
                    }
                }
            };
            run_bump(&config, &bump, Target::Init, paths).await
        }

        Commands::Next {
            current,
            kind,
            json,
        } => print_next(&config, current.as_deref(), kind.as_deref(), json),
    };

    result.map_err(fail)
}

fn fail(message: String) -> io::Error {
    Logger::new().log_message(LogLevel::Error, &format!("❌ {}", message));
    io::Error::other(message)
}

fn resolve_kind(config: &Config, requested: Option<&str>) -> Result<IncrementKind, String> {
    requested
        .unwrap_or(config.bump.kind.as_str())
        .parse::<IncrementKind>()
        .map_err(|e| e.to_string())
}

async fn run_bump(
    config: &Config,
    args: &BumpArgs,
    target: Target,
    paths: Vec<PathBuf>,
) -> Result<(), String> {
    let kind = resolve_kind(config, args.kind.as_deref())?;
    let options = UpdateOptions {
        backup: config.bump.backup && !args.no_backup,
        dry_run: args.dry_run,
    };
    Logger::new().debug(&format!(
        "Bumping {} file(s) with '{}' (backup: {}, dry run: {})",
        paths.len(),
        kind,
        options.backup,
        options.dry_run
    ));

    let total = paths.len();
    let failures =
        tokio::task::spawn_blocking(move || run_and_report(&paths, target, &kind, options))
            .await
            .map_err(|e| format!("Join error: {}", e))?;

    if failures > 0 {
        return Err(format!("{} of {} file(s) could not be updated", failures, total));
    }
    Ok(())
}

fn print_next(
    config: &Config,
    current: Option<&str>,
    kind: Option<&str>,
    json: bool,
) -> Result<(), String> {
    let kind = resolve_kind(config, kind)?;
    let current = current.map(str::trim).filter(|c| !c.is_empty());
    let parsed = current
        .map(semver::parse)
        .transpose()
        .map_err(|e| e.to_string())?;
    let next = semver::increment(parsed.as_ref(), &kind);

    if json {
        let payload = serde_json::json!({
            "previous": current,
            "next": next.to_string(),
            "version": next,
        });
        let text = serde_json::to_string_pretty(&payload)
            .map_err(|e| format!("Failed to serialize result: {}", e))?;
        println!("{}", text);
    } else {
        println!("{}", next);
    }
    Ok(())
}

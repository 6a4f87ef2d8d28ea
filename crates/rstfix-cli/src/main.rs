use anyhow::{Context, Result, bail};
use clap::Parser;
use rstfix_config::{Config, ErrorPolicy};
use rstfix_engine::{IoError, Pipeline, RstFile, WalkSummary, io};
use std::path::{Path, PathBuf};
use std::process;

/// Rewrite legacy pipe-prefixed literal markup in reStructuredText files.
#[derive(Debug, Parser)]
#[command(name = "rstfix", version, about, long_about = None)]
struct Cli {
    /// Documentation root to rewrite in place (defaults to `root` from the config file)
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,

    /// Config file to use instead of ~/.config/rstfix/config.toml
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Extension of files to rewrite
    #[arg(short, long, value_name = "EXT")]
    extension: Option<String>,

    /// Skip files that fail to read or write instead of stopping
    #[arg(short, long)]
    keep_going: bool,

    /// More logging (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Settings after merging the command line over the config file.
#[derive(Debug, PartialEq)]
struct Settings {
    root: PathBuf,
    extension: String,
    on_error: ErrorPolicy,
}

fn resolve_settings(cli: &Cli, config: Option<Config>) -> Result<Settings> {
    let config = config.unwrap_or_default();

    let Some(root) = cli.root.clone().or(config.root) else {
        bail!(
            "No documentation root provided. Pass ROOT or set `root` in {}",
            Config::config_path().display()
        );
    };

    let on_error = if cli.keep_going {
        ErrorPolicy::Skip
    } else {
        config.on_error
    };

    Ok(Settings {
        root,
        extension: cli.extension.clone().unwrap_or(config.extension),
        on_error,
    })
}

fn load_config(cli: &Cli) -> Result<Option<Config>> {
    let config = match &cli.config {
        Some(path) => {
            let config = Config::load_from_path(path)?;
            if config.is_none() {
                bail!("Config file {} does not exist", path.display());
            }
            config
        }
        None => Config::load()?,
    };
    Ok(config)
}

fn run(settings: &Settings) -> Result<WalkSummary> {
    io::validate_root(&settings.root)
        .with_context(|| format!("Cannot rewrite {}", settings.root.display()))?;

    log::info!(
        "Rewriting .{} files under {}",
        settings.extension,
        settings.root.display()
    );

    let pipeline = Pipeline::standard();
    let summary = match settings.on_error {
        ErrorPolicy::Abort => {
            io::process_directory(&settings.root, &settings.extension, &pipeline)
        }
        ErrorPolicy::Skip => {
            io::process_directory_keep_going(&settings.root, &settings.extension, &pipeline)
        }
    }
    .context("Rewrite stopped")?;

    Ok(summary)
}

/// The file or directory an I/O failure in the error chain points at.
fn failed_path(err: &anyhow::Error) -> Option<&Path> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<IoError>())
        .and_then(IoError::path)
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG still overrides the flags
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let result = load_config(&cli)
        .and_then(|config| resolve_settings(&cli, config))
        .and_then(|settings| run(&settings).map(|summary| (settings, summary)));

    match result {
        Ok((settings, summary)) => {
            for path in &summary.skipped {
                match RstFile::from_absolute(&settings.root, path) {
                    Some(file) => eprintln!("Skipped: {file}"),
                    None => eprintln!("Skipped: {}", path.display()),
                }
            }
            println!(
                "Done: {} file(s) scanned, {} rewritten, {} skipped",
                summary.scanned,
                summary.rewritten,
                summary.skipped.len()
            );
            if !summary.skipped.is_empty() {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            if let Some(path) = failed_path(&e) {
                eprintln!("Stopped at: {}", path.display());
            }
            process::exit(1);
        }
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use relkit::commands::{self, exit_codes};
use relkit::config::Config;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "relkit")]
#[command(
    author,
    version,
    about = "Release pipeline helpers: version bumps, lock file digests and audit report conversion"
)]
struct Cli {
    /// Config file to use instead of relkit.toml / the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bump the manifest version (and lock entry) and print the new version
    Bump {
        /// Version currently declared in the manifest
        current: String,

        /// Version to bump to (default: next patch of current)
        next: Option<String>,

        /// Manifest path
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Lock file path
        #[arg(long)]
        lock: Option<PathBuf>,

        /// Package whose lock entry is updated (default: manifest package name)
        #[arg(long)]
        package: Option<String>,
    },

    /// Print the next patch version without touching any file
    NextPatch {
        current: String,
    },

    /// Convert a cargo-audit JSON report into generic issue JSON
    Convert {
        input: PathBuf,
        output: PathBuf,
    },

    /// Print the lock file's SHA-256 as hash=<hex> and publish it to CI
    LockHash {
        /// Lock file path (default: Cargo.lock)
        path: Option<PathBuf>,
    },

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

fn main() -> ExitCode {
    commands::init_logging();
    commands::exit(run())
}

fn run() -> Result<u8> {
    let cli = Cli::parse();
    let load = || Config::load_with(cli.config.as_deref());

    match cli.command {
        Commands::Bump {
            current,
            next,
            manifest,
            lock,
            package,
        } => {
            let mut version = load()?.version;
            if let Some(manifest) = manifest {
                version.manifest = manifest;
            }
            if let Some(lock) = lock {
                version.lock = lock;
            }
            if package.is_some() {
                version.package = package;
            }
            commands::bump(&version, &current, next.as_deref())
        }
        Commands::NextPatch { current } => commands::print_next_patch(&current),
        Commands::Convert { input, output } => {
            commands::convert(&load()?.advisory, &input, &output)
        }
        Commands::LockHash { path } => {
            let config = load()?;
            let path = path.unwrap_or_else(|| config.version.lock.clone());
            commands::publish_lock_hash(&config.digest, &path)
        }
        Commands::Config { init, path } => {
            handle_config(&Config::resolved_path(cli.config.as_deref()), init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn handle_config(config_path: &Path, init: bool, show_path: bool) -> Result<()> {
    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        Config::default().save(config_path)?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    // Show current config
    if config_path.exists() {
        let content = std::fs::read_to_string(config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'relkit config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}

use anyhow::Context;
use clap::{Parser, Subcommand};
use openface::config::Config;
use openface::models::download::format_bytes;
use openface::models::{verify_installation, HttpFetcher, ModelPaths, Outcome, Provisioner};
use openface::prompt::{AssumeYes, Confirm, TerminalConfirm};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "openface")]
#[command(about = "Download and manage OpenFace landmark detection models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download all models into ./openface_models or PATH
    Download {
        /// Target directory (its parent must exist)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Answer yes to every prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Install all models for the current user (~/.openface)
    Install {
        /// Answer yes to every prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the model directory that would be used
    Where,
    /// Check a model directory for missing files
    Verify {
        /// Directory to check (defaults to the active one)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load config")?;
    let paths = ModelPaths::from_config(&config.models)?;

    match cli.command {
        Commands::Download { path, yes } => {
            let fetcher = HttpFetcher::new(&config.download)?;
            let mut confirm = confirmer(yes);
            let mut provisioner = Provisioner::new(&fetcher, confirm.as_mut(), &paths)
                .with_repo_base(config.download.repo_base.clone());
            report(provisioner.download_models(path.as_deref())?);
        }
        Commands::Install { yes } => {
            let fetcher = HttpFetcher::new(&config.download)?;
            let mut confirm = confirmer(yes);
            let mut provisioner = Provisioner::new(&fetcher, confirm.as_mut(), &paths)
                .with_repo_base(config.download.repo_base.clone());
            report(provisioner.install_models()?);
        }
        Commands::Where => {
            println!("{}", paths.resolve_active()?.display());
        }
        Commands::Verify { path } => {
            let root = match path {
                Some(path) => path,
                None => paths.resolve_active()?,
            };
            let result = verify_installation(&root)?;

            if let Some(receipt) = &result.receipt {
                println!(
                    "Installed {} ({} files, {}, {} patch(es) from backup mirrors)",
                    receipt.installed_at,
                    receipt.files,
                    format_bytes(receipt.total_bytes),
                    receipt.backup_count()
                );
            }

            if result.is_complete() {
                println!("✓ {} is complete ({} files)", root.display(), result.expected);
            } else {
                eprintln!(
                    "✗ {} is missing {} of {} files:",
                    root.display(),
                    result.missing.len(),
                    result.expected
                );
                for file in &result.missing {
                    eprintln!("  {}", file.display());
                }
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirm)
    }
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Installed(path) => println!("Models installed to {}", path.display()),
        Outcome::Declined => println!(),
    }
}

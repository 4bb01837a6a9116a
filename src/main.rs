use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use vertag::config;
use vertag::git::Git2Repository;
use vertag::naming::TagPattern;
use vertag::{tagger, ui};

#[derive(clap::Parser)]
#[command(
    name = "vertag",
    about = "Create and push a release tag named after the commit count"
)]
struct Args {
    #[arg(default_value = ".", help = "Path to the git repository")]
    path: PathBuf,

    #[arg(short, long, help = "Remote to push the tag to")]
    remote: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Preview the tag that would be created without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("vertag {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let config = match config::load_config(args.config.as_deref(), &args.path) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let pattern = match TagPattern::new(&config.pattern) {
        Ok(pattern) => pattern,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let remote = args.remote.unwrap_or(config.remote);

    // Open the repository at the explicit path
    let repo = match Git2Repository::open(&args.path) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if args.dry_run {
        let tag_name = match tagger::compute_tag_name(&repo, &pattern) {
            Ok(name) => name,
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        };
        ui::display_status(&format!(
            "Would create tag {} and push it to {}",
            tag_name, remote
        ));
        return Ok(());
    }

    match tagger::run(&repo, &remote, &pattern) {
        Ok(tag_name) => {
            ui::display_success(&format!("Created tag: {}", tag_name));
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

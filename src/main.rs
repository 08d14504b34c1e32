// SPDX-License-Identifier: PMPL-1.0-or-later

//! broadsheet: publish dated transcript collections as bilingual reading pages

use anyhow::{Context, Result};
use broadsheet::build::{self, BuildConfig};
use broadsheet::config::SiteConfig;
use broadsheet::manifest;
use broadsheet::report::{self, ReportFormatter, ReportOutputFormat};
use broadsheet::storage::WriteOutcome;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "broadsheet")]
#[command(version)]
#[command(about = "Publish dated transcript collections as bilingual reading pages")]
#[command(long_about = None)]
struct Cli {
    /// Increase log detail (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build pages for every collection under ROOT
    Build {
        /// Collection root
        #[arg(value_name = "ROOT", default_value = ".")]
        root: PathBuf,

        /// Save the build report to a file
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Report format (defaults to the report file extension)
        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,

        /// Only print totals
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write the archive manifest for year directories under ROOT
    Index {
        /// Archive root
        #[arg(value_name = "ROOT", default_value = ".")]
        root: PathBuf,

        /// Manifest path (default: ROOT/<manifest_file>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the shared stylesheet into DIR
    Stylesheet {
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            root,
            report: report_path,
            format,
            quiet,
        } => {
            let site = SiteConfig::load_from_root(&root)?;
            let config = BuildConfig::new(root, site);
            let build_report = build::run(&config)
                .with_context(|| format!("building {}", config.root.display()))?;

            report::print_report(&build_report, quiet);

            if let Some(path) = report_path {
                let format = format.unwrap_or_else(|| ReportOutputFormat::for_path(&path));
                report::save_report(&build_report, &path, format)?;
                println!("Report saved to: {}", path.display());
            }
        }

        Commands::Index { root, output } => {
            let site = SiteConfig::load_from_root(&root)?;
            let manifest_report = manifest::write_index(&root, &site, output.as_deref())?;
            ReportFormatter::new().print_manifest(&manifest_report);
        }

        Commands::Stylesheet { dir } => {
            let site = SiteConfig::load_from_root(&dir)?;
            let (path, outcome) = build::write_stylesheet(&dir, &site)?;
            match outcome {
                WriteOutcome::Written => println!("Wrote {}", path.display()),
                WriteOutcome::Unchanged => println!("{} is up to date", path.display()),
            }
        }
    }

    Ok(())
}

// SPDX-License-Identifier: PMPL-1.0-or-later

//! locale-sync: regenerate and audit translation dictionaries
//!
//! English namespace files are the source of truth; every other language is
//! brought to the same shape with existing translations kept, phrasebook
//! matches filled in and the remainder tagged for translators.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::*;
use locale_sync::config::Config;
use locale_sync::generate::{self, GenerateConfig};
use locale_sync::i18n::{self, LanguageProvider};
use locale_sync::phrasebook::{Phrasebook, Resolution};
use locale_sync::report::{self, ReportOutputFormat};
use locale_sync::status;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "locale-sync")]
#[command(version = "1.0.0")]
#[command(about = "Keep translation dictionaries in step with the English source")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file (default: ./locale-sync.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate every target language from the reference namespaces
    Generate {
        /// Root folder holding <lang>/<namespace>.json
        #[arg(long, value_name = "DIR")]
        locales: Option<PathBuf>,

        /// Phrasebook data file (YAML or JSON)
        #[arg(long, value_name = "FILE")]
        phrasebook: Option<PathBuf>,

        /// Only these target languages
        #[arg(short, long, value_delimiter = ',')]
        lang: Option<Vec<String>>,

        /// Where to write the run report
        #[arg(short, long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,

        /// Do not copy files aside before overwriting them
        #[arg(long)]
        no_backup: bool,
    },

    /// Audit the locale tree without changing anything
    Status {
        #[arg(long, value_name = "DIR")]
        locales: Option<PathBuf>,

        /// Also write the audit to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,
    },

    /// Resolve one English phrase through the phrasebook
    Lookup {
        #[arg(value_name = "PHRASE")]
        phrase: String,

        #[arg(short, long)]
        lang: String,

        #[arg(long, value_name = "FILE")]
        phrasebook: Option<PathBuf>,
    },

    /// Resolve a translation key the way the site does at runtime
    T {
        #[arg(value_name = "KEY")]
        key: String,

        #[arg(short, long)]
        lang: String,

        #[arg(long, value_name = "DIR")]
        locales: Option<PathBuf>,

        /// Interpolation parameter, repeatable
        #[arg(short, long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
    },

    /// List supported languages
    Languages,
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "locale_sync=debug" } else { "locale_sync=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to initialise logging: {}", err))
}

fn load_phrasebook(path: Option<&Path>) -> Result<Phrasebook> {
    match path {
        Some(path) => Phrasebook::load(path),
        None => Phrasebook::bundled(),
    }
}

fn parse_params(raw: &[String]) -> Result<Vec<(&str, &str)>> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .ok_or_else(|| anyhow!("parameter '{}' must look like name=value", pair))
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            locales,
            phrasebook,
            lang,
            report,
            format,
            no_backup,
        } => {
            if let Some(locales) = locales {
                config.locales_dir = locales;
            }
            if let Some(path) = phrasebook {
                config.phrasebook = Some(path);
            }
            if let Some(path) = report {
                config.report_path = path;
            }
            let format = format
                .or_else(|| ReportOutputFormat::from_path(&config.report_path))
                .unwrap_or_default();
            config.report_path = format.matching_path(&config.report_path);

            let phrasebook = load_phrasebook(config.phrasebook.as_deref())?;
            let run_config = GenerateConfig::from_config(&config, lang.as_deref(), no_backup)?;
            info!(
                languages = run_config.languages.len(),
                namespaces = run_config.namespaces.len(),
                "starting run over {}",
                run_config.locales_dir.display()
            );

            let run_report = generate::run(&run_config, &phrasebook)?;
            report::save_report(&run_report, &config.report_path, format)?;
            report::print_run_summary(&run_report);
            println!("Report saved to: {}", config.report_path.display());

            if !run_report.success {
                std::process::exit(1);
            }
        }

        Commands::Status {
            locales,
            output,
            format,
        } => {
            if let Some(locales) = locales {
                config.locales_dir = locales;
            }
            let audit = status::run(
                &config.locales_dir,
                &config.reference_language,
                &config.namespaces,
            )?;
            report::print_status(&audit);

            if let Some(path) = output {
                let format = format
                    .or_else(|| ReportOutputFormat::from_path(&path))
                    .unwrap_or_default();
                let path = format.matching_path(&path);
                report::save_report(&audit, &path, format)?;
                println!("Report saved to: {}", path.display());
            }

            if audit.broken > 0 {
                std::process::exit(1);
            }
        }

        Commands::Lookup {
            phrase,
            lang,
            phrasebook,
        } => {
            let lang = lang.trim().to_ascii_lowercase();
            if i18n::find(&lang).is_none() {
                return Err(anyhow!("unsupported language code '{}'", lang));
            }
            let phrasebook = load_phrasebook(phrasebook.as_deref().or(config.phrasebook.as_deref()))?;
            let how = match phrasebook.resolve(&phrase, &lang) {
                Resolution::Dictionary(text) => format!("{}  {}", text, "(phrasebook)".green()),
                Resolution::PassThrough(rule, text) => {
                    format!("{}  {}", text, format!("(pass-through: {:?})", rule).dimmed())
                }
                Resolution::Placeholder(text) => format!("{}  {}", text, "(placeholder)".yellow()),
            };
            println!("{}", how);
        }

        Commands::T {
            key,
            lang,
            locales,
            params,
        } => {
            if let Some(locales) = locales {
                config.locales_dir = locales;
            }
            let provider = LanguageProvider::load(
                &config.locales_dir,
                &lang,
                &config.reference_language,
                &config.namespaces,
            )?;
            let params = parse_params(&params)?;
            println!("{}", provider.t_with(&key, &params));
        }

        Commands::Languages => {
            println!("{}", "SUPPORTED LANGUAGES".bold().yellow());
            for lang in i18n::REGISTRY {
                let marker = if lang.code == config.reference_language {
                    " (reference)".cyan().to_string()
                } else {
                    String::new()
                };
                println!(
                    "  {:<4} {:<22} {:<20} {:<4} {}{}",
                    lang.code,
                    lang.name,
                    lang.native_name,
                    lang.direction.to_string(),
                    lang.region,
                    marker
                );
            }
        }
    }

    Ok(())
}

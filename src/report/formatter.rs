// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console summaries

use crate::generate::RunReport;
use crate::status::{Category, StatusReport};
use colored::*;

fn completion_color(percent: u8) -> &'static str {
    if percent >= 95 {
        "green"
    } else if percent >= 80 {
        "yellow"
    } else {
        "red"
    }
}

pub fn print_run_summary(report: &RunReport) {
    println!("\n{}", "=== LOCALE-SYNC RUN SUMMARY ===".bold().cyan());
    println!();
    println!("  Locales: {}", report.locales_dir.display());
    println!(
        "  Phrasebook: {} (v{}, sha256 {})",
        report.phrasebook_source,
        report.phrasebook_version,
        report.phrasebook_digest.get(..12).unwrap_or(&report.phrasebook_digest)
    );
    if let Some(dir) = &report.backup_dir {
        println!("  Backups: {}", dir.display());
    }
    println!();

    println!("{}", "LANGUAGES".bold().yellow());
    for outcome in &report.languages {
        let marker = if outcome.files_failed == 0 {
            "ok".green()
        } else {
            "FAILED".red()
        };
        println!(
            "  {:<4} {:<22} {:>3}% complete  {} files  {} placeholders  [{}]",
            outcome.code,
            outcome.name,
            outcome.completion.to_string().color(completion_color(outcome.completion)),
            outcome.files_written,
            outcome.stats.placeholders,
            marker
        );
    }
    println!();

    if !report.skipped_namespaces.is_empty() {
        println!(
            "  Skipped namespaces (no reference source): {}",
            report.skipped_namespaces.join(", ").dimmed()
        );
    }
    if !report.repaired.is_empty() {
        println!("  Regenerated from invalid JSON:");
        for file in &report.repaired {
            println!("    - {}", file.yellow());
        }
    }
    if !report.issues.is_empty() {
        println!("  Issues:");
        for issue in &report.issues {
            println!("    - {}", issue.red());
        }
    }

    println!(
        "  Languages processed: {}   Files written: {}   Validation errors: {}",
        report.languages_processed,
        report.files_written,
        if report.validation_errors == 0 {
            "0".green()
        } else {
            report.validation_errors.to_string().red().bold()
        }
    );
    let verdict = if report.success {
        "All files written and validated".green().bold()
    } else {
        "Run finished with errors".red().bold()
    };
    println!("  {}", verdict);
    println!();
}

pub fn print_status(report: &StatusReport) {
    println!("\n{}", "=== LOCALE STATUS ===".bold().cyan());
    println!();
    println!(
        "  Reference: {} ({} keys)",
        report.reference_language, report.reference_keys
    );
    println!();

    for (category, title) in [
        (Category::Perfect, "PERFECT"),
        (Category::Good, "GOOD"),
        (Category::NeedsWork, "NEEDS WORK"),
        (Category::Broken, "BROKEN"),
    ] {
        let members: Vec<_> = report
            .languages
            .iter()
            .filter(|l| l.category == category)
            .collect();
        if members.is_empty() {
            continue;
        }
        let heading = format!("{} ({})", title, members.len());
        let heading = match category {
            Category::Perfect => heading.green().bold(),
            Category::Good => heading.yellow().bold(),
            Category::NeedsWork => heading.magenta().bold(),
            Category::Broken => heading.red().bold(),
        };
        println!("{}", heading);
        for lang in members {
            let shape = if lang.shape_matches {
                String::new()
            } else {
                format!("  {}", "shape differs".yellow())
            };
            println!(
                "  {:<4} {:<22} {:>3}%  {}/{} files  {} placeholders{}",
                lang.code,
                lang.native_name,
                lang.quality,
                lang.valid_files,
                lang.namespaces.len(),
                lang.placeholders,
                shape
            );
        }
        println!();
    }

    if !report.orphans.is_empty() {
        println!("{}", "UNTRACKED FILES".bold().yellow());
        for orphan in &report.orphans {
            println!("  - {}", orphan.display().to_string().dimmed());
        }
        println!();
    }

    println!(
        "  Ready for production: {}% ({} of {} languages)",
        report.readiness().to_string().color(completion_color(report.readiness())).bold(),
        report.perfect + report.good,
        report.languages.len()
    );
    println!();
}

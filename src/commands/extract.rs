use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;
use tracing::{info, warn};

use crate::chapters::Seconds;
use crate::extract::{plan_extraction, UNTITLED};
use crate::toolkit::Toolkit;

pub fn run(
    toolkit: &Toolkit,
    input: &Path,
    output_dir: &Path,
    prefix: &str,
    min_duration: Seconds,
    no_dry_run: bool,
) -> Result<()> {
    if !input.is_file() {
        bail!("Input file not found: {}", input.display());
    }

    let format = toolkit
        .probe_format(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let chapters = toolkit
        .probe_chapters(input)
        .with_context(|| format!("Failed to read chapters from {}", input.display()))?;

    let book_title = format.title().unwrap_or(UNTITLED);
    let plan = plan_extraction(book_title, prefix, &chapters, min_duration);

    if plan.is_empty() {
        println!(
            "Fewer than two chapters of at least {}s in {}, nothing to extract",
            min_duration,
            input.display()
        );
        return Ok(());
    }

    if !no_dry_run {
        for planned in &plan {
            println!(
                "{} [{} +{}] → {}",
                planned.title,
                planned.start.clock(),
                planned.duration.clock(),
                output_dir.join(&planned.filename).display()
            );
        }
        println!();
        println!(
            "{} would extract {} chapter(s)",
            "Dry run:".yellow().bold(),
            plan.len()
        );
        println!("Use {} to apply.", "--no-dry-run".cyan());
        return Ok(());
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory {}", output_dir.display()))?;

    let mut extracted = 0;
    for planned in &plan {
        let output = output_dir.join(&planned.filename);
        info!("Processing {} : {}", planned.title, planned.filename);

        match toolkit.extract_segment(
            input,
            planned.start,
            planned.duration,
            &planned.title,
            &output,
        ) {
            Ok(()) => {
                extracted += 1;
                println!("{} {}", "✓".green(), planned.filename);
            }
            Err(e) => {
                warn!("Failed to extract '{}': {}", planned.title, e);
                println!("{} {}", "✗".red(), planned.filename);
            }
        }
    }

    println!();
    println!(
        "Extracted {} of {} chapter(s) to {}",
        extracted,
        plan.len(),
        output_dir.display()
    );

    if extracted == 0 {
        bail!("No chapters could be extracted");
    }
    Ok(())
}

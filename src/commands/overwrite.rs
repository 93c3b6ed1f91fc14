use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::metadata::read_timeline;
use crate::chapters::format_listing;
use crate::metadata::{render_metadata, MetadataDocument};
use crate::toolkit::Toolkit;

pub fn run(
    toolkit: &Toolkit,
    input: &Path,
    chapters_file: &Path,
    output: &Path,
    no_dry_run: bool,
    quiet: bool,
) -> Result<()> {
    if !input.is_file() {
        bail!("Input file does not exist: {}", input.display());
    }
    if !chapters_file.is_file() {
        bail!("Chapters file does not exist: {}", chapters_file.display());
    }
    if same_file(input, output) {
        bail!("Output must differ from input: {}", output.display());
    }

    let chapters = read_timeline(chapters_file)?;

    if !quiet {
        print!("{}", format_listing(&chapters));
        println!();
    }

    if !no_dry_run {
        println!(
            "{} would write {} chapter(s) to {}",
            "Dry run:".yellow().bold(),
            chapters.len(),
            output.display()
        );
        println!("Use {} to apply.", "--no-dry-run".cyan());
        return Ok(());
    }

    let text = render_metadata(&MetadataDocument::from_chapters(chapters));
    let metadata_path = temp_metadata_path();
    std::fs::write(&metadata_path, text)
        .with_context(|| format!("Failed to write {}", metadata_path.display()))?;
    info!("Metadata file {} created", metadata_path.display());

    let result = toolkit
        .apply_metadata(input, &metadata_path, output)
        .context("ffmpeg failed to apply chapter metadata");

    if let Err(e) = std::fs::remove_file(&metadata_path) {
        warn!(
            "Failed to delete temporary metadata file {}: {}",
            metadata_path.display(),
            e
        );
    }
    result?;

    println!(
        "{} New audiobook with updated chapters saved as {}",
        "✓".green(),
        output.display()
    );
    Ok(())
}

fn temp_metadata_path() -> PathBuf {
    std::env::temp_dir().join(format!("chapterctl_{}.ffmetadata", std::process::id()))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

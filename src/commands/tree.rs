use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::chapters::{build_hierarchy, filter_chapters, render_hierarchy, Chapter, Seconds};
use crate::extract::UNTITLED;
use crate::metadata::{parse_metadata, HEADER};
use crate::toolkit::Toolkit;

/// Show the chapter tree of a container, or of a metadata file such as one
/// exported with `ffmpeg -i book.m4b -f ffmetadata chapters.txt`
pub fn run(
    toolkit: &Toolkit,
    path: &Path,
    json: bool,
    min_duration: Seconds,
    indent: &str,
    quiet: bool,
) -> Result<()> {
    if !path.is_file() {
        bail!("Input file not found: {}", path.display());
    }

    let (title, chapters) = if is_metadata_file(path)? {
        read_metadata_file(path)?
    } else {
        probe_container(toolkit, path)?
    };

    let kept = filter_chapters(&chapters, min_duration);
    info!(
        "{} chapters, {} at least {}s long",
        chapters.len(),
        kept.len(),
        min_duration
    );

    let hierarchy = build_hierarchy(&chapters, min_duration);

    if json {
        println!("{}", serde_json::to_string_pretty(&hierarchy)?);
        return Ok(());
    }

    if kept.is_empty() {
        if !quiet {
            println!(
                "No chapters of at least {}s in {}",
                min_duration,
                path.display()
            );
        }
        return Ok(());
    }

    if !quiet {
        println!(
            "{} {}",
            "Book Title:".cyan(),
            title.as_deref().unwrap_or(UNTITLED).bold()
        );
        println!("{} {}", "Total Chapters:".cyan(), kept.len());
        println!();
    }

    if hierarchy.is_empty() {
        println!("Single chapter, no structure to display");
    } else {
        print!("{}", render_hierarchy(&hierarchy, indent));
    }

    Ok(())
}

fn is_metadata_file(path: &Path) -> Result<bool> {
    let mut head = [0u8; HEADER.len()];
    let mut file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(file.read_exact(&mut head).is_ok() && head == HEADER.as_bytes())
}

fn read_metadata_file(path: &Path) -> Result<(Option<String>, Vec<Chapter>)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document =
        parse_metadata(&text).with_context(|| format!("Failed to parse {}", path.display()))?;

    let title = document
        .tags
        .iter()
        .find(|(key, _)| key == "title")
        .map(|(_, value)| value.clone());
    Ok((title, document.chapters))
}

fn probe_container(toolkit: &Toolkit, path: &Path) -> Result<(Option<String>, Vec<Chapter>)> {
    let format = toolkit
        .probe_format(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let chapters = toolkit
        .probe_chapters(path)
        .with_context(|| format!("Failed to read chapters from {}", path.display()))?;
    Ok((format.title().map(String::from), chapters))
}

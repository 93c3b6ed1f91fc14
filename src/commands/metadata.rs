use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::chapters::{build_timeline, parse_spec_file, Chapter};
use crate::metadata::{render_metadata, MetadataDocument};

/// Read a chapters file and lay its chapters end to end
pub fn read_timeline(chapters_file: &Path) -> Result<Vec<Chapter>> {
    let text = std::fs::read_to_string(chapters_file)
        .with_context(|| format!("Failed to read chapters file: {}", chapters_file.display()))?;

    let specs = parse_spec_file(&text)
        .with_context(|| format!("Failed to parse {}", chapters_file.display()))?;
    let chapters = build_timeline(&specs)
        .with_context(|| format!("No valid chapters found in {}", chapters_file.display()))?;

    info!(
        "Read {} chapters from {}",
        chapters.len(),
        chapters_file.display()
    );
    Ok(chapters)
}

pub fn run(chapters_file: &Path, output: Option<&Path>) -> Result<()> {
    let chapters = read_timeline(chapters_file)?;
    let text = render_metadata(&MetadataDocument::from_chapters(chapters));

    match output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Metadata written to {}", path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::chapters::{parse_titles, part_timeline};
use crate::metadata::{common_tags, render_metadata, MetadataDocument};
use crate::toolkit::Toolkit;

pub fn run(
    toolkit: &Toolkit,
    files: &[PathBuf],
    titles_file: Option<&Path>,
    chapter_threshold: usize,
    output: Option<&Path>,
) -> Result<()> {
    let titles = match titles_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read chapter titles file: {}", path.display()))?;
            let titles = parse_titles(&text);
            info!("Read {} chapter titles", titles.len());
            Some(titles)
        }
        None => None,
    };

    let mut durations = Vec::with_capacity(files.len());
    let mut tag_sets = Vec::with_capacity(files.len());

    for file in files {
        let format = toolkit
            .probe_format(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let duration = format
            .duration
            .with_context(|| format!("Could not determine duration of {}", file.display()))?;

        info!("{}: {}", file.display(), duration.clock());
        durations.push(duration);
        tag_sets.push(format.tags);
    }

    let chapters = part_timeline(&durations, titles.as_deref(), chapter_threshold)?;
    let tags = common_tags(&tag_sets);
    for (key, value) in &tags {
        info!("Common tag {}: {}", key, value);
    }

    let text = render_metadata(&MetadataDocument::from_chapters(chapters).with_tags(tags));

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

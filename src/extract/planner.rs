use std::collections::HashSet;

use crate::chapters::{filter_chapters, Chapter, Seconds};

/// Characters that are not allowed in output file names
const INVALID_FILENAME_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Title used when the container has none
pub const UNTITLED: &str = "Untitled";

/// A chapter to be cut out of the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChapter {
    pub title: String,
    pub start: Seconds,
    pub duration: Seconds,
    pub filename: String,
}

/// Decide which chapters to extract and what to call them.
///
/// Chapters shorter than `min_duration` are skipped, and nothing is planned
/// when fewer than two chapters remain. Repeats of the same (title, start,
/// end) are extracted once. Files are named `<book>[<prefix>] (<n>).m4b`
/// with `n` counting from 1.
pub fn plan_extraction(
    book_title: &str,
    prefix: &str,
    chapters: &[Chapter],
    min_duration: Seconds,
) -> Vec<PlannedChapter> {
    let kept = filter_chapters(chapters, min_duration);
    if kept.len() <= 1 {
        return Vec::new();
    }

    let book = sanitize_filename(book_title);
    let mut seen = HashSet::new();
    let mut planned = Vec::new();

    for chapter in kept {
        if !seen.insert((chapter.title.as_str(), chapter.start, chapter.end)) {
            continue;
        }
        planned.push(PlannedChapter {
            title: chapter.title.clone(),
            start: chapter.start,
            duration: chapter.duration(),
            filename: format!("{}[{}] ({}).m4b", book, prefix, planned.len() + 1),
        });
    }

    planned
}

/// Remove characters that are invalid in file names on common filesystems
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !INVALID_FILENAME_CHARS.contains(c))
        .collect()
}

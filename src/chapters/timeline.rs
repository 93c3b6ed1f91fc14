use serde::Serialize;

use super::error::ChapterError;
use super::spec::ChapterSpec;
use super::time::Seconds;

/// Part counts below this are labelled "Part n", otherwise "Chapter n"
pub const DEFAULT_CHAPTER_THRESHOLD: usize = 6;

/// A titled interval on the playback timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub title: String,
    pub start: Seconds,
    pub end: Seconds,
}

impl Chapter {
    pub fn new(title: impl Into<String>, start: Seconds, end: Seconds) -> Self {
        Self {
            title: title.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> Seconds {
        self.end - self.start
    }
}

/// Lay chapter specs end to end starting at zero.
///
/// Each chapter starts exactly where the previous one ended; all arithmetic
/// is exact, so the result stays contiguous however many chapters there are.
pub fn build_timeline(specs: &[ChapterSpec]) -> Result<Vec<Chapter>, ChapterError> {
    if specs.is_empty() {
        return Err(ChapterError::EmptyInput);
    }

    let mut chapters = Vec::with_capacity(specs.len());
    let mut cursor = Seconds::ZERO;

    for spec in specs {
        if spec.duration.is_negative() {
            return Err(ChapterError::InvalidDuration {
                value: spec.duration.to_string(),
            });
        }
        let start = cursor;
        cursor = cursor
            .checked_add(spec.duration)
            .ok_or_else(|| ChapterError::InvalidDuration {
                value: spec.duration.to_string(),
            })?;
        chapters.push(Chapter::new(spec.title.clone(), start, cursor));
    }

    Ok(chapters)
}

/// Build a timeline for concatenated part files from their durations.
///
/// Titles come from `titles` when given (one per part), otherwise parts are
/// labelled "Part n" when there are fewer than `threshold` of them and
/// "Chapter n" otherwise.
pub fn part_timeline(
    durations: &[Seconds],
    titles: Option<&[String]>,
    threshold: usize,
) -> Result<Vec<Chapter>, ChapterError> {
    if let Some(titles) = titles {
        if titles.len() != durations.len() {
            return Err(ChapterError::TitleCountMismatch {
                titles: titles.len(),
                parts: durations.len(),
            });
        }
    }

    let label = if durations.len() < threshold {
        "Part"
    } else {
        "Chapter"
    };

    let specs: Vec<ChapterSpec> = durations
        .iter()
        .enumerate()
        .map(|(i, duration)| {
            let title = match titles {
                Some(titles) => titles[i].clone(),
                None => format!("{} {}", label, i + 1),
            };
            ChapterSpec::new(title, *duration)
        })
        .collect();

    build_timeline(&specs)
}

/// One line per chapter: `Chapter 1: 'Intro' | Start: 0:00.00 | Duration: 0:17.90`
pub fn format_listing(chapters: &[Chapter]) -> String {
    let mut output = String::new();
    for (i, chapter) in chapters.iter().enumerate() {
        output.push_str(&format!(
            "Chapter {}: '{}' | Start: {} | Duration: {}\n",
            i + 1,
            chapter.title,
            chapter.start.clock(),
            chapter.duration().clock()
        ));
    }
    output
}

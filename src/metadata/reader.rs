use crate::chapters::{Chapter, ChapterError, Seconds};
use crate::metadata::writer::HEADER;
use crate::metadata::MetadataDocument;

/// Where the reader currently is in the file
enum Section {
    Global,
    Chapter(PendingChapter),
    /// `[STREAM]` and any other section we don't model
    Other,
}

struct PendingChapter {
    line: usize,
    timebase: (i64, i64),
    start: Option<i64>,
    end: Option<i64>,
    title: Option<String>,
}

impl PendingChapter {
    fn new(line: usize) -> Self {
        Self {
            line,
            timebase: (1, 1_000_000_000),
            start: None,
            end: None,
            title: None,
        }
    }

    fn finish(self) -> Result<Chapter, ChapterError> {
        let (num, den) = self.timebase;
        let to_seconds = |ticks: Option<i64>, field: &'static str| {
            let ticks = ticks.ok_or(ChapterError::MissingField {
                line: self.line,
                field,
            })?;
            Seconds::from_ticks(ticks, num, den).ok_or(ChapterError::InvalidValue {
                line: self.line,
                field,
                value: ticks.to_string(),
            })
        };

        let start = to_seconds(self.start, "START")?;
        let end = to_seconds(self.end, "END")?;
        Ok(Chapter::new(self.title.unwrap_or_default(), start, end))
    }
}

/// Parse FFMETADATA1 text back into a document.
///
/// Chapters may use any `TIMEBASE=num/den` (ffmpeg's default is 1/1e9).
/// Keys inside chapter blocks other than TIMEBASE, START, END and title are
/// ignored, as are sections other than `[CHAPTER]`.
pub fn parse_metadata(text: &str) -> Result<MetadataDocument, ChapterError> {
    let mut lines = text.lines().enumerate();

    match lines.next() {
        Some((_, first)) if first.trim_end() == HEADER => {}
        _ => return Err(ChapterError::MissingHeader),
    }

    let mut document = MetadataDocument::default();
    let mut section = Section::Global;

    for (index, line) in lines {
        let number = index + 1;

        if line.trim().is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            if let Section::Chapter(pending) = section {
                document.chapters.push(pending.finish()?);
            }
            section = if line.trim_end() == "[CHAPTER]" {
                Section::Chapter(PendingChapter::new(number))
            } else {
                Section::Other
            };
            continue;
        }

        let (key, value) = split_entry(line).ok_or_else(|| ChapterError::MalformedEntry {
            line: number,
            content: line.to_string(),
        })?;

        match &mut section {
            Section::Global => document.tags.push((key, value)),
            Section::Chapter(pending) => match key.to_ascii_uppercase().as_str() {
                "TIMEBASE" => {
                    pending.timebase =
                        parse_timebase(&value).ok_or_else(|| ChapterError::InvalidValue {
                            line: number,
                            field: "TIMEBASE",
                            value: value.clone(),
                        })?;
                }
                "START" => pending.start = Some(parse_ticks(&value, number, "START")?),
                "END" => pending.end = Some(parse_ticks(&value, number, "END")?),
                "TITLE" => pending.title = Some(value),
                _ => {}
            },
            Section::Other => {}
        }
    }

    if let Section::Chapter(pending) = section {
        document.chapters.push(pending.finish()?);
    }

    Ok(document)
}

/// Split `key=value` at the first unescaped `=`, unescaping both halves
fn split_entry(line: &str) -> Option<(String, String)> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '=' => return Some((unescape(&line[..i]), unescape(&line[i + 1..]))),
            _ => {}
        }
    }
    None
}

/// Undo the escaping applied by the writer. An unknown escape yields the
/// escaped character itself.
fn unescape(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => output.push('\n'),
            Some('r') => output.push('\r'),
            Some(other) => output.push(other),
            None => output.push('\\'),
        }
    }
    output
}

fn parse_timebase(value: &str) -> Option<(i64, i64)> {
    let (num, den) = value.trim().split_once('/')?;
    let num: i64 = num.trim().parse().ok()?;
    let den: i64 = den.trim().parse().ok()?;
    (num > 0 && den > 0).then_some((num, den))
}

fn parse_ticks(value: &str, line: usize, field: &'static str) -> Result<i64, ChapterError> {
    value
        .trim()
        .parse()
        .map_err(|_| ChapterError::InvalidValue {
            line,
            field,
            value: value.to_string(),
        })
}

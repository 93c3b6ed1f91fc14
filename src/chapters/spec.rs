//! Parsing of human-authored chapter lists
//!
//! A chapter file has one chapter per line, a free-text title followed by a
//! duration:
//!
//! ```text
//! # comments and blank lines are skipped
//! Opening Credits 00:17.90
//! Dedication 00:11.50
//! Prologue 06:06.25
//! ```

use regex::Regex;
use std::sync::LazyLock;

use super::error::ChapterError;
use super::time::Seconds;

static SPEC_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s+(\d{1,2}:\d{2}(?::\d{2})?(?:\.\d+)?)$").expect("chapter line pattern")
});

static TITLE_NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\S*\s+(.*)").expect("title numbering pattern"));

/// A titled duration as written by a person, in playback order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSpec {
    pub title: String,
    pub duration: Seconds,
}

impl ChapterSpec {
    pub fn new(title: impl Into<String>, duration: Seconds) -> Self {
        Self {
            title: title.into(),
            duration,
        }
    }
}

/// Parse `H:MM:SS[.fff]` or `M:SS[.fff]` into exact seconds.
///
/// Hours and minutes must be unsigned integers; seconds may carry any number
/// of fractional digits.
pub fn parse_duration(text: &str) -> Result<Seconds, ChapterError> {
    let invalid = || ChapterError::InvalidDuration {
        value: text.to_string(),
    };

    let parts: Vec<&str> = text.trim().split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => ("0", *m, *s),
        _ => return Err(invalid()),
    };

    let hours = parse_whole(hours).ok_or_else(invalid)?;
    let minutes = parse_whole(minutes).ok_or_else(invalid)?;

    if seconds.starts_with(['-', '+']) {
        return Err(invalid());
    }
    let seconds: Seconds = seconds.parse().map_err(|_| invalid())?;

    let nanos = hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60)?.checked_add(h))
        .and_then(|whole| whole.checked_mul(1_000_000_000))
        .and_then(|whole| whole.checked_add(seconds.as_nanos()))
        .ok_or_else(invalid)?;

    Ok(Seconds::from_nanos(nanos))
}

fn parse_whole(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parse a whole chapter file. Fails on the first line that is neither blank,
/// a `#` comment, nor `<title> <duration>`.
pub fn parse_spec_file(text: &str) -> Result<Vec<ChapterSpec>, ChapterError> {
    let mut specs = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let caps = SPEC_LINE
            .captures(line)
            .ok_or_else(|| ChapterError::MalformedLine {
                line: index + 1,
                content: line.to_string(),
            })?;

        let duration = parse_duration(&caps[2])?;
        specs.push(ChapterSpec::new(&caps[1], duration));
    }

    Ok(specs)
}

/// Parse a titles file: one title per non-blank line, with any leading
/// numbering such as `1.` or `01)` stripped.
pub fn parse_titles(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match TITLE_NUMBERING.captures(line) {
            Some(caps) => caps[1].to_string(),
            None => line.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_examples() {
        assert_eq!(
            parse_duration("01:26:43.50").unwrap(),
            "5203.50".parse::<Seconds>().unwrap()
        );
        assert_eq!(
            parse_duration("00:17.90").unwrap(),
            "17.90".parse::<Seconds>().unwrap()
        );
        assert_eq!(parse_duration("1:00:00").unwrap(), Seconds::from_secs(3600));
    }

    #[test]
    fn test_parse_duration_rejects_bad_input() {
        for bad in ["", "17.90", "1:2:3:4", "a:17", "00:-17", "-1:00", "00:xx", "1::30"] {
            assert!(
                matches!(parse_duration(bad), Err(ChapterError::InvalidDuration { .. })),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_spec_file() {
        let text = "# My book\n\nOpening Credits 00:17.90\n  Dedication\t00:11.50  \nPart One: The Road 1:02:03.5\n";
        let specs = parse_spec_file(text).unwrap();

        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0].title, "Opening Credits");
        assert_eq!(specs[0].duration, Seconds::from_millis(17_900));
        assert_eq!(specs[1].title, "Dedication");
        assert_eq!(specs[2].title, "Part One: The Road");
        assert_eq!(specs[2].duration, Seconds::from_millis(3_723_500));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let text = "Opening Credits 00:17.90\n\nIntro\nPrologue 06:06.25\n";
        let err = parse_spec_file(text).unwrap_err();
        assert_eq!(
            err,
            ChapterError::MalformedLine {
                line: 3,
                content: "Intro".to_string()
            }
        );
    }

    #[test]
    fn test_duration_without_title_is_malformed() {
        let err = parse_spec_file("00:17.90").unwrap_err();
        assert!(matches!(err, ChapterError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn test_parse_titles_strips_numbering() {
        let titles = parse_titles("1. The Beginning\n\n02) Middle Part\nEpilogue\n  10 The End  \n");
        assert_eq!(
            titles,
            vec!["The Beginning", "Middle Part", "Epilogue", "The End"]
        );
    }
}

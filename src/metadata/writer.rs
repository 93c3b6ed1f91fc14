use crate::metadata::MetadataDocument;

/// First line of every metadata file
pub const HEADER: &str = ";FFMETADATA1";

/// Chapter timestamps are always written in milliseconds
pub const TIMEBASE: &str = "1/1000";

/// Escape a value for the metadata file.
///
/// Backslash goes first so the escapes added afterwards are not doubled.
pub fn escape_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Render a document in the exact layout ffmpeg's `-map_chapters` accepts
pub fn render_metadata(document: &MetadataDocument) -> String {
    let mut output = String::new();
    output.push_str(HEADER);
    output.push('\n');

    for (key, value) in &document.tags {
        output.push_str(&format!("{}={}\n", key, escape_value(value)));
    }

    for chapter in &document.chapters {
        output.push_str("[CHAPTER]\n");
        output.push_str(&format!("TIMEBASE={}\n", TIMEBASE));
        output.push_str(&format!("START={}\n", chapter.start.to_millis()));
        output.push_str(&format!("END={}\n", chapter.end.to_millis()));
        output.push_str(&format!("title={}\n\n", escape_value(&chapter.title)));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapters::spec::ChapterSpec;
    use crate::chapters::{build_timeline, Seconds};

    #[test]
    fn test_render_exact_layout() {
        let chapters = build_timeline(&[
            ChapterSpec::new("Opening Credits", "17.90".parse().unwrap()),
            ChapterSpec::new("Dedication", "11.50".parse().unwrap()),
        ])
        .unwrap();
        let document = MetadataDocument::from_chapters(chapters);

        assert_eq!(
            render_metadata(&document),
            ";FFMETADATA1\n\
             [CHAPTER]\nTIMEBASE=1/1000\nSTART=0\nEND=17900\ntitle=Opening Credits\n\n\
             [CHAPTER]\nTIMEBASE=1/1000\nSTART=17900\nEND=29400\ntitle=Dedication\n\n"
        );
    }

    #[test]
    fn test_render_global_tags() {
        let document = MetadataDocument::default().with_tags(vec![
            ("album".to_string(), "Dune".to_string()),
            ("comment".to_string(), "line one\nline two".to_string()),
        ]);
        assert_eq!(
            render_metadata(&document),
            ";FFMETADATA1\nalbum=Dune\ncomment=line one\\nline two\n"
        );
    }

    #[test]
    fn test_escape_order() {
        assert_eq!(escape_value(r"a\b"), r"a\\b");
        assert_eq!(escape_value("a;b"), r"a\;b");
        assert_eq!(escape_value("a\nb\rc"), r"a\nb\rc");
        // the backslash introduced for ';' must not be escaped again
        assert_eq!(escape_value(r"\;"), r"\\\;");
    }

    #[test]
    fn test_render_rounds_to_millis() {
        let chapters = build_timeline(&[
            ChapterSpec::new("a", "0.0005".parse().unwrap()),
            ChapterSpec::new("b", "0.001".parse().unwrap()),
        ])
        .unwrap();
        assert_eq!(chapters[1].end, Seconds::from_nanos(1_500_000));

        let text = render_metadata(&MetadataDocument::from_chapters(chapters));
        assert!(text.contains("START=0\nEND=0\ntitle=a"));
        assert!(text.contains("START=0\nEND=2\ntitle=b"));
    }
}

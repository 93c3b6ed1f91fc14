use indexmap::IndexMap;

use crate::chapters::Chapter;

/// Chapter metadata in ffmpeg's FFMETADATA1 text form: global tags followed by
/// chapter blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataDocument {
    pub tags: Vec<(String, String)>,
    pub chapters: Vec<Chapter>,
}

impl MetadataDocument {
    pub fn from_chapters(chapters: Vec<Chapter>) -> Self {
        Self {
            tags: Vec::new(),
            chapters,
        }
    }

    pub fn with_tags(mut self, tags: Vec<(String, String)>) -> Self {
        self.tags = tags;
        self
    }
}

/// Tags that every input agrees on, in the first input's key order.
///
/// `track` is reset to `1` since the parts are being merged into one file.
pub fn common_tags(tag_sets: &[IndexMap<String, String>]) -> Vec<(String, String)> {
    let Some((first, rest)) = tag_sets.split_first() else {
        return Vec::new();
    };

    first
        .iter()
        .filter(|(key, value)| rest.iter().all(|other| other.get(*key) == Some(*value)))
        .map(|(key, value)| {
            let value = if key == "track" { "1" } else { value.as_str() };
            (key.clone(), value.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_common_tags_keeps_agreeing_keys() {
        let sets = vec![
            tags(&[("album", "Dune"), ("artist", "Frank Herbert"), ("title", "Dune (1)"), ("track", "1/3")]),
            tags(&[("album", "Dune"), ("artist", "Frank Herbert"), ("title", "Dune (2)"), ("track", "1/3")]),
            tags(&[("album", "Dune"), ("artist", "F. Herbert"), ("track", "1/3")]),
        ];

        let common = common_tags(&sets);
        assert_eq!(
            common,
            vec![
                ("album".to_string(), "Dune".to_string()),
                ("track".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_common_tags_follow_first_input_order() {
        let sets = vec![
            tags(&[("title", "T"), ("artist", "Frank Herbert"), ("album", "A")]),
            tags(&[("album", "A"), ("title", "T"), ("artist", "Frank Herbert")]),
        ];

        let keys: Vec<String> = common_tags(&sets).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["title", "artist", "album"]);
    }

    #[test]
    fn test_common_tags_empty_input() {
        assert!(common_tags(&[]).is_empty());
    }
}

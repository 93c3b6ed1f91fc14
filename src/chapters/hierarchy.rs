//! Nesting of flat chapter lists
//!
//! Containers often carry both top-level parts and the chapters inside them
//! as one flat list. The tree is recovered from interval containment alone.
//!
//! Intervals are assumed to be well nested: a chapter either lies entirely
//! inside an earlier one or starts at or after its end. Crossing intervals are
//! not validated or rejected, and how they end up nested is unspecified.

use serde::Serialize;

use super::time::Seconds;
use super::timeline::Chapter;

/// Chapters shorter than this are treated as markers, not structure
pub const DEFAULT_MIN_DURATION: Seconds = Seconds::from_secs(1);

/// Indentation used per nesting level when rendering
pub const DEFAULT_INDENT: &str = "  ";

/// A chapter together with the chapters it contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterNode {
    pub title: String,
    pub start: Seconds,
    pub end: Seconds,
    pub children: Vec<ChapterNode>,
}

impl ChapterNode {
    fn leaf(chapter: &Chapter) -> Self {
        Self {
            title: chapter.title.clone(),
            start: chapter.start,
            end: chapter.end,
            children: Vec::new(),
        }
    }

    pub fn duration(&self) -> Seconds {
        self.end - self.start
    }
}

/// Drop chapters shorter than `min_duration`, keeping the original order.
/// A chapter whose length does not fit the timeline is dropped too.
pub fn filter_chapters(chapters: &[Chapter], min_duration: Seconds) -> Vec<&Chapter> {
    chapters
        .iter()
        .filter(|c| {
            c.end
                .checked_sub(c.start)
                .is_some_and(|duration| duration >= min_duration)
        })
        .collect()
}

/// Nest chapters by containment.
///
/// Returns an empty tree when fewer than two chapters survive filtering: a
/// single chapter carries no structure.
pub fn build_hierarchy(chapters: &[Chapter], min_duration: Seconds) -> Vec<ChapterNode> {
    let mut kept = filter_chapters(chapters, min_duration);
    if kept.len() <= 1 {
        return Vec::new();
    }

    // stable: equal starts keep their input order
    kept.sort_by_key(|c| c.start);

    let mut roots = Vec::new();
    let mut open: Vec<ChapterNode> = Vec::new();

    for chapter in kept {
        while open.last().is_some_and(|top| top.end <= chapter.start) {
            close_top(&mut open, &mut roots);
        }
        open.push(ChapterNode::leaf(chapter));
    }

    while !open.is_empty() {
        close_top(&mut open, &mut roots);
    }

    roots
}

/// Pop the innermost open node and attach it to whatever encloses it.
/// Nodes are attached on close, which preserves start order among siblings.
fn close_top(open: &mut Vec<ChapterNode>, roots: &mut Vec<ChapterNode>) {
    if let Some(node) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

/// Render the tree depth-first, one line per chapter
pub fn render_hierarchy(nodes: &[ChapterNode], indent: &str) -> String {
    let mut output = String::new();
    render_level(nodes, indent, 0, &mut output);
    output
}

fn render_level(nodes: &[ChapterNode], indent: &str, depth: usize, output: &mut String) {
    for node in nodes {
        output.push_str(&format!(
            "{}- {} (Start: {}s, Duration: {}s)\n",
            indent.repeat(depth),
            node.title,
            node.start,
            node.duration()
        ));
        render_level(&node.children, indent, depth + 1, output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(title: &str, start: i64, end: i64) -> Chapter {
        Chapter::new(title, Seconds::from_secs(start), Seconds::from_secs(end))
    }

    fn span(node: &ChapterNode) -> (i64, i64) {
        (node.start.to_millis() / 1000, node.end.to_millis() / 1000)
    }

    #[test]
    fn test_nests_contained_chapters() {
        let chapters = vec![
            chapter("Part 1", 0, 10),
            chapter("One", 1, 4),
            chapter("Two", 5, 9),
            chapter("Part 2", 10, 20),
        ];
        let tree = build_hierarchy(&chapters, DEFAULT_MIN_DURATION);

        assert_eq!(tree.len(), 2);
        assert_eq!(span(&tree[0]), (0, 10));
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(span(&tree[0].children[0]), (1, 4));
        assert_eq!(span(&tree[0].children[1]), (5, 9));
        assert_eq!(span(&tree[1]), (10, 20));
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let chapters = vec![
            chapter("Part 2", 10, 20),
            chapter("Two", 5, 9),
            chapter("Part 1", 0, 10),
            chapter("One", 1, 4),
        ];
        let tree = build_hierarchy(&chapters, DEFAULT_MIN_DURATION);
        assert_eq!(tree[0].title, "Part 1");
        assert_eq!(tree[0].children[0].title, "One");
        assert_eq!(tree[0].children[1].title, "Two");
        assert_eq!(tree[1].title, "Part 2");
    }

    #[test]
    fn test_deep_nesting() {
        let chapters = vec![
            chapter("Book", 0, 100),
            chapter("Part", 0, 50),
            chapter("Chapter", 10, 20),
            chapter("Afterword", 50, 100),
        ];
        let tree = build_hierarchy(&chapters, DEFAULT_MIN_DURATION);

        assert_eq!(tree.len(), 1);
        let book = &tree[0];
        assert_eq!(book.children.len(), 2);
        assert_eq!(book.children[0].title, "Part");
        assert_eq!(book.children[0].children[0].title, "Chapter");
        assert_eq!(book.children[1].title, "Afterword");
    }

    #[test]
    fn test_empty_and_single_chapter_have_no_structure() {
        assert!(build_hierarchy(&[], DEFAULT_MIN_DURATION).is_empty());
        assert!(build_hierarchy(&[chapter("Only", 0, 3600)], DEFAULT_MIN_DURATION).is_empty());

        // two chapters, but one is a marker
        let chapters = vec![
            chapter("Only", 0, 3600),
            Chapter::new("Blip", "2.0".parse().unwrap(), "2.5".parse().unwrap()),
        ];
        assert!(build_hierarchy(&chapters, DEFAULT_MIN_DURATION).is_empty());
    }

    #[test]
    fn test_short_chapters_are_dropped() {
        let blip = Chapter::new("Blip", "2.0".parse().unwrap(), "2.5".parse().unwrap());
        let chapters = vec![chapter("A", 0, 10), blip, chapter("B", 10, 20)];

        let kept = filter_chapters(&chapters, DEFAULT_MIN_DURATION);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|c| c.title != "Blip"));

        let tree = build_hierarchy(&chapters, DEFAULT_MIN_DURATION);
        assert_eq!(tree.len(), 2);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_exactly_min_duration_is_kept() {
        let chapters = vec![chapter("A", 0, 1), chapter("B", 1, 2)];
        assert_eq!(filter_chapters(&chapters, DEFAULT_MIN_DURATION).len(), 2);
    }

    #[test]
    fn test_unrepresentable_interval_is_dropped() {
        let chapters = vec![
            chapter("Garbage", -9_000_000_000, 9_000_000_000),
            chapter("A", 0, 10),
            chapter("B", 10, 20),
        ];
        assert_eq!(filter_chapters(&chapters, DEFAULT_MIN_DURATION).len(), 2);

        let tree = build_hierarchy(&chapters, DEFAULT_MIN_DURATION);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].title, "A");
        assert_eq!(tree[1].title, "B");
    }

    #[test]
    fn test_equal_starts_keep_input_order() {
        let chapters = vec![chapter("Outer", 0, 10), chapter("Inner", 0, 5)];
        let tree = build_hierarchy(&chapters, DEFAULT_MIN_DURATION);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].title, "Outer");
        assert_eq!(tree[0].children[0].title, "Inner");
    }

    #[test]
    fn test_render_hierarchy() {
        let chapters = vec![
            chapter("Part 1", 0, 10),
            chapter("One", 1, 4),
            Chapter::new("Two", Seconds::from_secs(5), "9.5".parse().unwrap()),
            chapter("Part 2", 10, 20),
        ];
        let tree = build_hierarchy(&chapters, DEFAULT_MIN_DURATION);

        assert_eq!(
            render_hierarchy(&tree, DEFAULT_INDENT),
            "- Part 1 (Start: 0s, Duration: 10s)\n\
             \x20 - One (Start: 1s, Duration: 3s)\n\
             \x20 - Two (Start: 5s, Duration: 4.5s)\n\
             - Part 2 (Start: 10s, Duration: 10s)\n"
        );
    }
}

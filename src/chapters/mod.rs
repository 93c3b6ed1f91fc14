//! Chapter bookkeeping: exact timestamps, chapter files, timelines and trees.
//!
//! Nothing in here performs I/O.

mod error;
pub mod hierarchy;
pub mod spec;
pub mod time;
pub mod timeline;

pub use error::ChapterError;
pub use hierarchy::{
    build_hierarchy, filter_chapters, render_hierarchy, DEFAULT_INDENT, DEFAULT_MIN_DURATION,
};
pub use spec::{parse_spec_file, parse_titles};
pub use time::Seconds;
pub use timeline::{
    build_timeline, format_listing, part_timeline, Chapter, DEFAULT_CHAPTER_THRESHOLD,
};

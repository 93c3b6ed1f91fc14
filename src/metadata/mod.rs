mod fields;
mod reader;
mod writer;

pub use fields::{common_tags, MetadataDocument};
pub use reader::parse_metadata;
pub use writer::{render_metadata, HEADER};

pub mod check;
pub mod extract;
pub mod metadata;
pub mod overwrite;
pub mod parts;
pub mod tree;

//! Domain model for content written to Notion.

pub mod blocks;

pub use blocks::{build_content_blocks, ContentBlock, RichText};

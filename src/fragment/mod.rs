//! Raw-fragment comparison: splitting, media segmentation, containment.
//!
//! Everything here works on serialized CSS text, not parsed nodes. See
//! [`contains`] for the exact comparison rules.

pub mod contains;
pub mod media;
pub mod split;

pub use contains::contains;
pub use media::{segment_media_queries, MediaSegmentation};
pub use split::{split_selector_and_body, split_top_level_rules, strip_newlines};

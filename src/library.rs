//! Track references: supported formats, lazily read tag metadata and
//! display strings.

mod display;
mod metadata;
mod model;
mod scan;

pub use display::display_from_fields;
pub use metadata::{MetadataCache, read_track};
pub use model::{Track, UNKNOWN_ARTIST};
pub use scan::{AudioFormat, Expanded, expand_paths, is_supported};

#[cfg(test)]
mod tests;

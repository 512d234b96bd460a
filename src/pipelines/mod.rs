//! Orchestrators that sequence fetching, extraction and failure
//! classification for each kind of import source.

pub mod image;
pub mod text;
pub mod url;

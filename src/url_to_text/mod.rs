//! Web page import: fetching and HTML extraction.

pub mod fetchers;
pub mod html;

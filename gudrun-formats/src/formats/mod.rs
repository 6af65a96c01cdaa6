//! Format implementations
//!
//! Each converts between [`Document`](gudrun_parser::Document) and one text
//! representation.

pub mod json;
pub mod txt;
pub mod yaml;

pub use json::JsonFormat;
pub use txt::TxtFormat;
pub use yaml::YamlFormat;

//! Main module for Gudrun input-file functionality

pub mod cursor;
pub mod error;
pub mod loader;
pub mod model;
pub mod naming;
pub mod parsing;
pub mod records;
pub mod scalars;
pub mod schema;
pub mod serializing;
pub mod testing;

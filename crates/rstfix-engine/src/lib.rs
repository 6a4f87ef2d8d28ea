pub mod document;
pub mod io;
pub mod models;
pub mod rewrite;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use document::*;
pub use io::*;
pub use models::rst_file::*;
pub use rewrite::{Pipeline, RunStats, Stage};

pub mod rst_file;

pub use rst_file::RstFile;

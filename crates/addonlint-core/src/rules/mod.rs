//! Validation rules

pub mod cross_file;
pub mod directory;
pub mod structure;

pub use cross_file::CrossFileValidator;
pub use directory::DirectoryValidator;

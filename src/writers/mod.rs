//! Concrete sink implementations

pub mod rotating_file;

pub use rotating_file::RotatingFileWriter;

// Re-export the contract for convenience
pub use crate::core::LogWriter;

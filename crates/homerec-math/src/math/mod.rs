//! Core math modules.

pub mod special;
pub mod student_t;
pub mod summary;

//! Business logic

pub mod report;

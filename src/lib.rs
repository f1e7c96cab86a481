#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
/// Terminal chart of income and expenses over time
pub mod chart;
/// Error handling and custom [`Error`](std::error::Error) types
pub mod errors;
/// Prompted, validated readers for transaction fields
pub mod input;
/// Table and summary formatting for query results
pub mod report;
/// The interactive menu loop
pub mod shell;
/// The CSV-backed transaction store
pub mod store;
/// Data types used throughout Fintrack
pub mod types;

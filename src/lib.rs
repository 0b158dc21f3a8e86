//! A SQLite-backed implementation of the classic `fortune` dataset:
//! a builder that ingests delimiter-separated fortune files, and a
//! query library for listing categories and drawing random fortunes.

pub mod database;
pub mod error;
pub mod ingest;

pub use database::handle::FortuneDb;
pub use error::{FortuneError, Result};

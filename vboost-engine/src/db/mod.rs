//! Database access layer

pub mod levels;

pub use levels::{DomainStore, SaveOutcome};

//! Band tables as data.
//!
//! Rate tables can be supplied at runtime as CSV instead of being compiled
//! in. Each row is one band:
//!
//! ```text
//! table,label,upper_threshold,rate
//! uk-income-tax-2024-25,Basic rate,37700,0.20
//! uk-income-tax-2024-25,Higher rate,125140,0.40
//! uk-income-tax-2024-25,Additional rate,,0.45
//! ```
//!
//! An empty `upper_threshold` marks the unbounded top band. Rows for the same
//! table must appear in ascending threshold order.

mod loader;

pub use loader::{BandRecord, BandTableLoader, BandTableLoaderError};

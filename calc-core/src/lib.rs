pub mod calculations;
pub mod format;
pub mod models;
pub mod rates;

pub use models::*;

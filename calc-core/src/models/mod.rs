mod band;
mod result_row;

pub use band::{Band, BandTable, BandTableError};
pub use result_row::{CalculationResult, ResultRow, ResultValue};

//! Calculation modules.
//!
//! The shared engines ([`bands`], [`loan`], [`growth`], [`ratios`] and the
//! input [`guard`]) sit underneath the individual calculators. UK tax and
//! statutory-pay calculators live in [`uk`].

pub mod annuity;
pub mod bands;
pub mod car;
pub mod common;
pub mod growth;
pub mod guard;
pub mod loan;
pub mod mortgage;
pub mod pay;
pub mod pension;
pub mod ratios;
pub mod rental;
pub mod uk;

pub use annuity::{AnnuityIncome, annuity_income};
pub use bands::{BandBreakdown, BandEvaluation, BandEvaluator};
pub use car::{CarCost, CarCostInput, car_cost};
pub use growth::{
    DoublingTime, GrowthPoint, GrowthProjection, SimpleInterest, future_value, rule_of_72,
    simple_interest,
};
pub use guard::{RawNumber, to_safe_count, to_safe_number, to_safe_signed_number};
pub use loan::{Amortization, AmortizationRow, amortize, interest_only_payment, monthly_payment};
pub use mortgage::{DEFAULT_INCOME_MULTIPLE, MortgageInput, MortgageQuote, mortgage_quote};
pub use pay::{Commission, Overtime, commission, overtime};
pub use pension::{PensionConfig, PensionInput, PensionProjection, PensionProjector};
pub use rental::{RentalInput, RentalYield, rental_yield};

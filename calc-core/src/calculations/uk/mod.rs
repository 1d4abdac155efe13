//! UK tax and statutory-pay calculators.
//!
//! Each calculator follows the same shape: a `*Config` holding the rates and
//! thresholds for one tax year (its `Default` is 2024/25), a calculator built
//! from that config, and a result record implementing
//! [`CalculationResult`](crate::CalculationResult).
//!
//! | Calculator | Method |
//! |------------|--------|
//! | [`IncomeTaxCalculator`] | band evaluation above a tapered personal allowance |
//! | [`DividendTaxCalculator`] | band evaluation of dividends stacked on other income |
//! | [`StampDutyCalculator`] | band evaluation with first-time buyer relief and surcharge |
//! | [`NationalInsuranceCalculator`] | band evaluation per contribution class |
//! | [`StudentLoanCalculator`] | single band above each plan's threshold |
//! | [`CouncilTaxCalculator`] | band D multiplier in ninths |
//! | [`RedundancyCalculator`] | age-banded accrual per year of service |
//! | [`MinimumWageCalculator`] | age-threshold rate lookup |
//! | [`SickPayCalculator`] | flat weekly rate after waiting days |

pub mod council_tax;
pub mod dividend_tax;
pub mod income_tax;
pub mod minimum_wage;
pub mod national_insurance;
pub mod redundancy;
pub mod sick_pay;
pub mod stamp_duty;
pub mod student_loan;

pub use council_tax::{CouncilTax, CouncilTaxBand, CouncilTaxCalculator, CouncilTaxConfig};
pub use dividend_tax::{DividendTax, DividendTaxCalculator, DividendTaxConfig};
pub use income_tax::{IncomeTax, IncomeTaxCalculator, IncomeTaxConfig, tapered_personal_allowance};
pub use minimum_wage::{MinimumWageCalculator, MinimumWageCheck, MinimumWageConfig};
pub use national_insurance::{
    NationalInsurance, NationalInsuranceCalculator, NationalInsuranceConfig, NiClass,
};
pub use redundancy::{RedundancyCalculator, RedundancyConfig, RedundancyPay};
pub use sick_pay::{SickPay, SickPayCalculator, SickPayConfig};
pub use stamp_duty::{BuyerType, StampDuty, StampDutyCalculator, StampDutyConfig};
pub use student_loan::{
    PlanRepayment, StudentLoanCalculator, StudentLoanConfig, StudentLoanPlan, StudentLoanRepayment,
};

//! Earnings calculators: sales commission and overtime.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{non_negative, or_zero, round_half_up};
use crate::calculations::ratios::percentage_of;
use crate::{CalculationResult, ResultRow};

/// Result of [`commission`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commission {
    pub revenue: Decimal,
    pub commission_rate_percent: Decimal,
    pub commission_earned: Decimal,
    pub base_pay: Decimal,
    pub total_earnings: Decimal,
}

impl CalculationResult for Commission {
    fn title(&self) -> &'static str {
        "Commission"
    }

    fn rows(&self) -> Vec<ResultRow> {
        let mut rows = vec![
            ResultRow::money("Sales revenue", self.revenue),
            ResultRow::percent("Commission rate", self.commission_rate_percent),
            ResultRow::money("Commission earned", self.commission_earned),
        ];
        if self.base_pay > Decimal::ZERO {
            rows.push(ResultRow::money("Base pay", self.base_pay));
            rows.push(ResultRow::money("Total earnings", self.total_earnings));
        }
        rows
    }
}

/// Commission on `revenue` at `rate_percent`, plus any base pay.
pub fn commission(
    revenue: Decimal,
    rate_percent: Decimal,
    base_pay: Decimal,
) -> Commission {
    let revenue = non_negative(revenue);
    let commission_rate_percent = non_negative(rate_percent);
    let base_pay = non_negative(base_pay);
    let commission_earned = percentage_of(revenue, commission_rate_percent);

    Commission {
        revenue,
        commission_rate_percent,
        commission_earned,
        base_pay,
        total_earnings: or_zero(base_pay.checked_add(commission_earned), "total earnings"),
    }
}

/// Result of [`overtime`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overtime {
    pub overtime_rate: Decimal,
    pub regular_pay: Decimal,
    pub overtime_pay: Decimal,
    pub total_pay: Decimal,
}

impl CalculationResult for Overtime {
    fn title(&self) -> &'static str {
        "Overtime pay"
    }

    fn rows(&self) -> Vec<ResultRow> {
        vec![
            ResultRow::money("Overtime hourly rate", self.overtime_rate),
            ResultRow::money("Regular pay", self.regular_pay),
            ResultRow::money("Overtime pay", self.overtime_pay),
            ResultRow::money("Total pay", self.total_pay),
        ]
    }
}

/// Pay for a period with overtime at `multiplier` times the hourly rate
/// (1.5 for time-and-a-half).
pub fn overtime(
    hourly_rate: Decimal,
    regular_hours: Decimal,
    overtime_hours: Decimal,
    multiplier: Decimal,
) -> Overtime {
    let hourly_rate = non_negative(hourly_rate);
    let times = |a: Decimal, b: Decimal, what: &str| {
        round_half_up(or_zero(a.checked_mul(non_negative(b)), what))
    };
    let overtime_rate = times(hourly_rate, multiplier, "overtime rate");
    let regular_pay = times(hourly_rate, regular_hours, "regular pay");
    let overtime_pay = times(overtime_rate, overtime_hours, "overtime pay");

    Overtime {
        overtime_rate,
        regular_pay,
        overtime_pay,
        total_pay: or_zero(regular_pay.checked_add(overtime_pay), "total pay"),
    }
}

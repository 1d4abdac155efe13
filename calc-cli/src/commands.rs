//! Runs one calculator per command and collects its output into a [`Report`].

use std::collections::BTreeMap;
use std::fs::File;

use anyhow::{Context, Result, anyhow, bail};
use calc_core::calculations::uk::{
    BuyerType, CouncilTaxBand, CouncilTaxCalculator, DividendTaxCalculator, IncomeTaxCalculator,
    MinimumWageCalculator, NationalInsuranceCalculator, NiClass, RedundancyCalculator,
    SickPayCalculator, StampDutyCalculator, StampDutyConfig, StudentLoanCalculator,
    StudentLoanConfig, StudentLoanPlan,
};
use calc_core::calculations::{
    AmortizationRow, BandEvaluator, CarCostInput, GrowthPoint, MortgageInput, PensionInput,
    PensionProjector, RentalInput, amortize, annuity_income, car_cost, commission, future_value,
    mortgage_quote, overtime, rental_yield, rule_of_72, simple_interest, to_safe_count,
    to_safe_number,
};
use calc_core::format::format_percent;
use calc_core::rates::{BUILTIN_TABLES, builtin_table};
use calc_core::{BandTable, CalculationResult, ResultRow, ResultValue};
use calc_data::BandTableLoader;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::Command;

/// A secondary table printed after the headline rows, such as a repayment
/// schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Everything a command produces, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub rows: Vec<ResultRow>,
    /// The calculator's full result record.
    pub result: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Table>,
}

impl Report {
    fn from_result<R: CalculationResult + Serialize>(result: &R) -> Result<Self> {
        Ok(Self {
            title: result.title().to_string(),
            rows: result.rows(),
            result: serde_json::to_value(result).context("Failed to serialize result")?,
            table: None,
        })
    }

    fn with_table(
        mut self,
        table: Table,
    ) -> Self {
        self.table = Some(table);
        self
    }
}

fn num(raw: &Option<String>) -> Decimal {
    raw.as_deref().map_or(Decimal::ZERO, to_safe_number)
}

fn count(raw: &Option<String>) -> u32 {
    raw.as_deref().map_or(0, to_safe_count)
}

fn schedule_table(schedule: &[AmortizationRow]) -> Table {
    Table {
        headers: ["Month", "Principal", "Interest", "Balance"].map(String::from).to_vec(),
        rows: schedule
            .iter()
            .map(|row| {
                vec![
                    row.period.to_string(),
                    format!("{:.2}", row.principal_paid),
                    format!("{:.2}", row.interest_paid),
                    format!("{:.2}", row.remaining_balance),
                ]
            })
            .collect(),
    }
}

fn series_table(series: &[GrowthPoint]) -> Table {
    Table {
        headers: ["Year", "Balance", "Contributed", "Interest"].map(String::from).to_vec(),
        rows: series
            .iter()
            .map(|point| {
                vec![
                    point.year.to_string(),
                    format!("{:.2}", point.balance),
                    format!("{:.2}", point.contributed),
                    format!("{:.2}", point.interest),
                ]
            })
            .collect(),
    }
}

fn parse_choice<T>(
    raw: &str,
    parse: fn(&str) -> Option<T>,
    what: &str,
    valid: &str,
) -> Result<T> {
    parse(raw).ok_or_else(|| anyhow!("unknown {what} '{raw}' (expected one of: {valid})"))
}

fn load_table(
    name: &str,
    file: Option<&std::path::Path>,
) -> Result<BandTable> {
    let Some(path) = file else {
        return builtin_table(name)
            .cloned()
            .ok_or_else(|| anyhow!("unknown table '{name}' (run `calc tables` for the list)"));
    };

    let reader = File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut tables: BTreeMap<String, BandTable> = BandTableLoader::load(reader)
        .with_context(|| format!("Failed to load tables from: {}", path.display()))?;
    info!(file = %path.display(), tables = tables.len(), "loaded band tables");

    tables
        .remove(name)
        .ok_or_else(|| anyhow!("table '{name}' not found in {}", path.display()))
}

/// Runs `command` and returns its report.
///
/// Numeric inputs never fail: they are cleaned by the numeric guard. Errors
/// come only from unknown choices (a buyer type, plan or band letter), an
/// unreadable or invalid table file, or invalid rate configuration.
pub fn run(command: &Command) -> Result<Report> {
    debug!(?command, "running command");

    match command {
        Command::SimpleInterest {
            principal,
            rate,
            years,
        } => Report::from_result(&simple_interest(num(principal), num(rate), num(years))),

        Command::Compound {
            principal,
            monthly,
            rate,
            years,
            series,
        } => {
            let projection = future_value(num(principal), num(monthly), num(rate), count(years));
            let report = Report::from_result(&projection)?;
            Ok(if *series {
                report.with_table(series_table(&projection.yearly_series))
            } else {
                report
            })
        }

        Command::RuleOf72 { rate } => Report::from_result(&rule_of_72(num(rate))),

        Command::Loan {
            amount,
            rate,
            months,
            schedule,
        } => {
            let Some(mut loan) = amortize(num(amount), num(rate), count(months)) else {
                bail!("a loan needs a positive amount and a term of 1 to 1200 months");
            };
            let table = schedule.then(|| schedule_table(&loan.schedule));
            if !*schedule {
                loan.schedule.clear();
            }
            let report = Report::from_result(&loan)?;
            Ok(match table {
                Some(table) => report.with_table(table),
                None => report,
            })
        }

        Command::Mortgage {
            price,
            deposit,
            rate,
            years,
            income,
            multiple,
        } => Report::from_result(&mortgage_quote(&MortgageInput {
            property_price: num(price),
            deposit: num(deposit),
            annual_rate_percent: num(rate),
            term_years: to_safe_count(years.as_str()),
            annual_income: num(income),
            income_multiple: to_safe_number(multiple.as_str()),
        })),

        Command::IncomeTax { income } => {
            Report::from_result(&IncomeTaxCalculator::default().calculate(num(income)))
        }

        Command::DividendTax {
            other_income,
            dividends,
        } => Report::from_result(
            &DividendTaxCalculator::default().calculate(num(other_income), num(dividends)),
        ),

        Command::StampDuty { price, buyer } => {
            let buyer = parse_choice(
                buyer,
                BuyerType::parse,
                "buyer type",
                "standard, first-time-buyer, additional-property",
            )?;
            let calculator = StampDutyCalculator::new(StampDutyConfig::default())
                .context("Invalid stamp duty configuration")?;
            Report::from_result(&calculator.calculate(num(price), buyer))
        }

        Command::NationalInsurance { earnings, class } => {
            let class = parse_choice(class, NiClass::parse, "class", "employee, self-employed")?;
            Report::from_result(
                &NationalInsuranceCalculator::default().calculate(num(earnings), class),
            )
        }

        Command::StudentLoan { income, plans } => {
            let plans = plans
                .iter()
                .map(|plan| {
                    parse_choice(
                        plan,
                        StudentLoanPlan::parse,
                        "plan",
                        "plan-1, plan-2, plan-4, plan-5, postgraduate",
                    )
                })
                .collect::<Result<Vec<_>>>()?;
            let calculator = StudentLoanCalculator::new(StudentLoanConfig::default())
                .context("Invalid student loan configuration")?;
            Report::from_result(&calculator.calculate(num(income), &plans))
        }

        Command::CouncilTax {
            band_d,
            band,
            single_person,
        } => {
            let band = parse_choice(band, CouncilTaxBand::parse, "band", "A to H")?;
            Report::from_result(&CouncilTaxCalculator::default().calculate(
                num(band_d),
                band,
                *single_person,
            ))
        }

        Command::Redundancy {
            age,
            years,
            weekly_pay,
        } => Report::from_result(&RedundancyCalculator::default().calculate(
            count(age),
            count(years),
            num(weekly_pay),
        )),

        Command::MinimumWage {
            age,
            hourly_pay,
            hours,
            apprentice,
        } => Report::from_result(&MinimumWageCalculator::default().calculate(
            count(age),
            num(hourly_pay),
            num(hours),
            *apprentice,
        )),

        Command::SickPay {
            weekly_earnings,
            sick_days,
            qualifying_days,
        } => Report::from_result(&SickPayCalculator::default().calculate(
            num(weekly_earnings),
            count(sick_days),
            to_safe_count(qualifying_days.as_str()),
        )),

        Command::Commission {
            revenue,
            rate,
            base,
        } => Report::from_result(&commission(num(revenue), num(rate), num(base))),

        Command::Overtime {
            hourly_rate,
            regular_hours,
            overtime_hours,
            multiplier,
        } => Report::from_result(&overtime(
            num(hourly_rate),
            num(regular_hours),
            num(overtime_hours),
            to_safe_number(multiplier.as_str()),
        )),

        Command::RentalYield {
            value,
            rent,
            costs,
            mortgage,
            cash,
        } => Report::from_result(&rental_yield(&RentalInput {
            property_value: num(value),
            monthly_rent: num(rent),
            annual_costs: num(costs),
            monthly_mortgage: num(mortgage),
            cash_invested: num(cash),
        })),

        Command::Pension {
            pot,
            contribution,
            employer,
            growth,
            years,
        } => Report::from_result(&PensionProjector::default().project(&PensionInput {
            current_pot: num(pot),
            personal_monthly_net: num(contribution),
            employer_monthly: num(employer),
            annual_growth_percent: num(growth),
            years: count(years),
        })),

        Command::Annuity { pot, rate, years } => {
            Report::from_result(&annuity_income(num(pot), num(rate), count(years)))
        }

        Command::CarCost {
            price,
            resale,
            years,
            fuel,
            insurance,
            maintenance,
            road_tax,
            mileage,
        } => Report::from_result(&car_cost(&CarCostInput {
            purchase_price: num(price),
            resale_value: num(resale),
            ownership_years: count(years),
            annual_fuel: num(fuel),
            annual_insurance: num(insurance),
            annual_maintenance: num(maintenance),
            annual_road_tax: num(road_tax),
            annual_mileage: num(mileage),
        })),

        Command::Band {
            table,
            file,
            amount,
            from,
            include_zero,
        } => {
            let band_table = load_table(table, file.as_deref())?;
            let evaluator = BandEvaluator::new(&band_table).include_zero_rate_bands(*include_zero);
            let evaluation = match from {
                Some(_) => {
                    let start = num(from);
                    evaluator.evaluate_range(start, start.saturating_add(num(amount)))
                }
                None => evaluator.evaluate(num(amount)),
            };
            let mut report = Report::from_result(&evaluation)?;
            report.title = format!("Band evaluation: {table}");
            Ok(report)
        }

        Command::Tables => list_tables(),
    }
}

fn list_tables() -> Result<Report> {
    let mut rows = Vec::new();
    let mut table_rows = Vec::new();

    for name in BUILTIN_TABLES {
        let Some(table) = builtin_table(name) else {
            continue;
        };
        rows.push(ResultRow::new(
            *name,
            ResultValue::Count(u32::try_from(table.bands().len()).unwrap_or(u32::MAX)),
        ));
        for band in table.bands() {
            table_rows.push(vec![
                name.to_string(),
                band.label.clone(),
                band.upper_threshold.map_or_else(String::new, |t| t.to_string()),
                format_percent(band.rate * Decimal::ONE_HUNDRED),
            ]);
        }
    }

    Ok(Report {
        title: "Built-in band tables".to_string(),
        result: serde_json::to_value(
            BUILTIN_TABLES
                .iter()
                .filter_map(|name| builtin_table(name).map(|table| (*name, table)))
                .collect::<BTreeMap<_, _>>(),
        )
        .context("Failed to serialize tables")?,
        rows,
        table: Some(Table {
            headers: ["Table", "Band", "Upper threshold", "Rate"].map(String::from).to_vec(),
            rows: table_rows,
        }),
    })
}

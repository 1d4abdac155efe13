//! Command-line definition.
//!
//! Every numeric option is taken as raw text and cleaned by the numeric guard
//! when the command runs, so `--income "£92,570"` and `--income 92570` are the
//! same and a missing or malformed value counts as zero.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// UK personal-finance calculators.
///
/// Each subcommand runs one calculation and prints the result.
#[derive(Debug, Parser)]
#[command(name = "calc", version, about)]
pub struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Also write log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes
    /// precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned label and value columns.
    Text,
    /// `label,value` rows.
    Csv,
    /// The full result record.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interest on the original principal only.
    SimpleInterest {
        #[arg(long)]
        principal: Option<String>,
        /// Annual rate in percent.
        #[arg(long)]
        rate: Option<String>,
        #[arg(long)]
        years: Option<String>,
    },

    /// Savings growth with monthly compounding and contributions.
    Compound {
        #[arg(long)]
        principal: Option<String>,
        /// Contribution at the end of each month.
        #[arg(long)]
        monthly: Option<String>,
        #[arg(long)]
        rate: Option<String>,
        #[arg(long)]
        years: Option<String>,
        /// Print the balance at the end of every year.
        #[arg(long)]
        series: bool,
    },

    /// Approximate years for money to double.
    #[command(name = "rule-of-72")]
    RuleOf72 {
        #[arg(long)]
        rate: Option<String>,
    },

    /// Repayment loan payment and totals.
    Loan {
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        rate: Option<String>,
        /// Term in months.
        #[arg(long)]
        months: Option<String>,
        /// Print the month-by-month repayment schedule.
        #[arg(long)]
        schedule: bool,
    },

    /// Mortgage payments, loan-to-value and affordability.
    Mortgage {
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        deposit: Option<String>,
        #[arg(long)]
        rate: Option<String>,
        /// Term in years.
        #[arg(long, default_value = "25")]
        years: String,
        /// Gross annual household income.
        #[arg(long)]
        income: Option<String>,
        /// Borrowing cap as a multiple of income.
        #[arg(long, default_value = "4.5")]
        multiple: String,
    },

    /// Income tax on a year's gross income.
    IncomeTax {
        #[arg(long)]
        income: Option<String>,
    },

    /// Tax on dividends received alongside other income.
    DividendTax {
        #[arg(long)]
        other_income: Option<String>,
        #[arg(long)]
        dividends: Option<String>,
    },

    /// Stamp Duty Land Tax on a residential purchase.
    StampDuty {
        #[arg(long)]
        price: Option<String>,
        /// standard, first-time-buyer or additional-property.
        #[arg(long, default_value = "standard")]
        buyer: String,
    },

    /// National Insurance contributions.
    NationalInsurance {
        #[arg(long)]
        earnings: Option<String>,
        /// employee or self-employed.
        #[arg(long, default_value = "employee")]
        class: String,
    },

    /// Student loan repayments.
    StudentLoan {
        #[arg(long)]
        income: Option<String>,
        /// plan-1, plan-2, plan-4, plan-5 or postgraduate. Repeat for more
        /// than one plan.
        #[arg(long = "plan", default_value = "plan-2")]
        plans: Vec<String>,
    },

    /// Council tax for a band, from the council's band D charge.
    CouncilTax {
        #[arg(long)]
        band_d: Option<String>,
        /// Band letter, A to H.
        #[arg(long, default_value = "D")]
        band: String,
        #[arg(long)]
        single_person: bool,
    },

    /// Statutory redundancy pay.
    Redundancy {
        /// Age at redundancy.
        #[arg(long)]
        age: Option<String>,
        /// Complete years of service.
        #[arg(long)]
        years: Option<String>,
        #[arg(long)]
        weekly_pay: Option<String>,
    },

    /// Check hourly pay against the minimum wage for an age.
    MinimumWage {
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        hourly_pay: Option<String>,
        /// Hours worked per week.
        #[arg(long)]
        hours: Option<String>,
        #[arg(long)]
        apprentice: bool,
    },

    /// Statutory Sick Pay for one period of sickness.
    SickPay {
        /// Average weekly earnings.
        #[arg(long)]
        weekly_earnings: Option<String>,
        /// Qualifying days off sick.
        #[arg(long)]
        sick_days: Option<String>,
        /// Days normally worked per week.
        #[arg(long, default_value = "5")]
        qualifying_days: String,
    },

    /// Sales commission plus optional base pay.
    Commission {
        #[arg(long)]
        revenue: Option<String>,
        #[arg(long)]
        rate: Option<String>,
        #[arg(long)]
        base: Option<String>,
    },

    /// Pay including overtime.
    Overtime {
        #[arg(long)]
        hourly_rate: Option<String>,
        #[arg(long)]
        regular_hours: Option<String>,
        #[arg(long)]
        overtime_hours: Option<String>,
        #[arg(long, default_value = "1.5")]
        multiplier: String,
    },

    /// Buy-to-let yield and cashflow.
    RentalYield {
        #[arg(long)]
        value: Option<String>,
        /// Monthly rent.
        #[arg(long)]
        rent: Option<String>,
        /// Annual running costs.
        #[arg(long)]
        costs: Option<String>,
        /// Monthly mortgage payment.
        #[arg(long)]
        mortgage: Option<String>,
        /// Cash put into the purchase.
        #[arg(long)]
        cash: Option<String>,
    },

    /// Pension pot projection with tax relief.
    Pension {
        #[arg(long)]
        pot: Option<String>,
        /// Personal contribution per month, before tax relief.
        #[arg(long)]
        contribution: Option<String>,
        /// Employer contribution per month.
        #[arg(long)]
        employer: Option<String>,
        /// Annual growth in percent.
        #[arg(long)]
        growth: Option<String>,
        #[arg(long)]
        years: Option<String>,
    },

    /// Level monthly income drawn from a pot.
    Annuity {
        #[arg(long)]
        pot: Option<String>,
        #[arg(long)]
        rate: Option<String>,
        #[arg(long)]
        years: Option<String>,
    },

    /// Total cost of owning a car.
    CarCost {
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        resale: Option<String>,
        #[arg(long)]
        years: Option<String>,
        #[arg(long)]
        fuel: Option<String>,
        #[arg(long)]
        insurance: Option<String>,
        #[arg(long)]
        maintenance: Option<String>,
        #[arg(long)]
        road_tax: Option<String>,
        /// Miles driven per year.
        #[arg(long)]
        mileage: Option<String>,
    },

    /// Evaluate an amount against a band table.
    Band {
        /// Table name: a built-in table, or one defined in `--file`.
        #[arg(long)]
        table: String,
        /// CSV file of band tables (table,label,upper_threshold,rate).
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        amount: Option<String>,
        /// Charge only the slice of band space above this amount.
        #[arg(long)]
        from: Option<String>,
        /// List bands charged at 0% in the breakdown.
        #[arg(long)]
        include_zero: bool,
    },

    /// List the built-in band tables.
    Tables,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn numeric_options_are_raw_text() {
        let cli = Cli::try_parse_from(["calc", "income-tax", "--income", "£92,570"]).unwrap();

        match cli.command {
            Command::IncomeTax { income } => assert_eq!(income.as_deref(), Some("£92,570")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["calc", "tables", "--format", "json"]).unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn repeated_plans_are_collected() {
        let cli = Cli::try_parse_from([
            "calc",
            "student-loan",
            "--income",
            "40000",
            "--plan",
            "plan-2",
            "--plan",
            "postgraduate",
        ])
        .unwrap();

        match cli.command {
            Command::StudentLoan { plans, .. } => assert_eq!(plans, vec!["plan-2", "postgraduate"]),
            other => panic!("unexpected command {other:?}"),
        }
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::{EngineConfig, EngineError};
use crate::model::personnel::Personnel;
use crate::model::settings::{PayrollSettings, TaxBracket};

/// The full earnings/deductions breakdown for one personnel-month, before
/// identity and timestamps are stamped on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PayrollBreakdown {
    pub base_salary: f64,
    pub housing_allowance: f64,
    pub food_allowance: f64,
    pub child_allowance: f64,
    pub marriage_allowance: f64,
    pub seniority_pay: f64,
    pub overtime_hours: f64,
    pub overtime_pay: f64,
    pub total_earnings: f64,
    pub insurance_deduction: f64,
    pub tax_deduction: f64,
    pub total_deductions: f64,
    pub net_pay: f64,
}

/// Turns aggregated hours, a personnel profile, and the settings snapshot
/// into a payroll breakdown.
///
/// Both dependencies must already be loaded; an absent one aborts the run
/// rather than silently computing a wrong payslip. Monetary outputs are
/// rounded to whole currency units (`overtime_hours` keeps two decimals),
/// and `net_pay` is derived from the rounded totals so it always equals
/// `total_earnings - total_deductions` on the persisted document.
pub fn compute_payroll(
    total_hours: f64,
    personnel: Option<&Personnel>,
    settings: Option<&PayrollSettings>,
    cfg: &EngineConfig,
) -> Result<PayrollBreakdown, EngineError> {
    let personnel = personnel.ok_or(EngineError::MissingPersonnel)?;
    let settings = settings.ok_or(EngineError::MissingSettings)?;

    let overtime_hours = (total_hours - cfg.work_hours_per_month).max(0.0);
    let hourly_rate = personnel.base_salary / cfg.work_hours_per_month;
    let overtime_pay = overtime_hours * hourly_rate * cfg.overtime_multiplier;

    let child_allowance = f64::from(personnel.number_of_children) * settings.per_child_allowance;
    let marriage_allowance = if personnel.is_married {
        settings.marriage_allowance
    } else {
        0.0
    };

    let total_earnings = personnel.base_salary
        + settings.monthly_housing_allowance
        + settings.monthly_food_allowance
        + child_allowance
        + marriage_allowance
        + settings.monthly_seniority_base
        + overtime_pay;

    let insurance_deduction = total_earnings * settings.insurance_rate / 100.0;

    // A flat monthly salary annualized for bracket lookup, then the annual
    // tax divided back to a monthly figure.
    let annual_tax = progressive_annual_tax(total_earnings * 12.0, &settings.tax_brackets.0);
    let tax_deduction = if annual_tax > 0.0 { annual_tax / 12.0 } else { 0.0 };

    let total_earnings = total_earnings.round();
    let insurance_deduction = insurance_deduction.round();
    let tax_deduction = tax_deduction.round();
    let total_deductions = insurance_deduction + tax_deduction;

    Ok(PayrollBreakdown {
        base_salary: personnel.base_salary.round(),
        housing_allowance: settings.monthly_housing_allowance.round(),
        food_allowance: settings.monthly_food_allowance.round(),
        child_allowance: child_allowance.round(),
        marriage_allowance: marriage_allowance.round(),
        seniority_pay: settings.monthly_seniority_base.round(),
        overtime_hours: (overtime_hours * 100.0).round() / 100.0,
        overtime_pay: overtime_pay.round(),
        total_earnings,
        insurance_deduction,
        tax_deduction,
        total_deductions,
        net_pay: total_earnings - total_deductions,
    })
}

/// Progressive tax over an annual income. Each bracket taxes the slice of
/// income between `from` and `to`; an unbounded top bracket absorbs
/// everything above its `from`.
pub fn progressive_annual_tax(annual_income: f64, brackets: &[TaxBracket]) -> f64 {
    let mut annual_tax = 0.0;

    for bracket in brackets {
        if annual_income <= bracket.from {
            continue;
        }
        let ceiling = bracket.to.unwrap_or(annual_income);
        let slice = annual_income.min(ceiling) - bracket.from;
        if slice > 0.0 {
            annual_tax += slice * bracket.rate / 100.0;
        }
    }

    annual_tax
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sqlx::types::Json;

    fn person(base_salary: f64, children: u32, married: bool) -> Personnel {
        Personnel {
            id: 1,
            first_name: "Sara".into(),
            last_name: "Moradi".into(),
            phone: None,
            duty: "housekeeper".into(),
            villa_id: None,
            base_salary,
            number_of_children: children,
            is_married: married,
            hire_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: "active".into(),
        }
    }

    fn bare_settings() -> PayrollSettings {
        PayrollSettings {
            insurance_rate: 0.0,
            monthly_housing_allowance: 0.0,
            monthly_food_allowance: 0.0,
            per_child_allowance: 0.0,
            marriage_allowance: 0.0,
            monthly_seniority_base: 0.0,
            tax_brackets: Json(Vec::new()),
        }
    }

    fn bracket(from: f64, to: Option<f64>, rate: f64) -> TaxBracket {
        TaxBracket { from, to, rate }
    }

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn no_overtime_at_or_below_the_monthly_baseline() {
        let personnel = person(9_600_000.0, 0, false);
        let settings = bare_settings();

        for hours in [0.0, 100.0, 192.0] {
            let breakdown =
                compute_payroll(hours, Some(&personnel), Some(&settings), &cfg()).unwrap();
            assert_eq!(breakdown.overtime_hours, 0.0);
            assert_eq!(breakdown.overtime_pay, 0.0);
        }
    }

    #[test]
    fn overtime_pays_the_premium_on_hours_past_the_baseline() {
        // 9,600,000 over 192 hours is a 50,000 hourly rate; 8 extra hours at
        // the 1.4 premium come to 560,000.
        let personnel = person(9_600_000.0, 0, false);
        let settings = bare_settings();

        let breakdown =
            compute_payroll(200.0, Some(&personnel), Some(&settings), &cfg()).unwrap();
        assert_eq!(breakdown.overtime_hours, 8.0);
        assert_eq!(breakdown.overtime_pay, 560_000.0);
        assert_eq!(breakdown.total_earnings, 10_160_000.0);
        assert_eq!(breakdown.net_pay, 10_160_000.0);
    }

    #[test]
    fn overtime_hours_keep_two_fractional_digits() {
        let personnel = person(1_920_000.0, 0, false);
        let settings = bare_settings();

        let breakdown = compute_payroll(
            192.0 + 1.0 / 3.0,
            Some(&personnel),
            Some(&settings),
            &cfg(),
        )
        .unwrap();
        assert_eq!(breakdown.overtime_hours, 0.33);
        // 1/3 h x 10,000/h x 1.4, rounded to a whole unit.
        assert_eq!(breakdown.overtime_pay, 4_667.0);
    }

    #[test]
    fn baseline_and_multiplier_are_configurable() {
        let personnel = person(1_600_000.0, 0, false);
        let settings = bare_settings();
        let cfg = EngineConfig {
            work_hours_per_month: 160.0,
            overtime_multiplier: 2.0,
            ..EngineConfig::default()
        };

        let breakdown =
            compute_payroll(170.0, Some(&personnel), Some(&settings), &cfg).unwrap();
        assert_eq!(breakdown.overtime_hours, 10.0);
        // 10 h x 10,000/h x 2.0
        assert_eq!(breakdown.overtime_pay, 200_000.0);
    }

    #[test]
    fn allowances_follow_the_family_profile() {
        let mut settings = bare_settings();
        settings.monthly_housing_allowance = 900_000.0;
        settings.monthly_food_allowance = 1_100_000.0;
        settings.per_child_allowance = 450_000.0;
        settings.marriage_allowance = 300_000.0;
        settings.monthly_seniority_base = 210_000.0;

        let married = person(9_600_000.0, 2, true);
        let breakdown =
            compute_payroll(0.0, Some(&married), Some(&settings), &cfg()).unwrap();
        assert_eq!(breakdown.housing_allowance, 900_000.0);
        assert_eq!(breakdown.food_allowance, 1_100_000.0);
        assert_eq!(breakdown.child_allowance, 900_000.0);
        assert_eq!(breakdown.marriage_allowance, 300_000.0);
        assert_eq!(breakdown.seniority_pay, 210_000.0);
        assert_eq!(breakdown.total_earnings, 13_010_000.0);

        let single = person(9_600_000.0, 0, false);
        let breakdown =
            compute_payroll(0.0, Some(&single), Some(&settings), &cfg()).unwrap();
        assert_eq!(breakdown.child_allowance, 0.0);
        assert_eq!(breakdown.marriage_allowance, 0.0);
    }

    #[test]
    fn insurance_is_a_percentage_of_total_earnings() {
        let mut settings = bare_settings();
        settings.insurance_rate = 7.0;

        let personnel = person(10_000_000.0, 0, false);
        let breakdown =
            compute_payroll(0.0, Some(&personnel), Some(&settings), &cfg()).unwrap();
        assert_eq!(breakdown.insurance_deduction, 700_000.0);
        assert_eq!(breakdown.total_deductions, 700_000.0);
        assert_eq!(breakdown.net_pay, 9_300_000.0);
    }

    #[test]
    fn tax_is_zero_while_annual_income_stays_inside_the_free_bracket() {
        let mut settings = bare_settings();
        settings.tax_brackets = Json(vec![
            bracket(0.0, Some(100.0), 0.0),
            bracket(100.0, None, 10.0),
        ]);

        // 5 a month is 60 a year, inside the zero-rated bracket.
        let personnel = person(5.0, 0, false);
        let breakdown =
            compute_payroll(0.0, Some(&personnel), Some(&settings), &cfg()).unwrap();
        assert_eq!(breakdown.tax_deduction, 0.0);
    }

    #[test]
    fn annualized_two_bracket_scenario() {
        let brackets = [
            bracket(0.0, Some(100.0), 0.0),
            bracket(100.0, None, 10.0),
        ];

        // 15 a month annualizes to 180; the top bracket taxes the 80 above
        // 100 at 10%, so the annual tax is 8 and the monthly figure 8/12.
        let annual_tax = progressive_annual_tax(180.0, &brackets);
        assert_eq!(annual_tax, 8.0);
        assert!((annual_tax / 12.0 - 0.6667).abs() < 1e-3);

        let mut settings = bare_settings();
        settings.tax_brackets = Json(brackets.to_vec());
        let personnel = person(15.0, 0, false);
        let breakdown =
            compute_payroll(0.0, Some(&personnel), Some(&settings), &cfg()).unwrap();
        // 0.667 rounds up to a whole unit on the persisted document.
        assert_eq!(breakdown.tax_deduction, 1.0);
    }

    #[test]
    fn unbounded_top_bracket_absorbs_everything_above_its_floor() {
        let brackets = [
            bracket(0.0, Some(100.0), 10.0),
            bracket(100.0, None, 20.0),
        ];
        assert_eq!(progressive_annual_tax(250.0, &brackets), 40.0);
    }

    #[test]
    fn bounded_brackets_cap_each_slice() {
        let brackets = [
            bracket(0.0, Some(100.0), 10.0),
            bracket(100.0, Some(200.0), 20.0),
            bracket(200.0, None, 30.0),
        ];
        // 150 fills the first bracket and half the second.
        assert_eq!(progressive_annual_tax(150.0, &brackets), 20.0);
    }

    #[test]
    fn empty_bracket_table_taxes_nothing() {
        assert_eq!(progressive_annual_tax(1_000_000.0, &[]), 0.0);
    }

    #[test]
    fn missing_settings_aborts_the_run() {
        let personnel = person(9_600_000.0, 0, false);
        let result = compute_payroll(200.0, Some(&personnel), None, &cfg());
        assert_eq!(result.unwrap_err(), EngineError::MissingSettings);
    }

    #[test]
    fn missing_personnel_aborts_the_run() {
        let settings = bare_settings();
        let result = compute_payroll(200.0, None, Some(&settings), &cfg());
        assert_eq!(result.unwrap_err(), EngineError::MissingPersonnel);
    }

    #[test]
    fn net_pay_is_exactly_earnings_minus_deductions() {
        let mut settings = bare_settings();
        settings.insurance_rate = 7.77;
        settings.monthly_housing_allowance = 123_456.78;
        settings.tax_brackets = Json(vec![
            bracket(0.0, Some(50_000_000.0), 5.0),
            bracket(50_000_000.0, None, 15.0),
        ]);

        let personnel = person(8_765_432.1, 3, true);
        let breakdown =
            compute_payroll(210.5, Some(&personnel), Some(&settings), &cfg()).unwrap();

        assert_eq!(
            breakdown.net_pay,
            breakdown.total_earnings - breakdown.total_deductions
        );
        assert_eq!(
            breakdown.total_deductions,
            breakdown.insurance_deduction + breakdown.tax_deduction
        );
        for amount in [
            breakdown.total_earnings,
            breakdown.insurance_deduction,
            breakdown.tax_deduction,
            breakdown.total_deductions,
            breakdown.net_pay,
            breakdown.overtime_pay,
        ] {
            assert_eq!(amount.fract(), 0.0, "expected a whole amount: {amount}");
        }
    }
}

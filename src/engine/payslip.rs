use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::engine::rules::PayrollBreakdown;
use crate::model::payroll::Payroll;

/// A payroll document ready to persist: the computed breakdown stamped with
/// its reference, owner, month, and creation time. Documents are immutable;
/// recomputing a month produces a new one.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PayrollDocument {
    #[schema(example = "7f0f2a34-9f1d-4a9e-8d1c-1f1d9b5a2c77")]
    pub reference: String,

    #[schema(example = 1001)]
    pub personnel_id: u64,

    #[schema(example = "2026-08")]
    pub month: String,

    #[schema(example = "2026-09-01T08:00:00Z", value_type = String, format = "date-time")]
    pub pay_date: DateTime<Utc>,

    pub breakdown: PayrollBreakdown,
}

pub fn assemble(breakdown: PayrollBreakdown, personnel_id: u64, month: &str) -> PayrollDocument {
    PayrollDocument {
        reference: Uuid::new_v4().to_string(),
        personnel_id,
        month: month.to_string(),
        pay_date: Utc::now(),
        breakdown,
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PayslipRow {
    #[schema(example = "Base salary")]
    pub label: String,

    #[schema(example = "9,600,000 IRR")]
    pub amount: String,
}

/// The read-only payslip view: labelled rows grouped into earnings and
/// deductions, every amount formatted for display.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Payslip {
    #[schema(example = 1001)]
    pub personnel_id: u64,

    #[schema(example = "Sara Moradi", nullable = true)]
    pub personnel_name: Option<String>,

    #[schema(example = "2026-08")]
    pub month: String,

    pub earnings: Vec<PayslipRow>,
    pub deductions: Vec<PayslipRow>,

    #[schema(example = 8.0)]
    pub overtime_hours: f64,

    #[schema(example = "12,240,100 IRR")]
    pub net_pay: String,
}

pub fn render_payslip(
    payroll: &Payroll,
    personnel_name: Option<String>,
    currency: &str,
) -> Payslip {
    let row = |label: &str, amount: f64| PayslipRow {
        label: label.to_string(),
        amount: format_amount(amount, currency),
    };

    let earnings = vec![
        row("Base salary", payroll.base_salary),
        row("Housing allowance", payroll.housing_allowance),
        row("Food allowance", payroll.food_allowance),
        row("Child allowance", payroll.child_allowance),
        row("Marriage allowance", payroll.marriage_allowance),
        row("Seniority pay", payroll.seniority_pay),
        row("Overtime pay", payroll.overtime_pay),
        row("Total earnings", payroll.total_earnings),
    ];
    let deductions = vec![
        row("Insurance", payroll.insurance_deduction),
        row("Income tax", payroll.tax_deduction),
        row("Total deductions", payroll.total_deductions),
    ];

    Payslip {
        personnel_id: payroll.personnel_id,
        personnel_name,
        month: payroll.month.clone(),
        earnings,
        deductions,
        overtime_hours: payroll.overtime_hours,
        net_pay: format_amount(payroll.net_pay, currency),
    }
}

/// Whole currency units with thousands separators and the currency suffix.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        grouped.insert(0, '-');
    }

    format!("{grouped} {currency}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown() -> PayrollBreakdown {
        PayrollBreakdown {
            base_salary: 9_600_000.0,
            housing_allowance: 900_000.0,
            food_allowance: 1_100_000.0,
            child_allowance: 900_000.0,
            marriage_allowance: 300_000.0,
            seniority_pay: 210_000.0,
            overtime_hours: 8.0,
            overtime_pay: 560_000.0,
            total_earnings: 13_570_000.0,
            insurance_deduction: 949_900.0,
            tax_deduction: 380_000.0,
            total_deductions: 1_329_900.0,
            net_pay: 12_240_100.0,
        }
    }

    fn payroll_row() -> Payroll {
        let b = breakdown();
        Payroll {
            id: 42,
            reference: "7f0f2a34-9f1d-4a9e-8d1c-1f1d9b5a2c77".into(),
            personnel_id: 1001,
            month: "2026-08".into(),
            base_salary: b.base_salary,
            housing_allowance: b.housing_allowance,
            food_allowance: b.food_allowance,
            child_allowance: b.child_allowance,
            marriage_allowance: b.marriage_allowance,
            seniority_pay: b.seniority_pay,
            overtime_hours: b.overtime_hours,
            overtime_pay: b.overtime_pay,
            total_earnings: b.total_earnings,
            insurance_deduction: b.insurance_deduction,
            tax_deduction: b.tax_deduction,
            total_deductions: b.total_deductions,
            net_pay: b.net_pay,
            pay_date: Utc::now(),
        }
    }

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0, "IRR"), "0 IRR");
        assert_eq!(format_amount(999.0, "IRR"), "999 IRR");
        assert_eq!(format_amount(1_000.0, "IRR"), "1,000 IRR");
        assert_eq!(format_amount(9_600_000.0, "IRR"), "9,600,000 IRR");
        assert_eq!(format_amount(-1_234_567.0, "IRR"), "-1,234,567 IRR");
    }

    #[test]
    fn format_amount_rounds_to_whole_units() {
        assert_eq!(format_amount(1_499.5, "USD"), "1,500 USD");
        assert_eq!(format_amount(0.4, "USD"), "0 USD");
    }

    #[test]
    fn assemble_stamps_identity_and_month() {
        let document = assemble(breakdown(), 1001, "2026-08");
        assert_eq!(document.personnel_id, 1001);
        assert_eq!(document.month, "2026-08");
        assert_eq!(document.reference.len(), 36);
        assert_eq!(document.breakdown, breakdown());
    }

    #[test]
    fn each_document_gets_its_own_reference() {
        let a = assemble(breakdown(), 1001, "2026-08");
        let b = assemble(breakdown(), 1001, "2026-08");
        assert_ne!(a.reference, b.reference);
    }

    #[test]
    fn payslip_groups_earnings_and_deductions() {
        let payslip = render_payslip(&payroll_row(), Some("Sara Moradi".into()), "IRR");

        assert_eq!(payslip.earnings.len(), 8);
        assert_eq!(payslip.deductions.len(), 3);
        assert_eq!(payslip.earnings[0].label, "Base salary");
        assert_eq!(payslip.earnings[0].amount, "9,600,000 IRR");
        assert_eq!(payslip.deductions[1].label, "Income tax");
        assert_eq!(payslip.deductions[1].amount, "380,000 IRR");
        assert_eq!(payslip.net_pay, "12,240,100 IRR");
        assert_eq!(payslip.overtime_hours, 8.0);
        assert_eq!(payslip.personnel_name.as_deref(), Some("Sara Moradi"));
        assert_eq!(payslip.month, "2026-08");
    }
}

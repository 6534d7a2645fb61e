//! Month-by-month cash projection for one row.
//!
//! Revenue grows linearly by `adjusted_revenue * baseline_growth_rate`
//! each month, the same growth path the break-even estimate assumes.
//! Expenses are held at `adjusted_fixed_expenses`.

use crate::types::{LocalMetrics, RawInputs};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECTION_MONTHS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub month: u32,
    pub cash: f64,
    pub revenue: f64,
    pub expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashProjection {
    /// Month 0 is the starting position.
    pub points: Vec<ProjectionPoint>,
    /// First month whose revenue covers expenses.
    pub break_even_month: Option<u32>,
    /// First month closing with cash <= 0.
    pub cash_out_month: Option<u32>,
}

pub fn project_cash(local: &LocalMetrics, inputs: &RawInputs, months: u32) -> CashProjection {
    let expenses = local.adjusted_fixed_expenses;
    let monthly_increment = local.adjusted_revenue * inputs.baseline_growth_rate;

    let mut cash = local.current_cash_available;
    let mut points = Vec::with_capacity(months as usize + 1);
    points.push(ProjectionPoint {
        month: 0,
        cash,
        revenue: local.adjusted_revenue,
        expenses,
    });

    let mut break_even_month = None;
    let mut cash_out_month = None;

    for month in 1..=months {
        let revenue = local.adjusted_revenue + monthly_increment * f64::from(month - 1);
        let burn = expenses - revenue;
        cash -= burn;

        if burn <= 0.0 && break_even_month.is_none() {
            break_even_month = Some(month);
        }
        if cash <= 0.0 && cash_out_month.is_none() {
            cash_out_month = Some(month);
        }

        points.push(ProjectionPoint {
            month,
            cash,
            revenue,
            expenses,
        });
    }

    CashProjection {
        points,
        break_even_month,
        cash_out_month,
    }
}

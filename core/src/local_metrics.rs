//! Phase A: per-row local derivations.
//!
//! Every value here depends only on the row's own raw inputs and on
//! values derived earlier in the same list. Order matters and mirrors
//! the output column order.

use crate::{
    config::MetricsConfig,
    guard::{guarded_div, nonzero_or, GROWTH_FALLBACK, UNIT_FALLBACK},
    types::{LocalMetrics, RawInputs},
};

pub fn derive_local(raw: &RawInputs, config: &MetricsConfig) -> LocalMetrics {
    // ── Team ───────────────────────────────────────────────────
    let total_team_size = raw.baseline_team_size + raw.employees_hired;
    let total_new_salary_expense = raw.employees_hired * config.monthly_salary();
    let revenue_per_employee = guarded_div(raw.baseline_revenue, total_team_size, UNIT_FALLBACK);

    // ── Revenue and expenses ───────────────────────────────────
    let adjusted_revenue = raw.baseline_revenue
        * (1.0 + raw.baseline_growth_rate)
        * (1.0 + raw.pricing_change_percent)
        * (1.0 + raw.revenue_shock_percent)
        * raw.market_index;
    let adjusted_fixed_expenses =
        raw.baseline_fixed_expenses * (1.0 - raw.cost_cut_percent) + total_new_salary_expense;

    // ── Burn and runway ────────────────────────────────────────
    let burn_rate = adjusted_fixed_expenses - adjusted_revenue;
    let current_cash_available = raw.baseline_cash + raw.equity_raised + raw.loan_taken;
    let runway_months = if burn_rate > 0.0 {
        current_cash_available / burn_rate
    } else {
        config.runway_cap_months
    };

    // ── Break-even ─────────────────────────────────────────────
    let break_even_month_estimate =
        break_even_estimate(adjusted_revenue, adjusted_fixed_expenses, raw.baseline_growth_rate);
    let months_to_break_even = break_even_month_estimate;
    let is_break_even_achieved = adjusted_revenue >= adjusted_fixed_expenses;

    // ── Health ratios ──────────────────────────────────────────
    let cash_ratio = guarded_div(current_cash_available, adjusted_fixed_expenses, UNIT_FALLBACK);
    let debt_to_cash_ratio = guarded_div(raw.loan_taken, current_cash_available, UNIT_FALLBACK);
    let burn_sensitivity_index = guarded_div(burn_rate, adjusted_revenue, UNIT_FALLBACK);
    let growth_volatility_index = raw.revenue_shock_percent.abs();
    let market_dependency_index = (raw.market_index - 1.0).abs();

    let w = &config.risk_weights;
    let risk_score_raw = w.burn_sensitivity * burn_sensitivity_index
        + w.debt_to_cash * debt_to_cash_ratio
        + w.growth_volatility * growth_volatility_index
        + w.market_dependency * market_dependency_index;

    LocalMetrics {
        total_team_size,
        total_new_salary_expense,
        revenue_per_employee,
        adjusted_revenue,
        adjusted_fixed_expenses,
        burn_rate,
        current_cash_available,
        runway_months,
        break_even_month_estimate,
        months_to_break_even,
        is_break_even_achieved,
        cash_ratio,
        debt_to_cash_ratio,
        burn_sensitivity_index,
        growth_volatility_index,
        market_dependency_index,
        risk_score_raw,
    }
}

/// Months until revenue, growing linearly at `growth_rate` of today's
/// revenue per month, covers expenses. None when no such path exists.
fn break_even_estimate(revenue: f64, expenses: f64, growth_rate: f64) -> Option<f64> {
    if revenue > expenses {
        return Some(0.0);
    }
    if growth_rate <= 0.0 {
        return None;
    }
    let months = (expenses - revenue) / (revenue * nonzero_or(growth_rate, GROWTH_FALLBACK));
    // Zero revenue cannot grow into break-even.
    months.is_finite().then_some(months)
}

//! Record types shared across the pipeline.
//!
//! RULE: raw inputs are never mutated after load. Every derived value
//! lives in its own struct, produced by exactly one phase.

use serde::{Deserialize, Serialize};

/// Raw input columns, in canonical order.
pub const RAW_COLUMNS: [&str; 12] = [
    "baseline_team_size",
    "employees_hired",
    "baseline_revenue",
    "baseline_growth_rate",
    "pricing_change_percent",
    "revenue_shock_percent",
    "market_index",
    "baseline_fixed_expenses",
    "cost_cut_percent",
    "baseline_cash",
    "equity_raised",
    "loan_taken",
];

/// Derived output columns, in derivation order.
/// `risk_score` is the normalized score; the raw score is never written.
pub const DERIVED_COLUMNS: [&str; 20] = [
    "total_team_size",
    "total_new_salary_expense",
    "revenue_per_employee",
    "adjusted_revenue",
    "adjusted_fixed_expenses",
    "burn_rate",
    "current_cash_available",
    "runway_months",
    "break_even_month_estimate",
    "months_to_break_even",
    "is_break_even_achieved_flag",
    "cash_ratio",
    "debt_to_cash_ratio",
    "burn_sensitivity_index",
    "growth_volatility_index",
    "market_dependency_index",
    "risk_score",
    "survival_probability",
    "collapse_within_12_months_flag",
    "bankruptcy_month",
];

/// One startup scenario's externally supplied fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    pub baseline_team_size: f64,
    pub employees_hired: f64,
    pub baseline_revenue: f64,
    pub baseline_growth_rate: f64,
    pub pricing_change_percent: f64,
    pub revenue_shock_percent: f64,
    pub market_index: f64,
    pub baseline_fixed_expenses: f64,
    pub cost_cut_percent: f64,
    pub baseline_cash: f64,
    pub equity_raised: f64,
    pub loan_taken: f64,
}

impl RawInputs {
    /// Build from values ordered as `RAW_COLUMNS`.
    pub fn from_columns(v: [f64; 12]) -> Self {
        Self {
            baseline_team_size: v[0],
            employees_hired: v[1],
            baseline_revenue: v[2],
            baseline_growth_rate: v[3],
            pricing_change_percent: v[4],
            revenue_shock_percent: v[5],
            market_index: v[6],
            baseline_fixed_expenses: v[7],
            cost_cut_percent: v[8],
            baseline_cash: v[9],
            equity_raised: v[10],
            loan_taken: v[11],
        }
    }

    /// Values ordered as `RAW_COLUMNS`.
    pub fn columns(&self) -> [f64; 12] {
        [
            self.baseline_team_size,
            self.employees_hired,
            self.baseline_revenue,
            self.baseline_growth_rate,
            self.pricing_change_percent,
            self.revenue_shock_percent,
            self.market_index,
            self.baseline_fixed_expenses,
            self.cost_cut_percent,
            self.baseline_cash,
            self.equity_raised,
            self.loan_taken,
        ]
    }
}

/// Phase A output: everything computable from a single row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalMetrics {
    pub total_team_size: f64,
    pub total_new_salary_expense: f64,
    pub revenue_per_employee: f64,
    pub adjusted_revenue: f64,
    pub adjusted_fixed_expenses: f64,
    pub burn_rate: f64,
    pub current_cash_available: f64,
    pub runway_months: f64,
    /// None when there is no growth path to break even.
    pub break_even_month_estimate: Option<f64>,
    pub months_to_break_even: Option<f64>,
    pub is_break_even_achieved: bool,
    pub cash_ratio: f64,
    pub debt_to_cash_ratio: f64,
    pub burn_sensitivity_index: f64,
    pub growth_volatility_index: f64,
    pub market_dependency_index: f64,
    /// Weighted composite before dataset-wide normalization.
    pub risk_score_raw: f64,
}

/// Phase C output: values that depend on the dataset-wide risk range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalMetrics {
    /// Normalized risk score in [0, 1].
    pub risk_score: f64,
    pub survival_probability: f64,
    pub collapse_within_12_months: bool,
    /// None when burn rate is non-positive.
    pub bankruptcy_month: Option<f64>,
}

/// A fully derived row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub inputs: RawInputs,
    pub local: LocalMetrics,
    pub finals: FinalMetrics,
}

impl EnrichedRecord {
    /// Derived values ordered as `DERIVED_COLUMNS`. Flags are 0/1.
    pub fn derived_values(&self) -> [Option<f64>; 20] {
        let l = &self.local;
        let f = &self.finals;
        [
            Some(l.total_team_size),
            Some(l.total_new_salary_expense),
            Some(l.revenue_per_employee),
            Some(l.adjusted_revenue),
            Some(l.adjusted_fixed_expenses),
            Some(l.burn_rate),
            Some(l.current_cash_available),
            Some(l.runway_months),
            l.break_even_month_estimate,
            l.months_to_break_even,
            Some(flag(l.is_break_even_achieved)),
            Some(l.cash_ratio),
            Some(l.debt_to_cash_ratio),
            Some(l.burn_sensitivity_index),
            Some(l.growth_volatility_index),
            Some(l.market_dependency_index),
            Some(f.risk_score),
            Some(f.survival_probability),
            Some(flag(f.collapse_within_12_months)),
            f.bankruptcy_month,
        ]
    }
}

impl EnrichedRecord {
    /// First derived column holding NaN or an infinity, if any.
    pub fn non_finite_column(&self) -> Option<&'static str> {
        DERIVED_COLUMNS
            .into_iter()
            .zip(self.derived_values())
            .find(|(_, v)| v.is_some_and(|v| !v.is_finite()))
            .map(|(column, _)| column)
    }
}

impl LocalMetrics {
    /// First field holding NaN or an infinity, if any. Finite raw
    /// inputs can still overflow once multiplied together.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("total_team_size", self.total_team_size),
            ("total_new_salary_expense", self.total_new_salary_expense),
            ("revenue_per_employee", self.revenue_per_employee),
            ("adjusted_revenue", self.adjusted_revenue),
            ("adjusted_fixed_expenses", self.adjusted_fixed_expenses),
            ("burn_rate", self.burn_rate),
            ("current_cash_available", self.current_cash_available),
            ("runway_months", self.runway_months),
            ("cash_ratio", self.cash_ratio),
            ("debt_to_cash_ratio", self.debt_to_cash_ratio),
            ("burn_sensitivity_index", self.burn_sensitivity_index),
            ("growth_volatility_index", self.growth_volatility_index),
            ("market_dependency_index", self.market_dependency_index),
            ("risk_score_raw", self.risk_score_raw),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(field, _)| field)
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

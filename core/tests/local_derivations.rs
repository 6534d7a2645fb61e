//! Per-row derivations: formulas, guards, and break-even branches.

use runway_core::{local_metrics::derive_local, MetricsConfig, RawInputs};

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS * b.abs().max(1.0)
}

/// A row where every multiplier is neutral and nothing is hired.
fn neutral() -> RawInputs {
    RawInputs {
        baseline_team_size: 5.0,
        employees_hired: 0.0,
        baseline_revenue: 100_000.0,
        baseline_growth_rate: 0.0,
        pricing_change_percent: 0.0,
        revenue_shock_percent: 0.0,
        market_index: 1.0,
        baseline_fixed_expenses: 80_000.0,
        cost_cut_percent: 0.0,
        baseline_cash: 50_000.0,
        equity_raised: 0.0,
        loan_taken: 0.0,
    }
}

#[test]
fn profitable_row_matches_reference_values() {
    let m = derive_local(&neutral(), &MetricsConfig::default());

    assert_eq!(m.total_team_size, 5.0);
    assert_eq!(m.adjusted_revenue, 100_000.0);
    assert_eq!(m.adjusted_fixed_expenses, 80_000.0);
    assert_eq!(m.burn_rate, -20_000.0);
    assert_eq!(m.runway_months, 60.0, "non-positive burn must use the runway cap");
    assert!(m.is_break_even_achieved);
    assert_eq!(m.break_even_month_estimate, Some(0.0));
    assert_eq!(m.months_to_break_even, Some(0.0));
    assert_eq!(m.revenue_per_employee, 20_000.0);
    assert_eq!(m.cash_ratio, 0.625);
    assert_eq!(m.debt_to_cash_ratio, 0.0);
    assert!(close(m.burn_sensitivity_index, -0.2));
    assert!(close(m.risk_score_raw, 0.35 * -0.2));
}

#[test]
fn hiring_ten_costs_fifty_thousand_per_month() {
    let raw = RawInputs { employees_hired: 10.0, ..neutral() };
    let m = derive_local(&raw, &MetricsConfig::default());

    assert_eq!(m.total_new_salary_expense, 50_000.0);
    assert_eq!(m.total_team_size, 15.0);
    assert_eq!(m.adjusted_fixed_expenses, 130_000.0);
}

#[test]
fn burning_row_follows_formulas() {
    let raw = RawInputs {
        baseline_team_size: 3.0,
        employees_hired: 2.0,
        baseline_revenue: 20_000.0,
        baseline_growth_rate: 0.1,
        pricing_change_percent: 0.05,
        revenue_shock_percent: -0.2,
        market_index: 0.9,
        baseline_fixed_expenses: 40_000.0,
        cost_cut_percent: 0.1,
        baseline_cash: 100_000.0,
        equity_raised: 50_000.0,
        loan_taken: 50_000.0,
    };
    let m = derive_local(&raw, &MetricsConfig::default());

    let revenue = 20_000.0 * 1.1 * 1.05 * 0.8 * 0.9;
    let expenses = 40_000.0 * 0.9 + 10_000.0;
    let burn = expenses - revenue;
    let cash = 200_000.0;

    assert!(close(m.adjusted_revenue, revenue));
    assert!(close(m.adjusted_fixed_expenses, expenses));
    assert!(close(m.burn_rate, burn));
    assert_eq!(m.current_cash_available, cash);
    assert!(close(m.runway_months, cash / burn));
    assert!(!m.is_break_even_achieved);

    let months = m.break_even_month_estimate.expect("growth path exists");
    assert!(close(months, (expenses - revenue) / (revenue * 0.1)));
    assert_eq!(m.months_to_break_even, m.break_even_month_estimate);

    assert_eq!(m.debt_to_cash_ratio, 0.25);
    assert!(close(m.growth_volatility_index, 0.2));
    assert!(close(m.market_dependency_index, 0.1));

    let expected_risk = 0.35 * (burn / revenue) + 0.30 * 0.25 + 0.20 * 0.2 + 0.15 * 0.1;
    assert!(close(m.risk_score_raw, expected_risk));
}

#[test]
fn zero_team_size_divides_by_one() {
    let raw = RawInputs { baseline_team_size: 0.0, ..neutral() };
    let m = derive_local(&raw, &MetricsConfig::default());
    assert_eq!(m.revenue_per_employee, 100_000.0);
}

#[test]
fn zero_expenses_divides_by_one() {
    let raw = RawInputs { baseline_fixed_expenses: 0.0, ..neutral() };
    let m = derive_local(&raw, &MetricsConfig::default());
    assert_eq!(m.adjusted_fixed_expenses, 0.0);
    assert_eq!(m.cash_ratio, 50_000.0);
}

#[test]
fn zero_cash_divides_by_one() {
    let raw = RawInputs {
        baseline_cash: -100.0,
        loan_taken: 100.0,
        ..neutral()
    };
    let m = derive_local(&raw, &MetricsConfig::default());
    assert_eq!(m.current_cash_available, 0.0);
    assert_eq!(m.debt_to_cash_ratio, 100.0);
}

#[test]
fn zero_revenue_divides_by_one_and_has_no_break_even() {
    let raw = RawInputs {
        baseline_revenue: 0.0,
        baseline_growth_rate: 0.1,
        baseline_fixed_expenses: 1_000.0,
        ..neutral()
    };
    let m = derive_local(&raw, &MetricsConfig::default());

    assert_eq!(m.burn_rate, 1_000.0);
    assert_eq!(m.burn_sensitivity_index, 1_000.0);
    assert_eq!(
        m.break_even_month_estimate, None,
        "zero revenue cannot grow into break-even"
    );
    assert!(m.runway_months.is_finite());
}

#[test]
fn no_growth_and_unprofitable_has_missing_break_even() {
    let raw = RawInputs {
        baseline_fixed_expenses: 150_000.0,
        baseline_growth_rate: -0.05,
        ..neutral()
    };
    let m = derive_local(&raw, &MetricsConfig::default());

    assert!(m.burn_rate > 0.0);
    assert_eq!(m.break_even_month_estimate, None);
    assert_eq!(m.months_to_break_even, None);
    assert!(!m.is_break_even_achieved);
}

#[test]
fn revenue_equal_to_expenses_is_break_even_but_not_strictly_profitable() {
    let raw = RawInputs {
        baseline_revenue: 1_000.0,
        baseline_fixed_expenses: 1_000.0,
        ..neutral()
    };
    let m = derive_local(&raw, &MetricsConfig::default());

    assert_eq!(m.burn_rate, 0.0);
    assert!(m.is_break_even_achieved, "flag uses >=");
    assert_eq!(m.runway_months, 60.0);
    // Growth is zero, so the strict-profit branch does not apply.
    assert_eq!(m.break_even_month_estimate, None);
}

#[test]
fn team_size_is_exact_sum() {
    for (base, hired) in [(0.0, 0.0), (1.0, 3.0), (47.0, 10.0), (12.0, 0.0)] {
        let raw = RawInputs {
            baseline_team_size: base,
            employees_hired: hired,
            ..neutral()
        };
        let m = derive_local(&raw, &MetricsConfig::default());
        assert_eq!(m.total_team_size, base + hired);
    }
}

#[test]
fn break_even_flag_tracks_revenue_vs_expenses() {
    for fixed in [50_000.0, 99_999.0, 100_000.0, 100_001.0, 200_000.0] {
        let raw = RawInputs { baseline_fixed_expenses: fixed, ..neutral() };
        let m = derive_local(&raw, &MetricsConfig::default());
        assert_eq!(
            m.is_break_even_achieved,
            m.adjusted_revenue >= m.adjusted_fixed_expenses,
            "flag mismatch at fixed expenses {fixed}"
        );
    }
}

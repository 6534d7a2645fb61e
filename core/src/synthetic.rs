//! Synthetic startup dataset generator.
//!
//! Each field group draws from its own RNG stream, so widening one
//! group's ranges never shifts another group's values for a seed.

use crate::{
    error::{PipelineError, PipelineResult},
    rng::GeneratorRng,
    types::RawInputs,
};
use serde::{Deserialize, Serialize};

/// Stable stream assignments. Append only; reordering reseeds every group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum GeneratorStream {
    Team = 0,
    Revenue = 1,
    Market = 2,
    Expenses = 3,
    Funding = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn sample(&self, rng: &mut GeneratorRng) -> f64 {
        rng.uniform(self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorProfile {
    pub team_size: (u64, u64),
    pub hires: (u64, u64),
    pub revenue: Span,
    pub growth_rate: Span,
    pub pricing_change: Span,
    pub revenue_shock: Span,
    pub market_index: Span,
    pub fixed_expenses: Span,
    pub cost_cut: Span,
    pub cash: Span,
    pub equity_probability: f64,
    pub equity: Span,
    pub loan_probability: f64,
    pub loan: Span,
}

impl Default for GeneratorProfile {
    fn default() -> Self {
        Self {
            team_size: (1, 50),
            hires: (0, 10),
            revenue: Span::new(5_000.0, 500_000.0),
            growth_rate: Span::new(-0.05, 0.30),
            pricing_change: Span::new(-0.20, 0.20),
            revenue_shock: Span::new(-0.40, 0.10),
            market_index: Span::new(0.60, 1.40),
            fixed_expenses: Span::new(10_000.0, 400_000.0),
            cost_cut: Span::new(0.0, 0.30),
            cash: Span::new(50_000.0, 5_000_000.0),
            equity_probability: 0.4,
            equity: Span::new(100_000.0, 2_000_000.0),
            loan_probability: 0.3,
            loan: Span::new(50_000.0, 1_000_000.0),
        }
    }
}

impl GeneratorProfile {
    pub fn validate(&self) -> PipelineResult<()> {
        let int_ranges = [("team_size", self.team_size), ("hires", self.hires)];
        for (field, (lo, hi)) in int_ranges {
            if hi < lo {
                return Err(invalid(field, format!("max {hi} below min {lo}")));
            }
        }
        let spans = [
            ("revenue", self.revenue),
            ("growth_rate", self.growth_rate),
            ("pricing_change", self.pricing_change),
            ("revenue_shock", self.revenue_shock),
            ("market_index", self.market_index),
            ("fixed_expenses", self.fixed_expenses),
            ("cost_cut", self.cost_cut),
            ("cash", self.cash),
            ("equity", self.equity),
            ("loan", self.loan),
        ];
        for (field, span) in spans {
            if !span.min.is_finite() || !span.max.is_finite() || span.max < span.min {
                return Err(invalid(field, format!("bad span [{}, {}]", span.min, span.max)));
            }
        }
        for (field, p) in [
            ("equity_probability", self.equity_probability),
            ("loan_probability", self.loan_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(field, format!("probability {p} outside [0, 1]")));
            }
        }
        Ok(())
    }
}

/// Generate `rows` records deterministically from `seed`.
pub fn generate(seed: u64, rows: usize, profile: &GeneratorProfile) -> PipelineResult<Vec<RawInputs>> {
    profile.validate()?;

    let mut team = GeneratorRng::new(seed, GeneratorStream::Team as u64);
    let mut revenue = GeneratorRng::new(seed, GeneratorStream::Revenue as u64);
    let mut market = GeneratorRng::new(seed, GeneratorStream::Market as u64);
    let mut expenses = GeneratorRng::new(seed, GeneratorStream::Expenses as u64);
    let mut funding = GeneratorRng::new(seed, GeneratorStream::Funding as u64);

    let p = profile;
    let records = (0..rows)
        .map(|_| {
            // Draw both sides of each optional amount so the stream
            // position does not depend on the coin flip.
            let raise_equity = funding.chance(p.equity_probability);
            let equity_amount = p.equity.sample(&mut funding);
            let take_loan = funding.chance(p.loan_probability);
            let loan_amount = p.loan.sample(&mut funding);

            RawInputs {
                baseline_team_size: team.int_between(p.team_size.0, p.team_size.1) as f64,
                employees_hired: team.int_between(p.hires.0, p.hires.1) as f64,
                baseline_revenue: money(p.revenue.sample(&mut revenue)),
                baseline_growth_rate: rate(p.growth_rate.sample(&mut revenue)),
                pricing_change_percent: rate(p.pricing_change.sample(&mut revenue)),
                revenue_shock_percent: rate(p.revenue_shock.sample(&mut market)),
                market_index: rate(p.market_index.sample(&mut market)),
                baseline_fixed_expenses: money(p.fixed_expenses.sample(&mut expenses)),
                cost_cut_percent: rate(p.cost_cut.sample(&mut expenses)),
                baseline_cash: money(p.cash.sample(&mut funding)),
                equity_raised: if raise_equity { money(equity_amount) } else { 0.0 },
                loan_taken: if take_loan { money(loan_amount) } else { 0.0 },
            }
        })
        .collect::<Vec<_>>();

    log::info!("Generated {} synthetic rows (seed {seed})", records.len());
    Ok(records)
}

fn money(v: f64) -> f64 {
    v.round()
}

fn rate(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

fn invalid(field: &'static str, reason: String) -> PipelineError {
    PipelineError::InvalidConfig { field, reason }
}

//! Bid Coach recommendation engine
//!
//! Given current-project per-ton values and the three benchmark pools,
//! selects a target per labor category under the active mode policy,
//! clamps the correction upward-only, scores confidence from historical
//! sample size, and ranks the surviving candidates.

use std::cmp::Ordering;

use forgebid_domain::constants::{
    CONFIDENCE_HIGH_SAMPLES, CONFIDENCE_MEDIUM_SAMPLES, CONFIDENCE_UPGRADE_GAP_PCT,
    FALLBACK_LABOR_RATE, MATERIAL_GAP_PCT, MAX_RECOMMENDATIONS, MIN_DELTA_PER_TON,
    PROTECT_MARGIN_BUFFER, WIN_STRATEGY_BUFFER, WIN_STRATEGY_CORRECTION,
};
use forgebid_domain::{
    AggregateTotals, BenchmarkMaps, CoachMode, CoachRecommendation, CompanySettings, Confidence,
    LaborCategory, LineItem, Metric, TargetSource, ALLOWANCE_KEY,
};

/// Infer the labor rate used for cost-impact estimates: the first positive
/// rate among current lines, else the first positive company-configured
/// rate, else a fixed fallback.
pub fn infer_labor_rate(lines: &[LineItem], company: &CompanySettings) -> f64 {
    lines
        .iter()
        .map(|line| line.labor_rate)
        .find(|rate| *rate > 0.0)
        .or_else(|| company.first_positive_rate())
        .unwrap_or(FALLBACK_LABOR_RATE)
}

struct Candidate {
    material_gap: bool,
    recommendation: CoachRecommendation,
}

/// Produce ranked target adjustment recommendations.
///
/// Operates only on the labor-hours metric; a cost-metric aggregate yields
/// an empty list by design. Deltas are clamped upward-only: the coach
/// never recommends removing hours.
pub fn recommend(
    current: &AggregateTotals,
    benchmarks: &BenchmarkMaps,
    mode: CoachMode,
    labor_rate: f64,
) -> Vec<CoachRecommendation> {
    if current.metric != Metric::LaborHours {
        return Vec::new();
    }

    let keys =
        LaborCategory::ALL.iter().map(|category| category.key()).chain(std::iter::once(ALLOWANCE_KEY));

    let mut candidates: Vec<Candidate> = Vec::new();
    for key in keys {
        let current_value = current.per_ton_value(key);
        let win_loss = win_loss_blend(benchmarks.won_value(key), benchmarks.lost_value(key));
        let company_avg = benchmarks.all_value(key);

        let (target, source) = select_target(mode, current_value, win_loss, company_avg);
        let delta_per_ton = (target - current_value).max(0.0);
        let gap_pct = if target > 0.0 { (target - current_value) / target * 100.0 } else { 0.0 };

        if delta_per_ton <= MIN_DELTA_PER_TON && gap_pct <= MATERIAL_GAP_PCT {
            continue;
        }

        let total_delta_hours = delta_per_ton * current.tons;
        let est_cost_impact = total_delta_hours * labor_rate;
        let confidence = confidence_for(benchmarks.sample_size(), gap_pct);
        let label = LaborCategory::label_for_key(key);
        let rationale = rationale_for(&label, current_value, target, gap_pct, source);

        candidates.push(Candidate {
            material_gap: gap_pct.abs() > MATERIAL_GAP_PCT,
            recommendation: CoachRecommendation {
                category: key.to_string(),
                label,
                current_per_ton: current_value,
                target_per_ton: target,
                target_source: source,
                delta_per_ton,
                total_delta_hours,
                est_cost_impact,
                gap_pct,
                confidence,
                rationale,
            },
        });
    }

    // Material gaps outrank everything; within a tier, biggest hour
    // impact first.
    candidates.sort_by(|a, b| {
        b.material_gap.cmp(&a.material_gap).then_with(|| {
            b.recommendation
                .total_delta_hours
                .partial_cmp(&a.recommendation.total_delta_hours)
                .unwrap_or(Ordering::Equal)
        })
    });
    candidates.truncate(MAX_RECOMMENDATIONS);

    candidates.into_iter().map(|candidate| candidate.recommendation).collect()
}

/// Blend the won and lost pooled averages: their mean when both exist,
/// otherwise whichever is present.
fn win_loss_blend(won: f64, lost: f64) -> f64 {
    if won > 0.0 && lost > 0.0 {
        (won + lost) / 2.0
    } else if won > 0.0 {
        won
    } else {
        lost
    }
}

fn select_target(
    mode: CoachMode,
    current: f64,
    win_loss: f64,
    company_avg: f64,
) -> (f64, TargetSource) {
    match mode {
        CoachMode::ProtectMargin => {
            if win_loss > 0.0 {
                (win_loss, TargetSource::WonLostBlend)
            } else if company_avg > 0.0 {
                (company_avg, TargetSource::CompanyAverage)
            } else if current > 0.0 {
                (current * PROTECT_MARGIN_BUFFER, TargetSource::BaselineBuffer)
            } else {
                (0.0, TargetSource::BaselineBuffer)
            }
        }
        CoachMode::WinStrategy => {
            let (hard_target, source) = if win_loss > 0.0 {
                (win_loss, TargetSource::WonLostBlend)
            } else if company_avg > 0.0 {
                (company_avg, TargetSource::CompanyAverage)
            } else {
                (current * WIN_STRATEGY_BUFFER, TargetSource::BaselineBuffer)
            };
            let target = (current + (hard_target - current) * WIN_STRATEGY_CORRECTION).max(0.0);
            (target, source)
        }
    }
}

fn confidence_for(sample_size: usize, gap_pct: f64) -> Confidence {
    let tier = if sample_size >= CONFIDENCE_HIGH_SAMPLES {
        Confidence::High
    } else if sample_size >= CONFIDENCE_MEDIUM_SAMPLES {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    if tier == Confidence::Low && gap_pct.abs() > CONFIDENCE_UPGRADE_GAP_PCT {
        Confidence::Medium
    } else {
        tier
    }
}

fn rationale_for(
    label: &str,
    current: f64,
    target: f64,
    gap_pct: f64,
    source: TargetSource,
) -> String {
    if source == TargetSource::BaselineBuffer {
        return format!(
            "{label}: no historical benchmark available; holding a buffer over the current {current:.2} MH/ton."
        );
    }
    if gap_pct > 0.0 {
        format!(
            "{label} is running {gap_pct:.1}% under the {} ({current:.2} vs {target:.2} MH/ton).",
            source.label()
        )
    } else {
        format!(
            "{label} is at or above the {} ({current:.2} vs {target:.2} MH/ton).",
            source.label()
        )
    }
}

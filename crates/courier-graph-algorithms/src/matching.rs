//! Minimum-weight perfect matching
//!
//! Pairs every element of an even-sized set exactly once, minimizing the
//! summed pair cost. Costs are given as a symmetric matrix.
//!
//! `exact_matching` is a subset dynamic program, O(2^n * n) time and
//! O(2^n) memory, so it is bounded by a configurable limit.
//! `greedy_matching` repeatedly takes the cheapest pair whose endpoints are
//! both free; it is an approximation and its result says so.

use super::error::{AlgoError, AlgoResult};
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hard ceiling for the subset table regardless of configuration
pub const MAX_EXACT_MATCHING: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MatchingStrategy {
    /// Exact up to the limit, greedy beyond it
    #[default]
    Auto,
    /// Exact only; sets above the limit fail with `MatchingTooLarge`
    Exact,
    Greedy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Matching {
    /// Index pairs `(i, j)` with `i < j`
    pub pairs: Vec<(usize, usize)>,
    pub total_cost: f64,
    /// False when produced by the greedy approximation
    pub exact: bool,
}

fn require_even(n: usize) -> AlgoResult<()> {
    if n % 2 == 1 {
        return Err(AlgoError::InternalInvariant(format!(
            "perfect matching requested over {} elements",
            n
        )));
    }
    Ok(())
}

/// Exact minimum-weight perfect matching
pub fn exact_matching(costs: &[Vec<f64>]) -> AlgoResult<Matching> {
    let n = costs.len();
    require_even(n)?;
    if n > MAX_EXACT_MATCHING {
        return Err(AlgoError::MatchingTooLarge {
            odd: n,
            limit: MAX_EXACT_MATCHING,
        });
    }

    let full: usize = (1usize << n) - 1;
    // best[mask]: cheapest way to pair off everything outside `mask`
    let mut best = vec![f64::INFINITY; full + 1];
    let mut choice = vec![u8::MAX; full + 1];
    best[full] = 0.0;

    for mask in (0..full).rev() {
        if mask.count_ones() % 2 == 1 {
            continue;
        }
        let i = (!mask).trailing_zeros() as usize;
        let mut rest = !mask & full & !(1 << i);

        while rest != 0 {
            let j = rest.trailing_zeros() as usize;
            rest &= rest - 1;

            let next = mask | (1 << i) | (1 << j);
            let cost = costs[i][j] + best[next];
            if cost < best[mask] {
                best[mask] = cost;
                choice[mask] = j as u8;
            }
        }
    }

    if !best[0].is_finite() {
        return Err(AlgoError::InternalInvariant(
            "no finite-cost perfect matching exists".to_string(),
        ));
    }

    let mut pairs = Vec::with_capacity(n / 2);
    let mut mask = 0usize;
    while mask != full {
        let i = (!mask).trailing_zeros() as usize;
        let j = choice[mask] as usize;
        if j >= n {
            return Err(AlgoError::InternalInvariant(format!(
                "matching table has no choice for mask {:#b}",
                mask
            )));
        }
        pairs.push((i, j));
        mask |= (1 << i) | (1 << j);
    }

    Ok(Matching {
        pairs,
        total_cost: best[0],
        exact: true,
    })
}

/// Greedy nearest-pair matching (approximation)
pub fn greedy_matching(costs: &[Vec<f64>]) -> AlgoResult<Matching> {
    let n = costs.len();
    require_even(n)?;

    let mut candidates: Vec<(f64, usize, usize)> = Vec::with_capacity(n * n / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            candidates.push((costs[i][j], i, j));
        }
    }
    candidates.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| (a.1, a.2).cmp(&(b.1, b.2)))
    });

    let mut matched = vec![false; n];
    let mut pairs = Vec::with_capacity(n / 2);
    let mut total_cost = 0.0;

    for (cost, i, j) in candidates {
        if matched[i] || matched[j] {
            continue;
        }
        matched[i] = true;
        matched[j] = true;
        pairs.push((i, j));
        total_cost += cost;
    }

    if !total_cost.is_finite() {
        return Err(AlgoError::InternalInvariant(
            "no finite-cost perfect matching exists".to_string(),
        ));
    }

    Ok(Matching {
        pairs,
        total_cost,
        exact: false,
    })
}

/// Dispatch on `strategy`; `exact_limit` is the largest set solved exactly
pub fn min_weight_perfect_matching(
    costs: &[Vec<f64>],
    strategy: MatchingStrategy,
    exact_limit: usize,
) -> AlgoResult<Matching> {
    let n = costs.len();
    let limit = exact_limit.min(MAX_EXACT_MATCHING);

    let matching = match strategy {
        MatchingStrategy::Exact if n > limit => {
            return Err(AlgoError::MatchingTooLarge { odd: n, limit });
        }
        MatchingStrategy::Exact => exact_matching(costs)?,
        MatchingStrategy::Auto if n <= limit => exact_matching(costs)?,
        MatchingStrategy::Auto => {
            warn!(
                "{} odd-degree vertices exceed the exact matching limit of {}; using greedy approximation",
                n, limit
            );
            greedy_matching(costs)?
        }
        MatchingStrategy::Greedy => {
            warn!("Greedy matching requested; result is an approximation");
            greedy_matching(costs)?
        }
    };

    debug!(
        "Matched {} pairs, total cost {:.3} (exact: {})",
        matching.pairs.len(),
        matching.total_cost,
        matching.exact
    );
    Ok(matching)
}

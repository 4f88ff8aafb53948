//! Weighted random selection.
//!
//! The draw is a single linear walk: pick `r` uniformly in `[0, total)` and
//! subtract each candidate's weight until `r <= 0`. That gives every
//! candidate a probability of exactly `weight / total`.
//!
//! The RNG is a parameter so callers decide where entropy comes from; the
//! server uses the thread-local generator, tests use a seeded one.

use rand::Rng;

/// An approved catalog entry as seen by the selector: just its id and weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub weight: u32,
}

impl Candidate {
    pub fn new(id: impl Into<String>, weight: u32) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }
}

/// Choose one candidate with probability proportional to its weight.
///
/// `exclude` removes the currently displayed id so the same item is not shown
/// twice in a row. If removing it leaves nothing, the full set is used
/// instead. Zero-weight entries are never eligible. Returns `None` only when
/// no candidate has a positive weight.
pub fn choose<'a, R>(
    candidates: &'a [Candidate],
    exclude: Option<&str>,
    rng: &mut R,
) -> Option<&'a Candidate>
where
    R: Rng + ?Sized,
{
    let pool = eligible(candidates, exclude);
    if pool.is_empty() {
        return None;
    }
    let draw = rng.r#gen::<f64>() * total_weight(&pool);
    pick_with_draw(&pool, draw)
}

/// Walk `pool` in order, subtracting weights from `draw`.
///
/// The first candidate that brings the remainder to `<= 0` wins. When float
/// drift leaves a positive remainder after the walk, the last candidate is
/// returned.
pub fn pick_with_draw<'a>(pool: &[&'a Candidate], draw: f64) -> Option<&'a Candidate> {
    let mut remaining = draw;
    for candidate in pool {
        remaining -= f64::from(candidate.weight);
        if remaining <= 0.0 {
            return Some(candidate);
        }
    }
    pool.last().copied()
}

fn eligible<'a>(candidates: &'a [Candidate], exclude: Option<&str>) -> Vec<&'a Candidate> {
    let weighted: Vec<&Candidate> = candidates.iter().filter(|c| c.weight > 0).collect();
    let Some(excluded) = exclude else {
        return weighted;
    };
    let remaining: Vec<&Candidate> = weighted
        .iter()
        .copied()
        .filter(|c| c.id != excluded)
        .collect();
    if remaining.is_empty() {
        weighted
    } else {
        remaining
    }
}

fn total_weight(pool: &[&Candidate]) -> f64 {
    pool.iter().map(|c| u64::from(c.weight)).sum::<u64>() as f64
}

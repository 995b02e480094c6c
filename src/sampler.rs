use crate::{carto::datum::GeoPoint, error::Error};
use rand::Rng;

/// a place that may be drawn, proportionally to its weight
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedCandidate {
    pub point: GeoPoint,
    pub weight: f64,
}

impl WeightedCandidate {
    pub fn new(point: GeoPoint, weight: f64) -> Self {
        Self { point, weight }
    }
}

/// running sums of the weights, in candidate order
fn cumulate(candidates: &[WeightedCandidate]) -> Result<Vec<f64>, Error> {
    if candidates.is_empty() {
        return Err(Error::InvalidInput("no candidates to sample from".into()));
    }
    let mut total = 0.0;
    let mut sums = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !(candidate.weight >= 0.0 && candidate.weight.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "weight {} is not a finite non-negative number",
                candidate.weight
            )));
        }
        total += candidate.weight;
        sums.push(total);
    }
    if total <= 0.0 {
        return Err(Error::InvalidInput("candidate weights sum to zero".into()));
    }
    Ok(sums)
}

/// pick the candidate under `unit`, a draw from [0, 1) scaled to the total weight
///
/// The first candidate whose cumulative weight exceeds the scaled draw wins.
/// Draws outside the unit interval are rejected.
pub fn sample_with(candidates: &[WeightedCandidate], unit: f64) -> Result<GeoPoint, Error> {
    if !(0.0..1.0).contains(&unit) {
        return Err(Error::InvalidInput(format!("draw {} is outside [0, 1)", unit)));
    }
    let sums = cumulate(candidates)?;
    let total = sums[sums.len() - 1];
    let draw = unit * total;
    let index = sums
        .iter()
        .position(|&sum| sum > draw)
        // a draw rounding up to the total falls to the last weighted candidate
        .unwrap_or_else(|| {
            candidates
                .iter()
                .rposition(|candidate| candidate.weight > 0.0)
                .unwrap_or(candidates.len() - 1)
        });
    Ok(candidates[index].point)
}

/// pick a candidate at random, proportionally to weight
pub fn sample<R: Rng + ?Sized>(
    candidates: &[WeightedCandidate],
    rng: &mut R,
) -> Result<GeoPoint, Error> {
    sample_with(candidates, rng.random::<f64>())
}

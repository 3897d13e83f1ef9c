use crate::env::{Bounds, ContinuousState};
use crate::error::Error;

/// A discrete observation: position index and velocity index into the Q-table
pub type DiscreteState = [usize; 2];

/// Per-dimension scale factors applied before rounding, binning position
/// to the nearest 0.1 and velocity to the nearest 0.01
const SCALES: ContinuousState = [10.0, 100.0];

/// Maps continuous observations onto integer table indices.
///
/// Observations are shifted by the lower bound, scaled, and rounded with
/// [`f64::round`] (halfway cases round away from zero), so every
/// observation inside the declared bounds lands in `[0, extent)` per
/// dimension. Out-of-range observations are reported, never wrapped or
/// clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretizer {
    low: ContinuousState,
    extents: DiscreteState,
}

impl Discretizer {
    /// Derive a discretizer and its table extents from observation bounds
    pub fn new(bounds: &Bounds) -> Result<Self, Error> {
        let span = bounds.span();
        let extents = [scale(span[0], SCALES[0]), scale(span[1], SCALES[1])];
        if extents[0] < 1 || extents[1] < 1 {
            return Err(Error::InvalidBounds {
                low: bounds.low,
                high: bounds.high,
            });
        }
        Ok(Self {
            low: bounds.low,
            extents: [extents[0] as usize, extents[1] as usize],
        })
    }

    /// Number of distinct indices per dimension, `discretize(high - low)`
    pub fn extents(&self) -> DiscreteState {
        self.extents
    }

    /// Map an observation to its table indices
    pub fn discretize(&self, state: ContinuousState) -> Result<DiscreteState, Error> {
        let index = [
            scale(state[0] - self.low[0], SCALES[0]),
            scale(state[1] - self.low[1], SCALES[1]),
        ];
        let in_range = |i: usize| index[i] >= 0 && index[i] < self.extents[i] as i64;
        if !in_range(0) || !in_range(1) {
            return Err(Error::StateOutOfBounds {
                state,
                index,
                extents: self.extents,
            });
        }
        Ok([index[0] as usize, index[1] as usize])
    }
}

fn scale(value: f64, factor: f64) -> i64 {
    (value * factor).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_bounds() -> Bounds {
        Bounds {
            low: [-1.2, -0.07],
            high: [0.6, 0.07],
        }
    }

    #[test]
    fn extents_from_cart_bounds() {
        let d = Discretizer::new(&cart_bounds()).unwrap();
        assert_eq!(d.extents(), [18, 14]);
    }

    #[test]
    fn low_bound_maps_to_origin() {
        let d = Discretizer::new(&cart_bounds()).unwrap();
        assert_eq!(d.discretize([-1.2, -0.07]).unwrap(), [0, 0]);
    }

    #[test]
    fn interior_state_maps_deterministically() {
        let d = Discretizer::new(&cart_bounds()).unwrap();
        let state = [-0.5, 0.01];
        assert_eq!(d.discretize(state).unwrap(), [7, 8]);
        assert_eq!(d.discretize(state).unwrap(), d.discretize(state).unwrap());
    }

    #[test]
    fn halfway_values_round_away_from_zero() {
        // 0.25 * 10 is exactly 2.5; round-half-to-even would yield 2
        let d = Discretizer::new(&Bounds {
            low: [0.0, 0.0],
            high: [1.8, 0.14],
        })
        .unwrap();
        assert_eq!(d.discretize([0.25, 0.0]).unwrap(), [3, 0]);
    }

    #[test]
    fn state_below_low_is_rejected() {
        let d = Discretizer::new(&cart_bounds()).unwrap();
        let err = d.discretize([-1.4, 0.0]).unwrap_err();
        assert!(matches!(err, Error::StateOutOfBounds { index: [-2, 7], .. }));
    }

    #[test]
    fn state_at_high_bound_is_rejected() {
        let d = Discretizer::new(&cart_bounds()).unwrap();
        let err = d.discretize([0.6, 0.0]).unwrap_err();
        assert!(matches!(err, Error::StateOutOfBounds { index: [18, 7], .. }));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let bounds = Bounds {
            low: [0.6, -0.07],
            high: [-1.2, 0.07],
        };
        assert!(matches!(
            Discretizer::new(&bounds),
            Err(Error::InvalidBounds { .. })
        ));
    }
}

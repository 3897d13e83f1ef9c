use ndarray::{s, Array3, ArrayView1, ArrayViewMut1};
use rand::distributions::Uniform;
use rand::Rng;

use crate::discretize::DiscreteState;
use crate::error::Error;

/// Tabular action-value estimates.
///
/// A dense 3D array indexed by position index, velocity index, and
/// action. The value at `(p, v, a)` estimates the expected discounted
/// return for taking action `a` from discrete state `(p, v)`.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Array3<f64>,
}

impl QTable {
    /// Build a table of shape `(extents[0], extents[1], actions)` with
    /// every cell drawn independently and uniformly from `[-1, 1]`
    pub fn random(extents: DiscreteState, actions: usize, rng: &mut impl Rng) -> Self {
        let between = Uniform::new_inclusive(-1.0, 1.0);
        let values =
            Array3::from_shape_simple_fn((extents[0], extents[1], actions), || rng.sample(between));
        Self { values }
    }

    /// Table shape as `[positions, velocities, actions]`
    pub fn shape(&self) -> [usize; 3] {
        let (p, v, a) = self.values.dim();
        [p, v, a]
    }

    /// Number of discrete actions covered by the table
    pub fn action_count(&self) -> usize {
        self.values.dim().2
    }

    /// Read-only view of the underlying value array
    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }

    /// Current estimate for `(state, action)`
    pub fn get(&self, state: DiscreteState, action: usize) -> Result<f64, Error> {
        let row = self.row(state)?;
        row.get(action).copied().ok_or(Error::ActionOutOfBounds {
            action,
            actions: self.action_count(),
        })
    }

    /// Overwrite the estimate for `(state, action)`
    pub fn set(&mut self, state: DiscreteState, action: usize, value: f64) -> Result<(), Error> {
        let actions = self.action_count();
        let mut row = self.row_mut(state)?;
        let cell = row
            .get_mut(action)
            .ok_or(Error::ActionOutOfBounds { action, actions })?;
        *cell = value;
        Ok(())
    }

    /// The lowest-indexed action with the maximal value at `state`
    pub fn best_action(&self, state: DiscreteState) -> Result<usize, Error> {
        let row = self.row(state)?;
        let mut best = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (action, &value) in row.iter().enumerate() {
            if value > best_value {
                best = action;
                best_value = value;
            }
        }
        Ok(best)
    }

    /// The maximal value over actions at `state`
    pub fn best_value(&self, state: DiscreteState) -> Result<f64, Error> {
        let row = self.row(state)?;
        Ok(row.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    fn check(&self, state: DiscreteState) -> Result<(), Error> {
        let (p, v, _) = self.values.dim();
        if state[0] >= p || state[1] >= v {
            return Err(Error::StateIndexOutOfBounds {
                state,
                extents: [p, v],
            });
        }
        Ok(())
    }

    fn row(&self, state: DiscreteState) -> Result<ArrayView1<'_, f64>, Error> {
        self.check(state)?;
        Ok(self.values.slice(s![state[0], state[1], ..]))
    }

    fn row_mut(&mut self, state: DiscreteState) -> Result<ArrayViewMut1<'_, f64>, Error> {
        self.check(state)?;
        Ok(self.values.slice_mut(s![state[0], state[1], ..]))
    }
}

use rand::Rng;

use crate::discretize::DiscreteState;
use crate::error::Error;
use crate::table::QTable;

/// Exploration policy result
pub enum Choice {
    Explore,
    Exploit,
}

/// Epsilon greedy exploration policy
///
/// Exploits the best known action with probability `1 - epsilon` and
/// explores a uniformly random action otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpsilonGreedy;

impl EpsilonGreedy {
    /// Flip the explore/exploit coin for the current epsilon
    pub fn choose(&self, epsilon: f64, rng: &mut impl Rng) -> Choice {
        if rng.gen::<f64>() < 1.0 - epsilon {
            Choice::Exploit
        } else {
            Choice::Explore
        }
    }

    /// Select an action for `state`: the table's best action when
    /// exploiting, a uniformly random one when exploring.
    ///
    /// The coin flip and the random action are independent draws from
    /// `rng`.
    pub fn select_action(
        &self,
        state: DiscreteState,
        epsilon: f64,
        table: &QTable,
        rng: &mut impl Rng,
    ) -> Result<usize, Error> {
        match self.choose(epsilon, rng) {
            Choice::Exploit => table.best_action(state),
            Choice::Explore => Ok(rng.gen_range(0..table.action_count())),
        }
    }
}

use crate::discretize::DiscreteState;
use crate::error::Error;
use crate::table::QTable;

/// A single environment transition, consumed immediately by the update rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Discrete state the action was taken from
    pub state: DiscreteState,
    /// The action taken
    pub action: usize,
    /// The reward received for the action
    pub reward: f64,
    /// Discrete state the action led to
    pub next_state: DiscreteState,
    /// The episode ended by meeting the goal condition, not a step limit
    pub reached_goal: bool,
}

/// One-step Q-value backup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BellmanUpdate {
    alpha: f64, // learning rate
    gamma: f64, // discount factor
}

impl BellmanUpdate {
    pub fn new(learning_rate: f64, discount_rate: f64) -> Result<Self, Error> {
        if !(learning_rate > 0.0 && learning_rate <= 1.0) {
            return Err(Error::InvalidLearningRate(learning_rate));
        }
        if !(0.0..=1.0).contains(&discount_rate) {
            return Err(Error::InvalidDiscountRate(discount_rate));
        }
        Ok(Self {
            alpha: learning_rate,
            gamma: discount_rate,
        })
    }

    /// Apply the update rule for one transition.
    ///
    /// A goal-terminal transition writes the raw reward: the goal state
    /// is absorbing, so there is no future return to bootstrap from and
    /// the terminal reward is not blended against the prior estimate.
    /// Every other transition moves the estimate toward the one-step
    /// lookahead target `reward + gamma * best_value(next_state)`.
    pub fn apply(&self, table: &mut QTable, transition: &Transition) -> Result<(), Error> {
        let &Transition {
            state,
            action,
            reward,
            next_state,
            reached_goal,
        } = transition;

        if reached_goal {
            return table.set(state, action, reward);
        }

        let target = reward + self.gamma * table.best_value(next_state)?;
        let value = table.get(state, action)?;
        table.set(state, action, value + self.alpha * (target - value))
    }
}

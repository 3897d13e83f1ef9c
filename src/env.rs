use crate::error::EnvError;

/// A continuous observation: cart position and cart velocity
pub type ContinuousState = [f64; 2];

/// Per-dimension bounds of the observation space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub low: ContinuousState,
    pub high: ContinuousState,
}

impl Bounds {
    /// Per-dimension extent `high - low`
    pub fn span(&self) -> ContinuousState {
        [self.high[0] - self.low[0], self.high[1] - self.low[1]]
    }
}

/// The result of advancing the environment by one action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// The observation after the action was applied
    pub state: ContinuousState,
    /// The reward received for the action
    pub reward: f64,
    /// The episode ended, either at the goal or at a step limit
    pub done: bool,
    /// The goal condition held when the episode ended
    ///
    /// A step-limit truncation sets `done` without setting this flag.
    pub goal_reached: bool,
}

/// A simulated environment with a continuous two-dimensional observation
/// space and a finite action space, driven one action at a time.
///
/// Actions are indices in `[0, action_count)`. Observations must stay
/// within the declared [`Bounds`]; an observation outside them is a
/// contract breach and aborts training.
pub trait Environment {
    /// Reset the environment to an initial state
    fn reset(&mut self) -> Result<ContinuousState, EnvError>;

    /// Apply an action, producing the next observation and reward
    fn step(&mut self, action: usize) -> Result<Step, EnvError>;

    /// Bounds of the observation space, fixed for the lifetime of the environment
    fn bounds(&self) -> Bounds;

    /// Number of discrete actions
    fn action_count(&self) -> usize;

    /// Tear down any resources held by the environment
    ///
    /// Called once after the final episode.
    fn close(&mut self) {}
}

use thiserror::Error;

use crate::discretize::DiscreteState;
use crate::env::ContinuousState;

/// Convenience alias for results produced by this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error produced by an [`Environment`](crate::env::Environment) implementation
pub type EnvError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("`learning_rate` must be in (0, 1], got {0}")]
    InvalidLearningRate(f64),

    #[error("`discount_rate` must be in [0, 1], got {0}")]
    InvalidDiscountRate(f64),

    #[error("`epsilon` must be in [0, 1], got {0}")]
    InvalidEpsilon(f64),

    #[error("`min_epsilon` must be in [0, 1] and not exceed `epsilon`, got {min_epsilon} with epsilon {epsilon}")]
    InvalidMinEpsilon { epsilon: f64, min_epsilon: f64 },

    #[error("`episodes` must be positive")]
    NoEpisodes,

    #[error("environment declares no actions")]
    NoActions,

    #[error("observation bounds are inverted or empty: low {low:?}, high {high:?}")]
    InvalidBounds {
        low: ContinuousState,
        high: ContinuousState,
    },

    #[error("state {state:?} discretizes to {index:?}, outside the table extents {extents:?}")]
    StateOutOfBounds {
        state: ContinuousState,
        index: [i64; 2],
        extents: DiscreteState,
    },

    #[error("discrete state {state:?} falls outside the table extents {extents:?}")]
    StateIndexOutOfBounds {
        state: DiscreteState,
        extents: DiscreteState,
    },

    #[error("action {action} is outside the action space of size {actions}")]
    ActionOutOfBounds { action: usize, actions: usize },

    #[error("environment {op} failed")]
    Environment {
        op: &'static str,
        #[source]
        source: EnvError,
    },
}

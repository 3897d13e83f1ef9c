use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::decay::EpsilonSchedule;
use crate::discretize::Discretizer;
use crate::env::Environment;
use crate::error::Error;
use crate::exploration::EpsilonGreedy;
use crate::table::QTable;
use crate::update::{BellmanUpdate, Transition};

/// Configuration for a [`Trainer`] run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    /// Learning rate - must be in `(0, 1]`
    pub learning_rate: f64,
    /// Discount factor - must be in `[0, 1]`
    pub discount_rate: f64,
    /// Initial exploration rate - must be in `[0, 1]`
    pub epsilon: f64,
    /// Exploration rate floor - must be in `[0, epsilon]`
    pub min_epsilon: f64,
    /// Number of episodes to run - must be positive
    pub episodes: u32,
    /// Seed for the run's random source, or `None` to seed from entropy
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.2,
            discount_rate: 0.9,
            epsilon: 0.8,
            min_epsilon: 0.0,
            episodes: 5000,
            seed: None,
        }
    }
}

/// Outcome of a training run
#[derive(Debug)]
pub struct TrainingReport {
    /// The learned table
    pub table: QTable,
    /// Episodes fully completed, equal to the configured count unless cancelled
    pub episodes_completed: u32,
    /// Environment steps taken across all episodes
    pub total_steps: u64,
    /// Exploration rate when the run ended
    pub final_epsilon: f64,
}

/// Episode-driven tabular Q-learning loop.
///
/// Owns the Q-table, the exploration policy and its annealing schedule,
/// the update rule, and the random source for the duration of one run.
/// Episodes execute sequentially and the table is mutated in place; any
/// environment failure is fatal, since a half-applied episode cannot be
/// replayed without corrupting the accumulated estimates.
pub struct Trainer<E: Environment> {
    env: E,
    table: QTable,
    discretizer: Discretizer,
    exploration: EpsilonGreedy,
    update: BellmanUpdate,
    schedule: EpsilonSchedule,
    episodes: u32,
    rng: StdRng,
}

impl<E: Environment> Trainer<E> {
    /// Validate the configuration and set up a run over `env`.
    ///
    /// The table is sized from the environment's declared bounds and
    /// action count and filled with uniform random values in `[-1, 1]`.
    pub fn new(env: E, config: TrainerConfig) -> Result<Self, Error> {
        let update = BellmanUpdate::new(config.learning_rate, config.discount_rate)?;
        let schedule = EpsilonSchedule::new(config.epsilon, config.min_epsilon, config.episodes)?;
        let actions = env.action_count();
        if actions == 0 {
            return Err(Error::NoActions);
        }
        let discretizer = Discretizer::new(&env.bounds())?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let table = QTable::random(discretizer.extents(), actions, &mut rng);
        Ok(Self {
            env,
            table,
            discretizer,
            exploration: EpsilonGreedy,
            update,
            schedule,
            episodes: config.episodes,
            rng,
        })
    }

    /// The table in its current state
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// The current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.schedule.epsilon()
    }

    /// Run every episode to completion, then tear down the environment
    pub fn run(self) -> Result<TrainingReport, Error> {
        self.run_until(|| false)
    }

    /// Like [`Trainer::run`], but polls `cancel` between steps and stops
    /// early once it returns true.
    ///
    /// Cancellation is not an error: the environment is still torn down
    /// and the report carries the progress made so far.
    pub fn run_until(mut self, mut cancel: impl FnMut() -> bool) -> Result<TrainingReport, Error> {
        info!("starting training for {} episodes", self.episodes);
        let mut episodes_completed = 0;
        let mut total_steps = 0;

        'run: for episode in 0..self.episodes {
            let initial = self
                .env
                .reset()
                .map_err(|source| Error::Environment { op: "reset", source })?;
            let mut state = self.discretizer.discretize(initial)?;
            let mut steps = 0u64;

            loop {
                if cancel() {
                    info!("cancelled during episode {episode}");
                    total_steps += steps;
                    break 'run;
                }

                let action = self.exploration.select_action(
                    state,
                    self.schedule.epsilon(),
                    &self.table,
                    &mut self.rng,
                )?;
                let step = self
                    .env
                    .step(action)
                    .map_err(|source| Error::Environment { op: "step", source })?;
                let next_state = self.discretizer.discretize(step.state)?;

                self.update.apply(
                    &mut self.table,
                    &Transition {
                        state,
                        action,
                        reward: step.reward,
                        next_state,
                        reached_goal: step.done && step.goal_reached,
                    },
                )?;

                state = next_state;
                steps += 1;
                if step.done {
                    break;
                }
            }

            self.schedule.decay();
            episodes_completed += 1;
            total_steps += steps;
            debug!(
                "episode {episode} done after {steps} steps, epsilon {:.4}",
                self.schedule.epsilon()
            );
        }

        self.env.close();
        info!("training finished after {episodes_completed} episodes");
        Ok(TrainingReport {
            table: self.table,
            episodes_completed,
            total_steps,
            final_epsilon: self.schedule.epsilon(),
        })
    }
}

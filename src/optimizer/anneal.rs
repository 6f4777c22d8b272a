use super::space::KeySpace;
use crate::config::{AnnealConfig, RestartPolicy};
use crate::core_types::{LaneOutcome, LaneStats};
use crate::scorer::{NgramScorer, ScoringMode};
use fastrand::Rng;

/// Hooks for a caller that wants to watch a lane. Both default to no-ops.
pub trait SearchObserver: Sync {
    fn on_record(&self, _iteration: usize, _score: f64, _plaintext: &str) {}

    fn on_reheat(&self, _iteration: usize, _restarted: bool) {}
}

impl SearchObserver for () {}

/// Probability that a child replaces its parent at `temperature`.
pub fn acceptance_probability(child: f64, parent: f64, temperature: f64) -> f64 {
    if child > parent {
        return 1.0;
    }
    if temperature <= 0.0 {
        return if child == parent { 1.0 } else { 0.0 };
    }
    ((child - parent) / temperature).exp().min(1.0)
}

/// Metropolis rule: always take an improvement, otherwise take the child
/// with probability `exp(delta / T)`. A frozen lane only takes ties.
#[inline(always)]
pub fn accept(child: f64, parent: f64, temperature: f64, rng: &mut Rng) -> bool {
    if child > parent {
        return true;
    }
    if temperature <= 0.0 {
        return child == parent;
    }
    ((child - parent) / temperature).exp() > rng.f64()
}

/// Everything one lane mutates while it runs.
#[derive(Debug, Clone)]
pub struct SearchState<K> {
    pub parent: K,
    pub parent_score: f64,
    pub parent_plaintext: String,
    pub best: K,
    pub best_score: f64,
    pub best_plaintext: String,
    pub temperature: f64,
    pub stagnation: usize,
    pub stats: LaneStats,
}

impl<K: Clone> SearchState<K> {
    fn into_outcome(self) -> LaneOutcome<K> {
        LaneOutcome {
            key: self.best,
            score: self.best_score,
            plaintext: self.best_plaintext,
            stats: self.stats,
        }
    }
}

/// One simulated-annealing lane over a [`KeySpace`]. Candidates are scored
/// in the config's mode, not the scorer's.
pub struct Annealer<'a, S: KeySpace> {
    space: &'a S,
    scorer: &'a NgramScorer,
    config: AnnealConfig,
}

impl<'a, S: KeySpace> Annealer<'a, S> {
    pub fn new(space: &'a S, scorer: &'a NgramScorer, config: AnnealConfig) -> Self {
        Self {
            space,
            scorer,
            config,
        }
    }

    fn mode(&self) -> ScoringMode {
        self.config.mode
    }

    /// Decrypts and scores a key. Unusable candidates come back as `None`.
    pub fn evaluate(&self, key: &S::Key) -> Option<(f64, String)> {
        let plaintext = self.space.decrypt(key).filter(|p| !p.is_empty())?;
        let score = self.scorer.score_with(&plaintext, self.mode());
        Some((score, plaintext))
    }

    fn evaluate_or_sentinel(&self, key: &S::Key) -> (f64, String) {
        self.evaluate(key)
            .unwrap_or_else(|| (self.scorer.score_candidate(None, self.mode()), String::new()))
    }

    /// Starting point: the seed key if given, else a random one.
    pub fn init(&self, seed: Option<S::Key>, rng: &mut Rng) -> SearchState<S::Key> {
        let parent = seed.unwrap_or_else(|| self.space.random_key(rng));
        let (score, plaintext) = self.evaluate_or_sentinel(&parent);

        SearchState {
            best: parent.clone(),
            best_score: score,
            best_plaintext: plaintext.clone(),
            parent,
            parent_score: score,
            parent_plaintext: plaintext,
            temperature: self.config.initial_temperature,
            stagnation: 0,
            stats: LaneStats::default(),
        }
    }

    /// One proposal. Returns `true` if the incumbent improved.
    pub fn step<O: SearchObserver + ?Sized>(
        &self,
        state: &mut SearchState<S::Key>,
        rng: &mut Rng,
        observer: &O,
    ) -> bool {
        let iteration = state.stats.iterations;
        state.stats.iterations += 1;

        let child = self
            .space
            .neighbour(&state.parent, rng, &self.config.mutation);

        let Some((child_score, child_plaintext)) = self.evaluate(&child) else {
            state.stats.invalid += 1;
            return false;
        };
        state.stats.evaluated += 1;

        if accept(child_score, state.parent_score, state.temperature, rng) {
            state.parent = child;
            state.parent_score = child_score;
            state.parent_plaintext = child_plaintext;
            state.stats.accepted += 1;
        }

        let improved = state.parent_score > state.best_score;
        if improved {
            state.best = state.parent.clone();
            state.best_score = state.parent_score;
            state.best_plaintext = state.parent_plaintext.clone();
            state.stagnation = 0;
            observer.on_record(iteration, state.best_score, &state.best_plaintext);
        } else {
            state.stagnation += 1;
        }

        state.temperature *= self.config.cooling_rate;

        if let Some(limit) = self.config.stagnation_limit {
            if state.stagnation > limit {
                self.reheat(state, rng);
                observer.on_reheat(iteration, self.config.restart == RestartPolicy::Hard);
            }
        }

        improved
    }

    fn reheat(&self, state: &mut SearchState<S::Key>, rng: &mut Rng) {
        state.temperature = self.config.reheat_temperature;
        state.stagnation = 0;
        state.stats.reheats += 1;

        if self.config.restart == RestartPolicy::Hard {
            let parent = self.space.random_key(rng);
            let (score, plaintext) = self.evaluate_or_sentinel(&parent);
            state.parent = parent;
            state.parent_score = score;
            state.parent_plaintext = plaintext;
            state.stats.restarts += 1;
        }
    }

    pub fn run(&self, seed: Option<S::Key>, rng: &mut Rng) -> LaneOutcome<S::Key> {
        self.run_observed(seed, rng, &())
    }

    /// Runs the full iteration budget and reports the lane's incumbent.
    pub fn run_observed<O: SearchObserver + ?Sized>(
        &self,
        seed: Option<S::Key>,
        rng: &mut Rng,
        observer: &O,
    ) -> LaneOutcome<S::Key> {
        let mut state = self.init(seed, rng);
        for _ in 0..self.config.max_iterations {
            self.step(&mut state, rng, observer);
        }
        state.into_outcome()
    }
}

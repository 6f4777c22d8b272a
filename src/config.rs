use crate::error::{CfResult, CipherForgeError};
use crate::scorer::ScoringMode;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};
use typed_builder::TypedBuilder;

/// What happens to the parent key when a lane stagnates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RestartPolicy {
    /// Reheat only; keep the current parent.
    #[default]
    Soft,
    /// Reheat and restart from a fresh random key.
    Hard,
}

/// Relative weights of the mutation operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationPolicy {
    pub swap_weight: f64,
    pub reverse_weight: f64,
    /// Chance a swap is restricted to positions holding letters, leaving
    /// digits in place.
    pub letters_only_rate: f64,
    /// Joint search only: chance a proposal mutates the transposition order.
    pub order_mutation_rate: f64,
}

impl Default for MutationPolicy {
    fn default() -> Self {
        Self {
            swap_weight: 1.0,
            reverse_weight: 0.0,
            letters_only_rate: 0.0,
            order_mutation_rate: 0.0,
        }
    }
}

impl MutationPolicy {
    pub fn mixed(swap_weight: f64, reverse_weight: f64) -> Self {
        Self {
            swap_weight,
            reverse_weight,
            ..Default::default()
        }
    }
}

/// Every knob of one annealing lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(default)]
pub struct AnnealConfig {
    #[builder(default = 100_000)]
    pub max_iterations: usize,
    #[builder(default = 20.0)]
    pub initial_temperature: f64,
    #[builder(default = 0.9995)]
    pub cooling_rate: f64,
    #[builder(default = Some(2_000))]
    pub stagnation_limit: Option<usize>,
    #[builder(default = 20.0)]
    pub reheat_temperature: f64,
    #[builder(default)]
    pub restart: RestartPolicy,
    #[builder(default)]
    pub mutation: MutationPolicy,
    #[builder(default)]
    pub mode: ScoringMode,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AnnealConfig {
    pub fn validate(&self) -> CfResult<()> {
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(CipherForgeError::Config(format!(
                "cooling_rate must be in (0, 1], got {}",
                self.cooling_rate
            )));
        }
        if !(self.initial_temperature > 0.0) || !(self.reheat_temperature > 0.0) {
            return Err(CipherForgeError::Config(
                "temperatures must be positive".to_string(),
            ));
        }
        let m = &self.mutation;
        if m.swap_weight < 0.0 || m.reverse_weight < 0.0 || m.swap_weight + m.reverse_weight <= 0.0
        {
            return Err(CipherForgeError::Config(format!(
                "mutation weights must be non-negative with a positive sum (swap {}, reverse {})",
                m.swap_weight, m.reverse_weight
            )));
        }
        for (name, rate) in [
            ("order_mutation_rate", m.order_mutation_rate),
            ("letters_only_rate", m.letters_only_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(CipherForgeError::Config(format!(
                    "{} must be in [0, 1], got {}",
                    name, rate
                )));
            }
        }
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let content = fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Driver configurations observed in practice, one per attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Preset {
    /// Swap-only, fast cooling, hard restart on stagnation.
    Playfair,
    /// Short per-order lanes used while ranking transposition orders.
    /// Scores tolerantly so digit windows do not drag an order down.
    TranspositionLane,
    /// Long, slow refinement of an ADFGVX square under a fixed order.
    SquareRefine,
    /// Square and order annealed together.
    Joint,
}

impl Preset {
    pub fn config(self) -> AnnealConfig {
        match self {
            Preset::Playfair => AnnealConfig::builder()
                .max_iterations(100_000)
                .initial_temperature(20.0)
                .cooling_rate(0.9995)
                .stagnation_limit(Some(2_000))
                .reheat_temperature(20.0)
                .restart(RestartPolicy::Hard)
                .build(),
            Preset::TranspositionLane => AnnealConfig::builder()
                .max_iterations(20_000)
                .initial_temperature(20.0)
                .cooling_rate(0.995)
                .stagnation_limit(Some(2_000))
                .reheat_temperature(15.0)
                .restart(RestartPolicy::Soft)
                .mode(ScoringMode::Tolerant)
                .build(),
            Preset::SquareRefine => AnnealConfig::builder()
                .max_iterations(10_000_000)
                .initial_temperature(100.0)
                .cooling_rate(0.999_995)
                .stagnation_limit(None)
                .reheat_temperature(100.0)
                .mutation(MutationPolicy::mixed(0.6, 0.4))
                .mode(ScoringMode::Strict)
                .build(),
            Preset::Joint => AnnealConfig::builder()
                .max_iterations(20_000_000)
                .initial_temperature(40.0)
                .cooling_rate(0.999_99)
                .stagnation_limit(Some(500_000))
                .reheat_temperature(30.0)
                .restart(RestartPolicy::Soft)
                .mutation(MutationPolicy {
                    letters_only_rate: 0.95,
                    order_mutation_rate: 0.5,
                    ..MutationPolicy::default()
                })
                .mode(ScoringMode::Tolerant)
                .build(),
        }
    }
}

/// Command-line overrides applied on top of a preset or a JSON profile.
#[derive(Args, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnealOverrides {
    /// JSON file with a full annealing profile
    #[arg(long)]
    pub profile: Option<String>,
    #[arg(long)]
    pub iterations: Option<usize>,
    #[arg(long)]
    pub temp_start: Option<f64>,
    #[arg(long)]
    pub cooling_rate: Option<f64>,
    #[arg(long)]
    pub stagnation_limit: Option<usize>,
    /// Disable stagnation handling entirely
    #[arg(long, default_value_t = false)]
    pub no_stagnation: bool,
    #[arg(long)]
    pub reheat_temp: Option<f64>,
    #[arg(long)]
    pub restart: Option<RestartPolicy>,
    #[arg(long)]
    pub swap_weight: Option<f64>,
    #[arg(long)]
    pub reverse_weight: Option<f64>,
    #[arg(long)]
    pub letters_only_rate: Option<f64>,
    #[arg(long)]
    pub order_mutation_rate: Option<f64>,

    /// Window policy: "strict" scores digits, "tolerant" skips windows holding them
    #[arg(long)]
    pub mode: Option<ScoringMode>,
}

impl AnnealOverrides {
    /// Starts from the profile file if given, else the preset, then applies
    /// every explicitly set field and validates the result.
    pub fn resolve(&self, preset: Preset) -> CfResult<AnnealConfig> {
        let mut cfg = match &self.profile {
            Some(path) => AnnealConfig::load_from_file(path)?,
            None => preset.config(),
        };
        self.apply(&mut cfg);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn apply(&self, cfg: &mut AnnealConfig) {
        macro_rules! update_if_present {
            ($($target:ident).+, $field:ident) => {
                if let Some(v) = self.$field.clone() {
                    cfg.$($target).+ = v;
                }
            };
        }

        update_if_present!(max_iterations, iterations);
        update_if_present!(initial_temperature, temp_start);
        update_if_present!(cooling_rate, cooling_rate);
        update_if_present!(reheat_temperature, reheat_temp);
        update_if_present!(restart, restart);
        update_if_present!(mutation.swap_weight, swap_weight);
        update_if_present!(mutation.reverse_weight, reverse_weight);
        update_if_present!(mutation.letters_only_rate, letters_only_rate);
        update_if_present!(mutation.order_mutation_rate, order_mutation_rate);
        update_if_present!(mode, mode);

        if let Some(limit) = self.stagnation_limit {
            cfg.stagnation_limit = Some(limit);
        }
        if self.no_stagnation {
            cfg.stagnation_limit = None;
        }
    }
}

//! Random draws used by day generation
//!
//! Every distribution is built once from the configuration and then sampled
//! with the random source handed in by the caller; nothing here owns an RNG.
//! Continuous samples are truncated to whole seconds.

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::SimulationConfig;
use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;
use rand_distr::{Beta, Exp, Normal, Poisson};

/// Distributions and timing constants for one simulation
#[derive(Debug, Clone)]
pub struct ActivityDistributions {
    absence: Bernoulli,
    flex: Option<Exp<f64>>,
    lunch_delay: Option<Exp<f64>>,
    lunch_min_delay: i64,
    eat_time: Beta<f64>,
    eat_offset: f64,
    eat_scale: f64,
    meeting_duration: Normal<f64>,
    meeting_lead: Option<Exp<f64>>,
    meeting_min_lead: i64,
    guest_count: Option<Poisson<f64>>,
    guest_early: Option<Exp<f64>>,
    guest_visit: Normal<f64>,
    colleague_visits: Option<Poisson<f64>>,
    colleague_visit: Normal<f64>,
    hop_base: i64,
    hop_jitter: i64,
    settle_margin: i64,
    max_group_size: usize,
}

/// Exponential with the given mean, `None` for a zero mean
fn exp_with_mean(field: &str, mean_secs: u32) -> SimulationResult<Option<Exp<f64>>> {
    if mean_secs == 0 {
        return Ok(None);
    }
    Exp::new(1.0 / mean_secs as f64)
        .map(Some)
        .map_err(|e| SimulationError::sampling_error(format!("{}: {}", field, e)))
}

/// Poisson with the given rate, `None` for a zero rate
fn poisson(field: &str, lambda: f64) -> SimulationResult<Option<Poisson<f64>>> {
    if lambda == 0.0 {
        return Ok(None);
    }
    Poisson::new(lambda)
        .map(Some)
        .map_err(|e| SimulationError::sampling_error(format!("{}: {}", field, e)))
}

fn draw_exp<R: Rng>(dist: &Option<Exp<f64>>, rng: &mut R) -> i64 {
    dist.as_ref().map_or(0, |d| d.sample(rng) as i64)
}

fn draw_poisson<R: Rng>(dist: &Option<Poisson<f64>>, rng: &mut R) -> usize {
    dist.as_ref().map_or(0, |d| d.sample(rng) as usize)
}

impl ActivityDistributions {
    /// Build every distribution from the configuration
    pub fn new(config: &SimulationConfig) -> SimulationResult<Self> {
        let absence = Bernoulli::new(config.absence_probability).map_err(|e| {
            SimulationError::sampling_error(format!("absence_probability: {}", e))
        })?;

        Ok(Self {
            absence,
            flex: exp_with_mean("arrival_flex_secs", config.arrival_flex_secs)?,
            lunch_delay: exp_with_mean("lunch_delay_mean_secs", config.lunch_delay_mean_secs)?,
            lunch_min_delay: config.lunch_min_delay_secs as i64,
            eat_time: Beta::new(config.eat_time_alpha, config.eat_time_beta)?,
            eat_offset: config.eat_time_offset,
            eat_scale: config.eat_time_scale_secs,
            meeting_duration: Normal::new(config.meeting_mean_secs, config.meeting_std_secs)?,
            meeting_lead: exp_with_mean("meeting_lead_mean_secs", config.meeting_lead_mean_secs)?,
            meeting_min_lead: config.meeting_min_lead_secs as i64,
            guest_count: poisson("guest_lambda", config.guest_lambda)?,
            guest_early: exp_with_mean("guest_early_mean_secs", config.guest_early_mean_secs)?,
            guest_visit: Normal::new(config.guest_visit_mean_secs, config.guest_visit_std_secs)?,
            colleague_visits: poisson("colleague_visit_lambda", config.colleague_visit_lambda)?,
            colleague_visit: Normal::new(
                config.colleague_visit_mean_secs,
                config.colleague_visit_std_secs,
            )?,
            hop_base: config.hop_base_secs as i64,
            hop_jitter: config.hop_jitter_secs as i64,
            settle_margin: config.settle_margin_secs as i64,
            max_group_size: config.max_group_size.max(1),
        })
    }

    /// Bernoulli trial: the occupant calls in absent
    pub fn is_absent<R: Rng>(&self, rng: &mut R) -> bool {
        self.absence.sample(rng)
    }

    /// Exponential arrival/departure offset
    pub fn flex_delay<R: Rng>(&self, rng: &mut R) -> i64 {
        draw_exp(&self.flex, rng)
    }

    /// Wait after lunch service starts, floored at the configured minimum
    pub fn lunch_delay<R: Rng>(&self, rng: &mut R) -> i64 {
        draw_exp(&self.lunch_delay, rng).max(self.lunch_min_delay)
    }

    /// Time spent eating
    pub fn eat_duration<R: Rng>(&self, rng: &mut R) -> i64 {
        ((self.eat_time.sample(rng) + self.eat_offset) * self.eat_scale) as i64
    }

    /// How long before the meeting the occupant gets there, at least the minimum lead
    pub fn meeting_lead<R: Rng>(&self, rng: &mut R) -> i64 {
        draw_exp(&self.meeting_lead, rng).max(self.meeting_min_lead)
    }

    /// Meeting length, never negative
    pub fn meeting_duration<R: Rng>(&self, rng: &mut R) -> i64 {
        (self.meeting_duration.sample(rng) as i64).max(0)
    }

    /// Number of guests arriving today
    pub fn guest_count<R: Rng>(&self, rng: &mut R) -> usize {
        draw_poisson(&self.guest_count, rng)
    }

    /// How early a guest shows up at the entry
    pub fn guest_early<R: Rng>(&self, rng: &mut R) -> i64 {
        draw_exp(&self.guest_early, rng)
    }

    /// Requested guest visit length, never negative
    pub fn guest_visit_length<R: Rng>(&self, rng: &mut R) -> i64 {
        (self.guest_visit.sample(rng) as i64).max(0)
    }

    /// Number of colleague visit attempts for one occupant
    pub fn colleague_visit_attempts<R: Rng>(&self, rng: &mut R) -> usize {
        draw_poisson(&self.colleague_visits, rng)
    }

    /// Requested colleague visit length, never negative
    pub fn colleague_visit_length<R: Rng>(&self, rng: &mut R) -> i64 {
        (self.colleague_visit.sample(rng) as i64).max(0)
    }

    /// Uniform integer jitter in `[-hop_jitter, hop_jitter]`
    pub fn jitter<R: Rng>(&self, rng: &mut R) -> i64 {
        if self.hop_jitter == 0 {
            0
        } else {
            rng.gen_range(-self.hop_jitter..=self.hop_jitter)
        }
    }

    /// Time to cross one zone
    pub fn hop<R: Rng>(&self, rng: &mut R) -> i64 {
        (self.hop_base + self.jitter(rng)).max(0)
    }

    /// Pull both ends of a hosted window inward by the settling margin
    pub fn settle<R: Rng>(&self, start: i64, end: i64, rng: &mut R) -> (i64, i64) {
        let settled_start = start + self.settle_margin + self.jitter(rng);
        let settled_end = end - self.settle_margin + self.jitter(rng);
        (settled_start, settled_end)
    }

    /// Size of the next appointment group, at most `remaining`
    pub fn group_size<R: Rng>(&self, remaining: usize, rng: &mut R) -> usize {
        rng.gen_range(1..=self.max_group_size).min(remaining)
    }
}

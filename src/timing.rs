//! Gaussian duration sampling for service and arrival times.
//!
//! Both how long an animal drinks and how long a spawner waits between
//! arrivals are normally distributed around a per-species mean with a
//! standard deviation of 10 % of that mean. Samples are floored at
//! [`MIN_SAMPLE`] so no animal departs (or arrives) instantaneously.

use std::time::Duration;

use rand::Rng;

/// Floor applied to every sampled duration.
pub(crate) const MIN_SAMPLE: Duration = Duration::from_millis(100);

/// Ratio of the mean used as the standard deviation.
const STD_DEV_RATIO: f64 = 0.1;

/// Draws one sample from a normal distribution via the Box-Muller transform.
///
/// Uses two uniforms in `(0, 1]` so the logarithm stays finite.
pub(crate) fn gaussian(mean: f64, std_dev: f64) -> f64 {
    let mut rng = rand::rng();
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = 1.0 - rng.random::<f64>();
    let std_normal = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).sin();
    mean + std_dev * std_normal
}

/// Samples a duration around `mean` (σ = 10 % of the mean, floored).
pub(crate) fn sample_around(mean: Duration) -> Duration {
    let mean_secs = mean.as_secs_f64();
    let secs = gaussian(mean_secs, mean_secs * STD_DEV_RATIO).max(MIN_SAMPLE.as_secs_f64());
    Duration::from_secs_f64(secs)
}

//! Orbital state derivation
//!
//! Mean motion → altitude via Kepler's third law, then circular velocity and
//! period from altitude. An absent mean motion falls back to the configured
//! default; a non-positive one, or one that implies an implausible altitude,
//! is replaced by an altitude sampled uniformly from the LEO fallback band.
//! Sampled altitudes are tagged [`EstimationMethod::LeoFallback`] and must
//! not be presented as measured.

use crate::config::{AltitudePolicy, EngineConfig};
use crate::{Estimate, EstimationMethod};
use orbital_mechanics::{kepler, EarthModel, OrbitalState};
use rand::Rng;
use tracing::debug;

/// Uniform sample in [min, max); returns `min` for an empty band
pub(crate) fn sample_uniform<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + rng.gen::<f64>() * (max - min)
}

#[derive(Debug, Clone)]
pub struct OrbitalStateDeriver {
    earth: EarthModel,
    policy: AltitudePolicy,
}

impl OrbitalStateDeriver {
    pub fn new(earth: EarthModel, policy: AltitudePolicy) -> Self {
        Self { earth, policy }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.earth, config.altitude.clone())
    }

    /// Altitude (km) for a record's mean motion (rev/day)
    pub fn altitude_from_mean_motion<R: Rng>(
        &self,
        mean_motion: Option<f64>,
        rng: &mut R,
    ) -> Estimate<f64> {
        let (rev_per_day, defaulted) = match mean_motion {
            Some(mm) => (mm, false),
            None => (self.policy.default_mean_motion, true),
        };

        match kepler::altitude_from_mean_motion(&self.earth, rev_per_day) {
            Some(altitude) if self.policy.is_plausible(altitude) => {
                if defaulted {
                    Estimate::estimated(altitude, EstimationMethod::DefaultMeanMotion)
                } else {
                    Estimate::measured(altitude)
                }
            }
            derived => {
                let altitude = sample_uniform(
                    rng,
                    self.policy.fallback_min_km,
                    self.policy.fallback_max_km,
                );
                debug!(
                    "Mean motion {} rev/day gives unusable altitude {:?}; using {:.1} km",
                    rev_per_day, derived, altitude
                );
                Estimate::estimated(altitude, EstimationMethod::LeoFallback)
            }
        }
    }

    /// Circular orbit velocity (m/s)
    pub fn orbital_velocity(&self, altitude_km: f64) -> f64 {
        kepler::orbital_velocity(&self.earth, altitude_km)
    }

    /// Circular orbit period (minutes)
    pub fn orbital_period(&self, altitude_km: f64) -> f64 {
        kepler::orbital_period_minutes(&self.earth, altitude_km)
    }

    pub fn orbital_state(&self, altitude_km: f64) -> OrbitalState {
        OrbitalState::at_altitude(&self.earth, altitude_km)
    }
}

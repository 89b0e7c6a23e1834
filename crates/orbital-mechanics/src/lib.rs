//! Orbital Mechanics Library
//!
//! Two-body circular-orbit relations for tracked objects: altitude from
//! catalog mean motion (Kepler's third law), circular velocity and period,
//! the Hohmann deorbit burn down to the reentry altitude, and the scene
//! reference frame used to turn rendered positions into physical distances.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrbitalError {
    #[error("Invalid Earth model: {0}")]
    InvalidEarthModel(String),
    #[error("Invalid scene radius: {0}")]
    InvalidSceneRadius(f64),
}

pub type Result<T> = std::result::Result<T, OrbitalError>;

/// Earth gravitational parameter μ (m³/s²)
pub const MU_EARTH: f64 = 3.986e14;

/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Altitude at which an object is considered to be reentering (km)
pub const REENTRY_ALTITUDE_KM: f64 = 100.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Central body constants shared by every relation in this crate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EarthModel {
    /// Gravitational parameter μ (m³/s²)
    pub mu: f64,
    /// Mean radius (km)
    pub radius_km: f64,
}

impl Default for EarthModel {
    fn default() -> Self {
        Self {
            mu: MU_EARTH,
            radius_km: EARTH_RADIUS_KM,
        }
    }
}

impl EarthModel {
    pub fn validate(&self) -> Result<()> {
        if !(self.mu.is_finite() && self.mu > 0.0) {
            return Err(OrbitalError::InvalidEarthModel(format!(
                "gravitational parameter must be positive, got {}",
                self.mu
            )));
        }
        if !(self.radius_km.is_finite() && self.radius_km > 0.0) {
            return Err(OrbitalError::InvalidEarthModel(format!(
                "radius must be positive, got {} km",
                self.radius_km
            )));
        }
        Ok(())
    }

    /// Orbit radius in meters for a circular orbit at `altitude_km`
    pub fn orbit_radius_m(&self, altitude_km: f64) -> f64 {
        (self.radius_km + altitude_km) * 1000.0
    }
}

pub mod kepler {
    use super::*;
    use std::f64::consts::PI;

    /// Convert revolutions/day to angular rate in rad/s
    pub fn mean_motion_rad_per_sec(rev_per_day: f64) -> f64 {
        rev_per_day * 2.0 * PI / SECONDS_PER_DAY
    }

    /// Semi-major axis (m) from mean motion: a = (μ / n²)^(1/3)
    ///
    /// Returns `None` when the mean motion is not a positive finite number.
    pub fn semi_major_axis_m(earth: &EarthModel, rev_per_day: f64) -> Option<f64> {
        if !(rev_per_day.is_finite() && rev_per_day > 0.0) {
            return None;
        }
        let n = mean_motion_rad_per_sec(rev_per_day);
        Some((earth.mu / (n * n)).cbrt())
    }

    /// Altitude above the mean radius (km) implied by a mean motion.
    ///
    /// No plausibility band is applied here; very high mean motions give
    /// negative altitudes and it is up to the caller to reject them.
    pub fn altitude_from_mean_motion(earth: &EarthModel, rev_per_day: f64) -> Option<f64> {
        semi_major_axis_m(earth, rev_per_day).map(|a| a / 1000.0 - earth.radius_km)
    }

    /// Inverse of [`altitude_from_mean_motion`] (rev/day)
    pub fn mean_motion_from_altitude(earth: &EarthModel, altitude_km: f64) -> f64 {
        let a = earth.orbit_radius_m(altitude_km);
        let n = (earth.mu / a.powi(3)).sqrt();
        n * SECONDS_PER_DAY / (2.0 * PI)
    }

    /// Circular orbit velocity (m/s): v = sqrt(μ / r)
    pub fn orbital_velocity(earth: &EarthModel, altitude_km: f64) -> f64 {
        (earth.mu / earth.orbit_radius_m(altitude_km)).sqrt()
    }

    /// Circular orbit period (minutes): T = 2π·sqrt(r³/μ)
    pub fn orbital_period_minutes(earth: &EarthModel, altitude_km: f64) -> f64 {
        let r = earth.orbit_radius_m(altitude_km);
        2.0 * PI * (r.powi(3) / earth.mu).sqrt() / 60.0
    }

    /// Point-in-time circular orbit state
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    pub struct OrbitalState {
        pub altitude_km: f64,
        pub velocity_m_s: f64,
        pub period_min: f64,
    }

    impl OrbitalState {
        pub fn at_altitude(earth: &EarthModel, altitude_km: f64) -> Self {
            Self {
                altitude_km,
                velocity_m_s: orbital_velocity(earth, altitude_km),
                period_min: orbital_period_minutes(earth, altitude_km),
            }
        }

        pub fn velocity_km_s(&self) -> f64 {
            self.velocity_m_s / 1000.0
        }

        pub fn velocity_km_h(&self) -> f64 {
            self.velocity_m_s * 3.6
        }
    }
}

pub mod maneuver {
    use super::*;

    /// Two-impulse Hohmann deorbit from a circular orbit down to the reentry orbit
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    pub struct DeorbitManeuver {
        /// Current orbit radius r1 (m)
        pub initial_radius_m: f64,
        /// Reentry orbit radius r2 (m)
        pub reentry_radius_m: f64,
        /// Circular velocity at r1 (m/s)
        pub circular_velocity_m_s: f64,
        /// Velocity on the transfer ellipse at r1 (m/s)
        pub transfer_velocity_m_s: f64,
        /// Deorbit burn |v1 - v_transfer| (m/s)
        pub delta_v_m_s: f64,
    }

    /// Plan the deorbit burn from `altitude_km` down to `reentry_altitude_km`.
    ///
    /// Objects already at or below the reentry altitude need no burn. For
    /// the default reentry altitude the burn peaks near 31,600 km and falls
    /// above it, so Delta-V is not monotonic in altitude.
    pub fn hohmann_deorbit(
        earth: &EarthModel,
        altitude_km: f64,
        reentry_altitude_km: f64,
    ) -> DeorbitManeuver {
        let r1 = earth.orbit_radius_m(altitude_km);
        let r2 = earth.orbit_radius_m(reentry_altitude_km);

        let v1 = (earth.mu / r1).sqrt();
        if altitude_km <= reentry_altitude_km {
            return DeorbitManeuver {
                initial_radius_m: r1,
                reentry_radius_m: r2,
                circular_velocity_m_s: v1,
                transfer_velocity_m_s: v1,
                delta_v_m_s: 0.0,
            };
        }

        // vis-viva on the transfer ellipse with a = (r1 + r2) / 2
        let v_transfer = (earth.mu * (2.0 / r1 - 2.0 / (r1 + r2))).sqrt();

        DeorbitManeuver {
            initial_radius_m: r1,
            reentry_radius_m: r2,
            circular_velocity_m_s: v1,
            transfer_velocity_m_s: v_transfer,
            delta_v_m_s: (v1 - v_transfer).abs(),
        }
    }

    /// Deorbit Delta-V (m/s) to the default reentry altitude.
    ///
    /// Peaks near 31,600 km altitude; GEO objects need less than MEO ones.
    pub fn deorbit_delta_v(earth: &EarthModel, altitude_km: f64) -> f64 {
        hohmann_deorbit(earth, altitude_km, REENTRY_ALTITUDE_KM).delta_v_m_s
    }
}

pub mod frame {
    //! Scene reference frame
    //!
    //! Positions come from a rendered scene where the globe has radius
    //! `scene_radius`; one scene radius corresponds to one Earth radius.

    use super::*;
    use nalgebra::Vector3;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct ReferenceFrame {
        km_per_unit: f64,
    }

    impl ReferenceFrame {
        pub fn new(earth: &EarthModel, scene_radius: f64) -> Result<Self> {
            if !(scene_radius.is_finite() && scene_radius > 0.0) {
                return Err(OrbitalError::InvalidSceneRadius(scene_radius));
            }
            Ok(Self {
                km_per_unit: earth.radius_km / scene_radius,
            })
        }

        /// Kilometres represented by one scene unit
        pub fn km_per_unit(&self) -> f64 {
            self.km_per_unit
        }

        /// Physical separation (m) between two scene positions
        pub fn distance_m(&self, reference: &Vector3<f64>, target: &Vector3<f64>) -> f64 {
            (target - reference).norm() * self.km_per_unit() * 1000.0
        }

        pub fn distance_km(&self, reference: &Vector3<f64>, target: &Vector3<f64>) -> f64 {
            self.distance_m(reference, target) / 1000.0
        }
    }
}

pub use frame::ReferenceFrame;
pub use kepler::OrbitalState;
pub use maneuver::DeorbitManeuver;

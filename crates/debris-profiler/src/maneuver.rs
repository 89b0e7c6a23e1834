//! Deorbit maneuver cost
//!
//! Hohmann transfer from the current circular orbit down to the configured
//! reentry altitude, plus the gauge shown next to it.

use crate::config::{CostModel, EngineConfig, ManeuverConfig};
use orbital_mechanics::maneuver::hohmann_deorbit;
use orbital_mechanics::{DeorbitManeuver, EarthModel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeBand {
    Low,
    Medium,
    High,
}

/// Delta-V relative to the gauge full scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaVGauge {
    pub ratio: f64,
    /// Bar fill, capped at 100
    pub percent: f64,
    pub band: GaugeBand,
}

#[derive(Debug, Clone)]
pub struct ManeuverCostModel {
    earth: EarthModel,
    maneuver: ManeuverConfig,
    operational_per_m_s: f64,
}

impl ManeuverCostModel {
    pub fn new(earth: EarthModel, maneuver: ManeuverConfig, costs: &CostModel) -> Self {
        Self {
            earth,
            maneuver,
            operational_per_m_s: costs.operational_per_m_s,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.earth, config.maneuver.clone(), &config.costs)
    }

    pub fn deorbit(&self, altitude_km: f64) -> DeorbitManeuver {
        hohmann_deorbit(&self.earth, altitude_km, self.maneuver.reentry_altitude_km)
    }

    /// Deorbit Delta-V (m/s). Mass does not enter the impulsive burn.
    pub fn delta_v(&self, altitude_km: f64, _mass_kg: f64) -> f64 {
        self.deorbit(altitude_km).delta_v_m_s
    }

    pub fn gauge(&self, delta_v_m_s: f64) -> DeltaVGauge {
        let ratio = delta_v_m_s / self.maneuver.max_delta_v_m_s;
        let band = if ratio > self.maneuver.gauge_high_ratio {
            GaugeBand::High
        } else if ratio > self.maneuver.gauge_medium_ratio {
            GaugeBand::Medium
        } else {
            GaugeBand::Low
        };

        DeltaVGauge {
            ratio,
            percent: (ratio * 100.0).min(100.0),
            band,
        }
    }

    /// Operating cost of flying the burn (currency units)
    pub fn operational_cost(&self, delta_v_m_s: f64) -> f64 {
        delta_v_m_s * self.operational_per_m_s
    }
}

//! Retrieval mission economics
//!
//! ```text
//! benefit       = unit_value(material) · mass
//! cost          = k_mass·mass + k_vel·(v km/s)² + k_dist·(distance km) + k_dv·ΔV
//! profitability = benefit − cost
//! ```
//!
//! The model is a pure function of (mass, material, altitude, ΔV, distance)
//! and the configured coefficients. Every caller recomputes it from those
//! five inputs, so two callers given the same profile agree exactly.

use crate::config::{CostModel, EngineConfig, MaterialValues};
use crate::{Material, SatelliteProfile};
use orbital_mechanics::{EarthModel, OrbitalState};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Individual cost terms (currency units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub mass_cost: f64,
    pub velocity_cost: f64,
    pub distance_cost: f64,
    pub delta_v_cost: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.mass_cost + self.velocity_cost + self.distance_cost + self.delta_v_cost
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissionEconomics {
    pub material: Material,
    pub mass_kg: f64,
    pub unit_value_per_kg: f64,
    pub delta_v_m_s: f64,
    pub distance_km: f64,

    pub costs: CostBreakdown,
    pub benefit: f64,
    pub total_cost: f64,
    /// May be negative
    pub profitability: f64,
    pub viable: bool,
    /// profitability / cost · 100; absent when the mission costs nothing
    pub margin_percent: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct EconomicViabilityModel {
    earth: EarthModel,
    costs: CostModel,
    materials: MaterialValues,
}

impl EconomicViabilityModel {
    pub fn new(earth: EarthModel, costs: CostModel, materials: MaterialValues) -> Self {
        Self {
            earth,
            costs,
            materials,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.earth, config.costs.clone(), config.materials.clone())
    }

    /// Full economics from the five raw inputs
    pub fn evaluate(
        &self,
        mass_kg: f64,
        material: Material,
        altitude_km: f64,
        delta_v_m_s: f64,
        distance_m: f64,
    ) -> MissionEconomics {
        let unit_value = self.materials.unit_value(material);
        let benefit = unit_value * mass_kg;

        let velocity_km_s = OrbitalState::at_altitude(&self.earth, altitude_km).velocity_km_s();
        let distance_km = distance_m / 1000.0;

        let costs = CostBreakdown {
            mass_cost: self.costs.mass_per_kg * mass_kg,
            velocity_cost: self.costs.velocity_squared * velocity_km_s * velocity_km_s,
            distance_cost: self.costs.distance_per_km * distance_km,
            delta_v_cost: self.costs.delta_v_per_m_s * delta_v_m_s,
        };
        let total_cost = costs.total();
        let profitability = benefit - total_cost;

        debug!(
            "Mission {} kg {}: benefit {:.2}, costs {:.2}/{:.2}/{:.2}/{:.2}",
            mass_kg,
            material,
            benefit,
            costs.mass_cost,
            costs.velocity_cost,
            costs.distance_cost,
            costs.delta_v_cost
        );

        MissionEconomics {
            material,
            mass_kg,
            unit_value_per_kg: unit_value,
            delta_v_m_s,
            distance_km,
            costs,
            benefit,
            total_cost,
            profitability,
            viable: profitability > 0.0,
            margin_percent: (total_cost > 0.0).then(|| profitability / total_cost * 100.0),
        }
    }

    pub fn evaluate_profile(
        &self,
        profile: &SatelliteProfile,
        delta_v_m_s: f64,
        distance_m: f64,
    ) -> MissionEconomics {
        self.evaluate(
            profile.mass(),
            profile.material(),
            profile.altitude(),
            delta_v_m_s,
            distance_m,
        )
    }

    /// Net profitability (currency units) of retrieving `profile`
    pub fn mission_budget(
        &self,
        delta_v_m_s: f64,
        distance_m: f64,
        profile: &SatelliteProfile,
    ) -> f64 {
        self.evaluate_profile(profile, delta_v_m_s, distance_m)
            .profitability
    }
}

//! Environmental impact of a retrieval
//!
//! Rough figures shown alongside the mission budget: launch CO₂, the chance
//! of the object fragmenting before it decays, and how much of the recovered
//! material can be reused.

use crate::config::{EngineConfig, ImpactModel};
use crate::risk::FactorLevel;
use crate::SatelliteProfile;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentalImpact {
    /// kg CO₂
    pub co2_kg: f64,
    pub fragmentation_risk: FactorLevel,
    /// 0-100
    pub reusability_score: f64,
    /// Object mass as a percentage of the catalog average
    pub mass_vs_average_percent: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ImpactAssessor {
    model: ImpactModel,
}

impl ImpactAssessor {
    pub fn new(model: ImpactModel) -> Self {
        Self { model }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.impact.clone())
    }

    pub fn co2_kg(&self, mass_kg: f64, delta_v_m_s: f64) -> f64 {
        mass_kg * self.model.co2_per_kg + delta_v_m_s * self.model.co2_per_m_s
    }

    pub fn fragmentation_risk(&self, decay_time_years: f64) -> FactorLevel {
        if decay_time_years < self.model.fragmentation_high_years {
            FactorLevel::High
        } else if decay_time_years < self.model.fragmentation_medium_years {
            FactorLevel::Medium
        } else {
            FactorLevel::Low
        }
    }

    pub fn reusability(&self, profile: &SatelliteProfile) -> f64 {
        self.model
            .reusability
            .get(&profile.material())
            .copied()
            .unwrap_or(self.model.default_reusability)
    }

    pub fn assess(
        &self,
        profile: &SatelliteProfile,
        delta_v_m_s: f64,
        average_mass_kg: f64,
    ) -> EnvironmentalImpact {
        EnvironmentalImpact {
            co2_kg: self.co2_kg(profile.mass(), delta_v_m_s),
            fragmentation_risk: self.fragmentation_risk(profile.decay_time()),
            reusability_score: self.reusability(profile),
            mass_vs_average_percent: (average_mass_kg > 0.0)
                .then(|| profile.mass() / average_mass_kg * 100.0),
        }
    }
}

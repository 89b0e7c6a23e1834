//! Reentry risk scoring
//!
//! Three decay-time bands, each with its own linear risk formula:
//!
//! | Decay (years) | Tier   | Risk value              |
//! |---------------|--------|-------------------------|
//! | d < 8         | HIGH   | 100 − (d/8)·100         |
//! | 8 ≤ d < 15    | MEDIUM | 50 + (15 − d)/7·50      |
//! | d ≥ 15        | LOW    | (25 − d)/10·50          |
//!
//! The result is clamped to [10, 100]. The LOW formula turns negative past
//! 25 years and saturates at the floor of 10.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const HIGH_RISK_DECAY_YEARS: f64 = 8.0;
pub const MEDIUM_RISK_DECAY_YEARS: f64 = 15.0;
const LOW_RISK_ZERO_YEARS: f64 = 25.0;

pub const MIN_RISK_VALUE: f64 = 10.0;
pub const MAX_RISK_VALUE: f64 = 100.0;

/// Collision-risk altitude factor thresholds (km)
const ALTITUDE_FACTOR_HIGH_KM: f64 = 1000.0;
const ALTITUDE_FACTOR_MEDIUM_KM: f64 = 1500.0;

/// Collision-risk mass factor thresholds (kg)
const MASS_FACTOR_HIGH_KG: f64 = 1000.0;
const MASS_FACTOR_MEDIUM_KG: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Display color shared by every consumer
    pub fn color(&self) -> &'static str {
        match self {
            Self::High => "rgb(255, 85, 85)",
            Self::Medium => "rgb(255, 152, 0)",
            Self::Low => "rgb(76, 175, 80)",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    /// Percentage in [10, 100]
    pub risk_value: f64,
    pub color: &'static str,
}

/// Classify reentry risk from decay time (years)
pub fn vulnerability(decay_time_years: f64) -> RiskAssessment {
    let d = decay_time_years;
    let (tier, raw) = if d < HIGH_RISK_DECAY_YEARS {
        (RiskTier::High, 100.0 - (d / HIGH_RISK_DECAY_YEARS) * 100.0)
    } else if d < MEDIUM_RISK_DECAY_YEARS {
        (
            RiskTier::Medium,
            50.0 + (MEDIUM_RISK_DECAY_YEARS - d) / 7.0 * 50.0,
        )
    } else {
        (RiskTier::Low, (LOW_RISK_ZERO_YEARS - d) / 10.0 * 50.0)
    };

    RiskAssessment {
        tier,
        risk_value: raw.clamp(MIN_RISK_VALUE, MAX_RISK_VALUE),
        color: tier.color(),
    }
}

/// Coarse three-level factor used in collision summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactorLevel {
    Low,
    Medium,
    High,
}

impl FactorLevel {
    /// Lower altitude means a more crowded shell
    pub fn from_altitude(altitude_km: f64) -> Self {
        if altitude_km < ALTITUDE_FACTOR_HIGH_KM {
            Self::High
        } else if altitude_km < ALTITUDE_FACTOR_MEDIUM_KM {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Heavier objects do more damage on impact
    pub fn from_mass(mass_kg: f64) -> Self {
        if mass_kg > MASS_FACTOR_HIGH_KG {
            Self::High
        } else if mass_kg > MASS_FACTOR_MEDIUM_KG {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Collision risk summary for one object
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollisionRisk {
    pub vulnerability: RiskAssessment,
    pub delta_v_m_s: f64,
    pub altitude_factor: FactorLevel,
    pub mass_factor: FactorLevel,
    /// Guidance line for operators
    pub recommendation: &'static str,
}

/// Operator guidance for a reentry risk tier
pub fn recommendation(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::High => "significant risk; prioritize for removal",
        RiskTier::Medium => "requires continued monitoring",
        RiskTier::Low => "low risk of imminent collision",
    }
}

impl CollisionRisk {
    pub fn new(decay_time_years: f64, altitude_km: f64, mass_kg: f64, delta_v_m_s: f64) -> Self {
        let vulnerability = vulnerability(decay_time_years);
        Self {
            vulnerability,
            delta_v_m_s,
            altitude_factor: FactorLevel::from_altitude(altitude_km),
            mass_factor: FactorLevel::from_mass(mass_kg),
            recommendation: recommendation(vulnerability.tier),
        }
    }
}

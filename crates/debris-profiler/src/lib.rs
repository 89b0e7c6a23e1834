//! Debris Retrieval Profiler
//!
//! Turns sparse catalog tracking records into a consistent physical profile
//! per object and scores it for retrieval missions.
//!
//! # Pipeline
//!
//! ```text
//! TrackingRecord ──► deriver (altitude) ──► estimator (mass, material, decay) ──► SatelliteProfile
//!                                                                                    │
//!        risk · maneuver · economics · impact  ◄─────── on demand ───────────────────┘
//! ```
//!
//! Profiles are built once and never mutated. Every downstream figure
//! (orbital state, risk tier, Delta-V, mission budget) is recomputed from the
//! profile and the engine configuration, so two callers holding the same
//! profile always get bit-identical answers.
//!
//! Mass, material and decay time are heuristic estimates, not measurements.
//! Each profile field records whether it was measured or estimated and by
//! which method, see [`Estimate`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod catalog;
pub mod config;
pub mod deriver;
pub mod economics;
pub mod engine;
pub mod estimator;
pub mod impact;
pub mod loader;
pub mod maneuver;
pub mod risk;

pub use catalog::{Catalog, CatalogSummary, ProfileFilter};
pub use config::EngineConfig;
pub use economics::MissionEconomics;
pub use engine::{MissionReport, RetrievalEngine};
pub use risk::{RiskAssessment, RiskTier};

#[derive(Error, Debug)]
pub enum ProfilerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Unsupported record document: {0}")]
    UnsupportedDocument(String),
    #[error(transparent)]
    Orbital(#[from] orbital_mechanics::OrbitalError),
}

pub type Result<T> = std::result::Result<T, ProfilerError>;

/// Catalog category assigned by the data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Communications,
    Debris,
    Misc,
    Navigation,
    Scientific,
    SpaceStations,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Communications,
        Category::Debris,
        Category::Misc,
        Category::Navigation,
        Category::Scientific,
        Category::SpaceStations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Communications => "communications",
            Self::Debris => "debris",
            Self::Misc => "misc",
            Self::Navigation => "navigation",
            Self::Scientific => "scientific",
            Self::SpaceStations => "space_stations",
        }
    }

    /// Parse a category tag, ignoring case and surrounding whitespace
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dominant structural material of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Material {
    Aluminum,
    Steel,
    Composite,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::Aluminum, Material::Steel, Material::Composite];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aluminum => "Aluminum",
            Self::Steel => "Steel",
            Self::Composite => "Composite",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an estimated profile value was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimationMethod {
    /// Mean motion was absent; the default mean motion was used instead
    DefaultMeanMotion,
    /// Mean motion was unusable; altitude sampled from the LEO fallback band
    LeoFallback,
    /// Sampled from the category mass range
    CategoryRange,
    /// Sampled from the category mass range, attenuated by B*
    CategoryRangeDragAdjusted,
    /// Drawn from the category material prior
    CategoryPrior,
    /// Linear in altitude
    AltitudeLinear,
    /// Linear in altitude, attenuated by B*
    AltitudeDragAdjusted,
}

impl EstimationMethod {
    pub fn description(&self) -> &'static str {
        match self {
            Self::DefaultMeanMotion => "derived from the default mean motion (no tracking value)",
            Self::LeoFallback => "synthetic low-Earth-orbit altitude (tracking value unusable)",
            Self::CategoryRange => "sampled from the category mass range",
            Self::CategoryRangeDragAdjusted => "category mass range adjusted for drag",
            Self::CategoryPrior => "category material prior",
            Self::AltitudeLinear => "linear altitude decay model",
            Self::AltitudeDragAdjusted => "linear altitude decay model adjusted for drag",
        }
    }
}

/// A profile value tagged with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Estimate<T> {
    Measured { value: T },
    Estimated { value: T, method: EstimationMethod },
}

impl<T> Estimate<T> {
    pub fn measured(value: T) -> Self {
        Self::Measured { value }
    }

    pub fn estimated(value: T, method: EstimationMethod) -> Self {
        Self::Estimated { value, method }
    }

    pub fn get(&self) -> &T {
        match self {
            Self::Measured { value } | Self::Estimated { value, .. } => value,
        }
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured { .. })
    }

    pub fn method(&self) -> Option<EstimationMethod> {
        match self {
            Self::Measured { .. } => None,
            Self::Estimated { method, .. } => Some(*method),
        }
    }
}

impl<T: Copy> Estimate<T> {
    pub fn value(&self) -> T {
        *self.get()
    }
}

/// One catalog entry as delivered by the data source.
///
/// Every field is optional; absent or non-numeric values are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub norad_cat_id: Option<u32>,
    pub object_name: Option<String>,
    pub object_id: Option<String>,
    pub category: Option<Category>,
    pub epoch: Option<NaiveDateTime>,
    /// Revolutions per day
    pub mean_motion: Option<f64>,
    /// Degrees
    pub inclination: Option<f64>,
    pub eccentricity: Option<f64>,
    /// Degrees
    pub ra_of_asc_node: Option<f64>,
    /// Degrees
    pub arg_of_pericenter: Option<f64>,
    /// Degrees
    pub mean_anomaly: Option<f64>,
    /// B* drag term
    pub bstar: Option<f64>,
}

impl TrackingRecord {
    /// True when every orbital element is present
    pub fn is_complete(&self) -> bool {
        self.mean_motion.is_some()
            && self.inclination.is_some()
            && self.eccentricity.is_some()
            && self.ra_of_asc_node.is_some()
            && self.arg_of_pericenter.is_some()
            && self.mean_anomaly.is_some()
            && self.bstar.is_some()
    }
}

/// Tracking elements retained on the profile for traceability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TleElements {
    pub mean_motion: f64,
    pub ra_of_asc_node: f64,
    pub arg_of_pericenter: f64,
    pub mean_anomaly: f64,
    pub bstar: f64,
    pub epoch: Option<NaiveDateTime>,
}

/// Derived physical and orbital profile of one tracked object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteProfile {
    pub id: String,
    pub norad_id: Option<u32>,
    pub object_id: Option<String>,
    pub name: String,
    pub category: Category,

    pub altitude_km: Estimate<f64>,
    pub mass_kg: Estimate<f64>,
    pub material: Estimate<Material>,
    pub decay_time_years: Estimate<f64>,

    /// Degrees
    pub inclination: f64,
    pub eccentricity: f64,

    /// Angular rate used by the scene animation
    pub simulated_speed: f64,

    pub elements: TleElements,
}

/// Provenance of one estimated profile field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EstimationNote {
    pub field: &'static str,
    pub method: EstimationMethod,
    pub description: &'static str,
}

impl SatelliteProfile {
    /// One note per field that was estimated rather than measured
    pub fn estimation_notes(&self) -> Vec<EstimationNote> {
        [
            ("altitude_km", self.altitude_km.method()),
            ("mass_kg", self.mass_kg.method()),
            ("material", self.material.method()),
            ("decay_time_years", self.decay_time_years.method()),
        ]
        .into_iter()
        .filter_map(|(field, method)| {
            method.map(|method| EstimationNote {
                field,
                method,
                description: method.description(),
            })
        })
        .collect()
    }

    pub fn altitude(&self) -> f64 {
        self.altitude_km.value()
    }

    pub fn mass(&self) -> f64 {
        self.mass_kg.value()
    }

    pub fn material(&self) -> Material {
        self.material.value()
    }

    pub fn decay_time(&self) -> f64 {
        self.decay_time_years.value()
    }
}

//! Engine configuration
//!
//! Every constant the profiler uses lives here with its default. A JSON
//! file may override any subset of sections; missing keys keep defaults.

use crate::{Category, Material, ProfilerError, Result};
use orbital_mechanics::{EarthModel, REENTRY_ALTITUDE_KM};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Mean motion assumed when a record has none (rev/day)
pub const DEFAULT_MEAN_MOTION: f64 = 15.5;

/// Full scale of the Delta-V gauge (m/s)
pub const MAX_DELTA_V: f64 = 300.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub earth: EarthModel,
    pub altitude: AltitudePolicy,
    pub mass: MassPriors,
    pub drag: DragModel,
    pub decay: DecayModel,
    pub maneuver: ManeuverConfig,
    pub costs: CostModel,
    pub materials: MaterialValues,
    pub impact: ImpactModel,
}

impl EngineConfig {
    /// Load a configuration file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading engine configuration from {:?}", path);

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: EngineConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.earth.validate()?;
        self.altitude.validate()?;
        self.mass.validate()?;
        self.decay.validate()?;

        check_non_negative("drag.mass_scale", self.drag.mass_scale)?;
        check_non_negative("drag.mass_factor_cap", self.drag.mass_factor_cap)?;
        check_non_negative("drag.decay_scale", self.drag.decay_scale)?;

        check_non_negative("maneuver.reentry_altitude_km", self.maneuver.reentry_altitude_km)?;
        if !(self.maneuver.max_delta_v_m_s.is_finite() && self.maneuver.max_delta_v_m_s > 0.0) {
            return Err(ProfilerError::InvalidConfig(format!(
                "maneuver.max_delta_v_m_s must be positive, got {}",
                self.maneuver.max_delta_v_m_s
            )));
        }

        check_non_negative("costs.mass_per_kg", self.costs.mass_per_kg)?;
        check_non_negative("costs.velocity_squared", self.costs.velocity_squared)?;
        check_non_negative("costs.distance_per_km", self.costs.distance_per_km)?;
        check_non_negative("costs.delta_v_per_m_s", self.costs.delta_v_per_m_s)?;
        check_non_negative("costs.operational_per_m_s", self.costs.operational_per_m_s)?;

        check_non_negative("materials.default_per_kg", self.materials.default_per_kg)?;
        for (material, value) in &self.materials.per_kg {
            check_non_negative(&format!("materials.per_kg.{}", material), *value)?;
        }

        Ok(())
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProfilerError::InvalidConfig(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

/// Altitude derivation policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltitudePolicy {
    /// Mean motion used when the record has none (rev/day)
    pub default_mean_motion: f64,
    /// Derived altitudes outside [min, max] km are treated as implausible
    pub plausible_min_km: f64,
    pub plausible_max_km: f64,
    /// Band sampled when the derived altitude is unusable (km)
    pub fallback_min_km: f64,
    pub fallback_max_km: f64,
}

impl Default for AltitudePolicy {
    fn default() -> Self {
        Self {
            default_mean_motion: DEFAULT_MEAN_MOTION,
            plausible_min_km: 100.0,
            plausible_max_km: 40_000.0,
            fallback_min_km: 200.0,
            fallback_max_km: 800.0,
        }
    }
}

impl AltitudePolicy {
    fn validate(&self) -> Result<()> {
        if !(self.default_mean_motion.is_finite() && self.default_mean_motion > 0.0) {
            return Err(ProfilerError::InvalidConfig(format!(
                "altitude.default_mean_motion must be positive, got {}",
                self.default_mean_motion
            )));
        }
        check_range("altitude.plausible", self.plausible_min_km, self.plausible_max_km)?;
        check_range("altitude.fallback", self.fallback_min_km, self.fallback_max_km)
    }

    pub fn is_plausible(&self, altitude_km: f64) -> bool {
        (self.plausible_min_km..=self.plausible_max_km).contains(&altitude_km)
    }
}

fn check_range(name: &str, min: f64, max: f64) -> Result<()> {
    if min.is_finite() && max.is_finite() && min >= 0.0 && min <= max {
        Ok(())
    } else {
        Err(ProfilerError::InvalidConfig(format!(
            "{} range must satisfy 0 <= min <= max, got [{}, {}]",
            name, min, max
        )))
    }
}

/// Inclusive-exclusive mass range (kg)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassRange {
    pub min_kg: f64,
    pub max_kg: f64,
}

impl MassRange {
    pub const fn new(min_kg: f64, max_kg: f64) -> Self {
        Self { min_kg, max_kg }
    }
}

/// Category mass priors (kg)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassPriors {
    pub space_stations: MassRange,
    pub debris: MassRange,
    /// Shared by communications and navigation
    pub communications: MassRange,
    pub scientific: MassRange,
    pub other: MassRange,
}

impl Default for MassPriors {
    fn default() -> Self {
        Self {
            space_stations: MassRange::new(50_000.0, 150_000.0),
            debris: MassRange::new(10.0, 110.0),
            communications: MassRange::new(500.0, 2_500.0),
            scientific: MassRange::new(200.0, 1_200.0),
            other: MassRange::new(50.0, 550.0),
        }
    }
}

impl MassPriors {
    pub fn range_for(&self, category: Category) -> MassRange {
        match category {
            Category::SpaceStations => self.space_stations,
            Category::Debris => self.debris,
            Category::Communications | Category::Navigation => self.communications,
            Category::Scientific => self.scientific,
            Category::Misc => self.other,
        }
    }

    fn validate(&self) -> Result<()> {
        let ranges = [
            ("mass.space_stations", self.space_stations),
            ("mass.debris", self.debris),
            ("mass.communications", self.communications),
            ("mass.scientific", self.scientific),
            ("mass.other", self.other),
        ];
        for (name, range) in ranges {
            check_range(name, range.min_kg, range.max_kg)?;
            if range.min_kg <= 0.0 {
                return Err(ProfilerError::InvalidConfig(format!(
                    "{} minimum must be positive, got {}",
                    name, range.min_kg
                )));
            }
        }
        Ok(())
    }
}

/// B* attenuation of mass and decay time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragModel {
    /// mass /= 1 + min(|B*| * mass_scale, mass_factor_cap)
    pub mass_scale: f64,
    pub mass_factor_cap: f64,
    /// decay /= 1 + |B*| * decay_scale
    pub decay_scale: f64,
}

impl Default for DragModel {
    fn default() -> Self {
        Self {
            mass_scale: 10_000.0,
            mass_factor_cap: 2.0,
            decay_scale: 100_000.0,
        }
    }
}

/// Linear altitude decay model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayModel {
    pub years_per_100_km: f64,
    pub min_years: f64,
    pub max_years: f64,
}

impl Default for DecayModel {
    fn default() -> Self {
        Self {
            years_per_100_km: 2.0,
            min_years: 1.0,
            max_years: 100.0,
        }
    }
}

impl DecayModel {
    fn validate(&self) -> Result<()> {
        check_non_negative("decay.years_per_100_km", self.years_per_100_km)?;
        check_range("decay", self.min_years, self.max_years)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManeuverConfig {
    pub reentry_altitude_km: f64,
    /// Full scale of the Delta-V gauge
    pub max_delta_v_m_s: f64,
    /// Gauge ratio above which the burn is shown as expensive
    pub gauge_high_ratio: f64,
    pub gauge_medium_ratio: f64,
}

impl Default for ManeuverConfig {
    fn default() -> Self {
        Self {
            reentry_altitude_km: REENTRY_ALTITUDE_KM,
            max_delta_v_m_s: MAX_DELTA_V,
            gauge_high_ratio: 0.7,
            gauge_medium_ratio: 0.4,
        }
    }
}

/// Retrieval mission cost coefficients (currency units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    pub mass_per_kg: f64,
    /// Multiplies (orbital velocity in km/s)²
    pub velocity_squared: f64,
    pub distance_per_km: f64,
    pub delta_v_per_m_s: f64,
    /// Operational cost shown next to the budget
    pub operational_per_m_s: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            mass_per_kg: 20.0,
            velocity_squared: 50.0,
            distance_per_km: 0.5,
            delta_v_per_m_s: 0.5,
            operational_per_m_s: 2.5,
        }
    }
}

/// Recovered material value per kg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialValues {
    pub per_kg: BTreeMap<Material, f64>,
    /// Used for any material missing from `per_kg`
    pub default_per_kg: f64,
}

impl Default for MaterialValues {
    fn default() -> Self {
        Self {
            per_kg: BTreeMap::from([
                (Material::Aluminum, 50.0),
                (Material::Steel, 100.0),
                (Material::Composite, 500.0),
            ]),
            default_per_kg: 100.0,
        }
    }
}

impl MaterialValues {
    pub fn unit_value(&self, material: Material) -> f64 {
        self.per_kg
            .get(&material)
            .copied()
            .unwrap_or(self.default_per_kg)
    }
}

/// Environmental impact heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactModel {
    pub co2_per_kg: f64,
    pub co2_per_m_s: f64,
    /// Decay below this is a high fragmentation risk (years)
    pub fragmentation_high_years: f64,
    pub fragmentation_medium_years: f64,
    /// Reusability score per material (0-100)
    pub reusability: BTreeMap<Material, f64>,
    pub default_reusability: f64,
}

impl Default for ImpactModel {
    fn default() -> Self {
        Self {
            co2_per_kg: 0.5,
            co2_per_m_s: 0.1,
            fragmentation_high_years: 10.0,
            fragmentation_medium_years: 20.0,
            reusability: BTreeMap::from([
                (Material::Aluminum, 85.0),
                (Material::Steel, 70.0),
                (Material::Composite, 60.0),
            ]),
            default_reusability: 60.0,
        }
    }
}

//! Profile catalog, aggregates and queries
//!
//! The catalog is built once by the engine and is read-only afterwards.
//! Query results borrow from it.

use crate::risk::{vulnerability, RiskTier};
use crate::{Category, Material, SatelliteProfile};
use serde::{Deserialize, Serialize};

/// Average mass reported for an empty catalog (kg)
pub const EMPTY_AVERAGE_MASS_KG: f64 = 100.0;
/// Average speed reported for an empty catalog
pub const EMPTY_AVERAGE_SPEED: f64 = 10.0;

/// Results returned by the name, material and category queries
pub const QUERY_LIMIT: usize = 10;
/// Results returned by the high-risk summary
pub const HIGH_RISK_LIMIT: usize = 5;

/// Scale applied to the scene angular rate before display
const SPEED_DISPLAY_SCALE: f64 = 10_000.0;

/// Displayed speed of a profile, `|simulated_speed · 10⁴|`
pub fn display_speed(profile: &SatelliteProfile) -> f64 {
    (profile.simulated_speed * SPEED_DISPLAY_SCALE).abs()
}

/// Speed as a percentage of the filter slider range
pub fn speed_scale(profile: &SatelliteProfile) -> f64 {
    display_speed(profile) / 24.0 * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub object_count: usize,
    pub average_mass_kg: f64,
    pub average_simulated_speed: f64,
}

impl CatalogSummary {
    pub fn from_profiles(profiles: &[SatelliteProfile]) -> Self {
        if profiles.is_empty() {
            return Self {
                object_count: 0,
                average_mass_kg: EMPTY_AVERAGE_MASS_KG,
                average_simulated_speed: EMPTY_AVERAGE_SPEED,
            };
        }

        let n = profiles.len() as f64;
        let total_mass: f64 = profiles.iter().map(|p| p.mass()).sum();
        let total_speed: f64 = profiles.iter().map(display_speed).sum();

        Self {
            object_count: profiles.len(),
            average_mass_kg: total_mass / n,
            average_simulated_speed: total_speed / n,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    profiles: Vec<SatelliteProfile>,
    summary: CatalogSummary,
}

impl Catalog {
    pub fn new(profiles: Vec<SatelliteProfile>) -> Self {
        let summary = CatalogSummary::from_profiles(&profiles);
        Self { profiles, summary }
    }

    pub fn profiles(&self) -> &[SatelliteProfile] {
        &self.profiles
    }

    pub fn summary(&self) -> &CatalogSummary {
        &self.summary
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SatelliteProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn find_by_norad_id(&self, norad_id: u32) -> Option<&SatelliteProfile> {
        self.profiles.iter().find(|p| p.norad_id == Some(norad_id))
    }

    /// Case-insensitive name substring match, first [`QUERY_LIMIT`] hits
    pub fn search_by_name(&self, query: &str) -> Vec<&SatelliteProfile> {
        let needle = query.trim().to_lowercase();
        self.profiles
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .take(QUERY_LIMIT)
            .collect()
    }

    pub fn filter_by_material(&self, material: Material) -> Vec<&SatelliteProfile> {
        self.profiles
            .iter()
            .filter(|p| p.material() == material)
            .take(QUERY_LIMIT)
            .collect()
    }

    pub fn filter_by_category(&self, category: Category) -> Vec<&SatelliteProfile> {
        self.profiles
            .iter()
            .filter(|p| p.category == category)
            .take(QUERY_LIMIT)
            .collect()
    }

    /// Objects in the HIGH reentry-risk tier, in catalog order
    pub fn high_risk(&self, limit: usize) -> Vec<&SatelliteProfile> {
        self.profiles
            .iter()
            .filter(|p| vulnerability(p.decay_time()).tier == RiskTier::High)
            .take(limit)
            .collect()
    }

    pub fn count_in_tier(&self, tier: RiskTier) -> usize {
        self.profiles
            .iter()
            .filter(|p| vulnerability(p.decay_time()).tier == tier)
            .count()
    }

    pub fn apply(&self, filter: &ProfileFilter) -> Vec<&SatelliteProfile> {
        filter.apply(&self.profiles)
    }
}

/// Display filter; `None` fields do not constrain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileFilter {
    pub min_mass_kg: Option<f64>,
    /// Upper bound on [`speed_scale`] (0-100)
    pub max_speed_scale: Option<f64>,
    pub material: Option<Material>,
    pub category: Option<Category>,
}

impl ProfileFilter {
    pub fn matches(&self, profile: &SatelliteProfile) -> bool {
        if let Some(min) = self.min_mass_kg {
            if profile.mass() < min {
                return false;
            }
        }
        if let Some(max) = self.max_speed_scale {
            if speed_scale(profile) > max {
                return false;
            }
        }
        if let Some(material) = self.material {
            if profile.material() != material {
                return false;
            }
        }
        if let Some(category) = self.category {
            if profile.category != category {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, profiles: &'a [SatelliteProfile]) -> Vec<&'a SatelliteProfile> {
        profiles.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Estimate, EstimationMethod, TleElements};

    fn profile(
        index: usize,
        name: &str,
        category: Category,
        material: Material,
        mass: f64,
        decay: f64,
        speed: f64,
    ) -> SatelliteProfile {
        SatelliteProfile {
            id: format!("obj-{}", index),
            norad_id: Some(10_000 + index as u32),
            object_id: None,
            name: name.to_string(),
            category,
            altitude_km: Estimate::measured(500.0),
            mass_kg: Estimate::estimated(mass, EstimationMethod::CategoryRange),
            material: Estimate::estimated(material, EstimationMethod::CategoryPrior),
            decay_time_years: Estimate::estimated(decay, EstimationMethod::AltitudeLinear),
            inclination: 51.6,
            eccentricity: 0.001,
            simulated_speed: speed,
            elements: TleElements {
                mean_motion: 15.2,
                ra_of_asc_node: 0.0,
                arg_of_pericenter: 0.0,
                mean_anomaly: 0.0,
                bstar: 0.0,
                epoch: None,
            },
        }
    }

    fn sample() -> Catalog {
        Catalog::new(vec![
            profile(
                0,
                "ISS (ZARYA)",
                Category::SpaceStations,
                Material::Composite,
                100_000.0,
                9.0,
                0.0012,
            ),
            profile(1, "COSMOS 2251 DEB", Category::Debris, Material::Steel, 40.0, 3.0, -0.0006),
            profile(2, "COSMOS 2251 DEB", Category::Debris, Material::Aluminum, 60.0, 5.0, 0.0),
            profile(3, "HUBBLE", Category::Scientific, Material::Aluminum, 900.0, 20.0, 0.0003),
        ])
    }

    #[test]
    fn test_summary_averages() {
        let catalog = sample();
        let summary = catalog.summary();
        assert_eq!(summary.object_count, 4);
        assert!((summary.average_mass_kg - 101_000.0 / 4.0).abs() < 1e-9);
        // |12| + |−6| + 0 + |3| over 4
        assert!((summary.average_simulated_speed - 5.25).abs() < 1e-9);
    }

    #[test]
    fn test_empty_catalog_defaults() {
        let catalog = Catalog::new(Vec::new());
        assert!(catalog.is_empty());
        assert_eq!(catalog.summary().average_mass_kg, EMPTY_AVERAGE_MASS_KG);
        assert_eq!(catalog.summary().average_simulated_speed, EMPTY_AVERAGE_SPEED);
    }

    #[test]
    fn test_lookup_and_search() {
        let catalog = sample();
        assert_eq!(catalog.find_by_norad_id(10_003).unwrap().name, "HUBBLE");
        assert!(catalog.find_by_norad_id(1).is_none());
        assert_eq!(catalog.get("obj-1").unwrap().material(), Material::Steel);

        assert_eq!(catalog.search_by_name("cosmos").len(), 2);
        assert_eq!(catalog.search_by_name("  zarya ").len(), 1);
        assert!(catalog.search_by_name("starlink").is_empty());
    }

    #[test]
    fn test_query_limit() {
        let profiles = (0..25)
            .map(|i| {
                profile(i, "FENGYUN 1C DEB", Category::Debris, Material::Steel, 20.0, 2.0, 0.0)
            })
            .collect();
        let catalog = Catalog::new(profiles);

        assert_eq!(catalog.search_by_name("fengyun").len(), QUERY_LIMIT);
        assert_eq!(catalog.filter_by_material(Material::Steel).len(), QUERY_LIMIT);
        assert_eq!(catalog.filter_by_category(Category::Debris).len(), QUERY_LIMIT);
        assert_eq!(catalog.high_risk(HIGH_RISK_LIMIT).len(), HIGH_RISK_LIMIT);
    }

    #[test]
    fn test_high_risk_and_tiers() {
        let catalog = sample();
        let names: Vec<_> = catalog
            .high_risk(HIGH_RISK_LIMIT)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(names, vec!["obj-1", "obj-2"]);
        assert_eq!(catalog.count_in_tier(RiskTier::Medium), 1);
        assert_eq!(catalog.count_in_tier(RiskTier::Low), 1);
    }

    #[test]
    fn test_profile_filter() {
        let catalog = sample();

        assert_eq!(catalog.apply(&ProfileFilter::default()).len(), 4);

        let heavy = ProfileFilter {
            min_mass_kg: Some(500.0),
            ..ProfileFilter::default()
        };
        assert_eq!(catalog.apply(&heavy).len(), 2);

        // speed scale: 12/24·100 = 50, 6/24·100 = 25, 0, 3/24·100 = 12.5
        let slow = ProfileFilter {
            max_speed_scale: Some(30.0),
            ..ProfileFilter::default()
        };
        assert_eq!(catalog.apply(&slow).len(), 3);

        let aluminum_debris = ProfileFilter {
            material: Some(Material::Aluminum),
            category: Some(Category::Debris),
            ..ProfileFilter::default()
        };
        let hits = catalog.apply(&aluminum_debris);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "obj-2");
    }
}

//! Retrieval engine
//!
//! Owns the configuration and the component models. Catalog building is
//! the only step that draws random numbers; every random draw for a record
//! comes from a generator seeded by the engine seed and that record's
//! catalog key, so rebuilding a catalog reproduces it exactly.

use crate::catalog::{Catalog, CatalogSummary};
use crate::deriver::OrbitalStateDeriver;
use crate::economics::{EconomicViabilityModel, MissionEconomics};
use crate::estimator::PhysicalPropertyEstimator;
use crate::impact::{EnvironmentalImpact, ImpactAssessor};
use crate::maneuver::{DeltaVGauge, ManeuverCostModel};
use crate::risk::{vulnerability, CollisionRisk, RiskAssessment};
use crate::{
    Category, EngineConfig, Estimate, EstimationMethod, EstimationNote, Material, Result,
    SatelliteProfile, TleElements, TrackingRecord,
};
use nalgebra::Vector3;
use orbital_mechanics::{OrbitalState, ReferenceFrame};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

pub const DEFAULT_SEED: u64 = 0;

/// Half-width of the scene angular rate band
const SIMULATED_SPEED_SPAN: f64 = 0.003;

/// Number of profiles logged in detail while building a catalog
const DETAILED_LOG_COUNT: usize = 3;

/// Marks keys derived from a batch index so they never collide with catalog numbers
const INDEX_KEY_TAG: u64 = 1 << 63;

/// Random stream key: the catalog number when present, else the tagged batch index
fn record_key(record: &TrackingRecord, index: usize) -> u64 {
    match record.norad_cat_id {
        Some(id) => u64::from(id),
        None => INDEX_KEY_TAG | index as u64,
    }
}

/// Seed for one record: engine seed mixed with the record's key
fn record_seed(seed: u64, key: u64) -> u64 {
    seed ^ key.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Everything the dashboard and assistant display for one object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionReport {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub altitude_km: Estimate<f64>,
    pub mass_kg: Estimate<f64>,
    pub material: Estimate<Material>,
    pub decay_time_years: Estimate<f64>,
    /// How each estimated field above was produced
    pub estimation_notes: Vec<EstimationNote>,
    pub orbital_state: OrbitalState,
    pub risk: RiskAssessment,
    pub collision: CollisionRisk,
    pub delta_v_m_s: f64,
    pub delta_v_gauge: DeltaVGauge,
    pub operational_cost: f64,
    pub economics: MissionEconomics,
    pub impact: EnvironmentalImpact,
}

#[derive(Debug, Clone)]
pub struct RetrievalEngine {
    config: EngineConfig,
    seed: u64,
    deriver: OrbitalStateDeriver,
    estimator: PhysicalPropertyEstimator,
    maneuver: ManeuverCostModel,
    economics: EconomicViabilityModel,
    impact: ImpactAssessor,
}

impl RetrievalEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            deriver: OrbitalStateDeriver::from_config(&config),
            estimator: PhysicalPropertyEstimator::from_config(&config),
            maneuver: ManeuverCostModel::from_config(&config),
            economics: EconomicViabilityModel::from_config(&config),
            impact: ImpactAssessor::from_config(&config),
            config,
            seed: DEFAULT_SEED,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Build the profile for the record at `index` in its batch
    pub fn profile(&self, record: &TrackingRecord, index: usize) -> SatelliteProfile {
        let mut rng = StdRng::seed_from_u64(record_seed(self.seed, record_key(record, index)));

        let category = record.category.unwrap_or(Category::Misc);
        let altitude = self
            .deriver
            .altitude_from_mean_motion(record.mean_motion, &mut rng);
        let physical = self
            .estimator
            .estimate(category, record.bstar, altitude.value(), &mut rng);
        let simulated_speed = (rng.gen::<f64>() - 0.5) * SIMULATED_SPEED_SPAN;

        SatelliteProfile {
            id: record
                .norad_cat_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| format!("obj-{}", index)),
            norad_id: record.norad_cat_id,
            object_id: record.object_id.clone(),
            name: record
                .object_name
                .clone()
                .unwrap_or_else(|| format!("Object {}", index)),
            category,
            altitude_km: altitude,
            mass_kg: physical.mass_kg,
            material: physical.material,
            decay_time_years: physical.decay_time_years,
            inclination: record.inclination.unwrap_or(0.0),
            eccentricity: record.eccentricity.unwrap_or(0.0),
            simulated_speed,
            elements: TleElements {
                mean_motion: record
                    .mean_motion
                    .unwrap_or(self.config.altitude.default_mean_motion),
                ra_of_asc_node: record.ra_of_asc_node.unwrap_or(0.0),
                arg_of_pericenter: record.arg_of_pericenter.unwrap_or(0.0),
                mean_anomaly: record.mean_anomaly.unwrap_or(0.0),
                bstar: record.bstar.unwrap_or(0.0),
                epoch: record.epoch,
            },
        }
    }

    pub fn build_catalog(&self, records: &[TrackingRecord]) -> Catalog {
        let profiles: Vec<SatelliteProfile> = records
            .iter()
            .enumerate()
            .map(|(index, record)| self.profile(record, index))
            .collect();

        for p in profiles.iter().take(DETAILED_LOG_COUNT) {
            debug!(
                "{} ({}): altitude {:.1} km, mass {} kg, {}, decay {:.1} years",
                p.name,
                p.category,
                p.altitude(),
                p.mass(),
                p.material(),
                p.decay_time()
            );
        }

        let fallbacks = profiles
            .iter()
            .filter(|p| p.altitude_km.method() == Some(EstimationMethod::LeoFallback))
            .count();
        if fallbacks > 0 {
            warn!(
                "{} of {} objects had unusable mean motion; altitudes are synthetic",
                fallbacks,
                profiles.len()
            );
        }

        let catalog = Catalog::new(profiles);
        let summary = catalog.summary();
        info!(
            "Built {} profiles: average mass {:.1} kg, average speed {:.2}",
            summary.object_count, summary.average_mass_kg, summary.average_simulated_speed
        );
        catalog
    }

    pub fn orbital_state(&self, profile: &SatelliteProfile) -> OrbitalState {
        self.deriver.orbital_state(profile.altitude())
    }

    pub fn assess_risk(&self, profile: &SatelliteProfile) -> RiskAssessment {
        vulnerability(profile.decay_time())
    }

    pub fn deorbit_delta_v(&self, profile: &SatelliteProfile) -> f64 {
        self.maneuver.delta_v(profile.altitude(), profile.mass())
    }

    pub fn delta_v_gauge(&self, profile: &SatelliteProfile) -> DeltaVGauge {
        self.maneuver.gauge(self.deorbit_delta_v(profile))
    }

    pub fn operational_cost(&self, profile: &SatelliteProfile) -> f64 {
        self.maneuver.operational_cost(self.deorbit_delta_v(profile))
    }

    pub fn collision_risk(&self, profile: &SatelliteProfile) -> CollisionRisk {
        CollisionRisk::new(
            profile.decay_time(),
            profile.altitude(),
            profile.mass(),
            self.deorbit_delta_v(profile),
        )
    }

    pub fn reference_frame(&self, scene_radius: f64) -> Result<ReferenceFrame> {
        let frame = ReferenceFrame::new(&self.config.earth, scene_radius)?;
        debug!(
            "Scene radius {} gives {:.3} km per scene unit",
            scene_radius,
            frame.km_per_unit()
        );
        Ok(frame)
    }

    /// Physical distance (m) between a reference station and a target
    pub fn distance_to_reference(
        &self,
        frame: &ReferenceFrame,
        reference: &Vector3<f64>,
        target: &Vector3<f64>,
    ) -> f64 {
        frame.distance_m(reference, target)
    }

    pub fn mission_economics(
        &self,
        profile: &SatelliteProfile,
        distance_m: f64,
    ) -> MissionEconomics {
        self.economics
            .evaluate_profile(profile, self.deorbit_delta_v(profile), distance_m)
    }

    pub fn mission_budget(&self, profile: &SatelliteProfile, distance_m: f64) -> f64 {
        self.economics
            .mission_budget(self.deorbit_delta_v(profile), distance_m, profile)
    }

    pub fn environmental_impact(
        &self,
        profile: &SatelliteProfile,
        summary: &CatalogSummary,
    ) -> EnvironmentalImpact {
        self.impact.assess(
            profile,
            self.deorbit_delta_v(profile),
            summary.average_mass_kg,
        )
    }

    /// Full report for a retrieval at `distance_m` from the reference station
    pub fn report(
        &self,
        profile: &SatelliteProfile,
        summary: &CatalogSummary,
        distance_m: f64,
    ) -> MissionReport {
        let delta_v = self.deorbit_delta_v(profile);

        MissionReport {
            id: profile.id.clone(),
            name: profile.name.clone(),
            category: profile.category,
            altitude_km: profile.altitude_km,
            mass_kg: profile.mass_kg,
            material: profile.material,
            decay_time_years: profile.decay_time_years,
            estimation_notes: profile.estimation_notes(),
            orbital_state: self.orbital_state(profile),
            risk: self.assess_risk(profile),
            collision: self.collision_risk(profile),
            delta_v_m_s: delta_v,
            delta_v_gauge: self.maneuver.gauge(delta_v),
            operational_cost: self.maneuver.operational_cost(delta_v),
            economics: self.mission_economics(profile, distance_m),
            impact: self.environmental_impact(profile, summary),
        }
    }

    /// Full report with the distance taken from scene positions
    pub fn mission_report(
        &self,
        profile: &SatelliteProfile,
        summary: &CatalogSummary,
        frame: &ReferenceFrame,
        reference: &Vector3<f64>,
        target: &Vector3<f64>,
    ) -> MissionReport {
        let distance_m = self.distance_to_reference(frame, reference, target);
        self.report(profile, summary, distance_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskTier;
    use crate::ProfilerError;

    fn engine() -> RetrievalEngine {
        RetrievalEngine::new(EngineConfig::default()).unwrap()
    }

    fn station() -> TrackingRecord {
        TrackingRecord {
            norad_cat_id: Some(25544),
            object_name: Some("ISS (ZARYA)".into()),
            category: Some(Category::SpaceStations),
            mean_motion: Some(15.5),
            inclination: Some(51.64),
            eccentricity: Some(0.0004),
            ra_of_asc_node: Some(120.0),
            arg_of_pericenter: Some(80.0),
            mean_anomaly: Some(300.0),
            bstar: Some(0.0),
            ..TrackingRecord::default()
        }
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RetrievalEngine>();
        assert_send_sync::<Catalog>();
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.mass.debris.max_kg = 1.0;
        assert!(matches!(
            RetrievalEngine::new(config),
            Err(ProfilerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_station_profile() {
        let profile = engine().profile(&station(), 0);

        assert_eq!(profile.id, "25544");
        assert!(profile.altitude_km.is_measured());
        assert!(profile.altitude() > 400.0 && profile.altitude() < 450.0);
        assert!((50_000.0..=150_000.0).contains(&profile.mass()));
        assert_eq!(profile.material(), Material::Composite);
        assert!(profile.decay_time() <= 30.0);
        assert!(profile.simulated_speed.abs() <= SIMULATED_SPEED_SPAN / 2.0);
    }

    #[test]
    fn test_identity_defaults() {
        let profile = engine().profile(&TrackingRecord::default(), 7);
        assert_eq!(profile.id, "obj-7");
        assert_eq!(profile.name, "Object 7");
        assert_eq!(profile.category, Category::Misc);
        assert_eq!(profile.elements.mean_motion, 15.5);
        assert_eq!(profile.elements.bstar, 0.0);
        assert_eq!(
            profile.altitude_km.method(),
            Some(EstimationMethod::DefaultMeanMotion)
        );
    }

    #[test]
    fn test_same_record_same_profile() {
        let e = engine();
        assert_eq!(e.profile(&station(), 0), e.profile(&station(), 3));
    }

    #[test]
    fn test_seed_changes_estimates() {
        let record = TrackingRecord {
            norad_cat_id: Some(48_000),
            category: Some(Category::Debris),
            mean_motion: Some(14.8),
            ..TrackingRecord::default()
        };
        let masses: std::collections::HashSet<u64> = (0..8)
            .map(|seed| engine().with_seed(seed).profile(&record, 0).mass() as u64)
            .collect();
        assert!(masses.len() > 1);
    }

    #[test]
    fn test_catalog_number_and_index_keys_are_distinct() {
        let numbered = TrackingRecord {
            norad_cat_id: Some(5),
            category: Some(Category::Debris),
            mean_motion: Some(-1.0),
            ..TrackingRecord::default()
        };
        let anonymous = TrackingRecord {
            norad_cat_id: None,
            ..numbered.clone()
        };
        assert_ne!(record_key(&numbered, 0), record_key(&anonymous, 5));

        let catalog = engine().build_catalog(&[
            numbered.clone(),
            numbered.clone(),
            numbered.clone(),
            numbered.clone(),
            numbered,
            anonymous,
        ]);
        let by_id = catalog.get("5").unwrap();
        let by_index = catalog.get("obj-5").unwrap();
        assert_ne!(by_id.altitude(), by_index.altitude());
        assert_ne!(by_id.simulated_speed, by_index.simulated_speed);
    }

    #[test]
    fn test_fallback_altitude_is_tagged() {
        let record = TrackingRecord {
            mean_motion: Some(-4.0),
            ..TrackingRecord::default()
        };
        let catalog = engine().build_catalog(&[record]);
        let profile = &catalog.profiles()[0];
        assert_eq!(profile.altitude_km.method(), Some(EstimationMethod::LeoFallback));
        assert!((200.0..800.0).contains(&profile.altitude()));
    }

    #[test]
    fn test_on_demand_queries_consistent() {
        let e = engine();
        let profile = e.profile(&station(), 0);

        let state = e.orbital_state(&profile);
        assert_eq!(state.altitude_km, profile.altitude());

        let risk = e.assess_risk(&profile);
        assert_eq!(e.collision_risk(&profile).vulnerability, risk);

        let dv = e.deorbit_delta_v(&profile);
        assert!(dv > 0.0);
        assert_eq!(e.delta_v_gauge(&profile).ratio, dv / 300.0);
        assert_eq!(e.operational_cost(&profile), dv * 2.5);
        assert_eq!(
            e.mission_budget(&profile, 250_000.0),
            e.mission_economics(&profile, 250_000.0).profitability
        );
    }

    #[test]
    fn test_mission_report_uses_frame_distance() {
        let e = engine();
        let catalog = e.build_catalog(&[station()]);
        let profile = &catalog.profiles()[0];

        let frame = e.reference_frame(5.0).unwrap();
        let reference = Vector3::new(0.0, 5.0, 0.0);
        let target = Vector3::new(3.0, 5.0, 4.0);

        let report = e.mission_report(profile, catalog.summary(), &frame, &reference, &target);
        // 5 scene units at 6371/5 km per unit
        assert!((report.economics.distance_km - 6371.0).abs() < 1e-6);
        assert_eq!(report.impact.mass_vs_average_percent, Some(100.0));
        assert_eq!(report.risk.tier, e.assess_risk(profile).tier);
        let distance_m = e.distance_to_reference(&frame, &reference, &target);
        assert_eq!(report, e.report(profile, catalog.summary(), distance_m));
    }

    #[test]
    fn test_bad_scene_radius() {
        assert!(matches!(
            engine().reference_frame(0.0),
            Err(ProfilerError::Orbital(_))
        ));
    }

    #[test]
    fn test_station_risk_tier_matches_decay() {
        let e = engine();
        let profile = e.profile(&station(), 0);
        // 15.5 rev/day ⇒ ~424 km ⇒ ~8.5 years with no drag
        assert_eq!(e.assess_risk(&profile).tier, RiskTier::Medium);
    }
}

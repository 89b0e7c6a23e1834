//! End-to-end scenarios: records in, profiles and mission figures out.

use debris_profiler::loader::parse_tracking_records;
use debris_profiler::{
    Catalog, Category, EngineConfig, Material, ProfileFilter, RetrievalEngine, RiskTier,
};
use nalgebra::Vector3;
use orbital_mechanics::{kepler, maneuver, EarthModel};

const RECORDS: &str = r#"[
    {
        "NORAD_CAT_ID": 25544,
        "OBJECT_NAME": "ISS (ZARYA)",
        "OBJECT_ID": "1998-067A",
        "EPOCH": "2024-03-01T12:34:56.123456",
        "MEAN_MOTION": 15.5,
        "INCLINATION": 51.64,
        "ECCENTRICITY": 0.0004,
        "RA_OF_ASC_NODE": 120.1,
        "ARG_OF_PERICENTER": 80.2,
        "MEAN_ANOMALY": 300.3,
        "BSTAR": 0,
        "category": "space_stations"
    },
    {
        "NORAD_CAT_ID": "34454",
        "OBJECT_NAME": "COSMOS 2251 DEB",
        "MEAN_MOTION": "14.35",
        "BSTAR": "0.00012",
        "category": "debris"
    },
    {
        "OBJECT_NAME": "UNKNOWN OBJECT",
        "MEAN_MOTION": "n/a",
        "category": "weather"
    },
    {
        "NORAD_CAT_ID": 20580,
        "OBJECT_NAME": "HST",
        "MEAN_MOTION": 15.26,
        "category": "scientific"
    }
]"#;

fn build(seed: u64) -> (RetrievalEngine, Catalog) {
    let engine = RetrievalEngine::new(EngineConfig::default())
        .unwrap()
        .with_seed(seed);
    let records = parse_tracking_records(RECORDS).unwrap();
    let catalog = engine.build_catalog(&records);
    (engine, catalog)
}

#[test]
fn space_station_profile_is_physically_consistent() {
    let (engine, catalog) = build(11);
    let iss = catalog.find_by_norad_id(25544).unwrap();

    assert!(iss.altitude() >= 400.0 && iss.altitude() <= 450.0);
    assert!((50_000.0..=150_000.0).contains(&iss.mass()));
    assert_eq!(iss.material(), Material::Composite);
    assert!(iss.decay_time() <= 30.0);

    let state = engine.orbital_state(iss);
    assert!(state.velocity_m_s > 7_600.0 && state.velocity_m_s < 7_700.0);
    assert!(state.period_min > 92.0 && state.period_min < 93.5);
}

#[test]
fn default_mean_motion_lands_in_leo() {
    let (_, catalog) = build(0);
    let iss = catalog.find_by_norad_id(25544).unwrap();
    assert!((300.0..=600.0).contains(&iss.altitude()));
    assert!(iss.altitude_km.is_measured());
}

#[test]
fn unusable_records_degrade_instead_of_failing() {
    let (_, catalog) = build(0);
    assert_eq!(catalog.len(), 4);

    let unknown = &catalog.profiles()[2];
    assert_eq!(unknown.id, "obj-2");
    assert_eq!(unknown.category, Category::Misc);
    assert!(!unknown.altitude_km.is_measured());
    assert!((200.0..800.0).contains(&unknown.altitude()));
    assert_eq!(unknown.material(), Material::Aluminum);
}

#[test]
fn rebuilding_with_same_seed_is_idempotent() {
    let (_, a) = build(99);
    let (_, b) = build(99);
    assert_eq!(a.profiles(), b.profiles());
    assert_eq!(a.summary(), b.summary());
}

#[test]
fn reference_mission_economics() {
    let earth = EarthModel::default();
    let (engine, catalog) = build(0);
    let mut profile = catalog.find_by_norad_id(20580).unwrap().clone();

    profile.altitude_km = debris_profiler::Estimate::measured(1000.0);
    profile.mass_kg = debris_profiler::Estimate::measured(1000.0);
    profile.material = debris_profiler::Estimate::measured(Material::Steel);

    let econ = engine.mission_economics(&profile, 500_000.0);

    let dv = maneuver::deorbit_delta_v(&earth, 1000.0);
    let v = kepler::orbital_velocity(&earth, 1000.0) / 1000.0;
    let expected = 100.0 * 1000.0 - (20.0 * 1000.0 + 50.0 * v * v + 0.5 * 500.0 + 0.5 * dv);

    assert!((econ.profitability - expected).abs() < 1e-9);
    assert_eq!(econ.viable, expected > 0.0);
    assert!(econ.viable);
}

#[test]
fn dashboard_and_assistant_paths_agree() {
    let (engine, catalog) = build(5);
    let frame = engine.reference_frame(5.0).unwrap();
    let station = Vector3::new(0.0, 5.0, 0.0);
    let target = Vector3::new(1.0, 5.5, 0.5);

    for profile in catalog.profiles() {
        // the dashboard builds a full report
        let report = engine.mission_report(profile, catalog.summary(), &frame, &station, &target);

        // the assistant answers piecemeal from a looked-up copy
        let looked_up = catalog.get(&profile.id).unwrap().clone();
        let distance = engine.distance_to_reference(&frame, &station, &target);

        assert_eq!(report.risk, engine.assess_risk(&looked_up));
        assert_eq!(report.delta_v_m_s, engine.deorbit_delta_v(&looked_up));
        assert_eq!(report.economics, engine.mission_economics(&looked_up, distance));
        assert_eq!(
            report.economics.profitability,
            engine.mission_budget(&looked_up, distance)
        );
    }
}

#[test]
fn queries_and_filters() {
    let (_, catalog) = build(3);

    assert_eq!(catalog.search_by_name("cosmos").len(), 1);
    assert_eq!(catalog.filter_by_category(Category::Debris).len(), 1);

    let heavy = ProfileFilter {
        min_mass_kg: Some(10_000.0),
        ..ProfileFilter::default()
    };
    let hits = catalog.apply(&heavy);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "ISS (ZARYA)");

    let tiers: usize = [RiskTier::High, RiskTier::Medium, RiskTier::Low]
        .into_iter()
        .map(|t| catalog.count_in_tier(t))
        .sum();
    assert_eq!(tiers, catalog.len());
}

#[test]
fn report_serializes_with_provenance() {
    let (engine, catalog) = build(0);
    let profile = catalog.find_by_norad_id(34454).unwrap();
    let report = engine.report(profile, catalog.summary(), 100_000.0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["mass_kg"]["source"], "estimated");
    assert_eq!(json["mass_kg"]["method"], "category_range_drag_adjusted");
    assert_eq!(json["altitude_km"]["source"], "measured");
    assert!(json["risk"]["tier"].is_string());

    // measured altitude is not annotated; the three estimated fields are
    let notes = json["estimation_notes"].as_array().unwrap();
    assert_eq!(notes.len(), 3);
    assert_eq!(notes[0]["field"], "mass_kg");
    assert_eq!(notes[0]["description"], "category mass range adjusted for drag");
    assert_eq!(
        json["collision"]["recommendation"],
        debris_profiler::risk::recommendation(report.risk.tier)
    );
}

#[test]
fn bundled_sample_data_profiles_cleanly() {
    let data = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");

    let config = EngineConfig::from_json_file(data.join("engine_config.json")).unwrap();
    assert_eq!(config, EngineConfig::default());

    let engine = RetrievalEngine::new(config).unwrap();
    let records =
        debris_profiler::loader::load_tracking_records(data.join("tracking_sample.json")).unwrap();
    let catalog = engine.build_catalog(&records);

    assert_eq!(catalog.len(), 10);
    assert!(catalog.find_by_norad_id(25544).unwrap().altitude_km.is_measured());
    assert!(!catalog.find_by_norad_id(33773).unwrap().altitude_km.is_measured());

    // geostationary and MEO objects stay within the plausible band
    let intelsat = catalog.find_by_norad_id(26824).unwrap();
    assert!(intelsat.altitude() > 35_000.0 && intelsat.altitude() < 36_500.0);
    assert_eq!(intelsat.decay_time(), 100.0);
}

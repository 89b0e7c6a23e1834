//! Tracking record loading from JSON
//!
//! Two document shapes are accepted:
//! - an array of records, each carrying its own `category` tag
//! - an object keyed by category whose values are either arrays of records
//!   or objects keyed by an arbitrary storage key (realtime database export)
//!
//! Numeric fields may be JSON numbers or numeric strings. Anything else is
//! treated as absent; a malformed field never rejects the record.

use crate::{Category, ProfilerError, Result, TrackingRecord};
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info, warn};

/// Raw record as delivered by the catalog
#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawTrackingRecord {
    norad_cat_id: Option<Value>,
    object_name: Option<Value>,
    object_id: Option<Value>,
    epoch: Option<Value>,
    mean_motion: Option<Value>,
    inclination: Option<Value>,
    eccentricity: Option<Value>,
    ra_of_asc_node: Option<Value>,
    arg_of_pericenter: Option<Value>,
    mean_anomaly: Option<Value>,
    bstar: Option<Value>,
}

/// Keys that may carry the category tag, in order of preference
const CATEGORY_KEYS: [&str; 2] = ["category", "CATEGORY"];

#[derive(Debug, Default)]
struct SkipCounts {
    non_objects: usize,
    undecodable: usize,
}

impl SkipCounts {
    fn total(&self) -> usize {
        self.non_objects + self.undecodable
    }
}

/// Parse a finite number from a JSON number or numeric string
fn parse_number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn parse_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_catalog_number(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Parse an epoch such as `2024-03-01T12:34:56.123456`, with or without offset
fn parse_epoch(value: Option<&Value>) -> Option<NaiveDateTime> {
    let text = parse_text(value)?;
    NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(&text)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

impl RawTrackingRecord {
    fn into_record(self, category: Option<Category>) -> TrackingRecord {
        TrackingRecord {
            norad_cat_id: parse_catalog_number(self.norad_cat_id.as_ref()),
            object_name: parse_text(self.object_name.as_ref()),
            object_id: parse_text(self.object_id.as_ref()),
            category,
            epoch: parse_epoch(self.epoch.as_ref()),
            mean_motion: parse_number(self.mean_motion.as_ref()),
            inclination: parse_number(self.inclination.as_ref()),
            eccentricity: parse_number(self.eccentricity.as_ref()),
            ra_of_asc_node: parse_number(self.ra_of_asc_node.as_ref()),
            arg_of_pericenter: parse_number(self.arg_of_pericenter.as_ref()),
            mean_anomaly: parse_number(self.mean_anomaly.as_ref()),
            bstar: parse_number(self.bstar.as_ref()),
        }
    }
}

fn record_from_value(
    value: Value,
    group: Option<Category>,
    skips: &mut SkipCounts,
) -> Option<TrackingRecord> {
    let Value::Object(fields) = value else {
        skips.non_objects += 1;
        return None;
    };

    // The first key holding a known tag wins; the group key overrides both
    let category = group.or_else(|| {
        CATEGORY_KEYS
            .iter()
            .find_map(|key| parse_text(fields.get(*key)).and_then(|tag| Category::from_tag(&tag)))
    });

    match serde_json::from_value::<RawTrackingRecord>(Value::Object(fields)) {
        Ok(raw) => Some(raw.into_record(category)),
        Err(e) => {
            debug!("Skipping undecodable record: {}", e);
            skips.undecodable += 1;
            None
        }
    }
}

/// Parse tracking records from an already decoded JSON document
pub fn records_from_document(document: Value) -> Result<Vec<TrackingRecord>> {
    let mut records = Vec::new();
    let mut skips = SkipCounts::default();

    match document {
        Value::Array(items) => {
            records.extend(
                items
                    .into_iter()
                    .filter_map(|item| record_from_value(item, None, &mut skips)),
            );
        }
        Value::Object(groups) => {
            for (key, group) in groups {
                let Some(category) = Category::from_tag(&key) else {
                    debug!("Ignoring unknown category group {:?}", key);
                    continue;
                };
                let items: Vec<Value> = match group {
                    Value::Array(items) => items,
                    Value::Object(entries) => entries.into_iter().map(|(_, v)| v).collect(),
                    Value::Null => Vec::new(),
                    _ => {
                        skips.non_objects += 1;
                        continue;
                    }
                };
                records.extend(
                    items
                        .into_iter()
                        .filter_map(|item| record_from_value(item, Some(category), &mut skips)),
                );
            }
        }
        other => {
            return Err(ProfilerError::UnsupportedDocument(format!(
                "expected an array or an object keyed by category, got {}",
                json_kind(&other)
            )));
        }
    }

    if skips.total() > 0 {
        warn!(
            "Skipped {} tracking entries ({} not objects, {} undecodable)",
            skips.total(),
            skips.non_objects,
            skips.undecodable
        );
    }
    info!("Parsed {} tracking records", records.len());
    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse tracking records from JSON text
pub fn parse_tracking_records(json: &str) -> Result<Vec<TrackingRecord>> {
    let document: Value = serde_json::from_str(json)?;
    records_from_document(document)
}

/// Load tracking records from a JSON file
pub fn load_tracking_records(path: impl AsRef<Path>) -> Result<Vec<TrackingRecord>> {
    let path = path.as_ref();
    info!("Loading tracking records from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let document: Value = serde_json::from_reader(reader)?;
    records_from_document(document)
}

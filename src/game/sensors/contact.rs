use super::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionKind {
    Passive,
    Active,
}

/// One ship's belief about another entity. Outlives the detection that created it until it goes stale and is
/// dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub contact_id: String,
    pub sensor_ship_id: String,
    pub target_entity_id: String,
    pub first_seen_time: f64,
    pub last_seen_time: f64,
    pub last_detection_type: DetectionKind,
    pub range_km: f64,
    pub bearing_deg: f64,
    pub strength: f64,
    pub stale: bool,
}

impl Contact {
    pub fn new(
        now: f64,
        sensor_ship_id: &str,
        target_entity_id: &str,
        kind: DetectionKind,
        detection: &Detection,
    ) -> Self {
        Self {
            contact_id: format!("{}::{}", sensor_ship_id, target_entity_id),
            sensor_ship_id: sensor_ship_id.to_string(),
            target_entity_id: target_entity_id.to_string(),
            first_seen_time: now,
            last_seen_time: now,
            last_detection_type: kind,
            range_km: detection.range_km,
            bearing_deg: detection.bearing_deg,
            strength: detection.strength,
            stale: false,
        }
    }

    /// A fresh detection of the same target
    pub fn refresh(&mut self, now: f64, kind: DetectionKind, detection: &Detection) {
        self.last_seen_time = now;
        self.last_detection_type = kind;
        self.range_km = detection.range_km;
        self.bearing_deg = detection.bearing_deg;
        self.strength = detection.strength;
        self.stale = false;
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.last_seen_time
    }
}

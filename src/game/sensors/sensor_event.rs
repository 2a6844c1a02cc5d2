use super::*;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorEventKind {
    SensorPing,
    ContactAcquired,
    ContactUpdated,
    ContactLost,
}

/// An entry in the append-only sensor log. Ids start at 1 and increase by 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorEvent {
    pub id: u64,
    pub time: f64,
    #[serde(rename = "type")]
    pub kind: SensorEventKind,
    pub sensor_ship_id: String,
    pub target_entity_id: Option<String>,
    pub data: Value,
}

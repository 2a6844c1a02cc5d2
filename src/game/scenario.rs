//! Loading the ships and gravity bodies a run starts with

use super::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Descriptive part of a scenario. Unrecognized top-level fields are kept and returned by get_mission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioInfo {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    ships: Vec<ShipSpec>,
    #[serde(default)]
    gravity_bodies: Vec<GravityBodySpec>,
    #[serde(flatten)]
    metadata: Map<String, Value>,
}

/// A validated starting state
#[derive(Debug, Clone)]
pub struct Scenario {
    pub info: ScenarioInfo,
    pub ships: Vec<Ship>,
    pub gravity_bodies: Vec<GravityBody>,
}

pub fn load_scenario(path: &Path, fs: Filesystem) -> Result<Scenario, Box<dyn Error>> {
    let text = fs.read_to_string(path)?;
    parse_scenario(&text).map_err(|e| format!("scenario {}: {}", path.display(), e).into())
}

pub fn parse_scenario(text: &str) -> Result<Scenario, Box<dyn Error>> {
    let file: ScenarioFile = serde_json::from_str(text)?;
    if file.id.trim().is_empty() {
        return Err("id must not be empty".into());
    }
    if file.title.trim().is_empty() {
        return Err("title must not be empty".into());
    }

    let mut ids = HashSet::new();
    let mut ships = Vec::with_capacity(file.ships.len());
    for spec in file.ships {
        let ship = Ship::from_spec(spec)?;
        if !ids.insert(ship.id.clone()) {
            return Err(format!("duplicate ship id {:?}", ship.id).into());
        }
        ships.push(ship);
    }

    let mut gravity_bodies = Vec::with_capacity(file.gravity_bodies.len());
    for spec in file.gravity_bodies {
        let body = GravityBody::from_spec(spec)?;
        if gravity_bodies.iter().any(|b: &GravityBody| b.id == body.id) {
            return Err(format!("duplicate gravity body id {:?}", body.id).into());
        }
        gravity_bodies.push(body);
    }

    Ok(Scenario {
        info: ScenarioInfo {
            id: file.id,
            title: file.title,
            description: file.description,
            metadata: file.metadata,
        },
        ships,
        gravity_bodies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCENARIO: &str = r#"{
        "id": "duel",
        "title": "Duel",
        "briefing": "Catch the target",
        "ships": [
            {"id": "hunter", "team": "blue", "mass_kg": 2000000},
            {"id": "prey", "team": "red", "position": [10000, 0, 0]}
        ],
        "gravity_bodies": [
            {"id": "rock", "mass_kg": 1e15, "position": [0, 50000, 0], "cutoff_radius_km": 20}
        ]
    }"#;

    #[test]
    fn parses_ships_bodies_and_metadata() {
        let scenario = parse_scenario(SCENARIO).unwrap();
        assert_eq!(scenario.info.id, "duel");
        assert_eq!(scenario.info.metadata.get("briefing"), Some(&json!("Catch the target")));
        assert_eq!(scenario.ships.len(), 2);
        assert_ulps_eq!(scenario.ships[0].mass_kg, 2_000_000.0);
        assert_eq!(scenario.ships[1].position, Point3::new(10_000.0, 0.0, 0.0));
        assert_eq!(scenario.gravity_bodies[0].influence_radius_m, Some(20_000.0));
    }

    #[test]
    fn info_serializes_flat() {
        let scenario = parse_scenario(SCENARIO).unwrap();
        let value = serde_json::to_value(&scenario.info).unwrap();
        assert_eq!(value["title"], json!("Duel"));
        assert_eq!(value["briefing"], json!("Catch the target"));
        assert!(value.get("ships").is_none());
    }

    #[test]
    fn rejects_duplicate_ship_ids() {
        let text = r#"{"id": "x", "title": "X", "ships": [{"id": "a"}, {"id": "a"}]}"#;
        let err = parse_scenario(text).unwrap_err();
        assert!(err.to_string().contains("duplicate ship id"));
    }

    #[test]
    fn rejects_bad_mass() {
        let text = r#"{"id": "x", "title": "X", "ships": [{"id": "a", "mass_kg": 0}]}"#;
        assert!(parse_scenario(text).is_err());
    }

    #[test]
    fn rejects_missing_title() {
        assert!(parse_scenario(r#"{"id": "x", "ships": []}"#).is_err());
    }

    #[test]
    fn load_error_names_the_file() {
        let fs = MockFilesystem::new().add_file("scenarios/broken.json", "{");
        let err = load_scenario(Path::new("scenarios/broken.json"), fs.boxed()).unwrap_err();
        assert!(err.to_string().contains("scenarios/broken.json"));
    }

    #[test]
    fn loads_through_filesystem() {
        let fs = MockFilesystem::new().add_file("duel.json", SCENARIO);
        let scenario = load_scenario(Path::new("duel.json"), fs.boxed()).unwrap();
        assert_eq!(scenario.ships[0].id, "hunter");
    }

    #[test]
    fn bundled_scenario_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/interceptor_vs_target.json");
        let scenario = load_scenario(&path, real_filesystem()).unwrap();
        assert_eq!(scenario.info.id, "interceptor_vs_target");
        assert_eq!(scenario.ships.len(), 2);
        assert_ulps_eq!(scenario.ships[1].orientation.yaw, 165.0);
        assert!(scenario.ships[1].autopilot.enabled);
        assert_eq!(scenario.gravity_bodies[0].influence_radius_m, Some(50_000.0));
    }
}

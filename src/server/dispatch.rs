//! Maps API actions onto world commands and queries

use super::*;

/// Every action the server answers, reported by get_server_info
pub const CAPABILITIES: [&str; 9] = [
    "get_state",
    "get_events",
    "get_mission",
    "get_server_info",
    "command.set_target",
    "command.fire_weapon",
    "command.ping_sensors",
    "command.set_autopilot_mode",
    "command.set_helm_input",
];

/// Why an action produced an error response
struct Failure {
    error: String,
    payload: Value,
}

impl From<ApiError> for Failure {
    fn from(e: ApiError) -> Self {
        Self {
            error: e.to_string(),
            payload: json!({}),
        }
    }
}

impl From<serde_json::Error> for Failure {
    fn from(e: serde_json::Error) -> Self {
        Self {
            error: format!("Internal error: {}", e),
            payload: json!({}),
        }
    }
}

/// Command errors carry the code and the inputs back to the client
fn command_failure(e: CommandError, mut echo: Map<String, Value>) -> Failure {
    echo.insert("error".to_string(), json!(e.code()));
    if let CommandError::InvalidMode { .. } = e {
        echo.insert("allowed_modes".to_string(), json!(AUTOPILOT_MODES));
    }
    Failure {
        error: e.code().to_string(),
        payload: Value::Object(echo),
    }
}

fn required_str<'a>(payload: &'a Map<String, Value>, key: &str) -> Result<&'a str, ApiError> {
    match payload.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ApiError::BadRequest(format!("{} is required", key))),
    }
}

fn bool_or(payload: &Map<String, Value>, key: &str, default: bool) -> bool {
    payload.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn get_state(world: &World, p: &Map<String, Value>) -> Result<Value, Failure> {
    let query = StateQuery {
        ship_id: p.get("ship_id").and_then(Value::as_str).map(str::to_string),
        include_contacts: bool_or(p, "include_contacts", true),
        include_projectiles: bool_or(p, "include_projectiles", true),
        include_raw_entities: bool_or(p, "include_raw_entities", false),
    };
    Ok(serde_json::to_value(world.get_state(&query))?)
}

fn get_events(world: &World, p: &Map<String, Value>) -> Result<Value, Failure> {
    let since_id = p.get("since_id").and_then(Value::as_u64).unwrap_or(0);
    Ok(json!({ "events": world.events_since(since_id) }))
}

fn get_mission(world: &World) -> Result<Value, Failure> {
    let mut mission = serde_json::to_value(&world.info)?;
    mission["server_info"] = json!({
        "server_version": SERVER_VERSION,
        "api_version": API_VERSION,
    });
    Ok(mission)
}

fn get_server_info() -> Value {
    json!({
        "server_version": SERVER_VERSION,
        "api_version": API_VERSION,
        "capabilities": CAPABILITIES,
    })
}

fn set_target(world: &mut World, p: &Map<String, Value>) -> Result<Value, Failure> {
    let ship_id = required_str(p, "ship_id")?;
    let target_id = required_str(p, "target_entity_id")?;
    match world.set_target(ship_id, target_id) {
        Ok(()) => Ok(json!({"ship_id": ship_id, "current_target_id": target_id})),
        Err(e) => Err(command_failure(e, echo(&[("ship_id", json!(ship_id))]))),
    }
}

fn fire_weapon(world: &mut World, p: &Map<String, Value>) -> Result<Value, Failure> {
    let ship_id = required_str(p, "ship_id")?;
    let mount_id = required_str(p, "weapon_mount_id")?;
    match world.fire_weapon(ship_id, mount_id) {
        Ok(projectile_id) => Ok(json!({ "projectile_id": projectile_id })),
        Err(e) => Err(command_failure(e, echo(&[("ship_id", json!(ship_id))]))),
    }
}

fn ping_sensors(world: &mut World, p: &Map<String, Value>) -> Result<Value, Failure> {
    let ship_id = required_str(p, "ship_id")?;
    let mode = p.get("mode").and_then(Value::as_str).unwrap_or("active");
    match world.ping_sensors(ship_id, mode) {
        Ok(contacts) => Ok(json!({"ship_id": ship_id, "mode": mode, "contacts": contacts})),
        Err(e) => Err(command_failure(
            e,
            echo(&[("ship_id", json!(ship_id)), ("mode", json!(mode))]),
        )),
    }
}

fn set_autopilot_mode(world: &mut World, p: &Map<String, Value>) -> Result<Value, Failure> {
    let ship_id = required_str(p, "ship_id")?;
    let enabled = bool_or(p, "enabled", true);
    let mode = p.get("mode").and_then(Value::as_str);
    let params = p.get("params").cloned().unwrap_or_else(|| json!({}));
    match world.set_autopilot_mode(ship_id, enabled, mode, params) {
        Ok(autopilot) => Ok(json!({
            "ship_id": ship_id,
            "autopilot": AutopilotRecord::from(autopilot),
        })),
        Err(e) => Err(command_failure(
            e,
            echo(&[
                ("ship_id", json!(ship_id)),
                ("enabled", json!(enabled)),
                ("mode", json!(mode.unwrap_or("manual"))),
            ]),
        )),
    }
}

fn set_helm_input(world: &mut World, p: &Map<String, Value>) -> Result<Value, Failure> {
    let ship_id = required_str(p, "ship_id")?;
    let thrust = p.get("thrust_vector").cloned().unwrap_or_else(|| json!([0.0, 0.0, 0.0]));
    if thrust.as_array().map(Vec::len) != Some(3) {
        return Err(ApiError::BadRequest("thrust_vector must be a 3-element list".to_string()).into());
    }
    let rotation = p
        .get("rotation_deg_s")
        .or_else(|| p.get("rotation_input_deg_s"))
        .cloned()
        .unwrap_or_else(|| json!(0.0));
    let mode = p.get("mode").and_then(Value::as_str);
    match world.set_helm_input(ship_id, &thrust, &rotation, mode) {
        Ok(controls) => Ok(json!({
            "ship_id": ship_id,
            "controls": ControlsRecord::from(controls),
        })),
        Err(e) => Err(command_failure(e, echo(&[("ship_id", json!(ship_id))]))),
    }
}

fn echo(fields: &[(&str, Value)]) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

fn handle(world: &mut World, request: &ApiRequest) -> Result<Value, Failure> {
    let p = &request.payload;
    match request.action.as_str() {
        "get_state" => get_state(world, p),
        "get_events" => get_events(world, p),
        "get_mission" => get_mission(world),
        "get_server_info" => Ok(get_server_info()),
        "command.set_target" => set_target(world, p),
        "command.fire_weapon" => fire_weapon(world, p),
        "command.ping_sensors" => ping_sensors(world, p),
        "command.set_autopilot_mode" => set_autopilot_mode(world, p),
        "command.set_helm_input" => set_helm_input(world, p),
        action => Err(ApiError::UnknownAction(action.to_string()).into()),
    }
}

/// Applies one request to the world and builds the response
pub fn dispatch(world: &mut World, request: &ApiRequest) -> ApiResponse {
    match handle(world, request) {
        Ok(payload) => ApiResponse::ok(request, payload),
        Err(failure) => {
            debug!(
                "{} ({}) failed: {}",
                request.action, request.request_id, failure.error
            );
            ApiResponse::error(Some(request), failure.payload, failure.error)
        }
    }
}

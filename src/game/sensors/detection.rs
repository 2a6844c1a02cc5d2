use super::*;

/// Active sensors are more sensitive than passive ones by this factor
pub const ACTIVE_SENSITIVITY: f64 = 1.5;

/// Geometry and strength of a single qualifying return
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub range_km: f64,
    pub bearing_deg: f64,
    pub strength: f64,
}

/// What a sensor pass is working with
#[derive(Debug, Clone, Copy)]
pub struct SensorParams {
    pub range_km: f64,
    pub fov_deg: f64,
    pub sensitivity: f64,
}

/// Range in km and world-frame bearing in [0, 360) from one point to another. Bearing ignores the Z offset.
pub fn range_and_bearing(from: Point3<f64>, to: Point3<f64>) -> (f64, f64) {
    let offset = to - from;
    let range_km = offset.magnitude() / 1000.0;
    let bearing_deg = wrap_360(offset.y.atan2(offset.x).to_degrees());
    (range_km, bearing_deg)
}

/// Strictly inside the field of view centered on heading. Targets exactly on the edge are not seen.
pub fn within_fov(heading_deg: f64, bearing_deg: f64, fov_deg: f64) -> bool {
    if fov_deg >= 360.0 {
        return true;
    }
    let half = fov_deg / 2.0;
    let off_axis = wrap_180(bearing_deg - heading_deg);
    -half < off_axis && off_axis < half
}

/// sensitivity × signature × jamming factor × range falloff
pub fn detection_strength(
    base_signature: f64,
    range_km: f64,
    sensor_range_km: f64,
    target_ecm: f64,
    sensor_eccm: f64,
    sensitivity: f64,
) -> f64 {
    let jamming = (1.0 - target_ecm + sensor_eccm).max(0.1).min(2.0);
    let falloff = (1.0 - range_km / sensor_range_km.max(0.001)).max(0.0);
    sensitivity * base_signature * jamming * falloff
}

/// Some if the target is in range, in view and strong enough
pub fn detect(
    ship: &Ship,
    params: &SensorParams,
    target: &EntityRef,
    min_strength: f64,
) -> Option<Detection> {
    let (range_km, bearing_deg) = range_and_bearing(ship.position, target.position());
    if range_km > params.range_km {
        return None;
    }
    if !within_fov(ship.orientation.heading_deg(), bearing_deg, params.fov_deg) {
        return None;
    }
    let strength = detection_strength(
        target.signature().base_radar,
        range_km,
        params.range_km,
        target.ecm_strength(),
        ship.systems.ecm_eccm.eccm_strength,
        params.sensitivity,
    );
    if strength < min_strength {
        return None;
    }
    Some(Detection {
        range_km,
        bearing_deg,
        strength,
    })
}

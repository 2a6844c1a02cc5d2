use super::*;
use serde::Serialize;

/// Pitch is held just inside ±90° so yaw stays meaningful
pub const MAX_PITCH_DEG: f64 = 89.9;

/// Wraps an angle into [0, 360)
pub fn wrap_360(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid() can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wraps an angle into [-180, 180)
pub fn wrap_180(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Angular rates in degrees per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RotationRates {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl RotationRates {
    pub fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }
}

/// The one canonical attitude of an entity, in degrees. Yaw is measured counterclockwise from +X in the XY plane,
/// positive pitch raises the nose toward +Z.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Orientation {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl Orientation {
    /// Builds a normalized orientation (yaw and roll wrapped, pitch clamped)
    pub fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self {
            yaw: wrap_360(yaw),
            pitch: pitch.max(-MAX_PITCH_DEG).min(MAX_PITCH_DEG),
            roll: wrap_360(roll),
        }
    }

    /// Advances by rates over dt. Rates should already be clamped to the ship's caps.
    pub fn rotated(&self, rates: &RotationRates, dt: f64) -> Self {
        Self::new(
            self.yaw + rates.yaw * dt,
            self.pitch + rates.pitch * dt,
            self.roll + rates.roll * dt,
        )
    }

    /// Local to world rotation, Rz(yaw)·Ry(-pitch)·Rx(roll)
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_angle_z(Deg(self.yaw))
            * Matrix3::from_angle_y(Deg(-self.pitch))
            * Matrix3::from_angle_x(Deg(self.roll))
    }

    /// World-space unit vector along the ship's local +X (main drive) axis
    pub fn forward(&self) -> Vector3<f64> {
        self.rotation_matrix() * Vector3::unit_x()
    }

    /// The legacy single-angle heading
    pub fn heading_deg(&self) -> f64 {
        self.yaw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_360_keeps_range() {
        assert_ulps_eq!(wrap_360(370.0), 10.0);
        assert_ulps_eq!(wrap_360(-10.0), 350.0);
        assert_ulps_eq!(wrap_360(360.0), 0.0);
        assert!(wrap_360(-1e-20) < 360.0);
    }

    #[test]
    fn wrap_180_keeps_range() {
        assert_ulps_eq!(wrap_180(190.0), -170.0);
        assert_ulps_eq!(wrap_180(-190.0), 170.0);
        assert_ulps_eq!(wrap_180(45.0), 45.0);
    }

    #[test]
    fn pitch_is_clamped() {
        assert_ulps_eq!(Orientation::new(0.0, 120.0, 0.0).pitch, MAX_PITCH_DEG);
        assert_ulps_eq!(Orientation::new(0.0, -95.0, 0.0).pitch, -MAX_PITCH_DEG);
    }

    #[test]
    fn level_forward_is_plus_x() {
        let forward = Orientation::default().forward();
        assert_abs_diff_eq!(forward, Vector3::unit_x(), epsilon = EPSILON);
    }

    #[test]
    fn yaw_90_faces_plus_y() {
        let forward = Orientation::new(90.0, 0.0, 0.0).forward();
        assert_abs_diff_eq!(forward, Vector3::unit_y(), epsilon = EPSILON);
    }

    #[test]
    fn positive_pitch_is_nose_up() {
        let forward = Orientation::new(0.0, 30.0, 0.0).forward();
        assert!(forward.z > 0.0);
        assert_abs_diff_eq!(forward.z, 0.5, epsilon = EPSILON);
    }

    #[test]
    fn roll_does_not_move_forward_axis() {
        let level = Orientation::new(40.0, 10.0, 0.0).forward();
        let rolled = Orientation::new(40.0, 10.0, 75.0).forward();
        assert_abs_diff_eq!(level, rolled, epsilon = EPSILON);
    }

    #[test]
    fn rotating_wraps_yaw() {
        let o = Orientation::new(355.0, 0.0, 0.0).rotated(&RotationRates::new(10.0, 0.0, 0.0), 1.0);
        assert_abs_diff_eq!(o.yaw, 5.0, epsilon = EPSILON);
        assert_ulps_eq!(o.heading_deg(), o.yaw);
    }
}

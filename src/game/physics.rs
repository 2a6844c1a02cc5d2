use super::*;

/// Projectiles further than this from the origin (m) are removed
pub const PROJECTILE_RANGE_LIMIT_M: f64 = 1.0e9;
/// Throttle below this is treated as off
const MIN_THROTTLE: f64 = 1e-3;

fn is_finite(v: Vector3<f64>) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Advances one ship by dt: rotation first, then main drive along the new nose, then gravity sampled at the old
/// position, then a semi-implicit Euler step. Nothing is written unless the whole result is finite.
pub fn integrate_ship(ship: &mut Ship, dt: f64, bodies: &[GravityBody]) -> Result<(), Box<dyn Error>> {
    let helm = ship.controls.helm.normalized(&ship.physics);
    let orientation = ship.orientation.rotated(&helm.rotation, dt);

    let throttle = helm.thrust[2];
    let thrust_accel = if throttle.abs() > MIN_THROTTLE && ship.mass_kg > 1.0 {
        orientation.forward() * (ship.physics.max_main_thrust_newton * throttle / ship.mass_kg)
    } else {
        Vector3::zero()
    };
    let accel = thrust_accel + gravity_at(ship.position, bodies);

    let velocity = ship.velocity + accel * dt;
    let position = ship.position + velocity * dt;
    if !is_finite(velocity) || !is_finite(position.to_vec()) || !orientation.yaw.is_finite() {
        return Err(format!(
            "ship {} produced a non-finite state (accel {:?}), left unchanged",
            ship.id, accel
        )
        .into());
    }
    ship.orientation = orientation;
    ship.velocity = velocity;
    ship.position = position;
    Ok(())
}

/// Advances one projectile under gravity. Returns false if it has expired or left the play area.
/// It ages even when the step fails, so a broken projectile still runs out.
fn integrate_projectile(
    projectile: &mut Projectile,
    dt: f64,
    bodies: &[GravityBody],
) -> Result<bool, Box<dyn Error>> {
    projectile.ttl -= dt;
    // Repeated subtraction of dt leaves rounding residue at the boundary
    let expired = projectile.ttl <= EPSILON;
    let velocity = projectile.velocity + gravity_at(projectile.position, bodies) * dt;
    let position = projectile.position + velocity * dt;
    if !is_finite(velocity) || !is_finite(position.to_vec()) {
        return Err(format!(
            "projectile {} produced a non-finite state{}",
            projectile.id,
            if expired { ", removing it" } else { "" }
        )
        .into());
    }
    if expired {
        trace!("projectile {} expired", projectile.id);
        return Ok(false);
    }
    if position.to_vec().magnitude() > PROJECTILE_RANGE_LIMIT_M {
        debug!("projectile {} left the play area", projectile.id);
        return Ok(false);
    }
    projectile.velocity = velocity;
    projectile.position = position;
    Ok(true)
}

/// Advances every projectile and removes the ones that are done. One that fails to integrate keeps its position
/// and velocity until its ttl runs out.
pub fn integrate_projectiles(projectiles: &mut Vec<Projectile>, dt: f64, bodies: &[GravityBody]) {
    projectiles.retain_mut(|projectile| {
        integrate_projectile(projectile, dt, bodies)
            .or_log_error("integrating projectile")
            .unwrap_or(projectile.ttl > EPSILON)
    });
}

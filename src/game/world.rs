use super::*;

/// Everything that is simulated. Owned by exactly one thread; ticks and commands take turns through &mut self.
#[derive(Debug)]
pub struct World {
    /// Ticks run so far. Sim time is derived from this so it doesn't accumulate rounding error.
    ticks: u64,
    dt: f64,
    pub ships: Vec<Ship>,
    pub projectiles: Vec<Projectile>,
    pub gravity_bodies: Vec<GravityBody>,
    pub sensors: SensorsManager,
    /// Shared by all ships, so projectile IDs are never reused
    next_projectile_id: u64,
    pub info: ScenarioInfo,
}

impl World {
    pub fn new(scenario: Scenario, dt: f64, tuning: SensorTuning) -> Self {
        for ship in &scenario.ships {
            info!(
                "spawned ship {} ({}) at {:?}",
                ship.id,
                ship.class.as_deref().unwrap_or("unclassed"),
                ship.position
            );
        }
        Self {
            ticks: 0,
            dt,
            ships: scenario.ships,
            projectiles: Vec::new(),
            gravity_bodies: scenario.gravity_bodies,
            sensors: SensorsManager::new(tuning),
            next_projectile_id: 1,
            info: scenario.info,
        }
    }

    pub fn sim_time(&self) -> f64 {
        self.ticks as f64 * self.dt
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn ship(&self, id: &str) -> Option<&Ship> {
        self.ships.iter().find(|ship| ship.id == id)
    }

    pub fn ship_mut(&mut self, id: &str) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|ship| ship.id == id)
    }

    /// The next projectile ID, e.g. "alpha_proj_3"
    pub(super) fn take_projectile_id(&mut self, ship_id: &str) -> String {
        let id = format!("{}_proj_{}", ship_id, self.next_projectile_id);
        self.next_projectile_id += 1;
        id
    }

    /// Advances the simulation by one fixed step: autopilot, then physics, then sensors
    pub fn tick(&mut self) {
        self.ticks += 1;
        let now = self.sim_time();

        run_autopilot(&mut self.ships, &self.projectiles);

        for ship in &mut self.ships {
            let id = ship.id.clone();
            integrate_ship(ship, self.dt, &self.gravity_bodies)
                .or_log_error(&format!("skipping ship {} this tick", id));
        }
        integrate_projectiles(&mut self.projectiles, self.dt, &self.gravity_bodies);

        let entities = all_entities(&self.ships, &self.projectiles);
        for ship in &self.ships {
            self.sensors.update_passive(now, ship, &entities);
        }
        self.sensors.advance_time(now);
    }
}

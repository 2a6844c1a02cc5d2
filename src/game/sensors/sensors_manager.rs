use super::*;
use serde_json::{json, Value};

/// Owns every ship's contacts and the global event log
#[derive(Debug, Default)]
pub struct SensorsManager {
    tuning: SensorTuning,
    /// Sensing ship ID -> target entity ID -> contact
    contacts: BTreeMap<String, BTreeMap<String, Contact>>,
    events: Vec<SensorEvent>,
    next_event_id: u64,
    /// Sim time of each ship's last successful active ping
    last_ping_time: HashMap<String, f64>,
}

impl SensorsManager {
    pub fn new(tuning: SensorTuning) -> Self {
        Self {
            tuning,
            next_event_id: 1,
            ..Self::default()
        }
    }

    fn emit(
        &mut self,
        time: f64,
        kind: SensorEventKind,
        sensor_ship_id: &str,
        target_entity_id: Option<&str>,
        data: Value,
    ) {
        let id = self.next_event_id.max(1);
        self.next_event_id = id + 1;
        self.events.push(SensorEvent {
            id,
            time,
            kind,
            sensor_ship_id: sensor_ship_id.to_string(),
            target_entity_id: target_entity_id.map(str::to_string),
            data,
        });
    }

    fn record_detection(
        &mut self,
        now: f64,
        sensor_ship_id: &str,
        target_entity_id: &str,
        kind: DetectionKind,
        detection: &Detection,
    ) {
        let contacts = self
            .contacts
            .entry(sensor_ship_id.to_string())
            .or_insert_with(BTreeMap::new);
        let event = match contacts.get_mut(target_entity_id) {
            Some(contact) => {
                contact.refresh(now, kind, detection);
                SensorEventKind::ContactUpdated
            }
            None => {
                contacts.insert(
                    target_entity_id.to_string(),
                    Contact::new(now, sensor_ship_id, target_entity_id, kind, detection),
                );
                SensorEventKind::ContactAcquired
            }
        };
        self.emit(now, event, sensor_ship_id, Some(target_entity_id), json!({}));
    }

    fn sweep(
        &mut self,
        now: f64,
        ship: &Ship,
        entities: &[EntityRef],
        params: SensorParams,
        kind: DetectionKind,
    ) {
        for target in entities {
            if target.id() == ship.id {
                continue;
            }
            if let Some(detection) = detect(ship, &params, target, self.tuning.min_strength) {
                self.record_detection(now, &ship.id, target.id(), kind, &detection);
            }
        }
    }

    /// Runs the ship's passive sensor against every other entity. Does nothing if it has none.
    pub fn update_passive(&mut self, now: f64, ship: &Ship, entities: &[EntityRef]) {
        if let Some(passive) = ship.systems.passive_sensor() {
            let params = SensorParams {
                range_km: passive.range_km,
                fov_deg: passive.fov_deg,
                sensitivity: passive.sensitivity,
            };
            self.sweep(now, ship, entities, params, DetectionKind::Passive);
        }
    }

    /// Pings with the ship's active sensor, subject to its cooldown. Every attempt is logged as a sensor_ping
    /// event. Returns the ship's contacts afterwards.
    pub fn execute_active_ping(
        &mut self,
        now: f64,
        ship: &Ship,
        entities: &[EntityRef],
        mode: &str,
    ) -> Vec<Contact> {
        let active = match ship.systems.active_sensor() {
            Some(active) => *active,
            None => {
                let data = json!({"performed": false, "reason": "no_active"});
                self.emit(now, SensorEventKind::SensorPing, &ship.id, None, data);
                return self.contacts_for_ship(&ship.id);
            }
        };
        if let Some(last) = self.last_ping_time.get(&ship.id) {
            if now - last < active.ping_cooldown_s {
                let data = json!({"performed": false, "reason": "cooldown"});
                self.emit(now, SensorEventKind::SensorPing, &ship.id, None, data);
                return self.contacts_for_ship(&ship.id);
            }
        }
        self.last_ping_time.insert(ship.id.clone(), now);
        let data = json!({"performed": true, "mode": mode});
        self.emit(now, SensorEventKind::SensorPing, &ship.id, None, data);
        let params = SensorParams {
            range_km: active.range_km,
            fov_deg: active.fov_deg,
            sensitivity: ACTIVE_SENSITIVITY,
        };
        self.sweep(now, ship, entities, params, DetectionKind::Active);
        self.contacts_for_ship(&ship.id)
    }

    /// Ages every contact: marks old ones stale and drops (with a contact_lost event) the ones past drop_after.
    /// Runs once per tick after all detection.
    pub fn advance_time(&mut self, now: f64) {
        let tuning = self.tuning;
        let mut lost = Vec::new();
        for (sensor_ship_id, contacts) in self.contacts.iter_mut() {
            contacts.retain(|target_entity_id, contact| {
                let age = contact.age(now);
                if age >= tuning.drop_after {
                    lost.push((sensor_ship_id.clone(), target_entity_id.clone()));
                    false
                } else {
                    if age >= tuning.stale_after {
                        contact.stale = true;
                    }
                    true
                }
            });
        }
        self.contacts.retain(|_, contacts| !contacts.is_empty());
        for (sensor_ship_id, target_entity_id) in lost {
            debug!("{} lost contact with {}", sensor_ship_id, target_entity_id);
            self.emit(
                now,
                SensorEventKind::ContactLost,
                &sensor_ship_id,
                Some(&target_entity_id),
                json!({}),
            );
        }
    }

    /// Current contacts held by a ship, ordered by target ID
    pub fn contacts_for_ship(&self, ship_id: &str) -> Vec<Contact> {
        self.contacts
            .get(ship_id)
            .map(|contacts| contacts.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Every event with an ID greater than last_id, oldest first
    pub fn events_since(&self, last_id: u64) -> &[SensorEvent] {
        let start = self.events.partition_point(|event| event.id <= last_id);
        &self.events[start..]
    }
}

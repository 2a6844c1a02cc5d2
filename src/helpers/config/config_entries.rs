use super::*;

/// Longest wall-clock pause (seconds) the engine can be asked to wait for in one tick
const MAX_PACING_SECONDS: f64 = 3600.0;

fn require_finite(value: f64, source: Option<&str>) -> Result<f64, Box<dyn Error>> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{} must be a finite number", source.unwrap_or("default")).into())
    }
}

fn require_positive(value: f64, source: Option<&str>) -> Result<f64, Box<dyn Error>> {
    if require_finite(value, source)? > 0.0 {
        Ok(value)
    } else {
        Err(format!("{} must be greater than 0", source.unwrap_or("default")).into())
    }
}

fn require_non_negative(value: f64, source: Option<&str>) -> Result<f64, Box<dyn Error>> {
    if require_finite(value, source)? >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{} should not be negative", source.unwrap_or("default")).into())
    }
}

fn require_pacing(value: f64, source: Option<&str>) -> Result<f64, Box<dyn Error>> {
    if value <= MAX_PACING_SECONDS {
        Ok(value)
    } else {
        Err(format!(
            "{} must be at most {} seconds",
            source.unwrap_or("default"),
            MAX_PACING_SECONDS
        )
        .into())
    }
}

/// These entries will be applied in order of returned vec (NOT in the order the user specifies them). All entries
/// will always be applied, so later entries may validate against earlier ones.
pub fn config_entries() -> Vec<Box<dyn ConfigEntry>> {
    vec![
        <dyn ConfigEntry>::new_float(
            "max_game_seconds",
            "simulated seconds to run before exiting, or 0 to run until the process is killed",
            0.0,
            |conf, time, source| {
                let time = require_non_negative(time, source)?;
                conf.max_game_time = if time > 0.0 { Some(time) } else { None };
                Ok(())
            },
        ),
        <dyn ConfigEntry>::new_float(
            "tick_seconds",
            "fixed simulation step, also how often the world advances in real time",
            0.1,
            |conf, tick, source| {
                conf.tick_seconds = require_pacing(require_positive(tick, source)?, source)?;
                Ok(())
            },
        ),
        <dyn ConfigEntry>::new_float(
            "min_sleep_seconds",
            "time to wait between ticks even when a tick runs over budget",
            0.0,
            |conf, sleep, source| {
                conf.min_sleep_seconds = require_pacing(require_non_negative(sleep, source)?, source)?;
                Ok(())
            },
        ),
        <dyn ConfigEntry>::new_string(
            "tcp_address",
            "address and port to accept line-delimited JSON API connections on",
            "0.0.0.0:8765",
            |conf, addr, source| {
                conf.tcp_address = addr.parse().map_err(|e| {
                    format!(
                        "{} {:?} is not a socket address: {}",
                        source.unwrap_or("default"),
                        addr,
                        e
                    )
                })?;
                Ok(())
            },
        ),
        <dyn ConfigEntry>::new_string(
            "scenario",
            "path to the scenario JSON file that sets up ships and gravity bodies",
            "scenarios/interceptor_vs_target.json",
            |conf, path, source| {
                if path.is_empty() {
                    return Err(format!("{} is empty", source.unwrap_or("default")).into());
                }
                conf.scenario_path = path.into();
                Ok(())
            },
        ),
        <dyn ConfigEntry>::new_float(
            "contact_stale_seconds",
            "seconds without a detection before a sensor contact is marked stale",
            5.0,
            |conf, seconds, source| {
                conf.sensors.stale_after = require_non_negative(seconds, source)?;
                Ok(())
            },
        ),
        <dyn ConfigEntry>::new_float(
            "contact_drop_seconds",
            "seconds without a detection before a sensor contact is dropped",
            10.0,
            |conf, seconds, source| {
                let seconds = require_non_negative(seconds, source)?;
                if seconds < conf.sensors.stale_after {
                    return Err(format!(
                        "{} ({}) is less than contact_stale_seconds ({})",
                        source.unwrap_or("default"),
                        seconds,
                        conf.sensors.stale_after
                    )
                    .into());
                }
                conf.sensors.drop_after = seconds;
                Ok(())
            },
        ),
        <dyn ConfigEntry>::new_float(
            "min_detection_strength",
            "weakest sensor return that still produces a contact",
            0.05,
            |conf, strength, source| {
                conf.sensors.min_strength = require_non_negative(strength, source)?;
                Ok(())
            },
        ),
    ]
}

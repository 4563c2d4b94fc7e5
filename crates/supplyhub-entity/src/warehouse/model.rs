//! Warehouse and zone entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use supplyhub_core::types::{UserId, WarehouseId};

/// A warehouse with its monitored zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    /// Unique warehouse identifier.
    pub id: WarehouseId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Zones, each bound to at most one sensor.
    pub zones: Vec<Zone>,
}

impl Warehouse {
    /// Find the zone bound to a sensor.
    pub fn zone_for_sensor(&self, sensor_id: &str) -> Option<&Zone> {
        self.zones
            .iter()
            .find(|zone| zone.sensor_id.as_deref() == Some(sensor_id))
    }
}

/// A temperature-monitored area of a warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone name, unique within its warehouse.
    pub name: String,
    /// Sensor registered for this zone.
    pub sensor_id: Option<String>,
    /// Most recent temperature.
    pub current_temperature: Option<f64>,
    /// Most recent reading with its timestamp.
    pub last_reading: Option<TemperatureReading>,
}

/// A single sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub temperature: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Direction of a temperature threshold breach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TemperatureAlert {
    High,
    Low,
}

impl TemperatureAlert {
    /// Return the alert as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Low => "LOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_lookup_by_sensor() {
        let warehouse = Warehouse {
            id: WarehouseId::new(),
            user_id: UserId::new(),
            name: "North".into(),
            zones: vec![
                Zone {
                    name: "Cold room".into(),
                    sensor_id: Some("S-1".into()),
                    current_temperature: None,
                    last_reading: None,
                },
                Zone {
                    name: "Dock".into(),
                    sensor_id: None,
                    current_temperature: None,
                    last_reading: None,
                },
            ],
        };
        assert_eq!(warehouse.zone_for_sensor("S-1").map(|z| z.name.as_str()), Some("Cold room"));
        assert!(warehouse.zone_for_sensor("S-9").is_none());
    }

    #[test]
    fn test_alert_wire_format() {
        let parsed: TemperatureAlert = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(parsed, TemperatureAlert::High);
    }
}

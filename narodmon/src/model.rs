//! Typed views of common response payloads.
//!
//! The client returns responses as raw JSON values. These structs cover the
//! `sensorNear` device listing for callers who prefer typed access; unknown
//! fields are ignored and missing ones take their defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single sensor reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sensor {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: u32,
    pub name: String,
    pub value: f64,
    pub unit: String,
    /// Unix time of the reading.
    pub time: i64,
}

/// A device with its sensors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub id: u64,
    pub name: String,
    pub owner: Option<String>,
    pub location: Option<String>,
    /// Distance from the query point in km.
    pub distance: Option<f64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub sensors: Vec<Sensor>,
}

/// Payload of a `sensorNear` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceList {
    pub devices: Vec<Device>,
}

impl DeviceList {
    /// Interprets a `sensorNear` response.
    pub fn from_value(value: &Value) -> serde_json::Result<Self> {
        Self::deserialize(value)
    }
}

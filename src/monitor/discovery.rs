//! Home Assistant MQTT discovery announcement.

use serde::Serialize;

use crate::settings::DiscoverySettings;

/// Sensor descriptor published once to the discovery topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryConfig {
    pub device_class: &'static str,
    pub name: String,
    pub unique_id: String,
    pub state_topic: String,
    pub unit_of_measurement: &'static str,
}

impl DiscoveryConfig {
    pub fn voltage(name: impl Into<String>, unique_id: impl Into<String>, state_topic: impl Into<String>) -> Self {
        Self {
            device_class: "voltage",
            name: name.into(),
            unique_id: unique_id.into(),
            state_topic: state_topic.into(),
            unit_of_measurement: "V",
        }
    }

    pub fn to_payload(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Where and what to announce.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    pub topic: String,
    pub config: DiscoveryConfig,
}

impl Discovery {
    pub fn from_settings(settings: &DiscoverySettings, state_topic: &str) -> Self {
        Self {
            topic: settings.topic.clone(),
            config: DiscoveryConfig::voltage(&settings.name, &settings.unique_id, state_topic),
        }
    }
}

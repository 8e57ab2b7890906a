//! Remote sensor readings and their grouping by area.

mod attribute_value;

use std::collections::BTreeMap;

pub use self::attribute_value::AttributeValue;
use crate::time::Timestamp;

/// Attributes describing a sensor rather than measuring something.
pub const METADATA_KEYS: [&str; 6] = [
    "friendly_name",
    "unit_of_measurement",
    "icon",
    "device_class",
    "state_class",
    "entity_picture",
];

const FRIENDLY_NAME: &str = "friendly_name";
const UNIT: &str = "unit_of_measurement";
const SHORT_NAME_LEN: usize = 4;

/// Raw state as returned by a state provider.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    pub state: String,
    pub attributes: BTreeMap<String, AttributeValue>,
    pub last_updated: Timestamp,
}

/// A single key/value/unit reading derived from a sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub key: String,
    pub value: String,
    pub unit: Option<String>,
}

/// Cached, display-ready view of one sensor entity.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorState {
    pub entity_id: String,
    pub name: String,
    pub state: String,
    pub unit: Option<String>,
    /// Non-metadata attributes.
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Primary reading first, then one entry per attribute in key order.
    pub measurements: Vec<Measurement>,
    pub last_updated: Timestamp,
}

impl SensorState {
    /// Derive the display view of `entity_id` from a provider snapshot.
    #[must_use]
    pub fn from_snapshot(entity_id: &str, snapshot: EntitySnapshot) -> Self {
        let EntitySnapshot {
            state,
            mut attributes,
            last_updated,
        } = snapshot;

        let name = attributes
            .get(FRIENDLY_NAME)
            .map_or_else(|| entity_id.to_string(), ToString::to_string);
        let unit = attributes.get(UNIT).map(ToString::to_string);
        attributes.retain(|key, _| !METADATA_KEYS.contains(&key.as_str()));

        let primary_key = entity_id
            .split_once('.')
            .map_or(entity_id, |(_, object_id)| object_id);
        let mut measurements = Vec::with_capacity(attributes.len() + 1);
        measurements.push(Measurement {
            key: primary_key.to_string(),
            value: state.clone(),
            unit: unit.clone(),
        });
        measurements.extend(attributes.iter().map(|(key, value)| Measurement {
            key: key.clone(),
            value: value.to_string(),
            unit: None,
        }));

        Self {
            entity_id: entity_id.to_string(),
            name,
            state,
            unit,
            attributes,
            measurements,
            last_updated,
        }
    }

    /// Last word of the display name, cut to four characters.
    #[must_use]
    pub fn short_name(&self) -> String {
        self.name
            .split_whitespace()
            .next_back()
            .unwrap_or_default()
            .chars()
            .take(SHORT_NAME_LEN)
            .collect()
    }

    /// State followed by its unit, e.g. `21.5°C`.
    #[must_use]
    pub fn reading(&self) -> String {
        format!("{}{}", self.state, self.unit.as_deref().unwrap_or_default())
    }
}

/// Area name and the entity IDs a provider reports in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaGrouping {
    pub area: String,
    pub entity_ids: Vec<String>,
}

/// Area name and the cached sensors belonging to it, in area order.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaSensors {
    pub area: String,
    pub sensors: Vec<SensorState>,
}

/// Result of matching discovered areas against the configured entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaDiscovery {
    /// Areas holding at least one configured entity, restricted to those.
    pub areas: Vec<AreaGrouping>,
    /// Configured entities found in no area.
    pub unassigned: Vec<String>,
}

impl AreaDiscovery {
    /// Keep only configured entities and the areas that still hold any.
    #[must_use]
    pub fn filter(discovered: Vec<AreaGrouping>, configured: &[String]) -> Self {
        let areas: Vec<AreaGrouping> = discovered
            .into_iter()
            .filter_map(|mut grouping| {
                grouping.entity_ids.retain(|id| configured.contains(id));
                (!grouping.entity_ids.is_empty()).then_some(grouping)
            })
            .collect();
        let unassigned = configured
            .iter()
            .filter(|id| !areas.iter().any(|area| area.entity_ids.contains(id)))
            .cloned()
            .collect();
        Self { areas, unassigned }
    }

    /// Configured entities that belong to some area, in area order.
    #[must_use]
    pub fn assigned(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for id in self.areas.iter().flat_map(|area| &area.entity_ids) {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }
}

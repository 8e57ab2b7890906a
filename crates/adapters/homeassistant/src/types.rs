//! Wire types for the Home Assistant REST API.

use std::collections::BTreeMap;

use matrixclock_domain::error::ValidationError;
use matrixclock_domain::sensor::{AreaGrouping, AttributeValue, EntitySnapshot};
use matrixclock_domain::time::parse_timestamp;
use serde::{Deserialize, Serialize};

/// Lists `sensor.*` entities per area as a JSON array of
/// `{"area": ..., "entities": [...]}` objects, skipping empty areas.
pub(crate) const AREA_SENSORS_TEMPLATE: &str = concat!(
    "{%- set ns = namespace(result=[]) -%}",
    "{%- for aid in areas() -%}",
    "  {%- set sensors = area_entities(aid) | select('match', '^sensor\\\\.') | list -%}",
    "  {%- if sensors -%}",
    "    {%- set ns.result = ns.result + [{\"area\": area_name(aid), \"entities\": sensors}] -%}",
    "  {%- endif -%}",
    "{%- endfor -%}",
    "{{ ns.result | to_json }}",
);

#[derive(Debug, Serialize)]
pub(crate) struct TemplateRequest<'a> {
    pub template: &'a str,
}

/// Body of `GET /api/states/{entity_id}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StateResponse {
    pub state: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
    pub last_updated: String,
}

impl StateResponse {
    pub fn into_snapshot(self) -> Result<EntitySnapshot, ValidationError> {
        Ok(EntitySnapshot {
            last_updated: parse_timestamp(&self.last_updated)?,
            state: self.state,
            attributes: self.attributes,
        })
    }
}

/// One element of the area template output.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AreaSensorsResponse {
    pub area: String,
    pub entities: Vec<String>,
}

impl From<AreaSensorsResponse> for AreaGrouping {
    fn from(value: AreaSensorsResponse) -> Self {
        Self {
            area: value.area,
            entity_ids: value.entities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATE: &str = r#"{
        "entity_id": "sensor.kitchen_temperature",
        "state": "21.4",
        "attributes": {
            "state_class": "measurement",
            "unit_of_measurement": "°C",
            "device_class": "temperature",
            "friendly_name": "Kitchen Temperature",
            "battery": 87,
            "calibrated": true
        },
        "last_changed": "2026-10-18T09:12:33.123456+00:00",
        "last_updated": "2026-10-18T09:12:33.123456+00:00",
        "context": {"id": "01J", "parent_id": null, "user_id": null}
    }"#;

    #[test]
    fn should_convert_state_into_snapshot() {
        let response: StateResponse = serde_json::from_str(STATE).unwrap();
        let snapshot = response.into_snapshot().unwrap();

        assert_eq!(snapshot.state, "21.4");
        assert_eq!(
            snapshot.last_updated,
            parse_timestamp("2026-10-18T09:12:33.123456Z").unwrap()
        );
        assert_eq!(
            snapshot.attributes.get("battery"),
            Some(&AttributeValue::Int(87))
        );
        assert_eq!(
            snapshot.attributes.get("calibrated"),
            Some(&AttributeValue::Bool(true))
        );
        assert_eq!(
            snapshot.attributes.get("unit_of_measurement"),
            Some(&AttributeValue::from("°C"))
        );
    }

    #[test]
    fn should_reject_malformed_last_updated() {
        let json = r#"{"entity_id": "sensor.x", "state": "1", "last_updated": "yesterday"}"#;
        let response: StateResponse = serde_json::from_str(json).unwrap();
        let err = response.into_snapshot().unwrap_err();
        assert!(matches!(err, ValidationError::MalformedTimestamp { .. }));
    }

    #[test]
    fn should_convert_area_sensors_into_groupings() {
        let json = r#"[
            {"area": "Kitchen", "entities": ["sensor.kitchen_temperature", "sensor.kitchen_humidity"]},
            {"area": "Office", "entities": ["sensor.office_co2"]}
        ]"#;
        let areas: Vec<AreaSensorsResponse> = serde_json::from_str(json).unwrap();
        let groupings: Vec<AreaGrouping> = areas.into_iter().map(AreaGrouping::from).collect();

        assert_eq!(groupings.len(), 2);
        assert_eq!(groupings[0].area, "Kitchen");
        assert_eq!(groupings[0].entity_ids.len(), 2);
        assert_eq!(groupings[1].entity_ids, vec!["sensor.office_co2"]);
    }

    #[test]
    fn should_only_select_sensor_entities_in_template() {
        assert!(AREA_SENSORS_TEMPLATE.contains(r"select('match', '^sensor\\.')"));
        assert!(AREA_SENSORS_TEMPLATE.ends_with("{{ ns.result | to_json }}"));
    }
}

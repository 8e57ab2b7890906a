//! Sensor agent: remote sensor readings cached and grouped by area.
//!
//! Startup runs once: discover areas, drop configured sensors that belong to
//! no area, fetch every remaining sensor. After that only the readings are
//! refreshed; the area layout is fixed for the life of the agent.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use matrixclock_domain::error::{MatrixClockError, ValidationError};
use matrixclock_domain::sensor::{AreaDiscovery, AreaGrouping, AreaSensors, SensorState};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ports::{SensorReader, StateProvider};

/// Default pause between two polls of every sensor.
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(60);

/// Sensor cache fed by a [`StateProvider`].
pub struct SensorAgent<P> {
    provider: P,
    refresh: Duration,
    /// Sensors actually polled, after dropping the unassigned ones.
    entity_ids: Vec<String>,
    areas: Vec<AreaGrouping>,
    cache: RwLock<HashMap<String, SensorState>>,
}

impl<P: StateProvider> SensorAgent<P> {
    /// Discover areas and fetch every assigned sensor once.
    ///
    /// When area discovery fails every configured sensor is polled and no
    /// area is exposed.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixClockError::Validation`] when `entity_ids` is empty or
    /// `refresh` is zero.
    pub async fn new(
        provider: P,
        entity_ids: Vec<String>,
        refresh: Duration,
    ) -> Result<Arc<Self>, MatrixClockError> {
        if entity_ids.is_empty() {
            return Err(ValidationError::EmptyEntityList.into());
        }
        super::ensure_positive(refresh, "sensor refresh")?;

        let (areas, entity_ids) = match provider.area_groupings().await {
            Ok(discovered) => {
                let discovery = AreaDiscovery::filter(discovered, &entity_ids);
                for entity_id in &discovery.unassigned {
                    tracing::warn!(%entity_id, "sensor is not assigned to any area, dropping it");
                }
                let assigned = discovery.assigned();
                (discovery.areas, assigned)
            }
            Err(err) => {
                tracing::warn!(%err, "area discovery failed, area pages disabled");
                (Vec::new(), entity_ids)
            }
        };

        let agent = Self {
            provider,
            refresh,
            entity_ids,
            areas,
            cache: RwLock::new(HashMap::new()),
        };
        let fetched = agent.refresh().await;
        tracing::info!(
            areas = agent.areas.len(),
            sensors = agent.entity_ids.len(),
            fetched,
            "sensor readings cached"
        );
        Ok(Arc::new(agent))
    }

    /// Fetch every polled sensor, returning how many were updated.
    ///
    /// A sensor that fails keeps its previous reading.
    pub async fn refresh(&self) -> usize {
        let mut updated = 0;
        for entity_id in &self.entity_ids {
            match self.provider.state(entity_id).await {
                Ok(snapshot) => {
                    let sensor = SensorState::from_snapshot(entity_id, snapshot);
                    super::write(&self.cache).insert(entity_id.clone(), sensor);
                    updated += 1;
                }
                Err(err) => {
                    tracing::warn!(%err, %entity_id, "sensor fetch failed, keeping cached reading");
                }
            }
        }
        tracing::debug!(updated, total = self.entity_ids.len(), "sensor refresh done");
        updated
    }

    fn area_sensors(&self, grouping: &AreaGrouping) -> AreaSensors {
        let cache = super::read(&self.cache);
        AreaSensors {
            area: grouping.area.clone(),
            sensors: grouping
                .entity_ids
                .iter()
                .filter_map(|id| cache.get(id).cloned())
                .collect(),
        }
    }
}

impl<P: StateProvider + 'static> SensorAgent<P> {
    /// Spawn the periodic refresh loop.
    pub fn spawn_refresh(self: &Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        let agent = Arc::clone(self);
        tokio::spawn(async move { agent.run(cancel).await })
    }

    async fn run(&self, cancel: CancellationToken) {
        let mut ticker = super::ticker(self.refresh);
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.refresh().await;
                }
            }
        }
        tracing::debug!("sensor agent stopped");
    }
}

impl<P: StateProvider> SensorReader for SensorAgent<P> {
    fn area_names(&self) -> Vec<String> {
        self.areas.iter().map(|grouping| grouping.area.clone()).collect()
    }

    fn areas(&self) -> Vec<AreaSensors> {
        self.areas
            .iter()
            .map(|grouping| self.area_sensors(grouping))
            .collect()
    }

    fn area(&self, name: &str) -> Option<AreaSensors> {
        self.areas
            .iter()
            .find(|grouping| grouping.area == name)
            .map(|grouping| self.area_sensors(grouping))
    }

    fn sensor(&self, entity_id: &str) -> Option<SensorState> {
        super::read(&self.cache).get(entity_id).cloned()
    }

    fn all_sensors(&self) -> Vec<SensorState> {
        let mut sensors: Vec<SensorState> = super::read(&self.cache).values().cloned().collect();
        sensors.sort_by(|a, b| a.entity_id.cmp(&b.entity_id));
        sensors
    }
}

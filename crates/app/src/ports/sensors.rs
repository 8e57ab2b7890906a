//! State provider port: remote sensor states and their area groupings.

use std::future::Future;

use matrixclock_domain::error::MatrixClockError;
use matrixclock_domain::sensor::{AreaGrouping, EntitySnapshot};

/// Home-automation backend the sensor agent polls.
pub trait StateProvider: Send + Sync {
    /// Current state of a single entity.
    fn state(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<EntitySnapshot, MatrixClockError>> + Send;

    /// Every area together with the entities assigned to it.
    fn area_groupings(
        &self,
    ) -> impl Future<Output = Result<Vec<AreaGrouping>, MatrixClockError>> + Send;
}

impl<T: StateProvider> StateProvider for std::sync::Arc<T> {
    fn state(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<EntitySnapshot, MatrixClockError>> + Send {
        (**self).state(entity_id)
    }

    fn area_groupings(
        &self,
    ) -> impl Future<Output = Result<Vec<AreaGrouping>, MatrixClockError>> + Send {
        (**self).area_groupings()
    }
}

//! Clock port for time-related operations

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Timestamps on environments and templates come from here so tests can
/// pin them.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

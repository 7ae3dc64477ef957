use std::sync::Mutex;

use chrono::Utc;
use log::{error, trace};

use crate::records::RecordId;

type Clock = Box<dyn Fn() -> u64 + Send + Sync>;

fn wall_clock_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Issues record ids that are strictly increasing for the lifetime of the generator.
///
/// An id is the current time in milliseconds unless that would not exceed the
/// previously issued id or the largest id already present in the target
/// collection, in which case it is one past the larger of the two.
pub struct IdGenerator {
    clock: Clock,
    last_issued: Mutex<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_clock(wall_clock_millis)
    }

    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> u64 + Send + Sync + 'static,
    {
        Self {
            clock: Box::new(clock),
            last_issued: Mutex::new(0),
        }
    }

    /// Next id, guaranteed greater than `existing_max` when given.
    pub fn next_id(&self, existing_max: Option<RecordId>) -> RecordId {
        let now = (self.clock)();
        let mut last = match self.last_issued.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                error!("IdGenerator lock poisoned, recovering last issued id");
                poisoned.into_inner()
            }
        };
        let floor = existing_max.map_or(*last, |max| max.value().max(*last));
        let id = if now > floor { now } else { floor + 1 };
        *last = id;
        trace!("Issued id {} (clock {}, floor {})", id, now, floor);
        RecordId(id)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

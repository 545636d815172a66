// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;

use crate::domain::shared::services::TimeProvider;

pub struct ConstantTimeProvider {
    pub time: Mutex<DateTime<Utc>>,
}

impl ConstantTimeProvider {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self {
            time: Mutex::new(time),
        }
    }

    pub fn ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        ConstantTimeProvider {
            time: Mutex::new(
                Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
                    .unwrap(),
            ),
        }
    }

    pub fn set(&self, time: DateTime<Utc>) {
        *self.time.lock() = time
    }

    pub fn advance(&self, duration: Duration) {
        let mut time = self.time.lock();
        *time = *time + duration;
    }
}

impl TimeProvider for ConstantTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        *self.time.lock()
    }
}

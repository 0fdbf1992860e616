//! Shared fixtures for integration and behaviour tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use cohort::session::domain::VerifiedIdentity;
use mockable::Clock;
use std::sync::{Arc, Mutex, PoisonError};

/// Token accepted for the project owner.
pub const OWNER_TOKEN: &str = "owner-token";
/// Provider subject of the project owner.
pub const OWNER_UID: &str = "uid-owner";
/// Roll number of the project owner.
pub const OWNER_ROLL: &str = "21cs0001";

/// Token accepted for a second student.
pub const STUDENT_TOKEN: &str = "student-token";
/// Provider subject of the second student.
pub const STUDENT_UID: &str = "uid-student";
/// Roll number of the second student.
pub const STUDENT_ROLL: &str = "21cs1234";

/// Clock shared between a test and the services it drives.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock frozen at 2026-03-02 10:00 UTC.
    pub fn reference() -> Self {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 2, 10, 0, 0)
            .single()
            .expect("valid reference instant");
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Identity asserted by [`OWNER_TOKEN`].
pub fn owner_identity() -> VerifiedIdentity {
    VerifiedIdentity::new(
        OWNER_UID,
        Some("Asha Menon-IIITK".to_owned()),
        Some(format!("{OWNER_ROLL}@iiitkottayam.ac.in")),
    )
}

/// Identity asserted by [`STUDENT_TOKEN`].
pub fn student_identity() -> VerifiedIdentity {
    VerifiedIdentity::new(
        STUDENT_UID,
        Some("Ravi Nair".to_owned()),
        Some(format!("{STUDENT_ROLL}@iiitkottayam.ac.in")),
    )
}

//! Caller-side view of a lookup, and a guard against overlapping lookups.
//!
//! A lookup cannot be cancelled, so when a caller starts a new one before the previous one
//! finishes, either may resolve last. [`RequestTracker`] hands out increasing tokens and
//! drops results whose token is no longer the latest.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::{WeatherError, WeatherReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    CityNotFound,
    FetchFailed,
}

/// What a caller should be showing right now.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Success(WeatherReport),
    /// Holds no report: data from earlier lookups is no longer valid.
    Error { kind: ErrorKind, message: String },
}

impl LookupState {
    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            LookupState::Success(report) => Some(report),
            _ => None,
        }
    }
}

impl From<WeatherError> for LookupState {
    fn from(err: WeatherError) -> Self {
        let kind = match err {
            WeatherError::CityNotFound => ErrorKind::CityNotFound,
            WeatherError::FetchFailed(_) => ErrorKind::FetchFailed,
        };

        LookupState::Error {
            kind,
            message: err.user_message(),
        }
    }
}

impl From<Result<WeatherReport, WeatherError>> for LookupState {
    fn from(result: Result<WeatherReport, WeatherError>) -> Self {
        match result {
            Ok(report) => LookupState::Success(report),
            Err(err) => err.into(),
        }
    }
}

/// Identifies one lookup issued through a [`RequestTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new lookup; every earlier token becomes stale.
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Turn a finished lookup into a state, or `None` if a newer lookup has started since.
    pub fn settle(
        &self,
        token: RequestToken,
        result: Result<WeatherReport, WeatherError>,
    ) -> Option<LookupState> {
        if !self.is_latest(token) {
            tracing::debug!(?token, "discarding stale lookup result");
            return None;
        }
        Some(result.into())
    }
}

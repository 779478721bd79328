use std::sync::Arc;

use comensales_domain::{AccessDecision, AccessLevel, GrantWindow};
use tracing::{debug, warn};

use crate::TimeWindowValidator;

mod assisted_users;
mod management;


/// Evaluates management and delegated-user access for residence users.
///
/// Decisions are computed from the profile passed in on every call and are
/// never cached.
#[derive(Clone)]
pub struct AuthorizationService {
    time_window_validator: Arc<dyn TimeWindowValidator>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a time-window validator.
    #[must_use]
    pub fn new(time_window_validator: Arc<dyn TimeWindowValidator>) -> Self {
        Self {
            time_window_validator,
        }
    }

    /// Grants `access_level` only while `window` is open.
    ///
    /// A failing validator denies.
    async fn decide_time_restricted_grant(
        &self,
        access_level: AccessLevel,
        window: GrantWindow<'_>,
        time_zone: &str,
    ) -> AccessDecision {
        match self
            .time_window_validator
            .check_window(window.starts_on, window.ends_on, time_zone)
            .await
        {
            Ok(status) if status.is_within() => AccessDecision::granted(access_level),
            Ok(status) => {
                debug!(
                    status = status.as_str(),
                    starts_on = window.starts_on.unwrap_or_default(),
                    ends_on = window.ends_on.unwrap_or_default(),
                    "grant window is closed"
                );
                AccessDecision::denied()
            }
            Err(error) => {
                warn!(
                    error = %error,
                    time_zone,
                    "grant window check failed, denying access"
                );
                AccessDecision::denied()
            }
        }
    }
}

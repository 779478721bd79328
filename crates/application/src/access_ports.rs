use async_trait::async_trait;
use comensales_core::{AppResult, ResidenceId};
use comensales_domain::{TimeWindowStatus, UserId, UserProfile};

/// Residence settings needed to evaluate access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidenceSettings {
    /// Residence identifier.
    pub id: ResidenceId,
    /// IANA timezone the residence operates in.
    pub time_zone: String,
}

/// Port deciding whether "now" falls inside a grant window.
#[async_trait]
pub trait TimeWindowValidator: Send + Sync {
    /// Checks the current moment, in `time_zone`, against the window bounds.
    async fn check_window(
        &self,
        starts_on: Option<&str>,
        ends_on: Option<&str>,
        time_zone: &str,
    ) -> AppResult<TimeWindowStatus>;
}

/// Repository port for user profile lookups.
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Finds the current profile of a user.
    async fn find_user_profile(&self, user_id: &UserId) -> AppResult<Option<UserProfile>>;
}

/// Repository port for residence settings lookups.
#[async_trait]
pub trait ResidenceRepository: Send + Sync {
    /// Finds the settings of a residence.
    async fn find_residence(&self, residence_id: &ResidenceId)
    -> AppResult<Option<ResidenceSettings>>;
}

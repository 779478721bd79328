use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono_tz::Tz;
use comensales_application::{ResidenceRepository, ResidenceSettings, UserProfileRepository};
use comensales_core::{AppError, AppResult, ResidenceId};
use comensales_domain::{UserId, UserProfile};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::info;

/// Seed document for the in-memory directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectorySeed {
    /// Residences and their timezones.
    #[serde(default)]
    pub residences: Vec<ResidenceSeed>,
    /// User profiles.
    #[serde(default)]
    pub users: Vec<UserProfile>,
}

/// Residence entry of a [`DirectorySeed`].
#[derive(Debug, Clone, Deserialize)]
pub struct ResidenceSeed {
    /// Residence identifier.
    pub id: ResidenceId,
    /// IANA timezone of the residence.
    #[serde(rename = "zonaHoraria")]
    pub time_zone: String,
}

/// In-memory user profile and residence store.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryRepository {
    users: RwLock<HashMap<UserId, UserProfile>>,
    residences: RwLock<HashMap<ResidenceId, ResidenceSettings>>,
}

impl InMemoryDirectoryRepository {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from a seed, rejecting duplicates and unknown timezones.
    pub fn from_seed(seed: DirectorySeed) -> AppResult<Self> {
        let mut residences = HashMap::new();
        for residence in seed.residences {
            validate_time_zone(&residence.id, residence.time_zone.as_str())?;
            if residences.contains_key(&residence.id) {
                return Err(AppError::Conflict(format!(
                    "residence '{}' is seeded twice",
                    residence.id
                )));
            }
            residences.insert(
                residence.id.clone(),
                ResidenceSettings {
                    id: residence.id,
                    time_zone: residence.time_zone,
                },
            );
        }

        let mut users = HashMap::new();
        for user in seed.users {
            if users.contains_key(&user.id) {
                return Err(AppError::Conflict(format!(
                    "user '{}' is seeded twice",
                    user.id
                )));
            }
            users.insert(user.id.clone(), user);
        }

        Ok(Self {
            users: RwLock::new(users),
            residences: RwLock::new(residences),
        })
    }

    /// Builds a directory from a JSON seed document.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let seed: DirectorySeed = serde_json::from_str(raw)
            .map_err(|error| AppError::Validation(format!("invalid directory seed: {error}")))?;
        Self::from_seed(seed)
    }

    /// Loads a JSON seed document from disk.
    pub async fn load_from_path(path: &Path) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to read directory seed '{}': {error}",
                path.display()
            ))
        })?;
        let repository = Self::from_json(raw.as_str())?;
        let user_count = repository.users.read().await.len();
        let residence_count = repository.residences.read().await.len();

        info!(
            path = %path.display(),
            users = user_count,
            residences = residence_count,
            "loaded directory seed"
        );

        Ok(repository)
    }

    /// Inserts or replaces a user profile.
    pub async fn save_user_profile(&self, profile: UserProfile) {
        self.users.write().await.insert(profile.id.clone(), profile);
    }

    /// Inserts or replaces residence settings.
    pub async fn save_residence(&self, residence: ResidenceSettings) -> AppResult<()> {
        validate_time_zone(&residence.id, residence.time_zone.as_str())?;
        self.residences
            .write()
            .await
            .insert(residence.id.clone(), residence);
        Ok(())
    }
}

#[async_trait]
impl UserProfileRepository for InMemoryDirectoryRepository {
    async fn find_user_profile(&self, user_id: &UserId) -> AppResult<Option<UserProfile>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }
}

#[async_trait]
impl ResidenceRepository for InMemoryDirectoryRepository {
    async fn find_residence(
        &self,
        residence_id: &ResidenceId,
    ) -> AppResult<Option<ResidenceSettings>> {
        Ok(self.residences.read().await.get(residence_id).cloned())
    }
}

fn validate_time_zone(residence_id: &ResidenceId, time_zone: &str) -> AppResult<()> {
    time_zone.parse::<Tz>().map(|_| ()).map_err(|error| {
        AppError::Validation(format!(
            "residence '{residence_id}' has unknown time zone '{time_zone}': {error}"
        ))
    })
}

#[cfg(test)]
mod tests;

use std::sync::Arc;

use comensales_core::{AppError, AppResult, ResidenceId};
use comensales_domain::{AccessDecision, ManagementPermission, UserId, UserProfile};
use tracing::info;

use crate::{AuthorizationService, ResidenceRepository, ResidenceSettings, UserProfileRepository};

mod delegation;
mod record_scope;


pub use delegation::{DelegatedAccess, DelegationComposition, OnBehalfCheck};
pub use record_scope::RecordScope;

/// Gate for privileged mutations.
///
/// Loads a fresh actor profile and the residence timezone on every call,
/// runs the evaluators and turns their decisions into record scopes.
#[derive(Clone)]
pub struct AccessGuardService {
    authorization_service: AuthorizationService,
    user_repository: Arc<dyn UserProfileRepository>,
    residence_repository: Arc<dyn ResidenceRepository>,
}

impl AccessGuardService {
    /// Creates a new access guard.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        user_repository: Arc<dyn UserProfileRepository>,
        residence_repository: Arc<dyn ResidenceRepository>,
    ) -> Self {
        Self {
            authorization_service,
            user_repository,
            residence_repository,
        }
    }

    /// Evaluates management access for an actor in a residence.
    pub async fn evaluate_management(
        &self,
        actor_id: &UserId,
        residence_id: &ResidenceId,
        permission: ManagementPermission,
    ) -> AppResult<AccessDecision> {
        let actor = self.load_actor(actor_id).await?;
        let residence = self.load_residence(residence_id).await?;

        Ok(self
            .authorization_service
            .verify_management_permission(
                &actor,
                residence_id,
                permission,
                residence.time_zone.as_str(),
            )
            .await)
    }

    /// Ensures an actor may manage a resource class and returns the record scope.
    pub async fn authorize_management(
        &self,
        actor_id: &UserId,
        residence_id: &ResidenceId,
        permission: ManagementPermission,
    ) -> AppResult<RecordScope> {
        let decision = self
            .evaluate_management(actor_id, residence_id, permission)
            .await?;

        RecordScope::from_decision(decision, actor_id).ok_or_else(|| {
            info!(
                actor_id = %actor_id,
                residence_id = %residence_id,
                permission = permission.as_str(),
                "management access denied"
            );
            AppError::Forbidden(format!(
                "user '{actor_id}' is missing permission '{}' in residence '{residence_id}'",
                permission.as_str()
            ))
        })
    }

    /// Evaluates whether an assistant may act for a specific user.
    ///
    /// When the check names a permission, both evaluators run and their
    /// decisions are combined with the requested composition.
    pub async fn evaluate_on_behalf(&self, check: &OnBehalfCheck) -> AppResult<DelegatedAccess> {
        let actor = self.load_actor(&check.actor_id).await?;
        let residence = self.load_residence(&check.residence_id).await?;
        let time_zone = residence.time_zone.as_str();

        let assisted_user = self
            .authorization_service
            .verify_assisted_user_permission(&actor, &check.assisted_user_id, time_zone)
            .await;

        let management = match check.permission {
            Some(permission) => Some(
                self.authorization_service
                    .verify_management_permission(
                        &actor,
                        &check.residence_id,
                        permission,
                        time_zone,
                    )
                    .await,
            ),
            None => None,
        };

        Ok(DelegatedAccess::combine(
            management,
            assisted_user,
            check.composition,
        ))
    }

    /// Ensures an assistant may act for a specific user and returns the scope
    /// of records it may touch.
    pub async fn authorize_on_behalf(&self, check: &OnBehalfCheck) -> AppResult<RecordScope> {
        let access = self.evaluate_on_behalf(check).await?;

        access
            .record_scope(&check.actor_id, &check.assisted_user_id)
            .ok_or_else(|| {
                info!(
                    actor_id = %check.actor_id,
                    assisted_user_id = %check.assisted_user_id,
                    residence_id = %check.residence_id,
                    "delegated access denied"
                );
                AppError::Forbidden(format!(
                    "user '{}' may not act for user '{}' in residence '{}'",
                    check.actor_id, check.assisted_user_id, check.residence_id
                ))
            })
    }

    async fn load_actor(&self, actor_id: &UserId) -> AppResult<UserProfile> {
        self.user_repository
            .find_user_profile(actor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{actor_id}' does not exist")))
    }

    async fn load_residence(&self, residence_id: &ResidenceId) -> AppResult<ResidenceSettings> {
        self.residence_repository
            .find_residence(residence_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("residence '{residence_id}' does not exist"))
            })
    }
}

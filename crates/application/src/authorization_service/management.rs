use comensales_core::ResidenceId;
use comensales_domain::{
    AccessDecision, ManagementPermission, RuleOutcome, UserProfile, resolve_management_access,
};
use tracing::debug;

use super::AuthorizationService;

impl AuthorizationService {
    /// Decides whether a user may manage a resource class in a residence, and
    /// at which scope.
    ///
    /// `time_zone` is only consulted when an assistant grant is time restricted.
    pub async fn verify_management_permission(
        &self,
        user: &UserProfile,
        residence_id: &ResidenceId,
        permission: ManagementPermission,
        time_zone: &str,
    ) -> AccessDecision {
        let decision = match resolve_management_access(user, residence_id, permission) {
            RuleOutcome::Decided(decision) => decision,
            RuleOutcome::RequiresWindow {
                access_level,
                window,
            } => {
                self.decide_time_restricted_grant(access_level, window, time_zone)
                    .await
            }
        };

        debug!(
            user_id = %user.id,
            residence_id = %residence_id,
            permission = permission.as_str(),
            authorized = decision.is_authorized(),
            level = decision.level().as_str(),
            "evaluated management permission"
        );

        decision
    }
}

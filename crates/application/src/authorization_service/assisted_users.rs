use comensales_domain::{
    AccessDecision, RuleOutcome, UserId, UserProfile, resolve_assisted_user_access,
};
use tracing::debug;

use super::AuthorizationService;

impl AuthorizationService {
    /// Decides whether an assistant may act on behalf of one specific user.
    ///
    /// Resource-class grants play no part in this decision.
    pub async fn verify_assisted_user_permission(
        &self,
        assistant: &UserProfile,
        assisted_user_id: &UserId,
        time_zone: &str,
    ) -> AccessDecision {
        let decision = match resolve_assisted_user_access(assistant, assisted_user_id) {
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
            assistant_id = %assistant.id,
            assisted_user_id = %assisted_user_id,
            authorized = decision.is_authorized(),
            level = decision.level().as_str(),
            "evaluated assisted user permission"
        );

        decision
    }
}

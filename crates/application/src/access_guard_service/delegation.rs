use std::str::FromStr;

use comensales_core::{AppError, ResidenceId};
use comensales_domain::{AccessDecision, AccessLevel, ManagementPermission, UserId};

use super::RecordScope;

/// How resource-class and delegated-user decisions combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DelegationComposition {
    /// Both decisions must authorize. The narrower level wins.
    #[default]
    RequireBoth,
    /// Either decision may authorize. The wider level wins.
    RequireEither,
}

impl DelegationComposition {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequireBoth => "require_both",
            Self::RequireEither => "require_either",
        }
    }

    /// Combines two decisions.
    #[must_use]
    pub fn combine(&self, left: AccessDecision, right: AccessDecision) -> AccessDecision {
        match self {
            Self::RequireBoth => AccessDecision::granted(left.level().min(right.level())),
            Self::RequireEither => AccessDecision::granted(left.level().max(right.level())),
        }
    }
}

impl FromStr for DelegationComposition {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "require_both" => Ok(Self::RequireBoth),
            "require_either" => Ok(Self::RequireEither),
            _ => Err(AppError::Validation(format!(
                "unknown delegation composition '{value}'"
            ))),
        }
    }
}

/// Input for an on-behalf access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnBehalfCheck {
    /// Assistant acting.
    pub actor_id: UserId,
    /// Residence the action targets.
    pub residence_id: ResidenceId,
    /// User the assistant acts for.
    pub assisted_user_id: UserId,
    /// Resource-class permission the action also needs, if any.
    pub permission: Option<ManagementPermission>,
    /// Combination applied when `permission` is present.
    pub composition: DelegationComposition,
}

/// Individual and combined decisions of an on-behalf check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelegatedAccess {
    /// Resource-class decision, when a permission was requested.
    pub management: Option<AccessDecision>,
    /// Delegated-user decision.
    pub assisted_user: AccessDecision,
    /// Combined decision.
    pub decision: AccessDecision,
}

impl DelegatedAccess {
    pub(super) fn combine(
        management: Option<AccessDecision>,
        assisted_user: AccessDecision,
        composition: DelegationComposition,
    ) -> Self {
        let decision = management.map_or(assisted_user, |management| {
            composition.combine(management, assisted_user)
        });

        Self {
            management,
            assisted_user,
            decision,
        }
    }

    /// Maps the combined decision onto the records the actor may touch.
    ///
    /// An `Own` level covers the assisted user's records only when the
    /// delegated-user decision authorizes. Otherwise it comes from the
    /// management decision alone and covers the actor's own records.
    #[must_use]
    pub fn record_scope(
        &self,
        actor_id: &UserId,
        assisted_user_id: &UserId,
    ) -> Option<RecordScope> {
        let owner = match self.decision.level() {
            AccessLevel::Own if !self.assisted_user.is_authorized() => actor_id,
            _ => assisted_user_id,
        };

        RecordScope::from_decision(self.decision, owner)
    }
}

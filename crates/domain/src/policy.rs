//! Synchronous access rules.
//!
//! Every rule is decided here except the time-window check, which needs the
//! residence clock and is left to the caller through
//! [`RuleOutcome::RequiresWindow`].

use comensales_core::ResidenceId;

use crate::{
    AccessDecision, AccessLevel, Grant, GrantWindow, ManagementPermission, Role, UserId,
    UserProfile,
};

/// Result of applying the synchronous access rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome<'a> {
    /// The rules reached a decision.
    Decided(AccessDecision),
    /// An effective, time-restricted grant decides access if its window is open.
    RequiresWindow {
        /// Level conferred while the window is open.
        access_level: AccessLevel,
        /// Stored window bounds.
        window: GrantWindow<'a>,
    },
}

/// Resolves which management access a user has in a residence.
///
/// Rules apply in order and the first match wins: the universal role, then a
/// residence-privileged role in the same residence, then an assistant grant
/// for the permission in the same residence. Anything else is denied.
#[must_use]
pub fn resolve_management_access<'a>(
    user: &'a UserProfile,
    residence_id: &ResidenceId,
    permission: ManagementPermission,
) -> RuleOutcome<'a> {
    if user.has_universal_role() {
        return RuleOutcome::Decided(AccessDecision::granted(AccessLevel::All));
    }

    let same_residence = user.belongs_to(residence_id);

    if user.has_residence_privileged_role() && same_residence {
        return RuleOutcome::Decided(AccessDecision::granted(AccessLevel::All));
    }

    if !user.has_role(Role::Assistant) || !same_residence {
        return RuleOutcome::Decided(AccessDecision::denied());
    }

    user.assistant
        .as_ref()
        .and_then(|assistant| assistant.permission_grant(permission))
        .map_or(RuleOutcome::Decided(AccessDecision::denied()), resolve_grant)
}

/// Resolves whether an assistant may act for one specific user.
///
/// Independent of the management rules: resource-class grants confer nothing
/// here.
#[must_use]
pub fn resolve_assisted_user_access<'a>(
    assistant: &'a UserProfile,
    assisted_user_id: &UserId,
) -> RuleOutcome<'a> {
    if !assistant.has_role(Role::Assistant) {
        return RuleOutcome::Decided(AccessDecision::denied());
    }

    assistant
        .assistant
        .as_ref()
        .and_then(|profile| profile.assisted_user_grant(assisted_user_id))
        .map_or(RuleOutcome::Decided(AccessDecision::denied()), resolve_grant)
}

fn resolve_grant(grant: &Grant) -> RuleOutcome<'_> {
    if !grant.is_effective() {
        return RuleOutcome::Decided(AccessDecision::denied());
    }

    match grant.window() {
        Some(window) => RuleOutcome::RequiresWindow {
            access_level: grant.access_level,
            window,
        },
        None => RuleOutcome::Decided(AccessDecision::granted(grant.access_level)),
    }
}

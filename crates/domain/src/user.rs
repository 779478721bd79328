//! User profile types read by the access evaluators.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use comensales_core::ResidenceId;
use serde::{Deserialize, Serialize};

use crate::{Grant, ManagementPermission, Role};

/// Unique identifier for a user record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user identifier from a stored value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the underlying identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Delegated authority attached to a user holding [`Role::Assistant`].
///
/// Permission grants share one JSON object with the two reserved keys
/// `usuarioAprobador` and `usuariosAsistidos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantProfile {
    /// User who approves this assistant's actions.
    #[serde(rename = "usuarioAprobador", default, skip_serializing_if = "Option::is_none")]
    pub approver: Option<UserId>,
    /// Users this assistant may act for.
    #[serde(rename = "usuariosAsistidos", default, skip_serializing_if = "Option::is_none")]
    pub assisted_users: Option<BTreeMap<UserId, Grant>>,
    /// Resource-class grants keyed by permission.
    #[serde(flatten)]
    pub permissions: BTreeMap<ManagementPermission, Grant>,
}

impl AssistantProfile {
    /// Adds or replaces the grant for a resource-class permission.
    #[must_use]
    pub fn with_permission(mut self, permission: ManagementPermission, grant: Grant) -> Self {
        self.permissions.insert(permission, grant);
        self
    }

    /// Adds or replaces the grant for a specific assisted user.
    #[must_use]
    pub fn with_assisted_user(mut self, user_id: impl Into<UserId>, grant: Grant) -> Self {
        self.assisted_users
            .get_or_insert_with(BTreeMap::new)
            .insert(user_id.into(), grant);
        self
    }

    /// Returns the grant stored for a permission.
    #[must_use]
    pub fn permission_grant(&self, permission: ManagementPermission) -> Option<&Grant> {
        self.permissions.get(&permission)
    }

    /// Returns the grant stored for an assisted user.
    #[must_use]
    pub fn assisted_user_grant(&self, user_id: &UserId) -> Option<&Grant> {
        self.assisted_users.as_ref()?.get(user_id)
    }
}

/// Acting user as read from the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable user id.
    pub id: UserId,
    /// Roles held. A profile stored without roles holds none.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Residence the user belongs to. Absent for universal users.
    #[serde(rename = "residenciaId", default, skip_serializing_if = "Option::is_none")]
    pub residence_id: Option<ResidenceId>,
    /// Delegated authority, for assistants.
    #[serde(rename = "asistente", default, skip_serializing_if = "Option::is_none")]
    pub assistant: Option<AssistantProfile>,
}

impl UserProfile {
    /// Creates a profile with the given roles and no residence.
    #[must_use]
    pub fn new(id: impl Into<UserId>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            id: id.into(),
            roles: roles.into_iter().collect(),
            residence_id: None,
            assistant: None,
        }
    }

    /// Binds the profile to a residence.
    #[must_use]
    pub fn in_residence(mut self, residence_id: impl Into<ResidenceId>) -> Self {
        self.residence_id = Some(residence_id.into());
        self
    }

    /// Attaches an assistant profile.
    #[must_use]
    pub fn with_assistant(mut self, assistant: AssistantProfile) -> Self {
        self.assistant = Some(assistant);
        self
    }

    /// Returns whether the user holds the role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns whether any held role is universal.
    #[must_use]
    pub fn has_universal_role(&self) -> bool {
        self.roles.iter().any(Role::is_universal)
    }

    /// Returns whether any held role is residence privileged.
    #[must_use]
    pub fn has_residence_privileged_role(&self) -> bool {
        self.roles.iter().any(Role::is_residence_privileged)
    }

    /// Returns whether the user belongs to the residence.
    #[must_use]
    pub fn belongs_to(&self, residence_id: &ResidenceId) -> bool {
        self.residence_id.as_ref() == Some(residence_id)
    }
}

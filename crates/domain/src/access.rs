use serde::{Deserialize, Serialize};

/// Scope of records an access decision or grant permits acting upon.
///
/// Variants are ordered from the narrowest to the widest scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    /// No records.
    #[serde(rename = "Ninguna")]
    None,
    /// Only records owned by the acting user.
    #[serde(rename = "Propias")]
    Own,
    /// Every record in scope.
    #[serde(rename = "Todas")]
    All,
}

impl AccessLevel {
    /// Returns a stable storage value for this level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "Ninguna",
            Self::Own => "Propias",
            Self::All => "Todas",
        }
    }

    /// Returns whether the level permits acting on any record at all.
    #[must_use]
    pub fn grants_access(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Outcome of an access evaluation.
///
/// `authorized` is false exactly when `level` is [`AccessLevel::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AccessDecision {
    #[serde(rename = "tieneAcceso")]
    authorized: bool,
    #[serde(rename = "nivelAcceso")]
    level: AccessLevel,
}

impl AccessDecision {
    /// Grants access at the given level. Granting [`AccessLevel::None`] is a denial.
    #[must_use]
    pub fn granted(level: AccessLevel) -> Self {
        Self {
            authorized: level.grants_access(),
            level,
        }
    }

    /// Denies access.
    #[must_use]
    pub fn denied() -> Self {
        Self {
            authorized: false,
            level: AccessLevel::None,
        }
    }

    /// Returns whether the actor may act.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// Returns the granted scope.
    #[must_use]
    pub fn level(&self) -> AccessLevel {
        self.level
    }
}

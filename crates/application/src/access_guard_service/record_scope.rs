use comensales_domain::{AccessDecision, AccessLevel, UserId};

/// Records an authorized actor may read or write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordScope {
    /// Every record in the residence.
    AnyRecord,
    /// Only records owned by the given user.
    OwnedBy(UserId),
}

impl RecordScope {
    /// Maps a decision onto a record filter. Denials map to `None`.
    #[must_use]
    pub fn from_decision(decision: AccessDecision, owner: &UserId) -> Option<Self> {
        match decision.level() {
            AccessLevel::All => Some(Self::AnyRecord),
            AccessLevel::Own => Some(Self::OwnedBy(owner.clone())),
            AccessLevel::None => None,
        }
    }

    /// Returns whether a record owned by `record_owner` is inside the scope.
    #[must_use]
    pub fn permits(&self, record_owner: &UserId) -> bool {
        match self {
            Self::AnyRecord => true,
            Self::OwnedBy(owner) => owner == record_owner,
        }
    }
}

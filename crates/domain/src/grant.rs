use serde::{Deserialize, Serialize};

use crate::AccessLevel;

/// Unit of delegated authority held by an assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Scope granted.
    #[serde(rename = "nivelAcceso")]
    pub access_level: AccessLevel,
    /// Marks the grant as time restricted even when no date is stored.
    #[serde(rename = "restriccionTiempo", default)]
    pub time_restricted: bool,
    /// Window start as a calendar date or RFC 3339 timestamp.
    #[serde(rename = "fechaInicio", default, skip_serializing_if = "Option::is_none")]
    pub starts_on: Option<String>,
    /// Window end as a calendar date or RFC 3339 timestamp.
    #[serde(rename = "fechaFin", default, skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<String>,
}

impl Grant {
    /// Creates a grant without a time restriction.
    #[must_use]
    pub fn permanent(access_level: AccessLevel) -> Self {
        Self {
            access_level,
            time_restricted: false,
            starts_on: None,
            ends_on: None,
        }
    }

    /// Creates a grant valid only between `starts_on` and `ends_on`.
    #[must_use]
    pub fn time_boxed(
        access_level: AccessLevel,
        starts_on: impl Into<String>,
        ends_on: impl Into<String>,
    ) -> Self {
        Self {
            access_level,
            time_restricted: true,
            starts_on: Some(starts_on.into()),
            ends_on: Some(ends_on.into()),
        }
    }

    /// Returns whether the grant confers any access. A `None` grant is no grant.
    #[must_use]
    pub fn is_effective(&self) -> bool {
        self.access_level.grants_access()
    }

    /// Returns whether the grant is only valid inside `starts_on..=ends_on`.
    ///
    /// A stored date restricts the grant whether or not the flag is set.
    #[must_use]
    pub fn is_time_restricted(&self) -> bool {
        self.time_restricted || self.starts_on.is_some() || self.ends_on.is_some()
    }

    /// Returns the window bounds when the grant is time restricted.
    #[must_use]
    pub fn window(&self) -> Option<GrantWindow<'_>> {
        self.is_time_restricted().then(|| GrantWindow {
            starts_on: self.starts_on.as_deref(),
            ends_on: self.ends_on.as_deref(),
        })
    }
}

/// Borrowed validity window of a time-restricted grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantWindow<'a> {
    /// Window start, when stored.
    pub starts_on: Option<&'a str>,
    /// Window end, when stored.
    pub ends_on: Option<&'a str>,
}

/// Result of checking "now" against a grant window in a residence timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeWindowStatus {
    /// Now falls inside the window.
    #[serde(rename = "dentro")]
    Within,
    /// Now falls before the start or after the end.
    #[serde(rename = "fuera")]
    Outside,
    /// The window starts after it ends.
    #[serde(rename = "rango_invalido")]
    InvalidRange,
    /// A bound is missing or cannot be parsed.
    #[serde(rename = "fecha_invalida")]
    MalformedDate,
}

impl TimeWindowStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Within => "dentro",
            Self::Outside => "fuera",
            Self::InvalidRange => "rango_invalido",
            Self::MalformedDate => "fecha_invalida",
        }
    }

    /// Only [`TimeWindowStatus::Within`] validates a grant.
    #[must_use]
    pub fn is_within(&self) -> bool {
        matches!(self, Self::Within)
    }
}

#[cfg(test)]
mod tests {
    use super::{Grant, TimeWindowStatus};
    use crate::AccessLevel;

    #[test]
    fn grant_without_restriction_has_no_window() {
        let grant = Grant::permanent(AccessLevel::Own);
        assert!(grant.window().is_none());
    }

    #[test]
    fn restriction_flag_without_dates_still_yields_a_window() {
        let grant: Grant = serde_json::from_str(
            r#"{"nivelAcceso": "Todas", "restriccionTiempo": true}"#,
        )
        .unwrap_or_else(|_| Grant::permanent(AccessLevel::None));
        let window = grant.window();
        assert!(window.is_some());
        assert_eq!(window.and_then(|value| value.starts_on), None);
    }

    #[test]
    fn stored_dates_restrict_the_grant_without_the_flag() {
        let grant: Grant = serde_json::from_str(
            r#"{"nivelAcceso": "Propias", "fechaInicio": "2020-01-01", "fechaFin": "2020-02-01"}"#,
        )
        .unwrap_or_else(|_| Grant::permanent(AccessLevel::None));

        assert!(!grant.time_restricted);
        assert!(grant.is_time_restricted());
        assert_eq!(
            grant.window().and_then(|window| window.ends_on),
            Some("2020-02-01")
        );
    }

    #[test]
    fn a_single_stored_date_still_restricts_the_grant() {
        let grant = Grant {
            ends_on: Some("2020-02-01".to_owned()),
            ..Grant::permanent(AccessLevel::All)
        };
        assert_eq!(
            grant.window().map(|window| window.starts_on),
            Some(None)
        );
    }

    #[test]
    fn none_grant_is_not_effective() {
        assert!(!Grant::permanent(AccessLevel::None).is_effective());
        assert!(Grant::permanent(AccessLevel::Own).is_effective());
    }

    #[test]
    fn only_within_validates() {
        assert!(TimeWindowStatus::Within.is_within());
        assert!(!TimeWindowStatus::Outside.is_within());
        assert!(!TimeWindowStatus::InvalidRange.is_within());
        assert!(!TimeWindowStatus::MalformedDate.is_within());
    }
}

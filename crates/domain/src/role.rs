use std::str::FromStr;

use comensales_core::AppError;
use serde::{Deserialize, Serialize};

/// Roles a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Universal superuser, not bound to any residence.
    #[serde(rename = "master")]
    Master,
    /// Residence administrator.
    #[serde(rename = "admin")]
    Admin,
    /// Residence director.
    #[serde(rename = "director")]
    Director,
    /// Assistant holding delegated grants inside one residence.
    #[serde(rename = "asistente")]
    Assistant,
    /// Resident of a residence.
    #[serde(rename = "residente")]
    Resident,
    /// Guest of a residence.
    #[serde(rename = "invitado")]
    Guest,
    /// Read-only auditor.
    #[serde(rename = "auditor")]
    Auditor,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Admin => "admin",
            Self::Director => "director",
            Self::Assistant => "asistente",
            Self::Resident => "residente",
            Self::Guest => "invitado",
            Self::Auditor => "auditor",
        }
    }

    /// Returns whether the role grants access to every residence.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        matches!(self, Self::Master)
    }

    /// Returns whether the role grants full management inside its own residence.
    #[must_use]
    pub fn is_residence_privileged(&self) -> bool {
        matches!(self, Self::Admin | Self::Director)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "master" => Ok(Self::Master),
            "admin" => Ok(Self::Admin),
            "director" => Ok(Self::Director),
            "asistente" => Ok(Self::Assistant),
            "residente" => Ok(Self::Resident),
            "invitado" => Ok(Self::Guest),
            "auditor" => Ok(Self::Auditor),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

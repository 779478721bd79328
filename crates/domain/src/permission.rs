use std::str::FromStr;

use comensales_core::AppError;
use serde::{Deserialize, Serialize};

/// Resource-class permissions that can be delegated to an assistant.
///
/// The assistant profile also carries the approver reference and the
/// assisted-users map under their own keys. Those are modelled as separate
/// fields of [`crate::AssistantProfile`] and are never parsed as a
/// management permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ManagementPermission {
    /// Allows managing dining halls.
    #[serde(rename = "gestionComedores")]
    DiningHalls,
    /// Allows managing meal schedules and schedule alterations.
    #[serde(rename = "gestionHorariosYAlteraciones")]
    SchedulesAndAlterations,
    /// Allows managing diets.
    #[serde(rename = "gestionDietas")]
    Diets,
    /// Allows managing residence activities.
    #[serde(rename = "gestionActividades")]
    Activities,
    /// Allows managing residence services.
    #[serde(rename = "gestionServicios")]
    Services,
    /// Allows managing residence users.
    #[serde(rename = "gestionUsuarios")]
    Users,
    /// Allows managing other assistants.
    #[serde(rename = "gestionAsistentes")]
    Assistants,
    /// Allows managing special attentions.
    #[serde(rename = "gestionAtenciones")]
    Attentions,
    /// Allows managing user groups.
    #[serde(rename = "gestionGrupos")]
    Groups,
    /// Allows requesting diner counts from the kitchen.
    #[serde(rename = "solicitarComensales")]
    DinerRequests,
}

impl ManagementPermission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DiningHalls => "gestionComedores",
            Self::SchedulesAndAlterations => "gestionHorariosYAlteraciones",
            Self::Diets => "gestionDietas",
            Self::Activities => "gestionActividades",
            Self::Services => "gestionServicios",
            Self::Users => "gestionUsuarios",
            Self::Assistants => "gestionAsistentes",
            Self::Attentions => "gestionAtenciones",
            Self::Groups => "gestionGrupos",
            Self::DinerRequests => "solicitarComensales",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ManagementPermission] = &[
            ManagementPermission::DiningHalls,
            ManagementPermission::SchedulesAndAlterations,
            ManagementPermission::Diets,
            ManagementPermission::Activities,
            ManagementPermission::Services,
            ManagementPermission::Users,
            ManagementPermission::Assistants,
            ManagementPermission::Attentions,
            ManagementPermission::Groups,
            ManagementPermission::DinerRequests,
        ];

        ALL
    }

    /// Parses a transport value into a permission.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for ManagementPermission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| {
                AppError::Validation(format!("unknown management permission '{value}'"))
            })
    }
}

use comensales_application::{DelegatedAccess, DelegationComposition};
use comensales_domain::AccessDecision;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Incoming payload for a management permission check.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/management-access-request.ts"
)]
pub struct ManagementAccessRequest {
    pub actor_id: String,
    pub residence_id: String,
    pub permission: String,
}

/// Incoming payload for an on-behalf permission check.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assisted-user-access-request.ts"
)]
pub struct AssistedUserAccessRequest {
    pub actor_id: String,
    pub residence_id: String,
    pub assisted_user_id: String,
    #[ts(optional)]
    pub permission: Option<String>,
    #[ts(optional)]
    pub composition: Option<String>,
}

/// API representation of an access decision.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-decision-response.ts"
)]
pub struct AccessDecisionResponse {
    #[serde(rename = "tieneAcceso")]
    pub authorized: bool,
    #[serde(rename = "nivelAcceso")]
    pub level: String,
}

impl From<AccessDecision> for AccessDecisionResponse {
    fn from(value: AccessDecision) -> Self {
        Self {
            authorized: value.is_authorized(),
            level: value.level().as_str().to_owned(),
        }
    }
}

/// API representation of an on-behalf decision.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delegated-access-response.ts"
)]
pub struct DelegatedAccessResponse {
    pub management: Option<AccessDecisionResponse>,
    pub assisted_user: AccessDecisionResponse,
    pub decision: AccessDecisionResponse,
    pub composition: String,
}

impl DelegatedAccessResponse {
    pub fn new(access: DelegatedAccess, composition: DelegationComposition) -> Self {
        Self {
            management: access.management.map(AccessDecisionResponse::from),
            assisted_user: AccessDecisionResponse::from(access.assisted_user),
            decision: AccessDecisionResponse::from(access.decision),
            composition: composition.as_str().to_owned(),
        }
    }
}

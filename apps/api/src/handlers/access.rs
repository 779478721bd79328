use axum::Json;
use axum::extract::State;
use comensales_application::{DelegationComposition, OnBehalfCheck};
use comensales_core::ResidenceId;
use comensales_domain::{ManagementPermission, UserId};

use crate::dto::{
    AccessDecisionResponse, AssistedUserAccessRequest, DelegatedAccessResponse,
    ManagementAccessRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn management_access_handler(
    State(state): State<AppState>,
    Json(payload): Json<ManagementAccessRequest>,
) -> ApiResult<Json<AccessDecisionResponse>> {
    let permission = ManagementPermission::from_transport(payload.permission.as_str())?;

    let decision = state
        .access_guard_service
        .evaluate_management(
            &UserId::new(payload.actor_id),
            &ResidenceId::new(payload.residence_id),
            permission,
        )
        .await?;

    Ok(Json(AccessDecisionResponse::from(decision)))
}

pub async fn assisted_user_access_handler(
    State(state): State<AppState>,
    Json(payload): Json<AssistedUserAccessRequest>,
) -> ApiResult<Json<DelegatedAccessResponse>> {
    let permission = payload
        .permission
        .as_deref()
        .map(ManagementPermission::from_transport)
        .transpose()?;
    let composition = payload
        .composition
        .as_deref()
        .map(str::parse::<DelegationComposition>)
        .transpose()?
        .unwrap_or_default();

    let check = OnBehalfCheck {
        actor_id: UserId::new(payload.actor_id),
        residence_id: ResidenceId::new(payload.residence_id),
        assisted_user_id: UserId::new(payload.assisted_user_id),
        permission,
        composition,
    };
    let access = state.access_guard_service.evaluate_on_behalf(&check).await?;

    Ok(Json(DelegatedAccessResponse::new(access, composition)))
}

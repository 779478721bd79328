use std::sync::Arc;

use chrono::{TimeZone, Utc};
use comensales_application::{
    AccessGuardService, AuthorizationService, ResidenceRepository, ResidenceSettings,
    UserProfileRepository,
};
use comensales_core::{AppError, ResidenceId};
use comensales_domain::{
    AccessDecision, AccessLevel, ManagementPermission, Role, UserId, UserProfile,
};

use super::InMemoryDirectoryRepository;
use crate::{FixedClock, ResidenceTimeWindowValidator};

const SEED: &str = r#"{
    "residences": [
        {"id": "R1", "zonaHoraria": "Europe/Madrid"},
        {"id": "R2", "zonaHoraria": "America/Mexico_City"}
    ],
    "users": [
        {"id": "master-1", "roles": ["master"]},
        {"id": "director-1", "roles": ["director"], "residenciaId": "R1"},
        {
            "id": "asistente-1",
            "roles": ["asistente"],
            "residenciaId": "R1",
            "asistente": {
                "gestionComedores": {"nivelAcceso": "Propias"}
            }
        },
        {
            "id": "asistente-2",
            "roles": ["asistente"],
            "residenciaId": "R1",
            "asistente": {
                "gestionComedores": {
                    "nivelAcceso": "Propias",
                    "restriccionTiempo": true,
                    "fechaInicio": "2026-01-01",
                    "fechaFin": "2026-03-31"
                }
            }
        },
        {
            "id": "asistente-3",
            "roles": ["asistente"],
            "residenciaId": "R1",
            "asistente": {
                "gestionComedores": {
                    "nivelAcceso": "Propias",
                    "fechaInicio": "2020-01-01",
                    "fechaFin": "2020-02-01"
                }
            }
        }
    ]
}"#;

fn guard_at_mid_october() -> AccessGuardService {
    let directory = match InMemoryDirectoryRepository::from_json(SEED) {
        Ok(directory) => Arc::new(directory),
        Err(error) => panic!("seed should load: {error}"),
    };
    let now = Utc
        .with_ymd_and_hms(2026, 10, 14, 10, 0, 0)
        .single()
        .unwrap_or_default();
    let validator = Arc::new(ResidenceTimeWindowValidator::new(FixedClock::new(now)));

    AccessGuardService::new(
        AuthorizationService::new(validator),
        directory.clone(),
        directory,
    )
}

async fn management(actor: &str, residence: &str) -> Option<AccessDecision> {
    guard_at_mid_october()
        .evaluate_management(
            &UserId::new(actor),
            &ResidenceId::new(residence),
            ManagementPermission::DiningHalls,
        )
        .await
        .ok()
}

#[tokio::test]
async fn master_manages_any_residence() {
    assert_eq!(
        management("master-1", "R2").await,
        Some(AccessDecision::granted(AccessLevel::All))
    );
}

#[tokio::test]
async fn director_is_denied_outside_own_residence() {
    assert_eq!(
        management("director-1", "R2").await,
        Some(AccessDecision::denied())
    );
}

#[tokio::test]
async fn assistant_permanent_grant_yields_own_records() {
    assert_eq!(
        management("asistente-1", "R1").await,
        Some(AccessDecision::granted(AccessLevel::Own))
    );
}

#[tokio::test]
async fn assistant_elapsed_grant_is_denied() {
    assert_eq!(
        management("asistente-2", "R1").await,
        Some(AccessDecision::denied())
    );
}

#[tokio::test]
async fn assistant_dated_grant_without_flag_is_denied_once_elapsed() {
    assert_eq!(
        management("asistente-3", "R1").await,
        Some(AccessDecision::denied())
    );
}

#[tokio::test]
async fn seeded_profiles_and_residences_are_readable() {
    let Ok(directory) = InMemoryDirectoryRepository::from_json(SEED) else {
        panic!("seed should load");
    };

    let director = directory
        .find_user_profile(&UserId::new("director-1"))
        .await
        .ok()
        .flatten();
    let residence = directory
        .find_residence(&ResidenceId::new("R2"))
        .await
        .ok()
        .flatten();

    assert_eq!(
        director.map(|profile| profile.roles),
        Some(vec![Role::Director])
    );
    assert_eq!(
        residence.map(|settings| settings.time_zone),
        Some("America/Mexico_City".to_owned())
    );
}

#[tokio::test]
async fn saved_profiles_replace_previous_versions() {
    let directory = InMemoryDirectoryRepository::new();
    directory
        .save_user_profile(UserProfile::new("u1", [Role::Resident]))
        .await;
    directory
        .save_user_profile(UserProfile::new("u1", [Role::Admin]).in_residence("R1"))
        .await;

    let profile = directory
        .find_user_profile(&UserId::new("u1"))
        .await
        .ok()
        .flatten();

    assert_eq!(profile.map(|value| value.roles), Some(vec![Role::Admin]));
}

#[tokio::test]
async fn residence_with_unknown_time_zone_is_rejected() {
    let directory = InMemoryDirectoryRepository::new();

    let result = directory
        .save_residence(ResidenceSettings {
            id: ResidenceId::new("R3"),
            time_zone: "Europe/Atlantis".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn duplicate_seed_entries_conflict() {
    let raw = r#"{"users": [{"id": "u1"}, {"id": "u1"}]}"#;
    let result = InMemoryDirectoryRepository::from_json(raw);
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[test]
fn malformed_seed_is_a_validation_error() {
    let result = InMemoryDirectoryRepository::from_json(r#"{"users": [{"roles": []}]}"#);
    assert!(matches!(result, Err(AppError::Validation(_))));
}

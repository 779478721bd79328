use std::sync::Arc;

use comensales_application::{
    AccessGuardService, AuthorizationService, ResidenceRepository, TimeWindowValidator,
    UserProfileRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_guard_service: AccessGuardService,
    pub service_secret: String,
}

impl AppState {
    pub fn build<D>(
        directory: Arc<D>,
        time_window_validator: Arc<dyn TimeWindowValidator>,
        service_secret: String,
    ) -> Self
    where
        D: UserProfileRepository + ResidenceRepository + 'static,
    {
        let authorization_service = AuthorizationService::new(time_window_validator);
        let access_guard_service =
            AccessGuardService::new(authorization_service, directory.clone(), directory);

        Self {
            access_guard_service,
            service_secret,
        }
    }
}

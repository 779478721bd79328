//! Application services and ports.

#![forbid(unsafe_code)]

mod access_guard_service;
mod access_ports;
mod authorization_service;

pub use access_guard_service::{
    AccessGuardService, DelegatedAccess, DelegationComposition, OnBehalfCheck, RecordScope,
};
pub use access_ports::{
    ResidenceRepository, ResidenceSettings, TimeWindowValidator, UserProfileRepository,
};
pub use authorization_service::AuthorizationService;

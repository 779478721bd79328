//! Domain entities and access rules.

#![forbid(unsafe_code)]

mod access;
mod grant;
mod permission;
mod policy;
mod role;
mod user;

pub use access::{AccessDecision, AccessLevel};
pub use grant::{Grant, GrantWindow, TimeWindowStatus};
pub use permission::ManagementPermission;
pub use policy::{RuleOutcome, resolve_assisted_user_access, resolve_management_access};
pub use role::Role;
pub use user::{AssistantProfile, UserId, UserProfile};

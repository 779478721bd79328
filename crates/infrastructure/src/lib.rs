//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod clock;
mod in_memory_directory_repository;
mod residence_time_window_validator;

pub use clock::{Clock, FixedClock, SystemClock};
pub use in_memory_directory_repository::{DirectorySeed, InMemoryDirectoryRepository, ResidenceSeed};
pub use residence_time_window_validator::{ResidenceTimeWindowValidator, window_status_at};

//! Study session orchestration.

pub mod controller;
pub mod snapshot;

pub use controller::StudySessionController;
pub use snapshot::SessionSnapshot;

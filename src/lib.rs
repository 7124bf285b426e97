pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod optimizer;
pub mod reports;
pub mod rotation;
pub mod scorer;
// cmd is a binary module (in main.rs); everything else is library surface
// so the integration tests and the bench harness can drive it directly.

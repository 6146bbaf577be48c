//! Wire payloads of the three panels, with their OpenAPI schemas.

pub mod health;
pub mod lenient;
pub mod overlay;
pub mod schedule;
pub mod scoreboard;

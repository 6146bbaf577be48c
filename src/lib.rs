//! Library crate for the broadcaster control panels, exposing modules for the
//! panel binaries and integration tests.

pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;

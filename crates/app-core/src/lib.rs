//! Shared infrastructure for the devconnector services.

pub mod config;
pub mod error;
pub mod extractors;
pub mod github;
pub mod jwt;
pub mod middleware;
pub mod rejection;
pub mod response;

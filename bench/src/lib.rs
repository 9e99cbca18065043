pub mod address;
pub mod config;
pub mod error;
pub mod readiness;
pub mod runner;
pub mod submit;

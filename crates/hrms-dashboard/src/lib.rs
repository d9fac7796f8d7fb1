//! Client side of the HRMS dashboard: records, filters, the approved-leave
//! calendar, form validation, session handling and the REST client that keeps
//! a local cache in step with the backend.

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod records;
pub mod telemetry;

//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into caller-level flows.
//! - Keep callers decoupled from SQL and repository wiring.

pub mod tracker_service;

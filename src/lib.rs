//! HomieHQ Checklist - Seasonal home maintenance checklist engine
//!
//! Loads a property's checklist for a season, derives completion stats, and
//! applies edits optimistically against the HomieHQ REST backend, rolling
//! back to server truth when a request fails.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

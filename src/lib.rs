//! Linklet - a small URL shortener engine
//!
//! This library provides the core functionality for the Linklet service:
//! short-code allocation, redirect resolution with click accounting, and
//! paginated usage statistics.
//!
//! # Architecture
//! - `storage`: SeaORM-backed link store (uniqueness, atomic counters)
//! - `services`: business logic (creation, resolution, stats)
//! - `api`: HTTP handlers and CSRF middleware
//! - `config`: configuration management
//! - `utils`: short code generation and URL validation

pub mod api;
pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;

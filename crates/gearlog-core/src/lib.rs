//! gearlog-core - Core library for Gearlog
//!
//! This crate contains the shared models, storage layer, offline inspection
//! queue, and sync engine used by all Gearlog interfaces (desktop, CLI).

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod offline;
pub mod remote;
pub mod report;
pub mod services;
pub mod util;

pub use error::{Error, Result};
pub use models::{Equipment, EquipmentId, InspectionPayload, QueuedInspection};

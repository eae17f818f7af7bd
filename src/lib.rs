// src/lib.rs
//! Учёт хранения и утилизации образцов: зоны, ячейки, реестр образцов.

pub mod config;
pub mod console;
pub mod error;
pub mod import_export;
pub mod models;
pub mod notification;
pub mod report;
pub mod repositories;
pub mod selection;
pub mod timestamp;
pub mod validator;
pub mod workstation;

pub use config::{load_config, Config};
pub use error::{StorageError, StorageResult};
pub use models::{Item, ItemId, ItemStatus, Location, WorkMode, Zone, ZoneName};
pub use workstation::Workstation;

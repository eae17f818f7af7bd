// src/error.rs
//! Ошибки доменной модели хранилища.
//!
//! Все ошибки здесь — ожидаемые результаты валидации, а не сбои:
//! операция либо полностью выполняется, либо не меняет состояние.

use crate::models::{ItemId, ZoneName};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Please scan or enter a barcode.")]
    EmptyBarcode,

    #[error("Invalid location '{0}' (expected format: A-01)")]
    InvalidLocation(String),

    #[error("Invalid zone name '{0}': use one or two letters (A-Z)")]
    InvalidZoneName(String),

    #[error("Zone name '{0}' already exists")]
    DuplicateZoneName(String),

    #[error("Zone '{0}' not found")]
    ZoneNotFound(String),

    #[error("At most {max} zones can be created")]
    MaxZonesExceeded { max: usize },

    #[error("At least one zone must remain")]
    LastZone,

    #[error("Zone {zone} still holds {stored} stored specimen(s) and cannot be deleted")]
    ZoneNotEmpty { zone: ZoneName, stored: usize },

    #[error("Slot count must be between {min} and {max} (got {value})")]
    SlotCountOutOfRange { value: u32, min: u8, max: u8 },

    #[error("Specimens are stored from slot {} onward in zone {zone}; the range cannot be reduced to {new_count}", .new_count + 1)]
    RangeOccupied { zone: ZoneName, new_count: u8 },

    #[error("This action is only available in {expected} mode")]
    WrongMode { expected: &'static str },

    #[error("Specimen #{id} is not stored at {location}")]
    ItemNotSelectable { id: ItemId, location: String },

    #[error("No specimens selected for disposal")]
    EmptySelection,

    #[error("Export failed: {0}")]
    Export(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<csv::Error> for StorageError {
    fn from(err: csv::Error) -> Self {
        StorageError::Export(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Export(err.to_string())
    }
}

// Конструкторы для частых случаев
impl StorageError {
    pub fn zone_not_found(name: impl AsRef<str>) -> Self {
        StorageError::ZoneNotFound(name.as_ref().to_string())
    }

    pub fn invalid_location(raw: impl AsRef<str>) -> Self {
        StorageError::InvalidLocation(raw.as_ref().to_string())
    }

    pub fn invalid_zone_name(raw: impl AsRef<str>) -> Self {
        StorageError::InvalidZoneName(raw.as_ref().to_string())
    }

    pub fn slot_count_out_of_range(value: u32) -> Self {
        StorageError::SlotCountOutOfRange {
            value,
            min: crate::models::MIN_SLOT,
            max: crate::models::MAX_SLOT,
        }
    }

    /// Ошибка отказа в действии: состояние гарантированно не изменилось
    pub fn is_rejection(&self) -> bool {
        !matches!(self, StorageError::Export(_))
    }
}

// src/models/location.rs
//! Имена зон и адреса ячеек хранения ("A-01").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StorageError;
use crate::validator::FieldValidator;

pub const MIN_SLOT: u8 = 1;
pub const MAX_SLOT: u8 = 99;

// ==================== ZONE NAME ====================

/// Имя зоны: одна или две заглавные латинские буквы
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneName(String);

impl ZoneName {
    /// Буква по порядковому номеру: 0 -> A, 25 -> Z
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= 26 {
            return None;
        }
        Some(ZoneName(char::from(b'A' + index as u8).to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ZoneName {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldValidator::zone_name(s)
            .map(ZoneName)
            .map_err(|_| StorageError::invalid_zone_name(s))
    }
}

impl TryFrom<String> for ZoneName {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ZoneName> for String {
    fn from(name: ZoneName) -> Self {
        name.0
    }
}

impl AsRef<str> for ZoneName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ==================== LOCATION ====================

/// Конкретная ячейка: зона + номер 01..99
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location {
    zone: ZoneName,
    slot: u8,
}

impl Location {
    pub fn new(zone: ZoneName, slot: u8) -> Result<Self, StorageError> {
        FieldValidator::slot(slot)
            .map_err(|_| StorageError::invalid_location(format!("{}-{:02}", zone, slot)))?;
        Ok(Self { zone, slot })
    }

    /// Первая ячейка зоны
    pub fn first_in(zone: ZoneName) -> Self {
        Self { zone, slot: MIN_SLOT }
    }

    pub fn zone(&self) -> &ZoneName {
        &self.zone
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn is_in_zone(&self, zone: &ZoneName) -> bool {
        &self.zone == zone
    }

    /// Та же ячейка в переименованной зоне
    pub fn with_zone(&self, zone: ZoneName) -> Self {
        Self { zone, slot: self.slot }
    }
}

impl FromStr for Location {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (zone, slot) =
            FieldValidator::location(s).map_err(|_| StorageError::invalid_location(s))?;
        Ok(Self { zone: ZoneName(zone), slot })
    }
}

impl TryFrom<String> for Location {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.zone, self.slot)
    }
}

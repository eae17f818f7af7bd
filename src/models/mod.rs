// src/models/mod.rs

// 1. Объявляем модули
pub mod item;
pub mod location;
pub mod zone;

// 2. Ре-экспортируем содержимое, чтобы структуры были доступны как crate::models::StructName
pub use item::*;
pub use location::*;
pub use zone::*;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

// ==================== COMMON / SHARED ====================

/// Режим работы станции: приём на хранение или утилизация
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum WorkMode {
    #[default]
    Storage,
    Disposal,
}

// src/repositories/mod.rs
//! Хранилища состояния в памяти: образцы и зоны.
//!
//! Реестры владеют своими данными; зависимость зон от образцов передаётся
//! явно ссылкой в операции, глобального состояния нет.

pub mod items;
pub mod zones;

pub use items::ItemRegistry;
pub use zones::{ZoneRegistry, DEFAULT_SLOT_COUNT, MAX_ZONES};

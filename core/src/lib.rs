pub mod classify;
pub mod loader;
pub mod query;
pub mod record;

pub use record::{StyleTag, Sweetness, WineCatalog, WineRecord};

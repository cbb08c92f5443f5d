pub mod chat;
pub mod holding;
pub mod settings;
pub mod stock;
pub mod summary;

pub mod class_entry;
pub mod constants;
pub mod context;
pub mod error;
pub mod registry;

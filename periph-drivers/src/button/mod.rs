//! Pushbutton drivers

pub mod manager;

pub use manager::{ButtonId, ButtonManager, PressHandler, RegisterError, DEFAULT_CAPACITY};

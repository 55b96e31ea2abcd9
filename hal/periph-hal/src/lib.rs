//! Periph Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the Periph drivers
//! are written against. Chip-specific HALs (STM32 via embassy, host mocks in
//! tests, etc.) implement them so the same driver code runs everywhere.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (periph-firmware, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  periph-drivers (buttons, sensors)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  periph-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  periph-hal-  │
//!             │     stm32     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`], [`gpio::OutputPin`] - Digital I/O
//! - [`time::Clock`] - Millisecond tick source
//! - [`capture::CaptureTimer`] - Timer input-capture channel

#![no_std]
#![deny(unsafe_code)]

pub mod capture;
pub mod gpio;
pub mod time;

// Re-export key traits at crate root for convenience
pub use capture::{CaptureEdge, CaptureTimer};
pub use gpio::{ActiveLevel, InputPin, OutputPin};
pub use time::{elapsed_ms, Clock, Millis};

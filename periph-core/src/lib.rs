//! Board-agnostic core logic for the Periph drivers
//!
//! This crate contains all logic that does not depend on specific hardware:
//!
//! - Button press classification state machine
//! - Button timing and wiring configuration types
//! - Sensor frame decoding (DHT22, HC-SR04)
//! - Logging macros shared by the driver crates

#![no_std]
#![deny(unsafe_code)]

pub mod fmt;

pub mod button;
pub mod config;
pub mod sensor;

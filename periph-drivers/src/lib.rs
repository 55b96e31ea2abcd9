//! Hardware driver implementations
//!
//! Drivers in this crate sit on the traits of `periph-hal` and the logic of
//! `periph-core`:
//!
//! - Button manager (bounded registry of debounced, classified buttons)
//! - DHT22 humidity/temperature sensor
//! - HC-SR04 ultrasonic rangefinder

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod sensor;

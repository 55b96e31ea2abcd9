//! STM32 HAL for the Periph drivers
//!
//! Thin wrappers that let embassy-stm32 peripherals stand in for the
//! `periph-hal` traits:
//!
//! - [`gpio::Stm32Input`] / [`gpio::Stm32Output`] for button and trigger pins
//! - [`time::EmbassyClock`] for the millisecond tick
//! - [`capture::Stm32Capture`] for timer input capture (HC-SR04 echo)
//!
//! # Features
//!
//! - `stm32f103c8` - STM32F103C8 ("blue pill")
//! - `stm32f401cc` - STM32F401CC ("black pill")
//! - `defmt` - Enable debug formatting support
//!
//! Clock trees and pin modes are configured with embassy-stm32 directly;
//! this crate only adapts the configured peripherals.

#![no_std]
#![deny(unsafe_code)]

pub mod capture;
pub mod gpio;
pub mod time;

pub use capture::Stm32Capture;
pub use gpio::{Stm32Input, Stm32Output};
pub use time::EmbassyClock;

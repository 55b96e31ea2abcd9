//! Sensor drivers

pub mod dht22;
pub mod hcsr04;

pub use dht22::{Dht22, FrameSource};
pub use hcsr04::HcSr04;

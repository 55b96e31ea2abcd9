//! Button press classification
//!
//! Each button runs its own small state machine, stepped once per polling
//! tick with the raw pin reading and the current time. The
//! machine decides when a press is real, how long it lasted and, in Toggle
//! mode, whether it was half of a double-click.

pub mod events;
pub mod machine;

pub use events::{ButtonMode, InvalidMode, PressEvent};
pub use machine::{ButtonMachine, ButtonState};

//! Interfaces to the devices around the decision logic
//!
//! Keypad scanning, camera control and GPIO toggling live in drivers outside
//! this crate. These traits are the seams those drivers plug into.

pub mod actuator;
pub mod camera;
pub mod keypad;

pub use actuator::{CloseDirective, LockActuator, RecordingActuator, WriterActuator};
pub use camera::{evidence_key, CommandCamera, EvidenceCamera};
pub use keypad::{capture_credential, KeystrokeSource};

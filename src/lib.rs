//! twistmap - Map banks of MIDI rotary encoders to typed parameters
//!
//! Decodes control-change events from a bank-switching encoder surface
//! (four banks of sixteen encoders with push and side buttons) and applies
//! them to typed, range-bounded parameters: absolute or relative turns on
//! floats, clamped stepping on ints, press-toggles on bools, and
//! push-to-midpoint resets.

pub mod config;
pub mod midi;
pub mod params;
pub mod router;

pub use config::TwistmapConfig;
pub use params::{ParamStore, ParamValue};
pub use router::Router;

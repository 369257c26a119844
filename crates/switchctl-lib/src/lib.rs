//! switchctl — turn smart plugs on and off by name.
//!
//! Normalizes a device name and a desired state, then hands both to an
//! external device-control program that owns discovery, the device registry
//! and the vendor protocols.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod name;
pub mod state;
pub mod usage;

pub use error::SwitchError;

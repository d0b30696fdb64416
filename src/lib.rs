#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`CurrentTier`**: The debounced USB-C current budget advertised by the upstream host (Standard / 1.5 A / 3.0 A)
//! - **`CcDetector`**: Samples the two CC-line voltages and classifies them into a `CurrentTier`
//! - **`PowerSequencer`**: Drives the two-stage matrix power switch and the status indicators
//! - **`BrightnessPolicy`**: Maps an accepted tier to the maximum safe global brightness
//! - **`TouchFilter`**: Exponential low-pass filter over one capacitive touch channel
//! - **`MatrixController`**: The fixed-period control loop tying detection, sequencing, brightness and touch together
//! - **`CcSense` / `TouchSense` / `PowerPins` / `PixelSink` / `Console`**: Traits to implement for your hardware
//!
//! Colors cross the public API as `palette::Srgb<u8>`; brightness is a 0-255
//! global ceiling the pixel sink applies when serializing a frame. Timed
//! waits go through `embedded_hal::delay::DelayNs`, so the loop runs against
//! real hardware timers and against a mock delay in tests alike.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod types;
pub mod detector;
pub mod power;
pub mod brightness;
pub mod touch;
pub mod controller;
pub mod colors;

pub use brightness::BrightnessPolicy;
pub use controller::{Console, MatrixController, PixelSink, TierPoll};
pub use detector::{CcDetector, CcSense, classify_cc_volts};
pub use power::{PowerPins, PowerSequencer};
pub use touch::{TouchFilter, TouchSense};
pub use types::{CurrentTier, PolicyError};

pub const COLOR_OFF: Srgb<u8> = Srgb::new(0, 0, 0);

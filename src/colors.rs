//! Display color constants.
//!
//! The touch pads select from a fixed palette; the sink receives plain
//! 8-bit `Srgb` values and applies the global brightness ceiling itself.

use palette::Srgb;

/// Color selected by touch pad 0.
pub const WHITE: Srgb<u8> = Srgb::new(255, 255, 255);

/// Color selected by touch pad 1.
pub const RED: Srgb<u8> = Srgb::new(255, 0, 0);

/// Color selected by touch pad 2.
pub const BLUE: Srgb<u8> = Srgb::new(0, 0, 255);

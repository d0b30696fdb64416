//! Tier-to-brightness mapping that keeps worst-case draw inside the budget.

use crate::types::{CurrentTier, PolicyError};

/// Number of addressable elements in the matrix.
pub const LED_COUNT: u16 = 64;

/// Worst-case draw of one element at full white, in milliamps.
pub const PER_LED_MAX_MA: u32 = 60;

/// Current reserved for non-LED system draw, in milliamps.
pub const IDLE_RESERVE_MA: u32 = 100;

/// Maps an accepted current tier to the maximum safe global brightness.
///
/// The ceiling is the fraction of full-scale draw that fits in the
/// advertised budget once the idle reserve is subtracted:
///
/// ```text
/// (advertised_ma - idle_reserve_ma) / (led_count * per_led_max_ma)
/// ```
///
/// scaled to the 0-255 output range. Pure function of the tier; no side
/// effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessPolicy {
    led_count: u16,
    per_led_max_ma: u32,
    idle_reserve_ma: u32,
}

impl Default for BrightnessPolicy {
    /// The build-time matrix configuration.
    fn default() -> Self {
        Self {
            led_count: LED_COUNT,
            per_led_max_ma: PER_LED_MAX_MA,
            idle_reserve_ma: IDLE_RESERVE_MA,
        }
    }
}

impl BrightnessPolicy {
    /// Creates a policy for a matrix of `led_count` elements.
    ///
    /// # Errors
    /// * `ZeroLedCount` - `led_count` is zero
    /// * `ZeroPerLedDraw` - `per_led_max_ma` is zero
    pub fn new(
        led_count: u16,
        per_led_max_ma: u32,
        idle_reserve_ma: u32,
    ) -> Result<Self, PolicyError> {
        if led_count == 0 {
            return Err(PolicyError::ZeroLedCount);
        }

        if per_led_max_ma == 0 {
            return Err(PolicyError::ZeroPerLedDraw);
        }

        Ok(Self {
            led_count,
            per_led_max_ma,
            idle_reserve_ma,
        })
    }

    /// Returns the number of addressable elements this policy budgets for.
    pub fn led_count(&self) -> u16 {
        self.led_count
    }

    /// Maximum global brightness (0-255) guaranteed safe at `tier`.
    ///
    /// `Standard` returns 0 — the matrix is depowered at that tier rather
    /// than budgeted. The result is truncated, never rounded up, so
    /// `(brightness / 255) * led_count * per_led_max_ma + idle_reserve_ma`
    /// stays at or below the advertised current. Saturates to 0 when the
    /// idle reserve exceeds the advertisement.
    pub fn max_brightness(&self, tier: CurrentTier) -> u8 {
        if tier == CurrentTier::Standard {
            return 0;
        }

        let headroom_ma = tier.advertised_ma().saturating_sub(self.idle_reserve_ma);
        let full_scale_ma = u32::from(self.led_count) * self.per_led_max_ma;
        let fraction = (headroom_ma as f32 / full_scale_ma as f32).clamp(0.0, 1.0);

        (fraction * 255.0) as u8
    }
}

//! Two-stage power sequencing for the LED matrix rail.
//!
//! The matrix is fed through a two-stage switch network: stage 1 is
//! current-limited and charges the matrix input capacitance within the
//! inrush budget; stage 2 then bypasses the limit to cut switch resistance.
//! [`PowerSequencer`] owns the ordering and the data-line hold that keeps
//! the first LED in the chain from latching up on an undefined logic level.

use embedded_hal::delay::DelayNs;

use crate::types::CurrentTier;

/// Trait for abstracting the discrete power-control outputs.
///
/// Implement this for your GPIO. All methods are plain digital writes; the
/// sequencer supplies the ordering and timing.
pub trait PowerPins {
    /// Drives the matrix data line low while `hold` is true.
    fn set_data_hold(&mut self, hold: bool);

    /// Stage 1 switch enable (current-limited path).
    fn set_stage1(&mut self, enabled: bool);

    /// Stage 2 switch enable (low-resistance bypass path).
    fn set_stage2(&mut self, enabled: bool);

    /// Status indicator outputs: `(low-tier LED, high-tier LED)`.
    fn set_indicators(&mut self, low: bool, high: bool);
}

/// Settle time between stage 1 and stage 2, letting the matrix input
/// capacitance charge through the current-limited path.
pub const INRUSH_SETTLE_MS: u32 = 50;

/// Sequences the two-stage matrix power switch and the status indicators.
///
/// `enable()` and `disable()` are idempotent; the sequencer tracks whether
/// the rail is up and only ever walks the stages on an actual transition.
/// Both calls block for their settle delays — the timing is part of the
/// electrical contract, not something to overlap with other work.
pub struct PowerSequencer<P: PowerPins> {
    pins: P,
    powered: bool,
}

impl<P: PowerPins> PowerSequencer<P> {
    /// Creates a sequencer and drives every output to the unpowered safe
    /// state: data line held low, both stages off, indicators dark.
    pub fn new(mut pins: P) -> Self {
        pins.set_data_hold(true);
        pins.set_stage2(false);
        pins.set_stage1(false);
        pins.set_indicators(false, false);

        Self {
            pins,
            powered: false,
        }
    }

    /// Powers the matrix rail up. No-op when already powered.
    ///
    /// Order: data line low, stage 1 on, [`INRUSH_SETTLE_MS`] settle,
    /// stage 2 on, data line released. Stage 2 is asserted even when only
    /// 1.5 A is available — the brightness ceiling enforces the budget, the
    /// switch topology only bounds inrush.
    pub fn enable(&mut self, delay: &mut impl DelayNs) {
        if self.powered {
            return;
        }

        self.pins.set_data_hold(true);
        self.pins.set_stage1(true);
        delay.delay_ms(INRUSH_SETTLE_MS);
        self.pins.set_stage2(true);
        self.pins.set_data_hold(false);
        self.powered = true;
    }

    /// Powers the matrix rail down. No-op when already off.
    ///
    /// Reverse order of [`enable()`](Self::enable): data line low, stage 2
    /// off, stage 1 off. The data hold stays asserted while unpowered so an
    /// unpowered chain never sees a driven-high data line.
    pub fn disable(&mut self) {
        if !self.powered {
            return;
        }

        self.pins.set_data_hold(true);
        self.pins.set_stage2(false);
        self.pins.set_stage1(false);
        self.powered = false;
    }

    /// Drives the two status indicators from the tier's indicator pattern.
    pub fn indicate(&mut self, tier: CurrentTier) {
        let (low, high) = tier.indicator_levels();
        self.pins.set_indicators(low, high);
    }

    /// Returns true if the matrix rail is currently up.
    pub fn is_powered(&self) -> bool {
        self.powered
    }
}

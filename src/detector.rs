//! USB-C current-capability detection from the CC-line voltages.
//!
//! A Type-C host advertises its current budget by pulling up one of the two
//! configuration-channel (CC) lines; which one depends on cable
//! orientation. [`CcDetector`] samples both lines through an injected
//! [`CcSense`] primitive, converts the raw counts to volts and classifies
//! the active line against the advertisement voltage bands.

use crate::types::CurrentTier;

/// Trait for abstracting the CC-line analog inputs.
///
/// Implement this for your ADC. Readings are raw counts in the range
/// `0..=ADC_FULL_SCALE`; [`VOLTS_PER_COUNT`] converts them to the voltage
/// at the connector.
pub trait CcSense {
    /// Reads the CC1 line, returning the raw ADC count.
    fn read_cc1(&mut self) -> u16;

    /// Reads the CC2 line, returning the raw ADC count.
    fn read_cc2(&mut self) -> u16;
}

/// Full-scale digital range of the CC-line ADC.
pub const ADC_FULL_SCALE: f32 = 4095.0;

/// ADC internal reference voltage.
pub const ADC_REFERENCE_VOLTS: f32 = 1.1;

/// Front-end attenuation ahead of the ADC input.
pub const ADC_ATTENUATION: f32 = 3.548;

/// Volts at the connector represented by one raw ADC count.
pub const VOLTS_PER_COUNT: f32 = ADC_REFERENCE_VOLTS * ADC_ATTENUATION / ADC_FULL_SCALE;

/// CC voltage above which the host advertises 3.0 A.
pub const CC_3A0_THRESHOLD_VOLTS: f32 = 1.23;

/// CC voltage above which the host advertises 1.5 A.
pub const CC_1A5_THRESHOLD_VOLTS: f32 = 0.66;

/// Classifies a CC-line voltage into a current tier.
///
/// The thresholds are the Type-C connector specification's
/// current-advertisement voltage bands, not tunables. Comparisons are
/// strict, so a reading exactly on a band edge resolves to the lower tier.
pub fn classify_cc_volts(volts: f32) -> CurrentTier {
    if volts > CC_3A0_THRESHOLD_VOLTS {
        CurrentTier::Amp3_0
    } else if volts > CC_1A5_THRESHOLD_VOLTS {
        CurrentTier::Amp1_5
    } else {
        CurrentTier::Standard
    }
}

/// Samples the CC lines and classifies the advertised current budget.
///
/// Only one CC line carries the advertisement; the inactive line sits near
/// ground, so the maximum of the two readings is the one that matters. A
/// single [`sample()`](Self::sample) is instantaneous — rejecting transient
/// PD signaling on the same line is the caller's job, via the two-sample
/// confirmation in [`MatrixController::poll`](crate::MatrixController::poll).
pub struct CcDetector<S: CcSense> {
    sense: S,
}

impl<S: CcSense> CcDetector<S> {
    /// Creates a detector over the given CC-line sampling primitive.
    pub fn new(sense: S) -> Self {
        Self { sense }
    }

    /// Reads both CC lines and returns the advertised tier.
    ///
    /// A disconnected or undriven pair reads near zero and classifies as
    /// [`CurrentTier::Standard`], the fail-safe default.
    pub fn sample(&mut self) -> CurrentTier {
        let cc1 = f32::from(self.sense.read_cc1()) * VOLTS_PER_COUNT;
        let cc2 = f32::from(self.sense.read_cc2()) * VOLTS_PER_COUNT;
        classify_cc_volts(cc1.max(cc2))
    }
}

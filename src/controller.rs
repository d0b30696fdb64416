//! The fixed-period control loop.
//!
//! [`MatrixController`] owns every piece of persistent state — the accepted
//! current tier, the touch filters and the selected display color — and
//! mutates it strictly within one iteration. There is no parallelism and no
//! interior mutability; every wait is a hard delay through the injected
//! [`DelayNs`] capability.

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;
use heapless::String;
use palette::Srgb;

use crate::brightness::BrightnessPolicy;
use crate::colors;
use crate::detector::{CcDetector, CcSense};
use crate::power::{PowerPins, PowerSequencer};
use crate::touch::{TouchFilter, TouchSense};
use crate::types::CurrentTier;

/// Loop period between iterations.
///
/// Sized so that period plus confirmation settle stays inside the 60 ms
/// window the Type-C specification grants a sink to honor an advertisement
/// change.
pub const LOOP_PERIOD_MS: u32 = 30;

/// Settle before the confirmation re-sample of a changed tier.
///
/// Must exceed the 10 ms the Type-C specification requires before a changed
/// advertisement may be trusted.
pub const CONFIRM_SETTLE_MS: u32 = 15;

/// Number of touch channels polled by the loop.
pub const TOUCH_CHANNELS: usize = 3;

/// Filtered level below which a touch pad counts as pressed.
pub const TOUCH_ACTIVE_THRESHOLD: u16 = 20;

/// Colors selected by the touch pads, in priority order.
const PAD_COLORS: [Srgb<u8>; TOUCH_CHANNELS] = [colors::WHITE, colors::RED, colors::BLUE];

/// Trait for abstracting the LED matrix sink.
///
/// The sink owns pixel serialization and transmission; the controller only
/// hands it a uniform color, the global brightness ceiling and the element
/// count, once per iteration.
pub trait PixelSink {
    /// Pushes one frame: every element set to `color`, scaled by
    /// `brightness` (0-255).
    fn fill(&mut self, color: Srgb<u8>, brightness: u8, count: u16);
}

/// Trait for abstracting the diagnostic text channel.
///
/// Receives one line per loop iteration: the three filtered touch values as
/// space-separated integers. Informational only — nothing in the system
/// acts on it.
pub trait Console {
    /// Writes one line of diagnostic text.
    fn line(&mut self, text: &str);
}

/// Outcome of the tier-detection step of one [`poll()`](MatrixController::poll).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TierPoll {
    /// The sample agreed with the accepted tier.
    Unchanged,

    /// A changed sample was confirmed; the new tier is accepted and applied.
    Accepted(CurrentTier),

    /// A changed sample was not confirmed by the re-sample; the accepted
    /// tier is kept. Carries the unconfirmed first sample.
    Rejected(CurrentTier),
}

/// The control loop: tier detection, power sequencing, brightness capping,
/// touch color selection and the frame push.
///
/// # Type Parameters
/// * `C` - CC-line sampling primitive
/// * `P` - Power-control output pins
/// * `T` - Touch reading primitive
/// * `K` - LED matrix sink
/// * `O` - Diagnostic text channel
/// * `D` - Delay capability
pub struct MatrixController<C, P, T, K, O, D>
where
    C: CcSense,
    P: PowerPins,
    T: TouchSense,
    K: PixelSink,
    O: Console,
    D: DelayNs,
{
    detector: CcDetector<C>,
    sequencer: PowerSequencer<P>,
    policy: BrightnessPolicy,
    touch: T,
    filters: [TouchFilter; TOUCH_CHANNELS],
    sink: K,
    console: O,
    delay: D,
    accepted: CurrentTier,
    brightness: u8,
    color: Srgb<u8>,
}

impl<C, P, T, K, O, D> MatrixController<C, P, T, K, O, D>
where
    C: CcSense,
    P: PowerPins,
    T: TouchSense,
    K: PixelSink,
    O: Console,
    D: DelayNs,
{
    /// Creates the controller in the fail-safe startup state: accepted tier
    /// `Standard`, matrix depowered, brightness 0, color white.
    ///
    /// Each touch filter is seeded with one raw sample of its channel.
    pub fn new(
        detector: CcDetector<C>,
        sequencer: PowerSequencer<P>,
        policy: BrightnessPolicy,
        mut touch: T,
        sink: K,
        console: O,
        delay: D,
    ) -> Self {
        let filters =
            core::array::from_fn(|channel| TouchFilter::new(channel as u8, touch.read(channel as u8)));

        Self {
            detector,
            sequencer,
            policy,
            touch,
            filters,
            sink,
            console,
            delay,
            accepted: CurrentTier::default(),
            brightness: 0,
            color: colors::WHITE,
        }
    }

    /// Runs the loop forever at the fixed period.
    pub fn run(mut self) -> ! {
        loop {
            self.poll();
            self.delay.delay_ms(LOOP_PERIOD_MS);
        }
    }

    /// Executes one loop iteration, minus the trailing period delay: tier
    /// detection with debounce, touch filtering and color selection, the
    /// diagnostic line, and the frame push.
    ///
    /// Exposed separately from [`run()`](Self::run) so the loop can be
    /// driven step-by-step.
    pub fn poll(&mut self) -> TierPoll {
        let outcome = self.poll_tier();
        self.poll_touch();
        self.sink
            .fill(self.color, self.brightness, self.policy.led_count());
        outcome
    }

    /// The currently accepted (debounced) current tier.
    pub fn accepted_tier(&self) -> CurrentTier {
        self.accepted
    }

    /// The global brightness ceiling currently in force.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// The currently selected display color.
    pub fn color(&self) -> Srgb<u8> {
        self.color
    }

    fn poll_tier(&mut self) -> TierPoll {
        let sampled = self.detector.sample();
        if sampled == self.accepted {
            return TierPoll::Unchanged;
        }

        // A compliant host may emit PD protocol signaling on the active CC
        // line, which shows up here as a transient voltage excursion. Trust
        // a changed tier only if it survives a second look after the settle.
        self.delay.delay_ms(CONFIRM_SETTLE_MS);
        if self.detector.sample() != sampled {
            // Also covers a third tier appearing mid-confirmation: keep the
            // accepted tier and let the next poll re-trigger detection.
            return TierPoll::Rejected(sampled);
        }

        self.apply_tier(sampled);
        TierPoll::Accepted(sampled)
    }

    /// Applies a freshly accepted tier. Sequencing happens here and only
    /// here, so the rail is walked once per transition, never once per poll.
    fn apply_tier(&mut self, tier: CurrentTier) {
        self.accepted = tier;
        self.sequencer.indicate(tier);
        self.brightness = self.policy.max_brightness(tier);

        if tier == CurrentTier::Standard {
            self.sequencer.disable();
        } else {
            self.sequencer.enable(&mut self.delay);
        }
    }

    fn poll_touch(&mut self) {
        for filter in &mut self.filters {
            filter.update(&mut self.touch);
        }

        // Fixed priority order: the first pad below the threshold wins even
        // when a later pad reads lower. No trip keeps the previous color.
        for (filter, color) in self.filters.iter().zip(PAD_COLORS) {
            if filter.value() < TOUCH_ACTIVE_THRESHOLD {
                self.color = color;
                break;
            }
        }

        let mut line: String<24> = String::new();
        let _ = write!(
            line,
            "{} {} {}",
            self.filters[0].value(),
            self.filters[1].value(),
            self.filters[2].value()
        );
        self.console.line(&line);
    }
}

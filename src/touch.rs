//! Capacitive touch input filtering.

/// Trait for abstracting the raw capacitive touch reader.
///
/// Implement this for your touch peripheral; `channel` identifies which
/// physical pad to read. Readings are raw magnitudes that drop when a pad
/// is touched.
pub trait TouchSense {
    /// Reads the raw magnitude of the given channel.
    fn read(&mut self, channel: u8) -> u16;
}

/// Smoothing factor: weight kept by the previous filtered value on each
/// update.
pub const TOUCH_SMOOTHING: f32 = 0.7;

/// Exponential low-pass filter over one capacitive touch channel.
///
/// Each update recomputes `filtered = 0.7 * filtered + 0.3 * raw`, so a
/// single-sample glitch moves the output by at most 30% of the excursion
/// and cannot flip the selected color on its own. The filtered value is a
/// convex combination of past samples and therefore always lies within
/// their range.
#[derive(Debug, Clone, Copy)]
pub struct TouchFilter {
    channel: u8,
    filtered: f32,
}

impl TouchFilter {
    /// Creates a filter for `channel`, seeded with an initial raw sample.
    pub fn new(channel: u8, initial_raw: u16) -> Self {
        Self {
            channel,
            filtered: f32::from(initial_raw),
        }
    }

    /// Which physical channel this filter reads.
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Reads the channel and folds the new sample into the filtered value.
    pub fn update<S: TouchSense>(&mut self, sense: &mut S) {
        let raw = f32::from(sense.read(self.channel));
        self.filtered = TOUCH_SMOOTHING * self.filtered + (1.0 - TOUCH_SMOOTHING) * raw;
    }

    /// The filtered value, truncated to an integer.
    pub fn value(&self) -> u16 {
        self.filtered as u16
    }
}

//! Promo pacing: fire-and-forget ad attempts on a fixed event cadence.
//!
//! The soundboard shows an interstitial attempt every Nth clip play and a
//! rewarded attempt every Mth tone change. The counters are plain modulo
//! state; the sink itself is a seam so the binary can stay ad-free.

pub trait AdSink {
    fn show_interstitial(&mut self);
    fn show_rewarded(&mut self);
}

/// Inert sink used when no ad integration is wired in.
pub struct NoAds;

impl AdSink for NoAds {
    fn show_interstitial(&mut self) {}
    fn show_rewarded(&mut self) {}
}

/// Counts events and fires on every `every`-th one.
///
/// Starts saturated, so the very first event fires too. `every == 0`
/// disables the cadence entirely.
pub struct Cadence {
    count: u32,
    every: u32,
}

impl Cadence {
    pub fn new(every: u32) -> Self {
        Self {
            count: every,
            every,
        }
    }

    pub fn tick(&mut self) -> bool {
        if self.every == 0 {
            return false;
        }

        self.count += 1;
        if self.count >= self.every {
            self.count = 0;
            true
        } else {
            false
        }
    }
}

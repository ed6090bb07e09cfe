//! # Heading dead zone
//!
//! Debounces small heading errors. The heading error has to stay under the threshold for `delay`
//! consecutive ticks before the dead zone is entered, a single tick over the threshold leaves it
//! straight away.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use serde::Serialize;

use super::DeadZoneParams;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeadZone {
    /// Number of consecutive ticks the heading error has been under the threshold, saturates at
    /// the configured delay.
    delay_counter: u32,

    in_dead_zone: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DeadZone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the tracker with this tick's heading error and return whether steering should be
    /// suppressed.
    ///
    /// The dead zone is entered on the same tick the counter reaches `delay`, so exactly `delay`
    /// consecutive small errors are needed. This is one tick earlier than a tracker which checks
    /// the counter before incrementing it and so needs `delay + 1` small errors. The shorter
    /// debounce is intended, it is not an off by one.
    pub fn update(&mut self, head_err_rad: f64, params: &DeadZoneParams) -> bool {
        if head_err_rad.abs() < params.threshold_rad() {
            if self.delay_counter < params.delay {
                self.delay_counter += 1;
            }

            if self.delay_counter >= params.delay && !self.in_dead_zone {
                debug!(
                    "Entering heading dead zone after {} ticks",
                    self.delay_counter
                );
                self.in_dead_zone = true;
            }
        } else {
            if self.in_dead_zone {
                debug!(
                    "Leaving heading dead zone, heading error {:.4} rad",
                    head_err_rad
                );
            }

            self.in_dead_zone = false;
            self.delay_counter = 0;
        }

        self.in_dead_zone
    }

    /// Clear the counter and leave the dead zone.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn counter(&self) -> u32 {
        self.delay_counter
    }

    pub fn in_dead_zone(&self) -> bool {
        self.in_dead_zone
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

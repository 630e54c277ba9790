//! # Effective Field Goal Percentage
//!
//! eFG% re-weights plain field goal percentage so a made three counts 1.5
//! times a made two:
//!
//! ```text
//! eFG% = (makes + 0.5 * three_makes) / attempts
//! ```
//!
//! Free throws are not attempts and never enter the formula. A sample with
//! zero attempts has no percentage at all; every function here returns
//! `Option<f64>` and yields `None` for such samples instead of 0.0 or NaN,
//! so downstream code is forced to treat "insufficient data" as its own
//! state rather than as a very bad shooting night.

use serde::{Deserialize, Serialize};

use crate::event::{EventKind, PlayEvent};

/// Field goal attempt counts with makes split out by point value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotTally {
    /// Attempts, made and missed.
    pub attempts: u32,
    /// Made field goals of any point value.
    pub makes: u32,
    /// Made three-pointers, a subset of `makes`.
    pub three_makes: u32,
}

impl ShotTally {
    /// Tally a batch of rows. Rows that are not field goal attempts
    /// contribute nothing, so callers may pass unfiltered subsets.
    pub fn from_events(events: &[&PlayEvent]) -> Self {
        let mut tally = ShotTally::default();
        for event in events {
            tally.record(event);
        }
        tally
    }

    /// Add one row to the tally.
    pub fn record(&mut self, event: &PlayEvent) {
        match event.kind {
            EventKind::Shot => {
                self.attempts += 1;
                self.makes += 1;
                if event.is_three_pointer() {
                    self.three_makes += 1;
                }
            }
            EventKind::Miss => self.attempts += 1,
            EventKind::FreeThrow | EventKind::Other => {}
        }
    }

    /// Effective field goal percentage of this tally.
    ///
    /// # Returns
    /// * `Some(efg)` - weighted percentage in [0.0, 1.0]
    /// * `None` - if there are no attempts
    ///
    /// # Examples
    /// ```
    /// use oc_core::efficiency::ShotTally;
    ///
    /// // Four made threes plus six misses → (4 + 0.5*4) / 10 = 0.6
    /// let tally = ShotTally { attempts: 10, makes: 4, three_makes: 4 };
    /// assert_eq!(tally.efg(), Some(0.6));
    ///
    /// // No attempts → no percentage
    /// assert_eq!(ShotTally::default().efg(), None);
    /// ```
    pub fn efg(&self) -> Option<f64> {
        if self.attempts == 0 {
            return None;
        }
        let weighted = f64::from(self.makes) + 0.5 * f64::from(self.three_makes);
        Some(weighted / f64::from(self.attempts))
    }
}

/// On-court over off-court efficiency ratio.
///
/// # Returns
/// * `Some(ratio)` - `on_efg / off_efg`; above 1.0 means teammates shot
///   better with the subject on the floor
/// * `None` - if either operand is missing, or `off_efg` is zero (the
///   quotient would be unbounded, not a usable comparison)
pub fn efficiency_ratio(on_efg: Option<f64>, off_efg: Option<f64>) -> Option<f64> {
    let on = on_efg?;
    let off = off_efg?;
    if off == 0.0 {
        return None;
    }
    Some(on / off)
}

/// Square-root sample-balance weight for an on/off comparison.
///
/// `sqrt(min/max)` over the two attempt counts: 1.0 when both halves saw
/// the same number of teammate attempts, decaying toward 0.0 as the split
/// becomes lopsided. The square root softens the penalty for moderate
/// imbalance.
///
/// # Arguments
/// * `on_attempts` - teammate attempts with the subject on the floor
/// * `off_attempts` - teammate attempts with the subject off the floor
///
/// # Returns
/// * `Some(weight)` - balance weight in [0.0, 1.0]
/// * `None` - if either count is missing or zero; a zero-shot half has no
///   eFG% to weight, so the comparison itself is missing
///
/// # Examples
/// ```
/// use oc_core::efficiency::credibility;
///
/// assert_eq!(credibility(Some(50), Some(50)), Some(1.0));
/// assert_eq!(credibility(None, Some(30)), None);
/// ```
pub fn credibility(on_attempts: Option<u32>, off_attempts: Option<u32>) -> Option<f64> {
    let on = on_attempts?;
    let off = off_attempts?;
    let smaller = on.min(off);
    let larger = on.max(off);
    if smaller == 0 {
        return None;
    }
    let weight = (f64::from(smaller) / f64::from(larger)).sqrt();
    // Clamp to [0, 1] to handle floating point errors
    Some(weight.clamp(0.0, 1.0))
}

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::reagents::{ReagentId, FREE_CAPACITY_COLOR};

use super::volume::FixedVolume;

// =============================================================================
// Solution
// =============================================================================

/// A mixture of reagent quantities with an optional volume cap.
///
/// Invariants: every stored quantity is positive (zero entries are pruned on
/// mutation), and when a capacity is present the total volume never exceeds
/// it. Callers size additions against [`Solution::available_volume`]; `add`
/// asserts the cap instead of clamping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Solution {
    contents: BTreeMap<ReagentId, FixedVolume>,
    capacity: Option<FixedVolume>,
}

impl Solution {
    /// An empty, unbounded solution. Spills use this: whatever lands on the
    /// floor stays there.
    pub fn uncapped() -> Self {
        Solution::default()
    }

    /// An empty solution bounded by `capacity` (tools and vessels).
    pub fn with_capacity(capacity: FixedVolume) -> Self {
        Solution {
            contents: BTreeMap::new(),
            capacity: Some(capacity),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Total volume: the sum of all reagent quantities.
    pub fn volume(&self) -> FixedVolume {
        self.contents.values().copied().sum()
    }

    pub fn capacity(&self) -> Option<FixedVolume> {
        self.capacity
    }

    /// Remaining free volume, or [`FixedVolume::MAX`] when uncapped.
    pub fn available_volume(&self) -> FixedVolume {
        match self.capacity {
            Some(capacity) => capacity.saturating_sub(self.volume()),
            None => FixedVolume::MAX,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn quantity_of(&self, id: ReagentId) -> FixedVolume {
        self.contents.get(&id).copied().unwrap_or(FixedVolume::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReagentId, FixedVolume)> + '_ {
        self.contents.iter().map(|(id, quantity)| (*id, *quantity))
    }

    /// Sum of quantities whose reagent is in `set`.
    pub fn total_of(&self, set: &[ReagentId]) -> FixedVolume {
        self.iter()
            .filter(|(id, _)| set.contains(id))
            .map(|(_, quantity)| quantity)
            .sum()
    }

    /// Sum of quantities whose reagent is *not* in `set`.
    pub fn total_without(&self, set: &[ReagentId]) -> FixedVolume {
        self.volume() - self.total_of(set)
    }

    /// True iff the solution holds nothing outside `set`.
    pub fn contains_only(&self, set: &[ReagentId]) -> bool {
        self.total_of(set) == self.volume()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Add `amount` of a single reagent. Zero and negative amounts are ignored.
    pub fn add_reagent(&mut self, id: ReagentId, amount: FixedVolume) {
        if !amount.is_positive() {
            return;
        }
        self.assert_fits(amount);
        *self.contents.entry(id).or_insert(FixedVolume::ZERO) += amount;
    }

    /// Merge every reagent quantity from `added` into this solution.
    ///
    /// Never truncates: the caller must have bounded `added` against
    /// [`Solution::available_volume`]. Overfilling is a programmer error and
    /// trips the debug assertion.
    pub fn add(&mut self, added: Solution) {
        self.assert_fits(added.volume());
        for (id, quantity) in added.contents {
            if quantity.is_positive() {
                *self.contents.entry(id).or_insert(FixedVolume::ZERO) += quantity;
            }
        }
    }

    fn assert_fits(&self, incoming: FixedVolume) {
        if let Some(capacity) = self.capacity {
            let combined = self.volume() + incoming;
            if combined > capacity {
                warn!(
                    "solution overfilled: {} + {} exceeds capacity {}",
                    self.volume(),
                    incoming,
                    capacity
                );
                debug_assert!(false, "additions must be bounded by available_volume");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Proportional splitting
    // -------------------------------------------------------------------------

    /// Remove up to `amount`, drawn only from reagents *not* in `excluded`,
    /// proportionally to their share of that pool. Excluded reagents are never
    /// touched; if the pool is smaller than `amount` the whole pool is taken.
    /// Returns the removed sub-solution.
    pub fn split_without(&mut self, amount: FixedVolume, excluded: &[ReagentId]) -> Solution {
        self.split_filtered(amount, |id| !excluded.contains(&id))
    }

    /// Remove up to `amount`, drawn only from reagents in `included`.
    pub fn split_with_only(&mut self, amount: FixedVolume, included: &[ReagentId]) -> Solution {
        self.split_filtered(amount, |id| included.contains(&id))
    }

    /// Remove up to `amount`, drawn proportionally from every reagent.
    pub fn split(&mut self, amount: FixedVolume) -> Solution {
        self.split_filtered(amount, |_| true)
    }

    fn split_filtered<F: Fn(ReagentId) -> bool>(
        &mut self,
        amount: FixedVolume,
        eligible: F,
    ) -> Solution {
        let mut removed = Solution::uncapped();
        if !amount.is_positive() {
            return removed;
        }

        // (id, held quantity, share taken) over the eligible pool, in id order.
        let mut pool: Vec<(ReagentId, FixedVolume, i64)> = self
            .contents
            .iter()
            .filter(|(id, _)| eligible(**id))
            .map(|(id, quantity)| (*id, *quantity, 0i64))
            .collect();
        let pool_total: FixedVolume = pool.iter().map(|(_, quantity, _)| *quantity).sum();
        if pool_total.is_zero() {
            return removed;
        }
        let take = amount.min(pool_total);

        // Floor each proportional share, then hand the leftover hundredths to
        // the largest holders first (id order breaks ties), each capped at
        // what it still holds. The total removed is exactly `take`.
        let take_raw = take.raw() as i64;
        let pool_raw = pool_total.raw() as i64;
        let mut distributed = 0i64;
        for entry in &mut pool {
            entry.2 = take_raw * entry.1.raw() as i64 / pool_raw;
            distributed += entry.2;
        }
        let mut leftover = take_raw - distributed;
        if leftover > 0 {
            let mut order: Vec<usize> = (0..pool.len()).collect();
            order.sort_by_key(|&i| std::cmp::Reverse(pool[i].1));
            for i in order {
                if leftover == 0 {
                    break;
                }
                let headroom = pool[i].1.raw() as i64 - pool[i].2;
                let grant = headroom.min(leftover);
                pool[i].2 += grant;
                leftover -= grant;
            }
        }
        debug_assert_eq!(leftover, 0, "proportional split under-distributed");

        for (id, _, share_raw) in pool {
            if share_raw == 0 {
                continue;
            }
            let share = FixedVolume::from_hundredths(share_raw as i32);
            if let Some(quantity) = self.contents.get_mut(&id) {
                *quantity -= share;
                if !quantity.is_positive() {
                    self.contents.remove(&id);
                }
            }
            removed.contents.insert(id, share);
        }
        removed
    }

    // -------------------------------------------------------------------------
    // Display derivation
    // -------------------------------------------------------------------------

    /// Volume-weighted blend of the display colors of the reagents accepted by
    /// `filter`, or `None` when nothing matches.
    pub fn mixed_color<F: Fn(ReagentId) -> bool>(&self, filter: F) -> Option<Color> {
        let mut weight = 0.0f32;
        let (mut red, mut green, mut blue, mut alpha) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
        for (id, quantity) in self.iter() {
            if !filter(id) {
                continue;
            }
            let w = quantity.to_f32();
            let c = id.color().to_srgba();
            red += c.red * w;
            green += c.green * w;
            blue += c.blue * w;
            alpha += c.alpha * w;
            weight += w;
        }
        if weight <= 0.0 {
            return None;
        }
        Some(Color::srgba(
            red / weight,
            green / weight,
            blue / weight,
            alpha / weight,
        ))
    }

    /// Fill view of this solution: evaporative total, contaminant total, and
    /// remaining free capacity, each tagged with a display color. Zero buckets
    /// are omitted; uncapped solutions have no free bucket.
    pub fn progress(&self, evaporative: &[ReagentId]) -> Vec<ProgressBucket> {
        let mut buckets = Vec::with_capacity(3);

        let solvent = self.total_of(evaporative);
        if solvent.is_positive() {
            let color = self
                .mixed_color(|id| evaporative.contains(&id))
                .unwrap_or(FREE_CAPACITY_COLOR);
            buckets.push(ProgressBucket {
                color,
                amount: solvent.to_f32(),
            });
        }

        let contaminant = self.volume() - solvent;
        if contaminant.is_positive() {
            let color = self
                .mixed_color(|id| !evaporative.contains(&id))
                .unwrap_or(FREE_CAPACITY_COLOR);
            buckets.push(ProgressBucket {
                color,
                amount: contaminant.to_f32(),
            });
        }

        if let Some(capacity) = self.capacity {
            let free = capacity.saturating_sub(self.volume());
            if free.is_positive() {
                buckets.push(ProgressBucket {
                    color: FREE_CAPACITY_COLOR,
                    amount: free.to_f32(),
                });
            }
        }

        buckets
    }
}

// =============================================================================
// Progress buckets
// =============================================================================

/// One weighted segment of a container's fill display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBucket {
    pub color: Color,
    pub amount: f32,
}

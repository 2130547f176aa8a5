//! One-dimensional space distribution.
//!
//! A container first measures its children ([`combine`]) and later hands each
//! of them a share of the space it was given ([`distribute`]). Both are pure
//! functions over plain numbers so they can be tested without any elements.
//!
//! Shrinking walks resistance tiers from lowest to highest. A tier that cannot
//! cover the remaining excess collapses to zero and passes the rest on; the
//! first tier that can cover it shrinks proportionally and stops the walk.
//! Growing only ever touches the lowest hugging tier.

use crate::geometry::{Axis, Size};

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

/// Combine child sizes along `axis`: main extents are summed with a `gutter`
/// between neighbours, cross extents take the maximum.
///
/// No children measure `(0, 0)`.
pub fn combine<I>(sizes: I, axis: Axis, gutter: i32) -> Size
where
    I: IntoIterator<Item = Size>,
{
    let mut count = 0;
    let mut main = 0;
    let mut cross = 0;
    for size in sizes {
        if count > 0 {
            main += gutter;
            cross = cross.max(axis.cross_of(size));
        } else {
            cross = axis.cross_of(size);
        }
        main += axis.main_of(size);
        count += 1;
    }
    axis.size(main, cross)
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// One child as seen by the distributor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    /// Desired main-axis size.
    pub size: i32,
    pub resistance: u32,
    pub hugging: u32,
}

impl Slot {
    pub const fn new(size: i32, resistance: u32, hugging: u32) -> Self {
        Self { size, resistance, hugging }
    }
}

/// Result of [`distribute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Distribution {
    /// Final main-axis size per slot, in input order.
    pub sizes: Vec<i32>,
    /// Final total (sizes plus gutters) minus the allocation. Positive values
    /// are space that could not be absorbed; negative values are slack nobody
    /// could take.
    pub overflow: i32,
}

impl Distribution {
    /// Whether the sizes plus gutters match the allocation exactly.
    pub fn is_exact(&self) -> bool {
        self.overflow == 0
    }
}

/// Fit `slots` into `allocated` cells along one axis, with `gutter` cells
/// between neighbours.
pub fn distribute(slots: &[Slot], gutter: i32, allocated: i32) -> Distribution {
    let mut sizes: Vec<i32> = slots.iter().map(|s| s.size).collect();
    if slots.is_empty() {
        return Distribution { sizes, overflow: 0 };
    }

    let gaps = gutter * (slots.len() as i32 - 1);
    let mut total = sizes.iter().sum::<i32>() + gaps;

    if total > allocated {
        let order = sorted_by(slots, |s| s.resistance);
        let mut start = 0;
        while total > allocated && start < order.len() {
            let tier = next_tier(&order, start, |i| slots[i].resistance);
            start += tier.len();

            let excess = total - allocated;
            let tier_total: i32 = tier.iter().map(|&i| sizes[i]).sum();
            if excess > tier_total {
                for &i in &tier {
                    total -= sizes[i];
                    sizes[i] = 0;
                }
            } else {
                total = resize_proportionally(&mut sizes, &tier, total, allocated);
            }
        }
    }

    if total < allocated {
        let order = sorted_by(slots, |s| s.hugging);
        let tier = next_tier(&order, 0, |i| slots[i].hugging);
        total = resize_proportionally(&mut sizes, &tier, total, allocated);
    }

    Distribution { sizes, overflow: total - allocated }
}

/// Indices of `slots` stably sorted by `key`, so equal keys keep declared order.
fn sorted_by(slots: &[Slot], key: impl Fn(&Slot) -> u32) -> Vec<usize> {
    let mut order: Vec<usize> = (0..slots.len()).collect();
    order.sort_by_key(|&i| key(&slots[i]));
    order
}

/// The run of `order` starting at `start` that shares the same key.
fn next_tier(order: &[usize], start: usize, key: impl Fn(usize) -> u32) -> Vec<usize> {
    let level = key(order[start]);
    order[start..]
        .iter()
        .copied()
        .take_while(|&i| key(i) == level)
        .collect()
}

/// Move the tier's members toward `allocated` in proportion to their current
/// sizes and return the new total. A tier with zero total size is left alone.
///
/// Each member moves by the floor of its share of the difference; the rounding
/// leftover goes to the first member in declared order.
fn resize_proportionally(sizes: &mut [i32], tier: &[usize], total: i32, allocated: i32) -> i32 {
    let diff = i64::from(total - allocated);
    let tier_total: i64 = tier.iter().map(|&i| i64::from(sizes[i])).sum();
    if tier_total == 0 || diff == 0 {
        return total;
    }

    let shrinking = diff > 0;
    let amount = diff.abs();
    let before: Vec<i32> = tier.iter().map(|&i| sizes[i]).collect();
    let mut applied: i64 = 0;
    for &i in tier {
        let share = floor_div(amount * i64::from(sizes[i]), tier_total);
        if shrinking {
            sizes[i] -= share as i32;
        } else {
            sizes[i] += share as i32;
        }
        applied += share;
    }

    // floored shares never exceed the amount, so the leftover is non-negative
    let mut leftover = (amount - applied) as i32;
    if !shrinking {
        sizes[tier[0]] += leftover;
        return allocated;
    }

    for (slot, &i) in tier.iter().enumerate() {
        if leftover == 0 {
            break;
        }
        let floor = before[slot].min(0);
        let room = (sizes[i] - floor).max(0);
        let take = leftover.min(room);
        sizes[i] -= take;
        leftover -= take;
    }
    if leftover != 0 {
        sizes[tier[0]] -= leftover;
    }

    allocated
}

/// Integer division rounding toward negative infinity.
pub(crate) fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// Integer division rounding toward positive infinity.
pub(crate) fn ceil_div(a: i64, b: i64) -> i64 {
    -floor_div(-a, b)
}

// ===========================================================================
// Tests
// ===========================================================================

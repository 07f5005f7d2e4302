//! Paint operations and layered paint plans
//!
//! A day is composed by writing intervals onto a timeline. Each interval is a
//! [`PaintOp`] tagged with the activity that produced it; the activity decides
//! the op's layer and higher layers win where intervals overlap.

use crate::occupant::Timeline;
use crate::types::{ActivityLayer, ActivityType, Location, SECONDS_PER_DAY};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Write `location` over the half-open interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintOp {
    /// Activity that produced the interval
    pub activity: ActivityType,
    /// First second, may lie outside the day before clamping
    pub start: i64,
    /// One past the last second
    pub end: i64,
    /// Value written
    pub location: Location,
}

impl PaintOp {
    /// Create a paint operation
    pub fn new(activity: ActivityType, start: i64, end: i64, location: Location) -> Self {
        Self { activity, start, end, location }
    }

    /// Layer of the op's activity
    pub fn layer(&self) -> ActivityLayer {
        self.activity.layer()
    }

    /// The interval clamped to the day, `None` when nothing is left
    pub fn clamped(&self) -> Option<Range<usize>> {
        let day = SECONDS_PER_DAY as i64;
        let start = self.start.clamp(0, day);
        let end = self.end.clamp(0, day);
        (start < end).then(|| start as usize..end as usize)
    }

    /// Whether the op covers the given second
    pub fn covers(&self, second: usize) -> bool {
        self.clamped().map_or(false, |range| range.contains(&second))
    }

    /// Number of seconds written after clamping
    pub fn duration(&self) -> usize {
        self.clamped().map_or(0, |range| range.len())
    }
}

/// Ordered list of paint operations for one person and one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintPlan {
    ops: Vec<PaintOp>,
}

impl PaintPlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation
    pub fn push(&mut self, op: PaintOp) {
        self.ops.push(op);
    }

    /// Append several operations
    pub fn extend<I: IntoIterator<Item = PaintOp>>(&mut self, ops: I) {
        self.ops.extend(ops);
    }

    /// Remove all operations
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Operations in push order
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the plan is empty
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operations in application order: stable by layer, push order within a layer
    pub fn ordered(&self) -> Vec<&PaintOp> {
        let mut ordered: Vec<&PaintOp> = self.ops.iter().collect();
        ordered.sort_by_key(|op| op.layer());
        ordered
    }

    /// The op whose value is visible at `second`
    pub fn winner_at(&self, second: usize) -> Option<&PaintOp> {
        self.ordered().into_iter().rev().find(|op| op.covers(second))
    }

    /// Render the whole plan onto a fresh timeline
    pub fn render(&self) -> Timeline {
        let mut timeline = Timeline::new();
        for op in self.ordered() {
            timeline.apply(op);
        }
        timeline
    }

    /// Whether ops were pushed in non-decreasing layer order
    pub fn is_layered(&self) -> bool {
        self.ops.windows(2).all(|pair| pair[0].layer() <= pair[1].layer())
    }
}

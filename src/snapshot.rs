//! Read-only view of the simulation handed to a renderer between ticks.

use crate::float::Float;
use crate::vec::Vec2;
use crate::platform::Rect;
use alloc::vec::Vec as AllocVec;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<F: Float> {
    /// Segment positions base first, hand last.
    pub positions: AllocVec<Vec2<F>>,
    /// Spring endpoints, base to hand.
    pub springs: AllocVec<(Vec2<F>, Vec2<F>)>,
    pub platform: Rect<F>,
    pub power: F,
    pub max_power: F,
    pub charging: bool,
    pub aim_target: Option<Vec2<F>>,
    pub hand_velocity: Vec2<F>,
}

impl<F: Float> Snapshot<F> {
    pub fn hand(&self) -> Vec2<F> {
        self.positions[self.positions.len() - 1]
    }

    /// Power as a share of max, capped at 1.
    pub fn power_fraction(&self) -> F {
        (self.power / self.max_power).min(F::one())
    }
}

//! Fixed-step channel interpolation.
//!
//! Every transform moves a 5-bit channel one fixed integer step toward its
//! terminal value and snaps onto that value once it is within one step, so a
//! fade converges exactly in `ceil(distance / step)` calls whatever the step.

use crate::graphics::color::{Palette, CHANNEL_MAX};

/// Step toward 0, clamped at 0.
#[inline]
pub const fn toward_black(value: u8, step: u8) -> u8 {
    value.saturating_sub(step)
}

/// Step toward [`CHANNEL_MAX`]; within one step of the ceiling, jump to it.
#[inline]
pub const fn toward_white(value: u8, step: u8) -> u8 {
    if value >= CHANNEL_MAX.saturating_sub(step) {
        CHANNEL_MAX
    } else {
        value + step
    }
}

/// Step `current` up toward `target`, never past it.
#[inline]
pub const fn toward_target_from_black(current: u8, target: u8, step: u8) -> u8 {
    if current < target && target - current > step {
        current + step
    } else {
        target
    }
}

/// Step `current` down toward `target`, never past it.
#[inline]
pub const fn toward_target_from_white(current: u8, target: u8, step: u8) -> u8 {
    if current > target && current - target > step {
        current - step
    } else {
        target
    }
}

/// Per-palette transform applied once per fade step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interpolation {
    ToBlack,
    ToWhite,
    FromBlack,
    FromWhite,
}

impl Interpolation {
    /// Advance every channel of `palette` by one step.
    ///
    /// `target` is the bound source palette; only the from-black and
    /// from-white transforms read it.
    pub fn apply(self, palette: &mut Palette, target: &Palette, step: u8) {
        for (color, goal) in palette.colors_mut().iter_mut().zip(target.colors()) {
            *color = match self {
                Self::ToBlack => color.map_channels(|v| toward_black(v, step)),
                Self::ToWhite => color.map_channels(|v| toward_white(v, step)),
                Self::FromBlack => {
                    color.zip_channels(*goal, |c, t| toward_target_from_black(c, t, step))
                }
                Self::FromWhite => {
                    color.zip_channels(*goal, |c, t| toward_target_from_white(c, t, step))
                }
            };
        }
    }
}

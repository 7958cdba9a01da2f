//! Palette fade engine.
//!
//! [`FadeEngine`] owns the palette registry, the staging buffers and the
//! rest-state flags. Its four orchestrators (`fade_to_black`,
//! `fade_to_white`, `fade_from_black`, `fade_from_white`) each run a complete
//! fade before returning:
//!
//! 1. seed the staging buffers and wait one vblank so the first commit never
//!    races the hardware's palette read,
//! 2. step every active slot, commit it, wait one vblank plus the configured
//!    extra waits (none after the last step), `step_count` times,
//! 3. update the rest flag.
//!
//! The orchestrators borrow the engine mutably for their whole duration, so
//! nothing else can touch the staging state while a fade is running. The
//! only suspension point is [`DisplayHardware::wait_vblank`].

use crate::graphics::color::{Palette, CHANNEL_MAX};
use crate::graphics::hardware::DisplayHardware;
use crate::graphics::interpolate::Interpolation;
use crate::graphics::registry::{fadeable_slots, PaletteGroup, PaletteRegistry};
use crate::graphics::staging::{StagingBuffers, StagingSource};
use crate::graphics::state::{FadeEndpoint, FadeState};

pub const DEFAULT_FADE_STEP: u8 = 4;
pub const DEFAULT_STEP_COUNT: u8 = 8;
pub const DEFAULT_EXTRA_WAITS: u8 = 2;

/// Errors for fade tuning values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TuningError {
    #[error("Fade step must be at least 1")]
    ZeroStep,

    #[error("Fade step {step} exceeds channel range (max: 31)")]
    StepTooLarge { step: u8 },

    #[error("Fade step count must be at least 1")]
    ZeroStepCount,
}

/// Errors from the fade controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FadeError {
    #[error("Cannot switch fade endpoint to {requested} while faded to {current}")]
    EndpointLocked {
        current: FadeEndpoint,
        requested: FadeEndpoint,
    },

    #[error("Display hardware has no colour palette support")]
    ColorUnsupported,
}

/// Step size, step count and pacing of a fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeTuning {
    step: u8,
    step_count: u8,
    extra_waits: u8,
}

impl FadeTuning {
    pub fn new(step: u8, step_count: u8, extra_waits: u8) -> Result<Self, TuningError> {
        if step == 0 {
            return Err(TuningError::ZeroStep);
        }
        if step > CHANNEL_MAX {
            return Err(TuningError::StepTooLarge { step });
        }
        if step_count == 0 {
            return Err(TuningError::ZeroStepCount);
        }
        Ok(Self {
            step,
            step_count,
            extra_waits,
        })
    }

    /// Channel change per step.
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Interpolation steps per fade.
    pub fn step_count(&self) -> u8 {
        self.step_count
    }

    /// Vblanks waited after each step except the last, on top of the one
    /// every step waits.
    pub fn extra_waits(&self) -> u8 {
        self.extra_waits
    }

    /// Whether `step_count` steps cover the full channel range.
    pub fn converges(&self) -> bool {
        self.step as u32 * self.step_count as u32 >= CHANNEL_MAX as u32
    }

    /// Vblanks one fade waits in total, including the post-population sync.
    pub fn frames_per_fade(&self) -> u32 {
        let steps = self.step_count as u32;
        1 + steps + (steps - 1) * self.extra_waits as u32
    }
}

impl Default for FadeTuning {
    fn default() -> Self {
        Self {
            step: DEFAULT_FADE_STEP,
            step_count: DEFAULT_STEP_COUNT,
            extra_waits: DEFAULT_EXTRA_WAITS,
        }
    }
}

/// Summary of one completed fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeReport {
    pub interpolation: Interpolation,
    pub steps: u8,
    /// Palette register writes issued.
    pub commits: u32,
    /// Vblanks waited, including the post-population sync.
    pub vblanks: u32,
    /// Active slots across both groups.
    pub active_slots: usize,
}

/// Fade engine context: registry, staging buffers, and rest state.
#[derive(Debug, Clone, Default)]
pub struct FadeEngine<'p> {
    registry: PaletteRegistry<'p>,
    staging: StagingBuffers,
    state: FadeState,
    tuning: FadeTuning,
}

impl<'p> FadeEngine<'p> {
    pub fn new(tuning: FadeTuning) -> Self {
        if !tuning.converges() {
            log::warn!(
                "Fade tuning step={} steps={} does not cover the channel range; fades will stop short",
                tuning.step(),
                tuning.step_count()
            );
        }
        Self {
            registry: PaletteRegistry::new(),
            staging: StagingBuffers::new(),
            state: FadeState::default(),
            tuning,
        }
    }

    pub fn with_endpoint(mut self, endpoint: FadeEndpoint) -> Self {
        self.state.set_endpoint(endpoint);
        self
    }

    pub fn tuning(&self) -> FadeTuning {
        self.tuning
    }

    pub fn registry(&self) -> &PaletteRegistry<'p> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PaletteRegistry<'p> {
        &mut self.registry
    }

    pub fn staging(&self) -> &StagingBuffers {
        &self.staging
    }

    pub fn is_faded(&self) -> bool {
        self.state.is_faded()
    }

    pub fn endpoint(&self) -> FadeEndpoint {
        self.state.endpoint()
    }

    // ==========================================================================
    // Registry surface
    // ==========================================================================

    pub fn assign(&mut self, group: PaletteGroup, slot: usize, palette: &'p Palette) {
        self.registry.assign(group, slot, palette);
    }

    pub fn clear(&mut self, group: PaletteGroup) {
        self.registry.clear(group);
    }

    pub fn get(&self, group: PaletteGroup, slot: usize) -> Option<&'p Palette> {
        self.registry.get(group, slot)
    }

    // ==========================================================================
    // Orchestrators
    // ==========================================================================

    /// Fade every bound slot from its palette down to black.
    pub fn fade_to_black(&mut self, hw: &mut impl DisplayHardware) -> FadeReport {
        self.run(hw, StagingSource::Registry, Interpolation::ToBlack, true)
    }

    /// Fade every bound slot from its palette up to white.
    pub fn fade_to_white(&mut self, hw: &mut impl DisplayHardware) -> FadeReport {
        self.run(hw, StagingSource::Registry, Interpolation::ToWhite, true)
    }

    /// Fade every bound slot from black back to its palette.
    pub fn fade_from_black(&mut self, hw: &mut impl DisplayHardware) -> FadeReport {
        self.run(hw, StagingSource::Black, Interpolation::FromBlack, false)
    }

    /// Fade every bound slot from white back to its palette.
    pub fn fade_from_white(&mut self, hw: &mut impl DisplayHardware) -> FadeReport {
        self.run(hw, StagingSource::White, Interpolation::FromWhite, false)
    }

    fn run(
        &mut self,
        hw: &mut impl DisplayHardware,
        source: StagingSource,
        interpolation: Interpolation,
        faded_after: bool,
    ) -> FadeReport {
        let step = self.tuning.step;
        let steps = self.tuning.step_count;
        let active_slots = self.staging.populate(&self.registry, source);
        log::debug!(
            "Fade {:?} starting: {} active slots, step={}, steps={}",
            interpolation,
            active_slots,
            step,
            steps
        );

        hw.wait_vblank();
        let mut vblanks = 1u32;
        let mut commits = 0u32;

        for n in 0..steps {
            for group in PaletteGroup::ALL {
                for slot in fadeable_slots() {
                    let Some(palette) = self.staging.get_mut(group, slot).palette_mut() else {
                        continue;
                    };
                    let target = self.registry.get(group, slot).copied().unwrap_or_default();
                    interpolation.apply(palette, &target, step);
                    hw.set_palette(group, slot, palette);
                    commits += 1;
                    log::trace!("step {} {} slot {} <- {}", n + 1, group.name(), slot, palette);
                }
            }

            hw.wait_vblank();
            vblanks += 1;
            if n + 1 < steps {
                for _ in 0..self.tuning.extra_waits {
                    hw.wait_vblank();
                    vblanks += 1;
                }
            }
        }

        self.state.set_faded(faded_after);
        let report = FadeReport {
            interpolation,
            steps,
            commits,
            vblanks,
            active_slots,
        };
        log::debug!("Fade {:?} finished: {:?}", interpolation, report);
        report
    }

    // ==========================================================================
    // Controller
    // ==========================================================================

    /// Fade out to the active endpoint.
    pub fn fade_out(&mut self, hw: &mut impl DisplayHardware) -> FadeReport {
        match self.state.endpoint() {
            FadeEndpoint::Black => self.fade_to_black(hw),
            FadeEndpoint::White => self.fade_to_white(hw),
        }
    }

    /// Fade back in from the active endpoint.
    pub fn fade_in(&mut self, hw: &mut impl DisplayHardware) -> FadeReport {
        match self.state.endpoint() {
            FadeEndpoint::Black => self.fade_from_black(hw),
            FadeEndpoint::White => self.fade_from_white(hw),
        }
    }

    /// Run whichever fade the rest state allows: out when showing colour, in
    /// when resting at the endpoint.
    pub fn toggle(&mut self, hw: &mut impl DisplayHardware) -> Result<FadeReport, FadeError> {
        if !hw.supports_color() {
            log::warn!("Fade requested on hardware without colour palettes");
            return Err(FadeError::ColorUnsupported);
        }
        Ok(if self.state.is_faded() {
            self.fade_in(hw)
        } else {
            self.fade_out(hw)
        })
    }

    /// Change the endpoint. Rejected while resting at the current endpoint,
    /// since the next fade-in must start from the colour on screen.
    pub fn set_endpoint(&mut self, endpoint: FadeEndpoint) -> Result<(), FadeError> {
        let current = self.state.endpoint();
        if self.state.is_faded() && endpoint != current {
            log::warn!("Endpoint change to {} ignored while faded", endpoint);
            return Err(FadeError::EndpointLocked {
                current,
                requested: endpoint,
            });
        }
        self.state.set_endpoint(endpoint);
        Ok(())
    }

    /// Flip between black and white. Returns the new endpoint.
    pub fn toggle_endpoint(&mut self) -> Result<FadeEndpoint, FadeError> {
        let next = self.state.endpoint().toggled();
        self.set_endpoint(next)?;
        Ok(next)
    }
}

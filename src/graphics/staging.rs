//! Mutable staging copies of the bound palettes.
//!
//! A fade never edits a bound palette. It copies one into a staging slot,
//! steps the copy, and commits the copy to hardware.

use crate::graphics::color::{Palette, ALL_BLACK, ALL_WHITE};
use crate::graphics::registry::{fadeable_slots, PaletteGroup, PaletteRegistry, HARDWARE_PALETTES};

/// What a staging slot is seeded from when a fade starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StagingSource {
    /// Copy of the palette bound in the registry.
    Registry,
    /// All-black start point for fading in from black.
    Black,
    /// All-white start point for fading in from white.
    White,
}

/// State of one staging slot for the current fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StagingSlot {
    /// Nothing bound to the hardware slot; no interpolation and no commit.
    #[default]
    Skipped,
    /// Working copy being stepped this fade.
    Active(Palette),
}

impl StagingSlot {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn palette_mut(&mut self) -> Option<&mut Palette> {
        match self {
            Self::Active(palette) => Some(palette),
            Self::Skipped => None,
        }
    }
}

/// One staging slot per hardware slot per group.
///
/// The reserved slot's entry exists only to keep indices aligned with
/// hardware slot numbers; population never activates it.
#[derive(Debug, Clone, Default)]
pub struct StagingBuffers {
    slots: [[StagingSlot; HARDWARE_PALETTES]; 2],
}

impl StagingBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed every fadeable slot from `source`.
    ///
    /// Slots with no registry entry become [`StagingSlot::Skipped`] whatever
    /// the source. Returns the number of active slots.
    pub fn populate(&mut self, registry: &PaletteRegistry<'_>, source: StagingSource) -> usize {
        for group in PaletteGroup::ALL {
            let row = &mut self.slots[group.index()];
            row.fill(StagingSlot::Skipped);
            for slot in fadeable_slots() {
                let Some(bound) = registry.get(group, slot) else {
                    continue;
                };
                let seed = match source {
                    StagingSource::Registry => *bound,
                    StagingSource::Black => ALL_BLACK,
                    StagingSource::White => ALL_WHITE,
                };
                row[slot] = StagingSlot::Active(seed);
            }
        }
        self.active_count()
    }

    pub fn get(&self, group: PaletteGroup, slot: usize) -> &StagingSlot {
        &self.slots[group.index()][slot]
    }

    pub fn get_mut(&mut self, group: PaletteGroup, slot: usize) -> &mut StagingSlot {
        &mut self.slots[group.index()][slot]
    }

    pub fn active_count(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|slot| slot.is_active())
            .count()
    }
}

//! Palette registry: which constant palette is bound to each hardware slot.

use crate::graphics::color::Palette;

/// Hardware palettes per group.
pub const HARDWARE_PALETTES: usize = 8;
/// Slot kept out of every fade so UI text stays legible.
pub const RESERVED_SLOT: usize = 0;

/// Palette group (CGB keeps separate palette RAM for each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteGroup {
    Background = 0,
    Sprite = 1,
}

impl PaletteGroup {
    pub const ALL: [PaletteGroup; 2] = [PaletteGroup::Background, PaletteGroup::Sprite];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "bkg",
            Self::Sprite => "obj",
        }
    }
}

/// Slots a fade may touch, in commit order.
pub fn fadeable_slots() -> impl Iterator<Item = usize> {
    (RESERVED_SLOT + 1)..HARDWARE_PALETTES
}

/// Lookup table from (group, slot) to the constant palette bound there.
///
/// Holds borrows only; nothing reachable through the registry is ever
/// written. Rebuild it (via [`PaletteRegistry::clear`]) whenever slot usage
/// changes, e.g. on a scene change.
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry<'p> {
    slots: [[Option<&'p Palette>; HARDWARE_PALETTES]; 2],
}

impl<'p> PaletteRegistry<'p> {
    pub fn new() -> Self {
        Self {
            slots: [[None; HARDWARE_PALETTES]; 2],
        }
    }

    /// Bind `palette` to `slot`. Panics if `slot` is out of range.
    pub fn assign(&mut self, group: PaletteGroup, slot: usize, palette: &'p Palette) {
        debug_assert_ne!(slot, RESERVED_SLOT, "slot 0 is reserved");
        self.slots[group.index()][slot] = Some(palette);
    }

    pub fn clear(&mut self, group: PaletteGroup) {
        self.slots[group.index()] = [None; HARDWARE_PALETTES];
    }

    pub fn clear_all(&mut self) {
        for group in PaletteGroup::ALL {
            self.clear(group);
        }
    }

    pub fn get(&self, group: PaletteGroup, slot: usize) -> Option<&'p Palette> {
        self.slots[group.index()][slot]
    }

    /// Iterate the bound slots of `group` in slot order.
    pub fn assigned(&self, group: PaletteGroup) -> impl Iterator<Item = (usize, &'p Palette)> + '_ {
        self.slots[group.index()]
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.map(|palette| (slot, palette)))
    }

    pub fn assigned_count(&self) -> usize {
        PaletteGroup::ALL
            .iter()
            .map(|&group| self.assigned(group).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::color::{BLUES, GREENS, REDS};

    #[test]
    fn test_new_registry_is_empty() {
        let reg = PaletteRegistry::new();
        for group in PaletteGroup::ALL {
            for slot in 0..HARDWARE_PALETTES {
                assert!(reg.get(group, slot).is_none());
            }
        }
        assert_eq!(reg.assigned_count(), 0);
    }

    #[test]
    fn test_assign_get() {
        let mut reg = PaletteRegistry::new();
        reg.assign(PaletteGroup::Background, 3, &REDS);
        assert_eq!(reg.get(PaletteGroup::Background, 3), Some(&REDS));
        assert!(reg.get(PaletteGroup::Sprite, 3).is_none());
    }

    #[test]
    fn test_assign_keeps_reference() {
        let mut reg = PaletteRegistry::new();
        reg.assign(PaletteGroup::Sprite, 1, &GREENS);
        let got = reg.get(PaletteGroup::Sprite, 1).unwrap();
        assert!(std::ptr::eq(got, &GREENS));
    }

    #[test]
    fn test_reassign_replaces() {
        let mut reg = PaletteRegistry::new();
        reg.assign(PaletteGroup::Sprite, 2, &REDS);
        reg.assign(PaletteGroup::Sprite, 2, &BLUES);
        assert_eq!(reg.get(PaletteGroup::Sprite, 2), Some(&BLUES));
    }

    #[test]
    fn test_clear_only_touches_group() {
        let mut reg = PaletteRegistry::new();
        reg.assign(PaletteGroup::Background, 1, &REDS);
        reg.assign(PaletteGroup::Sprite, 1, &REDS);
        reg.clear(PaletteGroup::Background);
        assert!(reg.get(PaletteGroup::Background, 1).is_none());
        assert_eq!(reg.get(PaletteGroup::Sprite, 1), Some(&REDS));

        reg.clear_all();
        assert_eq!(reg.assigned_count(), 0);
    }

    #[test]
    fn test_assigned_iterates_in_slot_order() {
        let mut reg = PaletteRegistry::new();
        reg.assign(PaletteGroup::Background, 5, &BLUES);
        reg.assign(PaletteGroup::Background, 2, &REDS);
        let slots: Vec<usize> = reg
            .assigned(PaletteGroup::Background)
            .map(|(slot, _)| slot)
            .collect();
        assert_eq!(slots, vec![2, 5]);
    }

    #[test]
    fn test_fadeable_slots_skip_reserved() {
        let slots: Vec<usize> = fadeable_slots().collect();
        assert_eq!(slots, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    #[should_panic]
    fn test_assign_out_of_range_panics() {
        let mut reg = PaletteRegistry::new();
        reg.assign(PaletteGroup::Background, HARDWARE_PALETTES, &REDS);
    }
}

//! Scene palette binding.
//!
//! A scene decides which constant palette lives in which hardware slot. The
//! binding helpers write the palette to hardware and record it in the
//! engine's registry in the same call, so the two never disagree.

use crate::graphics::color::{
    Palette, BLUES, CYANS, DEFAULT_GRAYSCALE, GREENS, ORANGES, PURPLES, REDS,
};
use crate::graphics::fade::FadeEngine;
use crate::graphics::hardware::DisplayHardware;
use crate::graphics::registry::{PaletteGroup, RESERVED_SLOT};

/// One slot binding of a scene.
pub type SceneBinding<'p> = (PaletteGroup, usize, &'p Palette);

/// Bindings of the demo scene: six palettes in slots 1-6 of both groups.
pub static DEMO_SCENE: [SceneBinding<'static>; 12] = [
    (PaletteGroup::Background, 1, &REDS),
    (PaletteGroup::Background, 2, &GREENS),
    (PaletteGroup::Background, 3, &BLUES),
    (PaletteGroup::Background, 4, &ORANGES),
    (PaletteGroup::Background, 5, &CYANS),
    (PaletteGroup::Background, 6, &PURPLES),
    (PaletteGroup::Sprite, 1, &REDS),
    (PaletteGroup::Sprite, 2, &GREENS),
    (PaletteGroup::Sprite, 3, &BLUES),
    (PaletteGroup::Sprite, 4, &ORANGES),
    (PaletteGroup::Sprite, 5, &CYANS),
    (PaletteGroup::Sprite, 6, &PURPLES),
];

/// Write `palette` to `slot` and record the binding.
pub fn bind_palette<'p>(
    engine: &mut FadeEngine<'p>,
    hw: &mut impl DisplayHardware,
    group: PaletteGroup,
    slot: usize,
    palette: &'p Palette,
) {
    hw.set_palette(group, slot, palette);
    engine.assign(group, slot, palette);
}

/// Replace every binding with `bindings`.
///
/// Both groups are cleared first and the reserved slot gets the default
/// grayscale palette, which the registry never tracks.
pub fn load_scene<'p>(
    engine: &mut FadeEngine<'p>,
    hw: &mut impl DisplayHardware,
    bindings: &[SceneBinding<'p>],
) {
    engine.registry_mut().clear_all();
    for group in PaletteGroup::ALL {
        hw.set_palette(group, RESERVED_SLOT, &DEFAULT_GRAYSCALE);
    }
    for &(group, slot, palette) in bindings {
        bind_palette(engine, hw, group, slot, palette);
    }
    log::info!("Scene loaded: {} palette bindings", bindings.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::fade::FadeTuning;
    use crate::graphics::hardware::PaletteRam;

    #[test]
    fn test_bind_palette_writes_and_records() {
        let mut engine = FadeEngine::new(FadeTuning::default());
        let mut hw = PaletteRam::new();
        bind_palette(&mut engine, &mut hw, PaletteGroup::Sprite, 4, &ORANGES);
        assert_eq!(hw.palette(PaletteGroup::Sprite, 4), ORANGES);
        assert_eq!(engine.get(PaletteGroup::Sprite, 4), Some(&ORANGES));
    }

    #[test]
    fn test_load_demo_scene() {
        let mut engine = FadeEngine::new(FadeTuning::default());
        let mut hw = PaletteRam::new();
        load_scene(&mut engine, &mut hw, &DEMO_SCENE);

        assert_eq!(engine.registry().assigned_count(), 12);
        assert_eq!(hw.palette(PaletteGroup::Background, 6), PURPLES);
        assert_eq!(hw.palette(PaletteGroup::Sprite, 2), GREENS);
        assert!(engine.get(PaletteGroup::Background, 7).is_none());
        for group in PaletteGroup::ALL {
            assert_eq!(hw.palette(group, RESERVED_SLOT), DEFAULT_GRAYSCALE);
            assert!(engine.get(group, RESERVED_SLOT).is_none());
        }
    }

    #[test]
    fn test_load_scene_replaces_previous() {
        let mut engine = FadeEngine::new(FadeTuning::default());
        let mut hw = PaletteRam::new();
        load_scene(&mut engine, &mut hw, &DEMO_SCENE);
        load_scene(&mut engine, &mut hw, &[(PaletteGroup::Background, 7, &REDS)]);
        assert_eq!(engine.registry().assigned_count(), 1);
        assert_eq!(engine.get(PaletteGroup::Background, 7), Some(&REDS));
    }
}

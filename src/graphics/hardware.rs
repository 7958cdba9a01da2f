//! Display hardware seam used by the fade engine.
//!
//! The engine only needs three things from the platform: write a palette to
//! the palette registers, block until the next vertical blank, and report
//! whether the running model has colour palettes at all.

use std::thread;
use std::time::{Duration, Instant};

use crate::graphics::color::{Palette, PALETTE_BYTES};
use crate::graphics::registry::{PaletteGroup, HARDWARE_PALETTES};

/// Bytes of palette RAM per group (8 palettes x 4 colours x 2 bytes).
pub const PALETTE_RAM_SIZE: usize = HARDWARE_PALETTES * PALETTE_BYTES;

/// CGB frame rate: 4194304 Hz / 70224 cycles per frame.
pub const FRAME_RATE_HZ: f64 = 4_194_304.0 / 70_224.0;

/// Platform operations consumed by the fade engine.
///
/// Both operations are infallible by contract.
pub trait DisplayHardware {
    /// Write one palette into the palette registers of `group`.
    fn set_palette(&mut self, group: PaletteGroup, slot: usize, palette: &Palette);

    /// Block until the next vertical blank.
    fn wait_vblank(&mut self);

    /// Whether the running hardware has colour palettes.
    #[must_use]
    fn supports_color(&self) -> bool;
}

impl<H: DisplayHardware + ?Sized> DisplayHardware for &mut H {
    fn set_palette(&mut self, group: PaletteGroup, slot: usize, palette: &Palette) {
        (**self).set_palette(group, slot, palette);
    }

    fn wait_vblank(&mut self) {
        (**self).wait_vblank();
    }

    fn supports_color(&self) -> bool {
        (**self).supports_color()
    }
}

/// One palette register write, as seen by [`PaletteRam`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteWrite {
    /// Frame (vblank count) the write landed in.
    pub frame: u64,
    pub group: PaletteGroup,
    pub slot: usize,
    pub palette: Palette,
}

/// In-memory palette RAM for both groups.
///
/// Stores palettes in the hardware's byte layout, counts vblanks, and keeps a
/// log of every write so callers can inspect exactly what a fade committed.
#[derive(Debug, Clone)]
pub struct PaletteRam {
    ram: [[u8; PALETTE_RAM_SIZE]; 2],
    frame: u64,
    color: bool,
    writes: Vec<PaletteWrite>,
}

impl PaletteRam {
    /// Colour-capable palette RAM, all zero (black).
    pub fn new() -> Self {
        Self {
            ram: [[0; PALETTE_RAM_SIZE]; 2],
            frame: 0,
            color: true,
            writes: Vec::new(),
        }
    }

    /// Palette RAM for a model without colour support.
    pub fn monochrome() -> Self {
        Self {
            color: false,
            ..Self::new()
        }
    }

    /// Decode the palette currently stored in `slot`.
    pub fn palette(&self, group: PaletteGroup, slot: usize) -> Palette {
        let offset = slot * PALETTE_BYTES;
        let mut bytes = [0u8; PALETTE_BYTES];
        bytes.copy_from_slice(&self.ram[group.index()][offset..offset + PALETTE_BYTES]);
        Palette::from_bytes(&bytes)
    }

    /// Raw palette RAM of `group`.
    pub fn bytes(&self, group: PaletteGroup) -> &[u8; PALETTE_RAM_SIZE] {
        &self.ram[group.index()]
    }

    /// Number of vblanks waited so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn writes(&self) -> &[PaletteWrite] {
        &self.writes
    }

    /// Writes that targeted `(group, slot)`, oldest first.
    pub fn writes_to(
        &self,
        group: PaletteGroup,
        slot: usize,
    ) -> impl Iterator<Item = &PaletteWrite> + '_ {
        self.writes
            .iter()
            .filter(move |w| w.group == group && w.slot == slot)
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl Default for PaletteRam {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayHardware for PaletteRam {
    fn set_palette(&mut self, group: PaletteGroup, slot: usize, palette: &Palette) {
        let offset = slot * PALETTE_BYTES;
        self.ram[group.index()][offset..offset + PALETTE_BYTES]
            .copy_from_slice(&palette.to_bytes());
        self.writes.push(PaletteWrite {
            frame: self.frame,
            group,
            slot,
            palette: *palette,
        });
    }

    fn wait_vblank(&mut self) {
        self.frame += 1;
    }

    fn supports_color(&self) -> bool {
        self.color
    }
}

/// Sleeps until the next frame deadline at a fixed refresh rate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    period: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(rate_hz: f64) -> Self {
        let period = Duration::from_secs_f64(1.0 / rate_hz.max(1.0));
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next deadline. Deadlines that already passed are
    /// skipped rather than replayed.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FRAME_RATE_HZ)
    }
}

/// Wraps hardware so each vblank also waits for real frame time.
#[derive(Debug)]
pub struct Paced<H> {
    inner: H,
    clock: FrameClock,
}

impl<H: DisplayHardware> Paced<H> {
    pub fn new(inner: H, clock: FrameClock) -> Self {
        Self { inner, clock }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: DisplayHardware> DisplayHardware for Paced<H> {
    fn set_palette(&mut self, group: PaletteGroup, slot: usize, palette: &Palette) {
        self.inner.set_palette(group, slot, palette);
    }

    fn wait_vblank(&mut self) {
        self.clock.wait();
        self.inner.wait_vblank();
    }

    fn supports_color(&self) -> bool {
        self.inner.supports_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::color::{Color, BLUES, REDS};

    #[test]
    fn test_palette_ram_new() {
        let ram = PaletteRam::new();
        assert!(ram.supports_color());
        assert_eq!(ram.frame(), 0);
        assert!(ram.writes().is_empty());
        assert_eq!(ram.palette(PaletteGroup::Sprite, 7), Palette::default());
    }

    #[test]
    fn test_palette_ram_monochrome() {
        assert!(!PaletteRam::monochrome().supports_color());
    }

    #[test]
    fn test_set_palette_layout() {
        let mut ram = PaletteRam::new();
        ram.set_palette(PaletteGroup::Background, 1, &REDS);
        let bytes = ram.bytes(PaletteGroup::Background);
        // colour 3 of slot 1: pure red, 0x001F little-endian
        assert_eq!(&bytes[14..16], &[0x1F, 0x00]);
        assert_eq!(ram.palette(PaletteGroup::Background, 1), REDS);
        assert_eq!(ram.palette(PaletteGroup::Sprite, 1), Palette::default());
    }

    #[test]
    fn test_writes_record_frame() {
        let mut ram = PaletteRam::new();
        ram.set_palette(PaletteGroup::Sprite, 2, &BLUES);
        ram.wait_vblank();
        ram.wait_vblank();
        ram.set_palette(PaletteGroup::Sprite, 2, &REDS);
        let frames: Vec<u64> = ram
            .writes_to(PaletteGroup::Sprite, 2)
            .map(|w| w.frame)
            .collect();
        assert_eq!(frames, vec![0, 2]);
        assert_eq!(ram.writes()[1].palette.color(3), Color::new(31, 0, 0));

        ram.clear_writes();
        assert!(ram.writes().is_empty());
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn drive(mut hw: impl DisplayHardware) {
            hw.set_palette(PaletteGroup::Background, 4, &BLUES);
            hw.wait_vblank();
        }
        let mut ram = PaletteRam::new();
        drive(&mut ram);
        assert_eq!(ram.frame(), 1);
        assert_eq!(ram.palette(PaletteGroup::Background, 4), BLUES);
    }

    #[test]
    fn test_frame_clock_period() {
        let clock = FrameClock::default();
        let micros = clock.period().as_micros();
        assert!((16_700..16_800).contains(&micros));
    }

    #[test]
    fn test_paced_waits_real_time() {
        let mut hw = Paced::new(PaletteRam::new(), FrameClock::new(1000.0));
        let start = Instant::now();
        hw.wait_vblank();
        hw.wait_vblank();
        assert!(start.elapsed() >= Duration::from_millis(1));
        assert_eq!(hw.inner().frame(), 2);
        assert!(hw.supports_color());
    }
}

//! Host-side preview of palette RAM as ANSI truecolor swatches.

use std::io::Write;

use crate::graphics::color::{Color, Palette};
use crate::graphics::hardware::DisplayHardware;
use crate::graphics::registry::{PaletteGroup, HARDWARE_PALETTES};

/// Forwards to `inner` and, on each vblank that follows a palette write,
/// prints one line of swatches for both groups.
pub struct TerminalDisplay<H, W: Write> {
    inner: H,
    out: W,
    mirror: [[Palette; HARDWARE_PALETTES]; 2],
    dirty: bool,
    frame: u64,
}

impl<H: DisplayHardware, W: Write> TerminalDisplay<H, W> {
    pub fn new(inner: H, out: W) -> Self {
        Self {
            inner,
            out,
            mirror: [[Palette::default(); HARDWARE_PALETTES]; 2],
            dirty: false,
            frame: 0,
        }
    }

    pub fn into_parts(self) -> (H, W) {
        (self.inner, self.out)
    }

    fn render_line(&self) -> String {
        let mut line = format!("{:>5} ", self.frame);
        for group in PaletteGroup::ALL {
            line.push_str(group.name());
            line.push(' ');
            for palette in &self.mirror[group.index()] {
                for &color in palette.colors() {
                    line.push_str(&swatch(color));
                }
                line.push(' ');
            }
        }
        line
    }
}

/// Two-cell block in `color`.
pub fn swatch(color: Color) -> String {
    let (r, g, b) = color.to_rgb888();
    format!("\x1b[48;2;{};{};{}m  \x1b[0m", r, g, b)
}

impl<H: DisplayHardware, W: Write> DisplayHardware for TerminalDisplay<H, W> {
    fn set_palette(&mut self, group: PaletteGroup, slot: usize, palette: &Palette) {
        self.mirror[group.index()][slot] = *palette;
        self.dirty = true;
        self.inner.set_palette(group, slot, palette);
    }

    fn wait_vblank(&mut self) {
        if self.dirty {
            let line = self.render_line();
            if let Err(e) = writeln!(self.out, "{}", line) {
                log::warn!("Palette preview write failed: {}", e);
            }
            self.dirty = false;
        }
        self.frame += 1;
        self.inner.wait_vblank();
    }

    fn supports_color(&self) -> bool {
        self.inner.supports_color()
    }
}

//!
//! Palette graphics: colour types, the registry, staging buffers and the
//! fade engine that drives them.

pub mod color;
pub mod fade;
pub mod hardware;
pub mod interpolate;
pub mod registry;
pub mod scene;
pub mod staging;
pub mod state;
pub mod terminal;

pub use color::{
    Color, Palette, ALL_BLACK, ALL_WHITE, BLUES, CHANNEL_MAX, CYANS,
    DEFAULT_GRAYSCALE, GREENS, ORANGES, PALETTE_SIZE, PURPLES, REDS,
};
pub use fade::{FadeEngine, FadeError, FadeReport, FadeTuning, TuningError};
pub use hardware::{DisplayHardware, FrameClock, Paced, PaletteRam, PaletteWrite, FRAME_RATE_HZ};
pub use interpolate::Interpolation;
pub use registry::{PaletteGroup, PaletteRegistry, HARDWARE_PALETTES, RESERVED_SLOT};
pub use scene::{bind_palette, load_scene, SceneBinding, DEMO_SCENE};
pub use staging::{StagingBuffers, StagingSlot, StagingSource};
pub use state::{FadeEndpoint, FadeState};
pub use terminal::TerminalDisplay;

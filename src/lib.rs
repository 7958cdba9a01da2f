// CGB palette fade engine
// Registry, staging buffers and fade orchestrators for colour handheld palettes

pub mod cli;
pub mod config;
pub mod graphics;
pub mod logging;

pub use cli::Cli;
pub use config::Options;
pub use graphics::{FadeEndpoint, FadeEngine, FadeTuning, PaletteGroup, PaletteRam};
pub use logging::LogLevel;

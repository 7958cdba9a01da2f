use crate::config::{parse_endpoint, parse_log_level, Options};
use anyhow::{Context, Result};
use clap::Parser;

/// CGB palette fade demo - fades a scene's palettes out and back in
#[derive(Parser, Debug)]
#[command(name = "cgb-fade")]
#[command(version)]
#[command(about = "Palette cross-fade engine demo for colour handheld hardware", long_about = None)]
pub struct Cli {
    /// Config file path (key = value lines)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Channel change per fade step (1-31)
    #[arg(short, long, value_name = "STEP")]
    pub step: Option<u8>,

    /// Interpolation steps per fade
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub steps: Option<u8>,

    /// Extra vblank waits after every step but the last
    #[arg(short = 'w', long = "extra-waits", value_name = "COUNT")]
    pub extra_waits: Option<u8>,

    /// Fade endpoint (black, white)
    #[arg(short, long, value_name = "COLOR")]
    pub endpoint: Option<String>,

    /// Fade out/in rounds to run; the endpoint flips between rounds
    #[arg(long, value_name = "COUNT")]
    pub cycles: Option<u32>,

    /// Pace vblanks at the real frame rate
    #[arg(short, long)]
    pub realtime: bool,

    /// Print palette RAM as colour swatches after every frame that changed palette RAM
    #[arg(short, long)]
    pub preview: bool,

    /// Simulate hardware without colour palettes
    #[arg(long)]
    pub monochrome: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(short, long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(step) = self.step {
            opts.step = Some(step);
        }
        if let Some(steps) = self.steps {
            opts.steps = Some(steps);
        }
        if let Some(waits) = self.extra_waits {
            opts.extra_waits = Some(waits);
        }
        if let Some(ref endpoint) = self.endpoint {
            opts.endpoint = Some(parse_endpoint(endpoint).context("Invalid --endpoint")?);
        }
        if let Some(cycles) = self.cycles {
            opts.cycles = Some(cycles);
        }
        if self.realtime {
            opts.realtime = Some(true);
        }
        if self.preview {
            opts.preview = Some(true);
        }
        if self.monochrome {
            opts.color = Some(false);
        }
        if let Some(ref level) = self.log_level {
            opts.log_level = Some(parse_log_level(level).context("Invalid --log-level")?);
        }

        // Validate the merged tuning up front so bad values fail before any fade
        opts.tuning()?;
        Ok(opts)
    }
}

use std::io;

use anyhow::Result;
use clap::Parser;

use cgb_fade::config;
use cgb_fade::graphics::{
    load_scene, DisplayHardware, FadeEngine, FadeTuning, FrameClock, Paced, PaletteGroup,
    PaletteRam, TerminalDisplay, DEMO_SCENE, HARDWARE_PALETTES,
};
use cgb_fade::{logging, Cli, Options};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Config file first, CLI values override it
    let options = config::load_config(&cli.config)?;
    let options = cli.merge_into_options(options)?;

    logging::init(options.log_level.unwrap_or_default());
    log::info!("cgb-fade starting");

    let tuning = options.tuning()?;
    log::info!("Configuration:");
    log::info!(
        "  Step: {}  Steps: {}  Extra waits: {}",
        tuning.step(),
        tuning.step_count(),
        tuning.extra_waits()
    );
    log::info!("  Frames per fade: {}", tuning.frames_per_fade());

    let mut ram = if options.color.unwrap_or(true) {
        PaletteRam::new()
    } else {
        PaletteRam::monochrome()
    };

    let preview = options.preview.unwrap_or(false);
    let realtime = options.realtime.unwrap_or(false);
    match (preview, realtime) {
        (false, false) => run_demo(&mut ram, &options, tuning)?,
        (false, true) => run_demo(
            &mut Paced::new(&mut ram, FrameClock::default()),
            &options,
            tuning,
        )?,
        (true, false) => run_demo(
            &mut TerminalDisplay::new(&mut ram, io::stdout()),
            &options,
            tuning,
        )?,
        (true, true) => run_demo(
            &mut Paced::new(
                TerminalDisplay::new(&mut ram, io::stdout()),
                FrameClock::default(),
            ),
            &options,
            tuning,
        )?,
    }

    print_summary(&ram);
    Ok(())
}

fn run_demo(hw: &mut impl DisplayHardware, options: &Options, tuning: FadeTuning) -> Result<()> {
    if !hw.supports_color() {
        println!("GBC ONLY");
        log::error!("Hardware has no colour palettes; fade demo not started");
        return Ok(());
    }

    let mut engine =
        FadeEngine::new(tuning).with_endpoint(options.endpoint.unwrap_or_default());
    load_scene(&mut engine, hw, &DEMO_SCENE);
    hw.wait_vblank();

    for cycle in 0..options.cycles.unwrap_or(1) {
        if cycle > 0 {
            let endpoint = engine.toggle_endpoint()?;
            log::info!("Endpoint switched to {}", endpoint);
        }
        let out = engine.toggle(hw)?;
        log::info!(
            "Faded to {}: {} commits over {} frames",
            engine.endpoint(),
            out.commits,
            out.vblanks
        );
        let back = engine.toggle(hw)?;
        log::info!(
            "Faded back from {}: {} commits over {} frames",
            engine.endpoint(),
            back.commits,
            back.vblanks
        );
    }
    Ok(())
}

fn print_summary(ram: &PaletteRam) {
    println!("frames: {}  palette writes: {}", ram.frame(), ram.writes().len());
    for group in PaletteGroup::ALL {
        for slot in 0..HARDWARE_PALETTES {
            println!("{} {}: {}", group.name(), slot, ram.palette(group, slot));
        }
        let dump: Vec<String> = ram.bytes(group).iter().map(|b| format!("{:02X}", b)).collect();
        println!("{} ram: {}", group.name(), dump.join(" "));
    }
}

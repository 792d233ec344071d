//! Balloon Shooter entry point
//!
//! Sets up logging and the terminal, then runs the frame loop.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::mpsc::TryRecvError;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use crossterm::event::Event;

use balloon_shooter::platform::{Gamepads, KeyRouter, TerminalGuard, spawn_event_reader};
use balloon_shooter::renderer::{Canvas, TerminalRenderer, scene};
use balloon_shooter::{Settings, ViewController};

#[derive(Parser)]
#[command(name = "balloon-shooter")]
#[command(about = "Shoot the balloons before they drift away")]
struct Args {
    /// JSON settings file; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where log output goes (the terminal is busy drawing the game)
    #[arg(long, default_value = "balloon-shooter.log")]
    log_file: PathBuf,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;
    log::info!("Balloon Shooter starting...");

    let settings = Settings::load_or_default(args.config.as_deref())?;
    let mut pads = Gamepads::open();
    let mut ctrl = ViewController::new(settings, pads.connected());

    let guard = TerminalGuard::enter().context("failed to set up the terminal")?;
    let result = run(&mut ctrl, &mut pads, guard.keyboard_enhanced(), args.fps);
    // Restore the terminal before anything is printed
    drop(guard);

    match &result {
        Ok(()) => log::info!("Balloon Shooter exiting"),
        Err(err) => log::error!("{:#}", err),
    }
    result
}

fn run(
    ctrl: &mut ViewController,
    pads: &mut Gamepads,
    keyboard_enhanced: bool,
    fps: u32,
) -> Result<()> {
    let events = spawn_event_reader();
    let mut keys = KeyRouter::new(keyboard_enhanced);
    let mut renderer = TerminalRenderer::new(BufWriter::new(io::stdout()));
    let (cols, rows) = crossterm::terminal::size()?;
    let mut canvas = Canvas::new(cols, rows);

    let frame_time = Duration::from_secs_f64(1.0 / fps as f64);
    let mut last = Instant::now();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // Drain terminal input
        loop {
            let event = match events.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Err(anyhow!("terminal event reader stopped"));
                }
            };
            if let Event::Key(key) = event {
                if !keys.key_event(ctrl, key, frame) {
                    return Ok(());
                }
            }
        }
        keys.end_frame(ctrl, frame);

        for event in pads.poll() {
            ctrl.on_pad_event(event);
        }
        ctrl.set_joystick_connected(pads.connected());

        let now = Instant::now();
        ctrl.update(now.duration_since(last).as_secs_f32());
        last = now;

        let (cols, rows) = crossterm::terminal::size()?;
        canvas.resize(cols, rows);
        scene::draw(&mut canvas, ctrl.view());
        renderer.present(&canvas)?;

        if let Some(rest) = frame_time.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}

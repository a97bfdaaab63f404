mod config;
mod demo;
mod level;
mod watch;

mod demo_tests;

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::SceneConfig;
use crate::demo::Demo;

const FRAME_SECONDS: f64 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "arena", about = "Headless voxel scene: streaming, culling and draw call assembly")]
struct Args {
    /// Scene config (TOML). Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames to simulate before exiting
    #[arg(long, default_value_t = 600)]
    frames: u64,

    #[arg(long)]
    chunk_distance: Option<i32>,

    #[arg(long)]
    ceiling_scale: Option<f64>,

    #[arg(long)]
    seed: Option<i32>,

    /// Level population workers (0 = automatic)
    #[arg(long)]
    workers: Option<usize>,

    /// Reload the config file when it changes; frames are paced in real time
    #[arg(long, default_value_t = false)]
    watch: bool,
}

impl Args {
    fn load_config(&self) -> Result<SceneConfig, Box<dyn Error>> {
        let mut cfg = match &self.config {
            Some(path) => SceneConfig::load_from_path(path)?,
            None => SceneConfig::default(),
        };
        self.apply_overrides(&mut cfg);
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_overrides(&self, cfg: &mut SceneConfig) {
        if let Some(d) = self.chunk_distance {
            cfg.chunk_distance = d;
        }
        if let Some(c) = self.ceiling_scale {
            cfg.ceiling_scale = c;
        }
        if let Some(s) = self.seed {
            cfg.seed = s;
        }
        if let Some(w) = self.workers {
            cfg.workers = w;
        }
    }
}

fn init_logging() {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = args.load_config()?;
    let mut demo = Demo::new(config)?;

    let reload_rx = match (&args.config, args.watch) {
        (Some(path), true) => Some(watch::spawn_config_watcher(path.clone())),
        (None, true) => {
            log::warn!("--watch needs --config; not watching");
            None
        }
        _ => None,
    };

    for _ in 0..args.frames {
        if let Some(rx) = &reload_rx {
            if rx.try_iter().count() > 0 {
                match args.load_config() {
                    Ok(cfg) => {
                        log::info!("config reloaded");
                        demo.apply_config(cfg);
                    }
                    Err(e) => log::warn!("config reload failed: {e}"),
                }
            }
        }
        demo.step(FRAME_SECONDS)?;
        if reload_rx.is_some() {
            std::thread::sleep(Duration::from_secs_f64(FRAME_SECONDS));
        }
    }

    let stats = demo.last_frame_stats();
    log::info!(
        "ran {} frames (seed {}), eye at ({:.1}, {:.1}): chunks={} visibility_trees={} draw_calls={} opaque={} triangles={} textures={}",
        demo.frame(),
        demo.config().seed,
        demo.eye().x,
        demo.eye().z,
        demo.active_chunk_count(),
        demo.graph().visibility().len(),
        stats.draw_call_count,
        stats.opaque_draw_call_count,
        stats.triangle_count,
        demo.backend().texture_count()
    );
    let leaked = demo.shutdown();
    if leaked > 0 {
        log::warn!("{leaked} backend buffers still alive after shutdown");
    }
    Ok(())
}

fn main() {
    init_logging();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

//! Astro Voyage entry point
//!
//! Runs a headless session on native targets: the demo pilot flies while the
//! HUD is written to the log. Set `RUST_LOG=info` to see it.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::{Duration, Instant};

    use astro_voyage::runner::WorldHandle;
    use astro_voyage::sim::WorldEvent;
    use astro_voyage::{Catalog, Intent, Settings, Simulation, WorldObserver};

    const USAGE: &str = "usage: astro-voyage [--settings FILE] [--catalog FILE] [--seconds N] [--seed N]";

    pub struct Args {
        settings: Option<PathBuf>,
        catalog: Option<PathBuf>,
        seconds: u64,
        seed: Option<u64>,
    }

    pub fn parse_args() -> Result<Args, String> {
        let mut args = Args {
            settings: None,
            catalog: None,
            seconds: 20,
            seed: None,
        };
        let mut it = std::env::args().skip(1);
        while let Some(flag) = it.next() {
            let mut value = || it.next().ok_or_else(|| format!("{flag} needs a value\n{USAGE}"));
            match flag.as_str() {
                "--settings" => args.settings = Some(value()?.into()),
                "--catalog" => args.catalog = Some(value()?.into()),
                "--seconds" => {
                    args.seconds = value()?.parse().map_err(|e| format!("--seconds: {e}"))?
                }
                "--seed" => args.seed = Some(value()?.parse().map_err(|e| format!("--seed: {e}"))?),
                "-h" | "--help" => return Err(USAGE.to_string()),
                other => return Err(format!("unknown argument {other}\n{USAGE}")),
            }
        }
        Ok(args)
    }

    /// Logs discoveries as they happen and a status line once per second
    struct HudLogger {
        world: WorldHandle,
        last_status: Mutex<Instant>,
    }

    impl WorldObserver for HudLogger {
        fn world_updated(&self, _since_tick: Duration) {
            let mut last = self.last_status.lock().unwrap_or_else(|e| e.into_inner());
            if last.elapsed() < Duration::from_secs(1) {
                return;
            }
            *last = Instant::now();
            self.world.read(|w| {
                let craft = &w.craft().body;
                let held: Vec<&str> = Intent::ALL
                    .into_iter()
                    .filter(|&intent| w.craft().controls.get(intent))
                    .map(|intent| intent.as_str())
                    .collect();
                log::info!(
                    "tick {:>5} | discovered {}/{} | pos ({:>6.1}, {:>6.1}) speed {:>4.1} | docked: {} | {}",
                    w.ticks(),
                    w.discovered(),
                    w.total(),
                    craft.pos.x,
                    craft.pos.y,
                    craft.speed(),
                    w.docked().map_or("-", |c| c.name.as_str()),
                    held.join(" "),
                );
            });
        }

        fn world_events(&self, events: &[WorldEvent]) {
            for event in events {
                if let WorldEvent::Discovered { index } = event {
                    self.world.read(|w| {
                        if let Some(c) = w.celestials().get(*index) {
                            log::info!("*** {}: {}", c.name, c.description);
                        }
                    });
                }
            }
        }
    }

    pub fn run(args: Args) -> astro_voyage::Result<()> {
        let settings = match &args.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let catalog = match &args.catalog {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin()?,
        };
        let seed = args.seed.unwrap_or_else(rand::random);

        let mut sim = Simulation::new_game(settings, &catalog, seed)?;
        sim.subscribe(Arc::new(HudLogger {
            world: sim.world(),
            last_status: Mutex::new(Instant::now()),
        }));
        sim.set_autopilot(true);
        sim.start();

        let deadline = Instant::now() + Duration::from_secs(args.seconds);
        while Instant::now() < deadline && sim.is_running() {
            if sim.with_world(|w| w.all_discovered()) {
                log::info!("Every planet visited");
                break;
            }
            thread::sleep(Duration::from_millis(50));
        }
        sim.stop();

        let world = sim.snapshot();
        println!(
            "Visited {}/{} planets in {} ticks (seed {})",
            world.discovered(),
            world.total(),
            world.ticks(),
            world.seed
        );
        for c in world.celestials() {
            println!("  [{}] {}", if c.visited { "x" } else { " " }, c.name);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Astro Voyage (headless) starting...");

    let args = match headless::parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            return std::process::ExitCode::from(2);
        }
    };
    match headless::run(args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation loop needs native threads; there is no web entry point
}

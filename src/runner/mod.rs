//! Threaded game loop
//!
//! A [`Simulation`] owns one loop thread at a time. The thread is the only
//! writer of physics state; presentation reads the world through a
//! [`WorldHandle`] while holding the same mutex, so it never sees a body with
//! a new position and an old velocity.

pub mod scheduler;

pub use scheduler::{Fired, FixedStepScheduler};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::input::{Intent, KeyBindings};
use crate::settings::Settings;
use crate::sim::{TickInput, World, WorldEvent, autopilot, tick};

/// Receives notifications from the loop thread. Called without the world
/// lock held; read state through a [`WorldHandle`].
pub trait WorldObserver: Send + Sync {
    /// Display-rate refresh. `since_tick` is the time since the last physics
    /// tick, for interpolated drawing.
    fn world_updated(&self, since_tick: Duration);

    /// Events produced by a physics tick
    fn world_events(&self, _events: &[WorldEvent]) {}
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared, lock-guarded access to the world
#[derive(Clone)]
pub struct WorldHandle {
    world: Arc<Mutex<World>>,
}

impl WorldHandle {
    fn new(world: World) -> Self {
        Self {
            world: Arc::new(Mutex::new(world)),
        }
    }

    /// Run one read pass under the lock
    pub fn read<R>(&self, f: impl FnOnce(&World) -> R) -> R {
        f(&*lock(&self.world))
    }

    /// Copy of the current world, for drawing without holding the lock
    pub fn snapshot(&self) -> World {
        lock(&self.world).clone()
    }

    fn write<R>(&self, f: impl FnOnce(&mut World) -> R) -> R {
        f(&mut *lock(&self.world))
    }
}

/// State shared with the loop thread
struct Shared {
    world: WorldHandle,
    input: Mutex<TickInput>,
    /// Ignore player input and let the demo pilot fly
    autopilot: AtomicBool,
    observers: Mutex<Vec<Arc<dyn WorldObserver>>>,
}

impl Shared {
    fn observers(&self) -> Vec<Arc<dyn WorldObserver>> {
        lock(&self.observers).clone()
    }
}

/// Sends on drop so `stop` hears about the exit even if the loop panicked
struct ExitSignal(mpsc::Sender<()>);

impl Drop for ExitSignal {
    fn drop(&mut self) {
        let _ = self.0.send(());
    }
}

struct LoopThread {
    run: Arc<AtomicBool>,
    handle: JoinHandle<()>,
    done: mpsc::Receiver<()>,
}

/// The game: a world plus the thread that drives it
pub struct Simulation {
    shared: Arc<Shared>,
    bindings: KeyBindings,
    thread: Option<LoopThread>,
}

impl Simulation {
    pub fn new(world: World) -> Self {
        Self {
            shared: Arc::new(Shared {
                world: WorldHandle::new(world),
                input: Mutex::new(TickInput::default()),
                autopilot: AtomicBool::new(false),
                observers: Mutex::new(Vec::new()),
            }),
            bindings: KeyBindings::default(),
            thread: None,
        }
    }

    /// Generate a world; nothing starts if generation fails
    pub fn new_game(settings: Settings, catalog: &Catalog, seed: u64) -> Result<Self> {
        Ok(Self::new(World::generate(settings, catalog, seed)?))
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn subscribe(&self, observer: Arc<dyn WorldObserver>) {
        lock(&self.shared.observers).push(observer);
    }

    pub fn world(&self) -> WorldHandle {
        self.shared.world.clone()
    }

    pub fn with_world<R>(&self, f: impl FnOnce(&World) -> R) -> R {
        self.shared.world.read(f)
    }

    pub fn snapshot(&self) -> World {
        self.shared.world.snapshot()
    }

    /// Mutate the world between ticks (menu actions such as picking a color)
    pub fn with_world_mut<R>(&self, f: impl FnOnce(&mut World) -> R) -> R {
        self.shared.world.write(f)
    }

    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|t| t.run.load(Ordering::Acquire))
    }

    pub fn set_intent(&self, intent: Intent, active: bool) {
        lock(&self.shared.input).set(intent, active);
    }

    /// Hand the controls to the demo pilot (or take them back)
    pub fn set_autopilot(&self, enabled: bool) {
        self.shared.autopilot.store(enabled, Ordering::Release);
        log::info!("Autopilot {}", if enabled { "engaged" } else { "disengaged" });
    }

    /// Current intents
    pub fn input(&self) -> TickInput {
        *lock(&self.shared.input)
    }

    /// Raw key press; unbound keys are ignored
    pub fn press(&self, key: &str) -> Option<Intent> {
        self.bindings.press(&mut *lock(&self.shared.input), key)
    }

    /// Raw key release; unbound keys are ignored
    pub fn release(&self, key: &str) -> Option<Intent> {
        self.bindings.release(&mut *lock(&self.shared.input), key)
    }

    /// Spawn the loop thread. Does nothing if it is already running or the
    /// game is over.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        // A loop that ended on its own (game over) is finished; reap it
        if let Some(finished) = self.thread.take() {
            if finished.handle.join().is_err() {
                log::error!("Game loop thread panicked");
            }
        }

        let settings = self.shared.world.write(|world| {
            if world.is_over() {
                return None;
            }
            world.running = true;
            Some(world.settings.clone())
        });
        let Some(settings) = settings else {
            log::warn!("Not starting: the game is over");
            return;
        };

        let run = Arc::new(AtomicBool::new(true));
        let (done_tx, done) = mpsc::channel();
        let spawned = thread::Builder::new().name("game-loop".into()).spawn({
            let shared = Arc::clone(&self.shared);
            let run = Arc::clone(&run);
            move || {
                let _exit = ExitSignal(done_tx);
                run_loop(&shared, &run, &settings);
            }
        });

        match spawned {
            Ok(handle) => {
                log::info!("Game loop started");
                self.thread = Some(LoopThread { run, handle, done });
            }
            Err(e) => {
                log::error!("Failed to spawn game loop: {e}");
                self.shared.world.write(|world| world.running = false);
            }
        }
    }

    /// Ask the loop to exit and wait briefly for it. A loop that does not
    /// answer within `stop_timeout` is abandoned, not killed.
    pub fn stop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        thread.run.store(false, Ordering::Release);
        let timeout = self.shared.world.read(|w| w.settings.stop_timeout());

        match thread.done.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if thread.handle.join().is_err() {
                    log::error!("Game loop thread panicked");
                }
                log::info!("Game loop stopped");
            }
            Err(RecvTimeoutError::Timeout) => {
                log::warn!("Game loop did not stop within {timeout:?}; abandoning it");
            }
        }
        self.shared.world.write(|world| world.running = false);
    }

    /// New game: stop, regenerate the world, notify, start again. If the new
    /// world cannot be generated the old one is kept and nothing starts.
    pub fn restart(&mut self, catalog: &Catalog, seed: u64) -> Result<()> {
        self.stop();
        self.shared.world.write(|world| world.reset(catalog, seed))?;
        *lock(&self.shared.input) = TickInput::default();
        for observer in self.shared.observers() {
            observer.world_updated(Duration::ZERO);
        }
        self.start();
        Ok(())
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Body of the loop thread
fn run_loop(shared: &Shared, run: &AtomicBool, settings: &Settings) {
    let mut scheduler = FixedStepScheduler::from_settings(settings);
    let idle = settings.idle_sleep();
    let mut previous = Instant::now();

    while run.load(Ordering::Acquire) {
        let now = Instant::now();
        let fired = scheduler.advance(now.saturating_duration_since(previous));
        previous = now;

        if fired.physics {
            let input = *lock(&shared.input);
            let piloted = shared.autopilot.load(Ordering::Acquire);
            let (events, over) = shared.world.write(|world| {
                let input = if piloted { autopilot::steer(world) } else { input };
                let events = tick(world, &input);
                (events, world.is_over())
            });
            if !events.is_empty() {
                for observer in shared.observers() {
                    observer.world_events(&events);
                }
            }
            if over {
                log::info!("Game over");
                break;
            }
        }

        if fired.display {
            for observer in shared.observers() {
                observer.world_updated(fired.since_tick);
            }
        }

        if !idle.is_zero() {
            thread::sleep(idle);
        }
    }

    // Only a loop that ended on its own owns the running flag. After `stop`
    // cleared `run`, a newer loop may already have set it again.
    shared.world.write(|world| {
        if run.swap(false, Ordering::AcqRel) {
            world.running = false;
        }
    });
}

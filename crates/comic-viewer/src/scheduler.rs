//! Timed auto-advance.
//!
//! The scheduler owns the navigator behind a mutex shared with its tick
//! task. Every run of the timer is tagged with a generation number taken
//! under that mutex; `stop()` bumps the generation under the same mutex, so a
//! tick that was already queued when `stop()` ran sees a stale generation and
//! exits without touching the navigator.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::{Result, ViewerError};
use crate::mode::ModePolicy;
use crate::navigator::{FrameNavigator, FramePosition};

/// Default auto-advance period.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(2_000);

#[derive(Debug)]
struct Playhead {
    navigator: FrameNavigator,
    generation: u64,
}

fn lock(playhead: &Mutex<Playhead>) -> MutexGuard<'_, Playhead> {
    playhead.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Periodically advances a [`FrameNavigator`] while playing.
///
/// Dropping the scheduler stops its timer.
#[derive(Debug)]
pub struct AutoAdvanceScheduler {
    playhead: Arc<Mutex<Playhead>>,
    policy: ModePolicy,
    period: Duration,
    playing: bool,
    task: Option<JoinHandle<()>>,
}

impl AutoAdvanceScheduler {
    /// Bind a scheduler to `navigator`. The scheduler starts paused.
    pub fn new(navigator: FrameNavigator, policy: ModePolicy, period: Duration) -> Self {
        Self {
            playhead: Arc::new(Mutex::new(Playhead {
                navigator,
                generation: 0,
            })),
            policy,
            period: period.max(Duration::from_millis(1)),
            playing: false,
            task: None,
        }
    }

    pub fn policy(&self) -> ModePolicy {
        self.policy
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Requested playback state.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether a timer task is alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Run `f` against the bound navigator.
    pub fn with_navigator<R>(&self, f: impl FnOnce(&mut FrameNavigator) -> R) -> R {
        f(&mut lock(&self.playhead).navigator)
    }

    pub fn position(&self) -> FramePosition {
        self.with_navigator(|nav| nav.position())
    }

    /// Start the timer and mark the scheduler playing. Calling this while
    /// the timer runs does nothing, and so does calling it under a policy
    /// without auto-advance.
    pub fn start(&mut self) -> Result<()> {
        if !self.policy.auto_advance_enabled {
            tracing::debug!(mode = %self.policy.mode, "auto-advance disabled for mode");
            return Ok(());
        }
        if self.is_running() {
            self.playing = true;
            return Ok(());
        }
        let handle = Handle::try_current().map_err(|_| ViewerError::NoRuntime)?;

        let generation = {
            let mut playhead = lock(&self.playhead);
            playhead.generation += 1;
            playhead.generation
        };
        let task = handle.spawn(run_ticks(
            Arc::downgrade(&self.playhead),
            generation,
            self.period,
            self.policy.wrap_on_advance,
        ));
        self.task = Some(task);
        self.playing = true;
        tracing::debug!(generation, period_ms = self.period.as_millis() as u64, "auto-advance started");
        Ok(())
    }

    /// Stop the timer and mark the scheduler paused. No advance happens
    /// after this returns.
    pub fn stop(&mut self) {
        self.playing = false;
        let generation = {
            let mut playhead = lock(&self.playhead);
            playhead.generation += 1;
            playhead.generation
        };
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!(generation, "auto-advance stopped");
        }
    }

    /// Play or pause. Ignored when the policy has no auto-advance.
    pub fn set_playing(&mut self, playing: bool) -> Result<()> {
        if !self.policy.auto_advance_enabled {
            return Ok(());
        }
        if playing {
            self.start()
        } else {
            self.stop();
            Ok(())
        }
    }

    pub fn toggle_playing(&mut self) -> Result<bool> {
        self.set_playing(!self.playing)?;
        Ok(self.playing)
    }

    /// Stop, switch to `policy`, and rewind the navigator to frame 1.
    ///
    /// Playback ends up paused; callers restart it per the new policy.
    pub fn rebind(&mut self, policy: ModePolicy) {
        self.stop();
        self.policy = policy;
        self.with_navigator(FrameNavigator::reset);
    }

    /// Stop and replace the navigator (new comic). Playback ends up paused.
    pub fn replace_navigator(&mut self, navigator: FrameNavigator) {
        self.stop();
        self.with_navigator(|nav| *nav = navigator);
    }
}

impl Drop for AutoAdvanceScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_ticks(playhead: Weak<Mutex<Playhead>>, generation: u64, period: Duration, wrap: bool) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let Some(playhead) = playhead.upgrade() else {
            break;
        };
        let mut playhead = lock(&playhead);
        if playhead.generation != generation {
            break;
        }
        let frame = playhead.navigator.advance(wrap);
        tracing::trace!(generation, frame, "auto-advance tick");
    }
}

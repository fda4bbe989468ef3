use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::countdown::{Countdown, TimerEvent, TimerState};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Schedules [`Countdown::tick`] on a recurring tokio interval.
pub struct TimerDriver;

impl TimerDriver {
    /// Start ticking `countdown` every `period`. Threshold warnings that
    /// already apply are emitted right away.
    ///
    /// The tick task lives exactly as long as the returned handle.
    pub fn spawn(
        countdown: Countdown,
        period: Duration,
    ) -> (TimerHandle, mpsc::UnboundedReceiver<TimerEvent>) {
        let shared = Arc::new(Mutex::new(countdown));
        let (tx, rx) = mpsc::unbounded_channel();

        let task_shared = Arc::clone(&shared);
        let task = tokio::spawn(async move {
            let initial = lock(&task_shared).check_thresholds();
            for event in initial {
                if tx.send(event).is_err() {
                    return;
                }
            }

            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                let events = lock(&task_shared).tick();
                let time_up = events.contains(&TimerEvent::TimeUp);

                for event in events {
                    if tx.send(event).is_err() {
                        tracing::debug!("Timer event receiver dropped, stopping ticks");
                        return;
                    }
                }

                if time_up {
                    tracing::info!("Exam timer reached zero");
                    return;
                }
            }
        });

        (TimerHandle { shared, task }, rx)
    }
}

/// Owner of a running countdown. Dropping it cancels the tick task.
pub struct TimerHandle {
    shared: Arc<Mutex<Countdown>>,
    task: JoinHandle<()>,
}

impl TimerHandle {
    pub fn toggle_pause(&self) -> TimerState {
        let mut countdown = lock(&self.shared);
        countdown.toggle_pause();
        countdown.state()
    }

    pub fn toggle_visibility(&self) -> bool {
        let mut countdown = lock(&self.shared);
        countdown.toggle_visibility();
        countdown.is_visible()
    }

    pub fn display(&self) -> String {
        lock(&self.shared).display()
    }

    pub fn remaining(&self) -> u64 {
        lock(&self.shared).remaining()
    }

    #[allow(dead_code)]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn lock(shared: &Mutex<Countdown>) -> MutexGuard<'_, Countdown> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

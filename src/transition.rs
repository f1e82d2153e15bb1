//! Debounced y-scale transitions.
//!
//! When the grouped window's y-scale changes the axis should animate to the new
//! bounds, but a fast swipe through several pages would otherwise queue one
//! animation per page. [`ScaleTransition`] keeps a single outstanding timer:
//! every request replaces the previous one and restarts the settle delay, so a
//! burst of changes collapses into one delivered scale.
//!
//! The timer lives on one background worker thread. Requests reach it over an
//! `mpsc` channel; the settled scale comes back over a second channel that the
//! UI loop drains with [`ScaleTransition::poll`]. The synchronous window
//! recomputation never waits on it.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, SendError, Sender};
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

use crate::scale::YScale;

/// Default settle delay before a requested scale is delivered
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(200);

enum TimerCommand {
    /// Arm (or re-arm) the timer for this generation and target
    Schedule(u64, YScale),
    Disarm,
}

/// Cancellable, debounced delivery of y-scale targets
pub struct ScaleTransition {
    delay: Duration,
    generation: u64,
    commands: Option<Sender<TimerCommand>>,
    worker: Option<ThreadId>,
    sender: Sender<(u64, YScale)>,
    receiver: Receiver<(u64, YScale)>,
    pending: Option<YScale>,
}

impl ScaleTransition {
    pub fn new(delay: Duration) -> Self {
        let (sender, receiver) = channel();
        Self {
            delay,
            generation: 0,
            commands: None,
            worker: None,
            sender,
            receiver,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Target of the outstanding timer, if one is scheduled
    pub fn pending(&self) -> Option<YScale> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Thread running the timer; `None` until the first request
    pub fn worker(&self) -> Option<ThreadId> {
        self.worker
    }

    /// Schedule `target` for delivery after the settle delay, replacing any
    /// previously scheduled target
    pub fn request(&mut self, target: YScale) {
        self.generation += 1;
        self.pending = Some(target);
        self.send(TimerCommand::Schedule(self.generation, target));

        tracing::trace!(
            "Scheduled y-scale transition #{} to [{}, {}]",
            self.generation,
            target.lower,
            target.upper
        );
    }

    /// Disarm the outstanding timer without scheduling a new one
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
        if let Some(commands) = &self.commands {
            // A dead worker has no timer left to disarm
            let _ = commands.send(TimerCommand::Disarm);
        }
    }

    /// Non-blocking: the settled scale if the latest timer has fired
    pub fn poll(&mut self) -> Option<YScale> {
        let mut settled = None;
        while let Ok((generation, scale)) = self.receiver.try_recv() {
            if generation == self.generation {
                settled = Some(scale);
            }
        }
        if settled.is_some() {
            self.pending = None;
        }
        settled
    }

    /// Block up to `timeout` for the latest timer to fire
    pub fn wait(&mut self, timeout: Duration) -> Option<YScale> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok((generation, scale)) => {
                    if generation == self.generation {
                        self.pending = None;
                        return Some(scale);
                    }
                }
                Err(_) => return None,
            }
        }
    }

    fn send(&mut self, command: TimerCommand) {
        let command = match &self.commands {
            Some(commands) => match commands.send(command) {
                Ok(()) => return,
                Err(SendError(command)) => command,
            },
            None => command,
        };

        let commands = self.spawn_worker();
        if commands.send(command).is_err() {
            tracing::warn!("Y-scale transition worker exited before accepting a request");
        }
    }

    fn spawn_worker(&mut self) -> &Sender<TimerCommand> {
        let (commands, inbox) = channel();
        let results = self.sender.clone();
        let delay = self.delay;

        let handle = thread::spawn(move || run_timer(delay, inbox, results));
        self.worker = Some(handle.thread().id());
        tracing::debug!("Started y-scale transition worker ({:?})", self.worker);

        self.commands.insert(commands)
    }
}

impl Default for ScaleTransition {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DELAY)
    }
}

/// Timer loop: every command restarts the wait; a full quiet `delay` fires the
/// armed target. Exits once the owning [`ScaleTransition`] is dropped.
fn run_timer(delay: Duration, inbox: Receiver<TimerCommand>, results: Sender<(u64, YScale)>) {
    let mut armed: Option<(u64, YScale)> = None;
    loop {
        let next = match armed {
            Some(_) => inbox.recv_timeout(delay),
            None => inbox.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match next {
            Ok(TimerCommand::Schedule(generation, target)) => armed = Some((generation, target)),
            Ok(TimerCommand::Disarm) => armed = None,
            Err(RecvTimeoutError::Timeout) => {
                if let Some(fired) = armed.take() {
                    if results.send(fired).is_err() {
                        return;
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}

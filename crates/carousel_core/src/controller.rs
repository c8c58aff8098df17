use std::{
    fmt,
    mem,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use shared::{
    domain::{IndexChange, NavigationCause},
    error::CarouselError,
};
use tokio::{sync::broadcast, task::JoinHandle, time::Instant};
use tracing::{debug, info, warn};

use crate::auto_advance;

const EVENT_CHANNEL_CAPACITY: usize = 64;
/// Deadline used when `now + interval` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

type Observer = Arc<dyn Fn(&IndexChange) + Send + Sync>;

/// Handle returned by [`CarouselController::observe`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselOptions {
    pub start_index: usize,
    /// Re-arm the auto-advance countdown after a user-driven index change.
    pub restart_on_navigate: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            start_index: 0,
            restart_on_navigate: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct AutoAdvanceTimer {
    pub(crate) generation: u64,
    pub(crate) interval: Duration,
    pub(crate) deadline: Instant,
}

pub(crate) struct CarouselState {
    slide_count: usize,
    current_index: usize,
    restart_on_navigate: bool,
    auto_advance: Option<AutoAdvanceTimer>,
    next_generation: u64,
    next_sequence: u64,
}

impl CarouselState {
    fn navigate(&mut self, target: usize, cause: NavigationCause) -> Option<IndexChange> {
        if target == self.current_index {
            return None;
        }
        let previous = mem::replace(&mut self.current_index, target);

        if self.restart_on_navigate && cause.is_user_driven() {
            if let Some(timer) = self.auto_advance.as_mut() {
                timer.deadline = deadline_after(timer.interval);
            }
        }

        self.next_sequence += 1;
        Some(
            IndexChange::new(previous, target, self.slide_count, cause)
                .with_sequence(self.next_sequence),
        )
    }

    fn step_forward(&mut self, cause: NavigationCause) -> Option<IndexChange> {
        let target = (self.current_index + 1) % self.slide_count;
        self.navigate(target, cause)
    }

    fn step_backward(&mut self, cause: NavigationCause) -> Option<IndexChange> {
        let target = (self.current_index + self.slide_count - 1) % self.slide_count;
        self.navigate(target, cause)
    }

    fn arm_timer(&mut self, interval: Duration) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.auto_advance = Some(AutoAdvanceTimer {
            generation,
            interval,
            deadline: deadline_after(interval),
        });
        generation
    }
}

fn deadline_after(interval: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(interval)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

pub(crate) enum Tick {
    Fired,
    Rearmed,
    Retired,
}

pub(crate) struct Shared {
    state: Mutex<CarouselState>,
    observers: Mutex<Vec<(ObserverId, Observer)>>,
    next_observer_id: AtomicU64,
    events: broadcast::Sender<IndexChange>,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, CarouselState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_observers(&self) -> MutexGuard<'_, Vec<(ObserverId, Observer)>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(
        &self,
        op: impl FnOnce(&mut CarouselState) -> Option<IndexChange>,
    ) -> Option<IndexChange> {
        let change = op(&mut self.lock_state());
        if let Some(change) = &change {
            self.notify(change);
        }
        change
    }

    fn notify(&self, change: &IndexChange) {
        debug!(
            previous = change.previous,
            current = change.current,
            cause = ?change.cause,
            "carousel index changed"
        );

        let observers = self
            .lock_observers()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect::<Vec<_>>();
        for observer in observers {
            observer(change);
        }

        let _ = self.events.send(*change);
    }

    /// Deadline of the timer with `generation`, or `None` once it is no longer active.
    pub(crate) fn timer_deadline(&self, generation: u64) -> Option<Instant> {
        self.lock_state()
            .auto_advance
            .filter(|timer| timer.generation == generation)
            .map(|timer| timer.deadline)
    }

    pub(crate) fn auto_advance_tick(&self, generation: u64) -> Tick {
        let change = {
            let mut state = self.lock_state();
            let Some(timer) = state
                .auto_advance
                .as_mut()
                .filter(|timer| timer.generation == generation)
            else {
                return Tick::Retired;
            };

            let now = Instant::now();
            if now < timer.deadline {
                return Tick::Rearmed;
            }
            timer.deadline = deadline_after(timer.interval);
            state.step_forward(NavigationCause::AutoAdvance)
        };

        if let Some(change) = &change {
            self.notify(change);
        }
        Tick::Fired
    }
}

/// Owns the current index over a fixed ring of slides.
///
/// Navigation wraps in both directions and never leaves `0..slide_count`.
/// Observers and event subscribers hear about every change of the index,
/// and nothing else. At most one auto-advance timer is active per
/// controller; dropping the controller cancels it.
///
/// Observers run after the state lock is released. When a timer tick and a
/// user call race on a multi-threaded runtime their notifications may arrive
/// out of order; [`IndexChange::sequence`] follows the order the state changed.
pub struct CarouselController {
    shared: Arc<Shared>,
    timer_task: Mutex<Option<JoinHandle<()>>>,
}

impl CarouselController {
    pub fn new(slide_count: usize) -> Result<Self, CarouselError> {
        Self::with_options(slide_count, CarouselOptions::default())
    }

    pub fn with_options(
        slide_count: usize,
        options: CarouselOptions,
    ) -> Result<Self, CarouselError> {
        if slide_count == 0 {
            return Err(CarouselError::invalid_configuration(
                "slide count must be at least 1",
            ));
        }
        if options.start_index >= slide_count {
            return Err(CarouselError::invalid_configuration(format!(
                "start index {} is outside 0..{slide_count}",
                options.start_index
            )));
        }

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(CarouselState {
                    slide_count,
                    current_index: options.start_index,
                    restart_on_navigate: options.restart_on_navigate,
                    auto_advance: None,
                    next_generation: 0,
                    next_sequence: 0,
                }),
                observers: Mutex::new(Vec::new()),
                next_observer_id: AtomicU64::new(1),
                events,
            }),
            timer_task: Mutex::new(None),
        })
    }

    pub fn current_index(&self) -> usize {
        self.shared.lock_state().current_index
    }

    pub fn slide_count(&self) -> usize {
        self.shared.lock_state().slide_count
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.shared.lock_state().auto_advance.is_some()
    }

    pub fn auto_advance_interval(&self) -> Option<Duration> {
        self.shared
            .lock_state()
            .auto_advance
            .map(|timer| timer.interval)
    }

    /// Jumps to `index`. Out-of-range requests are ignored.
    pub fn go_to(&self, index: usize) -> Option<IndexChange> {
        self.shared.apply(|state| {
            if index >= state.slide_count {
                debug!(
                    index,
                    slide_count = state.slide_count,
                    "ignoring out-of-range carousel index"
                );
                return None;
            }
            state.navigate(index, NavigationCause::GoTo)
        })
    }

    pub fn next(&self) -> Option<IndexChange> {
        self.shared
            .apply(|state| state.step_forward(NavigationCause::Next))
    }

    pub fn previous(&self) -> Option<IndexChange> {
        self.shared
            .apply(|state| state.step_backward(NavigationCause::Previous))
    }

    /// Starts calling [`next`](Self::next) once per `interval`, replacing any
    /// timer that is already running. A zero interval stops auto-advance.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn start_auto_advance(&self, interval: Duration) {
        if interval.is_zero() {
            warn!("zero auto-advance interval requested; stopping auto-advance");
            self.stop_auto_advance();
            return;
        }

        let mut slot = self.lock_timer_task();
        let generation = self.shared.lock_state().arm_timer(interval);
        let task = tokio::spawn(auto_advance::run(Arc::downgrade(&self.shared), generation));
        if let Some(previous) = slot.replace(task) {
            previous.abort();
        }

        info!(
            ?interval,
            generation, "carousel auto-advance started"
        );
    }

    pub fn stop_auto_advance(&self) {
        let mut slot = self.lock_timer_task();
        let stopped = self.shared.lock_state().auto_advance.take();
        if let Some(task) = slot.take() {
            task.abort();
        }

        if let Some(timer) = stopped {
            info!(generation = timer.generation, "carousel auto-advance stopped");
        }
    }

    /// Registers `observer` to run after every index change.
    pub fn observe(&self, observer: impl Fn(&IndexChange) + Send + Sync + 'static) -> ObserverId {
        let id = ObserverId(self.shared.next_observer_id.fetch_add(1, Ordering::Relaxed));
        let observer: Observer = Arc::new(observer);
        self.shared.lock_observers().push((id, observer));
        id
    }

    pub fn unobserve(&self, id: ObserverId) -> bool {
        let mut observers = self.shared.lock_observers();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<IndexChange> {
        self.shared.events.subscribe()
    }

    fn lock_timer_task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.timer_task.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.stop_auto_advance();
    }
}

impl fmt::Debug for CarouselController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock_state();
        f.debug_struct("CarouselController")
            .field("slide_count", &state.slide_count)
            .field("current_index", &state.current_index)
            .field("auto_advance", &state.auto_advance)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

use foundation::time::Millis;

/// A payload handed back by [`Debouncer::poll`] once its deadline passed.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    /// Generation the payload was scheduled under.
    pub generation: u64,
    pub due: Millis,
    pub payload: T,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    generation: u64,
    due: Millis,
    payload: T,
}

/// Trailing-edge debounce with a single pending slot.
///
/// Scheduling replaces whatever is pending, so in a burst of calls only the
/// last payload fires, `delay_ms` after the last call. Nothing is queued.
/// Time is supplied by the caller, which keeps the timer deterministic.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Arms the timer. Returns `true` if a pending payload was dropped.
    pub fn schedule(&mut self, now: Millis, generation: u64, payload: T) -> bool {
        let replaced = self.pending.is_some();
        self.pending = Some(Pending {
            generation,
            due: now.after(self.delay_ms),
            payload,
        });
        replaced
    }

    /// Returns `true` if something was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due(&self) -> Option<Millis> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Takes the pending payload if its deadline is at or before `now`.
    pub fn poll(&mut self, now: Millis) -> Option<Fired<T>> {
        if self.pending.as_ref()?.due > now {
            return None;
        }
        let p = self.pending.take()?;
        Some(Fired {
            generation: p.generation,
            due: p.due,
            payload: p.payload,
        })
    }
}

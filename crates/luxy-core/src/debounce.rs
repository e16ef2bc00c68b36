/// Trailing-edge debounce over a host timer handle.
///
/// Every [`Debouncer::trigger`] replaces the pending timer, so a burst of
/// events yields one expiry, `delay` after the last event.
#[derive(Debug)]
pub struct Debouncer<T> {
    pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T: Copy> Debouncer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between the first event of a burst and the timer firing.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record the new timer and hand back the one it supersedes, which the caller must clear.
    ///
    /// Returns `(was_idle, superseded)`; `was_idle` is true for the first event of a burst.
    pub fn trigger(&mut self, timer: T) -> (bool, Option<T>) {
        let previous = self.pending.replace(timer);
        (previous.is_none(), previous)
    }

    /// Called when the timer fires. Returns false if nothing was pending.
    pub fn elapse(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Forget the pending timer, returning it so the caller can clear it.
    pub fn reset(&mut self) -> Option<T> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_keeps_only_latest_timer() {
        let mut d = Debouncer::new();
        assert_eq!(d.trigger(1u32), (true, None));
        assert_eq!(d.trigger(2), (false, Some(1)));
        assert_eq!(d.trigger(3), (false, Some(2)));
        assert!(d.is_pending());
        assert!(d.elapse());
        assert!(!d.is_pending());
        assert!(!d.elapse());
    }

    #[test]
    fn reset_returns_pending_timer() {
        let mut d = Debouncer::new();
        assert_eq!(d.reset(), None::<u32>);
        d.trigger(7u32);
        assert_eq!(d.reset(), Some(7));
        assert!(!d.is_pending());
    }
}

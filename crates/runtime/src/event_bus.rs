/// Handle returned by [`EventBus::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Synchronous, single-threaded publish/subscribe channel.
///
/// Ordering contract:
/// - `emit` invokes listeners on the calling thread, in registration order.
/// - A listener removed with `unsubscribe` never sees a later event.
pub struct EventBus<E> {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn FnMut(&E)>)>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `true` if the listener was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Delivers `event` to every listener and returns how many were called.
    pub fn emit(&mut self, event: &E) -> usize {
        for (_id, listener) in &mut self.listeners {
            listener(event);
        }
        self.listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delivers_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus: EventBus<u32> = EventBus::new();

        let l = log.clone();
        bus.subscribe(move |e| l.borrow_mut().push(format!("b{e}")));
        let l = log.clone();
        bus.subscribe(move |e| l.borrow_mut().push(format!("a{e}")));

        assert_eq!(bus.emit(&7), 2);
        assert_eq!(*log.borrow(), vec!["b7".to_string(), "a7".to_string()]);
    }

    #[test]
    fn unsubscribed_listener_is_silent() {
        let hits = Rc::new(RefCell::new(0));
        let mut bus: EventBus<()> = EventBus::new();
        let h = hits.clone();
        let id = bus.subscribe(move |_| *h.borrow_mut() += 1);

        bus.emit(&());
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(&());

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(bus.listener_count(), 0);
    }
}

//! Purchase-completion observer list.

use std::fmt;

/// Handle returned by [`OnBuy::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Zero-argument handlers fired once per completed purchase.
///
/// Handlers run synchronously in registration order. Wiring them up is
/// the caller's job; the list only guarantees ordering and that each
/// [`notify`](Self::notify) runs every handler exactly once.
#[derive(Default)]
pub struct OnBuy {
    next_id: u64,
    handlers: Vec<(HandlerId, Box<dyn FnMut()>)>,
}

impl OnBuy {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler.
    pub fn subscribe(&mut self, handler: impl FnMut() + 'static) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    /// Run every handler once, in registration order.
    pub fn notify(&mut self) {
        for (_, handler) in &mut self.handlers {
            handler();
        }
    }

    /// Number of subscribed handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for OnBuy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnBuy")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut on_buy = OnBuy::new();

        for n in 0..3 {
            let log = Rc::clone(&log);
            on_buy.subscribe(move || log.borrow_mut().push(n));
        }

        on_buy.notify();
        assert_eq!(*log.borrow(), vec![0, 1, 2]);

        on_buy.notify();
        assert_eq!(*log.borrow(), vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut on_buy = OnBuy::new();

        let c = Rc::clone(&count);
        let first = on_buy.subscribe(move || *c.borrow_mut() += 1);
        let c = Rc::clone(&count);
        on_buy.subscribe(move || *c.borrow_mut() += 10);

        assert!(on_buy.unsubscribe(first));
        assert!(!on_buy.unsubscribe(first));
        assert_eq!(on_buy.len(), 1);

        on_buy.notify();
        assert_eq!(*count.borrow(), 10);
    }
}

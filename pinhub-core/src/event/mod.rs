//! Synchronous event dispatch
//!
//! Listeners subscribe to an event kind, a zero-sized marker type that
//! names the event value it carries. Publishing calls every listener of
//! that kind in subscription order and returns once all of them have run.
//! There is no queue and no priority.
//!
//! Event values may borrow from their publisher for exactly the duration of
//! dispatch, which is why the event type is a generic associated type.
//! Listeners only ever see the event, never the dispatcher, so a listener
//! cannot subscribe or publish while a publish is in progress.

mod pin;

pub use pin::{PinEvent, PinEvents};

use heapless::Vec;

/// A statically distinguishable kind of event
pub trait EventKind {
    /// Event value, possibly borrowing from the publisher
    type Event<'a>;
}

/// Event listener
pub trait Handler<K: EventKind> {
    /// Handle one event
    fn handle(&mut self, event: &mut K::Event<'_>);
}

impl<K, F> Handler<K> for F
where
    K: EventKind,
    F: for<'a, 'b> FnMut(&'b mut K::Event<'a>),
{
    fn handle(&mut self, event: &mut K::Event<'_>) {
        self(event)
    }
}

/// Error subscribing a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// The subscriber list is at capacity
    Full,
}

/// Fan-out dispatcher for one event kind
///
/// Holds up to `N` borrowed listeners that must outlive the dispatcher.
pub struct Dispatcher<'h, K: EventKind, const N: usize> {
    handlers: Vec<&'h mut dyn Handler<K>, N>,
}

impl<'h, K: EventKind, const N: usize> Default for Dispatcher<'h, K, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'h, K: EventKind, const N: usize> Dispatcher<'h, K, N> {
    /// Create a dispatcher with no listeners
    pub const fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Append a listener; it runs after every listener already subscribed
    pub fn subscribe(&mut self, handler: &'h mut dyn Handler<K>) -> Result<(), DispatchError> {
        self.handlers.push(handler).map_err(|_| DispatchError::Full)
    }

    /// Deliver an event to every listener in subscription order
    ///
    /// Returns the number of listeners invoked.
    pub fn publish(&mut self, event: &mut K::Event<'_>) -> usize {
        for handler in self.handlers.iter_mut() {
            handler.handle(event);
        }
        self.handlers.len()
    }

    /// Number of subscribed listeners
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check whether no listener is subscribed
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::vec::Vec as StdVec;

    struct Counter;

    impl EventKind for Counter {
        type Event<'a> = u32;
    }

    /// Event borrowing a caller-owned buffer
    struct Trace;

    impl EventKind for Trace {
        type Event<'a> = &'a mut StdVec<&'static str>;
    }

    struct Tag<'l> {
        name: &'static str,
        log: &'l RefCell<StdVec<(&'static str, u32)>>,
    }

    impl Handler<Counter> for Tag<'_> {
        fn handle(&mut self, event: &mut u32) {
            self.log.borrow_mut().push((self.name, *event));
            *event += 1;
        }
    }

    #[test]
    fn test_fan_out_in_subscription_order() {
        let log = RefCell::new(StdVec::new());
        let mut first = Tag { name: "first", log: &log };
        let mut second = Tag { name: "second", log: &log };
        let mut third = Tag { name: "third", log: &log };

        let mut dispatcher: Dispatcher<'_, Counter, 4> = Dispatcher::new();
        dispatcher.subscribe(&mut first).unwrap();
        dispatcher.subscribe(&mut second).unwrap();
        dispatcher.subscribe(&mut third).unwrap();

        let mut event = 0;
        assert_eq!(dispatcher.publish(&mut event), 3);

        // Each listener sees the mutation made by the one before it
        assert_eq!(
            *log.borrow(),
            [("first", 0), ("second", 1), ("third", 2)]
        );
        assert_eq!(event, 3);
    }

    #[test]
    fn test_capacity() {
        let mut a = |_: &mut u32| {};
        let mut b = |_: &mut u32| {};
        let mut dispatcher: Dispatcher<'_, Counter, 1> = Dispatcher::new();

        assert_eq!(dispatcher.subscribe(&mut a), Ok(()));
        assert_eq!(dispatcher.subscribe(&mut b), Err(DispatchError::Full));
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn test_publish_without_listeners() {
        let mut dispatcher: Dispatcher<'_, Counter, 2> = Dispatcher::default();
        let mut event = 7;
        assert!(dispatcher.is_empty());
        assert_eq!(dispatcher.publish(&mut event), 0);
        assert_eq!(event, 7);
    }

    #[test]
    fn test_borrowed_event() {
        let mut push = |event: &mut &mut StdVec<&'static str>| event.push("seen");
        let mut dispatcher: Dispatcher<'_, Trace, 2> = Dispatcher::new();
        dispatcher.subscribe(&mut push).unwrap();

        let mut buffer = StdVec::new();
        dispatcher.publish(&mut &mut buffer);
        dispatcher.publish(&mut &mut buffer);

        assert_eq!(buffer, ["seen", "seen"]);
    }
}

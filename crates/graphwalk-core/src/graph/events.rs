//! Graph mutation events.
//!
//! Mutable containers publish a [`GraphEvent`] for every change. Removal and
//! clear events are published before the change is applied, so a listener
//! returning an error vetoes it. Addition events are published after the
//! element is in place; an error takes the element back out again, and
//! listeners that already accepted the addition are not told.
//!
//! A listener returns [`ListenerStatus::Detach`] to remove itself, which is
//! how a listener whose owner has been dropped cleans up without the
//! container knowing who owned it.

use std::fmt;

use graphwalk_common::Result;

/// A change to a graph's vertex or edge set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEvent<V, E> {
    /// A vertex was added.
    VertexAdded(V),
    /// A vertex is about to be removed.
    VertexRemoved(V),
    /// An edge was added.
    EdgeAdded(E),
    /// An edge is about to be removed.
    EdgeRemoved(E),
    /// All vertices and edges are about to be removed.
    Cleared,
}

/// What a listener wants after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerStatus {
    /// Keep receiving events.
    Keep,
    /// Remove this listener.
    Detach,
}

/// Handle returned by [`subscribe`](super::ObservableGraph::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// A boxed mutation listener.
pub type GraphListener<V, E> = Box<dyn FnMut(&GraphEvent<V, E>) -> Result<ListenerStatus>>;

/// Ordered listener registry used by mutable containers.
pub struct Listeners<V, E> {
    next_id: u64,
    entries: Vec<(ListenerId, GraphListener<V, E>)>,
}

impl<V, E> Listeners<V, E> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Registers a listener at the end of the delivery order.
    pub fn subscribe(&mut self, listener: GraphListener<V, E>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers `event` to every listener in registration order.
    ///
    /// Stops at the first error and returns it; later listeners do not see
    /// the event.
    pub fn notify(&mut self, event: &GraphEvent<V, E>) -> Result<()> {
        let mut i = 0;
        while i < self.entries.len() {
            match (self.entries[i].1)(event)? {
                ListenerStatus::Keep => i += 1,
                ListenerStatus::Detach => {
                    self.entries.remove(i);
                }
            }
        }
        Ok(())
    }
}

impl<V, E> Default for Listeners<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> fmt::Debug for Listeners<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use graphwalk_common::Error;

    use super::*;

    type Event = GraphEvent<u32, (u32, u32)>;

    #[test]
    fn test_notify_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners: Listeners<u32, (u32, u32)> = Listeners::new();

        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            listeners.subscribe(Box::new(move |_: &Event| {
                log.borrow_mut().push(name);
                Ok(ListenerStatus::Keep)
            }));
        }

        listeners.notify(&GraphEvent::VertexAdded(1)).unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_detach_removes_listener() {
        let mut listeners: Listeners<u32, (u32, u32)> = Listeners::new();
        listeners.subscribe(Box::new(|_: &Event| Ok(ListenerStatus::Detach)));
        assert_eq!(listeners.len(), 1);

        listeners.notify(&GraphEvent::Cleared).unwrap();
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_error_stops_delivery() {
        let reached = Rc::new(RefCell::new(false));
        let mut listeners: Listeners<u32, (u32, u32)> = Listeners::new();
        listeners.subscribe(Box::new(|_: &Event| {
            Err(Error::Unsupported("no".to_string()))
        }));
        let flag = Rc::clone(&reached);
        listeners.subscribe(Box::new(move |_: &Event| {
            *flag.borrow_mut() = true;
            Ok(ListenerStatus::Keep)
        }));

        assert!(listeners.notify(&GraphEvent::VertexRemoved(3)).is_err());
        assert!(!*reached.borrow());
    }

    #[test]
    fn test_unsubscribe() {
        let mut listeners: Listeners<u32, (u32, u32)> = Listeners::new();
        let id = listeners.subscribe(Box::new(|_: &Event| Ok(ListenerStatus::Keep)));
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
    }
}

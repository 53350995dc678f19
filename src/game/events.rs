//! Game Events
//!
//! Minimal synchronous publish/subscribe. Input sources, the engine and any
//! observers talk through it without knowing about each other.

use std::collections::BTreeMap;

use crate::game::direction::Direction;

/// Event names handlers subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// A direction was requested, whether or not anything moved.
    Move,
    /// A move changed the board and a tile was spawned.
    MoveComplete,
}

/// Event payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// Direction requested by an input source
    Move(Direction),
    /// Move applied to the board
    MoveComplete,
}

impl GameEvent {
    /// Name this event is delivered under.
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Move(_) => EventKind::Move,
            GameEvent::MoveComplete => EventKind::MoveComplete,
        }
    }
}

/// Token returned by [`EventBus::on`]; pass it to [`EventBus::off`] to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

type Handler = Box<dyn FnMut(&GameEvent)>;

/// Handler registry keyed by event kind.
#[derive(Default)]
pub struct EventBus {
    handlers: BTreeMap<EventKind, Vec<(HandlerId, Handler)>>,
    next_handler_id: u64,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Handlers for the same kind run in registration order.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> HandlerId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = HandlerId(self.next_handler_id);
        self.next_handler_id += 1;
        self.handlers.entry(kind).or_default().push((id, Box::new(handler)));
        id
    }

    /// Remove exactly the handler registered under `id`.
    ///
    /// Returns false if no such handler is registered for `kind`.
    pub fn off(&mut self, kind: EventKind, id: HandlerId) -> bool {
        let Some(list) = self.handlers.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(handler_id, _)| *handler_id != id);
        list.len() != before
    }

    /// Deliver `event` to every handler of its kind, synchronously.
    pub fn emit(&mut self, event: &GameEvent) {
        if let Some(list) = self.handlers.get_mut(&event.kind()) {
            for (_, handler) in list.iter_mut() {
                handler(event);
            }
        }
    }

    /// Number of handlers registered for `kind`.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("move_handlers", &self.handler_count(EventKind::Move))
            .field("move_complete_handlers", &self.handler_count(EventKind::MoveComplete))
            .finish()
    }
}

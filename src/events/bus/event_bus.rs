// src/events/bus/event_bus.rs
//
// Synchronous event bus.
//
// Handlers run on the emitting thread, in subscription order, before
// `emit` returns. Every emission is written to the log facade and kept in
// a bounded in-memory journal that tests and diagnostics read back.

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use crate::events::types::DomainEvent;

/// Journal entries kept before the oldest are dropped
pub const EVENT_LOG_CAPACITY: usize = 512;

type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// Shared handle; clones see the same handlers and journal
#[derive(Clone)]
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,
    event_log: Arc<RwLock<VecDeque<EventLogEntry>>>,
    capacity: usize,
}

/// One emission as recorded in the journal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }

    /// Bus whose journal keeps at most `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    /// Register a handler for events of type `E`
    ///
    /// ```ignore
    /// bus.subscribe::<WinnerRecorded, _>(|event| {
    ///     log::info!("Winner recorded: {}", event.full_name);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: EventHandler = Box::new(move |event: &dyn Any| {
            match event.downcast_ref::<E>() {
                Some(event) => handler(event),
                None => log::error!(
                    "Event handler for {} received another type",
                    std::any::type_name::<E>()
                ),
            }
        });

        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(TypeId::of::<E>())
            .or_default()
            .push(wrapped);
    }

    /// Journal the event, then run its handlers.
    /// A panicking handler is logged and does not stop the others.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        let event_handlers = handlers.get(&TypeId::of::<E>());

        let entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count: event_handlers.map_or(0, Vec::len),
        };
        log::info!(
            "[EVENT] {} (id: {}) | {} handlers",
            entry.event_type,
            entry.event_id,
            entry.handler_count
        );
        self.record(entry);

        for (index, handler) in event_handlers.into_iter().flatten().enumerate() {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler(&event as &dyn Any)
            }));
            if let Err(panic) = outcome {
                log::error!(
                    "Handler {} for {} panicked: {:?}",
                    index,
                    event.event_type(),
                    panic
                );
            }
        }
    }

    /// Journal contents, oldest first
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn clear_event_log(&self) {
        self.event_log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn subscriber_count<E: 'static>(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    fn record(&self, entry: EventLogEntry) {
        let mut log = self.event_log.write().unwrap_or_else(PoisonError::into_inner);
        if log.len() == self.capacity {
            log.pop_front();
        }
        log.push_back(entry);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

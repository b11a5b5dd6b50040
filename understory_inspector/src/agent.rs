// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Agent interface and a listener registry.
//!
//! ## Overview
//!
//! The agent is the developer-tools side of an inspection: it tells sessions
//! when to start and stop, and receives the elements they select. Sessions
//! only consume the [`Agent`] trait; transports live elsewhere.
//!
//! [`EventEmitter`] is a small registry of listener handles keyed by
//! [`AgentEvent`]. It is single-threaded and uses interior mutability so that
//! listeners can register or remove listeners (including themselves) while an
//! event is being emitted. Emission walks a snapshot taken when `emit` starts.
//!
//! [`LocalAgent`] combines an emitter with an outbox of [`AgentMessage`]s and
//! is enough to drive a session in-process.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_inspector::agent::{AgentEvent, EventEmitter};
//!
//! let emitter = EventEmitter::new();
//! let hits = Rc::new(Cell::new(0));
//! let h = hits.clone();
//! let id = emitter.add_listener(AgentEvent::StartInspectingNative, Rc::new(move || h.set(h.get() + 1)));
//!
//! assert_eq!(emitter.emit(AgentEvent::StartInspectingNative), 1);
//! assert!(emitter.remove_listener(AgentEvent::StartInspectingNative, id));
//! assert!(!emitter.remove_listener(AgentEvent::StartInspectingNative, id));
//! assert_eq!(emitter.emit(AgentEvent::StartInspectingNative), 0);
//! assert_eq!(hits.get(), 1);
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

/// Named, zero-argument events emitted by an agent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AgentEvent {
    /// The agent is going away; listeners should unsubscribe.
    Shutdown,
    /// Begin capturing input for inspection.
    StartInspectingNative,
    /// Stop capturing input.
    StopInspectingNative,
}

impl AgentEvent {
    /// Wire name of the event.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shutdown => "shutdown",
            Self::StartInspectingNative => "startInspectingNative",
            Self::StopInspectingNative => "stopInspectingNative",
        }
    }

    /// Look up an event by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "shutdown" => Some(Self::Shutdown),
            "startInspectingNative" => Some(Self::StartInspectingNative),
            "stopInspectingNative" => Some(Self::StopInspectingNative),
            _ => None,
        }
    }
}

/// Handle returned by [`Agent::add_listener`], used to remove that listener.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ListenerId(u64);

/// Callback invoked when an event is emitted.
pub type Listener = Rc<dyn Fn()>;

/// The developer-tools agent as seen by an inspection session.
///
/// All methods take `&self`; implementations are expected to be
/// single-threaded and use interior mutability, since listeners may call
/// back into the agent while it is emitting.
pub trait Agent {
    /// Handle that identifies a selectable element.
    type Node;

    /// Register `listener` for `event`.
    fn add_listener(&self, event: AgentEvent, listener: Listener) -> ListenerId;

    /// Remove a listener. Returns false if `id` is not registered for `event`.
    fn remove_listener(&self, event: AgentEvent, id: ListenerId) -> bool;

    /// Report the element selected under the pointer.
    fn select_node(&self, node: Self::Node);

    /// Report that inspection stopped on the inspected side.
    fn stop_inspecting_native(&self, notify_agent: bool);
}

struct Entry {
    event: AgentEvent,
    id: ListenerId,
    listener: Listener,
}

/// Listener registry keyed by [`AgentEvent`].
///
/// Listeners for one event run in registration order.
#[derive(Default)]
pub struct EventEmitter {
    next_id: Cell<u64>,
    entries: RefCell<Vec<Entry>>,
}

impl core::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("next_id", &self.next_id.get())
            .field("listeners", &self.entries.borrow().len())
            .finish()
    }
}

impl EventEmitter {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `event` and return its handle.
    pub fn add_listener(&self, event: AgentEvent, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push(Entry {
            event,
            id,
            listener,
        });
        id
    }

    /// Remove the listener `id` registered for `event`.
    ///
    /// Returns false when nothing matched, for example on a second removal.
    pub fn remove_listener(&self, event: AgentEvent, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries.iter().position(|e| e.event == event && e.id == id) {
            Some(pos) => {
                entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Invoke every listener registered for `event` and return how many ran.
    ///
    /// The listener set is snapshotted first: listeners removed during the
    /// emission still run this time, listeners added during it do not.
    pub fn emit(&self, event: AgentEvent) -> usize {
        let snapshot: Vec<Listener> = self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.event == event)
            .map(|e| e.listener.clone())
            .collect();
        for listener in &snapshot {
            listener();
        }
        snapshot.len()
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: AgentEvent) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.event == event)
            .count()
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true when no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Outbound call recorded by [`LocalAgent`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AgentMessage<N> {
    /// [`Agent::select_node`] was called.
    SelectNode(N),
    /// [`Agent::stop_inspecting_native`] was called.
    StopInspectingNative {
        /// Whether the frontend should be told.
        notify_agent: bool,
    },
}

/// In-process agent: an [`EventEmitter`] plus an outbox.
///
/// Inbound notifications are delivered with [`LocalAgent::emit`]. Outbound
/// calls from sessions are queued and handed to a transport with
/// [`LocalAgent::take_messages`].
pub struct LocalAgent<N> {
    emitter: EventEmitter,
    outbox: RefCell<Vec<AgentMessage<N>>>,
}

impl<N> Default for LocalAgent<N> {
    fn default() -> Self {
        Self {
            emitter: EventEmitter::new(),
            outbox: RefCell::new(Vec::new()),
        }
    }
}

impl<N> core::fmt::Debug for LocalAgent<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LocalAgent")
            .field("emitter", &self.emitter)
            .field("queued", &self.outbox.borrow().len())
            .finish()
    }
}

impl<N> LocalAgent<N> {
    /// Create an agent with no listeners and an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to registered listeners; returns how many ran.
    pub fn emit(&self, event: AgentEvent) -> usize {
        self.emitter.emit(event)
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: AgentEvent) -> usize {
        self.emitter.listener_count(event)
    }

    /// Access the underlying registry.
    pub fn emitter(&self) -> &EventEmitter {
        &self.emitter
    }

    /// Drain queued outbound messages, oldest first.
    pub fn take_messages(&self) -> Vec<AgentMessage<N>> {
        core::mem::take(&mut *self.outbox.borrow_mut())
    }
}

impl<N> Agent for LocalAgent<N> {
    type Node = N;

    fn add_listener(&self, event: AgentEvent, listener: Listener) -> ListenerId {
        self.emitter.add_listener(event, listener)
    }

    fn remove_listener(&self, event: AgentEvent, id: ListenerId) -> bool {
        self.emitter.remove_listener(event, id)
    }

    fn select_node(&self, node: N) {
        self.outbox.borrow_mut().push(AgentMessage::SelectNode(node));
    }

    fn stop_inspecting_native(&self, notify_agent: bool) {
        self.outbox
            .borrow_mut()
            .push(AgentMessage::StopInspectingNative { notify_agent });
    }
}

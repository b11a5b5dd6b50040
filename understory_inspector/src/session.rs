// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inspection session: agent-driven state machine over hit testing.
//!
//! ## Overview
//!
//! A session is mounted with an [`Agent`], a [`HitTester`], and an optional
//! root view. Mounting registers three listeners on the agent
//! ([`AgentEvent::Shutdown`], [`AgentEvent::StartInspectingNative`],
//! [`AgentEvent::StopInspectingNative`]). Those registrations are released
//! exactly once: when the agent shuts down, when the session switches to a
//! different agent, or when the session is dropped.
//!
//! ## States
//!
//! - `Idle → Inspecting` when the agent emits `startInspectingNative`.
//! - `Inspecting → Idle` when the agent emits `stopInspectingNative`, when the
//!   local pointer or touch is released, or when the session is dropped.
//! - While inspecting, each move hit-tests the point. A hit selects the
//!   element on the agent and moves the highlight. A miss changes nothing:
//!   the previous highlight stays where it was.
//!
//! A local release tells the agent `stop_inspecting_native(true)`. A stop
//! that came from the agent does not call back into it.
//!
//! ## Rendering
//!
//! [`InspectionSession::render`] reads [`PlatformFlags`] once and returns an
//! [`OverlayView`]. While inspecting, the overlay captures input with exactly
//! one [`InputStrategy`]; feed its events to
//! [`InspectionSession::handle_input`]. Events from the other family are
//! reported as [`InputResponse::Unhandled`].

use alloc::rc::Rc;
use core::cell::Cell;

use kurbo::{Point, Rect};

use crate::agent::{Agent, AgentEvent, Listener, ListenerId};
use crate::flags::PlatformFlags;
use crate::highlight::Highlight;
use crate::hit_test::HitTester;
use crate::input::{InputEvent, InputStrategy, PointerEvent, ResponderEvent};
use crate::logging::{debug, trace};
use crate::types::{InspectedElement, InspectionState, Miss};

/// Native id of the overlay element rendered while inspecting.
pub const OVERLAY_NATIVE_ID: &str = "devToolsInspectorOverlay";

/// Result of a move during inspection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    /// The session was not inspecting, or the event carried no location.
    Ignored,
    /// Hit testing found nothing selectable; the highlight is unchanged.
    Missed(Miss),
    /// A new element was selected and highlighted.
    Selected(InspectedElement),
}

impl MoveOutcome {
    /// Returns true for [`MoveOutcome::Selected`].
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }
}

/// Result of [`InspectionSession::handle_input`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputResponse {
    /// No handler for this event is attached in the current render.
    Unhandled,
    /// A pointer down/move or responder move was hit-tested.
    Moved(MoveOutcome),
    /// The overlay claimed the touch responder after hit-testing the touch.
    Claimed(MoveOutcome),
    /// The pointer or touch was released.
    Released {
        /// Whether this release ended an active inspection.
        stopped: bool,
    },
}

/// Output of a render pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OverlayView {
    /// Inspecting: a transparent overlay over the root view captures input.
    Capturing {
        /// Always [`OVERLAY_NATIVE_ID`].
        native_id: &'static str,
        /// Event family the overlay listens to.
        input: InputStrategy,
        /// Box over the inspected element, if any.
        highlight: Option<Highlight>,
    },
    /// Not inspecting: only the highlight (if any) is drawn.
    Passive {
        /// Box over the inspected element, if any.
        highlight: Option<Highlight>,
    },
}

impl OverlayView {
    /// The highlight, regardless of variant.
    pub fn highlight(&self) -> Option<Highlight> {
        match self {
            Self::Capturing { highlight, .. } | Self::Passive { highlight } => *highlight,
        }
    }

    /// Attached input strategy, if capturing.
    pub fn input(&self) -> Option<InputStrategy> {
        match self {
            Self::Capturing { input, .. } => Some(*input),
            Self::Passive { .. } => None,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Registration {
    shutdown: ListenerId,
    start: ListenerId,
    stop: ListenerId,
}

/// State reachable from agent listeners.
#[derive(Debug, Default)]
struct Shared {
    state: Cell<InspectionState>,
    inspected: Cell<Option<InspectedElement>>,
    registration: Cell<Option<Registration>>,
}

impl Shared {
    fn start(&self) {
        self.state.set(InspectionState::Inspecting);
    }

    fn stop(&self) {
        self.inspected.set(None);
        self.state.set(InspectionState::Idle);
    }

    /// Remove this session's listeners from `agent`. Returns false if they
    /// were already released.
    fn release<A: Agent + ?Sized>(&self, agent: &A) -> bool {
        let Some(reg) = self.registration.take() else {
            return false;
        };
        agent.remove_listener(AgentEvent::Shutdown, reg.shutdown);
        agent.remove_listener(AgentEvent::StartInspectingNative, reg.start);
        agent.remove_listener(AgentEvent::StopInspectingNative, reg.stop);
        true
    }

    /// Register listeners on `agent`. Callers release any previous
    /// registration first.
    fn subscribe<A: Agent + 'static>(self: &Rc<Self>, agent: &Rc<A>) {
        debug_assert!(
            self.registration.get().is_none(),
            "subscribing while still registered"
        );
        let on_shutdown: Listener = {
            let shared = Rc::downgrade(self);
            let agent = Rc::downgrade(agent);
            Rc::new(move || {
                if let (Some(shared), Some(agent)) = (shared.upgrade(), agent.upgrade())
                    && shared.release(&*agent)
                {
                    debug!("agent shut down; inspector listeners released");
                }
            })
        };
        let on_start: Listener = {
            let shared = Rc::downgrade(self);
            Rc::new(move || {
                if let Some(shared) = shared.upgrade() {
                    debug!("agent started inspecting");
                    shared.start();
                }
            })
        };
        let on_stop: Listener = {
            let shared = Rc::downgrade(self);
            Rc::new(move || {
                if let Some(shared) = shared.upgrade() {
                    debug!("agent stopped inspecting");
                    shared.stop();
                }
            })
        };

        let reg = Registration {
            shutdown: agent.add_listener(AgentEvent::Shutdown, on_shutdown),
            start: agent.add_listener(AgentEvent::StartInspectingNative, on_start),
            stop: agent.add_listener(AgentEvent::StopInspectingNative, on_stop),
        };
        self.registration.set(Some(reg));
        debug!("inspector listeners registered");
    }
}

/// An inspection session bound to one agent.
///
/// Dropping the session unmounts it: listeners are removed from the agent
/// (unless already released by a shutdown) and the state returns to idle.
pub struct InspectionSession<A, T>
where
    A: Agent + 'static,
    T: HitTester<Node = A::Node>,
{
    agent: Rc<A>,
    tester: T,
    root: Option<T::Root>,
    shared: Rc<Shared>,
    attached: Option<InputStrategy>,
}

impl<A, T> core::fmt::Debug for InspectionSession<A, T>
where
    A: Agent + 'static,
    T: HitTester<Node = A::Node>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InspectionSession")
            .field("state", &self.shared.state.get())
            .field("inspected", &self.shared.inspected.get())
            .field("subscribed", &self.is_subscribed())
            .field("attached", &self.attached)
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

impl<A, T> InspectionSession<A, T>
where
    A: Agent + 'static,
    T: HitTester<Node = A::Node>,
{
    /// Mount a session and subscribe to `agent`.
    ///
    /// `root` is the view subtree to hit-test; `None` means the root view is
    /// not attached yet, and moves will miss until [`Self::set_root`] is called.
    pub fn mount(agent: Rc<A>, tester: T, root: Option<T::Root>) -> Self {
        let shared = Rc::new(Shared::default());
        shared.subscribe(&agent);
        Self {
            agent,
            tester,
            root,
            shared,
            attached: None,
        }
    }

    /// The agent this session reports to.
    pub fn agent(&self) -> &Rc<A> {
        &self.agent
    }

    /// Switch to `agent`.
    ///
    /// Passing the same agent (by identity) is a no-op and returns false.
    /// Otherwise the old subscription is released, the session restarts idle
    /// with no highlight, and it subscribes to the new agent.
    pub fn set_agent(&mut self, agent: Rc<A>) -> bool {
        if Rc::ptr_eq(&self.agent, &agent) {
            return false;
        }
        self.shared.release(&*self.agent);
        self.shared.stop();
        self.attached = None;
        self.shared.subscribe(&agent);
        self.agent = agent;
        debug!("inspector switched agents");
        true
    }

    /// The hit tester.
    pub fn tester(&self) -> &T {
        &self.tester
    }

    /// The root view being inspected.
    pub fn root(&self) -> Option<&T::Root> {
        self.root.as_ref()
    }

    /// Mutable access to the root view, for example to update layout.
    pub fn root_mut(&mut self) -> Option<&mut T::Root> {
        self.root.as_mut()
    }

    /// Replace the root view, returning the previous one.
    pub fn set_root(&mut self, root: Option<T::Root>) -> Option<T::Root> {
        core::mem::replace(&mut self.root, root)
    }

    /// Current state.
    pub fn state(&self) -> InspectionState {
        self.shared.state.get()
    }

    /// Returns true while inspecting.
    pub fn is_inspecting(&self) -> bool {
        self.state().is_inspecting()
    }

    /// The highlighted element, if any.
    pub fn inspected(&self) -> Option<InspectedElement> {
        self.shared.inspected.get()
    }

    /// Returns true while this session's listeners are registered on the agent.
    pub fn is_subscribed(&self) -> bool {
        self.shared.registration.get().is_some()
    }

    /// Input strategy attached by the most recent render, if capturing.
    pub fn attached_input(&self) -> Option<InputStrategy> {
        self.attached
    }

    /// Enter inspection, as if the agent emitted `startInspectingNative`.
    pub fn on_agent_start(&self) {
        self.shared.start();
    }

    /// Leave inspection, as if the agent emitted `stopInspectingNative`.
    ///
    /// The agent is not called back.
    pub fn on_agent_stop(&self) {
        self.shared.stop();
    }

    /// Local pointer-up or touch release.
    ///
    /// While inspecting this clears the highlight, goes idle, and calls
    /// `stop_inspecting_native(true)` on the agent; it returns true. While idle
    /// it does nothing and returns false.
    pub fn on_pointer_release(&self) -> bool {
        if !self.is_inspecting() {
            return false;
        }
        self.shared.stop();
        debug!("inspection stopped locally");
        self.agent.stop_inspecting_native(true);
        true
    }

    /// Hit-test `point` and, on a hit, select and highlight the element.
    pub fn on_move(&self, point: Point) -> MoveOutcome {
        if !self.is_inspecting() {
            return MoveOutcome::Ignored;
        }
        match self.resolve(point) {
            Ok((frame, node)) => {
                let element = InspectedElement { frame };
                self.shared.inspected.set(Some(element));
                trace!(x = point.x, y = point.y, ?frame, "inspector hit");
                self.agent.select_node(node);
                MoveOutcome::Selected(element)
            }
            Err(miss) => {
                trace!(x = point.x, y = point.y, %miss, "inspector miss");
                MoveOutcome::Missed(miss)
            }
        }
    }

    fn resolve(&self, point: Point) -> Result<(Rect, A::Node), Miss> {
        let root = self.root.as_ref().ok_or(Miss::Detached)?;
        let data = self
            .tester
            .inspector_data_at(root, point)
            .ok_or(Miss::NoElement)?;
        let node = data.closest_instance.ok_or(Miss::NoPublicInstance)?;
        Ok((data.frame, node))
    }

    /// Render pass: pick the input strategy and describe the overlay.
    ///
    /// `flags` is read once. The chosen strategy stays attached until the next
    /// render.
    pub fn render(&mut self, flags: &impl PlatformFlags) -> OverlayView {
        let highlight = Highlight::for_element(self.inspected());
        if !self.is_inspecting() {
            self.attached = None;
            return OverlayView::Passive { highlight };
        }
        let input = InputStrategy::select(flags);
        if self.attached != Some(input) {
            debug!(?input, "inspector input strategy attached");
        }
        self.attached = Some(input);
        OverlayView::Capturing {
            native_id: OVERLAY_NATIVE_ID,
            input,
            highlight,
        }
    }

    /// Deliver an input event to the handlers attached by the last render.
    pub fn handle_input(&self, event: &InputEvent) -> InputResponse {
        let Some(strategy) = self.attached else {
            return InputResponse::Unhandled;
        };
        if !strategy.accepts(event) {
            return InputResponse::Unhandled;
        }
        match event {
            InputEvent::Pointer(PointerEvent::Down(p) | PointerEvent::Move(p)) => {
                InputResponse::Moved(self.on_move(*p))
            }
            InputEvent::Pointer(PointerEvent::Up(_))
            | InputEvent::Responder(ResponderEvent::Release) => InputResponse::Released {
                stopped: self.on_pointer_release(),
            },
            InputEvent::Responder(ev @ ResponderEvent::StartShouldSetResponder { .. }) => {
                InputResponse::Claimed(self.move_to(ev.primary_location()))
            }
            InputEvent::Responder(ev @ ResponderEvent::Move { .. }) => {
                InputResponse::Moved(self.move_to(ev.primary_location()))
            }
        }
    }

    fn move_to(&self, point: Option<Point>) -> MoveOutcome {
        match point {
            Some(p) => self.on_move(p),
            None => MoveOutcome::Ignored,
        }
    }
}

impl<A, T> Drop for InspectionSession<A, T>
where
    A: Agent + 'static,
    T: HitTester<Node = A::Node>,
{
    fn drop(&mut self) {
        if self.shared.release(&*self.agent) {
            debug!("inspector unmounted; listeners released");
        }
        self.shared.stop();
    }
}

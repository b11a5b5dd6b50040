// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registrations are released even when the owner unwinds.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_inspector::agent::{AgentEvent, LocalAgent};
use understory_inspector::hit_test::{Topmost, View, ViewList};
use understory_inspector::session::InspectionSession;

fn views() -> ViewList<&'static str> {
    let mut views = ViewList::new();
    views.push(
        None,
        View::new(Rect::new(0.0, 0.0, 100.0, 100.0)).with_instance("root"),
    );
    views
}

#[test]
fn unwinding_while_inspecting_releases_listeners() {
    let agent = Rc::new(LocalAgent::new());
    let result = catch_unwind(AssertUnwindSafe(|| {
        let session = InspectionSession::mount(agent.clone(), Topmost::new(), Some(views()));
        agent.emit(AgentEvent::StartInspectingNative);
        assert!(session.on_move(Point::new(5.0, 5.0)).is_selected());
        panic!("view removed mid-inspection");
    }));
    assert!(result.is_err());
    assert!(agent.emitter().is_empty());
}

#[test]
fn shutdown_then_unwind_does_not_double_release() {
    let agent = Rc::new(LocalAgent::new());
    // A foreign listener must survive both the shutdown and the unwind.
    let foreign = agent
        .emitter()
        .add_listener(AgentEvent::Shutdown, Rc::new(|| {}));
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _session = InspectionSession::mount(agent.clone(), Topmost::new(), Some(views()));
        agent.emit(AgentEvent::Shutdown);
        panic!("torn down after shutdown");
    }));
    assert!(result.is_err());
    assert_eq!(agent.listener_count(AgentEvent::Shutdown), 1);
    assert!(agent.emitter().remove_listener(AgentEvent::Shutdown, foreign));
    assert!(agent.emitter().is_empty());
}

#[test]
fn agent_outlives_many_sessions() {
    let agent = Rc::new(LocalAgent::new());
    for _ in 0..16 {
        let session = InspectionSession::mount(agent.clone(), Topmost::new(), Some(views()));
        assert_eq!(agent.listener_count(AgentEvent::StartInspectingNative), 1);
        drop(session);
    }
    assert!(agent.emitter().is_empty());
    // Only the caller's handle remains: listeners hold no strong references.
    assert_eq!(Rc::strong_count(&agent), 1);
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch-responder input, a flag override between renders, and agent shutdown.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example inspector_responder`

use std::rc::Rc;

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_inspector::agent::{AgentEvent, LocalAgent};
use understory_inspector::flags::{FlagOverrides, StaticFlags};
use understory_inspector::hit_test::{Topmost, View, ViewList};
use understory_inspector::input::{InputStrategy, PointerEvent, ResponderEvent, Touch};
use understory_inspector::session::{InputResponse, InspectionSession};

fn touches(x: f64, y: f64) -> Vec<Touch> {
    vec![Touch {
        location: Point::new(x, y),
    }]
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut views = ViewList::new();
    for (i, name) in ["Row 0", "Row 1", "Row 2", "Row 3"].into_iter().enumerate() {
        let y = i as f64 * 50.0;
        views.push(
            None,
            View::new(Rect::new(0.0, y, 200.0, y + 40.0)).with_instance(name),
        );
    }

    let agent = Rc::new(LocalAgent::new());
    let mut session = InspectionSession::mount(agent.clone(), Topmost::new(), Some(views));
    let mut flags = FlagOverrides::new(StaticFlags::RESPONDER);

    agent.emit(AgentEvent::StartInspectingNative);
    let view = session.render(&flags);
    assert_eq!(view.input(), Some(InputStrategy::Responder));

    let claim = session.handle_input(
        &ResponderEvent::StartShouldSetResponder {
            touches: touches(10.0, 60.0),
        }
        .into(),
    );
    println!("== Touch start ==\n  {claim:?}");
    let moved = session.handle_input(
        &ResponderEvent::Move {
            touches: touches(10.0, 110.0),
        }
        .into(),
    );
    println!("== Touch move ==\n  {moved:?}");
    let selected = session.inspected();

    // Pin pointer events on: the next render swaps handlers, the selection stays.
    flags.set_pointer_events_for_hover(Some(true));
    let view = session.render(&flags);
    println!("== Re-render with pointer events ==\n  {view:?}");
    assert_eq!(view.input(), Some(InputStrategy::Pointer));
    assert_eq!(session.inspected(), selected);
    assert_eq!(
        session.handle_input(&ResponderEvent::Release.into()),
        InputResponse::Unhandled
    );

    // The agent goes away; the session lets go of its listeners right away.
    agent.emit(AgentEvent::Shutdown);
    println!("== Shutdown ==\n  {session:?}");
    assert!(!session.is_subscribed());
    assert!(agent.emitter().is_empty());

    let up = session.handle_input(&PointerEvent::Up(Point::new(10.0, 110.0)).into());
    println!("== Pointer up ==\n  {up:?}");
    println!("== Agent outbox ==\n  {:?}", agent.take_messages());
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An agent-driven inspection with pointer input.
//!
//! The agent starts inspecting, the pointer hovers a button, then wanders off
//! the content (the highlight stays), and finally the pointer is released.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example inspector_session`

use std::rc::Rc;

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_inspector::agent::{AgentEvent, AgentMessage, LocalAgent};
use understory_inspector::flags::StaticFlags;
use understory_inspector::hit_test::{Topmost, View, ViewList};
use understory_inspector::input::PointerEvent;
use understory_inspector::session::{InspectionSession, OverlayView};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Screen: a column with a header and a button; the button's label is native-only.
    let mut views = ViewList::new();
    let screen = views.push(
        None,
        View::new(Rect::new(0.0, 0.0, 320.0, 480.0)).with_instance("Screen"),
    );
    let _header = views.push(
        Some(screen),
        View::new(Rect::new(0.0, 0.0, 320.0, 60.0)).with_instance("Header"),
    );
    let button = views.push(
        Some(screen),
        View::new(Rect::new(0.0, 0.0, 50.0, 50.0))
            .with_z_index(1)
            .with_instance("Button"),
    );
    let _label = views.push(
        Some(button),
        View::new(Rect::new(5.0, 15.0, 45.0, 35.0)).with_z_index(2),
    );

    let agent = Rc::new(LocalAgent::new());
    let mut session = InspectionSession::mount(agent.clone(), Topmost::new(), Some(views));
    let flags = StaticFlags::POINTER;

    agent.emit(AgentEvent::StartInspectingNative);
    println!("== Start ==\n  {:?}", session.render(&flags));

    let r = session.handle_input(&PointerEvent::Move(Point::new(10.0, 10.0)).into());
    println!("== Move (10, 10) ==\n  {r:?}\n  {:?}", session.render(&flags));

    let r = session.handle_input(&PointerEvent::Move(Point::new(20.0, 20.0)).into());
    println!("== Move (20, 20) over label ==\n  {r:?}\n  {:?}", session.render(&flags));

    let r = session.handle_input(&PointerEvent::Move(Point::new(500.0, 500.0)).into());
    let after_miss = session.render(&flags);
    println!("== Move (500, 500) ==\n  {r:?}\n  {after_miss:?}");

    let r = session.handle_input(&PointerEvent::Up(Point::new(500.0, 500.0)).into());
    let after_release = session.render(&flags);
    println!("== Release ==\n  {r:?}\n  {after_release:?}");

    let messages = agent.take_messages();
    println!("== Agent outbox ==");
    for m in &messages {
        println!("  {m:?}");
    }

    assert_eq!(
        after_miss.highlight().map(|h| h.frame),
        Some(Rect::new(5.0, 15.0, 45.0, 35.0))
    );
    assert_eq!(after_release, OverlayView::Passive { highlight: None });
    assert_eq!(
        messages,
        vec![
            AgentMessage::SelectNode("Button"),
            AgentMessage::SelectNode("Button"),
            AgentMessage::StopInspectingNative { notify_agent: true },
        ]
    );

    drop(session);
    assert!(agent.emitter().is_empty());
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_inspector --heading-base-level=0

//! Understory Inspector: point-based element inspection for UI developer tools.
//!
//! ## Overview
//!
//! A developer-tools agent asks the app to let the user pick an element by pointing at it.
//! While inspection is active, every pointer or touch move is hit-tested against the root view,
//! the element under the finger is reported to the agent, and a highlight box is drawn over it.
//! Lifting the pointer ends the inspection.
//!
//! This crate is the state machine in the middle. It does not render and it does not hit-test:
//!
//! - [`HitTester`](crate::hit_test::HitTester) resolves a point to an element's frame and a selectable handle.
//!   [`ViewList`](crate::hit_test::ViewList) with [`Topmost`](crate::hit_test::Topmost) is a small in-memory tester.
//! - [`Agent`](crate::agent::Agent) is the developer-tools side: it emits `startInspectingNative`,
//!   `stopInspectingNative` and `shutdown`, and receives selections.
//!   [`EventEmitter`](crate::agent::EventEmitter) is a reusable listener registry and
//!   [`LocalAgent`](crate::agent::LocalAgent) an in-process agent with an outbox.
//! - [`InspectionSession`](crate::session::InspectionSession) owns the agent subscription, tracks
//!   [`InspectionState`](crate::types::InspectionState) and the
//!   [`InspectedElement`](crate::types::InspectedElement), and turns input into hit tests.
//! - [`Highlight`](crate::highlight::Highlight) is the derived box to draw.
//!
//! ## Input strategies
//!
//! Each render reads [`PlatformFlags`](crate::flags::PlatformFlags) once and attaches one of two disjoint handler sets,
//! [`InputStrategy::Pointer`](crate::input::InputStrategy::Pointer) or
//! [`InputStrategy::Responder`](crate::input::InputStrategy::Responder).
//! Only events of the attached family are handled.
//!
//! ## Misses
//!
//! When a move finds nothing selectable the highlight stays where it was.
//! The reason is reported as a [`Miss`](crate::types::Miss) for diagnostics but never surfaces as an error.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use kurbo::{Point, Rect};
//! use understory_inspector::agent::{AgentEvent, AgentMessage, LocalAgent};
//! use understory_inspector::flags::StaticFlags;
//! use understory_inspector::hit_test::{Topmost, View, ViewList};
//! use understory_inspector::input::PointerEvent;
//! use understory_inspector::session::InspectionSession;
//!
//! let mut views = ViewList::new();
//! views.push(None, View::new(Rect::new(0.0, 0.0, 50.0, 50.0)).with_instance("button"));
//!
//! let agent = Rc::new(LocalAgent::new());
//! let mut session = InspectionSession::mount(agent.clone(), Topmost::new(), Some(views));
//!
//! agent.emit(AgentEvent::StartInspectingNative);
//! session.render(&StaticFlags::POINTER);
//! session.handle_input(&PointerEvent::Move(Point::new(10.0, 10.0)).into());
//!
//! let overlay = session.render(&StaticFlags::POINTER);
//! assert_eq!(overlay.highlight().map(|h| h.frame), Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
//!
//! session.handle_input(&PointerEvent::Up(Point::new(10.0, 10.0)).into());
//! assert!(!session.is_inspecting());
//! assert_eq!(
//!     agent.take_messages(),
//!     vec![
//!         AgentMessage::SelectNode("button"),
//!         AgentMessage::StopInspectingNative { notify_agent: true },
//!     ]
//! );
//!
//! // Unmounting removes the listeners from the agent.
//! drop(session);
//! assert!(agent.emitter().is_empty());
//! ```
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to Kurbo.
//! - `tracing`: structured events for subscription changes, starts and stops, hits and misses.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod logging;

pub mod agent;
pub mod flags;
pub mod highlight;
pub mod input;
pub mod session;
pub mod types;

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input strategies and the events they accept.
//!
//! An inspection overlay listens to exactly one family of input events. The
//! family is chosen once per render from [`PlatformFlags`]:
//!
//! - [`InputStrategy::Pointer`]: pointer down and move hit-test, pointer up
//!   stops inspecting.
//! - [`InputStrategy::Responder`]: the overlay claims the touch responder on
//!   the first touch (hit-testing it), responder moves hit-test, and release
//!   stops inspecting.
//!
//! Events from the other family are not handled while a strategy is attached.

use alloc::vec::Vec;

use kurbo::Point;

use crate::flags::PlatformFlags;

/// Which family of input events the overlay listens to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InputStrategy {
    /// W3C-style pointer events.
    Pointer,
    /// Legacy touch-responder events.
    Responder,
}

impl InputStrategy {
    /// Pick the strategy for the current render.
    pub fn select(flags: &impl PlatformFlags) -> Self {
        if flags.pointer_events_for_hover() {
            Self::Pointer
        } else {
            Self::Responder
        }
    }

    /// Returns true if events of `event`'s family are handled under this strategy.
    pub fn accepts(self, event: &InputEvent) -> bool {
        matches!(
            (self, event),
            (Self::Pointer, InputEvent::Pointer(_)) | (Self::Responder, InputEvent::Responder(_))
        )
    }
}

/// A pointer event in root-view coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed.
    Down(Point),
    /// Pointer moved.
    Move(Point),
    /// Pointer released.
    Up(Point),
}

/// One active touch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Touch {
    /// Touch location relative to the overlay, which covers the root view.
    pub location: Point,
}

/// A touch-responder event.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponderEvent {
    /// Asked whether the overlay wants to become responder for a new touch.
    StartShouldSetResponder {
        /// Active touches; the first one is inspected.
        touches: Vec<Touch>,
    },
    /// The responder touch moved.
    Move {
        /// Active touches; the first one is inspected.
        touches: Vec<Touch>,
    },
    /// The responder touch ended.
    Release,
}

impl ResponderEvent {
    /// Location of the first active touch, if any.
    pub fn primary_location(&self) -> Option<Point> {
        match self {
            Self::StartShouldSetResponder { touches } | Self::Move { touches } => {
                touches.first().map(|t| t.location)
            }
            Self::Release => None,
        }
    }
}

/// Any input the overlay may receive.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer family.
    Pointer(PointerEvent),
    /// Touch-responder family.
    Responder(ResponderEvent),
}

impl From<PointerEvent> for InputEvent {
    fn from(e: PointerEvent) -> Self {
        Self::Pointer(e)
    }
}

impl From<ResponderEvent> for InputEvent {
    fn from(e: ResponderEvent) -> Self {
        Self::Responder(e)
    }
}

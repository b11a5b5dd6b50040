// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: inspection state, inspected elements, hit-test results, and misses.
//!
//! Geometry is expressed with Kurbo. A frame `{x, y, width, height}` is a
//! [`Rect`] in the root view's coordinate space, built with
//! [`Rect::from_origin_size`].

use kurbo::Rect;

/// Whether a session is capturing input for hit testing.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum InspectionState {
    /// Not inspecting; no input is captured.
    #[default]
    Idle,
    /// Capturing pointer or touch input and highlighting the element under it.
    Inspecting,
}

impl InspectionState {
    /// Returns true for [`InspectionState::Inspecting`].
    #[inline]
    pub const fn is_inspecting(self) -> bool {
        matches!(self, Self::Inspecting)
    }
}

/// The element currently highlighted by a session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InspectedElement {
    /// Bounding box of the element in root-view coordinates.
    pub frame: Rect,
}

/// Result of resolving a point against a root view.
///
/// Produced by a [`HitTester`](crate::hit_test::HitTester).
#[derive(Clone, Debug, PartialEq)]
pub struct InspectorData<N> {
    /// Bounding box of the deepest element under the point.
    pub frame: Rect,
    /// Closest element (self or ancestor) that can be handed to the agent.
    ///
    /// `None` when the element has no selectable instance; the session treats
    /// that as a miss.
    pub closest_instance: Option<N>,
}

/// Why a move did not change the highlight.
///
/// Misses are not errors for the caller: the session keeps the previous
/// highlight and reports the reason in
/// [`MoveOutcome::Missed`](crate::session::MoveOutcome::Missed).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Miss {
    /// The session has no root view to query.
    #[error("inspected root view is detached")]
    Detached,
    /// Nothing was found under the point.
    #[error("no element under the point")]
    NoElement,
    /// An element was found but none of its ancestors has a selectable instance.
    #[error("element has no public instance")]
    NoPublicInstance,
}

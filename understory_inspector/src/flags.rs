// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform capability flags read by the session on each render.
//!
//! [`StaticFlags`] holds fixed values. [`FlagOverrides`] layers optional
//! values over another source so a host can pin a flag for one channel or
//! one test without restating the rest.

/// Capability flags consulted when rendering an inspection overlay.
pub trait PlatformFlags {
    /// Whether W3C pointer events drive hover-like interactions.
    ///
    /// When true the overlay listens to pointer events; otherwise it uses the
    /// touch responder.
    fn pointer_events_for_hover(&self) -> bool;
}

impl<T: PlatformFlags + ?Sized> PlatformFlags for &T {
    fn pointer_events_for_hover(&self) -> bool {
        (**self).pointer_events_for_hover()
    }
}

/// Fixed flag values. The default matches platforms without pointer events.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct StaticFlags {
    /// See [`PlatformFlags::pointer_events_for_hover`].
    pub pointer_events_for_hover: bool,
}

impl StaticFlags {
    /// Flags for a platform that delivers pointer events.
    pub const POINTER: Self = Self {
        pointer_events_for_hover: true,
    };

    /// Flags for a platform that only has the touch responder.
    pub const RESPONDER: Self = Self {
        pointer_events_for_hover: false,
    };
}

impl PlatformFlags for StaticFlags {
    fn pointer_events_for_hover(&self) -> bool {
        self.pointer_events_for_hover
    }
}

/// Optional overrides on top of a base flag source.
#[derive(Clone, Debug, Default)]
pub struct FlagOverrides<B> {
    base: B,
    pointer_events_for_hover: Option<bool>,
}

impl<B: PlatformFlags> FlagOverrides<B> {
    /// Wrap `base` with no overrides.
    pub fn new(base: B) -> Self {
        Self {
            base,
            pointer_events_for_hover: None,
        }
    }

    /// Pin [`PlatformFlags::pointer_events_for_hover`].
    #[must_use]
    pub fn with_pointer_events_for_hover(mut self, value: bool) -> Self {
        self.pointer_events_for_hover = Some(value);
        self
    }

    /// Set or clear the pointer-events override in place.
    pub fn set_pointer_events_for_hover(&mut self, value: Option<bool>) {
        self.pointer_events_for_hover = value;
    }

    /// The wrapped source.
    pub fn base(&self) -> &B {
        &self.base
    }
}

impl<B: PlatformFlags> PlatformFlags for FlagOverrides<B> {
    fn pointer_events_for_hover(&self) -> bool {
        self.pointer_events_for_hover
            .unwrap_or_else(|| self.base.pointer_events_for_hover())
    }
}

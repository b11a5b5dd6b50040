// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Highlight box derived from the inspected element.

use kurbo::Rect;

use crate::types::InspectedElement;

/// A box drawn over the inspected element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Highlight {
    /// Box in root-view coordinates.
    pub frame: Rect,
}

impl Highlight {
    /// Highlight for `inspected`, or nothing when no element is selected.
    pub fn for_element(inspected: Option<InspectedElement>) -> Option<Self> {
        inspected.map(|el| Self { frame: el.frame })
    }

    /// Edge bands of the box: top, right, bottom, left.
    ///
    /// Bands lie inside the frame and are clamped so they never extend past
    /// it; for a frame thinner than `2 * width` opposite bands overlap.
    pub fn border(&self, width: f64) -> [Rect; 4] {
        let f = self.frame.abs();
        let w = width.max(0.0);
        let bw = w.min(f.width());
        let bh = w.min(f.height());
        [
            Rect::new(f.x0, f.y0, f.x1, f.y0 + bh),
            Rect::new(f.x1 - bw, f.y0, f.x1, f.y1),
            Rect::new(f.x0, f.y1 - bh, f.x1, f.y1),
            Rect::new(f.x0, f.y0, f.x0 + bw, f.y1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_without_element() {
        assert_eq!(Highlight::for_element(None), None);
    }

    #[test]
    fn follows_element_frame() {
        let frame = Rect::new(0.0, 0.0, 50.0, 50.0);
        let h = Highlight::for_element(Some(InspectedElement { frame })).unwrap();
        assert_eq!(h.frame, frame);
    }

    #[test]
    fn border_bands() {
        let h = Highlight {
            frame: Rect::new(10.0, 20.0, 110.0, 70.0),
        };
        let [top, right, bottom, left] = h.border(2.0);
        assert_eq!(top, Rect::new(10.0, 20.0, 110.0, 22.0));
        assert_eq!(right, Rect::new(108.0, 20.0, 110.0, 70.0));
        assert_eq!(bottom, Rect::new(10.0, 68.0, 110.0, 70.0));
        assert_eq!(left, Rect::new(10.0, 20.0, 12.0, 70.0));
    }

    #[test]
    fn border_clamps_to_frame() {
        let h = Highlight {
            frame: Rect::new(0.0, 0.0, 4.0, 3.0),
        };
        for band in h.border(10.0) {
            assert_eq!(band.intersect(h.frame), band);
        }
        let [top, ..] = h.border(-1.0);
        assert_eq!(top.height(), 0.0);
    }
}

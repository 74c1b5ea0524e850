// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resizing and moving images with the pointer.

use folio_document::ImageId;

use crate::geometry::BoundingBox;

/// A corner of an image's bounds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Handle {
    /// Top left corner.
    TopLeft,
    /// Top right corner.
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom right corner.
    BottomRight,
}

impl Handle {
    /// Every handle, in drawing order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// The corner of `bounds` this handle sits on.
    pub fn position(self, bounds: &BoundingBox) -> (f32, f32) {
        match self {
            Self::TopLeft => (bounds.x0, bounds.y0),
            Self::TopRight => (bounds.x1, bounds.y0),
            Self::BottomLeft => (bounds.x0, bounds.y1),
            Self::BottomRight => (bounds.x1, bounds.y1),
        }
    }

    /// The handle within `tolerance` of a point, if any.
    pub fn at(bounds: &BoundingBox, x: f32, y: f32, tolerance: f32) -> Option<Self> {
        Self::ALL.into_iter().find(|handle| {
            let (hx, hy) = handle.position(bounds);
            (hx - x).abs() <= tolerance && (hy - y).abs() <= tolerance
        })
    }

    /// New size after dragging this handle by `(dx, dy)` from `size`.
    pub(crate) fn resize(self, size: (f32, f32), dx: f32, dy: f32, min: f32) -> (f32, f32) {
        let (width, height) = size;
        let (width, height) = match self {
            Self::TopLeft => (width - dx, height - dy),
            Self::TopRight => (width + dx, height - dy),
            Self::BottomLeft => (width - dx, height + dy),
            Self::BottomRight => (width + dx, height + dy),
        };
        (width.max(min), height.max(min))
    }
}

/// A pointer drag in progress.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum Drag {
    /// Extending the text selection.
    Select,
    /// Resizing an image from one of its corners.
    Resize {
        id: ImageId,
        handle: Handle,
        origin: (f32, f32),
        size: (f32, f32),
    },
    /// Moving an image.
    Move {
        id: ImageId,
        origin: (f32, f32),
        position: (f32, f32),
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_hit_within_tolerance() {
        let bounds = BoundingBox::new(10.0, 10.0, 110.0, 60.0);
        assert_eq!(Handle::at(&bounds, 18.0, 4.0, 10.0), Some(Handle::TopLeft));
        assert_eq!(Handle::at(&bounds, 112.0, 58.0, 10.0), Some(Handle::BottomRight));
        assert_eq!(Handle::at(&bounds, 60.0, 35.0, 10.0), None);
    }

    #[test]
    fn resize_follows_the_dragged_corner() {
        let size = (100.0, 50.0);
        assert_eq!(Handle::BottomRight.resize(size, 10.0, 5.0, 16.0), (110.0, 55.0));
        assert_eq!(Handle::TopLeft.resize(size, 10.0, 5.0, 16.0), (90.0, 45.0));
        assert_eq!(Handle::TopRight.resize(size, -200.0, 0.0, 16.0), (16.0, 50.0));
    }
}

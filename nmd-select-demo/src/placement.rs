//! Dropdown placement relative to the viewport.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> u16 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> u16 {
        self.y + self.height
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Where the dropdown goes and how large it may get.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Open upwards from the anchor instead of downwards.
    pub above: bool,
    /// Most rows the dropdown may occupy on its side of the anchor.
    pub max_height: u16,
    /// Most columns the dropdown may occupy right of the anchor's left edge.
    pub max_width: u16,
}

impl Placement {
    /// Dropdown rectangle for a list of `height` rows under this placement.
    pub fn rect(&self, anchor: Rect, height: u16) -> Rect {
        let height = height.min(self.max_height);
        let width = anchor.width.min(self.max_width);
        let y = if self.above {
            anchor.y.saturating_sub(height)
        } else {
            anchor.bottom()
        };
        Rect::new(anchor.x, y, width, height)
    }
}

/// Place a dropdown of `height` rows next to `anchor` in a viewport of
/// `viewport_width` x `viewport_height` cells.
///
/// The dropdown opens below when it fits there. Otherwise it opens on the
/// side with more room and is limited to that room.
pub fn place(anchor: Rect, height: u16, viewport_width: u16, viewport_height: u16) -> Placement {
    let space_above = anchor.y;
    let space_below = viewport_height.saturating_sub(anchor.bottom());
    let max_width = viewport_width.saturating_sub(anchor.x);

    let placement = if height <= space_below {
        Placement {
            above: false,
            max_height: height,
            max_width,
        }
    } else if space_above >= space_below {
        Placement {
            above: true,
            max_height: space_above,
            max_width,
        }
    } else {
        Placement {
            above: false,
            max_height: space_below,
            max_width,
        }
    };
    log::debug!(
        "[place] anchor={:?} height={} viewport={}x{} -> {:?}",
        anchor,
        height,
        viewport_width,
        viewport_height,
        placement
    );
    placement
}

/// An axis-aligned face bounding box in frame pixel coordinates.
///
/// Comes straight off the wire as `[x, y, width, height]`; coordinates may
/// extend past the frame edge, so drawing code clips through [`FaceBox::clipped_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_wire([x, y, width, height]: [i32; 4]) -> Self {
        Self::new(x, y, width, height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Intersection with a `surface_width` x `surface_height` surface as
    /// half-open pixel ranges, or `None` when nothing is visible.
    pub fn clipped_to(&self, surface_width: u32, surface_height: u32) -> Option<ClippedRect> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = self.right().min(surface_width as i32);
        let y2 = self.bottom().min(surface_height as i32);
        if x1 >= x2 || y1 >= y2 {
            return None;
        }
        Some(ClippedRect {
            x1: x1 as u32,
            y1: y1 as u32,
            x2: x2 as u32,
            y2: y2 as u32,
        })
    }
}

/// The visible part of a rectangle, as half-open `[x1, x2) x [y1, y2)` ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClippedRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

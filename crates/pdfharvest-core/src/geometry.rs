/// Bounding box with top-left origin coordinate system.
///
/// - `x0`: left edge
/// - `top`: top edge (distance from top of page)
/// - `x1`: right edge
/// - `bottom`: bottom edge (distance from top of page)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Compute the union of two bounding boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Whether `other` lies fully inside this box, within `tolerance`
    /// on every edge.
    ///
    /// Full containment (rather than overlap) is what detaches an
    /// excluded boundary identifier from a region: a region edge placed
    /// just above a text run's bottom drops the whole run.
    pub fn contains(&self, other: &BBox, tolerance: f64) -> bool {
        other.x0 >= self.x0 - tolerance
            && other.x1 <= self.x1 + tolerance
            && other.top >= self.top - tolerance
            && other.bottom <= self.bottom + tolerance
    }

    /// Whether the point lies inside this box (edges inclusive).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.top && y <= self.bottom
    }

    /// Horizontal center of the box.
    pub fn x_center(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    /// Vertical center of the box.
    pub fn y_center(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// Orientation of a ruling edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A ruling line segment derived from painted page geometry.
///
/// Rulings drive the lattice grid strategy: horizontal and vertical
/// rulings intersect to form cell boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
    pub orientation: Orientation,
}

impl Edge {
    pub fn horizontal(x0: f64, x1: f64, y: f64) -> Self {
        Self {
            x0,
            top: y,
            x1,
            bottom: y,
            orientation: Orientation::Horizontal,
        }
    }

    pub fn vertical(x: f64, top: f64, bottom: f64) -> Self {
        Self {
            x0: x,
            top,
            x1: x,
            bottom,
            orientation: Orientation::Vertical,
        }
    }

    /// Whether any part of this edge lies inside the given box.
    pub fn intersects(&self, bbox: &BBox) -> bool {
        self.x0 <= bbox.x1 && self.x1 >= bbox.x0 && self.top <= bbox.bottom && self.bottom >= bbox.top
    }

    /// Clip this edge to the given box. Caller must ensure they intersect.
    pub fn clipped_to(&self, bbox: &BBox) -> Edge {
        Edge {
            x0: self.x0.max(bbox.x0),
            top: self.top.max(bbox.top),
            x1: self.x1.min(bbox.x1),
            bottom: self.bottom.min(bbox.bottom),
            orientation: self.orientation,
        }
    }
}

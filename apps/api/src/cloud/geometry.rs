//! Axis-aligned boxes, the elliptical boundary, and the spiral candidate sequence.

/// Axis-aligned rectangle in container pixel space (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// A `width` × `height` box whose center is `(cx, cy)`.
    pub fn centered_at(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            left: cx - width / 2.0,
            top: cy - height / 2.0,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Strict overlap test. Boxes that only share an edge do not intersect,
    /// and a zero-size box never intersects anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// True when the box lies entirely inside `[0, width] × [0, height]`.
    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        self.left >= 0.0 && self.top >= 0.0 && self.right() <= width && self.bottom() <= height
    }
}

/// Axis-aligned ellipse given by its center and semi-axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl Ellipse {
    /// The ellipse inscribed in a `width` × `height` container, inset by `padding`.
    pub fn inset(width: f64, height: f64, padding: f64) -> Self {
        Self {
            cx: width / 2.0,
            cy: height / 2.0,
            rx: width / 2.0 - padding,
            ry: height / 2.0 - padding,
        }
    }

    /// Degenerate ellipses (a non-positive semi-axis) contain no points.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.rx <= 0.0 || self.ry <= 0.0 {
            return false;
        }
        let dx = (x - self.cx) / self.rx;
        let dy = (y - self.cy) / self.ry;
        dx * dx + dy * dy <= 1.0
    }

    pub fn max_radius(&self) -> f64 {
        self.rx.max(self.ry)
    }
}

/// Deterministic Archimedean spiral of trial points around a center.
///
/// Point `i` sits at angle `i * angle_step` and radius `step * sqrt(i)`. The
/// sequence ends after `max_candidates` points or at the first point whose
/// radius exceeds `max_radius`, whichever comes first.
#[derive(Debug, Clone)]
pub struct Spiral {
    cx: f64,
    cy: f64,
    step: f64,
    angle_step: f64,
    max_radius: f64,
    max_candidates: usize,
    next: usize,
}

impl Spiral {
    pub fn new(
        (cx, cy): (f64, f64),
        step: f64,
        angle_step: f64,
        max_radius: f64,
        max_candidates: usize,
    ) -> Self {
        Self {
            cx,
            cy,
            step,
            angle_step,
            max_radius,
            max_candidates,
            next: 0,
        }
    }
}

impl Iterator for Spiral {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.max_candidates {
            return None;
        }
        let i = self.next as f64;
        let radius = self.step * i.sqrt();
        if radius > self.max_radius {
            // Radius only grows; nothing further out can qualify.
            self.next = self.max_candidates;
            return None;
        }
        self.next += 1;
        let angle = i * self.angle_step;
        Some((
            self.cx + radius * angle.cos(),
            self.cy + radius * angle.sin(),
        ))
    }
}

//! Rounded-rectangle outlines in the XY plane.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use truck_modeling::{builder, Edge, Point3, Wire};

use super::TOLERANCE;

/// Axis-aligned rectangle with equally rounded corners.
///
/// A radius of zero gives sharp corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    /// Centre X.
    pub x: f64,
    /// Centre Y.
    pub y: f64,
    /// Half the extent along X.
    pub half_width: f64,
    /// Half the extent along Y.
    pub half_length: f64,
    /// Corner radius.
    pub radius: f64,
}

impl Outline {
    /// Creates a `width` by `length` outline centred on the origin.
    #[must_use]
    pub fn new(width: f64, length: f64, radius: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            half_width: width / 2.0,
            half_length: length / 2.0,
            radius,
        }
    }

    /// Pulls every side in by `distance`, shrinking the corner radius with it.
    #[must_use]
    pub fn inset(&self, distance: f64) -> Self {
        Self {
            half_width: self.half_width - distance,
            half_length: self.half_length - distance,
            radius: (self.radius - distance).max(0.0),
            ..*self
        }
    }

    /// Moves the outline by `(dx, dy)`.
    #[must_use]
    pub fn translated(mut self, dx: f64, dy: f64) -> Self {
        self.x += dx;
        self.y += dy;
        self
    }

    /// Returns `true` if the circle lies strictly inside the outline.
    #[must_use]
    pub fn contains_circle(&self, x: f64, y: f64, radius: f64) -> bool {
        let dx = (x - self.x).abs();
        let dy = (y - self.y).abs();
        if radius >= self.radius {
            // Corners rounded less than the circle never touch it.
            return dx + radius < self.half_width - TOLERANCE
                && dy + radius < self.half_length - TOLERANCE;
        }
        let ex = (dx - (self.half_width - self.radius)).max(0.0);
        let ey = (dy - (self.half_length - self.radius)).max(0.0);
        ex.hypot(ey) + radius < self.radius - TOLERANCE
    }

    /// Closed counter-clockwise wire at height `z`.
    ///
    /// Rounded outlines start where the bottom side meets the lower right
    /// corner arc. All arcs are exact.
    pub(crate) fn wire(&self, z: f64) -> Wire {
        let at = |x: f64, y: f64| Point3::new(self.x + x, self.y + y, z);
        let (a, b) = (self.half_width, self.half_length);

        if self.radius <= TOLERANCE {
            let corners = [(-a, -b), (a, -b), (a, b), (-a, b)]
                .map(|(x, y)| builder::vertex(at(x, y)));
            let edges: Vec<Edge> = (0..4)
                .map(|i| builder::line(&corners[i], &corners[(i + 1) % 4]))
                .collect();
            return Wire::from(edges);
        }

        let r = self.radius;
        let centres = [(a - r, -b + r), (a - r, b - r), (-a + r, b - r), (-a + r, -b + r)];
        let on_arc = |(cx, cy): (f64, f64), angle: f64| {
            let (sin, cos) = angle.sin_cos();
            at(r.mul_add(cos, cx), r.mul_add(sin, cy))
        };

        // Arc k turns through the quarter starting at -90 + 90k degrees.
        let starts: Vec<f64> = (0..4_u8)
            .map(|k| f64::from(k).mul_add(FRAC_PI_2, -FRAC_PI_2))
            .collect();
        let arc_start: Vec<_> = centres
            .iter()
            .zip(&starts)
            .map(|(&c, &angle)| builder::vertex(on_arc(c, angle)))
            .collect();
        let arc_end: Vec<_> = centres
            .iter()
            .zip(&starts)
            .map(|(&c, &angle)| builder::vertex(on_arc(c, angle + FRAC_PI_2)))
            .collect();

        let mut edges = Vec::with_capacity(8);
        for k in 0..4 {
            let transit = on_arc(centres[k], starts[k] + FRAC_PI_4);
            edges.push(builder::circle_arc(&arc_start[k], &arc_end[k], transit));
            edges.push(builder::line(&arc_end[k], &arc_start[(k + 1) % 4]));
        }
        Wire::from(edges)
    }
}

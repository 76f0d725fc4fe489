//! Terminal pad geometry.

use crate::geometry::{Block, GeometryError, GeometryResult, Solid, Tessellation, Vector3};

/// Pad orientation on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadOrientation {
    /// Pad width along X, length along Y.
    #[default]
    Vertical,
    /// Rotated 90°: pad length along X, width along Y.
    Horizontal,
}

/// Pad size from the datasheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadSize {
    /// Size across the pad (mm).
    pub width: f64,
    /// Size along the pad (mm).
    pub length: f64,
    /// Terminal thickness (mm).
    pub height: f64,
}

/// Where a pad sits, in pin order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadPlacement {
    /// Pad centre X (mm).
    pub x: f64,
    /// Pad centre Y (mm).
    pub y: f64,
    /// Pad orientation.
    pub orientation: PadOrientation,
}

impl PadPlacement {
    /// Unrotated pad centred at `(x, y)`.
    #[must_use]
    pub const fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            orientation: PadOrientation::Vertical,
        }
    }
}

/// Builds one pad centred at its placement, resting on Z=0.
///
/// # Errors
///
/// Returns an error if the pad size is not positive.
pub fn pad(
    size: &PadSize,
    placement: &PadPlacement,
    tessellation: &Tessellation,
) -> GeometryResult<Solid> {
    let (x_size, y_size) = match placement.orientation {
        PadOrientation::Vertical => (size.width, size.length),
        PadOrientation::Horizontal => (size.length, size.width),
    };
    Ok(Block::new(x_size, y_size, size.height)
        .build(tessellation)?
        .translate(Vector3::new(placement.x, placement.y, 0.0)))
}

/// Builds every pad and unions them into one multi-body solid.
///
/// # Errors
///
/// Returns an error if no placements are given, a pad is invalid, or two
/// pads overlap.
pub fn pads(
    size: &PadSize,
    placements: &[PadPlacement],
    tessellation: &Tessellation,
) -> GeometryResult<Solid> {
    let mut combined: Option<Solid> = None;
    for placement in placements {
        let next = pad(size, placement, tessellation)?;
        combined = Some(match combined {
            Some(solid) => solid.union(next)?,
            None => next,
        });
    }
    combined.ok_or(GeometryError::EmptySolid)
}

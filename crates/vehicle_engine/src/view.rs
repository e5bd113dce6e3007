//! View transform
//!
//! Pure mapping between model cells and screen pixels under zoom, quarter
//! turn rotation and pan. Nothing in here touches the grid model; rotating the
//! view never rotates the vehicle.
//!
//! Conventions:
//! - Screen space is y-down, in pixels.
//! - `pan` is the screen position of the model origin (the corner shared by
//!   cells (0, 0) and (-1, -1)).
//! - A cell maps to the screen position of its centre, so converting back
//!   with [`screen_to_model`] always lands inside the same cell.

use serde::{Deserialize, Serialize};

use crate::{EngineError, Position, Rectangle, Result};

/// Cell edge length in pixels at zoom 1.0
pub const CELL_SIZE: f32 = 20.0;

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 4.0;

/// Multiplier applied per zoom step (mouse wheel notch)
pub const ZOOM_STEP: f32 = 1.25;

pub fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_nan() { 1.0 } else { zoom.clamp(MIN_ZOOM, MAX_ZOOM) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// View rotation, clockwise on screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Accepts any multiple of 90, negative values turn counter clockwise
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        if degrees % 90 != 0 {
            return Err(EngineError::InvalidRotation { degrees });
        }
        Ok(match degrees.rem_euclid(360) {
            0 => Rotation::Deg0,
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            _ => Rotation::Deg270,
        })
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn rotated_cw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    pub fn rotated_ccw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg270,
            Rotation::Deg90 => Rotation::Deg0,
            Rotation::Deg180 => Rotation::Deg90,
            Rotation::Deg270 => Rotation::Deg180,
        }
    }

    /// Model axes → screen axes
    pub fn apply(self, x: f32, y: f32) -> (f32, f32) {
        match self {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (-y, x),
            Rotation::Deg180 => (-x, -y),
            Rotation::Deg270 => (y, -x),
        }
    }

    /// Screen axes → model axes
    pub fn invert(self, x: f32, y: f32) -> (f32, f32) {
        match self {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (y, -x),
            Rotation::Deg180 => (-x, -y),
            Rotation::Deg270 => (-y, x),
        }
    }
}

/// Screen position of the centre of cell `pos`
pub fn model_to_screen(pos: Position, zoom: f32, rotation: Rotation, pan: ScreenPoint) -> ScreenPoint {
    model_point_to_screen(pos.x as f32 + 0.5, pos.y as f32 + 0.5, zoom, rotation, pan)
}

/// Cell containing the screen pixel `point`. Exact inverse of [`model_to_screen`].
pub fn screen_to_model(point: ScreenPoint, zoom: f32, rotation: Rotation, pan: ScreenPoint) -> Position {
    let (x, y) = screen_to_model_point(point, zoom, rotation, pan);
    Position::new(x.floor() as i32, y.floor() as i32)
}

/// Continuous model coordinates → screen pixels
pub fn model_point_to_screen(x: f32, y: f32, zoom: f32, rotation: Rotation, pan: ScreenPoint) -> ScreenPoint {
    let scale = CELL_SIZE * clamp_zoom(zoom);
    let (rx, ry) = rotation.apply(x, y);
    ScreenPoint::new(rx * scale + pan.x, ry * scale + pan.y)
}

/// Screen pixels → continuous model coordinates
pub fn screen_to_model_point(point: ScreenPoint, zoom: f32, rotation: Rotation, pan: ScreenPoint) -> (f32, f32) {
    let scale = CELL_SIZE * clamp_zoom(zoom);
    rotation.invert((point.x - pan.x) / scale, (point.y - pan.y) / scale)
}

/// Zoom, rotation and pan of one canvas
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    zoom: f32,
    pub rotation: Rotation,
    pub pan: ScreenPoint,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            rotation: Rotation::Deg0,
            pan: ScreenPoint::default(),
        }
    }
}

impl ViewTransform {
    pub fn new(zoom: f32, rotation: Rotation, pan: ScreenPoint) -> Self {
        Self {
            zoom: clamp_zoom(zoom),
            rotation,
            pan,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Edge length of one cell in pixels at the current zoom
    pub fn cell_pixels(&self) -> f32 {
        CELL_SIZE * self.zoom
    }

    pub fn model_to_screen(&self, pos: Position) -> ScreenPoint {
        model_to_screen(pos, self.zoom, self.rotation, self.pan)
    }

    pub fn screen_to_model(&self, point: ScreenPoint) -> Position {
        screen_to_model(point, self.zoom, self.rotation, self.pan)
    }

    /// Screen bounding box (min, max) of cell `pos`
    pub fn cell_rect(&self, pos: Position) -> (ScreenPoint, ScreenPoint) {
        let a = model_point_to_screen(pos.x as f32, pos.y as f32, self.zoom, self.rotation, self.pan);
        let b = model_point_to_screen(pos.x as f32 + 1.0, pos.y as f32 + 1.0, self.zoom, self.rotation, self.pan);
        (ScreenPoint::new(a.x.min(b.x), a.y.min(b.y)), ScreenPoint::new(a.x.max(b.x), a.y.max(b.y)))
    }

    /// Set the zoom without an anchor (the model origin stays put)
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Change the zoom while keeping the model point under `anchor` fixed
    pub fn zoom_at(&mut self, zoom: f32, anchor: ScreenPoint) {
        let (mx, my) = screen_to_model_point(anchor, self.zoom, self.rotation, self.pan);
        self.zoom = clamp_zoom(zoom);
        let moved = model_point_to_screen(mx, my, self.zoom, self.rotation, ScreenPoint::default());
        self.pan = ScreenPoint::new(anchor.x - moved.x, anchor.y - moved.y);
    }

    /// Multiply the zoom by `factor`, anchored at `anchor`
    pub fn zoom_by(&mut self, factor: f32, anchor: ScreenPoint) {
        self.zoom_at(self.zoom * factor, anchor);
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan.x += dx;
        self.pan.y += dy;
    }

    /// Move the view contents by whole screen cells
    pub fn pan_by_cells(&mut self, dx: i32, dy: i32) {
        let step = self.cell_pixels();
        self.pan_by(dx as f32 * step, dy as f32 * step);
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Pan so the centre of `bounds` (or the origin when `None`) sits in the
    /// middle of a viewport of `viewport` pixels.
    pub fn center_on(&mut self, bounds: Option<Rectangle>, viewport: ScreenSize) {
        let (cx, cy) = match bounds {
            Some(rect) => (
                (rect.start.x as f32 + rect.end.x as f32 + 1.0) / 2.0,
                (rect.start.y as f32 + rect.end.y as f32 + 1.0) / 2.0,
            ),
            None => (0.0, 0.0),
        };
        let center = model_point_to_screen(cx, cy, self.zoom, self.rotation, ScreenPoint::default());
        self.pan = ScreenPoint::new(viewport.width / 2.0 - center.x, viewport.height / 2.0 - center.y);
    }

    /// Inclusive cell range touched by a viewport of `viewport` pixels
    pub fn visible_cells(&self, viewport: ScreenSize) -> Rectangle {
        let corners = [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(viewport.width, 0.0),
            ScreenPoint::new(0.0, viewport.height),
            ScreenPoint::new(viewport.width, viewport.height),
        ];
        let mut cells = corners.iter().map(|p| self.screen_to_model(*p));
        let first = cells.next().unwrap_or_default();
        cells.fold(Rectangle::from_corners(first, first), |mut rect, pos| {
            rect.include(pos);
            rect
        })
    }
}

//! Tests for the model ↔ screen mapping

use pretty_assertions::assert_eq;
use vehicle_engine::{
    EngineError, Position, Rectangle, Rotation, ScreenPoint, ScreenSize, ViewTransform, model_to_screen, screen_to_model,
    view::{CELL_SIZE, MAX_ZOOM, MIN_ZOOM, clamp_zoom},
};

const ZOOMS: [f32; 4] = [0.5, 1.0, 2.0, 4.0];
const ROTATIONS: [Rotation; 4] = [Rotation::Deg0, Rotation::Deg90, Rotation::Deg180, Rotation::Deg270];

#[test]
fn test_round_trip_all_zooms_and_rotations() {
    let pan = ScreenPoint::new(123.0, -45.0);
    for zoom in ZOOMS {
        for rotation in ROTATIONS {
            for y in -6..6 {
                for x in -6..6 {
                    let pos = Position::new(x, y);
                    let screen = model_to_screen(pos, zoom, rotation, pan);
                    assert_eq!(screen_to_model(screen, zoom, rotation, pan), pos, "zoom {zoom}, rotation {rotation:?}");
                }
            }
        }
    }
}

#[test]
fn test_any_pixel_of_a_cell_maps_back() {
    let view = ViewTransform::new(2.0, Rotation::Deg270, ScreenPoint::new(10.0, 10.0));
    let pos = Position::new(4, -3);
    let (min, max) = view.cell_rect(pos);
    assert_eq!(max.x - min.x, CELL_SIZE * 2.0);

    for (dx, dy) in [(0.5, 0.5), (39.5, 0.5), (0.5, 39.5), (39.5, 39.5)] {
        assert_eq!(view.screen_to_model(ScreenPoint::new(min.x + dx, min.y + dy)), pos);
    }
}

#[test]
fn test_rotation_moves_cells_clockwise() {
    let origin = ScreenPoint::default();
    // cell (1, 0) sits right of the origin unrotated, below it at 90°
    let right = model_to_screen(Position::new(1, 0), 1.0, Rotation::Deg0, origin);
    let below = model_to_screen(Position::new(1, 0), 1.0, Rotation::Deg90, origin);
    assert_eq!(right, ScreenPoint::new(30.0, 10.0));
    assert_eq!(below, ScreenPoint::new(-10.0, 30.0));
}

#[test]
fn test_zoom_is_clamped() {
    assert_eq!(clamp_zoom(0.1), MIN_ZOOM);
    assert_eq!(clamp_zoom(10.0), MAX_ZOOM);
    assert_eq!(clamp_zoom(f32::NAN), 1.0);

    let mut view = ViewTransform::default();
    view.set_zoom(8.0);
    assert_eq!(view.zoom(), MAX_ZOOM);
    view.zoom_by(0.01, ScreenPoint::default());
    assert_eq!(view.zoom(), MIN_ZOOM);
}

#[test]
fn test_zoom_keeps_anchor_cell() {
    for rotation in ROTATIONS {
        let mut view = ViewTransform::new(1.0, rotation, ScreenPoint::new(200.0, 150.0));
        let anchor = ScreenPoint::new(337.0, 91.0);
        let cell = view.screen_to_model(anchor);

        for zoom in ZOOMS {
            view.zoom_at(zoom, anchor);
            assert_eq!(view.screen_to_model(anchor), cell, "zoom {zoom}, rotation {rotation:?}");
        }
    }
}

#[test]
fn test_rotation_from_degrees() {
    assert_eq!(Rotation::from_degrees(0).unwrap(), Rotation::Deg0);
    assert_eq!(Rotation::from_degrees(450).unwrap(), Rotation::Deg90);
    assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::Deg270);
    assert!(matches!(Rotation::from_degrees(45), Err(EngineError::InvalidRotation { degrees: 45 })));

    let mut rotation = Rotation::Deg0;
    for _ in 0..4 {
        rotation = rotation.rotated_cw();
    }
    assert_eq!(rotation, Rotation::Deg0);
    assert_eq!(Rotation::Deg0.rotated_ccw(), Rotation::Deg270);
}

#[test]
fn test_center_on_bounds() {
    let mut view = ViewTransform::default();
    let viewport = ScreenSize::new(400.0, 300.0);
    view.center_on(Some(Rectangle::from_corners(Position::new(0, 0), Position::new(9, 4))), viewport);

    // the middle of a 10x5 block lies between cells, at model (5, 2.5)
    assert_eq!(view.pan, ScreenPoint::new(100.0, 100.0));
    assert_eq!(view.screen_to_model(ScreenPoint::new(200.0, 150.0)), Position::new(5, 2));

    view.center_on(None, viewport);
    assert_eq!(view.pan, ScreenPoint::new(200.0, 150.0));
}

#[test]
fn test_visible_cells() {
    let view = ViewTransform::new(1.0, Rotation::Deg180, ScreenPoint::new(100.0, 100.0));
    let visible = view.visible_cells(ScreenSize::new(200.0, 200.0));
    assert_eq!(visible, Rectangle::from_corners(Position::new(-5, -5), Position::new(5, 5)));
}

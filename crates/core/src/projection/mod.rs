//! Conversions from map space to the screen. There are three spaces involved:
//!
//! - **Map space**: `(x, y, z)` where `x`/`y` are hex coordinates (column and
//!   row, see [crate::HexPoint]) and `z` is elevation. `x` and `y` can be
//!   fractional, e.g. when sampling between cell centers.
//! - **World space**: map space embedded in a Cartesian plane. Odd rows are
//!   shifted right by half a cell, rows are squashed to the height of an
//!   equilateral triangle, and elevation is compressed.
//! - **Screen space**: pixels. The world is tilted towards the viewer by a
//!   fixed angle, so elevation pushes points up the screen, then the camera
//!   pans and zooms.
//!
//! Going forward through these spaces is easy. Going backward from the screen
//! is not, because elevation and row both feed into screen `y`. See
//! [Projection::pick_map_point] for how that's handled.

pub mod pick;

use crate::util::frac;
use nalgebra::{Point2, Point3, Rotation3, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A point in map space: column, row, elevation
pub type MapPoint = Point3<f64>;
/// A point in world space, after the hex grid is embedded in a plane
pub type WorldPoint = Point3<f64>;
/// A point in screen space, in pixels
pub type ScreenPoint = Point2<f64>;

/// Vertical distance between two rows, relative to the horizontal distance
/// between two columns. This is the height of an equilateral triangle.
pub const TRIANGLE_HEIGHT: f64 = 0.8660254037844386; // sqrt(3)/2
/// World units per unit of elevation
pub const HEIGHT_SCALE: f64 = 1.0 / 3.0;
/// The camera tilt, measured from straight down: `acos(1/sqrt(3))`
pub const VIEW_ANGLE: f64 = 0.9553166181245092;
pub const VIEW_ANGLE_COS: f64 = 0.5773502691896258; // 1/sqrt(3)
pub const VIEW_ANGLE_SIN: f64 = 0.816496580927726; // sqrt(2/3)
/// Pixels per world unit at a camera zoom of 1
pub const BASE_ZOOM: f64 = 32.0;

/// The camera looking at the map. Only its pan and zoom matter here.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Camera {
    /// Scale factor on top of [BASE_ZOOM]
    #[validate(range(min = 0.000001))]
    pub zoom: f64,
    /// Pan offset, in unzoomed pixels. The point at this position is drawn
    /// at the center of the viewport.
    pub pos: Vector2<f64>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pos: Vector2::zeros(),
        }
    }
}

/// The surface being drawn to
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width and height in pixels
    pub size: Vector2<f64>,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Vector2::new(width, height),
        }
    }

    pub fn center(&self) -> Vector2<f64> {
        self.size / 2.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Projects map points onto the screen (and back) for one camera and
/// viewport. Cheap to copy, so make a new one whenever the camera moves.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Projection {
    pub camera: Camera,
    pub viewport: Viewport,
}

impl Projection {
    pub fn new(camera: Camera, viewport: Viewport) -> Self {
        Self { camera, viewport }
    }

    /// Embed a map point in world space. Rows alternate between being shifted
    /// right by half a cell and not. For fractional rows the shift slides
    /// linearly between the two, so a point moving smoothly down the map also
    /// moves smoothly in world space.
    pub fn map_to_world(point: MapPoint) -> WorldPoint {
        let row = point.y.floor();
        let shift = if (row as i64).rem_euclid(2) == 0 {
            frac(point.y) * 0.5
        } else {
            0.5 - frac(point.y) * 0.5
        };
        WorldPoint::new(
            point.x + shift,
            point.y * TRIANGLE_HEIGHT,
            point.z * HEIGHT_SCALE,
        )
    }

    /// Tilt a world point towards the viewer and scale it to pixels, without
    /// applying the camera. This is the space sprites are laid out in.
    pub fn world_to_sprite(point: WorldPoint) -> Point2<f64> {
        Point2::new(BASE_ZOOM * point.x, BASE_ZOOM * Self::tilt(point))
    }

    /// Project a world point onto the screen
    pub fn world_to_screen(&self, point: WorldPoint) -> ScreenPoint {
        let Camera { zoom, pos } = self.camera;
        let size = self.viewport.size;
        let rotated_y = Self::tilt(point);
        ScreenPoint::new(
            size.x / 2.0 + zoom * (BASE_ZOOM * point.x - pos.x),
            size.y / 2.0 + zoom * (BASE_ZOOM * rotated_y - pos.y),
        )
    }

    /// Project a map point onto the screen
    pub fn map_to_screen(&self, point: MapPoint) -> ScreenPoint {
        self.world_to_screen(Self::map_to_world(point))
    }

    /// Rotate about the x axis by [VIEW_ANGLE], collapsing y and elevation
    /// into one screen axis. Higher points end up further up the screen.
    fn tilt(point: WorldPoint) -> f64 {
        point.y * VIEW_ANGLE_COS - point.z * VIEW_ANGLE_SIN
    }
}

/// Direction that sunlight travels, for shading terrain. Straight down, then
/// tilted 45° about the x axis and turned 30° about the z axis.
pub fn sun_direction() -> Vector3<f64> {
    let tilt =
        Rotation3::from_axis_angle(&Vector3::x_axis(), (-45f64).to_radians());
    let turn =
        Rotation3::from_axis_angle(&Vector3::z_axis(), 30f64.to_radians());
    turn * (tilt * Vector3::new(0.0, 0.0, -1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_constants() {
        assert_approx_eq!(TRIANGLE_HEIGHT, 3f64.sqrt() / 2.0);
        assert_approx_eq!(VIEW_ANGLE, (1.0 / 3f64.sqrt()).acos());
        assert_approx_eq!(VIEW_ANGLE_COS, VIEW_ANGLE.cos());
        assert_approx_eq!(VIEW_ANGLE_SIN, VIEW_ANGLE.sin());
    }

    #[test]
    fn test_map_to_world_row_shift() {
        // Even rows aren't shifted, odd rows are shifted half a cell
        let even = Projection::map_to_world(MapPoint::new(2.0, 4.0, 0.0));
        assert_eq!(even.x, 2.0);
        let odd = Projection::map_to_world(MapPoint::new(2.0, 5.0, 0.0));
        assert_eq!(odd.x, 2.5);
        let negative_odd =
            Projection::map_to_world(MapPoint::new(2.0, -1.0, 0.0));
        assert_eq!(negative_odd.x, 2.5);

        // Between rows, the shift slides from one to the other
        let quarter = Projection::map_to_world(MapPoint::new(2.0, 4.25, 0.0));
        assert_eq!(quarter.x, 2.125);
        let three_quarter =
            Projection::map_to_world(MapPoint::new(2.0, 5.5, 0.0));
        assert_eq!(three_quarter.x, 2.25);
    }

    #[test]
    fn test_map_to_world_scaling() {
        let world = Projection::map_to_world(MapPoint::new(0.0, 2.0, 6.0));
        assert_approx_eq!(world.y, 3f64.sqrt());
        assert_approx_eq!(world.z, 2.0);
    }

    #[test]
    fn test_world_to_screen_origin() {
        // The world origin lands on the viewport center when the camera isn't
        // panned, regardless of zoom
        for &zoom in &[0.5, 1.0, 3.0] {
            let projection = Projection::new(
                Camera {
                    zoom,
                    pos: Vector2::zeros(),
                },
                Viewport::new(640.0, 480.0),
            );
            let screen = projection.world_to_screen(WorldPoint::origin());
            assert_eq!(screen, ScreenPoint::new(320.0, 240.0));
        }
    }

    #[test]
    fn test_map_to_screen() {
        let projection = Projection::default();
        let screen = projection.map_to_screen(MapPoint::new(3.0, 5.0, 0.0));
        assert_approx_eq!(screen.x, 400.0 + 32.0 * 3.5);
        assert_approx_eq!(screen.y, 300.0 + 32.0 * 2.5);
    }

    #[test]
    fn test_elevation_moves_up_screen() {
        let projection = Projection::default();
        let low = projection.map_to_screen(MapPoint::new(1.0, 1.0, 0.0));
        let high = projection.map_to_screen(MapPoint::new(1.0, 1.0, 3.0));
        assert_eq!(low.x, high.x);
        assert_approx_eq!(low.y - high.y, BASE_ZOOM * VIEW_ANGLE_SIN);
    }

    #[test]
    fn test_zoom_scales_offset_from_center() {
        let point = WorldPoint::new(1.5, -2.0, 0.7);
        let camera = Camera {
            zoom: 1.25,
            pos: Vector2::new(40.0, -12.0),
        };
        let viewport = Viewport::new(1024.0, 768.0);
        let center = viewport.center();
        let base = Projection::new(camera, viewport).world_to_screen(point);

        let k = 3.0;
        let zoomed = Projection::new(
            Camera {
                zoom: camera.zoom * k,
                ..camera
            },
            viewport,
        )
        .world_to_screen(point);

        assert_approx_eq!(zoomed.x - center.x, k * (base.x - center.x));
        assert_approx_eq!(zoomed.y - center.y, k * (base.y - center.y));
    }

    #[test]
    fn test_pan_shifts_screen() {
        let point = WorldPoint::new(1.0, 1.0, 0.0);
        let still = Projection::default().world_to_screen(point);
        let panned = Projection::new(
            Camera {
                zoom: 2.0,
                pos: Vector2::new(10.0, 5.0),
            },
            Viewport::default(),
        )
        .world_to_screen(point);
        assert_approx_eq!(panned.x - 400.0, 2.0 * (still.x - 400.0 - 10.0));
        assert_approx_eq!(panned.y - 300.0, 2.0 * (still.y - 300.0 - 5.0));
    }

    #[test]
    fn test_sprite_space_ignores_camera() {
        let point = WorldPoint::new(2.0, 1.0, 0.5);
        let sprite = Projection::world_to_sprite(point);
        let screen = Projection::default().world_to_screen(point);
        assert_approx_eq!(sprite.x + 400.0, screen.x);
        assert_approx_eq!(sprite.y + 300.0, screen.y);
    }

    #[test]
    fn test_sun_direction() {
        let sun = sun_direction();
        assert_approx_eq!(sun.norm(), 1.0);
        let half_sqrt2 = 2f64.sqrt() / 2.0;
        assert_approx_eq!(sun.x, half_sqrt2 * 0.5);
        assert_approx_eq!(sun.y, -half_sqrt2 * 3f64.sqrt() / 2.0);
        assert_approx_eq!(sun.z, -half_sqrt2);
    }
}

use crate::{
    projection::{MapPoint, Projection, ScreenPoint, BASE_ZOOM},
    util::round_half_up,
    NoiseGenerator,
};
use log::{debug, trace};

/// Maximum number of rows [Projection::pick_map_point] will scan before
/// giving up and returning its best guess so far
pub const PICK_ROW_LIMIT: i32 = 256;

/// Anything that can report terrain elevation for a map point. The point's
/// `z` is always 0 when queried.
pub trait HeightSource {
    fn height_at(&self, point: &MapPoint) -> f64;
}

impl<F: Fn(&MapPoint) -> f64> HeightSource for F {
    fn height_at(&self, point: &MapPoint) -> f64 {
        self(point)
    }
}

/// Height source for when no terrain is loaded. Everything is at 0.
#[derive(Copy, Clone, Debug, Default)]
pub struct FlatTerrain;

impl HeightSource for FlatTerrain {
    fn height_at(&self, _: &MapPoint) -> f64 {
        0.0
    }
}

/// Terrain straight out of a noise generator, stretched vertically
#[derive(Copy, Clone, Debug)]
pub struct ScaledNoise<'a> {
    pub noise: &'a NoiseGenerator,
    pub vertical_scale: f64,
}

impl<'a> HeightSource for ScaledNoise<'a> {
    fn height_at(&self, point: &MapPoint) -> f64 {
        self.noise.sample(point.x, point.y) * self.vertical_scale
    }
}

/// A candidate cell during picking, and how far its projection is from the
/// target
#[derive(Copy, Clone, Debug)]
struct Candidate {
    point: MapPoint,
    distance_squared: f64,
}

impl Projection {
    /// Find the map cell drawn at a screen position, accounting for terrain
    /// height.
    ///
    /// With elevation in the mix there's no closed-form inverse, since a
    /// cell further down the map can be raised up to the same screen spot as
    /// a flat cell above it. Instead:
    ///
    /// 1. Invert the projection assuming flat ground, giving a starting row
    ///    and the nearest column in that row
    /// 2. Walk down the map one row at a time. In each row take the cell
    ///    closest to the flat estimate's column (which depends on row parity
    ///    and which side of the column the estimate fell on), look up its
    ///    height, and project it back to the screen.
    /// 3. Stop as soon as a row lands further from the target than the
    ///    previous row, and return the closest cell.
    ///
    /// Raised terrain only ever pushes cells up the screen, so rows further
    /// down can be the right answer but rows above the flat estimate can't.
    ///
    /// **This is a heuristic.** It assumes that distance to the target falls
    /// and then rises as rows are scanned, which holds for smooth terrain but
    /// not for sharp cliffs, where it can stop a row (or more) early. It never
    /// fails: if [PICK_ROW_LIMIT] rows are scanned without the distance
    /// rising, the best cell so far is returned.
    pub fn pick_map_point(
        &self,
        screen: ScreenPoint,
        heights: &impl HeightSource,
    ) -> MapPoint {
        let search = self.search_rows(screen, heights);
        if search.hit_limit {
            debug!(
                "Picking {} hit the {} row limit, using {}",
                screen, PICK_ROW_LIMIT, search.point
            );
        } else {
            trace!(
                "Picked {} for {} after {} rows",
                search.point,
                screen,
                search.rows
            );
        }
        search.point
    }

    /// The row scan behind [Self::pick_map_point]
    fn search_rows(
        &self,
        screen: ScreenPoint,
        heights: &impl HeightSource,
    ) -> RowSearch {
        let camera = self.camera;
        let center = self.viewport.center();

        // Nearest row at or above the point, assuming flat ground. Rows are
        // half a base zoom apart on screen.
        let y = ((screen.y - center.y) / camera.zoom + camera.pos.y)
            / BASE_ZOOM
            * 2.0;
        let start_row = y.floor() as i64;
        let start_odd = start_row.rem_euclid(2) == 1;

        // Flat-ground column in the start row, undoing the odd row shift
        let x = ((screen.x - center.x) / camera.zoom + camera.pos.x)
            / BASE_ZOOM
            - if start_odd { 0.5 } else { 0.0 };
        let column = round_half_up(x);
        // Does the point fall left of the nearest column?
        let before = x < column;
        let column = column as i64;

        let candidate = |row: i64| {
            let odd_row = row.rem_euclid(2) == 1;
            // Moving between rows of different parity, the closest cell is
            // either the same column or one over, depending on which side of
            // the column the point is
            let shift = match (start_odd, odd_row) {
                (true, false) if !before => 1,
                (false, true) if before => -1,
                _ => 0,
            };
            let mut point = MapPoint::new(
                column.saturating_add(shift) as f64,
                row as f64,
                0.0,
            );
            point.z = heights.height_at(&point);
            let projected = self.map_to_screen(point);
            Candidate {
                point,
                distance_squared: nalgebra::distance_squared(
                    &screen, &projected,
                ),
            }
        };

        let mut best = candidate(start_row);
        let last_row = start_row.saturating_add(i64::from(PICK_ROW_LIMIT));
        for row in start_row.saturating_add(1)..last_row {
            let next = candidate(row);
            if next.distance_squared > best.distance_squared {
                return RowSearch {
                    point: best.point,
                    // Includes the row that was just rejected
                    rows: row - start_row + 1,
                    hit_limit: false,
                };
            }
            best = next;
        }
        RowSearch {
            point: best.point,
            rows: last_row - start_row,
            hit_limit: true,
        }
    }
}

/// Outcome of a row scan
#[derive(Copy, Clone, Debug)]
struct RowSearch {
    point: MapPoint,
    /// Rows whose candidate was evaluated
    rows: i64,
    hit_limit: bool,
}

//! Recursive shadowcasting at double resolution
//!
//! Each call scans one row or column (a *frame*) at a fixed depth inside a slope
//! interval. Walls spawn a deeper frame bounded by their inner corner; open cells
//! past a wall tighten the start of the interval for everything scanned after them.

use super::geometry::{round_half_even, slope, squared_distance};
use super::octant::Octant;
use super::subcell::{QuadrantSet, SubCellBuffer};
use crate::world::{GridMap, Position};

/// One visibility pass over a map from a fixed viewer
pub struct Scanner<'a> {
    map: &'a GridMap,
    visibility: &'a mut SubCellBuffer,
    origin: Position,
    range: i32,
    frames: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(
        map: &'a GridMap,
        visibility: &'a mut SubCellBuffer,
        origin: Position,
        range: i32,
    ) -> Self {
        Self {
            map,
            visibility,
            origin,
            range,
            frames: 0,
        }
    }

    /// Frames expanded so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Scan one whole octant from the ring next to the viewer
    pub fn scan_octant(&mut self, octant: &Octant) {
        self.scan(1, octant, 1.0, 0.0);
    }

    /// Extent of the map along the octant's secondary axis
    fn secondary_len(&self, octant: &Octant) -> i32 {
        let (_, len) = octant.to_local(self.map.width(), self.map.height());
        len
    }

    fn primary_len(&self, octant: &Octant) -> i32 {
        let (len, _) = octant.to_local(self.map.width(), self.map.height());
        len
    }

    /// Slope from the viewer to a point
    fn slope_to(&self, octant: &Octant, x: f64, y: f64) -> f64 {
        slope(
            x,
            y,
            self.origin.x as f64,
            self.origin.y as f64,
            octant.inverted_slope(),
        )
    }

    fn scan(&mut self, depth: i32, octant: &Octant, mut start_slope: f64, end_slope: f64) {
        self.frames += 1;

        let range2 = i64::from(self.range) * i64::from(self.range);
        let (origin_p, origin_s) = octant.to_local(self.origin.x, self.origin.y);
        let secondary_len = self.secondary_len(octant);

        let p = origin_p + octant.primary_step * depth;
        if p < 0 || p >= self.primary_len(octant) || secondary_len == 0 {
            return;
        }

        let spread = round_half_even(start_slope * depth as f64);
        let mut s = (origin_s as f64 + octant.side as f64 * spread)
            .clamp(0.0, (secondary_len - 1) as f64) as i32;

        let sweep = octant.sweep_step();
        // Corner offsets in local units: toward the viewer along the primary axis,
        // toward the wedge's outer edge along the secondary one.
        let near = -0.5 * octant.primary_step as f64;
        let outer = 0.5 * octant.side as f64;

        while s >= 0 && s < secondary_len {
            let (x, y) = octant.to_xy(p, s);
            if !octant.within(self.slope_to(octant, x as f64, y as f64), end_slope) {
                break;
            }

            if squared_distance(x, y, self.origin.x, self.origin.y) <= range2 {
                // the cell swept just before this one
                let (bx, by) = octant.to_xy(p, s - sweep);

                if self.map.is_opaque(x, y) {
                    self.reveal_wall(x, y, octant);

                    if self.map.is_open(bx, by) {
                        let (cx, cy) = octant.to_xy(p as f64 + near, s as f64 + outer);
                        let narrowed = self.slope_to(octant, cx, cy);
                        self.scan(depth + 1, octant, start_slope, narrowed);
                    }
                } else {
                    if self.map.is_opaque(bx, by) {
                        let (cx, cy) = octant.to_xy(p as f64 - near, s as f64 + outer);
                        start_slope = octant.orientation() as f64 * self.slope_to(octant, cx, cy);
                    }

                    self.visibility.reveal_all(x, y);
                }
            }

            s += sweep;
        }
        s -= sweep;

        let s = s.clamp(0, secondary_len - 1);
        let (x, y) = octant.to_xy(p, s);
        if depth < self.range && self.map.is_open(x, y) {
            self.scan(depth + 1, octant, start_slope, end_slope);
        }
    }

    /// Light the quadrants of a wall cell that can face the viewer
    fn reveal_wall(&mut self, x: i32, y: i32, octant: &Octant) {
        let (_, secondary) = octant.to_local(x, y);
        let (_, origin_s) = octant.to_local(self.origin.x, self.origin.y);

        let mut shown = QuadrantSet::FULL
            .difference(octant.always_hidden(secondary == origin_s));

        for (side, quadrant) in octant.occluders {
            let (dx, dy) = side.step();
            if self.map.blocks_sight(x + dx, y + dy) {
                shown = shown.without(quadrant);
            }
        }

        self.visibility.reveal(x, y, shown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fov::subcell::Quadrant;

    fn scan_all(map: &GridMap, origin: Position, range: i32) -> SubCellBuffer {
        let mut buffer = SubCellBuffer::new(map.width(), map.height());
        buffer.reveal_all(origin.x, origin.y);
        let mut scanner = Scanner::new(map, &mut buffer, origin, range);
        for octant in Octant::ALL.iter() {
            scanner.scan_octant(octant);
        }
        buffer
    }

    fn scan_one(map: &GridMap, origin: Position, range: i32, number: u8) -> SubCellBuffer {
        let mut buffer = SubCellBuffer::new(map.width(), map.height());
        let octant = Octant::ALL[(number - 1) as usize];
        Scanner::new(map, &mut buffer, origin, range).scan_octant(&octant);
        buffer
    }

    #[test]
    fn test_octant_stays_in_its_wedge() {
        let map = GridMap::new(11, 11);
        let origin = Position::new(5, 5);
        // NNW: rows above the viewer, columns at or left of it
        let buffer = scan_one(&map, origin, 5, 1);
        for y in 0..11 {
            for x in 0..11 {
                if buffer.quadrants_of(x, y).is_empty() {
                    continue;
                }
                assert!(y < 5, "({}, {}) below the viewer", x, y);
                assert!(x <= 5, "({}, {}) right of the centerline", x, y);
                assert!(5 - x <= 5 - y, "({}, {}) past the diagonal", x, y);
            }
        }
        assert_eq!(buffer.quadrants_of(5, 0), QuadrantSet::FULL);
        assert_eq!(buffer.quadrants_of(2, 1), QuadrantSet::FULL);
    }

    #[test]
    fn test_every_octant_reaches_its_depth_limit() {
        let map = GridMap::new(11, 11);
        let origin = Position::new(5, 5);
        let tips = [(5, 0), (5, 0), (10, 5), (10, 5), (5, 10), (5, 10), (0, 5), (0, 5)];
        for (number, (x, y)) in (1..=8).zip(tips) {
            let buffer = scan_one(&map, origin, 5, number);
            assert_eq!(
                buffer.quadrants_of(x, y),
                QuadrantSet::FULL,
                "octant {} missed ({}, {})",
                number,
                x,
                y
            );
        }
    }

    #[test]
    fn test_wall_row_hides_far_corners() {
        // viewer under a horizontal wall; (1, 1) is seen from the lower right
        let map = GridMap::from_rows(&[".....", "#####", ".....", ".....", "....."]);
        let buffer = scan_all(&map, Position::new(2, 3), 5);

        let seen = buffer.quadrants_of(1, 1);
        assert!(seen.contains(Quadrant::BottomLeft));
        assert!(seen.contains(Quadrant::BottomRight));
        // back corner and the corner tucked against the next wall stay dark
        assert!(!seen.contains(Quadrant::TopLeft));
        assert!(!seen.contains(Quadrant::TopRight));

        for x in 0..5 {
            assert!(buffer.quadrants_of(x, 0).is_empty(), "({}, 0) behind the wall", x);
        }
    }

    #[test]
    fn test_wall_on_centerline_shows_front_face_only() {
        let map = GridMap::from_rows(&[".....", "..#..", ".....", ".....", "....."]);
        let buffer = scan_all(&map, Position::new(2, 2), 5);
        assert_eq!(
            buffer.quadrants_of(2, 1),
            QuadrantSet::of(&[Quadrant::BottomLeft, Quadrant::BottomRight])
        );
    }

    /// One hex digit per cell of its visible quadrants: TL = 1, BL = 2, TR = 4, BR = 8
    fn mask_rows(buffer: &SubCellBuffer, width: i32, height: i32) -> Vec<String> {
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        let bits: u32 = buffer
                            .quadrants_of(x, y)
                            .iter()
                            .map(|q| match q {
                                Quadrant::TopLeft => 1,
                                Quadrant::BottomLeft => 2,
                                Quadrant::TopRight => 4,
                                Quadrant::BottomRight => 8,
                            })
                            .sum();
                        char::from_digit(bits, 16).unwrap_or('?')
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_wall_runs_mirrored_into_every_octant() {
        // A horizontal pair, a vertical pair with a ragged end and an axis wall,
        // mirrored into all eight octants around the viewer at (7, 7).
        let rows = [
            "...............",
            ".......#.......",
            "...##.....##...",
            "..#...#.#...#..",
            "..#..##.##..#..",
            "....#.....#....",
            "...##.....##...",
            ".#...........#.",
            "...##.....##...",
            "....#.....#....",
            "..#..##.##..#..",
            "..#...#.#...#..",
            "...##.....##...",
            ".......#.......",
            "...............",
        ];
        let expected = [
            "000000000000000",
            "000000faf000000",
            "000000fff000000",
            "000f00cf300f000",
            "0000faefbaf0000",
            "0000cfffff30000",
            "0ffaefffffbaff0",
            "0cfffffffffff30",
            "0ff5dfffff75ff0",
            "0000cfffff30000",
            "0000f5df75f0000",
            "000f00cf300f000",
            "000000fff000000",
            "000000f5f000000",
            "000000000000000",
        ];

        let map = GridMap::from_rows(&rows);
        let buffer = scan_all(&map, Position::new(7, 7), 7);
        let masks = mask_rows(&buffer, 15, 15);
        for (y, (got, want)) in masks.iter().zip(expected).enumerate() {
            assert_eq!(got.as_str(), want, "row {}", y);
        }
    }

    #[test]
    fn test_viewer_in_corner_stays_in_bounds() {
        let map = GridMap::new(3, 3);
        for origin in [(0, 0), (2, 0), (0, 2), (2, 2)] {
            let buffer = scan_all(&map, origin.into(), 10);
            assert_eq!(buffer.count(), 36, "viewer at {:?}", origin);
        }
    }

    #[test]
    fn test_frames_are_counted() {
        let map = GridMap::new(9, 9);
        let mut buffer = SubCellBuffer::new(9, 9);
        let mut scanner = Scanner::new(&map, &mut buffer, Position::new(4, 4), 3);
        scanner.scan_octant(&Octant::ALL[0]);
        // depths 1, 2, 3 and nothing else on an open map
        assert_eq!(scanner.frames(), 3);
    }
}

use crate::scene::Start;
use crate::world::Facing;

/// Camera plane length; 0.66 against a unit direction gives a ~66° horizontal FOV.
pub const PLANE_LENGTH: f64 = 0.66;

/// First-person observer: position in grid units plus view direction and camera plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observer {
    pub pos: [f64; 2],   // (x, y), 1 unit = 1 cell
    pub dir: [f64; 2],   // view direction
    pub plane: [f64; 2], // perpendicular to dir, length sets FOV
}

impl Observer {
    /// Centered in the start cell, facing the marker's direction.
    pub fn spawn(start: Start) -> Self {
        let (dir, plane) = match start.facing {
            Facing::North => ([0.0, -1.0], [PLANE_LENGTH, 0.0]),
            Facing::South => ([0.0, 1.0], [-PLANE_LENGTH, 0.0]),
            Facing::East => ([1.0, 0.0], [0.0, PLANE_LENGTH]),
            Facing::West => ([-1.0, 0.0], [0.0, -PLANE_LENGTH]),
        };
        Self {
            pos: [start.col as f64 + 0.5, start.row as f64 + 0.5],
            dir,
            plane,
        }
    }

    /// Rotates direction and plane together by `angle` radians (positive turns right on screen).
    pub fn rotate(&mut self, angle: f64) {
        let (s, c) = angle.sin_cos();
        self.dir = rotate(self.dir, c, s);
        self.plane = rotate(self.plane, c, s);
    }

    /// Ray direction for a camera-space offset in [-1, 1] (left edge to right edge).
    #[inline]
    pub fn ray_dir(&self, camera_x: f64) -> [f64; 2] {
        [
            self.dir[0] + self.plane[0] * camera_x,
            self.dir[1] + self.plane[1] * camera_x,
        ]
    }
}

#[inline]
fn rotate(v: [f64; 2], c: f64, s: f64) -> [f64; 2] {
    [v[0] * c - v[1] * s, v[0] * s + v[1] * c]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn start(facing: Facing) -> Start {
        Start {
            col: 1,
            row: 1,
            facing,
        }
    }

    #[test]
    fn test_spawn_orientation_table() {
        let cases = [
            (Facing::North, [0.0, -1.0], [0.66, 0.0]),
            (Facing::South, [0.0, 1.0], [-0.66, 0.0]),
            (Facing::East, [1.0, 0.0], [0.0, 0.66]),
            (Facing::West, [-1.0, 0.0], [0.0, -0.66]),
        ];
        for (facing, dir, plane) in cases {
            let obs = Observer::spawn(start(facing));
            assert_eq!(obs.pos, [1.5, 1.5]);
            assert_eq!(obs.dir, dir, "{facing}");
            assert_eq!(obs.plane, plane, "{facing}");
        }
    }

    #[test]
    fn test_rotation_keeps_fov() {
        let mut obs = Observer::spawn(start(Facing::East));
        for _ in 0..37 {
            obs.rotate(0.05);
        }
        let dot = obs.dir[0] * obs.plane[0] + obs.dir[1] * obs.plane[1];
        let plane_len = (obs.plane[0].powi(2) + obs.plane[1].powi(2)).sqrt();
        let dir_len = (obs.dir[0].powi(2) + obs.dir[1].powi(2)).sqrt();
        assert!(dot.abs() < EPS);
        assert!((plane_len - PLANE_LENGTH).abs() < EPS);
        assert!((dir_len - 1.0).abs() < EPS);
    }

    #[test]
    fn test_quarter_turn() {
        let mut obs = Observer::spawn(start(Facing::North));
        obs.rotate(std::f64::consts::FRAC_PI_2);
        // north turned right is east
        assert!((obs.dir[0] - 1.0).abs() < EPS && obs.dir[1].abs() < EPS);
        assert!(obs.plane[0].abs() < EPS && (obs.plane[1] - PLANE_LENGTH).abs() < EPS);
    }

    #[test]
    fn test_ray_dir_edges() {
        let obs = Observer::spawn(start(Facing::North));
        assert_eq!(obs.ray_dir(0.0), [0.0, -1.0]);
        assert_eq!(obs.ray_dir(-1.0), [-0.66, -1.0]);
        assert_eq!(obs.ray_dir(1.0), [0.66, -1.0]);
    }
}

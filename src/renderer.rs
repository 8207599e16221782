use crate::camera::Observer;
use crate::frame::Frame;
use crate::raycast::{RayResult, cast_column};
use crate::scene::Scene;
use crate::texture::{Texture, WallTextures};

/// Draws one complete view into `frame`: ceiling and floor, then one textured
/// wall stripe per column. Presenting the frame is up to the caller.
pub fn render_frame(
    frame: &mut Frame,
    scene: &Scene,
    observer: &Observer,
    textures: &WallTextures,
) {
    fill_background(frame, scene.ceiling.to_pixel(), scene.floor.to_pixel());

    let width = frame.width();
    for x in 0..width {
        let ray = cast_column(&scene.grid, observer, x, width);
        if !ray.hit {
            continue; // left the grid, nothing to draw
        }
        draw_stripe(frame, x, &ray, observer.pos, textures.get(ray.face()));
    }
}

/// Top half ceiling, bottom half floor.
pub fn fill_background(frame: &mut Frame, ceiling: u32, floor: u32) {
    let mid = frame.height() / 2;
    for y in 0..frame.height() {
        let color = if y < mid { ceiling } else { floor };
        frame.row_mut(y).fill(color);
    }
}

fn draw_stripe(frame: &mut Frame, x: usize, ray: &RayResult, pos: [f64; 2], tex: &Texture) {
    let h = frame.height() as i64;
    let line_h = (h as f64 / ray.perp_dist) as i64;
    if line_h <= 0 {
        return;
    }

    // Stripe extent, clipped to the screen
    let draw_start = (-line_h / 2 + h / 2).max(0);
    let draw_end = (line_h / 2 + h / 2).min(h - 1);

    let tex_x = ray.tex_x(pos, tex.width());
    // texture rows per screen row
    let step = tex.height() as f64 / line_h as f64;
    let mut tex_pos = (draw_start - h / 2 + line_h / 2) as f64 * step;

    for y in draw_start..=draw_end {
        let tex_y = tex_pos as i64;
        tex_pos += step;
        frame.put(x, y as usize, tex.sample(tex_x, tex_y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;
    use crate::validate::validate;
    use crate::world::{Cell, Facing, Grid};

    const CEIL: u32 = 0x0011_1111;
    const FLOOR: u32 = 0x0022_2222;

    fn scene(map: &str) -> Scene {
        let text = format!("NO n\nSO s\nWE w\nEA e\nF 34,34,34\nC 17,17,17\n{map}");
        validate(parse_str(&text).unwrap()).unwrap()
    }

    fn solid(color: u32) -> Texture {
        Texture::new(1, 1, vec![color]).unwrap()
    }

    fn textures() -> WallTextures {
        WallTextures {
            north: solid(1),
            south: solid(2),
            east: solid(3),
            west: solid(4),
        }
    }

    #[test]
    fn test_background_split() {
        let mut frame = Frame::new(3, 5);
        fill_background(&mut frame, CEIL, FLOOR);
        assert_eq!(frame.get(0, 0), Some(CEIL));
        assert_eq!(frame.get(2, 1), Some(CEIL));
        assert_eq!(frame.get(0, 2), Some(FLOOR));
        assert_eq!(frame.get(1, 4), Some(FLOOR));
    }

    #[test]
    fn test_stripe_placement() {
        let scene = scene("11111\n10001\n10N01\n10001\n11111\n");
        let obs = Observer::spawn(scene.start);
        let mut frame = Frame::new(64, 90);
        render_frame(&mut frame, &scene, &obs, &textures());

        // wall 1.5 away: 90 / 1.5 = 60 rows tall, rows 15..=75
        assert_eq!(frame.get(32, 14), Some(CEIL));
        assert_eq!(frame.get(32, 15), Some(2));
        assert_eq!(frame.get(32, 45), Some(2));
        assert_eq!(frame.get(32, 75), Some(2));
        assert_eq!(frame.get(32, 76), Some(FLOOR));
    }

    #[test]
    fn test_face_textures_follow_view() {
        let scene = scene("11111\n10001\n10E01\n10001\n11111\n");
        let mut obs = Observer::spawn(scene.start);
        let tex = textures();
        let mut frame = Frame::new(16, 20);

        let expected = [
            (Facing::East, 4),
            (Facing::South, 1),
            (Facing::West, 3),
            (Facing::North, 2),
        ];
        for (looking, color) in expected {
            render_frame(&mut frame, &scene, &obs, &tex);
            assert_eq!(frame.get(8, 10), Some(color), "looking {looking}");
            obs.rotate(std::f64::consts::FRAC_PI_2);
        }
    }

    #[test]
    fn test_vertical_texture_mapping() {
        let scene = scene("11111\n10001\n10N01\n10001\n11111\n");
        let obs = Observer::spawn(scene.start);
        let rows = Texture::from_fn(1, 4, |_, y| 100 + y as u32).unwrap();
        let tex = WallTextures {
            north: rows.clone(),
            south: rows.clone(),
            east: rows.clone(),
            west: rows,
        };
        let mut frame = Frame::new(64, 90);
        render_frame(&mut frame, &scene, &obs, &tex);

        assert_eq!(frame.get(32, 15), Some(100));
        assert_eq!(frame.get(32, 44), Some(101));
        assert_eq!(frame.get(32, 74), Some(103));
    }

    #[test]
    fn test_close_wall_fills_column() {
        let scene = scene("111\n1N1\n111\n");
        let mut obs = Observer::spawn(scene.start);
        obs.pos = [1.5, 1.005];
        let mut frame = Frame::new(8, 40);
        render_frame(&mut frame, &scene, &obs, &textures());
        for y in 0..40 {
            assert_eq!(frame.get(4, y), Some(2));
        }
    }

    #[test]
    fn test_escaping_rays_leave_background() {
        let mut scene = scene("111\n1N1\n111\n");
        scene.grid = Grid::from_rows(vec![vec![Cell::Floor; 3]; 3]);
        let obs = Observer::spawn(scene.start);
        let mut frame = Frame::new(8, 10);
        render_frame(&mut frame, &scene, &obs, &textures());
        assert!(frame.pixels()[..40].iter().all(|&p| p == CEIL));
        assert!(frame.pixels()[40..].iter().all(|&p| p == FLOOR));
    }
}

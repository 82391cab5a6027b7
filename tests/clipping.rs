use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tft_rasterizer::core::frame_buffer::PixelTarget;
use tft_rasterizer::core::rasterizer::{draw_circle, draw_line, draw_rect, fill_triangle};
use tft_rasterizer::material_system::color::Rgb565;

/// 任何越界访问都直接 panic 的像素目标
struct StrictTarget {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
    writes: usize,
}

impl StrictTarget {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; width * height],
            writes: 0,
        }
    }

    fn check(&self, x: i32, y: i32) -> usize {
        assert!(
            x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height,
            "out of bounds access at ({}, {})",
            x,
            y
        );
        x as usize + y as usize * self.width
    }
}

impl PixelTarget for StrictTarget {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        let index = self.check(x, y);
        self.pixels[index] = color;
        self.writes += 1;
    }

    fn get_pixel(&self, x: i32, y: i32) -> Rgb565 {
        self.pixels[self.check(x, y)]
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        if w <= 0 || h <= 0 {
            return;
        }
        let right = x as i64 + w as i64 - 1;
        let bottom = y as i64 + h as i64 - 1;
        assert!(
            x >= 0 && y >= 0 && right < self.width as i64 && bottom < self.height as i64,
            "unclipped rect ({}, {}, {}, {})",
            x,
            y,
            w,
            h
        );
        for py in y..=bottom as i32 {
            for px in x..=right as i32 {
                self.set_pixel(px, py, color);
            }
        }
    }
}

/// 同时覆盖靠近边界和极端大小的坐标
fn coordinate(rng: &mut StdRng) -> i32 {
    match rng.random_range(0..4) {
        0 => rng.random_range(-40..80),
        1 => rng.random_range(-5000..5000),
        2 => rng.random_range(i32::MIN / 2..i32::MAX / 2),
        _ => {
            if rng.random::<bool>() {
                i32::MAX
            } else {
                i32::MIN
            }
        }
    }
}

const RED: Rgb565 = Rgb565(0xf800);

#[test]
fn triangles_never_write_out_of_bounds() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut target = StrictTarget::new(37, 23);
    for _ in 0..2000 {
        let p0 = (coordinate(&mut rng), coordinate(&mut rng));
        let p1 = (coordinate(&mut rng), coordinate(&mut rng));
        let p2 = (coordinate(&mut rng), coordinate(&mut rng));
        fill_triangle(&mut target, p0, p1, p2, RED);
    }
}

#[test]
fn lines_never_write_out_of_bounds() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut target = StrictTarget::new(40, 30);
    for _ in 0..2000 {
        draw_line(
            &mut target,
            coordinate(&mut rng),
            coordinate(&mut rng),
            coordinate(&mut rng),
            coordinate(&mut rng),
            RED,
        );
    }
}

#[test]
fn rects_and_circles_never_write_out_of_bounds() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut target = StrictTarget::new(32, 48);
    for _ in 0..500 {
        let (x, y) = (rng.random_range(-100..100), rng.random_range(-100..100));
        let (w, h) = (rng.random_range(-10..200), rng.random_range(-10..200));
        draw_rect(&mut target, x, y, w, h, RED);

        let radius = rng.random_range(0..120);
        let outline = rng.random::<bool>().then_some(RED);
        let fill = rng.random::<bool>().then_some(Rgb565::WHITE);
        draw_circle(&mut target, x, y, radius, outline, fill);
    }
}

#[test]
fn triangle_covering_the_screen_fills_every_pixel() {
    let mut target = StrictTarget::new(20, 10);
    fill_triangle(&mut target, (-1000, -1000), (3000, -1000), (-1000, 3000), RED);
    assert!(target.pixels.iter().all(|&p| p == RED));
    assert!(target.writes >= 200);
}

/// 叉积 (b - a) × (p - a)，整数精确计算
fn cross(a: (i32, i32), b: (i32, i32), p: (i32, i32)) -> i64 {
    let (ax, ay) = (a.0 as i64, a.1 as i64);
    (b.0 as i64 - ax) * (p.1 as i64 - ay) - (b.1 as i64 - ay) * (p.0 as i64 - ax)
}

#[test]
fn interior_pixels_are_always_filled() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..500 {
        let mut point = || (rng.random_range(-5..45), rng.random_range(-5..45));
        let (a, b, c) = (point(), point(), point());
        let mut target = StrictTarget::new(40, 30);
        fill_triangle(&mut target, a, b, c, RED);

        for y in 0..30 {
            for x in 0..40 {
                let p = (x, y);
                let signs = [cross(a, b, p), cross(b, c, p), cross(c, a, p)];
                let inside = signs.iter().all(|&s| s > 0) || signs.iter().all(|&s| s < 0);
                if inside {
                    assert_eq!(
                        target.get_pixel(x, y),
                        RED,
                        "({}, {}) inside {:?}",
                        x,
                        y,
                        [a, b, c]
                    );
                }
            }
        }
    }
}

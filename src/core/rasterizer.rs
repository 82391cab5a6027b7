//! 裁剪安全的图元光栅化
//!
//! 所有图元在写入前把坐标裁剪到目标矩形内，任何情况下都不会请求缓冲区外的像素。

use crate::core::frame_buffer::{PixelTarget, clip_rect};
use crate::material_system::color::Rgb565;

/// 从 `(x, y)` 向右绘制长度为 `w` 的水平线
pub fn draw_fast_hline<T: PixelTarget + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    w: i32,
    color: Rgb565,
) {
    fill_clipped(target, x, y, w, 1, color);
}

/// 从 `(x, y)` 向下绘制长度为 `h` 的竖直线
pub fn draw_fast_vline<T: PixelTarget + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    h: i32,
    color: Rgb565,
) {
    fill_clipped(target, x, y, 1, h, color);
}

/// 先裁剪再交给目标填充，目标只会收到完全位于缓冲区内的矩形
fn fill_clipped<T: PixelTarget + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    color: Rgb565,
) {
    if let Some((x0, y0, x1, y1)) = clip_rect(x, y, w, h, target.width(), target.height()) {
        target.fill_rect(x0, y0, x1 - x0, y1 - y0, color);
    }
}

/// 绘制第 `y` 行上 `[min(a, b), max(a, b)]` 的闭区间
pub fn draw_hline<T: PixelTarget + ?Sized>(
    target: &mut T,
    a: i32,
    b: i32,
    y: i32,
    color: Rgb565,
) {
    let (left, right) = if a <= b { (a, b) } else { (b, a) };
    let w = (right as i64 - left as i64 + 1).min(i32::MAX as i64) as i32;
    draw_fast_hline(target, left, y, w, color);
}

/// 绘制第 `x` 列上 `[min(a, b), max(a, b)]` 的闭区间
pub fn draw_vline<T: PixelTarget + ?Sized>(
    target: &mut T,
    a: i32,
    b: i32,
    x: i32,
    color: Rgb565,
) {
    let (top, bottom) = if a <= b { (a, b) } else { (b, a) };
    let h = (bottom as i64 - top as i64 + 1).min(i32::MAX as i64) as i32;
    draw_fast_vline(target, x, top, h, color);
}

/// 矩形边框
pub fn draw_rect<T: PixelTarget + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    color: Rgb565,
) {
    if w <= 0 || h <= 0 {
        return;
    }
    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);
    draw_fast_hline(target, x, y, w, color);
    draw_fast_hline(target, x, bottom, w, color);
    draw_fast_vline(target, x, y, h, color);
    draw_fast_vline(target, right, y, h, color);
}

/// Bresenham 直线，连续的水平/竖直段合并为一次跨度填充
pub fn draw_line<T: PixelTarget + ?Sized>(
    target: &mut T,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgb565,
) {
    if y0 == y1 {
        draw_hline(target, x0, x1, y0, color);
        return;
    }
    if x0 == x1 {
        draw_vline(target, y0, y1, x0, color);
        return;
    }

    // i64 防止极端端点相减溢出
    let (mut x0, mut y0, mut x1, mut y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let (width, height) = (target.width() as i64, target.height() as i64);
    let (major_limit, minor_limit) = if steep { (height, width) } else { (width, height) };
    if x1 < 0 || x0 >= major_limit {
        return;
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let y_step = if y0 < y1 { 1 } else { -1 };

    // 直接跳过主轴上位于 -1 列之前的部分：处理 k 列后误差项为 dx/2 - k·dy + m·dx ∈ [0, dx)
    let skipped = (-1 - x0).max(0);
    let steps = {
        let owed = skipped as i128 * dy as i128 - (dx / 2) as i128;
        if owed > 0 {
            (owed + dx as i128 - 1) / dx as i128
        } else {
            0
        }
    };
    let mut err =
        ((dx / 2) as i128 - skipped as i128 * dy as i128 + steps * dx as i128) as i64;
    let mut y = (y0 as i128 + y_step as i128 * steps) as i64;
    let start = x0 + skipped;
    let mut run_start = start;

    let emit_run = |target: &mut T, from: i64, to: i64, minor: i64| {
        let from = from.clamp(-1, major_limit) as i32;
        let to = to.clamp(-1, major_limit) as i32;
        let minor = minor.clamp(-1, minor_limit) as i32;
        if steep {
            draw_vline(target, from, to, minor, color);
        } else {
            draw_hline(target, from, to, minor, color);
        }
    };

    for x in start..=x1 {
        err -= dy;
        if err < 0 {
            emit_run(target, run_start, x, y);
            run_start = x + 1;
            y += y_step;
            err += dx;
        }
        if x >= major_limit {
            break;
        }
    }
    if run_start <= x1 && run_start <= major_limit {
        emit_run(target, run_start, x1, y);
    }
}

/// 中点圆算法，`outline` 与 `fill` 分别控制描边与填充颜色
pub fn draw_circle<T: PixelTarget + ?Sized>(
    target: &mut T,
    xm: i32,
    ym: i32,
    r: i32,
    outline: Option<Rgb565>,
    fill: Option<Rgb565>,
) {
    if r < 0 {
        return;
    }
    let (xm, ym, radius) = (xm as i64, ym as i64, r as i64);
    let (width, height) = (target.width() as i64, target.height() as i64);
    if xm + radius < 0 || xm - radius >= width || ym + radius < 0 || ym - radius >= height {
        return;
    }

    let clamp = |v: i64| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    let plot = |target: &mut T, x: i64, y: i64, color: Rgb565| {
        if (0..width).contains(&x) && (0..height).contains(&y) {
            target.set_pixel(x as i32, y as i32, color);
        }
    };
    let span = |target: &mut T, x: i64, y: i64, w: i64, color: Rgb565| {
        if w > 0 {
            let x_start = x.max(-1);
            let w = (x + w - x_start).min(width + 1);
            draw_fast_hline(target, clamp(x_start), clamp(y), clamp(w), color);
        }
    };

    match radius {
        0 => {
            if let Some(color) = outline.or(fill) {
                plot(target, xm, ym, color);
            }
            return;
        }
        1 => {
            if let Some(color) = fill {
                plot(target, xm, ym, color);
            }
            if let Some(color) = outline {
                plot(target, xm + 1, ym, color);
                plot(target, xm - 1, ym, color);
                plot(target, xm, ym - 1, color);
                plot(target, xm, ym + 1, color);
            }
            return;
        }
        _ => {}
    }

    let (mut x, mut y, mut err) = (-radius, 0i64, 2 - 2 * radius);
    loop {
        if let Some(color) = outline {
            plot(target, xm - x, ym + y, color);
            plot(target, xm - y, ym - x, color);
            plot(target, xm + x, ym - y, color);
            plot(target, xm + y, ym + x, color);
        }
        let step = err;
        if step <= y {
            if let Some(color) = fill {
                span(target, xm, ym + y, -x, color);
                span(target, xm + x + 1, ym - y, -x - 1, color);
            }
            y += 1;
            err += y * 2 + 1;
        }
        if step > x || err > y {
            x += 1;
            err += x * 2 + 1;
            if let Some(color) = fill {
                if x != 0 {
                    span(target, xm - y + 1, ym - x, y - 1, color);
                    span(target, xm, ym + x, y, color);
                }
            }
        }
        if x >= 0 {
            break;
        }
    }
}

/// 沿边 `(xa, ya) -> (xb, yb)` 求第 `y` 行的x坐标，水平边取终点x（调用方不会传入水平边）
fn edge_x(xa: i64, ya: i64, xb: i64, yb: i64, y: i64) -> i64 {
    if ya == yb {
        return xb;
    }
    let t = (y - ya) as f64 / (yb - ya) as f64;
    (xa as f64 + (xb - xa) as f64 * t).round() as i64
}

/// 扫描线填充纯色三角形
///
/// 顶点按y升序排列后，长边 p0→p2 与短边 p0→p1、p1→p2 逐行求交，填充两者之间的闭区间。
/// 行范围先裁剪到缓冲区高度，跨度再由水平线裁剪，因此任意坐标都不会越界写入。
pub fn fill_triangle<T: PixelTarget + ?Sized>(
    target: &mut T,
    p0: (i32, i32),
    p1: (i32, i32),
    p2: (i32, i32),
    color: Rgb565,
) {
    let mut vertices = [p0, p1, p2].map(|(x, y)| (x as i64, y as i64));
    vertices.sort_by_key(|&(x, y)| (y, x));
    let [(x0, y0), (x1, y1), (x2, y2)] = vertices;

    let height = target.height() as i64;
    let row_start = y0.max(0);
    let row_end = y2.min(height - 1);
    if row_start > row_end {
        return;
    }

    let width = target.width() as i64;
    let clamp_x = |x: i64| x.clamp(-1, width) as i32;

    if y0 == y2 {
        // 退化为一条水平线
        let left = x0.min(x1).min(x2);
        let right = x0.max(x1).max(x2);
        draw_hline(target, clamp_x(left), clamp_x(right), y0 as i32, color);
        return;
    }

    for y in row_start..=row_end {
        let long_x = edge_x(x0, y0, x2, y2, y);
        // 第 y1 行属于上半段（取到 x1）；平顶或平底时只剩一条非水平的短边
        let upper_half = y1 != y0 && (y <= y1 || y1 == y2);
        let short_x = if upper_half {
            edge_x(x0, y0, x1, y1, y)
        } else {
            edge_x(x1, y1, x2, y2, y)
        };
        draw_hline(target, clamp_x(long_x), clamp_x(short_x), y as i32, color);
    }
}

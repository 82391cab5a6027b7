use crate::material_system::color::{Rgb565, rgb565_to_rgb8_bytes};

/// 像素目标：显示驱动一侧提供的可写帧缓冲区接口
///
/// 所有坐标以 i32 表示，越界写入被静默忽略，越界读取返回黑色。
pub trait PixelTarget {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565);
    fn get_pixel(&self, x: i32, y: i32) -> Rgb565;

    /// 填充矩形，超出缓冲区的部分被裁剪
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        if let Some((x0, y0, x1, y1)) = clip_rect(x, y, w, h, self.width(), self.height()) {
            for py in y0..y1 {
                for px in x0..x1 {
                    self.set_pixel(px, py, color);
                }
            }
        }
    }

    fn fill_screen(&mut self, color: Rgb565) {
        let (w, h) = (self.width() as i32, self.height() as i32);
        self.fill_rect(0, 0, w, h, color);
    }
}

/// 将矩形裁剪到 `width` × `height`，返回半开区间 `(x0, y0, x1, y1)`
///
/// 使用 i64 计算端点，避免大坐标溢出；完全在外时返回 `None`。
pub fn clip_rect(
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    width: usize,
    height: usize,
) -> Option<(i32, i32, i32, i32)> {
    if w <= 0 || h <= 0 {
        return None;
    }
    let x0 = (x as i64).max(0);
    let y0 = (y as i64).max(0);
    let x1 = (x as i64 + w as i64).min(width as i64);
    let y1 = (y as i64 + h as i64).min(height as i64);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0 as i32, y0 as i32, x1 as i32, y1 as i32))
}

/// RGB565帧缓冲区，按行存储，行跨度可大于宽度
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    stride: usize,
    pixels: Vec<Rgb565>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_stride(width, height, width)
    }

    /// 创建行跨度为 `stride` 的帧缓冲区，`stride` 小于宽度时按宽度处理
    pub fn with_stride(width: usize, height: usize, stride: usize) -> Self {
        let stride = stride.max(width);
        FrameBuffer {
            width,
            height,
            stride,
            pixels: vec![Rgb565::BLACK; stride * height],
        }
    }

    /// 原始存储（包含行跨度的填充部分）
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// 第 `y` 行的可见像素
    pub fn row(&self, y: usize) -> &[Rgb565] {
        let start = y * self.stride;
        &self.pixels[start..start + self.width]
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(x as usize + y as usize * self.stride)
    }

    /// 导出可见区域为紧凑的RGB8字节（宽×高×3）
    pub fn to_rgb8_bytes(&self) -> Vec<u8> {
        (0..self.height)
            .flat_map(|y| rgb565_to_rgb8_bytes(self.row(y)))
            .collect()
    }
}

impl PixelTarget for FrameBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color;
        }
    }

    fn get_pixel(&self, x: i32, y: i32) -> Rgb565 {
        self.index(x, y)
            .map_or(Rgb565::BLACK, |index| self.pixels[index])
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        if let Some((x0, y0, x1, y1)) = clip_rect(x, y, w, h, self.width, self.height) {
            for py in y0 as usize..y1 as usize {
                let start = py * self.stride;
                self.pixels[start + x0 as usize..start + x1 as usize].fill(color);
            }
        }
    }
}

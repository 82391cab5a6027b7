use crate::core::frame_buffer::PixelTarget;
use crate::core::rasterizer::{draw_hline, fill_triangle};
use crate::core::scene_object::{SceneObject, Shape};
use crate::core::triangle_processor::{Triangle, TriangleProcessor};
use crate::geometry::camera::camera_position;
use crate::geometry::math::Vec2;
use crate::io::render_settings::{AnimationType, RenderSettings};
use crate::material_system::color::{Rgb565, map_color};
use crate::material_system::light::PointLight;
use crate::material_system::noise::{Fade, noise2d_with};
use log::debug;

/// 帧循环驱动方看到的动画接口
///
/// 驱动方负责调用节奏以及把填好的缓冲区送往显示硬件；`render_frame` 每次都完整绘制一帧。
pub trait Animation {
    fn init(&mut self, target: &mut dyn PixelTarget);
    fn background_color(&self) -> Rgb565;
    fn title(&self) -> &str;
    fn render_frame(&mut self, target: &mut dyn PixelTarget);
}

/// 根据配置构建动画
pub fn build_animation(settings: &RenderSettings) -> Result<Box<dyn Animation>, String> {
    let background = settings.background_color()?;
    Ok(match settings.animation {
        AnimationType::Cubes => Box::new(
            CubeScene::new(settings.build_objects()?, settings.light()?)
                .with_background(background),
        ),
        AnimationType::Noise => Box::new(
            NoiseField::new(
                settings.noise_origin_vec()?,
                settings.noise_scale,
                settings.noise_drift_vec()?,
                settings.fade()?,
            )
            .with_background(background),
        ),
        AnimationType::Fractal => Box::new(
            FractalField::new(settings.fractal_window()?, settings.fractal_iterations)
                .with_background(background),
        ),
        AnimationType::Gradient => Box::new(GradientPattern::new().with_background(background)),
    })
}

/// 帧组装器：推进物体姿态、收集三角形、按深度排序并光栅化
pub struct CubeScene {
    objects: Vec<SceneObject>,
    light: PointLight,
    background: Rgb565,
    frame: u64,
    last_triangle_count: usize,
}

impl CubeScene {
    pub fn new(objects: Vec<SceneObject>, light: PointLight) -> Self {
        Self {
            objects,
            light,
            background: Rgb565::BLACK,
            frame: 0,
            last_triangle_count: 0,
        }
    }

    pub fn with_background(mut self, background: Rgb565) -> Self {
        self.background = background;
        self
    }

    /// 最近一次渲染的帧序号
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_triangle_count(&self) -> usize {
        self.last_triangle_count
    }

    /// 组装第 `frame` 帧的三角形：按场景顺序更新并发射，然后稳定地按深度降序排列
    pub fn assemble(&mut self, frame: u64) -> Vec<Triangle> {
        let camera = camera_position(frame);
        let mut triangles = Vec::new();
        for object in &mut self.objects {
            object.update(frame);
            triangles.extend(object.emit_triangles(&camera, &self.light));
        }
        TriangleProcessor::sort_by_depth(&mut triangles);
        triangles
    }

    /// 按顺序填充三角形；坐标非有限的三角形被跳过
    pub fn rasterize(triangles: &[Triangle], target: &mut dyn PixelTarget) -> usize {
        let (width, height) = (target.width(), target.height());
        let mut drawn = 0;
        for triangle in triangles {
            if let Some([p1, p2, p3]) = triangle.to_pixels(width, height) {
                fill_triangle(target, p1, p2, p3, triangle.color);
                drawn += 1;
            }
        }
        drawn
    }
}

impl Animation for CubeScene {
    fn init(&mut self, target: &mut dyn PixelTarget) {
        self.frame = 0;
        target.fill_screen(self.background);
    }

    fn background_color(&self) -> Rgb565 {
        self.background
    }

    fn title(&self) -> &str {
        "Render"
    }

    fn render_frame(&mut self, target: &mut dyn PixelTarget) {
        target.fill_screen(self.background);
        self.frame = self.frame.wrapping_add(1);

        let triangles = self.assemble(self.frame);
        let drawn = Self::rasterize(&triangles, target);
        self.last_triangle_count = drawn;
        debug!(
            "第{}帧: {}个物体, {}个可见三角形, 绘制{}个",
            self.frame,
            self.objects.len(),
            triangles.len(),
            drawn
        );
    }
}

/// 逐像素噪声着色：把噪声值映射到色相渐变
pub struct NoiseField {
    origin: Vec2,
    scale: f64,
    drift: Vec2,
    fade: Fade,
    background: Rgb565,
    frame: u64,
}

/// 噪声格点的周期；平移相位对其取模后画面不变
const NOISE_PERIOD: f64 = 289.0;

impl NoiseField {
    pub fn new(origin: Vec2, scale: f64, drift: Vec2, fade: Fade) -> Self {
        Self {
            origin,
            scale,
            drift,
            fade,
            background: Rgb565::BLACK,
            frame: 0,
        }
    }

    pub fn with_background(mut self, background: Rgb565) -> Self {
        self.background = background;
        self
    }

    /// 第 `frame` 帧时像素 `(x, y)` 的颜色
    pub fn shade(&self, x: usize, y: usize, frame: u64) -> Rgb565 {
        let shift = (self.drift * frame as f64).map(|v| v.rem_euclid(NOISE_PERIOD));
        let p = self.origin + Vec2::new(x as f64, y as f64) * self.scale + shift;
        let n = noise2d_with(&p, self.fade);
        map_color(((n + 1.0) / 2.0) as f32)
    }
}

impl Animation for NoiseField {
    fn init(&mut self, target: &mut dyn PixelTarget) {
        self.frame = 0;
        target.fill_screen(self.background);
    }

    fn background_color(&self) -> Rgb565 {
        self.background
    }

    fn title(&self) -> &str {
        "Perlin"
    }

    fn render_frame(&mut self, target: &mut dyn PixelTarget) {
        self.frame = self.frame.wrapping_add(1);
        for y in 0..target.height() {
            for x in 0..target.width() {
                let color = self.shade(x, y, self.frame);
                target.set_pixel(x as i32, y as i32, color);
            }
        }
    }
}

/// Mandelbrot 分形：按逃逸所需的迭代次数着色
///
/// 画面与帧序号无关，每帧都完整重绘。
pub struct FractalField {
    bounds: [f64; 4],
    max_iterations: u32,
    background: Rgb565,
}

impl FractalField {
    /// `bounds` 为复平面窗口 `[x1, x2, y1, y2]`
    pub fn new(bounds: [f64; 4], max_iterations: u32) -> Self {
        Self {
            bounds,
            max_iterations: max_iterations.max(1),
            background: Rgb565::BLACK,
        }
    }

    pub fn with_background(mut self, background: Rgb565) -> Self {
        self.background = background;
        self
    }

    /// `z ← z² + c` 从零开始迭代，直到 |z| ≥ 2 或达到上限
    pub fn escape_iterations(&self, c_re: f64, c_im: f64) -> u32 {
        let (mut re, mut im) = (0.0_f64, 0.0_f64);
        let mut iterations = 0;
        while re * re + im * im < 4.0 && iterations < self.max_iterations {
            (re, im) = (re * re - im * im + c_re, 2.0 * re * im + c_im);
            iterations += 1;
        }
        iterations
    }

    /// `width`×`height` 画面中像素 `(x, y)` 的颜色
    pub fn shade(&self, x: usize, y: usize, width: usize, height: usize) -> Rgb565 {
        let [x1, x2, y1, y2] = self.bounds;
        let c_re = x1 + x as f64 * (x2 - x1) / width as f64;
        let c_im = y1 + y as f64 * (y2 - y1) / height as f64;
        let iterations = self.escape_iterations(c_re, c_im);
        map_color(iterations as f32 / self.max_iterations as f32)
    }
}

impl Animation for FractalField {
    fn init(&mut self, target: &mut dyn PixelTarget) {
        target.fill_screen(self.background);
    }

    fn background_color(&self) -> Rgb565 {
        self.background
    }

    fn title(&self) -> &str {
        "Fractal"
    }

    fn render_frame(&mut self, target: &mut dyn PixelTarget) {
        let (width, height) = (target.width(), target.height());
        for y in 0..height {
            for x in 0..width {
                target.set_pixel(x as i32, y as i32, self.shade(x, y, width, height));
            }
        }
    }
}

/// 色相渐变测试图：同一行颜色相同，自上而下走完整个色相环
pub struct GradientPattern {
    background: Rgb565,
}

impl GradientPattern {
    pub fn new() -> Self {
        Self {
            background: Rgb565::BLACK,
        }
    }

    pub fn with_background(mut self, background: Rgb565) -> Self {
        self.background = background;
        self
    }
}

impl Default for GradientPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for GradientPattern {
    fn init(&mut self, target: &mut dyn PixelTarget) {
        target.fill_screen(self.background);
    }

    fn background_color(&self) -> Rgb565 {
        self.background
    }

    fn title(&self) -> &str {
        "Gradient"
    }

    fn render_frame(&mut self, target: &mut dyn PixelTarget) {
        let (width, height) = (target.width(), target.height());
        for y in 0..height {
            let color = map_color(y as f32 / height as f32);
            draw_hline(target, 0, width as i32 - 1, y as i32, color);
        }
    }
}

use crate::geometry::culling::light_facing;
use crate::geometry::math::Vec3;
use crate::material_system::color::{Rgb565, lerp_color};

/// 深度衰减的距离尺度：相机空间 z = 20 时衰减达到上限的一半
const FADE_DISTANCE: f64 = 20.0;

/// 相机空间中的单个点光源
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(2.0, 2.0, 0.0),
        }
    }
}

impl PointLight {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// 面朝光源的亮度项，截断为非负
    pub fn intensity(&self, t1: &Vec3, t2: &Vec3, t3: &Vec3) -> f64 {
        light_facing(t1, t2, t3, &self.position).max(0.0)
    }

    /// 光照只提亮：按亮度的一半向白色混合
    pub fn illuminate(&self, base: Rgb565, t1: &Vec3, t2: &Vec3, t3: &Vec3) -> Rgb565 {
        let intensity = self.intensity(t1, t2, t3);
        lerp_color(base, Rgb565::WHITE, (intensity / 2.0) as f32)
    }
}

/// 深度衰减系数：`clamp(sqrt(depth / 20), 0, 2) / 2`
///
/// 负深度或非有限值返回0（不衰减），正常渲染路径上这类面已被近平面剔除。
pub fn depth_fade(depth: f64) -> f64 {
    if !depth.is_finite() || depth <= 0.0 {
        return 0.0;
    }
    (depth / FADE_DISTANCE).sqrt().clamp(0.0, 2.0) / 2.0
}

/// 越远越暗：按深度衰减系数向黑色混合
pub fn apply_depth_fade(color: Rgb565, depth: f64) -> Rgb565 {
    lerp_color(color, Rgb565::BLACK, depth_fade(depth) as f32)
}

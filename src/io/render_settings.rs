use crate::core::scene_object::SceneObject;
use crate::geometry::math::{Vec2, Vec3};
use crate::material_system::color::{Rgb565, parse_rgb888};
use crate::material_system::light::PointLight;
use crate::material_system::noise::Fade;

/// 动画类型枚举
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimationType {
    /// 立方体阵列的3D渲染管线
    #[default]
    Cubes,
    /// 逐像素噪声着色
    Noise,
    /// Mandelbrot 分形
    Fractal,
    /// 按行的色相渐变测试图
    Gradient,
}

impl AnimationType {
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name.to_lowercase().as_str() {
            "cubes" | "render" => Ok(AnimationType::Cubes),
            "noise" | "perlin" => Ok(AnimationType::Noise),
            "fractal" | "mandelbrot" => Ok(AnimationType::Fractal),
            "gradient" | "test" => Ok(AnimationType::Gradient),
            other => Err(format!("未知的动画类型: '{}'", other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnimationType::Cubes => "cubes",
            AnimationType::Noise => "noise",
            AnimationType::Fractal => "fractal",
            AnimationType::Gradient => "gradient",
        }
    }
}

/// 场景中一个物体的配置（字符串格式，用于TOML序列化）
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSpec {
    /// 形状名称："cube" 或 "pyramid"
    pub shape: String,
    /// 世界坐标位置，格式为"x,y,z"
    pub position: String,
}

impl ObjectSpec {
    pub fn new(shape: &str, position: &str) -> Self {
        Self {
            shape: shape.to_string(),
            position: position.to_string(),
        }
    }

    pub fn build(&self) -> Result<SceneObject, String> {
        let position = parse_vec3(&self.position)
            .map_err(|e| format!("物体位置 '{}' 无效: {}", self.position, e))?;
        SceneObject::from_shape_name(&self.shape, position)
    }
}

/// 所有可通过TOML配置的渲染参数
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    // ===== 显示设置 =====
    /// 帧缓冲区宽度（像素）
    pub width: usize,
    /// 帧缓冲区高度（像素）
    pub height: usize,

    // ===== 渲染与输出 =====
    /// 要运行的动画
    pub animation: AnimationType,
    /// 渲染的总帧数
    pub frames: u64,
    /// 每隔多少帧导出一张PNG，0表示不导出
    pub save_every: u64,
    /// 输出目录
    pub output_dir: String,
    /// 输出文件名前缀
    pub output: String,
    /// 背景色，格式为"r,g,b"（0-255）
    pub background: String,

    // ===== 光照 =====
    /// 相机空间中点光源的位置，格式为"x,y,z"
    pub light_position: String,

    // ===== 噪声着色 =====
    /// 像素到噪声空间的缩放
    pub noise_scale: f64,
    /// 噪声空间原点，格式为"x,y"
    pub noise_origin: String,
    /// 每帧的噪声空间平移，格式为"x,y"
    pub noise_drift: String,
    /// 插值曲线："legacy" 或 "quintic"
    pub noise_fade: String,

    // ===== 分形 =====
    /// 复平面窗口，格式为"x1,x2,y1,y2"
    pub fractal_bounds: String,
    /// 逃逸判定的最大迭代次数
    pub fractal_iterations: u32,

    // ===== 场景 =====
    pub objects: Vec<ObjectSpec>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 160,
            height: 240,
            animation: AnimationType::Cubes,
            frames: 360,
            save_every: 30,
            output_dir: "output".to_string(),
            output: "frame".to_string(),
            background: "0,0,0".to_string(),
            light_position: "2,2,0".to_string(),
            noise_scale: 1.0,
            noise_origin: "50,50".to_string(),
            noise_drift: "0.05,0".to_string(),
            noise_fade: Fade::Legacy.name().to_string(),
            fractal_bounds: "-2,1,-1.5,1.5".to_string(),
            fractal_iterations: 50,
            objects: default_grid(),
        }
    }
}

/// 3×3立方体阵列：x、y ∈ {-3, 0, 3}，z = 6
pub fn default_grid() -> Vec<ObjectSpec> {
    let mut objects = Vec::with_capacity(9);
    for y in [-3, 0, 3] {
        for x in [-3, 0, 3] {
            objects.push(ObjectSpec::new("cube", &format!("{},{},6", x, y)));
        }
    }
    objects
}

impl RenderSettings {
    /// 检查所有字符串字段都能被解析，并且尺寸有效
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("无效的缓冲区尺寸 {}x{}", self.width, self.height));
        }
        if self.width > i32::MAX as usize || self.height > i32::MAX as usize {
            return Err(format!("缓冲区尺寸过大 {}x{}", self.width, self.height));
        }
        if !self.noise_scale.is_finite() {
            return Err(format!("无效的噪声缩放: {}", self.noise_scale));
        }
        if self.fractal_iterations == 0 {
            return Err("分形迭代次数必须大于0".to_string());
        }
        self.background_color()?;
        self.light()?;
        self.noise_origin_vec()?;
        self.noise_drift_vec()?;
        self.fade()?;
        self.fractal_window()?;
        self.build_objects()?;
        Ok(())
    }

    pub fn background_color(&self) -> Result<Rgb565, String> {
        parse_rgb888(&self.background).map_err(|e| format!("背景色无效: {}", e))
    }

    pub fn light(&self) -> Result<PointLight, String> {
        parse_vec3(&self.light_position)
            .map(PointLight::new)
            .map_err(|e| format!("光源位置 '{}' 无效: {}", self.light_position, e))
    }

    pub fn noise_origin_vec(&self) -> Result<Vec2, String> {
        parse_vec2(&self.noise_origin)
            .map_err(|e| format!("噪声原点 '{}' 无效: {}", self.noise_origin, e))
    }

    pub fn noise_drift_vec(&self) -> Result<Vec2, String> {
        parse_vec2(&self.noise_drift)
            .map_err(|e| format!("噪声平移 '{}' 无效: {}", self.noise_drift, e))
    }

    pub fn fade(&self) -> Result<Fade, String> {
        Fade::from_name(&self.noise_fade)
    }

    /// 分形窗口 `[x1, x2, y1, y2]`，要求 x1 < x2 且 y1 < y2
    pub fn fractal_window(&self) -> Result<[f64; 4], String> {
        let c = parse_components(&self.fractal_bounds, 4)
            .map_err(|e| format!("分形窗口 '{}' 无效: {}", self.fractal_bounds, e))?;
        if c[0] >= c[1] || c[2] >= c[3] {
            return Err(format!(
                "分形窗口 '{}' 无效: 需要 x1 < x2 且 y1 < y2",
                self.fractal_bounds
            ));
        }
        Ok([c[0], c[1], c[2], c[3]])
    }

    pub fn build_objects(&self) -> Result<Vec<SceneObject>, String> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, spec)| spec.build().map_err(|e| format!("第{}个物体: {}", i + 1, e)))
            .collect()
    }
}

fn parse_components(s: &str, expected: usize) -> Result<Vec<f64>, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != expected {
        return Err(format!("需要{}个逗号分隔的值", expected));
    }
    parts
        .iter()
        .map(|part| {
            let value = part
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("无效数字 '{}': {}", part, e))?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(format!("数值必须是有限的: '{}'", part))
            }
        })
        .collect()
}

pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let c = parse_components(s, 3)?;
    Ok(Vec3::new(c[0], c[1], c[2]))
}

pub fn parse_vec2(s: &str) -> Result<Vec2, String> {
    let c = parse_components(s, 2)?;
    Ok(Vec2::new(c[0], c[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = RenderSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.build_objects().unwrap().len(), 9);
        assert_eq!(settings.background_color().unwrap(), Rgb565::BLACK);
    }

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3(" 1, -2.5 ,3"), Ok(Vec3::new(1.0, -2.5, 3.0)));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,3").is_err());
        assert!(parse_vec3("1,inf,3").is_err());
    }

    #[test]
    fn test_invalid_object_is_reported() {
        let settings = RenderSettings {
            objects: vec![
                ObjectSpec::new("cube", "0,0,6"),
                ObjectSpec::new("cone", "0,0,6"),
            ],
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.contains("第2个物体"), "{}", err);
    }

    #[test]
    fn test_zero_size_rejected() {
        let settings = RenderSettings {
            width: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_fractal_window() {
        let settings = RenderSettings::default();
        assert_eq!(settings.fractal_window(), Ok([-2.0, 1.0, -1.5, 1.5]));

        for bounds in ["1,-2,-1.5,1.5", "-2,1,0,0", "-2,1,-1.5"] {
            let settings = RenderSettings {
                fractal_bounds: bounds.to_string(),
                ..Default::default()
            };
            assert!(settings.validate().is_err(), "{}", bounds);
        }

        let settings = RenderSettings {
            fractal_iterations: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_animation_names() {
        for animation in [
            AnimationType::Cubes,
            AnimationType::Noise,
            AnimationType::Fractal,
            AnimationType::Gradient,
        ] {
            assert_eq!(AnimationType::from_name(animation.name()), Ok(animation));
        }
        assert_eq!(AnimationType::from_name("Mandelbrot"), Ok(AnimationType::Fractal));
    }
}

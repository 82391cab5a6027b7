use crate::io::render_settings::{AnimationType, ObjectSpec, RenderSettings};
use log::warn;
use std::path::Path;
use toml::Value;

/// TOML配置管理器 - 统一处理所有配置的读写
pub struct TomlConfigLoader;

impl TomlConfigLoader {
    /// 从TOML文件加载完整配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RenderSettings, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("读取配置文件失败: {}", e))?;

        Self::load_from_content(&content)
    }

    /// 从TOML内容字符串加载配置，并校验所有字段
    pub fn load_from_content(content: &str) -> Result<RenderSettings, String> {
        let toml_value: Value =
            toml::from_str(content).map_err(|e| format!("解析TOML失败: {}", e))?;

        let settings = Self::parse_toml_to_settings(toml_value)?;
        settings.validate()?;
        Ok(settings)
    }

    /// 保存配置到TOML文件
    pub fn save_to_file<P: AsRef<Path>>(settings: &RenderSettings, path: P) -> Result<(), String> {
        let toml_content = Self::settings_to_toml(settings);
        std::fs::write(path, toml_content).map_err(|e| format!("写入配置文件失败: {}", e))
    }

    /// 以默认设置生成示例配置文件
    pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<(), String> {
        let settings = RenderSettings::default();
        Self::save_to_file(&settings, path).map_err(|e| format!("创建示例配置失败: {}", e))
    }

    // ===== TOML -> RenderSettings 转换 =====

    fn parse_toml_to_settings(toml: Value) -> Result<RenderSettings, String> {
        let mut settings = RenderSettings::default();

        // [display] 部分
        if let Some(display) = toml.get("display").and_then(|v| v.as_table()) {
            Self::parse_display_section(&mut settings, display)?;
        }

        // [render] 部分
        if let Some(render) = toml.get("render").and_then(|v| v.as_table()) {
            Self::parse_render_section(&mut settings, render)?;
        }

        // [lighting] 部分
        if let Some(lighting) = toml.get("lighting").and_then(|v| v.as_table()) {
            Self::parse_lighting_section(&mut settings, lighting)?;
        }

        // [noise] 部分
        if let Some(noise) = toml.get("noise").and_then(|v| v.as_table()) {
            Self::parse_noise_section(&mut settings, noise)?;
        }

        // [fractal] 部分
        if let Some(fractal) = toml.get("fractal").and_then(|v| v.as_table()) {
            Self::parse_fractal_section(&mut settings, fractal)?;
        }

        // [[object]] 数组：出现时完整替换默认的立方体阵列
        if let Some(objects) = Self::parse_objects_array(&toml)? {
            settings.objects = objects;
        }

        Ok(settings)
    }

    // ===== 各个section的解析方法 =====

    fn parse_display_section(
        settings: &mut RenderSettings,
        display: &toml::Table,
    ) -> Result<(), String> {
        if let Some(width) = display.get("width").and_then(|v| v.as_integer()) {
            settings.width = Self::positive_size("width", width)?;
        }
        if let Some(height) = display.get("height").and_then(|v| v.as_integer()) {
            settings.height = Self::positive_size("height", height)?;
        }
        Ok(())
    }

    fn parse_render_section(
        settings: &mut RenderSettings,
        render: &toml::Table,
    ) -> Result<(), String> {
        if let Some(animation) = render.get("animation").and_then(|v| v.as_str()) {
            settings.animation = AnimationType::from_name(animation)?;
        }
        if let Some(frames) = render.get("frames").and_then(|v| v.as_integer()) {
            settings.frames =
                u64::try_from(frames).map_err(|_| format!("frames 不能为负数: {}", frames))?;
        }
        if let Some(save_every) = render.get("save_every").and_then(|v| v.as_integer()) {
            settings.save_every = u64::try_from(save_every)
                .map_err(|_| format!("save_every 不能为负数: {}", save_every))?;
        }
        if let Some(output_dir) = render.get("output_dir").and_then(|v| v.as_str()) {
            settings.output_dir = output_dir.to_string();
        }
        if let Some(output) = render.get("output").and_then(|v| v.as_str()) {
            settings.output = output.to_string();
        }
        if let Some(background) = render.get("background").and_then(|v| v.as_str()) {
            settings.background = background.to_string();
        }
        Ok(())
    }

    fn parse_lighting_section(
        settings: &mut RenderSettings,
        lighting: &toml::Table,
    ) -> Result<(), String> {
        if let Some(position) = lighting.get("light_position").and_then(|v| v.as_str()) {
            settings.light_position = position.to_string();
        }
        Ok(())
    }

    fn parse_noise_section(
        settings: &mut RenderSettings,
        noise: &toml::Table,
    ) -> Result<(), String> {
        // 整数和浮点都接受
        if let Some(scale) = noise
            .get("scale")
            .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
        {
            settings.noise_scale = scale;
        }
        if let Some(origin) = noise.get("origin").and_then(|v| v.as_str()) {
            settings.noise_origin = origin.to_string();
        }
        if let Some(drift) = noise.get("drift").and_then(|v| v.as_str()) {
            settings.noise_drift = drift.to_string();
        }
        if let Some(fade) = noise.get("fade").and_then(|v| v.as_str()) {
            settings.noise_fade = fade.to_string();
        }
        Ok(())
    }

    fn parse_fractal_section(
        settings: &mut RenderSettings,
        fractal: &toml::Table,
    ) -> Result<(), String> {
        if let Some(bounds) = fractal.get("bounds").and_then(|v| v.as_str()) {
            settings.fractal_bounds = bounds.to_string();
        }
        if let Some(iterations) = fractal.get("max_iterations").and_then(|v| v.as_integer()) {
            settings.fractal_iterations = u32::try_from(iterations)
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| format!("max_iterations 必须为正数: {}", iterations))?;
        }
        Ok(())
    }

    /// 物体解析 - 支持 [[object]] 数组语法
    fn parse_objects_array(toml: &Value) -> Result<Option<Vec<ObjectSpec>>, String> {
        let Some(objects_array) = toml.get("object").and_then(|v| v.as_array()) else {
            return Ok(None);
        };

        let mut objects = Vec::with_capacity(objects_array.len());
        for (i, object_value) in objects_array.iter().enumerate() {
            match object_value.as_table() {
                Some(object_table) => {
                    let object = Self::parse_single_object(object_table)
                        .map_err(|e| format!("第{}个物体解析失败: {}", i + 1, e))?;
                    objects.push(object);
                }
                None => warn!("忽略第{}个物体：不是表结构", i + 1),
            }
        }

        Ok(Some(objects))
    }

    fn parse_single_object(object_table: &toml::Table) -> Result<ObjectSpec, String> {
        let shape = object_table
            .get("shape")
            .and_then(|v| v.as_str())
            .unwrap_or("cube");

        let position = object_table
            .get("position")
            .and_then(|v| v.as_str())
            .ok_or("物体缺少position字段")?;

        Ok(ObjectSpec::new(shape, position))
    }

    fn positive_size(name: &str, value: i64) -> Result<usize, String> {
        if value <= 0 {
            return Err(format!("{} 必须为正数: {}", name, value));
        }
        usize::try_from(value).map_err(|e| format!("{} 超出范围: {}", name, e))
    }

    // ===== RenderSettings -> TOML 转换 =====

    pub fn settings_to_toml(settings: &RenderSettings) -> String {
        let mut content = String::new();

        // 文件头注释
        content.push_str("# TFT 光栅化动画配置文件\n");
        content.push_str("# 基于RenderSettings默认值生成的示例配置\n\n");

        // [display] 部分
        content.push_str("[display]\n");
        content.push_str(&format!("width = {}\n", settings.width));
        content.push_str(&format!("height = {}\n", settings.height));
        content.push('\n');

        // [render] 部分
        content.push_str("[render]\n");
        content.push_str(&format!("animation = \"{}\"\n", settings.animation.name()));
        content.push_str(&format!("frames = {}\n", settings.frames));
        content.push_str(&format!("save_every = {}\n", settings.save_every));
        content.push_str(&format!("output_dir = \"{}\"\n", settings.output_dir));
        content.push_str(&format!("output = \"{}\"\n", settings.output));
        content.push_str(&format!("background = \"{}\"\n", settings.background));
        content.push_str("# animation: \"cubes\" 立方体阵列 / \"noise\" 噪声着色\n");
        content.push_str("#            \"fractal\" 分形 / \"gradient\" 渐变测试图\n");
        content.push_str("# save_every: 每隔多少帧导出一张PNG，0 表示只渲染不导出\n");
        content.push('\n');

        // [lighting] 部分
        content.push_str("[lighting]\n");
        content.push_str(&format!(
            "light_position = \"{}\"\n",
            settings.light_position
        ));
        content.push('\n');

        // [noise] 部分
        content.push_str("[noise]\n");
        content.push_str(&format!("scale = {:?}\n", settings.noise_scale));
        content.push_str(&format!("origin = \"{}\"\n", settings.noise_origin));
        content.push_str(&format!("drift = \"{}\"\n", settings.noise_drift));
        content.push_str(&format!("fade = \"{}\"\n", settings.noise_fade));
        content.push_str("# fade: \"legacy\" 固定权重 / \"quintic\" 连续的五次曲线\n");
        content.push('\n');

        // [fractal] 部分
        content.push_str("[fractal]\n");
        content.push_str(&format!("bounds = \"{}\"\n", settings.fractal_bounds));
        content.push_str(&format!("max_iterations = {}\n", settings.fractal_iterations));
        content.push_str("# bounds: 复平面窗口 \"x1,x2,y1,y2\"\n");
        content.push('\n');

        // [[object]] 数组
        content.push_str("# 场景物体，按绘制顺序排列；shape 可选 \"cube\" 或 \"pyramid\"\n");
        for object in &settings.objects {
            content.push_str("[[object]]\n");
            content.push_str(&format!("shape = \"{}\"\n", object.shape));
            content.push_str(&format!("position = \"{}\"\n", object.position));
            content.push('\n');
        }

        content
    }
}

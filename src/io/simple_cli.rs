use crate::io::config_loader::TomlConfigLoader;
use crate::io::render_settings::RenderSettings;
use clap::Parser;
use log::info;

/// 极简CLI - 配置文件为主，少量参数可直接覆盖
#[derive(Parser, Debug)]
#[command(name = "tft-rasterizer")]
#[command(about = "TOML驱动的TFT帧缓冲动画渲染器")]
pub struct SimpleCli {
    /// 配置文件路径（TOML格式）
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// 覆盖渲染的总帧数
    #[arg(short, long)]
    pub frames: Option<u64>,

    /// 覆盖输出目录
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// 使用示例配置（临时创建并加载）
    #[arg(long)]
    pub use_example_config: bool,
}

impl SimpleCli {
    /// 处理CLI参数并返回RenderSettings
    pub fn process() -> Result<RenderSettings, String> {
        Self::parse().into_settings()
    }

    pub fn into_settings(self) -> Result<RenderSettings, String> {
        let mut settings = if self.use_example_config {
            let temp_config_path = "temp_example_config.toml";

            TomlConfigLoader::create_example_config(temp_config_path)
                .map_err(|e| format!("创建示例配置失败: {}", e))?;
            info!("已创建临时示例配置: {}", temp_config_path);

            // 保留临时文件，用户可以当模板
            TomlConfigLoader::load_from_file(temp_config_path)
                .map_err(|e| format!("加载示例配置失败: {}", e))?
        } else if let Some(config_path) = &self.config {
            info!("加载配置文件: {}", config_path);
            TomlConfigLoader::load_from_file(config_path)
                .map_err(|e| format!("配置文件加载失败: {}", e))?
        } else {
            info!("使用默认设置");
            RenderSettings::default()
        };

        if let Some(frames) = self.frames {
            settings.frames = frames;
        }
        if let Some(output_dir) = self.output_dir {
            settings.output_dir = output_dir;
        }
        Ok(settings)
    }
}

use log::{info, warn};
use std::time::Instant;
use tft_rasterizer::core::frame_buffer::{FrameBuffer, PixelTarget};
use tft_rasterizer::core::renderer::build_animation;
use tft_rasterizer::io::simple_cli::SimpleCli;
use tft_rasterizer::utils::save_utils::{FrameSnapshot, save_snapshots};

/// 内存中最多暂存的快照数，满了就并行写盘一次
const SAVE_BATCH: usize = 64;

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = SimpleCli::process()?;
    settings.validate()?;

    let mut animation = build_animation(&settings)?;
    let mut buffer = FrameBuffer::new(settings.width, settings.height);
    animation.init(&mut buffer);

    info!(
        "开始渲染 \"{}\": {}x{}, {} 帧",
        animation.title(),
        buffer.width(),
        buffer.height(),
        settings.frames
    );

    let start = Instant::now();
    let mut snapshots = Vec::new();
    let mut saved = 0;
    for frame in 1..=settings.frames {
        animation.render_frame(&mut buffer);
        if settings.save_every > 0 && frame % settings.save_every == 0 {
            snapshots.push(FrameSnapshot::capture(frame, &buffer)?);
        }
        if snapshots.len() >= SAVE_BATCH {
            saved += save_snapshots(&snapshots, &settings.output_dir, &settings.output)?;
            snapshots.clear();
        }
    }

    let elapsed = start.elapsed();
    if settings.frames > 0 {
        info!(
            "渲染完成，用时 {:?}（平均每帧 {:?}）",
            elapsed,
            elapsed.div_f64(settings.frames as f64)
        );
    }

    if !snapshots.is_empty() {
        saved += save_snapshots(&snapshots, &settings.output_dir, &settings.output)?;
    }
    if saved == 0 {
        warn!("没有需要导出的帧");
        return Ok(());
    }
    info!("共导出 {} 张图像到 {}", saved, settings.output_dir);
    Ok(())
}

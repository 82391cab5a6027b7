use crate::core::frame_buffer::{FrameBuffer, PixelTarget};
use image::ColorType;
use log::{error, info};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 一帧的快照，用于延后导出
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub width: u32,
    pub height: u32,
    /// RGB888 数据，逐行紧密排列
    pub rgb: Vec<u8>,
}

impl FrameSnapshot {
    pub fn capture(frame: u64, buffer: &FrameBuffer) -> Result<Self, String> {
        let width =
            u32::try_from(buffer.width()).map_err(|e| format!("图像宽度超出范围: {}", e))?;
        let height =
            u32::try_from(buffer.height()).map_err(|e| format!("图像高度超出范围: {}", e))?;
        Ok(Self {
            frame,
            width,
            height,
            rgb: buffer.to_rgb8_bytes(),
        })
    }
}

/// 输出文件路径：`<output_dir>/<output>_<frame:05>.png`
pub fn frame_path(output_dir: &str, output: &str, frame: u64) -> PathBuf {
    Path::new(output_dir).join(format!("{}_{:05}.png", output, frame))
}

/// 保存RGB图像数据到PNG文件
pub fn save_image<P: AsRef<Path>>(
    path: P,
    data: &[u8],
    width: u32,
    height: u32,
) -> Result<(), String> {
    let path = path.as_ref();
    image::save_buffer(path, data, width, height, ColorType::Rgb8)
        .map_err(|e| format!("保存图像到 {} 时出错: {}", path.display(), e))
}

/// 并行导出所有快照，返回成功写入的文件数
///
/// 单个文件失败不会中断其余文件；只要有失败就返回汇总错误。
pub fn save_snapshots(
    snapshots: &[FrameSnapshot],
    output_dir: &str,
    output: &str,
) -> Result<usize, String> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| format!("创建输出目录 {} 失败: {}", output_dir, e))?;

    let results: Vec<Result<PathBuf, String>> = snapshots
        .par_iter()
        .map(|snapshot| {
            let path = frame_path(output_dir, output, snapshot.frame);
            save_image(&path, &snapshot.rgb, snapshot.width, snapshot.height).map(|_| path)
        })
        .collect();

    let mut saved = 0;
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(path) => {
                info!("图像已保存到 {}", path.display());
                saved += 1;
            }
            Err(e) => {
                error!("{}", e);
                failures.push(e);
            }
        }
    }

    if failures.is_empty() {
        Ok(saved)
    } else {
        Err(format!("{}个文件保存失败，首个错误: {}", failures.len(), failures[0]))
    }
}

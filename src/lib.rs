//! 面向小尺寸 RGB565 TFT 屏幕的软件光栅化动画
//!
//! 画家算法排序的三角形管线、带裁剪的基础图元，以及逐像素噪声着色。

pub mod core;
pub mod geometry;
pub mod io;
pub mod material_system;
pub mod utils;

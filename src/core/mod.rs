// core/mod.rs
// 帧缓冲、光栅化与场景组装
pub mod frame_buffer;
pub mod rasterizer;
pub mod renderer;
pub mod scene_object;
pub mod triangle_processor;

// material_system/mod.rs
// 颜色、光照与程序化噪声
pub mod color;
pub mod light;
pub mod noise;

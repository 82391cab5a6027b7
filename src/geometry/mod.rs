// geometry/mod.rs
// 导出几何、相机与变换相关模块
pub mod camera;
pub mod culling;
pub mod math;
pub mod transform;

// utils/mod.rs
// 导出帧快照与PNG保存
pub mod save_utils;

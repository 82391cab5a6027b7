// io/mod.rs
// 配置读写与命令行
pub mod config_loader;
pub mod render_settings;
pub mod simple_cli;

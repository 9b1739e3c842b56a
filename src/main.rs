// 防止在 Windows 发布版本中显示额外的控制台窗口，不要删除！
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! # 图片另存工具 — 应用入口
//!
//! 本文件仅负责日志、插件、托管状态与命令注册。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use image_saver::{commands, settings};
use image_saver::saver::SaverConfig;
use tauri::Manager;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            log::info!("setup: begin");
            let handle = app.handle().clone();

            let config = match settings::load_saver_config(&handle) {
                Ok(config) => config,
                Err(err) => {
                    log::error!("setup: 配置加载失败，使用默认配置: {err}");
                    SaverConfig::default()
                }
            };

            let service = commands::SaverService::new(&handle, config)?;
            app.manage(service);
            log::info!("setup: saver service managed");

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::pick_image,
            commands::save_image,
            commands::get_view_state,
        ])
        .run(tauri::generate_context!())
        .expect("运行 Tauri 应用时出错");
}

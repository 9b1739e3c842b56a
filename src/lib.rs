//! # 图片另存工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │            前端 (ui/index.html，两个按钮 + 加载遮罩)        │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ Tauri IPC (Result<T, AppError>) + view-state 事件
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            后端 (Rust)                           │
//! │                                                          │
//! │  ├─ commands ──── pick_image / save_image / get_view_state│
//! │  ├─ saver ─────── 选图 · 保存策略 · 编排 · 视图状态        │
//! │  ├─ host ──────── 对话框 · 文件读写 · 本地相册库           │
//! │  ├─ settings ──── config.json 加载                        │
//! │  └─ error ─────── AppError (统一错误类型)                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，所有 Tauri command 的返回类型 |
//! | [`saver`] | 与宿主无关的选图/保存核心流程 |
//! | [`host`] | 宿主能力的真实实现 |
//! | [`settings`] | 应用配置加载 |
//! | [`commands`] | Tauri 命令与托管状态 `SaverService` |

pub mod commands;
pub mod error;
pub mod host;
pub mod saver;
pub mod settings;

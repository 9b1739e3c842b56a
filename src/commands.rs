//! # Tauri 命令层
//!
//! ## 设计思路
//!
//! 命令层只做 IPC 参数接收与结果返回，不承载业务逻辑。
//! 选图与保存分别交给 `ImageSourceAdapter` 与 `SaveOrchestrator`，
//! 视图状态变化通过 `view-state` 事件推送给前端。
//!
//! ## 实现思路
//!
//! `SaverService` 作为 Tauri 托管状态，在 `setup` 阶段按平台组装：
//! 目录型平台注入对话框 + 本地文件读写，相册型平台注入本地相册库。

use std::path::PathBuf;

use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager, State, Wry};

use crate::error::AppError;
use crate::host::{DialogDirectoryAccess, DialogImagePicker, LocalFileIo, LocalPhotoLibrary};
use crate::saver::{
    AlbumStrategy, DirectoryStrategy, ImageSourceAdapter, Notice, Platform, PlatformStrategy,
    SaveOrchestrator, SaveVariant, SaverConfig, ViewController, ViewModel,
};

pub const VIEW_STATE_EVENT: &str = "view-state";
const LIBRARY_DIR_NAME: &str = "Image Saver Library";

pub type AppStrategy = PlatformStrategy<DialogDirectoryAccess, LocalFileIo, LocalPhotoLibrary>;

/// 一次用户操作后的视图与提示。
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub view: ViewModel,
    pub notice: Option<Notice>,
}

pub struct SaverService {
    view: ViewController,
    source: ImageSourceAdapter<DialogImagePicker>,
    orchestrator: SaveOrchestrator<AppStrategy>,
}

impl SaverService {
    pub fn new(app: &AppHandle<Wry>, config: SaverConfig) -> Result<Self, AppError> {
        let variant = Platform::current().save_variant();
        log::info!("平台 {:?} 使用保存方式 {:?}", Platform::current(), variant);

        let emitter = app.clone();
        let view = ViewController::new(variant).with_listener(move |model| {
            if let Err(err) = emitter.emit(VIEW_STATE_EVENT, model) {
                log::warn!("推送视图状态失败: {err}");
            }
        });

        let strategy = build_strategy(app, &config, variant)?;

        Ok(Self {
            view,
            source: ImageSourceAdapter::new(DialogImagePicker::new(app.clone()), config.picker.clone()),
            orchestrator: SaveOrchestrator::new(strategy, &config),
        })
    }

    fn respond(&self, notice: Option<Notice>) -> ActionResponse {
        ActionResponse {
            view: self.view.render(),
            notice,
        }
    }
}

fn build_strategy(
    app: &AppHandle<Wry>,
    config: &SaverConfig,
    variant: SaveVariant,
) -> Result<AppStrategy, AppError> {
    match variant {
        SaveVariant::Directory => Ok(PlatformStrategy::Directory(DirectoryStrategy::new(
            DialogDirectoryAccess::new(app.clone()),
            LocalFileIo,
            config,
        ))),
        SaveVariant::Album => {
            let library = LocalPhotoLibrary::open(library_root(app, config)?)?;
            Ok(PlatformStrategy::Album(AlbumStrategy::new(library, config)))
        }
    }
}

fn library_root(app: &AppHandle<Wry>, config: &SaverConfig) -> Result<PathBuf, AppError> {
    if let Some(root) = &config.library_root {
        return Ok(root.clone());
    }

    match app.path().picture_dir() {
        Ok(pictures) => Ok(pictures.join(LIBRARY_DIR_NAME)),
        Err(err) => {
            log::warn!("获取图片目录失败，回退到应用数据目录: {err}");
            app.path()
                .app_data_dir()
                .map(|dir| dir.join("library"))
                .map_err(|e| AppError::Storage(format!("获取应用数据目录失败: {}", e)))
        }
    }
}

/// 打开选图器并更新选中图片。
#[tauri::command]
pub async fn pick_image(state: State<'_, SaverService>) -> Result<ActionResponse, AppError> {
    let notice = state.source.pick_into(&state.view).await;
    Ok(state.respond(notice))
}

/// 保存当前选中的图片。
#[tauri::command]
pub async fn save_image(state: State<'_, SaverService>) -> Result<ActionResponse, AppError> {
    let notice = state.orchestrator.save(&state.view).await;
    Ok(state.respond(Some(notice)))
}

/// 查询当前视图状态（前端初始化时调用）。
#[tauri::command]
pub fn get_view_state(state: State<'_, SaverService>) -> ViewModel {
    state.view.render()
}

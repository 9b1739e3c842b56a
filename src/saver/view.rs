//! # 视图状态控制器
//!
//! ## 设计思路
//!
//! 整个应用只有两份可变状态：当前选中的图片与 `loading` 标志。
//! 二者集中在 `ViewController` 中，作为显式对象传给编排器，
//! 不依赖 UI 框架即可做确定性单元测试。
//!
//! ## 实现思路
//!
//! - 内部使用 `std::sync::Mutex`，任何时候都不跨 `.await` 持锁。
//! - 每次状态变化后渲染 `ViewModel` 并推送给监听器（Tauri 层转发为事件）。
//! - `LoadingGuard` 以 RAII 方式保证 `loading` 在任何退出路径上被清除，
//!   包括提前返回、panic 与 future 被丢弃。

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use super::{SaveError, SaveVariant, SelectedImage};

/// 视图的原始状态。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub selected_image: Option<SelectedImage>,
    pub loading: bool,
}

/// 保存按钮的渲染结果。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveButton {
    pub label: &'static str,
    pub enabled: bool,
}

/// 供前端直接渲染的视图模型。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub pick_enabled: bool,
    pub selected_image: Option<SelectedImage>,
    /// 仅在已选中图片时存在。
    pub save_button: Option<SaveButton>,
    /// 覆盖整个视图、不可关闭的加载遮罩。
    pub spinner_visible: bool,
}

impl ViewModel {
    fn render(state: &ViewState, variant: SaveVariant) -> Self {
        Self {
            pick_enabled: !state.loading,
            selected_image: state.selected_image.clone(),
            save_button: state.selected_image.as_ref().map(|_| SaveButton {
                label: variant.button_label(),
                enabled: !state.loading,
            }),
            spinner_visible: state.loading,
        }
    }
}

type ViewListener = Box<dyn Fn(&ViewModel) + Send + Sync>;

pub struct ViewController {
    state: Mutex<ViewState>,
    variant: SaveVariant,
    listener: Option<ViewListener>,
}

impl ViewController {
    pub fn new(variant: SaveVariant) -> Self {
        Self {
            state: Mutex::new(ViewState::default()),
            variant,
            listener: None,
        }
    }

    /// 注册状态变化监听器。
    pub fn with_listener(mut self, listener: impl Fn(&ViewModel) + Send + Sync + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn variant(&self) -> SaveVariant {
        self.variant
    }

    pub fn snapshot(&self) -> ViewState {
        self.lock().clone()
    }

    pub fn render(&self) -> ViewModel {
        ViewModel::render(&self.lock(), self.variant)
    }

    pub fn selected_image(&self) -> Option<SelectedImage> {
        self.lock().selected_image.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// 替换当前选中图片。保存进行中时拒绝。
    pub(crate) fn select(&self, image: SelectedImage) -> Result<(), SaveError> {
        self.update(|state| {
            if state.loading {
                return Err(SaveError::Busy);
            }
            state.selected_image = Some(image);
            Ok(())
        })
    }

    pub(crate) fn ensure_idle(&self) -> Result<(), SaveError> {
        if self.is_loading() {
            return Err(SaveError::Busy);
        }
        Ok(())
    }

    /// 进入保存态：要求已选图且当前空闲，置位 `loading` 并返回守卫。
    pub(crate) fn begin_save(&self) -> Result<LoadingGuard<'_>, SaveError> {
        let image = self.update(|state| {
            if state.loading {
                return Err(SaveError::Busy);
            }
            let image = state.selected_image.clone().ok_or(SaveError::NoImageSelected)?;
            state.loading = true;
            Ok(image)
        })?;

        Ok(LoadingGuard { view: self, image })
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        // 状态仅两个字段，锁中毒时沿用内部数据即可。
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 在锁内修改状态；仅当状态确有变化时在锁外通知监听器。
    fn update<T>(&self, op: impl FnOnce(&mut ViewState) -> T) -> T {
        let (result, changed) = {
            let mut state = self.lock();
            let before = state.clone();
            let result = op(&mut state);
            let changed = (*state != before).then(|| ViewModel::render(&state, self.variant));
            (result, changed)
        };

        if let (Some(listener), Some(model)) = (&self.listener, changed) {
            listener(&model);
        }

        result
    }
}

/// 保存期间持有的守卫，析构时无条件清除 `loading`。
pub struct LoadingGuard<'a> {
    view: &'a ViewController,
    image: SelectedImage,
}

impl LoadingGuard<'_> {
    pub fn image(&self) -> &SelectedImage {
        &self.image
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.view.update(|state| state.loading = false);
    }
}

//! # 保存编排器
//!
//! ## 设计思路
//!
//! 状态机 `Idle → Saving → Idle`。进入 `Saving` 时置位 `loading`，
//! 离开时由 `LoadingGuard` 无条件清除，成功、失败、panic 都不例外。
//!
//! 具体走目录还是相册由注入的 `SaveStrategy` 决定，编排器本身不判断平台。
//! 所有策略层失败在这里收敛为一条用户提示，真实原因只进日志。

use super::{Notice, SaveStrategy, SaverConfig, ViewController};

pub struct SaveOrchestrator<S> {
    strategy: S,
    detailed_feedback: bool,
}

impl<S: SaveStrategy> SaveOrchestrator<S> {
    pub fn new(strategy: S, config: &SaverConfig) -> Self {
        Self {
            strategy,
            detailed_feedback: config.detailed_feedback,
        }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// 保存当前选中的图片，返回应展示给用户的提示。
    pub async fn save(&self, view: &ViewController) -> Notice {
        let guard = match view.begin_save() {
            Ok(guard) => guard,
            Err(err) => {
                log::info!("保存未开始: {}", err);
                return Notice::for_rejected_save(&err);
            }
        };

        log::info!(
            "开始保存 - 方式: {:?} 图片: {}",
            self.strategy.variant(),
            guard.image().uri
        );
        let outcome = self.strategy.save(Some(guard.image())).await;
        drop(guard);

        if outcome.is_success() {
            Notice::success(self.strategy.success_message())
        } else {
            log::error!("save failed: {:?}", outcome);
            Notice::for_failed_save(outcome, self.detailed_feedback)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::saver::feedback::{SAVE_FAILED, SAVE_IN_PROGRESS, SELECT_IMAGE_FIRST};
    use crate::saver::testing::{FakeDirectoryAccess, FakePhotoLibrary, LibraryStep, MemoryFileIo};
    use crate::saver::{
        AlbumStrategy, DirectoryStrategy, NoticeKind, SaveError, SaveOutcome, SaveVariant,
        SelectedImage,
    };

    const URI: &str = "file:///tmp/photo.png";

    /// 包装策略，记录执行期间 `loading` 的取值。
    struct Probe<S> {
        inner: S,
        view: Arc<ViewController>,
        seen_loading: Mutex<Vec<bool>>,
    }

    impl<S: SaveStrategy> SaveStrategy for Probe<S> {
        fn variant(&self) -> SaveVariant {
            self.inner.variant()
        }

        fn success_message(&self) -> String {
            self.inner.success_message()
        }

        async fn save(&self, image: Option<&SelectedImage>) -> SaveOutcome {
            self.seen_loading.lock().unwrap().push(self.view.is_loading());
            let outcome = self.inner.save(image).await;
            self.seen_loading.lock().unwrap().push(self.view.is_loading());
            outcome
        }
    }

    fn view_with_photo(variant: SaveVariant) -> Arc<ViewController> {
        let view = Arc::new(ViewController::new(variant));
        view.select(SelectedImage::new(URI, "image/png"))
            .expect("select should succeed");
        view
    }

    fn seeded_io() -> MemoryFileIo {
        let io = MemoryFileIo::default();
        io.put(URI, vec![1, 2, 3, 4]);
        io
    }

    async fn run_probe<S: SaveStrategy>(
        inner: S,
        view: Arc<ViewController>,
        detailed: bool,
    ) -> (Notice, Vec<bool>) {
        let probe = Probe {
            inner,
            view: Arc::clone(&view),
            seen_loading: Mutex::new(Vec::new()),
        };
        let config = SaverConfig {
            detailed_feedback: detailed,
            ..SaverConfig::default()
        };
        let orchestrator = SaveOrchestrator::new(probe, &config);

        let notice = orchestrator.save(&view).await;
        assert!(!view.is_loading(), "loading must be cleared after save");
        let seen = orchestrator.strategy().seen_loading.lock().unwrap().clone();
        (notice, seen)
    }

    #[tokio::test]
    async fn directory_success_reports_saved() {
        let view = view_with_photo(SaveVariant::Directory);
        let strategy = DirectoryStrategy::new(
            FakeDirectoryAccess::granting("content://dir"),
            seeded_io(),
            &SaverConfig::default(),
        );

        let (notice, seen) = run_probe(strategy, view, false).await;

        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "saved!");
        assert_eq!(seen, vec![true, true]);
    }

    #[tokio::test]
    async fn album_success_names_the_album() {
        let view = view_with_photo(SaveVariant::Album);
        let strategy = AlbumStrategy::new(FakePhotoLibrary::default(), &SaverConfig::default());

        let (notice, _) = run_probe(strategy, view, false).await;

        assert_eq!(notice.message, "Save to MyApp!");
    }

    #[tokio::test]
    async fn loading_is_cleared_on_every_directory_failure() {
        let config = SaverConfig::default();
        let cases = vec![
            DirectoryStrategy::new(FakeDirectoryAccess::denying(), seeded_io(), &config),
            DirectoryStrategy::new(
                FakeDirectoryAccess::with_grant(Err(SaveError::TransferFailed("prompt crashed".into()))),
                seeded_io(),
                &config,
            ),
            DirectoryStrategy::new(
                FakeDirectoryAccess::granting("content://dir")
                    .failing_create(SaveError::TransferFailed("name collision".into())),
                seeded_io(),
                &config,
            ),
            DirectoryStrategy::new(
                FakeDirectoryAccess::granting("content://dir"),
                MemoryFileIo::default(),
                &config,
            ),
            DirectoryStrategy::new(
                FakeDirectoryAccess::granting("content://dir"),
                {
                    let io = MemoryFileIo::failing_write(SaveError::TransferFailed("storage full".into()));
                    io.put(URI, vec![1]);
                    io
                },
                &config,
            ),
        ];

        for strategy in cases {
            let (notice, seen) = run_probe(strategy, view_with_photo(SaveVariant::Directory), false).await;
            assert_eq!(notice.kind, NoticeKind::Failure);
            assert_eq!(notice.message, SAVE_FAILED);
            assert_eq!(seen, vec![true, true]);
        }
    }

    #[tokio::test]
    async fn loading_is_cleared_on_every_album_failure() {
        let config = SaverConfig::default();
        let cases = vec![
            FakePhotoLibrary::denying_permission(),
            FakePhotoLibrary::default().failing_at(LibraryStep::Register),
            FakePhotoLibrary::default().failing_at(LibraryStep::GetAlbum),
            FakePhotoLibrary::default().failing_at(LibraryStep::CreateAlbum),
            FakePhotoLibrary::with_album("MyApp").failing_at(LibraryStep::AddAssets),
        ];

        for library in cases {
            let strategy = AlbumStrategy::new(library, &config);
            let (notice, seen) = run_probe(strategy, view_with_photo(SaveVariant::Album), false).await;
            assert_eq!(notice.message, SAVE_FAILED);
            assert_eq!(seen, vec![true, true]);
        }
    }

    #[tokio::test]
    async fn detailed_feedback_distinguishes_permission_denial() {
        let view = view_with_photo(SaveVariant::Directory);
        let strategy = DirectoryStrategy::new(
            FakeDirectoryAccess::denying(),
            seeded_io(),
            &SaverConfig::default(),
        );

        let (notice, _) = run_probe(strategy, view, true).await;

        assert_eq!(notice.message, "failed to grant permission");
        assert_eq!(notice.outcome, Some(SaveOutcome::PermissionDenied));
    }

    #[tokio::test]
    async fn save_without_selection_never_enters_loading() {
        let view = Arc::new(ViewController::new(SaveVariant::Directory));
        let strategy = DirectoryStrategy::new(
            FakeDirectoryAccess::granting("content://dir"),
            seeded_io(),
            &SaverConfig::default(),
        );

        let (notice, seen) = run_probe(strategy, Arc::clone(&view), false).await;

        assert_eq!(notice.message, SELECT_IMAGE_FIRST);
        assert_eq!(notice.outcome, Some(SaveOutcome::NoImageSelected));
        assert!(seen.is_empty(), "strategy must not run");
    }

    #[tokio::test]
    async fn concurrent_save_is_refused() {
        let view = view_with_photo(SaveVariant::Directory);
        let _in_flight = view.begin_save().expect("first save should start");
        let orchestrator = SaveOrchestrator::new(
            DirectoryStrategy::new(
                FakeDirectoryAccess::granting("content://dir"),
                seeded_io(),
                &SaverConfig::default(),
            ),
            &SaverConfig::default(),
        );

        let notice = orchestrator.save(&view).await;

        assert_eq!(notice.message, SAVE_IN_PROGRESS);
        assert!(orchestrator.strategy().access().created().is_empty());
        assert!(view.is_loading(), "the in-flight save still owns the flag");
    }

    #[tokio::test]
    async fn listener_observes_spinner_on_and_off() {
        let transitions = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&transitions);
        let view = ViewController::new(SaveVariant::Directory)
            .with_listener(move |model| sink.lock().unwrap().push(model.spinner_visible));
        view.select(SelectedImage::new(URI, "image/png"))
            .expect("select should succeed");

        let orchestrator = SaveOrchestrator::new(
            DirectoryStrategy::new(FakeDirectoryAccess::denying(), seeded_io(), &SaverConfig::default()),
            &SaverConfig::default(),
        );
        orchestrator.save(&view).await;

        assert_eq!(*transitions.lock().unwrap(), vec![false, true, false]);
    }
}

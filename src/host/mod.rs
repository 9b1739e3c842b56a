//! # 宿主能力实现
//!
//! `crate::saver::capability` 中各 trait 的真实实现：
//!
//! | 模块 | 实现 |
//! |------|------|
//! | `dialog` | `DialogImagePicker`、`DialogDirectoryAccess`（系统对话框） |
//! | `fs` | `LocalFileIo`（base64 整文件读写）与条目创建 |
//! | `library` | `LocalPhotoLibrary`（目录 + SQLite 模拟的相册库） |
//! | `uri` | `file://` URI 与路径互转 |

pub mod dialog;
pub mod fs;
pub mod library;
pub mod uri;

pub use dialog::{DialogDirectoryAccess, DialogImagePicker};
pub use fs::LocalFileIo;
pub use library::LocalPhotoLibrary;

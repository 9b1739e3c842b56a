//! # 本地相册库
//!
//! ## 设计思路
//!
//! 在没有系统相册 API 的平台上，用一个目录模拟宿主相册库：
//! - 资源文件复制到 `<root>/assets/`
//! - 资源、相册、相册成员关系记录在 `<root>/library.db`（SQLite）
//!
//! ## 实现思路
//!
//! - 连接由 `Mutex<Connection>` 持有，任何 `.await` 之前释放锁；锁中毒时沿用内部连接。
//! - 登记资源先占位拿到 id，复制或回填失败时撤销占位行并删除已复制的文件。
//! - 创建相册与放入种子资源在同一事务中完成，对外是一次原子调用。
//! - 相册成员使用 `INSERT OR IGNORE`：同一资源重复加入同一相册时静默忽略。

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use super::uri;
use crate::error::AppError;
use crate::saver::{
    AlbumHandle, AssetHandle, DEFAULT_FILE_NAME, PhotoLibrary, SaveError, derive_file_name,
};

const DB_FILE_NAME: &str = "library.db";
const ASSETS_DIR: &str = "assets";

pub struct LocalPhotoLibrary {
    root: PathBuf,
    conn: Mutex<Connection>,
}

impl LocalPhotoLibrary {
    /// 打开（必要时创建）位于 `root` 的相册库。
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = std::path::absolute(root.into())
            .map_err(|e| AppError::Storage(format!("解析相册库路径失败: {}", e)))?;
        std::fs::create_dir_all(root.join(ASSETS_DIR))
            .map_err(|e| AppError::Storage(format!("创建相册库目录失败: {}", e)))?;

        let db_path = root.join(DB_FILE_NAME);
        log::info!("相册库路径: {}", db_path.display());
        let conn = Connection::open(&db_path)
            .map_err(|e| AppError::Database(format!("打开相册库失败: {}", e)))?;
        initialize_schema(&conn)?;

        Ok(Self {
            root,
            conn: Mutex::new(conn),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 相册中的资源 id，按加入顺序。
    pub fn album_asset_ids(&self, album: &AlbumHandle) -> Result<Vec<String>, SaveError> {
        let album_id = parse_id(&album.id)?;
        let conn = self.lock();
        let mut stmt = conn
            .prepare("SELECT asset_id FROM album_assets WHERE album_id = ?1 ORDER BY added_at, asset_id")
            .map_err(db_error)?;
        let rows = stmt
            .query_map(params![album_id], |row| row.get::<_, i64>(0))
            .map_err(db_error)?;

        rows.map(|row| row.map(|id| id.to_string()).map_err(db_error))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // 每次写入都在语句或事务内完成，中毒的连接仍处于一致状态。
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 撤销占位行；`copied` 为已复制的文件时一并删除。
    async fn discard_reservation(&self, id: i64, copied: Option<&Path>) {
        if let Some(path) = copied {
            if let Err(e) = tokio::fs::remove_file(path).await {
                log::warn!("删除残留资源文件失败 {}: {}", path.display(), e);
            }
        }
        let deleted = self.lock().execute("DELETE FROM assets WHERE id = ?1", params![id]);
        if let Err(e) = deleted {
            log::warn!("撤销资源占位 {} 失败: {}", id, e);
        }
    }
}

impl PhotoLibrary for LocalPhotoLibrary {
    async fn register_asset(&self, uri: &str) -> Result<AssetHandle, SaveError> {
        let source = uri::to_path(uri)?;

        // 先占位拿到 id，文件名以 id 为前缀保证唯一
        let id = {
            let conn = self.lock();
            conn.execute(
                "INSERT INTO assets (source_uri, file_uri, created_at) VALUES (?1, '', ?2)",
                params![uri, Utc::now().timestamp_millis()],
            )
            .map_err(db_error)?;
            conn.last_insert_rowid()
        };

        let file_name = format!("{}-{}", id, derive_file_name(uri, DEFAULT_FILE_NAME));
        let target = self.root.join(ASSETS_DIR).join(file_name);
        let target_uri = match uri::from_path(&target) {
            Ok(target_uri) => target_uri,
            Err(e) => {
                self.discard_reservation(id, None).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::copy(&source, &target).await {
            self.discard_reservation(id, None).await;
            return Err(match e.kind() {
                ErrorKind::PermissionDenied => {
                    SaveError::PermissionDenied(format!("写入相册库失败: {}", e))
                }
                _ => SaveError::transfer("登记资源", e),
            });
        }

        let updated = self.lock().execute(
            "UPDATE assets SET file_uri = ?1 WHERE id = ?2",
            params![target_uri, id],
        );
        if let Err(e) = updated {
            self.discard_reservation(id, Some(&target)).await;
            return Err(db_error(e));
        }

        log::info!("🖼️ 已登记资源 {}: {}", id, target_uri);
        Ok(AssetHandle {
            id: id.to_string(),
            uri: target_uri,
        })
    }

    async fn get_album(&self, name: &str) -> Result<Option<AlbumHandle>, SaveError> {
        let conn = self.lock();
        let id = conn
            .query_row("SELECT id FROM albums WHERE name = ?1", params![name], |row| {
                row.get::<_, i64>(0)
            })
            .optional()
            .map_err(db_error)?;

        Ok(id.map(|id| AlbumHandle {
            id: id.to_string(),
            name: name.to_string(),
        }))
    }

    async fn create_album(&self, name: &str, seed: &AssetHandle) -> Result<AlbumHandle, SaveError> {
        let asset_id = parse_id(&seed.id)?;
        let now = Utc::now().timestamp_millis();

        let mut conn = self.lock();
        let tx = conn.transaction().map_err(db_error)?;
        tx.execute(
            "INSERT INTO albums (name, created_at) VALUES (?1, ?2)",
            params![name, now],
        )
        .map_err(db_error)?;
        let album_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO album_assets (album_id, asset_id, added_at) VALUES (?1, ?2, ?3)",
            params![album_id, asset_id, now],
        )
        .map_err(db_error)?;
        tx.commit().map_err(db_error)?;

        Ok(AlbumHandle {
            id: album_id.to_string(),
            name: name.to_string(),
        })
    }

    async fn add_assets_to_album(
        &self,
        assets: &[AssetHandle],
        album: &AlbumHandle,
    ) -> Result<(), SaveError> {
        let album_id = parse_id(&album.id)?;
        let asset_ids = assets
            .iter()
            .map(|asset| parse_id(&asset.id))
            .collect::<Result<Vec<_>, _>>()?;
        let now = Utc::now().timestamp_millis();

        let mut conn = self.lock();
        let tx = conn.transaction().map_err(db_error)?;
        for asset_id in asset_ids {
            tx.execute(
                "INSERT OR IGNORE INTO album_assets (album_id, asset_id, added_at) VALUES (?1, ?2, ?3)",
                params![album_id, asset_id, now],
            )
            .map_err(db_error)?;
        }
        tx.commit().map_err(db_error)
    }
}

fn initialize_schema(conn: &Connection) -> Result<(), AppError> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
        CREATE TABLE IF NOT EXISTS assets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source_uri TEXT NOT NULL,
            file_uri TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );
        CREATE TABLE IF NOT EXISTS albums (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            created_at INTEGER NOT NULL
        );
        CREATE TABLE IF NOT EXISTS album_assets (
            album_id INTEGER NOT NULL,
            asset_id INTEGER NOT NULL,
            added_at INTEGER NOT NULL,
            PRIMARY KEY (album_id, asset_id),
            FOREIGN KEY (album_id) REFERENCES albums(id) ON DELETE CASCADE,
            FOREIGN KEY (asset_id) REFERENCES assets(id) ON DELETE CASCADE
        );",
    )
    .map_err(|e| AppError::Database(format!("创建相册库表失败: {}", e)))
}

fn parse_id(id: &str) -> Result<i64, SaveError> {
    id.parse()
        .map_err(|_| SaveError::TransferFailed(format!("无效的相册库 id：{id}")))
}

fn db_error(error: rusqlite::Error) -> SaveError {
    SaveError::transfer("相册库", error)
}

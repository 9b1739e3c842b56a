//! # 传输引擎
//!
//! 整文件单次搬运：源内容以 base64 文本整体读入内存，再交给目标端解码写入。
//! 不分块、不报告进度；单张照片场景下内存占用可接受。

use super::{FileIo, SaveError};

pub struct TransferEngine<'a, F> {
    io: &'a F,
}

impl<'a, F: FileIo> TransferEngine<'a, F> {
    pub fn new(io: &'a F) -> Self {
        Self { io }
    }

    pub async fn copy(&self, source_uri: &str, destination_uri: &str) -> Result<(), SaveError> {
        let encoded = self.io.read_all_base64(source_uri).await?;
        log::debug!(
            "读取源文件完成 - 来源: {} base64 长度: {}",
            source_uri,
            encoded.len()
        );

        self.io.write_all_base64(destination_uri, &encoded).await?;
        log::info!("✅ 传输完成: {} -> {}", source_uri, destination_uri);
        Ok(())
    }
}

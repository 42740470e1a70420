//! 배포 아카이브 다운로드 포트 구현 어댑터.

use std::path::Path;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::application::config::redact_proxy;
use crate::application::ports::{BinaryDownloader, DownloadProgress};

/// reqwest 스트리밍으로 파일을 내려받는 어댑터.
/// 재시도/타임아웃은 두지 않는다.
pub struct HttpDownloader;

impl HttpDownloader {
    fn client(proxy: Option<&str>) -> Result<reqwest::Client> {
        // 프록시는 설정으로 해석된 값만 사용한다.
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("scanpilot/", env!("CARGO_PKG_VERSION")))
            .no_proxy();
        if let Some(proxy) = proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .with_context(|| format!("invalid proxy URL: {}", redact_proxy(proxy)))?;
            builder = builder.proxy(proxy);
        }
        Ok(builder.build()?)
    }
}

#[async_trait]
impl BinaryDownloader for HttpDownloader {
    async fn download(
        &self,
        url: &str,
        destination: &Path,
        proxy: Option<&str>,
        progress: &dyn DownloadProgress,
    ) -> Result<()> {
        tracing::info!("downloading {url}");
        let client = Self::client(proxy)?;
        let resp = client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        if !resp.status().is_success() {
            bail!("download of {url} failed with HTTP {}", resp.status());
        }

        let mut file = tokio::fs::File::create(destination)
            .await
            .with_context(|| format!("failed to create {}", destination.display()))?;

        progress.start(resp.content_length());
        let mut received: u64 = 0;
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.with_context(|| format!("download of {url} interrupted"))?;
            file.write_all(&chunk)
                .await
                .with_context(|| format!("failed to write {}", destination.display()))?;
            received += chunk.len() as u64;
            progress.advance(received);
        }
        file.flush().await?;
        progress.finish();

        tracing::debug!("downloaded {received} bytes to {}", destination.display());
        Ok(())
    }
}

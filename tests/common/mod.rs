#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use scanpilot::domain::platform::Platform;
use scanpilot::domain::policy;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use zip::write::SimpleFileOptions;

/// 프로젝트 디렉터리에 상대 경로 파일을 만든다.
pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// 현재 플랫폼용 스캐너 배포 아카이브(zip)를 만든다.
pub fn scanner_zip(version: &str, script: &str) -> Vec<u8> {
    let platform = Platform::detect().unwrap();
    let entry = format!(
        "{}-{version}-{platform}/bin/{}",
        policy::SCANNER_COMMAND,
        platform.executable_name(policy::SCANNER_COMMAND)
    );

    let mut buf = std::io::Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buf);
        writer
            .start_file(entry, SimpleFileOptions::default().unix_permissions(0o755))
            .unwrap();
        writer.write_all(script.as_bytes()).unwrap();
        writer.finish().unwrap();
    }
    buf.into_inner()
}

pub fn cached_executable(cache_base: &Path, version: &str) -> PathBuf {
    let platform = Platform::detect().unwrap();
    policy::executable_path(&policy::install_folder(cache_base), version, platform)
}

/// 캐시 위치에 실행 가능한 스크립트를 스캐너로 설치한다.
#[cfg(unix)]
pub fn install_cached_script(cache_base: &Path, version: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let exe = cached_executable(cache_base, version);
    fs::create_dir_all(exe.parent().unwrap()).unwrap();
    fs::write(&exe, script).unwrap();
    fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
    exe
}

/// 모든 요청에 같은 응답을 돌려주는 일회용 HTTP 서버.
pub struct StubServer {
    pub addr: SocketAddr,
    pub base_url: String,
    pub hits: Arc<AtomicUsize>,
}

impl StubServer {
    pub async fn start(status: u16, body: Vec<u8>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let body = body.clone();
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let head = format!(
                        "HTTP/1.1 {status} STUB\r\nContent-Type: application/zip\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len()
                    );
                    let _ = socket.write_all(head.as_bytes()).await;
                    let _ = socket.write_all(&body).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            addr,
            base_url: format!("http://{addr}/dist/"),
            hits,
        }
    }

    /// 이 서버를 HTTP 프록시로 쓸 때의 주소. 요청 대상과 무관하게 같은 응답을 준다.
    pub fn proxy_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

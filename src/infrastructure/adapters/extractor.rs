//! zip 아카이브 압축 해제 포트 구현 어댑터.

use std::fs;
use std::io;
use std::path::{Component, Path};

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::application::ports::ArchiveExtractor;

pub struct ZipExtractor;

#[async_trait]
impl ArchiveExtractor for ZipExtractor {
    async fn extract(&self, archive: &Path, destination: &Path) -> Result<()> {
        let archive = archive.to_path_buf();
        let destination = destination.to_path_buf();
        tokio::task::spawn_blocking(move || extract_zip(&archive, &destination))
            .await
            .context("zip extraction task panicked")?
    }
}

/// 대상 폴더 밖으로 나가는 항목과 링크는 건너뛰고, unix 권한 비트와 심볼릭 링크를 복원한다.
fn extract_zip(archive: &Path, destination: &Path) -> Result<()> {
    let file = fs::File::open(archive)
        .with_context(|| format!("failed to open {}", archive.display()))?;
    let mut zip = zip::ZipArchive::new(file)
        .with_context(|| format!("{} is not a valid zip archive", archive.display()))?;

    for idx in 0..zip.len() {
        let mut entry = zip.by_index(idx)?;
        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!("skipping unsafe archive entry: {}", entry.name());
            continue;
        };
        let out_path = destination.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)
                .with_context(|| format!("failed to create {}", out_path.display()))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        if entry.unix_mode().is_some_and(|mode| mode & S_IFMT == S_IFLNK) {
            let mut target = String::new();
            io::Read::read_to_string(&mut entry, &mut target)
                .with_context(|| format!("failed to read link target of {}", entry.name()))?;
            if !link_stays_inside(&relative, Path::new(&target)) {
                tracing::warn!("skipping archive link leaving destination: {} -> {target}", entry.name());
                continue;
            }
            write_link(Path::new(&target), &out_path)?;
            continue;
        }

        let mut out = fs::File::create(&out_path)
            .with_context(|| format!("failed to create {}", out_path.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("failed to extract {}", out_path.display()))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode & 0o7777))?;
        }
    }

    Ok(())
}

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

/// 링크가 놓일 위치 기준으로 대상이 압축 해제 폴더 안에 머무는지 검사한다.
fn link_stays_inside(link: &Path, target: &Path) -> bool {
    let mut depth = link.components().count().saturating_sub(1) as isize;
    for component in target.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}

#[cfg(unix)]
fn write_link(target: &Path, link: &Path) -> Result<()> {
    if fs::symlink_metadata(link).is_ok() {
        fs::remove_file(link).with_context(|| format!("failed to replace {}", link.display()))?;
    }
    std::os::unix::fs::symlink(target, link)
        .with_context(|| format!("failed to link {}", link.display()))
}

/// 심볼릭 링크 권한이 없는 플랫폼에서는 대상 경로를 담은 파일로 남긴다.
#[cfg(not(unix))]
fn write_link(target: &Path, link: &Path) -> Result<()> {
    fs::write(link, target.to_string_lossy().as_bytes())
        .with_context(|| format!("failed to create {}", link.display()))
}

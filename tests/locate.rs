mod common;

use std::fs;

use scanpilot::application::config::{ENV_SCANNER_MIRROR, ENV_SCANNER_VERSION};
use scanpilot::domain::scan::ExecutableOverrides;
use scanpilot::infrastructure::adapters::StaticEnv;
use scanpilot::interface::cli::AppComposition;

use common::{StubServer, cached_executable, scanner_zip};

const VERSION: &str = "9.9.9.1";

fn composition(home: &std::path::Path) -> AppComposition {
    AppComposition::with_env(Box::new(StaticEnv::new(home).with_home(home)))
}

#[tokio::test]
async fn downloads_and_extracts_missing_executable() {
    let home = tempfile::tempdir().unwrap();
    let server = StubServer::start(200, scanner_zip(VERSION, "#!/bin/sh\necho scanner\n")).await;
    let app = composition(home.path());

    let overrides = ExecutableOverrides {
        version: Some(VERSION.into()),
        mirror: Some(server.base_url.clone()),
        ..Default::default()
    };
    let found = app
        .locate_executable_usecase()
        .locate_or_download(&overrides)
        .await
        .unwrap();

    let expected = cached_executable(home.path(), VERSION);
    assert_eq!(found.as_deref(), Some(expected.as_path()));
    assert!(expected.is_file());
    assert_eq!(server.hits(), 1);

    // 두 번째 호출은 캐시를 사용한다.
    let again = app
        .locate_executable_usecase()
        .locate_or_download(&overrides)
        .await
        .unwrap();
    assert_eq!(again, Some(expected));
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn existing_executable_is_returned_without_request() {
    let home = tempfile::tempdir().unwrap();
    let server = StubServer::start(500, Vec::new()).await;
    let expected = cached_executable(home.path(), VERSION);
    fs::create_dir_all(expected.parent().unwrap()).unwrap();
    fs::write(&expected, "echo \"hello\"").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&expected, fs::Permissions::from_mode(0o700)).unwrap();
    }

    let found = composition(home.path())
        .locate_executable_usecase()
        .locate_or_download(&ExecutableOverrides {
            version: Some(VERSION.into()),
            mirror: Some(server.base_url.clone()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(found, Some(expected));
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn http_error_yields_none_without_retry() {
    let home = tempfile::tempdir().unwrap();
    let server = StubServer::start(404, b"not found".to_vec()).await;

    let found = composition(home.path())
        .locate_executable_usecase()
        .locate_or_download(&ExecutableOverrides {
            version: Some(VERSION.into()),
            mirror: Some(server.base_url.clone()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(found, None);
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn unreachable_mirror_from_env_yields_none() {
    let home = tempfile::tempdir().unwrap();
    let env = StaticEnv::new(home.path())
        .with_home(home.path())
        .with_var(ENV_SCANNER_MIRROR, "http://127.0.0.1:1/sonar-scanner");
    let app = AppComposition::with_env(Box::new(env));

    let found = app
        .locate_executable_usecase()
        .locate_or_download(&ExecutableOverrides::default())
        .await
        .unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn corrupt_archive_yields_none() {
    let home = tempfile::tempdir().unwrap();
    let server = StubServer::start(200, b"definitely not a zip".to_vec()).await;

    let found = composition(home.path())
        .locate_executable_usecase()
        .locate_or_download(&ExecutableOverrides {
            version: Some(VERSION.into()),
            mirror: Some(server.base_url.clone()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn download_goes_through_configured_proxy() {
    let home = tempfile::tempdir().unwrap();
    let proxy = StubServer::start(200, scanner_zip(VERSION, "#!/bin/sh\necho scanner\n")).await;
    let env = StaticEnv::new(home.path())
        .with_home(home.path())
        .with_var("http_proxy", proxy.proxy_url())
        .with_var(ENV_SCANNER_VERSION, VERSION)
        .with_var(ENV_SCANNER_MIRROR, "http://binaries.invalid/dist/");

    let found = AppComposition::with_env(Box::new(env))
        .locate_executable_usecase()
        .locate_or_download(&ExecutableOverrides::default())
        .await
        .unwrap();

    let expected = cached_executable(home.path(), VERSION);
    assert_eq!(found, Some(expected));
    assert_eq!(proxy.hits(), 1);
}

#[tokio::test]
async fn blank_proxy_variable_is_ignored() {
    let home = tempfile::tempdir().unwrap();
    let server = StubServer::start(200, scanner_zip(VERSION, "#!/bin/sh\necho scanner\n")).await;
    let env = StaticEnv::new(home.path())
        .with_home(home.path())
        .with_var("http_proxy", "")
        .with_var(ENV_SCANNER_VERSION, VERSION)
        .with_var(ENV_SCANNER_MIRROR, server.base_url.clone());

    let found = AppComposition::with_env(Box::new(env))
        .locate_executable_usecase()
        .locate_or_download(&ExecutableOverrides::default())
        .await
        .unwrap();

    assert_eq!(found, Some(cached_executable(home.path(), VERSION)));
    assert_eq!(server.hits(), 1);
}

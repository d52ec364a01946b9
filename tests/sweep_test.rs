use filesweep::api::client::SlackClient;
use filesweep::config::Config;
use filesweep::error::{SlackError, SweepError};
use filesweep::output::color::ColorWriter;
use filesweep::sweep;
use mockito::{Matcher, Mock, ServerGuard};
use std::path::Path;
use termcolor::NoColor;

const CHANNELS_BODY: &str = r#"{"ok": true, "channels": [
    {"id": "C1", "name": "general", "is_channel": true, "is_private": false, "is_archived": false, "purpose": {"value": "Company wide"}},
    {"id": "C2", "name": "secret", "is_channel": true, "is_private": true, "is_archived": false},
    {"id": "C9", "name": "reports", "is_channel": true, "is_private": false, "is_archived": false}
]}"#;

const USERS_BODY: &str = r#"{"ok": true, "members": [{"id": "U1", "name": "alice"}]}"#;

fn config(server: &ServerGuard, root: &Path, dry_run: bool, target: &str) -> Config {
    Config {
        admin_token: "xoxp-admin".to_string(),
        post_token: "xoxb-post".to_string(),
        target_channel: target.to_string(),
        max_age_secs: 86400,
        download_root: root.to_path_buf(),
        report_channel: "reports".to_string(),
        api_url: server.url(),
        dry_run,
        all_channels: target.is_empty(),
    }
}

fn clients(config: &Config) -> (SlackClient, SlackClient) {
    (
        SlackClient::with_base_url(&config.api_url, &config.admin_token).unwrap(),
        SlackClient::with_base_url(&config.api_url, &config.post_token).unwrap(),
    )
}

fn console() -> ColorWriter<NoColor<Vec<u8>>> {
    ColorWriter::new(NoColor::new(Vec::new()))
}

fn console_text(console: ColorWriter<NoColor<Vec<u8>>>) -> String {
    String::from_utf8(console.into_inner().into_inner()).unwrap()
}

async fn json_mock(server: &mut ServerGuard, path: &str, query: Matcher, body: &str) -> Mock {
    server
        .mock("GET", path)
        .match_query(query)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn listing_mocks(server: &mut ServerGuard) -> (Mock, Mock) {
    let channels = json_mock(server, "/conversations.list", Matcher::Any, CHANNELS_BODY).await;
    let users = json_mock(server, "/users.list", Matcher::Any, USERS_BODY).await;
    (channels, users)
}

async fn files_list_mock(server: &mut ServerGuard, channel: &str, body: &str) -> Mock {
    json_mock(
        server,
        "/files.list",
        Matcher::UrlEncoded("channel".into(), channel.into()),
        body,
    )
    .await
}

fn general_files_body() -> String {
    r#"{"ok": true, "files": [
        {"id": "F1", "name": "doc.pdf", "title": "Report Q3!!", "user": "U1", "timestamp": 1600000000},
        {"id": "F2", "name": "chart.png", "title": "Chart", "user": "U404", "timestamp": 1600000000, "initial_comment": {"comment": "see\nthis"}},
        {"id": "F3", "name": "future.txt", "title": "Future", "user": "U1", "timestamp": 4102444800}
    ]}"#
    .to_string()
}

async fn file_content_mocks(server: &mut ServerGuard, id: &str, content: &[u8], hits: usize) -> (Mock, Mock) {
    let info_body = format!(
        r#"{{"ok": true, "file": {{"id": "{id}", "url_private_download": "{}/download/{id}"}}}}"#,
        server.url()
    );
    let info = server
        .mock("GET", "/files.info")
        .match_query(Matcher::UrlEncoded("file".into(), id.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(info_body)
        .expect(hits)
        .create_async()
        .await;
    let download = server
        .mock("GET", format!("/download/{}", id).as_str())
        .match_header("authorization", "Bearer xoxp-admin")
        .with_status(200)
        .with_body(content)
        .expect(hits)
        .create_async()
        .await;
    (info, download)
}

async fn delete_mock(server: &mut ServerGuard, id: &str, hits: usize) -> Mock {
    server
        .mock("GET", "/files.delete")
        .match_query(Matcher::UrlEncoded("file".into(), id.into()))
        .match_header("authorization", "Bearer xoxp-admin")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true}"#)
        .expect(hits)
        .create_async()
        .await
}

async fn upload_mock(server: &mut ServerGuard, hits: usize) -> Mock {
    server
        .mock("POST", "/files.upload")
        .match_header("authorization", "Bearer xoxb-post")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("channels".into(), "C9".into()),
            Matcher::UrlEncoded("filetype".into(), "text".into()),
            Matcher::UrlEncoded("title".into(), "Filesweep report".into()),
        ]))
        .match_body(Matcher::Regex("content=".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true, "file": {"id": "FREPORT", "name": "report.txt"}}"#)
        .expect(hits)
        .create_async()
        .await
}

#[tokio::test]
async fn test_full_run_archives_and_deletes() {
    let mut server = mockito::Server::new_async().await;
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("archive");
    let config = config(&server, &root, false, "");
    let (admin, poster) = clients(&config);

    let _listing = listing_mocks(&mut server).await;
    let _general = files_list_mock(&mut server, "C1", &general_files_body()).await;
    let _reports = files_list_mock(&mut server, "C9", r#"{"ok": true, "files": []}"#).await;
    let _f1 = file_content_mocks(&mut server, "F1", b"%PDF-1.4", 1).await;
    let _f2 = file_content_mocks(&mut server, "F2", b"\x89PNG", 1).await;
    let delete_f1 = delete_mock(&mut server, "F1", 1).await;
    let delete_f2 = delete_mock(&mut server, "F2", 1).await;
    let delete_f3 = delete_mock(&mut server, "F3", 0).await;
    let upload = upload_mock(&mut server, 1).await;

    let mut out = console();
    let summary = sweep::run(&config, &admin, &poster, &mut out).await.unwrap();

    assert_eq!(summary.total, 2);
    assert_eq!(
        summary.channels,
        vec![("general".to_string(), 2), ("reports".to_string(), 0)]
    );
    assert_eq!(summary.report_file_id, "FREPORT");

    let general = root.join("general");
    assert_eq!(
        std::fs::read(general.join("20200913122640-F1-alice-Report_Q3!-doc.pdf")).unwrap(),
        b"%PDF-1.4"
    );
    assert_eq!(
        std::fs::read(general.join("20200913122640-F2-U404-Chart-see_this-chart.png")).unwrap(),
        b"\x89PNG"
    );
    assert!(root.join("reports").is_dir());
    assert!(!root.join("secret").exists());

    delete_f1.assert_async().await;
    delete_f2.assert_async().await;
    delete_f3.assert_async().await;
    upload.assert_async().await;

    let text = console_text(out);
    assert!(text.contains("in #general"));
    assert!(text.contains("in #reports"));
    assert!(text.contains("All channel"));
    assert!(!text.contains("Dry run"));
    assert!(text.trim_end().ends_with("done"));
}

#[tokio::test]
async fn test_dry_run_has_no_side_effects() {
    let mut server = mockito::Server::new_async().await;
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("archive");
    let config = config(&server, &root, true, "");
    let (admin, poster) = clients(&config);

    let _listing = listing_mocks(&mut server).await;
    let _general = files_list_mock(&mut server, "C1", &general_files_body()).await;
    let _reports = files_list_mock(&mut server, "C9", r#"{"ok": true, "files": []}"#).await;
    let (info_f1, download_f1) = file_content_mocks(&mut server, "F1", b"x", 0).await;
    let delete_f1 = delete_mock(&mut server, "F1", 0).await;
    let delete_f2 = delete_mock(&mut server, "F2", 0).await;
    let upload = upload_mock(&mut server, 1).await;

    let mut out = console();
    let summary = sweep::run(&config, &admin, &poster, &mut out).await.unwrap();

    assert_eq!(summary.total, 2);
    assert!(!root.exists());

    info_f1.assert_async().await;
    download_f1.assert_async().await;
    delete_f1.assert_async().await;
    delete_f2.assert_async().await;
    upload.assert_async().await;

    let text = console_text(out);
    assert!(text.contains("Dry run"));
    assert!(text.contains("20200913122640-F1-alice-Report_Q3!-doc.pdf"));
}

#[tokio::test]
async fn test_named_channel_only_visits_that_channel() {
    let mut server = mockito::Server::new_async().await;
    let tmp = tempfile::tempdir().unwrap();
    let config = config(&server, tmp.path(), true, "secret");
    let (admin, poster) = clients(&config);

    let _listing = listing_mocks(&mut server).await;
    let secret = files_list_mock(&mut server, "C2", r#"{"ok": true, "files": []}"#).await;
    let general = server
        .mock("GET", "/files.list")
        .match_query(Matcher::UrlEncoded("channel".into(), "C1".into()))
        .expect(0)
        .create_async()
        .await;
    let _upload = upload_mock(&mut server, 1).await;

    let mut out = console();
    let summary = sweep::run(&config, &admin, &poster, &mut out).await.unwrap();

    assert_eq!(summary.channels, vec![("secret".to_string(), 0)]);
    assert_eq!(summary.total, 0);
    secret.assert_async().await;
    general.assert_async().await;
}

#[tokio::test]
async fn test_missing_report_channel_aborts_before_upload() {
    let mut server = mockito::Server::new_async().await;
    let tmp = tempfile::tempdir().unwrap();
    let mut config = config(&server, tmp.path(), true, "general");
    config.report_channel = "nowhere".to_string();
    let (admin, poster) = clients(&config);

    let _listing = listing_mocks(&mut server).await;
    let _general = files_list_mock(&mut server, "C1", r#"{"ok": true, "files": []}"#).await;
    let upload = upload_mock(&mut server, 0).await;

    let mut out = console();
    let err = sweep::run(&config, &admin, &poster, &mut out).await.unwrap_err();

    assert!(matches!(err, SweepError::ReportChannelNotFound(ref name) if name == "nowhere"));
    upload.assert_async().await;
}

#[tokio::test]
async fn test_api_error_aborts_run_without_report() {
    let mut server = mockito::Server::new_async().await;
    let tmp = tempfile::tempdir().unwrap();
    let config = config(&server, tmp.path(), false, "general");
    let (admin, poster) = clients(&config);

    let _listing = listing_mocks(&mut server).await;
    let _general = files_list_mock(&mut server, "C1", &general_files_body()).await;
    let _f1 = file_content_mocks(&mut server, "F1", b"data", 1).await;
    let _delete = json_mock(
        &mut server,
        "/files.delete",
        Matcher::Any,
        r#"{"ok": false, "error": "cant_delete_file"}"#,
    )
    .await;
    let upload = upload_mock(&mut server, 0).await;

    let mut out = console();
    let err = sweep::run(&config, &admin, &poster, &mut out).await.unwrap_err();

    match err {
        SweepError::Slack(SlackError::Api { code, endpoint, .. }) => {
            assert_eq!(code, "cant_delete_file");
            assert_eq!(endpoint, "files.delete");
        }
        other => panic!("expected Slack API error, got {:?}", other),
    }
    upload.assert_async().await;
}

#[tokio::test]
async fn test_unwritable_download_root_aborts_run_without_report() {
    let mut server = mockito::Server::new_async().await;
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("not-a-directory");
    std::fs::write(&root, b"occupied").unwrap();
    let config = config(&server, &root, false, "general");
    let (admin, poster) = clients(&config);

    let _listing = listing_mocks(&mut server).await;
    let _general = files_list_mock(&mut server, "C1", &general_files_body()).await;
    let delete_f1 = delete_mock(&mut server, "F1", 0).await;
    let upload = upload_mock(&mut server, 0).await;

    let mut out = console();
    let err = sweep::run(&config, &admin, &poster, &mut out).await.unwrap_err();

    match err {
        SweepError::Filesystem { path, .. } => assert_eq!(path, root.join("general")),
        other => panic!("expected filesystem error, got {:?}", other),
    }
    delete_f1.assert_async().await;
    upload.assert_async().await;
}

//! Integration tests for [`NyaaClient`]: magnet extraction and torrent
//! file downloads against a wiremock server.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use anifetch::{AnifetchError, MagnetResolver, NyaaClient};

const VIEW_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div class="panel-footer clearfix">
    <a href="/download/1234.torrent"><i class="fa fa-download fa-fw"></i>Download Torrent</a> or
    <a class="card-footer-item" href="magnet:?xt=urn:btih:0123456789abcdef&amp;dn=%5BGroup%5D%20Show%20-%2001&amp;tr=udp%3A%2F%2Ftracker"><i class="fa fa-magnet fa-fw"></i>Magnet</a>
  </div>
</body>
</html>"#;

#[tokio::test]
async fn extracts_magnet_from_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/view/1234"))
        .respond_with(ResponseTemplate::new(200).set_body_string(VIEW_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let client = NyaaClient::new().unwrap();
    let magnet = client
        .fetch_magnet(&format!("{}/view/1234", server.uri()))
        .await
        .unwrap();

    assert_eq!(
        magnet,
        "magnet:?xt=urn:btih:0123456789abcdef&dn=%5BGroup%5D%20Show%20-%2001&tr=udp%3A%2F%2Ftracker"
    );
}

#[tokio::test]
async fn resolver_trait_delegates_to_fetch_magnet() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/view/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href='magnet:?xt=urn:btih:ff'>m</a>"#),
        )
        .mount(&server)
        .await;

    let client = NyaaClient::new().unwrap();
    let resolver: &dyn MagnetResolver = &client;
    let magnet = resolver
        .resolve_magnet(&format!("{}/view/1", server.uri()))
        .await
        .unwrap();
    assert_eq!(magnet, "magnet:?xt=urn:btih:ff");
    assert_eq!(resolver.name(), "nyaa");
}

#[tokio::test]
async fn page_without_magnet_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/view/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>removed</html>"))
        .mount(&server)
        .await;

    let client = NyaaClient::new().unwrap();
    let err = client
        .fetch_magnet(&format!("{}/view/2", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, AnifetchError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn missing_page_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = NyaaClient::new().unwrap();
    let err = client
        .fetch_magnet(&format!("{}/view/3", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, AnifetchError::NotFound { status: 404 }));
}

#[tokio::test]
async fn invalid_url_is_rejected_without_request() {
    let client = NyaaClient::new().unwrap();
    let err = client.fetch_magnet("not a url").await.unwrap_err();
    assert!(matches!(err, AnifetchError::InvalidInput(_)));
}

#[tokio::test]
async fn downloads_torrent_file_named_after_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/1234.torrent"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"d8:announce0:e".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("nested").join("torrents");
    let client = NyaaClient::new().unwrap();

    let written = client
        .download_torrent_file(&format!("{}/download/1234.torrent", server.uri()), &dest)
        .await
        .unwrap();

    assert_eq!(written, dest.join("1234.torrent"));
    assert_eq!(std::fs::read(&written).unwrap(), b"d8:announce0:e");
}

#[tokio::test]
async fn failed_download_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = NyaaClient::new().unwrap();
    let err = client
        .download_torrent_file(&format!("{}/download/9.torrent", server.uri()), dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, AnifetchError::NotFound { status: 403 }));
    assert!(!dir.path().join("9.torrent").exists());
}

#![cfg(feature = "extract")]

use equity_core::extract::ExtractionClient;
use equity_core::sample::sample_document;
use equity_core::session::{Session, UploadState};
use equity_core::upload::UploadFile;
use equity_core::{EquityEditor, EquityError, Year};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use url::Url;

// ===========================================================================
// Throwaway endpoint
// ===========================================================================

/// Accept one connection, read the full request, answer with `status` and `body`.
async fn serve_once(status: &'static str, body: String) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&request).into_owned()
    });
    let url = Url::parse(&format!("http://{addr}/extract")).unwrap();
    (url, handle)
}

async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if request_complete(&buf) {
            break;
        }
    }
    buf
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let body = &buf[header_end + 4..];
    let content_length = head
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok());
    match content_length {
        Some(len) => body.len() >= len,
        None if head.contains("transfer-encoding: chunked") => body.ends_with(b"0\r\n\r\n"),
        None => true,
    }
}

fn client(url: Url) -> ExtractionClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    ExtractionClient::with_client(http, url)
}

fn pdf() -> UploadFile {
    UploadFile::pdf("q4.pdf", b"%PDF-1.7\nfake statement\n%%EOF".to_vec())
}

fn session_for(url: Url) -> Session {
    let mut session = Session::new(EquityEditor::sample(), url);
    session.select_file(pdf()).unwrap();
    session
}

// ===========================================================================
// Client
// ===========================================================================

#[tokio::test]
async fn test_request_shape() {
    let (url, server) = serve_once("200 OK", sample_document().to_string()).await;
    let doc = client(url).extract(&pdf()).await.unwrap();
    assert_eq!(doc, sample_document());

    let request = server.await.unwrap();
    let lower = request.to_ascii_lowercase();
    assert!(request.starts_with("POST /extract "));
    assert!(lower.contains("ngrok-skip-browser-warning: true"));
    assert!(lower.contains("content-type: multipart/form-data"));
    assert!(request.contains("name=\"file\""));
    assert!(request.contains("filename=\"q4.pdf\""));
    assert!(lower.contains("content-type: application/pdf"));
}

#[tokio::test]
async fn test_tunnel_header_can_be_disabled() {
    let (url, server) = serve_once("200 OK", sample_document().to_string()).await;
    client(url)
        .skip_browser_warning(false)
        .extract(&pdf())
        .await
        .unwrap();
    let request = server.await.unwrap().to_ascii_lowercase();
    assert!(!request.contains("ngrok-skip-browser-warning"));
}

#[tokio::test]
async fn test_non_2xx_carries_status() {
    let (url, _server) = serve_once("503 Service Unavailable", String::new()).await;
    let err = client(url).extract(&pdf()).await.unwrap_err();
    assert!(matches!(err, EquityError::Transport { .. }));
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_non_json_body_is_transport_error() {
    let (url, _server) = serve_once("200 OK", "<html>tunnel warning</html>".into()).await;
    let err = client(url).extract(&pdf()).await.unwrap_err();
    assert!(matches!(err, EquityError::Transport { status: Some(200), .. }));
}

#[tokio::test]
async fn test_unreachable_endpoint_has_no_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let url = Url::parse(&format!("http://{addr}/extract")).unwrap();
    let err = client(url).extract(&pdf()).await.unwrap_err();
    assert!(matches!(err, EquityError::Transport { status: None, .. }));
}

#[tokio::test]
async fn test_non_pdf_never_reaches_network() {
    // nothing listens here; a network attempt would be a transport error instead
    let url = Url::parse("http://127.0.0.1:9/extract").unwrap();
    let file = UploadFile::new("a.txt", "text/plain", b"hi".to_vec());
    let err = client(url).extract(&file).await.unwrap_err();
    assert!(matches!(err, EquityError::InputValidation { .. }));
}

// ===========================================================================
// Session
// ===========================================================================

#[tokio::test]
async fn test_server_error_leaves_document_intact() {
    let (url, _server) = serve_once("500 Internal Server Error", String::new()).await;
    let mut session = session_for(url.clone());
    session
        .edit("equity_components.paid_up_capital", Year::Current, 1i64.into())
        .unwrap();
    let before = session.editor().snapshot();
    let notices_before = session.notices().len();

    let err = session.upload_with(&client(url)).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(*session.editor().snapshot(), *before);
    assert_eq!(session.editor().history().len(), 1);
    assert_eq!(session.notices().len(), notices_before + 1);
    let notice = session.last_notice().unwrap();
    assert!(notice.is_error());
    assert!(notice.detail.as_deref().unwrap_or_default().contains("500"));
    assert_eq!(session.upload_state(), UploadState::Ready);
    assert!(session.selected_file().is_some());
}

#[tokio::test]
async fn test_successful_upload_replaces_document() {
    let mut extracted = sample_document();
    extracted["metadata"]["company_name"] = json!("Other Co");
    let (url, _server) = serve_once("200 OK", extracted.to_string()).await;
    let mut session = session_for(url.clone());
    session
        .edit("equity_components.paid_up_capital", Year::Current, 1i64.into())
        .unwrap();

    session.upload_with(&client(url)).await.unwrap();

    assert_eq!(session.editor().document(), &extracted);
    assert!(!session.editor().has_pending_edits());
    assert!(session.editor().history().is_empty());
    assert_eq!(session.upload_state(), UploadState::Idle);
    assert!(session.selected_file().is_none());
    assert!(!session.last_notice().unwrap().is_error());
}

#[tokio::test]
async fn test_wrong_shape_is_rejected() {
    let (url, _server) = serve_once("200 OK", json!({ "pages": 3 }).to_string()).await;
    let mut session = session_for(url.clone());
    let before = session.editor().snapshot();

    let err = session.upload_with(&client(url)).await.unwrap_err();

    assert!(matches!(err, EquityError::Schema(_)));
    assert_eq!(*session.editor().snapshot(), *before);
    assert_eq!(session.upload_state(), UploadState::Ready);
}

#[tokio::test]
async fn test_upload_without_file() {
    let url = Url::parse("http://127.0.0.1:9/extract").unwrap();
    let mut session = Session::new(EquityEditor::sample(), url.clone());
    let err = session.upload_with(&client(url)).await.unwrap_err();
    assert!(matches!(err, EquityError::InputValidation { .. }));
    assert!(session.notices().is_empty());
}

//! Storage backend operations and their HTTP implementation

use std::time::Duration;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use sdash_core::prelude::*;
use sdash_core::{
    ClusterSnapshot, FileRecord, HealthReport, LogEntry, Mode, NodeRecord, ProductionStats,
    RedistributeReport, SecureStats, StorageStats, UploadReceipt,
};

use crate::auth::{LoginOutcome, LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::decode::{decode_list, decode_object, error_message};
use crate::endpoints::Endpoints;

/// Default request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Operations against the storage backend.
///
/// Every call is a single attempt. Non-2xx responses become
/// [`Error::Server`] carrying the server's `error`/`message` text when the
/// body has one. `token` is sent as a bearer credential when present.
#[trait_variant::make(StorageApi: Send)]
pub trait LocalStorageApi {
    /// `GET {mode}/files`
    async fn list_files(&self, mode: Mode, token: Option<&str>) -> Result<Vec<FileRecord>>;

    /// `GET {mode}/nodes`
    async fn list_nodes(&self, mode: Mode) -> Result<Vec<NodeRecord>>;

    /// Totals derived from the mode's file and node lists
    async fn storage_stats(&self, mode: Mode) -> Result<StorageStats>;

    /// Master/slave breakdown derived from the production file and node lists
    async fn production_stats(&self) -> Result<ProductionStats>;

    /// `GET production/cluster`
    async fn cluster(&self) -> Result<ClusterSnapshot>;

    /// `GET production/logs`
    async fn logs(&self) -> Result<Vec<LogEntry>>;

    /// `GET secure/stats`
    async fn secure_stats(&self, token: Option<&str>) -> Result<SecureStats>;

    /// `POST {mode}/upload` with one multipart `file` field
    async fn upload(
        &self,
        mode: Mode,
        filename: &str,
        data: Vec<u8>,
        token: Option<&str>,
    ) -> Result<UploadReceipt>;

    /// Resource URL of `GET {mode}/download/{id}`
    fn download_url(&self, mode: Mode, file_id: &str) -> String;

    /// Fetch the bytes behind [`LocalStorageApi::download_url`]
    async fn download(&self, mode: Mode, file_id: &str, token: Option<&str>) -> Result<Bytes>;

    /// `POST secure/login`
    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome>;

    /// `POST secure/register`; returns the server's confirmation text
    async fn register(&self, username: &str, password: &str, is_admin: bool) -> Result<String>;

    /// `DELETE secure/delete/{id}`
    async fn delete_file(&self, file_id: &str, token: Option<&str>) -> Result<String>;

    /// `GET distributed/redistribute`
    async fn redistribute(&self) -> Result<RedistributeReport>;

    /// `GET {server}/health`
    async fn health(&self) -> Result<HealthReport>;
}

/// `reqwest`-backed client for one server
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let endpoints = Endpoints::new(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn authorized(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send and turn non-2xx statuses into [`Error::Server`].
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            trace!("{} -> {}", endpoint, status);
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
        debug!("{} -> {}: {}", endpoint, status, message);
        Err(Error::server(status.as_u16(), message))
    }

    async fn json(&self, endpoint: &str, request: RequestBuilder) -> Result<Value> {
        self.send(endpoint, request)
            .await?
            .json::<Value>()
            .await
            .map_err(|e| Error::malformed(endpoint, e.to_string()))
    }

    async fn get_list<T: DeserializeOwned>(&self, url: &str, token: Option<&str>) -> Result<Vec<T>> {
        let value = self
            .json(url, Self::authorized(self.client.get(url), token))
            .await?;
        decode_list(url, value)
    }

    async fn get_object<T: DeserializeOwned>(&self, url: &str, token: Option<&str>) -> Result<T> {
        let value = self
            .json(url, Self::authorized(self.client.get(url), token))
            .await?;
        decode_object(url, value)
    }

    async fn fetch_files(&self, mode: Mode, token: Option<&str>) -> Result<Vec<FileRecord>> {
        self.get_list(&self.endpoints.files(mode), token).await
    }

    async fn fetch_nodes(&self, mode: Mode) -> Result<Vec<NodeRecord>> {
        self.get_list(&self.endpoints.nodes(mode), None).await
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::transport(format!("request timed out: {e}"))
    } else {
        Error::transport(e.to_string())
    }
}

impl StorageApi for HttpApi {
    async fn list_files(&self, mode: Mode, token: Option<&str>) -> Result<Vec<FileRecord>> {
        self.fetch_files(mode, token).await
    }

    async fn list_nodes(&self, mode: Mode) -> Result<Vec<NodeRecord>> {
        self.fetch_nodes(mode).await
    }

    async fn storage_stats(&self, mode: Mode) -> Result<StorageStats> {
        let (files, nodes) = tokio::try_join!(self.fetch_files(mode, None), self.fetch_nodes(mode))?;
        Ok(StorageStats::derive(&files, &nodes))
    }

    async fn production_stats(&self) -> Result<ProductionStats> {
        let (files, nodes) = tokio::try_join!(
            self.fetch_files(Mode::Production, None),
            self.fetch_nodes(Mode::Production)
        )?;
        Ok(ProductionStats::derive(&files, &nodes))
    }

    async fn cluster(&self) -> Result<ClusterSnapshot> {
        let url = self.endpoints.mode_path(Mode::Production, "cluster");
        self.get_object(&url, None).await
    }

    async fn logs(&self) -> Result<Vec<LogEntry>> {
        let url = self.endpoints.mode_path(Mode::Production, "logs");
        self.get_list(&url, None).await
    }

    async fn secure_stats(&self, token: Option<&str>) -> Result<SecureStats> {
        let url = self.endpoints.mode_path(Mode::Secure, "stats");
        self.get_object(&url, token).await
    }

    async fn upload(
        &self,
        mode: Mode,
        filename: &str,
        data: Vec<u8>,
        token: Option<&str>,
    ) -> Result<UploadReceipt> {
        let url = self.endpoints.upload(mode);
        let size = data.len();
        let form = Form::new().part("file", Part::bytes(data).file_name(filename.to_string()));
        let request = Self::authorized(self.client.post(&url), token).multipart(form);

        debug!("Uploading {} ({} bytes) to {}", filename, size, url);
        let value = self.json(&url, request).await?;
        decode_object(&url, value)
    }

    fn download_url(&self, mode: Mode, file_id: &str) -> String {
        self.endpoints.download(mode, file_id)
    }

    async fn download(&self, mode: Mode, file_id: &str, token: Option<&str>) -> Result<Bytes> {
        let url = self.endpoints.download(mode, file_id);
        let request = Self::authorized(self.client.get(&url), token);
        self.send(&url, request)
            .await?
            .bytes()
            .await
            .map_err(transport_error)
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let url = self.endpoints.mode_path(Mode::Secure, "login");
        let request = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password });
        let value = self.json(&url, request).await?;
        decode_object::<LoginResponse>(&url, value)?.into_outcome()
    }

    async fn register(&self, username: &str, password: &str, is_admin: bool) -> Result<String> {
        let url = self.endpoints.mode_path(Mode::Secure, "register");
        let request = self.client.post(&url).json(&RegisterRequest {
            username,
            password,
            is_admin,
        });
        let value = self.json(&url, request).await?;
        let response: MessageResponse = decode_object(&url, value)?;
        Ok(response
            .message
            .unwrap_or_else(|| "Registration successful".to_string()))
    }

    async fn delete_file(&self, file_id: &str, token: Option<&str>) -> Result<String> {
        let url = self.endpoints.delete(Mode::Secure, file_id);
        let request = Self::authorized(self.client.delete(&url), token);
        let value = self.json(&url, request).await?;
        let response: MessageResponse = decode_object(&url, value)?;
        Ok(response
            .message
            .unwrap_or_else(|| "File deleted".to_string()))
    }

    async fn redistribute(&self) -> Result<RedistributeReport> {
        let url = self.endpoints.mode_path(Mode::Distributed, "redistribute");
        self.get_object(&url, None).await
    }

    async fn health(&self) -> Result<HealthReport> {
        self.get_object(&self.endpoints.health(), None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_base_url() {
        assert!(matches!(
            HttpApi::new("no-scheme"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_download_url_uses_mode_namespace() {
        let api = HttpApi::new("http://localhost:8080/").unwrap();
        assert_eq!(
            StorageApi::download_url(&api, Mode::Distributed, "abc"),
            "http://localhost:8080/distributed/download/abc"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) on loopback is closed in test environments.
        let api = HttpApi::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = StorageApi::list_files(&api, Mode::Simple, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
        assert!(err.is_recoverable());
    }

    // ─────────────────────────────────────────────────────────
    // Loopback server with one canned response
    // ─────────────────────────────────────────────────────────

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Serve a single request with `status` and a JSON `body`.
    ///
    /// The handle yields the raw request as received.
    async fn serve_once(status: u16, body: &'static str) -> (HttpApi, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
            request
        });

        // Loopback only; keep proxy environment variables out of the way
        let api = HttpApi {
            client: Client::builder()
                .no_proxy()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap(),
            endpoints: Endpoints::new(&format!("http://{addr}")).unwrap(),
        };
        (api, handle)
    }

    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        while !request_complete(&buf) {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn request_complete(buf: &[u8]) -> bool {
        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let body = &buf[end + 4..];

        if head.contains("transfer-encoding: chunked") {
            return body.ends_with(b"0\r\n\r\n");
        }
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        body.len() >= length
    }

    #[tokio::test]
    async fn test_server_error_carries_body_error_text() {
        let (api, server) = serve_once(500, r#"{"error": "Storage node unavailable"}"#).await;

        let err = StorageApi::list_files(&api, Mode::Simple, None)
            .await
            .unwrap_err();
        match err {
            Error::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Storage node unavailable");
            }
            other => panic!("expected server error, got {other:?}"),
        }
        assert!(server.await.unwrap().starts_with("GET /simple/files "));
    }

    #[tokio::test]
    async fn test_server_error_falls_back_to_message_field() {
        let (api, _server) = serve_once(404, r#"{"message": "File not found"}"#).await;

        let err = StorageApi::download(&api, Mode::Distributed, "f9", None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Server { status: 404, ref message } if message == "File not found"
        ));
    }

    #[tokio::test]
    async fn test_object_where_list_expected_is_malformed() {
        let (api, _server) = serve_once(200, r#"{"error": "Invalid mode"}"#).await;

        let err = StorageApi::list_nodes(&api, Mode::Distributed)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_secure_calls_send_bearer_token() {
        let (api, server) = serve_once(200, "[]").await;

        let files = StorageApi::list_files(&api, Mode::Secure, Some("tok-123"))
            .await
            .unwrap();
        assert!(files.is_empty());

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /secure/files "));
        assert!(request
            .to_ascii_lowercase()
            .contains("authorization: bearer tok-123"));
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_file_field() {
        let (api, server) =
            serve_once(200, r#"{"message": "File uploaded successfully", "file_id": "f7"}"#).await;

        let receipt = StorageApi::upload(
            &api,
            Mode::Simple,
            "notes.txt",
            b"hello storage".to_vec(),
            None,
        )
        .await
        .unwrap();
        assert_eq!(receipt.file_id.as_deref(), Some("f7"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /simple/upload "));
        assert!(request.contains("multipart/form-data"));
        assert!(request.contains(r#"name="file"; filename="notes.txt""#));
        assert!(request.contains("hello storage"));
    }

    #[tokio::test]
    async fn test_login_returns_user_and_token() {
        let (api, server) = serve_once(
            200,
            r#"{"success": true, "token": "t-1", "user": {"username": "alice", "is_admin": true}}"#,
        )
        .await;

        let outcome = StorageApi::login(&api, "alice", "secret").await.unwrap();
        assert_eq!(outcome.user.username, "alice");
        assert!(outcome.user.is_admin);
        assert_eq!(outcome.token.as_deref(), Some("t-1"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /secure/login "));
        assert!(request.contains(r#""username":"alice""#));
    }

    #[tokio::test]
    async fn test_login_rejection_keeps_status() {
        let (api, _server) = serve_once(401, r#"{"error": "Invalid credentials"}"#).await;

        let err = StorageApi::login(&api, "mallory", "guess").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Server { status: 401, ref message } if message == "Invalid credentials"
        ));
    }
}

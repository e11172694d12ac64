//! GitHub REST client
//!
//! ## Authentication
//!
//! Every request carries the configured token as a bearer token. Inside a
//! workflow this is usually `secrets.GITHUB_TOKEN`, which needs
//! `contents: write` to create tags.
//!
//! ## Usage
//!
//! ```ignore
//! use pubtag_github::{GitHubClient, TagHost};
//!
//! let client = GitHubClient::new(&config.github)?;
//! let tags = client.list_tags(100).await?;
//! ```

use async_trait::async_trait;
use pubtag_core::config::GitHubConfig;
use pubtag_core::error::{ConfigError, HostError, PubtagError, Result};
use pubtag_core::types::{Commit, CreatedRef, CreatedTag, NewTag, RepoRef, Tag};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};
use url::Url;

use crate::api::{self, ApiComparison, ApiNewRef, ApiRef, ApiTag, ApiTagObject};
use crate::traits::TagHost;

const API_VERSION: &str = "2022-11-28";

/// GitHub REST API client bound to one repository
pub struct GitHubClient {
    api_url: Url,
    token: String,
    repo: RepoRef,
    client: Client,
}

impl GitHubClient {
    /// Create a client from configuration.
    ///
    /// Fails when the token or repository is missing, or the API URL does
    /// not parse.
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let token = config
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField("GITHUB_TOKEN".to_string()))?;

        let repo = config
            .repository
            .clone()
            .ok_or_else(|| ConfigError::MissingField("repository (GITHUB_REPOSITORY)".to_string()))?;

        let api_url = Url::parse(&config.api_url).map_err(|e| ConfigError::InvalidValue {
            field: "api_url".to_string(),
            message: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .user_agent(concat!("pubtag/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(transport)?;

        Ok(Self {
            api_url,
            token,
            repo,
            client,
        })
    }

    /// `{api_url}/repos/{owner}/{repo}/{segments...}`, each segment
    /// percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidValue {
                field: "api_url".to_string(),
                message: format!("'{}' cannot be used as a base URL", self.api_url),
            })?
            .pop_if_empty()
            .extend(["repos", self.repo.owner.as_str(), self.repo.repo.as_str()])
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            let message = api::error_message(&body);
            debug!(status = status.as_u16(), %message, "request failed");
            let err = if status.as_u16() == 401 {
                HostError::Authentication(message)
            } else {
                HostError::Api {
                    status: status.as_u16(),
                    message,
                }
            };
            return Err(err.into());
        }

        serde_json::from_str(&body).map_err(|e| PubtagError::from(HostError::Decode(e.to_string())))
    }
}

fn transport(err: reqwest::Error) -> HostError {
    HostError::Transport(err.to_string())
}

#[async_trait]
impl TagHost for GitHubClient {
    fn repository(&self) -> &RepoRef {
        &self.repo
    }

    #[instrument(skip(self), fields(repo = %self.repo))]
    async fn list_tags(&self, per_page: u8) -> Result<Vec<Tag>> {
        let mut url = self.endpoint(&["tags"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string());

        let tags: Vec<ApiTag> = self.send(self.client.get(url)).await?;
        debug!(count = tags.len(), "listed tags");
        Ok(tags.into_iter().map(Tag::from).collect())
    }

    #[instrument(skip(self), fields(repo = %self.repo))]
    async fn compare_commits(&self, base: &str, head: &str) -> Result<Vec<Commit>> {
        let basehead = format!("{}...{}", base, head);
        let url = self.endpoint(&["compare", &basehead])?;

        let comparison: ApiComparison = self.send(self.client.get(url)).await?;
        debug!(count = comparison.commits.len(), "compared commits");
        Ok(comparison.commits.into_iter().map(Commit::from).collect())
    }

    #[instrument(skip(self, tag), fields(repo = %self.repo, tag = %tag.tag))]
    async fn create_tag(&self, tag: &NewTag) -> Result<CreatedTag> {
        let url = self.endpoint(&["git", "tags"])?;

        let created: ApiTagObject = self.send(self.client.post(url).json(tag)).await?;
        info!(tag = %created.tag, sha = %created.sha, "created tag object");
        Ok(created.into())
    }

    #[instrument(skip(self), fields(repo = %self.repo))]
    async fn create_ref(&self, ref_name: &str, sha: &str) -> Result<CreatedRef> {
        let url = self.endpoint(&["git", "refs"])?;
        let body = ApiNewRef { ref_name, sha };

        let created: ApiRef = self.send(self.client.post(url).json(&body)).await?;
        info!(reference = %created.ref_name, "created reference");
        Ok(created.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Request as seen by the server
    struct Recorded {
        request_line: String,
        head: String,
        body: String,
    }

    impl Recorded {
        fn json_body(&self) -> serde_json::Value {
            serde_json::from_str(&self.body).unwrap()
        }
    }

    /// Serve one canned response on a local port and record the request
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<Recorded>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let recorded = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            recorded
        });

        (format!("http://{addr}"), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> Recorded {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }

        let text = String::from_utf8(buf).unwrap();
        let (head, body) = text.split_once("\r\n\r\n").unwrap();
        Recorded {
            request_line: head.lines().next().unwrap_or_default().to_string(),
            head: head.to_lowercase(),
            body: body.to_string(),
        }
    }

    fn config(api_url: &str) -> GitHubConfig {
        GitHubConfig {
            api_url: api_url.to_string(),
            token: Some("test-token".to_string()),
            repository: Some(RepoRef::new("octo", "widgets")),
            sha: None,
        }
    }

    #[test]
    fn test_requires_token() {
        let mut cfg = config("https://api.github.com");
        cfg.token = None;
        assert!(matches!(
            GitHubClient::new(&cfg),
            Err(PubtagError::Config(ConfigError::MissingField(_)))
        ));
    }

    #[test]
    fn test_requires_repository() {
        let mut cfg = config("https://api.github.com");
        cfg.repository = None;
        assert!(GitHubClient::new(&cfg).is_err());
    }

    #[test]
    fn test_endpoint() {
        let client = GitHubClient::new(&config("https://api.github.com")).unwrap();
        let url = client.endpoint(&["git", "tags"]).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/octo/widgets/git/tags");
    }

    #[test]
    fn test_endpoint_with_enterprise_prefix() {
        let client = GitHubClient::new(&config("https://ghe.example.com/api/v3/")).unwrap();
        let url = client.endpoint(&["tags"]).unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/repos/octo/widgets/tags");
    }

    #[test]
    fn test_compare_endpoint_encodes_refs() {
        let client = GitHubClient::new(&config("https://api.github.com")).unwrap();
        let url = client.endpoint(&["compare", "release/1.0...main"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/octo/widgets/compare/release%2F1.0...main"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = GitHubClient::new(&config("http://127.0.0.1:9")).unwrap();
        let err = client.list_tags(100).await.unwrap_err();
        assert!(matches!(err, PubtagError::Host(HostError::Transport(_))));
    }

    #[tokio::test]
    async fn test_list_tags_request_and_response() {
        let body = r#"[{"name":"v1.1.0","commit":{"sha":"bbb","url":"x"}},{"name":"v1.0.0","commit":{"sha":"aaa","url":"y"}}]"#;
        let (url, server) = serve_once("200 OK", body).await;
        let client = GitHubClient::new(&config(&url)).unwrap();

        let tags = client.list_tags(100).await.unwrap();
        let recorded = server.await.unwrap();

        assert_eq!(tags, vec![Tag::new("v1.1.0", "bbb"), Tag::new("v1.0.0", "aaa")]);
        assert_eq!(
            recorded.request_line,
            "GET /repos/octo/widgets/tags?per_page=100 HTTP/1.1"
        );
        assert!(recorded.head.contains("authorization: bearer test-token"));
        assert!(recorded.head.contains("accept: application/vnd.github+json"));
        assert!(recorded.head.contains("x-github-api-version: 2022-11-28"));
        assert!(recorded.head.contains("user-agent: pubtag/"));
    }

    #[tokio::test]
    async fn test_compare_commits_request() {
        let body = r#"{"commits":[{"sha":"a1","commit":{"message":"Add login"},"author":{"login":"al"}},{"sha":"b2","commit":{"message":"Fix"},"author":null}]}"#;
        let (url, server) = serve_once("200 OK", body).await;
        let client = GitHubClient::new(&config(&url)).unwrap();

        let commits = client.compare_commits("v1.0.0", "main").await.unwrap();
        let recorded = server.await.unwrap();

        assert_eq!(
            recorded.request_line,
            "GET /repos/octo/widgets/compare/v1.0.0...main HTTP/1.1"
        );
        assert_eq!(commits[0].author_login.as_deref(), Some("al"));
        assert_eq!(commits[1].author_login, None);
    }

    #[tokio::test]
    async fn test_create_tag_unprocessable_uses_api_message() {
        let body = r#"{"message":"Reference already exists","documentation_url":"https://docs.github.com/rest"}"#;
        let (url, server) = serve_once("422 Unprocessable Entity", body).await;
        let client = GitHubClient::new(&config(&url)).unwrap();

        let err = client
            .create_tag(&NewTag::for_commit("v1.2.0", "Version 1.2.0", "c0ffee"))
            .await
            .unwrap_err();
        let recorded = server.await.unwrap();

        assert!(matches!(
            &err,
            PubtagError::Host(HostError::Api { status: 422, message }) if message == "Reference already exists"
        ));
        assert_eq!(err.to_string(), "422 Reference already exists");
        assert_eq!(recorded.request_line, "POST /repos/octo/widgets/git/tags HTTP/1.1");
        assert_eq!(
            recorded.json_body(),
            serde_json::json!({
                "tag": "v1.2.0",
                "message": "Version 1.2.0",
                "object": "c0ffee",
                "type": "commit"
            })
        );
    }

    #[tokio::test]
    async fn test_unauthorized_is_authentication_error() {
        let (url, server) = serve_once("401 Unauthorized", r#"{"message":"Bad credentials"}"#).await;
        let client = GitHubClient::new(&config(&url)).unwrap();

        let err = client.list_tags(100).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(
            err,
            PubtagError::Host(HostError::Authentication(ref m)) if m == "Bad credentials"
        ));
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept() {
        let (url, server) = serve_once("502 Bad Gateway", "upstream down").await;
        let client = GitHubClient::new(&config(&url)).unwrap();

        let err = client.list_tags(100).await.unwrap_err();
        server.await.unwrap();

        assert_eq!(err.to_string(), "502 upstream down");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let (url, server) = serve_once("200 OK", r#"{"tags": "#).await;
        let client = GitHubClient::new(&config(&url)).unwrap();

        let err = client.list_tags(100).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, PubtagError::Host(HostError::Decode(_))));
    }

    #[tokio::test]
    async fn test_create_ref_request_and_response() {
        let body = r#"{"ref":"refs/tags/v1.2.0","url":"https://api.github.com/repos/octo/widgets/git/refs/tags/v1.2.0","object":{"sha":"7a6b5c","type":"tag"}}"#;
        let (url, server) = serve_once("201 Created", body).await;
        let client = GitHubClient::new(&config(&url)).unwrap();

        let created = client.create_ref("refs/tags/v1.2.0", "7a6b5c").await.unwrap();
        let recorded = server.await.unwrap();

        assert_eq!(recorded.request_line, "POST /repos/octo/widgets/git/refs HTTP/1.1");
        assert_eq!(
            recorded.json_body(),
            serde_json::json!({ "ref": "refs/tags/v1.2.0", "sha": "7a6b5c" })
        );
        assert_eq!(created.ref_name, "refs/tags/v1.2.0");
        assert_eq!(created.sha, "7a6b5c");
        assert!(created.url.ends_with("/git/refs/tags/v1.2.0"));
    }
}

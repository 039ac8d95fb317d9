//! HTTP 网关网盘实现：通过 JSON 接口调用外部网关服务。

use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{Provider, ProviderError, ProviderHandle, ProviderResult, QrLoginTicket, UserInfo};
use crate::entry::RawFileRecord;

#[derive(Deserialize, Default)]
#[serde(default)]
struct TicketStatusResponse {
    confirmed: bool,
    user_info: Option<UserInfo>,
    cookies: HashMap<String, String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct UserInfoResponse {
    user_info: Option<UserInfo>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct FileListResponse {
    files: Option<Vec<Value>>,
}

impl FileListResponse {
    // 逐条宽松解析，坏记录以空字段保留
    fn into_records(self) -> Vec<RawFileRecord> {
        self.files
            .unwrap_or_default()
            .into_iter()
            .map(RawFileRecord::from_value)
            .collect()
    }
}

#[derive(Serialize)]
struct CreateFolderRequest<'a> {
    parent_id: &'a str,
    name: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CreateFolderResponse {
    folder_id: Option<String>,
}

/// Provider backed by an HTTP gateway at `base_url`.
#[derive(Clone, Debug)]
pub struct GatewayProvider {
    client: Client,
    base_url: Arc<str>,
}

impl GatewayProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ProviderError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    fn handle(&self, cookies: HashMap<String, String>) -> Arc<dyn ProviderHandle> {
        Arc::new(GatewayHandle {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            cookies: RwLock::new(cookies.into_iter().collect()),
        })
    }
}

#[async_trait]
impl Provider for GatewayProvider {
    async fn connect(&self) -> ProviderResult<Arc<dyn ProviderHandle>> {
        Ok(self.handle(HashMap::new()))
    }

    async fn from_cookies(
        &self,
        cookies: HashMap<String, String>,
    ) -> ProviderResult<Arc<dyn ProviderHandle>> {
        Ok(self.handle(cookies))
    }
}

#[derive(Debug)]
struct GatewayHandle {
    client: Client,
    base_url: Arc<str>,
    cookies: RwLock<BTreeMap<String, String>>,
}

impl GatewayHandle {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn cookie_header(&self) -> Option<String> {
        let cookies = self.cookies.read().await;
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ProviderResult<T> {
        let request = match self.cookie_header().await {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        };
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Transport(err.to_string())
    }
}

#[async_trait]
impl ProviderHandle for GatewayHandle {
    async fn issue_ticket(&self) -> ProviderResult<QrLoginTicket> {
        self.send(self.client.post(self.url("/qrcode/token"))).await
    }

    async fn confirm_ticket(&self, uid: &str) -> ProviderResult<Option<UserInfo>> {
        let status: TicketStatusResponse = self
            .send(
                self.client
                    .get(self.url("/qrcode/status"))
                    .query(&[("uid", uid)]),
            )
            .await?;
        if !status.confirmed {
            debug!(uid, "qr ticket not confirmed yet");
            return Ok(None);
        }
        if !status.cookies.is_empty() {
            info!(cookie_count = status.cookies.len(), "gateway issued session cookies");
            self.cookies.write().await.extend(status.cookies);
        }
        let user = match status.user_info {
            Some(user) => Some(user),
            None => self.user_info().await?,
        };
        match user {
            Some(user) => Ok(Some(user)),
            None => {
                warn!(uid, "gateway confirmed the ticket but returned no user");
                Err(ProviderError::Decode(
                    "confirmed ticket without user info".to_string(),
                ))
            }
        }
    }

    async fn user_info(&self) -> ProviderResult<Option<UserInfo>> {
        match self
            .send::<UserInfoResponse>(self.client.get(self.url("/user")))
            .await
        {
            Ok(response) => Ok(response.user_info),
            Err(ProviderError::Status(code)) if code == StatusCode::UNAUTHORIZED.as_u16() => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn list_directory(&self, cid: &str) -> ProviderResult<Vec<RawFileRecord>> {
        let response: FileListResponse = self
            .send(self.client.get(self.url("/files")).query(&[("cid", cid)]))
            .await?;
        Ok(response.into_records())
    }

    async fn search(&self, keyword: &str) -> ProviderResult<Vec<RawFileRecord>> {
        let response: FileListResponse = self
            .send(
                self.client
                    .get(self.url("/search"))
                    .query(&[("keyword", keyword)]),
            )
            .await?;
        Ok(response.into_records())
    }

    async fn make_directory(&self, parent_id: &str, name: &str) -> ProviderResult<Option<String>> {
        let response: CreateFolderResponse = self
            .send(
                self.client
                    .post(self.url("/folders"))
                    .json(&CreateFolderRequest { parent_id, name }),
            )
            .await?;
        Ok(response.folder_id.filter(|id| !id.is_empty()))
    }
}

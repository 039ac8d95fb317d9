//! Cloud-storage provider port.
//!
//! A [`Provider`] creates authenticated [`ProviderHandle`]s; the handle carries
//! every account-bound call. Two implementations exist and are picked at
//! startup: [`mock::MockProvider`] serves fixed sample data and
//! [`gateway::GatewayProvider`] talks JSON to an HTTP gateway.

pub mod gateway;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::entry::RawFileRecord;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: String,
    pub user_name: String,
}

/// QR login correlation token issued by the provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrLoginTicket {
    #[serde(default)]
    pub uid: String,
    #[serde(rename = "time", default)]
    pub issued_time: String,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(String),
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("invalid provider response: {0}")]
    Decode(String),
    #[error("provider call timed out")]
    Timeout,
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Opens an unauthenticated handle, used to start a QR login.
    async fn connect(&self) -> ProviderResult<Arc<dyn ProviderHandle>>;

    /// Opens a handle authenticated by the given cookies.
    async fn from_cookies(
        &self,
        cookies: HashMap<String, String>,
    ) -> ProviderResult<Arc<dyn ProviderHandle>>;
}

#[async_trait]
pub trait ProviderHandle: Send + Sync {
    async fn issue_ticket(&self) -> ProviderResult<QrLoginTicket>;

    /// Returns the user once the ticket has been confirmed on the phone.
    async fn confirm_ticket(&self, uid: &str) -> ProviderResult<Option<UserInfo>>;

    async fn user_info(&self) -> ProviderResult<Option<UserInfo>>;

    async fn list_directory(&self, cid: &str) -> ProviderResult<Vec<RawFileRecord>>;

    async fn search(&self, keyword: &str) -> ProviderResult<Vec<RawFileRecord>>;

    /// Returns the new folder id, or `None` when the provider created nothing.
    async fn make_directory(&self, parent_id: &str, name: &str) -> ProviderResult<Option<String>>;
}

//! 网盘账号相关的 HTTP 处理器：登录、目录列表、搜索与建目录。

use axum::extract::{Extension, Json, Path};
use axum::response::Json as JsonResponse;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::entry::NormalizedFileEntry;
use crate::error::ApiError;
use crate::provider::UserInfo;
use crate::session::{AccountSession, PollStatus, QrLogin, QrPoll, SessionStatus};

/// Successful response: `success: true` plus the flattened payload.
#[derive(Serialize)]
pub struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(flatten)]
    data: T,
}

type ApiResult<T> = Result<JsonResponse<Envelope<T>>, ApiError>;

fn ok<T>(data: T) -> ApiResult<T> {
    Ok(JsonResponse(Envelope {
        success: true,
        message: None,
        data,
    }))
}

fn ok_with_message<T>(message: &'static str, data: T) -> ApiResult<T> {
    Ok(JsonResponse(Envelope {
        success: true,
        message: Some(message),
        data,
    }))
}

#[derive(Deserialize)]
pub(crate) struct CookieLoginRequest {
    cookie: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct FileListRequest {
    #[serde(default = "default_path")]
    path: String,
    #[serde(default = "default_cid")]
    cid: String,
}

#[derive(Deserialize)]
pub(crate) struct SearchRequest {
    keyword: String,
}

#[derive(Deserialize)]
pub(crate) struct CreateFolderRequest {
    parent_cid: String,
    folder_name: String,
}

fn default_path() -> String {
    "/".to_string()
}

fn default_cid() -> String {
    "0".to_string()
}

#[derive(Serialize)]
pub struct UserPayload {
    user_info: UserInfo,
}

#[derive(Serialize)]
pub struct FileListPayload {
    files: Vec<NormalizedFileEntry>,
    current_path: String,
    current_cid: String,
}

#[derive(Serialize)]
pub struct SearchPayload {
    files: Vec<NormalizedFileEntry>,
    keyword: String,
}

#[derive(Serialize)]
pub struct FolderPayload {
    folder_id: String,
}

#[derive(Serialize)]
pub struct Empty {}

/// 生成登录二维码。
pub async fn generate_qr(
    Extension(session): Extension<Arc<AccountSession>>,
) -> ApiResult<QrLogin> {
    ok(session.begin_qr_login().await?)
}

/// 查询二维码登录状态。
pub async fn check_qr_login(
    Extension(session): Extension<Arc<AccountSession>>,
    Path(uid): Path<String>,
) -> ApiResult<QrPoll> {
    let poll = session.poll_qr_login(&uid).await?;
    match poll.status {
        PollStatus::Success => ok_with_message("login succeeded", poll),
        PollStatus::Waiting => ok_with_message("waiting for confirmation", poll),
    }
}

/// 使用 Cookie 登录。
pub async fn login_cookie(
    Extension(session): Extension<Arc<AccountSession>>,
    Json(payload): Json<CookieLoginRequest>,
) -> ApiResult<UserPayload> {
    let cookie = payload.cookie.unwrap_or_default();
    if cookie.trim().is_empty() {
        return Err(ApiError::BadRequest("cookie is required".into()));
    }
    let user_info = session.login_with_cookie(&cookie).await?;
    ok_with_message("login succeeded", UserPayload { user_info })
}

pub async fn logout(Extension(session): Extension<Arc<AccountSession>>) -> ApiResult<Empty> {
    session.logout().await;
    ok_with_message("logged out", Empty {})
}

/// 当前会话状态与用户信息。
pub async fn session_status(
    Extension(session): Extension<Arc<AccountSession>>,
) -> ApiResult<SessionStatus> {
    ok(session.status().await)
}

/// 列出目录内容。
pub async fn list_files(
    Extension(session): Extension<Arc<AccountSession>>,
    Json(FileListRequest { path, cid }): Json<FileListRequest>,
) -> ApiResult<FileListPayload> {
    let files = session.list_files(&cid).await?;
    info!(path, cid, count = files.len(), "list files");
    ok(FileListPayload {
        files,
        current_path: path,
        current_cid: cid,
    })
}

/// 按关键字搜索文件。
pub async fn search_files(
    Extension(session): Extension<Arc<AccountSession>>,
    Json(SearchRequest { keyword }): Json<SearchRequest>,
) -> ApiResult<SearchPayload> {
    let files = session.search_files(&keyword).await?;
    info!(keyword, count = files.len(), "search files");
    ok(SearchPayload { files, keyword })
}

pub async fn create_folder(
    Extension(session): Extension<Arc<AccountSession>>,
    Json(CreateFolderRequest {
        parent_cid,
        folder_name,
    }): Json<CreateFolderRequest>,
) -> ApiResult<FolderPayload> {
    let folder_id = session.create_folder(&parent_cid, &folder_name).await?;
    ok_with_message("folder created", FolderPayload { folder_id })
}

//! 网盘账号会话：登录状态机与账号相关操作。
//!
//! 登录类操作（二维码、Cookie、登出）持有写锁直到完成，保证状态转换不会交错；
//! 列表、搜索和建目录只在读锁下克隆句柄，随后在锁外调用网盘。

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time;
use tracing::{debug, info, warn};

use crate::entry::{NormalizedFileEntry, normalize_all};
use crate::provider::mock::sample_files;
use crate::provider::{
    Provider, ProviderError, ProviderHandle, ProviderResult, QrLoginTicket, UserInfo,
};
use crate::qr::{QrEncoder, QrError, to_data_uri};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("provider could not issue a login ticket")]
    ProviderUnavailable,
    #[error("qr login has not been started")]
    NotInitialized,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("not logged in")]
    NotLoggedIn,
    #[error("provider did not return a folder id")]
    CreationFailed,
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("failed to render qr code: {0}")]
    QrRender(#[from] QrError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Serve sample data to `list_files` while logged out.
    pub demo_mode: bool,
    pub provider_timeout: Duration,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoginPhase {
    #[default]
    LoggedOut,
    QrIssued {
        ticket: QrLoginTicket,
    },
    LoggedIn {
        user: UserInfo,
        since: DateTime<Utc>,
        /// 通过二维码登录时确认的票据 uid；Cookie 登录为 `None`。
        ticket_uid: Option<String>,
    },
}

impl LoginPhase {
    pub fn name(&self) -> &'static str {
        match self {
            LoginPhase::LoggedOut => "logged_out",
            LoginPhase::QrIssued { .. } => "qr_issued",
            LoginPhase::LoggedIn { .. } => "logged_in",
        }
    }
}

#[derive(Default)]
struct SessionState {
    phase: LoginPhase,
    handle: Option<Arc<dyn ProviderHandle>>,
}

/// 二维码登录票据及其 PNG data URI。
#[derive(Clone, Debug, Serialize)]
pub struct QrLogin {
    pub qrcode: String,
    pub uid: String,
    pub time: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    Waiting,
    Success,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QrPoll {
    pub status: PollStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
}

impl QrPoll {
    fn waiting() -> Self {
        Self {
            status: PollStatus::Waiting,
            user_info: None,
        }
    }

    fn success(user: UserInfo) -> Self {
        Self {
            status: PollStatus::Success,
            user_info: Some(user),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionStatus {
    pub state: &'static str,
    pub is_logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_uid: Option<String>,
}

/// The single provider account this process fronts.
pub struct AccountSession {
    provider: Arc<dyn Provider>,
    qr_encoder: Arc<dyn QrEncoder>,
    options: SessionOptions,
    state: RwLock<SessionState>,
}

impl AccountSession {
    pub fn new(
        provider: Arc<dyn Provider>,
        qr_encoder: Arc<dyn QrEncoder>,
        options: SessionOptions,
    ) -> Self {
        Self {
            provider,
            qr_encoder,
            options,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// 创建新的网盘句柄并申请二维码票据。
    pub async fn begin_qr_login(&self) -> Result<QrLogin, SessionError> {
        let mut state = self.state.write().await;
        let handle = self.call(self.provider.connect()).await?;
        let ticket = self.call(handle.issue_ticket()).await?;
        if ticket.uid.is_empty() {
            warn!("provider returned a ticket without uid");
            return Err(SessionError::ProviderUnavailable);
        }
        let png = self.qr_encoder.encode(&ticket.uid)?;

        info!(uid = %ticket.uid, "qr login ticket issued");
        state.handle = Some(handle);
        state.phase = LoginPhase::QrIssued {
            ticket: ticket.clone(),
        };
        Ok(QrLogin {
            qrcode: to_data_uri(&png),
            uid: ticket.uid,
            time: ticket.issued_time,
        })
    }

    /// 轮询一次二维码确认状态；循环由调用方负责。
    ///
    /// 只接受当前签发（或已确认）的票据 uid，其他 uid 返回 `NotInitialized`。
    pub async fn poll_qr_login(&self, uid: &str) -> Result<QrPoll, SessionError> {
        let mut state = self.state.write().await;
        match &state.phase {
            LoginPhase::LoggedIn {
                user,
                ticket_uid: Some(confirmed),
                ..
            } if confirmed == uid => return Ok(QrPoll::success(user.clone())),
            LoginPhase::QrIssued { ticket } if ticket.uid == uid => {}
            phase => {
                debug!(uid, phase = phase.name(), "poll for a ticket that is not pending");
                return Err(SessionError::NotInitialized);
            }
        }
        let Some(handle) = state.handle.clone() else {
            return Err(SessionError::NotInitialized);
        };

        match self.call(handle.confirm_ticket(uid)).await? {
            Some(user) => {
                info!(user_id = %user.user_id, "qr login confirmed");
                state.phase = LoginPhase::LoggedIn {
                    user: user.clone(),
                    since: Utc::now(),
                    ticket_uid: Some(uid.to_string()),
                };
                Ok(QrPoll::success(user))
            }
            None => Ok(QrPoll::waiting()),
        }
    }

    /// 使用 Cookie 请求头登录。
    pub async fn login_with_cookie(&self, cookie_header: &str) -> Result<UserInfo, SessionError> {
        let cookies = parse_cookie_header(cookie_header);
        let mut state = self.state.write().await;
        let handle = self.call(self.provider.from_cookies(cookies)).await?;
        let Some(user) = self.call(handle.user_info()).await? else {
            warn!("cookie login rejected by provider");
            return Err(SessionError::InvalidCredentials);
        };

        info!(user_id = %user.user_id, "cookie login succeeded");
        state.handle = Some(handle);
        state.phase = LoginPhase::LoggedIn {
            user: user.clone(),
            since: Utc::now(),
            ticket_uid: None,
        };
        Ok(user)
    }

    pub async fn logout(&self) {
        let mut state = self.state.write().await;
        if state.handle.take().is_some() {
            info!(previous = state.phase.name(), "session logged out");
        }
        state.phase = LoginPhase::LoggedOut;
    }

    pub async fn status(&self) -> SessionStatus {
        let state = self.state.read().await;
        let (user_info, logged_in_at, pending_uid) = match &state.phase {
            LoginPhase::LoggedOut => (None, None, None),
            LoginPhase::QrIssued { ticket } => (None, None, Some(ticket.uid.clone())),
            LoginPhase::LoggedIn { user, since, .. } => (Some(user.clone()), Some(*since), None),
        };
        SessionStatus {
            state: state.phase.name(),
            is_logged_in: user_info.is_some(),
            user_info,
            logged_in_at,
            pending_uid,
        }
    }

    /// 列出目录；演示模式下未登录时返回示例数据。
    pub async fn list_files(&self, cid: &str) -> Result<Vec<NormalizedFileEntry>, SessionError> {
        let handle = match self.logged_in_handle().await {
            Ok(handle) => handle,
            Err(SessionError::NotLoggedIn) if self.options.demo_mode => {
                debug!(cid, "demo mode listing");
                return Ok(normalize_all(sample_files(cid)));
            }
            Err(err) => return Err(err),
        };
        let records = self.call(handle.list_directory(cid)).await?;
        Ok(normalize_all(records))
    }

    pub async fn search_files(
        &self,
        keyword: &str,
    ) -> Result<Vec<NormalizedFileEntry>, SessionError> {
        let handle = self.logged_in_handle().await?;
        let records = self.call(handle.search(keyword)).await?;
        Ok(normalize_all(records))
    }

    /// 名称原样交给网盘；网盘未返回目录 id（包括空白名称）即为 `CreationFailed`。
    pub async fn create_folder(&self, parent_id: &str, name: &str) -> Result<String, SessionError> {
        let handle = self.logged_in_handle().await?;
        let Some(folder_id) = self.call(handle.make_directory(parent_id, name)).await? else {
            warn!(parent_id, name, "provider did not create the folder");
            return Err(SessionError::CreationFailed);
        };
        info!(parent_id, name, folder_id = %folder_id, "folder created");
        Ok(folder_id)
    }

    async fn logged_in_handle(&self) -> Result<Arc<dyn ProviderHandle>, SessionError> {
        let state = self.state.read().await;
        match (&state.phase, &state.handle) {
            (LoginPhase::LoggedIn { .. }, Some(handle)) => Ok(handle.clone()),
            _ => Err(SessionError::NotLoggedIn),
        }
    }

    async fn call<T, F>(&self, request: F) -> Result<T, SessionError>
    where
        F: Future<Output = ProviderResult<T>>,
    {
        match time::timeout(self.options.provider_timeout, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                warn!(error = %err, "provider call failed");
                Err(err.into())
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.options.provider_timeout.as_secs_f64(),
                    "provider call timed out"
                );
                Err(ProviderError::Timeout.into())
            }
        }
    }
}

/// 解析 `k=v; k2=v2` 形式的 Cookie；缺少 `=` 或键为空的片段会被跳过。
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for segment in header.split(';').map(str::trim) {
        if segment.is_empty() {
            continue;
        }
        match parse_cookie_segment(segment) {
            Ok((key, value)) => {
                cookies.insert(key.to_string(), value.to_string());
            }
            Err(err) => debug!(error = %err, "skipping cookie segment"),
        }
    }
    cookies
}

fn parse_cookie_segment(segment: &str) -> Result<(&str, &str), SessionError> {
    let (key, value) = segment
        .split_once('=')
        .ok_or_else(|| SessionError::MalformedInput("cookie segment without '='".into()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(SessionError::MalformedInput("cookie segment with empty key".into()));
    }
    Ok((key, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::entry::{EntryKind, RawFileRecord};
    use crate::provider::mock::MockProvider;
    use crate::qr::PngQrEncoder;

    fn options(demo_mode: bool) -> SessionOptions {
        SessionOptions {
            demo_mode,
            provider_timeout: Duration::from_secs(5),
        }
    }

    fn mock_session(confirm_after: u32) -> AccountSession {
        AccountSession::new(
            Arc::new(MockProvider::new(confirm_after)),
            Arc::new(PngQrEncoder),
            options(false),
        )
    }

    /// Provider whose handles answer with fixed values after an optional delay.
    #[derive(Clone, Default)]
    struct StubProvider {
        ticket_uid: String,
        user: Option<UserInfo>,
        folder_id: Option<String>,
        delay: Duration,
        /// Which login path created the handle; listings return it as the only name.
        origin: &'static str,
    }

    #[async_trait]
    impl Provider for StubProvider {
        async fn connect(&self) -> ProviderResult<Arc<dyn ProviderHandle>> {
            Ok(Arc::new(StubProvider {
                origin: "qr",
                ..self.clone()
            }))
        }

        async fn from_cookies(
            &self,
            _cookies: HashMap<String, String>,
        ) -> ProviderResult<Arc<dyn ProviderHandle>> {
            Ok(Arc::new(StubProvider {
                origin: "cookie",
                ..self.clone()
            }))
        }
    }

    #[async_trait]
    impl ProviderHandle for StubProvider {
        async fn issue_ticket(&self) -> ProviderResult<QrLoginTicket> {
            time::sleep(self.delay).await;
            Ok(QrLoginTicket {
                uid: self.ticket_uid.clone(),
                issued_time: String::new(),
            })
        }

        async fn confirm_ticket(&self, _uid: &str) -> ProviderResult<Option<UserInfo>> {
            if self.origin != "qr" {
                return Err(ProviderError::Status(409));
            }
            Ok(self.user.clone())
        }

        async fn user_info(&self) -> ProviderResult<Option<UserInfo>> {
            time::sleep(self.delay).await;
            Ok(self.user.clone())
        }

        async fn list_directory(&self, _cid: &str) -> ProviderResult<Vec<RawFileRecord>> {
            time::sleep(self.delay).await;
            Ok(vec![RawFileRecord {
                name: self.origin.to_string(),
                ..RawFileRecord::default()
            }])
        }

        async fn search(&self, _keyword: &str) -> ProviderResult<Vec<RawFileRecord>> {
            Ok(Vec::new())
        }

        async fn make_directory(
            &self,
            _parent_id: &str,
            _name: &str,
        ) -> ProviderResult<Option<String>> {
            Ok(self.folder_id.clone())
        }
    }

    fn stub_user() -> UserInfo {
        UserInfo {
            user_id: "7".to_string(),
            user_name: "stub".to_string(),
        }
    }

    fn stub_session(stub: StubProvider, timeout: Duration) -> AccountSession {
        AccountSession::new(
            Arc::new(stub),
            Arc::new(PngQrEncoder),
            SessionOptions {
                demo_mode: false,
                provider_timeout: timeout,
            },
        )
    }

    #[test]
    fn parses_cookie_pairs() {
        let cookies = parse_cookie_header("a=1; b=2");
        assert_eq!(
            cookies,
            HashMap::from([
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ])
        );
    }

    #[test]
    fn cookie_value_keeps_everything_after_first_equals() {
        let cookies = parse_cookie_header("token=abc=def;;  =skip; flag; CID = 9 ");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["token"], "abc=def");
        assert_eq!(cookies["CID"], "9");
    }

    #[test]
    fn bad_cookie_segments_are_malformed_input() {
        assert!(matches!(
            parse_cookie_segment("flag"),
            Err(SessionError::MalformedInput(_))
        ));
        assert!(matches!(
            parse_cookie_segment(" =v"),
            Err(SessionError::MalformedInput(_))
        ));
        assert_eq!(parse_cookie_segment("k = v").expect("segment"), ("k", "v"));
    }

    #[test]
    fn garbage_cookie_parses_to_empty_map() {
        assert!(parse_cookie_header("garbage").is_empty());
        assert!(parse_cookie_header("").is_empty());
    }

    #[tokio::test]
    async fn poll_before_begin_is_not_initialized() {
        let session = mock_session(1);
        let result = session.poll_qr_login("anything").await;
        assert!(matches!(result, Err(SessionError::NotInitialized)));
    }

    #[tokio::test]
    async fn qr_login_waits_then_succeeds_once() {
        let session = mock_session(1);
        let login = session.begin_qr_login().await.expect("begin");
        assert!(login.qrcode.starts_with("data:image/png;base64,"));
        let status = session.status().await;
        assert_eq!(status.state, "qr_issued");
        assert_eq!(status.pending_uid.as_deref(), Some(login.uid.as_str()));

        let first = session.poll_qr_login(&login.uid).await.expect("poll");
        assert_eq!(first, QrPoll::waiting());
        assert_eq!(session.status().await.state, "qr_issued");

        let second = session.poll_qr_login(&login.uid).await.expect("poll");
        assert_eq!(second.status, PollStatus::Success);
        assert_eq!(
            second.user_info.map(|user| user.user_id),
            Some("mock_user".to_string())
        );

        let status = session.status().await;
        assert!(status.is_logged_in);
        let since = status.logged_in_at.expect("login time");

        let again = session.poll_qr_login(&login.uid).await.expect("poll");
        assert_eq!(again.status, PollStatus::Success);
        assert_eq!(session.status().await.logged_in_at, Some(since));
    }

    #[tokio::test]
    async fn poll_with_other_uid_is_not_initialized() {
        let session = mock_session(0);
        let login = session.begin_qr_login().await.expect("begin");
        assert!(matches!(
            session.poll_qr_login("someone-else").await,
            Err(SessionError::NotInitialized)
        ));
        assert_eq!(session.status().await.state, "qr_issued");

        let confirmed = session.poll_qr_login(&login.uid).await.expect("poll");
        assert_eq!(confirmed.status, PollStatus::Success);
        assert!(matches!(
            session.poll_qr_login("someone-else").await,
            Err(SessionError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn poll_after_cookie_login_is_not_initialized() {
        let session = mock_session(1);
        session.login_with_cookie("UID=1").await.expect("login");
        assert!(matches!(
            session.poll_qr_login("mock_uid_anything").await,
            Err(SessionError::NotInitialized)
        ));
        assert!(session.status().await.is_logged_in);
    }

    fn racing_stub() -> StubProvider {
        StubProvider {
            ticket_uid: "t-1".to_string(),
            user: Some(stub_user()),
            delay: Duration::from_millis(30),
            ..StubProvider::default()
        }
    }

    // Whichever login commits last, phase and handle must come from the same attempt.
    async fn assert_consistent(session: &AccountSession) {
        let status = session.status().await;
        match status.state {
            "logged_in" => {
                assert_eq!(status.pending_uid, None);
                let files = session.list_files("0").await.expect("list");
                assert_eq!(files[0].name, "cookie");
                assert!(matches!(
                    session.poll_qr_login("t-1").await,
                    Err(SessionError::NotInitialized)
                ));
            }
            "qr_issued" => {
                assert_eq!(status.pending_uid.as_deref(), Some("t-1"));
                assert!(matches!(
                    session.list_files("0").await,
                    Err(SessionError::NotLoggedIn)
                ));
                // confirm_ticket only succeeds on a handle created by the QR path
                let poll = session.poll_qr_login("t-1").await.expect("poll");
                assert_eq!(poll.status, PollStatus::Success);
                let files = session.list_files("0").await.expect("list");
                assert_eq!(files[0].name, "qr");
            }
            other => panic!("unexpected state {other}"),
        }
    }

    #[tokio::test]
    async fn qr_then_cookie_login_do_not_interleave() {
        let session = stub_session(racing_stub(), Duration::from_secs(5));
        let (qr, cookie) = tokio::join!(
            session.begin_qr_login(),
            session.login_with_cookie("a=1")
        );
        assert_eq!(qr.expect("begin").uid, "t-1");
        assert_eq!(cookie.expect("login"), stub_user());
        assert_consistent(&session).await;
    }

    #[tokio::test]
    async fn cookie_then_qr_login_do_not_interleave() {
        let session = stub_session(racing_stub(), Duration::from_secs(5));
        let (cookie, qr) = tokio::join!(
            session.login_with_cookie("a=1"),
            session.begin_qr_login()
        );
        assert_eq!(cookie.expect("login"), stub_user());
        assert_eq!(qr.expect("begin").uid, "t-1");
        assert_consistent(&session).await;
    }

    #[tokio::test]
    async fn ticket_without_uid_is_provider_unavailable() {
        let session = stub_session(StubProvider::default(), Duration::from_secs(5));
        let result = session.begin_qr_login().await;
        assert!(matches!(result, Err(SessionError::ProviderUnavailable)));
        assert_eq!(session.status().await.state, "logged_out");
    }

    #[tokio::test]
    async fn cookie_login_goes_straight_to_logged_in() {
        let session = mock_session(1);
        let user = session.login_with_cookie("UID=1; CID=2").await.expect("login");
        assert_eq!(user.user_name, "测试用户");
        assert_eq!(session.status().await.state, "logged_in");
    }

    #[tokio::test]
    async fn garbage_cookie_is_rejected_by_provider() {
        let session = mock_session(1);
        let result = session.login_with_cookie("garbage").await;
        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
        assert!(!session.status().await.is_logged_in);
    }

    #[tokio::test]
    async fn account_operations_require_login() {
        let session = mock_session(1);
        assert!(matches!(
            session.list_files("0").await,
            Err(SessionError::NotLoggedIn)
        ));
        assert!(matches!(
            session.search_files("电影").await,
            Err(SessionError::NotLoggedIn)
        ));
        assert!(matches!(
            session.create_folder("0", "new").await,
            Err(SessionError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn issued_ticket_does_not_unlock_listing() {
        let session = mock_session(1);
        session.begin_qr_login().await.expect("begin");
        assert!(matches!(
            session.list_files("0").await,
            Err(SessionError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn demo_mode_serves_sample_listing_while_logged_out() {
        let session = AccountSession::new(
            Arc::new(MockProvider::new(1)),
            Arc::new(PngQrEncoder),
            options(true),
        );
        let files = session.list_files("0").await.expect("demo listing");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].size, "1.00 GB");
        assert_eq!(files[1].kind, EntryKind::Folder);
        assert!(matches!(
            session.search_files("x").await,
            Err(SessionError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn logged_in_listing_and_search_are_normalized() {
        let session = mock_session(1);
        session.login_with_cookie("UID=1").await.expect("login");

        let files = session.list_files("0").await.expect("list");
        let names: Vec<_> = files.iter().map(|file| file.name.as_str()).collect();
        assert_eq!(names, ["示例电影.mp4", "电视剧"]);
        assert_eq!(files[1].size, "0 B");

        let found = session.search_files("第01集").await.expect("search");
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_listings_share_the_session() {
        let session = Arc::new(mock_session(1));
        session.login_with_cookie("UID=1").await.expect("login");
        let (root, series) = tokio::join!(session.list_files("0"), session.list_files("1002"));
        assert_eq!(root.expect("root").len(), 2);
        assert_eq!(series.expect("series").len(), 2);
    }

    #[tokio::test]
    async fn create_folder_returns_provider_id() {
        let session = mock_session(1);
        session.login_with_cookie("UID=1").await.expect("login");
        let id = session.create_folder("0", " 纪录片 ").await.expect("create");
        let files = session.list_files("0").await.expect("list");
        assert!(files.iter().any(|file| file.file_id == id && file.name == "纪录片"));

        let result = session.create_folder("0", "   ").await;
        assert!(matches!(result, Err(SessionError::CreationFailed)));
        let result = session.create_folder("0", "").await;
        assert!(matches!(result, Err(SessionError::CreationFailed)));
    }

    #[tokio::test]
    async fn missing_folder_id_is_creation_failed() {
        let stub = StubProvider {
            user: Some(stub_user()),
            ..StubProvider::default()
        };
        let session = stub_session(stub, Duration::from_secs(5));
        session.login_with_cookie("a=1").await.expect("login");
        let result = session.create_folder("0", "new").await;
        assert!(matches!(result, Err(SessionError::CreationFailed)));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let stub = StubProvider {
            user: Some(stub_user()),
            delay: Duration::from_secs(5),
            ..StubProvider::default()
        };
        let session = stub_session(stub, Duration::from_millis(20));
        let result = session.login_with_cookie("a=1").await;
        assert!(matches!(
            result,
            Err(SessionError::Provider(ProviderError::Timeout))
        ));
        assert!(!session.status().await.is_logged_in);
    }

    #[tokio::test]
    async fn logout_returns_to_logged_out() {
        let session = mock_session(1);
        session.login_with_cookie("UID=1").await.expect("login");
        session.logout().await;

        let status = session.status().await;
        assert_eq!(status.state, "logged_out");
        assert!(status.user_info.is_none());
        assert!(matches!(
            session.list_files("0").await,
            Err(SessionError::NotLoggedIn)
        ));
        assert!(matches!(
            session.poll_qr_login("x").await,
            Err(SessionError::NotInitialized)
        ));
    }
}

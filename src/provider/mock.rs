//! 本地模拟网盘：固定示例数据，用于开发与演示。

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::{Provider, ProviderHandle, ProviderResult, QrLoginTicket, UserInfo};
use crate::entry::RawFileRecord;

const ROOT_CID: &str = "0";
const SERIES_CID: &str = "1002";
const SAMPLE_MODIFIED: &str = "2024-01-01 12:00:00";
const FIRST_FOLDER_ID: u64 = 2001;

/// Sample listing for a directory id; unknown ids are empty.
pub fn sample_files(cid: &str) -> Vec<RawFileRecord> {
    match cid {
        ROOT_CID => vec![
            sample_record("示例电影.mp4", false, 1_073_741_824, "1001", ROOT_CID),
            sample_record("电视剧", true, 0, SERIES_CID, ROOT_CID),
        ],
        SERIES_CID => vec![
            sample_record("第01集.mkv", false, 734_003_200, "1003", SERIES_CID),
            sample_record("第01集.srt", false, 48_128, "1004", SERIES_CID),
        ],
        _ => Vec::new(),
    }
}

fn sample_record(
    name: &str,
    is_directory: bool,
    size: u64,
    file_id: &str,
    parent_id: &str,
) -> RawFileRecord {
    RawFileRecord {
        name: name.to_string(),
        is_directory,
        size,
        modified_time: SAMPLE_MODIFIED.to_string(),
        file_id: file_id.to_string(),
        parent_id: parent_id.to_string(),
    }
}

fn mock_user() -> UserInfo {
    UserInfo {
        user_id: "mock_user".to_string(),
        user_name: "测试用户".to_string(),
    }
}

#[derive(Debug)]
struct MockStore {
    confirm_after: u32,
    next_folder_id: AtomicU64,
    created: Mutex<Vec<RawFileRecord>>,
}

/// 模拟网盘。二维码在被轮询 `confirm_after` 次后视为已确认。
#[derive(Clone, Debug)]
pub struct MockProvider {
    store: Arc<MockStore>,
}

impl MockProvider {
    pub fn new(confirm_after: u32) -> Self {
        Self {
            store: Arc::new(MockStore {
                confirm_after,
                next_folder_id: AtomicU64::new(FIRST_FOLDER_ID),
                created: Mutex::new(Vec::new()),
            }),
        }
    }

    fn handle(&self, authenticated: bool) -> Arc<dyn ProviderHandle> {
        Arc::new(MockHandle {
            store: self.store.clone(),
            authenticated: AtomicBool::new(authenticated),
            polls: Mutex::new(HashMap::new()),
        })
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn connect(&self) -> ProviderResult<Arc<dyn ProviderHandle>> {
        Ok(self.handle(false))
    }

    async fn from_cookies(
        &self,
        cookies: HashMap<String, String>,
    ) -> ProviderResult<Arc<dyn ProviderHandle>> {
        debug!(cookie_count = cookies.len(), "mock cookie handle");
        Ok(self.handle(!cookies.is_empty()))
    }
}

#[derive(Debug)]
struct MockHandle {
    store: Arc<MockStore>,
    authenticated: AtomicBool,
    polls: Mutex<HashMap<String, u32>>,
}

impl MockHandle {
    async fn all_records(&self) -> Vec<RawFileRecord> {
        let created = self.store.created.lock().await;
        let mut records = sample_files(ROOT_CID);
        records.extend(sample_files(SERIES_CID));
        records.extend(created.iter().cloned());
        records
    }
}

#[async_trait]
impl ProviderHandle for MockHandle {
    async fn issue_ticket(&self) -> ProviderResult<QrLoginTicket> {
        let uid = format!("mock_uid_{}", Uuid::new_v4().simple());
        self.polls.lock().await.insert(uid.clone(), 0);
        Ok(QrLoginTicket {
            uid,
            issued_time: chrono::Utc::now().timestamp().to_string(),
        })
    }

    async fn confirm_ticket(&self, uid: &str) -> ProviderResult<Option<UserInfo>> {
        let mut polls = self.polls.lock().await;
        let Some(count) = polls.get_mut(uid) else {
            return Ok(None);
        };
        if *count < self.store.confirm_after {
            *count += 1;
            return Ok(None);
        }
        self.authenticated.store(true, Ordering::SeqCst);
        Ok(Some(mock_user()))
    }

    async fn user_info(&self) -> ProviderResult<Option<UserInfo>> {
        if self.authenticated.load(Ordering::SeqCst) {
            Ok(Some(mock_user()))
        } else {
            Ok(None)
        }
    }

    async fn list_directory(&self, cid: &str) -> ProviderResult<Vec<RawFileRecord>> {
        let created = self.store.created.lock().await;
        let mut records = sample_files(cid);
        records.extend(
            created
                .iter()
                .filter(|record| record.parent_id == cid)
                .cloned(),
        );
        Ok(records)
    }

    async fn search(&self, keyword: &str) -> ProviderResult<Vec<RawFileRecord>> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .all_records()
            .await
            .into_iter()
            .filter(|record| record.name.to_lowercase().contains(&keyword))
            .collect())
    }

    async fn make_directory(&self, parent_id: &str, name: &str) -> ProviderResult<Option<String>> {
        if name.trim().is_empty() {
            return Ok(None);
        }
        let folder_id = self
            .store
            .next_folder_id
            .fetch_add(1, Ordering::SeqCst)
            .to_string();
        let mut created = self.store.created.lock().await;
        created.push(RawFileRecord {
            name: name.trim().to_string(),
            is_directory: true,
            size: 0,
            modified_time: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            file_id: folder_id.clone(),
            parent_id: parent_id.to_string(),
        });
        Ok(Some(folder_id))
    }
}

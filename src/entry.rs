//! 网盘原始文件记录到前端展示条目的转换。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::format::format_size;
use crate::icon::{IconCategory, classify};

/// Provider-side file record.
///
/// 字段缺失、为 `null` 或类型不符时都回退为空值，单条坏记录不会影响整个列表。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFileRecord {
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_flag")]
    pub is_directory: bool,
    #[serde(deserialize_with = "lenient_size")]
    pub size: u64,
    #[serde(deserialize_with = "lenient_text")]
    pub modified_time: String,
    #[serde(deserialize_with = "lenient_text")]
    pub file_id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub parent_id: String,
}

impl RawFileRecord {
    /// Decodes one element of a provider listing; anything that is not an
    /// object becomes an empty record.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|err| {
            debug!(error = %err, "unreadable file record, using empty fields");
            Self::default()
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// 前端展示用的文件条目。
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NormalizedFileEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub size: String,
    pub modified: String,
    pub file_id: String,
    pub parent_id: String,
    pub icon_category: IconCategory,
    pub icon: &'static str,
}

/// 转换单条记录：目录固定为 `0 B` 与文件夹图标。
pub fn normalize(record: RawFileRecord) -> NormalizedFileEntry {
    let (kind, size, icon_category) = if record.is_directory {
        (EntryKind::Folder, "0 B".to_string(), IconCategory::Folder)
    } else {
        (
            EntryKind::File,
            format_size(record.size),
            classify(&record.name),
        )
    };

    NormalizedFileEntry {
        name: record.name,
        kind,
        size,
        modified: record.modified_time,
        file_id: record.file_id,
        parent_id: record.parent_id,
        icon_category,
        icon: icon_category.icon_class(),
    }
}

/// 按原顺序转换整个列表。
pub fn normalize_all(records: Vec<RawFileRecord>) -> Vec<NormalizedFileEntry> {
    records.into_iter().map(normalize).collect()
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(text.trim(), "1" | "true" | "TRUE" | "True"),
        _ => false,
    })
}

// Sizes may arrive as integers, floats or numeric strings; negative, null and
// unparseable values become 0.
fn lenient_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_i64().map(|_| 0))
            .or_else(|| number.as_f64().map(size_from_float))
            .unwrap_or(0),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<u64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(size_from_float))
                .unwrap_or(0)
        }
        _ => 0,
    })
}

fn size_from_float(size: f64) -> u64 {
    if size.is_finite() && size > 0.0 {
        // `as` saturates at u64::MAX
        size as u64
    } else {
        0
    }
}

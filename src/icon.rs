//! 按扩展名对文件进行图标分类。

use serde::Serialize;

const VIDEO_EXTS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v"];
const AUDIO_EXTS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg", "wma"];
const IMAGE_EXTS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];
const DOCUMENT_EXTS: &[&str] = &["pdf", "doc", "docx", "txt", "rtf"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconCategory {
    Video,
    Audio,
    Image,
    Document,
    Generic,
    Folder,
}

impl IconCategory {
    /// 前端使用的 Font Awesome 图标类名。
    pub fn icon_class(self) -> &'static str {
        match self {
            IconCategory::Video => "fa-file-video",
            IconCategory::Audio => "fa-file-audio",
            IconCategory::Image => "fa-file-image",
            IconCategory::Document => "fa-file-alt",
            IconCategory::Generic => "fa-file",
            IconCategory::Folder => "fa-folder",
        }
    }
}

/// 根据文件名最后一个扩展名（不区分大小写）判断类别，从不返回 `Folder`。
pub fn classify(filename: &str) -> IconCategory {
    let ext = file_extension(filename);
    let ext = ext.as_str();
    if VIDEO_EXTS.contains(&ext) {
        IconCategory::Video
    } else if AUDIO_EXTS.contains(&ext) {
        IconCategory::Audio
    } else if IMAGE_EXTS.contains(&ext) {
        IconCategory::Image
    } else if DOCUMENT_EXTS.contains(&ext) {
        IconCategory::Document
    } else {
        IconCategory::Generic
    }
}

fn file_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

//! 登录二维码渲染：文本编码为 PNG 并嵌入 data URI。

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;
use thiserror::Error;

const MODULE_PIXELS: u32 = 10;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("qr encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("png encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

pub trait QrEncoder: Send + Sync {
    /// Renders `text` as PNG bytes.
    fn encode(&self, text: &str) -> Result<Vec<u8>, QrError>;
}

/// Black-on-white PNG with a quiet zone around the code.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngQrEncoder;

impl QrEncoder for PngQrEncoder {
    fn encode(&self, text: &str) -> Result<Vec<u8>, QrError> {
        let code = QrCode::new(text.as_bytes())?;
        let image = code
            .render::<Luma<u8>>()
            .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
            .quiet_zone(true)
            .build();
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

/// 将 PNG 字节编码为 `data:image/png;base64,...`。
pub fn to_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png))
}

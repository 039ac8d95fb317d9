//! 内置网页界面：嵌入式静态资源与首页回退。

use axum::body::Body as AxumBody;
use axum::http::{HeaderMap, HeaderValue, Request, header};
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;

use crate::error::ApiError;

const INDEX_PAGE: &str = "index.html";

#[derive(RustEmbed)]
#[folder = "web/"]
struct WebAssets;

/// 静态资源处理器；无扩展名的路径回退到首页。
pub async fn serve_web_ui(req: Request<AxumBody>) -> Result<Response, ApiError> {
    let path = req.uri().path().trim_start_matches('/');
    if path.starts_with("api/") {
        return Err(ApiError::NotFound("no such api route".into()));
    }
    let requested = if path.is_empty() { INDEX_PAGE } else { path };
    if let Some(response) = load_asset(requested)? {
        return Ok(response);
    }
    if !requested.contains('.')
        && let Some(response) = load_asset(INDEX_PAGE)?
    {
        return Ok(response);
    }
    Err(ApiError::NotFound("not found".into()))
}

fn load_asset(path: &str) -> Result<Option<Response>, ApiError> {
    let Some(asset) = WebAssets::get(path) else {
        return Ok(None);
    };
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(mime.essence_str())
            .map_err(|_| ApiError::Internal("invalid mime type".into()))?,
    );
    if path == INDEX_PAGE {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    }
    Ok(Some(
        (headers, AxumBody::from(asset.data.into_owned())).into_response(),
    ))
}

//! 服务信息、健康检查与版本信息处理器。

use axum::response::Json as JsonResponse;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    version: &'static str,
    build_time: &'static str,
    build_env: String,
}

#[derive(Serialize)]
pub struct ServiceInfo {
    message: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
}

pub async fn service_info() -> JsonResponse<ServiceInfo> {
    JsonResponse(ServiceInfo {
        message: "pan-proxy API",
        version: crate::build::PKG_VERSION,
    })
}

pub async fn health_check() -> JsonResponse<Health> {
    JsonResponse(Health { status: "healthy" })
}

/// 返回当前版本信息。
pub async fn get_version_info() -> Result<JsonResponse<VersionInfo>, ApiError> {
    let version_info = VersionInfo {
        version: crate::build::PKG_VERSION,
        build_time: crate::build::BUILD_TIME,
        build_env: format!(
            "{},{}",
            crate::build::RUST_VERSION,
            crate::build::RUST_CHANNEL
        ),
    };
    Ok(JsonResponse(version_info))
}

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, warn};

const MAX_LOGGED_BODY: usize = 1024;

/// 记录每个请求的方法、路径、请求体、状态码和耗时
///
/// 请求体会被完整读入内存再交给后续处理器, 超过 `body_limit` 直接返回 413。
pub async fn log_request(
    State(body_limit): State<usize>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let start_time = Instant::now();

    let method = request.method().clone();
    let uri = request.uri().clone();
    let version = request.version();

    let headers = request
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                value.to_str().unwrap_or("<non-utf8>").to_string(),
            )
        })
        .collect::<Vec<_>>();

    let query_params = uri.query().unwrap_or_default().to_string();

    // 先缓冲请求体用于日志, 再原样放回
    let (parts, body) = request.into_parts();
    let bytes = buffer_body(body, body_limit).await?;
    let body_display = display_body(&bytes);

    let request = Request::from_parts(parts, Body::from(bytes));

    let response = next.run(request).await;

    let duration = start_time.elapsed();

    info!(
        target: "request_logger",
        "REQUEST: {} {} {:?} | Query: {} | Body: {} | Status: {} | Duration: {:?}",
        method,
        uri,
        version,
        query_params,
        body_display,
        response.status().as_u16(),
        duration
    );

    debug!(target: "request_logger", "Headers: {:?}", headers);

    Ok(response)
}

async fn buffer_body(body: Body, limit: usize) -> Result<Bytes, StatusCode> {
    axum::body::to_bytes(body, limit).await.map_err(|err| {
        warn!("Failed to buffer request body: {}", err);
        StatusCode::PAYLOAD_TOO_LARGE
    })
}

fn display_body(bytes: &Bytes) -> String {
    let body_str = String::from_utf8_lossy(bytes);

    // JSON 压成一行, 其他内容截断
    match serde_json::from_str::<Value>(&body_str) {
        Ok(json) => json.to_string(),
        Err(_) if body_str.len() > MAX_LOGGED_BODY => {
            let mut end = MAX_LOGGED_BODY;
            while !body_str.is_char_boundary(end) {
                end -= 1;
            }
            format!("{} [truncated]", &body_str[..end])
        }
        Err(_) => body_str.to_string(),
    }
}

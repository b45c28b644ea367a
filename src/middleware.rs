use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

// -- 请求日志中间件，所有响应统一记为 info；失败细节由处理函数自行记录
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "request",
        method = %method,
        path = %uri,
        status = response.status().as_u16(),
        duration = ?start.elapsed(),
        "request completed"
    );

    response
}

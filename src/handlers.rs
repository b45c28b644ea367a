pub mod users;

// -- 健康检查接口
pub async fn health_check() -> &'static str {
    "OK"
}

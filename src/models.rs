use serde::{Deserialize, Serialize};

// -- 用户文档，`id` 同时作为索引中的文档键
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
}

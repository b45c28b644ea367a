use serde::{Deserialize, Serialize};

use crate::error::RepositoryError;

/// 统一响应信封 -- 所有用户接口都以此结构返回
///
/// `failed` 为真当且仅当查询未命中或发生错误；`data` 只在成功时出现，
/// `error` 只在发生错误时出现。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub failed: bool,
    pub error: Option<ErrorDetail>,
    pub data: Option<T>,
}

impl<T> Default for ServiceResponse<T> {
    fn default() -> Self {
        Self {
            failed: false,
            error: None,
            data: None,
        }
    }
}

impl<T> ServiceResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn not_found() -> Self {
        Self {
            failed: true,
            ..Self::default()
        }
    }

    pub fn error(err: &RepositoryError) -> Self {
        Self {
            failed: true,
            error: Some(ErrorDetail::from(err)),
            data: None,
        }
    }
}

// -- 错误详情：类别加原始错误信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub kind: String,
    pub message: String,
}

impl From<&RepositoryError> for ErrorDetail {
    fn from(err: &RepositoryError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

use thiserror::Error;

// -- 搜索引擎客户端错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("request to the search engine timed out: {0}")]
    Timeout(String),

    #[error("search engine transport failure: {0}")]
    Transport(String),

    #[error("search engine answered {status} ({kind}): {reason}")]
    Server {
        status: u16,
        kind: String,
        reason: String,
    },

    #[error("unreadable search engine response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout(err.to_string())
        } else if err.is_decode() {
            SearchError::Decode(err.to_string())
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}

// -- 仓储层错误，原样透传给处理函数
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository has no search client or no configuration")]
    NotConfigured,

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("user document could not be converted: {0}")]
    Document(#[from] serde_json::Error),
}

impl RepositoryError {
    /// 错误类别，写入响应信封的 `error.kind`
    pub fn kind(&self) -> &'static str {
        match self {
            RepositoryError::NotConfigured => "not_configured",
            RepositoryError::Search(SearchError::Timeout(_)) => "timeout",
            RepositoryError::Search(SearchError::Transport(_)) => "transport",
            RepositoryError::Search(SearchError::Server { .. }) => "server",
            RepositoryError::Search(SearchError::Decode(_)) | RepositoryError::Document(_) => {
                "decode"
            }
        }
    }
}

// -- 启动阶段的配置错误
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

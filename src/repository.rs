use std::sync::Arc;

use crate::{
    config::ElasticsearchConfig,
    db::{ElasticClient, SearchClient},
    error::{RepositoryError, SearchError},
    models::User,
};

/// 按 id 查询的结果 -- 未命中与出错是两种不同的结果
#[derive(Debug)]
pub enum Lookup {
    Found(User),
    NotFound,
    Failed(RepositoryError),
}

/// 用户仓储 -- 把领域操作翻译为搜索引擎请求
///
/// 只持有只读配置与共享的客户端句柄，可以在并发请求之间共享。
/// 客户端与配置缺一不可；`Default` 构造出的仓储每次调用都返回
/// [`RepositoryError::NotConfigured`]。
#[derive(Clone, Default)]
pub struct UserRepository {
    client: Option<Arc<dyn SearchClient>>,
    configuration: Option<ElasticsearchConfig>,
}

impl UserRepository {
    /// 根据配置创建并持有一个 Elasticsearch 客户端
    pub fn from_config(config: ElasticsearchConfig) -> Result<Self, SearchError> {
        let client = ElasticClient::new(&config)?;

        Ok(Self {
            client: Some(Arc::new(client)),
            configuration: Some(config),
        })
    }

    /// 使用外部构造好的客户端，例如测试替身
    pub fn with_client(client: Arc<dyn SearchClient>) -> Self {
        Self {
            client: Some(client),
            configuration: None,
        }
    }

    pub fn with_configuration(mut self, config: ElasticsearchConfig) -> Self {
        self.configuration = Some(config);
        self
    }

    pub fn configuration(&self) -> Option<&ElasticsearchConfig> {
        self.configuration.as_ref()
    }

    fn target(&self) -> Result<(&dyn SearchClient, &str), RepositoryError> {
        match (&self.client, &self.configuration) {
            (Some(client), Some(config)) => Ok((client.as_ref(), config.index_name.as_str())),
            _ => Err(RepositoryError::NotConfigured),
        }
    }

    pub async fn fetch(&self, id: i32) -> Lookup {
        match self.try_fetch(id).await {
            Ok(Some(user)) => Lookup::Found(user),
            Ok(None) => Lookup::NotFound,
            Err(err) => Lookup::Failed(err),
        }
    }

    async fn try_fetch(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        let (client, index) = self.target()?;
        let response = client.fetch_by_id(index, &id.to_string()).await?;

        match response.source {
            Some(source) if response.found => Ok(Some(serde_json::from_value(source)?)),
            _ => Ok(None),
        }
    }

    pub async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let (client, index) = self.target()?;
        let document = serde_json::to_value(user)?;

        client
            .create_document(index, &user.id.to_string(), document)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use serde_json::json;

    use super::*;
    use crate::db::{GetResponse, MockSearchClient};

    fn configuration() -> ElasticsearchConfig {
        ElasticsearchConfig {
            address: "http://localhost:9200".to_string(),
            timeout_in_seconds: 60,
            index_name: "users".to_string(),
        }
    }

    fn repository(client: MockSearchClient) -> UserRepository {
        UserRepository::with_client(Arc::new(client)).with_configuration(configuration())
    }

    #[tokio::test]
    async fn fetch_reads_the_configured_index_by_key() {
        let mut client = MockSearchClient::new();
        client
            .expect_fetch_by_id()
            .with(eq("users"), eq("7"))
            .times(1)
            .returning(|_, _| {
                Ok(GetResponse {
                    found: true,
                    source: Some(json!({ "id": 7, "name": "Ada" })),
                })
            });

        let lookup = repository(client).fetch(7).await;

        match lookup {
            Lookup::Found(user) => assert_eq!(
                user,
                User {
                    id: 7,
                    name: "Ada".to_string()
                }
            ),
            other => panic!("expected a user, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_reports_absence_without_error() {
        let mut client = MockSearchClient::new();
        client
            .expect_fetch_by_id()
            .times(1)
            .returning(|_, _| Ok(GetResponse::default()));

        assert!(matches!(repository(client).fetch(1).await, Lookup::NotFound));
    }

    #[tokio::test]
    async fn fetch_propagates_client_errors_unchanged() {
        let mut client = MockSearchClient::new();
        client
            .expect_fetch_by_id()
            .times(1)
            .returning(|_, _| Err(SearchError::Timeout("60s elapsed".to_string())));

        match repository(client).fetch(1).await {
            Lookup::Failed(RepositoryError::Search(SearchError::Timeout(message))) => {
                assert_eq!(message, "60s elapsed")
            }
            other => panic!("expected a timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_fails_on_malformed_document() {
        let mut client = MockSearchClient::new();
        client.expect_fetch_by_id().returning(|_, _| {
            Ok(GetResponse {
                found: true,
                source: Some(json!({ "name": 42 })),
            })
        });

        assert!(matches!(
            repository(client).fetch(1).await,
            Lookup::Failed(RepositoryError::Document(_))
        ));
    }

    #[tokio::test]
    async fn insert_uses_the_user_id_as_document_key() {
        let mut client = MockSearchClient::new();
        client
            .expect_create_document()
            .with(eq("users"), eq("3"), eq(json!({ "id": 3, "name": "Grace" })))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let user = User {
            id: 3,
            name: "Grace".to_string(),
        };
        repository(client).insert(&user).await.unwrap();
    }

    #[tokio::test]
    async fn unconfigured_repository_is_unusable() {
        let user = User {
            id: 1,
            name: "User".to_string(),
        };

        let repository = UserRepository::default();
        assert!(matches!(
            repository.fetch(1).await,
            Lookup::Failed(RepositoryError::NotConfigured)
        ));
        assert!(matches!(
            repository.insert(&user).await,
            Err(RepositoryError::NotConfigured)
        ));

        let without_configuration = UserRepository::with_client(Arc::new(MockSearchClient::new()));
        assert!(matches!(
            without_configuration.fetch(1).await,
            Lookup::Failed(RepositoryError::NotConfigured)
        ));
    }

    #[test]
    fn from_config_keeps_the_configuration() {
        let repository = UserRepository::from_config(configuration()).unwrap();
        assert_eq!(repository.configuration(), Some(&configuration()));
    }
}

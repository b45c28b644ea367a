use std::{path::PathBuf, time::Duration};

use ::config::{Config as Layers, Environment, File, FileFormat, Map};
use clap::Parser;
use serde::Deserialize;
use validator::Validate;

use crate::error::SettingsError;

// -- 环境变量前缀与分隔符，例如 USERS_ELASTICSEARCH__INDEX_NAME
const ENV_PREFIX: &str = "USERS";
const ENV_SEPARATOR: &str = "__";

// -- 命令行参数，优先级最高
#[derive(Debug, Clone, Parser)]
#[command(name = "users_search", about = "User API backed by an Elasticsearch index")]
pub struct Cli {
    /// 基础配置文件
    #[arg(long, default_value = "appsettings.json")]
    pub settings: PathBuf,

    /// 搜索引擎配置文件，覆盖基础配置文件
    #[arg(long, default_value = "elasticsearchconfiguration.json")]
    pub elasticsearch_settings: PathBuf,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub timeout_in_seconds: Option<u32>,

    #[arg(long)]
    pub index_name: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,
}

// -- 应用配置结构体
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub elasticsearch: ElasticsearchConfig,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
}

/// 搜索引擎连接配置 -- 进程启动时加载一次，之后只读
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ElasticsearchConfig {
    #[validate(url)]
    pub address: String,
    #[validate(range(min = 1))]
    pub timeout_in_seconds: u64,
    #[validate(length(min = 1))]
    pub index_name: String,
}

impl ElasticsearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_in_seconds)
    }
}

impl Config {
    /// 按层加载配置：基础文件 -> 搜索引擎文件 -> 环境变量 -> 命令行
    pub fn load(cli: &Cli) -> Result<Self, SettingsError> {
        Self::load_layers(cli, None)
    }

    // -- `env` 为 None 时读取进程环境变量
    fn load_layers(cli: &Cli, env: Option<Map<String, String>>) -> Result<Self, SettingsError> {
        let layers = Layers::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .add_source(File::from(cli.settings.as_path()).format(FileFormat::Json))
            .add_source(
                File::from(cli.elasticsearch_settings.as_path()).format(FileFormat::Json),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(env),
            )
            .set_override_option("elasticsearch.address", cli.address.clone())?
            .set_override_option(
                "elasticsearch.timeout_in_seconds",
                cli.timeout_in_seconds.map(i64::from),
            )?
            .set_override_option("elasticsearch.index_name", cli.index_name.clone())?
            .set_override_option("server.host", cli.host.clone())?
            .set_override_option("server.port", cli.port.map(i64::from))?
            .build()?;

        let config: Config = layers.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }
}

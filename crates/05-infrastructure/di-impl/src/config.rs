//! 服务定位器配置
//!
//! 配置来源依次为：可选的配置文件、`SERVICE_LOCATOR_` 前缀的环境变量。
//! 后加载的来源覆盖先加载的来源。

use di_abstractions::RegistrarOrdering;
use sdk_common::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error};

/// 服务定位器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// 是否跟随进程级模块目录
    pub follow_process_catalog: bool,
    /// 解析未命中且存在新模块时是否重新注册
    pub rescan_on_miss: bool,
    /// 注册器排序策略
    pub registrar_ordering: RegistrarOrdering,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            follow_process_catalog: true,
            rescan_on_miss: true,
            registrar_ordering: RegistrarOrdering::default(),
        }
    }
}

impl LocatorConfig {
    /// 环境变量前缀
    pub const ENV_PREFIX: &'static str = "SERVICE_LOCATOR";

    /// 从配置文件和环境变量加载
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载定位器配置文件: {}", path.display());
            builder = builder.add_source(::config::File::from(path));
        }

        let settings = builder
            .add_source(::config::Environment::with_prefix(Self::ENV_PREFIX))
            .build()
            .map_err(|e| {
                error!("配置构建失败: {}", e);
                ConfigError::ParseError {
                    source: Box::new(e),
                }
            })?;

        let config: Self = settings.try_deserialize().map_err(|e| {
            error!("配置绑定失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        debug!("定位器配置: {:?}", config);
        Ok(config)
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })
    }

    /// 测试用配置：不跟随进程级模块目录
    pub fn isolated() -> Self {
        Self {
            follow_process_catalog: false,
            ..Self::default()
        }
    }
}

//! 依赖注入容器抽象接口
//!
//! 提供依赖注入容器的核心抽象与容器配置

use crate::arguments::Instance;
use crate::reflect::Identify;
use crate::resolver::ResolveOptions;
use infrastructure_common::{ConfigError, ConfigResult, DependencyError, DependencyResult};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// 依赖注入容器 trait
///
/// 工厂通过此 trait 回调容器，因此保持对象安全。
pub trait DiContainer: Send + Sync {
    /// 检查标识是否已有条目
    ///
    /// 返回 `true` 不代表解析一定成功。
    fn has(&self, id: &str) -> bool;

    /// 以显式参数解析条目
    fn get_with(&self, id: &str, parameters: Vec<Instance>) -> DependencyResult<Instance>;

    /// 解析条目
    fn get(&self, id: &str) -> DependencyResult<Instance> {
        self.get_with(id, Vec::new())
    }
}

/// 带类型的解析辅助方法
pub trait DiContainerExt: DiContainer {
    /// 解析条目并转换为 `T`
    fn get_as<T>(&self, id: &str) -> DependencyResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        downcast(id, self.get(id)?)
    }

    /// 按类型标识解析
    fn make<T: Identify>(&self) -> DependencyResult<Arc<T>> {
        self.get_as::<T>(T::identifier())
    }

    /// 按类型标识以显式参数解析
    fn make_with<T: Identify>(&self, parameters: Vec<Instance>) -> DependencyResult<Arc<T>> {
        let id = T::identifier();
        downcast(id, self.get_with(id, parameters)?)
    }
}

impl<C: DiContainer + ?Sized> DiContainerExt for C {}

fn downcast<T>(id: &str, instance: Instance) -> DependencyResult<Arc<T>>
where
    T: Any + Send + Sync,
{
    instance
        .downcast::<T>()
        .map_err(|_| DependencyError::TypeMismatch {
            id: id.to_string(),
            expected: std::any::type_name::<T>(),
        })
}

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 是否启用循环依赖检测
    pub enable_circular_dependency_detection: bool,
    /// 最大解析深度，0 表示不限制
    pub max_resolution_depth: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            enable_circular_dependency_detection: true,
            max_resolution_depth: 100,
        }
    }
}

impl ContainerConfig {
    /// 从 TOML 文本加载
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Toml))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(ConfigError::parse_error)
    }

    /// 从必须存在的 TOML 文件加载
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(ConfigError::parse_error)
    }

    /// 从可选的 TOML 文件和环境变量加载
    ///
    /// 环境变量优先，例如前缀 `DI` 对应 `DI_MAX_RESOLUTION_DEPTH`。
    pub fn load(path: impl AsRef<Path>, env_prefix: &str) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!("加载容器配置: {}", path.display());

        config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(env_prefix).try_parsing(true))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(ConfigError::parse_error)
    }

    /// 对应的解析选项
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            detect_cycles: self.enable_circular_dependency_detection,
            max_depth: self.max_resolution_depth,
        }
    }
}

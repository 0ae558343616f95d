//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ConfigError {
    /// 创建解析错误
    pub fn parse_error<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ParseError {
            source: Box::new(source),
        }
    }
}

/// 依赖注入错误类型
///
/// `NotFound` 对应"参数无法满足"，其余变体均属于容器错误。
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("无法解析参数依赖: {parameter}")]
    NotFound { parameter: String },

    #[error("类型不可实例化: {type_name}")]
    NotInstantiable { type_name: String },

    #[error("类型未在目录中声明: {type_name}")]
    UnknownType { type_name: String },

    #[error("循环依赖检测到: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("解析深度超过限制 {max_depth}: {dependency_chain}")]
    DepthExceeded {
        max_depth: usize,
        dependency_chain: String,
    },

    #[error("缺少构造参数: 位置 {index}")]
    MissingArgument { index: usize },

    #[error("构造参数类型不匹配: 位置 {index}, 期望 {expected}")]
    ArgumentTypeMismatch {
        index: usize,
        expected: &'static str,
    },

    #[error("条目类型不匹配: {id}, 期望 {expected}")]
    TypeMismatch { id: String, expected: &'static str },

    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl DependencyError {
    /// 创建参数无法解析错误
    pub fn not_found(parameter: impl Into<String>) -> Self {
        Self::NotFound {
            parameter: parameter.into(),
        }
    }

    /// 创建类型不可实例化错误
    pub fn not_instantiable(type_name: impl Into<String>) -> Self {
        Self::NotInstantiable {
            type_name: type_name.into(),
        }
    }

    /// 包装用户代码（工厂、构造函数）返回的错误
    pub fn custom<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Custom(error.into())
    }

    /// 是否为参数无法满足的错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// 是否为容器错误（除 `NotFound` 以外的所有错误）
    pub fn is_container_error(&self) -> bool {
        !self.is_not_found()
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;

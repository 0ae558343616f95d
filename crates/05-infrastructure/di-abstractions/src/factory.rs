//! 注册表条目与工厂

use crate::arguments::{Arguments, Instance};
use crate::container::DiContainer;
use infrastructure_common::DependencyResult;
use std::any::Any;
use std::sync::Arc;

/// 工厂函数类型
///
/// 以容器和调用方显式传入的参数调用，返回值原样交给调用方。
pub type Factory =
    Arc<dyn Fn(&dyn DiContainer, Arguments) -> DependencyResult<Instance> + Send + Sync>;

/// 注册表条目
#[derive(Clone)]
pub enum Entry {
    /// 尚未实例化的类型名称；与标识不同时作为别名
    Pending(String),
    /// 工厂
    Factory(Factory),
    /// 已构造的实例
    Instance(Instance),
}

impl Entry {
    /// 待解析的类型名称
    pub fn pending(type_name: impl Into<String>) -> Self {
        Self::Pending(type_name.into())
    }

    /// 由闭包创建工厂条目
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&dyn DiContainer, Arguments) -> DependencyResult<Instance> + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(factory))
    }

    /// 由值创建实例条目
    pub fn instance<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self::Instance(Arc::new(value))
    }

    /// 由共享实例创建实例条目
    pub fn shared(instance: Instance) -> Self {
        Self::Instance(instance)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Instance(_))
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending(type_name) => f.debug_tuple("Pending").field(type_name).finish(),
            Self::Factory(_) => f.debug_tuple("Factory").field(&"<function>").finish(),
            Self::Instance(_) => f.debug_tuple("Instance").field(&"<instance>").finish(),
        }
    }
}

//! 构造参数列表
//!
//! 解析出的依赖、字面默认值和容器自身统一以 [`Instance`] 表示，
//! 按声明顺序装入 [`Arguments`] 交给构造函数、调用器或工厂。

use infrastructure_common::{DependencyError, DependencyResult};
use std::any::Any;
use std::sync::Arc;

/// 容器中流转的实例
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 将任意值包装为 [`Instance`]
pub fn instance<T>(value: T) -> Instance
where
    T: Any + Send + Sync,
{
    Arc::new(value)
}

/// 按位置匹配的参数列表
#[derive(Clone, Default)]
pub struct Arguments {
    values: Vec<Instance>,
}

impl Arguments {
    /// 创建参数列表
    pub fn new(values: Vec<Instance>) -> Self {
        Self { values }
    }

    /// 参数个数
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否没有参数
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 获取指定位置的原始实例
    pub fn get(&self, index: usize) -> Option<&Instance> {
        self.values.get(index)
    }

    /// 获取指定位置的共享实例
    pub fn instance<T>(&self, index: usize) -> DependencyResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let value = self
            .values
            .get(index)
            .ok_or(DependencyError::MissingArgument { index })?;

        value
            .clone()
            .downcast::<T>()
            .map_err(|_| DependencyError::ArgumentTypeMismatch {
                index,
                expected: std::any::type_name::<T>(),
            })
    }

    /// 获取指定位置的值副本，用于字符串、数字等内建类型
    pub fn value<T>(&self, index: usize) -> DependencyResult<T>
    where
        T: Any + Send + Sync + Clone,
    {
        self.instance::<T>(index).map(|value| T::clone(&value))
    }

    /// 取回参数列表
    pub fn into_vec(self) -> Vec<Instance> {
        self.values
    }
}

impl From<Vec<Instance>> for Arguments {
    fn from(values: Vec<Instance>) -> Self {
        Self::new(values)
    }
}

impl std::fmt::Debug for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arguments")
            .field("len", &self.values.len())
            .finish()
    }
}

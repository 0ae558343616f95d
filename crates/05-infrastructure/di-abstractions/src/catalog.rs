//! 类型目录
//!
//! 按类型名称保存 [`TypeDescriptor`]，是容器解析时的"反射"来源。
//! 目录与容器的条目注册表相互独立，`flush` 不会清空目录。

use crate::reflect::{Injectable, TypeDescriptor};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::debug;

/// 类型目录 trait
pub trait TypeCatalog: Send + Sync {
    /// 查找类型描述符
    fn describe(&self, type_name: &str) -> Option<Arc<TypeDescriptor>>;

    /// 检查类型是否已声明
    fn contains(&self, type_name: &str) -> bool {
        self.describe(type_name).is_some()
    }
}

/// 全局类型目录，`#[derive(Injectable)]` 在程序启动时向其注册
static GLOBAL_TYPE_CATALOG: Lazy<Arc<DefaultTypeCatalog>> =
    Lazy::new(|| Arc::new(DefaultTypeCatalog::new()));

/// 默认类型目录
///
/// 自身找不到的类型会交给父目录查找。
#[derive(Default)]
pub struct DefaultTypeCatalog {
    descriptors: DashMap<String, Arc<TypeDescriptor>>,
    parent: Option<Arc<dyn TypeCatalog>>,
}

impl DefaultTypeCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建以 `parent` 为后备的目录
    pub fn with_parent(parent: Arc<dyn TypeCatalog>) -> Self {
        Self {
            descriptors: DashMap::new(),
            parent: Some(parent),
        }
    }

    /// 获取全局类型目录
    pub fn global() -> Arc<DefaultTypeCatalog> {
        GLOBAL_TYPE_CATALOG.clone()
    }

    /// 注册描述符，返回被覆盖的旧描述符
    pub fn register(&self, descriptor: TypeDescriptor) -> Option<Arc<TypeDescriptor>> {
        let name = descriptor.name().to_string();
        debug!(type_name = %name, "注册类型描述符");
        self.descriptors.insert(name, Arc::new(descriptor))
    }

    /// 注册可自动装配的类型
    pub fn register_type<T: Injectable>(&self) -> Option<Arc<TypeDescriptor>> {
        self.register(T::descriptor())
    }

    /// 本目录（不含父目录）中的类型数量
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// 本目录中的类型名称，按字典序排列
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .descriptors
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }
}

impl TypeCatalog for DefaultTypeCatalog {
    fn describe(&self, type_name: &str) -> Option<Arc<TypeDescriptor>> {
        if let Some(descriptor) = self.descriptors.get(type_name) {
            return Some(descriptor.value().clone());
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.describe(type_name))
    }
}

impl std::fmt::Debug for DefaultTypeCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultTypeCatalog")
            .field("types", &self.type_names())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

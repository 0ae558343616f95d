//! 容器构建器

use crate::container::Container;
use di_abstractions::{
    ContainerConfig, DefaultTypeCatalog, Entry, Injectable, TypeCatalog, TypeDescriptor,
};
use std::sync::Arc;
use tracing::info;

/// 容器构建器
///
/// 构建出的容器使用一个本地类型目录，本地找不到的类型交给父目录
/// （默认为全局目录，见 [`DiContainerBuilder::isolated`]）。
pub struct DiContainerBuilder {
    config: ContainerConfig,
    parent: Option<Arc<dyn TypeCatalog>>,
    isolated: bool,
    descriptors: Vec<TypeDescriptor>,
    entries: Vec<(String, Entry)>,
}

impl DiContainerBuilder {
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
            parent: None,
            isolated: false,
            descriptors: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 以指定目录代替全局目录作为父目录
    pub fn with_catalog(mut self, catalog: Arc<dyn TypeCatalog>) -> Self {
        self.parent = Some(catalog);
        self
    }

    /// 不使用任何父目录，只解析显式注册的类型
    pub fn isolated(mut self) -> Self {
        self.isolated = true;
        self
    }

    pub fn register_type<T: Injectable>(self) -> Self {
        self.register_descriptor(T::descriptor())
    }

    pub fn register_descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// 预先注册条目
    pub fn register(mut self, id: impl Into<String>, entry: Entry) -> Self {
        self.entries.push((id.into(), entry));
        self
    }

    pub fn build(self) -> Container {
        let catalog = match (self.isolated, self.parent) {
            (true, _) => DefaultTypeCatalog::new(),
            (false, Some(parent)) => DefaultTypeCatalog::with_parent(parent),
            (false, None) => DefaultTypeCatalog::with_parent(DefaultTypeCatalog::global()),
        };

        let type_count = self.descriptors.len();
        for descriptor in self.descriptors {
            catalog.register(descriptor);
        }

        let container = Container::with_catalog(Arc::new(catalog), self.config);
        let entry_count = self.entries.len();
        for (id, entry) in self.entries {
            container.register(id, entry);
        }

        info!("构建容器完成，注册了 {} 个类型、{} 个条目", type_count, entry_count);
        container
    }
}

impl Default for DiContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

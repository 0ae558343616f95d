//! 依赖注入容器实现

use crate::builder::DiContainerBuilder;
use di_abstractions::{
    Arguments, Constructor, ContainerConfig, DefaultTypeCatalog, DiContainer, Entry, Identify,
    Instance, ParameterDescriptor, ParameterKind, ResolveContext, TypeCatalog, TypeDescriptor,
    CONTAINER_ID,
};
use infrastructure_common::{DependencyError, DependencyResult};
use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// 受锁保护的容器状态
struct ContainerState {
    /// 标识到条目的映射
    entries: HashMap<String, Entry>,
    /// 当前解析链
    context: ResolveContext,
}

struct ContainerInner {
    catalog: Arc<dyn TypeCatalog>,
    config: ContainerConfig,
    /// 所有公开操作在整个执行期间持有此锁；同一线程的递归解析可重入。
    /// `RefCell` 的借用从不跨越对用户代码的调用。
    state: ReentrantMutex<RefCell<ContainerState>>,
}

/// 依赖注入容器
///
/// 根据类型描述符递归构造对象图：参数按声明类型从注册表解析，
/// 内建类型参数使用默认值，声明为容器自身的参数注入容器。
/// 克隆得到的句柄共享同一个注册表。
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

impl Container {
    /// 创建使用全局类型目录和默认配置的容器
    pub fn new() -> Self {
        Self::with_catalog(DefaultTypeCatalog::global(), ContainerConfig::default())
    }

    /// 使用指定类型目录和配置创建容器
    pub fn with_catalog(catalog: Arc<dyn TypeCatalog>, config: ContainerConfig) -> Self {
        let context = ResolveContext::new(config.resolve_options());
        Self {
            inner: Arc::new(ContainerInner {
                catalog,
                config,
                state: ReentrantMutex::new(RefCell::new(ContainerState {
                    entries: HashMap::new(),
                    context,
                })),
            }),
        }
    }

    /// 创建容器构建器
    pub fn builder() -> DiContainerBuilder {
        DiContainerBuilder::new()
    }

    /// 容器使用的类型目录
    pub fn catalog(&self) -> &Arc<dyn TypeCatalog> {
        &self.inner.catalog
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.inner.config
    }

    /// 两个句柄是否指向同一个容器
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    /// 注册条目，`None` 表示以标识自身作为待解析的类型名称
    ///
    /// 覆盖已有条目。
    pub fn set(&self, id: impl Into<String>, entry: Option<Entry>) -> &Self {
        let id = id.into();
        let entry = entry.unwrap_or_else(|| Entry::Pending(id.clone()));
        debug!(id = %id, entry = ?entry, "注册条目");
        self.with_state(|state| state.entries.insert(id, entry));
        self
    }

    /// 注册条目，等同于 `set(id, Some(entry))`
    pub fn register(&self, id: impl Into<String>, entry: Entry) -> &Self {
        self.set(id, Some(entry))
    }

    /// 将 `id` 注册为 `target` 的别名，二者共享实例缓存
    pub fn alias(&self, id: impl Into<String>, target: impl Into<String>) -> &Self {
        self.set(id, Some(Entry::Pending(target.into())))
    }

    /// 解析条目
    ///
    /// 工厂以容器和显式参数调用，返回值不做任何处理；
    /// 声明了构造函数的类型构造后缓存在自身类型名称下。
    pub fn resolve(&self, entry: &Entry, parameters: Vec<Instance>) -> DependencyResult<Instance> {
        let _serial = self.inner.state.lock();
        match entry {
            Entry::Factory(factory) => {
                trace!(parameter_count = parameters.len(), "调用工厂");
                factory(self as &dyn DiContainer, Arguments::new(parameters))
            }
            Entry::Instance(instance) => Ok(instance.clone()),
            Entry::Pending(type_name) => self.resolve_type(type_name, parameters),
        }
    }

    /// 按声明顺序解析参数列表
    pub fn get_dependencies(
        &self,
        parameters: &[ParameterDescriptor],
    ) -> DependencyResult<Vec<Instance>> {
        let _serial = self.inner.state.lock();
        parameters
            .iter()
            .map(|parameter| self.satisfy(parameter))
            .collect()
    }

    /// 批量解析
    ///
    /// 按迭代顺序对每一项调用 `get_with`。不具备事务性：
    /// 中途失败时，之前的条目保持已注册或已解析的状态，其余条目不再处理。
    pub fn bulk<I, K>(&self, entries: I) -> DependencyResult<&Self>
    where
        I: IntoIterator<Item = (K, Vec<Instance>)>,
        K: AsRef<str>,
    {
        let _serial = self.inner.state.lock();
        for (id, parameters) in entries {
            self.get_with(id.as_ref(), parameters)?;
        }
        Ok(self)
    }

    /// 清空所有条目
    pub fn flush(&self) -> &Self {
        let previous = self.with_state(|state| std::mem::take(&mut state.entries));
        debug!(entry_count = previous.len(), "清空容器条目");
        self
    }

    /// 已注册的条目数量
    pub fn len(&self) -> usize {
        self.with_state(|state| state.entries.len())
    }

    /// 是否没有任何条目
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 已注册的标识，按字典序排列
    pub fn entry_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.with_state(|state| state.entries.keys().cloned().collect());
        ids.sort();
        ids
    }

    fn lookup(&self, id: &str, parameters: Vec<Instance>) -> DependencyResult<Instance> {
        let _serial = self.inner.state.lock();
        let entry = self.with_state(|state| {
            state
                .entries
                .entry(id.to_string())
                .or_insert_with(|| {
                    debug!(id, "首次查找，自动注册");
                    Entry::Pending(id.to_string())
                })
                .clone()
        });

        match entry {
            Entry::Instance(instance) if parameters.is_empty() => {
                trace!(id, "命中实例缓存");
                Ok(instance)
            }
            Entry::Instance(_) => self.resolve_type(id, parameters),
            Entry::Pending(target) if target != id => {
                trace!(id, target = %target, "解析别名");
                self.tracked(id, || self.lookup(&target, parameters))
            }
            // 工厂可能回调容器，需登记在解析链中
            entry @ Entry::Factory(_) => self.tracked(id, || self.resolve(&entry, parameters)),
            entry => self.resolve(&entry, parameters),
        }
    }

    fn resolve_type(&self, type_name: &str, parameters: Vec<Instance>) -> DependencyResult<Instance> {
        if type_name == CONTAINER_ID {
            trace!("注入容器自身");
            return Ok(self.self_instance());
        }

        let descriptor = self.inner.catalog.describe(type_name).ok_or_else(|| {
            DependencyError::UnknownType {
                type_name: type_name.to_string(),
            }
        })?;
        let Some(constructor) = descriptor.constructor() else {
            return Err(DependencyError::not_instantiable(type_name));
        };

        self.tracked(type_name, || match constructor {
            Constructor::Implicit(create) => self.invoke(&descriptor, create()),
            Constructor::Declared {
                parameters: declared,
                build,
            } => {
                let dependencies = if parameters.is_empty() {
                    self.get_dependencies(declared)?
                } else {
                    trace!(type_name, "使用显式参数，跳过自动装配");
                    parameters
                };
                let instance = build(Arguments::new(dependencies))?;

                debug!(type_name, "缓存实例");
                self.with_state(|state| {
                    state
                        .entries
                        .insert(type_name.to_string(), Entry::Instance(instance.clone()))
                });
                Ok(instance)
            }
        })
    }

    /// 未声明构造函数的类型：若实例可调用，调用结果替换实例
    fn invoke(&self, descriptor: &TypeDescriptor, instance: Instance) -> DependencyResult<Instance> {
        let Some(invoker) = descriptor.invoker() else {
            return Ok(instance);
        };

        let dependencies = self.get_dependencies(invoker.parameters())?;
        match invoker.invoke(&instance, Arguments::new(dependencies))? {
            Some(replacement) => {
                debug!(type_name = descriptor.name(), "调用结果替换实例");
                Ok(replacement)
            }
            None => Ok(instance),
        }
    }

    fn satisfy(&self, parameter: &ParameterDescriptor) -> DependencyResult<Instance> {
        match parameter.kind() {
            ParameterKind::Class(type_name) if type_name == CONTAINER_ID => {
                Ok(self.self_instance())
            }
            ParameterKind::Class(type_name) => self.get(type_name),
            ParameterKind::Builtin => parameter
                .default_value()
                .cloned()
                .ok_or_else(|| DependencyError::not_found(parameter.name())),
        }
    }

    /// 在解析链中登记 `name` 后执行 `resolve`
    fn tracked<R>(
        &self,
        name: &str,
        resolve: impl FnOnce() -> DependencyResult<R>,
    ) -> DependencyResult<R> {
        self.with_state(|state| state.context.push_type(name))
            .map_err(|error| {
                warn!(type_name = name, error = %error, "解析中止");
                error
            })?;
        let _chain = ChainGuard { container: self };
        resolve()
    }

    fn self_instance(&self) -> Instance {
        Arc::new(self.clone())
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ContainerState) -> R) -> R {
        let guard = self.inner.state.lock();
        let mut state = guard.borrow_mut();
        f(&mut state)
    }
}

/// 离开作用域时将类型移出解析链，包括展开时
struct ChainGuard<'a> {
    container: &'a Container,
}

impl Drop for ChainGuard<'_> {
    fn drop(&mut self) {
        self.container.with_state(|state| state.context.pop_type());
    }
}

impl DiContainer for Container {
    fn has(&self, id: &str) -> bool {
        self.with_state(|state| state.entries.contains_key(id))
    }

    fn get_with(&self, id: &str, parameters: Vec<Instance>) -> DependencyResult<Instance> {
        self.lookup(id, parameters)
    }
}

impl Identify for Container {
    fn identifier() -> &'static str {
        CONTAINER_ID
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("entries", &self.entry_ids())
            .field("config", &self.inner.config)
            .finish()
    }
}

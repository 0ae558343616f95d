//! # 依赖注入容器演示
//!
//! 演示容器的主要用法：
//! - 使用派生宏在编译时声明构造参数，启动时自动注册
//! - 自动装配对象图并共享实例
//! - 工厂条目、别名与批量解析
//! - 循环依赖检测

use component_macros::Injectable;
use di_abstractions::{
    instance, ContainerConfig, DiContainer, DiContainerExt, Entry, Identify,
    ParameterDescriptor, TypeDescriptor,
};
use di_impl::{Container, DiContainerBuilder};
use infrastructure_common::{init_logging, LoggingConfig};
use std::sync::Arc;
use tracing::{info, warn};

// ========== 示例类型 ==========

#[derive(Injectable)]
pub struct Repository {
    #[inject(default = "Hello World")]
    message: String,
}

#[derive(Injectable)]
pub struct Manager {
    repository: Arc<Repository>,
}

#[derive(Injectable)]
pub struct Controller {
    manager: Arc<Manager>,
}

impl Controller {
    pub fn index(&self) -> &str {
        &self.manager.repository.message
    }
}

#[derive(Injectable)]
#[injectable(name = "demo::Request")]
pub struct Request {
    #[inject(default = "GET")]
    method: String,
}

// ========== 演示函数 ==========

/// 演示自动装配
fn demo_autowiring(container: &Container) -> anyhow::Result<()> {
    info!("=== 自动装配演示 ===");

    let controller = container.make::<Controller>()?;
    info!("Controller::index() = {}", controller.index());

    let repository = container.make::<Repository>()?;
    info!(
        "Repository 实例共享: {}",
        Arc::ptr_eq(&controller.manager.repository, &repository)
    );

    let request = container.make::<Request>()?;
    info!("Request 默认方法: {}", request.method);
    Ok(())
}

/// 演示工厂、别名与批量解析
fn demo_entries(container: &Container) -> anyhow::Result<()> {
    info!("=== 注册表条目演示 ===");

    container
        .alias("repository", Repository::identifier())
        .register(
            "greeting",
            Entry::factory(|container, args| {
                let repository = container.get_as::<Repository>("repository")?;
                let name = args.value::<String>(0).unwrap_or_else(|_| "world".to_string());
                Ok(instance(format!("{} ({})", repository.message, name)))
            }),
        );

    let greeting = container.get_as::<String>("greeting")?;
    info!("工厂结果: {}", greeting);

    container.bulk([
        (Controller::identifier(), Vec::new()),
        ("greeting", vec![instance("bulk".to_string())]),
    ])?;
    info!("已注册条目: {:?}", container.entry_ids());
    Ok(())
}

/// 演示循环依赖检测
fn demo_cycle_detection(config: &ContainerConfig) {
    info!("=== 循环依赖检测演示 ===");

    let container = DiContainerBuilder::new()
        .isolated()
        .with_config(config.clone())
        .register_descriptor(TypeDescriptor::declared(
            "demo::Left",
            vec![ParameterDescriptor::class("right", "demo::Right")],
            |_| Ok(()),
        ))
        .register_descriptor(TypeDescriptor::declared(
            "demo::Right",
            vec![ParameterDescriptor::class("left", "demo::Left")],
            |_| Ok(()),
        ))
        .build();

    match container.get("demo::Left") {
        Ok(_) => warn!("未检测到循环依赖"),
        Err(error) => info!("解析失败: {}", error),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(&LoggingConfig::development())?;

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/di.toml").to_string());
    let config = ContainerConfig::load(&config_path, "DI")?;
    info!("容器配置: {:?}", config);

    let container = DiContainerBuilder::new().with_config(config.clone()).build();

    demo_autowiring(&container)?;
    demo_entries(&container)?;
    demo_cycle_detection(&config);

    container.flush();
    info!("演示完成，容器已清空: {}", container.is_empty());
    Ok(())
}

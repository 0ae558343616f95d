use component_macros::Injectable;
use di_abstractions::{DiContainerExt, Identify};
use di_impl::Container;
use std::sync::Arc;

#[derive(Injectable)]
struct OkRepository;

#[derive(Injectable)]
#[injectable(name = "ok::Service")]
struct OkService {
    repository: Arc<OkRepository>,
    #[inject(default = "ok")]
    label: String,
}

fn main() {
    assert_eq!(OkService::identifier(), "ok::Service");

    let container = Container::new();
    let service = container.make::<OkService>().unwrap();
    let repository = container.make::<OkRepository>().unwrap();
    assert!(Arc::ptr_eq(&service.repository, &repository));
    assert_eq!(service.label, "ok");
}

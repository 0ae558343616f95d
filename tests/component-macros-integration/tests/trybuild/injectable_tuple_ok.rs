use component_macros::Injectable;
use di_abstractions::{Injectable as _, TypeKind};
use std::sync::Arc;

#[derive(Default, Injectable)]
#[injectable(implicit)]
struct Clock;

#[derive(Injectable)]
struct Timer(Arc<Clock>, #[inject(default = 30_u32)] u32);

fn main() {
    assert!(matches!(Clock::descriptor().kind(), TypeKind::Concrete(_)));
    assert_eq!(Timer::descriptor().parameters().len(), 2);
}

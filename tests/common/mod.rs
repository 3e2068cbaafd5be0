#![allow(unused_imports, dead_code)]

pub use taskdag_test_utils::builders;
pub use taskdag_test_utils::{init_tracing, with_timeout};

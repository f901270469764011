pub mod collector;
pub mod name_normalizer;
pub mod operations;
pub mod partition;
pub mod spec_to_ir;
pub mod type_resolver;

pub use spec_to_ir::{SHARED_DISPLAY_NAME, TransformOptions, transform, transform_with_options};

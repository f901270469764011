pub mod operations;
pub mod schemas;
pub mod types;

pub use operations::*;
pub use schemas::*;
pub use types::{
    IrInfo, IrNamespace, IrSpec, NamespaceKey, NamespacePath, SHARED_NAMESPACE_KEY, TagKey,
};

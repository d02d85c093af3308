//! Model layer
//!
//! - `resource_kind` - the Kueue and core kinds the dashboard reads
//! - `resource` - typed accessors over raw resource documents
//! - `conventions` - label contracts used for cross-resource joins

pub mod conventions;
pub mod resource;
pub mod resource_kind;

pub use conventions::Conventions;
pub use resource::Resource;
pub use resource_kind::ResourceKind;

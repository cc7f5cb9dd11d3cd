mod resolver;
mod types;

pub use resolver::{resolve_index, resolve_indexes, resolve_throughput};
pub use types::{
    IndexDeclaration, IndexDescriptor, IndexOption, IndexSpec, Projection, Throughput,
    ThroughputSpec,
};

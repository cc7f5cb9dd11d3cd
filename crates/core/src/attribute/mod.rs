mod codec;
mod definition;
mod types;

pub use definition::{
    AttributeDefinition, AttributeOptions, DefaultOption, DefaultProvider, FormatOptions,
    Transform, ValidationRule, Validator,
};
pub use types::{resolve_type_spec, LogicalType, ResolvedType, TypeCodec, TypeSpec};

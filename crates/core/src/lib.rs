//! dynamodel_core - attribute types and the wire codec behind dynamodel schemas.
//!
//! An [`AttributeDefinition`] turns a declared field (type, default, validation,
//! formatting, transforms, indexes) into a codec between native [`Value`]s and the
//! store's typed [`WireFragment`]s. A [`Schema`] groups the definitions of one table.
//!
//! ```
//! use dynamodel_core::{AttributeOptions, Schema, Value, WireFragment};
//!
//! let mut schema = Schema::new();
//! let email = schema
//!     .add_attribute("email", "string", AttributeOptions::new().trim().lowercase())
//!     .unwrap();
//!
//! let fragment = email.encode(&Value::from(" Ada@Example.com ")).unwrap();
//! assert_eq!(fragment, Some(WireFragment::S("ada@example.com".to_string())));
//! ```

pub mod attribute;
pub mod config;
pub mod error;
pub mod index;
pub mod schema;
pub mod value;
pub mod wire;

pub use attribute::{AttributeDefinition, AttributeOptions, LogicalType, TypeSpec, ValidationRule};
pub use config::Config;
pub use error::{DecodeError, SchemaError, ValidationError};
pub use index::{IndexDeclaration, IndexDescriptor, IndexSpec, Projection, Throughput};
pub use schema::Schema;
pub use value::{Record, Value};
pub use wire::{Item, WireClass, WireFragment};

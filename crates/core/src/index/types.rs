//! Index declarations as written on an attribute, and the descriptors they resolve to.

use serde::{Deserialize, Serialize};

/// Provisioned read/write capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Throughput {
    pub read: u64,
    pub write: u64,
}

impl Throughput {
    pub const fn new(read: u64, write: u64) -> Self {
        Self { read, write }
    }
}

impl Default for Throughput {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Throughput as declared on an index: one number for both, or an explicit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ThroughputSpec {
    Uniform(u64),
    Pair {
        read: Option<u64>,
        write: Option<u64>,
    },
}

impl From<u64> for ThroughputSpec {
    fn from(value: u64) -> Self {
        ThroughputSpec::Uniform(value)
    }
}

impl From<Throughput> for ThroughputSpec {
    fn from(throughput: Throughput) -> Self {
        ThroughputSpec::Pair {
            read: Some(throughput.read),
            write: Some(throughput.write),
        }
    }
}

/// Which attributes an index projects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ProjectionSpec", into = "ProjectionSpec")]
pub enum Projection {
    #[default]
    All,
    KeysOnly,
    Include(Vec<String>),
}

impl From<bool> for Projection {
    fn from(all: bool) -> Self {
        if all {
            Projection::All
        } else {
            Projection::KeysOnly
        }
    }
}

impl From<Vec<String>> for Projection {
    fn from(attributes: Vec<String>) -> Self {
        Projection::Include(attributes)
    }
}

/// Serialized form of a projection: `true`, `false` or a list of attribute names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ProjectionSpec {
    Flag(bool),
    Attributes(Vec<String>),
}

impl From<ProjectionSpec> for Projection {
    fn from(spec: ProjectionSpec) -> Self {
        match spec {
            ProjectionSpec::Flag(all) => all.into(),
            ProjectionSpec::Attributes(attributes) => Projection::Include(attributes),
        }
    }
}

impl From<Projection> for ProjectionSpec {
    fn from(projection: Projection) -> Self {
        match projection {
            Projection::All => ProjectionSpec::Flag(true),
            Projection::KeysOnly => ProjectionSpec::Flag(false),
            Projection::Include(attributes) => ProjectionSpec::Attributes(attributes),
        }
    }
}

/// Raw index options attached to an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSpec {
    pub name: Option<String>,
    #[serde(default)]
    pub global: bool,
    pub range_key: Option<String>,
    pub project: Option<Projection>,
    pub throughput: Option<ThroughputSpec>,
}

impl IndexSpec {
    /// A local secondary index.
    pub fn local() -> Self {
        Self::default()
    }

    /// A global secondary index.
    pub fn global() -> Self {
        Self {
            global: true,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_range_key(mut self, range_key: impl Into<String>) -> Self {
        self.range_key = Some(range_key.into());
        self
    }

    pub fn with_projection(mut self, projection: impl Into<Projection>) -> Self {
        self.project = Some(projection.into());
        self
    }

    pub fn with_throughput(mut self, throughput: impl Into<ThroughputSpec>) -> Self {
        self.throughput = Some(throughput.into());
        self
    }
}

/// One index declaration. An options object must be a valid [`IndexSpec`]; any
/// other JSON value declares a default (local, fully projected) index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum IndexDeclaration {
    #[default]
    Default,
    Spec(IndexSpec),
}

impl From<IndexSpec> for IndexDeclaration {
    fn from(spec: IndexSpec) -> Self {
        IndexDeclaration::Spec(spec)
    }
}

impl From<bool> for IndexDeclaration {
    fn from(_: bool) -> Self {
        IndexDeclaration::Default
    }
}

impl TryFrom<serde_json::Value> for IndexDeclaration {
    type Error = serde_json::Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        if value.is_object() {
            serde_json::from_value(value).map(IndexDeclaration::Spec)
        } else {
            Ok(IndexDeclaration::Default)
        }
    }
}

/// The `index` option: a single declaration or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum IndexOption {
    Many(Vec<IndexDeclaration>),
    One(IndexDeclaration),
}

impl IndexOption {
    pub fn into_declarations(self) -> Vec<IndexDeclaration> {
        match self {
            IndexOption::Many(declarations) => declarations,
            IndexOption::One(declaration) => vec![declaration],
        }
    }
}

impl TryFrom<serde_json::Value> for IndexOption {
    type Error = serde_json::Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(IndexDeclaration::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(IndexOption::Many),
            other => IndexDeclaration::try_from(other).map(IndexOption::One),
        }
    }
}

/// Fully resolved index metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDescriptor {
    pub name: String,
    pub global: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_key: Option<String>,
    pub projection: Projection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throughput: Option<Throughput>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_throughput_spec_from_json() {
        let uniform: ThroughputSpec = serde_json::from_value(json!(5)).unwrap();
        assert_eq!(uniform, ThroughputSpec::Uniform(5));

        let pair: ThroughputSpec = serde_json::from_value(json!({"read": 5})).unwrap();
        assert_eq!(
            pair,
            ThroughputSpec::Pair {
                read: Some(5),
                write: None
            }
        );
    }

    #[test]
    fn test_projection_from_json() {
        let all: Projection = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(all, Projection::All);

        let keys: Projection = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(keys, Projection::KeysOnly);

        let include: Projection = serde_json::from_value(json!(["email", "name"])).unwrap();
        assert_eq!(
            include,
            Projection::Include(vec!["email".to_string(), "name".to_string()])
        );
        assert_eq!(serde_json::to_value(&include).unwrap(), json!(["email", "name"]));
    }

    #[test]
    fn test_index_declaration_from_json() {
        let spec: IndexDeclaration =
            serde_json::from_value(json!({"global": true, "rangeKey": "createdAt"})).unwrap();
        assert_eq!(
            spec,
            IndexDeclaration::Spec(IndexSpec::global().with_range_key("createdAt"))
        );

        let flag: IndexDeclaration = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(flag, IndexDeclaration::Default);
    }

    #[test]
    fn test_malformed_index_object_is_an_error() {
        for throughput in [json!(-1), json!(2.5), json!("five"), json!({"read": 5, "write": "x"})] {
            let declaration = json!({"global": true, "throughput": throughput});

            assert!(serde_json::from_value::<IndexDeclaration>(declaration.clone()).is_err());
            assert!(serde_json::from_value::<IndexOption>(declaration.clone()).is_err());
            assert!(serde_json::from_value::<IndexOption>(json!([true, declaration])).is_err());
        }
    }

    #[test]
    fn test_index_option_one_or_many() {
        let one: IndexOption = serde_json::from_value(json!({"name": "byEmail"})).unwrap();
        assert_eq!(one.into_declarations().len(), 1);

        let many: IndexOption =
            serde_json::from_value(json!([{"global": true}, {"name": "local"}])).unwrap();
        assert_eq!(many.into_declarations().len(), 2);

        let flag: IndexOption = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(flag.into_declarations(), vec![IndexDeclaration::Default]);
    }

    #[test]
    fn test_descriptor_serializes_camel_case() {
        let descriptor = IndexDescriptor {
            name: "emailGlobalIndex".to_string(),
            global: true,
            range_key: Some("createdAt".to_string()),
            projection: Projection::All,
            throughput: Some(Throughput::new(5, 5)),
        };
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({
                "name": "emailGlobalIndex",
                "global": true,
                "rangeKey": "createdAt",
                "projection": true,
                "throughput": {"read": 5, "write": 5}
            })
        );
    }
}

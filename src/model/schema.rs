//! Schema and column type information

use serde::{Deserialize, Serialize};

/// Declared type of a column
///
/// Names follow the dataframe engine's type names (`double`, `long`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    #[default]
    Null,
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    String,
    Binary,
    Date,
    Timestamp,
    Array,
    Map,
    Struct,
}

impl TypeTag {
    /// Whether values of this type are compared with a numeric tolerance
    pub fn is_floating_point(self) -> bool {
        matches!(self, TypeTag::Float | TypeTag::Double | TypeTag::Decimal)
    }

    /// Widen the type to accommodate another type
    ///
    /// Used when inferring a column type from loaded data.
    pub fn widen(self, other: TypeTag) -> TypeTag {
        if self == other {
            return self;
        }

        match (self, other) {
            (TypeTag::Null, t) | (t, TypeTag::Null) => t,
            (TypeTag::Long, TypeTag::Double) | (TypeTag::Double, TypeTag::Long) => {
                TypeTag::Double
            }
            (TypeTag::Date, TypeTag::Timestamp) | (TypeTag::Timestamp, TypeTag::Date) => {
                TypeTag::Timestamp
            }
            _ => TypeTag::String,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Boolean => "boolean",
            TypeTag::Byte => "byte",
            TypeTag::Short => "short",
            TypeTag::Integer => "integer",
            TypeTag::Long => "long",
            TypeTag::Float => "float",
            TypeTag::Double => "double",
            TypeTag::Decimal => "decimal",
            TypeTag::String => "string",
            TypeTag::Binary => "binary",
            TypeTag::Date => "date",
            TypeTag::Timestamp => "timestamp",
            TypeTag::Array => "array",
            TypeTag::Map => "map",
            TypeTag::Struct => "struct",
        }
    }
}

impl std::str::FromStr for TypeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "null" | "void" => Ok(TypeTag::Null),
            "boolean" => Ok(TypeTag::Boolean),
            "byte" => Ok(TypeTag::Byte),
            "short" => Ok(TypeTag::Short),
            "integer" => Ok(TypeTag::Integer),
            "long" => Ok(TypeTag::Long),
            "float" => Ok(TypeTag::Float),
            "double" => Ok(TypeTag::Double),
            "decimal" => Ok(TypeTag::Decimal),
            "string" => Ok(TypeTag::String),
            "binary" => Ok(TypeTag::Binary),
            "date" => Ok(TypeTag::Date),
            "timestamp" => Ok(TypeTag::Timestamp),
            "array" => Ok(TypeTag::Array),
            "map" => Ok(TypeTag::Map),
            "struct" => Ok(TypeTag::Struct),
            _ => Err(format!("Unknown type tag: {}", s)),
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    /// Column name
    pub name: String,
    /// Declared type
    pub data_type: TypeTag,
    /// Whether the column may hold nulls
    pub nullable: bool,
}

impl StructField {
    /// Create a nullable field
    pub fn new(name: impl Into<String>, data_type: TypeTag) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    /// Set nullability
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

impl std::fmt::Display for StructField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StructField({}, {}, {})", self.name, self.data_type, self.nullable)
    }
}

/// Ordered list of column definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<StructField>,
}

impl Schema {
    pub fn new(fields: Vec<StructField>) -> Self {
        Self { fields }
    }

    /// Type tags in column order
    pub fn type_tags(&self) -> Vec<TypeTag> {
        self.fields.iter().map(|f| f.data_type).collect()
    }

    /// Column names in column order
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    /// Get column index by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Get field by name
    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

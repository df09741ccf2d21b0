//! Logical field type → target-language type token.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use super::naming::to_camel_case;
use crate::model::{MetadataField, MetadataLookup};

/// Languages a field type can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTarget {
    Sql,
    Go,
    Protobuf,
    TypeScript,
}

impl TypeTarget {
    pub const ALL: [TypeTarget; 4] = [
        TypeTarget::Sql,
        TypeTarget::Go,
        TypeTarget::Protobuf,
        TypeTarget::TypeScript,
    ];
}

impl FromStr for TypeTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sql" | "mysql" => Ok(TypeTarget::Sql),
            "go" | "golang" => Ok(TypeTarget::Go),
            "pb" | "proto" | "protobuf" | "protocolbuffer" => Ok(TypeTarget::Protobuf),
            "ts" | "typescript" => Ok(TypeTarget::TypeScript),
            other => Err(format!("unknown type target: {other}")),
        }
    }
}

impl fmt::Display for TypeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTarget::Sql => "sql",
            TypeTarget::Go => "go",
            TypeTarget::Protobuf => "protobuf",
            TypeTarget::TypeScript => "typescript",
        };
        f.write_str(name)
    }
}

/// Default `varchar` length when the field declares none.
pub const DEFAULT_VARCHAR_LENGTH: u32 = 100;

/// Map a field to its type token in `target`.
///
/// Reference fields render as the referenced Metadata's name (pointer, slice,
/// `repeated` or `[]` shaped per target). `query_only` selects the protobuf
/// `Info` projection of a referenced message. SQL has no reference types and
/// always dispatches on the logical type. Unknown logical types pass through
/// unchanged.
pub fn map_type<L>(
    field: &MetadataField,
    target: TypeTarget,
    query_only: bool,
    lookup: &L,
) -> String
where
    L: MetadataLookup + ?Sized,
{
    if field.is_reference() && target != TypeTarget::Sql {
        let name = match lookup.lookup(&field.ref_metadata) {
            Some(md) => to_camel_case(&md.name),
            None => {
                warn!(
                    field = %field.name,
                    ref_metadata = %field.ref_metadata,
                    "referenced metadata not found, rendering empty type name"
                );
                String::new()
            }
        };
        return reference_type(&name, field.is_array, target, query_only);
    }

    scalar_type(field, target).unwrap_or_else(|| field.ty.clone())
}

/// SQL column type of a field. Reference fields dispatch on their logical type.
pub fn column_type(field: &MetadataField) -> String {
    scalar_type(field, TypeTarget::Sql).unwrap_or_else(|| field.ty.clone())
}

fn reference_type(name: &str, is_array: bool, target: TypeTarget, query_only: bool) -> String {
    match target {
        TypeTarget::Go if is_array => format!("[]*{name}"),
        TypeTarget::Go => format!("*{name}"),
        TypeTarget::Protobuf => {
            let suffix = if query_only { "Info" } else { "" };
            if is_array {
                format!("repeated {name}{suffix}")
            } else {
                format!("{name}{suffix}")
            }
        }
        TypeTarget::TypeScript if is_array => format!("{name}[]"),
        TypeTarget::TypeScript => name.to_string(),
        TypeTarget::Sql => name.to_string(),
    }
}

fn scalar_type(field: &MetadataField, target: TypeTarget) -> Option<String> {
    let ty = field.ty.as_str();
    let token = match target {
        TypeTarget::Sql => match ty {
            "bigint" => "bigint(20)",
            "int" | "int32" => "int(11)",
            "varchar" | "nvarchar" | "string" => {
                let len = if field.length == 0 {
                    DEFAULT_VARCHAR_LENGTH
                } else {
                    field.length
                };
                return Some(format!("varchar({len})"));
            }
            "longtext" => "longtext",
            "datetime" => "datetime(3)",
            "date" => "date",
            "tinyint" | "bool" | "bit" => "tinyint(1)",
            _ => return None,
        },
        TypeTarget::Go => match ty {
            "bigint" => "int64",
            "int" | "int32" => "int32",
            "varchar" | "nvarchar" | "longtext" | "string" => "string",
            "datetime" | "date" if field.not_null => "time.Time",
            "datetime" | "date" => "sql.NullTime",
            "tinyint" | "bool" | "bit" => "bool",
            _ => return None,
        },
        TypeTarget::Protobuf => match ty {
            "bigint" => "int64",
            "int" | "int32" => "int32",
            "varchar" | "nvarchar" | "longtext" | "string" | "datetime" | "date" => "string",
            "tinyint" | "bool" | "bit" => "bool",
            "float32" => "float",
            "float64" => "double",
            _ => return None,
        },
        TypeTarget::TypeScript => match ty {
            "bigint" | "int" | "int32" | "float32" | "float64" => "number",
            "varchar" | "nvarchar" | "longtext" | "string" | "datetime" | "date" => "string",
            "tinyint" | "bool" | "bit" => "boolean",
            _ => return None,
        },
    };
    Some(token.to_string())
}

/// True for logical types rendered as numbers in every target.
pub fn is_numeric(ty: &str) -> bool {
    matches!(ty, "bigint" | "int" | "int32" | "float32" | "float64")
}

/// True for logical types rendered as strings in Go.
pub fn is_textual(ty: &str) -> bool {
    matches!(ty, "varchar" | "nvarchar" | "longtext" | "string")
}

/// True for logical types rendered as booleans.
pub fn is_boolean(ty: &str) -> bool {
    matches!(ty, "tinyint" | "bool" | "bit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Metadata;
    use std::collections::HashMap;
    use std::sync::Arc;

    const VOCABULARY: [&str; 8] = [
        "bigint", "int", "varchar", "longtext", "datetime", "date", "tinyint", "bool",
    ];

    fn scalar(ty: &str) -> MetadataField {
        MetadataField {
            name: "F".into(),
            ty: ty.into(),
            ..Default::default()
        }
    }

    fn catalog() -> HashMap<String, Arc<Metadata>> {
        let mut map = HashMap::new();
        map.insert(
            "dept".to_string(),
            Arc::new(Metadata {
                id: "dept".into(),
                name: "Department".into(),
                ..Default::default()
            }),
        );
        map
    }

    #[test]
    fn vocabulary_maps_for_every_target() {
        let lookup = catalog();
        for target in TypeTarget::ALL {
            for ty in VOCABULARY {
                let mapped = map_type(&scalar(ty), target, false, &lookup);
                assert!(!mapped.is_empty(), "{ty} in {target}");
                assert!(scalar_type(&scalar(ty), target).is_some(), "{ty} in {target}");
            }
        }
    }

    #[test]
    fn unknown_types_pass_through() {
        let lookup = catalog();
        for target in TypeTarget::ALL {
            assert_eq!(map_type(&scalar("geometry"), target, false, &lookup), "geometry");
        }
    }

    #[test]
    fn go_dates_depend_on_not_null() {
        let lookup = catalog();
        let mut f = scalar("datetime");
        assert_eq!(map_type(&f, TypeTarget::Go, false, &lookup), "sql.NullTime");
        f.not_null = true;
        assert_eq!(map_type(&f, TypeTarget::Go, false, &lookup), "time.Time");
    }

    #[test]
    fn sql_varchar_uses_length_or_default() {
        let lookup = catalog();
        let mut f = scalar("varchar");
        assert_eq!(map_type(&f, TypeTarget::Sql, false, &lookup), "varchar(100)");
        f.length = 32;
        assert_eq!(map_type(&f, TypeTarget::Sql, false, &lookup), "varchar(32)");
    }

    #[test]
    fn reference_shapes_per_target() {
        let lookup = catalog();
        let mut f = MetadataField {
            name: "Dept".into(),
            ref_metadata: "dept".into(),
            ..Default::default()
        };
        assert_eq!(map_type(&f, TypeTarget::Go, false, &lookup), "*Department");
        assert_eq!(map_type(&f, TypeTarget::Protobuf, false, &lookup), "Department");
        assert_eq!(map_type(&f, TypeTarget::Protobuf, true, &lookup), "DepartmentInfo");
        assert_eq!(map_type(&f, TypeTarget::TypeScript, false, &lookup), "Department");

        f.is_array = true;
        assert_eq!(map_type(&f, TypeTarget::Go, false, &lookup), "[]*Department");
        assert_eq!(
            map_type(&f, TypeTarget::Protobuf, false, &lookup),
            "repeated Department"
        );
        assert_eq!(map_type(&f, TypeTarget::TypeScript, false, &lookup), "Department[]");
    }

    #[test]
    fn dangling_reference_degrades_to_empty_name() {
        let lookup = catalog();
        let f = MetadataField {
            name: "Ghost".into(),
            ref_metadata: "missing".into(),
            ..Default::default()
        };
        assert_eq!(map_type(&f, TypeTarget::Go, false, &lookup), "*");
        assert_eq!(map_type(&f, TypeTarget::TypeScript, false, &lookup), "");
    }

    #[test]
    fn target_parses_aliases() {
        assert_eq!("Golang".parse::<TypeTarget>().unwrap(), TypeTarget::Go);
        assert_eq!("pb".parse::<TypeTarget>().unwrap(), TypeTarget::Protobuf);
        assert_eq!("ts".parse::<TypeTarget>().unwrap(), TypeTarget::TypeScript);
        assert!("cobol".parse::<TypeTarget>().is_err());
    }
}

//! The closed set of functions a stored template may call.
//!
//! Each [`TemplateFunction`] variant maps one template-visible name to a Rust
//! generator. Structured arguments (Metadata, fields, services) arrive as
//! minijinja values and are deserialized back into the model types, so a
//! template passes `metadata` or `field` straight from its context.

use std::sync::Arc;

use minijinja::value::ViaDeserialize;
use minijinja::{Environment, Error, ErrorKind, Value};

use super::{cascade, config, golang, pb, sql, typescript};
use crate::catalog::Catalog;
use crate::convert::{self, TypeTarget};
use crate::model::{Metadata, MetadataField, Service};
use crate::resolver;

type Md = ViaDeserialize<Metadata>;
type Field = ViaDeserialize<MetadataField>;
type Svc = ViaDeserialize<Service>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateFunction {
    // naming
    ToSnakeCase,
    ToCamelCase,
    ToLowerCamelCase,
    LcFirst,
    ToUpper,
    ToLower,
    Split,
    Join,
    RemoveLastChar,
    TableName,
    // types
    MapType,
    GoType,
    PbType,
    TsType,
    SqlType,
    // SQL DDL
    GenCreateSql,
    GenCreateColumnSql,
    GenCreateIndexSql,
    GenCreateUniqueIndexSql,
    // protobuf
    GenPbMessageProperty,
    GenPbQueryCond,
    // Go
    GenStructField,
    GenQueryStructField,
    GenQueryCond,
    GenPbToStruct,
    GenStructToPb,
    GenSwagQueryParam,
    // TypeScript
    GenClassField,
    GenClassDefaultValue,
    GetDefaultValue,
    // cascade delete
    GenDeleteChildren,
    GenDeleteChildrenByParentId,
    // catalog
    GetTemplateById,
    GetMetadataById,
    GetMetadataNameById,
    GetMetadataByName,
    // resolver
    RecursiveGetRefMetadatas,
    DirectRefMetadatas,
    // deployment config
    GenMenuConfig,
    GenPageConfig,
    // JSON
    JsonMarshal,
    JsonUnmarshal,
}

impl TemplateFunction {
    pub const ALL: [TemplateFunction; 42] = [
        TemplateFunction::ToSnakeCase,
        TemplateFunction::ToCamelCase,
        TemplateFunction::ToLowerCamelCase,
        TemplateFunction::LcFirst,
        TemplateFunction::ToUpper,
        TemplateFunction::ToLower,
        TemplateFunction::Split,
        TemplateFunction::Join,
        TemplateFunction::RemoveLastChar,
        TemplateFunction::TableName,
        TemplateFunction::MapType,
        TemplateFunction::GoType,
        TemplateFunction::PbType,
        TemplateFunction::TsType,
        TemplateFunction::SqlType,
        TemplateFunction::GenCreateSql,
        TemplateFunction::GenCreateColumnSql,
        TemplateFunction::GenCreateIndexSql,
        TemplateFunction::GenCreateUniqueIndexSql,
        TemplateFunction::GenPbMessageProperty,
        TemplateFunction::GenPbQueryCond,
        TemplateFunction::GenStructField,
        TemplateFunction::GenQueryStructField,
        TemplateFunction::GenQueryCond,
        TemplateFunction::GenPbToStruct,
        TemplateFunction::GenStructToPb,
        TemplateFunction::GenSwagQueryParam,
        TemplateFunction::GenClassField,
        TemplateFunction::GenClassDefaultValue,
        TemplateFunction::GetDefaultValue,
        TemplateFunction::GenDeleteChildren,
        TemplateFunction::GenDeleteChildrenByParentId,
        TemplateFunction::GetTemplateById,
        TemplateFunction::GetMetadataById,
        TemplateFunction::GetMetadataNameById,
        TemplateFunction::GetMetadataByName,
        TemplateFunction::RecursiveGetRefMetadatas,
        TemplateFunction::DirectRefMetadatas,
        TemplateFunction::GenMenuConfig,
        TemplateFunction::GenPageConfig,
        TemplateFunction::JsonMarshal,
        TemplateFunction::JsonUnmarshal,
    ];

    /// Name the function is called by inside a template.
    pub fn name(self) -> &'static str {
        match self {
            TemplateFunction::ToSnakeCase => "to_snake_case",
            TemplateFunction::ToCamelCase => "to_camel_case",
            TemplateFunction::ToLowerCamelCase => "to_lower_camel_case",
            TemplateFunction::LcFirst => "lc_first",
            TemplateFunction::ToUpper => "to_upper",
            TemplateFunction::ToLower => "to_lower",
            TemplateFunction::Split => "split",
            TemplateFunction::Join => "join",
            TemplateFunction::RemoveLastChar => "remove_last_char",
            TemplateFunction::TableName => "table_name",
            TemplateFunction::MapType => "map_type",
            TemplateFunction::GoType => "go_type",
            TemplateFunction::PbType => "pb_type",
            TemplateFunction::TsType => "ts_type",
            TemplateFunction::SqlType => "sql_type",
            TemplateFunction::GenCreateSql => "gen_create_sql",
            TemplateFunction::GenCreateColumnSql => "gen_create_column_sql",
            TemplateFunction::GenCreateIndexSql => "gen_create_index_sql",
            TemplateFunction::GenCreateUniqueIndexSql => "gen_create_unique_index_sql",
            TemplateFunction::GenPbMessageProperty => "gen_pb_message_property",
            TemplateFunction::GenPbQueryCond => "gen_pb_query_cond",
            TemplateFunction::GenStructField => "gen_struct_field",
            TemplateFunction::GenQueryStructField => "gen_query_struct_field",
            TemplateFunction::GenQueryCond => "gen_query_cond",
            TemplateFunction::GenPbToStruct => "gen_pb_to_struct",
            TemplateFunction::GenStructToPb => "gen_struct_to_pb",
            TemplateFunction::GenSwagQueryParam => "gen_swag_query_param",
            TemplateFunction::GenClassField => "gen_class_field",
            TemplateFunction::GenClassDefaultValue => "gen_class_default_value",
            TemplateFunction::GetDefaultValue => "get_default_value",
            TemplateFunction::GenDeleteChildren => "gen_delete_children",
            TemplateFunction::GenDeleteChildrenByParentId => "gen_delete_children_by_parent_id",
            TemplateFunction::GetTemplateById => "get_template_by_id",
            TemplateFunction::GetMetadataById => "get_metadata_by_id",
            TemplateFunction::GetMetadataNameById => "get_metadata_name_by_id",
            TemplateFunction::GetMetadataByName => "get_metadata_by_name",
            TemplateFunction::RecursiveGetRefMetadatas => "recursive_get_ref_metadatas",
            TemplateFunction::DirectRefMetadatas => "direct_ref_metadatas",
            TemplateFunction::GenMenuConfig => "gen_menu_config",
            TemplateFunction::GenPageConfig => "gen_page_config",
            TemplateFunction::JsonMarshal => "json_marshal",
            TemplateFunction::JsonUnmarshal => "json_unmarshal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Bind this function into `env`. Catalog-backed functions capture `catalog`.
    pub fn register(self, env: &mut Environment<'static>, catalog: &Arc<Catalog>) {
        let name = self.name();
        let cat = Arc::clone(catalog);
        match self {
            TemplateFunction::ToSnakeCase => {
                env.add_function(name, |s: String| convert::to_snake_case(&s))
            }
            TemplateFunction::ToCamelCase => {
                env.add_function(name, |s: String| convert::to_camel_case(&s))
            }
            TemplateFunction::ToLowerCamelCase => {
                env.add_function(name, |s: String| convert::to_lower_camel_case(&s))
            }
            TemplateFunction::LcFirst => env.add_function(name, |s: String| convert::lc_first(&s)),
            TemplateFunction::ToUpper => env.add_function(name, |s: String| s.to_uppercase()),
            TemplateFunction::ToLower => env.add_function(name, |s: String| s.to_lowercase()),
            TemplateFunction::Split => env.add_function(name, |s: String, sep: String| {
                s.split(sep.as_str()).map(str::to_string).collect::<Vec<_>>()
            }),
            TemplateFunction::Join => {
                env.add_function(name, |items: Vec<String>, sep: String| items.join(&sep))
            }
            TemplateFunction::RemoveLastChar => {
                env.add_function(name, |s: String| convert::remove_last_char(&s))
            }
            TemplateFunction::TableName => {
                env.add_function(name, |s: String| convert::table_name(&s))
            }

            TemplateFunction::MapType => env.add_function(
                name,
                move |field: Field, target: String, query_only: Option<bool>| {
                    let target: TypeTarget = target
                        .parse()
                        .map_err(|msg: String| Error::new(ErrorKind::InvalidOperation, msg))?;
                    Ok::<_, Error>(convert::map_type(
                        &field,
                        target,
                        query_only.unwrap_or(false),
                        &*cat,
                    ))
                },
            ),
            TemplateFunction::GoType => env.add_function(name, move |field: Field| {
                convert::map_type(&field, TypeTarget::Go, false, &*cat)
            }),
            TemplateFunction::PbType => {
                env.add_function(name, move |field: Field, query_only: Option<bool>| {
                    convert::map_type(
                        &field,
                        TypeTarget::Protobuf,
                        query_only.unwrap_or(false),
                        &*cat,
                    )
                })
            }
            TemplateFunction::TsType => env.add_function(name, move |field: Field| {
                convert::map_type(&field, TypeTarget::TypeScript, false, &*cat)
            }),
            TemplateFunction::SqlType => {
                env.add_function(name, |field: Field| convert::column_type(&field))
            }

            TemplateFunction::GenCreateSql => {
                env.add_function(name, |md: Md| sql::gen_create_sql(&md))
            }
            TemplateFunction::GenCreateColumnSql => {
                env.add_function(name, |field: Field| sql::gen_create_column_sql(&field))
            }
            TemplateFunction::GenCreateIndexSql => {
                env.add_function(name, |table: String, field: Field| {
                    sql::gen_create_index_sql(&table, &field)
                })
            }
            TemplateFunction::GenCreateUniqueIndexSql => {
                env.add_function(name, |md: Md| sql::gen_create_unique_index_sql(&md))
            }

            TemplateFunction::GenPbMessageProperty => env.add_function(
                name,
                move |index: usize, field: Field, query_only: Option<bool>| {
                    pb::gen_pb_message_property(index, &field, query_only.unwrap_or(false), &*cat)
                },
            ),
            TemplateFunction::GenPbQueryCond => {
                env.add_function(name, move |index: usize, field: Field| {
                    pb::gen_pb_query_cond(index, &field, &*cat)
                })
            }

            TemplateFunction::GenStructField => {
                env.add_function(name, move |field: Field, md: Md| {
                    golang::gen_struct_field(&field, &md, &*cat)
                })
            }
            TemplateFunction::GenQueryStructField => env.add_function(name, move |field: Field| {
                golang::gen_query_struct_field(&field, &*cat)
            }),
            TemplateFunction::GenQueryCond => {
                env.add_function(name, |field: Field| golang::gen_query_cond(&field))
            }
            TemplateFunction::GenPbToStruct => env.add_function(name, move |field: Field| {
                golang::gen_pb_to_struct(&field, &*cat)
            }),
            TemplateFunction::GenStructToPb => env.add_function(name, move |field: Field| {
                golang::gen_struct_to_pb(&field, &*cat)
            }),
            TemplateFunction::GenSwagQueryParam => env.add_function(name, move |field: Field| {
                golang::gen_swag_query_param(&field, &*cat)
            }),

            TemplateFunction::GenClassField => env.add_function(name, move |field: Field| {
                typescript::gen_class_field(&field, &*cat)
            }),
            TemplateFunction::GenClassDefaultValue => env.add_function(name, move |field: Field| {
                typescript::gen_class_default_value(&field, &*cat)
            }),
            TemplateFunction::GetDefaultValue => env.add_function(name, move |field: Field| {
                typescript::get_default_value(&field, &*cat)
            }),

            TemplateFunction::GenDeleteChildren => env.add_function(name, move |md: Md| {
                cascade::gen_delete_children(&md, &*cat).map_err(into_template_error)
            }),
            TemplateFunction::GenDeleteChildrenByParentId => {
                env.add_function(name, move |md: Md| {
                    cascade::gen_delete_children_by_parent_id(&md, &*cat)
                        .map_err(into_template_error)
                })
            }

            TemplateFunction::GetTemplateById => env.add_function(name, move |id: String| {
                let tpl = cat.template_by_id(&id).map_err(into_template_error)?;
                Ok::<_, Error>(Value::from_serialize(&*tpl))
            }),
            TemplateFunction::GetMetadataById => env.add_function(name, move |id: String| {
                let md = cat.metadata_by_id(&id).map_err(into_template_error)?;
                Ok::<_, Error>(Value::from_serialize(&*md))
            }),
            TemplateFunction::GetMetadataNameById => env.add_function(name, move |id: String| {
                cat.metadata_name_by_id(&id).map_err(into_template_error)
            }),
            TemplateFunction::GetMetadataByName => env.add_function(name, move |md_name: String| {
                let md = cat.metadata_by_name(&md_name).map_err(into_template_error)?;
                Ok::<_, Error>(Value::from_serialize(&*md))
            }),

            TemplateFunction::RecursiveGetRefMetadatas => {
                env.add_function(name, move |md: Md, must_children: Option<bool>| {
                    let refs = resolver::recursive_get_ref_metadatas(
                        &md,
                        must_children.unwrap_or(false),
                        &*cat,
                    );
                    metadata_values(&refs)
                })
            }
            TemplateFunction::DirectRefMetadatas => env.add_function(name, move |md: Md| {
                metadata_values(&resolver::direct_ref_metadatas(&md, &*cat))
            }),

            TemplateFunction::GenMenuConfig => env.add_function(name, |service: Svc, md: Md| {
                Value::from_serialize(config::gen_menu_config(&service, &md))
            }),
            TemplateFunction::GenPageConfig => env.add_function(name, |service: Svc, md: Md| {
                Value::from_serialize(config::gen_page_config(&service, &md))
            }),

            TemplateFunction::JsonMarshal => env.add_function(name, |value: Value| {
                serde_json::to_string(&value).map_err(|e| {
                    Error::new(ErrorKind::InvalidOperation, "json_marshal failed").with_source(e)
                })
            }),
            TemplateFunction::JsonUnmarshal => env.add_function(name, |text: String| {
                let parsed: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
                    Error::new(ErrorKind::InvalidOperation, "json_unmarshal failed").with_source(e)
                })?;
                Ok::<_, Error>(Value::from_serialize(parsed))
            }),
        }
    }
}

impl std::fmt::Display for TemplateFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Register every function of the closed set.
pub fn register_all(env: &mut Environment<'static>, catalog: &Arc<Catalog>) {
    for func in TemplateFunction::ALL {
        func.register(env, catalog);
    }
}

fn metadata_values(list: &[Arc<Metadata>]) -> Vec<Value> {
    list.iter().map(|md| Value::from_serialize(&**md)).collect()
}

fn into_template_error(err: crate::error::GenError) -> Error {
    Error::new(ErrorKind::InvalidOperation, err.to_string()).with_source(err)
}

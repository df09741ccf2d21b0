//! TypeScript class fields and their default values.

use crate::convert::{is_boolean, is_numeric, map_type, to_lower_camel_case, TypeTarget};
use crate::model::{MetadataField, MetadataLookup};

pub fn gen_class_field<L>(field: &MetadataField, lookup: &L) -> String
where
    L: MetadataLookup + ?Sized,
{
    if field.is_timestamp() || field.is_id() {
        return String::new();
    }
    format!(
        "\n\t//{} {}\n\t{}: {}",
        field.display_name,
        field.comment,
        to_lower_camel_case(&field.name),
        map_type(field, TypeTarget::TypeScript, false, lookup)
    )
}

/// Initializer line of a default-valued object literal.
pub fn gen_class_default_value<L>(field: &MetadataField, lookup: &L) -> String
where
    L: MetadataLookup + ?Sized,
{
    if field.is_timestamp() || field.is_id() {
        return String::new();
    }
    let value = if field.is_array {
        "[]".to_string()
    } else {
        get_default_value(field, lookup)
    };
    format!("\n\t{}: {},", to_lower_camel_case(&field.name), value)
}

/// TypeScript literal for the field's default value.
pub fn get_default_value<L>(field: &MetadataField, lookup: &L) -> String
where
    L: MetadataLookup + ?Sized,
{
    if field.is_reference() {
        let ty = map_type(field, TypeTarget::TypeScript, false, lookup);
        return format!("{{}} as {ty}");
    }
    let dv = field.default_value.as_str();
    let fallback = if is_numeric(&field.ty) {
        "0"
    } else if is_boolean(&field.ty) {
        "false"
    } else {
        return format!("'{}'", dv.replace('\'', "\\'"));
    };
    if dv.is_empty() {
        fallback.to_string()
    } else {
        dv.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Metadata;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn lookup() -> HashMap<String, Arc<Metadata>> {
        let dept = Metadata {
            id: "dept".into(),
            name: "Department".into(),
            ..Default::default()
        };
        HashMap::from([("dept".to_string(), Arc::new(dept))])
    }

    fn field(name: &str, ty: &str) -> MetadataField {
        MetadataField {
            name: name.into(),
            ty: ty.into(),
            ..Default::default()
        }
    }

    #[test]
    fn class_field_uses_lower_camel_name() {
        let mut f = field("CellName", "varchar");
        f.display_name = "Cell".into();
        assert_eq!(
            gen_class_field(&f, &lookup()),
            "\n\t//Cell \n\tcellName: string"
        );
        assert_eq!(gen_class_field(&field("ID", "bigint"), &lookup()), "");
        assert_eq!(gen_class_field(&field("createdAt", "datetime"), &lookup()), "");
    }

    #[test]
    fn default_values_by_type() {
        let l = lookup();
        assert_eq!(get_default_value(&field("Age", "int"), &l), "0");
        let mut age = field("Age", "bigint");
        age.default_value = "18".into();
        assert_eq!(get_default_value(&age, &l), "18");
        assert_eq!(get_default_value(&field("On", "tinyint"), &l), "false");
        assert_eq!(get_default_value(&field("Name", "varchar"), &l), "''");
        let mut name = field("Name", "varchar");
        name.default_value = "o'k".into();
        assert_eq!(get_default_value(&name, &l), "'o\\'k'");

        let dept = MetadataField {
            name: "Dept".into(),
            ref_metadata: "dept".into(),
            ..Default::default()
        };
        assert_eq!(get_default_value(&dept, &l), "{} as Department");
    }

    #[test]
    fn class_default_value_lines() {
        let l = lookup();
        let mut tags = field("Tags", "varchar");
        tags.is_array = true;
        assert_eq!(gen_class_default_value(&tags, &l), "\n\ttags: [],");
        assert_eq!(gen_class_default_value(&field("Count", "int"), &l), "\n\tcount: 0,");
        assert_eq!(gen_class_default_value(&field("DeletedAt", "datetime"), &l), "");
    }
}

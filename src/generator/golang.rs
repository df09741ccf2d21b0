//! Go struct fields, query filters, protobuf conversions and swag annotations.
//!
//! Audit timestamps (`CreatedAt`, `UpdatedAt`, `DeletedAt`) come from the
//! embedded base model and are elided everywhere; the struct generator also
//! elides `ID` for the same reason.

use crate::convert::{
    is_boolean, is_numeric, is_textual, lc_first, map_type, to_camel_case, to_snake_case,
    TypeTarget, DEFAULT_VARCHAR_LENGTH,
};
use crate::model::{Metadata, MetadataField, MetadataLookup};

/// One field of a gorm model struct, with its leading comment line.
pub fn gen_struct_field<L>(field: &MetadataField, md: &Metadata, lookup: &L) -> String
where
    L: MetadataLookup + ?Sized,
{
    if field.is_timestamp() || field.is_id() {
        return String::new();
    }
    let go_type = map_type(field, TypeTarget::Go, false, lookup);
    let gorm = gorm_tag(field, md);
    let mut tags = format!("json:\"{}\" gorm:\"{}\"", lc_first(&field.name), gorm);
    if !field.copier {
        tags.push_str(" copier:\"-\"");
    }
    format!(
        "\n\t//{} {}\n\t{} {} `{}`",
        field.display_name,
        field.comment,
        to_camel_case(&field.name),
        go_type,
        tags
    )
}

fn gorm_tag(field: &MetadataField, md: &Metadata) -> String {
    if field.dot_not_gen {
        return "-".to_string();
    }
    if field.is_reference() {
        return String::new();
    }
    let mut parts = Vec::new();
    if is_textual(&field.ty) && field.ty != "longtext" {
        let size = if field.length == 0 {
            DEFAULT_VARCHAR_LENGTH
        } else {
            field.length
        };
        parts.push(format!("size:{size}"));
    }
    if field.index {
        parts.push("index".to_string());
    }
    if !field.comment.is_empty() {
        parts.push(format!("comment:{}", field.comment));
    }
    if field.unique {
        parts.push(format!("uniqueindex:{}_uidx1", md.name));
    }
    parts.join(";")
}

/// One field of a query/filter struct bound from JSON, form and URI.
pub fn gen_query_struct_field<L>(field: &MetadataField, lookup: &L) -> String
where
    L: MetadataLookup + ?Sized,
{
    let name = lc_first(&field.name);
    format!(
        "\n\t{} {} `json:\"{name}\" form:\"{name}\" uri:\"{name}\"`",
        to_camel_case(&field.name),
        map_type(field, TypeTarget::Go, false, lookup),
    )
}

/// gorm filter clause for a queryable field, empty when not queryable.
///
/// The enclosing handler template declares `req` (the bound query) and `db`.
pub fn gen_query_cond(field: &MetadataField) -> String {
    if !field.show_in_query {
        return String::new();
    }
    let camel = to_camel_case(&field.name);
    let column = to_snake_case(&field.name);
    if field.like {
        return format!(
            "\n\tif req.{camel} != \"\" {{\n\t\tdb = db.Where(\"{column} LIKE ?\", \"%\"+req.{camel}+\"%\")\n\t}}"
        );
    }
    if is_numeric(&field.ty) {
        return format!(
            "\n\tif req.{camel} > 0 {{\n\t\tdb = db.Where(\"{column} = ?\", req.{camel})\n\t}}"
        );
    }
    if is_boolean(&field.ty) {
        return format!("\n\tdb = db.Where(\"{column} = ?\", req.{camel})");
    }
    format!("\n\tif req.{camel} != \"\" {{\n\t\tdb = db.Where(\"{column} = ?\", req.{camel})\n\t}}")
}

/// Assignment converting a protobuf message field into the model struct.
///
/// A non-empty `pb_to_struct` names a converter function that is applied
/// to the field and wins over every other rule.
pub fn gen_pb_to_struct<L>(field: &MetadataField, lookup: &L) -> String
where
    L: MetadataLookup + ?Sized,
{
    if field.is_timestamp() {
        return String::new();
    }
    if !field.pb_to_struct.is_empty() {
        return converted(field, &field.pb_to_struct);
    }
    if field.is_id() {
        return "\n\tModel: commonmodel.Model{\n\t\tID: in.Id,\n\t},".to_string();
    }
    let camel = to_camel_case(&field.name);
    if field.is_reference() {
        let converter = reference_converter(field, lookup, "PBTo", "");
        return format!("\n\t{camel}: {converter}(in.{camel}),");
    }
    match date_helper(field, "Parse") {
        Some(helper) => format!("\n\t{camel}: utils.{helper}(in.{camel}),"),
        None => format!("\n\t{camel}: in.{camel},"),
    }
}

/// Assignment converting a model struct field into its protobuf message.
///
/// A non-empty `struct_to_pb` names a converter function that is applied
/// to the field and wins over every other rule.
pub fn gen_struct_to_pb<L>(field: &MetadataField, lookup: &L) -> String
where
    L: MetadataLookup + ?Sized,
{
    if field.is_timestamp() {
        return String::new();
    }
    if !field.struct_to_pb.is_empty() {
        return converted(field, &field.struct_to_pb);
    }
    if field.is_id() {
        return "\n\tId: in.ID,".to_string();
    }
    let camel = to_camel_case(&field.name);
    if field.is_reference() {
        let converter = reference_converter(field, lookup, "", "ToPB");
        return format!("\n\t{camel}: {converter}(in.{camel}),");
    }
    match date_helper(field, "Format") {
        Some(helper) => format!("\n\t{camel}: utils.{helper}(in.{camel}),"),
        None => format!("\n\t{camel}: in.{camel},"),
    }
}

/// `{Field}: {converter}(in.{Field}),`
fn converted(field: &MetadataField, converter: &str) -> String {
    let camel = to_camel_case(&field.name);
    format!("\n\t{camel}: {converter}(in.{camel}),")
}

/// `PBToDepartment` / `DepartmentsToPB` style converter name for a reference.
fn reference_converter<L>(field: &MetadataField, lookup: &L, prefix: &str, suffix: &str) -> String
where
    L: MetadataLookup + ?Sized,
{
    let name = lookup
        .lookup(&field.ref_metadata)
        .map(|md| to_camel_case(&md.name))
        .unwrap_or_default();
    let plural = if field.is_array { "s" } else { "" };
    format!("{prefix}{name}{plural}{suffix}")
}

/// `ParseDate`, `ParseSqlNullTime`, `FormatSqlNullDate`, ... for date fields.
fn date_helper(field: &MetadataField, verb: &str) -> Option<String> {
    let unit = match field.ty.as_str() {
        "date" => "Date",
        "datetime" => "Time",
        _ => return None,
    };
    let nullable = if field.not_null { "" } else { "SqlNull" };
    Some(format!("{verb}{nullable}{unit}"))
}

/// swag `@Param` annotation for a queryable field.
pub fn gen_swag_query_param<L>(field: &MetadataField, lookup: &L) -> String
where
    L: MetadataLookup + ?Sized,
{
    if !field.show_in_query {
        return String::new();
    }
    let description = if field.display_name.is_empty() {
        &field.comment
    } else {
        &field.display_name
    };
    format!(
        "\n// @Param {} query {} false \"{}\"",
        lc_first(&field.name),
        map_type(field, TypeTarget::Go, false, lookup),
        description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn cell() -> Metadata {
        Metadata {
            name: "Cell".into(),
            ..Default::default()
        }
    }

    #[test]
    fn struct_field_with_tags() {
        let mut f = field("Name", "varchar");
        f.display_name = "Name".into();
        f.comment = "cell name".into();
        f.unique = true;
        f.index = true;
        f.copier = true;
        assert_eq!(
            gen_struct_field(&f, &cell(), &lookup()),
            "\n\t//Name cell name\n\tName string `json:\"name\" gorm:\"size:100;index;comment:cell name;uniqueindex:Cell_uidx1\"`"
        );
    }

    #[test]
    fn struct_field_excludes_from_copier_by_default() {
        let f = field("Count", "int");
        assert_eq!(
            gen_struct_field(&f, &cell(), &lookup()),
            "\n\t// \n\tCount int32 `json:\"count\" gorm:\"\" copier:\"-\"`"
        );
    }

    #[test]
    fn struct_field_elides_base_model_columns() {
        for name in ["CreatedAt", "updatedat", "DELETEDAT", "ID", "id"] {
            assert_eq!(gen_struct_field(&field(name, "datetime"), &cell(), &lookup()), "");
        }
    }

    #[test]
    fn struct_field_ignored_and_reference() {
        let mut ignored = field("Cache", "varchar");
        ignored.dot_not_gen = true;
        assert!(gen_struct_field(&ignored, &cell(), &lookup()).contains("gorm:\"-\""));

        let dept = MetadataField {
            name: "Dept".into(),
            ref_metadata: "dept".into(),
            copier: true,
            ..Default::default()
        };
        assert!(gen_struct_field(&dept, &cell(), &lookup())
            .ends_with("Dept *Department `json:\"dept\" gorm:\"\"`"));
    }

    #[test]
    fn query_conditions_by_type() {
        let mut like = field("Name", "varchar");
        like.show_in_query = true;
        like.like = true;
        assert_eq!(
            gen_query_cond(&like),
            "\n\tif req.Name != \"\" {\n\t\tdb = db.Where(\"name LIKE ?\", \"%\"+req.Name+\"%\")\n\t}"
        );

        let mut num = field("Age", "int");
        num.show_in_query = true;
        assert!(gen_query_cond(&num).contains("if req.Age > 0 {\n\t\tdb = db.Where(\"age = ?\", req.Age)"));

        let mut flag = field("Enabled", "bool");
        flag.show_in_query = true;
        assert_eq!(gen_query_cond(&flag), "\n\tdb = db.Where(\"enabled = ?\", req.Enabled)");

        let mut text = field("Code", "varchar");
        text.show_in_query = true;
        assert!(gen_query_cond(&text).contains("if req.Code != \"\" {"));

        assert_eq!(gen_query_cond(&field("Hidden", "varchar")), "");
    }

    #[test]
    fn query_struct_field_binds_all_sources() {
        assert_eq!(
            gen_query_struct_field(&field("CellName", "varchar"), &lookup()),
            "\n\tCellName string `json:\"cellName\" form:\"cellName\" uri:\"cellName\"`"
        );
    }

    #[test]
    fn pb_conversions() {
        let l = lookup();
        assert_eq!(
            gen_pb_to_struct(&field("ID", "bigint"), &l),
            "\n\tModel: commonmodel.Model{\n\t\tID: in.Id,\n\t},"
        );
        assert_eq!(gen_struct_to_pb(&field("ID", "bigint"), &l), "\n\tId: in.ID,");
        assert_eq!(gen_pb_to_struct(&field("Name", "varchar"), &l), "\n\tName: in.Name,");
        assert_eq!(gen_struct_to_pb(&field("CreatedAt", "datetime"), &l), "");

        let mut born = field("Born", "date");
        assert_eq!(
            gen_pb_to_struct(&born, &l),
            "\n\tBorn: utils.ParseSqlNullDate(in.Born),"
        );
        born.not_null = true;
        assert_eq!(gen_struct_to_pb(&born, &l), "\n\tBorn: utils.FormatDate(in.Born),");

        let seen = field("SeenAt", "datetime");
        assert_eq!(
            gen_struct_to_pb(&seen, &l),
            "\n\tSeenAt: utils.FormatSqlNullTime(in.SeenAt),"
        );

        let mut depts = MetadataField {
            name: "Depts".into(),
            ref_metadata: "dept".into(),
            is_array: true,
            ..Default::default()
        };
        assert_eq!(
            gen_pb_to_struct(&depts, &l),
            "\n\tDepts: PBToDepartments(in.Depts),"
        );
        assert_eq!(
            gen_struct_to_pb(&depts, &l),
            "\n\tDepts: DepartmentsToPB(in.Depts),"
        );
        depts.is_array = false;
        assert_eq!(gen_struct_to_pb(&depts, &l), "\n\tDepts: DepartmentToPB(in.Depts),");
    }

    #[test]
    fn overrides_win_over_every_rule() {
        let l = lookup();
        let mut born = field("Born", "datetime");
        born.pb_to_struct = "utils.ParseBirthday".into();
        born.struct_to_pb = "utils.FormatBirthday".into();
        assert_eq!(
            gen_pb_to_struct(&born, &l),
            "\n\tBorn: utils.ParseBirthday(in.Born),"
        );
        assert_eq!(
            gen_struct_to_pb(&born, &l),
            "\n\tBorn: utils.FormatBirthday(in.Born),"
        );

        let mut dept = MetadataField {
            name: "Dept".into(),
            ref_metadata: "dept".into(),
            ..Default::default()
        };
        dept.pb_to_struct = "LoadDept".into();
        assert_eq!(gen_pb_to_struct(&dept, &l), "\n\tDept: LoadDept(in.Dept),");

        let mut id = field("ID", "bigint");
        id.struct_to_pb = "uint64".into();
        assert_eq!(gen_struct_to_pb(&id, &l), "\n\tID: uint64(in.ID),");
    }

    #[test]
    fn swag_param_for_query_fields() {
        let mut f = field("CellName", "varchar");
        f.display_name = "Cell name".into();
        assert_eq!(gen_swag_query_param(&f, &lookup()), "");
        f.show_in_query = true;
        assert_eq!(
            gen_swag_query_param(&f, &lookup()),
            "\n// @Param cellName query string false \"Cell name\""
        );
    }
}

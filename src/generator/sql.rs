//! MySQL DDL fragments.

use crate::convert::{column_type, table_name, to_snake_case};
use crate::model::{Metadata, MetadataField};

/// Primary key column emitted for the `id` field.
pub const ID_COLUMN: &str = "`id` bigint(20) unsigned NOT NULL AUTO_INCREMENT,PRIMARY KEY (`id`)";

/// Column definition for one field.
///
/// ```rust
/// use metagen::generator::sql::gen_create_column_sql;
/// use metagen::model::MetadataField;
///
/// let name = MetadataField { name: "Name".into(), ty: "varchar".into(), ..Default::default() };
/// assert_eq!(gen_create_column_sql(&name), "`name` varchar(100) NULL COMMENT '' DEFAULT NULL");
/// ```
pub fn gen_create_column_sql(field: &MetadataField) -> String {
    if field.is_id() {
        return ID_COLUMN.to_string();
    }
    let column = to_snake_case(&field.name);
    let ty = column_type(field);
    let comment = escape_comment(&field.comment);
    let default = if field.default_value.is_empty() {
        "NULL"
    } else {
        field.default_value.as_str()
    };

    if field.ty == "datetime" {
        return format!("`{column}` {ty} DEFAULT {default} COMMENT '{comment}'");
    }
    let null = if field.not_null { "NOT NULL" } else { "NULL" };
    format!("`{column}` {ty} {null} COMMENT '{comment}' DEFAULT {default}")
}

/// `KEY` clause for an indexed field, empty otherwise.
pub fn gen_create_index_sql(table: &str, field: &MetadataField) -> String {
    if !field.index {
        return String::new();
    }
    let column = to_snake_case(&field.name);
    format!("KEY `idx_{table}_{column}` (`{column}`)")
}

/// Composite `UNIQUE KEY` over the unique fields, empty when there are none.
pub fn gen_create_unique_index_sql(md: &Metadata) -> String {
    let columns: Vec<String> = md
        .unique_metadata_fields()
        .map(|f| format!("`{}`", to_snake_case(&f.name)))
        .collect();
    if columns.is_empty() {
        return String::new();
    }
    format!(
        "UNIQUE KEY `uidx_{}` ({})",
        table_name(&md.name),
        columns.join(",")
    )
}

/// Body of a `CREATE TABLE` statement: columns, unique key and indexes.
///
/// Reference fields are relations, not columns, and are skipped.
pub fn gen_create_sql(md: &Metadata) -> String {
    let mut md = md.clone();
    md.sort();
    let table = table_name(&md.name);
    let columns = md.metadata_fields.iter().filter(|f| !f.is_reference());

    let mut parts: Vec<String> = columns
        .clone()
        .map(|f| format!("\n{}", gen_create_column_sql(f)))
        .collect();
    let unique = gen_create_unique_index_sql(&md);
    if !unique.is_empty() {
        parts.push(format!("\n{unique}"));
    }
    parts.extend(
        columns
            .map(|f| gen_create_index_sql(&table, f))
            .filter(|idx| !idx.is_empty())
            .map(|idx| format!("\n{idx}")),
    );
    parts.join(",")
}

fn escape_comment(comment: &str) -> String {
    comment.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, ty: &str) -> MetadataField {
        MetadataField {
            name: name.into(),
            ty: ty.into(),
            ..Default::default()
        }
    }

    #[test]
    fn id_column_is_primary_key() {
        assert_eq!(gen_create_column_sql(&field("ID", "bigint")), ID_COLUMN);
        assert_eq!(gen_create_column_sql(&field("id", "bigint")), ID_COLUMN);
    }

    #[test]
    fn column_forms() {
        let mut f = field("Age", "int");
        f.not_null = true;
        f.comment = "age in years".into();
        f.default_value = "0".into();
        assert_eq!(
            gen_create_column_sql(&f),
            "`age` int(11) NOT NULL COMMENT 'age in years' DEFAULT 0"
        );
        assert_eq!(
            gen_create_column_sql(&field("PublishedAt", "datetime")),
            "`published_at` datetime(3) DEFAULT NULL COMMENT ''"
        );
        assert_eq!(
            gen_create_column_sql(&field("Body", "longtext")),
            "`body` longtext NULL COMMENT '' DEFAULT NULL"
        );
        assert_eq!(
            gen_create_column_sql(&field("Active", "bool")),
            "`active` tinyint(1) NULL COMMENT '' DEFAULT NULL"
        );
    }

    #[test]
    fn comment_quotes_are_escaped() {
        let mut f = field("Note", "varchar");
        f.comment = "it's".into();
        assert!(gen_create_column_sql(&f).contains("COMMENT 'it''s'"));
    }

    #[test]
    fn cell_table_scenario() {
        let mut name = field("Name", "varchar");
        name.unique = true;
        let cell = Metadata {
            name: "Cell".into(),
            metadata_fields: vec![name.clone()],
            ..Default::default()
        };
        assert_eq!(
            gen_create_column_sql(&name),
            "`name` varchar(100) NULL COMMENT '' DEFAULT NULL"
        );
        assert_eq!(gen_create_unique_index_sql(&cell), "UNIQUE KEY `uidx_cell` (`name`)");
    }

    #[test]
    fn unique_index_empty_without_unique_fields() {
        let md = Metadata {
            name: "Cell".into(),
            metadata_fields: vec![field("Name", "varchar")],
            ..Default::default()
        };
        assert_eq!(gen_create_unique_index_sql(&md), "");
    }

    #[test]
    fn index_clause() {
        let mut f = field("CellCode", "varchar");
        assert_eq!(gen_create_index_sql("cell", &f), "");
        f.index = true;
        assert_eq!(
            gen_create_index_sql("cell", &f),
            "KEY `idx_cell_cell_code` (`cell_code`)"
        );
    }

    #[test]
    fn create_sql_joins_parts_in_order() {
        let mut code = field("Code", "varchar");
        code.unique = true;
        code.index = true;
        code.order = 2;
        let mut id = field("ID", "bigint");
        id.order = 1;
        let owner = MetadataField {
            name: "Owner".into(),
            ref_metadata: "x".into(),
            order: 3,
            ..Default::default()
        };
        let md = Metadata {
            name: "Cell".into(),
            metadata_fields: vec![code, owner, id],
            ..Default::default()
        };
        assert_eq!(
            gen_create_sql(&md),
            format!(
                "\n{ID_COLUMN},\n`code` varchar(100) NULL COMMENT '' DEFAULT NULL,\nUNIQUE KEY `uidx_cell` (`code`),\nKEY `idx_cell_code` (`code`)"
            )
        );
    }
}

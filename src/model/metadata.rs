use serde::{Deserialize, Serialize};

/// Declarative description of one data entity.
///
/// `unique_fields`, `fields` and `preloads` are derived by
/// [`crate::resolver::init_gen_code`] and are never authoritative; they are
/// recomputed every time the Metadata enters the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    pub id: String,
    pub tenant_id: String,
    pub project_id: String,
    pub name: String,
    pub display_name: String,
    /// Nesting depth: parent's level + 1, or 0 at the root.
    pub level: u32,
    pub parent_id: String,
    pub description: String,
    pub package: String,
    pub system: String,
    pub metadata_fields: Vec<MetadataField>,
    /// `" col =? "` fragments joined by `" and "`.
    pub unique_fields: String,
    /// `"m.Field"` accessors joined by `", "`.
    pub fields: String,
    /// Dotted relation paths to eager-load.
    pub preloads: Vec<String>,
}

/// One attribute of a [`Metadata`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetadataField {
    pub id: String,
    pub metadata_id: String,
    pub name: String,
    /// Logical type: bigint, int, varchar, longtext, datetime, date, tinyint, bool, ...
    #[serde(rename = "type")]
    pub ty: String,
    pub length: u32,
    pub not_null: bool,
    pub comment: String,
    pub is_array: bool,
    /// ID of the referenced Metadata, empty for scalar fields.
    pub ref_metadata: String,
    pub display_name: String,
    pub show_in_table: bool,
    pub show_in_edit: bool,
    pub component: String,
    pub unique: bool,
    pub index: bool,
    pub default_value: String,
    pub show_in_query: bool,
    /// Sort key; negative values sort before unnumbered fields.
    pub order: i32,
    pub like: bool,
    pub copier: bool,
    pub dot_not_gen: bool,
    /// Converter function applied as `{Field}: {fn}(in.{Field})`, overrides
    /// generic protobuf → struct conversion.
    pub pb_to_struct: String,
    /// Converter function applied as `{Field}: {fn}(in.{Field})`, overrides
    /// generic struct → protobuf conversion.
    #[serde(rename = "structToPB", alias = "structToPb")]
    pub struct_to_pb: String,
}

impl Metadata {
    /// Order fields by `order`. Stable and idempotent.
    pub fn sort(&mut self) {
        self.metadata_fields.sort_by_key(|f| f.order);
    }

    /// Number the fields that have no explicit order by their position.
    pub fn field_sort(&mut self) {
        for (i, field) in self.metadata_fields.iter_mut().enumerate() {
            if field.order == 0 {
                field.order = i32::try_from(i + 1).unwrap_or(i32::MAX);
            }
        }
    }

    /// Set `level` from the parent, if any.
    pub fn compute_level(&mut self, parent: Option<&Metadata>) {
        self.level = parent.map(|p| p.level + 1).unwrap_or(0);
    }

    /// Fields flagged unique, in field order.
    pub fn unique_metadata_fields(&self) -> impl Iterator<Item = &MetadataField> {
        self.metadata_fields.iter().filter(|f| f.unique)
    }

    pub fn field(&self, name: &str) -> Option<&MetadataField> {
        self.metadata_fields.iter().find(|f| f.name == name)
    }
}

impl MetadataField {
    pub fn is_reference(&self) -> bool {
        !self.ref_metadata.is_empty()
    }

    /// Audit columns supplied by the base model of every generated type.
    pub fn is_timestamp(&self) -> bool {
        ["CreatedAt", "UpdatedAt", "DeletedAt"]
            .iter()
            .any(|t| self.name.eq_ignore_ascii_case(t))
    }

    pub fn is_id(&self) -> bool {
        self.name.eq_ignore_ascii_case("id")
    }
}

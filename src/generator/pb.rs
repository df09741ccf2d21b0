//! Protobuf message properties.

use crate::convert::{lc_first, map_type, TypeTarget};
use crate::model::{MetadataField, MetadataLookup};

/// Message property numbered `index + 2` (tag 1 is reserved for `id`).
///
/// `query_only` renders referenced messages as their `Info` projection.
pub fn gen_pb_message_property<L>(
    index: usize,
    field: &MetadataField,
    query_only: bool,
    lookup: &L,
) -> String
where
    L: MetadataLookup + ?Sized,
{
    if field.is_timestamp() {
        return String::new();
    }
    format!(
        "\n\t//{} {}\n\t{} {}={};",
        field.display_name,
        field.comment,
        map_type(field, TypeTarget::Protobuf, query_only, lookup),
        lc_first(&field.name),
        index + 2
    )
}

/// Query request property numbered `index + 4` (tags 1-3 carry paging), with
/// an `@inject_tag` line binding it from form and URI parameters.
///
/// References use the full message type, never the `Info` projection.
pub fn gen_pb_query_cond<L>(index: usize, field: &MetadataField, lookup: &L) -> String
where
    L: MetadataLookup + ?Sized,
{
    if !field.show_in_query {
        return String::new();
    }
    let name = lc_first(&field.name);
    format!(
        "\n\t//{} {}\n\t// @inject_tag: form:\"{name}\" uri:\"{name}\"\n\t{} {name}={};",
        field.display_name,
        field.comment,
        map_type(field, TypeTarget::Protobuf, false, lookup),
        index + 4
    )
}

//! # Reference resolver
//!
//! Walks the Metadata reference graph to compute the derived fields of a
//! Metadata (`unique_fields`, `fields`, `preloads`) and the sets of related
//! Metadata that templates iterate over.
//!
//! The graph may contain cycles (self references, A→B→A, A→B→C→A). Every
//! walk carries an explicit set of the Metadata IDs on the current path,
//! seeded with the root, and never re-enters one of them. Dangling references
//! are logged and skipped.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use crate::convert::{to_camel_case, to_snake_case};
use crate::model::{Metadata, MetadataField, MetadataLookup};

/// Recompute the derived fields of `md` in place.
///
/// Idempotent: running it twice yields the same Metadata.
pub fn init_gen_code<L>(md: &mut Metadata, lookup: &L)
where
    L: MetadataLookup + ?Sized,
{
    md.sort();

    let (unique_fields, fields) = unique_key(md);
    md.unique_fields = unique_fields;
    md.fields = fields;

    let preloads = recursive_ref_metadatas(md, &md.metadata_fields, "", lookup);
    md.preloads = preloads;
}

/// `(" col =? " and ..., "m.Field, ...")` for the unique fields of `md`.
fn unique_key(md: &Metadata) -> (String, String) {
    let unique: Vec<&MetadataField> = md.unique_metadata_fields().collect();
    if unique.is_empty() {
        return (" name=? ".to_string(), "m.Name".to_string());
    }
    let conds: Vec<String> = unique
        .iter()
        .map(|f| format!(" {} =? ", to_snake_case(&f.name)))
        .collect();
    let accessors: Vec<String> = unique
        .iter()
        .map(|f| format!("m.{}", to_camel_case(&f.name)))
        .collect();
    (conds.join(" and "), accessors.join(", "))
}

/// Preload paths contributed by one field of `parent`, prefixed with `prefix.`
/// when `prefix` is non-empty.
pub fn recursive_ref_metadata<L>(
    parent: &Metadata,
    field: &MetadataField,
    prefix: &str,
    lookup: &L,
) -> Vec<String>
where
    L: MetadataLookup + ?Sized,
{
    let mut visiting = HashSet::from([parent.id.clone()]);
    with_prefix(prefix, walk_field(parent, field, lookup, &mut visiting))
}

/// Preload paths contributed by `fields` of `parent`, each prefixed with
/// `prefix.` when `prefix` is non-empty.
pub fn recursive_ref_metadatas<L>(
    parent: &Metadata,
    fields: &[MetadataField],
    prefix: &str,
    lookup: &L,
) -> Vec<String>
where
    L: MetadataLookup + ?Sized,
{
    let mut visiting = HashSet::from([parent.id.clone()]);
    walk_fields(parent, fields, prefix, lookup, &mut visiting)
}

fn walk_fields<L>(
    parent: &Metadata,
    fields: &[MetadataField],
    prefix: &str,
    lookup: &L,
    visiting: &mut HashSet<String>,
) -> Vec<String>
where
    L: MetadataLookup + ?Sized,
{
    let mut paths = Vec::new();
    for field in fields {
        paths.extend(walk_field(parent, field, lookup, visiting));
    }
    with_prefix(prefix, paths)
}

fn walk_field<L>(
    parent: &Metadata,
    field: &MetadataField,
    lookup: &L,
    visiting: &mut HashSet<String>,
) -> Vec<String>
where
    L: MetadataLookup + ?Sized,
{
    if !field.is_reference() || field.ref_metadata == parent.id {
        return Vec::new();
    }
    if visiting.contains(&field.ref_metadata) {
        return Vec::new();
    }
    let Some(target) = lookup.lookup(&field.ref_metadata) else {
        warn!(
            metadata = %parent.name,
            field = %field.name,
            ref_metadata = %field.ref_metadata,
            "dangling metadata reference skipped"
        );
        return Vec::new();
    };

    let name = to_camel_case(&field.name);
    visiting.insert(target.id.clone());
    let nested = walk_fields(&target, &target.metadata_fields, &name, lookup, visiting);
    visiting.remove(&target.id);

    if nested.is_empty() {
        vec![name]
    } else {
        nested
    }
}

fn with_prefix(prefix: &str, paths: Vec<String>) -> Vec<String> {
    if prefix.is_empty() {
        return paths;
    }
    paths
        .into_iter()
        .map(|p| format!("{prefix}.{p}"))
        .collect()
}

/// Every Metadata transitively referenced from `md`, deduplicated by ID in
/// discovery order, `md` itself excluded.
///
/// With `must_children` only true children are followed: a referenced
/// Metadata whose `parent_id` is not the referencing Metadata is skipped along
/// with everything below it.
pub fn recursive_get_ref_metadatas<L>(
    md: &Metadata,
    must_children: bool,
    lookup: &L,
) -> Vec<Arc<Metadata>>
where
    L: MetadataLookup + ?Sized,
{
    let mut seen = HashSet::from([md.id.clone()]);
    let mut out = Vec::new();
    collect_refs(md, must_children, lookup, &mut seen, &mut out);
    out
}

fn collect_refs<L>(
    md: &Metadata,
    must_children: bool,
    lookup: &L,
    seen: &mut HashSet<String>,
    out: &mut Vec<Arc<Metadata>>,
) where
    L: MetadataLookup + ?Sized,
{
    for field in md.metadata_fields.iter().filter(|f| f.is_reference()) {
        if seen.contains(&field.ref_metadata) {
            continue;
        }
        let Some(target) = lookup.lookup(&field.ref_metadata) else {
            warn!(
                metadata = %md.name,
                field = %field.name,
                ref_metadata = %field.ref_metadata,
                "dangling metadata reference skipped"
            );
            continue;
        };
        if must_children && target.parent_id != md.id {
            continue;
        }
        seen.insert(target.id.clone());
        out.push(Arc::clone(&target));
        collect_refs(&target, must_children, lookup, seen, out);
    }
}

/// Metadata referenced by the immediate fields of `md`, deduplicated,
/// self-references skipped.
pub fn direct_ref_metadatas<L>(md: &Metadata, lookup: &L) -> Vec<Arc<Metadata>>
where
    L: MetadataLookup + ?Sized,
{
    let mut seen = HashSet::from([md.id.clone()]);
    let mut out = Vec::new();
    for field in md.metadata_fields.iter().filter(|f| f.is_reference()) {
        if !seen.insert(field.ref_metadata.clone()) {
            continue;
        }
        match lookup.lookup(&field.ref_metadata) {
            Some(target) => out.push(target),
            None => warn!(
                metadata = %md.name,
                field = %field.name,
                ref_metadata = %field.ref_metadata,
                "dangling metadata reference skipped"
            ),
        }
    }
    out
}

/// Metadata referenced from `md` whose `parent_id` is `md`, in field order,
/// paired with the referencing field.
pub fn true_children<'a, L>(
    md: &'a Metadata,
    lookup: &L,
) -> Vec<(&'a MetadataField, Arc<Metadata>)>
where
    L: MetadataLookup + ?Sized,
{
    md.metadata_fields
        .iter()
        .filter(|f| f.is_reference() && f.ref_metadata != md.id)
        .filter_map(|f| lookup.lookup(&f.ref_metadata).map(|child| (f, child)))
        .filter(|(_, child)| child.parent_id == md.id)
        .collect()
}

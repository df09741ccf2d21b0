//! Cascade-delete helpers for parent/child Metadata trees.
//!
//! A child is a Metadata referenced from a parent field whose `parent_id`
//! is the parent. The tree is folded into a list of [`DeleteFunction`]s,
//! deepest first, and only then rendered, so a function is always defined
//! before the function that calls it.
//!
//! Diffing recurses: a child kept between `old` and `m` is itself diffed
//! against its new version, while a removed child takes its whole subtree
//! with it through the by-parent functions. Record IDs are strings.

use std::collections::HashSet;

use askama::Template;

use crate::convert::to_camel_case;
use crate::error::Result;
use crate::model::{Metadata, MetadataField, MetadataLookup};
use crate::resolver::true_children;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// `DeleteXxx(tx, old, m)`: delete children present in `old` but not in `m`.
    Diff,
    /// `DeleteXxxByParent(tx, m)`: delete every child of `m`.
    ByParent,
}

/// One generated delete function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFunction {
    pub name: String,
    pub mode: DeleteMode,
    /// Struct owning the child field.
    pub owner: String,
    /// Field holding the child (or children) on `owner`.
    pub field: String,
    pub child_struct: String,
    pub is_array: bool,
    /// By-parent functions to run for each deleted child, already defined.
    pub nested_calls: Vec<String>,
    /// Diff functions to run for each kept child as `(tx, old, m)`, already
    /// defined. Always empty in by-parent mode.
    pub kept_calls: Vec<String>,
}

impl DeleteFunction {
    fn new(
        owner: &Metadata,
        field: &MetadataField,
        child: &Metadata,
        mode: DeleteMode,
        nested_calls: Vec<String>,
        kept_calls: Vec<String>,
    ) -> Self {
        let owner = to_camel_case(&owner.name);
        let field_name = to_camel_case(&field.name);
        let suffix = match mode {
            DeleteMode::Diff => "",
            DeleteMode::ByParent => "ByParent",
        };
        Self {
            name: format!("Delete{owner}{field_name}{suffix}"),
            mode,
            owner,
            field: field_name,
            child_struct: to_camel_case(&child.name),
            is_array: field.is_array,
            nested_calls,
            kept_calls,
        }
    }

    pub fn render(&self) -> Result<String> {
        let code = match self.mode {
            DeleteMode::Diff => DeleteChildrenTemplate { f: self }.render()?,
            DeleteMode::ByParent => DeleteChildrenByParentTemplate { f: self }.render()?,
        };
        Ok(code)
    }
}

#[derive(Template)]
#[template(path = "delete_children.go.txt", escape = "none")]
struct DeleteChildrenTemplate<'a> {
    f: &'a DeleteFunction,
}

#[derive(Template)]
#[template(path = "delete_children_by_parent.go.txt", escape = "none")]
struct DeleteChildrenByParentTemplate<'a> {
    f: &'a DeleteFunction,
}

/// Plan the delete functions for the children of `md`, dependencies first.
pub fn plan_delete_functions<L>(md: &Metadata, mode: DeleteMode, lookup: &L) -> Vec<DeleteFunction>
where
    L: MetadataLookup + ?Sized,
{
    let mut planner = Planner {
        visiting: HashSet::from([md.id.clone()]),
        emitted: HashSet::new(),
        out: Vec::new(),
    };
    match mode {
        DeleteMode::ByParent => {
            planner.by_parent(md, lookup);
        }
        DeleteMode::Diff => {
            planner.diff(md, lookup);
        }
    }
    planner.out
}

struct Planner {
    visiting: HashSet<String>,
    emitted: HashSet<String>,
    out: Vec<DeleteFunction>,
}

impl Planner {
    /// Emit diff functions for the subtree below `md`, with the by-parent
    /// helpers they need; returns the names of those covering `md`'s direct
    /// children.
    fn diff<L>(&mut self, md: &Metadata, lookup: &L) -> Vec<String>
    where
        L: MetadataLookup + ?Sized,
    {
        let mut calls = Vec::new();
        for (field, child) in true_children(md, lookup) {
            if !self.visiting.insert(child.id.clone()) {
                continue;
            }
            let nested = self.by_parent(&child, lookup);
            let kept = self.diff(&child, lookup);
            self.visiting.remove(&child.id);
            let func = DeleteFunction::new(md, field, &child, DeleteMode::Diff, nested, kept);
            calls.push(func.name.clone());
            self.emit(func);
        }
        calls
    }

    /// Emit by-parent functions for the subtree below `md`; returns the names
    /// of those covering `md`'s direct children.
    fn by_parent<L>(&mut self, md: &Metadata, lookup: &L) -> Vec<String>
    where
        L: MetadataLookup + ?Sized,
    {
        let mut calls = Vec::new();
        for (field, child) in true_children(md, lookup) {
            if !self.visiting.insert(child.id.clone()) {
                continue;
            }
            let nested = self.by_parent(&child, lookup);
            self.visiting.remove(&child.id);
            let func =
                DeleteFunction::new(md, field, &child, DeleteMode::ByParent, nested, Vec::new());
            calls.push(func.name.clone());
            self.emit(func);
        }
        calls
    }

    fn emit(&mut self, func: DeleteFunction) {
        if self.emitted.insert(func.name.clone()) {
            self.out.push(func);
        }
    }
}

fn render_all(functions: &[DeleteFunction]) -> Result<String> {
    let rendered = functions
        .iter()
        .map(DeleteFunction::render)
        .collect::<Result<Vec<_>>>()?;
    Ok(rendered.join("\n\n"))
}

/// Go functions deleting the children removed between an old and a new
/// version of `md`, preceded by the by-parent helpers they call.
pub fn gen_delete_children<L>(md: &Metadata, lookup: &L) -> Result<String>
where
    L: MetadataLookup + ?Sized,
{
    render_all(&plan_delete_functions(md, DeleteMode::Diff, lookup))
}

/// Go functions deleting every child of `md`, recursively.
pub fn gen_delete_children_by_parent_id<L>(md: &Metadata, lookup: &L) -> Result<String>
where
    L: MetadataLookup + ?Sized,
{
    render_all(&plan_delete_functions(md, DeleteMode::ByParent, lookup))
}

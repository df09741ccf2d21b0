use std::sync::Arc;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use tracing::debug;

use super::context::GenContext;
use super::functions;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::Template;

/// Renders stored templates against a [`GenContext`].
///
/// One `Environment` is built up front with every registry function bound to
/// the shared catalog. Templates are compiled per render from their stored
/// source, so catalog edits are picked up on the next call without any cache
/// invalidation.
pub struct RenderEngine {
    env: Environment<'static>,
    catalog: Arc<Catalog>,
}

impl RenderEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let mut env = Environment::new();
        // Generated code is not HTML; a missing context key is an authoring error.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        functions::register_all(&mut env, &catalog);
        Self { env, catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Render `template` with `ctx`. Parse and execution errors are returned
    /// unchanged.
    pub fn render(&self, template: &Template, ctx: &GenContext<'_>) -> Result<String> {
        debug!(
            template_id = %template.id,
            template = %template.name,
            metadata = %ctx.metadata.name,
            "rendering template"
        );
        let value = Value::from_serialize(ctx);
        let out = self
            .env
            .render_named_str(&template.name, &template.content, value)?;
        Ok(out)
    }
}

impl std::fmt::Debug for RenderEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderEngine")
            .field("metadata", &self.catalog.metadata_count())
            .field("templates", &self.catalog.template_count())
            .finish()
    }
}

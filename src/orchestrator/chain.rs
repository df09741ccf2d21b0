//! Start → Body → End template chains.

use std::fmt;

use tracing::debug;

use super::memo::ConfigMemo;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::generator::{GenContext, RenderEngine};
use crate::model::{CodeFile, FileTemplate, Metadata, Service};

/// Separator between the rendered outputs of consecutive stages.
pub const CODE_JOINER: &str = "\n\n";
/// Separator between the template sources of consecutive stages.
pub const SOURCE_JOINER: &str = "\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStage {
    Start,
    Body(usize),
    End,
}

impl fmt::Display for ChainStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainStage::Start => f.write_str("start"),
            ChainStage::Body(i) => write!(f, "body[{i}]"),
            ChainStage::End => f.write_str("end"),
        }
    }
}

/// Ordered template IDs producing one file. Empty IDs are skipped.
#[derive(Debug, Clone, Copy)]
pub struct TemplateChain<'a> {
    start: &'a str,
    body: &'a [String],
    end: &'a str,
}

impl<'a> TemplateChain<'a> {
    pub fn new(start: &'a str, body: &'a [String], end: &'a str) -> Self {
        Self { start, body, end }
    }

    pub fn from_code_file(file: &'a CodeFile) -> Self {
        Self::new(&file.start, &file.body, &file.end)
    }

    pub fn from_file_template(file: &'a FileTemplate) -> Self {
        Self::new(&file.start, &file.body, &file.end)
    }

    /// Stages that will actually render, in order.
    pub fn stages(&self) -> Vec<(ChainStage, &'a str)> {
        let start = std::iter::once((ChainStage::Start, self.start));
        let body = self
            .body
            .iter()
            .enumerate()
            .map(|(i, id)| (ChainStage::Body(i), id.as_str()));
        let end = std::iter::once((ChainStage::End, self.end));
        start
            .chain(body)
            .chain(end)
            .filter(|(_, id)| !id.is_empty())
            .collect()
    }
}

/// Assembled output of one chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainOutput {
    /// Sources of every rendered template, joined by [`SOURCE_JOINER`].
    pub template_content: String,
    /// Rendered outputs, joined by [`CODE_JOINER`].
    pub code: String,
}

/// Run `chain` for `md`, accumulating into `code_file`.
///
/// Each render sees `code_file` as assembled so far. The first failing stage
/// aborts the chain and leaves `code_file` partially filled.
pub(crate) fn render_chain(
    engine: &RenderEngine,
    chain: TemplateChain<'_>,
    md: &Metadata,
    service: &Service,
    code_file: &mut CodeFile,
    memo: &mut ConfigMemo,
) -> Result<ChainOutput> {
    let stages = chain.stages();
    if stages.is_empty() {
        return Ok(ChainOutput::default());
    }
    let catalog: &Catalog = engine.catalog();
    let config = memo.get_or_generate(service, md);
    let mut out = ChainOutput::default();

    for (i, (stage, template_id)) in stages.into_iter().enumerate() {
        let template = catalog.template_by_id(template_id)?;
        let ctx = GenContext {
            metadata: md,
            service,
            code_file: &*code_file,
            template: &template,
            config,
        };
        let rendered = engine.render(&template, &ctx)?;
        debug!(%stage, template_id, bytes = rendered.len(), "stage rendered");

        if i > 0 {
            out.code.push_str(CODE_JOINER);
            out.template_content.push_str(SOURCE_JOINER);
        }
        out.code.push_str(&rendered);
        out.template_content.push_str(&template.content);
        code_file.code.clone_from(&out.code);
        code_file.template_content.clone_from(&out.template_content);
    }
    Ok(out)
}

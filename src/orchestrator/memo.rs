use std::collections::HashMap;

use crate::generator::{gen_menu_config, MenuConfig};
use crate::model::{Metadata, Service};

/// Menu/API descriptors computed at most once per Metadata within one run.
///
/// Every template of every file rendered for the same Metadata sees the same
/// generated IDs. A memo belongs to exactly one run and is dropped with it.
#[derive(Debug, Default)]
pub struct ConfigMemo {
    configs: HashMap<String, MenuConfig>,
}

impl ConfigMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// The config for `md`, generating it against `service` on first use.
    pub fn get_or_generate(&mut self, service: &Service, md: &Metadata) -> &MenuConfig {
        self.configs
            .entry(md.id.clone())
            .or_insert_with(|| gen_menu_config(service, md))
    }

    pub fn get(&self, metadata_id: &str) -> Option<&MenuConfig> {
        self.configs.get(metadata_id)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

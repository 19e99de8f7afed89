//! CLI command implementations

pub mod bulk;
pub mod completions;
pub mod import;
pub mod list;
pub mod rm;
pub mod set;
pub mod status;
pub mod test;

use miette::Result;

use crate::api::StorageClient;
use crate::cli::GlobalOpts;
use crate::core::{Config, EntityKind};

/// Build the storage client from layered config plus CLI overrides
pub(crate) fn client(global: &GlobalOpts) -> Result<StorageClient> {
    let mut config = Config::load();
    if let Some(url) = &global.api_url {
        config.api_url = Some(url.clone());
    }
    StorageClient::new(&config).map_err(|e| miette::miette!("{}", e))
}

pub(crate) fn parse_entity_kind(s: &str) -> Result<EntityKind, String> {
    s.parse::<EntityKind>().map_err(|e| e.to_string())
}

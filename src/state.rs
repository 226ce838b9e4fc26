use crate::config::AppConfig;
use crate::error::Result;
use crate::inventory::Inventory;
use crate::label::LabelRenderer;
use crate::login::CredentialStore;
use crate::mirror::Mirror;
use crate::remote::{HttpSheetClient, RemoteStore};
use crate::settings::SettingsStore;
use std::path::PathBuf;
use std::sync::Arc;

pub const INVENTORY_TABLE: &str = "inventory";
pub const SETTINGS_TABLE: &str = "settings";
pub const CREDENTIALS_TABLE: &str = "credentials";

/// Everything one storefront session works on
///
/// Created at startup from the mirrors and handed to every action; the
/// in-memory tables here are authoritative until an explicit reload.
pub struct AppState {
    pub config: AppConfig,
    pub inventory: Inventory,
    pub settings: SettingsStore,
    pub credentials: CredentialStore,
    pub labels: LabelRenderer,
}

impl AppState {
    /// Open all stores, connecting to the remote sheet if one is configured
    ///
    /// An unusable remote configuration only disables the remote mirror.
    pub fn open(config: AppConfig) -> Result<Self> {
        let remote: Option<Arc<dyn RemoteStore>> = match &config.remote {
            Some(rc) if !rc.base_url.is_empty() => match HttpSheetClient::new(rc.clone()) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    log::warn!("Remote store disabled: {}", e);
                    None
                }
            },
            _ => None,
        };
        Self::open_with_remote(config, remote)
    }

    /// Open all stores against an explicit remote mirror
    pub fn open_with_remote(config: AppConfig, remote: Option<Arc<dyn RemoteStore>>) -> Result<Self> {
        let mirror = |table: &str, path: PathBuf| Mirror::new(table, path, remote.clone());

        let inventory = Inventory::load(mirror(INVENTORY_TABLE, config.inventory_path()))?;
        let settings = SettingsStore::load(mirror(SETTINGS_TABLE, config.settings_path()))?;
        let credentials =
            CredentialStore::load(mirror(CREDENTIALS_TABLE, config.credentials_path()))?;
        let labels = LabelRenderer::from_config(&config);

        Ok(Self {
            config,
            inventory,
            settings,
            credentials,
            labels,
        })
    }

    /// Pick up a logo file that changed on disk
    pub fn reload_logo(&mut self) {
        self.labels = LabelRenderer::from_config(&self.config);
    }
}

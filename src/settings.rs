use crate::error::Result;
use crate::mirror::{Mirror, PersistReport};
use crate::record::{self, Fields, Record};
use serde::{Deserialize, Serialize};

/// Store branding shown on the gallery and labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store_name: String,
    pub dti: String,
    pub bir: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub fb_montevista: String,
    pub fb_compostela: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_name: "Yadin's Baligya Barato".to_string(),
            dti: "DTI Reg. No. pending".to_string(),
            bir: "BIR TIN pending".to_string(),
            address: "Montevista, Davao de Oro".to_string(),
            phone: "09XX-XXX-XXXX".to_string(),
            email: "store@example.com".to_string(),
            fb_montevista: "https://facebook.com/".to_string(),
            fb_compostela: "https://facebook.com/".to_string(),
        }
    }
}

impl Record for Settings {
    const COLUMNS: &'static [&'static str] = &[
        "Store Name",
        "DTI",
        "BIR",
        "Address",
        "Phone",
        "Email",
        "FB_Montevista",
        "FB_Compostela",
    ];

    fn from_fields(fields: &Fields) -> Self {
        let d = Settings::default();
        Self {
            store_name: record::present_or(fields, "Store Name", &d.store_name),
            dti: record::present_or(fields, "DTI", &d.dti),
            bir: record::present_or(fields, "BIR", &d.bir),
            address: record::present_or(fields, "Address", &d.address),
            phone: record::present_or(fields, "Phone", &d.phone),
            email: record::present_or(fields, "Email", &d.email),
            fb_montevista: record::present_or(fields, "FB_Montevista", &d.fb_montevista),
            fb_compostela: record::present_or(fields, "FB_Compostela", &d.fb_compostela),
        }
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.store_name.clone(),
            self.dti.clone(),
            self.bir.clone(),
            self.address.clone(),
            self.phone.clone(),
            self.email.clone(),
            self.fb_montevista.clone(),
            self.fb_compostela.clone(),
        ]
    }
}

/// Single-row settings record with the same mirror policy as the inventory
pub struct SettingsStore {
    settings: Settings,
    mirror: Mirror,
}

impl SettingsStore {
    /// Load from remote, then the local file, then hard-coded defaults
    pub fn load(mirror: Mirror) -> Result<Self> {
        let (rows, source) = mirror.load::<Settings>()?;
        let settings = rows.into_iter().next().unwrap_or_default();
        log::debug!("Settings loaded ({:?})", source);
        Ok(Self { settings, mirror })
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Replace the record wholesale and persist
    ///
    /// The record only changes once the local write succeeded.
    pub fn update(&mut self, settings: Settings) -> Result<PersistReport> {
        let report = self.mirror.persist(std::slice::from_ref(&settings))?;
        self.settings = settings;
        Ok(report)
    }

    pub fn persist(&self) -> Result<PersistReport> {
        self.mirror.persist(std::slice::from_ref(&self.settings))
    }
}

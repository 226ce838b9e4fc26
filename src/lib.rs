/*!
# Storefront

Inventory, label and credential core for a small shop, with a browser-facing
JSON API on top.

## Overview

Customers browse a product gallery, search by name and look products up by
barcode. The admin adds and edits products, prints barcode labels, keeps the
store's branding details and manages the single admin account. Every table is
kept in a local CSV file and, when configured, mirrored to a remote
spreadsheet service.

## Architecture

### Stores
- **Inventory**: product table keyed by barcode (insert, update by key,
  quick stock patch, two-step delete, wholesale restore)
- **Settings**: one-row branding table
- **Credentials**: one-row admin account with login and email recovery

Each store owns a [`mirror::Mirror`]: loads prefer the remote table, fall back
to the local file and finally to an empty table; every mutation rewrites the
whole table locally and then, best-effort, remotely.

### Artifacts
- **Labels**: white canvas with border, optional logo, product name and a
  Code 128 symbol, rendered as PNG
- **Images**: uploads normalized to PNG thumbnails, stored base64 in the row
- **Backups**: CSV and XLSX exports, CSV restore

### Web layer
- **Technologies**: Rust, axum (feature `web`)
- Public gallery and lookup routes, admin routes behind a session cookie

## Modules

- **record**: string-keyed row conversion shared by every table
- **product**: Product row and stock status
- **inventory**: product table operations
- **settings**: store branding
- **login**: admin credential and sessions
- **mirror**: local/remote dual persistence
- **remote**: remote spreadsheet client
- **saving**: atomic CSV table files
- **codec**: image to base64 PNG and back
- **label**: barcode label rendering
- **downloader**: CSV and XLSX exports
- **loader**: CSV backup restore
- **config**: TOML configuration
- **state**: application state opened at startup
- **app**: routing and middleware

## REST API Endpoints

- `/api/products?q=&category=` - Gallery and search
- `/api/products/{barcode}` - Barcode lookup
- `/api/products/{barcode}/image` - Product photo
- `/api/login`, `/api/logout`, `/api/register`, `/api/recover` - Admin account
- `/api/admin/...` - Product CRUD, labels, exports, restore, settings
*/

pub mod codec;
pub mod config;
pub mod downloader;
pub mod error;
pub mod inventory;
pub mod label;
pub mod loader;
pub mod login;
pub mod mirror;
pub mod product;
pub mod record;
pub mod remote;
pub mod saving;
pub mod settings;
pub mod state;

#[cfg(feature = "web")]
pub mod app;

pub use config::AppConfig;
pub use error::{Result, StoreError};
pub use inventory::{Inventory, PendingDelete};
pub use label::LabelRenderer;
pub use mirror::{Mirror, PersistReport, Source};
pub use product::{Product, StockStatus};
pub use record::Record;
pub use remote::RemoteStore;
pub use settings::Settings;
pub use state::AppState;

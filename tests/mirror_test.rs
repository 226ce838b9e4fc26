mod common;

use common::{MemorySheet, as_remote, config_in, fields};
use std::sync::Arc;
use storefront::product::Product;
use storefront::state::{AppState, INVENTORY_TABLE, SETTINGS_TABLE};
use tempfile::tempdir;

#[test]
fn test_persist_survives_failing_remote() {
    let dir = tempdir().unwrap();
    let sheet = Arc::new(MemorySheet::failing());
    let mut state = AppState::open_with_remote(config_in(dir.path()), as_remote(&sheet)).unwrap();

    let report = state
        .inventory
        .insert(Product::new("1001", "Rice", 50.0, 10))
        .unwrap();
    let warning = report.remote_warning.expect("remote failure is reported");
    assert!(warning.contains("inventory"));

    // The local mirror was still written
    let local = AppState::open(config_in(dir.path())).unwrap();
    assert_eq!(local.inventory.find_by_barcode("1001").unwrap().name, "Rice");
}

#[test]
fn test_persist_updates_both_mirrors() {
    let dir = tempdir().unwrap();
    let sheet = Arc::new(MemorySheet::default());
    let mut state = AppState::open_with_remote(config_in(dir.path()), as_remote(&sheet)).unwrap();

    let report = state
        .inventory
        .insert(Product::new("1001", "Rice", 50.0, 10))
        .unwrap();
    assert!(report.is_clean());

    let rows = sheet.rows(INVENTORY_TABLE);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Barcode"], "1001");
    assert_eq!(rows[0]["Category"], "General");
    assert!(dir.path().join("inventory.csv").exists());
}

#[test]
fn test_load_prefers_remote() {
    let dir = tempdir().unwrap();
    {
        let mut local = AppState::open(config_in(dir.path())).unwrap();
        local
            .inventory
            .insert(Product::new("1", "Local only", 1.0, 1))
            .unwrap();
    }

    let sheet = Arc::new(MemorySheet::default());
    // Sheets hand numeric barcodes back as floats and drop empty columns
    sheet.seed(
        INVENTORY_TABLE,
        vec![fields(&[
            ("Barcode", "1001.0"),
            ("Name", "Rice"),
            ("Price", "50"),
            ("Quantity", "10"),
        ])],
    );
    let state = AppState::open_with_remote(config_in(dir.path()), as_remote(&sheet)).unwrap();

    assert_eq!(state.inventory.len(), 1);
    assert_eq!(
        state.inventory.find_by_barcode("1001"),
        Some(&Product::new("1001", "Rice", 50.0, 10))
    );
}

#[test]
fn test_load_falls_back_to_local() {
    let dir = tempdir().unwrap();
    {
        let mut local = AppState::open(config_in(dir.path())).unwrap();
        local
            .inventory
            .insert(Product::new("1001", "Rice", 50.0, 10))
            .unwrap();
    }

    // Unreachable remote
    let failing = Arc::new(MemorySheet::failing());
    let state = AppState::open_with_remote(config_in(dir.path()), as_remote(&failing)).unwrap();
    assert_eq!(state.inventory.len(), 1);

    // Reachable but empty remote
    let empty = Arc::new(MemorySheet::default());
    let state = AppState::open_with_remote(config_in(dir.path()), as_remote(&empty)).unwrap();
    assert_eq!(state.inventory.len(), 1);
}

#[test]
fn test_settings_defaults_and_update() {
    let dir = tempdir().unwrap();
    let sheet = Arc::new(MemorySheet::default());
    let mut state = AppState::open_with_remote(config_in(dir.path()), as_remote(&sheet)).unwrap();
    assert_eq!(state.settings.get().store_name, "Yadin's Baligya Barato");

    let mut settings = state.settings.get().clone();
    settings.store_name = "Corner Store".to_string();
    settings.phone = "0917-000-0000".to_string();
    state.settings.update(settings.clone()).unwrap();

    assert_eq!(sheet.rows(SETTINGS_TABLE)[0]["Store Name"], "Corner Store");

    let reopened = AppState::open(config_in(dir.path())).unwrap();
    assert_eq!(reopened.settings.get(), &settings);
}

#[test]
fn test_cleared_setting_survives_reopen() {
    let dir = tempdir().unwrap();
    let mut state = AppState::open(config_in(dir.path())).unwrap();
    let mut settings = state.settings.get().clone();
    settings.dti = String::new();
    state.settings.update(settings).unwrap();

    let reopened = AppState::open(config_in(dir.path())).unwrap();
    assert_eq!(reopened.settings.get().dti, "");
    assert_eq!(reopened.settings.get().bir, "BIR TIN pending");
}

#[test]
fn test_failed_settings_write_keeps_previous_record() {
    let dir = tempdir().unwrap();
    let mut state = AppState::open(config_in(dir.path())).unwrap();
    std::fs::create_dir(dir.path().join("settings.csv")).unwrap();

    let mut settings = state.settings.get().clone();
    settings.store_name = "Corner Store".to_string();
    assert!(state.settings.update(settings).is_err());
    assert_eq!(state.settings.get().store_name, "Yadin's Baligya Barato");
}

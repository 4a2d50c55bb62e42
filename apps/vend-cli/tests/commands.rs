//! One-shot commands against a real data directory.

use std::io::{self, BufReader, Cursor, Read};

use vend_cli::commands::{change, inventory, session};
use vend_cli::config::VendConfig;
use vend_core::{Catalog, Denomination, Money, Product, Till};
use vend_store::Store;

fn d(value: u32) -> Denomination {
    Denomination::new(value).unwrap()
}

fn setup(till: Till) -> (tempfile::TempDir, VendConfig, Store) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = VendConfig::default();
    config.storage.data_dir = Some(dir.path().to_path_buf());

    let store = Store::new(config.store_config());
    store.save_till(&till).unwrap();
    store
        .save_catalog(&Catalog::new(vec![
            Product::new("Pepsi", Money::from_units(15), 3).unwrap()
        ]))
        .unwrap();

    (dir, config, store)
}

#[test]
fn test_change_without_commit_leaves_till() {
    let till = Till::from_counts([(d(1), 5), (d(5), 2), (d(10), 1)]);
    let (_dir, config, store) = setup(till.clone());

    change::run(&config, 16, false, false).unwrap();
    assert_eq!(store.load_till().unwrap(), till);
}

#[test]
fn test_change_commit_debits_till() {
    let (_dir, config, store) = setup(Till::from_counts([(d(1), 5), (d(5), 2), (d(10), 1)]));

    change::run(&config, 16, true, true).unwrap();

    let till = store.load_till().unwrap();
    assert_eq!(till, Till::from_counts([(d(1), 4), (d(5), 1), (d(10), 0)]));
}

#[test]
fn test_infeasible_change_fails_and_commits_nothing() {
    let till = Till::from_counts([(d(5), 1)]);
    let (_dir, config, store) = setup(till.clone());

    let err = change::run(&config, 12, true, false).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Exact change is not possible. Remaining: 7 EGP"
    );
    assert_eq!(store.load_till().unwrap(), till);
}

#[test]
fn test_change_respects_ceiling() {
    let (_dir, mut config, _store) = setup(Till::from_counts([(d(1), 100)]));
    config.machine.max_change_amount = 50;

    assert!(change::run(&config, 60, false, false).is_err());
}

#[test]
fn test_deposit_and_listings() {
    let (_dir, config, store) = setup(Till::with_denominations([d(1), d(5)]));

    inventory::deposit(&config, d(5), 3).unwrap();
    assert_eq!(store.load_till().unwrap().count(d(5)), 3);

    assert!(inventory::deposit(&config, d(2), 1).is_err());

    inventory::till(&config, true).unwrap();
    inventory::stock(&config, false).unwrap();
}

#[test]
fn test_missing_data_dir_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = VendConfig::default();
    config.storage.data_dir = Some(dir.path().join("never-seeded"));

    let err = inventory::till(&config, false).unwrap_err();
    assert!(err.to_string().contains("seed"));
}

/// Input that fails after the scripted lines, like a keypad that drops out.
fn failing_after(script: &'static str) -> BufReader<impl Read> {
    struct Disconnected;

    impl Read for Disconnected {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "keypad disconnected"))
        }
    }

    BufReader::new(Cursor::new(script).chain(Disconnected))
}

#[test]
fn test_session_saves_till_and_stock() {
    let (_dir, config, store) = setup(Till::from_counts([(d(5), 2), (d(20), 0)]));

    session::run_with(&config, Cursor::new("1\n20\n2\n"), io::sink()).unwrap();

    assert_eq!(
        store.load_till().unwrap(),
        Till::from_counts([(d(5), 1), (d(20), 1)])
    );
    assert_eq!(store.load_catalog().unwrap().products()[0].stock, 2);
}

#[test]
fn test_session_saves_state_when_console_fails() {
    let (_dir, config, store) = setup(Till::from_counts([(d(5), 2), (d(20), 0)]));

    let err = session::run_with(&config, failing_after("1\n20\n"), io::sink()).unwrap_err();
    assert!(err.to_string().contains("console I/O failed"));

    // The 20 was taken and Pepsi dispensed before the input dropped.
    assert_eq!(
        store.load_till().unwrap(),
        Till::from_counts([(d(5), 2), (d(20), 1)])
    );
    assert_eq!(store.load_catalog().unwrap().products()[0].stock, 2);
}

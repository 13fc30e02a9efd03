//! Edge Case Tests
//!
//! Tests for the non-fatal failure paths:
//! - Type mismatches on lookup and declaration
//! - Orphaned handles after removal
//! - Detached cells from type collisions
//! - Unusual keys

use crate::*;

#[test]
fn test_type_mismatch_yields_absence() {
    let key = unique_key("z");
    share_value(key.as_str(), 42i32);

    assert!(get_shared::<String>(&key).is_none());
    assert_eq!(get_shared::<i32>(&key).unwrap().get(), 42);
}

#[test]
fn test_lookup_shared_reports_reason() {
    let key = unique_key("reason");
    share_value(key.as_str(), 42i32);

    let err = lookup_shared::<String>(&key).unwrap_err();
    assert!(err.is_wrong_type());

    let missing = unique_key("never_declared");
    let err = lookup_shared::<i32>(&missing).unwrap_err();
    assert_eq!(err, Error::NotFound(missing));
}

#[test]
fn test_vault_lookup_type_mismatch_names_types() {
    let vault = create_vault();
    vault.share("typed", 1u16);

    match vault.lookup::<i64>("typed") {
        Err(VaultError::TypeMismatch { expected, actual, .. }) => {
            assert_eq!(expected, "i64");
            assert_eq!(actual, "u16");
        }
        other => panic!("expected TypeMismatch, got {:?}", other.map(|c| c.get())),
    }
}

#[test]
fn test_type_collision_on_declare_returns_detached() {
    let vault = create_vault();
    let original = vault.share("collide", 1u32);
    let detached = vault.share("collide", String::from("mine"));

    assert_eq!(detached.get(), "mine");
    assert_eq!(detached.key(), "collide");
    assert!(!detached.is_registered());

    detached.set(String::from("still mine"));
    assert_eq!(original.get(), 1, "registered cell untouched");
}

#[test]
fn test_try_share_rejects_type_collision() {
    let key = unique_key("try");
    share_value(key.as_str(), 1u32);

    let err = SharedCell::try_share(key.as_str(), false).unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(err.key(), key);
}

#[test]
fn test_orphaned_handle_after_manual_remove() {
    let vault = create_vault();
    let a = vault.share("orphan", 1);
    let b = a.clone();

    assert!(vault.remove("orphan").is_some());
    assert!(!a.is_registered());

    b.set(2);
    assert_eq!(a.get(), 2, "orphans still alias each other");

    let fresh = vault.share("orphan", 10);
    assert_eq!(fresh.get(), 10);
    assert!(!fresh.same_cell(&a));
}

#[test]
fn test_removed_entry_downcast_to_handle() {
    let vault = create_vault();
    let cell = vault.share("entry", 5u8);

    let removed = vault.remove("entry").unwrap();
    let orphan = removed.downcast::<u8>().unwrap();
    assert!(orphan.same_cell(&cell));
    assert!(removed.downcast::<i8>().is_none());
}

#[test]
fn test_empty_and_unicode_keys() {
    let vault = create_vault();
    let empty = vault.share("", 1);
    let unicode = vault.share("größe/配置", 2);

    assert_eq!(vault.get::<i32>("").unwrap().get(), 1);
    assert_eq!(vault.get::<i32>("größe/配置").unwrap().get(), 2);
    assert_eq!(empty.remove_from_registry(), Some(1));
    assert_eq!(unicode.remove_from_registry(), Some(2));
}

#[test]
fn test_non_clone_values() {
    struct Connection {
        id: u32,
    }

    let vault = create_vault();
    let conn = vault.share("conn", Connection { id: 7 });
    conn.update(|c| c.id += 1);

    let seen = vault.get::<Connection>("conn").unwrap();
    assert_eq!(seen.with(|c| c.id), 8);
    assert!(vault.remove("conn").is_some());
}

#[test]
fn test_diagnostics_toggle_does_not_change_results() {
    let loud = Vault::new();
    let quiet = Vault::with_config(VaultConfig::quiet());

    for vault in [&loud, &quiet] {
        vault.share("k", 1);
        assert_eq!(vault.share("k", 2).get(), 1);
        assert!(vault.get::<String>("k").is_none());
        assert!(vault.remove("k").is_some());
        assert!(vault.remove("k").is_none());
    }
}

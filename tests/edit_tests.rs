mod common;

use std::fs;
use std::path::{Path, PathBuf};

use askprops::{validator, EditError, Error, Properties, Validator};
use common::ScriptedConsole;
use tempfile::TempDir;

fn temp_config() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("config.properties");
    (dir, path)
}

/// A store with required `token`, optional `mode` (must be fast/slow)
/// and optional `note`, loaded from `contents` without any prompting.
fn loaded_store(path: &Path, contents: &str) -> Properties {
    fs::write(path, contents).expect("Failed to write config file");
    let mut console = ScriptedConsole::empty();
    Properties::builder("testapp")
        .config_file_path(path)
        .property("token", true, |p| {
            p.validator(validator::not_empty());
        })
        .expect("registration should succeed")
        .property("mode", false, |p| {
            p.validator(Validator::new("known_mode", |input| {
                (input != "fast" && input != "slow").then(|| "unknown mode".to_string())
            }));
        })
        .expect("registration should succeed")
        .property("note", false, |_| {})
        .expect("registration should succeed")
        .build_with(&mut console)
        .expect("build should succeed")
}

#[test]
fn successful_edit_applies_and_persists() {
    let (_dir, path) = temp_config();
    let mut properties = loaded_store(&path, "token=abc\nmode=fast\n");

    properties
        .edit(|_current, edit| {
            edit.set_property("token", "rotated")?
                .expect("token should pass validation");
            edit.set_property("note", "rotated today")?
                .expect("note has no validators");
            Ok(())
        })
        .expect("edit should succeed");

    assert_eq!(properties.get("token").expect("token"), "rotated");
    assert_eq!(properties.get("note").expect("note"), "rotated today");

    // reload from disk with the same registry: values round-trip
    let reloaded = loaded_store(&path, &fs::read_to_string(&path).expect("read"));
    assert_eq!(reloaded.get("token").expect("token"), "rotated");
    assert_eq!(reloaded.get("note").expect("note"), "rotated today");
}

#[test]
fn validation_failure_leaves_the_live_store_alone() {
    let (_dir, path) = temp_config();
    let mut properties = loaded_store(&path, "token=abc\n");

    properties
        .edit(|_current, edit| {
            let refused = edit.set_property("token", "   ")?;
            match refused {
                Err(EditError::Validation { name, message }) => {
                    assert_eq!(name, "token");
                    assert_eq!(message, "is empty");
                }
                other => panic!("expected a validation failure, got {other:?}"),
            }
            // a later valid edit in the same transaction still applies
            edit.set_property("mode", "slow")?
                .expect("mode should pass validation");
            Ok(())
        })
        .expect("edit should succeed");

    assert_eq!(properties.get("token").expect("token"), "abc");
    assert_eq!(properties.get("mode").expect("mode"), "slow");
}

#[test]
fn editor_error_discards_every_staged_change() {
    let (_dir, path) = temp_config();
    let mut properties = loaded_store(&path, "# sentinel\ntoken=abc\n");

    let outcome = properties.edit(|_current, edit| {
        edit.set_property("token", "staged")?
            .expect("token should pass validation");
        // unknown names ride the fatal channel and abort the transaction
        edit.set_property("no_such_property", "x")?.ok();
        Ok(())
    });

    match outcome {
        Err(EditError::Aborted(message)) => {
            assert!(message.contains("unknown property: \"no_such_property\""));
        }
        other => panic!("expected an aborted transaction, got {other:?}"),
    }
    assert_eq!(
        properties.get("token").expect("token"),
        "abc",
        "staged change must not survive the abort"
    );
    let contents = fs::read_to_string(&path).expect("read");
    assert!(contents.contains("# sentinel"), "aborted edit must not rewrite the file");
}

#[test]
fn clearing_a_required_property_is_refused() {
    let (_dir, path) = temp_config();
    let mut properties = loaded_store(&path, "token=abc\n");

    properties
        .edit(|_current, edit| {
            match edit.clear_property("token")? {
                Err(EditError::ClearRequired(name)) => assert_eq!(name, "token"),
                other => panic!("expected a clear-required refusal, got {other:?}"),
            }
            Ok(())
        })
        .expect("edit should succeed");

    assert_eq!(properties.get("token").expect("token"), "abc");
}

#[test]
fn clearing_an_optional_property_removes_and_persists() {
    let (_dir, path) = temp_config();
    let mut properties = loaded_store(&path, "token=abc\nmode=fast\n");

    properties
        .edit(|_current, edit| {
            edit.clear_property("mode")?.expect("mode is optional");
            Ok(())
        })
        .expect("edit should succeed");

    assert!(matches!(
        properties.get("mode"),
        Err(Error::MissingValue(name)) if name == "mode"
    ));
    assert_eq!(properties.get_or("mode", "fast").expect("fallback"), "fast");

    let contents = fs::read_to_string(&path).expect("read");
    assert!(!contents.contains("mode="));
}

#[test]
fn clean_but_empty_edit_is_a_no_op() {
    let (_dir, path) = temp_config();
    let mut properties = loaded_store(&path, "# sentinel\ntoken=abc\n");

    properties
        .edit(|_current, _edit| Ok(()))
        .expect("no-op edit should succeed");

    let contents = fs::read_to_string(&path).expect("read");
    assert!(contents.contains("# sentinel"), "no-op edit must not rewrite the file");
}

#[test]
fn view_exposes_pre_transaction_values() {
    let (_dir, path) = temp_config();
    let mut properties = loaded_store(&path, "token=abc\n");

    properties
        .edit(|current, edit| {
            edit.set_property("token", "changed")?
                .expect("token should pass validation");
            // the view still sees the live value, not the staged one
            assert_eq!(current.get("token")?, "abc");
            assert_eq!(current.get_or("note", "none")?, "none");
            assert!(matches!(
                current.get("note"),
                Err(Error::MissingValue(_))
            ));
            Ok(())
        })
        .expect("edit should succeed");

    assert_eq!(properties.get("token").expect("token"), "changed");
}

#[test]
fn read_only_edit_updates_memory_but_not_the_file() {
    let (_dir, path) = temp_config();
    fs::write(&path, "token=abc\n").expect("Failed to write config file");

    let mut console = ScriptedConsole::empty();
    let mut properties = Properties::builder("testapp")
        .config_file_path(&path)
        .read_only(true)
        .property("token", true, |_| {})
        .expect("registration should succeed")
        .build_with(&mut console)
        .expect("build should succeed");

    properties
        .edit(|_current, edit| {
            edit.set_property("token", "memory-only")?
                .expect("token should pass validation");
            Ok(())
        })
        .expect("edit should succeed");

    assert_eq!(properties.get("token").expect("token"), "memory-only");
    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        "token=abc\n",
        "read-only store must leave the file untouched"
    );
}

#[test]
fn accessors_reject_unregistered_names() {
    let (_dir, path) = temp_config();
    let properties = loaded_store(&path, "token=abc\n");

    assert!(matches!(
        properties.get("unheard_of"),
        Err(Error::UnknownProperty(_))
    ));
    assert!(matches!(
        properties.get_or("unheard_of", "fallback"),
        Err(Error::UnknownProperty(_))
    ));
}

#[test]
fn round_trip_preserves_awkward_values() {
    let (_dir, path) = temp_config();
    let mut properties = loaded_store(&path, "token=abc\n");

    let awkward = "  spaced = colon:ed #hashed\tand\nmulti-lined  ";
    properties
        .edit(|_current, edit| {
            edit.set_property("note", awkward)?
                .expect("note has no validators");
            Ok(())
        })
        .expect("edit should succeed");

    let reloaded = loaded_store(&path, &fs::read_to_string(&path).expect("read"));
    assert_eq!(reloaded.get("note").expect("note"), awkward);
}

#[test]
fn edit_failure_messages_read_like_sentences() {
    let (_dir, path) = temp_config();
    let mut properties = loaded_store(&path, "token=abc\n");

    properties
        .edit(|_current, edit| {
            let refused = edit.set_property("token", "")?;
            assert_eq!(
                refused.unwrap_err().to_string(),
                "Failed to set property token: is empty"
            );
            let refused = edit.clear_property("token")?;
            assert_eq!(
                refused.unwrap_err().to_string(),
                "Can not clear property token since it is required."
            );
            Ok(())
        })
        .expect("edit should succeed");
}

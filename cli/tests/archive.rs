//! # hgy CLI Archive Integration Tests
//!
//! File: cli/tests/archive.rs
//!
//! ## Overview
//!
//! End-to-end tests of the commands that change the archive (`init`, `add`,
//! `edit`, `mv`, `rm`) and of `list`. They run the real `git` binary and
//! check both the files on disk and the resulting commits. Without git they
//! return early.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

const PIZZA: &str = "\
name: Pizza
persons: 2
images:
- top.jpg
ingredients:
- 300g flour
- 1 ball mozzarella
recipe:
- Knead.
- Bake.
";

/// An archive with `pizza` imported from a record next to its image.
fn archive_with_pizza() -> TestArchive {
    let archive = TestArchive::init();
    let record = archive.write("import/pizza.yml", PIZZA);
    archive.write("import/top.jpg", "jpg");
    archive
        .hgy()
        .args(["add", "--quiet", "pizza"])
        .arg(&record)
        .assert()
        .success()
        .stdout(predicate::str::contains("New recipe added"));
    archive
}

#[test]
fn test_init_creates_archive() {
    if !git_available() {
        return;
    }
    let archive = TestArchive::init();
    assert!(archive.dir().join(".git").is_dir());
    assert!(archive.dir().join(".hgy").is_file());
    assert_eq!(archive.log(), vec!["hgy initialized"]);
    assert_eq!(archive.tracked(), vec![".hgy"]);

    archive
        .hgy()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to do"));
    assert_eq!(archive.log().len(), 1);
}

#[test]
fn test_init_refuses_foreign_repository() {
    if !git_available() {
        return;
    }
    let archive = TestArchive::new();
    fs::create_dir_all(archive.dir()).expect("Failed to create dir");
    std::process::Command::new("git")
        .arg("-C")
        .arg(archive.dir())
        .args(["init", "--quiet"])
        .status()
        .expect("Failed to run git init");

    archive
        .hgy()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already a git repository"));
}

#[test]
fn test_add_imports_record_and_images() {
    if !git_available() {
        return;
    }
    let archive = archive_with_pizza();
    let record = fs::read_to_string(archive.dir().join("pizza")).expect("record");
    assert!(record.contains(".images/pizza/top.jpg"));
    assert_eq!(
        fs::read_to_string(archive.dir().join(".images/pizza/top.jpg")).expect("image"),
        "jpg"
    );
    assert_eq!(archive.log(), vec!["New recipe added", "hgy initialized"]);
    assert_eq!(archive.tracked(), vec![".hgy", ".images/pizza/top.jpg", "pizza"]);

    archive
        .hgy()
        .args(["list", "--images"])
        .assert()
        .success()
        .stdout("pizza (Pizza)\n    .images/pizza/top.jpg\n");
}

#[test]
fn test_add_guards() {
    if !git_available() {
        return;
    }
    let archive = archive_with_pizza();
    let record = archive.write("import/other.yml", "name: Other\npersons: 1\n");

    // Known recipe plus a record path.
    archive
        .hgy()
        .args(["add", "--quiet", "pizza"])
        .arg(&record)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // A file at the destination that is not in the index.
    fs::write(archive.dir().join("stray"), "").expect("stray file");
    archive
        .hgy()
        .args(["add", "--quiet", "stray"])
        .arg(&record)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Use --force"));
    archive
        .hgy()
        .args(["add", "--quiet", "--force", "stray"])
        .arg(&record)
        .assert()
        .success();
}

#[test]
fn test_add_empty_template_quietly() {
    if !git_available() {
        return;
    }
    let archive = TestArchive::init();
    archive
        .hgy()
        .args(["add", "--quiet", "soups/tomato"])
        .assert()
        .success();
    let record = fs::read_to_string(archive.dir().join("soups/tomato")).expect("record");
    assert!(record.contains("name: soups/tomato"));
    assert!(record.contains("persons: 2"));
    archive
        .hgy()
        .arg("list")
        .assert()
        .success()
        .stdout("soups/tomato (soups/tomato)\n");
}

#[test]
fn test_add_image_to_existing_recipe() {
    if !git_available() {
        return;
    }
    let archive = archive_with_pizza();
    let image = archive.write("slice.jpg", "slice");
    archive
        .hgy()
        .args(["add", "pizza", "--image"])
        .arg(&image)
        .assert()
        .success()
        .stdout(predicate::str::contains("Image added to recipe"));

    let record = fs::read_to_string(archive.dir().join("pizza")).expect("record");
    assert!(record.contains(".images/pizza/top.jpg"));
    assert!(record.contains(".images/pizza/slice.jpg"));
    assert_eq!(archive.log()[0], "Image added to recipe");

    // Adding the same image again changes nothing.
    archive
        .hgy()
        .args(["add", "pizza", "--image"])
        .arg(&image)
        .assert()
        .success()
        .stdout(predicate::str::contains("Info: No changes. Nothing to do."));
    assert_eq!(archive.log().len(), 3);
}

#[test]
fn test_edit_without_changes() {
    if !git_available() {
        return;
    }
    let archive = archive_with_pizza();
    // EDITOR is `true`, which leaves the record as it is.
    archive
        .hgy()
        .args(["edit", "pizza"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Info: No changes. Nothing to do."));
    archive
        .hgy()
        .args(["edit", "lasagne"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipe found with the name 'lasagne'"));
    assert_eq!(archive.log().len(), 2);
}

#[cfg(unix)]
#[test]
fn test_edit_drops_removed_images() {
    if !git_available() {
        return;
    }
    let archive = archive_with_pizza();
    // An "editor" that rewrites the record without images.
    let editor = archive.write(
        "drop-images.sh",
        "#!/bin/sh\nprintf 'name: Pizza\\npersons: 2\\n' > \"$1\"\n",
    );
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&editor, fs::Permissions::from_mode(0o755)).expect("chmod");
    }

    archive
        .hgy()
        .args(["edit", "pizza"])
        .env("EDITOR", &editor)
        .assert()
        .success();
    assert!(!archive.dir().join(".images/pizza/top.jpg").exists());
    assert_eq!(archive.log()[0], "Recipe changed");
    assert_eq!(archive.tracked(), vec![".hgy", "pizza"]);
}

#[test]
fn test_mv_renames_record_and_images() {
    if !git_available() {
        return;
    }
    let archive = archive_with_pizza();
    archive
        .hgy()
        .args(["mv", "pizza", "italian/pizza"])
        .assert()
        .success();

    assert!(!archive.dir().join("pizza").exists());
    let record = fs::read_to_string(archive.dir().join("italian/pizza")).expect("record");
    assert!(record.contains(".images/italian/pizza/top.jpg"));
    assert!(archive.dir().join(".images/italian/pizza/top.jpg").is_file());
    assert_eq!(archive.log()[0], "Recipe moved");
    assert_eq!(
        archive.tracked(),
        vec![".hgy", ".images/italian/pizza/top.jpg", "italian/pizza"]
    );
    archive
        .hgy()
        .arg("list")
        .assert()
        .success()
        .stdout("italian/pizza (Pizza)\n");
}

#[test]
fn test_mv_guards() {
    if !git_available() {
        return;
    }
    let archive = archive_with_pizza();
    archive
        .hgy()
        .args(["mv", "lasagne", "pasta"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No recipe found"));

    fs::write(archive.dir().join("taken"), "").expect("file");
    archive
        .hgy()
        .args(["mv", "pizza", "taken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Use --force"));
    assert!(archive.dir().join("pizza").is_file());
}

#[test]
fn test_rm_removes_everything() {
    if !git_available() {
        return;
    }
    let archive = archive_with_pizza();
    archive
        .hgy()
        .args(["rm", "pizza"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed recipe 'pizza'"));

    assert!(!archive.dir().join("pizza").exists());
    assert!(!archive.dir().join(".images/pizza").exists());
    assert_eq!(archive.log()[0], "Recipe removed");
    assert_eq!(archive.tracked(), vec![".hgy"]);
    archive.hgy().arg("list").assert().success().stdout("");

    archive
        .hgy()
        .args(["rm", "pizza"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Info: No recipe found"));
    assert_eq!(archive.log().len(), 3);
}

#[test]
fn test_failed_rm_rolls_back() {
    if !git_available() {
        return;
    }
    let archive = archive_with_pizza();
    // The second image was never added to the archive.
    archive.write(
        "archive/pizza",
        "\
name: Pizza
persons: 2
images:
- .images/pizza/top.jpg
- .images/pizza/missing.jpg
ingredients:
- 300g flour
",
    );
    archive.git(&["commit", "--quiet", "-am", "List a missing image"]);
    let log = archive.log();

    archive
        .hgy()
        .args(["rm", "pizza"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing.jpg"));

    assert_eq!(archive.log(), log);
    // Exits zero only when nothing is staged.
    archive.git(&["diff", "--cached", "--quiet"]);
    assert!(archive.tracked().contains(&"pizza".to_string()));
}

use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{hash_object, init_repository_dir, run_kit_command};
use common::stdout_of;

const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

fn write_tree(dir: &TempDir) -> String {
    let output = run_kit_command(dir.path(), &["write-tree"])
        .assert()
        .success();

    stdout_of(&output).trim().to_string()
}

fn ls_tree(dir: &TempDir, tree: &str) -> Vec<(String, String, String, String)> {
    let output = run_kit_command(dir.path(), &["ls-tree", tree])
        .assert()
        .success();

    stdout_of(&output)
        .lines()
        .map(|line| {
            let (meta, name) = line.split_once('\t').expect("tab before name");
            let fields = meta.split(' ').collect::<Vec<_>>();
            (
                fields[0].to_string(),
                fields[1].to_string(),
                fields[2].to_string(),
                name.to_string(),
            )
        })
        .collect()
}

#[rstest]
fn write_tree_of_empty_worktree_is_the_empty_tree(init_repository_dir: TempDir) {
    assert_eq!(write_tree(&init_repository_dir), EMPTY_TREE);

    run_kit_command(init_repository_dir.path(), &["ls-tree", EMPTY_TREE])
        .assert()
        .success()
        .stdout("");
}

#[rstest]
fn write_tree_nests_subdirectories(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("1.txt").write_str("one")?;
    init_repository_dir.child("a/2.txt").write_str("two")?;
    init_repository_dir.child("a/b/3.txt").write_str("three")?;

    let root_tree = write_tree(&init_repository_dir);
    let root_entries = ls_tree(&init_repository_dir, &root_tree);

    assert_eq!(root_entries.len(), 2);
    assert_eq!(
        root_entries[0],
        (
            "100644".to_string(),
            "blob".to_string(),
            hash_object(init_repository_dir.path(), "1.txt"),
            "1.txt".to_string()
        )
    );
    assert_eq!(root_entries[1].0, "040000");
    assert_eq!(root_entries[1].1, "tree");
    assert_eq!(root_entries[1].3, "a");

    let a_entries = ls_tree(&init_repository_dir, &root_entries[1].2);
    let a_names = a_entries
        .iter()
        .map(|entry| (entry.1.as_str(), entry.3.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(a_names, vec![("blob", "2.txt"), ("tree", "b")]);

    let b_entries = ls_tree(&init_repository_dir, &a_entries[1].2);
    assert_eq!(b_entries.len(), 1);
    assert_eq!(
        b_entries[0].2,
        hash_object(init_repository_dir.path(), "a/b/3.txt")
    );

    Ok(())
}

#[rstest]
fn write_tree_is_deterministic(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("z.txt").write_str("z")?;
    init_repository_dir.child("m/n.txt").write_str("n")?;
    init_repository_dir.child("a.txt").write_str("a")?;

    let first = write_tree(&init_repository_dir);
    let second = write_tree(&init_repository_dir);
    assert_eq!(first, second);

    init_repository_dir.child("m/n.txt").write_str("changed")?;
    assert_ne!(write_tree(&init_repository_dir), first);

    Ok(())
}

#[rstest]
fn write_tree_ignores_repository_metadata(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("a.txt").write_str("a")?;

    let tree = write_tree(&init_repository_dir);

    run_kit_command(init_repository_dir.path(), &["ls-tree", "--name-only", &tree])
        .assert()
        .success()
        .stdout("a.txt\n");

    Ok(())
}

#[rstest]
fn cat_file_pretty_prints_tree(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("a.txt").write_str("hello")?;
    let tree = write_tree(&init_repository_dir);

    run_kit_command(init_repository_dir.path(), &["cat-file", "-p", &tree])
        .assert()
        .success()
        .stdout("100644 blob b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0\ta.txt\n");

    run_kit_command(init_repository_dir.path(), &["cat-file", "-t", &tree])
        .assert()
        .success()
        .stdout("tree\n");

    Ok(())
}

#[rstest]
fn ls_tree_of_a_blob_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("a.txt").write_str("hello")?;
    run_kit_command(init_repository_dir.path(), &["hash-object", "-w", "a.txt"])
        .assert()
        .success();

    run_kit_command(
        init_repository_dir.path(),
        &["ls-tree", "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("is not a tree"));

    Ok(())
}

#[cfg(unix)]
#[rstest]
fn write_tree_skips_file_names_with_line_breaks(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("ok.txt").write_str("ok")?;
    init_repository_dir.child("bad\nname.txt").write_str("bad")?;

    let tree = write_tree(&init_repository_dir);

    run_kit_command(init_repository_dir.path(), &["ls-tree", "--name-only", &tree])
        .assert()
        .success()
        .stdout("ok.txt\n");

    Ok(())
}

use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{
    AUTHOR_EMAIL, AUTHOR_NAME, commit_parent_sha, committed_repository_dir, head_commit_sha,
    init_repository_dir, kit_commit, run_kit_command,
};
use common::file::{FileSpec, write_file};
use common::stdout_of;

fn commit_history(dir: &TempDir, count: usize) -> Vec<String> {
    (1..=count)
        .map(|i| {
            write_file(FileSpec::new(
                dir.path().join(format!("file{i}.txt")),
                format!("Content {i}"),
            ));
            run_kit_command(dir.path(), &["add", "."]).assert().success();
            kit_commit(dir.path(), &format!("Commit {i}"))
                .assert()
                .success();

            head_commit_sha(dir.path()).expect("HEAD is set after commit")
        })
        .collect()
}

#[rstest]
fn log_with_no_commits_prints_nothing(init_repository_dir: TempDir) {
    run_kit_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout("");
}

#[rstest]
fn log_single_commit(committed_repository_dir: TempDir) {
    let root = committed_repository_dir.path();
    let head = head_commit_sha(root).expect("HEAD is set after commit");

    let expected = format!(
        "commit {head}\n\
         Date:   2023-01-01 12:00:00 UTC\n\
         Committer: {AUTHOR_NAME} <{AUTHOR_EMAIL}>\n\
         \n    Initial commit\n"
    );

    run_kit_command(root, &["log"])
        .assert()
        .success()
        .stdout(expected);
}

#[rstest]
fn log_lists_commits_newest_first(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let commits = commit_history(&init_repository_dir, 3);

    let output = run_kit_command(init_repository_dir.path(), &["log"])
        .assert()
        .success();
    let stdout = stdout_of(&output);

    let logged = stdout
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect::<Vec<_>>();
    let expected = commits.iter().rev().cloned().collect::<Vec<_>>();
    assert_eq!(logged, expected);

    let messages = stdout
        .lines()
        .filter_map(|line| line.strip_prefix("    "))
        .collect::<Vec<_>>();
    assert_eq!(messages, vec!["Commit 3", "Commit 2", "Commit 1"]);

    let parents = stdout
        .lines()
        .filter_map(|line| line.strip_prefix("Parent: "))
        .map(str::to_string)
        .collect::<Vec<_>>();
    assert_eq!(parents, vec![commits[1].clone(), commits[0].clone()]);

    Ok(())
}

#[rstest]
fn log_follows_parent_chain_to_the_root(init_repository_dir: TempDir) {
    let commits = commit_history(&init_repository_dir, 4);
    let root = init_repository_dir.path();

    let mut current = commits.last().cloned();
    let mut walked = Vec::new();
    while let Some(commit) = current {
        current = commit_parent_sha(root, &commit);
        walked.push(commit);
    }

    assert_eq!(walked, commits.into_iter().rev().collect::<Vec<_>>());
}

#[rstest]
fn log_indents_every_message_line(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = init_repository_dir.path();
    init_repository_dir.child("a.txt").write_str("hello")?;
    run_kit_command(root, &["add", "a.txt"]).assert().success();
    kit_commit(root, "Subject line\n\nBody line").assert().success();

    run_kit_command(root, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "\n    Subject line\n    \n    Body line\n",
        ));

    Ok(())
}

#[rstest]
fn log_fails_when_head_points_to_missing_commit(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(
        init_repository_dir.path().join(".kit").join("HEAD"),
        "0123456789abcdef0123456789abcdef01234567\n",
    )?;

    run_kit_command(init_repository_dir.path(), &["log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("object not found"));

    Ok(())
}

#[rstest]
fn log_survives_identity_with_header_characters(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = init_repository_dir.path();
    init_repository_dir.child("a.txt").write_str("hello")?;
    run_kit_command(root, &["add", "a.txt"]).assert().success();

    kit_commit(root, "odd author")
        .env("KIT_AUTHOR_NAME", "Evil\nName <x>")
        .env("KIT_AUTHOR_EMAIL", "<a@b>")
        .assert()
        .success();

    run_kit_command(root, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Committer: EvilName x <a@b>\n"));

    Ok(())
}

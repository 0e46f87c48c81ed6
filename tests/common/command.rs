use crate::common::file::{FileSpec, write_file};
use crate::common::stdout_of;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "fake_user";
pub const AUTHOR_EMAIL: &str = "fake_email@email.com";
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with one commit holding `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let root = init_repository_dir.path();

    write_file(FileSpec::new(root.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(root.join("a").join("2.txt"), "two".to_string()));
    write_file(FileSpec::new(
        root.join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_kit_command(root, &["add", "."]).assert().success();
    kit_commit(root, "Initial commit").assert().success();

    init_repository_dir
}

pub fn run_kit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("kit").expect("Failed to find kit binary");
    cmd.env_remove("KIT_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn kit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_kit_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("KIT_AUTHOR_NAME", AUTHOR_NAME),
        ("KIT_AUTHOR_EMAIL", AUTHOR_EMAIL),
        ("KIT_AUTHOR_DATE", AUTHOR_DATE), // %Y-%m-%d %H:%M:%S %z
    ]);
    cmd
}

/// Current HEAD commit ID, read straight from `.kit/HEAD`
pub fn head_commit_sha(dir: &Path) -> Option<String> {
    std::fs::read_to_string(dir.join(".kit").join("HEAD"))
        .ok()
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

/// Tree ID recorded in a commit, taken from `cat-file -p`
pub fn commit_tree_sha(dir: &Path, commit_id: &str) -> String {
    let output = run_kit_command(dir, &["cat-file", "-p", commit_id])
        .assert()
        .success();

    stdout_of(&output)
        .lines()
        .find_map(|line| line.strip_prefix("tree ").map(str::to_string))
        .expect("commit has a tree line")
}

/// Parent commit ID recorded in a commit, if any
pub fn commit_parent_sha(dir: &Path, commit_id: &str) -> Option<String> {
    let output = run_kit_command(dir, &["cat-file", "-p", commit_id])
        .assert()
        .success();

    stdout_of(&output)
        .lines()
        .find_map(|line| line.strip_prefix("parent ").map(str::to_string))
}

pub fn hash_object(dir: &Path, file: &str) -> String {
    let output = run_kit_command(dir, &["hash-object", file])
        .assert()
        .success();

    stdout_of(&output).trim().to_string()
}

/// Store an object exactly as given, bypassing the kit binary
pub fn write_raw_object(dir: &Path, kind: &str, payload: &[u8]) -> String {
    use flate2::{Compression, write::ZlibEncoder};
    use sha1::{Digest, Sha1};
    use std::io::Write;

    let mut content = format!("{kind} {}\0", payload.len()).into_bytes();
    content.extend_from_slice(payload);

    let oid = Sha1::digest(&content)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<String>();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&content).expect("Failed to compress object");
    let compressed = encoder.finish().expect("Failed to compress object");

    let object_dir = dir.join(".kit").join("objects").join(&oid[..2]);
    std::fs::create_dir_all(&object_dir).expect("Failed to create shard directory");
    std::fs::write(object_dir.join(&oid[2..]), compressed).expect("Failed to write object");

    oid
}

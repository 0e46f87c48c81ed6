use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use kit::areas::repository::Repository;
use kit::commands::plumbing::cat_file::CatFileMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives
const LOG_ENV_VAR: &str = "KIT_LOG";

#[derive(Parser)]
#[command(
    name = "kit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressed version control tool",
    long_about = "kit stores file snapshots as compressed, SHA-1 addressed objects, \
    stages them through an append-only index and records them as a linear chain of commits.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content, type or size of an object",
        long_about = "This command prints information about an object in the repository. \
        Exactly one of -p, -t or -s must be given."
    )]
    #[command(group(ArgGroup::new("mode").required(true).args(["pretty", "kind", "size"])))]
    CatFile {
        #[arg(short = 'p', help = "Pretty-print the object content")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object type")]
        kind: bool,
        #[arg(short = 's', help = "Print the object size")]
        size: bool,
        #[arg(index = 1, help = "The object ID")]
        object: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database",
        long_about = "This command hashes a file as a blob and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "write-tree",
        about = "Store a snapshot of the working directory as a tree",
        long_about = "This command records every file and directory of the working directory \
        as nested tree objects and prints the ID of the root tree."
    )]
    WriteTree,
    #[command(
        name = "ls-tree",
        about = "List the entries of a tree object",
        long_about = "This command lists the entries of a tree object, one per line."
    )]
    LsTree {
        #[arg(long, help = "Only print the entry names")]
        name_only: bool,
        #[arg(index = 1, help = "The tree ID")]
        object: String,
    },
    #[command(
        name = "add",
        about = "Add files to the index",
        long_about = "This command stages files for the next commit. \
        Use '.' to stage every file of the working directory."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The paths to add")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit in the repository with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "log",
        about = "Show the commit history",
        long_about = "This command prints every commit reachable from HEAD, newest first."
    )]
    Log,
    #[command(
        name = "checkout",
        about = "Restore the files of a commit",
        long_about = "This command writes the files recorded in a commit into the working directory. \
        Files that are not part of the commit are left in place."
    )]
    Checkout {
        #[arg(index = 1, help = "The commit ID")]
        commit: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_repository(path: Option<&str>) -> Result<Repository> {
    let path = match path {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir()?,
    };

    Ok(Repository::new(&path, Box::new(std::io::stdout()))?)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => open_repository(path.as_deref())?.init()?,
        Commands::CatFile {
            pretty: _,
            kind,
            size,
            object,
        } => {
            let mode = if *kind {
                CatFileMode::Type
            } else if *size {
                CatFileMode::Size
            } else {
                CatFileMode::Pretty
            };

            open_repository(None)?.cat_file(object, mode)?
        }
        Commands::HashObject { write, file } => open_repository(None)?.hash_object(file, *write)?,
        Commands::WriteTree => open_repository(None)?.write_tree()?,
        Commands::LsTree { name_only, object } => {
            open_repository(None)?.ls_tree(object, *name_only)?
        }
        Commands::Add { paths } => open_repository(None)?.add(paths).await?,
        Commands::Commit { message } => open_repository(None)?.commit(message).await?,
        Commands::Log => open_repository(None)?.log()?,
        Commands::Checkout { commit } => open_repository(None)?.checkout(commit)?,
    }

    Ok(())
}

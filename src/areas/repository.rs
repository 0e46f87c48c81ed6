use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::KitError;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the repository metadata directory
pub const REPOSITORY_DIR: &str = ".kit";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open (or prepare to initialize) the repository rooted at `path`
    ///
    /// The directory is created if missing. Nothing inside the metadata
    /// directory is touched until a command runs.
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> crate::errors::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path).map_err(|e| KitError::io(path, e))?;
        }
        let path = path.canonicalize().map_err(|e| KitError::io(path, e))?;
        let kit_path = path.join(REPOSITORY_DIR);

        let index = Index::new(kit_path.join("index").into_boxed_path());
        let database = Database::new(kit_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(kit_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kit_path(&self) -> Box<Path> {
        self.path.join(REPOSITORY_DIR).into_boxed_path()
    }

    /// Fail with `NotARepository` unless `init` has run here
    pub fn ensure_initialized(&self) -> crate::errors::Result<()> {
        if self.database.objects_path().is_dir() {
            Ok(())
        } else {
            Err(KitError::NotARepository(self.path.to_path_buf()))
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}

use crate::areas::repository::Repository;
use crate::errors::KitError;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create the metadata directory and the object database
    ///
    /// Neither the index nor HEAD is created: both appear with the first
    /// `add` and the first `commit`.
    pub fn init(&mut self) -> anyhow::Result<()> {
        let kit_path = self.kit_path();
        if kit_path.exists() {
            return Err(KitError::AlreadyInitialized(kit_path.to_path_buf()).into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .kit/objects directory")?;

        writeln!(
            self.writer(),
            "Initialized empty kit repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}

use crate::errors::KitError;
use is_executable::IsExecutable;
use std::path::Path;

#[derive(Debug, Clone, Eq, Ord, Default, PartialEq, PartialOrd)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

impl FileMode {
    pub fn of_file(path: &Path) -> Self {
        if path.is_executable() {
            FileMode::Executable
        } else {
            FileMode::Regular
        }
    }

    pub fn as_u32(&self) -> u32 {
        EntryMode::File(self.clone()).as_u32()
    }
}

#[derive(Debug, Clone, Eq, Ord, Default, PartialEq, PartialOrd)]
pub enum EntryMode {
    File(FileMode),
    #[default]
    Directory,
}

impl EntryMode {
    pub fn as_str(&self) -> &str {
        match self {
            EntryMode::File(FileMode::Regular) => "100644",
            EntryMode::File(FileMode::Executable) => "100755",
            EntryMode::Directory => "040000",
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::File(FileMode::Regular) => 0o100644,
            EntryMode::File(FileMode::Executable) => 0o100755,
            EntryMode::Directory => 0o40000,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }
}

impl From<FileMode> for EntryMode {
    fn from(mode: FileMode) -> Self {
        EntryMode::File(mode)
    }
}

impl TryFrom<&str> for EntryMode {
    type Error = KitError;

    fn try_from(value: &str) -> crate::errors::Result<Self> {
        match value {
            "100644" => Ok(EntryMode::File(FileMode::Regular)),
            "100755" => Ok(EntryMode::File(FileMode::Executable)),
            "040000" | "40000" => Ok(EntryMode::Directory),
            _ => Err(KitError::CorruptObject(format!("invalid entry mode '{value}'"))),
        }
    }
}

impl TryFrom<&str> for FileMode {
    type Error = KitError;

    fn try_from(value: &str) -> crate::errors::Result<Self> {
        match EntryMode::try_from(value)? {
            EntryMode::File(mode) => Ok(mode),
            EntryMode::Directory => Err(KitError::CorruptObject(format!(
                "expected a file mode, found '{value}'"
            ))),
        }
    }
}

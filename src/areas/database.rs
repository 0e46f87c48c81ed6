//! Content-addressable object database
//!
//! Objects are framed as `<type> <size>\0<payload>`, hashed with SHA-1,
//! zlib-compressed and stored under `objects/<2 hex>/<38 hex>`. Stored files
//! are never modified: writing an object that already exists is a no-op.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{self, Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{KitError, Result};
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        self.write_object_data(object.object_type(), &object.serialize()?)
    }

    /// Store a typed payload and return its object ID
    ///
    /// Identical `(object_type, payload)` pairs always map to the same ID and
    /// the same bytes on disk.
    pub fn write_object_data(&self, object_type: ObjectType, payload: &[u8]) -> Result<ObjectId> {
        let content = object::canonical_form(object_type, payload);
        let object_id = object::hash(&content)?;
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::debug!(oid = %object_id, %object_type, "object already stored");
            return Ok(object_id);
        }

        let object_dir = object_path.parent().ok_or_else(|| {
            KitError::io(
                &object_path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid object path"),
            )
        })?;
        std::fs::create_dir_all(object_dir).map_err(|e| KitError::io(object_dir, e))?;

        self.write_object(&object_path, content)?;
        tracing::debug!(oid = %object_id, %object_type, size = payload.len(), "stored object");

        Ok(object_id)
    }

    /// Load an object as its type and raw payload
    pub fn read_object_data(&self, object_id: &ObjectId) -> Result<(ObjectType, Bytes)> {
        let object_path = self.path.join(object_id.to_path());

        let compressed = std::fs::read(&object_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => KitError::ObjectNotFound(object_id.clone()),
            _ => KitError::io(&object_path, e),
        })?;

        let content = Self::decompress(&compressed).map_err(|e| {
            KitError::CorruptObject(format!("{object_id}: unable to decompress ({e})"))
        })?;

        ObjectType::parse_header(content).map_err(|e| match e {
            KitError::CorruptObject(reason) => KitError::CorruptObject(format!("{object_id}: {reason}")),
            other => other,
        })
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> Result<ObjectBox> {
        let (object_type, payload) = self.read_object_data(object_id)?;
        let reader = Cursor::new(payload);

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(reader)?))),
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(Tree::deserialize(reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(reader)?))),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> Result<Blob> {
        match self.read_object_data(object_id)? {
            (ObjectType::Blob, payload) => Ok(Blob::new(payload)),
            (object_type, _) => Err(KitError::CorruptObject(format!(
                "{object_id}: expected blob, found {object_type}"
            ))),
        }
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> Result<Tree> {
        match self.read_object_data(object_id)? {
            (ObjectType::Tree, payload) => Tree::deserialize(Cursor::new(payload)),
            _ => Err(KitError::NotATree(object_id.clone())),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> Result<Commit> {
        match self.read_object_data(object_id)? {
            (ObjectType::Commit, payload) => Commit::deserialize(Cursor::new(payload)),
            _ => Err(KitError::NotACommit(object_id.clone())),
        }
    }

    fn write_object(&self, object_path: &Path, content: Bytes) -> Result<()> {
        let object_dir = object_path.parent().unwrap_or(&self.path);
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let content = Self::compress(&content).map_err(|e| KitError::io(object_path, e))?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .map_err(|e| KitError::io(&temp_object_path, e))?;

        // rename the temp file to the object file to make it atomic
        let written = file
            .write_all(&content)
            .map_err(|e| KitError::io(&temp_object_path, e))
            .and_then(|_| {
                std::fs::rename(&temp_object_path, object_path)
                    .map_err(|e| KitError::io(object_path, e))
            });

        if written.is_err() {
            let _ = std::fs::remove_file(&temp_object_path);
        }

        written
    }

    fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::best());
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn decompress(data: &[u8]) -> std::io::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> PathBuf {
        PathBuf::from(format!("tmp-obj-{}", rand::random::<u32>()))
    }
}

//! Blob object
//!
//! Blobs store file content. They contain only the raw bytes, without any
//! metadata like filename or permissions (those live in trees and the index).
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> crate::errors::Result<Bytes> {
        Ok(self.content.clone())
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> crate::errors::Result<Self> {
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|e| crate::errors::KitError::CorruptObject(e.to_string()))?;

        Ok(Self::new(content.into()))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).to_string()
    }
}

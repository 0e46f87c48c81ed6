use crate::artifacts::objects::HEADER_SEPARATOR;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

/// Serializes the object payload (without the `<type> <size>\0` header)
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Parses an object payload (the header has already been stripped)
pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn object_id(&self) -> Result<ObjectId> {
        let content = canonical_form(self.object_type(), &self.serialize()?);
        hash(&content)
    }
}

/// Frame a payload as `<type> <size>\0<payload>`, the form that gets hashed and stored
pub fn canonical_form(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let mut content = format!("{} {}", object_type.as_str(), payload.len()).into_bytes();
    content.push(HEADER_SEPARATOR);
    content.extend_from_slice(payload);

    content.into()
}

pub fn hash(content: &[u8]) -> Result<ObjectId> {
    let mut hasher = Sha1::new();
    hasher.update(content);

    ObjectId::from_digest(&hasher.finalize())
}

pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(blob) => blob.object_type(),
            ObjectBox::Tree(tree) => tree.object_type(),
            ObjectBox::Commit(commit) => commit.object_type(),
        }
    }

    pub fn display(&self) -> String {
        match self {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Tree(tree) => tree.display(),
            ObjectBox::Commit(commit) => commit.display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn frames_payload_with_type_and_length() {
        let content = canonical_form(ObjectType::Blob, b"hello");

        assert_eq!(content.as_ref(), b"blob 5\0hello");
    }

    #[test]
    fn hashes_like_git_for_plain_blobs() {
        // `printf 'hello' | git hash-object --stdin`
        let oid = hash(&canonical_form(ObjectType::Blob, b"hello")).unwrap();

        assert_eq!(oid.as_ref(), "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0");
    }
}

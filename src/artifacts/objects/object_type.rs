use crate::artifacts::objects::HEADER_SEPARATOR;
use crate::errors::KitError;
use bytes::Bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Split a decompressed object into its type and payload
    ///
    /// The header ends at the first NUL; the payload after it is returned
    /// untouched even if it contains more NULs. The declared size must match
    /// the payload length.
    pub fn parse_header(data: Bytes) -> crate::errors::Result<(ObjectType, Bytes)> {
        let separator = data
            .iter()
            .position(|byte| *byte == HEADER_SEPARATOR)
            .ok_or_else(|| KitError::CorruptObject("missing header terminator".to_string()))?;

        let header = std::str::from_utf8(&data[..separator])
            .map_err(|_| KitError::CorruptObject("header is not valid UTF-8".to_string()))?;
        let (object_type, size) = header
            .split_once(' ')
            .ok_or_else(|| KitError::CorruptObject(format!("malformed header '{header}'")))?;

        let object_type = ObjectType::try_from(object_type)?;
        let size = size
            .parse::<usize>()
            .map_err(|_| KitError::CorruptObject(format!("invalid object size '{size}'")))?;

        let payload = data.slice(separator + 1..);
        if payload.len() != size {
            return Err(KitError::CorruptObject(format!(
                "declared size {size} does not match payload size {}",
                payload.len()
            )));
        }

        Ok((object_type, payload))
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = KitError;

    fn try_from(value: &str) -> crate::errors::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(KitError::CorruptObject(format!(
                "invalid object type '{value}'"
            ))),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

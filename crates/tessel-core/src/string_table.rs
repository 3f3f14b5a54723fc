//! String interning for schema names.
//!
//! Every type, struct, member, function and parameter name lives here.
//! Ids are insertion-order indices and never change. Each entry also
//! records its hash and the byte offset it will occupy in the serialized
//! blob, where every string is followed by a NUL terminator.

use indexmap::IndexSet;

use crate::hash;

/// Index of a string in a [`StringTable`].
///
/// Only meaningful for the table that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringId(u32);

impl StringId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Signed form used on the wire.
    #[inline]
    pub fn as_i32(self) -> i32 {
        self.0 as i32
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
}

/// Per-string metadata written alongside the blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StringEntry {
    pub hash: u32,
    /// Byte position of the string inside the blob.
    pub offset: u32,
}

#[derive(Debug, Clone, Default)]
pub struct StringTable {
    strings: IndexSet<String>,
    entries: Vec<StringEntry>,
    blob_len: u32,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning the existing id on an exact match.
    pub fn add_string(&mut self, text: &str) -> StringId {
        if let Some(index) = self.strings.get_index_of(text) {
            return StringId(index as u32);
        }

        let id = StringId(self.strings.len() as u32);
        self.entries.push(StringEntry {
            hash: hash(text),
            offset: self.blob_len,
        });
        self.blob_len += text.len() as u32 + 1;
        self.strings.insert(text.to_owned());
        id
    }

    #[inline]
    pub fn get_string(&self, id: StringId) -> Option<&str> {
        self.strings.get_index(id.index()).map(String::as_str)
    }

    #[inline]
    pub fn get_string_id(&self, text: &str) -> Option<StringId> {
        self.strings
            .get_index_of(text)
            .map(|index| StringId(index as u32))
    }

    /// First string whose hash equals `hash`, in insertion order.
    ///
    /// A colliding later string is shadowed by the earlier one.
    pub fn get_string_by_hash(&self, hash: u32) -> Option<&str> {
        self.find_by_hash(hash).and_then(|id| self.get_string(id))
    }

    /// Id of the first string whose hash equals `hash`.
    pub fn find_by_hash(&self, hash: u32) -> Option<StringId> {
        self.entries
            .iter()
            .position(|entry| entry.hash == hash)
            .map(|index| StringId(index as u32))
    }

    #[inline]
    pub fn entry(&self, id: StringId) -> Option<&StringEntry> {
        self.entries.get(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Total blob size in bytes, terminators included.
    #[inline]
    pub fn blob_len(&self) -> u32 {
        self.blob_len
    }

    pub fn iter(&self) -> impl Iterator<Item = (StringId, &str, &StringEntry)> {
        self.strings
            .iter()
            .zip(&self.entries)
            .enumerate()
            .map(|(i, (s, entry))| (StringId(i as u32), s.as_str(), entry))
    }

    /// Concatenated NUL-terminated strings, laid out at the recorded offsets.
    pub fn to_blob(&self) -> Vec<u8> {
        let mut blob = Vec::with_capacity(self.blob_len as usize);
        for s in &self.strings {
            blob.extend_from_slice(s.as_bytes());
            blob.push(0);
        }
        blob
    }
}

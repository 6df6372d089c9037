use crate::crypto::Hash;
use super::Serializer;

pub struct Writer<'a> {
    bytes: &'a mut Vec<u8>,
}

impl<'a> Writer<'a> {
    pub fn new(bytes: &'a mut Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    // Byte slice prefixed by its u64 length.
    // usize is at most 64 bits wide, the prefix never truncates.
    pub fn write_blob(&mut self, bytes: &[u8]) {
        self.write_u64(&(bytes.len() as u64));
        self.write_bytes(bytes);
    }

    pub fn write_hash(&mut self, hash: &Hash) {
        self.bytes.extend_from_slice(hash.as_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.bytes.push(u8::from(value));
    }

    pub fn write_u64(&mut self, value: &u64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_optional_non_zero<T: Serializer>(&mut self, opt: &Option<T>) {
        match opt {
            Some(value) => {
                self.write_bool(true);
                value.write(self);
            }
            None => self.write_bool(false),
        }
    }
}

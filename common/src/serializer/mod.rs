mod writer;

pub use writer::Writer;

// Canonical binary encoding used to derive content hashes.
// Integers are big-endian, optional values are prefixed by a presence byte
// and byte slices are prefixed by their u64 length.
pub trait Serializer {
    fn write(&self, writer: &mut Writer);

    // Exact number of bytes produced by `write`
    fn size(&self) -> usize;

    fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.size());
        let mut writer = Writer::new(&mut buffer);
        self.write(&mut writer);
        buffer
    }
}

impl Serializer for u64 {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(self);
    }

    fn size(&self) -> usize {
        8
    }
}

impl<T: Serializer> Serializer for Option<T> {
    fn write(&self, writer: &mut Writer) {
        writer.write_optional_non_zero(self);
    }

    fn size(&self) -> usize {
        1 + self.as_ref().map_or(0, Serializer::size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_matches_written_bytes() {
        let values: [Option<u64>; 2] = [None, Some(42)];
        for value in values {
            assert_eq!(value.to_bytes().len(), value.size());
        }
    }

    #[test]
    fn test_optional_presence_byte() {
        assert_eq!(None::<u64>.to_bytes(), vec![0]);
        assert_eq!(Some(1u64).to_bytes(), vec![1, 0, 0, 0, 0, 0, 0, 0, 1]);
    }
}

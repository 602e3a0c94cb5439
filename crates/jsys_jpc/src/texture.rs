//! `TEX1` texture-table entries.

use jsys_data::{ByteReader, ByteWriter};

use crate::error::{Error, Result};

/// Fixed size of a texture entry's header plus its name field.
const ENTRY_HEADER_SIZE: usize = 0x20;
/// Capacity of the NUL-padded name field.
const NAME_SIZE: usize = 0x14;

/// One embedded texture: its file name and raw BTI payload.
///
/// The payload is carried verbatim; use [`crate::bti`] to look inside it.
/// The name doubles as the lookup key, so a container never holds two
/// entries with the same name hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub name: String,
    pub data: Vec<u8>,
}

impl Texture {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// JGadget hash of the file name; the deterministic ordering key for
    /// the texture table.
    pub fn name_hash(&self) -> u32 {
        jsys_bcsv::calc_hash(&self.name)
    }

    pub(crate) fn read(reader: &mut ByteReader) -> Result<Self> {
        let tag = reader.read_bytes(4)?;
        if tag != b"TEX1" {
            return Err(Error::InvalidMagic {
                expected: "TEX1",
                found: String::from_utf8_lossy(tag).into_owned(),
            });
        }
        let total_size = reader.read_i32()? as usize;
        reader.read_u32()?;
        let name = reader.read_fixed_ascii(NAME_SIZE)?;
        let data = reader
            .read_bytes(total_size.saturating_sub(ENTRY_HEADER_SIZE))?
            .to_vec();
        Ok(Self { name, data })
    }

    pub(crate) fn write(&self, writer: &mut ByteWriter) -> Result<()> {
        let padded = self.data.len().next_multiple_of(32);
        writer.write_bytes(b"TEX1");
        writer.write_i32((ENTRY_HEADER_SIZE + padded) as i32);
        writer.write_u32(0);
        writer.write_fixed_ascii(&self.name, NAME_SIZE)?;
        writer.write_bytes(&self.data);
        for _ in self.data.len()..padded {
            writer.write_u8(0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use jsys_data::{ByteReader, ByteWriter};
    use pretty_assertions::assert_eq;

    use crate::texture::Texture;

    #[test]
    fn roundtrip_pads_payload_to_32() {
        let texture = Texture::new("mr_glow01_i", vec![0xAB; 5]);

        let mut writer = ByteWriter::new();
        texture.write(&mut writer).unwrap();
        let bytes = writer.into_inner();

        assert_eq!(bytes.len(), 0x20 + 32);
        assert_eq!(&bytes[0..4], b"TEX1");
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0x40]);
        assert_eq!(&bytes[0x0C..0x17], b"mr_glow01_i");

        let mut reader = ByteReader::new(&bytes);
        let back = Texture::read(&mut reader).unwrap();
        assert_eq!(back.name, "mr_glow01_i");
        // The padding bytes stay part of the payload, as stored on disk.
        assert_eq!(back.data.len(), 32);
        assert_eq!(&back.data[..5], &[0xAB; 5]);
    }

    #[test]
    fn oversized_name_is_rejected() {
        let texture = Texture::new("a_texture_name_way_past_twenty_bytes", vec![]);
        let mut writer = ByteWriter::new();
        assert!(texture.write(&mut writer).is_err());
    }

    #[test]
    fn wrong_tag_is_rejected() {
        let mut reader = ByteReader::new(b"TEX2\0\0\0\x20\0\0\0\0");
        assert!(Texture::read(&mut reader).is_err());
    }
}

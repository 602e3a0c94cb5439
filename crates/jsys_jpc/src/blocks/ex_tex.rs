//! `ETX1`: indirect and secondary texturing.

use std::io::Cursor;

use binrw::{BinRead, BinWrite};
use serde::{Deserialize, Serialize};

use crate::blocks::{bit, set_bit, set_window, window};
use crate::enums::IndirectTextureMode;
use crate::error::{FlagError, Result};

/// Decoded `ETX1` flag word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExTexFlags {
    pub indirect_texture_mode: IndirectTextureMode,
    pub use_second_texture_index: bool,
    #[serde(
        rename = "FlagsUnknownBits",
        default,
        skip_serializing_if = "crate::blocks::is_zero_u32"
    )]
    pub unknown_bits: u32,
}

impl ExTexFlags {
    const KNOWN: u32 = 0x1 | 1 << 8;

    pub fn try_from_bits(bits: u32) -> std::result::Result<Self, FlagError> {
        Ok(Self {
            indirect_texture_mode: IndirectTextureMode::try_from(window(bits, 0, 0x1))?,
            use_second_texture_index: bit(bits, 8),
            unknown_bits: bits & !Self::KNOWN,
        })
    }

    pub fn to_bits(&self) -> u32 {
        let mut bits = self.unknown_bits;
        set_window(&mut bits, 0, self.indirect_texture_mode.bits());
        set_bit(&mut bits, 8, self.use_second_texture_index);
        bits
    }
}

/// `ETX1` body.
#[binrw::binrw]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[brw(big)]
#[serde(rename_all = "PascalCase")]
pub struct ExTexShape {
    #[br(try_map = ExTexFlags::try_from_bits)]
    #[bw(map = ExTexFlags::to_bits)]
    #[serde(flatten)]
    pub flags: ExTexFlags,
    /// Row-major 2x3 indirect texture matrix.
    pub indirect_texture_matrix: [[f32; 3]; 2],
    pub matrix_scale: i8,
    pub indirect_texture_index: u8,
    #[brw(pad_after = 1)]
    pub second_texture_index: u8,
}

impl ExTexShape {
    pub fn from_body(body: &[u8]) -> Result<Self> {
        Ok(Self::read(&mut Cursor::new(body))?)
    }

    pub fn to_body(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::blocks::ex_tex::ExTexShape;
    use crate::enums::IndirectTextureMode;

    fn sample_body() -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&(0x1u32 | 1 << 8).to_be_bytes());
        for v in [0.5f32, 0.0, 0.0, 0.0, 0.5, 0.0] {
            body.extend_from_slice(&v.to_be_bytes());
        }
        body.push(0xFE); // matrix scale -2
        body.push(1);
        body.push(2);
        body.push(0);
        body
    }

    #[test]
    fn body_is_0x20_bytes() {
        assert_eq!(sample_body().len(), 0x20);
    }

    #[test]
    fn roundtrip_preserves_bytes() {
        let body = sample_body();
        let block = ExTexShape::from_body(&body).unwrap();

        assert_eq!(
            block.flags.indirect_texture_mode,
            IndirectTextureMode::Normal
        );
        assert!(block.flags.use_second_texture_index);
        assert_eq!(block.indirect_texture_matrix[1][1], 0.5);
        assert_eq!(block.matrix_scale, -2);
        assert_eq!(block.second_texture_index, 2);

        assert_eq!(block.to_body().unwrap(), body);
    }
}

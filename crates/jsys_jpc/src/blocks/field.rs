//! `FLD1`: a force field acting on live particles.

use std::io::Cursor;

use binrw::{BinRead, BinWrite};
use serde::{Deserialize, Serialize};

use crate::blocks::{bit, set_bit, set_window, window};
use crate::enums::{FieldAddType, FieldType};
use crate::error::{FlagError, Result};

/// Decoded `FLD1` flag word. The field type discriminates how the three
/// `Param` values and the direction vector are interpreted at runtime; the
/// wire layout itself is shared by all field types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldFlags {
    pub field_type: FieldType,
    pub velocity_type: FieldAddType,
    pub no_inherit_rotate: bool,
    pub air_drag: bool,
    pub fade_use_enter_time: bool,
    pub fade_use_distance_time: bool,
    pub fade_use_fade_in: bool,
    pub fade_use_fade_out: bool,
    #[serde(default, skip_serializing_if = "crate::blocks::is_zero_u32")]
    pub unknown_bits: u32,
}

impl FieldFlags {
    const KNOWN: u32 = 0xF | 0x3 << 8 | 0x3F << 17;

    pub fn try_from_bits(bits: u32) -> std::result::Result<Self, FlagError> {
        Ok(Self {
            field_type: FieldType::try_from(window(bits, 0, 0xF))?,
            velocity_type: FieldAddType::try_from(window(bits, 8, 0x3))?,
            no_inherit_rotate: bit(bits, 17),
            air_drag: bit(bits, 18),
            fade_use_enter_time: bit(bits, 19),
            fade_use_distance_time: bit(bits, 20),
            fade_use_fade_in: bit(bits, 21),
            fade_use_fade_out: bit(bits, 22),
            unknown_bits: bits & !Self::KNOWN,
        })
    }

    pub fn to_bits(&self) -> u32 {
        let mut bits = self.unknown_bits;
        set_window(&mut bits, 0, self.field_type.bits());
        set_window(&mut bits, 8, self.velocity_type.bits());
        set_bit(&mut bits, 17, self.no_inherit_rotate);
        set_bit(&mut bits, 18, self.air_drag);
        set_bit(&mut bits, 19, self.fade_use_enter_time);
        set_bit(&mut bits, 20, self.fade_use_distance_time);
        set_bit(&mut bits, 21, self.fade_use_fade_in);
        set_bit(&mut bits, 22, self.fade_use_fade_out);
        bits
    }
}

/// `FLD1` body.
#[binrw::binrw]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[brw(big)]
#[serde(rename_all = "PascalCase")]
pub struct FieldBlock {
    #[br(try_map = FieldFlags::try_from_bits)]
    #[bw(map = FieldFlags::to_bits)]
    #[serde(flatten)]
    pub flags: FieldFlags,
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
    pub direction_x: f32,
    pub direction_y: f32,
    pub direction_z: f32,
    pub param_1: f32,
    pub param_2: f32,
    pub param_3: f32,
    pub fade_in: f32,
    pub fade_out: f32,
    pub enter_time: f32,
    pub distance_time: f32,
    #[brw(pad_after = 3)]
    pub cycle: u8,
}

impl FieldBlock {
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

    use crate::blocks::field::FieldBlock;
    use crate::enums::{FieldAddType, FieldType};

    fn sample_body() -> Vec<u8> {
        let mut body = Vec::new();
        // vortex, base velocity, air drag
        body.extend_from_slice(&(0x4u32 | 0x1 << 8 | 1 << 18).to_be_bytes());
        for i in 0..13 {
            body.extend_from_slice(&(i as f32 * 0.5).to_be_bytes());
        }
        body.push(2);
        body.extend_from_slice(&[0; 3]);
        body
    }

    #[test]
    fn body_is_0x3c_bytes() {
        assert_eq!(sample_body().len(), 0x3C);
    }

    #[test]
    fn roundtrip_preserves_bytes() {
        let body = sample_body();
        let block = FieldBlock::from_body(&body).unwrap();

        assert_eq!(block.flags.field_type, FieldType::Vortex);
        assert_eq!(block.flags.velocity_type, FieldAddType::BaseVelocity);
        assert!(block.flags.air_drag);
        assert_eq!(block.param_3, 4.0);
        assert_eq!(block.cycle, 2);

        assert_eq!(block.to_body().unwrap(), body);
    }

    #[test]
    fn field_type_window_is_validated() {
        let mut body = sample_body();
        body[3] = 0x9; // field type 9 is out of range
        assert!(FieldBlock::from_body(&body).is_err());
    }
}

//! `SSP1`: particles spawned by dying particles.

use std::io::Cursor;

use binrw::{BinRead, BinWrite};
use serde::{Deserialize, Serialize};

use crate::blocks::{bit, set_bit, set_window, window};
use crate::color::Color;
use crate::enums::{DirectionType, PlaneType, RotationType, ShapeType};
use crate::error::{FlagError, Result};

/// Decoded `SSP1` flag word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChildShapeFlags {
    pub shape_type: ShapeType,
    pub direction_type: DirectionType,
    pub rotation_type: RotationType,
    pub plane_type: PlaneType,
    pub is_inherited_scale: bool,
    pub is_inherited_alpha: bool,
    #[serde(rename = "IsInheritedRGB")]
    pub is_inherited_rgb: bool,
    pub flags_unk19: bool,
    pub flags_unk20: bool,
    pub is_enable_field: bool,
    pub is_enable_scale_out: bool,
    pub is_enable_alpha_out: bool,
    pub is_enable_rotate: bool,
    #[serde(
        rename = "FlagsUnknownBits",
        default,
        skip_serializing_if = "crate::blocks::is_zero_u32"
    )]
    pub unknown_bits: u32,
}

impl ChildShapeFlags {
    const KNOWN: u32 = 0xF | 0x7 << 4 | 0x7 << 7 | 1 << 10 | 0x1FF << 16;

    pub fn try_from_bits(bits: u32) -> std::result::Result<Self, FlagError> {
        Ok(Self {
            shape_type: ShapeType::try_from(window(bits, 0, 0xF))?,
            direction_type: DirectionType::try_from(window(bits, 4, 0x7))?,
            rotation_type: RotationType::try_from(window(bits, 7, 0x7))?,
            plane_type: PlaneType::try_from(window(bits, 10, 0x1))?,
            is_inherited_scale: bit(bits, 16),
            is_inherited_alpha: bit(bits, 17),
            is_inherited_rgb: bit(bits, 18),
            flags_unk19: bit(bits, 19),
            flags_unk20: bit(bits, 20),
            is_enable_field: bit(bits, 21),
            is_enable_scale_out: bit(bits, 22),
            is_enable_alpha_out: bit(bits, 23),
            is_enable_rotate: bit(bits, 24),
            unknown_bits: bits & !Self::KNOWN,
        })
    }

    pub fn to_bits(&self) -> u32 {
        let mut bits = self.unknown_bits;
        set_window(&mut bits, 0, self.shape_type.bits());
        set_window(&mut bits, 4, self.direction_type.bits());
        set_window(&mut bits, 7, self.rotation_type.bits());
        set_window(&mut bits, 10, self.plane_type.bits());
        set_bit(&mut bits, 16, self.is_inherited_scale);
        set_bit(&mut bits, 17, self.is_inherited_alpha);
        set_bit(&mut bits, 18, self.is_inherited_rgb);
        set_bit(&mut bits, 19, self.flags_unk19);
        set_bit(&mut bits, 20, self.flags_unk20);
        set_bit(&mut bits, 21, self.is_enable_field);
        set_bit(&mut bits, 22, self.is_enable_scale_out);
        set_bit(&mut bits, 23, self.is_enable_alpha_out);
        set_bit(&mut bits, 24, self.is_enable_rotate);
        bits
    }
}

/// `SSP1` body.
#[binrw::binrw]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[brw(big)]
#[serde(rename_all = "PascalCase")]
pub struct ChildShape {
    #[br(try_map = ChildShapeFlags::try_from_bits)]
    #[bw(map = ChildShapeFlags::to_bits)]
    #[serde(flatten)]
    pub flags: ChildShapeFlags,
    pub position_random: f32,
    pub base_velocity: f32,
    pub base_velocity_random: f32,
    pub velocity_influence_rate: f32,
    pub gravity: f32,
    #[serde(rename = "GlobalScale2DX")]
    pub global_scale_2d_x: f32,
    #[serde(rename = "GlobalScale2DY")]
    pub global_scale_2d_y: f32,
    pub inherit_scale: f32,
    pub inherit_alpha: f32,
    #[serde(rename = "InheritRGB")]
    pub inherit_rgb: f32,
    pub primary_color: Color,
    pub environment_color: Color,
    pub timing: f32,
    pub life: u16,
    pub rate: u16,
    pub step: u8,
    pub texture_index: u8,
    pub rotate_speed: u16,
}

impl ChildShape {
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

    use crate::blocks::child_shape::ChildShape;
    use crate::color::Color;
    use crate::enums::ShapeType;

    fn sample_body() -> Vec<u8> {
        let mut body = Vec::new();
        // billboard, inherit scale + alpha, scale out
        body.extend_from_slice(&(0x2u32 | 1 << 16 | 1 << 17 | 1 << 22).to_be_bytes());
        for i in 0..10 {
            body.extend_from_slice(&(i as f32 * 0.25).to_be_bytes());
        }
        body.extend_from_slice(&[0xFF, 0x00, 0x00, 0xFF]); // primary
        body.extend_from_slice(&[0x00, 0x40, 0x00, 0xFF]); // environment
        body.extend_from_slice(&0.75f32.to_be_bytes()); // timing
        body.extend_from_slice(&30u16.to_be_bytes()); // life
        body.extend_from_slice(&2u16.to_be_bytes()); // rate
        body.push(1); // step
        body.push(4); // texture index
        body.extend_from_slice(&180u16.to_be_bytes()); // rotate speed
        body
    }

    #[test]
    fn body_is_0x40_bytes() {
        assert_eq!(sample_body().len(), 0x40);
    }

    #[test]
    fn roundtrip_preserves_bytes() {
        let body = sample_body();
        let block = ChildShape::from_body(&body).unwrap();

        assert_eq!(block.flags.shape_type, ShapeType::Billboard);
        assert!(block.flags.is_inherited_scale);
        assert!(block.flags.is_enable_scale_out);
        assert_eq!(block.primary_color, Color::new(0xFF, 0, 0, 0xFF));
        assert_eq!(block.life, 30);
        assert_eq!(block.texture_index, 4);

        assert_eq!(block.to_body().unwrap(), body);
    }
}

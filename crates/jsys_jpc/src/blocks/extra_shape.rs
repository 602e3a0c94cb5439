//! `ESP1`: scale, alpha and rotation over a particle's life.

use std::io::Cursor;

use binrw::{BinRead, BinWrite};
use serde::{Deserialize, Serialize};

use crate::blocks::{bit, set_bit, set_window, window};
use crate::enums::CalcScaleAnimType;
use crate::error::{FlagError, Result};

/// Decoded `ESP1` flag word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtraShapeFlags {
    pub is_enable_scale: bool,
    #[serde(rename = "IsDiffXY")]
    pub is_diff_xy: bool,
    pub flags_unk2: bool,
    pub flags_unk3: bool,
    pub scale_anim_type_x: CalcScaleAnimType,
    pub scale_anim_type_y: CalcScaleAnimType,
    pub pivot_x: u8,
    pub pivot_y: u8,
    pub is_enable_alpha: bool,
    pub is_enable_sin_wave: bool,
    pub is_enable_rotate: bool,
    #[serde(
        rename = "FlagsUnknownBits",
        default,
        skip_serializing_if = "crate::blocks::is_zero_u32"
    )]
    pub unknown_bits: u32,
}

impl ExtraShapeFlags {
    const KNOWN: u32 = 0xF | 0x3 << 8 | 0x3 << 10 | 0x3 << 12 | 0x3 << 14 | 0x3 << 16 | 1 << 24;

    pub fn try_from_bits(bits: u32) -> std::result::Result<Self, FlagError> {
        Ok(Self {
            is_enable_scale: bit(bits, 0),
            is_diff_xy: bit(bits, 1),
            flags_unk2: bit(bits, 2),
            flags_unk3: bit(bits, 3),
            scale_anim_type_x: CalcScaleAnimType::try_from(window(bits, 8, 0x3))?,
            scale_anim_type_y: CalcScaleAnimType::try_from(window(bits, 10, 0x3))?,
            pivot_x: window(bits, 12, 0x3) as u8,
            pivot_y: window(bits, 14, 0x3) as u8,
            is_enable_alpha: bit(bits, 16),
            is_enable_sin_wave: bit(bits, 17),
            is_enable_rotate: bit(bits, 24),
            unknown_bits: bits & !Self::KNOWN,
        })
    }

    pub fn to_bits(&self) -> u32 {
        let mut bits = self.unknown_bits;
        set_bit(&mut bits, 0, self.is_enable_scale);
        set_bit(&mut bits, 1, self.is_diff_xy);
        set_bit(&mut bits, 2, self.flags_unk2);
        set_bit(&mut bits, 3, self.flags_unk3);
        set_window(&mut bits, 8, self.scale_anim_type_x.bits());
        set_window(&mut bits, 10, self.scale_anim_type_y.bits());
        set_window(&mut bits, 12, self.pivot_x as u32 & 0x3);
        set_window(&mut bits, 14, self.pivot_y as u32 & 0x3);
        set_bit(&mut bits, 16, self.is_enable_alpha);
        set_bit(&mut bits, 17, self.is_enable_sin_wave);
        set_bit(&mut bits, 24, self.is_enable_rotate);
        bits
    }
}

/// `ESP1` body.
#[binrw::binrw]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[brw(big)]
#[serde(rename_all = "PascalCase")]
pub struct ExtraShape {
    #[br(try_map = ExtraShapeFlags::try_from_bits)]
    #[bw(map = ExtraShapeFlags::to_bits)]
    #[serde(flatten)]
    pub flags: ExtraShapeFlags,
    pub scale_in_timing: f32,
    pub scale_out_timing: f32,
    pub scale_in_value_x: f32,
    pub scale_out_value_x: f32,
    pub scale_in_value_y: f32,
    pub scale_out_value_y: f32,
    pub scale_out_random: f32,
    pub scale_animation_x_max_frame: u16,
    pub scale_animation_y_max_frame: u16,
    pub alpha_in_timing: f32,
    pub alpha_out_timing: f32,
    pub alpha_in_value: f32,
    pub alpha_base_value: f32,
    pub alpha_out_value: f32,
    pub alpha_wave_frequency: f32,
    pub alpha_wave_random: f32,
    pub alpha_wave_amplitude: f32,
    pub rotate_angle: f32,
    pub rotate_angle_random: f32,
    pub rotate_speed: f32,
    pub rotate_speed_random: f32,
    pub rotate_direction: f32,
}

impl ExtraShape {
    pub fn from_body(body: &[u8]) -> Result<Self> {
        Ok(Self::read(&mut Cursor::new(body))?)
    }

    pub fn to_body(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}

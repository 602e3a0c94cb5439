//! `BEM1`: the dynamics block driving an emitter.

use std::io::Cursor;

use binrw::{BinRead, BinWrite};
use serde::{Deserialize, Serialize};

use crate::blocks::{bit, set_bit, set_window, window};
use crate::enums::VolumeType;
use crate::error::{FlagError, Result};

/// Decoded `BEM1` flag word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DynamicsFlags {
    pub volume_type: VolumeType,
    pub fixed_density: bool,
    pub fixed_interval: bool,
    pub inherit_scale: bool,
    pub follow_emitter: bool,
    pub follow_emitter_child: bool,
    /// Bits outside the assigned windows, preserved verbatim.
    #[serde(default, skip_serializing_if = "crate::blocks::is_zero_u32")]
    pub unknown_bits: u32,
}

impl DynamicsFlags {
    const KNOWN: u32 = 0x1F | 0x7 << 8;

    pub fn try_from_bits(bits: u32) -> std::result::Result<Self, FlagError> {
        Ok(Self {
            volume_type: VolumeType::try_from(window(bits, 8, 0x7))?,
            fixed_density: bit(bits, 0),
            fixed_interval: bit(bits, 1),
            inherit_scale: bit(bits, 2),
            follow_emitter: bit(bits, 3),
            follow_emitter_child: bit(bits, 4),
            unknown_bits: bits & !Self::KNOWN,
        })
    }

    pub fn to_bits(&self) -> u32 {
        let mut bits = self.unknown_bits;
        set_window(&mut bits, 8, self.volume_type.bits());
        set_bit(&mut bits, 0, self.fixed_density);
        set_bit(&mut bits, 1, self.fixed_interval);
        set_bit(&mut bits, 2, self.inherit_scale);
        set_bit(&mut bits, 3, self.follow_emitter);
        set_bit(&mut bits, 4, self.follow_emitter_child);
        bits
    }
}

/// `BEM1` body: emitter volume, spawning rates and initial velocities.
#[binrw::binrw]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[brw(big)]
#[serde(rename_all = "PascalCase")]
pub struct DynamicsBlock {
    #[br(try_map = DynamicsFlags::try_from_bits)]
    #[bw(map = DynamicsFlags::to_bits)]
    #[serde(flatten)]
    pub flags: DynamicsFlags,
    pub unknown: u32,
    pub emitter_scale_x: f32,
    pub emitter_scale_y: f32,
    pub emitter_scale_z: f32,
    pub emitter_translation_x: f32,
    pub emitter_translation_y: f32,
    pub emitter_translation_z: f32,
    pub emitter_direction_x: f32,
    pub emitter_direction_y: f32,
    pub emitter_direction_z: f32,
    pub initial_velocity_omni: f32,
    pub initial_velocity_axis: f32,
    pub initial_velocity_random: f32,
    pub initial_velocity_direction: f32,
    pub spread: f32,
    pub initial_velocity_ratio: f32,
    pub rate: f32,
    pub rate_random: f32,
    pub lifetime_random: f32,
    pub volume_sweep: f32,
    pub volume_minimum_radius: f32,
    pub air_resistance: f32,
    pub moment_random: f32,
    pub emitter_rotation_x_deg: u16,
    pub emitter_rotation_y_deg: u16,
    pub emitter_rotation_z_deg: u16,
    pub max_frame: u16,
    pub start_frame: u16,
    pub lifetime: u16,
    pub volume_size: u16,
    pub division_number: u16,
    #[brw(pad_after = 3)]
    pub rate_step: u8,
}

impl DynamicsBlock {
    pub fn from_body(body: &[u8]) -> Result<Self> {
        Ok(Self::read(&mut Cursor::new(body))?)
    }

    pub fn to_body(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}

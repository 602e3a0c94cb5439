//! `BSP1`: how a particle is drawn.
//!
//! The fixed 0x2C-byte body is followed by up to three flag-gated trailing
//! regions, in order: a 0x28-byte texture scroll animation, a texture index
//! animation byte array, and two color key tables whose block-relative
//! offsets and entry counts are backpatched into the fixed body on write.

use binrw::{BinRead, BinWrite};
use jsys_data::{ByteReader, ByteWriter};
use serde::{Deserialize, Serialize};

use crate::blocks::{bit, set_bit, set_window, window};
use crate::color::Color;
use crate::enums::{
    AlphaOperator, BlendFactor, BlendMode, CalcIndexType, CompareType, DirectionType, PlaneType,
    RotationType, ShapeType,
};
use crate::error::{Error, FlagError, Result};

/// Decoded `BSP1` main flag word.
///
/// Bit 24 (texture scroll animation present) is not represented here; it is
/// derived from [`BaseShape::tex_scroll`] when encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseShapeFlags {
    pub shape_type: ShapeType,
    pub direction_type: DirectionType,
    pub rotation_type: RotationType,
    pub plane_type: PlaneType,
    pub flags_unk11: bool,
    pub is_global_color_animation: bool,
    pub flags_unk13: bool,
    pub is_global_texture_animation: bool,
    pub color_in_select: u8,
    pub alpha_in_select: u8,
    pub is_enable_projection: bool,
    pub is_draw_forward_ahead: bool,
    pub is_draw_print_ahead: bool,
    pub flags_unk23: bool,
    pub double_tiling_s: bool,
    pub double_tiling_t: bool,
    pub is_no_draw_parent: bool,
    pub is_no_draw_child: bool,
    #[serde(
        rename = "FlagsUnknownBits",
        default,
        skip_serializing_if = "crate::blocks::is_zero_u32"
    )]
    pub unknown_bits: u32,
}

impl BaseShapeFlags {
    const KNOWN: u32 = 0xF
        | 0x7 << 4
        | 0x7 << 7
        | 1 << 10
        | 0xF << 11
        | 0x7 << 15
        | 1 << 18
        | 0xF << 20
        | 0xF << 25;
    const SCROLL_BIT: u32 = 1 << 24;

    pub fn try_from_bits(bits: u32) -> std::result::Result<Self, FlagError> {
        Ok(Self {
            shape_type: ShapeType::try_from(window(bits, 0, 0xF))?,
            direction_type: DirectionType::try_from(window(bits, 4, 0x7))?,
            rotation_type: RotationType::try_from(window(bits, 7, 0x7))?,
            plane_type: PlaneType::try_from(window(bits, 10, 0x1))?,
            flags_unk11: bit(bits, 11),
            is_global_color_animation: bit(bits, 12),
            flags_unk13: bit(bits, 13),
            is_global_texture_animation: bit(bits, 14),
            color_in_select: window(bits, 15, 0x7) as u8,
            alpha_in_select: window(bits, 18, 0x1) as u8,
            is_enable_projection: bit(bits, 20),
            is_draw_forward_ahead: bit(bits, 21),
            is_draw_print_ahead: bit(bits, 22),
            flags_unk23: bit(bits, 23),
            double_tiling_s: bit(bits, 25),
            double_tiling_t: bit(bits, 26),
            is_no_draw_parent: bit(bits, 27),
            is_no_draw_child: bit(bits, 28),
            unknown_bits: bits & !(Self::KNOWN | Self::SCROLL_BIT),
        })
    }

    pub fn to_bits(&self) -> u32 {
        let mut bits = self.unknown_bits;
        set_window(&mut bits, 0, self.shape_type.bits());
        set_window(&mut bits, 4, self.direction_type.bits());
        set_window(&mut bits, 7, self.rotation_type.bits());
        set_window(&mut bits, 10, self.plane_type.bits());
        set_bit(&mut bits, 11, self.flags_unk11);
        set_bit(&mut bits, 12, self.is_global_color_animation);
        set_bit(&mut bits, 13, self.flags_unk13);
        set_bit(&mut bits, 14, self.is_global_texture_animation);
        set_window(&mut bits, 15, self.color_in_select as u32 & 0x7);
        set_window(&mut bits, 18, self.alpha_in_select as u32 & 0x1);
        set_bit(&mut bits, 20, self.is_enable_projection);
        set_bit(&mut bits, 21, self.is_draw_forward_ahead);
        set_bit(&mut bits, 22, self.is_draw_print_ahead);
        set_bit(&mut bits, 23, self.flags_unk23);
        set_bit(&mut bits, 25, self.double_tiling_s);
        set_bit(&mut bits, 26, self.double_tiling_t);
        set_bit(&mut bits, 27, self.is_no_draw_parent);
        set_bit(&mut bits, 28, self.is_no_draw_child);
        bits
    }
}

/// Decoded GX blend mode word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlendModeFlags {
    pub blend_mode: BlendMode,
    pub source_factor: BlendFactor,
    pub destination_factor: BlendFactor,
    pub blend_mode_flags_unk10: bool,
    pub blend_mode_flags_unk14: bool,
    #[serde(
        rename = "BlendModeFlagsUnknownBits",
        default,
        skip_serializing_if = "crate::blocks::is_zero_u16"
    )]
    pub unknown_bits: u16,
}

impl BlendModeFlags {
    const KNOWN: u32 = 0x3 | 0xF << 2 | 0xF << 6 | 1 << 10 | 1 << 14;

    pub fn try_from_bits(raw: u16) -> std::result::Result<Self, FlagError> {
        let bits = raw as u32;
        Ok(Self {
            blend_mode: BlendMode::try_from(window(bits, 0, 0x3))?,
            source_factor: BlendFactor::try_from(window(bits, 2, 0xF))?,
            destination_factor: BlendFactor::try_from(window(bits, 6, 0xF))?,
            blend_mode_flags_unk10: bit(bits, 10),
            blend_mode_flags_unk14: bit(bits, 14),
            unknown_bits: (bits & !Self::KNOWN) as u16,
        })
    }

    pub fn to_bits(&self) -> u16 {
        let mut bits = self.unknown_bits as u32;
        set_window(&mut bits, 0, self.blend_mode.bits());
        set_window(&mut bits, 2, self.source_factor.bits());
        set_window(&mut bits, 6, self.destination_factor.bits());
        set_bit(&mut bits, 10, self.blend_mode_flags_unk10);
        set_bit(&mut bits, 14, self.blend_mode_flags_unk14);
        bits as u16
    }
}

/// Decoded GX alpha compare byte. Every bit belongs to a window whose full
/// range is valid, so decoding cannot fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlphaCompareFlags {
    pub alpha_compare_type_0: CompareType,
    pub alpha_operator: AlphaOperator,
    pub alpha_compare_type_1: CompareType,
}

impl AlphaCompareFlags {
    pub fn from_bits(raw: u8) -> Self {
        let bits = raw as u32;
        Self {
            alpha_compare_type_0: CompareType::try_from(window(bits, 0, 0x7))
                .expect("3-bit window covers all compare types"),
            alpha_operator: AlphaOperator::try_from(window(bits, 3, 0x3))
                .expect("2-bit window covers all alpha operators"),
            alpha_compare_type_1: CompareType::try_from(window(bits, 5, 0x7))
                .expect("3-bit window covers all compare types"),
        }
    }

    pub fn to_bits(&self) -> u8 {
        let mut bits = 0;
        set_window(&mut bits, 0, self.alpha_compare_type_0.bits());
        set_window(&mut bits, 3, self.alpha_operator.bits());
        set_window(&mut bits, 5, self.alpha_compare_type_1.bits());
        bits as u8
    }
}

/// Decoded GX Z-mode byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZModeFlags {
    pub depth_test: bool,
    pub depth_compare_type: CompareType,
    pub depth_write: bool,
    pub z_mode_flags_unk5: bool,
    #[serde(
        rename = "ZModeFlagsUnknownBits",
        default,
        skip_serializing_if = "crate::blocks::is_zero_u8"
    )]
    pub unknown_bits: u8,
}

impl ZModeFlags {
    const KNOWN: u32 = 0x1 | 0x7 << 1 | 1 << 4 | 1 << 5;

    pub fn from_bits(raw: u8) -> Self {
        let bits = raw as u32;
        Self {
            depth_test: bit(bits, 0),
            depth_compare_type: CompareType::try_from(window(bits, 1, 0x7))
                .expect("3-bit window covers all compare types"),
            depth_write: bit(bits, 4),
            z_mode_flags_unk5: bit(bits, 5),
            unknown_bits: (bits & !Self::KNOWN) as u8,
        }
    }

    pub fn to_bits(&self) -> u8 {
        let mut bits = self.unknown_bits as u32;
        set_bit(&mut bits, 0, self.depth_test);
        set_window(&mut bits, 1, self.depth_compare_type.bits());
        set_bit(&mut bits, 4, self.depth_write);
        set_bit(&mut bits, 5, self.z_mode_flags_unk5);
        bits as u8
    }
}

/// Decoded texture animation byte.
///
/// Bit 0 (texture index animation enabled) is derived from
/// [`BaseShape::texture_index_anim_data`] when encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextureFlags {
    pub tex_flags_unk1: bool,
    pub tex_calc_index_type: CalcIndexType,
    #[serde(
        rename = "TexFlagsUnknownBits",
        default,
        skip_serializing_if = "crate::blocks::is_zero_u8"
    )]
    pub unknown_bits: u8,
}

impl TextureFlags {
    const KNOWN: u32 = 1 << 1 | 0x7 << 2;
    const ANIM_BIT: u32 = 1;

    pub fn try_from_bits(raw: u8) -> std::result::Result<Self, FlagError> {
        let bits = raw as u32;
        Ok(Self {
            tex_flags_unk1: bit(bits, 1),
            tex_calc_index_type: CalcIndexType::try_from(window(bits, 2, 0x7))?,
            unknown_bits: (bits & !(Self::KNOWN | Self::ANIM_BIT)) as u8,
        })
    }

    pub fn to_bits(&self) -> u8 {
        let mut bits = self.unknown_bits as u32;
        set_bit(&mut bits, 1, self.tex_flags_unk1);
        set_window(&mut bits, 2, self.tex_calc_index_type.bits());
        bits as u8
    }
}

/// Decoded color animation byte.
///
/// Bits 1 and 3 (primary / environment key tables present) are derived from
/// the corresponding [`BaseShape`] key tables when encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColorFlags {
    pub color_flags_unk0: bool,
    pub color_flags_unk2: bool,
    pub color_calc_index_type: CalcIndexType,
    #[serde(
        rename = "ColorFlagsUnknownBits",
        default,
        skip_serializing_if = "crate::blocks::is_zero_u8"
    )]
    pub unknown_bits: u8,
}

impl ColorFlags {
    const KNOWN: u32 = 1 | 1 << 2 | 0x7 << 4;
    const PRIMARY_BIT: u32 = 1 << 1;
    const ENVIRONMENT_BIT: u32 = 1 << 3;

    pub fn try_from_bits(raw: u8) -> std::result::Result<Self, FlagError> {
        let bits = raw as u32;
        Ok(Self {
            color_flags_unk0: bit(bits, 0),
            color_flags_unk2: bit(bits, 2),
            color_calc_index_type: CalcIndexType::try_from(window(bits, 4, 0x7))?,
            unknown_bits: (bits & !(Self::KNOWN | Self::PRIMARY_BIT | Self::ENVIRONMENT_BIT))
                as u8,
        })
    }

    pub fn to_bits(&self) -> u8 {
        let mut bits = self.unknown_bits as u32;
        set_bit(&mut bits, 0, self.color_flags_unk0);
        set_bit(&mut bits, 2, self.color_flags_unk2);
        set_window(&mut bits, 4, self.color_calc_index_type.bits());
        bits as u8
    }
}

/// One key of a color animation: a frame number and the color at it.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[brw(big)]
#[serde(rename_all = "PascalCase")]
pub struct ColorFrame {
    pub frame: u16,
    pub color: Color,
}

/// The texture scroll animation, present when `BSP1` flag bit 24 is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TexScrollAnim {
    pub tex_init_trans_x: f32,
    pub tex_init_trans_y: f32,
    pub tex_init_scale_x: f32,
    pub tex_init_scale_y: f32,
    pub tex_init_rotation: f32,
    pub tex_inc_trans_x: f32,
    pub tex_inc_trans_y: f32,
    pub tex_inc_scale_x: f32,
    pub tex_inc_scale_y: f32,
    pub tex_inc_rotation: f32,
}

impl Default for TexScrollAnim {
    fn default() -> Self {
        Self {
            tex_init_trans_x: 0.0,
            tex_init_trans_y: 0.0,
            tex_init_scale_x: 1.0,
            tex_init_scale_y: 1.0,
            tex_init_rotation: 0.0,
            tex_inc_trans_x: 0.0,
            tex_inc_trans_y: 0.0,
            tex_inc_scale_x: 1.0,
            tex_inc_scale_y: 1.0,
            tex_inc_rotation: 0.0,
        }
    }
}

impl TexScrollAnim {
    fn read(r: &mut ByteReader) -> Result<Self> {
        Ok(Self {
            tex_init_trans_x: r.read_f32()?,
            tex_init_trans_y: r.read_f32()?,
            tex_init_scale_x: r.read_f32()?,
            tex_init_scale_y: r.read_f32()?,
            tex_init_rotation: r.read_f32()?,
            tex_inc_trans_x: r.read_f32()?,
            tex_inc_trans_y: r.read_f32()?,
            tex_inc_scale_x: r.read_f32()?,
            tex_inc_scale_y: r.read_f32()?,
            tex_inc_rotation: r.read_f32()?,
        })
    }

    fn write(&self, w: &mut ByteWriter) {
        for v in [
            self.tex_init_trans_x,
            self.tex_init_trans_y,
            self.tex_init_scale_x,
            self.tex_init_scale_y,
            self.tex_init_rotation,
            self.tex_inc_trans_x,
            self.tex_inc_trans_y,
            self.tex_inc_scale_x,
            self.tex_inc_scale_y,
            self.tex_inc_rotation,
        ] {
            w.write_f32(v);
        }
    }
}

/// `BSP1` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseShape {
    #[serde(flatten)]
    pub flags: BaseShapeFlags,
    pub base_size_x: f32,
    pub base_size_y: f32,
    #[serde(flatten)]
    pub blend_mode_flags: BlendModeFlags,
    #[serde(flatten)]
    pub alpha_compare_flags: AlphaCompareFlags,
    pub alpha_reference_0: u8,
    pub alpha_reference_1: u8,
    #[serde(flatten)]
    pub z_mode_flags: ZModeFlags,
    #[serde(flatten)]
    pub texture_flags: TextureFlags,
    pub texture_index: u8,
    #[serde(flatten)]
    pub color_flags: ColorFlags,
    pub color_animation_max_frame: u16,
    pub primary_color: Color,
    pub environment_color: Color,
    pub animation_random: u8,
    pub color_loop_offset_mask: u8,
    pub texture_index_loop_offset_mask: u8,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub tex_scroll: Option<TexScrollAnim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_index_anim_data: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color_keyframes: Option<Vec<ColorFrame>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_color_keyframes: Option<Vec<ColorFrame>>,
}

// Body offsets of the backpatched table fields.
const OFF_PRIMARY_TABLE: usize = 0x04;
const OFF_ENVIRONMENT_TABLE: usize = 0x06;
const OFF_TEX_ANIM_COUNT: usize = 0x17;
const OFF_PRIMARY_COUNT: usize = 0x1A;
const OFF_ENVIRONMENT_COUNT: usize = 0x1B;

impl BaseShape {
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let mut r = ByteReader::new(body);

        let word = r.read_u32()?;
        let has_scroll = bit(word, 24);
        let flags = BaseShapeFlags::try_from_bits(word)?;

        // Table offsets are relative to the block start, 8 bytes before the
        // body; counts live in the fixed body as single bytes.
        let primary_offset = r.read_u16()? as usize;
        let environment_offset = r.read_u16()? as usize;

        let base_size_x = r.read_f32()?;
        let base_size_y = r.read_f32()?;
        let blend_mode_flags = BlendModeFlags::try_from_bits(r.read_u16()?)?;
        let alpha_compare_flags = AlphaCompareFlags::from_bits(r.read_u8()?);
        let alpha_reference_0 = r.read_u8()?;
        let alpha_reference_1 = r.read_u8()?;
        let z_mode_flags = ZModeFlags::from_bits(r.read_u8()?);

        let texture_raw = r.read_u8()?;
        let has_tex_anim = bit(texture_raw as u32, 0);
        let texture_flags = TextureFlags::try_from_bits(texture_raw)?;
        let tex_anim_count = r.read_u8()? as usize;
        let texture_index = r.read_u8()?;

        let color_raw = r.read_u8()?;
        let has_primary = bit(color_raw as u32, 1);
        let has_environment = bit(color_raw as u32, 3);
        let color_flags = ColorFlags::try_from_bits(color_raw)?;
        let primary_count = r.read_u8()? as usize;
        let environment_count = r.read_u8()? as usize;

        let color_animation_max_frame = r.read_u16()?;
        let primary_color = read_color(&mut r)?;
        let environment_color = read_color(&mut r)?;
        let animation_random = r.read_u8()?;
        let color_loop_offset_mask = r.read_u8()?;
        let texture_index_loop_offset_mask = r.read_u8()?;
        r.align_to(4)?;

        let tex_scroll = if has_scroll {
            Some(TexScrollAnim::read(&mut r)?)
        } else {
            None
        };

        let texture_index_anim_data = if has_tex_anim {
            Some(r.read_bytes(tex_anim_count)?.to_vec())
        } else {
            None
        };

        let primary_color_keyframes = if has_primary {
            Some(read_color_frames(body, primary_offset, primary_count)?)
        } else {
            None
        };
        let environment_color_keyframes = if has_environment {
            Some(read_color_frames(body, environment_offset, environment_count)?)
        } else {
            None
        };

        Ok(Self {
            flags,
            base_size_x,
            base_size_y,
            blend_mode_flags,
            alpha_compare_flags,
            alpha_reference_0,
            alpha_reference_1,
            z_mode_flags,
            texture_flags,
            texture_index,
            color_flags,
            color_animation_max_frame,
            primary_color,
            environment_color,
            animation_random,
            color_loop_offset_mask,
            texture_index_loop_offset_mask,
            tex_scroll,
            texture_index_anim_data,
            primary_color_keyframes,
            environment_color_keyframes,
        })
    }

    pub fn to_body(&self) -> Result<Vec<u8>> {
        let mut w = ByteWriter::new();

        let mut word = self.flags.to_bits();
        set_bit(&mut word, 24, self.tex_scroll.is_some());
        w.write_u32(word);

        w.write_u16(0); // primary table offset, patched below
        w.write_u16(0); // environment table offset, patched below
        w.write_f32(self.base_size_x);
        w.write_f32(self.base_size_y);
        w.write_u16(self.blend_mode_flags.to_bits());
        w.write_u8(self.alpha_compare_flags.to_bits());
        w.write_u8(self.alpha_reference_0);
        w.write_u8(self.alpha_reference_1);
        w.write_u8(self.z_mode_flags.to_bits());

        let mut texture_raw = self.texture_flags.to_bits();
        if self.texture_index_anim_data.is_some() {
            texture_raw |= TextureFlags::ANIM_BIT as u8;
        }
        w.write_u8(texture_raw);
        w.write_u8(0); // texture anim count, patched below
        w.write_u8(self.texture_index);

        let mut color_raw = self.color_flags.to_bits();
        if self.primary_color_keyframes.is_some() {
            color_raw |= ColorFlags::PRIMARY_BIT as u8;
        }
        if self.environment_color_keyframes.is_some() {
            color_raw |= ColorFlags::ENVIRONMENT_BIT as u8;
        }
        w.write_u8(color_raw);
        w.write_u8(0); // primary count, patched below
        w.write_u8(0); // environment count, patched below

        w.write_u16(self.color_animation_max_frame);
        write_color(&mut w, self.primary_color);
        write_color(&mut w, self.environment_color);
        w.write_u8(self.animation_random);
        w.write_u8(self.color_loop_offset_mask);
        w.write_u8(self.texture_index_loop_offset_mask);
        w.align_to(4);

        if let Some(scroll) = &self.tex_scroll {
            scroll.write(&mut w);
        }

        if let Some(data) = &self.texture_index_anim_data {
            w.patch_u8(OFF_TEX_ANIM_COUNT, table_count("texture index anim", data.len())?)?;
            w.write_bytes(data);
            w.align_to(4);
        }

        if let Some(frames) = &self.primary_color_keyframes {
            self.write_color_table(&mut w, frames, OFF_PRIMARY_TABLE, OFF_PRIMARY_COUNT)?;
        }
        if let Some(frames) = &self.environment_color_keyframes {
            self.write_color_table(
                &mut w,
                frames,
                OFF_ENVIRONMENT_TABLE,
                OFF_ENVIRONMENT_COUNT,
            )?;
        }

        Ok(w.into_inner())
    }

    fn write_color_table(
        &self,
        w: &mut ByteWriter,
        frames: &[ColorFrame],
        offset_field: usize,
        count_field: usize,
    ) -> Result<()> {
        let block_offset = w.position() + 8;
        if block_offset > u16::MAX as usize {
            return Err(Error::ValueOutOfRange {
                tag: "BSP1",
                what: "color table offset",
                value: block_offset,
            });
        }
        w.patch_u16(offset_field, block_offset as u16)?;
        w.patch_u8(count_field, table_count("color keyframe", frames.len())?)?;
        for frame in frames {
            w.write_u16(frame.frame);
            write_color(w, frame.color);
        }
        w.align_to(4);
        Ok(())
    }
}

fn table_count(what: &'static str, len: usize) -> Result<u8> {
    u8::try_from(len).map_err(|_| Error::ValueOutOfRange {
        tag: "BSP1",
        what,
        value: len,
    })
}

fn read_color(r: &mut ByteReader) -> Result<Color> {
    let b = r.read_bytes(4)?;
    Ok(Color::new(b[0], b[1], b[2], b[3]))
}

fn write_color(w: &mut ByteWriter, c: Color) {
    w.write_bytes(&[c.r, c.g, c.b, c.a]);
}

fn read_color_frames(body: &[u8], block_offset: usize, count: usize) -> Result<Vec<ColorFrame>> {
    let body_offset = block_offset.checked_sub(8).ok_or(Error::ValueOutOfRange {
        tag: "BSP1",
        what: "color table offset",
        value: block_offset,
    })?;

    let mut r = ByteReader::new(body);
    r.seek(body_offset)?;
    let mut frames = Vec::with_capacity(count);
    for _ in 0..count {
        let frame = r.read_u16()?;
        let color = read_color(&mut r)?;
        frames.push(ColorFrame { frame, color });
    }
    Ok(frames)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::blocks::base_shape::{
        AlphaCompareFlags, BaseShape, BaseShapeFlags, BlendModeFlags, ColorFlags, ColorFrame,
        TexScrollAnim, TextureFlags, ZModeFlags,
    };
    use crate::color::Color;
    use crate::enums::{
        AlphaOperator, BlendFactor, BlendMode, CalcIndexType, CompareType, DirectionType,
        PlaneType, RotationType, ShapeType,
    };

    fn minimal() -> BaseShape {
        BaseShape {
            flags: BaseShapeFlags::try_from_bits(ShapeType::Billboard.bits()).unwrap(),
            base_size_x: 1.0,
            base_size_y: 1.0,
            blend_mode_flags: BlendModeFlags::try_from_bits(
                (BlendMode::Blend.bits()
                    | BlendFactor::SourceAlpha.bits() << 2
                    | BlendFactor::InverseSourceAlpha.bits() << 6) as u16,
            )
            .unwrap(),
            alpha_compare_flags: AlphaCompareFlags::from_bits(0),
            alpha_reference_0: 0,
            alpha_reference_1: 0,
            z_mode_flags: ZModeFlags::from_bits(0x17),
            texture_flags: TextureFlags::try_from_bits(0).unwrap(),
            texture_index: 0,
            color_flags: ColorFlags::try_from_bits(0).unwrap(),
            color_animation_max_frame: 0,
            primary_color: Color::new(0xFF, 0xFF, 0xFF, 0xFF),
            environment_color: Color::new(0x80, 0x80, 0x80, 0xFF),
            animation_random: 0,
            color_loop_offset_mask: 0,
            texture_index_loop_offset_mask: 0,
            tex_scroll: None,
            texture_index_anim_data: None,
            primary_color_keyframes: None,
            environment_color_keyframes: None,
        }
    }

    #[test]
    fn minimal_body_is_fixed_size() {
        let body = minimal().to_body().unwrap();
        assert_eq!(body.len(), 0x2C);

        let back = BaseShape::from_body(&body).unwrap();
        assert_eq!(back, minimal());
    }

    #[test]
    fn flag_word_roundtrip() {
        let bits = ShapeType::DirectionCross.bits()
            | DirectionType::EmitterDirection.bits() << 4
            | RotationType::Xyz.bits() << 7
            | PlaneType::Xz.bits() << 10
            | 1 << 12
            | 0x5 << 15
            | 1 << 27;
        let flags = BaseShapeFlags::try_from_bits(bits).unwrap();
        assert_eq!(flags.shape_type, ShapeType::DirectionCross);
        assert_eq!(flags.color_in_select, 5);
        assert!(flags.is_no_draw_parent);
        assert_eq!(flags.to_bits(), bits);
    }

    #[test]
    fn scroll_anim_presence_sets_bit_24() {
        let mut shape = minimal();
        shape.tex_scroll = Some(TexScrollAnim::default());

        let body = shape.to_body().unwrap();
        assert_eq!(body.len(), 0x2C + 0x28);
        assert_eq!(body[0] & 0x01, 0x01); // bit 24 of the big-endian word

        let back = BaseShape::from_body(&body).unwrap();
        assert_eq!(back.tex_scroll, Some(TexScrollAnim::default()));
    }

    #[test]
    fn texture_anim_table_is_counted_and_padded() {
        let mut shape = minimal();
        shape.texture_index_anim_data = Some(vec![0, 1, 2, 1, 0]);

        let body = shape.to_body().unwrap();
        assert_eq!(body[0x16] & 1, 1); // enable bit
        assert_eq!(body[0x17], 5); // count
        assert_eq!(body.len(), 0x2C + 8); // 5 bytes padded to 8

        let back = BaseShape::from_body(&body).unwrap();
        assert_eq!(back.texture_index_anim_data, Some(vec![0, 1, 2, 1, 0]));
    }

    #[test]
    fn color_tables_are_backpatched() {
        let mut shape = minimal();
        shape.primary_color_keyframes = Some(vec![
            ColorFrame {
                frame: 0,
                color: Color::new(0xFF, 0, 0, 0xFF),
            },
            ColorFrame {
                frame: 15,
                color: Color::new(0, 0xFF, 0, 0x80),
            },
        ]);
        shape.environment_color_keyframes = Some(vec![ColorFrame {
            frame: 7,
            color: Color::new(1, 2, 3, 4),
        }]);

        let body = shape.to_body().unwrap();
        // Primary table directly after the fixed body, block-relative 0x34.
        assert_eq!(&body[0x04..0x06], &[0x00, 0x34]);
        assert_eq!(body[0x1A], 2);
        // Environment table after 12 padded bytes of primary table.
        assert_eq!(&body[0x06..0x08], &[0x00, 0x40]);
        assert_eq!(body[0x1B], 1);

        let back = BaseShape::from_body(&body).unwrap();
        assert_eq!(back, shape);
    }

    #[test]
    fn alpha_compare_byte_covers_all_bits() {
        for raw in 0..=u8::MAX {
            let flags = AlphaCompareFlags::from_bits(raw);
            assert_eq!(flags.to_bits(), raw);
        }
        let flags = AlphaCompareFlags::from_bits(0b101_01_011);
        assert_eq!(flags.alpha_compare_type_0, CompareType::Equal);
        assert_eq!(flags.alpha_operator, AlphaOperator::Or);
        assert_eq!(flags.alpha_compare_type_1, CompareType::GreaterThanEqual);
    }

    #[test]
    fn calc_index_windows_are_validated() {
        assert!(TextureFlags::try_from_bits(0x7 << 2).is_err());
        assert!(ColorFlags::try_from_bits((CalcIndexType::Random.bits() as u8) << 4).is_ok());
        assert!(ColorFlags::try_from_bits(0x7 << 4).is_err());
    }
}

//! The JPA block registry.
//!
//! Each block kind owns its wire layout; this module maps 4-character tags
//! onto those codecs and frames block bodies with the shared
//! `tag + length + padding` envelope.

pub mod base_shape;
pub mod child_shape;
pub mod dynamics;
pub mod ex_tex;
pub mod extra_shape;
pub mod field;
pub mod key;

pub use base_shape::{BaseShape, ColorFrame, TexScrollAnim};
pub use child_shape::ChildShape;
pub use dynamics::DynamicsBlock;
pub use ex_tex::ExTexShape;
pub use extra_shape::ExtraShape;
pub use field::FieldBlock;
pub use key::{KeyBlock, Keyframe};

use jsys_data::{ByteReader, ByteWriter};

use crate::error::Result;

/// A decoded block of a particle resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Dynamics(DynamicsBlock),
    Field(FieldBlock),
    Key(KeyBlock),
    BaseShape(BaseShape),
    ExtraShape(ExtraShape),
    ChildShape(ChildShape),
    ExTex(ExTexShape),
}

impl Block {
    /// Decode a block body by tag. Returns `None` for tags outside the
    /// registry so the caller can decide between skipping and failing.
    pub fn decode(tag: [u8; 4], body: &[u8]) -> Result<Option<Block>> {
        Ok(Some(match &tag {
            b"BEM1" => Block::Dynamics(DynamicsBlock::from_body(body)?),
            b"FLD1" => Block::Field(FieldBlock::from_body(body)?),
            b"KFA1" => Block::Key(KeyBlock::from_body(body)?),
            b"BSP1" => Block::BaseShape(BaseShape::from_body(body)?),
            b"ESP1" => Block::ExtraShape(ExtraShape::from_body(body)?),
            b"SSP1" => Block::ChildShape(ChildShape::from_body(body)?),
            b"ETX1" => Block::ExTex(ExTexShape::from_body(body)?),
            _ => return Ok(None),
        }))
    }

    pub fn tag(&self) -> &'static [u8; 4] {
        match self {
            Block::Dynamics(_) => b"BEM1",
            Block::Field(_) => b"FLD1",
            Block::Key(_) => b"KFA1",
            Block::BaseShape(_) => b"BSP1",
            Block::ExtraShape(_) => b"ESP1",
            Block::ChildShape(_) => b"SSP1",
            Block::ExTex(_) => b"ETX1",
        }
    }

    pub fn to_body(&self) -> Result<Vec<u8>> {
        match self {
            Block::Dynamics(b) => b.to_body(),
            Block::Field(b) => b.to_body(),
            Block::Key(b) => b.to_body(),
            Block::BaseShape(b) => b.to_body(),
            Block::ExtraShape(b) => b.to_body(),
            Block::ChildShape(b) => b.to_body(),
            Block::ExTex(b) => b.to_body(),
        }
    }
}

/// Header of a framed block: its tag and total length including the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockHeader {
    pub tag: [u8; 4],
    pub total_len: usize,
}

pub(crate) fn read_block_header(reader: &mut ByteReader) -> Result<BlockHeader> {
    let raw = reader.read_bytes(4)?;
    let tag = [raw[0], raw[1], raw[2], raw[3]];
    let total_len = reader.read_u32()? as usize;
    Ok(BlockHeader { tag, total_len })
}

/// Frame a block body: tag, total length, body, padding to 4 bytes.
pub(crate) fn write_block(writer: &mut ByteWriter, tag: &[u8; 4], body: &[u8]) {
    let padded = body.len().next_multiple_of(4);
    writer.write_bytes(tag);
    writer.write_u32((8 + padded) as u32);
    writer.write_bytes(body);
    for _ in body.len()..padded {
        writer.write_u8(0);
    }
}

// Bit window helpers shared by the flag-word structs.

pub(crate) fn bit(bits: u32, n: u32) -> bool {
    bits >> n & 1 != 0
}

pub(crate) fn window(bits: u32, shift: u32, mask: u32) -> u32 {
    (bits >> shift) & mask
}

pub(crate) fn set_bit(bits: &mut u32, n: u32, v: bool) {
    if v {
        *bits |= 1 << n;
    }
}

pub(crate) fn set_window(bits: &mut u32, shift: u32, v: u32) {
    *bits |= v << shift;
}

pub(crate) fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

pub(crate) fn is_zero_u16(v: &u16) -> bool {
    *v == 0
}

pub(crate) fn is_zero_u8(v: &u8) -> bool {
    *v == 0
}

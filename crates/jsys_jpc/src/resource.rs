//! One particle resource: a chain of typed blocks plus texture indices.

use jsys_data::{ByteReader, ByteWriter};
use tracing::warn;

use crate::blocks::{
    read_block_header, write_block, BaseShape, Block, ChildShape, DynamicsBlock, ExTexShape,
    ExtraShape, FieldBlock, KeyBlock,
};
use crate::error::{Error, Result};

/// A complete particle definition.
///
/// The dynamics, base-shape and extra-shape blocks are required; field and
/// key blocks may repeat; child-shape and ex-tex-shape are optional. The
/// `TDB1` terminator's texture indices resolve against the owning
/// container's texture table.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Index stored in the resource header; rewritten from the container
    /// position when encoding.
    pub index: i16,
    pub dynamics: DynamicsBlock,
    pub fields: Vec<FieldBlock>,
    pub keys: Vec<KeyBlock>,
    pub base_shape: BaseShape,
    pub extra_shape: ExtraShape,
    pub child_shape: Option<ChildShape>,
    pub ex_tex_shape: Option<ExTexShape>,
    pub texture_ids: Vec<i16>,
}

impl Resource {
    /// Decode one resource at the reader's position. `slot` is the position
    /// inside the container, used for error reporting.
    pub(crate) fn read(reader: &mut ByteReader, slot: usize) -> Result<Self> {
        let index = reader.read_i16()?;
        let section_count = reader.read_i16()? as usize;
        let field_count = reader.read_u8()? as usize;
        let key_count = reader.read_u8()? as usize;
        let texture_count = reader.read_u8()? as usize;
        reader.read_u8()?;

        let mut dynamics = None;
        let mut fields = Vec::new();
        let mut keys = Vec::new();
        let mut base_shape = None;
        let mut extra_shape = None;
        let mut child_shape = None;
        let mut ex_tex_shape = None;
        let mut texture_ids = None;

        for _ in 0..section_count {
            let offset = reader.position();
            let header = read_block_header(reader)?;
            if header.total_len < 8 {
                // Without a sane length there is no way to skip the block.
                return Err(Error::UnknownTag {
                    tag: String::from_utf8_lossy(&header.tag).into_owned(),
                    offset,
                });
            }
            let body = reader.read_bytes(header.total_len - 8)?;
            eprintln!("DEBUG tag={:?} len={}", String::from_utf8_lossy(&header.tag), header.total_len);

            if &header.tag == b"TDB1" {
                let mut ids = ByteReader::new(body);
                let mut list = Vec::with_capacity(texture_count);
                for _ in 0..texture_count {
                    list.push(ids.read_i16()?);
                }
                texture_ids = Some(list);
                continue;
            }

            match Block::decode(header.tag, body)? {
                Some(Block::Dynamics(block)) => dynamics = Some(block),
                Some(Block::Field(block)) => fields.push(block),
                Some(Block::Key(block)) => keys.push(block),
                Some(Block::BaseShape(block)) => base_shape = Some(block),
                Some(Block::ExtraShape(block)) => extra_shape = Some(block),
                Some(Block::ChildShape(block)) => child_shape = Some(block),
                Some(Block::ExTex(block)) => ex_tex_shape = Some(block),
                None => {
                    // The length header still delimits the block, so an
                    // unknown tag is skippable on read.
                    warn!(
                        tag = %String::from_utf8_lossy(&header.tag),
                        offset,
                        "skipping unknown block tag"
                    );
                }
            }
        }

        if fields.len() != field_count {
            return Err(Error::CountMismatch {
                index: slot,
                what: "field blocks",
                declared: field_count,
                found: fields.len(),
            });
        }
        if keys.len() != key_count {
            return Err(Error::CountMismatch {
                index: slot,
                what: "key blocks",
                declared: key_count,
                found: keys.len(),
            });
        }

        let missing = |tag| Error::MissingBlock { index: slot, tag };
        Ok(Self {
            index,
            dynamics: dynamics.ok_or_else(|| missing("BEM1"))?,
            fields,
            keys,
            base_shape: base_shape.ok_or_else(|| missing("BSP1"))?,
            extra_shape: extra_shape.ok_or_else(|| missing("ESP1"))?,
            child_shape,
            ex_tex_shape,
            texture_ids: texture_ids.ok_or_else(|| missing("TDB1"))?,
        })
    }

    /// Encode this resource with the given container position and resolved
    /// texture indices.
    pub(crate) fn write(
        &self,
        writer: &mut ByteWriter,
        index: i16,
        texture_ids: &[i16],
    ) -> Result<()> {
        let counts = |what, value: usize| {
            u8::try_from(value).map_err(|_| Error::ValueOutOfRange {
                tag: "resource header",
                what,
                value,
            })
        };
        let field_count = counts("field block count", self.fields.len())?;
        let key_count = counts("key block count", self.keys.len())?;
        let texture_count = counts("texture count", texture_ids.len())?;

        let section_count = 4
            + self.fields.len()
            + self.keys.len()
            + usize::from(self.child_shape.is_some())
            + usize::from(self.ex_tex_shape.is_some());

        writer.write_i16(index);
        writer.write_i16(section_count as i16);
        writer.write_u8(field_count);
        writer.write_u8(key_count);
        writer.write_u8(texture_count);
        writer.write_u8(0);

        write_block(writer, b"BEM1", &self.dynamics.to_body()?);
        for field in &self.fields {
            write_block(writer, b"FLD1", &field.to_body()?);
        }
        for key in &self.keys {
            write_block(writer, b"KFA1", &key.to_body()?);
        }
        write_block(writer, b"BSP1", &self.base_shape.to_body()?);
        write_block(writer, b"ESP1", &self.extra_shape.to_body()?);
        if let Some(child) = &self.child_shape {
            write_block(writer, b"SSP1", &child.to_body()?);
        }
        if let Some(ex_tex) = &self.ex_tex_shape {
            write_block(writer, b"ETX1", &ex_tex.to_body()?);
        }

        let mut tdb1 = ByteWriter::new();
        for id in texture_ids {
            tdb1.write_i16(*id);
        }
        write_block(writer, b"TDB1", &tdb1.into_inner());

        Ok(())
    }
}

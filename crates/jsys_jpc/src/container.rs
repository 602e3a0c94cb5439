//! The outer JPAC 2-10 container.

use bon::Builder;
use indexmap::IndexMap;
use jsys_data::{ByteReader, ByteWriter};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::resource::Resource;
use crate::texture::Texture;

const MAGIC: &[u8; 8] = b"JPAC2-10";
const HEADER_SIZE: usize = 0x10;
const TEXTURE_TABLE_OFFSET_FIELD: usize = 0x0C;

/// Options for how the container should be written.
#[derive(Debug, Clone, Copy, Builder)]
pub struct ContainerWriterOptions {
    /// Emit texture entries sorted by name hash, making the output
    /// deterministic regardless of insertion order. Disable to preserve
    /// the in-memory pool order.
    #[builder(default = true)]
    pub sort_textures_by_hash: bool,
}

impl Default for ContainerWriterOptions {
    fn default() -> Self {
        Self {
            sort_textures_by_hash: true,
        }
    }
}

/// A decoded particle container: resources plus the shared texture pool.
#[derive(Debug, Default)]
pub struct Container {
    pub resources: Vec<Resource>,
    textures: IndexMap<String, Texture>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of textures in the pool.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Texture names in pool order.
    pub fn texture_names(&self) -> impl Iterator<Item = &str> {
        self.textures.keys().map(|s| s.as_str())
    }

    pub fn texture(&self, name: &str) -> Option<&Texture> {
        self.textures.get(name)
    }

    pub fn texture_by_index(&self, index: usize) -> Option<&Texture> {
        self.textures.get_index(index).map(|(_, t)| t)
    }

    /// Pool position of a texture name.
    pub fn texture_index(&self, name: &str) -> Option<usize> {
        self.textures.get_index_of(name)
    }

    /// Add a texture to the pool, deduplicating identical entries. Two
    /// different payloads under one name violate the unique-name-hash
    /// invariant and are rejected.
    pub fn add_texture(&mut self, texture: Texture) -> Result<usize> {
        if let Some(index) = self.textures.get_index_of(&texture.name) {
            if self.textures[index].data != texture.data {
                return Err(Error::DuplicateTexture(texture.name));
            }
            return Ok(index);
        }
        let (index, _) = self.textures.insert_full(texture.name.clone(), texture);
        Ok(index)
    }

    /// Decode a container from JPC bytes.
    #[instrument(skip_all, fields(len = data.len()), err)]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(data);

        let magic = reader.read_bytes(8)?;
        if magic != MAGIC {
            return Err(Error::InvalidMagic {
                expected: "JPAC2-10",
                found: String::from_utf8_lossy(magic).into_owned(),
            });
        }

        let resource_count = reader.read_u16()? as usize;
        let texture_count = reader.read_u16()? as usize;
        let texture_table_offset = reader.read_u32()? as usize;

        let mut container = Self::new();

        reader.seek(texture_table_offset)?;
        for _ in 0..texture_count {
            let texture = Texture::read(&mut reader)?;
            if container.textures.contains_key(&texture.name) {
                return Err(Error::DuplicateTexture(texture.name));
            }
            container.textures.insert(texture.name.clone(), texture);
        }

        reader.seek(HEADER_SIZE)?;
        for slot in 0..resource_count {
            container
                .resources
                .push(Resource::read(&mut reader, slot)?);
        }

        Ok(container)
    }

    /// Encode with default options.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with(ContainerWriterOptions::default())
    }

    /// Encode the container: header, resources, 32-byte alignment, then
    /// the texture table with its offset backpatched into the header.
    /// Resource indices and texture indices are renumbered to match the
    /// emitted order.
    #[instrument(skip_all, fields(resources = self.resources.len(), textures = self.textures.len()), err)]
    pub fn to_bytes_with(&self, options: ContainerWriterOptions) -> Result<Vec<u8>> {
        let count = |what, value: usize| {
            u16::try_from(value).map_err(|_| Error::ValueOutOfRange {
                tag: "JPAC2-10",
                what,
                value,
            })
        };

        let mut writer = ByteWriter::new();
        writer.write_bytes(MAGIC);
        writer.write_u16(count("resource count", self.resources.len())?);
        writer.write_u16(count("texture count", self.textures.len())?);
        writer.write_u32(0); // texture table offset, patched below

        let mut order: Vec<usize> = (0..self.textures.len()).collect();
        if options.sort_textures_by_hash {
            order.sort_by_key(|&i| {
                let texture = &self.textures[i];
                (texture.name_hash(), texture.name.clone())
            });
        }
        let mut remap = vec![0i16; self.textures.len()];
        for (new, &old) in order.iter().enumerate() {
            remap[old] = new as i16;
        }

        for (slot, resource) in self.resources.iter().enumerate() {
            let ids = resource
                .texture_ids
                .iter()
                .map(|&id| {
                    usize::try_from(id)
                        .ok()
                        .filter(|&index| index < self.textures.len())
                        .map(|index| remap[index])
                        .ok_or(Error::TextureIndexOutOfRange {
                            index: id,
                            len: self.textures.len(),
                        })
                })
                .collect::<Result<Vec<i16>>>()?;
            resource.write(&mut writer, slot as i16, &ids)?;
        }

        writer.align_to(32);
        writer.patch_u32(TEXTURE_TABLE_OFFSET_FIELD, writer.position() as u32)?;
        for &index in &order {
            writer.expect_aligned(32)?;
            self.textures[index].write(&mut writer)?;
        }

        Ok(writer.into_inner())
    }
}

//! The per-particle document and the container index document.

use jsys_jpc::blocks::{BaseShape, ChildShape, DynamicsBlock, ExTexShape, ExtraShape, FieldBlock, KeyBlock};
use jsys_jpc::{Container, Resource};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// `Particles.json`: the particle names in container order and the texture
/// names in pool order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticlesIndex {
    pub particles: Vec<String>,
    pub textures: Vec<String>,
}

/// `Particles/<name>.json`: one particle resource with its texture indices
/// replaced by texture names.
///
/// Block fields are always emitted in full; which fields a block carries is
/// decided by its flag words, so omitting defaults would be ambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleDocument {
    pub dynamics_block: DynamicsBlock,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_blocks: Vec<FieldBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_blocks: Vec<KeyBlock>,
    pub base_shape: BaseShape,
    pub extra_shape: ExtraShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_shape: Option<ChildShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ex_tex_shape: Option<ExTexShape>,
    pub textures: Vec<String>,
}

impl ParticleDocument {
    /// Lift a decoded resource out of its container, resolving texture
    /// indices to names.
    pub fn from_resource(resource: &Resource, container: &Container) -> Result<Self> {
        let textures = resource
            .texture_ids
            .iter()
            .map(|&id| {
                container
                    .texture_by_index(id as usize)
                    .map(|texture| texture.name.clone())
                    .ok_or(Error::Jpc(jsys_jpc::Error::TextureIndexOutOfRange {
                        index: id,
                        len: container.texture_count(),
                    }))
            })
            .collect::<Result<Vec<String>>>()?;

        Ok(Self {
            dynamics_block: resource.dynamics.clone(),
            field_blocks: resource.fields.clone(),
            key_blocks: resource.keys.clone(),
            base_shape: resource.base_shape.clone(),
            extra_shape: resource.extra_shape.clone(),
            child_shape: resource.child_shape.clone(),
            ex_tex_shape: resource.ex_tex_shape.clone(),
            textures,
        })
    }

    /// Lower this document into a resource for `container`, resolving
    /// texture names against the container's pool.
    pub fn to_resource(&self, container: &Container) -> Result<Resource> {
        let texture_ids = self
            .textures
            .iter()
            .map(|name| {
                container
                    .texture_index(name)
                    .map(|index| index as i16)
                    .ok_or_else(|| Error::DanglingReference {
                        what: "texture",
                        name: name.clone(),
                    })
            })
            .collect::<Result<Vec<i16>>>()?;

        Ok(Resource {
            index: -1,
            dynamics: self.dynamics_block.clone(),
            fields: self.field_blocks.clone(),
            keys: self.key_blocks.clone(),
            base_shape: self.base_shape.clone(),
            extra_shape: self.extra_shape.clone(),
            child_shape: self.child_shape.clone(),
            ex_tex_shape: self.ex_tex_shape.clone(),
            texture_ids,
        })
    }
}

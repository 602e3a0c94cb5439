//! The translator between the binary triple and the document cluster.

use indexmap::IndexMap;
use jsys_bcsv::{Column, FieldType, NameTable, Table, Value};
use jsys_jpc::{Container, Texture};
use tracing::instrument;

use crate::document::{ParticleDocument, ParticlesIndex};
use crate::effect::Effect;
use crate::error::{Error, Result};

/// A particle document together with its name from the name table.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedParticle {
    pub name: String,
    pub document: ParticleDocument,
}

/// The encoded binary triple produced by packing.
#[derive(Debug, Clone)]
pub struct BinaryBundle {
    /// `Particles.jpc`
    pub particles_jpc: Vec<u8>,
    /// `ParticleNames.bcsv`
    pub particle_names_bcsv: Vec<u8>,
    /// `AutoEffectList.bcsv`
    pub auto_effect_list_bcsv: Vec<u8>,
}

/// Everything the documents describe, in memory: named particles, the
/// texture pool and the effect rows.
#[derive(Debug, Default)]
pub struct ParticleBundle {
    pub particles: Vec<NamedParticle>,
    pub textures: IndexMap<String, Vec<u8>>,
    pub effects: Vec<Effect>,
}

impl ParticleBundle {
    /// Decode the binary triple. Particles are ordered by the name table,
    /// whose `id` cells index into the container.
    #[instrument(skip_all, err)]
    pub fn from_binary(jpc: &[u8], names: &[u8], effects: &[u8]) -> Result<Self> {
        let container = Container::from_bytes(jpc)?;
        let dictionary = NameTable::new();

        let name_table = jsys_bcsv::from_bytes(names, &dictionary)?;
        let mut particles = Vec::with_capacity(name_table.len());
        for row in 0..name_table.len() {
            let name = name_table
                .get(row, "name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            let index = name_table
                .get(row, "id")
                .and_then(Value::as_int)
                .unwrap_or(-1);

            let resource = usize::try_from(index)
                .ok()
                .and_then(|i| container.resources.get(i))
                .ok_or_else(|| Error::DanglingReference {
                    what: "particle index",
                    name: format!("{name}#{index}"),
                })?;

            particles.push(NamedParticle {
                name,
                document: ParticleDocument::from_resource(resource, &container)?,
            });
        }

        let effect_table = jsys_bcsv::from_bytes(effects, &dictionary)?;
        let effects = (0..effect_table.len())
            .map(|row| Effect::from_row(&effect_table, row))
            .collect::<Result<Vec<Effect>>>()?;

        let textures = container
            .texture_names()
            .map(|name| {
                let texture = container.texture(name).expect("name came from the pool");
                (name.to_owned(), texture.data.clone())
            })
            .collect();

        Ok(Self {
            particles,
            textures,
            effects,
        })
    }

    /// The `Particles.json` document for this bundle.
    pub fn index(&self) -> ParticlesIndex {
        ParticlesIndex {
            particles: self.particles.iter().map(|p| p.name.clone()).collect(),
            textures: self.textures.keys().cloned().collect(),
        }
    }

    /// Encode the binary triple.
    ///
    /// Particles are sorted by name before packing (the game looks its
    /// effects up by binary search over the name table) and the name
    /// table's row index doubles as the container index. Effect rows are
    /// stable-sorted by group name.
    #[instrument(skip_all, err)]
    pub fn to_binary(&self) -> Result<BinaryBundle> {
        self.validate_effects()?;

        let mut container = Container::new();
        for (name, data) in &self.textures {
            container.add_texture(Texture::new(name.clone(), data.clone()))?;
        }

        let mut ordered: Vec<&NamedParticle> = self.particles.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name));
        for pair in ordered.windows(2) {
            if pair[0].name == pair[1].name {
                return Err(Error::DuplicateKey {
                    what: "particle name",
                    name: pair[0].name.clone(),
                });
            }
        }

        let mut name_table = Table::new(vec![
            Column::new("name", FieldType::StringOffset),
            Column::new("id", FieldType::Long),
        ]);
        for (index, particle) in ordered.iter().enumerate() {
            let resource = particle.document.to_resource(&container)?;
            container.resources.push(resource);
            name_table.push_row(vec![
                Value::String(particle.name.clone()),
                Value::Int(index as i32),
            ])?;
        }

        let mut effect_table = Table::new(Effect::schema());
        for (index, effect) in self.effects.iter().enumerate() {
            effect_table.push_row_map(effect.to_row_map(index as i32))?;
        }
        effect_table.sort_by_string_column("GroupName");

        Ok(BinaryBundle {
            particles_jpc: container.to_bytes()?,
            particle_names_bcsv: jsys_bcsv::to_bytes(&name_table)?,
            auto_effect_list_bcsv: jsys_bcsv::to_bytes(&effect_table)?,
        })
    }

    /// Uniqueness and reference checks over the effect rows: a
    /// `(GroupName, UniqueName)` pair may appear once, and a parent name
    /// must resolve to a unique name within the same group.
    fn validate_effects(&self) -> Result<()> {
        let mut seen: IndexMap<(&str, &str), ()> = IndexMap::new();
        for effect in &self.effects {
            let key = (effect.group_name.as_str(), effect.unique_name.as_str());
            if seen.insert(key, ()).is_some() {
                return Err(Error::DuplicateKey {
                    what: "effect unique name",
                    name: format!("{}::{}", effect.group_name, effect.unique_name),
                });
            }
        }

        for effect in &self.effects {
            if effect.parent_name.is_empty() {
                continue;
            }
            let resolves = self.effects.iter().any(|candidate| {
                candidate.group_name == effect.group_name
                    && candidate.unique_name == effect.parent_name
            });
            if !resolves {
                return Err(Error::DanglingReference {
                    what: "parent effect",
                    name: format!("{}::{}", effect.group_name, effect.parent_name),
                });
            }
        }
        Ok(())
    }
}

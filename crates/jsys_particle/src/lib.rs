//! Translation between the particle binaries and their editable documents.
//!
//! A game's particle data is spread over three binary files: the JPC
//! container (`Particles.jpc`), a name table binding particle indices to
//! identifiers (`ParticleNames.bcsv`) and the auto effect list binding
//! object animation events to particles (`AutoEffectList.bcsv`). This crate
//! converts that triple into a cluster of editable documents and back:
//!
//! * `Particles.json`: the particle and texture name lists
//! * `Effects.json`: the effect rows, with default-valued fields omitted
//! * `Particles/<name>.json`: one document per particle resource
//! * `Textures/<name>.bti`: the raw texture images
//!
//! The translator is a pure function over byte buffers and document
//! values; all file I/O belongs to the caller.

pub mod bundle;
pub mod document;
pub mod effect;
pub mod error;

pub use bundle::{BinaryBundle, NamedParticle, ParticleBundle};
pub use document::{ParticleDocument, ParticlesIndex};
pub use effect::{DrawOrder, Effect, TrsFlags};
pub use error::{Error, Result};

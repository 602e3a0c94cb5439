pub mod dump;
pub mod pack;

use std::fs;
use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;

/// Names of the binary files inside a particle directory.
pub const PARTICLES_JPC: &str = "Particles.jpc";
pub const PARTICLE_NAMES_BCSV: &str = "ParticleNames.bcsv";
pub const AUTO_EFFECT_LIST_BCSV: &str = "AutoEffectList.bcsv";

/// Names of the document files inside a dump directory.
pub const PARTICLES_JSON: &str = "Particles.json";
pub const EFFECTS_JSON: &str = "Effects.json";
pub const PARTICLES_DIR: &str = "Particles";
pub const TEXTURES_DIR: &str = "Textures";

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Dump the particle binaries into editable JSON and BTI files
    Dump(dump::DumpArgs),
    /// Pack a dump directory back into the particle binaries
    Pack(pack::PackArgs),
}

impl Commands {
    pub fn handle(&self) -> Result<(), AppError> {
        match self {
            Commands::Dump(dump) => dump.handle(),
            Commands::Pack(pack) => pack.handle(),
        }
    }
}

/// Top-level command error, carrying the process exit code: 2 for file
/// system problems, 3 for codec and document problems.
#[derive(Error, Diagnostic, Debug)]
pub enum AppError {
    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Codec(#[from] jsys_particle::Error),

    #[error("{context}")]
    Document {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Io { .. } => 2,
            AppError::Codec(_) | AppError::Document { .. } => 3,
        }
    }
}

pub fn read_file(path: &Path) -> Result<Vec<u8>, AppError> {
    fs::read(path).map_err(|source| AppError::Io {
        context: format!("reading {}", path.display()),
        source,
    })
}

pub fn write_file(path: &Path, data: &[u8]) -> Result<(), AppError> {
    fs::write(path, data).map_err(|source| AppError::Io {
        context: format!("writing {}", path.display()),
        source,
    })
}

pub fn create_dir(path: &Path) -> Result<(), AppError> {
    fs::create_dir_all(path).map_err(|source| AppError::Io {
        context: format!("creating {}", path.display()),
        source,
    })
}

pub fn parse_json<T: serde::de::DeserializeOwned>(path: &Path, data: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(data).map_err(|source| AppError::Document {
        context: format!("parsing {}", path.display()),
        source,
    })
}

pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, AppError> {
    let mut out = serde_json::to_vec_pretty(value).map_err(|source| AppError::Document {
        context: "serializing document".to_owned(),
        source,
    })?;
    out.push(b'\n');
    Ok(out)
}

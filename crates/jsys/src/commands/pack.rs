use clap::Args;
use jsys_particle::{NamedParticle, ParticleBundle, ParticlesIndex};
use std::path::PathBuf;
use tracing::info;

use crate::commands::{
    create_dir, parse_json, read_file, write_file, AppError, AUTO_EFFECT_LIST_BCSV, EFFECTS_JSON,
    PARTICLES_DIR, PARTICLES_JPC, PARTICLES_JSON, PARTICLE_NAMES_BCSV, TEXTURES_DIR,
};

#[derive(Args)]
pub struct PackArgs {
    /// Directory holding Particles.json, Effects.json, Particles/ and Textures/
    #[arg(value_name = "INPUT_DIR")]
    input: PathBuf,

    /// Directory to write the particle binaries into
    #[arg(value_name = "OUTPUT_DIR")]
    output: PathBuf,
}

impl PackArgs {
    pub fn handle(&self) -> Result<(), AppError> {
        let index_path = self.input.join(PARTICLES_JSON);
        let index: ParticlesIndex = parse_json(&index_path, &read_file(&index_path)?)?;

        let effects_path = self.input.join(EFFECTS_JSON);
        let effects = parse_json(&effects_path, &read_file(&effects_path)?)?;

        let mut bundle = ParticleBundle {
            effects,
            ..ParticleBundle::default()
        };

        for name in &index.particles {
            let path = self.input.join(PARTICLES_DIR).join(format!("{name}.json"));
            info!("loading {}", path.display());
            bundle.particles.push(NamedParticle {
                name: name.clone(),
                document: parse_json(&path, &read_file(&path)?)?,
            });
        }

        for name in &index.textures {
            let path = self.input.join(TEXTURES_DIR).join(format!("{name}.bti"));
            info!("loading {}", path.display());
            bundle.textures.insert(name.clone(), read_file(&path)?);
        }

        let binary = bundle.to_binary()?;

        create_dir(&self.output)?;
        for (file, data) in [
            (PARTICLES_JPC, &binary.particles_jpc),
            (PARTICLE_NAMES_BCSV, &binary.particle_names_bcsv),
            (AUTO_EFFECT_LIST_BCSV, &binary.auto_effect_list_bcsv),
        ] {
            let path = self.output.join(file);
            info!("writing {}", path.display());
            write_file(&path, data)?;
        }

        Ok(())
    }
}

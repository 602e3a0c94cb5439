use clap::Args;
use jsys_particle::ParticleBundle;
use std::path::PathBuf;
use tracing::info;

use crate::commands::{
    create_dir, read_file, to_json, write_file, AppError, AUTO_EFFECT_LIST_BCSV, EFFECTS_JSON,
    PARTICLES_DIR, PARTICLES_JPC, PARTICLES_JSON, PARTICLE_NAMES_BCSV, TEXTURES_DIR,
};

#[derive(Args)]
pub struct DumpArgs {
    /// Directory holding Particles.jpc, ParticleNames.bcsv and AutoEffectList.bcsv
    #[arg(value_name = "INPUT_DIR")]
    input: PathBuf,

    /// Directory to write Particles.json, Effects.json, Particles/ and Textures/ into
    #[arg(value_name = "OUTPUT_DIR")]
    output: PathBuf,
}

impl DumpArgs {
    pub fn handle(&self) -> Result<(), AppError> {
        let jpc = read_file(&self.input.join(PARTICLES_JPC))?;
        let names = read_file(&self.input.join(PARTICLE_NAMES_BCSV))?;
        let effects = read_file(&self.input.join(AUTO_EFFECT_LIST_BCSV))?;

        let bundle = ParticleBundle::from_binary(&jpc, &names, &effects)?;

        let particles_dir = self.output.join(PARTICLES_DIR);
        let textures_dir = self.output.join(TEXTURES_DIR);
        create_dir(&particles_dir)?;
        create_dir(&textures_dir)?;

        let index_path = self.output.join(PARTICLES_JSON);
        info!("writing {}", index_path.display());
        write_file(&index_path, &to_json(&bundle.index())?)?;

        let effects_path = self.output.join(EFFECTS_JSON);
        info!("writing {}", effects_path.display());
        write_file(&effects_path, &to_json(&bundle.effects)?)?;

        for particle in &bundle.particles {
            let path = particles_dir.join(format!("{}.json", particle.name));
            info!("writing {}", path.display());
            write_file(&path, &to_json(&particle.document)?)?;
        }

        for (name, data) in &bundle.textures {
            let path = textures_dir.join(format!("{name}.bti"));
            info!("writing {}", path.display());
            write_file(&path, data)?;
        }

        Ok(())
    }
}

//! The JGadget column-name hash and the known-name dictionary.

use std::collections::HashMap;

/// Column names observed in the particle data tables. Seeding the
/// [`NameTable`] with these lets every hash in `ParticleNames.bcsv` and
/// `AutoEffectList.bcsv` resolve to its original name.
pub const KNOWN_NAMES: &[&str] = &[
    "name",
    "id",
    "No",
    "GroupName",
    "AnimName",
    "ContinueAnimEnd",
    "UniqueName",
    "EffectName",
    "ParentName",
    "JointName",
    "OffsetX",
    "OffsetY",
    "OffsetZ",
    "StartFrame",
    "EndFrame",
    "Affect",
    "Follow",
    "ScaleValue",
    "RateValue",
    "PrmColor",
    "EnvColor",
    "LightAffectValue",
    "DrawOrder",
];

/// Calculate the 32-bit JGadget hash of a column name.
///
/// The rolling hash is `h = h * 31 + byte` over the Shift-JIS encoding of
/// the name, truncated to 32 bits. Names in practice are plain ASCII, where
/// the Shift-JIS encoding is the identity.
pub fn calc_hash(name: &str) -> u32 {
    let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode(name);
    encoded
        .iter()
        .fold(0u32, |h, &b| h.wrapping_mul(31).wrapping_add(b as u32))
}

/// Reverse dictionary from column-name hashes to names.
///
/// Hashes without a known name render as `_0x` followed by eight hex digits;
/// [`NameTable::hash_for_label`] parses that form back, so unknown columns
/// survive a decode/encode cycle untouched.
#[derive(Debug, Clone)]
pub struct NameTable {
    names: HashMap<u32, String>,
}

impl Default for NameTable {
    fn default() -> Self {
        let mut table = Self {
            names: HashMap::new(),
        };
        for name in KNOWN_NAMES {
            table.insert(name);
        }
        table
    }
}

impl NameTable {
    /// A dictionary seeded with [`KNOWN_NAMES`].
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty dictionary; every hash will render in hex form.
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Register a name so its hash resolves in future lookups.
    pub fn insert(&mut self, name: &str) {
        self.names.insert(calc_hash(name), name.to_owned());
    }

    /// Resolve a hash to a column label, falling back to the hex form.
    pub fn resolve(&self, hash: u32) -> String {
        match self.names.get(&hash) {
            Some(name) => name.clone(),
            None => format!("_0x{hash:08x}"),
        }
    }

    /// Hash for a column label, understanding the `_0x????????` fallback
    /// form produced by [`NameTable::resolve`].
    pub fn hash_for_label(label: &str) -> u32 {
        label
            .strip_prefix("_0x")
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .unwrap_or_else(|| calc_hash(label))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::hash::{calc_hash, NameTable};

    #[test]
    fn group_name_hash() {
        assert_eq!(calc_hash("GroupName"), 0x1F0AAD8A);
    }

    #[test]
    fn short_names() {
        assert_eq!(calc_hash("name"), 0x00337A8B);
        assert_eq!(calc_hash("id"), 0x00000D1B);
        assert_eq!(calc_hash(""), 0);
    }

    #[test]
    fn resolve_known_and_unknown() {
        let table = NameTable::new();
        assert_eq!(table.resolve(calc_hash("DrawOrder")), "DrawOrder");
        assert_eq!(table.resolve(0x1234_5678), "_0x12345678");
    }

    #[test]
    fn hex_label_roundtrip() {
        assert_eq!(NameTable::hash_for_label("_0x12345678"), 0x1234_5678);
        assert_eq!(
            NameTable::hash_for_label("GroupName"),
            calc_hash("GroupName")
        );
    }
}

use crate::morgan::morgan_fingerprint;
use crate::smiles::Molecule;
use molsim_core::{EncodeError, Fingerprint, SearchConfig, StructureEncoder};

/// SMILES to Morgan fingerprint encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorganEncoder {
    radius: u32,
    n_bits: usize,
}

impl MorganEncoder {
    pub fn new(radius: u32, n_bits: usize) -> Self {
        Self { radius, n_bits }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.fingerprint_radius, config.fingerprint_bits)
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }
}

impl Default for MorganEncoder {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl StructureEncoder for MorganEncoder {
    fn encode(&self, structure: &str) -> Result<Fingerprint, EncodeError> {
        let trimmed = structure.trim();
        if trimmed.is_empty() {
            return Err(EncodeError::Empty);
        }
        let molecule = Molecule::parse(trimmed)?;
        Ok(morgan_fingerprint(&molecule, self.radius, self.n_bits))
    }

    fn n_bits(&self) -> usize {
        self.n_bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_config() {
        let encoder = MorganEncoder::default();
        assert_eq!(encoder.radius(), 2);
        assert_eq!(encoder.n_bits(), 2048);
    }

    #[test]
    fn test_encode_valid() {
        let fp = MorganEncoder::new(2, 1024).encode("CC(=O)Oc1ccccc1C(=O)O").unwrap();
        assert_eq!(fp.n_bits(), 1024);
        assert!(fp.count_ones() > 0);
    }

    #[test]
    fn test_encode_invalid_is_error_not_panic() {
        let encoder = MorganEncoder::default();
        assert_eq!(encoder.encode("   "), Err(EncodeError::Empty));
        assert!(matches!(encoder.encode("C1CC"), Err(EncodeError::InvalidStructure(_))));
        assert!(matches!(encoder.encode("foo"), Err(EncodeError::InvalidStructure(_))));
    }
}

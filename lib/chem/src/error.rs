use molsim_core::EncodeError;
use thiserror::Error;

/// Reasons a SMILES string is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmilesError {
    #[error("empty SMILES string")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unknown element '{symbol}' at position {pos}")]
    UnknownElement { symbol: String, pos: usize },

    #[error("number at position {0} is out of range")]
    NumberOutOfRange(usize),

    #[error("unterminated bracket atom starting at position {0}")]
    UnterminatedBracket(usize),

    #[error("unbalanced parenthesis at position {0}")]
    UnbalancedBranch(usize),

    #[error("bond symbol without a following atom at position {0}")]
    DanglingBond(usize),

    #[error("ring closure {0} was never closed")]
    UnclosedRing(u16),

    #[error("ring closure {label} at position {pos} bonds an atom to itself")]
    RingSelfLoop { label: u16, pos: usize },

    #[error("ring closure {label} at position {pos} duplicates an existing bond")]
    DuplicateBond { label: u16, pos: usize },

    #[error("conflicting bond symbols on ring closure {0}")]
    RingBondConflict(u16),

    #[error("atom {index} ({symbol}) has bond order {bond_order}, above its maximum valence")]
    OverValent { index: usize, symbol: &'static str, bond_order: u32 },

    #[error("atom {0} is marked aromatic but is not in a ring")]
    NonRingAromatic(usize),
}

impl From<SmilesError> for EncodeError {
    fn from(e: SmilesError) -> Self {
        match e {
            SmilesError::Empty => EncodeError::Empty,
            other => EncodeError::InvalidStructure(other.to_string()),
        }
    }
}

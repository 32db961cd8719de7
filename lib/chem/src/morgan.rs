//! Morgan (ECFP-style) circular fingerprints
//!
//! Each heavy atom starts with an invariant built from its local properties.
//! Every iteration rehashes an atom's invariant together with the sorted
//! (bond code, neighbour invariant) pairs around it, growing the covered
//! environment by one bond shell. An environment that covers exactly the
//! same bonds as one already emitted is dropped and its atom stops growing.
//! Surviving identifiers are folded into `n_bits` by modulo.
//!
//! All hashing goes through a fixed `hash_combine`, so the bits depend only
//! on the molecular graph, never on atom order in the SMILES or on the
//! platform.

use crate::smiles::Molecule;
use ahash::AHashSet;
use molsim_core::Fingerprint;
use smallvec::SmallVec;

/// Boost-style hash mixing step
#[inline]
fn hash_combine(seed: &mut u32, value: u32) {
    *seed ^= value
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(*seed << 6)
        .wrapping_add(*seed >> 2);
}

/// Set of bond indices covered by an atom environment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct BondSet(Vec<u64>);

impl BondSet {
    fn new(bond_count: usize) -> Self {
        Self(vec![0; bond_count.div_ceil(64)])
    }

    fn insert(&mut self, bond: usize) {
        self.0[bond / 64] |= 1u64 << (bond % 64);
    }

    fn union_with(&mut self, other: &BondSet) {
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            *a |= b;
        }
    }
}

/// Layer-0 invariant of a heavy atom
fn atom_invariant(mol: &Molecule, atom: usize) -> u32 {
    let a = &mol.atoms()[atom];
    let mut seed = 0u32;
    hash_combine(&mut seed, a.atomic_number as u32);
    hash_combine(&mut seed, mol.heavy_degree(atom) as u32);
    hash_combine(&mut seed, mol.total_hydrogens(atom));
    hash_combine(&mut seed, a.charge as i32 as u32);
    hash_combine(&mut seed, a.isotope as u32);
    hash_combine(&mut seed, mol.is_in_ring(atom) as u32);
    seed
}

/// Environment identifiers for every radius up to `radius`, in emission order
pub fn morgan_identifiers(mol: &Molecule, radius: u32) -> Vec<u32> {
    let n = mol.atom_count();
    let heavy: Vec<usize> = (0..n).filter(|&i| !mol.atoms()[i].is_hydrogen()).collect();

    let mut invariants = vec![0u32; n];
    for &a in &heavy {
        invariants[a] = atom_invariant(mol, a);
    }
    let mut identifiers: Vec<u32> = heavy.iter().map(|&a| invariants[a]).collect();

    let mut neighborhoods: Vec<BondSet> = vec![BondSet::new(mol.bond_count()); n];
    let mut seen: AHashSet<BondSet> = AHashSet::new();
    let mut dead = vec![false; n];

    for layer in 0..radius {
        if heavy.iter().all(|&a| dead[a]) {
            break;
        }
        let mut round: Vec<(BondSet, u32, usize)> = Vec::with_capacity(heavy.len());
        let mut next_invariants = invariants.clone();

        for &a in &heavy {
            if dead[a] {
                continue;
            }
            let mut env = neighborhoods[a].clone();
            let mut shell: SmallVec<[(u32, u32); 6]> = SmallVec::new();
            for &(nbr, bond) in mol.neighbors(a) {
                if mol.atoms()[nbr].is_hydrogen() {
                    continue;
                }
                shell.push((mol.bonds()[bond].order.code(), invariants[nbr]));
                env.insert(bond);
                env.union_with(&neighborhoods[nbr]);
            }
            if shell.is_empty() {
                dead[a] = true;
                continue;
            }
            shell.sort_unstable();

            let mut seed = layer;
            hash_combine(&mut seed, invariants[a]);
            for (code, inv) in shell {
                hash_combine(&mut seed, code);
                hash_combine(&mut seed, inv);
            }
            next_invariants[a] = seed;
            round.push((env, seed, a));
        }

        // Among identical environments the smallest identifier wins
        round.sort_unstable();
        for (env, id, a) in round {
            if seen.contains(&env) {
                dead[a] = true;
            } else {
                seen.insert(env.clone());
                identifiers.push(id);
            }
            neighborhoods[a] = env;
        }
        invariants = next_invariants;
    }

    identifiers
}

/// Fold Morgan identifiers into a fixed-length bit vector
pub fn morgan_fingerprint(mol: &Molecule, radius: u32, n_bits: usize) -> Fingerprint {
    let mut fp = Fingerprint::new(n_bits);
    if n_bits == 0 {
        return fp;
    }
    for id in morgan_identifiers(mol, radius) {
        fp.set(id as usize % n_bits);
    }
    fp
}

#[cfg(test)]
mod tests {
    use super::*;
    use molsim_core::Metric;

    fn fp(smiles: &str) -> Fingerprint {
        morgan_fingerprint(&Molecule::parse(smiles).unwrap(), 2, 2048)
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(fp("CC(=O)Oc1ccccc1C(=O)O"), fp("CC(=O)Oc1ccccc1C(=O)O"));
    }

    #[test]
    fn test_atom_order_independent() {
        assert_eq!(fp("CCO"), fp("OCC"));
        assert_eq!(fp("Oc1ccccc1"), fp("c1ccccc1O"));
        assert_eq!(fp("c1ccccc1C(=O)O"), fp("OC(=O)c1ccccc1"));
    }

    #[test]
    fn test_equivalent_spellings() {
        // Biphenyl with and without the inter-ring bond written
        assert_eq!(fp("c1ccccc1c1ccccc1"), fp("c1ccccc1-c1ccccc1"));
        // Kekulé and aromatic forms
        assert_eq!(fp("OC(=O)C1=CC=CC=C1"), fp("OC(=O)c1ccccc1"));
        assert_eq!(fp("CN1C=CC=C1"), fp("Cn1cccc1"));
        assert_eq!(fp("C1=CC=C2C=CC=CC2=C1"), fp("c1ccc2ccccc2c1"));
        assert_eq!(fp("CC(=O)OC1=CC=CC=C1C(=O)O"), fp("CC(=O)Oc1ccccc1C(=O)O"));
    }

    #[test]
    fn test_large_radius_terminates() {
        let mol = Molecule::parse("CC(=O)Oc1ccccc1C(=O)O").unwrap();
        assert_eq!(morgan_fingerprint(&mol, u32::MAX, 2048), morgan_fingerprint(&mol, 40, 2048));
    }

    #[test]
    fn test_symmetric_molecule_collapses() {
        // One environment per radius for a fully symmetric ring
        let ids = morgan_identifiers(&Molecule::parse("c1ccccc1").unwrap(), 2);
        let unique: AHashSet<u32> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 3);
        assert!(fp("c1ccccc1").count_ones() <= 3);
    }

    #[test]
    fn test_radius_zero_is_subset() {
        let mol = Molecule::parse("CC(C)Cc1ccc(cc1)C(C)C(=O)O").unwrap();
        let r0 = morgan_fingerprint(&mol, 0, 2048);
        let r2 = morgan_fingerprint(&mol, 2, 2048);
        assert!(r0.count_ones() > 0);
        assert!(r0.ones().all(|bit| r2.get(bit)));
        assert!(r2.count_ones() > r0.count_ones());
    }

    #[test]
    fn test_related_molecules_score_between() {
        let phenol = fp("Oc1ccccc1");
        let cresol = fp("Cc1ccc(O)cc1");
        let hexane = fp("CCCCCC");
        let near = Metric::Tanimoto.similarity(&phenol, &cresol);
        let far = Metric::Tanimoto.similarity(&phenol, &hexane);
        assert!(near > far, "near {} far {}", near, far);
        assert!(near < 1.0);
    }

    #[test]
    fn test_explicit_hydrogens_match_implicit() {
        assert_eq!(fp("[H]OC([H])([H])[H]"), fp("OC"));
    }

    #[test]
    fn test_single_atom() {
        let methane = fp("C");
        assert_eq!(methane.count_ones(), 1);
    }

    #[test]
    fn test_fold_width() {
        let mol = Molecule::parse("CCN(CC)CC").unwrap();
        let small = morgan_fingerprint(&mol, 2, 64);
        assert_eq!(small.n_bits(), 64);
        assert!(small.ones().all(|b| b < 64));
    }
}

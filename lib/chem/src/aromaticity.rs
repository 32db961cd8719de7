//! Aromaticity perception for Kekulé rings
//!
//! The ring set is the shortest cycle through each ring bond. A ring of
//! unmarked atoms holding 4n+2 π electrons becomes aromatic: its atoms are
//! flagged and its bonds set to [`BondOrder::Aromatic`]. Two rings fused on a
//! single bond are also tested as one system when either fails alone. Rings
//! already written with aromatic atoms are left as written.
//!
//! Runs after hydrogen assignment, so hydrogen counts always come from the
//! Kekulé valences.

use crate::smiles::{BondOrder, Molecule};
use ahash::AHashSet;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
struct Ring {
    atoms: Vec<usize>,
    bonds: Vec<usize>,
}

impl Ring {
    fn shares_one_bond(&self, other: &Ring) -> bool {
        self.bonds.iter().filter(|b| other.bonds.contains(b)).count() == 1
    }
}

/// Shortest path from `start` to `goal` over ring bonds, closed by `skip`
fn shortest_cycle(mol: &Molecule, start: usize, goal: usize, skip: usize) -> Option<Ring> {
    let mut parent: Vec<Option<(usize, usize)>> = vec![None; mol.atom_count()];
    let mut visited = vec![false; mol.atom_count()];
    visited[start] = true;
    let mut queue = VecDeque::from([start]);

    while let Some(v) = queue.pop_front() {
        if v == goal {
            let mut atoms = vec![goal];
            let mut bonds = vec![skip];
            let mut cur = goal;
            while let Some((prev, bond)) = parent[cur] {
                atoms.push(prev);
                bonds.push(bond);
                cur = prev;
            }
            return Some(Ring { atoms, bonds });
        }
        for &(w, bond) in mol.neighbors(v) {
            if bond == skip || visited[w] || !mol.is_ring_bond(bond) {
                continue;
            }
            visited[w] = true;
            parent[w] = Some((v, bond));
            queue.push_back(w);
        }
    }
    None
}

fn smallest_rings(mol: &Molecule) -> Vec<Ring> {
    let mut seen: AHashSet<Vec<usize>> = AHashSet::new();
    let mut rings = Vec::new();
    for (idx, bond) in mol.bonds().iter().enumerate() {
        if !mol.is_ring_bond(idx) {
            continue;
        }
        if let Some(ring) = shortest_cycle(mol, bond.begin, bond.end, idx) {
            let mut key = ring.bonds.clone();
            key.sort_unstable();
            if seen.insert(key) {
                rings.push(ring);
            }
        }
    }
    rings
}

/// Electrons donated by a neutral or charged lone pair, or an empty p orbital
fn lone_pair_electrons(atomic_number: u8, charge: i8) -> Option<u32> {
    match (atomic_number, charge) {
        (6, -1) => Some(2),
        (6, 1) | (5, 0) => Some(0),
        (7 | 15 | 8 | 16 | 34, 0) => Some(2),
        _ => None,
    }
}

/// π electrons an atom contributes to a ring, `None` when it cannot take part
fn pi_electrons(mol: &Molecule, atom: usize) -> Option<u32> {
    let a = &mol.atoms()[atom];
    if a.aromatic {
        return None;
    }
    let mut ring_double = 0;
    let mut exocyclic_hetero = false;
    for &(nbr, bond) in mol.neighbors(atom) {
        match mol.bonds()[bond].order {
            BondOrder::Single => {}
            BondOrder::Double if mol.is_ring_bond(bond) => ring_double += 1,
            BondOrder::Double if matches!(mol.atoms()[nbr].atomic_number, 7 | 8 | 16) => {
                exocyclic_hetero = true
            }
            _ => return None,
        }
    }
    match (ring_double, exocyclic_hetero) {
        (1, false) => Some(1),
        (0, true) => Some(0),
        (0, false) => lone_pair_electrons(a.atomic_number, a.charge),
        _ => None,
    }
}

fn is_huckel<I: IntoIterator<Item = usize>>(mol: &Molecule, atoms: I) -> bool {
    let mut total = 0;
    for atom in atoms {
        match pi_electrons(mol, atom) {
            Some(e) => total += e,
            None => return false,
        }
    }
    total % 4 == 2
}

/// Mark Kekulé rings that satisfy the 4n+2 rule as aromatic
pub(crate) fn perceive(mol: &mut Molecule) {
    let rings = smallest_rings(mol);
    let mut aromatic: Vec<bool> = rings
        .iter()
        .map(|r| is_huckel(mol, r.atoms.iter().copied()))
        .collect();

    let mut fused = Vec::new();
    for i in 0..rings.len() {
        for j in i + 1..rings.len() {
            if (aromatic[i] && aromatic[j]) || !rings[i].shares_one_bond(&rings[j]) {
                continue;
            }
            let mut atoms: Vec<usize> = rings[i].atoms.iter().chain(&rings[j].atoms).copied().collect();
            atoms.sort_unstable();
            atoms.dedup();
            if is_huckel(mol, atoms) {
                fused.push((i, j));
            }
        }
    }
    for (i, j) in fused {
        aromatic[i] = true;
        aromatic[j] = true;
    }

    for (ring, &is_aromatic) in rings.iter().zip(&aromatic) {
        if !is_aromatic {
            continue;
        }
        for &atom in &ring.atoms {
            mol.set_aromatic(atom);
        }
        for &bond in &ring.bonds {
            mol.set_bond_order(bond, BondOrder::Aromatic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aromatic_atoms(smiles: &str) -> Vec<bool> {
        let mol = Molecule::parse(smiles).unwrap();
        mol.atoms().iter().map(|a| a.aromatic).collect()
    }

    fn same_graph(a: &str, b: &str) {
        let (ma, mb) = (Molecule::parse(a).unwrap(), Molecule::parse(b).unwrap());
        let summary = |m: &Molecule| {
            let atoms: Vec<_> = (0..m.atom_count())
                .map(|i| (m.atoms()[i].aromatic, m.total_hydrogens(i)))
                .collect();
            let bonds: Vec<_> = m.bonds().iter().map(|b| (b.begin, b.end, b.order)).collect();
            (atoms, bonds)
        };
        assert_eq!(summary(&ma), summary(&mb), "{} vs {}", a, b);
    }

    #[test]
    fn test_kekule_benzene() {
        same_graph("C1=CC=CC=C1", "c1ccccc1");
    }

    #[test]
    fn test_heteroaromatic_rings() {
        same_graph("C1=CC=NC=C1", "c1ccncc1");
        same_graph("C1=CNC=C1", "c1c[nH]cc1");
        same_graph("C1=COC=C1", "c1cocc1");
        same_graph("C1=CSC=C1", "c1cscc1");
    }

    #[test]
    fn test_fused_rings() {
        same_graph("C1=CC=C2C=CC=CC2=C1", "c1ccc2ccccc2c1");
        let indole = Molecule::parse("C1=CC=C2C(=C1)C=CN2").unwrap();
        assert!(indole.atoms().iter().all(|a| a.aromatic));
        assert!(indole.bonds().iter().all(|b| b.order == BondOrder::Aromatic));
    }

    #[test]
    fn test_exocyclic_carbonyl() {
        // 2-pyridone keeps its C=O but the ring is aromatic
        let mol = Molecule::parse("O=C1C=CC=CN1").unwrap();
        assert_eq!(mol.bonds()[0].order, BondOrder::Double);
        assert!((1..7).all(|i| mol.atoms()[i].aromatic));
        assert_eq!(mol.total_hydrogens(6), 1);
    }

    #[test]
    fn test_non_aromatic_rings() {
        assert!(aromatic_atoms("C1=CC=CC1").iter().all(|&a| !a));
        assert!(aromatic_atoms("C1=CCCC=C1").iter().all(|&a| !a));
        assert!(aromatic_atoms("C1=CC=CC=CC=C1").iter().all(|&a| !a));
        assert!(aromatic_atoms("O=C1C=CC(=O)C=C1").iter().all(|&a| !a));
        assert!(aromatic_atoms("C1CCCCC1").iter().all(|&a| !a));
    }

    #[test]
    fn test_substituted_ring_only_ring_atoms_marked() {
        let mol = Molecule::parse("OC(=O)C1=CC=CC=C1").unwrap();
        assert_eq!(aromatic_atoms("OC(=O)C1=CC=CC=C1"), vec![false, false, false, true, true, true, true, true, true]);
        assert_eq!(mol.bonds()[1].order, BondOrder::Double);
        assert_eq!(mol.bonds()[2].order, BondOrder::Single);
    }
}

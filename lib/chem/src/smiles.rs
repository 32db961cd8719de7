//! SMILES parsing into a molecular graph
//!
//! Supports the organic subset, bracket atoms (isotope, chirality, hydrogen
//! count, charge, atom class), all bond symbols, branches, ring closures
//! (`1`-`9` and `%nn`) and `.` disconnections. Stereo markers are accepted
//! and discarded; `/` and `\` read as single bonds.
//!
//! After the graph is built, ring bonds are found (every bond that is not a
//! bridge). An unwritten bond between two aromatic atoms is aromatic only
//! inside a ring; between rings it is single. Aromatic atoms outside rings
//! are rejected, implicit hydrogens are assigned to organic-subset atoms
//! from the default valence table. Kekulé rings are then perceived as
//! aromatic so both spellings of a ring give the same graph.

use crate::aromaticity;
use crate::element;
use crate::error::SmilesError;
use ahash::AHashMap;
use smallvec::SmallVec;

type Result<T> = std::result::Result<T, SmilesError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
}

impl BondOrder {
    /// Contribution to an atom's valence; aromatic bonds count as single
    #[inline]
    pub fn valence(self) -> u32 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Quadruple => 4,
        }
    }

    /// Stable numeric code used when hashing atom environments
    #[inline]
    pub fn code(self) -> u32 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Quadruple => 4,
            BondOrder::Aromatic => 12,
        }
    }

    fn from_symbol(c: u8) -> Option<Self> {
        match c {
            b'-' | b'/' | b'\\' => Some(BondOrder::Single),
            b'=' => Some(BondOrder::Double),
            b'#' => Some(BondOrder::Triple),
            b'$' => Some(BondOrder::Quadruple),
            b':' => Some(BondOrder::Aromatic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub atomic_number: u8,
    pub aromatic: bool,
    /// Mass number, 0 when unspecified
    pub isotope: u16,
    pub charge: i8,
    /// Implicit hydrogens for organic-subset atoms, the written count for bracket atoms
    pub hydrogens: u8,
    pub bracket: bool,
}

impl Atom {
    #[inline]
    pub fn symbol(&self) -> &'static str {
        element::symbol(self.atomic_number)
    }

    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        self.atomic_number == 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub begin: usize,
    pub end: usize,
    pub order: BondOrder,
}

/// Neighbour atom index and connecting bond index
pub type Neighbor = (usize, usize);

/// A parsed molecule: atoms, bonds and adjacency with ring membership
#[derive(Debug, Clone)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    adjacency: Vec<SmallVec<[Neighbor; 4]>>,
    ring_bonds: Vec<bool>,
}

impl Molecule {
    pub fn parse(smiles: &str) -> Result<Self> {
        Parser::new(smiles).parse()
    }

    #[inline]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    #[inline]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    #[inline]
    pub fn neighbors(&self, atom: usize) -> &[Neighbor] {
        &self.adjacency[atom]
    }

    #[inline]
    pub fn is_ring_bond(&self, bond: usize) -> bool {
        self.ring_bonds[bond]
    }

    pub fn is_in_ring(&self, atom: usize) -> bool {
        self.adjacency[atom].iter().any(|&(_, b)| self.ring_bonds[b])
    }

    /// Number of non-hydrogen neighbours
    pub fn heavy_degree(&self, atom: usize) -> usize {
        self.adjacency[atom]
            .iter()
            .filter(|&&(n, _)| !self.atoms[n].is_hydrogen())
            .count()
    }

    /// Implicit or bracket hydrogens plus explicit hydrogen neighbours
    pub fn total_hydrogens(&self, atom: usize) -> u32 {
        let explicit = self.adjacency[atom]
            .iter()
            .filter(|&&(n, _)| self.atoms[n].is_hydrogen())
            .count() as u32;
        self.atoms[atom].hydrogens as u32 + explicit
    }

    pub fn bond_between(&self, a: usize, b: usize) -> Option<usize> {
        self.adjacency[a]
            .iter()
            .find(|&&(n, _)| n == b)
            .map(|&(_, bond)| bond)
    }

    pub(crate) fn set_aromatic(&mut self, atom: usize) {
        self.atoms[atom].aromatic = true;
    }

    pub(crate) fn set_bond_order(&mut self, bond: usize, order: BondOrder) {
        self.bonds[bond].order = order;
    }
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// Per bond: no bond symbol was written
    implicit: Vec<bool>,
    adjacency: Vec<SmallVec<[Neighbor; 4]>>,
    prev: Option<usize>,
    /// Bond symbol waiting for its second atom, with its position
    pending: Option<(BondOrder, usize)>,
    /// Branch origin atom, atom count when the branch opened, and its position
    branches: Vec<(usize, usize, usize)>,
    rings: AHashMap<u16, (usize, Option<BondOrder>)>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            atoms: Vec::new(),
            bonds: Vec::new(),
            implicit: Vec::new(),
            adjacency: Vec::new(),
            prev: None,
            pending: None,
            branches: Vec::new(),
            rings: AHashMap::new(),
        }
    }

    fn parse(mut self) -> Result<Molecule> {
        if self.bytes.is_empty() {
            return Err(SmilesError::Empty);
        }

        while self.pos < self.bytes.len() {
            let c = self.bytes[self.pos];
            match c {
                b'(' => {
                    let origin = self.prev.ok_or(SmilesError::UnbalancedBranch(self.pos))?;
                    self.reject_pending()?;
                    self.branches.push((origin, self.atoms.len(), self.pos));
                    self.pos += 1;
                }
                b')' => {
                    self.reject_pending()?;
                    let (origin, atoms_at_open, _) = self
                        .branches
                        .pop()
                        .ok_or(SmilesError::UnbalancedBranch(self.pos))?;
                    if self.atoms.len() == atoms_at_open {
                        return Err(SmilesError::UnbalancedBranch(self.pos));
                    }
                    self.prev = Some(origin);
                    self.pos += 1;
                }
                b'.' => {
                    self.reject_pending()?;
                    if self.prev.is_none() {
                        return Err(self.unexpected());
                    }
                    self.prev = None;
                    self.pos += 1;
                }
                b'0'..=b'9' => {
                    let label = (c - b'0') as u16;
                    self.ring_closure(label)?;
                    self.pos += 1;
                }
                b'%' => {
                    let digits = self.bytes.get(self.pos + 1..self.pos + 3);
                    let label = match digits {
                        Some([a, b]) if a.is_ascii_digit() && b.is_ascii_digit() => {
                            ((a - b'0') * 10 + (b - b'0')) as u16
                        }
                        _ => return Err(self.unexpected()),
                    };
                    self.ring_closure(label)?;
                    self.pos += 3;
                }
                b'[' => {
                    let atom = self.bracket_atom()?;
                    self.add_atom(atom)?;
                }
                _ => {
                    if let Some(order) = BondOrder::from_symbol(c) {
                        if self.prev.is_none() || self.pending.is_some() {
                            return Err(SmilesError::DanglingBond(self.pos));
                        }
                        self.pending = Some((order, self.pos));
                        self.pos += 1;
                    } else {
                        let atom = self.organic_atom()?;
                        self.add_atom(atom)?;
                    }
                }
            }
        }

        self.reject_pending()?;
        if let Some(&(_, _, pos)) = self.branches.last() {
            return Err(SmilesError::UnbalancedBranch(pos));
        }
        if let Some(&label) = self.rings.keys().min() {
            return Err(SmilesError::UnclosedRing(label));
        }

        let ring_bonds = find_ring_bonds(&self.adjacency, self.bonds.len());
        for (idx, bond) in self.bonds.iter_mut().enumerate() {
            if bond.order == BondOrder::Aromatic && self.implicit[idx] && !ring_bonds[idx] {
                bond.order = BondOrder::Single;
            }
        }
        let mut molecule = Molecule {
            atoms: self.atoms,
            bonds: self.bonds,
            adjacency: self.adjacency,
            ring_bonds,
        };
        assign_hydrogens(&mut molecule)?;
        aromaticity::perceive(&mut molecule);
        Ok(molecule)
    }

    fn unexpected(&self) -> SmilesError {
        let ch = self.src[self.pos..].chars().next().unwrap_or('\0');
        SmilesError::UnexpectedChar { ch, pos: self.pos }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn reject_pending(&self) -> Result<()> {
        match self.pending {
            Some((_, pos)) => Err(SmilesError::DanglingBond(pos)),
            None => Ok(()),
        }
    }

    fn default_order(&self, a: usize, b: usize) -> BondOrder {
        if self.atoms[a].aromatic && self.atoms[b].aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    /// Add a bond; `None` takes the default order for the two atoms
    fn add_bond(&mut self, begin: usize, end: usize, written: Option<BondOrder>) {
        let idx = self.bonds.len();
        let order = written.unwrap_or_else(|| self.default_order(begin, end));
        self.bonds.push(Bond { begin, end, order });
        self.implicit.push(written.is_none());
        self.adjacency[begin].push((end, idx));
        self.adjacency[end].push((begin, idx));
    }

    fn add_atom(&mut self, atom: Atom) -> Result<()> {
        let idx = self.atoms.len();
        self.atoms.push(atom);
        self.adjacency.push(SmallVec::new());
        match (self.prev, self.pending.take()) {
            (Some(prev), pending) => self.add_bond(prev, idx, pending.map(|(o, _)| o)),
            (None, Some((_, pos))) => return Err(SmilesError::DanglingBond(pos)),
            (None, None) => {}
        }
        self.prev = Some(idx);
        Ok(())
    }

    fn ring_closure(&mut self, label: u16) -> Result<()> {
        let pos = self.pos;
        let current = self.prev.ok_or_else(|| self.unexpected())?;
        let written = self.pending.take().map(|(o, _)| o);

        match self.rings.remove(&label) {
            Some((open, opened_with)) => {
                if open == current {
                    return Err(SmilesError::RingSelfLoop { label, pos });
                }
                let order = match (opened_with, written) {
                    (Some(a), Some(b)) if a != b => return Err(SmilesError::RingBondConflict(label)),
                    (Some(o), _) | (None, Some(o)) => Some(o),
                    (None, None) => None,
                };
                if self.adjacency[open].iter().any(|&(n, _)| n == current) {
                    return Err(SmilesError::DuplicateBond { label, pos });
                }
                self.add_bond(open, current, order);
            }
            None => {
                self.rings.insert(label, (current, written));
            }
        }
        Ok(())
    }

    fn organic_atom(&mut self) -> Result<Atom> {
        let c = self.bytes[self.pos];
        let next = self.bytes.get(self.pos + 1).copied();
        let (len, atomic_number, aromatic) = match c {
            b'B' if next == Some(b'r') => (2, 35, false),
            b'C' if next == Some(b'l') => (2, 17, false),
            b'B' => (1, 5, false),
            b'C' => (1, 6, false),
            b'N' => (1, 7, false),
            b'O' => (1, 8, false),
            b'P' => (1, 15, false),
            b'S' => (1, 16, false),
            b'F' => (1, 9, false),
            b'I' => (1, 53, false),
            b'b' => (1, 5, true),
            b'c' => (1, 6, true),
            b'n' => (1, 7, true),
            b'o' => (1, 8, true),
            b'p' => (1, 15, true),
            b's' => (1, 16, true),
            b'*' => (1, 0, false),
            _ if c.is_ascii_alphabetic() => {
                return Err(SmilesError::UnknownElement {
                    symbol: (c as char).to_string(),
                    pos: self.pos,
                })
            }
            _ => return Err(self.unexpected()),
        };
        self.pos += len;
        Ok(Atom {
            atomic_number,
            aromatic,
            isotope: 0,
            charge: 0,
            hydrogens: 0,
            bracket: false,
        })
    }

    fn read_number(&mut self) -> Result<Option<u32>> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(None);
        }
        self.src[start..self.pos]
            .parse()
            .map(Some)
            .map_err(|_| SmilesError::NumberOutOfRange(start))
    }

    fn bracket_atom(&mut self) -> Result<Atom> {
        let start = self.pos;
        self.pos += 1;
        let unterminated = SmilesError::UnterminatedBracket(start);

        let isotope = match self.read_number()? {
            Some(n) => u16::try_from(n).map_err(|_| SmilesError::NumberOutOfRange(start + 1))?,
            None => 0,
        };

        let (atomic_number, aromatic) = self.bracket_symbol()?;

        // Chirality is accepted but not stored
        if self.peek() == Some(b'@') {
            self.pos += 1;
            if self.peek() == Some(b'@') {
                self.pos += 1;
            } else if let Some(class) = self.bytes.get(self.pos..self.pos + 2) {
                if matches!(class, b"TH" | b"AL" | b"SP" | b"TB" | b"OH") {
                    self.pos += 2;
                    self.read_number()?;
                }
            }
        }

        let mut hydrogens = 0u8;
        if self.peek() == Some(b'H') {
            self.pos += 1;
            let at = self.pos;
            hydrogens = match self.read_number()? {
                Some(n) => u8::try_from(n).map_err(|_| SmilesError::NumberOutOfRange(at))?,
                None => 1,
            };
        }

        let mut charge = 0i8;
        if let Some(sign @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let magnitude = match self.read_number()? {
                Some(n) => n,
                None => {
                    let mut n = 1;
                    while self.peek() == Some(sign) {
                        self.pos += 1;
                        n += 1;
                    }
                    n
                }
            };
            if magnitude > 15 {
                return Err(SmilesError::UnexpectedChar { ch: sign as char, pos: self.pos });
            }
            charge = if sign == b'+' { magnitude as i8 } else { -(magnitude as i8) };
        }

        if self.peek() == Some(b':') {
            self.pos += 1;
            if self.read_number()?.is_none() {
                return Err(match self.peek() {
                    Some(_) => self.unexpected(),
                    None => unterminated,
                });
            }
        }

        match self.peek() {
            Some(b']') => self.pos += 1,
            Some(_) => return Err(self.unexpected()),
            None => return Err(unterminated),
        }

        Ok(Atom {
            atomic_number,
            aromatic,
            isotope,
            charge,
            hydrogens,
            bracket: true,
        })
    }

    fn bracket_symbol(&mut self) -> Result<(u8, bool)> {
        let start = self.pos;
        let c = self.peek().ok_or(SmilesError::UnterminatedBracket(start))?;
        let next = self.bytes.get(self.pos + 1).copied();

        if c == b'*' {
            self.pos += 1;
            return Ok((0, false));
        }

        if c.is_ascii_uppercase() {
            if let Some(n) = next.filter(|n| n.is_ascii_lowercase()) {
                let two = [c, n];
                let symbol = std::str::from_utf8(&two).unwrap_or("");
                if let Some(z) = element::atomic_number(symbol) {
                    self.pos += 2;
                    return Ok((z, false));
                }
            }
            let one = (c as char).to_string();
            return match element::atomic_number(&one) {
                Some(z) => {
                    self.pos += 1;
                    Ok((z, false))
                }
                None => Err(SmilesError::UnknownElement { symbol: one, pos: start }),
            };
        }

        if c.is_ascii_lowercase() {
            let two: Option<u8> = match (c, next) {
                (b's', Some(b'e')) => Some(34),
                (b'a', Some(b's')) => Some(33),
                (b't', Some(b'e')) => Some(52),
                _ => None,
            };
            if let Some(z) = two {
                self.pos += 2;
                return Ok((z, true));
            }
            let z = match c {
                b'b' => 5,
                b'c' => 6,
                b'n' => 7,
                b'o' => 8,
                b'p' => 15,
                b's' => 16,
                _ => {
                    return Err(SmilesError::UnknownElement {
                        symbol: (c as char).to_string(),
                        pos: start,
                    })
                }
            };
            self.pos += 1;
            return Ok((z, true));
        }

        Err(self.unexpected())
    }
}

/// Mark every bond that is not a bridge (iterative Tarjan lowlink)
fn find_ring_bonds(adjacency: &[SmallVec<[Neighbor; 4]>], bond_count: usize) -> Vec<bool> {
    const UNVISITED: usize = usize::MAX;
    let n = adjacency.len();
    let mut ring = vec![true; bond_count];
    let mut disc = vec![UNVISITED; n];
    let mut low = vec![0usize; n];
    let mut timer = 0usize;

    for root in 0..n {
        if disc[root] != UNVISITED {
            continue;
        }
        disc[root] = timer;
        low[root] = timer;
        timer += 1;
        // (atom, bond used to reach it, next neighbour to visit)
        let mut stack: Vec<(usize, Option<usize>, usize)> = vec![(root, None, 0)];

        while let Some(&(v, parent_bond, next)) = stack.last() {
            if next < adjacency[v].len() {
                if let Some(top) = stack.last_mut() {
                    top.2 += 1;
                }
                let (w, bond) = adjacency[v][next];
                if Some(bond) == parent_bond {
                    continue;
                }
                if disc[w] == UNVISITED {
                    disc[w] = timer;
                    low[w] = timer;
                    timer += 1;
                    stack.push((w, Some(bond), 0));
                } else {
                    low[v] = low[v].min(disc[w]);
                }
            } else {
                stack.pop();
                if let (Some(&(u, _, _)), Some(bond)) = (stack.last(), parent_bond) {
                    low[u] = low[u].min(low[v]);
                    if low[v] > disc[u] {
                        ring[bond] = false;
                    }
                }
            }
        }
    }

    ring
}

fn assign_hydrogens(molecule: &mut Molecule) -> Result<()> {
    for index in 0..molecule.atoms.len() {
        if molecule.atoms[index].aromatic && !molecule.is_in_ring(index) {
            return Err(SmilesError::NonRingAromatic(index));
        }

        let atom = &molecule.atoms[index];
        if atom.bracket || atom.atomic_number == 0 {
            continue;
        }

        let bond_order: u32 = molecule.adjacency[index]
            .iter()
            .map(|&(_, b)| molecule.bonds[b].order.valence())
            .sum();
        let valences = element::default_valences(atom.atomic_number);
        let (Some(&lowest), Some(&highest)) = (valences.first(), valences.last()) else {
            continue;
        };
        let over_valent = SmilesError::OverValent {
            index,
            symbol: atom.symbol(),
            bond_order,
        };

        let hydrogens = if atom.aromatic {
            // One valence goes to the aromatic system
            if bond_order > highest as u32 {
                return Err(over_valent);
            }
            (lowest as u32).saturating_sub(bond_order + 1)
        } else {
            match valences.iter().map(|&v| v as u32).find(|&v| v >= bond_order) {
                Some(v) => v - bond_order,
                None => return Err(over_valent),
            }
        };
        molecule.atoms[index].hydrogens = hydrogens as u8;
    }
    Ok(())
}

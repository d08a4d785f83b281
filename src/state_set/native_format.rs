use crate::error::{BoolSimError, BoolSimResult};
use log::trace;
use num_bigint::BigUint;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// The "don't care" symbol used by `boolSim` state-set files.
pub const NATIVE_ANY: char = '2';

/// The "don't care" symbol used by `espresso`.
pub const ESPRESSO_ANY: char = '-';

/// The symbol used in place of [`NATIVE_ANY`] when a state set is displayed.
pub const DISPLAY_ANY: char = '-';

/// Value of a single network node in a ternary vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ternary {
    Zero,
    One,
    Any,
}

/// One body line of a state-set file. Represents `2^k` binary states, where `k` is the number
/// of [`Ternary::Any`] positions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TernaryVector(Vec<Ternary>);

/// A parsed `boolSim` state-set file: a header of node names followed by ternary vectors
/// with exactly one symbol per node.
///
/// The vectors are kept in file order and are not deduplicated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NativeStateSet {
    pub nodes: Vec<String>,
    pub vectors: Vec<TernaryVector>,
}

impl Ternary {
    pub fn from_native(symbol: char) -> Option<Ternary> {
        match symbol {
            '0' => Some(Ternary::Zero),
            '1' => Some(Ternary::One),
            NATIVE_ANY => Some(Ternary::Any),
            _ => None,
        }
    }

    pub fn from_espresso(symbol: char) -> Option<Ternary> {
        match symbol {
            '0' => Some(Ternary::Zero),
            '1' => Some(Ternary::One),
            ESPRESSO_ANY => Some(Ternary::Any),
            _ => None,
        }
    }

    pub fn native_symbol(self) -> char {
        match self {
            Ternary::Zero => '0',
            Ternary::One => '1',
            Ternary::Any => NATIVE_ANY,
        }
    }

    pub fn espresso_symbol(self) -> char {
        match self {
            Ternary::Zero => '0',
            Ternary::One => '1',
            Ternary::Any => ESPRESSO_ANY,
        }
    }
}

impl From<Vec<Ternary>> for TernaryVector {
    fn from(value: Vec<Ternary>) -> Self {
        TernaryVector(value)
    }
}

impl TernaryVector {
    /// Parse a vector from symbols produced by `symbol`, ignoring all whitespace.
    ///
    /// Returns the first offending character if some symbol is not recognized.
    pub fn parse_with(
        line: &str,
        symbol: impl Fn(char) -> Option<Ternary>,
    ) -> Result<TernaryVector, char> {
        line.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| symbol(c).ok_or(c))
            .collect::<Result<Vec<_>, _>>()
            .map(TernaryVector)
    }

    pub fn values(&self) -> &[Ternary] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of [`Ternary::Any`] positions.
    pub fn free_positions(&self) -> usize {
        self.0.iter().filter(|it| **it == Ternary::Any).count()
    }

    /// Number of binary states covered by this vector.
    pub fn cardinality(&self) -> BigUint {
        BigUint::from(1u8) << self.free_positions()
    }

    /// Symbols separated by single spaces, e.g. `0 2 1`.
    pub fn to_native_line(&self) -> String {
        let symbols: Vec<String> = self
            .0
            .iter()
            .map(|it| it.native_symbol().to_string())
            .collect();
        symbols.join(" ")
    }

    /// Contiguous symbols with `-` as "don't care", e.g. `0-1`.
    pub fn to_espresso_cube(&self) -> String {
        self.0.iter().map(|it| it.espresso_symbol()).collect()
    }
}

impl Display for TernaryVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_native_line())
    }
}

impl NativeStateSet {
    pub fn new(nodes: Vec<String>, vectors: Vec<TernaryVector>) -> NativeStateSet {
        NativeStateSet { nodes, vectors }
    }

    /// Parse the content of a state-set file. The `path` is only used in error messages.
    ///
    /// Body lines may separate symbols by whitespace or not at all. Every body line must
    /// contain exactly one of `0`, `1`, `2` per header node, so a blank line is malformed.
    pub fn parse(path: &Path, text: &str) -> BoolSimResult<NativeStateSet> {
        let mut lines = text.lines();
        let nodes: Vec<String> = match lines.next() {
            Some(header) => header.split_whitespace().map(str::to_string).collect(),
            None => return Err(BoolSimError::malformed(path, 1, "missing header line")),
        };
        if nodes.is_empty() {
            return Err(BoolSimError::malformed(path, 1, "header has no node names"));
        }

        let mut vectors = Vec::new();
        for (index, line) in lines.enumerate() {
            let line_number = index + 2;
            if line.trim().is_empty() {
                return Err(BoolSimError::malformed(path, line_number, "blank line"));
            }
            let vector = TernaryVector::parse_with(line, Ternary::from_native).map_err(|c| {
                BoolSimError::malformed(path, line_number, format!("unexpected symbol `{c}`"))
            })?;
            if vector.len() != nodes.len() {
                return Err(BoolSimError::malformed(
                    path,
                    line_number,
                    format!("{} symbols, but {} nodes", vector.len(), nodes.len()),
                ));
            }
            trace!("Parsed `{}` at {}:{}.", vector, path.display(), line_number);
            vectors.push(vector);
        }

        Ok(NativeStateSet { nodes, vectors })
    }

    /// Total number of binary states: the sum of [`TernaryVector::cardinality`] over
    /// all vectors (overlapping vectors are counted repeatedly).
    pub fn count(&self) -> BigUint {
        self.vectors.iter().map(|it| it.cardinality()).sum()
    }

    /// Serialize into the space-separated native format (with a trailing newline).
    pub fn to_native_string(&self) -> String {
        let mut result = self.nodes.join(" ");
        result.push('\n');
        for vector in &self.vectors {
            result.push_str(&vector.to_native_line());
            result.push('\n');
        }
        result
    }
}

/// Human-readable form of a state-set file: every [`NATIVE_ANY`] is replaced by
/// [`DISPLAY_ANY`], followed by one extra empty line.
///
/// The header is not special: node names containing `2` are displayed with `-` in its place.
/// The layout of every line is kept as it is.
pub fn render_for_display(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 1);
    for line in text.lines() {
        result.push_str(&line.replace(NATIVE_ANY, &DISPLAY_ANY.to_string()));
        result.push('\n');
    }
    result.push('\n');
    result
}

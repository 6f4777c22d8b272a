use crate::error::{CfResult, CipherForgeError};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A bijection over a symbol alphabet, laid out row-major into a grid.
///
/// Every symbol appears exactly once. Mutations provided here (swap,
/// reversal) keep that invariant, so a key never has to be re-validated
/// during a search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SquareKey {
    symbols: Vec<u8>,
}

impl SquareKey {
    pub fn new(symbols: &[u8]) -> CfResult<Self> {
        if symbols.is_empty() {
            return Err(CipherForgeError::InvalidKey("Square key is empty".to_string()));
        }
        let mut seen = [false; 256];
        for &s in symbols {
            if !s.is_ascii_graphic() {
                return Err(CipherForgeError::InvalidKey(format!(
                    "Square key contains a non-printable symbol (0x{:02x})",
                    s
                )));
            }
            let up = s.to_ascii_uppercase();
            if seen[up as usize] {
                return Err(CipherForgeError::InvalidKey(format!(
                    "Square key repeats symbol '{}'",
                    up as char
                )));
            }
            seen[up as usize] = true;
        }
        Ok(Self {
            symbols: symbols.iter().map(u8::to_ascii_uppercase).collect(),
        })
    }

    /// Validates the key and checks it has exactly `len` symbols.
    pub fn with_len(symbols: &[u8], len: usize) -> CfResult<Self> {
        if symbols.len() != len {
            return Err(CipherForgeError::InvalidKey(format!(
                "Square key must be {} symbols long, got {}",
                len,
                symbols.len()
            )));
        }
        Self::new(symbols)
    }

    /// A uniformly shuffled key over `alphabet`.
    pub fn shuffled(alphabet: &str, rng: &mut Rng) -> CfResult<Self> {
        let mut key = Self::new(alphabet.as_bytes())?;
        key.shuffle(rng);
        Ok(key)
    }

    pub fn shuffle(&mut self, rng: &mut Rng) {
        rng.shuffle(&mut self.symbols);
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.symbols
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII graphic bytes get past `new`.
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.symbols.swap(a, b);
    }

    /// Reverses the closed range between the two positions.
    pub fn reverse(&mut self, a: usize, b: usize) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.symbols[lo..=hi].reverse();
    }

    /// Grid rows of `width` symbols each.
    pub fn rows(&self, width: usize) -> impl Iterator<Item = &[u8]> {
        self.symbols.chunks(width.max(1))
    }
}

impl fmt::Display for SquareKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SquareKey {
    type Err = CipherForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim().as_bytes())
    }
}

impl TryFrom<String> for SquareKey {
    type Error = CipherForgeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SquareKey> for String {
    fn from(k: SquareKey) -> Self {
        k.to_string()
    }
}

/// Read-out order of a columnar transposition: position `i` holds the
/// original column index that was read `i`-th.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct TranspositionKey {
    order: Vec<usize>,
}

impl TranspositionKey {
    pub fn new(order: Vec<usize>) -> CfResult<Self> {
        let width = order.len();
        if width == 0 {
            return Err(CipherForgeError::InvalidKey(
                "Transposition order is empty".to_string(),
            ));
        }
        let mut seen = vec![false; width];
        for &col in &order {
            if col >= width {
                return Err(CipherForgeError::InvalidKey(format!(
                    "Transposition index {} is out of range for width {}",
                    col, width
                )));
            }
            if seen[col] {
                return Err(CipherForgeError::InvalidKey(format!(
                    "Transposition index {} is repeated",
                    col
                )));
            }
            seen[col] = true;
        }
        Ok(Self { order })
    }

    pub fn identity(width: usize) -> CfResult<Self> {
        Self::new((0..width).collect())
    }

    pub fn shuffle(&mut self, rng: &mut Rng) {
        rng.shuffle(&mut self.order);
    }

    pub fn width(&self) -> usize {
        self.order.len()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.order.swap(a, b);
    }
}

impl fmt::Display for TranspositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, col) in self.order.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", col)?;
        }
        Ok(())
    }
}

/// Parses space- or comma-separated column indices, e.g. `"4 0 6 2 1 3 5"`.
impl FromStr for TranspositionKey {
    type Err = CipherForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let order = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(|t| {
                t.parse::<usize>().map_err(|_| {
                    CipherForgeError::InvalidKey(format!("'{}' is not a column index", t))
                })
            })
            .collect::<CfResult<Vec<_>>>()?;
        Self::new(order)
    }
}

impl TryFrom<Vec<usize>> for TranspositionKey {
    type Error = CipherForgeError;

    fn try_from(order: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(order)
    }
}

impl From<TranspositionKey> for Vec<usize> {
    fn from(k: TranspositionKey) -> Self {
        k.order
    }
}

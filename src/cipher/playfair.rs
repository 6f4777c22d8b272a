use super::key::SquareKey;
use crate::consts::{NOT_IN_GRID, PLAYFAIR_SIDE};
use crate::error::{CfResult, CipherForgeError};

const SIDE: usize = PLAYFAIR_SIDE;
const CELLS: usize = SIDE * SIDE;

/// Digraphic substitution over a 5x5 grid.
#[derive(Debug, Clone)]
pub struct Playfair {
    grid: [[u8; SIDE]; SIDE],
    // symbol -> row * SIDE + col
    cells: [u8; 256],
}

impl Playfair {
    pub fn new(key: &SquareKey) -> CfResult<Self> {
        if key.len() != CELLS {
            return Err(CipherForgeError::InvalidKey(format!(
                "Playfair key must contain {} unique symbols, got {}",
                CELLS,
                key.len()
            )));
        }

        let mut grid = [[0u8; SIDE]; SIDE];
        let mut cells = [NOT_IN_GRID; 256];
        for (i, &symbol) in key.as_bytes().iter().enumerate() {
            grid[i / SIDE][i % SIDE] = symbol;
            cells[symbol as usize] = i as u8;
        }
        Ok(Self { grid, cells })
    }

    pub fn from_key_str(key: &str) -> CfResult<Self> {
        Self::new(&SquareKey::with_len(key.trim().as_bytes(), CELLS)?)
    }

    /// Decrypts consecutive pairs. A trailing odd symbol is ignored;
    /// a symbol outside the grid makes the whole result `None`.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Option<String> {
        self.transform(ciphertext, SIDE - 1)
    }

    /// Forward rule: row and column neighbours are taken to the right / below.
    pub fn encrypt(&self, plaintext: &[u8]) -> Option<String> {
        self.transform(plaintext, 1)
    }

    fn transform(&self, text: &[u8], shift: usize) -> Option<String> {
        let mut out = String::with_capacity(text.len());
        for pair in text.chunks_exact(2) {
            let (r1, c1) = self.position(pair[0])?;
            let (r2, c2) = self.position(pair[1])?;

            let (a, b) = if r1 == r2 {
                (
                    self.grid[r1][(c1 + shift) % SIDE],
                    self.grid[r2][(c2 + shift) % SIDE],
                )
            } else if c1 == c2 {
                (
                    self.grid[(r1 + shift) % SIDE][c1],
                    self.grid[(r2 + shift) % SIDE][c2],
                )
            } else {
                (self.grid[r1][c2], self.grid[r2][c1])
            };
            out.push(a as char);
            out.push(b as char);
        }
        Some(out)
    }

    #[inline(always)]
    fn position(&self, symbol: u8) -> Option<(usize, usize)> {
        match self.cells[symbol.to_ascii_uppercase() as usize] {
            NOT_IN_GRID => None,
            cell => Some((cell as usize / SIDE, cell as usize % SIDE)),
        }
    }

    pub fn grid(&self) -> &[[u8; SIDE]; SIDE] {
        &self.grid
    }
}

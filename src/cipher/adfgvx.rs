use super::key::{SquareKey, TranspositionKey};
use super::transposition::{columnar, undo_columnar};
use crate::consts::{ADFGVX_COORDINATES, ADFGVX_SIDE, NOT_IN_GRID};
use crate::error::{CfResult, CipherForgeError};

const SIDE: usize = ADFGVX_SIDE;
const CELLS: usize = SIDE * SIDE;

/// The substitution stage: a 6x6 square addressed by two coordinate symbols.
#[derive(Debug, Clone)]
pub struct CoordinateSquare {
    coordinates: [u8; SIDE],
    // coordinate symbol -> 0..SIDE
    coord_index: [u8; 256],
    // row * SIDE + col -> square symbol
    square: [u8; CELLS],
    // square symbol -> row * SIDE + col
    cells: [u8; 256],
}

impl CoordinateSquare {
    pub fn new(key: &SquareKey) -> CfResult<Self> {
        Self::with_coordinates(key, ADFGVX_COORDINATES)
    }

    pub fn with_coordinates(key: &SquareKey, coordinates: &str) -> CfResult<Self> {
        if key.len() != CELLS {
            return Err(CipherForgeError::InvalidKey(format!(
                "Square key must be {} symbols long, got {}",
                CELLS,
                key.len()
            )));
        }

        let coord_bytes = coordinates.as_bytes();
        if coord_bytes.len() != SIDE {
            return Err(CipherForgeError::InvalidKey(format!(
                "Coordinate alphabet must have {} symbols, got {}",
                SIDE,
                coord_bytes.len()
            )));
        }

        let mut coord_index = [NOT_IN_GRID; 256];
        let mut coords = [0u8; SIDE];
        for (i, &c) in coord_bytes.iter().enumerate() {
            let c = c.to_ascii_uppercase();
            if coord_index[c as usize] != NOT_IN_GRID {
                return Err(CipherForgeError::InvalidKey(format!(
                    "Coordinate symbol '{}' is repeated",
                    c as char
                )));
            }
            coord_index[c as usize] = i as u8;
            coords[i] = c;
        }

        let mut square = [0u8; CELLS];
        let mut cells = [NOT_IN_GRID; 256];
        for (i, &symbol) in key.as_bytes().iter().enumerate() {
            square[i] = symbol;
            cells[symbol as usize] = i as u8;
        }

        Ok(Self {
            coordinates: coords,
            coord_index,
            square,
            cells,
        })
    }

    /// Maps coordinate pairs back to square symbols. Odd length or an
    /// unknown coordinate gives `None`.
    pub fn decode(&self, intermediate: &[u8]) -> Option<String> {
        if intermediate.len() % 2 != 0 {
            return None;
        }
        let mut out = String::with_capacity(intermediate.len() / 2);
        for pair in intermediate.chunks_exact(2) {
            let row = self.coord_index[pair[0].to_ascii_uppercase() as usize];
            let col = self.coord_index[pair[1].to_ascii_uppercase() as usize];
            if row == NOT_IN_GRID || col == NOT_IN_GRID {
                return None;
            }
            out.push(self.square[row as usize * SIDE + col as usize] as char);
        }
        Some(out)
    }

    pub fn encode(&self, plaintext: &[u8]) -> Option<Vec<u8>> {
        let mut out = Vec::with_capacity(plaintext.len() * 2);
        for &symbol in plaintext {
            let cell = self.cells[symbol.to_ascii_uppercase() as usize];
            if cell == NOT_IN_GRID {
                return None;
            }
            out.push(self.coordinates[cell as usize / SIDE]);
            out.push(self.coordinates[cell as usize % SIDE]);
        }
        Some(out)
    }
}

/// Coordinate substitution followed by columnar transposition.
#[derive(Debug, Clone)]
pub struct Adfgvx {
    square: CoordinateSquare,
    order: TranspositionKey,
}

impl Adfgvx {
    pub fn new(square: &SquareKey, order: TranspositionKey) -> CfResult<Self> {
        Ok(Self {
            square: CoordinateSquare::new(square)?,
            order,
        })
    }

    pub fn with_coordinates(
        square: &SquareKey,
        order: TranspositionKey,
        coordinates: &str,
    ) -> CfResult<Self> {
        Ok(Self {
            square: CoordinateSquare::with_coordinates(square, coordinates)?,
            order,
        })
    }

    /// Builds from a raw square string and a raw order, validating both.
    pub fn from_parts(square: &str, order: &[usize]) -> CfResult<Self> {
        let key = SquareKey::with_len(square.trim().as_bytes(), CELLS)?;
        Self::new(&key, TranspositionKey::new(order.to_vec())?)
    }

    pub fn order(&self) -> &TranspositionKey {
        &self.order
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Option<String> {
        let intermediate = undo_columnar(ciphertext, self.order.as_slice())?;
        self.square.decode(&intermediate)
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Option<String> {
        let intermediate = self.square.encode(plaintext)?;
        let transposed = columnar(&intermediate, &self.order);
        String::from_utf8(transposed).ok()
    }
}

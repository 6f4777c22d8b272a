use super::mutation::{mutate_order, mutate_square};
use crate::cipher::transposition::undo_columnar;
use crate::cipher::{Adfgvx, CoordinateSquare, Playfair, SquareKey, TranspositionKey};
use crate::config::MutationPolicy;
use crate::consts::{
    ADFGVX_ALPHABET, ADFGVX_COORDINATES, ADFGVX_SIDE, PLAYFAIR_ALPHABET, PLAYFAIR_SIDE,
};
use crate::error::CfResult;
use fastrand::Rng;
use serde::Serialize;
use std::fmt;

/// A key space the annealer can walk: random starts, neighbours, and a
/// decryption oracle over fixed ciphertext. `None` from `decrypt` marks a
/// candidate that cannot be scored.
pub trait KeySpace: Sync {
    type Key: Clone + Send + Sync + fmt::Debug;

    fn random_key(&self, rng: &mut Rng) -> Self::Key;

    fn neighbour(&self, key: &Self::Key, rng: &mut Rng, policy: &MutationPolicy) -> Self::Key;

    fn decrypt(&self, key: &Self::Key) -> Option<String>;
}

fn checked_alphabet(alphabet: &str, side: usize) -> CfResult<SquareKey> {
    SquareKey::with_len(alphabet.as_bytes(), side * side)
}

/// Playfair keys over a 25-symbol alphabet.
pub struct PlayfairSpace<'a> {
    ciphertext: &'a [u8],
    alphabet: SquareKey,
}

impl<'a> PlayfairSpace<'a> {
    pub fn new(ciphertext: &'a [u8]) -> CfResult<Self> {
        Self::with_alphabet(ciphertext, PLAYFAIR_ALPHABET)
    }

    pub fn with_alphabet(ciphertext: &'a [u8], alphabet: &str) -> CfResult<Self> {
        Ok(Self {
            ciphertext,
            alphabet: checked_alphabet(alphabet, PLAYFAIR_SIDE)?,
        })
    }
}

impl KeySpace for PlayfairSpace<'_> {
    type Key = SquareKey;

    fn random_key(&self, rng: &mut Rng) -> SquareKey {
        let mut key = self.alphabet.clone();
        key.shuffle(rng);
        key
    }

    fn neighbour(&self, key: &SquareKey, rng: &mut Rng, policy: &MutationPolicy) -> SquareKey {
        mutate_square(key, rng, policy)
    }

    fn decrypt(&self, key: &SquareKey) -> Option<String> {
        Playfair::new(key).ok()?.decrypt(self.ciphertext)
    }
}

/// ADFGVX squares under one fixed transposition order. The transposition
/// is undone once up front since it does not depend on the square.
pub struct SquareSpace {
    order: TranspositionKey,
    intermediate: Option<Vec<u8>>,
    alphabet: SquareKey,
    coordinates: String,
}

impl SquareSpace {
    pub fn new(ciphertext: &[u8], order: TranspositionKey) -> CfResult<Self> {
        Self::with_alphabet(ciphertext, order, ADFGVX_ALPHABET, ADFGVX_COORDINATES)
    }

    pub fn with_alphabet(
        ciphertext: &[u8],
        order: TranspositionKey,
        alphabet: &str,
        coordinates: &str,
    ) -> CfResult<Self> {
        let alphabet = checked_alphabet(alphabet, ADFGVX_SIDE)?;
        // Fail fast on a bad coordinate alphabet instead of rejecting every candidate.
        CoordinateSquare::with_coordinates(&alphabet, coordinates)?;
        Ok(Self {
            intermediate: undo_columnar(ciphertext, order.as_slice()),
            order,
            alphabet,
            coordinates: coordinates.to_string(),
        })
    }

    pub fn order(&self) -> &TranspositionKey {
        &self.order
    }
}

impl KeySpace for SquareSpace {
    type Key = SquareKey;

    fn random_key(&self, rng: &mut Rng) -> SquareKey {
        let mut key = self.alphabet.clone();
        key.shuffle(rng);
        key
    }

    fn neighbour(&self, key: &SquareKey, rng: &mut Rng, policy: &MutationPolicy) -> SquareKey {
        mutate_square(key, rng, policy)
    }

    fn decrypt(&self, key: &SquareKey) -> Option<String> {
        let intermediate = self.intermediate.as_deref()?;
        CoordinateSquare::with_coordinates(key, &self.coordinates)
            .ok()?
            .decode(intermediate)
    }
}

/// Square and transposition order, mutated independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JointKey {
    pub square: SquareKey,
    pub order: TranspositionKey,
}

impl fmt::Display for JointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.square, self.order)
    }
}

/// ADFGVX with both keys unknown; the width is fixed.
pub struct JointSpace<'a> {
    ciphertext: &'a [u8],
    alphabet: SquareKey,
    identity: TranspositionKey,
}

impl<'a> JointSpace<'a> {
    pub fn new(ciphertext: &'a [u8], width: usize) -> CfResult<Self> {
        Ok(Self {
            ciphertext,
            alphabet: checked_alphabet(ADFGVX_ALPHABET, ADFGVX_SIDE)?,
            identity: TranspositionKey::identity(width)?,
        })
    }
}

impl KeySpace for JointSpace<'_> {
    type Key = JointKey;

    fn random_key(&self, rng: &mut Rng) -> JointKey {
        let mut square = self.alphabet.clone();
        square.shuffle(rng);
        let mut order = self.identity.clone();
        order.shuffle(rng);
        JointKey { square, order }
    }

    fn neighbour(&self, key: &JointKey, rng: &mut Rng, policy: &MutationPolicy) -> JointKey {
        if rng.f64() < policy.order_mutation_rate {
            JointKey {
                square: key.square.clone(),
                order: mutate_order(&key.order, rng),
            }
        } else {
            JointKey {
                square: mutate_square(&key.square, rng, policy),
                order: key.order.clone(),
            }
        }
    }

    fn decrypt(&self, key: &JointKey) -> Option<String> {
        Adfgvx::new(&key.square, key.order.clone())
            .ok()?
            .decrypt(self.ciphertext)
    }
}

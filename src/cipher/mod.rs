pub mod adfgvx;
pub mod key;
pub mod playfair;
pub mod transposition;
pub mod vigenere;

pub use self::adfgvx::{Adfgvx, CoordinateSquare};
pub use self::key::{SquareKey, TranspositionKey};
pub use self::playfair::Playfair;

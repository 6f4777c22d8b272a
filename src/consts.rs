/// Length of the scoring window. The whole scorer is built around quadgrams.
pub const NGRAM_LEN: usize = 4;

/// Pseudo-count assigned to every n-gram missing from the corpus table.
/// The floor log-probability is `log10(FLOOR_COUNT / total_count)`.
pub const FLOOR_COUNT: f64 = 0.01;

/// Score given to a candidate whose decryption is unusable (empty plaintext).
pub const INVALID_SCORE: f64 = -1e9;

/// Initial value of every "best so far" tracker.
pub const UNSET_SCORE: f64 = -999_999.0;

/// The 25-letter Playfair alphabet (J is merged into I).
pub const PLAYFAIR_ALPHABET: &str = "ABCDEFGHIKLMNOPQRSTUVWXYZ";

/// Side of the Playfair grid.
pub const PLAYFAIR_SIDE: usize = 5;

/// The 36-symbol ADFGVX square alphabet.
pub const ADFGVX_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Row/column labels of the ADFGVX square.
pub const ADFGVX_COORDINATES: &str = "ADFGVX";

/// Side of the ADFGVX square.
pub const ADFGVX_SIDE: usize = 6;

/// Value used for "symbol not in grid" in 256-entry byte maps.
pub const NOT_IN_GRID: u8 = 255;

/// Default number of ranked entries kept by the transposition search.
pub const DEFAULT_TOP_K: usize = 10;

/// Progress is logged every this many completed partition elements.
pub const PROGRESS_INTERVAL: usize = 100;

//! Ciphertext preparation and file loading for the command line.

use crate::cipher::TranspositionKey;
use crate::error::{CfResult, CipherForgeError};
use std::fs;
use std::path::Path;

/// Uppercase ASCII letters only.
pub fn clean_letters(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub fn merge_j_into_i(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'J' => 'I',
            'j' => 'i',
            other => other,
        })
        .collect()
}

/// Drops a trailing odd symbol so the text splits into digraphs.
pub fn truncate_even(text: &str) -> &str {
    let even = text.len() - text.len() % 2;
    text.get(..even).unwrap_or(text)
}

/// Keeps only symbols of `alphabet`, compared case-insensitively and
/// returned uppercased.
pub fn clean_symbols(text: &str, alphabet: &str) -> String {
    let mut allowed = [false; 256];
    for b in alphabet.bytes() {
        allowed[b.to_ascii_uppercase() as usize] = true;
    }
    text.bytes()
        .map(|b| b.to_ascii_uppercase())
        .filter(|&b| allowed[b as usize])
        .map(char::from)
        .collect()
}

fn morse_letter(code: &str) -> Option<char> {
    match code {
        ".-" => Some('A'),
        "-.." => Some('D'),
        "..-." => Some('F'),
        "--." => Some('G'),
        "...-" => Some('V'),
        "-..-" => Some('X'),
        _ => None,
    }
}

/// Morse to ADFGVX letters. `/` ends a letter; anything but dots and dashes
/// is ignored otherwise, and codes outside the six letters are dropped.
pub fn morse_to_adfgvx(morse: &str) -> String {
    let mut out = String::new();
    let mut current = String::new();

    for c in morse.chars() {
        match c {
            '.' | '-' => current.push(c),
            '/' => {
                out.extend(morse_letter(&current));
                current.clear();
            }
            _ => {}
        }
    }
    out.extend(morse_letter(&current));
    out
}

/// Reads a whole text file, naming the path on failure.
pub fn read_text<P: AsRef<Path>>(path: P) -> CfResult<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| {
        CipherForgeError::Validation(format!(
            "Could not read '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Reads transposition orders written one per line. Blank lines are skipped.
pub fn read_orders<P: AsRef<Path>>(path: P) -> CfResult<Vec<TranspositionKey>> {
    read_text(path)?
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::parse)
        .collect()
}

use crate::error::{CfResult, CipherForgeError};

fn shifts(key: &str) -> CfResult<Vec<u8>> {
    if key.is_empty() {
        return Err(CipherForgeError::InvalidKey("Vigenère key is empty".to_string()));
    }
    key.bytes()
        .map(|b| {
            if b.is_ascii_alphabetic() {
                Ok(b.to_ascii_uppercase() - b'A')
            } else {
                Err(CipherForgeError::InvalidKey(format!(
                    "Vigenère key symbol '{}' is not a letter",
                    b as char
                )))
            }
        })
        .collect()
}

// Letters advance the key; anything else is copied through untouched.
fn apply(text: &str, key: &str, forward: bool) -> CfResult<String> {
    let shifts = shifts(key)?;
    let mut idx = 0;
    Ok(text
        .bytes()
        .map(|b| {
            if !b.is_ascii_alphabetic() {
                return b as char;
            }
            let s = shifts[idx % shifts.len()];
            idx += 1;
            let x = b.to_ascii_uppercase() - b'A';
            let y = if forward { (x + s) % 26 } else { (x + 26 - s) % 26 };
            (b'A' + y) as char
        })
        .collect())
}

pub fn encrypt(plaintext: &str, key: &str) -> CfResult<String> {
    apply(plaintext, key, true)
}

pub fn decrypt(ciphertext: &str, key: &str) -> CfResult<String> {
    apply(ciphertext, key, false)
}

use crate::cipher::{SquareKey, TranspositionKey};
use crate::config::MutationPolicy;
use fastrand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Swap,
    Reverse,
}

/// Draws an operator with probability proportional to its weight.
pub fn choose_operator(rng: &mut Rng, policy: &MutationPolicy) -> Operator {
    let total = policy.swap_weight + policy.reverse_weight;
    if total <= 0.0 || rng.f64() * total < policy.swap_weight {
        Operator::Swap
    } else {
        Operator::Reverse
    }
}

/// Exchanges two independently drawn positions (they may coincide).
pub fn swap_any(key: &mut SquareKey, rng: &mut Rng) {
    let n = key.len();
    if n < 2 {
        return;
    }
    let a = rng.usize(0..n);
    let b = rng.usize(0..n);
    key.swap(a, b);
}

/// Like [`swap_any`] but only among positions holding letters. Falls back
/// to an unrestricted swap when fewer than two letters exist.
pub fn swap_letters(key: &mut SquareKey, rng: &mut Rng) {
    let letters: Vec<usize> = key
        .as_bytes()
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .collect();

    if letters.len() < 2 {
        swap_any(key, rng);
        return;
    }
    let a = letters[rng.usize(0..letters.len())];
    let b = letters[rng.usize(0..letters.len())];
    key.swap(a, b);
}

/// Reverses the closed range between two random positions.
pub fn reverse_range(key: &mut SquareKey, rng: &mut Rng) {
    let n = key.len();
    if n < 2 {
        return;
    }
    let a = rng.usize(0..n);
    let b = rng.usize(0..n);
    key.reverse(a, b);
}

fn letters_only(rng: &mut Rng, policy: &MutationPolicy) -> bool {
    policy.letters_only_rate > 0.0 && rng.f64() < policy.letters_only_rate
}

/// Neighbour of a square key under `policy`.
pub fn mutate_square(key: &SquareKey, rng: &mut Rng, policy: &MutationPolicy) -> SquareKey {
    let mut child = key.clone();
    match choose_operator(rng, policy) {
        Operator::Swap if letters_only(rng, policy) => swap_letters(&mut child, rng),
        Operator::Swap => swap_any(&mut child, rng),
        Operator::Reverse => reverse_range(&mut child, rng),
    }
    child
}

/// Neighbour of a transposition order: one pairwise swap.
pub fn mutate_order(order: &TranspositionKey, rng: &mut Rng) -> TranspositionKey {
    let mut child = order.clone();
    let w = child.width();
    if w >= 2 {
        let a = rng.usize(0..w);
        let b = rng.usize(0..w);
        child.swap(a, b);
    }
    child
}

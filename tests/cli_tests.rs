mod common;

use cipherforge::cipher::transposition::columnar;
use cipherforge::cipher::{vigenere, Adfgvx, Playfair, TranspositionKey};
use common::{sample_letters, FIXTURE_KEY, SAMPLE_TEXT};
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_cipherforge");
const SQUARE: &str = "PH0QG64MEA1YL2NOFDXKR3CVS5ZW7BJ9UTI8";

struct TestContext {
    dir: TempDir,
    quadgram_path: PathBuf,
}

impl TestContext {
    /// Builds a quadgram table from the sample text through the CLI itself.
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let corpus_path = dir.path().join("corpus.txt");
        let quadgram_path = dir.path().join("quadgrams.txt");
        fs::write(&corpus_path, SAMPLE_TEXT).unwrap();

        let output = Command::new(BIN)
            .args([
                "ngrams",
                "--input",
                corpus_path.to_str().unwrap(),
                "--output",
                quadgram_path.to_str().unwrap(),
            ])
            .output()
            .expect("Failed to execute binary");
        assert!(output.status.success(), "{:?}", output);

        Self { dir, quadgram_path }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(BIN)
            .arg("--quadgrams")
            .arg(&self.quadgram_path)
            .args(args)
            .output()
            .expect("Failed to execute binary")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn field<'a>(stdout: &'a str, name: &str) -> Option<&'a str> {
    stdout
        .lines()
        .find_map(|l| l.strip_prefix(name)?.strip_prefix(": "))
}

fn parse_score(stdout: &str) -> f64 {
    let re = Regex::new(r"Score: (-?\d+\.\d+)").unwrap();
    re.captures(stdout)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or_else(|| panic!("No score in output:\n{}", stdout))
}

#[test]
fn test_cli_ngrams_writes_a_loadable_table() {
    let ctx = TestContext::new();
    let table = fs::read_to_string(&ctx.quadgram_path).unwrap();
    let first = table.lines().next().unwrap();
    let re = Regex::new(r"^[A-Z]{4} \d+$").unwrap();
    assert!(re.is_match(first), "unexpected line '{}'", first);
}

#[test]
fn test_cli_playfair_from_the_right_key() {
    let ctx = TestContext::new();
    let mut letters = sample_letters().replace('J', "I");
    letters.truncate(200);
    let ct = Playfair::from_key_str(FIXTURE_KEY)
        .unwrap()
        .encrypt(letters.as_bytes())
        .unwrap();

    let output = ctx.run(&[
        "playfair",
        "--text",
        &ct,
        "--seed-key",
        FIXTURE_KEY,
        "--iterations",
        "0",
        "--seed",
        "1",
    ]);
    assert!(output.status.success(), "{:?}", output);

    let out = stdout(&output);
    assert_eq!(field(&out, "Key"), Some(FIXTURE_KEY));
    assert_eq!(field(&out, "Plaintext"), Some(letters.as_str()));
    assert!(parse_score(&out) < 0.0);
}

#[test]
fn test_cli_short_search_runs() {
    let ctx = TestContext::new();
    let mut letters = sample_letters().replace('J', "I");
    letters.truncate(120);
    let ct = Playfair::from_key_str(FIXTURE_KEY)
        .unwrap()
        .encrypt(letters.as_bytes())
        .unwrap();

    let output = ctx.run(&[
        "playfair", "--text", &ct, "--iterations", "500", "--lanes", "2", "--seed", "3",
    ]);
    assert!(output.status.success(), "{:?}", output);
    assert!(parse_score(&stdout(&output)).is_finite());
}

#[test]
fn test_cli_missing_quadgrams_fails() {
    let output = Command::new(BIN)
        .args(["--quadgrams", "no/such/table.txt", "playfair", "--text", "ABCD"])
        .output()
        .expect("Failed to execute binary");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_missing_ciphertext_fails() {
    let ctx = TestContext::new();
    let output = ctx.run(&["playfair", "--iterations", "1"]);
    assert_eq!(output.status.code(), Some(1));
}

fn adfgvx_ciphertext(order: &[usize]) -> (String, String) {
    let mut letters = sample_letters();
    letters.truncate(240);
    let ct = Adfgvx::from_parts(SQUARE, order)
        .unwrap()
        .encrypt(letters.as_bytes())
        .unwrap();
    (ct, letters)
}

#[test]
fn test_cli_transposition_writes_ranked_orders() {
    let ctx = TestContext::new();
    let (ct, _) = adfgvx_ciphertext(&[1, 2, 0]);
    let out_path = ctx.dir.path().join("orders.txt");

    let output = ctx.run(&[
        "transposition",
        "--text",
        &ct,
        "--width",
        "3",
        "--iterations",
        "50",
        "--threads",
        "2",
        "--seed",
        "4",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{:?}", output);

    let written = fs::read_to_string(&out_path).unwrap();
    assert_eq!(written.lines().count(), 6);
    for line in written.lines() {
        assert!(line.parse::<TranspositionKey>().is_ok(), "bad line '{}'", line);
    }
    assert!(parse_score(&stdout(&output)).is_finite());
}

#[test]
fn test_cli_square_from_the_right_keys() {
    let ctx = TestContext::new();
    let (ct, letters) = adfgvx_ciphertext(&[2, 0, 3, 1]);
    // Spaces and lowercase are cleaned away.
    let spaced = ct.to_lowercase().replace("ad", "a d");

    let output = ctx.run(&[
        "square",
        "--text",
        &spaced,
        "--order",
        "2 0 3 1",
        "--seed-key",
        SQUARE,
        "--iterations",
        "0",
    ]);
    assert!(output.status.success(), "{:?}", output);

    let out = stdout(&output);
    assert_eq!(field(&out, "Order"), Some("2 0 3 1"));
    assert_eq!(field(&out, "Square"), Some(SQUARE));
    assert_eq!(field(&out, "Plaintext"), Some(letters.as_str()));
}

#[test]
fn test_cli_square_needs_an_order() {
    let ctx = TestContext::new();
    let (ct, _) = adfgvx_ciphertext(&[1, 0]);
    let output = ctx.run(&["square", "--text", &ct, "--iterations", "1"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_vigenere_sweep_solves_the_layer() {
    let ctx = TestContext::new();
    let order = TranspositionKey::new(vec![2, 0, 3, 1]).unwrap();
    let layered = vigenere::encrypt(&sample_letters(), "LEMON").unwrap();
    let ct = String::from_utf8(columnar(layered.as_bytes(), &order)).unwrap();

    let output = ctx.run(&[
        "vigenere",
        "--text",
        &ct,
        "--min-width",
        "4",
        "--max-width",
        "4",
        "--threshold",
        "0.065",
        "--language",
        "english",
    ]);
    assert!(output.status.success(), "{:?}", output);

    let out = stdout(&output);
    assert_eq!(field(&out, "Order"), Some("2 0 3 1"));
    assert_eq!(field(&out, "Key"), Some("LEMON"));
    assert_eq!(field(&out, "Plaintext"), Some(sample_letters().as_str()));
}

#[test]
fn test_cli_vigenere_rejects_an_empty_width_range() {
    let ctx = TestContext::new();
    let output = ctx.run(&["vigenere", "--text", "ABC", "--min-width", "5", "--max-width", "4"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_presets_lists_every_preset() {
    let output = Command::new(BIN)
        .arg("presets")
        .output()
        .expect("Failed to execute binary");
    assert!(output.status.success(), "{:?}", output);

    let out = stdout(&output);
    for name in ["playfair", "transposition-lane", "square-refine", "joint"] {
        assert!(out.contains(name), "missing {} in:\n{}", name, out);
    }
    assert!(out.contains("tolerant"));
}

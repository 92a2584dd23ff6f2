//! # Database Loader
//!
//! Text-format loader for uncertain transaction files.
//!
//! One transaction per line, whitespace-separated `item:probability`
//! tokens; `#` starts a comment line. A blank line is an empty transaction,
//! so line numbers map one-to-one onto transaction ids.
//!
//! ```text
//! # groceries.udb
//! bread:0.9 milk:0.75
//! bread:1.0
//! milk:0.4 cheese:0.6
//! ```

use galena_core::{GalenaError, MemoryDatabase, Transaction, Vocabulary};
use std::path::Path;

/// Load an uncertain transaction database from a text file.
pub fn load_database(path: &Path) -> Result<MemoryDatabase, GalenaError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| GalenaError::Io(format!("cannot read {}: {e}", path.display())))?;
    parse_database(&content)
}

/// Parse the text format. Errors carry the 1-based line number.
pub fn parse_database(content: &str) -> Result<MemoryDatabase, GalenaError> {
    let mut vocab = Vocabulary::new();
    let mut transactions: Vec<Transaction> = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }

        let mut transaction: Transaction = Vec::new();
        for token in line.split_whitespace() {
            let (name, prob) = token.rsplit_once(':').ok_or_else(|| {
                GalenaError::InvalidData(format!(
                    "line {line_no}: token '{token}' is not item:probability"
                ))
            })?;
            if name.is_empty() {
                return Err(GalenaError::InvalidData(format!(
                    "line {line_no}: empty item name in '{token}'"
                )));
            }
            let prob: f64 = prob.parse().map_err(|_| {
                GalenaError::InvalidData(format!(
                    "line {line_no}: '{prob}' is not a probability"
                ))
            })?;
            if !(prob > 0.0 && prob <= 1.0) {
                return Err(GalenaError::InvalidData(format!(
                    "line {line_no}: probability {prob} outside (0, 1]"
                )));
            }
            let item = vocab.intern(name);
            if transaction.iter().any(|&(existing, _)| existing == item) {
                return Err(GalenaError::InvalidData(format!(
                    "line {line_no}: item '{name}' listed twice"
                )));
            }
            transaction.push((item, prob));
        }
        transactions.push(transaction);
    }

    MemoryDatabase::new(vocab, transactions)
}

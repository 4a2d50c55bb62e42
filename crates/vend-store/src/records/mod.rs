//! # Record Formats
//!
//! Line formats of the two data files.
//!
//! ## Files
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Currency.txt                      Stock.txt                            │
//! │  ────────────                      ─────────                            │
//! │  # denomination count              # name price count                   │
//! │  1 25                              Pepsi 15 10                          │
//! │  5 10                              Chipsy Cheese 7 12                   │
//! │  10 4                              Molto 5 0                            │
//! │                                                                         │
//! │  Both: one record per line, blank lines and `#` comments ignored.      │
//! │  Stock: the LAST two tokens are price and count, the rest is the name. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`till`] - `Currency.txt` ⇄ [`vend_core::Till`]
//! - [`stock`] - `Stock.txt` ⇄ [`vend_core::Catalog`]

pub mod stock;
pub mod till;

/// Numbered lines that carry a record: 1-based line number and trimmed text.
pub(crate) fn records(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_skip_blank_and_comments() {
        let text = "# header\n\n  1 5  \n#2 3\n10 1\n";
        let lines: Vec<(usize, &str)> = records(text).collect();
        assert_eq!(lines, vec![(3, "1 5"), (5, "10 1")]);
    }
}

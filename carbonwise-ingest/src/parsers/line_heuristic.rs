//! Positional line parser for extracted statement text.
//!
//! Each line is split on whitespace. A line with three or more tokens is read as
//!   <date> <description words ...> <amount>
//! e.g.
//!   2024-01-05  Coffee Shop Purchase   4.50
//! Lines with fewer tokens (headers, page numbers, blank lines) are dropped.
//!
//! The parser knows nothing about dates or currencies: the first token is taken
//! as the date verbatim and the last token must be a bare number.

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};
use crate::types::Transaction;

const MIN_TOKENS: usize = 3;

/// What to do when a qualifying line has a non-numeric last token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountPolicy {
    /// Fail the whole parse on the first bad amount.
    #[default]
    Abort,
    /// Keep going and report the bad lines separately.
    Skip,
}

/// A qualifying line whose amount token could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedLine {
    /// 1-based line number within the extracted text.
    pub line: usize,
    pub text: String,
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineReport {
    pub transactions: Vec<Transaction>,
    pub rejected: Vec<RejectedLine>,
}

/// Drop `_` digit separators (`1_000`). An underscore not between two digits
/// makes the token invalid.
fn strip_digit_separators(token: &str) -> Option<String> {
    let bytes = token.as_bytes();
    let mut out = String::with_capacity(token.len());
    for (i, c) in token.char_indices() {
        if c == '_' {
            let before = i.checked_sub(1).map(|j| bytes[j].is_ascii_digit()).unwrap_or(false);
            let after = bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit());
            if !(before && after) {
                return None;
            }
            continue;
        }
        out.push(c);
    }
    Some(out)
}

fn parse_amount(token: &str) -> Option<f64> {
    let cleaned = strip_digit_separators(token)?;
    // Non-finite values have no JSON representation.
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

enum LineOutcome {
    Short,
    Parsed(Transaction),
    BadAmount(String),
}

fn parse_line(line: &str) -> LineOutcome {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < MIN_TOKENS {
        return LineOutcome::Short;
    }

    let last = parts[parts.len() - 1];
    match parse_amount(last) {
        Some(amount) => LineOutcome::Parsed(Transaction {
            date: parts[0].to_string(),
            description: parts[1..parts.len() - 1].join(" "),
            amount,
        }),
        None => LineOutcome::BadAmount(last.to_string()),
    }
}

/// Parse statement text into transactions.
///
/// The first qualifying line with an unparsable amount aborts the whole parse
/// with [`IngestError::AmountFormat`]; nothing parsed so far is returned.
pub fn parse_statement_text(text: &str) -> Result<Vec<Transaction>> {
    let mut out = Vec::new();

    for (idx, line) in text.split('\n').enumerate() {
        match parse_line(line) {
            LineOutcome::Short => continue,
            LineOutcome::Parsed(txn) => out.push(txn),
            LineOutcome::BadAmount(token) => {
                return Err(IngestError::AmountFormat {
                    line: idx + 1,
                    token,
                });
            }
        }
    }

    Ok(out)
}

/// Same as [`parse_statement_text`], but a bad amount only rejects its own line.
pub fn parse_statement_text_lenient(text: &str) -> LineReport {
    let mut report = LineReport::default();

    for (idx, line) in text.split('\n').enumerate() {
        match parse_line(line) {
            LineOutcome::Short => continue,
            LineOutcome::Parsed(txn) => report.transactions.push(txn),
            LineOutcome::BadAmount(token) => report.rejected.push(RejectedLine {
                line: idx + 1,
                text: line.trim().to_string(),
                token,
            }),
        }
    }

    report
}

/// Dispatch on `policy`. Under [`AmountPolicy::Abort`] the rejected list is always empty.
pub fn parse_with_policy(text: &str, policy: AmountPolicy) -> Result<LineReport> {
    match policy {
        AmountPolicy::Abort => Ok(LineReport {
            transactions: parse_statement_text(text)?,
            rejected: Vec::new(),
        }),
        AmountPolicy::Skip => Ok(parse_statement_text_lenient(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_basic_line() {
        let txns = parse_statement_text("2024-01-05 Coffee Shop Purchase 4.50").unwrap();
        assert_eq!(
            txns,
            vec![Transaction {
                date: "2024-01-05".to_string(),
                description: "Coffee Shop Purchase".to_string(),
                amount: 4.50,
            }]
        );
    }

    #[test]
    fn test_short_and_blank_lines_dropped() {
        let text = r#"
ACCOUNT STATEMENT
Page 1

2024-01-05 Rent 1200.00

01/06 -3.25
"#;
        let txns = parse_statement_text(text).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "Rent");
        assert_eq!(txns[0].amount, 1200.0);
    }

    #[test]
    fn test_blank_only_input() {
        assert!(parse_statement_text("  ").unwrap().is_empty());
        assert!(parse_statement_text("").unwrap().is_empty());
    }

    #[test]
    fn test_description_collapses_inner_whitespace() {
        let txns = parse_statement_text("  04/22\tDiscover   E-Payment  8148   -15.00  \r").unwrap();
        assert_eq!(txns[0].date, "04/22");
        assert_eq!(txns[0].description, "Discover E-Payment 8148");
        assert_eq!(txns[0].amount, -15.0);
    }

    #[test]
    fn test_three_token_line_has_single_word_description() {
        let txns = parse_statement_text("2024-02-01 Refund +7").unwrap();
        assert_eq!(txns[0].description, "Refund");
        assert_eq!(txns[0].amount, 7.0);

        let txns = parse_statement_text("2024-02-01 Wire 1e3").unwrap();
        assert_eq!(txns[0].amount, 1000.0);
    }

    #[test]
    fn test_bad_amount_aborts_everything() {
        let text = "2024-01-05 Coffee 4.50\nno amount here\n2024-01-06 Lunch 12.00";
        match parse_statement_text(text) {
            Err(IngestError::AmountFormat { line, token }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "here");
            }
            other => panic!("expected AmountFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_currency_symbols_and_separators_rejected() {
        assert!(parse_statement_text("2024-01-05 Laptop $1,299.00").is_err());
        assert!(parse_statement_text("2024-01-05 Laptop 1,299.00").is_err());
    }

    #[test]
    fn test_underscore_digit_separators() {
        let txns = parse_statement_text("2024-01-05 Bonus 1_000.50").unwrap();
        assert_eq!(txns[0].amount, 1000.5);

        for bad in ["_100", "100_", "1__000", "1_.5", "-_5"] {
            let line = format!("2024-01-05 Bonus {bad}");
            assert!(
                matches!(parse_statement_text(&line), Err(IngestError::AmountFormat { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_finite_amounts_rejected() {
        assert!(matches!(
            parse_statement_text("2024-01-05 Overflow inf"),
            Err(IngestError::AmountFormat { .. })
        ));
        assert!(parse_statement_text("2024-01-05 Weird NaN").is_err());
    }

    #[test]
    fn test_lenient_collects_rejections() {
        let text = "2024-01-05 Coffee 4.50\nno amount here\n2024-01-06 Lunch 12.00\nab";
        let report = parse_statement_text_lenient(text);
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.transactions[1].description, "Lunch");
        assert_eq!(
            report.rejected,
            vec![RejectedLine {
                line: 2,
                text: "no amount here".to_string(),
                token: "here".to_string(),
            }]
        );
    }

    #[test]
    fn test_policy_dispatch() {
        let text = "2024-01-05 Coffee 4.50\nTotal due now";
        assert!(parse_with_policy(text, AmountPolicy::Abort).is_err());

        let report = parse_with_policy(text, AmountPolicy::Skip).unwrap();
        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.rejected.len(), 1);
    }

    #[test]
    fn test_output_never_exceeds_qualifying_lines() {
        let text = "a b\n1 2 3\n\nx y z 4\nsolo\n2024 Fee 0.99";
        let qualifying = text
            .split('\n')
            .filter(|l| l.split_whitespace().count() >= 3)
            .count();
        let txns = parse_statement_text(text).unwrap();
        assert!(txns.len() <= qualifying);
        assert_eq!(txns.len(), 3);
    }

    #[test]
    fn test_description_is_tokens_between_first_and_last() {
        let lines = [
            "2024-03-01 A 1",
            "2024-03-02 Grocery Store #12 Downtown 55.10",
            "d one two three four five 0",
        ];
        for line in lines {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let txns = parse_statement_text(line).unwrap();
            assert_eq!(txns[0].description, tokens[1..tokens.len() - 1].join(" "));
            assert_eq!(txns[0].date, tokens[0]);
        }
    }
}

//! Text-to-transaction parsers.

pub mod line_heuristic;

pub use line_heuristic::{
    parse_statement_text, parse_statement_text_lenient, parse_with_policy, AmountPolicy,
    LineReport, RejectedLine,
};

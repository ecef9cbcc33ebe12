//! Regex support for `=~` / `!~`.
//!
//! Patterns are validated with `regex-syntax` (so backreferences and
//! look-around get a precise message) and compiled to a dense DFA.

use regex_automata::Input;
use regex_automata::dfa::Automaton;
use regex_automata::dfa::dense;
use regex_automata::nfa::thompson;
use regex_syntax::ast;

use super::error::PredicateError;

/// Heap bound for the compiled NFA.
const NFA_SIZE_LIMIT: usize = 1 << 20;
/// Heap bound for the finished DFA.
const DFA_SIZE_LIMIT: usize = 2 << 20;
/// Heap bound for determinization bookkeeping.
const DETERMINIZE_SIZE_LIMIT: usize = 2 << 20;

#[derive(Debug)]
pub(crate) struct Pattern {
    source: String,
    dfa: dense::DFA<Vec<u32>>,
}

impl Pattern {
    pub(crate) fn new(pattern: &str) -> Result<Self, PredicateError> {
        let invalid = |message: String| PredicateError::InvalidRegex {
            pattern: pattern.to_owned(),
            message,
        };

        // Octal off, so `\1` is reported as a backreference.
        ast::parse::ParserBuilder::new()
            .octal(false)
            .build()
            .parse(pattern)
            .map_err(|e| invalid(e.kind().to_string()))?;

        // Size limits reject short patterns with huge automata (`\w{60}`).
        let dfa = dense::DFA::builder()
            .thompson(thompson::Config::new().nfa_size_limit(Some(NFA_SIZE_LIMIT)))
            .configure(
                dense::DFA::config()
                    .start_kind(regex_automata::dfa::StartKind::Unanchored)
                    .dfa_size_limit(Some(DFA_SIZE_LIMIT))
                    .determinize_size_limit(Some(DETERMINIZE_SIZE_LIMIT)),
            )
            .build(pattern)
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            source: pattern.to_owned(),
            dfa,
        })
    }

    /// Unanchored search: true if the pattern matches anywhere in `text`.
    pub(crate) fn is_match(&self, text: &str) -> Result<bool, PredicateError> {
        self.dfa
            .try_search_fwd(&Input::new(text))
            .map(|m| m.is_some())
            .map_err(|e| PredicateError::InvalidRegex {
                pattern: self.source.clone(),
                message: e.to_string(),
            })
    }
}

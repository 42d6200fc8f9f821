use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

use crate::ast::*;
use crate::kb::KnowledgeBase;
use crate::parser::{parse_clause, parse_term, ParseError};
use crate::reasoner::SearchLimits;

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("line {line}: expected a {what} count, found `{found}`")]
    BadCount {
        line: usize,
        what: &'static str,
        found: String,
    },
    #[error("unexpected end of input: expected {expected} {what}, found {found}")]
    Truncated {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },
}

/// Queries and clauses read from a problem file.
///
/// ```text
/// <query count N>
/// <N query lines>
/// <clause count M>
/// <M clause lines>
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub queries: Vec<Term>,
    pub clauses: Vec<Clause>,
}

struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        self.inner.next().map(|(i, l)| (i + 1, l.trim()))
    }

    fn count(&mut self, what: &'static str) -> Result<usize, ProblemError> {
        let (line, text) = self.next_line().ok_or(ProblemError::Truncated {
            what,
            expected: 1,
            found: 0,
        })?;
        text.parse().map_err(|_| ProblemError::BadCount {
            line,
            what,
            found: text.to_string(),
        })
    }

    fn section<T>(
        &mut self,
        what: &'static str,
        n: usize,
        parse: impl Fn(&str) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ProblemError> {
        let mut out = Vec::with_capacity(n);
        for found in 0..n {
            let (line, text) = self.next_line().ok_or(ProblemError::Truncated {
                what,
                expected: n,
                found,
            })?;
            out.push(parse(text).map_err(|source| ProblemError::Parse { line, source })?);
        }
        Ok(out)
    }
}

impl Problem {
    pub fn parse(input: &str) -> Result<Problem, ProblemError> {
        let mut lines = Lines { inner: input.lines().enumerate() };

        let n = lines.count("query")?;
        let queries = lines.section("queries", n, parse_term)?;
        let m = lines.count("clause")?;
        let clauses = lines.section("clauses", m, parse_clause)?;

        debug!(queries = queries.len(), clauses = clauses.len(), "problem parsed");
        Ok(Problem { queries, clauses })
    }

    /// Tell every clause, in file order.
    pub fn knowledge_base(&self, limits: SearchLimits) -> KnowledgeBase {
        let mut kb = KnowledgeBase::with_limits(limits);
        for clause in &self.clauses {
            kb.tell_clause(clause.clone());
        }
        kb
    }

    pub fn solve(&self, kb: &KnowledgeBase) -> Vec<bool> {
        self.queries.iter().map(|q| kb.ask_term(q)).collect()
    }
}

/// One `TRUE` or `FALSE` line per answer.
pub fn write_answers<W: Write>(mut out: W, answers: &[bool]) -> io::Result<()> {
    for &a in answers {
        writeln!(out, "{}", if a { "TRUE" } else { "FALSE" })?;
    }
    out.flush()
}

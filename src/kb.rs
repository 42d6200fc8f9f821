use std::collections::HashMap;

use tracing::debug;

use crate::ast::*;
use crate::parser::{parse_clause, parse_term, ParseError};
use crate::reasoner::{SearchLimits, Solutions};

/// Borrowed view of a stored clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseRef<'kb> {
    Fact(&'kb Term),
    Rule(&'kb Implication),
}

impl ClauseRef<'_> {
    /// Owned copy with variables renamed apart by `tag`.
    pub fn standardize(&self, tag: usize) -> Clause {
        match self {
            ClauseRef::Fact(t) => Clause::Fact((*t).clone()),
            ClauseRef::Rule(imp) => Clause::Implication(imp.standardize(tag)),
        }
    }
}

/// Facts and rules indexed by the predicate of their head.
///
/// Insertion order is kept per predicate and decides the order in which
/// alternatives are tried.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    facts: HashMap<String, Vec<Term>>,
    rules: HashMap<String, Vec<Implication>>,
    limits: SearchLimits,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SearchLimits) -> Self {
        KnowledgeBase { limits, ..Self::default() }
    }

    /// Parse `sentence` and add it as a fact or a rule.
    pub fn tell(&mut self, sentence: &str) -> Result<(), ParseError> {
        let clause = parse_clause(sentence)?;
        self.tell_clause(clause);
        Ok(())
    }

    pub fn tell_clause(&mut self, clause: Clause) {
        debug!(%clause, "tell");
        match clause {
            Clause::Fact(t) => self.facts.entry(t.predicate.clone()).or_default().push(t),
            Clause::Implication(imp) => {
                self.rules.entry(imp.head.predicate.clone()).or_default().push(imp)
            }
        }
    }

    pub fn fact_count(&self) -> usize {
        self.facts.values().map(Vec::len).sum()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn has_fact(&self, goal: &Term) -> bool {
        self.facts
            .get(&goal.predicate)
            .is_some_and(|fs| fs.contains(goal))
    }

    /// Facts for `predicate` followed by rules concluding it, each in the
    /// order they were told.
    pub fn candidates(&self, predicate: &str) -> Vec<ClauseRef<'_>> {
        let facts = self.facts.get(predicate).into_iter().flatten().map(ClauseRef::Fact);
        let rules = self.rules.get(predicate).into_iter().flatten().map(ClauseRef::Rule);
        facts.chain(rules).collect()
    }

    pub fn solutions(&self, query: &Term) -> Solutions<'_> {
        self.solutions_with(query, self.limits)
    }

    pub fn solutions_with(&self, query: &Term, limits: SearchLimits) -> Solutions<'_> {
        Solutions::new(self, query, limits)
    }

    /// Parse `query` and report whether it is provable.
    pub fn ask(&self, query: &str) -> Result<bool, ParseError> {
        let q = parse_term(query)?;
        Ok(self.ask_term(&q))
    }

    pub fn ask_term(&self, query: &Term) -> bool {
        let mut sols = self.solutions(query);
        let proved = sols.next().is_some();
        debug!(%query, proved, instantiations = sols.instantiations(), "ask");
        proved
    }
}

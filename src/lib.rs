mod ast;
mod kb;
mod parser;
mod problem;
mod reasoner;
mod subst;

pub use ast::*;
pub use kb::{ClauseRef, KnowledgeBase};
pub use parser::{parse_clause, parse_term, ParseError};
pub use problem::{write_answers, Problem, ProblemError};
pub use reasoner::{
    unify,
    unify_terms,
    Operand,
    SearchLimits,
    Solutions,
    Substitute,
    FRESH_SEPARATOR,
};
pub use subst::Substitution;

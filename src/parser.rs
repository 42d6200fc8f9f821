use pest::iterators::{Pair, Pairs};
use pest::Parser as PestParser; // <- trait (gives HornParser::parse)
use pest_derive::Parser;
use thiserror::Error;

use crate::ast::*;

#[derive(Parser)]
#[grammar = "horn.pest"]
struct HornParser;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("parse error: {0}")]
    Pest(#[from] Box<pest::error::Error<Rule>>),
    #[error("unexpected rule: {0:?}")]
    Unexpected(Rule),
    #[error("missing {0:?}")]
    Missing(Rule),
    #[error("fact `{0}` must not contain variables")]
    NonGroundFact(Term),
}

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(e: pest::error::Error<Rule>) -> Self {
        ParseError::Pest(Box::new(e))
    }
}

/// Parse a single atom, e.g. a query `Ancestor(Tom,y)`.
pub fn parse_term(input: &str) -> Result<Term, ParseError> {
    let mut pairs = HornParser::parse(Rule::query, input.trim())?;
    let query = expect(&mut pairs, Rule::query)?;
    let mut inner = query.into_inner();
    build_atom(expect(&mut inner, Rule::atom)?)
}

/// Parse a fact or an implication as told to the knowledge base.
pub fn parse_clause(input: &str) -> Result<Clause, ParseError> {
    let mut pairs = HornParser::parse(Rule::sentence, input.trim())?;
    let sentence = expect(&mut pairs, Rule::sentence)?;
    let item = sentence
        .into_inner()
        .next()
        .ok_or(ParseError::Missing(Rule::atom))?;

    match item.as_rule() {
        Rule::implication => Ok(Clause::Implication(build_implication(item)?)),
        Rule::atom => {
            let term = build_atom(item)?;
            if !term.is_ground() {
                return Err(ParseError::NonGroundFact(term));
            }
            Ok(Clause::Fact(term))
        }
        r => Err(ParseError::Unexpected(r)),
    }
}

fn expect<'i>(pairs: &mut Pairs<'i, Rule>, rule: Rule) -> Result<Pair<'i, Rule>, ParseError> {
    let pair = pairs.next().ok_or(ParseError::Missing(rule))?;
    if pair.as_rule() == rule {
        Ok(pair)
    } else {
        Err(ParseError::Unexpected(pair.as_rule()))
    }
}

fn build_implication(pair: Pair<Rule>) -> Result<Implication, ParseError> {
    let mut it = pair.into_inner();
    let conjunction = expect(&mut it, Rule::conjunction)?;
    let body = conjunction
        .into_inner()
        .map(build_atom)
        .collect::<Result<Vec<_>, _>>()?;
    let head = build_atom(expect(&mut it, Rule::atom)?)?;
    Ok(Implication { body, head })
}

fn build_atom(pair: Pair<Rule>) -> Result<Term, ParseError> {
    if pair.as_rule() != Rule::atom {
        return Err(ParseError::Unexpected(pair.as_rule()));
    }
    let mut it = pair.into_inner();
    let predicate = expect(&mut it, Rule::predicate)?.as_str();
    let args = expect(&mut it, Rule::arg_list)?;
    let tokens = args
        .into_inner()
        .filter(|p| p.as_rule() == Rule::arg)
        .map(|p| p.as_str());
    Ok(Term::from_tokens(predicate, tokens))
}

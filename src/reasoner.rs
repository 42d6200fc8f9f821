use std::collections::HashSet;

use rpds::List;
use tracing::{debug, trace};

use crate::ast::*;
use crate::kb::{ClauseRef, KnowledgeBase};
use crate::subst::Substitution;

//
// ------------------------- Unification -------------------------
//

/// Anything the unifier can be asked to match.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Term(&'a Term),
    Arg(&'a Arg),
    Args(&'a [Arg]),
}

/// Unify `a` and `b` under `sub`. `None` means the two cannot be made equal.
pub fn unify(a: Operand<'_>, b: Operand<'_>, sub: &Substitution) -> Option<Substitution> {
    match (a, b) {
        (Operand::Term(x), Operand::Term(y)) => {
            if x == y {
                return Some(sub.clone());
            }
            if x.predicate != y.predicate {
                return None;
            }
            unify(Operand::Args(&x.args), Operand::Args(&y.args), sub)
        }
        (Operand::Arg(x), Operand::Arg(y)) => unify_arg(x, y, sub),
        (Operand::Args(xs), Operand::Args(ys)) => {
            if xs.len() != ys.len() {
                return None;
            }
            let mut s = sub.clone();
            for (x, y) in xs.iter().zip(ys) {
                s = unify_arg(x, y, &s)?;
            }
            Some(s)
        }
        _ => None,
    }
}

pub fn unify_terms(a: &Term, b: &Term, sub: &Substitution) -> Option<Substitution> {
    unify(Operand::Term(a), Operand::Term(b), sub)
}

fn unify_arg(a: &Arg, b: &Arg, sub: &Substitution) -> Option<Substitution> {
    let a = sub.walk(a);
    let b = sub.walk(b);

    match (a, b) {
        _ if a == b => Some(sub.clone()),
        (Arg::Var(v), t) | (t, Arg::Var(v)) => Some(sub.extend(v, t.clone())),
        (Arg::Const(_), Arg::Const(_)) => None,
    }
}

//
// ------------------------- Instantiation -------------------------
//

/// Replace bound variables by their values.
pub trait Substitute {
    fn substitute(&self, sub: &Substitution) -> Self;
}

impl Substitute for Arg {
    fn substitute(&self, sub: &Substitution) -> Self {
        sub.walk(self).clone()
    }
}

impl Substitute for Term {
    fn substitute(&self, sub: &Substitution) -> Self {
        Term {
            predicate: self.predicate.clone(),
            args: self.args.iter().map(|a| a.substitute(sub)).collect(),
        }
    }
}

impl<T: Substitute> Substitute for Vec<T> {
    fn substitute(&self, sub: &Substitution) -> Self {
        self.iter().map(|t| t.substitute(sub)).collect()
    }
}

impl Substitution {
    pub fn apply<T: Substitute>(&self, t: &T) -> T {
        t.substitute(self)
    }
}

//
// ------------------------- Freshening -------------------------
//

/// Separator between a variable's name and its freshening tag. The clause
/// grammar never produces it, so renamed variables cannot clash with
/// user-written ones.
pub const FRESH_SEPARATOR: char = '#';

fn fresh_arg(arg: &Arg, tag: usize) -> Arg {
    match arg {
        Arg::Var(v) => Arg::Var(format!("{v}{FRESH_SEPARATOR}{tag}")),
        Arg::Const(_) => arg.clone(),
    }
}

fn fresh_term(t: &Term, tag: usize) -> Term {
    Term {
        predicate: t.predicate.clone(),
        args: t.args.iter().map(|a| fresh_arg(a, tag)).collect(),
    }
}

impl Implication {
    /// Rename every variable of the rule apart using `tag`.
    pub fn standardize(&self, tag: usize) -> Implication {
        Implication {
            body: self.body.iter().map(|t| fresh_term(t, tag)).collect(),
            head: fresh_term(&self.head, tag),
        }
    }
}

impl Clause {
    /// Facts are ground and come back unchanged.
    pub fn standardize(&self, tag: usize) -> Clause {
        match self {
            Clause::Fact(_) => self.clone(),
            Clause::Implication(imp) => Clause::Implication(imp.standardize(tag)),
        }
    }
}

//
// ------------------------- Backward chaining -------------------------
// Depth-first SLD search driven by an explicit stack of choice points.
// A choice point is an OR node (alternatives for one goal); the goal
// continuation is the pending AND conjunction.
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Goals this deep in the proof tree fail. `None` searches without bound.
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone)]
struct Goal {
    term: Term,
    depth: usize,
}

#[derive(Debug, Clone)]
struct State {
    goals: List<Goal>,
    theta: Substitution,
}

struct ChoicePoint<'kb> {
    goal: Term,
    depth: usize,
    rest: List<Goal>,
    theta: Substitution,
    direct_fact: bool,
    candidates: std::vec::IntoIter<ClauseRef<'kb>>,
}

/// Lazy stream of substitutions proving a query.
///
/// Each call to `next` resumes the search where the previous answer left it.
/// Dropping the stream abandons the rest of the search tree.
pub struct Solutions<'kb> {
    kb: &'kb KnowledgeBase,
    limits: SearchLimits,
    visited: HashSet<Term>,
    next_tag: usize,
    choices: Vec<ChoicePoint<'kb>>,
    pending: Option<State>,
}

impl<'kb> Solutions<'kb> {
    pub fn new(kb: &'kb KnowledgeBase, query: &Term, limits: SearchLimits) -> Self {
        let goal = Goal { term: query.clone(), depth: 0 };
        Solutions {
            kb,
            limits,
            visited: HashSet::new(),
            next_tag: 0,
            choices: Vec::new(),
            pending: Some(State {
                goals: List::new().push_front(goal),
                theta: Substitution::new(),
            }),
        }
    }

    /// Number of rule instantiations performed so far.
    pub fn instantiations(&self) -> usize {
        self.next_tag
    }

    /// AND step: select the first pending conjunct under the current bindings.
    /// Returns the substitution when the conjunction is exhausted.
    fn prove_conjunction(&mut self, state: State) -> Option<Substitution> {
        let (Some(first), Some(rest)) = (state.goals.first(), state.goals.drop_first()) else {
            return Some(state.theta);
        };
        let goal = state.theta.apply(&first.term);
        let depth = first.depth;
        self.prove_goal(goal, depth, rest, state.theta);
        None
    }

    /// OR step: open a choice point over every way of proving `goal`.
    fn prove_goal(&mut self, goal: Term, depth: usize, rest: List<Goal>, theta: Substitution) {
        trace!(%goal, depth, "goal");

        if let Some(max) = self.limits.max_depth {
            if depth >= max {
                debug!(%goal, depth, "depth limit reached");
                return;
            }
        }

        if goal.is_ground() && !self.visited.insert(goal.clone()) {
            trace!(%goal, "already expanded");
            return;
        }

        let direct_fact = self.kb.has_fact(&goal);
        let candidates = self.kb.candidates(&goal.predicate);
        if !direct_fact && candidates.is_empty() {
            return;
        }

        self.choices.push(ChoicePoint {
            goal,
            depth,
            rest,
            theta,
            direct_fact,
            candidates: candidates.into_iter(),
        });
    }

    /// Resume the most recent choice point with its next alternative.
    fn backtrack(&mut self) -> Option<State> {
        while let Some(choice) = self.choices.last_mut() {
            if std::mem::take(&mut choice.direct_fact) {
                return Some(State {
                    goals: choice.rest.clone(),
                    theta: choice.theta.clone(),
                });
            }

            let Some(candidate) = choice.candidates.next() else {
                self.choices.pop();
                continue;
            };

            let tag = self.next_tag;
            self.next_tag += 1;
            let clause = candidate.standardize(tag);

            let Some(theta) = unify_terms(clause.head(), &choice.goal, &choice.theta) else {
                continue;
            };
            trace!(goal = %choice.goal, %clause, "resolved");

            let depth = choice.depth + 1;
            let goals = clause
                .body()
                .iter()
                .rev()
                .fold(choice.rest.clone(), |acc, t| {
                    acc.push_front(Goal { term: t.clone(), depth })
                });
            return Some(State { goals, theta });
        }
        None
    }
}

impl Iterator for Solutions<'_> {
    type Item = Substitution;

    fn next(&mut self) -> Option<Substitution> {
        loop {
            let state = match self.pending.take() {
                Some(state) => state,
                None => self.backtrack()?,
            };
            if let Some(theta) = self.prove_conjunction(state) {
                return Some(theta);
            }
        }
    }
}

use std::fmt;

/// Atomic argument of a literal.
///
/// Classification is syntactic: a token starting with a lowercase letter is a
/// variable, anything else is a constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arg {
    Const(String),
    Var(String),
}

impl Arg {
    pub fn from_token(token: &str) -> Self {
        if token.starts_with(|c: char| c.is_lowercase()) {
            Arg::Var(token.to_string())
        } else {
            Arg::Const(token.to_string())
        }
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Arg::Var(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Arg::Const(n) | Arg::Var(n) => n,
        }
    }
}

/// A literal `Predicate(arg, ...)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    pub predicate: String,
    pub args: Vec<Arg>,
}

impl Term {
    pub fn new(predicate: impl Into<String>, args: Vec<Arg>) -> Self {
        Term { predicate: predicate.into(), args }
    }

    /// Build a term from raw argument tokens, classifying each one.
    pub fn from_tokens<'a>(
        predicate: impl Into<String>,
        tokens: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Term {
            predicate: predicate.into(),
            args: tokens.into_iter().map(Arg::from_token).collect(),
        }
    }

    pub fn is_ground(&self) -> bool {
        !self.args.iter().any(Arg::is_var)
    }

    pub fn vars(&self) -> impl Iterator<Item = &str> {
        self.args.iter().filter_map(|a| match a {
            Arg::Var(v) => Some(v.as_str()),
            Arg::Const(_) => None,
        })
    }
}

/// `body_1 ^ ... ^ body_n => head`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Implication {
    pub body: Vec<Term>,
    pub head: Term,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Fact(Term),
    Implication(Implication),
}

impl Clause {
    pub fn head(&self) -> &Term {
        match self {
            Clause::Fact(t) => t,
            Clause::Implication(imp) => &imp.head,
        }
    }

    pub fn body(&self) -> &[Term] {
        match self {
            Clause::Fact(_) => &[],
            Clause::Implication(imp) => &imp.body,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.predicate)?;
        for (i, a) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{a}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for Implication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.body.iter().enumerate() {
            if i > 0 {
                f.write_str("^")?;
            }
            write!(f, "{t}")?;
        }
        write!(f, " => {}", self.head)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Fact(t) => write!(f, "{t}"),
            Clause::Implication(imp) => write!(f, "{imp}"),
        }
    }
}

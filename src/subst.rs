use std::fmt;

use rpds::HashTrieMap;

use crate::ast::*;

/// Persistent variable bindings.
///
/// `extend` returns a new substitution sharing structure with `self`; a
/// substitution handed to one search branch is never changed by another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    bindings: HashTrieMap<String, Arg>,
}

impl Default for Substitution {
    fn default() -> Self {
        Self::new()
    }
}

impl Substitution {
    pub fn new() -> Self {
        Substitution { bindings: HashTrieMap::new() }
    }

    pub fn len(&self) -> usize {
        self.bindings.size()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Direct binding of `var`, without following chains.
    pub fn get(&self, var: &str) -> Option<&Arg> {
        self.bindings.get(var)
    }

    pub fn extend(&self, var: &str, value: Arg) -> Substitution {
        Substitution {
            bindings: self.bindings.insert(var.to_string(), value),
        }
    }

    /// Follow variable bindings until reaching a constant or an unbound variable.
    pub fn walk<'a>(&'a self, arg: &'a Arg) -> &'a Arg {
        let mut cur = arg;
        while let Arg::Var(v) = cur {
            match self.bindings.get(v.as_str()) {
                Some(next) => cur = next,
                None => break,
            }
        }
        cur
    }

    /// Final value of `var` after following chains, if it is bound at all.
    pub fn resolve(&self, var: &str) -> Option<&Arg> {
        let bound = self.bindings.get(var)?;
        Some(self.walk(bound))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arg)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<(&str, &Arg)> = self.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        f.write_str("{")?;
        for (i, (k, v)) in pairs.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

use crate::statement::Block;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// User-defined instructions of a program, keyed by name.
///
/// Names are unique. Iteration follows definition order so that printing is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct Context {
    indices: HashMap<String, usize>,
    instructions: Vec<(String, Block)>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instruction. An already defined `name` is left untouched and
    /// handed back as the error.
    pub fn define(&mut self, name: String, body: Block) -> Result<(), String> {
        match self.indices.entry(name) {
            Entry::Occupied(entry) => Err(entry.key().clone()),
            Entry::Vacant(entry) => {
                self.instructions.push((entry.key().clone(), body));
                entry.insert(self.instructions.len() - 1);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Block> {
        self.indices
            .get(name)
            .map(|&index| &self.instructions[index].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Block)> {
        self.instructions
            .iter()
            .map(|(name, body)| (name.as_str(), body))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().map(|(name, _)| name.as_str())
    }
}

// Definition order only matters for printing; two contexts holding the same
// instructions are the same context.
impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, body)| other.get(name) == Some(body))
    }
}

impl Eq for Context {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    name: String,
    context: Context,
    body: Block,
}

impl Program {
    pub fn new(name: String, context: Context, body: Block) -> Self {
        Self {
            name,
            context,
            body,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn body(&self) -> &Block {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::Statement;

    fn call(name: &str) -> Block {
        Block::from(vec![Statement::Call(String::from(name))])
    }

    #[test]
    fn define_rejects_duplicates() {
        let mut context = Context::new();
        assert_eq!(context.define(String::from("a"), call("move")), Ok(()));
        assert_eq!(
            context.define(String::from("a"), call("skip")),
            Err(String::from("a"))
        );

        assert_eq!(context.len(), 1);
        assert_eq!(context.get("a"), Some(&call("move")));
    }

    #[test]
    fn iteration_follows_definition_order() {
        let mut context = Context::new();
        for name in ["zig", "alpha", "mid"] {
            context.define(String::from(name), Block::new()).unwrap();
        }

        assert_eq!(context.names().collect::<Vec<_>>(), ["zig", "alpha", "mid"]);
        assert!(context.contains("alpha"));
        assert!(!context.contains("beta"));
    }

    #[test]
    fn equality_ignores_order() {
        let mut first = Context::new();
        first.define(String::from("a"), call("move")).unwrap();
        first.define(String::from("b"), call("skip")).unwrap();

        let mut second = Context::new();
        second.define(String::from("b"), call("skip")).unwrap();
        second.define(String::from("a"), call("move")).unwrap();

        assert_eq!(first, second);

        let mut third = Context::new();
        third.define(String::from("a"), call("move")).unwrap();
        third.define(String::from("b"), call("move")).unwrap();
        assert_ne!(first, third);
    }
}

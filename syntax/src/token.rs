use crate::condition::Condition;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

/// Marks the end of every token stream. Scanning source text can never produce it.
pub const END_OF_INPUT: &str = "### END OF INPUT ###";

/* Keywords */
pub const PROGRAM: &str = "PROGRAM";
pub const IS: &str = "IS";
pub const INSTRUCTION: &str = "INSTRUCTION";
pub const END: &str = "END";
pub const BEGIN: &str = "BEGIN";
pub const IF: &str = "IF";
pub const THEN: &str = "THEN";
pub const ELSE: &str = "ELSE";
pub const WHILE: &str = "WHILE";
pub const DO: &str = "DO";

pub const KEYWORDS: [&str; 10] = [PROGRAM, IS, INSTRUCTION, END, BEGIN, IF, THEN, ELSE, WHILE, DO];

/// Instructions built into the language. They cannot be redefined by a program.
pub const PRIMITIVES: [&str; 5] = ["move", "turnleft", "turnright", "infect", "skip"];

pub fn is_keyword(token: &str) -> bool {
    KEYWORDS.contains(&token)
}

pub fn is_condition(token: &str) -> bool {
    Condition::ALL.iter().any(|c| c.as_str() == token)
}

pub fn is_primitive(token: &str) -> bool {
    PRIMITIVES.contains(&token)
}

pub fn is_identifier(token: &str) -> bool {
    let mut bytes = token.bytes();
    let starts_with_letter = match bytes.next() {
        Some(first) => first.is_ascii_alphabetic(),
        None => false,
    };

    starts_with_letter
        && bytes.all(|c| c.is_ascii_alphanumeric() || c == b'-')
        && !is_keyword(token)
        && !is_condition(token)
}

/// A front-consumable queue of token strings, always terminated by [`END_OF_INPUT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    queue: VecDeque<String>,
}

impl Tokens {
    pub fn new(tokens: Vec<String>) -> Self {
        let mut queue = VecDeque::from(tokens);
        if queue.back().map(String::as_str) != Some(END_OF_INPUT) {
            queue.push_back(String::from(END_OF_INPUT));
        }

        Self { queue }
    }

    pub fn front(&self) -> Option<&str> {
        self.queue.front().map(String::as_str)
    }

    pub fn dequeue(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }
}

impl FromIterator<String> for Tokens {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for Tokens {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(String::from).collect())
    }
}

impl Display for Tokens {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for token in &self.queue {
            writeln!(f, "{token}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_appended_once() {
        let tokens: Tokens = ["BEGIN", "move"].into_iter().collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens.iter().last(), Some(END_OF_INPUT));

        let tokens: Tokens = ["move", END_OF_INPUT].into_iter().collect();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn dequeue_consumes_front() {
        let mut tokens = Tokens::new(vec![String::from("move")]);
        assert_eq!(tokens.front(), Some("move"));
        assert_eq!(tokens.dequeue().as_deref(), Some("move"));
        assert_eq!(tokens.front(), Some(END_OF_INPUT));
        assert_eq!(tokens.dequeue().as_deref(), Some(END_OF_INPUT));
        assert_eq!(tokens.front(), None);
        assert!(tokens.is_empty());
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("move"));
        assert!(is_identifier("turn-around"));
        assert!(is_identifier("step2"));
        assert!(is_identifier("Foo"));

        assert!(!is_identifier(""));
        assert!(!is_identifier("2step"));
        assert!(!is_identifier("-step"));
        assert!(!is_identifier("turn_around"));
        assert!(!is_identifier("WHILE"));
        assert!(!is_identifier("next-is-wall"));
        assert!(!is_identifier("random"));
        assert!(!is_identifier(END_OF_INPUT));
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert!(is_keyword("BEGIN"));
        assert!(!is_keyword("begin"));
        assert!(is_identifier("begin"));
    }

    #[test]
    fn conditions_and_primitives() {
        assert!(is_condition("next-is-not-enemy"));
        assert!(is_condition("true"));
        assert!(!is_condition("NEXT_IS_ENEMY"));
        assert!(is_primitive("infect"));
        assert!(!is_primitive("jump"));
    }
}

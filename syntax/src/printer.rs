use crate::program::Program;
use crate::statement::{Block, Statement};
use crate::token;
use std::fmt::{Display, Formatter, Result, Write};

const INDENT_SIZE: usize = 2;

fn indent(out: &mut impl Write, level: usize) -> Result {
    write!(out, "{:width$}", "", width = level * INDENT_SIZE)
}

impl Block {
    pub fn pretty_print(&self, out: &mut impl Write, level: usize) -> Result {
        for statement in self {
            statement.pretty_print(out, level)?;
        }
        Ok(())
    }
}

impl Statement {
    /// Writes the statement as BL source, one line per token group, indented by `level`.
    ///
    /// BL has no syntax for a bare block, so a [`Statement::Block`] is written as its
    /// children in sequence. Such a statement nested in another block reads back as the
    /// children alone; the parser itself never builds that shape.
    pub fn pretty_print(&self, out: &mut impl Write, level: usize) -> Result {
        match self {
            Statement::Block(block) => block.pretty_print(out, level),
            Statement::If {
                condition,
                then_block,
            } => {
                indent(out, level)?;
                writeln!(out, "{} {condition} {}", token::IF, token::THEN)?;
                then_block.pretty_print(out, level + 1)?;
                indent(out, level)?;
                writeln!(out, "{} {}", token::END, token::IF)
            }
            Statement::IfElse {
                condition,
                then_block,
                else_block,
            } => {
                indent(out, level)?;
                writeln!(out, "{} {condition} {}", token::IF, token::THEN)?;
                then_block.pretty_print(out, level + 1)?;
                indent(out, level)?;
                writeln!(out, "{}", token::ELSE)?;
                else_block.pretty_print(out, level + 1)?;
                indent(out, level)?;
                writeln!(out, "{} {}", token::END, token::IF)
            }
            Statement::While { condition, body } => {
                indent(out, level)?;
                writeln!(out, "{} {condition} {}", token::WHILE, token::DO)?;
                body.pretty_print(out, level + 1)?;
                indent(out, level)?;
                writeln!(out, "{} {}", token::END, token::WHILE)
            }
            Statement::Call(name) => {
                indent(out, level)?;
                writeln!(out, "{name}")
            }
        }
    }
}

impl Program {
    pub fn pretty_print(&self, out: &mut impl Write) -> Result {
        writeln!(out, "{} {} {}", token::PROGRAM, self.name(), token::IS)?;
        writeln!(out)?;

        for (name, body) in self.context().iter() {
            indent(out, 1)?;
            writeln!(out, "{} {name} {}", token::INSTRUCTION, token::IS)?;
            body.pretty_print(out, 2)?;
            indent(out, 1)?;
            writeln!(out, "{} {name}", token::END)?;
            writeln!(out)?;
        }

        writeln!(out, "{}", token::BEGIN)?;
        self.body().pretty_print(out, 1)?;
        writeln!(out, "{} {}", token::END, self.name())
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.pretty_print(f, 0)
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.pretty_print(f, 0)
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.pretty_print(f)
    }
}

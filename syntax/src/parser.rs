use crate::condition::{Condition, UnknownCondition};
use crate::program::{Context, Program};
use crate::statement::{Block, Statement};
use crate::token::{self, END_OF_INPUT, Tokens};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("Expected {expected}, found \"{found}\"")]
    Expected {
        expected: &'static str,
        found: String,
    },
    #[error("Expected statement, found \"{0}\"")]
    ExpectedStatement(String),
    #[error("Expected condition, found \"{0}\"")]
    ExpectedCondition(String),
    #[error("Expected identifier, found \"{0}\"")]
    ExpectedIdentifier(String),
    #[error("Names do not match: \"{open}\" is closed by \"{close}\"")]
    NamesDoNotMatch { open: String, close: String },
    #[error("Instruction \"{0}\" is already defined")]
    DuplicateInstruction(String),
    #[error("Instruction \"{0}\" cannot redefine a primitive instruction")]
    PrimitiveRedefinition(String),
    #[error("Expected end of input, found \"{0}\"")]
    TrailingInput(String),

    /* Caller contract violations */
    #[error(transparent)]
    UnknownCondition(#[from] UnknownCondition),
    #[error("Token stream exhausted, the end of input marker was consumed or missing")]
    ExhaustedInput,
}

impl ParserError {
    /// Whether the error comes from a misused parser rather than from malformed source.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            ParserError::UnknownCondition(_) | ParserError::ExhaustedInput
        )
    }
}

pub type ParserResult<T> = Result<T, ParserError>;

/// Recursive-descent parser over a BL token stream.
///
/// Every parse consumes exactly the tokens it recognizes, and stops at the first error.
/// The end of input marker is never consumed.
pub struct Parser<'a> {
    tokens: &'a mut Tokens,
}

macro_rules! check_token {
    ($parser: ident, $keyword: expr) => {{ $parser.peek()? == $keyword }};
}

macro_rules! match_token {
    ($parser: ident, $keyword: expr) => {{
        if check_token!($parser, $keyword) {
            $parser.advance()?;
            true
        } else {
            false
        }
    }};
}

macro_rules! expect_token {
    ($parser: ident, $keyword: expr) => {{
        if !(match_token!($parser, $keyword)) {
            return Err(ParserError::Expected {
                expected: $keyword,
                found: $parser.peek()?.to_string(),
            });
        }
    }};
}

macro_rules! expect_identifier {
    ($parser: ident) => {{
        let front = $parser.peek()?;
        if !token::is_identifier(front) {
            return Err(ParserError::ExpectedIdentifier(front.to_string()));
        }
        $parser.advance()?
    }};
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a mut Tokens) -> Self {
        Self { tokens }
    }

    /// ```text
    /// Program ::= "PROGRAM" Identifier "IS" { InstructionDef }
    ///             "BEGIN" Block "END" Identifier End-Of-Input
    /// ```
    pub fn parse_program(&mut self) -> ParserResult<Program> {
        expect_token!(self, token::PROGRAM);
        let name = expect_identifier!(self);
        expect_token!(self, token::IS);

        let mut context = Context::new();
        while check_token!(self, token::INSTRUCTION) {
            let (instruction, body) = self.parse_instruction()?;
            context
                .define(instruction, body)
                .map_err(ParserError::DuplicateInstruction)?;
        }

        expect_token!(self, token::BEGIN);
        let body = self.parse_block()?;
        expect_token!(self, token::END);
        self.expect_closing_name(&name)?;

        let front = self.peek()?;
        if front != END_OF_INPUT {
            return Err(ParserError::TrailingInput(front.to_string()));
        }

        debug!(
            program = name.as_str(),
            instructions = context.len(),
            "parsed program"
        );
        Ok(Program::new(name, context, body))
    }

    /// ```text
    /// InstructionDef ::= "INSTRUCTION" Identifier "IS" Block "END" Identifier
    /// ```
    fn parse_instruction(&mut self) -> ParserResult<(String, Block)> {
        expect_token!(self, token::INSTRUCTION);
        let name = expect_identifier!(self);
        if token::is_primitive(&name) {
            return Err(ParserError::PrimitiveRedefinition(name));
        }
        expect_token!(self, token::IS);

        let body = self.parse_block()?;

        expect_token!(self, token::END);
        self.expect_closing_name(&name)?;

        debug!(instruction = name.as_str(), statements = body.len(), "parsed instruction");
        Ok((name, body))
    }

    pub fn parse_statement(&mut self) -> ParserResult<Statement> {
        let front = self.peek()?.to_string();
        trace!(token = front.as_str(), "parsing statement");

        match front.as_str() {
            token::IF => self.parse_if_statement(),
            token::WHILE => self.parse_while_statement(),
            call if token::is_identifier(call) => self.parse_call_statement(),
            _ => Err(ParserError::ExpectedStatement(front.clone())),
        }
    }

    /// Parses statements until `END`, `ELSE` or the end of input, leaving the
    /// terminator in the stream.
    pub fn parse_block(&mut self) -> ParserResult<Block> {
        let mut block = Block::new();

        while !self.is_at_block_end()? {
            block.push(self.parse_statement()?);
        }

        Ok(block)
    }

    /// ```text
    /// IfStmt ::= "IF" Condition "THEN" Block ("ELSE" Block)? "END" "IF"
    /// ```
    fn parse_if_statement(&mut self) -> ParserResult<Statement> {
        expect_token!(self, token::IF);
        let condition = self.parse_condition()?;
        expect_token!(self, token::THEN);

        let then_block = self.parse_block()?;

        let statement = if match_token!(self, token::ELSE) {
            let else_block = self.parse_block()?;
            Statement::IfElse {
                condition,
                then_block,
                else_block,
            }
        } else if check_token!(self, token::END) {
            Statement::If {
                condition,
                then_block,
            }
        } else {
            return Err(ParserError::Expected {
                expected: "ELSE or END",
                found: self.peek()?.to_string(),
            });
        };

        expect_token!(self, token::END);
        expect_token!(self, token::IF);

        Ok(statement)
    }

    /// ```text
    /// WhileStmt ::= "WHILE" Condition "DO" Block "END" "WHILE"
    /// ```
    fn parse_while_statement(&mut self) -> ParserResult<Statement> {
        expect_token!(self, token::WHILE);
        let condition = self.parse_condition()?;
        expect_token!(self, token::DO);

        let body = self.parse_block()?;

        expect_token!(self, token::END);
        expect_token!(self, token::WHILE);

        Ok(Statement::While { condition, body })
    }

    fn parse_call_statement(&mut self) -> ParserResult<Statement> {
        let name = expect_identifier!(self);
        Ok(Statement::Call(name))
    }

    fn parse_condition(&mut self) -> ParserResult<Condition> {
        let front = self.peek()?;
        if !token::is_condition(front) {
            return Err(ParserError::ExpectedCondition(front.to_string()));
        }

        let condition = self.advance()?;
        Ok(Condition::resolve(&condition)?)
    }

    /// Consumes the name closing a program or instruction and checks it against `open`.
    fn expect_closing_name(&mut self, open: &str) -> ParserResult<()> {
        let front = self.peek()?;
        if front == END_OF_INPUT {
            return Err(ParserError::ExpectedIdentifier(front.to_string()));
        }

        let close = self.advance()?;
        if close != open {
            return Err(ParserError::NamesDoNotMatch {
                open: open.to_string(),
                close,
            });
        }
        Ok(())
    }

    fn is_at_block_end(&self) -> ParserResult<bool> {
        let front = self.peek()?;
        Ok(front == token::END || front == token::ELSE || front == END_OF_INPUT)
    }

    fn peek(&self) -> ParserResult<&str> {
        self.tokens.front().ok_or(ParserError::ExhaustedInput)
    }

    fn advance(&mut self) -> ParserResult<String> {
        self.tokens.dequeue().ok_or(ParserError::ExhaustedInput)
    }
}

pub fn parse_program(tokens: &mut Tokens) -> ParserResult<Program> {
    Parser::new(tokens).parse_program()
}

pub fn parse_statement(tokens: &mut Tokens) -> ParserResult<Statement> {
    Parser::new(tokens).parse_statement()
}

pub fn parse_block(tokens: &mut Tokens) -> ParserResult<Block> {
    Parser::new(tokens).parse_block()
}

use crate::token::Tokens;
use std::io::{BufRead, ErrorKind};

const COMMENT_START: u8 = b'#';

#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    #[error("Failed to read token in line {0}, not an UTF-8 sequence")]
    NotUtf8(usize),
    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScannerResult<T> = Result<T, ScannerError>;

/// Splits BL source into token strings.
///
/// Words (a letter followed by letters, digits or `-`) become one token each, and so
/// does every run of other non-blank characters. Whitespace and `#` comments are dropped.
pub struct Scanner<R: BufRead> {
    reader: R,
    line: usize,
    current_byte: Option<u8>,
    read_error: Option<std::io::Error>,

    started: bool,
    failed: bool,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Scanner {
            reader,
            line: 1,
            current_byte: None,
            read_error: None,
            started: false,
            failed: false,
        }
    }

    fn scan_token(&mut self) -> Option<ScannerResult<String>> {
        let Some(current) = self.consume_whitespace() else {
            return self.take_read_error().map(Err);
        };
        let lexeme = vec![current];

        let token = if current.is_ascii_alphabetic() {
            self.consume_word(lexeme)
        } else {
            self.consume_other(lexeme)
        };

        // A token cut short by a failing reader must not be handed out.
        match self.take_read_error() {
            Some(e) => Some(Err(e)),
            None => Some(token),
        }
    }

    fn take_read_error(&mut self) -> Option<ScannerError> {
        let e = self.read_error.take()?;
        self.failed = true;
        Some(ScannerError::Io(e))
    }

    fn add_token(&self, lexeme: Vec<u8>) -> ScannerResult<String> {
        String::from_utf8(lexeme).map_err(|_| ScannerError::NotUtf8(self.line))
    }

    fn consume_word(&mut self, mut lexeme: Vec<u8>) -> ScannerResult<String> {
        while let Some(c) = self.current_byte {
            if !c.is_ascii_alphanumeric() && c != b'-' {
                break;
            }
            lexeme.push(c);
            self.advance();
        }

        self.add_token(lexeme)
    }

    fn consume_other(&mut self, mut lexeme: Vec<u8>) -> ScannerResult<String> {
        while let Some(c) = self.current_byte {
            if c.is_ascii_whitespace() || c.is_ascii_alphabetic() || c == COMMENT_START {
                break;
            }
            lexeme.push(c);
            self.advance();
        }

        self.add_token(lexeme)
    }

    fn consume_whitespace(&mut self) -> Option<u8> {
        loop {
            let current = self.advance()?;
            match current {
                b'\n' => {
                    self.line += 1;
                }
                b' ' | b'\t' | b'\r' => {}
                // Comments run until the end of the line.
                COMMENT_START => {
                    while let Some(current) = self.current_byte {
                        if current == b'\n' {
                            break;
                        }
                        self.advance();
                    }
                }

                _ => break Some(current),
            }
        }
    }

    fn advance(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.reader.read_exact(&mut buf) {
            Ok(_) => {
                let current_byte = self.current_byte.take();

                self.current_byte = Some(buf[0]);
                current_byte
            }
            // The reader is exhausted, but the lookahead byte may still be pending.
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => self.current_byte.take(),
            Err(e) => {
                self.read_error = Some(e);
                self.current_byte = None;
                None
            }
        }
    }

    /// Scans the whole source. The result always ends with [`crate::token::END_OF_INPUT`].
    pub fn scan_tokens(self) -> ScannerResult<Tokens> {
        self.collect::<ScannerResult<Vec<String>>>()
            .map(Tokens::new)
    }
}

impl<R: BufRead> Iterator for Scanner<R> {
    type Item = ScannerResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if !self.started {
            let mut buf = [0u8; 1];
            match self.reader.read_exact(&mut buf) {
                Ok(_) => self.current_byte = Some(buf[0]),
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => return None,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(ScannerError::Io(e)));
                }
            }

            self.started = true;
        }
        self.scan_token()
    }
}

impl<R: BufRead> std::iter::FusedIterator for Scanner<R> {}

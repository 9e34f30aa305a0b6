use std::ops::Range;
use thiserror::Error;

#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    SOF,
    END_OF_INPUT,
    BANG,
    AMP,
    PAREN_L,
    PAREN_R,
    COLON,
    EQUALS,
    AT,
    BRACKET_L,
    BRACKET_R,
    BRACE_L,
    PIPE,
    BRACE_R,
    NAME,
    INT,
    FLOAT,
    STRING,
    BLOCK_STRING,
}

#[derive(Debug, Error)]
#[error("{message} ({position})")]
pub struct LexerError {
    pub message: String,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub value: Option<String>,
    pub position: Position,
}

impl Token {
    fn simple_token(kind: TokenKind, index: usize, position: Position) -> Token {
        Token {
            kind,
            start: index,
            end: index + 1,
            value: None,
            position,
        }
    }
}

/// Pull lexer over a source string. It always holds exactly one current token,
/// starting with `SOF` and ending on a sticky `END_OF_INPUT`.
#[derive(Debug)]
pub struct Lexer {
    chars: Vec<char>,
    line_starts: Vec<usize>,
    current_index: usize,
    token: Token,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        let chars: Vec<char> = source.chars().collect();
        let mut line_starts = vec![0];
        for (index, c) in chars.iter().enumerate() {
            if *c == '\n' {
                line_starts.push(index + 1);
            }
        }
        Lexer {
            chars,
            line_starts,
            current_index: 0,
            token: Token {
                kind: TokenKind::SOF,
                start: 0,
                end: 0,
                value: None,
                position: Position { line: 1, column: 1 },
            },
        }
    }

    /// Every token after `SOF`, up to and including `END_OF_INPUT`.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            lexer.advance()?;
            tokens.push(lexer.current_token().clone());
            if lexer.current_token().kind == TokenKind::END_OF_INPUT {
                return Ok(tokens);
            }
        }
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    /// The token after the current one, without consuming anything.
    pub fn lookahead(&self) -> Result<Token, LexerError> {
        if self.token.kind == TokenKind::END_OF_INPUT {
            return Ok(self.token.clone());
        }
        self.next_token(self.current_index)
    }

    /// Moves to the next token and hands back the one that was current.
    pub fn advance(&mut self) -> Result<Token, LexerError> {
        if self.token.kind == TokenKind::END_OF_INPUT {
            return Ok(self.token.clone());
        }
        let next = self.next_token(self.current_index)?;
        self.current_index = next.end;
        Ok(std::mem::replace(&mut self.token, next))
    }

    fn next_token(&self, from: usize) -> Result<Token, LexerError> {
        let index = self.position_after_ignored(from);
        if index >= self.chars.len() {
            return Ok(Token::simple_token(
                TokenKind::END_OF_INPUT,
                self.chars.len(),
                self.position(self.chars.len()),
            ));
        }
        self.read_token(index)
    }

    fn position(&self, index: usize) -> Position {
        let line = match self.line_starts.binary_search(&index) {
            Ok(line) => line,
            Err(line) => line - 1,
        };
        Position {
            line: line + 1,
            column: index - self.line_starts[line] + 1,
        }
    }

    fn error(&self, index: usize, message: String) -> LexerError {
        LexerError {
            message,
            position: self.position(index),
        }
    }

    fn position_after_ignored(&self, from: usize) -> usize {
        let mut index = from;
        while let Some(c) = self.chars.get(index) {
            match c {
                '\u{0020}' | '\u{0009}' | '\u{feff}' | ',' | '\n' | '\r' => index += 1,
                '#' => index += 1 + self.count_while(index + 1, |c| *c != '\n' && *c != '\r'),
                _ => break,
            }
        }
        index
    }

    fn count_while<F>(&self, start: usize, while_fn: F) -> usize
    where
        F: Fn(&char) -> bool,
    {
        self.chars[start.min(self.chars.len())..]
            .iter()
            .take_while(|c| while_fn(*c))
            .count()
    }

    fn range_string(&self, range: Range<usize>) -> String {
        self.chars[range].iter().collect()
    }

    fn read_token(&self, index: usize) -> Result<Token, LexerError> {
        let c = self.chars[index];
        let position = self.position(index);
        let simple = |kind: TokenKind| -> Result<Token, LexerError> {
            Ok(Token::simple_token(kind, index, position))
        };
        match c {
            '{' => simple(TokenKind::BRACE_L),
            '}' => simple(TokenKind::BRACE_R),
            '!' => simple(TokenKind::BANG),
            '|' => simple(TokenKind::PIPE),
            ':' => simple(TokenKind::COLON),
            '[' => simple(TokenKind::BRACKET_L),
            ']' => simple(TokenKind::BRACKET_R),
            '@' => simple(TokenKind::AT),
            '&' => simple(TokenKind::AMP),
            '(' => simple(TokenKind::PAREN_L),
            ')' => simple(TokenKind::PAREN_R),
            '=' => simple(TokenKind::EQUALS),
            '"' if self.is_triple_quote(index) => self.read_block_string(index),
            '"' => self.read_string(index),
            c if is_name_start(c) => Ok(self.read_name(index)),
            '0'..='9' | '-' => self.read_number(index),
            '$' => Err(self.error(index, String::from("variables are not supported"))),
            '.' if self.chars[index..].starts_with(&['.', '.', '.']) => {
                Err(self.error(index, String::from("fragment spreads are not supported")))
            }
            _ => Err(self.error(
                index,
                format!("unexpected character '{}'", c.escape_unicode()),
            )),
        }
    }

    fn read_name(&self, index: usize) -> Token {
        let length = self.count_while(index, |c| is_name_start(*c) || c.is_ascii_digit());
        Token {
            kind: TokenKind::NAME,
            start: index,
            end: index + length,
            value: Some(self.range_string(index..index + length)),
            position: self.position(index),
        }
    }

    fn read_number(&self, start: usize) -> Result<Token, LexerError> {
        let mut index = start;
        let mut is_float = false;
        if self.char_equal_at(index, '-') {
            index += 1;
        }
        if self.char_equal_at(index, '0') {
            index += 1;
            if let Some(c) = self.chars.get(index).filter(|c| c.is_ascii_digit()) {
                return Err(self.error(index, format!("invalid number, unexpected digit after 0: '{}'", c)));
            }
        } else {
            index = self.read_digits(index)?;
        }
        if self.char_equal_at(index, '.') {
            is_float = true;
            index = self.read_digits(index + 1)?;
        }
        if self.char_equal_at(index, 'e') || self.char_equal_at(index, 'E') {
            is_float = true;
            index += 1;
            if self.char_equal_at(index, '+') || self.char_equal_at(index, '-') {
                index += 1;
            }
            index = self.read_digits(index)?;
        }
        if let Some(c) = self.chars.get(index).filter(|c| **c == '.' || is_name_start(**c)) {
            return Err(self.error(index, format!("invalid number, unexpected '{}'", c)));
        }
        Ok(Token {
            kind: if is_float {
                TokenKind::FLOAT
            } else {
                TokenKind::INT
            },
            start,
            end: index,
            value: Some(self.range_string(start..index)),
            position: self.position(start),
        })
    }

    fn read_digits(&self, start: usize) -> Result<usize, LexerError> {
        match self.chars.get(start) {
            Some(c) if c.is_ascii_digit() => {
                Ok(start + self.count_while(start, |c| c.is_ascii_digit()))
            }
            Some(c) => Err(self.error(start, format!("invalid number, expected digit but got '{}'", c))),
            None => Err(self.error(
                start,
                String::from("invalid number, expected digit but got end of input"),
            )),
        }
    }

    fn read_string(&self, start: usize) -> Result<Token, LexerError> {
        let mut value = String::new();
        let mut index = start + 1;
        while let Some(&c) = self.chars.get(index) {
            match c {
                '"' => {
                    return Ok(Token {
                        kind: TokenKind::STRING,
                        start,
                        end: index + 1,
                        value: Some(value),
                        position: self.position(start),
                    })
                }
                '\\' => {
                    let (escaped, length) = self.read_escape(index)?;
                    value.push(escaped);
                    index += length;
                }
                '\n' | '\r' => break,
                c if c < '\u{0020}' && c != '\u{0009}' => {
                    return Err(self.error(index, format!("invalid character within string: {:?}", c)))
                }
                c => {
                    value.push(c);
                    index += 1;
                }
            }
        }
        Err(self.error(start, String::from("unterminated string")))
    }

    fn read_escape(&self, index: usize) -> Result<(char, usize), LexerError> {
        let escaped = match self.chars.get(index + 1) {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{0008}',
            Some('f') => '\u{000c}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') if index + 6 <= self.chars.len() => {
                let hex = self.range_string(index + 2..index + 6);
                return u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .map(|c| (c, 6))
                    .ok_or_else(|| self.error(index, format!("invalid unicode escape \\u{}", hex)));
            }
            _ => return Err(self.error(index, String::from("invalid escape sequence"))),
        };
        Ok((escaped, 2))
    }

    fn read_block_string(&self, start: usize) -> Result<Token, LexerError> {
        let mut index = start + 3;
        let mut chunk_start = index;
        let mut raw_value = String::new();
        while index < self.chars.len() {
            if self.is_triple_quote(index) {
                raw_value.push_str(&self.range_string(chunk_start..index));
                return Ok(Token {
                    kind: TokenKind::BLOCK_STRING,
                    start,
                    end: index + 3,
                    value: Some(block_string_value(&raw_value)),
                    position: self.position(start),
                });
            }
            let c = self.chars[index];
            if c < '\u{0020}' && c != '\u{0009}' && c != '\u{000a}' && c != '\u{000d}' {
                return Err(self.error(index, format!("invalid character within string: {:?}", c)));
            }
            if c == '\\' && self.is_triple_quote(index + 1) {
                raw_value.push_str(&self.range_string(chunk_start..index));
                raw_value.push_str("\"\"\"");
                index += 4;
                chunk_start = index;
            } else {
                index += 1;
            }
        }
        Err(self.error(start, String::from("unterminated block string")))
    }

    fn is_triple_quote(&self, index: usize) -> bool {
        self.char_equal_at(index, '"')
            && self.char_equal_at(index + 1, '"')
            && self.char_equal_at(index + 2, '"')
    }

    fn char_equal_at(&self, index: usize, c: char) -> bool {
        self.chars.get(index) == Some(&c)
    }
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Strips the common indentation and the leading/trailing blank lines of a
/// block string.
fn block_string_value(raw: &str) -> String {
    let lines: Vec<&str> = raw.split("\r\n").flat_map(|l| l.split(['\n', '\r'])).collect();
    let is_blank = |line: &str| line.chars().all(|c| c == ' ' || c == '\t');
    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !is_blank(line))
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);
    let dedented: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| match i {
            0 => *line,
            _ => line.get(common_indent..).unwrap_or(""),
        })
        .collect();
    let first = dedented.iter().position(|l| !is_blank(l));
    let last = dedented.iter().rposition(|l| !is_blank(l));
    match (first, last) {
        (Some(first), Some(last)) => dedented[first..=last].join("\n"),
        _ => String::new(),
    }
}

use crate::report::Reporter;
use crate::token::{Token, TokenType};
use rustc_hash::FxHashMap;

/// Scans the whole source and returns the token sequence, always terminated
/// by a single Eof token. Lexical errors go to the reporter and scanning
/// carries on with the next character.
pub fn scan(code: &str, reporter: &mut dyn Reporter) -> Vec<Token> {
    Scanner::new(code).scan_tokens(reporter)
}

struct Scanner {
    source: Vec<char>,
    tokens: Vec<Token>,
    keywords: FxHashMap<&'static str, TokenType>,
    start: usize,
    current: usize,
    line: usize,
}

impl Scanner {
    fn new(code: &str) -> Self {
        Scanner {
            source: code.chars().collect(),
            tokens: vec![],
            keywords: keyword_table(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    fn scan_tokens(mut self, reporter: &mut dyn Reporter) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token(reporter);
        }

        self.tokens
            .push(Token::new(TokenType::Eof, "".into(), self.line));
        self.tokens
    }

    fn scan_token(&mut self, reporter: &mut dyn Reporter) {
        let c = self.advance();
        let tok = match c {
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '{' => TokenType::LeftBrace,
            '}' => TokenType::RightBrace,
            ',' => TokenType::Comma,
            '.' => TokenType::Dot,
            '-' => TokenType::Minus,
            '+' => TokenType::Plus,
            ';' => TokenType::Semicolon,
            '*' => TokenType::Star,
            '!' => {
                if self.match_next('=') {
                    TokenType::BangEqual
                } else {
                    TokenType::Bang
                }
            }
            '=' => {
                if self.match_next('=') {
                    TokenType::EqualEqual
                } else {
                    TokenType::Equal
                }
            }
            '<' => {
                if self.match_next('=') {
                    TokenType::LessEqual
                } else {
                    TokenType::Less
                }
            }
            '>' => {
                if self.match_next('=') {
                    TokenType::GreaterEqual
                } else {
                    TokenType::Greater
                }
            }
            '/' => {
                if self.match_next('/') {
                    // A comment runs to the end of the line.
                    while !matches!(self.peek(), Some('\n') | None) {
                        self.advance();
                    }
                    return;
                }
                TokenType::Slash
            }
            ' ' | '\r' | '\t' => return,
            '\n' => {
                self.line += 1;
                return;
            }
            '"' => match self.scan_string(reporter) {
                Some(tok) => tok,
                None => return,
            },
            '0'..='9' => match self.scan_number(reporter) {
                Some(tok) => tok,
                None => return,
            },
            c if is_alpha(c) => self.scan_identifier(),
            c => {
                reporter.error(self.line, &format!("Unexpected character '{c}'"));
                return;
            }
        };

        self.add_token(tok);
    }

    fn scan_string(&mut self, reporter: &mut dyn Reporter) -> Option<TokenType> {
        while self.peek().is_some_and(|c| c != '"') {
            if self.peek() == Some('\n') {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            reporter.error(self.line, "Unterminated string");
            return None;
        }

        // The closing ".
        self.advance();

        let value: String = self.source[self.start + 1..self.current - 1].iter().collect();
        Some(TokenType::String(value.into()))
    }

    fn scan_number(&mut self, reporter: &mut dyn Reporter) -> Option<TokenType> {
        while self.peek().is_some_and(is_digit) {
            self.advance();
        }

        // A fractional part only counts if a digit follows the dot, so that
        // "123." stays a number followed by a Dot token.
        if self.peek() == Some('.') && self.peek_next().is_some_and(is_digit) {
            self.advance();
            while self.peek().is_some_and(is_digit) {
                self.advance();
            }
        }

        let lexeme: String = self.source[self.start..self.current].iter().collect();
        match lexeme.parse() {
            Ok(n) => Some(TokenType::Number(n)),
            Err(_) => {
                // The digit runs above always form a parseable float; if we
                // ever get here the scanner itself is broken.
                reporter.error(self.line, &format!("Unparseable number: {lexeme}"));
                None
            }
        }
    }

    fn scan_identifier(&mut self) -> TokenType {
        while self.peek().is_some_and(is_alphanumeric) {
            self.advance();
        }

        let ident: String = self.source[self.start..self.current].iter().collect();
        match self.keywords.get(ident.as_str()) {
            Some(keyword) => keyword.clone(),
            None => TokenType::Identifier(ident.into()),
        }
    }

    fn add_token(&mut self, data: TokenType) {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        self.tokens.push(Token::new(data, lexeme.into(), self.line));
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    // "match" is a keyword in the metalanguage already.
    fn match_next(&mut self, expected: char) -> bool {
        let res = self.source.get(self.current).is_some_and(|c| *c == expected);
        if res {
            self.current += 1;
        }
        res
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.source.get(self.current + 1).copied()
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

fn keyword_table() -> FxHashMap<&'static str, TokenType> {
    FxHashMap::from_iter([
        ("and", TokenType::And),
        ("class", TokenType::Class),
        ("else", TokenType::Else),
        ("false", TokenType::False),
        ("fun", TokenType::Fun),
        ("for", TokenType::For),
        ("if", TokenType::If),
        ("nil", TokenType::Nil),
        ("or", TokenType::Or),
        ("print", TokenType::Print),
        ("return", TokenType::Return),
        ("super", TokenType::Super),
        ("this", TokenType::This),
        ("true", TokenType::True),
        ("var", TokenType::Var),
        ("while", TokenType::While),
    ])
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || is_digit(c)
}

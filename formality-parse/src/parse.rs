//! Recursive-descent parser for terms.

use crate::{Term, Token};
use alloc::{boxed::Box, format, string::String, string::ToString, vec::Vec};
use core::fmt::{self, Display};
use core::ops::Range;
use logos::Logos;

/// Number of bytes shown around the position of a parse error.
const EXCERPT: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// a specific token was expected
    Expected(&'static str),
    ExpectedTerm,
    ExpectedIdent,
    UnclosedParen,
    TrailingInput,
    InvalidToken,
}

/// Parse error, carrying the part of the input around the error position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    /// byte offset into the input
    pub offset: usize,
    /// input around the offset, with the offset marked by `<<<HERE>>>`
    pub excerpt: String,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Expected(tok) => write!(f, "expected '{}'", tok),
            Self::ExpectedTerm => write!(f, "expected term"),
            Self::ExpectedIdent => write!(f, "expected name"),
            Self::UnclosedParen => write!(f, "unclosed parenthesis"),
            Self::TrailingInput => write!(f, "unexpected input after term"),
            Self::InvalidToken => write!(f, "invalid token"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Parse error, {} at offset {}.", self.kind, self.offset)?;
        write!(f, "This is the relevant code:\n\n{}", self.excerpt)
    }
}

/// Show the input around `offset`, marking the offset.
fn excerpt(src: &str, offset: usize) -> String {
    let mut start = offset.saturating_sub(EXCERPT);
    while !src.is_char_boundary(start) {
        start += 1;
    }
    let mut end = core::cmp::min(offset + EXCERPT, src.len());
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    format!("<<<{}<<<HERE>>>{}>>>", &src[start..offset], &src[offset..end])
}

type Result<T> = core::result::Result<T, Error>;

struct Parser<'s> {
    src: &'s str,
    tokens: Vec<(Token<'s>, Range<usize>)>,
    pos: usize,
}

impl<'s> Parser<'s> {
    fn new(src: &'s str) -> Self {
        let tokens = Token::lexer(src).spanned().collect();
        Self { src, tokens, pos: 0 }
    }

    fn peek(&self) -> Option<Token<'s>> {
        self.tokens.get(self.pos).map(|(tok, _)| *tok)
    }

    /// Byte offset of the next token, or the end of input.
    fn offset(&self) -> usize {
        match self.tokens.get(self.pos) {
            Some((_, span)) => span.start,
            None => self.src.len(),
        }
    }

    fn err_at(&self, kind: ErrorKind, offset: usize) -> Error {
        let excerpt = excerpt(self.src, offset);
        Error {
            kind,
            offset,
            excerpt,
        }
    }

    fn err(&self, kind: ErrorKind) -> Error {
        self.err_at(kind, self.offset())
    }

    /// Consume the next token if it equals the given one.
    fn eat(&mut self, tok: Token) -> bool {
        let eaten = self.peek() == Some(tok);
        if eaten {
            self.pos += 1
        }
        eaten
    }

    fn expect(&mut self, tok: Token, what: &'static str) -> Result<()> {
        if self.eat(tok) {
            Ok(())
        } else {
            Err(self.err(ErrorKind::Expected(what)))
        }
    }

    /// Parse a binder name, which may not carry `'` marks.
    fn ident(&mut self) -> Result<String> {
        match self.peek() {
            Some(Token::Ident(s)) if Token::split_primes(s).1 == 0 => {
                self.pos += 1;
                Ok(s.to_string())
            }
            _ => Err(self.err(ErrorKind::ExpectedIdent)),
        }
    }

    fn boxed(&mut self) -> Result<Box<Term>> {
        Ok(Box::new(self.term()?))
    }

    fn term(&mut self) -> Result<Term> {
        let start = self.offset();
        let tok = match self.peek() {
            Some(tok) => tok,
            None => return Err(self.err(ErrorKind::ExpectedTerm)),
        };
        self.pos += 1;
        match tok {
            Token::LPar => self.appl(start),
            Token::Type => Ok(Term::Type),
            Token::LBrc => {
                let eras = self.eat(Token::Minus);
                let x = self.ident()?;
                self.expect(Token::Colon, ":")?;
                let ty = self.boxed()?;
                self.expect(Token::RBrc, "}")?;
                Ok(Term::Prod(eras, x, ty, self.boxed()?))
            }
            Token::LBrk => {
                let eras = self.eat(Token::Minus);
                let x = self.ident()?;
                if !eras && self.eat(Token::Eq) {
                    let src = self.boxed()?;
                    self.expect(Token::RBrk, "]")?;
                    return Ok(Term::Unbox(x, src, self.boxed()?));
                }
                let ty = if self.eat(Token::Colon) {
                    Some(self.boxed()?)
                } else {
                    None
                };
                self.expect(Token::RBrk, "]")?;
                Ok(Term::Abst(eras, x, ty, self.boxed()?))
            }
            Token::At => {
                let x = self.ident()?;
                self.expect(Token::Colon, ":")?;
                Ok(Term::SelfType(x, self.boxed()?))
            }
            Token::Colon => {
                let ty = self.boxed()?;
                self.expect(Token::Eq, "=")?;
                Ok(Term::SelfIntro(ty, self.boxed()?))
            }
            Token::Tilde => Ok(Term::SelfElim(self.boxed()?)),
            Token::Bar => Ok(Term::BoxIntro(self.boxed()?)),
            Token::Bang => Ok(Term::BoxType(self.boxed()?)),
            Token::Def => {
                let x = self.ident()?;
                let tm = self.boxed()?;
                Ok(Term::Def(x, tm, self.boxed()?))
            }
            Token::Let => {
                let x = self.ident()?;
                let tm = self.boxed()?;
                Ok(Term::Let(x, tm, self.boxed()?))
            }
            Token::Star => Ok(Term::Hole),
            Token::Ident(s) => {
                let (x, primes) = Token::split_primes(s);
                Ok(Term::Var(x.to_string(), primes))
            }
            Token::Error => Err(self.err_at(ErrorKind::InvalidToken, start)),
            _ => Err(self.err_at(ErrorKind::ExpectedTerm, start)),
        }
    }

    /// Parse the rest of an application, after its opening parenthesis.
    fn appl(&mut self, lpar: usize) -> Result<Term> {
        let head = self.term()?;
        let mut args = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.err_at(ErrorKind::UnclosedParen, lpar)),
                Some(Token::RPar) => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {
                    let eras = self.eat(Token::Minus);
                    args.push((eras, self.term()?))
                }
            }
        }
        if args.is_empty() {
            Ok(head)
        } else {
            Ok(Term::Appl(Box::new(head), args))
        }
    }
}

/// Parse a single term, consuming the whole input.
///
/// ~~~
/// # use formality_parse::{parse, ErrorKind, Term};
/// assert_eq!(parse("(f)").unwrap(), Term::Var("f".into(), 0));
/// assert_eq!(parse("(f a").unwrap_err().kind, ErrorKind::UnclosedParen);
/// ~~~
pub fn parse(src: &str) -> Result<Term> {
    let mut parser = Parser::new(src);
    let tm = parser.term()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.err(ErrorKind::TrailingInput));
    }
    Ok(tm)
}

#[test]
fn positive() -> Result<()> {
    parse("Type")?;
    parse("{x : Type} x")?;
    parse("{-x : Type} {y : x} x")?;
    parse("[x : Type] x")?;
    parse("[-x : Type] [y] y")?;
    parse("[x = |Type] !x")?;
    parse("@s : {P : Type} P")?;
    parse(": T = t")?;
    parse("~ t")?;
    parse("(f a -b (g c))")?;
    parse("let x Type x")?;
    parse("def id [A : Type] [-x : A] x -- identity\n(id Type -Type)")?;
    parse("[x : Type] [x : x] x'")?;
    parse("*")?;
    Ok(())
}

#[test]
fn structure() -> Result<()> {
    use alloc::vec;
    let var = |x: &str| Term::Var(x.to_string(), 0);
    let tm = parse("(f a -b)")?;
    let expected = Term::Appl(Box::new(var("f")), vec![(false, var("a")), (true, var("b"))]);
    assert_eq!(tm, expected);

    let tm = parse("[x = e] x''")?;
    let expected = Term::Unbox("x".to_string(), Box::new(var("e")), Box::new(Term::Var("x".to_string(), 2)));
    assert_eq!(tm, expected);

    assert!(matches!(parse("[x] x")?, Term::Abst(false, _, None, _)));
    assert!(matches!(parse("[-x : A] x")?, Term::Abst(true, _, Some(_), _)));
    Ok(())
}

#[test]
fn negative() {
    use ErrorKind::*;
    let kind = |s: &str| parse(s).unwrap_err().kind;
    assert_eq!(kind(""), ExpectedTerm);
    assert_eq!(kind(")"), ExpectedTerm);
    assert_eq!(kind("(a b"), UnclosedParen);
    assert_eq!(kind("{x Type} x"), Expected(":"));
    assert_eq!(kind("{x : Type x"), Expected("}"));
    assert_eq!(kind("[-x = e] x"), Expected("]"));
    assert_eq!(kind("@ : Type"), ExpectedIdent);
    assert_eq!(kind("[x' : Type] x"), ExpectedIdent);
    assert_eq!(kind(": Type Type"), Expected("="));
    assert_eq!(kind("Type Type"), TrailingInput);
    assert_eq!(kind("#"), InvalidToken);
}

#[test]
fn error_excerpt() {
    let err = parse("(f a").unwrap_err();
    assert_eq!(err.offset, 0);
    assert_eq!(err.excerpt, "<<<<<<HERE>>>(f a>>>");

    let err = parse("{x : Type x").unwrap_err();
    assert_eq!(err.offset, 10);
    assert_eq!(err.excerpt, "<<<{x : Type <<<HERE>>>x>>>");
}

#[test]
fn display_roundtrip() -> Result<()> {
    let src = "def id [A : Type] [-x : A] x (id Type -Type)";
    let tm = parse(src)?;
    assert_eq!(parse(&tm.to_string())?, tm);

    let src = "[x = |Type] [y : !x] (y ~ : @s : Type = Type x')";
    let tm = parse(src)?;
    assert_eq!(parse(&tm.to_string())?, tm);
    Ok(())
}

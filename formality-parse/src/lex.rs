use logos::Logos;

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'s> {
    #[token("def")]
    Def,

    #[token("let")]
    Let,

    #[token("Type")]
    Type,

    #[token("(")]
    LPar,

    #[token(")")]
    RPar,

    #[token("[")]
    LBrk,

    #[token("]")]
    RBrk,

    #[token("{")]
    LBrc,

    #[token("}")]
    RBrc,

    #[token(":")]
    Colon,

    #[token("=")]
    Eq,

    #[token("-")]
    Minus,

    #[token("~")]
    Tilde,

    #[token("|")]
    Bar,

    #[token("!")]
    Bang,

    #[token("@")]
    At,

    #[token("*")]
    Star,

    /// Name, possibly followed by `'` marks to skip shadowing binders.
    #[regex("[a-zA-Z0-9_.&]+'*")]
    Ident(&'s str),

    #[error]
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    #[regex(r"--[^\n]*", logos::skip)]
    Error,
}

impl<'s> Token<'s> {
    /// Split an identifier into its name and the number of trailing `'` marks.
    ///
    /// ~~~
    /// # use formality_parse::Token;
    /// assert_eq!(Token::split_primes("x''"), ("x", 2));
    /// assert_eq!(Token::split_primes("succ"), ("succ", 0));
    /// ~~~
    pub fn split_primes(s: &str) -> (&str, usize) {
        let name = s.trim_end_matches('\'');
        (name, s.len() - name.len())
    }
}

#[test]
fn tokens() {
    use alloc::vec::Vec;
    let toks: Vec<_> = Token::lexer("(f -x') -- comment\n Typed def").collect();
    let expected = [
        Token::LPar,
        Token::Ident("f"),
        Token::Minus,
        Token::Ident("x'"),
        Token::RPar,
        Token::Ident("Typed"),
        Token::Def,
    ];
    assert_eq!(toks, expected);
}

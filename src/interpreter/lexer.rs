use std::fmt;

use logos::Logos;

use crate::{
    error::{Error, LexError},
    position::{Position, Span},
};

/// Result type used by the lexer.
pub type LexResult<T> = Result<T, LexError>;

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Logos always takes the longest match, so two-character operators win
/// over their one-character prefixes, and the keyword tokens win over the
/// identifier pattern only when the whole word matches.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    /// Numeric literal tokens, such as `42` or `3.14`.
    ///
    /// At most one decimal point is consumed; `1.2.3` lexes as `1.2`
    /// followed by `.` and `3`.
    #[regex(r"[0-9]+(\.[0-9]*)?", parse_number)]
    Number(f64),
    /// String literal tokens delimited by `"`, `'` or `` ` ``. The quotes are
    /// stripped and the contents kept verbatim.
    #[regex(r#""[^"]*""#, strip_quotes)]
    #[regex(r"'[^']*'", strip_quotes)]
    #[regex(r"`[^`]*`", strip_quotes)]
    String(String),
    /// Identifier tokens; variable or function names such as `x` or `log`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.` and `/* block comments */`, without their markers.
    #[token("//", line_comment)]
    #[token("/*", block_comment)]
    Comment(String),

    /// `let`
    #[token("let")]
    Let,
    /// `var`
    #[token("var")]
    Var,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `function`
    #[token("function")]
    Function,

    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,

    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Equals,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `!`
    #[token("!")]
    Bang,
    /// A lone `&`. No grammar rule accepts it; lexing it as a token makes
    /// `a & b` a parse error at the operator instead of a lex error.
    #[token("&")]
    Ampersand,
    /// A lone `|`, lexed for the same reason as [`Token::Ampersand`].
    #[token("|")]
    Pipe,
    /// `.`
    #[token(".")]
    Dot,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,

    /// End of input. Never matched by logos; appended by [`lexerize`].
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Number(n) => return write!(f, "{n}"),
            Self::String(s) => return write!(f, "\"{s}\""),
            Self::Identifier(name) => return write!(f, "{name}"),
            Self::Comment(text) => return write!(f, "//{text}"),
            Self::Let => "let",
            Self::Var => "var",
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::Function => "function",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::StarAssign => "*=",
            Self::SlashAssign => "/=",
            Self::PercentAssign => "%=",
            Self::AndAnd => "&&",
            Self::OrOr => "||",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equals => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Bang => "!",
            Self::Ampersand => "&",
            Self::Pipe => "|",
            Self::Dot => ".",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Eof => "end of file",
        };
        write!(f, "{text}")
    }
}

/// A token together with the source extent it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// The token kind and, for literals, its value.
    pub token: Token,
    /// Where the token starts and ends.
    pub span:  Span,
}

/// Converts source text into tokens.
///
/// Whitespace is skipped. Comments are kept as [`Token::Comment`] so the
/// parser can collect them. A terminal [`Token::Eof`] is always appended.
/// Lexing stops at the first character that starts no token.
///
/// # Errors
/// Returns the [`LexError`], tagged with `filename`, for the first
/// unrecognized character or unterminated string literal.
///
/// # Example
/// ```
/// use quill::interpreter::lexer::{Token, lexerize};
///
/// let lexemes = lexerize("demo.ql", "let x = 1;").unwrap();
/// let tokens: Vec<_> = lexemes.into_iter().map(|l| l.token).collect();
///
/// assert_eq!(tokens,
///            vec![Token::Let,
///                 Token::Identifier("x".into()),
///                 Token::Equals,
///                 Token::Number(1.0),
///                 Token::Semicolon,
///                 Token::Eof]);
/// ```
pub fn lexerize(filename: &str, source: &str) -> Result<Vec<Lexeme>, Error> {
    let lexemes = tokenize(source).map_err(|e| Error::new(filename, e))?;
    tracing::debug!(filename, tokens = lexemes.len(), "lexed source");
    Ok(lexemes)
}

/// Stage-local lexer entry point used by [`lexerize`].
pub(crate) fn tokenize(source: &str) -> LexResult<Vec<Lexeme>> {
    let mut lexemes = Vec::new();
    let mut cursor = Cursor::new(source);
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let left = cursor.seek(range.start);
        let right = cursor.seek(range.end);
        let span = Span::new(left, right);

        match result {
            Ok(token) => lexemes.push(Lexeme { token, span }),
            Err(()) => {
                let text = lexer.slice();
                return Err(match text.chars().next() {
                               Some(quote @ ('"' | '\'' | '`')) => {
                                   let end = cursor.seek(source.len());
                                   LexError::UnterminatedString { quote,
                                                                  span: Span::new(left, end) }
                               },
                               _ => LexError::UnexpectedCharacter { text: text.to_string(),
                                                                    span },
                           });
            },
        }
    }

    let end = cursor.seek(source.len());
    lexemes.push(Lexeme { token: Token::Eof,
                          span:  Span::new(end, end), });
    Ok(lexemes)
}

/// Walks the source one character at a time to turn logos byte offsets
/// into [`Position`]s. Offsets must be requested in increasing order.
struct Cursor<'s> {
    source:   &'s str,
    byte:     usize,
    position: Position,
}

impl<'s> Cursor<'s> {
    const fn new(source: &'s str) -> Self {
        Self { source,
               byte: 0,
               position: Position::new(0, 0, 0) }
    }

    fn seek(&mut self, byte: usize) -> Position {
        if byte > self.byte {
            for ch in self.source[self.byte..byte].chars() {
                self.position.advance(ch);
            }
            self.byte = byte;
        }
        self.position
    }
}

/// Parses a numeric literal from the current token slice.
///
/// A trailing decimal point (`3.`) is accepted and means `3`.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().trim_end_matches('.').parse().ok()
}

/// Returns the contents of a quoted literal without its delimiters.
fn strip_quotes(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

/// Consumes a `//` comment up to, but not including, the end of the line.
fn line_comment(lex: &mut logos::Lexer<Token>) -> String {
    let rest = lex.remainder();
    let len = rest.find(['\r', '\n']).unwrap_or(rest.len());
    lex.bump(len);
    rest[..len].to_string()
}

/// Consumes a `/* */` comment. An unclosed comment runs to the end of
/// input.
fn block_comment(lex: &mut logos::Lexer<Token>) -> String {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            rest[..end].to_string()
        },
        None => {
            lex.bump(rest.len());
            rest.to_string()
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|l| l.token).collect()
    }

    #[test]
    fn two_character_operators_win_over_single() {
        assert_eq!(tokens("<= >= == != += -= *= /= %= && || < = !"),
                   vec![Token::LessEqual,
                        Token::GreaterEqual,
                        Token::EqualEqual,
                        Token::BangEqual,
                        Token::PlusAssign,
                        Token::MinusAssign,
                        Token::StarAssign,
                        Token::SlashAssign,
                        Token::PercentAssign,
                        Token::AndAnd,
                        Token::OrOr,
                        Token::Less,
                        Token::Equals,
                        Token::Bang,
                        Token::Eof]);
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(tokens("let letter var_ while function functional _x9"),
                   vec![Token::Let,
                        Token::Identifier("letter".into()),
                        Token::Identifier("var_".into()),
                        Token::While,
                        Token::Function,
                        Token::Identifier("functional".into()),
                        Token::Identifier("_x9".into()),
                        Token::Eof]);
    }

    #[test]
    fn second_decimal_point_ends_the_number() {
        assert_eq!(tokens("1.2.3"),
                   vec![Token::Number(1.2), Token::Dot, Token::Number(3.0), Token::Eof]);
    }

    #[test]
    fn strings_keep_their_contents_verbatim() {
        assert_eq!(tokens(r#""a\n" 'b "c"' `d`"#),
                   vec![Token::String(r"a\n".into()),
                        Token::String("b \"c\"".into()),
                        Token::String("d".into()),
                        Token::Eof]);
    }

    #[test]
    fn comments_are_tokens() {
        assert_eq!(tokens("1 // one\n/* two\nlines */ 2"),
                   vec![Token::Number(1.0),
                        Token::Comment(" one".into()),
                        Token::Comment(" two\nlines ".into()),
                        Token::Number(2.0),
                        Token::Eof]);
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let lexemes = tokenize("a\n  bc\n/*x\n*/ d").unwrap();

        assert_eq!(lexemes[0].span, Span::new(Position::new(0, 0, 0), Position::new(1, 0, 1)));
        assert_eq!(lexemes[1].span, Span::new(Position::new(4, 1, 2), Position::new(6, 1, 4)));
        assert_eq!(lexemes[3].span.left, Position::new(14, 3, 3));
        assert_eq!(lexemes[4].token, Token::Eof);
        assert_eq!(lexemes[4].span.left, Position::new(15, 3, 4));
    }

    #[test]
    fn positions_count_characters_not_bytes() {
        let lexemes = tokenize("'é' x").unwrap();

        assert_eq!(lexemes[1].span.left, Position::new(4, 0, 4));
    }

    #[test]
    fn unknown_character_fails_fast() {
        let err = tokenize("let x = 1;\nx # 2").unwrap_err();

        assert_eq!(err,
                   LexError::UnexpectedCharacter { text: "#".into(),
                                                   span: Span::new(Position::new(13, 1, 2),
                                                                   Position::new(14, 1, 3)), });
    }

    #[test]
    fn unterminated_string_is_reported() {
        let err = tokenize("x = \"abc").unwrap_err();

        assert!(matches!(err, LexError::UnterminatedString { quote: '"', .. }));
        assert_eq!(err.span().left, Position::new(4, 0, 4));
    }
}

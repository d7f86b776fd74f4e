//! Parser for pattern snippets embedded in configuration documents.
//!
//! Rule templates and scope imports arrive as short strings inside YAML
//! (`lhs: concat (map f x)`, `- import qualified Data.Map as Map`). This
//! parser turns them into [`Expr`] and [`Import`] values, recording the
//! line/column of every node so diagnostics can point back into the
//! document. It covers the expression subset rewrite patterns actually
//! use: application, infix operators with fixed precedences, lambdas,
//! literals, lists, tuples and operator sections.

use crate::ast::{Expr, ExprKind, Import, Literal, Name};
use crate::loc::Loc;

/// Error produced when a snippet fails to lex or parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    /// What went wrong.
    pub message: String,
    /// 1-based line of the offending position.
    pub line: usize,
    /// 1-based column of the offending position.
    pub column: usize,
}

impl ParseError {
    fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Parses an expression snippet. `file` labels the source in locations.
///
/// # Errors
///
/// Returns an error if the snippet is not a single well-formed expression.
pub fn parse_expr(src: &str, file: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(src, file)?;
    let expr = parser.expr(0)?;
    parser.finish("the expression")?;
    Ok(expr)
}

/// Parses an import declaration snippet. `file` labels the source.
///
/// # Errors
///
/// Returns an error if the snippet is not a single import declaration.
pub fn parse_import(src: &str, file: &str) -> Result<Import, ParseError> {
    let mut parser = Parser::new(src, file)?;
    let import = parser.import()?;
    parser.finish("the import declaration")?;
    Ok(import)
}

// ────────────────────────────────────────────
// Lexer
// ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum TokKind {
    Name(Name),
    Int(i64),
    Str(String),
    Ch(char),
    Op(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Backslash,
    Arrow,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokKind,
    line: usize,
    col: usize,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

fn is_op_char(c: char) -> bool {
    "!#$%&*+./<=>?@^|-~:".contains(c)
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    fn new(src: &str) -> Self {
        Self {
            chars: src.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn lex_name(&mut self) -> TokKind {
        let mut segments: Vec<String> = Vec::new();
        loop {
            let segment = self.ident_segment();
            let upper = segment.chars().next().is_some_and(char::is_uppercase);
            // A dot straight after an upper-case segment continues a
            // qualified name: `Data.List.map`, but not `f.g` or `Foo . bar`.
            if upper
                && self.peek() == Some('.')
                && self.peek_at(1).is_some_and(is_ident_start)
            {
                segments.push(segment);
                self.bump();
                continue;
            }
            return TokKind::Name(Name {
                module: segments.join("."),
                name: segment,
            });
        }
    }

    fn ident_segment(&mut self) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                s.push(c);
                self.bump();
            } else {
                break;
            }
        }
        s
    }

    fn lex_int(&mut self) -> Result<TokKind, ParseError> {
        let (line, col) = (self.line, self.col);
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.bump();
            } else {
                break;
            }
        }
        digits
            .parse::<i64>()
            .map(TokKind::Int)
            .map_err(|_| ParseError::new("integer literal out of range", line, col))
    }

    fn lex_string(&mut self) -> Result<TokKind, ParseError> {
        let (line, col) = (self.line, self.col);
        self.bump();
        let mut s = String::new();
        loop {
            match self.bump() {
                None => return Err(ParseError::new("unterminated string literal", line, col)),
                Some('"') => return Ok(TokKind::Str(s)),
                Some('\\') => s.push(self.escape()?),
                Some(c) => s.push(c),
            }
        }
    }

    fn lex_char(&mut self) -> Result<TokKind, ParseError> {
        let (line, col) = (self.line, self.col);
        self.bump();
        let c = match self.bump() {
            None => {
                return Err(ParseError::new("unterminated character literal", line, col));
            }
            Some('\\') => self.escape()?,
            Some(c) => c,
        };
        match self.bump() {
            Some('\'') => Ok(TokKind::Ch(c)),
            _ => Err(ParseError::new("unterminated character literal", line, col)),
        }
    }

    fn escape(&mut self) -> Result<char, ParseError> {
        let (line, col) = (self.line, self.col);
        match self.bump() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('\\') => Ok('\\'),
            Some('"') => Ok('"'),
            Some('\'') => Ok('\''),
            Some('0') => Ok('\0'),
            Some(c) => Err(ParseError::new(format!("unknown escape `\\{c}`"), line, col)),
            None => Err(ParseError::new("unterminated escape", line, col)),
        }
    }

    fn lex_op(&mut self) -> TokKind {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if is_op_char(c) {
                s.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if s == "->" {
            TokKind::Arrow
        } else {
            TokKind::Op(s)
        }
    }
}

fn lex(src: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    while let Some(c) = lexer.peek() {
        if c.is_whitespace() {
            lexer.bump();
            continue;
        }
        let (line, col) = (lexer.line, lexer.col);
        let kind = if is_ident_start(c) {
            lexer.lex_name()
        } else if c.is_ascii_digit() {
            lexer.lex_int()?
        } else {
            match c {
                '"' => lexer.lex_string()?,
                '\'' => lexer.lex_char()?,
                '(' => {
                    lexer.bump();
                    TokKind::LParen
                }
                ')' => {
                    lexer.bump();
                    TokKind::RParen
                }
                '[' => {
                    lexer.bump();
                    TokKind::LBracket
                }
                ']' => {
                    lexer.bump();
                    TokKind::RBracket
                }
                ',' => {
                    lexer.bump();
                    TokKind::Comma
                }
                '\\' => {
                    lexer.bump();
                    TokKind::Backslash
                }
                _ if is_op_char(c) => lexer.lex_op(),
                _ => {
                    return Err(ParseError::new(
                        format!("unexpected character `{c}`"),
                        line,
                        col,
                    ));
                }
            }
        };
        tokens.push(Token { kind, line, col });
    }
    Ok(tokens)
}

// ────────────────────────────────────────────
// Parser
// ────────────────────────────────────────────

/// Precedence and associativity of an infix operator, Haskell-style.
/// Unknown operators bind tightly and associate left.
fn operator_prec(op: &str) -> (u8, bool) {
    match op {
        "." => (9, true),
        "^" => (8, true),
        "*" | "/" => (7, false),
        "+" | "-" => (6, false),
        ":" | "++" => (5, true),
        "==" | "/=" | "<" | "<=" | ">" | ">=" => (4, false),
        "&&" => (3, true),
        "||" => (2, true),
        ">>" | ">>=" => (1, false),
        "$" => (0, true),
        _ => (9, false),
    }
}

fn describe(kind: &TokKind) -> String {
    match kind {
        TokKind::Name(n) => format!("`{n}`"),
        TokKind::Op(op) => format!("`{op}`"),
        TokKind::Int(n) => format!("`{n}`"),
        TokKind::Str(_) => "string literal".into(),
        TokKind::Ch(_) => "character literal".into(),
        TokKind::LParen => "`(`".into(),
        TokKind::RParen => "`)`".into(),
        TokKind::LBracket => "`[`".into(),
        TokKind::RBracket => "`]`".into(),
        TokKind::Comma => "`,`".into(),
        TokKind::Backslash => "`\\`".into(),
        TokKind::Arrow => "`->`".into(),
    }
}

fn unexpected(tok: &Token, expected: &str) -> ParseError {
    ParseError::new(
        format!("expected {expected}, found {}", describe(&tok.kind)),
        tok.line,
        tok.col,
    )
}

fn starts_atom(kind: &TokKind) -> bool {
    matches!(
        kind,
        TokKind::Name(_)
            | TokKind::Int(_)
            | TokKind::Str(_)
            | TokKind::Ch(_)
            | TokKind::LParen
            | TokKind::LBracket
    )
}

struct Parser<'a> {
    file: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &str, file: &'a str) -> Result<Self, ParseError> {
        Ok(Self {
            file,
            tokens: lex(src)?,
            pos: 0,
        })
    }

    fn peek(&self) -> Option<&TokKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn here(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or((1, 1), |t| (t.line, t.col))
    }

    fn err(&self, message: impl Into<String>) -> ParseError {
        let (line, column) = self.here();
        ParseError::new(message, line, column)
    }

    fn err_eof(&self) -> ParseError {
        self.err("unexpected end of input")
    }

    fn loc_of(&self, tok: &Token) -> Loc {
        Loc::known(self.file, tok.line, tok.col)
    }

    fn finish(&self, what: &str) -> Result<(), ParseError> {
        match self.peek() {
            None => Ok(()),
            Some(kind) => Err(self.err(format!("unexpected {} after {what}", describe(kind)))),
        }
    }

    // -- Expressions --

    fn expr(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.apply()?;
        loop {
            let Some(TokKind::Op(op)) = self.peek() else {
                break;
            };
            let (prec, right_assoc) = operator_prec(op);
            if prec < min_prec {
                break;
            }
            let op = op.clone();
            self.pos += 1;
            let next_min = if right_assoc { prec } else { prec + 1 };
            let rhs = self.expr(next_min)?;
            let loc = lhs.loc.clone();
            lhs = Expr {
                loc,
                kind: ExprKind::Infix(Box::new(lhs), Name::unqualified(op), Box::new(rhs)),
            };
        }
        Ok(lhs)
    }

    fn apply(&mut self) -> Result<Expr, ParseError> {
        if matches!(self.peek(), Some(TokKind::Backslash)) {
            return self.lambda();
        }
        let mut expr = self.atom()?;
        while self.peek().is_some_and(starts_atom) {
            let arg = self.atom()?;
            let loc = expr.loc.clone();
            expr = Expr {
                loc,
                kind: ExprKind::App(Box::new(expr), Box::new(arg)),
            };
        }
        Ok(expr)
    }

    fn lambda(&mut self) -> Result<Expr, ParseError> {
        let Some(backslash) = self.next() else {
            return Err(self.err_eof());
        };
        let loc = self.loc_of(&backslash);
        let mut params = Vec::new();
        loop {
            match self.peek().cloned() {
                Some(TokKind::Name(name)) if !name.is_qualified() => {
                    params.push(name.name);
                    self.pos += 1;
                }
                Some(TokKind::Arrow) => {
                    if params.is_empty() {
                        return Err(self.err("expected a parameter before `->`"));
                    }
                    self.pos += 1;
                    break;
                }
                Some(kind) => {
                    return Err(
                        self.err(format!("expected a lambda parameter, found {}", describe(&kind)))
                    );
                }
                None => return Err(self.err_eof()),
            }
        }
        let body = self.expr(0)?;
        Ok(Expr {
            loc,
            kind: ExprKind::Lambda(params, Box::new(body)),
        })
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        let Some(tok) = self.next() else {
            return Err(self.err_eof());
        };
        let loc = self.loc_of(&tok);
        match tok.kind {
            TokKind::Name(name) => {
                if !name.is_qualified() && name.name == "_" {
                    Ok(Expr {
                        loc,
                        kind: ExprKind::Wildcard,
                    })
                } else {
                    Ok(Expr {
                        loc,
                        kind: ExprKind::Var(name),
                    })
                }
            }
            TokKind::Int(n) => Ok(Expr {
                loc,
                kind: ExprKind::Lit(Literal::Int(n)),
            }),
            TokKind::Str(s) => Ok(Expr {
                loc,
                kind: ExprKind::Lit(Literal::Str(s)),
            }),
            TokKind::Ch(c) => Ok(Expr {
                loc,
                kind: ExprKind::Lit(Literal::Char(c)),
            }),
            TokKind::LParen => self.paren_group(loc),
            TokKind::LBracket => self.list(loc),
            ref other => Err(ParseError::new(
                format!("unexpected {}", describe(other)),
                tok.line,
                tok.col,
            )),
        }
    }

    fn paren_group(&mut self, loc: Loc) -> Result<Expr, ParseError> {
        // Operator section: `(+)` names the operator itself.
        if let Some(TokKind::Op(op)) = self.peek() {
            let closes = matches!(
                self.tokens.get(self.pos + 1).map(|t| &t.kind),
                Some(TokKind::RParen)
            );
            if closes {
                let name = Name::unqualified(op.clone());
                self.pos += 2;
                return Ok(Expr {
                    loc,
                    kind: ExprKind::Var(name),
                });
            }
        }
        if matches!(self.peek(), Some(TokKind::RParen)) {
            return Err(self.err("expected an expression inside `()`"));
        }
        let mut items = vec![self.expr(0)?];
        loop {
            match self.peek().cloned() {
                Some(TokKind::Comma) => {
                    self.pos += 1;
                    items.push(self.expr(0)?);
                }
                Some(TokKind::RParen) => {
                    self.pos += 1;
                    break;
                }
                Some(kind) => {
                    return Err(self.err(format!("expected `,` or `)`, found {}", describe(&kind))));
                }
                None => return Err(self.err("unclosed `(`")),
            }
        }
        let kind = if items.len() == 1 {
            ExprKind::Paren(Box::new(items.remove(0)))
        } else {
            ExprKind::Tuple(items)
        };
        Ok(Expr { loc, kind })
    }

    fn list(&mut self, loc: Loc) -> Result<Expr, ParseError> {
        let mut items = Vec::new();
        if matches!(self.peek(), Some(TokKind::RBracket)) {
            self.pos += 1;
            return Ok(Expr {
                loc,
                kind: ExprKind::List(items),
            });
        }
        loop {
            items.push(self.expr(0)?);
            match self.peek().cloned() {
                Some(TokKind::Comma) => self.pos += 1,
                Some(TokKind::RBracket) => {
                    self.pos += 1;
                    break;
                }
                Some(kind) => {
                    return Err(self.err(format!("expected `,` or `]`, found {}", describe(&kind))));
                }
                None => return Err(self.err("unclosed `[`")),
            }
        }
        Ok(Expr {
            loc,
            kind: ExprKind::List(items),
        })
    }

    // -- Imports --

    fn import(&mut self) -> Result<Import, ParseError> {
        let Some(tok) = self.next() else {
            return Err(self.err_eof());
        };
        let loc = self.loc_of(&tok);
        match &tok.kind {
            TokKind::Name(n) if !n.is_qualified() && n.name == "import" => {}
            _ => return Err(unexpected(&tok, "`import`")),
        }
        let qualified = matches!(
            self.peek(),
            Some(TokKind::Name(n)) if !n.is_qualified() && n.name == "qualified"
        );
        if qualified {
            self.pos += 1;
        }
        let module = self.module_name()?;
        let alias = if matches!(
            self.peek(),
            Some(TokKind::Name(n)) if !n.is_qualified() && n.name == "as"
        ) {
            self.pos += 1;
            Some(self.module_name()?)
        } else {
            None
        };
        let names = if matches!(self.peek(), Some(TokKind::LParen)) {
            self.pos += 1;
            Some(self.import_list()?)
        } else {
            None
        };
        Ok(Import {
            loc,
            qualified,
            module,
            alias,
            names,
        })
    }

    fn module_name(&mut self) -> Result<String, ParseError> {
        match self.next() {
            Some(Token {
                kind: TokKind::Name(n),
                ..
            }) => Ok(n.to_string()),
            Some(tok) => Err(unexpected(&tok, "a module name")),
            None => Err(self.err_eof()),
        }
    }

    fn import_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = Vec::new();
        if matches!(self.peek(), Some(TokKind::RParen)) {
            self.pos += 1;
            return Ok(names);
        }
        loop {
            names.push(self.import_item()?);
            match self.peek().cloned() {
                Some(TokKind::Comma) => self.pos += 1,
                Some(TokKind::RParen) => {
                    self.pos += 1;
                    break;
                }
                Some(kind) => {
                    return Err(self.err(format!("expected `,` or `)`, found {}", describe(&kind))));
                }
                None => return Err(self.err("unclosed import list")),
            }
        }
        Ok(names)
    }

    fn import_item(&mut self) -> Result<String, ParseError> {
        match self.next() {
            Some(Token {
                kind: TokKind::Name(n),
                ..
            }) => Ok(n.to_string()),
            Some(Token {
                kind: TokKind::LParen,
                ..
            }) => {
                let op = match self.next() {
                    Some(Token {
                        kind: TokKind::Op(op),
                        ..
                    }) => op,
                    Some(tok) => return Err(unexpected(&tok, "an operator")),
                    None => return Err(self.err_eof()),
                };
                match self.next() {
                    Some(Token {
                        kind: TokKind::RParen,
                        ..
                    }) => Ok(op),
                    Some(tok) => Err(unexpected(&tok, "`)`")),
                    None => Err(self.err_eof()),
                }
            }
            Some(tok) => Err(unexpected(&tok, "an import item")),
            None => Err(self.err_eof()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loc::SrcLoc;

    const FILE: &str = "rules.yaml";

    fn expr(src: &str) -> Expr {
        parse_expr(src, FILE).unwrap()
    }

    fn import(src: &str) -> Import {
        parse_import(src, FILE).unwrap()
    }

    // -- Atoms --

    #[test]
    fn parses_variables_and_wildcards() {
        assert!(matches!(expr("map").kind, ExprKind::Var(n) if n.to_string() == "map"));
        assert!(matches!(expr("_").kind, ExprKind::Wildcard));
        assert!(matches!(expr("foldl'").kind, ExprKind::Var(n) if n.name == "foldl'"));
    }

    #[test]
    fn parses_qualified_names() {
        let e = expr("Data.List.map");
        let ExprKind::Var(name) = e.kind else {
            panic!("expected a variable");
        };
        assert_eq!(name.module, "Data.List");
        assert_eq!(name.name, "map");
    }

    #[test]
    fn dot_with_spaces_is_composition() {
        let e = expr("Foo . bar");
        assert!(matches!(e.kind, ExprKind::Infix(_, op, _) if op.name == "."));

        let e = expr("f.g");
        assert!(matches!(e.kind, ExprKind::Infix(_, op, _) if op.name == "."));
    }

    #[test]
    fn parses_literals() {
        assert!(matches!(expr("42").kind, ExprKind::Lit(Literal::Int(42))));
        assert!(matches!(expr("\"a\\nb\"").kind, ExprKind::Lit(Literal::Str(s)) if s == "a\nb"));
        assert!(matches!(expr("'x'").kind, ExprKind::Lit(Literal::Char('x'))));
    }

    #[test]
    fn parses_operator_section() {
        let e = expr("(+)");
        assert!(matches!(&e.kind, ExprKind::Var(n) if n.name == "+"));
        assert_eq!(e.to_string(), "(+)");
    }

    // -- Application and precedence --

    #[test]
    fn application_associates_left() {
        assert_eq!(expr("map f x").to_string(), "map f x");
        let e = expr("map f x");
        let ExprKind::App(fun, arg) = e.kind else {
            panic!("expected an application");
        };
        assert_eq!(fun.to_string(), "map f");
        assert_eq!(arg.to_string(), "x");
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let e = expr("a + b * c");
        let ExprKind::Infix(lhs, op, rhs) = e.kind else {
            panic!("expected an operator");
        };
        assert_eq!(op.name, "+");
        assert_eq!(lhs.to_string(), "a");
        assert_eq!(rhs.to_string(), "b * c");
    }

    #[test]
    fn subtraction_associates_left() {
        let e = expr("a - b - c");
        let ExprKind::Infix(lhs, op, _) = e.kind else {
            panic!("expected an operator");
        };
        assert_eq!(op.name, "-");
        assert_eq!(lhs.to_string(), "a - b");
    }

    #[test]
    fn dollar_and_composition_associate_right() {
        let e = expr("f $ g $ x");
        let ExprKind::Infix(lhs, _, rhs) = e.kind else {
            panic!("expected an operator");
        };
        assert_eq!(lhs.to_string(), "f");
        assert_eq!(rhs.to_string(), "g $ x");

        let e = expr("f . g . h");
        let ExprKind::Infix(_, _, rhs) = e.kind else {
            panic!("expected an operator");
        };
        assert_eq!(rhs.to_string(), "g . h");
    }

    #[test]
    fn cons_chains_associate_right() {
        let e = expr("x : y : rest");
        let ExprKind::Infix(lhs, op, rhs) = e.kind else {
            panic!("expected an operator");
        };
        assert_eq!(op.name, ":");
        assert_eq!(lhs.to_string(), "x");
        assert_eq!(rhs.to_string(), "y : rest");
    }

    #[test]
    fn application_binds_tighter_than_operators() {
        let e = expr("f x + g y");
        let ExprKind::Infix(lhs, op, rhs) = e.kind else {
            panic!("expected an operator");
        };
        assert_eq!(op.name, "+");
        assert_eq!(lhs.to_string(), "f x");
        assert_eq!(rhs.to_string(), "g y");
    }

    // -- Grouping --

    #[test]
    fn parentheses_are_preserved() {
        let e = expr("concat (map f x)");
        assert_eq!(e.to_string(), "concat (map f x)");
        let ExprKind::App(_, arg) = e.kind else {
            panic!("expected an application");
        };
        assert!(matches!(arg.kind, ExprKind::Paren(_)));
    }

    #[test]
    fn parses_tuples_and_lists() {
        assert!(matches!(expr("(a, b)").kind, ExprKind::Tuple(items) if items.len() == 2));
        assert!(matches!(expr("[]").kind, ExprKind::List(items) if items.is_empty()));
        assert!(matches!(expr("[a, b, c]").kind, ExprKind::List(items) if items.len() == 3));
    }

    // -- Lambdas --

    #[test]
    fn lambda_body_extends_right() {
        let e = expr("\\x y -> f x . g");
        let ExprKind::Lambda(params, body) = e.kind else {
            panic!("expected a lambda");
        };
        assert_eq!(params, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(body.to_string(), "f x . g");
    }

    #[test]
    fn lambda_as_operator_operand() {
        let e = expr("maybe x $ \\y -> y");
        assert_eq!(e.to_string(), "maybe x $ \\y -> y");
    }

    // -- Locations --

    #[test]
    fn nodes_carry_line_and_column() {
        let e = expr("concat (map f x)");
        assert_eq!(e.loc.src(), Some(&SrcLoc::new(FILE, 1, 1)));

        let ExprKind::App(_, arg) = &e.kind else {
            panic!("expected an application");
        };
        assert_eq!(arg.loc.src(), Some(&SrcLoc::new(FILE, 1, 8)));

        let ExprKind::Paren(inner) = &arg.kind else {
            panic!("expected parentheses");
        };
        assert_eq!(inner.loc.src(), Some(&SrcLoc::new(FILE, 1, 9)));
    }

    #[test]
    fn locations_track_newlines() {
        let e = expr("concat\n  (map f x)");
        let ExprKind::App(_, arg) = &e.kind else {
            panic!("expected an application");
        };
        assert_eq!(arg.loc.src(), Some(&SrcLoc::new(FILE, 2, 3)));
    }

    // -- Errors --

    #[test]
    fn reports_unexpected_end_of_input() {
        let err = parse_expr("f +", FILE).unwrap_err();
        assert_eq!(err.message, "unexpected end of input");
    }

    #[test]
    fn reports_trailing_input_with_position() {
        let err = parse_expr("f x)", FILE).unwrap_err();
        assert_eq!(err.message, "unexpected `)` after the expression");
        assert_eq!((err.line, err.column), (1, 4));
    }

    #[test]
    fn reports_unterminated_string() {
        let err = parse_expr("\"abc", FILE).unwrap_err();
        assert_eq!(err.message, "unterminated string literal");
    }

    #[test]
    fn rejects_empty_parens() {
        let err = parse_expr("f ()", FILE).unwrap_err();
        assert_eq!(err.message, "expected an expression inside `()`");
    }

    // -- Imports --

    #[test]
    fn parses_bare_import() {
        let i = import("import Data.List");
        assert!(!i.qualified);
        assert_eq!(i.module, "Data.List");
        assert_eq!(i.alias, None);
        assert_eq!(i.names, None);
    }

    #[test]
    fn parses_full_import_form() {
        let i = import("import qualified Data.Map as Map (lookup, (!))");
        assert!(i.qualified);
        assert_eq!(i.module, "Data.Map");
        assert_eq!(i.alias.as_deref(), Some("Map"));
        assert_eq!(
            i.names,
            Some(vec!["lookup".to_string(), "!".to_string()])
        );
    }

    #[test]
    fn parses_empty_import_list() {
        let i = import("import Data.Functor ()");
        assert_eq!(i.names, Some(Vec::new()));
    }

    #[test]
    fn rejects_missing_import_keyword() {
        let err = parse_import("qualified Data.Map", FILE).unwrap_err();
        assert_eq!(err.message, "expected `import`, found `qualified`");
    }

    #[test]
    fn rejects_missing_module_name() {
        let err = parse_import("import", FILE).unwrap_err();
        assert_eq!(err.message, "unexpected end of input");
    }

    #[test]
    fn rejects_trailing_import_tokens() {
        let err = parse_import("import Data.List hiding (head)", FILE).unwrap_err();
        assert_eq!(
            err.message,
            "unexpected `hiding` after the import declaration"
        );
    }
}

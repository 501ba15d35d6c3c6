//! SQL Lexer - Tokenizes statement text into a stream of tokens

use std::{fmt::Display, iter::Peekable, str::Chars};

use crate::error::{Error, Result};

/// Represents a single lexical token in the statement text
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Reserved keyword
    Keyword(Keyword),
    /// Identifier such as a table or column name, case preserved
    Ident(String),
    /// Quoted string literal, quotes removed
    String(String),
    /// Numeric literal (integer or floating-point)
    Number(String),
    OpenParen,
    CloseParen,
    Comma,
    Semicolon,
    Asterisk,
    /// `%`, only meaningful inside an unquoted LIKE pattern
    Percent,
    Minus,
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Keyword(keyword) => f.write_str(keyword.to_str()),
            Token::Ident(ident) => f.write_str(ident),
            Token::String(v) => write!(f, "'{}'", v),
            Token::Number(n) => f.write_str(n),
            Token::OpenParen => f.write_str("("),
            Token::CloseParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Semicolon => f.write_str(";"),
            Token::Asterisk => f.write_str("*"),
            Token::Percent => f.write_str("%"),
            Token::Minus => f.write_str("-"),
            Token::Equal => f.write_str("="),
            Token::NotEqual => f.write_str("!="),
            Token::GreaterThan => f.write_str(">"),
            Token::GreaterThanOrEqual => f.write_str(">="),
            Token::LessThan => f.write_str("<"),
            Token::LessThanOrEqual => f.write_str("<="),
        }
    }
}

/// Reserved keywords
///
/// Aggregate function names are not keywords; the parser recognizes them by
/// the following `(`. Keywords may still name columns where the parser expects
/// a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Keyword {
    Create,
    Table,
    Insert,
    Into,
    Values,
    Select,
    From,
    Where,
    Group,
    Order,
    By,
    Asc,
    Desc,
    Limit,
    Offset,
    As,
    Like,
    Null,
    Update,
    Set,
    Delete,
}

impl Keyword {
    /// Attempts to parse a string as a keyword (case-insensitive)
    pub fn from_str(ident: &str) -> Option<Keyword> {
        Some(match ident.to_uppercase().as_ref() {
            "CREATE" => Keyword::Create,
            "TABLE" => Keyword::Table,
            "INSERT" => Keyword::Insert,
            "INTO" => Keyword::Into,
            "VALUES" => Keyword::Values,
            "SELECT" => Keyword::Select,
            "FROM" => Keyword::From,
            "WHERE" => Keyword::Where,
            "GROUP" => Keyword::Group,
            "ORDER" => Keyword::Order,
            "BY" => Keyword::By,
            "ASC" => Keyword::Asc,
            "DESC" => Keyword::Desc,
            "LIMIT" => Keyword::Limit,
            "OFFSET" => Keyword::Offset,
            "AS" => Keyword::As,
            "LIKE" => Keyword::Like,
            "NULL" => Keyword::Null,
            "UPDATE" => Keyword::Update,
            "SET" => Keyword::Set,
            "DELETE" => Keyword::Delete,
            _ => return None,
        })
    }

    /// Returns the uppercase string representation of the keyword
    pub fn to_str(&self) -> &'static str {
        match self {
            Keyword::Create => "CREATE",
            Keyword::Table => "TABLE",
            Keyword::Insert => "INSERT",
            Keyword::Into => "INTO",
            Keyword::Values => "VALUES",
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::Group => "GROUP",
            Keyword::Order => "ORDER",
            Keyword::By => "BY",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
            Keyword::Limit => "LIMIT",
            Keyword::Offset => "OFFSET",
            Keyword::As => "AS",
            Keyword::Like => "LIKE",
            Keyword::Null => "NULL",
            Keyword::Update => "UPDATE",
            Keyword::Set => "SET",
            Keyword::Delete => "DELETE",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Lexical analyzer over one statement
pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.scan() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => self
                .iter
                .peek()
                .map(|c| Err(Error::Parse(format!("Unexpected character {}", c)))),
            Err(err) => Some(Err(err)),
        }
    }
}

impl<'a> Lexer<'a> {
    pub fn new(sql_text: &'a str) -> Self {
        Self {
            iter: sql_text.chars().peekable(),
        }
    }

    /// Consumes the next character if it satisfies the predicate
    fn next_if<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<char> {
        self.iter.peek().filter(|&c| predicate(*c))?;
        self.iter.next()
    }

    /// Consumes consecutive characters while they satisfy the predicate
    fn next_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<String> {
        let mut value = String::new();
        while let Some(c) = self.next_if(&predicate) {
            value.push(c);
        }
        Some(value).filter(|v| !v.is_empty())
    }

    fn erase_whitespace(&mut self) {
        self.next_while(|c| c.is_whitespace());
    }

    /// Scans and returns the next token
    fn scan(&mut self) -> Result<Option<Token>> {
        self.erase_whitespace();
        match self.iter.peek() {
            Some('\'') | Some('"') => self.scan_string(),
            Some(c) if c.is_ascii_digit() => Ok(self.scan_number()),
            Some(c) if c.is_alphabetic() || *c == '_' => Ok(self.scan_ident()),
            Some(_) => self.scan_symbol(),
            None => Ok(None),
        }
    }

    /// Scans a quoted string; a doubled quote inside stands for one quote
    fn scan_string(&mut self) -> Result<Option<Token>> {
        let Some(quote) = self.iter.next() else {
            return Ok(None);
        };
        let mut val = String::new();
        loop {
            match self.iter.next() {
                Some(c) if c == quote => {
                    if self.next_if(|n| n == quote).is_none() {
                        break;
                    }
                    val.push(quote);
                }
                Some(c) => val.push(c),
                None => return Err(Error::Parse("Unexpected end of string".into())),
            }
        }
        Ok(Some(Token::String(val)))
    }

    /// Scans a numeric literal: digits, optional fraction, optional exponent
    fn scan_number(&mut self) -> Option<Token> {
        let mut val = self.next_while(|c| c.is_ascii_digit())?;
        if let Some(sep) = self.next_if(|c| c == '.') {
            val.push(sep);
            if let Some(frac) = self.next_while(|c| c.is_ascii_digit()) {
                val.push_str(&frac);
            }
        }
        if let Some(e) = self.next_if(|c| c == 'e' || c == 'E') {
            val.push(e);
            if let Some(sign) = self.next_if(|c| c == '+' || c == '-') {
                val.push(sign);
            }
            if let Some(exp) = self.next_while(|c| c.is_ascii_digit()) {
                val.push_str(&exp);
            }
        }
        Some(Token::Number(val))
    }

    /// Scans an identifier or keyword
    fn scan_ident(&mut self) -> Option<Token> {
        let val = self.next_while(|c| c.is_alphanumeric() || c == '_')?;
        Some(Keyword::from_str(&val).map_or(Token::Ident(val), Token::Keyword))
    }

    /// Scans an operator or punctuation token
    fn scan_symbol(&mut self) -> Result<Option<Token>> {
        let Some(c) = self.iter.next() else {
            return Ok(None);
        };
        Ok(Some(match c {
            '*' => Token::Asterisk,
            '%' => Token::Percent,
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            '-' => Token::Minus,
            '=' => Token::Equal,
            '!' => match self.next_if(|n| n == '=') {
                Some(_) => Token::NotEqual,
                None => return Err(Error::Parse("Unexpected character !".into())),
            },
            '>' => match self.next_if(|n| n == '=') {
                Some(_) => Token::GreaterThanOrEqual,
                None => Token::GreaterThan,
            },
            '<' => match self.next_if(|n| n == '=' || n == '>') {
                Some('=') => Token::LessThanOrEqual,
                Some(_) => Token::NotEqual,
                None => Token::LessThan,
            },
            c => return Err(Error::Parse(format!("Unexpected character {}", c))),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::{Keyword, Lexer, Token};
    use crate::error::Result;

    fn tokens(sql: &str) -> Result<Vec<Token>> {
        Lexer::new(sql).collect::<Result<Vec<_>>>()
    }

    #[test]
    fn test_lexer_create_table() -> Result<()> {
        assert_eq!(
            tokens("CREATE table Users\n (id, Name);")?,
            vec![
                Token::Keyword(Keyword::Create),
                Token::Keyword(Keyword::Table),
                Token::Ident("Users".to_string()),
                Token::OpenParen,
                Token::Ident("id".to_string()),
                Token::Comma,
                Token::Ident("Name".to_string()),
                Token::CloseParen,
                Token::Semicolon,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_insert_into() -> Result<()> {
        assert_eq!(
            tokens("insert into t (a, b) values (-1, 'it''s, ok', 4.5e2, null)")?,
            vec![
                Token::Keyword(Keyword::Insert),
                Token::Keyword(Keyword::Into),
                Token::Ident("t".to_string()),
                Token::OpenParen,
                Token::Ident("a".to_string()),
                Token::Comma,
                Token::Ident("b".to_string()),
                Token::CloseParen,
                Token::Keyword(Keyword::Values),
                Token::OpenParen,
                Token::Minus,
                Token::Number("1".to_string()),
                Token::Comma,
                Token::String("it's, ok".to_string()),
                Token::Comma,
                Token::Number("4.5e2".to_string()),
                Token::Comma,
                Token::Keyword(Keyword::Null),
                Token::CloseParen,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_operators() -> Result<()> {
        assert_eq!(
            tokens("= != <> > >= < <=")?,
            vec![
                Token::Equal,
                Token::NotEqual,
                Token::NotEqual,
                Token::GreaterThan,
                Token::GreaterThanOrEqual,
                Token::LessThan,
                Token::LessThanOrEqual,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_select() -> Result<()> {
        assert_eq!(
            tokens("select count(a) as n from tbl where b like 'x%'")?,
            vec![
                Token::Keyword(Keyword::Select),
                Token::Ident("count".to_string()),
                Token::OpenParen,
                Token::Ident("a".to_string()),
                Token::CloseParen,
                Token::Keyword(Keyword::As),
                Token::Ident("n".to_string()),
                Token::Keyword(Keyword::From),
                Token::Ident("tbl".to_string()),
                Token::Keyword(Keyword::Where),
                Token::Ident("b".to_string()),
                Token::Keyword(Keyword::Like),
                Token::String("x%".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_bare_pattern() -> Result<()> {
        assert_eq!(
            tokens("b like %Jo_1%")?,
            vec![
                Token::Ident("b".to_string()),
                Token::Keyword(Keyword::Like),
                Token::Percent,
                Token::Ident("Jo_1".to_string()),
                Token::Percent,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_errors() {
        assert!(tokens("select 'open").is_err());
        assert!(tokens("a ! b").is_err());
        assert!(tokens("a # b").is_err());
    }
}

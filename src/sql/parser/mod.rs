use std::collections::BTreeMap;
use std::iter::Peekable;

use crate::error::{Error, Result};
use crate::sql::parser::ast::{
    AggregateCall, AggregateFunc, Operator, OrderDirection, Predicate, Projection, Select,
    Statement,
};
use crate::sql::parser::lexer::{Keyword, Lexer, Token};
use crate::sql::types::Value;

pub mod ast;
mod lexer;

/// Parser - Converts tokens into an Abstract Syntax Tree (AST)
pub struct Parser<'a> {
    lexer: Peekable<Lexer<'a>>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given statement text
    pub fn new(input: &'a str) -> Self {
        Parser { lexer: Lexer::new(input).peekable() }
    }

    /// Parses exactly one statement, optionally terminated by a semicolon.
    ///
    /// Any failure is reported as a syntax error naming the command.
    pub fn parse(&mut self) -> Result<Statement> {
        let command = match self.peek()? {
            Some(Token::Keyword(Keyword::Create)) => "CREATE TABLE",
            Some(Token::Keyword(Keyword::Insert)) => "INSERT",
            Some(Token::Keyword(Keyword::Select)) => "SELECT",
            Some(Token::Keyword(Keyword::Update)) => "UPDATE",
            Some(Token::Keyword(Keyword::Delete)) => "DELETE",
            Some(token) => {
                let command = token.to_string().to_uppercase();
                return Err(Error::Parse(format!("Unsupported command: {}", command)));
            }
            None => return Err(Error::Parse("Empty query".into())),
        };
        self.parse_statement()
            .and_then(|stmt| {
                self.next_if_token(Token::Semicolon);
                // No tokens allowed after the statement
                match self.peek()? {
                    Some(token) => Err(Error::Parse(format!("Unexpected token {}", token))),
                    None => Ok(stmt),
                }
            })
            .map_err(|err| Error::Parse(format!("Invalid {} syntax: {}", command, err)))
    }

    /// Parses a statement based on the first token
    fn parse_statement(&mut self) -> Result<Statement> {
        match self.peek()? {
            Some(Token::Keyword(Keyword::Create)) => self.parse_ddl(),
            Some(Token::Keyword(Keyword::Select)) => self.parse_select(),
            Some(Token::Keyword(Keyword::Insert)) => self.parse_insert(),
            Some(Token::Keyword(Keyword::Update)) => self.parse_update(),
            Some(Token::Keyword(Keyword::Delete)) => self.parse_delete(),
            Some(t) => Err(Error::Parse(format!("Unexpected token {}", t))),
            None => Err(Error::Parse("Unexpected end of input".into())),
        }
    }

    /// Parses CREATE TABLE name (col, col, ...)
    fn parse_ddl(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Create))?;
        self.next_expect(Token::Keyword(Keyword::Table))?;
        let name = self.next_ident()?;
        let columns = self.parse_column_list()?;
        Ok(Statement::CreateTable { name, columns })
    }

    /// Parses `( col, col, ... )`, lowercasing every name
    fn parse_column_list(&mut self) -> Result<Vec<String>> {
        self.next_expect(Token::OpenParen)?;
        let mut idents = Vec::new();
        loop {
            idents.push(self.next_column()?);
            match self.next()? {
                Token::CloseParen => break,
                Token::Comma => {}
                token => return Err(Error::Parse(format!("Unexpected token {}", token))),
            }
        }
        Ok(idents)
    }

    /// Parses the select list, FROM and the optional clauses.
    ///
    /// Clauses may be written in any order but each at most once.
    fn parse_select(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Select))?;
        let (projection, aggregates) = self.parse_select_list()?;
        self.next_expect(Token::Keyword(Keyword::From))?;

        let mut select = Select {
            projection,
            aggregates,
            ..Select::all(self.next_ident()?)
        };

        while let Some(keyword) = self.next_if_clause_keyword() {
            match keyword {
                Keyword::Where => {
                    if select.where_clause.is_some() {
                        return Err(Error::Parse("Duplicate WHERE clause".into()));
                    }
                    select.where_clause = Some(self.parse_predicate_clause()?);
                }
                Keyword::Group => {
                    self.next_expect(Token::Keyword(Keyword::By))?;
                    if select.group_by.is_some() {
                        return Err(Error::Parse("Duplicate GROUP BY clause".into()));
                    }
                    select.group_by = Some(self.next_column()?);
                }
                Keyword::Order => {
                    self.next_expect(Token::Keyword(Keyword::By))?;
                    if select.order_by.is_some() {
                        return Err(Error::Parse("Duplicate ORDER BY clause".into()));
                    }
                    let column = self.next_column()?;
                    let direction = match self.next_if_keyword(&[Keyword::Asc, Keyword::Desc]) {
                        Some(Keyword::Desc) => OrderDirection::Desc,
                        _ => OrderDirection::Asc,
                    };
                    select.order_by = Some((column, direction));
                }
                Keyword::Limit => {
                    if select.limit.is_some() {
                        return Err(Error::Parse("Duplicate LIMIT clause".into()));
                    }
                    select.limit = Some(self.parse_count(keyword)?);
                }
                Keyword::Offset => {
                    if select.offset.is_some() {
                        return Err(Error::Parse("Duplicate OFFSET clause".into()));
                    }
                    select.offset = Some(self.parse_count(keyword)?);
                }
                k => return Err(Error::Parse(format!("Unexpected keyword {}", k))),
            }
        }
        Ok(Statement::Select(select))
    }

    /// Parses `*` or a list of columns and `FUNC(col) [AS alias]` items
    fn parse_select_list(&mut self) -> Result<(Projection, Vec<AggregateCall>)> {
        if self.next_if_token(Token::Asterisk).is_some() {
            return Ok((Projection::All, Vec::new()));
        }

        let mut columns = Vec::new();
        let mut aggregates: Vec<AggregateCall> = Vec::new();
        loop {
            let name = self.next_column()?;
            if self.next_if_token(Token::OpenParen).is_some() {
                let func = AggregateFunc::from_str(&name).ok_or_else(|| {
                    Error::Parse(format!("Unknown aggregate function {}", name))
                })?;
                let column = self.next_column()?;
                self.next_expect(Token::CloseParen)?;
                let alias = match self.next_if_token(Token::Keyword(Keyword::As)) {
                    Some(_) => self.next_ident()?.to_lowercase(),
                    None => format!("{}_{}", func.to_str().to_lowercase(), column),
                };
                if aggregates.iter().any(|a| a.alias == alias) {
                    return Err(Error::Parse(format!("Duplicate aggregate alias {}", alias)));
                }
                aggregates.push(AggregateCall { func, column, alias });
            } else {
                columns.push(name);
            }
            if self.next_if_token(Token::Comma).is_none() {
                break;
            }
        }
        Ok((Projection::Columns(columns), aggregates))
    }

    /// Parses a non-negative row count following LIMIT or OFFSET
    fn parse_count(&mut self, keyword: Keyword) -> Result<usize> {
        match self.next()? {
            Token::Number(n) => n
                .parse::<usize>()
                .map_err(|_| Error::Parse(format!("Invalid {} value {}", keyword, n))),
            token => Err(Error::Parse(format!("Invalid {} value {}", keyword, token))),
        }
    }

    /// Parses INSERT INTO name [(col, ...)] VALUES (v, ...)[, (v, ...)]
    fn parse_insert(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Insert))?;
        self.next_expect(Token::Keyword(Keyword::Into))?;

        let table_name = self.next_ident()?;

        // The column list may be omitted, values are then positional
        let columns = match self.peek()? {
            Some(Token::OpenParen) => Some(self.parse_column_list()?),
            _ => None,
        };

        self.next_expect(Token::Keyword(Keyword::Values))?;
        let mut values = Vec::new();
        loop {
            self.next_expect(Token::OpenParen)?;
            let mut row = Vec::new();
            loop {
                row.push(self.parse_value()?);
                match self.next()? {
                    Token::CloseParen => break,
                    Token::Comma => {}
                    token => return Err(Error::Parse(format!("Unexpected token {}", token))),
                }
            }
            values.push(row);
            if self.next_if_token(Token::Comma).is_none() {
                break;
            }
        }
        Ok(Statement::Insert { table_name, columns, values })
    }

    /// Parses UPDATE name SET col = v, ... [WHERE pred]
    fn parse_update(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Update))?;
        let table_name = self.next_ident()?;
        self.next_expect(Token::Keyword(Keyword::Set))?;
        let columns = self
            .parse_assignments()
            .map_err(|err| Error::Parse(format!("Invalid SET clause: {}", err)))?;
        let where_clause = match self.next_if_token(Token::Keyword(Keyword::Where)) {
            Some(_) => Some(self.parse_predicate_clause()?),
            None => None,
        };
        Ok(Statement::Update { table_name, columns, where_clause })
    }

    fn parse_assignments(&mut self) -> Result<BTreeMap<String, Value>> {
        let mut columns = BTreeMap::new();
        loop {
            let col = self.next_column()?;
            self.next_expect(Token::Equal)?;
            let value = self.parse_value()?;
            // Assigning the same column twice in one statement is an error
            if columns.insert(col.clone(), value).is_some() {
                return Err(Error::Parse(format!("Duplicate column {} for update", col)));
            }
            if self.next_if_token(Token::Comma).is_none() {
                break;
            }
        }
        Ok(columns)
    }

    /// Parses DELETE FROM name [WHERE pred]
    fn parse_delete(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Delete))?;
        self.next_expect(Token::Keyword(Keyword::From))?;
        let table_name = self.next_ident()?;
        let where_clause = match self.next_if_token(Token::Keyword(Keyword::Where)) {
            Some(_) => Some(self.parse_predicate_clause()?),
            None => None,
        };
        Ok(Statement::Delete { table_name, where_clause })
    }

    /// Parses the body of a WHERE clause: exactly one `column op literal`
    fn parse_predicate_clause(&mut self) -> Result<Predicate> {
        self.parse_predicate()
            .map_err(|err| Error::Parse(format!("Invalid WHERE clause: {}", err)))
    }

    fn parse_predicate(&mut self) -> Result<Predicate> {
        let column = self.next_column()?;
        let op = match self.next()? {
            Token::Equal => Operator::Equal,
            Token::NotEqual => Operator::NotEqual,
            Token::GreaterThan => Operator::GreaterThan,
            Token::GreaterThanOrEqual => Operator::GreaterThanOrEqual,
            Token::LessThan => Operator::LessThan,
            Token::LessThanOrEqual => Operator::LessThanOrEqual,
            Token::Keyword(Keyword::Like) => Operator::Like,
            token => {
                return Err(Error::Parse(format!(
                    "Expected comparison operator, got {}",
                    token
                )));
            }
        };
        let value = self.parse_literal(op)?;

        // A second comparison (AND, OR, ...) is not part of the grammar
        match self.peek()? {
            None
            | Some(Token::Semicolon)
            | Some(Token::Keyword(
                Keyword::Group | Keyword::Order | Keyword::Limit | Keyword::Offset,
            )) => {}
            Some(token) => return Err(Error::Parse(format!("Unexpected token {}", token))),
        }
        Ok(Predicate { column, op, value })
    }

    /// Parses the right-hand side of a predicate.
    ///
    /// LIKE keeps the pattern text as written, other operators coerce the
    /// unquoted literal to integer, float or text.
    fn parse_literal(&mut self, op: Operator) -> Result<Value> {
        if op == Operator::Like {
            return Ok(Value::Text(self.parse_pattern()?));
        }
        let text = match self.next()? {
            Token::Keyword(Keyword::Null) => return Ok(Value::Null),
            Token::Minus => format!("-{}", self.next_number()?),
            Token::Number(n) | Token::String(n) | Token::Ident(n) => n,
            token => return Err(Error::Parse(format!("Unexpected expression token {}", token))),
        };
        Ok(Value::coerce(&text))
    }

    /// A LIKE pattern: a quoted string, or an unquoted run of words, numbers
    /// and `%` such as `Jo%`
    fn parse_pattern(&mut self) -> Result<String> {
        let mut pattern = match self.next()? {
            Token::String(s) => return Ok(s),
            Token::Ident(s) | Token::Number(s) => s,
            Token::Percent => "%".to_string(),
            token => return Err(Error::Parse(format!("Unexpected pattern token {}", token))),
        };
        while let Some(token) = self.next_if(|t| {
            matches!(t, Token::Ident(_) | Token::Number(_) | Token::Percent)
        }) {
            pattern.push_str(&token.to_string());
        }
        Ok(pattern)
    }

    /// Parses a value in INSERT or SET: numbers, quoted text, bare words, NULL
    fn parse_value(&mut self) -> Result<Value> {
        Ok(match self.next()? {
            Token::Number(n) => Value::parse(&n),
            Token::Minus => Value::parse(&format!("-{}", self.next_number()?)),
            Token::String(s) => Value::Text(s),
            Token::Ident(s) => Value::parse(&s),
            Token::Keyword(Keyword::Null) => Value::Null,
            t => return Err(Error::Parse(format!("Unexpected expression token {}", t))),
        })
    }

    /// Peeks at the next token
    fn peek(&mut self) -> Result<Option<Token>> {
        self.lexer.peek().cloned().transpose()
    }

    /// Consumes and returns the next token
    fn next(&mut self) -> Result<Token> {
        self.lexer
            .next()
            .unwrap_or_else(|| Err(Error::Parse("Unexpected end of input".into())))
    }

    /// Expects and consumes an identifier
    fn next_ident(&mut self) -> Result<String> {
        match self.next()? {
            Token::Ident(ident) => Ok(ident),
            token => Err(Error::Parse(format!("Expected ident, got token {}", token))),
        }
    }

    /// Expects and consumes a column name, lowercased.
    ///
    /// Every position that calls this requires a column, so a keyword found
    /// here is taken as the column's name (`desc`, `order`, `value`, ...).
    fn next_column(&mut self) -> Result<String> {
        match self.next()? {
            Token::Ident(ident) => Ok(ident.to_lowercase()),
            Token::Keyword(keyword) => Ok(keyword.to_str().to_lowercase()),
            token => Err(Error::Parse(format!("Expected column, got token {}", token))),
        }
    }

    /// Expects and consumes a numeric literal
    fn next_number(&mut self) -> Result<String> {
        match self.next()? {
            Token::Number(n) => Ok(n),
            token => Err(Error::Parse(format!("Expected number, got token {}", token))),
        }
    }

    /// Expects a specific token, returns error if different
    fn next_expect(&mut self, expect: Token) -> Result<()> {
        let token = self.next()?;
        if token != expect {
            return Err(Error::Parse(format!("Expected token {}, got {}", expect, token)));
        }
        Ok(())
    }

    /// Consumes next token if it satisfies the predicate
    fn next_if<F: Fn(&Token) -> bool>(&mut self, predicate: F) -> Option<Token> {
        self.peek().unwrap_or(None).filter(|t| predicate(t))?;
        self.next().ok()
    }

    /// Consumes next token if it is one of the given keywords
    fn next_if_keyword(&mut self, keywords: &[Keyword]) -> Option<Keyword> {
        match self.next_if(|t| matches!(t, Token::Keyword(k) if keywords.contains(k)))? {
            Token::Keyword(k) => Some(k),
            _ => None,
        }
    }

    /// Consumes the keyword opening a SELECT clause, if any
    fn next_if_clause_keyword(&mut self) -> Option<Keyword> {
        self.next_if_keyword(&[
            Keyword::Where,
            Keyword::Group,
            Keyword::Order,
            Keyword::Limit,
            Keyword::Offset,
        ])
    }

    /// Consumes next token if it matches the given token
    fn next_if_token(&mut self, token: Token) -> Option<Token> {
        self.next_if(|t| t == &token)
    }
}

/// Splits a script into statements on semicolons outside quoted strings.
///
/// Blank statements are dropped.
pub fn split_statements(script: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut quote = None;
    let mut start = 0;
    for (i, c) in script.char_indices() {
        match (quote, c) {
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, ';') => {
                statements.push(&script[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    statements.push(&script[start..]);
    statements
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{Parser, split_statements};
    use crate::{
        error::Result,
        sql::{
            parser::ast::{
                AggregateCall, AggregateFunc, Operator, OrderDirection, Predicate, Projection,
                Select, Statement,
            },
            types::Value,
        },
    };

    fn parse_select(sql: &str) -> Result<Select> {
        match Parser::new(sql).parse()? {
            Statement::Select(select) => Ok(select),
            stmt => panic!("expected select, got {:?}", stmt),
        }
    }

    fn syntax_error(sql: &str) -> String {
        Parser::new(sql).parse().unwrap_err().to_string()
    }

    #[test]
    fn test_parser_create_table() -> Result<()> {
        let stmt1 = Parser::new("create table Tbl1 (a, B, c);").parse()?;
        let stmt2 = Parser::new("CREATE   TABLE Tbl1(\n a ,b,  C )").parse()?;
        assert_eq!(stmt1, stmt2);
        assert_eq!(
            stmt1,
            Statement::CreateTable {
                name: "Tbl1".to_string(),
                columns: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            }
        );

        assert!(syntax_error("create table t (a, b").starts_with("Invalid CREATE TABLE syntax"));
        assert!(syntax_error("create t (a)").starts_with("Invalid CREATE TABLE syntax"));
        Ok(())
    }

    #[test]
    fn test_parser_insert() -> Result<()> {
        let stmt = Parser::new("insert into t (A, b) values (1, 'x, y')").parse()?;
        assert_eq!(
            stmt,
            Statement::Insert {
                table_name: "t".to_string(),
                columns: Some(vec!["a".to_string(), "b".to_string()]),
                values: vec![vec![Value::Integer(1), Value::Text("x, y".to_string())]],
            }
        );

        let stmt = Parser::new("INSERT INTO t VALUES (-2.5, null, abc), ('5', 7)").parse()?;
        assert_eq!(
            stmt,
            Statement::Insert {
                table_name: "t".to_string(),
                columns: None,
                values: vec![
                    vec![Value::Float(-2.5), Value::Null, Value::Text("abc".to_string())],
                    vec![Value::Text("5".to_string()), Value::Integer(7)],
                ],
            }
        );

        assert!(syntax_error("insert into t (a) (1)").starts_with("Invalid INSERT syntax"));
        Ok(())
    }

    #[test]
    fn test_parser_select_all() -> Result<()> {
        assert_eq!(parse_select("select * from tbl1;")?, Select::all("tbl1"));
        Ok(())
    }

    #[test]
    fn test_parser_select_clauses() -> Result<()> {
        let select = parse_select(
            "SELECT dept, COUNT(id) AS Cnt, sum(Salary) FROM emp WHERE age >= '30' \
             GROUP BY Dept ORDER BY cnt DESC LIMIT 5 OFFSET 2",
        )?;
        assert_eq!(
            select,
            Select {
                table_name: "emp".to_string(),
                projection: Projection::Columns(vec!["dept".to_string()]),
                aggregates: vec![
                    AggregateCall {
                        func: AggregateFunc::Count,
                        column: "id".to_string(),
                        alias: "cnt".to_string(),
                    },
                    AggregateCall {
                        func: AggregateFunc::Sum,
                        column: "salary".to_string(),
                        alias: "sum_salary".to_string(),
                    },
                ],
                where_clause: Some(Predicate {
                    column: "age".to_string(),
                    op: Operator::GreaterThanOrEqual,
                    value: Value::Integer(30),
                }),
                group_by: Some("dept".to_string()),
                order_by: Some(("cnt".to_string(), OrderDirection::Desc)),
                limit: Some(5),
                offset: Some(2),
            }
        );
        Ok(())
    }

    #[test]
    fn test_parser_select_clause_order() -> Result<()> {
        let a = parse_select("select a from t offset 1 limit 2")?;
        let b = parse_select("select a from t limit 2 offset 1")?;
        assert_eq!(a, b);
        assert_eq!(a.order_by, None);

        assert!(syntax_error("select a from t limit 1 limit 2").contains("Duplicate LIMIT"));
        assert!(syntax_error("select a from t limit -1").starts_with("Invalid SELECT syntax"));
        assert!(syntax_error("select a from t order by").starts_with("Invalid SELECT syntax"));
        Ok(())
    }

    #[test]
    fn test_parser_where_like_and_null() -> Result<()> {
        let select = parse_select("select * from t where name LIKE 'Jo%'")?;
        assert_eq!(
            select.where_clause,
            Some(Predicate {
                column: "name".to_string(),
                op: Operator::Like,
                value: Value::Text("Jo%".to_string()),
            })
        );

        let select = parse_select("select * from t where a != null")?;
        assert_eq!(select.where_clause.map(|p| p.value), Some(Value::Null));

        let select = parse_select("select * from t where a < -3")?;
        assert_eq!(select.where_clause.map(|p| p.value), Some(Value::Integer(-3)));
        Ok(())
    }

    #[test]
    fn test_parser_keywords_as_columns() -> Result<()> {
        assert_eq!(
            Parser::new("create table items (name, desc)").parse()?,
            Statement::CreateTable {
                name: "items".to_string(),
                columns: vec!["name".to_string(), "desc".to_string()],
            }
        );
        assert!(matches!(
            Parser::new("CREATE TABLE orders (id, value, Order)").parse()?,
            Statement::CreateTable { columns, .. } if columns == ["id", "value", "order"]
        ));

        let select = parse_select(
            "select desc, max(value) as top from orders where order >= 2 \
             group by desc order by desc desc",
        )?;
        assert_eq!(select.projection, Projection::Columns(vec!["desc".to_string()]));
        assert_eq!(select.aggregates[0].column, "value");
        assert_eq!(select.where_clause.map(|p| p.column), Some("order".to_string()));
        assert_eq!(select.group_by, Some("desc".to_string()));
        assert_eq!(select.order_by, Some(("desc".to_string(), OrderDirection::Desc)));

        let stmt = Parser::new("update items set desc = 'x', limit = 1 where table = 2").parse()?;
        assert!(matches!(
            stmt,
            Statement::Update { columns, where_clause: Some(_), .. }
                if columns.contains_key("desc") && columns.contains_key("limit")
        ));
        Ok(())
    }

    #[test]
    fn test_parser_unquoted_like_pattern() -> Result<()> {
        let pattern = |sql: &str| -> Result<Option<Value>> {
            Ok(parse_select(sql)?.where_clause.map(|p| p.value))
        };
        assert_eq!(pattern("select * from x where b LIKE Jo%")?, Some(Value::Text("Jo%".into())));
        assert_eq!(
            pattern("select * from x where b like %a_1%2 limit 3")?,
            Some(Value::Text("%a_1%2".into()))
        );
        assert_eq!(pattern("select * from x where b like '%'")?, Some(Value::Text("%".into())));
        assert!(syntax_error("select * from x where b like").contains("Invalid WHERE clause"));
        Ok(())
    }

    #[test]
    fn test_parser_where_single_predicate_only() {
        let err = syntax_error("select * from t where a = 1 and b = 2");
        assert!(err.contains("Invalid WHERE clause"), "{}", err);
        let err = syntax_error("delete from t where a = 1 or a = 2");
        assert!(err.contains("Invalid WHERE clause"), "{}", err);
        let err = syntax_error("delete from t where a");
        assert!(err.contains("Invalid WHERE clause"), "{}", err);
    }

    #[test]
    fn test_parser_update() -> Result<()> {
        let stmt = Parser::new("update t set B = 'z', c = 3 where a = 1").parse()?;
        assert_eq!(
            stmt,
            Statement::Update {
                table_name: "t".to_string(),
                columns: BTreeMap::from([
                    ("b".to_string(), Value::Text("z".to_string())),
                    ("c".to_string(), Value::Integer(3)),
                ]),
                where_clause: Some(Predicate {
                    column: "a".to_string(),
                    op: Operator::Equal,
                    value: Value::Integer(1),
                }),
            }
        );

        let err = syntax_error("update t set a = 1, a = 2");
        assert!(err.contains("Invalid SET clause"), "{}", err);
        assert!(syntax_error("update t a = 1").starts_with("Invalid UPDATE syntax"));
        Ok(())
    }

    #[test]
    fn test_parser_delete() -> Result<()> {
        assert_eq!(
            Parser::new("DELETE FROM t").parse()?,
            Statement::Delete { table_name: "t".to_string(), where_clause: None }
        );
        assert!(syntax_error("delete t").starts_with("Invalid DELETE syntax"));
        Ok(())
    }

    #[test]
    fn test_parser_unsupported() {
        assert_eq!(syntax_error("drop table t"), "Unsupported command: DROP");
        assert_eq!(syntax_error("   "), "Empty query");
    }

    #[test]
    fn test_split_statements() {
        assert_eq!(
            split_statements(
                "create table t (a);\n insert into t (a) values ('x;y');;  select * from t"
            ),
            vec![
                "create table t (a)",
                "insert into t (a) values ('x;y')",
                "select * from t",
            ]
        );
        assert!(split_statements(" ; \n ").is_empty());
    }
}

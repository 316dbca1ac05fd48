//! Statement parser
//!
//! One tokenizer feeds four independent grammar matchers:
//!
//! ```text
//! select := SELECT * FROM ident [WHERE ident = literal]
//! insert := INSERT INTO ident ( ident {, ident} ) VALUES ( literal {, literal} )
//! update := UPDATE ident SET ident = literal WHERE ident = literal
//! delete := DELETE FROM ident WHERE ident = literal
//! ```
//!
//! Keywords are case-insensitive. Literals are coerced as they are parsed,
//! after every surrounding quote character is stripped.

use super::ast::{Condition, Statement, Verb};
use super::coerce::coerce_quoted;
use super::errors::{QueryError, QueryResult};
use super::lexer::{tokenize, Token};

/// Trims whitespace and one trailing `;`.
pub fn normalize(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed.strip_suffix(';').unwrap_or(trimmed).trim()
}

/// Classifies a normalized statement by its leading keyword.
pub fn classify(text: &str) -> QueryResult<Verb> {
    if text.is_empty() {
        return Err(QueryError::Empty);
    }
    let end = text
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    Verb::from_keyword(&text[..end]).ok_or_else(|| {
        let first = text.split_whitespace().next().unwrap_or(text);
        QueryError::UnsupportedVerb(first.to_string())
    })
}

/// Parses one statement.
pub fn parse(text: &str) -> QueryResult<Statement> {
    let text = normalize(text);
    let verb = classify(text)?;
    let tokens = tokenize(text).map_err(|detail| QueryError::parse(verb, detail))?;

    let mut parser = Parser {
        verb,
        tokens,
        pos: 0,
    };
    let statement = match verb {
        Verb::Select => parser.select()?,
        Verb::Insert => parser.insert()?,
        Verb::Update => parser.update()?,
        Verb::Delete => parser.delete()?,
    };
    parser.finish()?;
    Ok(statement)
}

struct Parser {
    verb: Verb,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn select(&mut self) -> QueryResult<Statement> {
        self.keyword("SELECT")?;
        self.star()?;
        self.keyword("FROM")?;
        let table = self.ident("table name")?;

        let condition = if self.at_end() {
            None
        } else {
            self.keyword("WHERE")?;
            Some(self.condition()?)
        };
        Ok(Statement::Select { table, condition })
    }

    fn insert(&mut self) -> QueryResult<Statement> {
        self.keyword("INSERT")?;
        self.keyword("INTO")?;
        let table = self.ident("table name")?;

        self.expect(Token::LeftParen)?;
        let mut columns = vec![self.ident("column name")?];
        while self.eat(&Token::Comma) {
            columns.push(self.ident("column name")?);
        }
        self.expect(Token::RightParen)?;

        self.keyword("VALUES")?;
        self.expect(Token::LeftParen)?;
        let mut values = vec![self.literal()?];
        while self.eat(&Token::Comma) {
            values.push(self.literal()?);
        }
        self.expect(Token::RightParen)?;

        // Column/value counts are checked at execution.
        Ok(Statement::Insert {
            table,
            columns,
            values,
        })
    }

    fn update(&mut self) -> QueryResult<Statement> {
        self.keyword("UPDATE")?;
        let table = self.ident("table name")?;
        self.keyword("SET")?;
        let assignment = self.condition()?;
        self.keyword("WHERE")?;
        let condition = self.condition()?;
        Ok(Statement::Update {
            table,
            assignment,
            condition,
        })
    }

    fn delete(&mut self) -> QueryResult<Statement> {
        self.keyword("DELETE")?;
        self.keyword("FROM")?;
        let table = self.ident("table name")?;
        self.keyword("WHERE")?;
        let condition = self.condition()?;
        Ok(Statement::Delete { table, condition })
    }

    fn condition(&mut self) -> QueryResult<Condition> {
        let field = self.ident("field name")?;
        self.expect(Token::Equal)?;
        let value = self.literal()?;
        Ok(Condition { field, value })
    }

    fn error(&self, expected: &str) -> QueryError {
        let found = match self.tokens.get(self.pos) {
            Some(token) => token.to_string(),
            None => "end of query".to_string(),
        };
        QueryError::parse(self.verb, format!("expected {}, found {}", expected, found))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.tokens.get(self.pos) == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token) -> QueryResult<()> {
        if self.eat(&expected) {
            Ok(())
        } else {
            Err(self.error(&expected.to_string()))
        }
    }

    fn keyword(&mut self, keyword: &str) -> QueryResult<()> {
        match self.tokens.get(self.pos) {
            Some(Token::Word(word)) if word.eq_ignore_ascii_case(keyword) => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.error(keyword)),
        }
    }

    fn star(&mut self) -> QueryResult<()> {
        match self.tokens.get(self.pos) {
            Some(Token::Word(word)) if word == "*" => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.error("'*' (column lists are not supported)")),
        }
    }

    fn ident(&mut self, what: &str) -> QueryResult<String> {
        match self.tokens.get(self.pos) {
            Some(Token::Word(word))
                if word.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                let word = word.clone();
                self.pos += 1;
                Ok(word)
            }
            _ => Err(self.error(what)),
        }
    }

    fn literal(&mut self) -> QueryResult<serde_json::Value> {
        let value = match self.tokens.get(self.pos) {
            Some(Token::Word(text)) | Some(Token::Quoted(text)) => coerce_quoted(text),
            _ => return Err(self.error("a value")),
        };
        self.pos += 1;
        Ok(value)
    }

    fn finish(&self) -> QueryResult<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error("end of query"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cond(field: &str, value: serde_json::Value) -> Condition {
        Condition {
            field: field.to_string(),
            value,
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  SELECT * FROM t ;  "), "SELECT * FROM t");
        assert_eq!(normalize("SELECT * FROM t;;"), "SELECT * FROM t;");
        assert_eq!(normalize(" ; "), "");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("select * from t").unwrap(), Verb::Select);
        assert!(matches!(classify(""), Err(QueryError::Empty)));
        match classify("DROP TABLE x") {
            Err(QueryError::UnsupportedVerb(word)) => assert_eq!(word, "DROP"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            classify("SELECTED * FROM t"),
            Err(QueryError::UnsupportedVerb(_))
        ));
    }

    #[test]
    fn test_select_all() {
        assert_eq!(
            parse("SELECT * FROM devices").unwrap(),
            Statement::Select {
                table: "devices".into(),
                condition: None
            }
        );
    }

    #[test]
    fn test_select_where_coerces_literal() {
        assert_eq!(
            parse("select * from devices where id = 1;").unwrap(),
            Statement::Select {
                table: "devices".into(),
                condition: Some(cond("id", json!(1))),
            }
        );
        assert_eq!(
            parse("SELECT * FROM devices WHERE room='A101'").unwrap(),
            Statement::Select {
                table: "devices".into(),
                condition: Some(cond("room", json!("A101"))),
            }
        );
    }

    #[test]
    fn test_select_rejects_projection_and_compound_where() {
        assert!(matches!(
            parse("SELECT name FROM devices"),
            Err(QueryError::Parse {
                verb: Verb::Select,
                ..
            })
        ));
        assert!(matches!(
            parse("SELECT * FROM d WHERE a=1 AND b=2"),
            Err(QueryError::Parse { .. })
        ));
        assert!(matches!(
            parse("SELECT * FROM d WHERE a > 1"),
            Err(QueryError::Parse { .. })
        ));
    }

    #[test]
    fn test_insert() {
        assert_eq!(
            parse("INSERT INTO devices (name, room, floor, on) VALUES ('Epson L710U', 'A101', 2, true)")
                .unwrap(),
            Statement::Insert {
                table: "devices".into(),
                columns: vec!["name".into(), "room".into(), "floor".into(), "on".into()],
                values: vec![json!("Epson L710U"), json!("A101"), json!(2), json!(true)],
            }
        );
    }

    #[test]
    fn test_insert_quoted_numbers_are_coerced() {
        match parse("INSERT INTO t (n) VALUES ('42')").unwrap() {
            Statement::Insert { values, .. } => assert_eq!(values, vec![json!(42)]),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_insert_count_mismatch_is_structurally_valid() {
        match parse("INSERT INTO t (a, b) VALUES (1)").unwrap() {
            Statement::Insert {
                columns, values, ..
            } => {
                assert_eq!(columns.len(), 2);
                assert_eq!(values.len(), 1);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_quoted_literals_lose_every_surrounding_quote() {
        match parse(r#"INSERT INTO t (a, b) VALUES ('"x"', "'7'")"#).unwrap() {
            Statement::Insert { values, .. } => assert_eq!(values, vec![json!("x"), json!(7)]),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_insert_malformed() {
        let err = parse("INSERT INTO t VALUES (1)").unwrap_err();
        assert!(err.to_string().contains("INSERT INTO devices (name, room)"));
        assert!(parse("INSERT INTO t (a) VALUES ()").is_err());
        assert!(parse("INSERT INTO t (a) VALUES (1").is_err());
    }

    #[test]
    fn test_update() {
        assert_eq!(
            parse("UPDATE devices SET room='B202' WHERE id=1").unwrap(),
            Statement::Update {
                table: "devices".into(),
                assignment: cond("room", json!("B202")),
                condition: cond("id", json!(1)),
            }
        );
    }

    #[test]
    fn test_update_requires_where() {
        let err = parse("UPDATE devices SET room='B202'").unwrap_err();
        assert!(matches!(
            err,
            QueryError::Parse {
                verb: Verb::Update,
                ..
            }
        ));
        assert!(err.to_string().contains("end of query"));
    }

    #[test]
    fn test_delete() {
        assert_eq!(
            parse("DELETE FROM devices WHERE ip = 192.168.1.10").unwrap(),
            Statement::Delete {
                table: "devices".into(),
                condition: cond("ip", json!("192.168.1.10")),
            }
        );
        assert!(parse("DELETE FROM devices").is_err());
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        assert!(matches!(
            parse("DELETE FROM d WHERE id=1 extra"),
            Err(QueryError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_identifiers_rejected() {
        assert!(parse("SELECT * FROM 'devices'").is_err());
        assert!(parse("SELECT * FROM ../etc").is_err());
    }

    #[test]
    fn test_unterminated_quote_is_parse_error() {
        assert!(matches!(
            parse("SELECT * FROM d WHERE name='x"),
            Err(QueryError::Parse {
                verb: Verb::Select,
                ..
            })
        ));
    }
}

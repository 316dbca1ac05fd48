//! Query engine
//!
//! Accepts one textual statement at a time:
//!
//! - `SELECT * FROM <table> [WHERE <field> = <literal>]`
//! - `INSERT INTO <table> (<field>, ...) VALUES (<literal>, ...)`
//! - `UPDATE <table> SET <field> = <literal> WHERE <field> = <literal>`
//! - `DELETE FROM <table> WHERE <field> = <literal>`
//!
//! Literals are coerced to integer, float, boolean or string before they
//! reach the record store, so WHERE clauses match on typed values.

mod ast;
mod engine;
mod errors;
mod lexer;
mod parser;
mod result;

pub mod coerce;

pub use ast::{Condition, Statement, Verb};
pub use engine::QueryEngine;
pub use errors::{QueryError, QueryResult};
pub use lexer::{tokenize, Token};
pub use parser::parse;
pub use result::{QueryOutput, Status};

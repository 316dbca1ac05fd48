//! Query execution
//!
//! The engine is stateless across calls: every `query` parses its text and
//! dispatches straight to the record store. There is no caching and no
//! transaction spanning calls.
//!
//! UPDATE and DELETE resolve their WHERE clause with a `select` and then
//! mutate each match by id. The match set is read without the table lock,
//! so a concurrent writer can change the table between the two steps.

use std::sync::Arc;

use serde_json::Value;

use super::ast::{Condition, Statement};
use super::errors::{QueryError, QueryResult};
use super::parser;
use super::result::{QueryOutput, Status};
use crate::observability::{Event, Logger, MetricsRegistry};
use crate::store::{record_id, Database, Filter, Record};

/// Parses textual statements and runs them against a `Database`
#[derive(Debug, Clone)]
pub struct QueryEngine {
    db: Arc<Database>,
    metrics: Arc<MetricsRegistry>,
}

impl QueryEngine {
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_metrics(db, Arc::new(MetricsRegistry::new()))
    }

    pub fn with_metrics(db: Arc<Database>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { db, metrics }
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Runs one statement.
    ///
    /// Malformed text is an `Err`; a missing table or zero matched rows is
    /// an `Ok` result describing that.
    pub fn query(&self, text: &str) -> QueryResult<QueryOutput> {
        let result = parser::parse(text).and_then(|statement| {
            let verb = statement.verb();
            self.execute(statement).map(|output| (verb, output))
        });

        match result {
            Ok((verb, output)) => {
                self.metrics.increment_queries_executed();
                Logger::info(
                    Event::QueryExecuted,
                    &[("verb", verb.keyword()), ("result", &summary(&output))],
                );
                Ok(output)
            }
            Err(err) => {
                if err.is_rejection() {
                    self.metrics.increment_queries_rejected();
                    Logger::warn(
                        Event::QueryRejected,
                        &[("code", err.code()), ("reason", &err.to_string())],
                    );
                } else {
                    Logger::error(
                        Event::QueryRejected,
                        &[("code", err.code()), ("reason", &err.to_string())],
                    );
                }
                Err(err)
            }
        }
    }

    /// Runs an already parsed statement.
    pub fn execute(&self, statement: Statement) -> QueryResult<QueryOutput> {
        match statement {
            Statement::Select { table, condition } => self.select(&table, condition),
            Statement::Insert {
                table,
                columns,
                values,
            } => self.insert(&table, columns, values),
            Statement::Update {
                table,
                assignment,
                condition,
            } => self.update(&table, assignment, condition),
            Statement::Delete { table, condition } => self.delete(&table, condition),
        }
    }

    fn select(&self, table: &str, condition: Option<Condition>) -> QueryResult<QueryOutput> {
        if !self.db.table_exists(table) {
            return Ok(QueryOutput::missing_table_rows(table));
        }
        let filter = condition.map(filter_for);
        Ok(QueryOutput::Rows(self.db.select(table, filter.as_ref())?))
    }

    fn insert(
        &self,
        table: &str,
        columns: Vec<String>,
        values: Vec<Value>,
    ) -> QueryResult<QueryOutput> {
        if columns.len() != values.len() {
            return Err(QueryError::Validation(format!(
                "Column count mismatch: {} columns but {} values",
                columns.len(),
                values.len()
            )));
        }
        let record: Record = columns.into_iter().zip(values).collect();
        let id = self.db.insert(table, record)?;
        self.metrics.increment_inserted();
        Ok(QueryOutput::Status(Status::Inserted { id }))
    }

    fn update(
        &self,
        table: &str,
        assignment: Condition,
        condition: Condition,
    ) -> QueryResult<QueryOutput> {
        if !self.db.table_exists(table) {
            return Ok(missing(table));
        }

        let mut rows = 0;
        for id in self.matching_ids(table, condition)? {
            let mut updates = Record::new();
            updates.insert(assignment.field.clone(), assignment.value.clone());
            if self.db.update(table, id, updates)? {
                rows += 1;
            }
        }
        self.metrics.add_updated(rows as u64);
        Ok(QueryOutput::Status(Status::Updated { rows }))
    }

    fn delete(&self, table: &str, condition: Condition) -> QueryResult<QueryOutput> {
        if !self.db.table_exists(table) {
            return Ok(missing(table));
        }

        let mut rows = 0;
        for id in self.matching_ids(table, condition)? {
            if self.db.delete(table, id)? {
                rows += 1;
            }
        }
        self.metrics.add_deleted(rows as u64);
        Ok(QueryOutput::Status(Status::Deleted { rows }))
    }

    // Rows without an integer id cannot be addressed and are skipped.
    fn matching_ids(&self, table: &str, condition: Condition) -> QueryResult<Vec<u64>> {
        let filter = filter_for(condition);
        Ok(self
            .db
            .select(table, Some(&filter))?
            .iter()
            .filter_map(record_id)
            .collect())
    }
}

fn filter_for(condition: Condition) -> Filter {
    let mut filter = Filter::new();
    filter.insert(condition.field, condition.value);
    filter
}

fn missing(table: &str) -> QueryOutput {
    QueryOutput::Status(Status::TableMissing {
        table: table.to_string(),
    })
}

fn summary(output: &QueryOutput) -> String {
    match output {
        QueryOutput::Rows(rows) => format!("{} rows", rows.len()),
        QueryOutput::Status(status) => format!("{} affected", status.affected()),
    }
}

//! PostgreSQL rendering of query plans
//!
//! Plans render against the `characters` table's indexed columns with
//! `$n` placeholders; values are returned separately, in placeholder order.

use std::fmt;
use uuid::Uuid;

use super::ast::{Predicate, SortTerm};
use super::planner::{CountQuery, SelectQuery};

const TABLE: &str = "characters";

const REFERENCE_COLUMNS: &str = "id, universe_id, owner_id, name, tag, avatar_url, hidden, \
     name_hidden, first_name, last_name, preferred_name, created_at, updated_at";

/// A bound query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Uuid(Uuid),
    Text(String),
    Int(i64),
}

/// Renders the parameter as a SQL literal
impl fmt::Display for SqlParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlParam::Uuid(id) => write!(f, "'{}'", id),
            SqlParam::Text(text) => write!(f, "'{}'", text.replace('\'', "''")),
            SqlParam::Int(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Default)]
struct SqlBuilder {
    params: Vec<SqlParam>,
}

impl SqlBuilder {
    fn bind(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    fn predicate(&mut self, predicate: &Predicate) -> String {
        match predicate {
            Predicate::UniverseIs(id) => format!("universe_id = {}", self.bind(SqlParam::Uuid(*id))),
            Predicate::NotHidden => "NOT hidden".to_string(),
            Predicate::OwnedBy(id) => format!("owner_id = {}", self.bind(SqlParam::Uuid(*id))),
            Predicate::NameLike(pattern) => {
                format!("name ILIKE {}", self.bind(SqlParam::Text(pattern.to_string())))
            }
            Predicate::And(clauses) => self.join(clauses, " AND ", "TRUE"),
            Predicate::Or(clauses) => self.join(clauses, " OR ", "FALSE"),
        }
    }

    fn join(&mut self, clauses: &[Predicate], separator: &str, empty: &str) -> String {
        match clauses {
            [] => empty.to_string(),
            [single] => self.predicate(single),
            _ => {
                let parts: Vec<String> = clauses
                    .iter()
                    .map(|clause| match clause {
                        Predicate::And(_) | Predicate::Or(_) => format!("({})", self.predicate(clause)),
                        _ => self.predicate(clause),
                    })
                    .collect();
                parts.join(separator)
            }
        }
    }

    fn limit(&mut self, value: u64) -> String {
        self.bind(SqlParam::Int(i64::try_from(value).unwrap_or(i64::MAX)))
    }
}

fn sort_expression(term: SortTerm) -> &'static str {
    match term {
        SortTerm::NameHiddenLast => "name_hidden",
        SortTerm::IncompleteNameLast => "(name_hidden OR (first_name = '' AND last_name = ''))",
        SortTerm::Name => "name",
        SortTerm::EffectiveSurname => "COALESCE(NULLIF(preferred_name, ''), last_name)",
        SortTerm::LastName => "last_name",
        SortTerm::FirstName => "first_name",
        SortTerm::Id => "id",
    }
}

impl SelectQuery {
    /// Renders the query and its parameters
    pub fn to_sql(&self) -> (String, Vec<SqlParam>) {
        let mut builder = SqlBuilder::default();
        let filter = builder.predicate(&self.predicate);
        let order: Vec<String> = self
            .sort
            .iter()
            .map(|term| format!("{} ASC", sort_expression(*term)))
            .collect();
        let limit = builder.limit(self.limit);
        let offset = builder.limit(self.offset);

        let mut sql = format!("SELECT {} FROM {} WHERE {}", REFERENCE_COLUMNS, TABLE, filter);
        if !order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
        }
        sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        (sql, builder.params)
    }
}

impl CountQuery {
    /// Renders the query and its parameters
    pub fn to_sql(&self) -> (String, Vec<SqlParam>) {
        let mut builder = SqlBuilder::default();
        let filter = builder.predicate(&self.predicate);
        (
            format!("SELECT count(*) FROM {} WHERE {}", TABLE, filter),
            builder.params,
        )
    }
}

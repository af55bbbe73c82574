//! Named statement parameters
//!
//! Statement templates name their parameters (`@Title`, `@FormId`). Before a
//! template reaches SQLite every placeholder is rewritten to a positional
//! `$N` and the values are handed to the driver as bound arguments. Values
//! never enter the statement text.

use std::collections::HashSet;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteArguments;
use sqlx::Arguments;

use super::DbError;

/// Placeholder prefix in statement templates
const PLACEHOLDER: char = '@';

/// A typed parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Text(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Ordered set of named parameters for one statement.
///
/// ```
/// use formctl_server::db::Params;
///
/// let params = Params::new().bind("Title", "Survey").bind("FormId", 3);
/// assert_eq!(params.names().collect::<Vec<_>>(), vec!["Title", "FormId"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Params(Vec<(&'static str, SqlValue)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. `name` is given without the `@` prefix.
    pub fn bind(mut self, name: &'static str, value: impl Into<SqlValue>) -> Self {
        self.0.push((name, value.into()));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(name, _)| *name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|(n, _)| *n == name)
    }

    fn check_unique(&self) -> Result<(), DbError> {
        let mut seen = HashSet::with_capacity(self.0.len());
        for (name, _) in &self.0 {
            if !seen.insert(*name) {
                return Err(DbError::DuplicateParameter { name: *name });
            }
        }
        Ok(())
    }
}

/// A template with its placeholders resolved to positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    /// Statement text with `$N` placeholders
    pub sql: String,
    /// For each `$N`, the index of the parameter in `Params`
    order: Vec<usize>,
}

impl Prepared {
    /// Resolve every `@Name` in `template` against `params`.
    ///
    /// Placeholders inside single-quoted literals are left untouched. A name
    /// used twice maps to the same `$N`. Parameters the template never
    /// mentions are not sent.
    pub fn new(template: &str, params: &Params) -> Result<Self, DbError> {
        params.check_unique()?;

        let mut sql = String::with_capacity(template.len());
        let mut order: Vec<usize> = Vec::new();
        let mut in_literal = false;
        let mut chars = template.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if in_literal {
                sql.push(c);
                if c == '\'' {
                    in_literal = false;
                }
                continue;
            }

            match c {
                '\'' => {
                    in_literal = true;
                    sql.push(c);
                }
                PLACEHOLDER => {
                    let start = i + c.len_utf8();
                    let mut end = start;
                    while let Some(&(j, n)) = chars.peek() {
                        if n.is_ascii_alphanumeric() || n == '_' {
                            end = j + n.len_utf8();
                            chars.next();
                        } else {
                            break;
                        }
                    }

                    if end == start {
                        sql.push(c);
                        continue;
                    }

                    let name = &template[start..end];
                    let index = params.position(name).ok_or_else(|| DbError::UnboundParameter {
                        name: name.to_owned(),
                    })?;

                    let slot = match order.iter().position(|&o| o == index) {
                        Some(existing) => existing,
                        None => {
                            order.push(index);
                            order.len() - 1
                        }
                    };
                    let _ = write!(sql, "${}", slot + 1);
                }
                _ => sql.push(c),
            }
        }

        Ok(Self { sql, order })
    }

    /// Driver arguments in placeholder order.
    pub fn arguments<'p>(&self, params: &'p Params) -> Result<SqliteArguments<'p>, DbError> {
        let mut args = SqliteArguments::default();

        for &index in &self.order {
            let (name, value) = (params.0[index].0, &params.0[index].1);
            let added = match value {
                SqlValue::Null => args.add(Option::<i64>::None),
                SqlValue::Int(v) => args.add(*v),
                SqlValue::Text(v) => args.add(v.as_str()),
                SqlValue::Bool(v) => args.add(*v),
                SqlValue::Timestamp(v) => args.add(*v),
            };
            added.map_err(|source| DbError::Bind { name, source })?;
        }

        Ok(args)
    }

    /// Number of distinct parameters the statement uses
    pub fn arity(&self) -> usize {
        self.order.len()
    }
}

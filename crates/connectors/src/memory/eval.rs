//! Row-level evaluation of query expressions.
//!
//! Follows PostgreSQL semantics: comparisons involving NULL are unknown,
//! `AND`/`OR` use three-valued logic, and a `WHERE` clause keeps a row only
//! when it evaluates to true.

use crate::sql::base::error::DbError;
use model::{core::value::Value, records::row::RowData};
use planner::query::ast::{
    common::OrderDir,
    expr::{BinaryOp, BinaryOperator, Expr},
};
use std::cmp::Ordering;

/// Evaluates an expression against a row.
pub trait Evaluator {
    fn evaluate(&self, row: &RowData) -> Result<Value, DbError>;
}

impl Evaluator for Expr {
    fn evaluate(&self, row: &RowData) -> Result<Value, DbError> {
        match self {
            // Rows are schemaless; an absent column reads as NULL.
            Expr::Identifier(ident) => Ok(row.get_value(&ident.name)),
            Expr::Value(value) => Ok(value.clone()),
            Expr::BinaryOp(op) => op.evaluate(row),
            Expr::Cast { expr, data_type } => cast(expr.evaluate(row)?, data_type),
            Expr::Wildcard => Err(DbError::Evaluation(
                "`*` cannot be used as a value".to_string(),
            )),
        }
    }
}

impl Evaluator for BinaryOp {
    fn evaluate(&self, row: &RowData) -> Result<Value, DbError> {
        match self.op {
            BinaryOperator::And => {
                let left = truth(&self.left.evaluate(row)?)?;
                let right = truth(&self.right.evaluate(row)?)?;
                Ok(from_truth(match (left, right) {
                    (Some(false), _) | (_, Some(false)) => Some(false),
                    (Some(true), Some(true)) => Some(true),
                    _ => None,
                }))
            }
            BinaryOperator::Or => {
                let left = truth(&self.left.evaluate(row)?)?;
                let right = truth(&self.right.evaluate(row)?)?;
                Ok(from_truth(match (left, right) {
                    (Some(true), _) | (_, Some(true)) => Some(true),
                    (Some(false), Some(false)) => Some(false),
                    _ => None,
                }))
            }
            BinaryOperator::ILike => {
                let text = self.left.evaluate(row)?;
                let pattern = self.right.evaluate(row)?;
                Ok(match (text.as_string(), pattern.as_string()) {
                    (Some(text), Some(pattern)) => Value::Boolean(ilike(&text, &pattern)),
                    _ => Value::Null,
                })
            }
            op => {
                let left = self.left.evaluate(row)?;
                let right = self.right.evaluate(row)?;
                if left.is_null() || right.is_null() {
                    return Ok(Value::Null);
                }

                let ordering = left.compare(&right).ok_or_else(|| {
                    DbError::Evaluation(format!("cannot compare {left:?} with {right:?}"))
                })?;

                Ok(Value::Boolean(match op {
                    BinaryOperator::Eq => ordering == Ordering::Equal,
                    BinaryOperator::NotEq => ordering != Ordering::Equal,
                    BinaryOperator::Lt => ordering == Ordering::Less,
                    BinaryOperator::LtEq => ordering != Ordering::Greater,
                    BinaryOperator::Gt => ordering == Ordering::Greater,
                    BinaryOperator::GtEq => ordering != Ordering::Less,
                    other => {
                        return Err(DbError::Evaluation(format!(
                            "{other:?} is not a comparison operator"
                        )));
                    }
                }))
            }
        }
    }
}

/// Only text casts are supported; they are how enum-like columns are compared.
fn cast(value: Value, data_type: &str) -> Result<Value, DbError> {
    match data_type.to_ascii_lowercase().as_str() {
        "text" => Ok(value.as_string().map_or(Value::Null, Value::String)),
        other => Err(DbError::Evaluation(format!("unsupported cast to {other}"))),
    }
}

/// Returns true when `condition` holds for `row`; unknown counts as false.
pub fn matches(condition: &Expr, row: &RowData) -> Result<bool, DbError> {
    Ok(truth(&condition.evaluate(row)?)? == Some(true))
}

/// Compares two rows' precomputed ORDER BY keys.
///
/// NULLs sort last ascending and first descending, like PostgreSQL's default.
pub fn compare_keys(directions: &[OrderDir], a: &[Value], b: &[Value]) -> Ordering {
    for ((dir, a), b) in directions.iter().zip(a).zip(b) {
        let ordering = match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.compare(b).unwrap_or(Ordering::Equal),
        };
        let ordering = match dir {
            OrderDir::Asc => ordering,
            OrderDir::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Case-insensitive SQL `LIKE` match. `%` matches any run of characters,
/// `_` exactly one, and a backslash escapes the following character.
pub fn ilike(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.to_lowercase().chars().collect();
    let tokens = tokenize(&pattern.to_lowercase());

    // reachable[j]: the tokens consumed so far match text[..j]
    let mut reachable = vec![false; text.len() + 1];
    reachable[0] = true;

    for token in &tokens {
        let mut next = vec![false; text.len() + 1];
        match token {
            LikeToken::AnySeq => {
                let mut seen = false;
                for j in 0..=text.len() {
                    seen |= reachable[j];
                    next[j] = seen;
                }
            }
            LikeToken::AnyChar => {
                for j in 1..=text.len() {
                    next[j] = reachable[j - 1];
                }
            }
            LikeToken::Literal(c) => {
                for j in 1..=text.len() {
                    next[j] = reachable[j - 1] && text[j - 1] == *c;
                }
            }
        }
        reachable = next;
    }

    reachable[text.len()]
}

enum LikeToken {
    AnySeq,
    AnyChar,
    Literal(char),
}

fn tokenize(pattern: &str) -> Vec<LikeToken> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '%' => LikeToken::AnySeq,
            '_' => LikeToken::AnyChar,
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            c => LikeToken::Literal(c),
        });
    }
    tokens
}

fn truth(value: &Value) -> Result<Option<bool>, DbError> {
    match value {
        Value::Boolean(b) => Ok(Some(*b)),
        Value::Null => Ok(None),
        other => Err(DbError::Evaluation(format!(
            "expected a boolean condition, got {other:?}"
        ))),
    }
}

fn from_truth(truth: Option<bool>) -> Value {
    truth.map(Value::Boolean).unwrap_or(Value::Null)
}

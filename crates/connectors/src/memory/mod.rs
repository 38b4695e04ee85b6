//! In-process store that executes the same `Select` AST the Postgres adapter
//! renders, with PostgreSQL comparison and ordering semantics.

pub mod adapter;
pub mod eval;

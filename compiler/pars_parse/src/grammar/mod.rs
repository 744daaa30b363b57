//! Grammar productions, split by statements and expressions.

mod expr;
mod stmt;

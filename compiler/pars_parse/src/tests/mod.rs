//! Parser tests.

mod recovery;

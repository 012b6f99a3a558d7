//! [libs/core/pattern/src/lib.rs]
//!
//! Compiles Base58 address prefixes into a coalesced table of HASH160
//! intervals, and estimates how many attempts a given table should
//! take to satisfy.

pub mod compiler;
pub mod difficulty;
pub mod errors;
pub mod table;

pub mod prelude {
    pub use crate::compiler::{compile_anycase_prefix, compile_prefix};
    pub use crate::difficulty::expected_attempts;
    pub use crate::errors::PatternError;
    pub use crate::table::{Interval, PatternTable, PatternTableBuilder};
}

use crate::errors::PatternError;
use crate::table::PatternTable;

/// Compiles a full set of user-supplied prefixes (already split by the
/// caller) into a single `PatternTable`, honoring per-prefix
/// case-sensitivity.
pub fn compile_patterns(prefixes: &[String], case_insensitive: bool) -> Result<PatternTable, PatternError> {
    if prefixes.is_empty() {
        return Err(PatternError::NoPrefixesSupplied);
    }

    let mut builder = table::PatternTableBuilder::new();
    for prefix in prefixes {
        if case_insensitive {
            compiler::compile_anycase_prefix(&mut builder, prefix)?;
        } else {
            compiler::compile_prefix(&mut builder, prefix)?;
        }
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiling_with_no_prefixes_is_an_error() {
        assert!(matches!(compile_patterns(&[], false), Err(PatternError::NoPrefixesSupplied)));
    }

    #[test]
    fn compiling_a_single_prefix_produces_a_nonempty_table() {
        let table = compile_patterns(&["1A".to_string()], false).unwrap();
        assert!(!table.is_empty());
    }
}

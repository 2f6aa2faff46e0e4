//! Criteria compilation.

mod compiler;
mod types;

pub use compiler::{Compilation, ConditionCompiler, DropReason, DroppedCriterion};
pub use types::{
    CompiledPredicate, Comparison, SearchCriterion, SearchOperator, UnknownOperator,
};

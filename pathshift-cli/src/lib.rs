//! Rewrite import path prefixes across a source tree.
//!
//! A [`rules::RuleSet`] holds ordered literal substitutions. A
//! [`rewrite::TreeRewriter`] walks a directory, applies the rules to every
//! `.ts`/`.tsx` file outside `node_modules` and `.git`, and writes back only
//! the files whose content changed.

pub mod commands;
pub mod core;
pub mod rewrite;
pub mod rules;

pub use crate::core::error::{PathShiftError, Result};
pub use crate::rewrite::{FileError, FileEvent, RewriteOptions, RewriteReport, TreeRewriter};
pub use crate::rules::{ReplacementRule, RuleSet};

//! The per-file analysis pipeline
//!
//! [`Analyzer`] is configured once (charset, checks) and then driven file by
//! file. Each file gets its own [`FileContext`] holding everything the
//! passes need; nothing about the current file lives on the analyzer
//! itself, so files can be processed on parallel workers.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::base::LineIndex;
use crate::checks::{Check, CheckContext, CheckEngine, CheckFailure, Issue, default_checks};
use crate::highlight::{HighlightRange, SymbolAnnotation, symbol_annotations, syntax_highlighting};
use crate::metrics::{FileMeasures, measure};
use crate::parser::ast::AstNode;
use crate::parser::{Parse, parse};
use crate::semantic::{SymbolTable, build};

/// A file the analyzer had to give up on. The batch keeps going; a failed
/// file just produces no analysis.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("{}: source is not valid {charset}", path.display())]
    Encoding { path: PathBuf, charset: &'static str },

    #[error("{}:{line}:{column}: {message}", path.display())]
    Syntax {
        path: PathBuf,
        /// 1-indexed
        line: u32,
        /// 1-indexed
        column: u32,
        message: String,
    },
}

/// Everything derived from one file, built wholesale and dropped together
pub struct FileContext {
    pub path: PathBuf,
    pub source: String,
    pub parse: Parse,
    pub line_index: LineIndex,
    pub symbols: SymbolTable,
}

impl FileContext {
    pub fn build(path: PathBuf, source: String) -> Self {
        let parse = parse(&source);
        let line_index = LineIndex::new(&source);
        let symbols = build(&parse.tree());
        Self {
            path,
            source,
            parse,
            line_index,
            symbols,
        }
    }
}

/// The complete analysis output for one file
#[derive(Debug)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub measures: FileMeasures,
    pub issues: Vec<Issue>,
    /// Checks that panicked on this file
    pub failures: Vec<CheckFailure>,
    pub syntax_highlighting: Vec<HighlightRange>,
    /// Offset-sorted, non-overlapping
    pub symbol_highlighting: Vec<SymbolAnnotation>,
}

type CheckFactory = Box<dyn Fn() -> Vec<Box<dyn Check>> + Send + Sync>;

pub struct Analyzer {
    charset: &'static Encoding,
    checks: CheckFactory,
}

impl Analyzer {
    /// An analyzer with the default check set
    pub fn new(charset: &'static Encoding) -> Self {
        Self::with_checks(charset, default_checks)
    }

    /// An analyzer with a custom check set. The factory is invoked per file
    /// so every worker gets its own check instances.
    pub fn with_checks(
        charset: &'static Encoding,
        checks: impl Fn() -> Vec<Box<dyn Check>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            charset,
            checks: Box::new(checks),
        }
    }

    /// Decode, parse, and run every pass over one file
    pub fn analyze_bytes(&self, path: &Path, bytes: &[u8]) -> Result<FileAnalysis, AnalyzeError> {
        let source = self.decode(path, bytes)?;
        let context = FileContext::build(path.to_path_buf(), source);
        self.analyze(context)
    }

    fn decode(&self, path: &Path, bytes: &[u8]) -> Result<String, AnalyzeError> {
        let (text, actual, had_errors) = self.charset.decode(bytes);
        if had_errors {
            return Err(AnalyzeError::Encoding {
                path: path.to_path_buf(),
                charset: actual.name(),
            });
        }
        Ok(text.into_owned())
    }

    fn analyze(&self, context: FileContext) -> Result<FileAnalysis, AnalyzeError> {
        // Files the parser could not make sense of are skipped wholesale,
        // so no pass ever sees a tree it cannot trust.
        if let Some(error) = context.parse.errors.first() {
            let pos = context.line_index.line_col(error.range.start());
            return Err(AnalyzeError::Syntax {
                path: context.path,
                line: pos.line + 1,
                column: pos.col + 1,
                message: error.message.clone(),
            });
        }

        let tree = context.parse.tree();
        let root = tree.syntax();

        let mut engine = CheckEngine::new((self.checks)());
        engine.prepare(self.charset);
        let outcome = engine.run(&CheckContext {
            path: &context.path,
            source: &context.source,
            root,
            line_index: &context.line_index,
            symbols: &context.symbols,
        });

        let analysis = FileAnalysis {
            measures: measure(root, &context.line_index),
            issues: outcome.issues,
            failures: outcome.failures,
            syntax_highlighting: syntax_highlighting(root),
            symbol_highlighting: symbol_annotations(&context.symbols),
            path: context.path,
        };
        debug!(
            path = %analysis.path.display(),
            issues = analysis.issues.len(),
            "file analyzed"
        );
        Ok(analysis)
    }

    /// Analyze a batch in parallel; results come back in input order
    pub fn analyze_all(
        &self,
        inputs: &[(PathBuf, Vec<u8>)],
    ) -> Vec<Result<FileAnalysis, AnalyzeError>> {
        info!(files = inputs.len(), "starting batch analysis");
        inputs
            .par_iter()
            .map(|(path, bytes)| self.analyze_bytes(path, bytes))
            .collect()
    }
}

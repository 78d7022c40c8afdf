//! phpscope-analyze: Structural analysis of PHP token streams
//!
//! A single forward pass over a classified token list reconstructs the
//! declarations of a file:
//!
//! - classes, traits and interfaces with parent, interfaces, modifiers,
//!   docblock, package and line range
//! - methods and free functions with visibility, signature and cyclomatic
//!   complexity
//! - line-of-code counters (total, comment, non-comment)
//!
//! # Example
//!
//! ```no_run
//! use phpscope_analyze::Analyzer;
//! use std::path::Path;
//!
//! let analyzer = Analyzer::new();
//! let analysis = analyzer.analyze_file(Path::new("src/Foo.php")).unwrap();
//!
//! for (name, class) in analysis.classes() {
//!     println!("{} ({}-{})", name, class.start_line, class.end_line);
//! }
//! ```

pub mod builder;
pub mod docblock;
pub mod extract;
pub mod loc;
pub mod logging;
pub mod scope;
pub mod symbols;

pub use builder::SymbolTableBuilder;
pub use symbols::{
    ClassSymbol, ContainerKind, FileAnalysis, FunctionName, FunctionSymbol, LinesOfCode,
    Modifier, Package, Visibility,
};

use phpscope_core::{RawToken, TokenError};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Analyze a raw token stream produced by any PHP lexer
pub fn analyze_tokens(raw: Vec<RawToken>) -> Result<FileAnalysis, TokenError> {
    let tokens = phpscope_core::prepare_tokens(raw)?;
    Ok(SymbolTableBuilder::new(&tokens).build())
}

/// File-level driver: reads files, runs the pass, analyzes many files in
/// parallel
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    exclude: Vec<glob::Pattern>,
    exclude_dirs: Vec<String>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip files matching any of the given glob patterns during discovery.
    ///
    /// A pattern ending in `/` excludes every file under a directory of that
    /// name.
    pub fn with_excludes<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self, AnalyzeError> {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if let Some(dir) = pattern.strip_suffix('/') {
                self.exclude_dirs.push(dir.to_string());
                continue;
            }
            let compiled = glob::Pattern::new(pattern).map_err(|e| AnalyzeError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
            self.exclude.push(compiled);
        }
        Ok(self)
    }

    /// Check a path against the exclusion patterns, by full path and by
    /// file name
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude {
            if pattern.matches(&path_str) {
                return true;
            }
            if let Some(file_name) = path.file_name() {
                if pattern.matches(&file_name.to_string_lossy()) {
                    return true;
                }
            }
        }

        self.exclude_dirs.iter().any(|dir| {
            path_str.contains(&format!("/{}/", dir)) || path_str.starts_with(&format!("{}/", dir))
        })
    }

    /// Analyze a single file
    pub fn analyze_file(&self, path: &Path) -> Result<FileAnalysis, AnalyzeError> {
        let source = fs::read_to_string(path).map_err(|source| AnalyzeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.analyze_source(path, &source)
    }

    /// Analyze source code with a given path
    pub fn analyze_source(&self, path: &Path, source: &str) -> Result<FileAnalysis, AnalyzeError> {
        let tokens = phpscope_core::tokenize_source(source).map_err(|source| {
            AnalyzeError::Token {
                path: path.to_path_buf(),
                source,
            }
        })?;

        logging::log_file_start(path, tokens.len());

        let analysis = SymbolTableBuilder::new(&tokens).with_path(path).build();

        let lines = analysis.lines_of_code();
        logging::log_file_summary(
            path,
            analysis.containers().count(),
            analysis.all_functions().count(),
            lines.loc,
            lines.cloc,
            lines.ncloc,
        );

        Ok(analysis)
    }

    /// Collect the PHP files under the given paths, sorted.
    ///
    /// Explicit file arguments are kept even when they match an exclusion.
    pub fn collect_files(&self, paths: &[&Path]) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = Vec::new();

        for path in paths {
            if path.is_file() {
                files.push(path.to_path_buf());
            } else if path.is_dir() {
                for entry in WalkDir::new(path)
                    .follow_links(true)
                    .into_iter()
                    .filter_map(|e| e.ok())
                {
                    let entry_path = entry.path();
                    if entry_path.is_file()
                        && entry_path.extension().map(|e| e == "php").unwrap_or(false)
                        && !self.is_excluded(entry_path)
                    {
                        files.push(entry_path.to_path_buf());
                    }
                }
            }
        }

        files.sort();
        files.dedup();
        files
    }

    /// Analyze multiple paths (files or directories)
    pub fn analyze_paths(&self, paths: &[&Path]) -> AnalysisReport {
        let files = self.collect_files(paths);
        logging::log_analysis_start(files.len());

        // Analyze files in parallel
        let results: Vec<_> = files
            .par_iter()
            .map(|file| (file.clone(), self.analyze_file(file)))
            .collect();

        let mut report = AnalysisReport::default();
        for (path, result) in results {
            match result {
                Ok(analysis) => report.files.push((path, analysis)),
                Err(e) => {
                    logging::log_file_error(&path, &e.to_string());
                    report.errors.push(e);
                }
            }
        }

        logging::log_analysis_complete(report.files.len(), report.errors.len());
        report
    }
}

/// Results of a multi-file run, in path order
#[derive(Debug, Default)]
pub struct AnalysisReport {
    pub files: Vec<(PathBuf, FileAnalysis)>,
    pub errors: Vec<AnalyzeError>,
}

impl AnalysisReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Line counters summed over every analyzed file
    pub fn total_lines(&self) -> LinesOfCode {
        let (loc, cloc) = self.files.iter().fold((0, 0), |(loc, cloc), (_, analysis)| {
            let lines = analysis.lines_of_code();
            (loc + lines.loc, cloc + lines.cloc)
        });
        LinesOfCode::new(loc, cloc)
    }
}

/// Errors that can occur during analysis
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Token {
        path: PathBuf,
        #[source]
        source: TokenError,
    },

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl AnalyzeError {
    /// File the error belongs to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            AnalyzeError::Io { path, .. } | AnalyzeError::Token { path, .. } => Some(path),
            AnalyzeError::InvalidPattern { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_analyze_simple_php() {
        let analyzer = Analyzer::new();
        let source = "<?php\necho 'hello';\n";
        let analysis = analyzer.analyze_source(Path::new("test.php"), source).unwrap();

        assert!(analysis.is_empty());
        assert_eq!(analysis.lines_of_code().loc, 2);
    }

    #[test]
    fn test_analyze_tokens_rejects_unknown_punctuation() {
        let raw = vec![RawToken::named("T_OPEN_TAG", "<?php "), RawToken::Char('\\')];
        let err = analyze_tokens(raw).unwrap_err();
        assert!(matches!(err, TokenError::UnknownPunctuation { ch: '\\', index: 1, .. }));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let analyzer = Analyzer::new();
        let err = analyzer.analyze_file(Path::new("/nonexistent/Foo.php")).unwrap_err();

        assert_eq!(err.path(), Some(Path::new("/nonexistent/Foo.php")));
        assert!(err.to_string().contains("Foo.php"));
    }

    #[test]
    fn test_excludes() {
        let analyzer = Analyzer::new()
            .with_excludes(&["*.generated.php", "vendor/"])
            .unwrap();

        assert!(analyzer.is_excluded(Path::new("src/Foo.generated.php")));
        assert!(analyzer.is_excluded(Path::new("project/vendor/lib/Foo.php")));
        assert!(analyzer.is_excluded(Path::new("vendor/Foo.php")));
        assert!(!analyzer.is_excluded(Path::new("src/vendor.php")));
        assert!(!analyzer.is_excluded(Path::new("src/Foo.php")));
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let err = Analyzer::new().with_excludes(&["[unclosed"]).unwrap_err();
        assert!(matches!(err, AnalyzeError::InvalidPattern { .. }));
    }

    #[test]
    fn test_analyze_paths_sorted_with_errors() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.php"), "<?php\nclass B {}\n").unwrap();
        fs::write(dir.path().join("a.php"), "<?php\nclass A {}\n").unwrap();
        fs::write(dir.path().join("bad.php"), "<?php\n\u{1}\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "class C {}").unwrap();

        let report = Analyzer::new().analyze_paths(&[dir.path()]);

        let names: Vec<_> = report
            .files
            .iter()
            .filter_map(|(path, _)| path.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.php", "b.php"]);
        assert_eq!(report.errors.len(), 1);
        assert!(report.has_errors());
        assert_eq!(report.total_lines().loc, 4);
    }
}

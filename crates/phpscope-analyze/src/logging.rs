//! Debug logging for phpscope-analyze
//!
//! Records which files are analyzed, which scopes the pass opens and closes,
//! scopes whose braces never balance, and a per-file summary.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Global logger instance
static LOGGER: Mutex<Option<AnalyzeLogger>> = Mutex::new(None);

/// Logger for analyze operations
pub struct AnalyzeLogger {
    file: File,
}

impl AnalyzeLogger {
    /// Create a new logger writing to the specified path
    pub fn new(log_path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;

        Ok(Self { file })
    }

    /// Write a log message
    pub fn log(&mut self, message: &str) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(self.file, "[{}] {}", timestamp, message);
        let _ = self.file.flush();
    }

    /// Log a section header
    pub fn section(&mut self, title: &str) {
        let separator = "=".repeat(60);
        self.log(&separator);
        self.log(title);
        self.log(&separator);
    }

    /// Log a subsection
    pub fn subsection(&mut self, title: &str) {
        let separator = "-".repeat(40);
        self.log(&separator);
        self.log(title);
        self.log(&separator);
    }
}

/// Initialize the global logger
pub fn init_logger(log_path: Option<&Path>) -> std::io::Result<PathBuf> {
    let path = log_path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| {
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            std::env::temp_dir().join(format!("phpscope-{}.log", timestamp))
        });

    let logger = AnalyzeLogger::new(&path)?;

    if let Ok(mut guard) = LOGGER.lock() {
        *guard = Some(logger);
    }

    Ok(path)
}

/// Log a message to the global logger
pub fn log(message: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.log(message);
        }
    }
}

/// Log a section header
pub fn section(title: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.section(title);
        }
    }
}

/// Log a subsection
pub fn subsection(title: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.subsection(title);
        }
    }
}

/// Check if logging is enabled
pub fn is_enabled() -> bool {
    if let Ok(guard) = LOGGER.lock() {
        guard.is_some()
    } else {
        false
    }
}

/// Log the start of a file pass
pub fn log_file_start(path: &Path, token_count: usize) {
    if !is_enabled() {
        return;
    }
    subsection(&format!("FILE {}", path.display()));
    log(&format!("Tokens: {}", token_count));
}

/// Log a scope opened by the pass
pub fn log_scope_open(kind: &str, name: &str, start_line: usize, end_line: usize) {
    if !is_enabled() {
        return;
    }
    log(&format!("Open {} {} (lines {}-{})", kind, name, start_line, end_line));
}

/// Log a scope closed by the pass
pub fn log_scope_close(name: &str, end_line: usize) {
    if !is_enabled() {
        return;
    }
    let name = if name.is_empty() { "anonymous function" } else { name };
    log(&format!("Close {} at line {}", name, end_line));
}

/// Log a declaration whose braces never balance
pub fn log_unbalanced_scope(path: Option<&Path>, kind: &str, name: &str, line: usize) {
    if !is_enabled() {
        return;
    }
    let location = path.map(|p| p.display().to_string()).unwrap_or_default();
    log(&format!(
        "UNBALANCED: {}:{} {} {} has no matching close, using zero-length range",
        location, line, kind, name
    ));
}

/// Log a halt marker ending the pass early
pub fn log_halt(line: usize) {
    log(&format!("Halt marker at line {}, remaining input ignored", line));
}

/// Log the outcome of a file pass
pub fn log_file_summary(
    path: &Path,
    containers: usize,
    functions: usize,
    loc: usize,
    cloc: usize,
    ncloc: usize,
) {
    if !is_enabled() {
        return;
    }
    log(&format!(
        "{}: {} containers, {} functions, loc={} cloc={} ncloc={}",
        path.display(),
        containers,
        functions,
        loc,
        cloc,
        ncloc
    ));
}

/// Log analysis start
pub fn log_analysis_start(files_count: usize) {
    section("ANALYSIS START");
    log(&format!("Analyzing {} files", files_count));
}

/// Log analysis complete
pub fn log_analysis_complete(analyzed: usize, failed: usize) {
    section("ANALYSIS COMPLETE");
    log(&format!("Files analyzed: {}", analyzed));
    log(&format!("Files failed: {}", failed));
}

/// Log a file that could not be analyzed
pub fn log_file_error(path: &Path, error: &str) {
    log(&format!("FAILED: {} - {}", path.display(), error));
}

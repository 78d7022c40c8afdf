//! Output formatting for phpscope
//!
//! Supports text (colored terminal) and JSON output formats.

use colored::*;
use phpscope_analyze::{ClassSymbol, FileAnalysis, FunctionSymbol};
use serde::Serialize;
use std::path::Path;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<OutputFormat> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Result of analyzing a single file
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub path: String,
    #[serde(flatten)]
    pub analysis: Option<FileAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileResult {
    pub fn success(path: &Path, analysis: FileAnalysis) -> Self {
        Self {
            path: path.display().to_string(),
            analysis: Some(analysis),
            error: None,
        }
    }

    pub fn error(path: &Path, error: String) -> Self {
        Self {
            path: path.display().to_string(),
            analysis: None,
            error: Some(error),
        }
    }
}

/// Summary statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub files_analyzed: usize,
    pub classes: usize,
    pub traits: usize,
    pub interfaces: usize,
    pub functions: usize,
    pub methods: usize,
    pub loc: usize,
    pub cloc: usize,
    pub ncloc: usize,
    pub errors: usize,
}

impl Summary {
    fn add(&mut self, analysis: &FileAnalysis) {
        let lines = analysis.lines_of_code();

        self.files_analyzed += 1;
        self.classes += analysis.classes().len();
        self.traits += analysis.traits().len();
        self.interfaces += analysis.interfaces().len();
        self.functions += analysis.functions().len();
        self.methods += analysis.containers().map(|c| c.methods.len()).sum::<usize>();
        self.loc += lines.loc;
        self.cloc += lines.cloc;
        self.ncloc += lines.ncloc;
    }
}

/// Full JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub version: String,
    pub summary: Summary,
    pub files: Vec<FileResult>,
}

/// Reporter for accumulating and outputting results
pub struct Reporter {
    format: OutputFormat,
    verbose: bool,
    results: Vec<FileResult>,
    summary: Summary,
}

impl Reporter {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self {
            format,
            verbose,
            results: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// Report an analyzed file
    pub fn report_file(&mut self, path: &Path, analysis: FileAnalysis) {
        self.summary.add(&analysis);

        if self.format == OutputFormat::Text {
            print_file(path, &analysis, self.verbose);
        }

        self.results.push(FileResult::success(path, analysis));
    }

    /// Report an error analyzing a file
    pub fn report_error(&mut self, path: &Path, error: &str) {
        self.summary.errors += 1;

        if self.format == OutputFormat::Text {
            eprintln!(
                "{}: {} - {}",
                "Warning".yellow(),
                path.display(),
                error
            );
        }

        self.results.push(FileResult::error(path, error.to_string()));
    }

    /// Print final summary/output
    pub fn finish(self) -> serde_json::Result<()> {
        match self.format {
            OutputFormat::Text => {
                println!();
                println!("{}", "Summary".bold().underline());
                println!("  Files analyzed: {}", self.summary.files_analyzed);
                println!("  Classes: {}", self.summary.classes);
                println!("  Traits: {}", self.summary.traits);
                println!("  Interfaces: {}", self.summary.interfaces);
                println!("  Functions: {}", self.summary.functions);
                println!("  Methods: {}", self.summary.methods);
                println!(
                    "  Lines: {} (comment {}, non-comment {})",
                    self.summary.loc, self.summary.cloc, self.summary.ncloc
                );
                if self.summary.errors > 0 {
                    println!("  Errors: {}", self.summary.errors);
                }
            }
            OutputFormat::Json => {
                let output = JsonOutput {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    summary: self.summary,
                    files: self.results,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        Ok(())
    }

    /// Get summary for exit code determination
    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

fn print_file(path: &Path, analysis: &FileAnalysis, verbose: bool) {
    println!("{}", path.display().to_string().bold());

    for container in analysis.containers() {
        println!("  {}", describe_container(container));
        for method in container.methods.values() {
            println!("    {}", describe_function(method, verbose));
        }
    }

    for (name, function) in analysis.functions() {
        println!("  {} {}", name.cyan(), describe_function(function, verbose));
    }

    let lines = analysis.lines_of_code();
    println!(
        "  {} loc={} cloc={} ncloc={}",
        "->".green(),
        lines.loc,
        lines.cloc,
        lines.ncloc
    );
    println!();
}

fn describe_container(container: &ClassSymbol) -> String {
    let mut text = String::new();
    for modifier in &container.modifiers {
        text.push_str(modifier.as_str());
        text.push(' ');
    }
    text.push_str(&format!("{} {}", container.kind, container.qualified_name().bold()));

    if let Some(parent) = &container.parent {
        text.push_str(&format!(" extends {}", parent));
    }
    if let Some(interfaces) = &container.interfaces {
        text.push_str(&format!(" implements {}", interfaces.join(", ")));
    }
    text.push_str(&format!(
        " (lines {}-{})",
        container.start_line, container.end_line
    ));
    if !container.package.full_package.is_empty() {
        text.push_str(&format!(" [{}]", container.package.full_package));
    }
    text
}

fn describe_function(function: &FunctionSymbol, verbose: bool) -> String {
    let mut text = String::new();
    if let Some(visibility) = function.visibility {
        text.push_str(visibility.as_str());
        text.push(' ');
    }
    for modifier in &function.modifiers {
        text.push_str(modifier.as_str());
        text.push(' ');
    }
    text.push_str(&format!("function {}", function.name));
    if verbose {
        text.push_str(&function.signature);
    }

    let ccn = format!("ccn={}", function.complexity);
    let ccn = if function.complexity > 10 {
        ccn.red()
    } else {
        ccn.normal()
    };
    text.push_str(&format!(
        " {} (lines {}-{})",
        ccn, function.start_line, function.end_line
    ));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use phpscope_analyze::{ContainerKind, FunctionName, Modifier, Visibility};

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str("TEXT"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("xml"), None);
    }

    #[test]
    fn test_describe_container() {
        colored::control::set_override(false);

        let mut class = ClassSymbol::new("Bar", ContainerKind::Class);
        class.modifiers.insert(Modifier::Final);
        class.parent = Some("Base".to_string());
        class.interfaces = Some(vec!["I1".to_string(), "I2".to_string()]);
        class.package.namespace = "Foo".to_string();
        class.package.full_package = "Foo".to_string();
        class.start_line = 3;
        class.end_line = 9;

        assert_eq!(
            describe_container(&class),
            "final class Foo\\Bar extends Base implements I1, I2 (lines 3-9) [Foo]"
        );
    }

    #[test]
    fn test_describe_function() {
        colored::control::set_override(false);

        let mut function = FunctionSymbol::new(FunctionName::named("baz"));
        function.visibility = Some(Visibility::Public);
        function.modifiers.insert(Modifier::Static);
        function.signature = "(int $x): int".to_string();
        function.complexity = 2;
        function.start_line = 4;
        function.end_line = 6;

        assert_eq!(
            describe_function(&function, false),
            "public static function baz ccn=2 (lines 4-6)"
        );
        assert_eq!(
            describe_function(&function, true),
            "public static function baz(int $x): int ccn=2 (lines 4-6)"
        );
    }

    #[test]
    fn test_summary_counts() {
        let mut reporter = Reporter::new(OutputFormat::Json, false);
        reporter.report_file(Path::new("a.php"), FileAnalysis::new());
        reporter.report_error(Path::new("b.php"), "unreadable");

        let summary = reporter.summary();
        assert_eq!(summary.files_analyzed, 1);
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn test_json_serialization() {
        let output = JsonOutput {
            version: "0.1.0".to_string(),
            summary: Summary {
                files_analyzed: 1,
                errors: 1,
                ..Default::default()
            },
            files: vec![
                FileResult::success(Path::new("ok.php"), FileAnalysis::new()),
                FileResult::error(Path::new("bad.php"), "unrecognized punctuation".to_string()),
            ],
        };

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["version"], "0.1.0");
        assert_eq!(json["summary"]["files_analyzed"], 1);
        assert!(json["files"][0]["classes"].is_object());
        assert_eq!(json["files"][0]["linesOfCode"]["loc"], 0);
        assert!(json["files"][0].get("error").is_none());
        assert_eq!(json["files"][1]["error"], "unrecognized punctuation");
        assert!(json["files"][1].get("classes").is_none());
    }
}

//! Lines-of-code accounting

use phpscope_core::lines::newline_count;
use phpscope_core::Token;

use crate::symbols::LinesOfCode;

/// Lines spanned by a comment token: its newlines plus one.
///
/// A trailing line break is not counted. PHP's tokenizer folds the line
/// break ending a `//` or `#` comment into the comment token, and that
/// break does not start another comment line. `"// one\n"` counts as 1.
pub fn comment_lines(text: &str) -> usize {
    newline_count(text.trim_end_matches(['\r', '\n'])) + 1
}

/// Total lines of the source the tokens were lexed from
pub fn total_lines(tokens: &[Token]) -> usize {
    tokens.iter().map(|t| newline_count(&t.text)).sum()
}

/// Counters for a file.
///
/// `halt_line` is the line of a halt marker that ended the pass; lines
/// after it are not counted.
pub fn account(tokens: &[Token], cloc: usize, halt_line: Option<usize>) -> LinesOfCode {
    let mut loc = total_lines(tokens);
    if let Some(line) = halt_line {
        loc = loc.min(line);
    }
    LinesOfCode::new(loc, cloc)
}

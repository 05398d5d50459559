use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Duplicate label: `{0}`")]
    DuplicateLabel(String),

    #[error("Invalid register: `{0}`")]
    InvalidRegister(String),

    #[error("Invalid immediate: `{0}`")]
    InvalidImmediate(String),

    #[error("Undefined symbol: `{0}`")]
    UndefinedSymbol(String),

    #[error("Malformed operand: `{0}`")]
    MalformedOperand(String),

    #[error("Branch offset must be even, got {0}")]
    OddBranchOffset(i32),

    #[error("Unsupported instruction: `{0}`")]
    UnsupportedInstruction(String),

    #[error("Statement not allowed in current section: `{0}`")]
    MalformedSection(String),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),
}

/// An assembly error pinned to its source line. The whole run aborts on the
/// first one; no partial output is produced.
#[derive(Error, Debug)]
#[error("{error} (line {line}: `{text}`)")]
pub struct SourceError {
    pub line: usize,
    pub text: String,
    #[source]
    pub error: Error,
}

impl SourceError {
    pub fn new(error: Error, line: usize, text: &str) -> Self {
        SourceError {
            line,
            text: text.trim().to_string(),
            error,
        }
    }

    /// Print a diagnostic with the file location and offending line.
    pub fn print_diag(&self, file: &str) {
        cprintln!("<red,bold>error</>: {}", self.error);
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, self.line);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", self.line, self.text);
        cprintln!("      <blue>|</>");
    }
}

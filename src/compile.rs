//! External document compiler invocation.
//!
//! The compiler is configured as a single command line (default
//! `xelatex`), parsed once per run. A missing program downgrades the whole
//! run to render-only; a failed pass marks only the affected list.

use crate::error::{Error, Result};
use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};
use std::process::Command;

/// TeX needs multiple passes for cross-references to settle.
pub const COMPILE_PASSES: u32 = 3;

const OUTPUT_SNIPPET_MAX_CHARS: usize = 400;

/// A resolved document compiler command.
#[derive(Debug, Clone)]
pub struct Compiler {
    program: PathBuf,
    args: Vec<String>,
}

impl Compiler {
    /// Parse the configured command line into program + arguments.
    pub fn parse(command: &str) -> Result<Self> {
        let words = shell_words::split(command).map_err(|e| Error::BadCompilerCommand {
            command: command.to_string(),
            reason: e.to_string(),
        })?;
        let Some((program, args)) = words.split_first() else {
            return Err(Error::BadCompilerCommand {
                command: command.to_string(),
                reason: "command is empty".to_string(),
            });
        };
        Ok(Self {
            program: PathBuf::from(program),
            args: args.to_vec(),
        })
    }

    /// Parse the command and locate its program on PATH.
    ///
    /// Returns `Ok(None)` when the program is absent so callers can skip
    /// compilation instead of failing every list.
    pub fn resolve(command: &str) -> Result<Option<Self>> {
        let parsed = Self::parse(command)?;
        match which::which(&parsed.program) {
            Ok(program) => Ok(Some(Self { program, ..parsed })),
            Err(_) => {
                tracing::warn!(
                    program = %parsed.program.display(),
                    "compiler not found on PATH; documents will not be compiled"
                );
                Ok(None)
            }
        }
    }

    /// Compile one rendered document in its own directory.
    pub fn compile(&self, document: &Path) -> anyhow::Result<()> {
        let dir = document
            .parent()
            .ok_or_else(|| anyhow!("document {} has no parent directory", document.display()))?;
        let file_name = document
            .file_name()
            .ok_or_else(|| anyhow!("document {} has no file name", document.display()))?;

        for pass in 1..=COMPILE_PASSES {
            tracing::debug!(pass, document = %document.display(), "compiler pass");
            let output = Command::new(&self.program)
                .args(&self.args)
                .arg(file_name)
                .current_dir(dir)
                .output()
                .with_context(|| format!("spawn compiler {}", self.program.display()))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let stdout = String::from_utf8_lossy(&output.stdout);
                let detail = if stderr.trim().is_empty() {
                    tail_snippet(&stdout)
                } else {
                    tail_snippet(&stderr)
                };
                return Err(anyhow!(
                    "compiler pass {pass} failed with status {}: {detail}",
                    output.status
                ));
            }
        }
        Ok(())
    }
}

/// Last few hundred characters of compiler output, where TeX puts the
/// actual error.
fn tail_snippet(text: &str) -> String {
    let trimmed = text.trim();
    let mut start = trimmed.len().saturating_sub(OUTPUT_SNIPPET_MAX_CHARS);
    while start > 0 && !trimmed.is_char_boundary(start) {
        start += 1;
    }
    trimmed[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_bare_program() {
        let compiler = Compiler::parse("xelatex").unwrap();
        assert_eq!(compiler.program, PathBuf::from("xelatex"));
        assert!(compiler.args.is_empty());
    }

    #[test]
    fn parses_arguments_and_quoting() {
        let compiler = Compiler::parse("tectonic --keep-logs 'extra arg'").unwrap();
        assert_eq!(compiler.program, PathBuf::from("tectonic"));
        assert_eq!(compiler.args, vec!["--keep-logs", "extra arg"]);
    }

    #[test]
    fn empty_command_is_a_config_error() {
        let err = Compiler::parse("   ").unwrap_err();
        assert!(matches!(err, Error::BadCompilerCommand { .. }));
    }

    #[test]
    fn missing_program_resolves_to_none() {
        let resolved = Compiler::resolve("definitely-not-a-real-compiler-9000").unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn tail_snippet_keeps_the_end() {
        let long = "x".repeat(1000) + "! Undefined control sequence.";
        let snippet = tail_snippet(&long);
        assert!(snippet.ends_with("! Undefined control sequence."));
        assert!(snippet.len() <= OUTPUT_SNIPPET_MAX_CHARS);
    }
}

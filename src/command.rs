use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::BenchError;

/// A fully built command: the program to launch and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build the command for `target`.
    ///
    /// With an `interpreter` (e.g. `python`), the interpreter is resolved
    /// through `PATH` and `target` becomes its first argument. Either way
    /// `target` must exist on disk. `extra` is split into further arguments
    /// after removing one layer of surrounding quotes.
    pub fn build(
        target: &str,
        interpreter: Option<&str>,
        extra: Option<&str>,
    ) -> Result<Self, BenchError> {
        let target_path = Path::new(target);
        if !target_path.is_file() {
            return Err(BenchError::TargetNotFound {
                path: target_path.to_path_buf(),
            });
        }

        let mut args = Vec::new();
        let program = match interpreter {
            Some(name) => {
                args.push(target.to_string());
                resolve_executable(name)?
            }
            None => local_program(target_path),
        };

        if let Some(extra) = extra {
            args.extend(split_args(strip_quotes(extra)));
        }

        Ok(Self { program, args })
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote_if_needed(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", quote_if_needed(arg))?;
        }
        Ok(())
    }
}

/// A bare file name would be looked up on `PATH` by the OS; anchor it to the
/// working directory so the checked file is the one that runs.
fn local_program(target: &Path) -> PathBuf {
    if target.components().count() == 1 && target.is_relative() {
        Path::new(".").join(target)
    } else {
        target.to_path_buf()
    }
}

fn quote_if_needed(s: &str) -> String {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        format!("\"{}\"", s)
    } else {
        s.to_string()
    }
}

/// Find an executable on `PATH`, the way `which`/`where` would.
///
/// A name that already contains a path separator is returned unchanged.
pub fn resolve_executable(name: &str) -> Result<PathBuf, BenchError> {
    let path_var = std::env::var_os("PATH").unwrap_or_default();
    resolve_in(name, std::env::split_paths(&path_var))
}

/// Search `dirs` in order for `name`.
pub fn resolve_in(
    name: &str,
    dirs: impl IntoIterator<Item = PathBuf>,
) -> Result<PathBuf, BenchError> {
    let as_path = Path::new(name);
    if as_path.components().count() > 1 {
        return Ok(as_path.to_path_buf());
    }

    for dir in dirs {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if cfg!(windows) {
            let with_ext = dir.join(format!("{}.exe", name));
            if with_ext.is_file() {
                return Ok(with_ext);
            }
        }
    }

    Err(BenchError::ExecutableNotFound {
        name: name.to_string(),
    })
}

/// Remove one matching pair of surrounding `"` or `'`.
pub fn strip_quotes(s: &str) -> &str {
    let trimmed = s.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

/// Split an argument string on whitespace. Quoted sections keep their
/// whitespace; the quote characters themselves are dropped.
pub fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_arg = true;
            }
            None if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            None => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if in_arg {
        args.push(current);
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn split_plain_words() {
        assert_eq!(split_args("a bb  ccc"), vec!["a", "bb", "ccc"]);
    }

    #[test]
    fn split_keeps_quoted_whitespace() {
        assert_eq!(
            split_args(r#"--name "hello world" 'x y' z"#),
            vec!["--name", "hello world", "x y", "z"]
        );
    }

    #[test]
    fn split_empty_quotes_is_an_argument() {
        assert_eq!(split_args(r#"a "" b"#), vec!["a", "", "b"]);
    }

    #[test]
    fn split_blank_input() {
        assert!(split_args("   ").is_empty());
    }

    #[test]
    fn strip_double_and_single_quotes() {
        assert_eq!(strip_quotes("\"1000\""), "1000");
        assert_eq!(strip_quotes("'-c exit'"), "-c exit");
        assert_eq!(strip_quotes("plain"), "plain");
        assert_eq!(strip_quotes("\"mismatched'"), "\"mismatched'");
        assert_eq!(strip_quotes("\""), "\"");
    }

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let cmd = CommandLine::new("/usr/bin/python3", vec!["my script.py".into(), "10".into()]);
        assert_eq!(cmd.to_string(), "/usr/bin/python3 \"my script.py\" 10");
    }

    #[test]
    fn build_without_interpreter() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let exe = tmp.child("tool");
        exe.touch().unwrap();
        let target = exe.path().to_str().unwrap();

        let cmd = CommandLine::build(target, None, Some("\"--fast 3\"")).unwrap();
        assert_eq!(cmd.program, exe.path());
        assert_eq!(cmd.args, vec!["--fast", "3"]);
    }

    #[test]
    fn build_anchors_bare_names_to_working_dir() {
        assert_eq!(local_program(Path::new("bench.sh")), PathBuf::from("./bench.sh"));
        assert_eq!(local_program(Path::new("bin/tool")), PathBuf::from("bin/tool"));
        assert_eq!(local_program(Path::new("/usr/bin/env")), PathBuf::from("/usr/bin/env"));
    }

    #[test]
    fn build_rejects_directories() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let result = CommandLine::build(tmp.path().to_str().unwrap(), None, None);
        assert!(matches!(result, Err(BenchError::TargetNotFound { .. })));
    }

    #[test]
    fn build_missing_target() {
        let result = CommandLine::build("/nonexistent/definitely/missing", None, None);
        assert!(matches!(result, Err(BenchError::TargetNotFound { .. })));
    }

    #[test]
    fn build_with_interpreter_path() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let script = tmp.child("script.py");
        script.touch().unwrap();
        let interp = tmp.child("python");
        interp.touch().unwrap();

        let cmd = CommandLine::build(
            script.path().to_str().unwrap(),
            Some(interp.path().to_str().unwrap()),
            Some("1000"),
        )
        .unwrap();
        assert_eq!(cmd.program, interp.path());
        assert_eq!(
            cmd.args,
            vec![script.path().to_str().unwrap().to_string(), "1000".to_string()]
        );
    }

    #[test]
    fn resolve_searches_dirs_in_order() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let first = tmp.child("first");
        let second = tmp.child("second");
        first.create_dir_all().unwrap();
        second.create_dir_all().unwrap();
        second.child("runme").touch().unwrap();

        let found = resolve_in(
            "runme",
            vec![first.path().to_path_buf(), second.path().to_path_buf()],
        )
        .unwrap();
        assert_eq!(found, second.path().join("runme"));
    }

    #[test]
    fn resolve_ignores_directories() {
        let tmp = assert_fs::TempDir::new().unwrap();
        tmp.child("runme").create_dir_all().unwrap();

        let result = resolve_in("runme", vec![tmp.path().to_path_buf()]);
        assert!(matches!(result, Err(BenchError::ExecutableNotFound { .. })));
    }

    #[test]
    fn resolve_passes_through_paths() {
        let found = resolve_in("./bin/tool", Vec::new()).unwrap();
        assert_eq!(found, PathBuf::from("./bin/tool"));
    }

    #[test]
    fn resolve_unknown_name() {
        let result = resolve_in("no-such-program", Vec::new());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("no-such-program"));
    }
}

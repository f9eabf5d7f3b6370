//! Call stack capture for log records
//!
//! Walks the live stack with the `backtrace` crate and resolves each frame to a
//! source file, line and function name. Frames belonging to the unwinder and to
//! the logger's own emit path are skipped by symbol-name prefix rather than by a
//! fixed count, so the result stays accurate when the compiler inlines wrappers.

use std::fmt;
use std::path::Path;

/// Symbol-name prefix of this module's entry point
const CAPTURE_PREFIX: &str = concat!(module_path!(), "::capture");

/// Frames from the stack walker itself
const UNWINDER_PREFIX: &str = "backtrace::";

/// A single resolved frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Base name of the source file
    pub file: String,
    /// Line number in the source file
    pub line: u32,
    /// Function name without module path or hash
    pub function: String,
}

/// A bounded snapshot of the call stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
    pub frames: Vec<StackFrame>,
}

impl StackTrace {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\nStack Trace:\n")?;
        for frame in &self.frames {
            writeln!(f, "\t{}:{} - {}", frame.file, frame.line, frame.function)?;
        }
        Ok(())
    }
}

/// What a single symbol resolved to
struct Resolved {
    name: Option<String>,
    file: Option<String>,
    line: Option<u32>,
}

/// Capture up to `max_depth` frames of the caller's stack
///
/// Leading frames whose demangled name starts with any of `internal` (or that
/// belong to the stack walker) are skipped. The walk stops early, without
/// error, at the first frame whose name, file or line cannot be resolved.
///
/// File and line come from the binary's debug info, so builds without at least
/// line tables (`debug = "line-tables-only"`) produce an empty trace.
pub fn capture(max_depth: usize, internal: &[&str]) -> StackTrace {
    let mut frames = Vec::new();
    let mut skipping = true;

    backtrace::trace(|frame| {
        let mut symbols = Vec::new();
        backtrace::resolve_frame(frame, |symbol| {
            symbols.push(Resolved {
                name: symbol.name().map(|n| format!("{:#}", n)),
                file: symbol.filename().and_then(base_name),
                line: symbol.lineno(),
            });
        });

        if symbols.is_empty() {
            return false;
        }

        // Inlined calls resolve to several symbols for one physical frame
        for symbol in symbols {
            if frames.len() >= max_depth {
                return false;
            }
            let Some(name) = symbol.name else {
                return false;
            };
            let name = name.trim_start_matches('<');
            if skipping && is_internal(name, internal) {
                continue;
            }
            skipping = false;

            let (Some(file), Some(line)) = (symbol.file, symbol.line) else {
                return false;
            };
            frames.push(StackFrame {
                file,
                line,
                function: short_function_name(name).to_string(),
            });
        }

        frames.len() < max_depth
    });

    StackTrace { frames }
}

/// Prefix test on the name with generic brackets removed
///
/// v0 mangling renders inherent methods as `<app::Logger>::emit`, legacy
/// mangling as `app::Logger::emit`; both normalize to the latter.
fn is_internal(name: &str, internal: &[&str]) -> bool {
    let name: String = name.chars().filter(|c| !matches!(c, '<' | '>')).collect();
    name.starts_with(UNWINDER_PREFIX)
        || name.starts_with(CAPTURE_PREFIX)
        || internal.iter().any(|prefix| name.starts_with(prefix))
}

/// Base name of a source path
pub(crate) fn base_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Reduce a demangled path to its last segment
///
/// `::` inside generic brackets is not a separator. Closure segments keep their
/// parent, e.g. `run::{{closure}}`.
fn short_function_name(full: &str) -> &str {
    let bytes = full.as_bytes();
    let mut depth = 0usize;
    let mut starts = vec![0];
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' if i == 0 || bytes[i - 1] != b'-' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                starts.push(i + 2);
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }

    let last = starts[starts.len() - 1];
    if full[last..].starts_with('{') && starts.len() > 1 {
        &full[starts[starts.len() - 2]..]
    } else {
        &full[last..]
    }
}

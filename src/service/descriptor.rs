//! # Immutable description of the managed service.
//!
//! [`ServiceDescriptor`] bundles everything needed to launch and stop one
//! managed process. It is constructed once by the hosting layer and consumed
//! read-only by the supervisor; nothing in the core ever mutates it.
//!
//! Two small formatting concerns live here because they are properties of the
//! descriptor, not of the launcher:
//! - [`quote_arg`] — idempotent argument quoting for command-line rendering;
//! - [`ServiceDescriptor::env_block`] — NUL-separated `KEY=VALUE` composition
//!   of the merged environment.
//!
//! ## Environment semantics
//! Overrides are merged on top of a snapshot of the supervisor's own
//! environment into a value handed to the launcher. The composed environment
//! *replaces* the child's default environment; ambient process state is never
//! mutated, so concurrent start/stop cycles cannot race on it.

use std::borrow::Cow;

use crate::proc::CommandSpec;

/// Quotes a single command-line argument, idempotently.
///
/// - An argument already starting with a quote character is passed through
///   untouched (never double-quoted).
/// - An argument containing a space is wrapped in quotes exactly once.
/// - Anything else is returned as-is.
///
/// ```
/// use servisor::quote_arg;
///
/// assert_eq!(quote_arg("plain"), "plain");
/// assert_eq!(quote_arg("two words"), "\"two words\"");
/// assert_eq!(quote_arg("\"two words\""), "\"two words\"");
/// ```
pub fn quote_arg(arg: &str) -> Cow<'_, str> {
    if arg.starts_with('"') {
        return Cow::Borrowed(arg);
    }
    if arg.contains(' ') {
        return Cow::Owned(format!("\"{arg}\""));
    }
    Cow::Borrowed(arg)
}

/// Immutable configuration of one managed service.
///
/// Empty strings mean "not configured" throughout (`stop_executable`,
/// `working_directory`), matching how sparse config files deserialize.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Display name used in reporter output.
    pub name: String,

    /// Program to run as the managed process.
    pub executable: String,
    /// Arguments passed to `executable`, in order.
    pub start_arguments: Vec<String>,

    /// Program run by `stop()` to shut the managed process down.
    /// Empty = no stop command configured.
    pub stop_executable: String,
    /// Arguments passed to `stop_executable`, in order.
    pub stop_arguments: Vec<String>,
    /// Extra text appended verbatim after the quoted stop arguments.
    pub stop_arguments_raw: String,

    /// Environment overrides merged on top of the inherited environment.
    /// Order matters: later entries win over earlier ones with the same key.
    pub environment: Vec<(String, String)>,

    /// Base directory of the supervisor itself; the working-directory
    /// fallback when `working_directory` is empty.
    pub directory: String,
    /// Working directory for the managed process.
    pub working_directory: String,
}

impl ServiceDescriptor {
    /// True if a stop command is configured.
    pub fn has_stop_command(&self) -> bool {
        !self.stop_executable.is_empty()
    }

    /// Effective working directory: `working_directory`, falling back to
    /// `directory`; `None` when both are empty (inherit the supervisor's cwd).
    pub fn working_dir(&self) -> Option<&str> {
        if !self.working_directory.is_empty() {
            return Some(&self.working_directory);
        }
        if !self.directory.is_empty() {
            return Some(&self.directory);
        }
        None
    }

    /// Renders the full start command line: quoted executable followed by
    /// quoted arguments. Used for logging; the launcher spawns from the
    /// structured [`CommandSpec`] instead.
    pub fn start_command_line(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(1 + self.start_arguments.len());
        if !self.executable.is_empty() {
            parts.push(quote_arg(&self.executable).into_owned());
        }
        for arg in &self.start_arguments {
            parts.push(quote_arg(arg).into_owned());
        }
        parts.join(" ")
    }

    /// Renders the stop command line: quoted stop executable, quoted stop
    /// arguments, then `stop_arguments_raw` appended verbatim.
    pub fn stop_command_line(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(2 + self.stop_arguments.len());
        if !self.stop_executable.is_empty() {
            parts.push(quote_arg(&self.stop_executable).into_owned());
        }
        for arg in &self.stop_arguments {
            parts.push(quote_arg(arg).into_owned());
        }
        let mut line = parts.join(" ");
        if !self.stop_arguments_raw.is_empty() {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&self.stop_arguments_raw);
        }
        line
    }

    /// Snapshot of the inherited environment with the descriptor's overrides
    /// applied in order. Existing keys are replaced in place; new keys are
    /// appended.
    pub fn merged_environment(&self) -> Vec<(String, String)> {
        let mut merged: Vec<(String, String)> = std::env::vars().collect();
        for (key, value) in &self.environment {
            match merged.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = value.clone(),
                None => merged.push((key.clone(), value.clone())),
            }
        }
        merged
    }

    /// Renders the merged environment as a NUL-separated `KEY=VALUE` block.
    ///
    /// Formatting helper in the same family as [`Self::start_command_line`]:
    /// the launcher spawns from the structured pairs in [`CommandSpec::env`],
    /// so this flat rendering is for hosts and diagnostics that want the
    /// composed environment as a single value.
    pub fn env_block(&self) -> String {
        let mut block = String::new();
        for (key, value) in self.merged_environment() {
            block.push_str(&key);
            block.push('=');
            block.push_str(&value);
            block.push('\0');
        }
        block
    }

    /// Builds the launch specification for the managed process.
    pub fn start_command(&self) -> CommandSpec {
        CommandSpec {
            program: self.executable.clone(),
            args: self.start_arguments.clone(),
            env: self.merged_environment(),
            cwd: self.working_dir().map(str::to_owned),
        }
    }

    /// Builds the launch specification for the stop command, or `None` when
    /// no stop command is configured. `stop_arguments_raw` is tokenized on
    /// whitespace and appended after the structured arguments.
    pub fn stop_command(&self) -> Option<CommandSpec> {
        if !self.has_stop_command() {
            return None;
        }
        let mut args = self.stop_arguments.clone();
        args.extend(
            self.stop_arguments_raw
                .split_whitespace()
                .map(str::to_owned),
        );
        Some(CommandSpec {
            program: self.stop_executable.clone(),
            args,
            env: self.merged_environment(),
            cwd: self.working_dir().map(str::to_owned),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_is_idempotent() {
        let cases = ["plain", "two words", "\"already quoted\"", "", "a b c"];
        for case in cases {
            let once = quote_arg(case).into_owned();
            let twice = quote_arg(&once).into_owned();
            assert_eq!(once, twice, "double-quoting `{case}`");
        }
    }

    #[test]
    fn arguments_with_spaces_are_wrapped_exactly_once() {
        assert_eq!(quote_arg("c:/program files/app"), "\"c:/program files/app\"");
        let wrapped = quote_arg("c:/program files/app").into_owned();
        assert_eq!(quote_arg(&wrapped), wrapped.as_str());
    }

    #[test]
    fn start_command_line_quotes_each_part() {
        let d = ServiceDescriptor {
            executable: "/opt/my app/run.sh".into(),
            start_arguments: vec!["--flag".into(), "a value".into()],
            ..ServiceDescriptor::default()
        };
        assert_eq!(
            d.start_command_line(),
            "\"/opt/my app/run.sh\" --flag \"a value\""
        );
    }

    #[test]
    fn stop_command_line_appends_raw_tail_verbatim() {
        let d = ServiceDescriptor {
            stop_executable: "stop.sh".into(),
            stop_arguments: vec!["--graceful".into()],
            stop_arguments_raw: "--extra \"kept as is\"".into(),
            ..ServiceDescriptor::default()
        };
        assert_eq!(
            d.stop_command_line(),
            "stop.sh --graceful --extra \"kept as is\""
        );
    }

    #[test]
    fn working_dir_falls_back_to_base_directory() {
        let mut d = ServiceDescriptor {
            directory: "/srv/base".into(),
            ..ServiceDescriptor::default()
        };
        assert_eq!(d.working_dir(), Some("/srv/base"));

        d.working_directory = "/srv/work".into();
        assert_eq!(d.working_dir(), Some("/srv/work"));

        d.directory.clear();
        d.working_directory.clear();
        assert_eq!(d.working_dir(), None);
    }

    #[test]
    fn environment_overrides_replace_and_append() {
        let d = ServiceDescriptor {
            environment: vec![
                ("SERVISOR_TEST_FRESH".into(), "one".into()),
                ("PATH".into(), "/only/this".into()),
            ],
            ..ServiceDescriptor::default()
        };
        let merged = d.merged_environment();
        let path = merged.iter().find(|(k, _)| k == "PATH").map(|(_, v)| v);
        assert_eq!(path.map(String::as_str), Some("/only/this"));
        assert!(merged
            .iter()
            .any(|(k, v)| k == "SERVISOR_TEST_FRESH" && v == "one"));
    }

    #[test]
    fn env_block_is_nul_separated_pairs() {
        let d = ServiceDescriptor {
            environment: vec![("SERVISOR_BLOCK_KEY".into(), "val".into())],
            ..ServiceDescriptor::default()
        };
        let block = d.env_block();
        assert!(block.contains("SERVISOR_BLOCK_KEY=val\0"));
        assert!(block.ends_with('\0'));
    }

    #[test]
    fn stop_command_absent_when_not_configured() {
        let d = ServiceDescriptor::default();
        assert!(!d.has_stop_command());
        assert!(d.stop_command().is_none());
    }

    #[test]
    fn stop_command_tokenizes_raw_tail() {
        let d = ServiceDescriptor {
            stop_executable: "stop.sh".into(),
            stop_arguments: vec!["--graceful".into()],
            stop_arguments_raw: "--now --hard".into(),
            ..ServiceDescriptor::default()
        };
        let spec = match d.stop_command() {
            Some(spec) => spec,
            None => panic!("stop command should be configured"),
        };
        assert_eq!(spec.program, "stop.sh");
        assert_eq!(spec.args, vec!["--graceful", "--now", "--hard"]);
    }
}

//! The command line interface a host application builds and processes.

use std::io::Write;
use std::path::Path;

use crate::argument::{Argument, Builtin, VERSION_ARGUMENT, VERSION_DESCRIPTION};
use crate::error::{Error, Result};
use crate::input::{Tokenizer, accepted_prefixes};
use crate::registry::Registry;
use crate::value::Value;

/// A set of registered arguments plus the application details shown in help.
///
/// `?` and `help` are always registered. `version` is registered once a
/// version string is set. Both built-ins print to stdout and terminate the
/// process with status 0; register an argument with the same name to replace
/// that behavior.
#[derive(Debug)]
pub struct CommandLineInterface {
    name: String,
    version: String,
    description: String,
    executable_name: String,
    prefixes: Vec<String>,
    registry: Registry,
}

impl Default for CommandLineInterface {
    fn default() -> Self {
        Self::new("")
    }
}

impl CommandLineInterface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            description: String::new(),
            executable_name: default_executable_name(),
            prefixes: accepted_prefixes(),
            registry: Registry::with_help(),
        }
    }

    /// An interface with a name and a version. `version` is registered unless
    /// the version is empty.
    pub fn versioned(name: impl Into<String>, version: impl Into<String>) -> Self {
        let mut cli = Self::new(name);
        cli.version = version.into();
        if !cli.version.is_empty() {
            // Only `?` and `help` exist so far, neither of which clashes with `version`.
            cli.registry.insert_version(Argument::builtin_version());
        }
        cli
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Executable name shown on the `Usage:` line.
    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    /// Accepted argument prefixes, longest first.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_executable_name(&mut self, executable_name: impl Into<String>) {
        self.executable_name = executable_name.into();
    }

    /// Set the version and register the built-in `version` argument.
    pub fn set_version(&mut self, version: impl Into<String>) -> Result<()> {
        self.registry.register_version(Argument::builtin_version())?;
        self.version = version.into();
        Ok(())
    }

    /// Set the version and register `version` with `callback` instead of the
    /// printing default.
    pub fn set_version_action(
        &mut self,
        version: impl Into<String>,
        callback: impl FnMut(&Value) + 'static,
    ) -> Result<()> {
        self.registry.register_version(Argument::action(
            VERSION_ARGUMENT,
            VERSION_DESCRIPTION,
            callback,
        ))?;
        self.version = version.into();
        Ok(())
    }

    pub fn add_argument(&mut self, argument: Argument) -> Result<()> {
        self.registry.register(argument)
    }

    /// Register a boolean flag, `false` until it appears in the input.
    pub fn add_flag(&mut self, name: &str, description: &str) -> Result<()> {
        self.add_argument(Argument::flag(name, description))
    }

    /// Register a value-taking argument with an optional default.
    pub fn add_value(
        &mut self,
        name: &str,
        description: &str,
        default_value: Option<&str>,
    ) -> Result<()> {
        self.add_argument(Argument::value(name, description, default_value))
    }

    /// Register an action that runs `callback` whenever it is present.
    pub fn add_action(
        &mut self,
        name: &str,
        description: &str,
        callback: impl FnMut(&Value) + 'static,
    ) -> Result<()> {
        self.add_argument(Argument::action(name, description, callback))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.set_description(description);
        self
    }

    pub fn with_executable_name(mut self, executable_name: impl Into<String>) -> Self {
        self.set_executable_name(executable_name);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Result<Self> {
        self.set_version(version)?;
        Ok(self)
    }

    pub fn with_version_action(
        mut self,
        version: impl Into<String>,
        callback: impl FnMut(&Value) + 'static,
    ) -> Result<Self> {
        self.set_version_action(version, callback)?;
        Ok(self)
    }

    pub fn with_argument(mut self, argument: Argument) -> Result<Self> {
        self.add_argument(argument)?;
        Ok(self)
    }

    pub fn with_flag(mut self, name: &str, description: &str) -> Result<Self> {
        self.add_flag(name, description)?;
        Ok(self)
    }

    pub fn with_value(
        mut self,
        name: &str,
        description: &str,
        default_value: Option<&str>,
    ) -> Result<Self> {
        self.add_value(name, description, default_value)?;
        Ok(self)
    }

    pub fn with_action(
        mut self,
        name: &str,
        description: &str,
        callback: impl FnMut(&Value) + 'static,
    ) -> Result<Self> {
        self.add_action(name, description, callback)?;
        Ok(self)
    }

    /// Scan `tokens` left to right and dispatch every recognized argument.
    ///
    /// Malformed tokens, stray values and unknown arguments are skipped.
    /// `tokens` must not include the program path.
    pub fn process<S: AsRef<str>>(&mut self, tokens: &[S]) -> &Self {
        for occurrence in Tokenizer::new(tokens, &self.prefixes) {
            let Some(handle) = self.registry.lookup(&occurrence.key) else {
                tracing::debug!(key = %occurrence.key, "ignoring unknown argument");
                continue;
            };
            tracing::trace!(
                argument = %handle.borrow().name(),
                value = %occurrence.value,
                "dispatching argument"
            );
            match Argument::trigger(&handle, &occurrence.value) {
                Some(Builtin::Help) => exit_with(&self.help_message()),
                Some(Builtin::Version) => exit_with(&self.version_message()),
                None => {}
            }
        }
        self
    }

    /// Process the arguments this process was started with.
    pub fn process_env(&mut self) -> Result<&Self> {
        let mut args = std::env::args_os();
        if args.next().is_none() {
            return Err(Error::ArgumentsUnavailable);
        }
        let tokens: Vec<String> = args.map(|a| a.to_string_lossy().into_owned()).collect();
        Ok(self.process(&tokens))
    }

    /// Current value of `key` (long or short name, any case), or
    /// [`Value::Absent`] if no such argument is registered.
    pub fn value(&self, key: &str) -> Value {
        self.registry.value(key)
    }

    /// Whether the flag `key` has been seen.
    pub fn is_set(&self, key: &str) -> bool {
        self.value(key).as_bool().unwrap_or(false)
    }

    /// Text value of `key`, if it holds one.
    pub fn string(&self, key: &str) -> Option<String> {
        self.value(key).as_str().map(str::to_string)
    }

    fn title(&self) -> String {
        match (self.name.is_empty(), self.version.is_empty()) {
            (false, false) => format!("{} - Version {}", self.name, self.version),
            (false, true) => self.name.clone(),
            (true, false) => format!("Version {}", self.version),
            (true, true) => String::new(),
        }
    }

    /// The line printed by the built-in `version` argument.
    pub fn version_message(&self) -> String {
        format!("{}\n", self.title())
    }

    /// The text printed by the built-in `help` argument.
    pub fn help_message(&self) -> String {
        let mut out = String::new();

        let title = self.title();
        if !title.is_empty() {
            out.push_str(&title);
            out.push('\n');
            out.push_str(&"=".repeat(title.chars().count()));
            out.push('\n');
        }

        if !self.description.is_empty() {
            out.push_str(&self.description);
            out.push_str("\n\n");
        }

        out.push_str(&format!("Usage: {} [OPTION]\n\n", self.executable_name));

        for handle in self.registry.all() {
            let arg = handle.borrow();
            match arg.short_name() {
                Some(short) => out.push_str(&format!(
                    "  -{short}, --{}\t{}\n",
                    arg.name(),
                    arg.description()
                )),
                None => out.push_str(&format!("  -{}\t{}\n", arg.name(), arg.description())),
            }
        }

        out
    }
}

fn exit_with(message: &str) -> ! {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(message.as_bytes());
    let _ = stdout.flush();
    std::process::exit(0)
}

fn default_executable_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .or_else(|| {
            std::env::args_os().next().and_then(|arg0| {
                Path::new(&arg0)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
        })
        .unwrap_or_default()
}

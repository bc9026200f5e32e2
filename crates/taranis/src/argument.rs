//! Argument definitions.
//!
//! An [`Argument`] is what the host registers: a name (its first character
//! doubles as the short name), a description for the help text, a kind, the
//! currently stored value and the handler that runs when the argument is seen
//! on the command line.

use std::cell::RefCell;
use std::fmt;

use crate::value::Value;

/// Long name of the built-in help argument.
pub const HELP_ARGUMENT: &str = "help";
/// Single-character alias registered alongside `help`.
pub const HELP_ALIAS: &str = "?";
/// Long name of the built-in version argument.
pub const VERSION_ARGUMENT: &str = "version";

pub(crate) const HELP_DESCRIPTION: &str = "Display this help and exit";
pub(crate) const VERSION_DESCRIPTION: &str = "Display version information and exit";

/// Function invoked with the resolved value when an argument is recognized.
pub type Callback = Box<dyn FnMut(&Value)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    /// Triggers a callback; never stores a value.
    Action,
    /// Presence flag; stores `false` until seen, then `true`.
    Boolean,
    /// Expects an associated string.
    Value,
}

/// Interface-level behavior requested by a built-in handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Help,
    Version,
}

enum Handler {
    /// Default behavior for the kind: flags store `true`, values store the
    /// resolved value, actions do nothing.
    Store,
    Builtin(Builtin),
    Custom(Callback),
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store => f.write_str("Store"),
            Self::Builtin(b) => f.debug_tuple("Builtin").field(b).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One registrable command line argument.
#[derive(Debug)]
pub struct Argument {
    name: String,
    description: String,
    kind: ArgumentKind,
    value: Value,
    handler: Handler,
}

impl Argument {
    fn new(name: impl Into<String>, description: impl Into<String>, kind: ArgumentKind) -> Self {
        let value = match kind {
            ArgumentKind::Boolean => Value::Bool(false),
            ArgumentKind::Action | ArgumentKind::Value => Value::Absent,
        };
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            value,
            handler: Handler::Store,
        }
    }

    /// A boolean flag, `false` until it appears in the input.
    pub fn flag(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ArgumentKind::Boolean)
    }

    /// A value-taking argument with an optional default.
    pub fn value(
        name: impl Into<String>,
        description: impl Into<String>,
        default_value: Option<&str>,
    ) -> Self {
        let mut arg = Self::new(name, description, ArgumentKind::Value);
        if let Some(default_value) = default_value {
            arg.value = Value::from(default_value);
        }
        arg
    }

    /// An action argument; `callback` runs every time it is recognized.
    pub fn action(
        name: impl Into<String>,
        description: impl Into<String>,
        callback: impl FnMut(&Value) + 'static,
    ) -> Self {
        Self::new(name, description, ArgumentKind::Action).with_callback(callback)
    }

    /// Replace the default handler with `callback`.
    ///
    /// A custom callback receives the resolved value instead of the argument
    /// storing it.
    pub fn with_callback(mut self, callback: impl FnMut(&Value) + 'static) -> Self {
        self.handler = Handler::Custom(Box::new(callback));
        self
    }

    pub(crate) fn builtin_help(name: &str) -> Self {
        let mut arg = Self::new(name, HELP_DESCRIPTION, ArgumentKind::Action);
        arg.handler = Handler::Builtin(Builtin::Help);
        arg
    }

    pub(crate) fn builtin_version() -> Self {
        let mut arg = Self::new(VERSION_ARGUMENT, VERSION_DESCRIPTION, ArgumentKind::Action);
        arg.handler = Handler::Builtin(Builtin::Version);
        arg
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First character of the name, when the name is longer than one character.
    pub fn short_name(&self) -> Option<char> {
        let mut chars = self.name.chars();
        let first = chars.next()?;
        chars.next().map(|_| first)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> ArgumentKind {
        self.kind
    }

    /// Value currently stored: the default until the argument is seen.
    pub fn current_value(&self) -> &Value {
        &self.value
    }

    /// Normalized registry key for the long name.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Normalized registry key for the short name.
    pub fn short_key(&self) -> Option<String> {
        self.short_name().map(|c| c.to_lowercase().collect())
    }

    #[cfg(test)]
    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Run the handler of the argument in `cell` for a recognized occurrence.
    ///
    /// Built-in handlers render interface-level text, so they are handed back
    /// to the caller instead of running here. The handler is moved out while
    /// it runs, so a callback may borrow its own argument.
    pub(crate) fn trigger(cell: &RefCell<Self>, value: &Value) -> Option<Builtin> {
        let mut handler = std::mem::replace(&mut cell.borrow_mut().handler, Handler::Store);
        let builtin = match &mut handler {
            Handler::Custom(callback) => {
                callback(value);
                None
            }
            Handler::Builtin(builtin) => Some(*builtin),
            Handler::Store => {
                cell.borrow_mut().store(value);
                None
            }
        };
        cell.borrow_mut().handler = handler;
        builtin
    }

    fn store(&mut self, value: &Value) {
        match self.kind {
            ArgumentKind::Boolean => self.value = Value::Bool(true),
            ArgumentKind::Value => self.value = value.clone(),
            ArgumentKind::Action => {}
        }
    }

    #[cfg(test)]
    pub(crate) fn is_builtin(&self, builtin: Builtin) -> bool {
        matches!(self.handler, Handler::Builtin(b) if b == builtin)
    }
}

/// Whether `key` names one of the built-in arguments that may be overridden.
pub(crate) fn is_builtin_name(key: &str) -> bool {
    key == HELP_ARGUMENT || key == HELP_ALIAS || key == VERSION_ARGUMENT
}

//! Declarative interface descriptions.
//!
//! A [`CliSchema`] describes an interface as data (JSON, kebab-case keys) so it
//! can be kept next to an application instead of in code:
//!
//! ```json
//! {
//!   "name": "My Cool App",
//!   "version": "1.2.3.4-abc",
//!   "args": [
//!     { "name": "mouse", "kind": "flag", "description": "Show the mouse" },
//!     { "name": "remote", "kind": "value", "default-value": "1.2.3.4" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::argument::{Argument, ArgumentKind, is_builtin_name};
use crate::cli::CommandLineInterface;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaKind {
    Action,
    Flag,
    Value,
}

impl From<ArgumentKind> for SchemaKind {
    fn from(kind: ArgumentKind) -> Self {
        match kind {
            ArgumentKind::Action => Self::Action,
            ArgumentKind::Boolean => Self::Flag,
            ArgumentKind::Value => Self::Value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArgumentSchema {
    pub name: String,
    pub kind: SchemaKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl ArgumentSchema {
    /// The argument this entry describes. Actions get a callback that does
    /// nothing; attach real behavior with [`Argument::with_callback`].
    pub fn to_argument(&self) -> Argument {
        match self.kind {
            SchemaKind::Action => Argument::action(&self.name, &self.description, |_| {}),
            SchemaKind::Flag => Argument::flag(&self.name, &self.description),
            SchemaKind::Value => {
                Argument::value(&self.name, &self.description, self.default_value.as_deref())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliSchema {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgumentSchema>,
}

impl CliSchema {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build an interface, registering arguments in declaration order.
    ///
    /// Fails with the same configuration errors as manual registration.
    pub fn build(&self) -> Result<CommandLineInterface> {
        let mut cli = CommandLineInterface::new(&self.name).with_description(&self.description);
        if !self.version.is_empty() {
            cli.set_version(&self.version)?;
        }
        for arg in &self.args {
            cli.add_argument(arg.to_argument())?;
        }
        Ok(cli)
    }
}

impl CommandLineInterface {
    /// Describe this interface. Built-in arguments are implied and left out;
    /// stored values of flags and values are reported as defaults.
    pub fn schema(&self) -> CliSchema {
        let args = self
            .registry()
            .all()
            .filter_map(|handle| {
                let arg = handle.borrow();
                if is_builtin_name(&arg.key()) {
                    return None;
                }
                Some(ArgumentSchema {
                    name: arg.name().to_string(),
                    kind: arg.kind().into(),
                    description: arg.description().to_string(),
                    default_value: arg.current_value().as_str().map(str::to_string),
                })
            })
            .collect();

        CliSchema {
            name: self.name().to_string(),
            version: self.version().to_string(),
            description: self.description().to_string(),
            args,
        }
    }
}

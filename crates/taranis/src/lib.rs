//! Declarative command line argument parsing.
//!
//! A host registers named arguments (flags, value-taking arguments and
//! actions) on a [`CommandLineInterface`], then hands it the process tokens.
//! Each recognized argument runs its callback or stores its value; the host
//! reads values back by name afterwards.
//!
//! ```no_run
//! use taranis::{Argument, CommandLineInterface};
//!
//! # fn main() -> taranis::Result<()> {
//! let mut cli = CommandLineInterface::versioned("My Cool App", "1.2.3.4-abc")
//!     .with_flag("mouse", "Force mouse to be displayed in release build.")?
//!     .with_value("remote", "Address of the remote host.", Some("1.2.3.4"))?
//!     .with_argument(Argument::action("ping", "Ping the remote host.", |_| println!("pong")))?;
//!
//! cli.process_env()?;
//! println!("Show Mouse? {}", if cli.is_set("mouse") { "Yes" } else { "No" });
//! # Ok(())
//! # }
//! ```
//!
//! Names are matched case-insensitively, and every argument whose name is
//! longer than one character also answers to its first character. Tokens may
//! carry values inline (`--remote=1.2.3.4`, `--remote:1.2.3.4`) or in the next
//! token (`--remote 1.2.3.4`). Unknown and malformed tokens are ignored; name
//! clashes are reported when the argument is registered.

pub mod argument;
pub mod cli;
pub mod error;
pub mod input;
pub mod registry;
pub mod schema;
pub mod value;

pub use argument::{Argument, ArgumentKind, Callback, HELP_ALIAS, HELP_ARGUMENT, VERSION_ARGUMENT};
pub use cli::CommandLineInterface;
pub use error::{Error, Result};
pub use input::{InputToken, Occurrence, Tokenizer, accepted_prefixes};
pub use registry::{ArgumentHandle, Registry};
pub use schema::{ArgumentSchema, CliSchema, SchemaKind};
pub use value::Value;

//! Configuration errors raised while building an interface.
//!
//! Parsing input never fails: malformed and unknown tokens are skipped. Every
//! variant here is raised at registration time (or when the process argument
//! vector is read), before any token is dispatched.

/// Errors raised while registering arguments or reading the argument vector.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument was registered with an empty name.
    #[error("argument name must not be empty")]
    EmptyName,

    /// Two arguments normalize to the same long name.
    #[error("argument '{0}' is defined more than once")]
    DuplicateName(String),

    /// Two user arguments share the same short name.
    #[error("short name of '{argument}' collides with existing argument '{existing}'")]
    ShortNameCollision { argument: String, existing: String },

    /// A user argument's short name collides with the built-in `help`/`?` argument.
    #[error("short name of '{0}' collides with the built-in 'help' argument")]
    HelpShortNameCollision(String),

    /// A user argument's short name collides with the built-in `version` argument.
    #[error("short name of '{0}' collides with the built-in 'version' argument")]
    VersionShortNameCollision(String),

    /// The platform did not provide a process argument vector.
    #[error("process arguments are not available; cannot build a command line interface")]
    ArgumentsUnavailable,

    /// A declarative interface description could not be parsed.
    #[error("invalid interface schema: {0}")]
    Schema(#[from] serde_json::Error),
}

impl Error {
    /// Whether this is one of the short-name collision variants.
    pub fn is_short_name_collision(&self) -> bool {
        matches!(
            self,
            Self::ShortNameCollision { .. }
                | Self::HelpShortNameCollision(_)
                | Self::VersionShortNameCollision(_)
        )
    }

    pub(crate) fn short_name_collision(argument: &str, existing: &str) -> Self {
        Self::ShortNameCollision {
            argument: argument.to_string(),
            existing: existing.to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collision_family_is_grouped() {
        assert!(Error::short_name_collision("server", "serial").is_short_name_collision());
        assert!(Error::HelpShortNameCollision("here".into()).is_short_name_collision());
        assert!(Error::VersionShortNameCollision("verbose".into()).is_short_name_collision());
        assert!(!Error::DuplicateName("server".into()).is_short_name_collision());
        assert!(!Error::EmptyName.is_short_name_collision());
    }

    #[test]
    fn messages_name_both_arguments() {
        let msg = Error::short_name_collision("serial", "server").to_string();
        assert!(msg.contains("'serial'"));
        assert!(msg.contains("'server'"));
    }
}

//! Registered arguments, keyed by lower-cased long and short names.
//!
//! A definition with a short name is stored under two keys. Both entries hold
//! the same [`ArgumentHandle`], so a value written through one key is visible
//! through the other.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::argument::{Argument, HELP_ALIAS, HELP_ARGUMENT, VERSION_ARGUMENT, is_builtin_name};
use crate::error::{Error, Result};
use crate::value::Value;

/// Shared handle to a registered argument.
pub type ArgumentHandle = Rc<RefCell<Argument>>;

#[derive(Debug, Default)]
pub struct Registry {
    entries: IndexMap<String, ArgumentHandle>,
    version_set: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding only the built-in `?` and `help` arguments.
    pub fn with_help() -> Self {
        let mut registry = Self::new();
        registry.insert(Argument::builtin_help(HELP_ALIAS));
        registry.insert(Argument::builtin_help(HELP_ARGUMENT));
        registry
    }

    /// Register `argument` under its long key and, if it has one, its short key.
    ///
    /// Re-registering `help`, `?` or `version` replaces the built-in in place.
    /// Any other name clash is an error; nothing is inserted on failure.
    pub fn register(&mut self, argument: Argument) -> Result<()> {
        self.register_as(argument, self.version_set)
    }

    /// Register the `version` argument of an interface whose version is being
    /// set. Clashes with it are reported as version collisions from now on.
    pub(crate) fn register_version(&mut self, argument: Argument) -> Result<()> {
        self.register_as(argument, true)?;
        self.version_set = true;
        Ok(())
    }

    /// [`Registry::insert`] for the `version` argument.
    pub(crate) fn insert_version(&mut self, argument: Argument) {
        self.insert(argument);
        self.version_set = true;
    }

    fn register_as(&mut self, argument: Argument, version_set: bool) -> Result<()> {
        if argument.name().trim().is_empty() {
            return Err(Error::EmptyName);
        }

        let key = argument.key();
        let short_key = argument.short_key();

        let replaced = match self.entries.get(&key) {
            Some(existing) => {
                let existing = existing.borrow();
                if existing.key() != key {
                    // The long name lands on another argument's short alias.
                    return Err(collision(argument.name(), &existing, version_set));
                }
                if !is_builtin_name(&key) {
                    return Err(Error::DuplicateName(argument.name().to_string()));
                }
                tracing::warn!(argument = %argument.name(), "overriding built-in argument");
                self.entries.get(&key).cloned()
            }
            None => None,
        };

        if let Some(short_key) = &short_key {
            if let Some(existing) = self.entries.get(short_key) {
                let is_replaced = replaced.as_ref().is_some_and(|old| Rc::ptr_eq(old, existing));
                if !is_replaced {
                    return Err(collision(argument.name(), &existing.borrow(), version_set));
                }
            }
        }

        self.insert(argument);
        if let Some(old) = replaced {
            self.entries.retain(|_, h| !Rc::ptr_eq(h, &old));
        }
        Ok(())
    }

    /// Insert without collision checks. Keys that already exist keep their
    /// position, so an overridden built-in stays put in the help listing.
    pub(crate) fn insert(&mut self, argument: Argument) {
        let key = argument.key();
        let short_key = argument.short_key();
        let handle = Rc::new(RefCell::new(argument));
        if let Some(short_key) = short_key {
            self.entries.insert(key, handle.clone());
            self.entries.insert(short_key, handle);
        } else {
            self.entries.insert(key, handle);
        }
    }

    /// Case-insensitive lookup by long or short name.
    pub fn lookup(&self, key: &str) -> Option<ArgumentHandle> {
        self.entries.get(&key.to_lowercase()).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }

    /// Current value stored for `key`, or [`Value::Absent`] if nothing is
    /// registered under it.
    pub fn value(&self, key: &str) -> Value {
        self.lookup(key)
            .map(|handle| handle.borrow().current_value().clone())
            .unwrap_or_default()
    }

    /// Every registered argument once, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &ArgumentHandle> {
        self.entries
            .iter()
            .filter(|(key, handle)| handle.borrow().key() == **key)
            .map(|(_, handle)| handle)
    }

    /// Number of distinct registered arguments.
    pub fn len(&self) -> usize {
        self.all().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pick the collision error for `argument` clashing with `existing`. The
/// version variant only applies once the interface has a version.
fn collision(argument: &str, existing: &Argument, version_set: bool) -> Error {
    let existing_key = existing.key();
    let key = argument.to_lowercase();
    let is_help = |k: &str| k == HELP_ARGUMENT || k == HELP_ALIAS;

    if is_help(&existing_key) {
        Error::HelpShortNameCollision(argument.to_string())
    } else if version_set && existing_key == VERSION_ARGUMENT {
        Error::VersionShortNameCollision(argument.to_string())
    } else if is_help(&key) {
        Error::HelpShortNameCollision(existing.name().to_string())
    } else if version_set && key == VERSION_ARGUMENT {
        Error::VersionShortNameCollision(existing.name().to_string())
    } else {
        Error::short_name_collision(argument, existing.name())
    }
}

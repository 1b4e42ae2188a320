//! # Component Registry
//!
//! A mapping from string keys to either a ready-made value or a factory.
//! Route declarations refer to registry keys (`"controllers.users#show"`),
//! and the dispatcher turns those keys into live objects at request time.
//!
//! The registry is populated through a [`RegistryBuilder`] during setup and
//! frozen by [`build`](RegistryBuilder::build). A frozen [`Registry`] is
//! read-only, so it can be shared across worker threads behind an `Arc`
//! without locking.
//!
//! # Example
//!
//! ```rust,ignore
//! let registry = Registry::builder()
//!     .register("repositories.user", UserRepository::default())
//!     .namespace("controllers", |ns| {
//!         ns.register_factory("users", |response: ResponseHandle, repo: Arc<UserRepository>| {
//!             Ok::<_, BoxError>(Value::component(UsersController::new(response, repo)))
//!         })
//!     })
//!     .build();
//! ```

use std::collections::HashMap;
use std::fmt;
use weir_core::{Args, Callable, Handler, IntoValue, RegistryError, Value};

/// How a key was registered.
#[derive(Debug, Clone)]
enum Entry {
    /// Returned unchanged on every resolve.
    Value(Value),
    /// Invoked on every resolve; never memoized.
    Factory(Callable),
}

/// Builder for constructing a [`Registry`].
///
/// Registration is last-write-wins: registering a key twice replaces the
/// earlier entry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: HashMap<String, Entry>,
    prefix: String,
}

impl RegistryBuilder {
    /// Create a new empty registry builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a ready value under `key`.
    pub fn register<T: IntoValue>(mut self, key: &str, value: T) -> Self {
        self.insert(key, Entry::Value(value.into_value()));
        self
    }

    /// Register a typed factory under `key`.
    ///
    /// The factory's parameters are the values passed to
    /// [`Registry::resolve_with`], in order.
    pub fn register_factory<H, A>(self, key: &str, factory: H) -> Self
    where
        H: Handler<A>,
        A: 'static,
    {
        let name = self.qualify(key);
        self.register_factory_raw(key, Callable::from_fn(factory).named(name))
    }

    /// Register a callable as a factory under `key`.
    pub fn register_factory_raw(mut self, key: &str, factory: Callable) -> Self {
        self.insert(key, Entry::Factory(factory));
        self
    }

    /// Register entries under `prefix`.
    ///
    /// Keys registered inside `f` are stored as `prefix.key`. Namespaces nest.
    pub fn namespace<F>(mut self, prefix: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let outer = self.prefix.clone();
        self.prefix = self.qualify(prefix);
        let mut builder = f(self);
        builder.prefix = outer;
        builder
    }

    /// Install every [`ComponentRegistration`] submitted with `inventory`.
    #[cfg(feature = "inventory")]
    pub fn with_submitted(self) -> Self {
        inventory::iter::<ComponentRegistration>
            .into_iter()
            .fold(self, |builder, registration| {
                #[cfg(feature = "tracing")]
                tracing::debug!(name = registration.name, "installing submitted components");
                (registration.install)(builder)
            })
    }

    /// Freeze the registry.
    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }

    fn qualify(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }

    fn insert(&mut self, key: &str, entry: Entry) {
        let key = self.qualify(key);
        #[cfg(feature = "tracing")]
        {
            if self.entries.contains_key(&key) {
                tracing::debug!(%key, "replacing registry entry");
            }
        }
        self.entries.insert(key, entry);
    }
}

/// A frozen, read-only component registry.
pub struct Registry {
    entries: HashMap<String, Entry>,
}

impl Registry {
    /// Create a new registry builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Resolve `key`.
    ///
    /// A value entry is returned unchanged. A factory entry is invoked with
    /// no arguments.
    pub fn resolve(&self, key: &str) -> Result<Value, RegistryError> {
        match self.entry(key)? {
            Entry::Value(value) => Ok(value.clone()),
            Entry::Factory(factory) => call_factory(key, factory, Args::new()),
        }
    }

    /// Resolve `key` by invoking its factory with `args`.
    ///
    /// Fails with [`RegistryError::NotCallable`] if `key` holds a plain value.
    pub fn resolve_with(&self, key: &str, args: Args) -> Result<Value, RegistryError> {
        match self.entry(key)? {
            Entry::Value(_) => Err(RegistryError::NotCallable(key.to_owned())),
            Entry::Factory(factory) => call_factory(key, factory, args),
        }
    }

    /// Returns `true` if `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns `true` if `key` is registered as a factory.
    pub fn is_factory(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(Entry::Factory(_)))
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    fn entry(&self, key: &str) -> Result<&Entry, RegistryError> {
        self.entries
            .get(key)
            .ok_or_else(|| RegistryError::UnknownKey(key.to_owned()))
    }
}

fn call_factory(key: &str, factory: &Callable, args: Args) -> Result<Value, RegistryError> {
    factory.call(args).map_err(|source| RegistryError::Factory {
        key: key.to_owned(),
        source,
    })
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("keys", &self.keys()).finish()
    }
}

// ============================================================================
// Distributed Registration
// ============================================================================

/// A set of registry entries submitted with `inventory`.
///
/// # Example
///
/// ```rust,ignore
/// fn install(builder: RegistryBuilder) -> RegistryBuilder {
///     builder.register("repositories.user", UserRepository::default())
/// }
///
/// inventory::submit! {
///     ComponentRegistration { name: "repositories", install }
/// }
///
/// let registry = Registry::builder().with_submitted().build();
/// ```
#[cfg(feature = "inventory")]
pub struct ComponentRegistration {
    /// Name for debugging.
    pub name: &'static str,
    /// Adds the entries to a builder.
    pub install: fn(RegistryBuilder) -> RegistryBuilder,
}

#[cfg(feature = "inventory")]
inventory::collect!(ComponentRegistration);

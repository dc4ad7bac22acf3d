//! In-memory cache-manager registry.
//!
//! Managers are stored in a `HashMap` behind a `RwLock`. Normalization
//! snapshots the manager's roots and releases the lock before traversing, so
//! long flattens never block registration.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use confnorm_flatten::{extract_stack, Flattener};
use confnorm_model::{FlatConfig, Introspect, Path as KeyPath, ProtocolStack};
use confnorm_store::Format;
use tracing::{debug, error, warn};

use crate::error::{RegistryError, RegistryResult};

/// Prefix of the global section in the combined view.
pub const GLOBAL_PREFIX: &str = "global";
/// Prefix under which each cache is recorded as `cache.<name>` in the combined view.
pub const CACHE_PREFIX: &str = "cache";
/// Prefix of the transport stack in the combined view.
pub const TRANSPORT_PREFIX: &str = "jgroups";

/// A configuration root shared between the registry and its owner.
pub type SharedNode = Arc<dyn Introspect + Send + Sync>;
/// A transport protocol stack shared between the registry and its owner.
pub type SharedStack = Arc<dyn ProtocolStack + Send + Sync>;

/// Opaque identity of a registered cache manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManagerHandle(pub u64);

impl fmt::Display for ManagerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// The part of a manager's configuration a normalized view covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    /// Global section, every cache and the transport stack.
    All,
    Global,
    Transport,
    /// One named cache.
    Cache(String),
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::All => f.write_str("all"),
            View::Global => f.write_str("global"),
            View::Transport => f.write_str("transport"),
            View::Cache(name) => write!(f, "cache {name:?}"),
        }
    }
}

#[derive(Clone)]
struct Manager {
    name: String,
    global: SharedNode,
    caches: BTreeMap<String, SharedNode>,
    transport: Option<SharedStack>,
}

/// Thread-safe mapping from [`ManagerHandle`] to registered cache managers.
pub struct Registry {
    managers: RwLock<HashMap<ManagerHandle, Manager>>,
    flattener: Flattener,
}

impl Registry {
    /// Create an empty registry using default flatten options.
    pub fn new() -> Self {
        Self::with_flattener(Flattener::default())
    }

    /// Create an empty registry that normalizes with `flattener`.
    pub fn with_flattener(flattener: Flattener) -> Self {
        Self {
            managers: RwLock::new(HashMap::new()),
            flattener,
        }
    }

    fn read(&self) -> RegistryResult<RwLockReadGuard<'_, HashMap<ManagerHandle, Manager>>> {
        self.managers
            .read()
            .map_err(|e| RegistryError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> RegistryResult<RwLockWriteGuard<'_, HashMap<ManagerHandle, Manager>>> {
        self.managers
            .write()
            .map_err(|e| RegistryError::LockPoisoned(e.to_string()))
    }

    /// Register a manager with its global configuration root.
    ///
    /// Without an explicit name the manager is called `manager@<hex handle>`.
    pub fn register_manager(
        &self,
        handle: ManagerHandle,
        name: Option<String>,
        global: SharedNode,
    ) -> RegistryResult<()> {
        let name = name.unwrap_or_else(|| format!("manager@{handle}"));
        let mut managers = self.write()?;
        if let Some(existing) = managers.get(&handle) {
            error!(%handle, name = %existing.name, "cache manager already registered");
            return Err(RegistryError::AlreadyRegistered {
                handle,
                name: existing.name.clone(),
            });
        }
        debug!(%handle, name = %name, "registered cache manager");
        managers.insert(
            handle,
            Manager {
                name,
                global,
                caches: BTreeMap::new(),
                transport: None,
            },
        );
        Ok(())
    }

    /// Remove a manager. Returns `true` if it was registered.
    pub fn unregister_manager(&self, handle: ManagerHandle) -> RegistryResult<bool> {
        let removed = self.write()?.remove(&handle).is_some();
        debug!(%handle, removed, "unregistered cache manager");
        Ok(removed)
    }

    /// Attach a named cache configuration to a registered manager, replacing
    /// any earlier configuration under the same name.
    pub fn register_cache(
        &self,
        handle: ManagerHandle,
        cache_name: &str,
        config: SharedNode,
    ) -> RegistryResult<()> {
        let mut managers = self.write()?;
        let Some(manager) = managers.get_mut(&handle) else {
            warn!(%handle, cache = cache_name, "cache registered for unknown manager");
            return Err(RegistryError::UnknownManager(handle));
        };
        if manager.caches.insert(cache_name.to_string(), config).is_some() {
            debug!(manager = %manager.name, cache = cache_name, "replaced cache configuration");
        }
        Ok(())
    }

    /// Set the transport protocol stack of a registered manager.
    pub fn set_transport(&self, handle: ManagerHandle, stack: SharedStack) -> RegistryResult<()> {
        let mut managers = self.write()?;
        let Some(manager) = managers.get_mut(&handle) else {
            warn!(%handle, "transport set for unknown manager");
            return Err(RegistryError::UnknownManager(handle));
        };
        manager.transport = Some(stack);
        Ok(())
    }

    /// Registered handles in ascending order.
    pub fn handles(&self) -> RegistryResult<Vec<ManagerHandle>> {
        let mut handles: Vec<ManagerHandle> = self.read()?.keys().copied().collect();
        handles.sort();
        Ok(handles)
    }

    /// The name a manager was registered under.
    pub fn manager_name(&self, handle: ManagerHandle) -> RegistryResult<String> {
        Ok(self.snapshot(handle)?.name)
    }

    /// Cache names of a manager in ascending order.
    pub fn cache_names(&self, handle: ManagerHandle) -> RegistryResult<Vec<String>> {
        Ok(self.snapshot(handle)?.caches.into_keys().collect())
    }

    fn snapshot(&self, handle: ManagerHandle) -> RegistryResult<Manager> {
        self.read()?.get(&handle).cloned().ok_or_else(|| {
            warn!(%handle, "lookup of unknown cache manager");
            RegistryError::UnknownManager(handle)
        })
    }

    /// Normalize `view` of a manager.
    ///
    /// Single-section views are rooted at `prefix`. [`View::All`] ignores
    /// `prefix` and records the global section under `global`, each cache
    /// under `cache.<name>` and the transport stack, when set, under
    /// `jgroups`.
    pub fn normalize(
        &self,
        handle: ManagerHandle,
        view: &View,
        prefix: &str,
    ) -> RegistryResult<FlatConfig> {
        let manager = self.snapshot(handle)?;
        let mut out = FlatConfig::new();
        match view {
            View::All => {
                self.flattener
                    .flatten(manager.global.as_ref(), GLOBAL_PREFIX, &mut out)?;
                for (name, config) in &manager.caches {
                    let cache_prefix = KeyPath::from(CACHE_PREFIX).member(name.as_str()).render();
                    self.flattener
                        .flatten(config.as_ref(), &cache_prefix, &mut out)?;
                }
                if let Some(stack) = &manager.transport {
                    extract_stack(stack.as_ref(), TRANSPORT_PREFIX, &mut out);
                }
            }
            View::Global => {
                self.flattener
                    .flatten(manager.global.as_ref(), prefix, &mut out)?;
            }
            View::Transport => {
                let stack = manager.transport.as_ref().ok_or_else(|| {
                    RegistryError::NoTransport {
                        manager: manager.name.clone(),
                    }
                })?;
                extract_stack(stack.as_ref(), prefix, &mut out);
            }
            View::Cache(name) => {
                let config = manager.caches.get(name).ok_or_else(|| {
                    RegistryError::UnknownCache {
                        manager: manager.name.clone(),
                        cache: name.clone(),
                    }
                })?;
                self.flattener.flatten(config.as_ref(), prefix, &mut out)?;
            }
        }
        debug!(manager = %manager.name, %view, entries = out.len(), "normalized configuration");
        Ok(out)
    }

    /// Global section, every cache and the transport stack in one mapping.
    pub fn normalized_config(&self, handle: ManagerHandle) -> RegistryResult<FlatConfig> {
        self.normalize(handle, &View::All, "")
    }

    /// The global section alone, without a prefix.
    pub fn normalized_global(&self, handle: ManagerHandle) -> RegistryResult<FlatConfig> {
        self.normalize(handle, &View::Global, "")
    }

    /// The transport stack alone, without a prefix.
    pub fn normalized_transport(&self, handle: ManagerHandle) -> RegistryResult<FlatConfig> {
        self.normalize(handle, &View::Transport, "")
    }

    /// One cache alone, without a prefix.
    pub fn normalized_cache(&self, handle: ManagerHandle, name: &str) -> RegistryResult<FlatConfig> {
        self.normalize(handle, &View::Cache(name.to_string()), "")
    }

    /// Normalize `view` and write it to `path` in `format`.
    pub fn save(
        &self,
        handle: ManagerHandle,
        view: &View,
        format: Format,
        path: &Path,
    ) -> RegistryResult<()> {
        let result = self
            .normalize(handle, view, "")
            .and_then(|map| confnorm_store::save(format, &map, path).map_err(RegistryError::from));
        if let Err(e) = &result {
            error!(%handle, %view, path = %path.display(), error = %e, "failed to save configuration");
        }
        result
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let managers = self.managers.read().map(|m| m.len()).unwrap_or_default();
        f.debug_struct("Registry")
            .field("managers", &managers)
            .field("flattener", &self.flattener)
            .finish()
    }
}

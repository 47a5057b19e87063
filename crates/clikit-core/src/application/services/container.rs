//! Typed service container.
//!
//! Services are keyed by their Rust type. A provider is one of a ready
//! instance, a factory closure, or a constructor with an explicit list of
//! dependency keys. Lookups that miss return an error, never panic.

use std::any::{Any, TypeId, type_name};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::error::{ClikitError, ClikitResult};

type AnyService = Arc<dyn Any + Send + Sync>;
type Factory = Box<dyn Fn(&ServiceContainer) -> ClikitResult<AnyService> + Send + Sync>;
type Constructor = Box<dyn Fn(&mut Dependencies) -> ClikitResult<AnyService> + Send + Sync>;

/// Type token identifying a service.
#[derive(Clone, Copy)]
pub struct ServiceKey {
    id: TypeId,
    name: &'static str,
}

impl ServiceKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Built on first resolution, then the same `Arc` is handed out.
    Singleton,
    /// Built on every resolution.
    Transient,
}

enum Provider {
    Instance(AnyService),
    Factory(Factory),
    Constructor {
        dependencies: Vec<ServiceKey>,
        construct: Constructor,
    },
}

/// A key, exactly one provider, and a lifetime.
pub struct ServiceDescriptor {
    key: ServiceKey,
    provider: Provider,
    lifetime: Lifetime,
}

impl ServiceDescriptor {
    /// A ready value. Always behaves as a singleton.
    pub fn instance<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            key: ServiceKey::of::<T>(),
            provider: Provider::Instance(Arc::new(value)),
            lifetime: Lifetime::Singleton,
        }
    }

    /// A closure that may resolve further services from the container.
    pub fn factory<T, F>(lifetime: Lifetime, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceContainer) -> ClikitResult<T> + Send + Sync + 'static,
    {
        Self {
            key: ServiceKey::of::<T>(),
            provider: Provider::Factory(Box::new(move |c: &ServiceContainer| {
                factory(c).map(|v| Arc::new(v) as AnyService)
            })),
            lifetime,
        }
    }

    /// A constructor whose dependencies are resolved, in order, before it
    /// runs and handed over through [`Dependencies`].
    pub fn constructor<T, F>(lifetime: Lifetime, dependencies: Vec<ServiceKey>, construct: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&mut Dependencies) -> ClikitResult<T> + Send + Sync + 'static,
    {
        Self {
            key: ServiceKey::of::<T>(),
            provider: Provider::Constructor {
                dependencies,
                construct: Box::new(move |deps: &mut Dependencies| {
                    construct(deps).map(|v| Arc::new(v) as AnyService)
                }),
            },
            lifetime,
        }
    }

    pub fn key(&self) -> ServiceKey {
        self.key
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let provider = match &self.provider {
            Provider::Instance(_) => "instance",
            Provider::Factory(_) => "factory",
            Provider::Constructor { .. } => "constructor",
        };
        f.debug_struct("ServiceDescriptor")
            .field("key", &self.key)
            .field("provider", &provider)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

/// Resolved dependencies of a constructor, consumed front to back.
pub struct Dependencies {
    service: &'static str,
    values: VecDeque<(ServiceKey, AnyService)>,
}

impl Dependencies {
    /// Take the next dependency as `D`.
    pub fn take<D: Send + Sync + 'static>(&mut self) -> ClikitResult<Arc<D>> {
        let (key, value) = self
            .values
            .pop_front()
            .ok_or(ApplicationError::MissingDependency {
                service: self.service,
                dependency: type_name::<D>(),
            })?;

        value.downcast::<D>().map_err(|_| {
            ApplicationError::ServiceTypeMismatch {
                expected: type_name::<D>(),
                found: key.name(),
            }
            .into()
        })
    }

    /// Take the next dependency and clone it out of its `Arc`.
    pub fn take_cloned<D: Clone + Send + Sync + 'static>(&mut self) -> ClikitResult<D> {
        self.take::<D>().map(|d| (*d).clone())
    }
}

/// Registry of service providers.
///
/// Locks are never held while a provider runs, so factories may resolve
/// other services. Resolution is expected to happen from one thread at a
/// time: the cycle guard tracks a single resolution chain.
#[derive(Default)]
pub struct ServiceContainer {
    services: RwLock<HashMap<ServiceKey, Arc<ServiceDescriptor>>>,
    instances: RwLock<HashMap<ServiceKey, AnyService>>,
    resolving: Mutex<Vec<ServiceKey>>,
}

impl ServiceContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, replacing any provider and cached instance
    /// under the same key.
    pub fn register(&self, descriptor: ServiceDescriptor) -> ClikitResult<()> {
        let key = descriptor.key;
        debug!(service = key.name(), lifetime = ?descriptor.lifetime, "registering service");

        self.services
            .write()
            .map_err(|_| ApplicationError::ContainerLockError)?
            .insert(key, Arc::new(descriptor));
        self.instances
            .write()
            .map_err(|_| ApplicationError::ContainerLockError)?
            .remove(&key);
        Ok(())
    }

    pub fn register_instance<T: Send + Sync + 'static>(&self, value: T) -> ClikitResult<()> {
        self.register(ServiceDescriptor::instance(value))
    }

    pub fn register_singleton<T, F>(&self, factory: F) -> ClikitResult<()>
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceContainer) -> ClikitResult<T> + Send + Sync + 'static,
    {
        self.register(ServiceDescriptor::factory(Lifetime::Singleton, factory))
    }

    pub fn register_transient<T, F>(&self, factory: F) -> ClikitResult<()>
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceContainer) -> ClikitResult<T> + Send + Sync + 'static,
    {
        self.register(ServiceDescriptor::factory(Lifetime::Transient, factory))
    }

    pub fn has<T: ?Sized + 'static>(&self) -> bool {
        self.services
            .read()
            .map(|s| s.contains_key(&ServiceKey::of::<T>()))
            .unwrap_or(false)
    }

    /// Resolve `T`, building it if needed.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> ClikitResult<Arc<T>> {
        let key = ServiceKey::of::<T>();
        self.resolve_key(key)?.downcast::<T>().map_err(|_| {
            ApplicationError::ServiceTypeMismatch {
                expected: type_name::<T>(),
                found: key.name(),
            }
            .into()
        })
    }

    /// Resolve `T` and clone it out of its `Arc`. Convenient for services
    /// that are themselves handles, such as `Arc<dyn Trait>`.
    pub fn resolve_cloned<T: Clone + Send + Sync + 'static>(&self) -> ClikitResult<T> {
        self.resolve::<T>().map(|v| (*v).clone())
    }

    /// Names of all registered services, for diagnostics.
    pub fn service_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .services
            .read()
            .map(|s| s.keys().map(ServiceKey::name).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    #[instrument(skip_all, fields(service = key.name()))]
    fn resolve_key(&self, key: ServiceKey) -> ClikitResult<AnyService> {
        if let Some(cached) = self
            .instances
            .read()
            .map_err(|_| ApplicationError::ContainerLockError)?
            .get(&key)
        {
            return Ok(Arc::clone(cached));
        }

        let descriptor = self
            .services
            .read()
            .map_err(|_| ApplicationError::ContainerLockError)?
            .get(&key)
            .cloned()
            .ok_or(ApplicationError::ServiceNotFound { service: key.name() })?;

        if let Provider::Instance(value) = &descriptor.provider {
            return Ok(Arc::clone(value));
        }

        self.enter(key)?;
        let built = self.build(&descriptor);
        self.leave(key)?;
        let built = built?;

        if descriptor.lifetime == Lifetime::Singleton {
            let mut instances = self
                .instances
                .write()
                .map_err(|_| ApplicationError::ContainerLockError)?;
            return Ok(Arc::clone(instances.entry(key).or_insert(built)));
        }
        Ok(built)
    }

    fn build(&self, descriptor: &ServiceDescriptor) -> ClikitResult<AnyService> {
        debug!(service = descriptor.key.name(), "constructing service");
        match &descriptor.provider {
            Provider::Instance(value) => Ok(Arc::clone(value)),
            Provider::Factory(factory) => factory(self),
            Provider::Constructor {
                dependencies,
                construct,
            } => {
                let values = dependencies
                    .iter()
                    .map(|dep| self.resolve_key(*dep).map(|v| (*dep, v)))
                    .collect::<ClikitResult<VecDeque<_>>>()?;
                construct(&mut Dependencies {
                    service: descriptor.key.name(),
                    values,
                })
            }
        }
    }

    fn enter(&self, key: ServiceKey) -> ClikitResult<()> {
        let mut chain = self
            .resolving
            .lock()
            .map_err(|_| ApplicationError::ContainerLockError)?;

        if chain.contains(&key) {
            let names = chain
                .iter()
                .chain(std::iter::once(&key))
                .map(ServiceKey::name)
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ClikitError::from(ApplicationError::DependencyCycle {
                chain: names,
            }));
        }
        chain.push(key);
        Ok(())
    }

    fn leave(&self, key: ServiceKey) -> ClikitResult<()> {
        let mut chain = self
            .resolving
            .lock()
            .map_err(|_| ApplicationError::ContainerLockError)?;
        if let Some(pos) = chain.iter().rposition(|k| *k == key) {
            chain.remove(pos);
        }
        Ok(())
    }
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("services", &self.service_names())
            .finish_non_exhaustive()
    }
}

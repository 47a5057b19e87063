//! Type-keyed service container.
//!
//! Services are registered as ready instances, as singletons built on first
//! use, or as transients built on every resolve.

use std::any::{Any, TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{AppError, AppResult};

type Instance = Rc<dyn Any>;
type Factory = Rc<dyn Fn(&Container) -> AppResult<Instance>>;

enum Provider {
    Instance(Instance),
    Singleton {
        factory: Factory,
        cached: Option<Instance>,
    },
    Transient(Factory),
}

#[derive(Default)]
pub struct Container {
    providers: RefCell<HashMap<TypeId, Provider>>,
    resolving: RefCell<Vec<&'static str>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_instance<T: 'static>(&self, value: T) {
        self.insert::<T>(Provider::Instance(Rc::new(value)));
    }

    pub fn register_singleton<T, F>(&self, factory: F)
    where
        T: 'static,
        F: Fn(&Container) -> AppResult<T> + 'static,
    {
        self.insert::<T>(Provider::Singleton {
            factory: erase(factory),
            cached: None,
        });
    }

    pub fn register_transient<T, F>(&self, factory: F)
    where
        T: 'static,
        F: Fn(&Container) -> AppResult<T> + 'static,
    {
        self.insert::<T>(Provider::Transient(erase(factory)));
    }

    pub fn resolve<T: 'static>(&self) -> AppResult<Rc<T>> {
        let name = type_name::<T>();
        let factory = {
            let providers = self.providers.borrow();
            match providers.get(&TypeId::of::<T>()) {
                None => return Err(AppError::ServiceNotFound(name)),
                Some(Provider::Instance(instance))
                | Some(Provider::Singleton {
                    cached: Some(instance),
                    ..
                }) => return downcast(Rc::clone(instance)),
                Some(Provider::Singleton { factory, .. }) | Some(Provider::Transient(factory)) => {
                    Rc::clone(factory)
                }
            }
        };

        if self.resolving.borrow().contains(&name) {
            let mut chain = self.resolving.borrow().clone();
            chain.push(name);
            return Err(AppError::DependencyCycle(chain.join(" -> ")));
        }

        self.resolving.borrow_mut().push(name);
        let built = factory(self);
        self.resolving.borrow_mut().pop();
        let instance = built?;

        if let Some(Provider::Singleton { cached, .. }) =
            self.providers.borrow_mut().get_mut(&TypeId::of::<T>())
        {
            *cached = Some(Rc::clone(&instance));
        }
        downcast(instance)
    }

    pub fn resolve_cloned<T: Clone + 'static>(&self) -> AppResult<T> {
        self.resolve::<T>().map(|value| (*value).clone())
    }

    fn insert<T: 'static>(&self, provider: Provider) {
        self.providers
            .borrow_mut()
            .insert(TypeId::of::<T>(), provider);
    }
}

fn erase<T, F>(factory: F) -> Factory
where
    T: 'static,
    F: Fn(&Container) -> AppResult<T> + 'static,
{
    Rc::new(move |container| factory(container).map(|value| Rc::new(value) as Instance))
}

fn downcast<T: 'static>(instance: Instance) -> AppResult<Rc<T>> {
    instance
        .downcast::<T>()
        .map_err(|_| AppError::ServiceNotFound(type_name::<T>()))
}

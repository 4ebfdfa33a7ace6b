use crate::component::PrepareError;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

///
/// Services
/// Type-keyed collection of shared collaborators (directories, indexes,
/// clocks). One instance per type; inserting again replaces it.
///

#[derive(Default)]
pub struct Services {
    entries: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Services {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: Any + Send + Sync>(&mut self, service: T) {
        self.entries.insert(TypeId::of::<T>(), Box::new(service));
    }

    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// RequestContext
/// Per-request view handed to construct, prepare and render. Carries the
/// installed services plus nothing else; components hold no global state.
///

#[derive(Default)]
pub struct RequestContext {
    services: Services,
}

impl RequestContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_service<T: Any + Send + Sync>(mut self, service: T) -> Self {
        self.services.insert(service);
        self
    }

    #[must_use]
    pub fn service<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.services.get::<T>()
    }

    /// Fetch a collaborator or fail `prepare` with its name.
    pub fn require<T: Any + Send + Sync>(&self, name: &'static str) -> Result<&T, PrepareError> {
        self.service::<T>()
            .ok_or(PrepareError::MissingService(name))
    }

    #[must_use]
    pub const fn services(&self) -> &Services {
        &self.services
    }
}

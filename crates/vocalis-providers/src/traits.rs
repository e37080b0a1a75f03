//! Model trait — the opaque handle every constructor returns.
//!
//! The registry only ever sees this trait. Callers that know which concrete
//! integration they registered can downcast via [`Model::as_any`].

use std::any::Any;
use std::fmt;

use vocalis_core::Capability;

/// A live or lazily-initialised client for one capability/provider/model.
pub trait Model: Send + Sync + fmt::Debug {
    /// The role this handle fills.
    fn capability(&self) -> Capability;

    /// Provider name as registered (e.g. `"groq"`).
    fn provider(&self) -> &str;

    /// The model id the handle was built for.
    fn model_id(&self) -> &str;

    /// Escape hatch for downcasting to the concrete integration.
    fn as_any(&self) -> &dyn Any;
}

/// What `resolve` hands back. Owned by the caller.
pub type ModelHandle = Box<dyn Model>;

impl<'a> dyn Model + 'a {
    /// Downcast to a concrete handle type.
    pub fn downcast_ref<T: Model + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use tracing::{debug, error};

use crate::error::ChartResult;
use crate::render::PlotEngine;

/// Shared handle to the loaded engine; one per page.
pub type EngineHandle = Rc<dyn PlotEngine>;

type SharedLoad = Shared<LocalBoxFuture<'static, ChartResult<EngineHandle>>>;

/// Fetches the external engine asset and initializes it.
///
/// Implementations perform exactly one network fetch per call; `EngineCache`
/// guarantees the call happens at most once per page.
pub trait EngineLoader {
    fn load(&self, url: &str) -> LocalBoxFuture<'static, ChartResult<EngineHandle>>;
}

/// Observable load lifecycle. There is no transition back to `Unloaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Unloaded,
    /// A fetch is in flight, or it failed and the page keeps waiting.
    Loading,
    Ready,
}

enum LoadSlot {
    Unloaded,
    Loading(SharedLoad),
    Ready(EngineHandle),
}

/// Memoized engine load shared by every chart on the page.
pub struct EngineCache {
    loader: Rc<dyn EngineLoader>,
    url: String,
    slot: RefCell<LoadSlot>,
}

impl fmt::Debug for EngineCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineCache")
            .field("url", &self.url)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl EngineCache {
    #[must_use]
    pub fn new(loader: Rc<dyn EngineLoader>, url: impl Into<String>) -> Self {
        Self {
            loader,
            url: url.into(),
            slot: RefCell::new(LoadSlot::Unloaded),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        match &*self.slot.borrow() {
            LoadSlot::Unloaded => EngineState::Unloaded,
            LoadSlot::Loading(_) => EngineState::Loading,
            LoadSlot::Ready(_) => EngineState::Ready,
        }
    }

    /// Loaded engine, without triggering a load.
    #[must_use]
    pub fn engine(&self) -> Option<EngineHandle> {
        match &*self.slot.borrow() {
            LoadSlot::Ready(engine) => Some(Rc::clone(engine)),
            _ => None,
        }
    }

    /// Resolves to the page's engine, starting the fetch on first use.
    ///
    /// Callers that arrive while the fetch is in flight await the same shared
    /// future. A failed load is logged once and every caller, present or
    /// future, observes the same error; nothing retries.
    pub async fn ensure_engine_loaded(&self) -> ChartResult<EngineHandle> {
        let load = {
            let mut slot = self.slot.borrow_mut();
            match &*slot {
                LoadSlot::Ready(engine) => return Ok(Rc::clone(engine)),
                LoadSlot::Loading(load) => load.clone(),
                LoadSlot::Unloaded => {
                    debug!(url = %self.url, "loading plotting engine");
                    let url = self.url.clone();
                    let load = self
                        .loader
                        .load(&self.url)
                        .map(move |result| {
                            match &result {
                                Ok(_) => debug!(%url, "plotting engine ready"),
                                Err(err) => {
                                    error!(%url, error = %err, "plotting engine failed to load");
                                }
                            }
                            result
                        })
                        .boxed_local()
                        .shared();
                    *slot = LoadSlot::Loading(load.clone());
                    load
                }
            }
        };

        let result = load.await;
        if let Ok(engine) = &result {
            let mut slot = self.slot.borrow_mut();
            if matches!(*slot, LoadSlot::Loading(_)) {
                *slot = LoadSlot::Ready(Rc::clone(engine));
            }
        }
        result
    }
}

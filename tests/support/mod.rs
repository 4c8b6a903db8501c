#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};
use mathviz_charts::api::{EngineHandle, EngineLoader};
use mathviz_charts::error::{ChartError, ChartResult};
use mathviz_charts::render::NullEngine;

/// Loader that resolves on first poll with a shared `NullEngine`.
#[derive(Default)]
pub struct ReadyLoader {
    pub engine: Rc<NullEngine>,
    fetches: Cell<usize>,
}

impl ReadyLoader {
    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }
}

impl EngineLoader for ReadyLoader {
    fn load(&self, _url: &str) -> LocalBoxFuture<'static, ChartResult<EngineHandle>> {
        self.fetches.set(self.fetches.get() + 1);
        let engine: EngineHandle = self.engine.clone();
        async move { Ok(engine) }.boxed_local()
    }
}

/// Loader whose fetch stays in flight until the test resolves or fails it.
#[derive(Default)]
pub struct GatedLoader {
    fetches: Cell<usize>,
    gate: RefCell<Option<oneshot::Sender<ChartResult<EngineHandle>>>>,
}

impl GatedLoader {
    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }

    pub fn resolve(&self, engine: EngineHandle) {
        let sender = self.gate.borrow_mut().take().expect("fetch in flight");
        let _ = sender.send(Ok(engine));
    }

    pub fn fail(&self, url: &str, reason: &str) {
        let sender = self.gate.borrow_mut().take().expect("fetch in flight");
        let _ = sender.send(Err(ChartError::EngineLoad {
            url: url.to_owned(),
            reason: reason.to_owned(),
        }));
    }
}

impl EngineLoader for GatedLoader {
    fn load(&self, url: &str) -> LocalBoxFuture<'static, ChartResult<EngineHandle>> {
        self.fetches.set(self.fetches.get() + 1);
        let (sender, receiver) = oneshot::channel();
        *self.gate.borrow_mut() = Some(sender);
        let url = url.to_owned();
        async move {
            receiver.await.unwrap_or_else(|_| {
                Err(ChartError::EngineLoad {
                    url,
                    reason: "fetch cancelled".to_owned(),
                })
            })
        }
        .boxed_local()
    }
}

/// Polls `future` once without a real executor.
pub fn poll_once<T>(future: &mut LocalBoxFuture<'_, T>) -> Poll<T> {
    let waker = futures::task::noop_waker();
    let mut cx = Context::from_waker(&waker);
    future.poll_unpin(&mut cx)
}

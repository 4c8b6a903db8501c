mod support;

use std::rc::Rc;

use futures::executor::block_on;
use futures::future::{FutureExt, join_all};
use mathviz_charts::api::{DEFAULT_ENGINE_URL, EngineCache, EngineHandle, EngineState};
use mathviz_charts::error::ChartError;
use mathviz_charts::render::NullEngine;

use support::{GatedLoader, ReadyLoader, poll_once};

#[test]
fn concurrent_callers_share_one_fetch_and_one_handle() {
    let loader = Rc::new(GatedLoader::default());
    let cache = EngineCache::new(loader.clone(), DEFAULT_ENGINE_URL);
    assert_eq!(cache.state(), EngineState::Unloaded);

    let mut calls: Vec<_> = (0..8)
        .map(|_| cache.ensure_engine_loaded().boxed_local())
        .collect();
    for call in &mut calls {
        assert!(poll_once(call).is_pending());
    }
    assert_eq!(loader.fetches(), 1);
    assert_eq!(cache.state(), EngineState::Loading);
    assert!(cache.engine().is_none());

    let engine: EngineHandle = Rc::new(NullEngine::default());
    loader.resolve(Rc::clone(&engine));

    let results = block_on(join_all(calls));
    assert_eq!(results.len(), 8);
    for result in results {
        let handle = result.expect("engine loads");
        assert!(Rc::ptr_eq(&handle, &engine));
    }
    assert_eq!(loader.fetches(), 1);
    assert_eq!(cache.state(), EngineState::Ready);
}

#[test]
fn ready_engine_is_returned_without_another_fetch() {
    let loader = Rc::new(ReadyLoader::default());
    let cache = EngineCache::new(loader.clone(), DEFAULT_ENGINE_URL);

    let first = block_on(cache.ensure_engine_loaded()).expect("first load");
    let second = block_on(cache.ensure_engine_loaded()).expect("cached load");
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(loader.fetches(), 1);
    assert_eq!(cache.state(), EngineState::Ready);
}

#[test]
fn failed_load_is_shared_and_never_retried() {
    let loader = Rc::new(GatedLoader::default());
    let cache = EngineCache::new(loader.clone(), "https://cdn.example.test/engine.js");

    let mut first = cache.ensure_engine_loaded().boxed_local();
    let mut second = cache.ensure_engine_loaded().boxed_local();
    assert!(poll_once(&mut first).is_pending());
    assert!(poll_once(&mut second).is_pending());

    loader.fail("https://cdn.example.test/engine.js", "503");
    let first = block_on(first).map(|_| ()).expect_err("load fails");
    let second = block_on(second).map(|_| ()).expect_err("load fails");
    assert_eq!(first, second);
    assert!(matches!(first, ChartError::EngineLoad { .. }));

    let late = block_on(cache.ensure_engine_loaded())
        .map(|_| ())
        .expect_err("no retry");
    assert_eq!(late, first);
    assert_eq!(loader.fetches(), 1);
    assert_eq!(cache.state(), EngineState::Loading);
}

#[test]
fn dropping_every_waiter_does_not_restart_the_fetch() {
    let loader = Rc::new(GatedLoader::default());
    let cache = EngineCache::new(loader.clone(), DEFAULT_ENGINE_URL);

    let mut abandoned = cache.ensure_engine_loaded().boxed_local();
    assert!(poll_once(&mut abandoned).is_pending());
    drop(abandoned);
    assert_eq!(cache.state(), EngineState::Loading);

    let mut waiter = cache.ensure_engine_loaded().boxed_local();
    assert!(poll_once(&mut waiter).is_pending());
    let engine: EngineHandle = Rc::new(NullEngine::default());
    loader.resolve(Rc::clone(&engine));

    let handle = block_on(waiter).expect("engine loads");
    assert!(Rc::ptr_eq(&handle, &engine));
    assert_eq!(loader.fetches(), 1);
}

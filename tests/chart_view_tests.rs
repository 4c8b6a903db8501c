mod support;

use std::rc::Rc;

use futures::executor::block_on;
use futures::future::FutureExt;
use mathviz_charts::api::{ChartView, MountOutcome, RendererAdapter, RendererConfig, ViewOutcome};
use mathviz_charts::charts::ChartId;
use mathviz_charts::render::ContainerId;

use support::{GatedLoader, ReadyLoader, poll_once};

#[test]
fn known_chart_renders_at_its_own_height() {
    let loader = Rc::new(ReadyLoader::default());
    let adapter =
        RendererAdapter::new(loader.clone(), RendererConfig::default()).expect("valid config");
    let view = ChartView::attach(&adapter, ContainerId::from("greeks")).expect("attach");

    let outcome = block_on(view.render_chart("black-scholes-greeks"));
    assert_eq!(
        outcome,
        ViewOutcome::Rendered {
            chart: ChartId::BlackScholesGreeks,
            height_px: 520,
            outcome: MountOutcome::Drawn { frames: 1 },
        }
    );
    let frame = loader.engine.frame(view.container()).expect("drawn");
    assert_eq!(frame.data.len(), ChartId::BlackScholesGreeks.produce().trace_count());
}

#[test]
fn unknown_chart_shows_an_inline_error_without_loading_the_engine() {
    let loader = Rc::new(ReadyLoader::default());
    let adapter =
        RendererAdapter::new(loader.clone(), RendererConfig::default()).expect("valid config");
    let view = ChartView::attach(&adapter, ContainerId::from("broken")).expect("attach");

    let ViewOutcome::InlineError(message) = block_on(view.render_chart("not-a-real-chart")) else {
        panic!("expected an inline error");
    };
    assert!(message.contains("not-a-real-chart"));
    assert_eq!(loader.fetches(), 0);
    assert_eq!(loader.engine.draw_count(), 0);
}

#[test]
fn engine_failure_leaves_the_placeholder_loading() {
    let loader = Rc::new(GatedLoader::default());
    let adapter =
        RendererAdapter::new(loader.clone(), RendererConfig::default()).expect("valid config");
    let view = ChartView::attach(&adapter, ContainerId::from("helix")).expect("attach");

    let mut render = view.render_chart("parametric-helix").boxed_local();
    assert!(poll_once(&mut render).is_pending());
    loader.fail(adapter.config().engine_url.as_str(), "blocked by host");

    assert_eq!(
        block_on(render),
        ViewOutcome::Loading {
            height_px: ChartId::ParametricHelix
                .produce()
                .layout
                .height
                .unwrap_or(500)
        }
    );
}

#[test]
fn dropping_the_view_releases_its_container() {
    let loader = Rc::new(ReadyLoader::default());
    let adapter =
        RendererAdapter::new(loader.clone(), RendererConfig::default()).expect("valid config");
    let container = ContainerId::from("cones");

    {
        let view = ChartView::attach(&adapter, container.clone()).expect("attach");
        block_on(view.render_chart("gradient-cones"));
        assert!(adapter.is_attached(&container));
    }

    assert!(!adapter.is_attached(&container));
    assert_eq!(loader.engine.purged(), vec![container]);
}

#[test]
fn several_views_share_one_engine_fetch() {
    let loader = Rc::new(ReadyLoader::default());
    let adapter =
        RendererAdapter::new(loader.clone(), RendererConfig::default()).expect("valid config");

    let views: Vec<ChartView<'_>> = ChartId::ALL
        .iter()
        .map(|chart| {
            ChartView::attach(&adapter, ContainerId::new(chart.as_str())).expect("attach")
        })
        .collect();
    for (view, chart) in views.iter().zip(ChartId::ALL) {
        let outcome = block_on(view.render_chart(chart.as_str()));
        assert!(matches!(outcome, ViewOutcome::Rendered { .. }), "{chart}");
    }

    assert_eq!(loader.fetches(), 1);
    assert_eq!(loader.engine.live_containers(), ChartId::ALL.len());
}

use std::cell::RefCell;
use std::rc::Rc;

use plotline::api::{PlotEngine, PlotEngineConfig};
use plotline::core::{Series, SeriesData, Viewport};
use plotline::error::PlotResult;
use plotline::extensions::{DrawContext, HookRegistry, OverlayRenderer, SeriesRenderer};
use plotline::render::{NullSurface, RenderFrame};

type CallLog = Rc<RefCell<Vec<String>>>;

struct RecordingSeriesRenderer {
    name: &'static str,
    log: CallLog,
}

impl SeriesRenderer for RecordingSeriesRenderer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn draw_series(
        &mut self,
        context: &DrawContext,
        series: &Series,
        _frame: &mut RenderFrame,
    ) -> PlotResult<()> {
        // Hooks must only ever observe committed transforms.
        context.transform(series.x_axis())?;
        context.transform(series.y_axis())?;
        self.log.borrow_mut().push(self.name.to_owned());
        Ok(())
    }
}

struct RecordingOverlayRenderer {
    name: &'static str,
    log: CallLog,
}

impl OverlayRenderer for RecordingOverlayRenderer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn draw_overlay(&mut self, context: &DrawContext, _frame: &mut RenderFrame) -> PlotResult<()> {
        self.log
            .borrow_mut()
            .push(format!("{}:{}", self.name, context.transforms().count()));
        Ok(())
    }
}

fn registry_with_log(log: &CallLog) -> HookRegistry {
    let mut hooks = HookRegistry::default();
    hooks.on_draw_series(RecordingSeriesRenderer {
        name: "series-one",
        log: Rc::clone(log),
    });
    hooks.on_draw_series(RecordingSeriesRenderer {
        name: "series-two",
        log: Rc::clone(log),
    });
    hooks.on_draw_overlay(RecordingOverlayRenderer {
        name: "overlay",
        log: Rc::clone(log),
    });
    hooks
}

#[test]
fn hooks_run_in_registration_order_per_series() {
    let log: CallLog = Rc::default();
    let config = PlotEngineConfig::new(Viewport::new(800, 600));
    let mut engine =
        PlotEngine::with_hooks(NullSurface::default(), config, registry_with_log(&log))
            .expect("engine init");

    engine
        .set_data(vec![
            SeriesData::from_points(vec![Some((0.0, 0.0)), Some((1.0, 1.0))]),
            SeriesData::from_points(vec![Some((0.0, 1.0)), Some((1.0, 0.0))]),
        ])
        .expect("set data");
    engine.setup_grid().expect("setup grid");
    engine.draw().expect("draw");

    assert_eq!(
        log.borrow().as_slice(),
        [
            "series-one",
            "series-two",
            "series-one",
            "series-two",
            "overlay:2"
        ]
    );
}

#[test]
fn renderer_options_pass_through_opaquely() {
    struct OptionsProbe {
        log: CallLog,
    }

    impl SeriesRenderer for OptionsProbe {
        fn name(&self) -> &'static str {
            "options-probe"
        }

        fn draw_series(
            &mut self,
            _context: &DrawContext,
            series: &Series,
            _frame: &mut RenderFrame,
        ) -> PlotResult<()> {
            if series.options()["dashed"] == true {
                self.log.borrow_mut().push("dashed".to_owned());
            }
            Ok(())
        }
    }

    let log: CallLog = Rc::default();
    let mut hooks = HookRegistry::default();
    hooks.on_draw_series(OptionsProbe {
        log: Rc::clone(&log),
    });

    let config = PlotEngineConfig::new(Viewport::new(800, 600));
    let mut engine =
        PlotEngine::with_hooks(NullSurface::default(), config, hooks).expect("engine init");
    engine
        .set_data(vec![
            SeriesData::from_points(vec![Some((0.0, 0.0)), Some((1.0, 1.0))])
                .with_options(serde_json::json!({ "dashed": true })),
        ])
        .expect("set data");
    engine.setup_grid().expect("setup grid");
    engine.draw().expect("draw");

    assert_eq!(log.borrow().as_slice(), ["dashed"]);
}

#[test]
fn default_registry_carries_the_builtin_renderers_first() {
    let hooks = HookRegistry::with_default_renderers();
    assert_eq!(hooks.series_renderer_names(), ["lines"]);
    assert_eq!(hooks.overlay_renderer_names(), ["selection"]);
}

#[test]
fn process_options_hooks_rewrite_the_config_before_validation() {
    let mut hooks = HookRegistry::with_default_renderers();
    hooks.on_process_options(|config| {
        config.grid.label_margin = 9.0;
    });

    let config = PlotEngineConfig::new(Viewport::new(800, 600));
    let engine =
        PlotEngine::with_hooks(NullSurface::default(), config, hooks).expect("engine init");
    assert_eq!(engine.config().grid.label_margin, 9.0);
}

#[test]
fn bind_events_hooks_run_once_at_construction() {
    let log: CallLog = Rc::default();
    let mut hooks = HookRegistry::with_default_renderers();
    {
        let log = Rc::clone(&log);
        hooks.on_bind_events(move |context| {
            log.borrow_mut()
                .push(format!("bound:{}", context.viewport.width));
        });
    }

    let config = PlotEngineConfig::new(Viewport::new(800, 600));
    let _engine =
        PlotEngine::with_hooks(NullSurface::default(), config, hooks).expect("engine init");
    assert_eq!(log.borrow().as_slice(), ["bound:800"]);
}

#[test]
fn shutdown_hooks_run_once_even_if_called_twice() {
    let log: CallLog = Rc::default();
    let mut hooks = HookRegistry::with_default_renderers();
    {
        let log = Rc::clone(&log);
        hooks.on_shutdown(move |_context| {
            log.borrow_mut().push("shutdown".to_owned());
        });
    }

    let config = PlotEngineConfig::new(Viewport::new(800, 600));
    let mut engine =
        PlotEngine::with_hooks(NullSurface::default(), config, hooks).expect("engine init");

    engine.shutdown();
    engine.shutdown();
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn collaborator_renderers_append_after_the_builtins() {
    let log: CallLog = Rc::default();
    let config = PlotEngineConfig::new(Viewport::new(800, 600));
    let mut engine = PlotEngine::new(NullSurface::default(), config).expect("engine init");

    engine.hooks_mut().on_draw_series(RecordingSeriesRenderer {
        name: "custom",
        log: Rc::clone(&log),
    });
    assert_eq!(engine.hooks().series_renderer_names(), ["lines", "custom"]);
}

//! Headless loop integration tests

use arcade_engine::prelude::*;

#[derive(Default)]
struct Recorder {
    entered: Option<Viewport>,
    frames: u32,
    touches: Vec<(u32, f32)>,
    stop_after: Option<u32>,
}

impl Application for Recorder {
    fn on_enter(&mut self, viewport: Viewport) -> Result<(), AppError> {
        self.entered = Some(viewport);
        Ok(())
    }

    fn on_frame(&mut self, _delta_time: f32) -> Result<(), AppError> {
        self.frames += 1;
        Ok(())
    }

    fn on_touch_begin(&mut self, touches: &[Touch]) -> Result<(), AppError> {
        self.touches.extend(touches.iter().map(|t| (self.frames, t.location.x)));
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.stop_after.is_some_and(|limit| self.frames >= limit)
    }
}

struct Failing;

impl Application for Failing {
    fn on_enter(&mut self, _viewport: Viewport) -> Result<(), AppError> {
        Err(AppError::Asset("player".into()))
    }

    fn on_frame(&mut self, _delta_time: f32) -> Result<(), AppError> {
        Ok(())
    }
}

fn config(max_frames: u64) -> EngineConfig {
    arcade_engine::foundation::logging::init_for_tests();
    EngineConfig {
        viewport: Viewport::new(800.0, 600.0),
        max_frames,
        ..EngineConfig::default()
    }
}

#[test]
fn test_runs_until_frame_limit() {
    let mut app = Recorder::default();
    let report = Engine::run(config(120), &mut app, InputScript::new()).unwrap();

    assert_eq!(report.frames, 120);
    assert!(!report.finished);
    assert!((report.simulated_time - 2.0).abs() < 1e-3);
    assert_eq!(app.entered, Some(Viewport::new(800.0, 600.0)));
}

#[test]
fn test_input_is_delivered_between_frames() {
    let mut app = Recorder::default();
    let script = InputScript::new()
        .with(0.0, InputEvent::TouchBegan(vec![Touch::new(0, 10.0, 0.0)]))
        .with(0.5, InputEvent::TouchBegan(vec![Touch::new(0, 20.0, 0.0)]));

    Engine::run(config(60), &mut app, script).unwrap();

    assert_eq!(app.touches.len(), 2);
    assert_eq!(app.touches[0], (0, 10.0));
    assert!((29..=31).contains(&app.touches[1].0));
}

#[test]
fn test_application_can_finish_early() {
    let mut app = Recorder { stop_after: Some(10), ..Recorder::default() };
    let report = Engine::run(config(1000), &mut app, InputScript::new()).unwrap();

    assert!(report.finished);
    assert_eq!(report.frames, 10);
}

#[test]
fn test_enter_failure_aborts_run() {
    let result = Engine::run(config(10), &mut Failing, InputScript::new());
    assert!(matches!(result, Err(EngineError::ApplicationError(_))));
}

#[test]
fn test_rejects_non_positive_step() {
    let bad = EngineConfig { fixed_dt: 0.0, ..config(10) };
    let result = Engine::run(bad, &mut Recorder::default(), InputScript::new());
    assert!(matches!(result, Err(EngineError::InitializationFailed(_))));
}

//! Behaviour-driven tests for the diagnostic carrier.

use std::cell::RefCell;

use lexicon_common::{Diagnostic, StageError, Staged};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|stripped| stripped.strip_suffix('"'))
        .unwrap_or(value)
}

#[derive(Default)]
struct PipelineWorld {
    staged: RefCell<Option<Staged<i64>>>,
    reported: RefCell<Vec<Diagnostic>>,
    emitted: RefCell<Option<i64>>,
}

impl PipelineWorld {
    fn apply<F>(&self, stage: F)
    where
        F: FnOnce(i64, &mut lexicon_common::DiagnosticSink) -> Result<i64, StageError>,
    {
        let current = self
            .staged
            .borrow_mut()
            .take()
            .unwrap_or_else(|| panic!("the pipeline should be started"));
        self.staged.replace(Some(current.bind(stage)));
    }
}

#[fixture]
fn world() -> PipelineWorld {
    PipelineWorld::default()
}

#[given("a pipeline starting from {value}")]
fn given_pipeline(world: &PipelineWorld, value: i64) {
    world.staged.replace(Some(Staged::new(value)));
}

#[given("a stage that warns about specifier {specifier}")]
fn given_warning_stage(world: &PipelineWorld, specifier: String) {
    let specifier = unquote(&specifier).to_owned();
    world.apply(move |value, sink| {
        sink.report(Diagnostic::invalid_locale_specifier(
            &specifier,
            "Texts.xx.resx",
            "Texts",
        ));
        Ok(value)
    });
}

#[given("a stage that adds {amount}")]
fn given_adding_stage(world: &PipelineWorld, amount: i64) {
    world.apply(move |value, _sink| Ok(value + amount));
}

#[given("a stage that fails for family {family}")]
fn given_failing_stage(world: &PipelineWorld, family: String) {
    let family = unquote(&family).to_owned();
    world.apply(move |_value, sink| Err(sink.fail(Diagnostic::missing_default_file(&family))));
}

#[given("a stage that panics with {message}")]
fn given_panicking_stage(world: &PipelineWorld, message: String) {
    let message = unquote(&message).to_owned();
    world.apply(move |_value, _sink| -> Result<i64, StageError> { panic!("{message}") });
}

#[when("the pipeline is sinked")]
fn when_sinked(world: &PipelineWorld) {
    let staged = world
        .staged
        .borrow_mut()
        .take()
        .unwrap_or_else(|| panic!("the pipeline should be started"));
    staged.sink(
        |diagnostic| world.reported.borrow_mut().push(diagnostic.clone()),
        |value| {
            world.emitted.replace(Some(value));
        },
    );
}

#[then("the value {expected} is emitted")]
fn then_emitted(world: &PipelineWorld, expected: i64) {
    assert_eq!(*world.emitted.borrow(), Some(expected));
}

#[then("nothing is emitted")]
fn then_nothing_emitted(world: &PipelineWorld) {
    assert!(world.emitted.borrow().is_none());
}

#[then("the reported codes are {codes}")]
fn then_codes(world: &PipelineWorld, codes: String) {
    let expected: Vec<&str> = unquote(&codes).split(", ").collect();
    let actual: Vec<String> = world
        .reported
        .borrow()
        .iter()
        .map(|diagnostic| diagnostic.code().id())
        .collect();
    assert_eq!(actual, expected);
}

#[then("a reported message mentions {snippet}")]
fn then_message_mentions(world: &PipelineWorld, snippet: String) {
    let snippet = unquote(&snippet);
    assert!(
        world
            .reported
            .borrow()
            .iter()
            .any(|diagnostic| diagnostic.message().contains(snippet)),
        "expected a diagnostic mentioning `{snippet}`"
    );
}

#[scenario("tests/features/staged_pipeline.feature", index = 0)]
fn scenario_warnings_flow(world: PipelineWorld) {
    let _ = world;
}

#[scenario("tests/features/staged_pipeline.feature", index = 1)]
fn scenario_errors_skip(world: PipelineWorld) {
    let _ = world;
}

#[scenario("tests/features/staged_pipeline.feature", index = 2)]
fn scenario_panics_reported(world: PipelineWorld) {
    let _ = world;
}

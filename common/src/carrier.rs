//! Value-with-diagnostics carrier threaded through the generator pipeline.
//!
//! [`Staged`] holds an optional payload plus every diagnostic recorded so
//! far. Binding a stage runs it only while a payload is present; once an
//! error has been recorded the payload is dropped and later stages are
//! skipped, but the diagnostics keep flowing so [`Staged::sink`] can report
//! them all.

use std::any::Any;
use std::error::Error as StdError;
use std::panic::{AssertUnwindSafe, catch_unwind};

use log::error;
use thiserror::Error;

use crate::diagnostics::{Diagnostic, has_errors};

/// Failure raised by a pipeline stage.
#[derive(Debug, Error)]
pub enum StageError {
    /// The stage has already recorded diagnostics explaining the failure.
    #[error("stage failed with reported diagnostics")]
    Reported,
    /// The stage failed in a way it could not describe itself.
    #[error("{0}")]
    Unexpected(Box<dyn StdError + Send + Sync>),
}

impl StageError {
    /// Wraps an arbitrary error as an unexpected stage failure.
    #[must_use]
    pub fn unexpected(error: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Unexpected(error.into())
    }
}

/// Collector handed to each stage for recording diagnostics.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    recorded: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// Records a diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.recorded.push(diagnostic);
    }

    /// Records `diagnostic` and returns [`StageError::Reported`] so a stage
    /// can bail out with `return Err(sink.fail(..))`.
    pub fn fail(&mut self, diagnostic: Diagnostic) -> StageError {
        self.report(diagnostic);
        StageError::Reported
    }

    /// Returns the diagnostics recorded so far.
    #[must_use]
    pub fn recorded(&self) -> &[Diagnostic] {
        &self.recorded
    }

    fn into_inner(self) -> Vec<Diagnostic> {
        self.recorded
    }
}

/// A pipeline payload together with its accumulated diagnostics.
#[derive(Debug)]
pub struct Staged<T> {
    value: Option<T>,
    diagnostics: Vec<Diagnostic>,
}

impl<T> Staged<T> {
    /// Wraps a value with no diagnostics.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value: Some(value),
            diagnostics: Vec::new(),
        }
    }

    /// Carries diagnostics without a value.
    #[must_use]
    pub const fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            value: None,
            diagnostics,
        }
    }

    /// Wraps a value with diagnostics, dropping the value if any diagnostic
    /// is an error.
    #[must_use]
    pub fn with_diagnostics(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        if has_errors(&diagnostics) {
            return Self::failed(diagnostics);
        }
        Self {
            value: Some(value),
            diagnostics,
        }
    }

    /// Returns the carried value, if the pipeline is still healthy.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Returns every diagnostic recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether an error has been recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        has_errors(&self.diagnostics)
    }

    /// Runs `stage` against the carried value.
    ///
    /// The stage is skipped when no value is present. A stage returning
    /// [`StageError::Unexpected`] or panicking is converted into an
    /// unexpected-error diagnostic; diagnostics the stage recorded before
    /// failing are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexicon_common::carrier::Staged;
    ///
    /// let doubled = Staged::new(21).bind(|value, _sink| Ok(value * 2));
    /// assert_eq!(doubled.value(), Some(&42));
    /// ```
    #[must_use]
    pub fn bind<U, F>(self, stage: F) -> Staged<U>
    where
        F: FnOnce(T, &mut DiagnosticSink) -> Result<U, StageError>,
    {
        let Self { value, diagnostics } = self;
        let Some(current) = value else {
            return Staged::failed(diagnostics);
        };

        let mut sink = DiagnosticSink::default();
        let outcome = catch_unwind(AssertUnwindSafe(|| stage(current, &mut sink)));

        let mut combined = diagnostics;
        match outcome {
            Ok(Ok(next)) => {
                combined.extend(sink.into_inner());
                Staged::with_diagnostics(next, combined)
            }
            Ok(Err(StageError::Reported)) => {
                combined.extend(sink.into_inner());
                Staged::failed(combined)
            }
            Ok(Err(StageError::Unexpected(cause))) => {
                combined.extend(sink.into_inner());
                combined.push(unexpected(&cause.to_string()));
                Staged::failed(combined)
            }
            Err(payload) => {
                combined.extend(sink.into_inner());
                combined.push(unexpected(&panic_message(payload.as_ref())));
                Staged::failed(combined)
            }
        }
    }

    /// Reports every diagnostic, then emits the value when no error was
    /// recorded.
    pub fn sink<R, E>(self, mut report: R, emit: E)
    where
        R: FnMut(&Diagnostic),
        E: FnOnce(T),
    {
        for diagnostic in &self.diagnostics {
            report(diagnostic);
        }
        if has_errors(&self.diagnostics) {
            return;
        }
        if let Some(value) = self.value {
            emit(value);
        }
    }

    /// Splits the carrier into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Option<T>, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }
}

fn unexpected(detail: &str) -> Diagnostic {
    error!(target: "lexicon::carrier", "stage failed unexpectedly: {detail}");
    Diagnostic::unexpected(detail)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_owned();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    String::from("stage panicked")
}

//! Syntax errors and rendering utilities.

use std::ops::Range;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use serde::Serialize;

/// A malformed selector: message plus the position of the offending token,
/// or of the end of input when nothing remains.
///
/// `line` and `column` are 1-based; `column` counts characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message} at {line}:{column}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Range<usize>,
    pub line: u32,
    pub column: u32,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Range<usize>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            span,
            line,
            column,
        }
    }

    /// Render against the selector source with annotate-snippets.
    pub fn render(&self, source: &str) -> String {
        self.printer(source).render()
    }

    pub fn printer<'e, 's>(&'e self, source: &'s str) -> SyntaxErrorPrinter<'e, 's> {
        SyntaxErrorPrinter::new(self, source)
    }
}

/// Builder for rendering a [`SyntaxError`] with various options.
pub struct SyntaxErrorPrinter<'e, 's> {
    error: &'e SyntaxError,
    source: &'s str,
    path: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> SyntaxErrorPrinter<'e, 's> {
    pub fn new(error: &'e SyntaxError, source: &'s str) -> Self {
        Self {
            error,
            source,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let range = adjust_range(self.error.span.clone(), self.source.len());
        let mut snippet = Snippet::source(self.source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(range)
                .label(&self.error.message),
        );

        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let report = vec![Level::ERROR.primary_title(&self.error.message).element(snippet)];
        renderer.render(&report).to_string()
    }
}

fn adjust_range(range: Range<usize>, limit: usize) -> Range<usize> {
    let start = range.start.min(limit);
    let end = range.end.min(limit);

    // Zero-width spans get one character so the caret is visible.
    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}

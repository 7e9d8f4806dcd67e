//! Source-annotated rendering of a single error.

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Location;

pub(super) struct Report<'a> {
    location: &'a Location,
    message: &'a str,
    related: Option<(&'a Location, &'a str)>,
}

impl<'a> Report<'a> {
    pub fn new(location: &'a Location, message: &'a str) -> Self {
        Self {
            location,
            message,
            related: None,
        }
    }

    pub fn related(mut self, location: &'a Location, label: &'a str) -> Self {
        self.related = Some((location, label));
        self
    }

    pub fn render(&self, source: &str, colored: bool) -> String {
        let renderer = if colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let mut snippet = Snippet::source(source)
            .line_start(1)
            .path(&*self.location.origin)
            .annotation(
                AnnotationKind::Primary
                    .span(adjust_range(self.location.range, source.len()))
                    .label(self.message),
            );

        if let Some((location, label)) = self.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(adjust_range(location.range, source.len()))
                    .label(label),
            );
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(self.message).element(snippet)];
        renderer.render(&report).to_string()
    }
}

/// Widen empty ranges to one character so the caret has something to point at.
fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start.min(limit)..(start + 1).min(limit);
    }

    start..end
}

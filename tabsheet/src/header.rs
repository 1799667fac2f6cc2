//! Header sub-view shown above the sheet.

use crate::renderer::SheetRenderer;

/// Caller-supplied header content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderProps {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Extra labels rendered at the trailing edge.
    pub extra: Vec<String>,
}

impl HeaderProps {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_extra(mut self, label: impl Into<String>) -> Self {
        self.extra.push(label.into());
        self
    }
}

/// Header bound to the live renderer.
///
/// Only exists while the renderer does; borrows both for the duration of a
/// view pass. Header controls reach the renderer through
/// [`sheet`](Self::sheet).
pub struct HeaderView<'a> {
    props: &'a HeaderProps,
    sheet: &'a dyn SheetRenderer,
}

impl<'a> HeaderView<'a> {
    pub(crate) fn new(props: &'a HeaderProps, sheet: &'a dyn SheetRenderer) -> Self {
        Self { props, sheet }
    }

    /// The renderer this header is attached to.
    pub fn sheet(&self) -> &'a dyn SheetRenderer {
        self.sheet
    }

    pub fn title(&self) -> Option<&str> {
        self.props.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.props.description.as_deref()
    }
}

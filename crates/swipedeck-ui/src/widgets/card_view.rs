use crate::modifier::Modifier;

/// Visual description of one card, produced by a [`CardContent`] strategy.
///
/// The label doubles as the card's semantic text.
#[derive(Clone, Debug, Default)]
pub struct CardView {
    pub label: Option<String>,
    pub modifier: Modifier,
}

impl CardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labeled(label: impl Into<String>) -> Self {
        Self::new().label(label)
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }
}

/// Strategy rendering an item into its card.
///
/// Implemented for every `Fn(&T) -> CardView`, so a closure is usually
/// enough.
pub trait CardContent<T> {
    fn render(&self, item: &T) -> CardView;
}

impl<T, F> CardContent<T> for F
where
    F: Fn(&T) -> CardView,
{
    fn render(&self, item: &T) -> CardView {
        self(item)
    }
}

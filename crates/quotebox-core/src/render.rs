//! Quote rendering
//!
//! The renderer turns a quote into a [`QuoteView`] and hands it to a
//! [`DisplaySurface`], which replaces whatever it showed before.

use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use crate::persistence::QuotePersistence;
use crate::store::QuoteStore;

/// Message shown when there is nothing to display
pub const EMPTY_MESSAGE: &str = "No quotes available.";

/// Content of the display surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuoteView {
    /// The collection is empty
    Empty,
    /// A single quote and where it sits in the collection
    Quote {
        index: usize,
        text: String,
        category: String,
    },
}

impl QuoteView {
    /// First visible line: the quote wrapped in double quotes, or the empty message
    pub fn text_line(&self) -> String {
        match self {
            QuoteView::Empty => EMPTY_MESSAGE.to_string(),
            QuoteView::Quote { text, .. } => format!("\"{}\"", text),
        }
    }

    /// Second visible line: the category label
    pub fn category_line(&self) -> Option<String> {
        match self {
            QuoteView::Empty => None,
            QuoteView::Quote { category, .. } => Some(format!("Category: {}", category)),
        }
    }

    /// Index of the displayed quote
    pub fn index(&self) -> Option<usize> {
        match self {
            QuoteView::Empty => None,
            QuoteView::Quote { index, .. } => Some(*index),
        }
    }
}

/// Something a quote can be displayed on
pub trait DisplaySurface {
    /// Replace the current content entirely
    fn replace(&mut self, view: QuoteView);
}

/// Surface that just remembers what it was last given
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    current: Option<QuoteView>,
    renders: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// What is currently displayed, if anything has been rendered
    pub fn current(&self) -> Option<&QuoteView> {
        self.current.as_ref()
    }

    /// How many times content was replaced
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl DisplaySurface for RecordingSurface {
    fn replace(&mut self, view: QuoteView) {
        self.current = Some(view);
        self.renders += 1;
    }
}

/// Build the view for the quote at `index`, if it exists
pub fn view_at(store: &QuoteStore, index: usize) -> Option<QuoteView> {
    store.get(index).map(|quote| QuoteView::Quote {
        index,
        text: quote.text.clone(),
        category: quote.category.clone(),
    })
}

/// Display a uniformly random quote and remember it in session storage
///
/// An empty store shows [`QuoteView::Empty`] and touches nothing else.
/// Returns the picked index.
pub fn show_random<R: Rng>(
    store: &QuoteStore,
    persistence: &mut QuotePersistence,
    surface: &mut dyn DisplaySurface,
    rng: &mut R,
) -> Option<usize> {
    if store.is_empty() {
        surface.replace(QuoteView::Empty);
        return None;
    }

    let index = rng.gen_range(0..store.len());
    persistence.save_last_viewed(index);

    let view = view_at(store, index)?;
    surface.replace(view);
    Some(index)
}

/// Redisplay a previously stored index without touching session storage
///
/// `stored` is the raw session value. Anything that isn't a JSON non-negative
/// integer addressing an existing quote is ignored. Returns whether a quote
/// was displayed.
pub fn show_at(store: &QuoteStore, surface: &mut dyn DisplaySurface, stored: Option<&str>) -> bool {
    let Some(index) = stored.and_then(parse_index) else {
        return false;
    };

    match view_at(store, index) {
        Some(view) => {
            surface.replace(view);
            true
        }
        None => false,
    }
}

fn parse_index(raw: &str) -> Option<usize> {
    let value: Value = serde_json::from_str(raw).ok()?;
    usize::try_from(value.as_u64()?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quote;
    use crate::persistence::LAST_VIEWED_KEY;
    use crate::storage::{KeyValueStorage, MemoryStorage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn persistence_with_session() -> (QuotePersistence, MemoryStorage) {
        let session = MemoryStorage::new();
        (
            QuotePersistence::new(MemoryStorage::new(), session.clone()),
            session,
        )
    }

    #[test]
    fn test_view_lines() {
        let view = QuoteView::Quote {
            index: 0,
            text: "Q".to_string(),
            category: "C".to_string(),
        };
        assert_eq!(view.text_line(), "\"Q\"");
        assert_eq!(view.category_line().as_deref(), Some("Category: C"));
        assert_eq!(view.index(), Some(0));

        assert_eq!(QuoteView::Empty.text_line(), "No quotes available.");
        assert!(QuoteView::Empty.category_line().is_none());
    }

    #[test]
    fn test_show_random_empty_store() {
        let (mut persistence, session) = persistence_with_session();
        let mut surface = RecordingSurface::new();
        let mut rng = StdRng::seed_from_u64(7);

        let picked = show_random(&QuoteStore::empty(), &mut persistence, &mut surface, &mut rng);

        assert!(picked.is_none());
        assert_eq!(surface.current(), Some(&QuoteView::Empty));
        assert!(session.get_item(LAST_VIEWED_KEY).unwrap().is_none());
    }

    #[test]
    fn test_show_random_picks_from_store() {
        let (mut persistence, session) = persistence_with_session();
        let store = QuoteStore::new();
        let mut surface = RecordingSurface::new();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let index = show_random(&store, &mut persistence, &mut surface, &mut rng).unwrap();
            assert!(index < store.len());

            let view = surface.current().unwrap();
            let quote = store.get(index).unwrap();
            assert_eq!(view.text_line(), format!("\"{}\"", quote.text));
            assert_eq!(view.index(), Some(index));
            assert_eq!(
                session.get_item(LAST_VIEWED_KEY).unwrap(),
                Some(index.to_string())
            );
        }
        assert_eq!(surface.renders(), 50);
    }

    #[test]
    fn test_show_random_covers_every_index() {
        let (mut persistence, _) = persistence_with_session();
        let store = QuoteStore::new();
        let mut surface = RecordingSurface::new();
        let mut rng = StdRng::seed_from_u64(1);

        let mut seen = [false; 3];
        for _ in 0..200 {
            let index = show_random(&store, &mut persistence, &mut surface, &mut rng).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_show_random_session_failure_still_renders() {
        let session = MemoryStorage::with_quota(1);
        let mut persistence = QuotePersistence::new(MemoryStorage::new(), session);
        let store = QuoteStore::from_quotes(vec![Quote::new("Only", "One")]);
        let mut surface = RecordingSurface::new();
        let mut rng = StdRng::seed_from_u64(3);

        let index = show_random(&store, &mut persistence, &mut surface, &mut rng);

        assert_eq!(index, Some(0));
        assert_eq!(surface.current().unwrap().text_line(), "\"Only\"");
    }

    #[test]
    fn test_show_at_valid_index() {
        let store = QuoteStore::new();
        let mut surface = RecordingSurface::new();

        assert!(show_at(&store, &mut surface, Some("1")));
        assert_eq!(surface.current(), view_at(&store, 1).as_ref());
    }

    #[test]
    fn test_show_at_rejects_bad_values() {
        let store = QuoteStore::new();
        let mut surface = RecordingSurface::new();

        for raw in [None, Some("3"), Some("-1"), Some("1.5"), Some("\"1\""), Some("null"), Some("x")] {
            assert!(!show_at(&store, &mut surface, raw), "raw {:?}", raw);
        }
        assert!(surface.current().is_none());
    }
}

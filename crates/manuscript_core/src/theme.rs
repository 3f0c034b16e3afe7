use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Handle returned by [`ThemeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(Theme) + Send>;

/// Observable light/dark preference shared by reference between views.
///
/// Any number of listeners may subscribe; they are called in subscription
/// order and only when the theme actually changes.
pub struct ThemeStore {
    theme: Theme,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ThemeStore {
    pub fn new(initial: Theme) -> Self {
        Self {
            theme: initial,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(Theme) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn set(&mut self, theme: Theme) {
        if self.theme == theme {
            return;
        }
        self.theme = theme;
        for (_, listener) in &mut self.listeners {
            listener(theme);
        }
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.theme.toggled();
        self.set(next);
        next
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("theme", &self.theme)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

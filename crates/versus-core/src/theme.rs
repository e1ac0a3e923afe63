//! Light/dark preference shared by the viewers.
//!
//! The preference is a `tokio::sync::watch` channel. A viewer reads it once when
//! it starts, through a [`ThemeSubscription`], and polls the subscription for
//! changes. Dropping the subscription unsubscribes.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
}

impl ColorScheme {
    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Dark => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Dark => "dark",
            ColorScheme::Light => "light",
        }
    }

    /// Parse a `COLORFGBG` value such as `15;0`. The last field is the
    /// background palette index; 7 and 9-15 are light backgrounds.
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        Some(match background {
            7 | 9..=15 => ColorScheme::Light,
            _ => ColorScheme::Dark,
        })
    }
}

/// Process-wide color scheme signal
#[derive(Debug, Clone)]
pub struct ThemePreference {
    tx: Arc<watch::Sender<ColorScheme>>,
}

impl ThemePreference {
    pub fn new(initial: ColorScheme) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Read the terminal's preference from `COLORFGBG`, defaulting to dark
    pub fn detect() -> Self {
        let scheme = std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| ColorScheme::from_colorfgbg(&value))
            .unwrap_or_default();
        Self::new(scheme)
    }

    pub fn current(&self) -> ColorScheme {
        *self.tx.borrow()
    }

    /// Change the preference; subscribers only see actual changes
    pub fn set(&self, scheme: ColorScheme) {
        self.tx.send_if_modified(|current| {
            if *current == scheme {
                return false;
            }
            *current = scheme;
            true
        });
    }

    pub fn toggle(&self) -> ColorScheme {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    pub fn subscribe(&self) -> ThemeSubscription {
        ThemeSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ThemePreference {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}

/// A viewer's handle on the preference
#[derive(Debug)]
pub struct ThemeSubscription {
    rx: watch::Receiver<ColorScheme>,
}

impl ThemeSubscription {
    pub fn current(&self) -> ColorScheme {
        *self.rx.borrow()
    }

    /// The new scheme, if it changed since the last call
    pub fn poll_change(&mut self) -> Option<ColorScheme> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }

    /// Wait for the next change. Returns `None` once the preference is gone.
    pub async fn changed(&mut self) -> Option<ColorScheme> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colorfgbg() {
        assert_eq!(ColorScheme::from_colorfgbg("15;0"), Some(ColorScheme::Dark));
        assert_eq!(ColorScheme::from_colorfgbg("0;15"), Some(ColorScheme::Light));
        assert_eq!(ColorScheme::from_colorfgbg("0;default;7"), Some(ColorScheme::Light));
        assert_eq!(ColorScheme::from_colorfgbg("nonsense"), None);
    }

    #[test]
    fn subscription_sees_changes_once() {
        let preference = ThemePreference::new(ColorScheme::Dark);
        let mut subscription = preference.subscribe();
        assert_eq!(subscription.current(), ColorScheme::Dark);
        assert_eq!(subscription.poll_change(), None);

        preference.set(ColorScheme::Light);
        assert_eq!(subscription.poll_change(), Some(ColorScheme::Light));
        assert_eq!(subscription.poll_change(), None);

        preference.set(ColorScheme::Light);
        assert_eq!(subscription.poll_change(), None);
    }

    #[test]
    fn dropping_unsubscribes() {
        let preference = ThemePreference::default();
        let subscription = preference.subscribe();
        assert_eq!(preference.subscriber_count(), 1);
        drop(subscription);
        assert_eq!(preference.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn waits_for_changes() {
        let preference = ThemePreference::new(ColorScheme::Dark);
        let mut subscription = preference.subscribe();
        let setter = preference.clone();
        tokio::spawn(async move {
            setter.toggle();
        });
        assert_eq!(subscription.changed().await, Some(ColorScheme::Light));
    }
}

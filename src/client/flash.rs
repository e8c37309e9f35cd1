use std::time::{Duration, Instant};

/// Durée d'affichage d'une notice avant disparition
pub const FLASH_DURATION: Duration = Duration::from_millis(2600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Ok,
    Warn,
}

#[derive(Debug, Clone)]
pub struct Flash {
    pub text: String,
    pub kind: FlashKind,
    shown_at: Instant,
}

/// Une seule notice à la fois; la suivante remplace la précédente
#[derive(Debug, Default)]
pub struct FlashBoard {
    current: Option<Flash>,
}

impl FlashBoard {
    pub fn show(&mut self, text: impl Into<String>, kind: FlashKind, now: Instant) {
        self.current = Some(Flash {
            text: text.into(),
            kind,
            shown_at: now,
        });
    }

    /// Notice encore visible à `now`, None une fois FLASH_DURATION écoulée
    pub fn current(&mut self, now: Instant) -> Option<&Flash> {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|flash| now.saturating_duration_since(flash.shown_at) >= FLASH_DURATION);
        if expired {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

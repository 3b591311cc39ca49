// Player input: marker clicks and the count field.

use super::{GameState, Phase};

/// Result of a marker click, consumed by the controller to decide which
/// timers to schedule or cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Round not in progress; nothing changed.
    Ignored,
    /// Correct marker, more to go. The marker needs a deferred removal.
    Advanced { id: u32 },
    /// Correct marker and it was the last one. Clock must stop.
    Cleared { id: u32 },
    /// Out-of-order click. Clock must stop.
    Missed { id: u32 },
}

impl ClickOutcome {
    /// Id of a marker that was just flagged as clicked.
    pub fn marked(self) -> Option<u32> {
        match self {
            ClickOutcome::Advanced { id } | ClickOutcome::Cleared { id } => Some(id),
            _ => None,
        }
    }

    /// Whether this click ended the round.
    pub fn ends_round(self) -> bool {
        matches!(self, ClickOutcome::Cleared { .. } | ClickOutcome::Missed { .. })
    }
}

impl GameState {
    /// Apply a click on marker `id`.
    pub fn click(&mut self, id: u32) -> ClickOutcome {
        if self.phase != Phase::Playing {
            return ClickOutcome::Ignored;
        }
        if id != self.next_expected_id() {
            self.phase = Phase::GameOver;
            log::info!(
                "game over: clicked {} expecting {} at {}",
                id,
                self.next_expected_id(),
                self.clock.display()
            );
            return ClickOutcome::Missed { id };
        }

        if let Some(target) = self.targets.iter_mut().find(|t| t.id == id) {
            target.is_clicked = true;
        }
        self.clicked_count += 1;
        if self.clicked_count == self.target_count {
            self.phase = Phase::Success;
            log::info!("all {} targets cleared in {}", self.target_count, self.clock.display());
            ClickOutcome::Cleared { id }
        } else {
            ClickOutcome::Advanced { id }
        }
    }
}

/// Lenient count parse: leading digits of the trimmed text, optional `+`.
/// Anything unusable (empty, negative, non-numeric, overflow) becomes 0.
pub fn parse_count(raw: &str) -> u32 {
    let s = raw.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..digits_end].parse().unwrap_or(0)
}

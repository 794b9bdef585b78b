// ============================================================================
// Gestion des événements
// ============================================================================
// Lit les événements clavier (crossterm) et les traduit en actions du
// dashboard. Le mapping touche -> action est isolé dans `Action::from_event`
// pour être testable sans terminal.
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (pas d'entrée pendant le délai de poll)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant, au plus `tick_rate`)
    ///
    /// Sur certains OS on reçoit Press ET Release : seul Press est gardé
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                // Release, resize, souris : ignorés
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Ce que l'utilisateur demande au dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    /// Espace : sélectionne / désélectionne la ligne sous le curseur
    ToggleRow,
    /// 'a' : "select all"
    ToggleAll,
    /// 'v' : "View all" / "View less"
    ToggleShowAll,
    /// 'r' : recharge les données depuis la source
    Reload,
    /// Toute autre touche
    Other,
}

impl Action {
    /// Traduit un événement en action (None pour un Tick)
    ///
    /// CONCEPT RUST : Multiple patterns avec |
    /// - KeyCode::Up | KeyCode::Char('k') : flèche ou touche Vim
    pub fn from_event(event: &Event) -> Option<Action> {
        let key = match event {
            Event::Key(key) => key,
            Event::Tick => return None,
        };

        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Action::Down,
            KeyCode::Char(' ') | KeyCode::Enter => Action::ToggleRow,
            KeyCode::Char('a') | KeyCode::Char('A') => Action::ToggleAll,
            KeyCode::Char('v') | KeyCode::Char('V') => Action::ToggleShowAll,
            KeyCode::Char('r') | KeyCode::Char('R') => Action::Reload,
            _ => Action::Other,
        };

        Some(action)
    }
}

// ============================================================================
// Tests
// ============================================================================

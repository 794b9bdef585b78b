// ============================================================================
// Module : ui
// ============================================================================
// Toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod dashboard;      // Layout, header, footer
pub mod events;         // Événements clavier -> actions
pub mod format;         // Roupies, quantités, signes
pub mod gains_cards;    // Cartes Pre / After Harvesting
pub mod holdings_table; // Tableau des holdings

// Re-exports pour simplifier les imports
pub use dashboard::render;
pub use events::{Action, Event, EventHandler};

// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Découpage vertical de l'écran :
//   header   : titre, source des données, date du chargement
//   cartes   : Pre Harvesting | After Harvesting
//   tableau  : holdings
//   footer   : raccourcis clavier / confirmations / erreurs
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones
// 3. Le rendu ne lit que &App et ses view-models, jamais de mutation
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::gains_cards::render_gains_cards;
use crate::ui::holdings_table::render_holdings_table;

/// Hauteur des cartes : bordures + en-tête + 3 lignes + totaux
const CARDS_HEIGHT: u16 = 11;

/// Dessine l'interface complète
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_gains_cards(frame, &app.gains_summary(), app.load_error.as_deref(), chunks[1]);
    render_holdings_table(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);
}

/// Crée le layout principal (header, cartes, tableau, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(CARDS_HEIGHT), // Cartes
            Constraint::Min(0),               // Tableau : tout le reste
            Constraint::Length(3),            // Footer
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Tax Harvesting ")
        .title_alignment(Alignment::Center);

    let line = if app.loading {
        let message = app
            .loading_message
            .clone()
            .unwrap_or_else(|| "Loading...".to_string());
        Line::from(Span::styled(
            format!("⏳ {}", message),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
    } else {
        let loaded = app
            .loaded_at
            .map(|at| at.format("%d %b %Y %H:%M UTC").to_string())
            .unwrap_or_else(|| "never".to_string());

        Line::from(vec![
            Span::styled("Source: ", Style::default().fg(Color::Gray)),
            Span::raw(app.source_label.clone()),
            Span::styled("   Loaded: ", Style::default().fg(Color::Gray)),
            Span::raw(loaded),
        ])
    };

    let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer
// ============================================================================

fn key(label: &'static str, color: Color) -> Span<'static> {
    Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Press ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " again to quit, any other key to cancel ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else if let Some(error) = &app.load_error {
        Line::from(vec![
            Span::styled("✗ Load failed: ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(error.clone(), Style::default().fg(Color::Red)),
            Span::raw("  "),
            key("[r]", Color::Yellow),
            Span::raw(" Retry"),
        ])
    } else {
        let mut spans = vec![
            key("[q]", Color::Yellow),
            Span::raw(" Quit  "),
            key("[↑↓ / j k]", Color::Yellow),
            Span::raw(" Navigate  "),
            key("[Space]", Color::Green),
            Span::raw(" Select  "),
            key("[a]", Color::Green),
            Span::raw(" Select all  "),
            key("[r]", Color::Yellow),
            Span::raw(" Reload"),
        ];

        if app.can_expand() {
            spans.push(Span::raw("  "));
            spans.push(key("[v]", Color::Cyan));
            spans.push(Span::raw(if app.show_all { " View less" } else { " View all" }));
        }

        Line::from(spans)
    };

    let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================
// TestBackend : terminal en mémoire, on inspecte le buffer après un draw
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DashboardData;
    use crate::models::{CapitalGainsSnapshot, GainBucket, Holding};
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(160, 50);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn loaded_app() -> App {
        let data = DashboardData {
            capital_gains: CapitalGainsSnapshot::new(
                GainBucket::new(1000.0, 200.0),
                GainBucket::new(500.0, 100.0),
            ),
            holdings: vec![
                Holding::new("ETH", "Ethereum").with_gains(0.0, -600.0),
                Holding::new("BTC", "Bitcoin").with_gains(120.0, 0.0),
            ],
            loaded_at: Utc::now(),
        };
        App::with_data(data)
    }

    #[test]
    fn test_not_ready_renders_placeholders() {
        let mut app = App::new();
        app.start_loading(Some("Fetching holdings".to_string()));

        let screen = draw(&app);
        assert!(screen.contains("Loading capital gains"));
        assert!(screen.contains("Fetching holdings"));
        assert!(!screen.contains("Realised Capital Gains"));
    }

    #[test]
    fn test_startup_frame_shows_placeholder_rows() {
        // main pose loading avant le premier draw
        let mut app = App::new();
        app.start_loading(Some("Loading sample data...".to_string()));

        let screen = draw(&app);
        assert!(screen.contains("░░░░"));
        assert!(!screen.contains("No holdings"));
        assert!(screen.contains("Loading capital gains"));
    }

    #[test]
    fn test_never_loaded_app_is_not_reported_empty() {
        let screen = draw(&App::new());
        assert!(!screen.contains("No holdings"));
    }

    #[test]
    fn test_failed_first_load_shows_error() {
        let mut app = App::new();
        app.start_loading(None);
        app.load_failed("connection refused".to_string());

        let screen = draw(&app);
        assert!(screen.contains("Capital gains unavailable"));
        assert!(!screen.contains("Loading capital gains"));
        assert!(!screen.contains("No holdings"));
        assert!(screen.contains("connection refused"));
    }

    #[test]
    fn test_empty_holdings_after_load() {
        let data = DashboardData {
            capital_gains: CapitalGainsSnapshot::default(),
            holdings: Vec::new(),
            loaded_at: Utc::now(),
        };
        assert!(draw(&App::with_data(data)).contains("No holdings"));
    }

    #[test]
    fn test_cards_and_savings() {
        let mut app = loaded_app();

        let screen = draw(&app);
        assert!(screen.contains("Pre Harvesting"));
        assert!(screen.contains("Realised Capital Gains"));
        assert!(!screen.contains("save upto"));

        app.toggle_holding("ETH");
        let screen = draw(&app);
        assert!(screen.contains("save upto"));
        assert!(screen.contains("Amount to Sell"));
    }

    #[test]
    fn test_quit_confirmation_footer() {
        let mut app = loaded_app();
        app.request_quit();
        assert!(draw(&app).contains("again to quit"));
    }
}

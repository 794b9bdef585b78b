// ============================================================================
// Cartes "Pre Harvesting" / "After Harvesting"
// ============================================================================
// Deux cartes côte à côte, alimentées par le view-model GainsSummary.
// Tant que le résumé est NotReady, on dessine des placeholders
// (jamais de zéros trompeurs), ou l'erreur si le chargement a échoué.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::harvest::{GainsSummary, SnapshotFigures, SummaryState};
use crate::ui::format::{format_currency, format_loss, signed_magnitude};

/// Les cartes affichent des roupies entières
const CARD_DECIMALS: usize = 0;

/// Dessine les deux cartes dans `area`
///
/// `load_error` n'est affiché que si aucun snapshot n'est disponible
pub fn render_gains_cards(frame: &mut Frame, state: &SummaryState, load_error: Option<&str>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    match state {
        SummaryState::NotReady => {
            render_placeholder(frame, " Pre Harvesting ", Color::DarkGray, load_error, chunks[0]);
            render_placeholder(frame, " After Harvesting ", Color::Blue, load_error, chunks[1]);
        }
        SummaryState::Ready(summary) => {
            render_pre_harvesting(frame, summary, chunks[0]);
            render_after_harvesting(frame, summary, chunks[1]);
        }
    }
}

fn card_block(title: &'static str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
}

/// Tableau Profits / Losses / Net, une colonne par bucket
///
/// `net` décide comment afficher les nets : signés pour la carte "avant",
/// magnitude + marqueur "-" pour la carte "après"
fn figures_table(figures: &SnapshotFigures, net: fn(f64, usize) -> String) -> Table<'static> {
    let snapshot = &figures.snapshot;
    let label = Style::default().fg(Color::Gray);

    let rows = vec![
        Row::new(vec![
            Span::styled("Profits", label),
            Span::raw(format_currency(snapshot.stcg.profits, CARD_DECIMALS)),
            Span::raw(format_currency(snapshot.ltcg.profits, CARD_DECIMALS)),
        ]),
        Row::new(vec![
            Span::styled("Losses", label),
            Span::raw(format_loss(snapshot.stcg.losses, CARD_DECIMALS)),
            Span::raw(format_loss(snapshot.ltcg.losses, CARD_DECIMALS)),
        ]),
        Row::new(vec![
            Span::styled("Net Capital Gains", label),
            Span::raw(net(figures.net_stcg, CARD_DECIMALS)),
            Span::raw(net(figures.net_ltcg, CARD_DECIMALS)),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    ];

    let widths = [
        Constraint::Length(18),
        Constraint::Percentage(40),
        Constraint::Percentage(40),
    ];

    Table::new(rows, widths).header(
        Row::new(vec!["", "Short-term", "Long-term"])
            .style(Style::default().fg(Color::Gray))
            .bottom_margin(1),
    )
}

/// Découpe une carte : tableau en haut, totaux en bas
fn card_layout(inner: Rect, footer_lines: u16) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(footer_lines)])
        .split(inner)
}

fn render_pre_harvesting(frame: &mut Frame, summary: &GainsSummary, area: Rect) {
    let block = card_block(" Pre Harvesting ", Color::Gray);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = card_layout(inner, 1);
    frame.render_widget(figures_table(&summary.original, format_currency), chunks[0]);

    let total = Line::from(vec![
        Span::styled("Realised Capital Gains: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format_currency(summary.original.realised_gains, CARD_DECIMALS),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(total), chunks[1]);
}

fn render_after_harvesting(frame: &mut Frame, summary: &GainsSummary, area: Rect) {
    let block = card_block(" After Harvesting ", Color::Blue);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = card_layout(inner, 2);
    frame.render_widget(figures_table(&summary.current, signed_magnitude), chunks[0]);

    let mut lines = vec![Line::from(vec![
        Span::styled("Effective Capital Gains: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            signed_magnitude(summary.current.realised_gains, CARD_DECIMALS),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ])];

    if summary.show_savings() {
        lines.push(Line::from(Span::styled(
            format!(
                "🎉 You are going to save upto {}",
                format_currency(summary.savings, CARD_DECIMALS)
            ),
            Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines), chunks[1]);
}

fn render_placeholder(
    frame: &mut Frame,
    title: &'static str,
    color: Color,
    load_error: Option<&str>,
    area: Rect,
) {
    let message = match load_error {
        Some(_) => Span::styled(
            "Capital gains unavailable",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(
            "Loading capital gains…",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ),
    };
    let text = vec![Line::from(""), Line::from(message)];

    let paragraph = Paragraph::new(text)
        .block(card_block(title, color))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

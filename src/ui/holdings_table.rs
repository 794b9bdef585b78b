// ============================================================================
// Tableau des holdings
// ============================================================================
// Colonnes : Asset | Holdings | Total Current Value | Short-term |
//            Long-Term | Amount to Sell
//
// La case "select all" de l'en-tête a trois rendus ([x], [-], [ ]) mais
// seulement deux états logiques : [-] vient de some_selected.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, HOLDINGS_PREVIEW_ROWS};
use crate::harvest::SelectionView;
use crate::models::Holding;
use crate::ui::format::{format_currency, format_gain, format_number, is_displayed_gain};

/// Le tableau affiche les montants au centime
const TABLE_DECIMALS: usize = 2;

/// Rendu de la case "select all"
pub fn select_all_mark(view: &SelectionView) -> &'static str {
    if view.all_selected {
        "[x]"
    } else if view.some_selected {
        "[-]"
    } else {
        "[ ]"
    }
}

fn row_mark(selected: bool) -> &'static str {
    if selected {
        "[x]"
    } else {
        "[ ]"
    }
}

fn gain_style(gain: f64) -> Style {
    if is_displayed_gain(gain, TABLE_DECIMALS) {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}

/// Cellule gain + balance sur deux lignes
fn gain_cell(gain: f64, balance: f64, coin: &str) -> Cell<'static> {
    Cell::from(Text::from(vec![
        Line::from(Span::styled(format_gain(gain, TABLE_DECIMALS), gain_style(gain))),
        Line::from(Span::styled(
            format!("{} {}", format_number(balance), coin),
            Style::default().fg(Color::DarkGray),
        )),
    ]))
}

fn holding_row(holding: &Holding, selected: bool) -> Row<'static> {
    let asset = Cell::from(Text::from(vec![
        Line::from(vec![
            Span::raw(format!("{} ", row_mark(selected))),
            Span::styled(holding.coin.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(
            format!("    {}", holding.short_name(24)),
            Style::default().fg(Color::DarkGray),
        )),
    ]));

    let position = Cell::from(Text::from(vec![
        Line::from(format!("{} {}", format_number(holding.total_holding), holding.coin)),
        Line::from(Span::styled(
            format!(
                "{}/{}",
                format_currency(holding.average_buy_price, TABLE_DECIMALS),
                holding.coin
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ]));

    let value = Cell::from(format_currency(holding.total_value(), TABLE_DECIMALS));

    let amount_to_sell = if selected {
        Cell::from(Span::styled(
            format!("{} {}", format_number(holding.total_holding), holding.coin),
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
        ))
    } else {
        Cell::from(Span::styled("-", Style::default().fg(Color::DarkGray)))
    };

    let row = Row::new(vec![
        asset,
        position,
        value,
        gain_cell(holding.stcg.gain, holding.stcg.balance, &holding.coin),
        gain_cell(holding.ltcg.gain, holding.ltcg.balance, &holding.coin),
        amount_to_sell,
    ])
    .height(2)
    .bottom_margin(1);

    if selected {
        row.style(Style::default().bg(Color::Indexed(17)))
    } else {
        row
    }
}

fn table_title(app: &App, view: &SelectionView) -> String {
    if view.selected_count == 0 {
        " Holdings ".to_string()
    } else {
        format!(" Holdings ({} of {} selected) ", view.selected_count, app.holdings.len())
    }
}

/// Dessine le tableau, ou des lignes placeholder pendant le chargement
pub fn render_holdings_table(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.selection_view();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(table_title(app, &view));

    if app.loading {
        render_placeholder_rows(frame, block, area);
        return;
    }

    // Jamais chargé (échec du premier chargement) : pas de faux "No holdings"
    if app.original_capital_gains.is_none() {
        let message = if app.load_error.is_some() {
            Span::styled("Holdings unavailable", Style::default().fg(Color::Red))
        } else {
            Span::styled("Waiting for data", Style::default().fg(Color::Gray))
        };
        let paragraph = Paragraph::new(vec![Line::from(""), Line::from(message)])
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    if app.holdings.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No holdings", Style::default().fg(Color::Gray))),
        ])
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        format!("{} Asset", select_all_mark(&view)),
        "Holdings".to_string(),
        "Total Current Value".to_string(),
        "Short-term".to_string(),
        "Long-Term".to_string(),
        "Amount to Sell".to_string(),
    ])
    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let rows: Vec<Row> = app
        .displayed_holdings()
        .iter()
        .enumerate()
        .map(|(index, holding)| holding_row(holding, view.is_selected(index)))
        .collect();

    let widths = [
        Constraint::Percentage(22),
        Constraint::Percentage(18),
        Constraint::Percentage(16),
        Constraint::Percentage(15),
        Constraint::Percentage(15),
        Constraint::Percentage(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    // CONCEPT RATATUI : StatefulWidget
    // - TableState porte la ligne surlignée (le curseur)
    // - Ratatui fait défiler automatiquement pour la garder visible
    let mut state = TableState::default().with_selected(Some(app.cursor));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_placeholder_rows(frame: &mut Frame, block: Block, area: Rect) {
    let bar = Line::from(Span::styled(
        "░".repeat(area.width.saturating_sub(4) as usize),
        Style::default().fg(Color::DarkGray),
    ));

    let mut lines = Vec::with_capacity(HOLDINGS_PREVIEW_ROWS * 2);
    for _ in 0..HOLDINGS_PREVIEW_ROWS {
        lines.push(bar.clone());
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

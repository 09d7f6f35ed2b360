use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input
            Constraint::Min(5),    // Ranked rows
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_query_input(f, app, chunks[0]);
    draw_results_list(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
}

fn draw_query_input(f: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(app.query.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filter (a|b: per column, /CODE: fast select, Esc: quit) "),
        );

    f.render_widget(input, area);

    let cursor_x = area.x + app.query.chars().count() as u16 + 1;
    f.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
}

fn draw_results_list(f: &mut Frame, app: &App, area: Rect) {
    let list = &app.list;
    let codec = list.codec();
    let armed = list.is_armed();
    let code_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Rgb(242, 215, 135))
        .add_modifier(Modifier::BOLD);

    let items: Vec<ListItem> = list
        .items()
        .iter()
        .enumerate()
        .map(|(index, ranked)| {
            let mut spans = Vec::new();

            if armed {
                let code = codec.encode(index + 1).unwrap_or_default();
                spans.push(Span::styled(format!(" {} ", code), code_style));
                spans.push(Span::raw(" "));
            }

            for (n, column) in list.columns().iter().enumerate() {
                if n > 0 {
                    spans.push(Span::raw("  "));
                }
                let text = column.display_text(ranked.item(), index);
                let matches = ranked
                    .column_score(column.index())
                    .filter(|_| column.is_searchable())
                    .map(|score| score.matches.as_slice())
                    .unwrap_or(&[]);
                let base = if column.is_searchable() {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                spans.extend(highlight_matches(&text, matches, base));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Results ({}) ", list.len())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default().with_selected(list.cursor());
    f.render_stateful_widget(widget, area, &mut state);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(app.status_message.as_str())
        .style(Style::default().fg(Color::Cyan));

    f.render_widget(status, area);
}

/// Split `text` into spans, styling the chars at `matches` (sorted char offsets)
fn highlight_matches(text: &str, matches: &[usize], base: Style) -> Vec<Span<'static>> {
    let match_style = Style::default()
        .fg(Color::Rgb(150, 190, 255))
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_is_match = false;
    let mut pending = matches.iter().peekable();

    for (i, ch) in text.chars().enumerate() {
        let is_match = pending.next_if_eq(&&i).is_some();
        if is_match != run_is_match && !run.is_empty() {
            let style = if run_is_match { match_style } else { base };
            spans.push(Span::styled(std::mem::take(&mut run), style));
        }
        run_is_match = is_match;
        run.push(ch);
    }

    if !run.is_empty() {
        let style = if run_is_match { match_style } else { base };
        spans.push(Span::styled(run, style));
    }

    spans
}

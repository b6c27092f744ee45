//! Declarative rendering of the session state. Nothing in here mutates
//! state; the fallback poster URL is applied at this boundary only.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::Movie;
use crate::ui::app::{App, Focus};

const SUGGESTION_LIMIT: usize = 4;

pub fn draw(frame: &mut Frame, app: &App) {
    let [search_area, status_area, recents_area, main_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_search(frame, app, search_area);
    draw_status(frame, app, status_area);
    draw_recents(frame, app, recents_area);

    if app.session.show_gallery() {
        draw_gallery(frame, app, main_area);
    } else {
        draw_results(frame, app, main_area);
    }

    draw_footer(frame, footer_area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.session.loading {
        "Search movies (fetching...)"
    } else {
        "Search movies"
    };

    let input = Paragraph::new(app.session.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(focus_style(app.focus == Focus::Search)),
    );
    frame.render_widget(input, area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = &app.session.error {
        Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if app.session.loading {
        Line::from(Span::styled(
            "Fetching recommendations...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let suggestions = app.session.suggestions(SUGGESTION_LIMIT);
        if suggestions.is_empty() {
            Line::default()
        } else {
            let mut spans = vec![Span::styled("Suggestions: ", Style::default().fg(Color::DarkGray))];
            for (i, suggestion) in suggestions.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
                }
                spans.push(Span::raw(*suggestion));
            }
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn draw_recents(frame: &mut Frame, app: &App, area: Rect) {
    if app.session.recent.is_empty() {
        let line = Line::from(Span::styled(
            "No recent searches",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let mut spans = vec![Span::styled(
        "Recent: ",
        Style::default().fg(Color::DarkGray),
    )];
    for (i, query) in app.session.recent.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if app.focus == Focus::Recents && i == app.recent_selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(format!("[{}]", query), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_gallery(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .session
        .gallery
        .iter()
        .map(|movie| ListItem::new(gallery_line(movie)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Popular Movies")
                .border_style(focus_style(app.focus == Focus::Gallery)),
        )
        .highlight_symbol("» ")
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    if app.focus == Focus::Gallery && !app.session.gallery.is_empty() {
        state.select(Some(app.gallery_selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn gallery_line(movie: &Movie) -> Line<'_> {
    Line::from(vec![
        Span::raw(movie.title.as_str()),
        Span::styled(
            format!("  {}", movie.poster_or_placeholder()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn draw_results(frame: &mut Frame, app: &App, area: Rect) {
    let [selected_area, recommendations_area] =
        Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(area);

    if let Some(selected) = &app.session.selected {
        let mut lines = vec![Line::from(Span::styled(
            selected.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if let Some(overview) = &selected.overview {
            lines.push(Line::from(overview.as_str()));
        }
        lines.push(Line::from(Span::styled(
            selected.poster_or_placeholder(),
            Style::default().fg(Color::DarkGray),
        )));

        let card = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("You Selected"));
        frame.render_widget(card, selected_area);
    }

    let items: Vec<ListItem> = app
        .session
        .recommendations
        .iter()
        .enumerate()
        .map(|(i, movie)| ListItem::new(recommendation_line(i, movie)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Recommended Movies"),
    );
    frame.render_widget(list, recommendations_area);
}

fn recommendation_line(index: usize, movie: &Movie) -> Line<'_> {
    let mut spans = vec![Span::raw(format!("{:>2}. {}", index + 1, movie.title))];
    if let Some(score) = movie.similarity_score {
        spans.push(Span::styled(
            format!("  {:.0}% match", score * 100.0),
            Style::default().fg(Color::Green),
        ));
    }
    spans.push(Span::styled(
        format!("  {}", movie.poster_or_placeholder()),
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let hints = Line::from(Span::styled(
        "Enter submit · Tab focus · → complete · Esc quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(hints), area);
}

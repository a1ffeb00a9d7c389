use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::tui::app::{ActivePane, InputMode, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    if app.maximized {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(1)])
            .split(frame.area());

        render_preview_pane(frame, app, chunks[0], colors);
        render_status_bar(frame, app, chunks[1], colors);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    render_categories_pane(frame, app, lists[0], colors);
    render_items_pane(frame, app, lists[1], colors);
    render_preview_pane(frame, app, rows[1], colors);
    render_status_bar(frame, app, rows[2], colors);
}

fn pane_block(title: String, is_active: bool, colors: &ColorConfig) -> Block<'static> {
    let border = if is_active {
        colors.active_border
    } else {
        colors.inactive_border
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn highlight_style(is_active: bool, colors: &ColorConfig) -> Style {
    if is_active {
        Style::default()
            .bg(colors.selection_bg_active)
            .fg(colors.selection_fg_active)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(colors.selection_bg_inactive)
            .fg(colors.selection_fg_inactive)
    }
}

fn render_categories_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Categories;
    let labels = app.category_labels();
    let current = app.category_filter().label().to_string();

    let items: Vec<ListItem> = labels
        .iter()
        .map(|label| {
            let style = if *label == current {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(label.clone()).style(style)
        })
        .collect();

    let title = format!(" {} categories ({}) ", app.tab.title(), labels.len() - 1);
    let list = List::new(items)
        .block(pane_block(title, is_active, colors))
        .highlight_style(highlight_style(is_active, colors))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.category_list_state);
}

fn render_items_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Items;
    let rows = app.item_rows();

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let color = if row.is_static {
                colors.static_item
            } else {
                colors.stored_item
            };
            ListItem::new(Line::from(vec![
                Span::styled(row.title.clone(), Style::default().fg(color)),
                Span::styled(
                    format!("  {}", row.category),
                    Style::default().fg(colors.metadata_category),
                ),
            ]))
        })
        .collect();

    let loading = if app.is_loading() { " loading..." } else { "" };
    let title = format!(
        " {} ({}) [{}/{}]{} ",
        app.tab.title(),
        rows.len(),
        (app.item_index + 1).min(rows.len()),
        rows.len(),
        loading
    );

    let list = List::new(items)
        .block(pane_block(title, is_active, colors))
        .highlight_style(highlight_style(is_active, colors))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.item_list_state);
}

fn render_preview_pane(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Preview;

    let (title, content) = match app.selected_preview() {
        Some(preview) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    preview.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    preview.category.clone(),
                    Style::default().fg(colors.metadata_category),
                )),
            ];
            if let Some(narrator) = &preview.narrator {
                lines.push(Line::from(Span::styled(
                    narrator.clone(),
                    Style::default().fg(colors.metadata_narrator),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(
                "─".repeat(area.width.saturating_sub(2) as usize),
            ));
            lines.push(Line::from(""));

            for text in preview.arabic.lines() {
                lines.push(Line::from(Span::styled(
                    text.to_string(),
                    Style::default().fg(colors.arabic_text),
                )));
            }
            lines.push(Line::from(""));
            for text in preview.latin.lines() {
                lines.push(Line::from(Span::styled(
                    text.to_string(),
                    Style::default()
                        .fg(colors.transliteration)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            lines.push(Line::from(""));
            lines.extend(preview.translation.lines().map(|t| Line::from(t.to_string())));

            if let Some(explanation) = &preview.explanation {
                lines.push(Line::from(""));
                lines.extend(explanation.lines().map(|t| Line::from(t.to_string())));
            }

            (format!(" {} ", preview.title), Text::from(lines))
        }
        None => (" Preview ".to_string(), Text::from("Nothing selected")),
    };

    let paragraph = Paragraph::new(content)
        .block(pane_block(title, is_active, colors))
        .wrap(Wrap { trim: false })
        .scroll((app.preview_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let base = Style::default().fg(colors.status_fg).bg(colors.status_bg);

    if app.mode == InputMode::Search {
        let line = Line::from(vec![
            Span::styled("/", base.fg(colors.search_prompt)),
            Span::styled(app.query().to_string(), base),
            Span::styled("  (Enter/Esc to finish)", base),
        ]);
        frame.render_widget(Paragraph::new(line).style(base), area);
        return;
    }

    let status = if let Some(pending) = &app.pending_delete {
        format!("Delete \"{}\"? (y/n)", pending.title)
    } else if let Some(msg) = &app.status_message {
        msg.clone()
    } else if app.maximized {
        "j/k:Scroll  n/p:Page  m:Exit maximize  q:Quit".to_string()
    } else {
        let mut hints = String::from(
            "j/k:Nav  Tab:Pane  Enter:Filter  /:Search  x:Clear  c:Doa/Hadith  R:Reload  m:Max  q:Quit",
        );
        if app.session.is_some() {
            hints.push_str("  d:Delete");
        }
        if !app.query().is_empty() {
            hints = format!("[/{}]  {}", app.query(), hints);
        }
        hints
    };

    frame.render_widget(Paragraph::new(status).style(base), area);
}

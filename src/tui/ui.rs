use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs};

use crate::dataset::Stat;
use crate::output::format_ratio;
use crate::scoring::MatchScore;
use crate::tui::app::{App, InputMode, View};
use crate::tui::theme;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Controls(2) + Tabs(1) + Table(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(2), // Threshold controls
        Constraint::Length(1), // Tab bar
        Constraint::Fill(1),   // Result table
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_controls(frame, chunks[1], app);
    render_tabs(frame, chunks[2], app);
    render_table(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);

    // Render overlays based on input mode
    match app.input_mode {
        InputMode::NameInput => render_name_popup(frame, app),
        InputMode::Help => render_help_popup(frame),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    // Build title with the store size on the right
    let mut spans = vec![Span::styled(
        "Statdex",
        Style::default().fg(theme::TITLE_COLOR).bold(),
    )];

    let store_text = format!("{} Pokemon loaded", app.record_count());
    let left_len = "Statdex".len();
    let right_len = store_text.len();
    let padding_len = (area.width as usize).saturating_sub(left_len + right_len);

    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(store_text, Style::default().fg(theme::MUTED)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    // Row 1: the six threshold controls, selected stat highlighted
    let mut spans = Vec::new();
    for (idx, stat) in Stat::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let label = format!("{} >= {}", stat, app.criteria.thresholds.get(*stat));
        if idx == app.selected_stat {
            spans.push(Span::styled(label, theme::STAT_SELECTED));
        } else {
            spans.push(Span::raw(label));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

    // Row 2: soft filters and the pool they leave behind
    let legendary = if app.criteria.legendary_only {
        Span::styled("on", Style::default().fg(theme::LEGENDARY_COLOR).bold())
    } else {
        Span::styled("off", Style::default().fg(theme::MUTED))
    };
    let name = if app.criteria.name_query.trim().is_empty() {
        Span::styled("-", Style::default().fg(theme::MUTED))
    } else {
        Span::styled(
            format!("'{}'", app.criteria.name_query),
            Style::default().fg(theme::TITLE_COLOR),
        )
    };
    let line = Line::from(vec![
        Span::styled("Legendary only: ", Style::default().fg(theme::MUTED)),
        legendary,
        Span::raw("   "),
        Span::styled("Name: ", Style::default().fg(theme::MUTED)),
        name,
        Span::raw("   "),
        Span::styled("Pool: ", Style::default().fg(theme::MUTED)),
        Span::raw(format!("{}/{}", app.pool_size, app.record_count())),
    ]);
    frame.render_widget(Paragraph::new(line), rows[1]);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles = vec![
        format!("Matches ({})", app.matched.len()),
        format!("Top {}", app.top_count),
    ];
    let selected = match app.current_view {
        View::Matches => 0,
        View::Top => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme::MUTED))
        .highlight_style(Style::default().fg(theme::TITLE_COLOR).bold().reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    match app.current_view {
        View::Matches => render_matched_table(frame, area, app),
        View::Top => render_top_table(frame, area, app),
    }
}

fn render_matched_table(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.matched.is_empty() {
        let empty_msg = Paragraph::new("No Pokemon matches every minimum")
            .alignment(Alignment::Center)
            .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    let rows: Vec<Row> = app
        .matched
        .iter()
        .enumerate()
        .map(|(idx, pokemon)| {
            let index = format!("{}.", idx + 1);
            let legendary = legendary_cell(pokemon.legendary);

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme::ROW_ALT_BG)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(index).style(Style::default().fg(theme::INDEX_COLOR)),
                Cell::from(pokemon.name_kor.clone()),
                Cell::from(pokemon.name.clone()),
                Cell::from(pokemon.type_label()),
                Cell::from(format!("{:>3}", pokemon.hp)),
                Cell::from(format!("{:>3}", pokemon.attack)),
                Cell::from(format!("{:>3}", pokemon.defense)),
                Cell::from(format!("{:>3}", pokemon.sp_atk)),
                Cell::from(format!("{:>3}", pokemon.sp_def)),
                Cell::from(format!("{:>3}", pokemon.speed)),
                Cell::from(format!("{:>5}", pokemon.total)).style(theme::HEADER_STYLE),
                legendary,
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // Index: "99."
        Constraint::Length(12), // Korean name
        Constraint::Fill(1),    // English name
        Constraint::Length(14), // Type: "Grass/Poison"
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(5), // Total
        Constraint::Length(3), // Legendary marker
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                "#", "Korean", "Name", "Type", "HP", "Atk", "Def", "SpA", "SpD", "Spe", "Total",
                "Leg",
            ])
            .style(theme::HEADER_STYLE)
            .bottom_margin(1),
        )
        .row_highlight_style(theme::ROW_SELECTED);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_top_table(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.top.is_empty() {
        let empty_msg = Paragraph::new("Nothing to rank")
            .alignment(Alignment::Center)
            .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    let rows: Vec<Row> = app
        .top
        .iter()
        .enumerate()
        .map(|(idx, (pokemon, score))| {
            let index = format!("{}.", idx + 1);
            let legendary = legendary_cell(pokemon.legendary);

            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme::ROW_ALT_BG)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(index).style(Style::default().fg(theme::INDEX_COLOR)),
                Cell::from(pokemon.name_kor.clone()),
                Cell::from(pokemon.name.clone()),
                Cell::from(match_cell(score)),
                Cell::from(format!("{:>3}", pokemon.hp)),
                Cell::from(format!("{:>3}", pokemon.attack)),
                Cell::from(format!("{:>3}", pokemon.defense)),
                Cell::from(format!("{:>3}", pokemon.sp_atk)),
                Cell::from(format!("{:>3}", pokemon.sp_def)),
                Cell::from(format!("{:>3}", pokemon.speed)),
                legendary,
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // Index
        Constraint::Length(12), // Korean name
        Constraint::Fill(1),    // English name
        Constraint::Length(12), // Match: "100% ██████"
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3), // Legendary marker
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                "#", "Korean", "Name", "Match", "HP", "Atk", "Def", "SpA", "SpD", "Spe", "Leg",
            ])
            .style(theme::HEADER_STYLE)
            .bottom_margin(1),
        )
        .row_highlight_style(theme::ROW_SELECTED);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

// Percentage plus a six-segment bar, one segment per satisfied threshold.
fn match_cell(score: &MatchScore) -> Line<'static> {
    let color = theme::ratio_color(score.satisfied);
    let filled = usize::from(score.satisfied);
    let empty = Stat::ALL.len().saturating_sub(filled);

    let mut spans = vec![Span::styled(
        format!("{:>4} ", format_ratio(score.ratio)),
        Style::default().fg(color),
    )];
    if filled > 0 {
        spans.push(Span::styled(
            "█".repeat(filled),
            Style::default().fg(color),
        ));
    }
    if empty > 0 {
        spans.push(Span::styled(
            "░".repeat(empty),
            Style::default().fg(theme::BAR_EMPTY),
        ));
    }

    Line::from(spans)
}

fn legendary_cell(legendary: bool) -> Cell<'static> {
    if legendary {
        Cell::from("★").style(Style::default().fg(theme::LEGENDARY_COLOR))
    } else {
        Cell::from("")
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        // Show flash message with color based on message type
        let msg_color = if msg.starts_with("Criteria error") {
            theme::FLASH_ERROR
        } else {
            theme::FLASH_SUCCESS
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        // Build hints with colored shortcut keys
        let hints = [
            ("h", "/", "l", ":stat "),
            ("+", "/", "-", ":adjust "),
            ("g", "", "", ":legendary "),
            ("/", "", "", ":name "),
            ("Tab", "", "", ":view "),
            ("j", "/", "k", ":nav "),
            ("r", "", "", ":reset "),
            ("?", "", "", ":help "),
            ("q", "", "", ":quit"),
        ];

        let mut spans = vec![
            Span::styled(
                format!("{} full", app.matched.len()),
                Style::default().fg(theme::MUTED),
            ),
            Span::raw(" "),
            Span::styled(
                format!("pool {}", app.pool_size),
                Style::default().fg(theme::MUTED),
            ),
            Span::raw("  "),
        ];
        for (i, (key1, sep, key2, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key1,
                Style::default().fg(theme::STATUS_KEY_COLOR),
            ));
            if !sep.is_empty() {
                spans.push(Span::raw(*sep));
                spans.push(Span::styled(
                    *key2,
                    Style::default().fg(theme::STATUS_KEY_COLOR),
                ));
            }
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme::STATUS_BAR_BG)),
        area,
    );
}

/// Small centered popup with the name query being typed.
fn render_name_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(44, 5, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().title("Name Search");
    frame.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Input line
        Constraint::Length(1), // Help text
    ])
    .split(inner);

    // Render input with cursor
    let input_text = format!("{}|", app.name_input);
    frame.render_widget(Paragraph::new(input_text), chunks[0]);

    let help = Paragraph::new("Enter: apply | Esc: cancel | empty = clear")
        .style(Style::default().fg(theme::MUTED));
    frame.render_widget(help, chunks[1]);
}

/// Centered rectangle of a fixed size, shrunk to fit small terminals.
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame) {
    let popup_area = centered_rect_fixed(52, 18, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().title(" Keyboard Shortcuts ");
    frame.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(Color::Cyan).bold();
    let help_lines = vec![
        Line::from(vec![
            Span::styled("j / Down      ", key_style),
            Span::raw("Move down"),
        ]),
        Line::from(vec![
            Span::styled("k / Up        ", key_style),
            Span::raw("Move up"),
        ]),
        Line::from(vec![
            Span::styled("h / Left      ", key_style),
            Span::raw("Select previous stat"),
        ]),
        Line::from(vec![
            Span::styled("l / Right     ", key_style),
            Span::raw("Select next stat"),
        ]),
        Line::from(vec![
            Span::styled("1-6           ", key_style),
            Span::raw("Jump to stat"),
        ]),
        Line::from(vec![
            Span::styled("+ / =         ", key_style),
            Span::raw("Raise minimum by 5"),
        ]),
        Line::from(vec![
            Span::styled("- / _         ", key_style),
            Span::raw("Lower minimum by 5"),
        ]),
        Line::from(vec![
            Span::styled("PgUp / PgDn   ", key_style),
            Span::raw("Adjust minimum by 25"),
        ]),
        Line::from(vec![
            Span::styled("g             ", key_style),
            Span::raw("Toggle legendary-only filter"),
        ]),
        Line::from(vec![
            Span::styled("/             ", key_style),
            Span::raw("Search by name (English or Korean)"),
        ]),
        Line::from(vec![
            Span::styled("Tab           ", key_style),
            Span::raw("Toggle Matches/Top view"),
        ]),
        Line::from(vec![
            Span::styled("r             ", key_style),
            Span::raw("Reset all filters"),
        ]),
        Line::from(vec![
            Span::styled("?             ", key_style),
            Span::raw("Show/hide this help"),
        ]),
        Line::from(vec![
            Span::styled("q / Ctrl-c    ", key_style),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(theme::MUTED),
        )),
    ];

    frame.render_widget(Paragraph::new(help_lines), inner);
}

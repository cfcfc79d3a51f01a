use crate::tui::app::App;
use crate::tui::colors;
use crate::tui::form::FormField;
use crate::{format_price, format_rating};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use unicode_width::UnicodeWidthStr;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(3), // Search form
            Constraint::Min(5),    // Results
            Constraint::Length(6), // Detail panel
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(frame, chunks[0]);
    draw_form(frame, app, chunks[1]);
    draw_results(frame, app, chunks[2]);
    draw_detail(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);

    // Show cursor in the query input when focused
    if app.form.focused && app.form.field == FormField::Query {
        let form_chunks = form_layout(chunks[1]);
        // Border (1) + space + magnifier glyph + space (approx 4 display cols)
        let typed_width = app.form.query[..app.form.cursor_pos].width() as u16;
        let cursor_x = form_chunks[0].x + 1 + 4 + typed_width;
        let cursor_y = form_chunks[0].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn form_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),    // Query
            Constraint::Length(16), // Max results
            Constraint::Length(14), // Endpoint
        ])
        .split(area)
}

fn draw_title_bar(frame: &mut Frame, area: Rect) {
    let label = format!(" PriceScout v{} ", crate::VERSION);
    let mut spans = vec![Span::styled(
        label.clone(),
        Style::default()
            .fg(Color::White)
            .bg(Color::Rgb(40, 40, 50))
            .add_modifier(Modifier::BOLD),
    )];

    let remaining = (area.width as usize).saturating_sub(label.chars().count());
    if remaining > 0 {
        spans.push(Span::styled(
            " ".repeat(remaining),
            Style::default().bg(Color::Rgb(40, 40, 50)),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn field_border(app: &App, field: FormField) -> Style {
    if app.form.focused && app.form.field == field {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = form_layout(area);

    let query_block = Block::default()
        .borders(Borders::ALL)
        .border_style(field_border(app, FormField::Query))
        .title(" Search ");
    let query_text = format!(" \u{1F50D} {}", app.form.query);
    frame.render_widget(
        Paragraph::new(query_text)
            .block(query_block)
            .style(Style::default().fg(Color::White)),
        chunks[0],
    );

    let max_block = Block::default()
        .borders(Borders::ALL)
        .border_style(field_border(app, FormField::MaxResults))
        .title(" Max results ");
    frame.render_widget(
        Paragraph::new(format!(" {}", app.form.max_results))
            .block(max_block)
            .style(Style::default().fg(Color::White)),
        chunks[1],
    );

    let (mode_text, mode_color) = if app.form.use_mock {
        (" mock ", Color::Magenta)
    } else {
        (" live ", Color::Green)
    };
    let mode_block = Block::default()
        .borders(Borders::ALL)
        .border_style(field_border(app, FormField::Mock))
        .title(" Endpoint ");
    frame.render_widget(
        Paragraph::new(mode_text)
            .block(mode_block)
            .style(Style::default().fg(mode_color).add_modifier(Modifier::BOLD)),
        chunks[2],
    );
}

fn draw_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut table_area = area;

    // Error banner replaces any result content (they are mutually exclusive)
    if let Some(error) = &app.error {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let banner = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            );
        frame.render_widget(banner, split[0]);
        table_area = split[1];
    }

    if app.products.is_empty() {
        if table_area.height == 0 {
            return;
        }
        let hint = if app.is_loading {
            "\u{23F3} Searching...".to_string()
        } else if app.error.is_some() {
            String::new()
        } else if let Some(query) = &app.last_query {
            format!("No products found for '{}'.", query)
        } else {
            "Enter a query and press Enter to search.".to_string()
        };

        let vertical_pad = table_area.height / 3;
        let hint_area = Rect::new(
            table_area.x,
            table_area.y + vertical_pad,
            table_area.width,
            table_area.height.saturating_sub(vertical_pad).max(1),
        );
        frame.render_widget(
            Paragraph::new(hint)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            hint_area,
        );
        return;
    }

    // One row per product, header excluded from the scroll window
    let table_inner_height = table_area.height.saturating_sub(1) as usize;
    app.results.visible_rows = table_inner_height;

    let header = Row::new(
        ["", "Title", "Price", "Rating", "Source"].map(|name| {
            Cell::from(name).style(
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Rgb(0, 95, 135))
                    .add_modifier(Modifier::BOLD),
            )
        }),
    )
    .height(1);

    let start = app.results.scroll_offset;
    let end = (start + table_inner_height).min(app.products.len());

    let rows: Vec<Row> = (start..end)
        .enumerate()
        .map(|(visual_idx, logical_idx)| {
            let product = &app.products[logical_idx];
            let is_selected = app.results.selected == Some(logical_idx);

            let bg = if is_selected {
                Color::Rgb(60, 60, 80)
            } else if visual_idx % 2 == 1 {
                Color::Rgb(25, 25, 35)
            } else {
                Color::Reset
            };
            let fg_modifier = if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            };

            let icon = colors::icon_for_product(product.image.is_some());

            let mut title_spans = vec![Span::styled(
                product.title.clone(),
                Style::default().fg(Color::White).add_modifier(fg_modifier),
            )];
            if product.is_recommended {
                title_spans.push(Span::styled(
                    format!(" {}", colors::RECOMMENDED_MARKER),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ));
            }

            let rating_style = match product.rating {
                Some(r) => Style::default().fg(colors::rating_color(r)),
                None => Style::default().fg(Color::DarkGray),
            };
            let source = product.source.clone().unwrap_or_else(|| "\u{2014}".to_string());
            let source_style = Style::default().fg(colors::source_color(&source));

            Row::new(vec![
                Cell::from(icon).style(Style::default().bg(bg)),
                Cell::from(Line::from(title_spans)).style(Style::default().bg(bg)),
                Cell::from(format_price(product.price, product.price_raw.as_deref()))
                    .style(Style::default().fg(Color::Green).bg(bg)),
                Cell::from(format_rating(product.rating)).style(rating_style.bg(bg)),
                Cell::from(source).style(source_style.bg(bg)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(22),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::NONE));

    frame.render_widget(table, table_area);
}

fn draw_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Details ");

    let lines = match app.selected_product() {
        Some(product) => {
            let mut title_spans = vec![Span::styled(
                product.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )];
            if product.is_recommended {
                title_spans.push(Span::styled(
                    format!(" {} Recommended", colors::RECOMMENDED_MARKER),
                    Style::default().fg(Color::Yellow),
                ));
            }

            let source = product.source.clone().unwrap_or_else(|| "\u{2014}".to_string());
            vec![
                Line::from(title_spans),
                Line::from(vec![
                    Span::styled(
                        format_price(product.price, product.price_raw.as_deref()),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw("  rating "),
                    Span::raw(format_rating(product.rating)),
                    Span::raw("  "),
                    Span::styled(source.clone(), Style::default().fg(colors::source_color(&source))),
                ]),
                Line::from(vec![
                    Span::styled("Link:  ", Style::default().fg(Color::DarkGray)),
                    Span::raw(product.link.clone().unwrap_or_else(|| "\u{2014}".to_string())),
                ]),
                Line::from(vec![
                    Span::styled("Image: ", Style::default().fg(Color::DarkGray)),
                    Span::raw(product.image.clone().unwrap_or_else(|| "\u{2014}".to_string())),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Select a result to see details.",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = if app.is_loading {
        format!(" \u{23F3} Searching... ({})", app.mode().label())
    } else {
        format!(
            " {} | {} endpoint | {}",
            app.status_message,
            app.mode().label(),
            app.base_url()
        )
    };

    let right_text =
        " Tab:Field  Enter:Search  \u{2193}:Results  o:Open  c:Copy  Ctrl+R:Clear  Ctrl+Q:Quit ";

    let available_width = area.width as usize;
    let left_len = left_text.chars().count();
    let right_len = right_text.chars().count();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        format!("{:width$}", left_text, width = available_width)
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(Color::White).bg(Color::Rgb(0, 95, 135)));

    frame.render_widget(status, area);
}

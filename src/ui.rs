use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table},
};

use crate::domain::HELP_TEXT;
use crate::health::HealthReport;
use crate::model::{Model, Screen, Status};
use crate::records::{Exam, Invigilator, Kind, Record, Venue};
use crate::view::SortOrder;

const CHECKBOX_WIDTH: u16 = 4;
const NUMERIC_COLUMN_WIDTH: u16 = 12;

pub fn draw(model: &Model, frame: &mut Frame) {
    match model.status {
        Status::LOADING => draw_notice(frame, "Loading records ..."),
        Status::FAILED => draw_error(model, frame),
        _ => match model.screen() {
            Screen::DASHBOARD => draw_dashboard(model, frame),
            Screen::TABLE(Kind::Exams) => {
                draw_table::<Exam>(model, frame, Kind::Exams, &model.dataset().exams)
            }
            Screen::TABLE(Kind::Venues) => {
                draw_table::<Venue>(model, frame, Kind::Venues, &model.dataset().venues)
            }
            Screen::TABLE(Kind::Invigilators) => draw_table::<Invigilator>(
                model,
                frame,
                Kind::Invigilators,
                &model.dataset().invigilators,
            ),
        },
    }
    if model.show_help() {
        draw_help(frame);
    }
}

fn draw_notice(frame: &mut Frame, message: &str) {
    let block = Block::bordered().title(" invigil ");
    let notice = Paragraph::new(Line::from(message).centered()).block(block);
    frame.render_widget(notice, frame.area());
}

fn draw_error(model: &Model, frame: &mut Frame) {
    let message = model.load_error().unwrap_or("Failed to load records");
    let lines = vec![
        Line::from(""),
        Line::from(Span::raw(message.to_string()).red().bold()).centered(),
        Line::from(""),
        Line::from("R reload · q quit").centered().dim(),
    ];
    let block = Block::bordered().title(" invigil — load failed ");
    frame.render_widget(Paragraph::new(lines).block(block), frame.area());
}

fn draw_dashboard(model: &Model, frame: &mut Frame) {
    let [summary_area, upcoming_area, status_area] =
        Layout::vertical([Constraint::Length(7), Constraint::Min(0), Constraint::Length(1)])
            .areas(frame.area());

    let data = model.dataset();
    let report = HealthReport::new(model.store_health().clone());
    let summary = vec![
        Line::from(vec![
            Span::raw("Exams: ").dim(),
            Span::raw(data.exams.len().to_string()).bold(),
            Span::raw("   Venues: ").dim(),
            Span::raw(data.venues.len().to_string()).bold(),
            Span::raw("   Invigilators: ").dim(),
            Span::raw(data.invigilators.len().to_string()).bold(),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Data source: ").dim(),
            Span::raw(model.source_name()),
        ]),
        Line::from(vec![
            Span::raw("Store: ").dim(),
            health_span(model),
            Span::raw(format!("  (http {})", report.http_status())).dim(),
        ]),
        Line::from(""),
    ];
    frame.render_widget(
        Paragraph::new(summary).block(Block::bordered().title(" invigil — dashboard ")),
        summary_area,
    );

    let upcoming: Vec<Line> = model
        .upcoming_exams(8)
        .into_iter()
        .map(Line::from)
        .collect();
    let upcoming = if upcoming.is_empty() {
        vec![Line::from("No exams scheduled").dim()]
    } else {
        upcoming
    };
    frame.render_widget(
        Paragraph::new(upcoming).block(Block::bordered().title(" Upcoming exams ")),
        upcoming_area,
    );

    draw_status_line(model, frame, status_area);
}

fn health_span(model: &Model) -> Span<'static> {
    let health = model.store_health();
    let text = health.summary();
    if health.is_error() {
        Span::raw(text).red().bold()
    } else {
        Span::raw(text).green()
    }
}

fn draw_table<R: Record>(model: &Model, frame: &mut Frame, kind: Kind, records: &[R]) {
    let state = model.view(kind);
    let page = state.page_view(records);

    let [toolbar_area, table_area, footer_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    // Toolbar: title plus either the live search prompt or the selection
    // summary, like the table header bar it mirrors.
    let toolbar = if model.raw_keyevents() {
        Line::from(vec![
            Span::raw(format!(" {} ", R::title())).bold(),
            Span::raw("Search: "),
            Span::raw(model.search_prompt().to_string()).underlined(),
            Span::raw("▌"),
        ])
    } else if state.selected_count() > 0 {
        Line::from(vec![
            Span::raw(format!(" {} ", R::title())).bold(),
            Span::raw(format!("{} selected", state.selected_count()))
                .bold()
                .cyan(),
            Span::raw("  (c copy, a clear)").dim(),
        ])
    } else if !state.search_query().is_empty() {
        Line::from(vec![
            Span::raw(format!(" {} ", R::title())).bold(),
            Span::raw(format!("filter: \"{}\"", state.search_query())),
            Span::raw("  (Esc clears)").dim(),
        ])
    } else {
        Line::from(vec![
            Span::raw(format!(" {} ", R::title())).bold(),
            Span::raw("/ search · s sort · space select · e expand").dim(),
        ])
    };
    frame.render_widget(Paragraph::new(toolbar), toolbar_area);

    let columns = R::columns();
    let filtered_ids = state.filtered_ids(records);
    let all_selected =
        !filtered_ids.is_empty() && filtered_ids.iter().all(|id| state.is_selected(*id));

    let mut header_cells = vec![Cell::from(if all_selected { "[x]" } else { "[ ]" })];
    for (idx, column) in columns.iter().enumerate() {
        let mut label = column.label.to_string();
        if state.order_by() == column.key {
            label.push_str(match state.order() {
                SortOrder::Ascending => " ▲",
                SortOrder::Descending => " ▼",
            });
        }
        let mut span = Span::raw(label).bold();
        if idx == state.cursor_col() {
            span = span.underlined();
        }
        let line = if column.numeric {
            Line::from(span).right_aligned()
        } else {
            Line::from(span)
        };
        header_cells.push(Cell::from(line));
    }
    let header = Row::new(header_cells);

    let mut rows: Vec<Row> = Vec::new();
    for (idx, record) in page.rows.iter().enumerate() {
        let selected = state.is_selected(record.id());
        let mut cells = vec![Cell::from(if selected { "[x]" } else { "[ ]" })];
        for column in columns {
            let value = record.cell(column.key);
            let line = if column.numeric {
                Line::from(value).right_aligned()
            } else {
                Line::from(value)
            };
            cells.push(Cell::from(line));
        }
        let mut style = Style::new();
        if selected {
            style = style.bold();
        }
        if idx == state.cursor() {
            style = style.reversed();
        }
        rows.push(Row::new(cells).style(style));

        if state.is_expanded(record.id()) {
            for line in record.detail_lines() {
                rows.push(Row::new(vec![
                    Cell::from(""),
                    Cell::from(Line::from(Span::raw(format!("↳ {line}")).italic().dim())),
                ]));
            }
        }
    }
    // Short last pages pad to a constant height, as the rendered table does.
    for _ in 0..page.empty_rows {
        rows.push(Row::new(vec![Cell::from("")]));
    }

    let mut widths = vec![Constraint::Length(CHECKBOX_WIDTH)];
    widths.extend(columns.iter().map(|c| {
        if c.numeric {
            Constraint::Length(NUMERIC_COLUMN_WIDTH)
        } else {
            Constraint::Fill(1)
        }
    }));

    let table = Table::new(rows, widths).header(header).block(
        Block::bordered().title(format!(" {} ", R::title())),
    );
    frame.render_widget(table, table_area);

    let footer = Line::from(vec![
        Span::raw(format!(" Rows per page: {}", state.rows_per_page())),
        Span::raw(" · "),
        Span::raw(format!(
            "Page {}/{}",
            state.page() + 1,
            state.page_count(page.total_matching)
        )),
        Span::raw(" · "),
        Span::raw(format!("{} matching", page.total_matching)),
        Span::raw(" · "),
        Span::raw(format!("{} selected", state.selected_count())),
    ])
    .dim();
    frame.render_widget(Paragraph::new(footer), footer_area);

    draw_status_line(model, frame, status_area);
}

fn draw_status_line(model: &Model, frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::raw(format!(" {}", model.status_message())),
        Span::raw("  —  ? help · 0 dashboard · 1/2/3 tables · q quit").dim(),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(HELP_TEXT).block(Block::bordered().title(" Help ")),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, vertical, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(r);
    let [_, horizontal, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(vertical);
    horizontal
}

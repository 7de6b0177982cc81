use crate::analysis::summary::{ServiceLevel, Trend, link_usage, summarize_cities, summarize_kinds};
use crate::tui::app::App;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::Color::White;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Padding, Row, Table};

pub fn draw_app(frame: &mut Frame, app: &App) {
    let city_rows = app.engine.network().cities().count() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(6),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[3]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(city_rows + 3), Constraint::Min(4)])
        .split(body[1]);

    frame.render_widget(build_header(app), chunks[0]);
    frame.render_widget(build_kind_table(app), chunks[2]);
    frame.render_widget(build_link_table(app), body[0]);
    frame.render_widget(build_city_table(app), side[0]);
    frame.render_widget(build_log(app), side[1]);
    frame.render_widget(build_footer(), chunks[4]);
}

fn util_style(utilization: f64) -> Style {
    if utilization < 0.8 {
        Style::default().fg(Color::Green)
    } else if utilization < 1.0 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Red)
    }
}

fn titled(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![
            Span::from(format!(" {title} ")).style(Style::default().bold()),
        ]))
        .padding(Padding::horizontal(1))
}

fn header_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(White)
}

fn build_header(app: &'_ App) -> Block<'_> {
    let network = app.engine.network();
    let dim = Style::default().add_modifier(Modifier::DIM);
    let mut spans = vec![
        Span::raw(" AquaFlow ").style(Style::default().bold().cyan()),
        Span::raw("|").style(dim),
        Span::raw(" Flow: ").style(dim),
        Span::raw(app.engine.current_flow().total_flow().to_string())
            .style(Style::default().bold()),
        Span::raw(" / Demand: ").style(dim),
        Span::raw(network.total_demand().to_string()).style(Style::default().bold()),
        Span::raw(" / Supply: ").style(dim),
        Span::raw(network.total_supply().to_string()).style(Style::default().bold()),
        Span::raw(" "),
    ];
    if let Some(status) = app.status() {
        spans.push(Span::raw(format!(" {status} ")).style(Style::default().red().bold()));
    }
    Block::new()
        .title(Line::from(spans))
        .title_alignment(Alignment::Center)
}

fn build_kind_table(app: &'_ App) -> Table<'_> {
    let kinds = summarize_kinds(
        app.engine.network(),
        app.engine.current_flow(),
        app.engine.previous_flow(),
    );

    Table::new(
        kinds.into_iter().map(|summary| {
            let trend = match summary.trend() {
                Trend::Up => "  ↗",
                Trend::Down => "  ↘",
                Trend::Flat => "  →",
            };
            Row::new(vec![
                Cell::from(summary.label()),
                Cell::from(format!("{:>5}", summary.node_count())),
                Cell::from(format!("{:>6}", summary.throughput())),
                Cell::from(format!("{:>6}", summary.capacity())),
                Cell::from(format!("{:>6.2}", summary.utilization()))
                    .style(util_style(summary.utilization())),
                Cell::from(trend).style(Style::default().bold()),
            ])
        }),
        [
            Constraint::Length(12),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new([
            Cell::from("Kind"),
            Cell::from("Nodes"),
            Cell::from("  Flow"),
            Cell::from("   Cap"),
            Cell::from("  Util"),
            Cell::from("Trend"),
        ])
        .style(header_style()),
    )
    .block(titled("Network"))
}

fn build_link_table(app: &'_ App) -> Table<'_> {
    let usage = link_usage(app.engine.network().links(), app.engine.current_flow());

    Table::new(
        usage.into_iter().map(|u| {
            let name_style = if u.is_saturated() {
                Style::default().red().bold()
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(u.link.key().to_string()).style(name_style),
                Cell::from(format!("{:>5}", u.flow)),
                Cell::from(format!("{:>5}", u.link.capacity())),
                Cell::from(format!("{:>6.2}", u.utilization)).style(util_style(u.utilization)),
            ])
        }),
        [
            Constraint::Length(16),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new([
            Cell::from("Link"),
            Cell::from(" Flow"),
            Cell::from("  Cap"),
            Cell::from("  Util"),
        ])
        .style(header_style()),
    )
    .block(titled("Links"))
}

fn build_city_table(app: &'_ App) -> Table<'_> {
    let cities = summarize_cities(app.engine.network(), app.engine.current_flow());

    Table::new(
        cities.into_iter().map(|city| {
            let level_style = match city.level() {
                ServiceLevel::Full => Style::default().add_modifier(Modifier::DIM),
                ServiceLevel::Partial => Style::default().yellow(),
                ServiceLevel::Poor => Style::default().light_red(),
                ServiceLevel::Dry => Style::default().red().bold(),
            };
            Row::new(vec![
                Cell::from(city.name().to_owned()),
                Cell::from(format!("{:>4}/{:<4}", city.received(), city.demand())),
                Cell::from(format!("{:>6.2}", city.ratio())),
                Cell::from(format!("{:?}", city.level())).style(level_style),
            ])
        }),
        [
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new([
            Cell::from("City"),
            Cell::from("Received"),
            Cell::from(" Ratio"),
            Cell::from("Service"),
        ])
        .style(header_style()),
    )
    .block(titled("Cities"))
}

fn build_log(app: &'_ App) -> List<'_> {
    let works = app
        .engine
        .work_log()
        .iter()
        .rev()
        .map(|item| ListItem::new(item.to_string()));
    let events = app
        .engine
        .events()
        .iter()
        .rev()
        .map(|event| ListItem::new(event.to_string()).style(Style::default().add_modifier(Modifier::DIM)));
    List::new(works.chain(events)).block(titled("Work log"))
}

fn build_footer() -> Line<'static> {
    Line::from(" o satisfy  p optimize  d drought  r reset  q quit ")
        .style(Style::default().add_modifier(Modifier::DIM))
        .alignment(Alignment::Center)
}

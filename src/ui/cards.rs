// Project card rendering.
// Builds card content once and lays it out as a grid or plain text.

use chrono::Local;
use ratatui::{prelude::*, widgets::*};

use crate::github::Repository;
use crate::projects::ProjectListing;

/// Card width in cells, borders included.
const CARD_WIDTH: u16 = 40;
/// Card height in cells, borders included.
const CARD_HEIGHT: u16 = 8;

const FALLBACK_LANGUAGE_COLOR: Color = Color::Rgb(0x64, 0x74, 0x8b);

const LANGUAGE_COLORS: &[(&str, Color)] = &[
    ("JavaScript", Color::Rgb(0xf7, 0xdf, 0x1e)),
    ("Python", Color::Rgb(0x37, 0x76, 0xab)),
    ("Java", Color::Rgb(0x00, 0x73, 0x96)),
    ("TypeScript", Color::Rgb(0x31, 0x78, 0xc6)),
    ("HTML", Color::Rgb(0xe3, 0x4f, 0x26)),
    ("CSS", Color::Rgb(0x15, 0x72, 0xb6)),
    ("C++", Color::Rgb(0x00, 0x59, 0x9c)),
    ("C#", Color::Rgb(0x23, 0x91, 0x20)),
    ("PHP", Color::Rgb(0x77, 0x7b, 0xb4)),
    ("Ruby", Color::Rgb(0xcc, 0x34, 0x2d)),
    ("Go", Color::Rgb(0x00, 0xad, 0xd8)),
    ("Rust", Color::Rgb(0x00, 0x00, 0x00)),
    ("Swift", Color::Rgb(0xfa, 0x73, 0x43)),
    ("Kotlin", Color::Rgb(0x7f, 0x52, 0xff)),
];

/// Badge color for a repository's primary language.
pub fn language_color(language: &str) -> Color {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map_or(FALLBACK_LANGUAGE_COLOR, |(_, color)| *color)
}

/// Format a count compactly (e.g., 1500 -> "1.5k").
pub fn format_number(num: u64) -> String {
    if num >= 1000 {
        format!("{:.1}k", num as f64 / 1000.0)
    } else {
        num.to_string()
    }
}

/// Card heading: the repository name, badged when it is a fork.
pub fn card_title(repo: &Repository) -> String {
    if repo.fork {
        format!("{} ⑂ Fork", repo.name)
    } else {
        repo.name.clone()
    }
}

/// Body lines of a project card.
pub fn card_lines(repo: &Repository) -> Vec<Line<'static>> {
    let description = repo
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "No description available".to_string());
    let language = repo.language.clone().unwrap_or_else(|| "Unknown".to_string());
    let updated = repo
        .updated_at
        .with_timezone(&Local)
        .format("%b %-d, %Y")
        .to_string();

    let mut lines = vec![
        Line::from(Span::raw(description)),
        Line::from(Span::styled(
            format!("● {}", language),
            Style::default().fg(language_color(&language)),
        )),
        Line::from(vec![
            Span::styled("★ ", Style::default().fg(Color::Yellow)),
            Span::raw(format_number(repo.stargazers_count)),
            Span::styled("  ⑂ ", Style::default().fg(Color::DarkGray)),
            Span::raw(format_number(repo.forks_count)),
            Span::styled("  Updated ", Style::default().fg(Color::DarkGray)),
            Span::raw(updated),
        ]),
        Line::from(vec![
            Span::styled("Code ", Style::default().fg(Color::DarkGray)),
            Span::styled(repo.html_url.clone(), Style::default().fg(Color::Cyan)),
        ]),
    ];

    if let Some(homepage) = repo.live_demo() {
        lines.push(Line::from(vec![
            Span::styled("Demo ", Style::default().fg(Color::DarkGray)),
            Span::styled(homepage.to_string(), Style::default().fg(Color::Cyan)),
        ]));
    }

    lines
}

fn plain(line: &Line) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

/// Render a listing as plain text, one card per paragraph.
pub fn plain_text(listing: &ProjectListing) -> String {
    if listing.is_empty() {
        return "No projects found\n".to_string();
    }

    let mut out = String::new();
    for repo in listing {
        out.push_str(&card_title(repo));
        out.push('\n');
        for line in card_lines(repo) {
            out.push_str("  ");
            out.push_str(&plain(&line));
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Render the project grid, scrolled so the selected card is visible.
pub fn render_grid(
    frame: &mut Frame,
    listing: &ProjectListing,
    selected: Option<usize>,
    area: Rect,
) {
    let columns = (area.width / CARD_WIDTH).max(1) as usize;
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = selected.unwrap_or(0) / columns;
    let first_row = (selected_row + 1).saturating_sub(visible_rows);
    let card_width = area.width / columns as u16;

    for (index, repo) in listing.iter().enumerate().skip(first_row * columns) {
        let row = index / columns - first_row;
        if row >= visible_rows {
            break;
        }
        let column = index % columns;

        let card_area = Rect::new(
            area.x + column as u16 * card_width,
            area.y + row as u16 * CARD_HEIGHT,
            card_width,
            CARD_HEIGHT.min(area.height),
        );

        let border_style = if selected == Some(index) {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let card = Paragraph::new(card_lines(repo))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(format!(" {} ", card_title(repo))),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(card, card_area);
    }
}

use crate::nav::ModelKind;
use crate::node::{ContainerView, NodeView};
use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;
use crate::ui::theme::{ACCENT, ACTIVE_HIGHLIGHT, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    frame.render_widget(Header::new(app.view()).widget(), header);
    frame.render_widget(Clear, body);
    frame.render_widget(
        Paragraph::new(body_lines(app.view()))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::NONE)),
        body,
    );
    frame.render_widget(Footer::new(app.status()).widget(footer), footer);
}

/// Container bars, then the visible screen, then the numbered actions.
pub fn body_lines(view: &NodeView) -> Vec<Line<'static>> {
    let text_style = Style::default().fg(HEADER_TEXT);
    let mut lines = Vec::new();

    for node in view.foreground_chain() {
        if let NodeView::Container(container) = node {
            if container.kind != ModelKind::BackStack {
                lines.push(container_bar(container));
            }
        }
    }

    if let Some(screen) = view.visible_screen() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            screen.title.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )));
        for text in &screen.lines {
            lines.push(Line::from(Span::styled(text.clone(), text_style)));
        }
    }

    let actions = view.visible_actions();
    if !actions.is_empty() {
        lines.push(Line::from(""));
        for (idx, action) in actions.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}. ", idx + 1), Style::default().fg(ACCENT)),
                Span::styled(action.label.clone(), text_style),
            ]));
        }
    }

    lines
}

/// Tab strip for a tab selector or carousel; the foreground entry is highlighted.
fn container_bar(container: &ContainerView) -> Line<'static> {
    let separator_style = Style::default().fg(HEADER_SEPARATOR);
    let mut spans = vec![Span::styled(
        format!(" {} ", container.kind),
        separator_style,
    )];
    for (idx, target) in container.targets.iter().enumerate() {
        let style = if idx == container.foreground {
            Style::default()
                .fg(ACCENT)
                .bg(ACTIVE_HIGHLIGHT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(HEADER_TEXT)
        };
        spans.push(Span::styled(format!(" {} ", target), style));
    }
    if container.kind == ModelKind::Carousel {
        spans.push(Span::styled(
            format!("  @ {:.2}", container.position),
            separator_style,
        ));
    }
    Line::from(spans)
}

use crate::node::NodeView;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Breadcrumb of the visible path, e.g. `root › spotlight › third`.
pub struct Header<'a> {
    view: &'a NodeView,
}

impl<'a> Header<'a> {
    pub fn new(view: &'a NodeView) -> Self {
        Self { view }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let chain = self.view.foreground_chain();
        let last = chain.len().saturating_sub(1);

        let mut spans = vec![Span::styled("  ", text_style)];
        for (idx, node) in chain.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled(" › ", separator_style));
            }
            let style = if idx == last {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                text_style
            };
            spans.push(Span::styled(node.path().last().to_string(), style));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

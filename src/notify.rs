use crate::card::{Button, Card, CardHeader, CardSection, Message, Widget};
use crate::config::{Severity, SeverityImages};

pub const SUBTITLE: &str = "Sent using the CLI";
pub const DEFAULT_ACTION_LABEL: &str = "View details";

pub struct Action {
    pub link: String,
    pub label: String,
}

pub struct NotifyContent {
    pub message: String,
    pub severity: Severity,
    pub action: Option<Action>,
}

/// Builds a single card with one section holding one text widget. The action,
/// if any, becomes a link button on that same widget.
pub fn build_message(images: &SeverityImages, content: NotifyContent) -> Message {
    let mut widget = Widget::text_paragraph(content.message);

    if let Some(action) = content.action {
        widget = widget.with_button(Button::link(action.label, action.link));
    }

    Message::cards(vec![Card {
        header: Some(CardHeader {
            title: content.severity.as_str().to_uppercase(),
            subtitle: SUBTITLE.to_string(),
            image_url: images.image_for(content.severity).to_string(),
            ..Default::default()
        }),
        sections: vec![CardSection {
            widgets: vec![widget],
            ..Default::default()
        }],
        ..Default::default()
    }])
}

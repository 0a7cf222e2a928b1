//! Permissive message shape where each variant is an independent optional field.
//!
//! This is how [`Message`], [`Widget`] and [`Button`] look on the wire. Any payload
//! that sets more than one exclusive field still decodes: the conversion into the
//! typed model keeps one field by a fixed precedence and drops the rest. A button
//! object that sets no field at all is rejected with [`EmptyButton`].

use crate::card::{
    Button, Card, ImageButton, ImageWidget, KeyValueWidget, Message, MessageBody, TextButton,
    TextWidget, Widget, WidgetContent,
};
use crate::error::EmptyButton;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyMessage {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<Card>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fallback_text: String,
}

impl LegacyMessage {
    /// At most one of `text` and `cards` is set.
    pub fn is_variant_valid(&self) -> bool {
        self.text.is_empty() || self.cards.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyWidget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_paragraph: Option<TextWidget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_value: Option<KeyValueWidget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageWidget>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

impl LegacyWidget {
    /// At most one of `text_paragraph`, `key_value` and `image` is set.
    pub fn is_variant_valid(&self) -> bool {
        let set = [
            self.text_paragraph.is_some(),
            self.key_value.is_some(),
            self.image.is_some(),
        ];

        set.iter().filter(|is_set| **is_set).count() <= 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyButton {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_button: Option<TextButton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_button: Option<ImageButton>,
}

impl LegacyButton {
    /// At most one of `text_button` and `image_button` is set.
    pub fn is_variant_valid(&self) -> bool {
        self.text_button.is_none() || self.image_button.is_none()
    }
}

/// Cards win over text.
impl From<LegacyMessage> for Message {
    fn from(legacy: LegacyMessage) -> Self {
        if !legacy.is_variant_valid() {
            warn!("Message sets both text and cards, dropping text");
        }

        let body = if !legacy.cards.is_empty() {
            Some(MessageBody::Cards(legacy.cards))
        } else if !legacy.text.is_empty() {
            Some(MessageBody::Text(legacy.text))
        } else {
            None
        };

        Message {
            body,
            fallback_text: legacy.fallback_text,
        }
    }
}

impl From<Message> for LegacyMessage {
    fn from(message: Message) -> Self {
        let mut legacy = LegacyMessage {
            fallback_text: message.fallback_text,
            ..Default::default()
        };

        match message.body {
            Some(MessageBody::Text(text)) => legacy.text = text,
            Some(MessageBody::Cards(cards)) => legacy.cards = cards,
            None => {}
        }

        legacy
    }
}

/// `text_paragraph` wins over `key_value`, which wins over `image`.
impl From<LegacyWidget> for Widget {
    fn from(legacy: LegacyWidget) -> Self {
        if !legacy.is_variant_valid() {
            warn!("Widget sets more than one content field, keeping the first by precedence");
        }

        let content = legacy
            .text_paragraph
            .map(WidgetContent::TextParagraph)
            .or_else(|| legacy.key_value.map(WidgetContent::KeyValue))
            .or_else(|| legacy.image.map(WidgetContent::Image));

        Widget {
            content,
            buttons: legacy.buttons,
        }
    }
}

impl From<Widget> for LegacyWidget {
    fn from(widget: Widget) -> Self {
        let mut legacy = LegacyWidget {
            buttons: widget.buttons,
            ..Default::default()
        };

        match widget.content {
            Some(WidgetContent::TextParagraph(text)) => legacy.text_paragraph = Some(text),
            Some(WidgetContent::KeyValue(key_value)) => legacy.key_value = Some(key_value),
            Some(WidgetContent::Image(image)) => legacy.image = Some(image),
            None => {}
        }

        legacy
    }
}

/// `text_button` wins over `image_button`.
impl TryFrom<LegacyButton> for Button {
    type Error = EmptyButton;

    fn try_from(legacy: LegacyButton) -> Result<Self, Self::Error> {
        if !legacy.is_variant_valid() {
            warn!("Button sets both textButton and imageButton, dropping imageButton");
        }

        match (legacy.text_button, legacy.image_button) {
            (Some(text), _) => Ok(Button::TextButton(text)),
            (None, Some(image)) => Ok(Button::ImageButton(image)),
            (None, None) => Err(EmptyButton),
        }
    }
}

impl From<Button> for LegacyButton {
    fn from(button: Button) -> Self {
        match button {
            Button::TextButton(text) => LegacyButton {
                text_button: Some(text),
                image_button: None,
            },
            Button::ImageButton(image) => LegacyButton {
                text_button: None,
                image_button: Some(image),
            },
        }
    }
}

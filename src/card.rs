//! Card message schema accepted by chat incoming webhooks.
//!
//! Fields holding their absent value (empty string, empty list, `false`, `None`,
//! empty map) are left out of the encoded JSON at every depth. `Card::name` is the
//! one exception and is always written, see [`AlwaysPresent`].

use crate::error::{DecodeError, EncodeError};
use crate::legacy::{LegacyButton, LegacyMessage, LegacyWidget};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A field that is encoded even when it holds its default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlwaysPresent<T>(pub T);

impl<T> From<T> for AlwaysPresent<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

/// Top level payload. Carries either plain text or cards, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "LegacyMessage", into = "LegacyMessage")]
pub struct Message {
    pub body: Option<MessageBody>,
    pub fallback_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    Text(String),
    Cards(Vec<Card>),
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            body: Some(MessageBody::Text(text.into())),
            fallback_text: String::new(),
        }
    }

    pub fn cards(cards: Vec<Card>) -> Self {
        Self {
            body: Some(MessageBody::Cards(cards)),
            fallback_text: String::new(),
        }
    }

    pub fn with_fallback_text(mut self, fallback_text: impl Into<String>) -> Self {
        self.fallback_text = fallback_text.into();
        self
    }

    /// Cards of the message, empty for a text message.
    pub fn card_list(&self) -> &[Card] {
        match &self.body {
            Some(MessageBody::Cards(cards)) => cards,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Card {
    pub name: AlwaysPresent<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<CardHeader>,
    // A card is expected to have at least one section once sent.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<CardSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardHeader {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_style: String,
}

/// Widgets are displayed in list order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardSection {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub header: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub widgets: Vec<Widget>,
}

/// One visual element: at most one content block plus any number of buttons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "LegacyWidget", into = "LegacyWidget")]
pub struct Widget {
    pub content: Option<WidgetContent>,
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetContent {
    TextParagraph(TextWidget),
    KeyValue(KeyValueWidget),
    Image(ImageWidget),
}

impl Widget {
    pub fn text_paragraph(text: impl Into<String>) -> Self {
        Self::with_content(WidgetContent::TextParagraph(TextWidget { text: text.into() }))
    }

    pub fn key_value(key_value: KeyValueWidget) -> Self {
        Self::with_content(WidgetContent::KeyValue(key_value))
    }

    pub fn image(image: ImageWidget) -> Self {
        Self::with_content(WidgetContent::Image(image))
    }

    pub fn buttons(buttons: Vec<Button>) -> Self {
        Self {
            content: None,
            buttons,
        }
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    fn with_content(content: WidgetContent) -> Self {
        Self {
            content: Some(content),
            buttons: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextWidget {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
}

/// A label and a value. `icon` and `icon_url` are alternative icon sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyValueWidget {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub top_label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    // `false` cannot be told apart from unset on the wire.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub content_multiline: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bottom_label: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<Button>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_click: Option<ClickEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageWidget {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_click: Option<ClickEvent>,
}

/// Action bound to a widget or button. Only one of `open_link` and `action` is
/// expected to be set; custom actions may be ignored for webhook messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClickEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_link: Option<OpenLinkAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<FormAction>,
}

impl ClickEvent {
    pub fn open_link(url: impl Into<String>) -> Self {
        Self {
            open_link: Some(OpenLinkAction { url: url.into() }),
            action: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenLinkAction {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormAction {
    #[serde(rename = "actionMethodName", skip_serializing_if = "String::is_empty")]
    pub method_name: String,
    // Encoded in key order.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
}

/// A button is either a text button or an image button. Decoding a button object
/// that sets neither fails with [`crate::error::EmptyButton`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LegacyButton", into = "LegacyButton")]
pub enum Button {
    TextButton(TextButton),
    ImageButton(ImageButton),
}

impl Button {
    /// A text button that opens `url` when clicked.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Button::TextButton(TextButton {
            text: text.into(),
            on_click: Some(ClickEvent::open_link(url)),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextButton {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_click: Option<ClickEvent>,
}

/// Button showing a built-in icon or an icon loaded from `icon_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageButton {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_click: Option<ClickEvent>,
}

pub fn encode(message: &Message) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(message)?)
}

pub fn encode_pretty(message: &Message) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec_pretty(message)?)
}

pub fn decode(bytes: &[u8]) -> Result<Message, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    // https://developers.google.com/chat/api/guides/message-formats/cards#full_example_pizza_bot
    const PIZZA_BOT_EXAMPLE: &str = r#"{
  "cards": [
    {
      "name": "",
      "header": {
        "title": "Pizza Bot Customer Support",
        "subtitle": "pizzabot@example.com",
        "imageUrl": "https://goo.gl/aeDtrS"
      },
      "sections": [
        {
          "widgets": [
            {
              "keyValue": {
                "topLabel": "Order No.",
                "content": "12345"
              }
            },
            {
              "keyValue": {
                "topLabel": "Status",
                "content": "In Delivery"
              }
            }
          ]
        },
        {
          "header": "Location",
          "widgets": [
            {
              "image": {
                "imageUrl": "https://maps.googleapis.com/..."
              }
            }
          ]
        },
        {
          "widgets": [
            {
              "buttons": [
                {
                  "textButton": {
                    "text": "OPEN ORDER",
                    "onClick": {
                      "openLink": {
                        "url": "https://example.com/orders/..."
                      }
                    }
                  }
                }
              ]
            }
          ]
        }
      ]
    }
  ]
}"#;

    fn pizza_bot() -> Message {
        Message::cards(vec![Card {
            header: Some(CardHeader {
                title: "Pizza Bot Customer Support".to_string(),
                subtitle: "pizzabot@example.com".to_string(),
                image_url: "https://goo.gl/aeDtrS".to_string(),
                ..Default::default()
            }),
            sections: vec![
                CardSection {
                    widgets: vec![
                        Widget::key_value(KeyValueWidget {
                            top_label: "Order No.".to_string(),
                            content: "12345".to_string(),
                            ..Default::default()
                        }),
                        Widget::key_value(KeyValueWidget {
                            top_label: "Status".to_string(),
                            content: "In Delivery".to_string(),
                            ..Default::default()
                        }),
                    ],
                    ..Default::default()
                },
                CardSection {
                    header: "Location".to_string(),
                    widgets: vec![Widget::image(ImageWidget {
                        image_url: "https://maps.googleapis.com/...".to_string(),
                        on_click: None,
                    })],
                },
                CardSection {
                    widgets: vec![Widget::buttons(vec![Button::link(
                        "OPEN ORDER",
                        "https://example.com/orders/...",
                    )])],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }])
    }

    fn to_value(message: &Message) -> Value {
        serde_json::from_slice(&encode(message).unwrap()).unwrap()
    }

    #[test]
    fn test_pizza_bot_full_example() {
        let expected: Value = serde_json::from_str(PIZZA_BOT_EXAMPLE).unwrap();

        assert_eq!(to_value(&pizza_bot()), expected);
    }

    #[test]
    fn test_pretty_encoding_matches_reference_text() {
        let pretty = encode_pretty(&pizza_bot()).unwrap();

        assert_eq!(String::from_utf8(pretty).unwrap(), PIZZA_BOT_EXAMPLE);
    }

    #[test]
    fn test_card_name_is_always_encoded() {
        let message = Message::cards(vec![Card::default()]);

        assert_eq!(to_value(&message), json!({ "cards": [{ "name": "" }] }));
    }

    #[test]
    fn test_absent_fields_are_omitted_at_every_depth() {
        let message = Message::cards(vec![Card {
            name: "build".to_string().into(),
            header: Some(CardHeader::default()),
            sections: vec![CardSection {
                header: String::new(),
                widgets: vec![
                    Widget::key_value(KeyValueWidget {
                        button: Some(Button::TextButton(TextButton::default())),
                        on_click: Some(ClickEvent {
                            open_link: Some(OpenLinkAction::default()),
                            action: Some(FormAction::default()),
                        }),
                        ..Default::default()
                    }),
                    Widget::image(ImageWidget::default()),
                    Widget::text_paragraph(""),
                    Widget::default(),
                    Widget::buttons(vec![Button::ImageButton(ImageButton::default())]),
                ],
            }],
        }]);

        assert_eq!(
            to_value(&message),
            json!({
                "cards": [{
                    "name": "build",
                    "header": {},
                    "sections": [{
                        "widgets": [
                            {
                                "keyValue": {
                                    "button": { "textButton": {} },
                                    "onClick": { "openLink": {}, "action": {} }
                                }
                            },
                            { "image": {} },
                            { "textParagraph": {} },
                            {},
                            { "buttons": [{ "imageButton": {} }] }
                        ]
                    }]
                }]
            })
        );
    }

    #[test]
    fn test_absent_message_fields_are_omitted() {
        assert_eq!(to_value(&Message::default()), json!({}));
        assert_eq!(to_value(&Message::text("")), json!({}));
        assert_eq!(to_value(&Message::cards(Vec::new())), json!({}));
        assert_eq!(
            to_value(&Message::text("hello").with_fallback_text("hi")),
            json!({ "text": "hello", "fallbackText": "hi" })
        );
    }

    #[test]
    fn test_set_scalar_fields_are_encoded() {
        let widget = Widget::key_value(KeyValueWidget {
            content: "line one\nline two".to_string(),
            content_multiline: true,
            bottom_label: "bottom".to_string(),
            icon: "STAR".to_string(),
            icon_url: "https://example.com/star.png".to_string(),
            ..Default::default()
        });
        let message = Message::cards(vec![Card {
            sections: vec![CardSection {
                widgets: vec![widget],
                ..Default::default()
            }],
            ..Default::default()
        }]);

        assert_eq!(
            to_value(&message)["cards"][0]["sections"][0]["widgets"][0],
            json!({
                "keyValue": {
                    "content": "line one\nline two",
                    "contentMultiline": true,
                    "bottomLabel": "bottom",
                    "icon": "STAR",
                    "iconUrl": "https://example.com/star.png"
                }
            })
        );
    }

    #[test]
    fn test_form_action_parameters_are_sorted() {
        let mut parameters = BTreeMap::new();
        parameters.insert("zone".to_string(), "eu".to_string());
        parameters.insert("build".to_string(), "42".to_string());
        let message = Message::cards(vec![Card {
            sections: vec![CardSection {
                widgets: vec![Widget::image(ImageWidget {
                    image_url: "https://example.com/a.png".to_string(),
                    on_click: Some(ClickEvent {
                        open_link: None,
                        action: Some(FormAction {
                            method_name: "retry".to_string(),
                            parameters,
                        }),
                    }),
                })],
                ..Default::default()
            }],
            ..Default::default()
        }]);

        let encoded = String::from_utf8(encode(&message).unwrap()).unwrap();

        assert!(encoded.contains(
            r#""action":{"actionMethodName":"retry","parameters":{"build":"42","zone":"eu"}}"#
        ));
    }

    #[test]
    fn test_order_is_preserved() {
        let section = |label: &str| CardSection {
            header: label.to_string(),
            widgets: vec![
                Widget::text_paragraph("W1"),
                Widget::text_paragraph("W2"),
                Widget::text_paragraph("W3"),
            ],
        };
        let card = |name: &str| Card {
            name: name.to_string().into(),
            header: None,
            sections: vec![section("S1"), section("S2"), section("S3")],
        };
        let value = to_value(&Message::cards(vec![card("C1"), card("C2")]));

        let cards = value["cards"].as_array().unwrap();
        assert_eq!(cards[0]["name"], "C1");
        assert_eq!(cards[1]["name"], "C2");

        let sections = cards[1]["sections"].as_array().unwrap();
        let headers: Vec<_> = sections.iter().map(|s| s["header"].clone()).collect();
        assert_eq!(headers, vec![json!("S1"), json!("S2"), json!("S3")]);

        let texts: Vec<_> = sections[2]["widgets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["textParagraph"]["text"].clone())
            .collect();
        assert_eq!(texts, vec![json!("W1"), json!("W2"), json!("W3")]);
    }

    #[test]
    fn test_decode_then_encode_is_byte_identical() {
        let encoded = encode(&pizza_bot()).unwrap();
        let decoded = decode(&encoded).unwrap();

        assert_eq!(decoded, pizza_bot());
        assert_eq!(encode(&decoded).unwrap(), encoded);
    }

    #[test]
    fn test_decode_reference_json() {
        let decoded = decode(PIZZA_BOT_EXAMPLE.as_bytes()).unwrap();

        assert_eq!(decoded, pizza_bot());
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        assert!(decode(b"{\"cards\": [").is_err());
    }
}

use serde::Serialize;

/// What a dashboard card shows after its initializer ran
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Card {
    Ready {
        heading: String,
        detail: String,
        /// Style hint such as `status-warning` or `aqi-moderate`
        status: Option<&'static str>,
    },
    Unavailable {
        message: String,
    },
}

impl Card {
    pub fn unavailable(message: &str) -> Self {
        Self::Unavailable {
            message: message.to_string(),
        }
    }
}

/// A place a card gets rendered into
pub trait CardSlot: Send {
    fn render(&mut self, card: Card);
}

/// A place plain text gets rendered into
pub trait TextSlot: Send {
    fn set_text(&mut self, text: &str);
}

impl CardSlot for Option<Card> {
    fn render(&mut self, card: Card) {
        *self = Some(card);
    }
}

impl CardSlot for Vec<Card> {
    fn render(&mut self, card: Card) {
        self.push(card);
    }
}

impl TextSlot for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

impl TextSlot for Vec<String> {
    fn set_text(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

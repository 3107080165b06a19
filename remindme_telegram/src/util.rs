use teloxide::{
    prelude::*,
    types::{CallbackQuery, InlineKeyboardMarkup, MaybeInaccessibleMessage, Message, ParseMode},
};

/// A message ready to be sent or to replace an existing one.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Reply {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: None,
            keyboard: None,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            parse_mode: Some(ParseMode::Html),
            ..Self::text(text)
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Self {
            keyboard: Some(keyboard),
            ..Self::text(text)
        }
    }

    pub async fn send(self, bot: &Bot, chat_id: ChatId) -> Result<(), teloxide::RequestError> {
        let mut request = bot.send_message(chat_id, self.text);
        if let Some(parse_mode) = self.parse_mode {
            request = request.parse_mode(parse_mode);
        }
        if let Some(keyboard) = self.keyboard {
            request = request.reply_markup(keyboard);
        }

        request.await?;
        Ok(())
    }
}

pub(crate) fn try_get_message_from_query(query: &CallbackQuery) -> Option<&Message> {
    query.message.as_ref().and_then(|msg| match msg {
        MaybeInaccessibleMessage::Inaccessible(_) => None,
        MaybeInaccessibleMessage::Regular(message) => Some(message.as_ref()),
    })
}

/// A message whose inline keyboard was cleared takes no further button input.
pub(crate) fn has_no_buttons(message: &Message) -> bool {
    message
        .reply_markup()
        .is_none_or(|markup| markup.inline_keyboard.iter().all(Vec::is_empty))
}

use iced::widget::{button, column, container, horizontal_rule, row, text, text_input};
use iced::{Element, Length};

use crate::state::data::Book;
use crate::Message;

/// Note editor for one book; every keystroke is saved
pub fn notes<'a>(book: &Book, buffer: &'a str) -> Element<'a, Message> {
    let key = book.key.clone();
    let date = book
        .note
        .as_ref()
        .filter(|note| !note.date.is_empty())
        .map(|note| format!("Last edited {}", note.date.trim_end()))
        .unwrap_or_else(|| "No note yet".to_string());

    let content = column![
        text(format!("Notes: {}", book.title)).size(18),
        text_input("Write a note...", buffer)
            .on_input(move |value| Message::NoteEdited(key.clone(), value))
            .padding(8),
        text(date).size(12),
        button("Save").on_press(Message::ClosePopup).style(button::success),
    ]
    .spacing(10);

    container(content)
        .padding(12)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}

/// Languages, editions, subjects and reading statistics of one book
pub fn details<'a>(book: &Book) -> Element<'a, Message> {
    let mut content = column![
        text(book.title.clone()).size(18),
        text(format!("Languages: {}", book.language)),
        horizontal_rule(1),
        text(format!("Editions: {}", book.edition_count)),
        horizontal_rule(1),
    ]
    .spacing(6);

    if !book.subject.is_empty() {
        content = content
            .push(text("Subjects:"))
            .push(text(book.subject.clone()).size(13))
            .push(horizontal_rule(1));
    }

    content = content
        .push(row![
            text(format!("Want to read: {}", book.want_to_read_count)).width(Length::Fill),
            text(format!("Currently reading: {}", book.currently_reading_count)).width(Length::Fill),
            text(format!("Already read: {}", book.already_read_count)).width(Length::Fill),
        ])
        .push(button("Close").on_press(Message::ClosePopup));

    container(content)
        .padding(12)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}

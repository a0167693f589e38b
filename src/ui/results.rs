use iced::widget::{button, checkbox, column, horizontal_rule, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};

use super::year_label;
use crate::state::data::Book;
use crate::Message;

fn header<'a>() -> Element<'a, Message> {
    row![
        text("Title").width(Length::FillPortion(3)),
        text("Author").width(Length::FillPortion(2)),
        text("Year").width(60),
        text("Favorite").width(70),
        text("").width(150),
    ]
    .spacing(10)
    .into()
}

fn book_row<'a>(book: Book) -> Element<'a, Message> {
    let author = book.primary_author().unwrap_or_default().to_string();
    let favorite_key = book.key.clone();
    let note_key = book.key.clone();
    let details_key = book.key.clone();

    row![
        text(book.title).width(Length::FillPortion(3)),
        text(author).width(Length::FillPortion(2)),
        text(year_label(book.first_publish_year)).width(60),
        checkbox("", book.is_favorite)
            .on_toggle(move |on| Message::FavoriteToggled(favorite_key.clone(), on))
            .width(70),
        button("Notes").on_press(Message::OpenNotes(note_key)).padding(4),
        button("Details")
            .on_press(Message::OpenDetails(details_key))
            .style(button::secondary)
            .padding(4),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

/// The results table; a hint line when there is nothing to show
pub fn view<'a>(books: Vec<Book>) -> Element<'a, Message> {
    if books.is_empty() {
        return text("No results yet. Search by title or author.").into();
    }

    let rows = Column::with_children(books.into_iter().map(book_row)).spacing(6);

    column![header(), horizontal_rule(1), scrollable(rows).height(Length::Fill)]
        .spacing(6)
        .into()
}

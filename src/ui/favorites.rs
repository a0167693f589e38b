use iced::widget::{button, column, horizontal_rule, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};

use crate::session::FavoritesPanel;
use crate::state::data::Book;
use crate::Message;

fn favorite_row<'a>(book: &Book) -> Element<'a, Message> {
    row![
        text(book.title.clone()).width(Length::FillPortion(3)),
        text(book.primary_author().unwrap_or_default().to_string()).width(Length::FillPortion(2)),
        button("Remove")
            .on_press(Message::RemoveFavorite(book.key.clone()))
            .style(button::danger)
            .padding(4),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

/// The favorites view, replacing the results while open
pub fn view(panel: &FavoritesPanel) -> Element<'_, Message> {
    let body: Element<'_, Message> = if panel.loading {
        text("Loading favorites...").into()
    } else if panel.books.is_empty() {
        text("No favorites yet.").into()
    } else {
        let rows = Column::with_children(panel.books.iter().map(favorite_row)).spacing(6);
        scrollable(rows).height(Length::Fill).into()
    };

    column![
        text("Favorites").size(24),
        row![
            text("Title").width(Length::FillPortion(3)),
            text("Author").width(Length::FillPortion(2)),
            text("").width(70),
        ]
        .spacing(10),
        horizontal_rule(1),
        body,
        button("Close").on_press(Message::CloseFavorites),
    ]
    .spacing(10)
    .into()
}

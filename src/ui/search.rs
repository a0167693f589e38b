use iced::widget::{button, column, pick_list, row, slider, text, text_input};
use iced::{Alignment, Element, Length};

use crate::config::{MAX_RESULTS_PER_PAGE, MIN_RESULTS_PER_PAGE};
use crate::session::Session;
use crate::state::data::SearchType;
use crate::Message;

/// Search input, type selector, action buttons and paging controls
pub fn view(session: &Session) -> Element<'_, Message> {
    let params = session.store().search_params();

    let search_bar = row![
        text_input("Search the catalog...", session.search_input())
            .on_input(Message::SearchInputChanged)
            .on_submit(Message::SearchSubmitted)
            .padding(8)
            .width(Length::FillPortion(4)),
        pick_list(SearchType::ALL, Some(params.search_type), Message::SearchTypeSelected)
            .width(110),
        button("Search")
            .on_press(Message::SearchSubmitted)
            .padding(8),
        button("Show Favorites")
            .on_press(Message::ShowFavorites)
            .style(button::secondary)
            .padding(8),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let previous = button("◀ Prev").padding(6);
    let previous = if params.current_page > 1 {
        previous.on_press(Message::PreviousPage)
    } else {
        previous
    };

    let paging = row![
        text(format!("Results per page: {}", params.results_per_page)).width(160),
        slider(
            MIN_RESULTS_PER_PAGE..=MAX_RESULTS_PER_PAGE,
            params.results_per_page,
            Message::ResultsPerPageChanged,
        )
        .width(Length::FillPortion(2)),
        previous,
        text(format!("Page {}", params.current_page)),
        button("Next ▶").on_press(Message::NextPage).padding(6),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    column![search_bar, paging, text(session.status()).size(14)]
        .spacing(10)
        .into()
}

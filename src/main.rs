use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use iced::widget::{column, container, horizontal_rule, text};
use iced::{window, Element, Length, Subscription, Task, Theme};
use tracing::{error, info};

mod catalog;
mod config;
mod error;
mod session;
mod state;
mod ui;

use catalog::transport::HttpTransport;
use catalog::{worker, CatalogClient, FavoritesResolver};
use config::AppConfig;
use session::{Popup, Session};
use state::data::{Book, SearchType};
use state::library::Library;
use state::store::{SharedStore, Store};

/// How often the UI polls the store for finished searches
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Main application state
struct BookSearch {
    session: Session,
    /// Detail lookups for the favorites view
    resolver: FavoritesResolver,
    /// Cleared when the catalog worker task returns
    worker_running: bool,
    /// Set once the window asked to close
    closing: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    SearchInputChanged(String),
    SearchSubmitted,
    SearchTypeSelected(SearchType),
    ResultsPerPageChanged(u32),
    NextPage,
    PreviousPage,
    /// Frame poll of the download results
    Tick,
    FavoriteToggled(String, bool),
    OpenNotes(String),
    NoteEdited(String, String),
    OpenDetails(String),
    ClosePopup,
    ShowFavorites,
    FavoritesResolved(Vec<Book>),
    RemoveFavorite(String),
    CloseFavorites,
    /// The user closed the window
    CloseRequested(window::Id),
    /// The catalog worker observed the exit signal and returned
    WorkerStopped,
}

impl BookSearch {
    /// Create the application and launch the catalog worker
    fn new(store: Store, client: CatalogClient, poll_interval: Duration) -> (Self, Task<Message>) {
        let worker = Task::perform(
            worker::run(store.clone(), client.clone(), poll_interval),
            |_| Message::WorkerStopped,
        );

        (
            BookSearch {
                session: Session::new(store),
                resolver: FavoritesResolver::new(client),
                worker_running: true,
                closing: false,
            },
            worker,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SearchInputChanged(value) => self.session.set_search_input(value),
            Message::SearchSubmitted => self.session.submit_search(),
            Message::SearchTypeSelected(search_type) => self.session.set_search_type(search_type),
            Message::ResultsPerPageChanged(value) => self.session.set_results_per_page(value),
            Message::NextPage => self.session.next_page(),
            Message::PreviousPage => self.session.previous_page(),
            Message::Tick => {
                self.session.tick();
            }
            Message::FavoriteToggled(key, on) => self.session.toggle_favorite(&key, on),
            Message::OpenNotes(key) => self.session.open_note(&key),
            Message::NoteEdited(key, value) => self.session.edit_note(&key, value),
            Message::OpenDetails(key) => self.session.open_details(&key),
            Message::ClosePopup => self.session.close_popup(),
            Message::ShowFavorites => {
                if let Some(job) = self.session.open_favorites() {
                    let resolver = self.resolver.clone();
                    return Task::perform(
                        async move {
                            resolver
                                .resolve(&job.favorites, &job.books, &job.saved_notes)
                                .await
                        },
                        Message::FavoritesResolved,
                    );
                }
            }
            Message::FavoritesResolved(books) => self.session.apply_resolved_favorites(books),
            Message::RemoveFavorite(key) => self.session.remove_favorite_from_view(&key),
            Message::CloseFavorites => self.session.close_favorites(),
            Message::CloseRequested(_) => {
                self.closing = true;
                self.session.request_exit();
                if !self.worker_running {
                    return iced::exit();
                }
            }
            Message::WorkerStopped => {
                self.worker_running = false;
                if self.closing {
                    return iced::exit();
                }
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = if self.session.favorites_panel().open {
            ui::favorites::view(self.session.favorites_panel())
        } else {
            self.results_view()
        };

        let content = column![
            text("Book Search").size(32),
            ui::search::view(&self.session),
            horizontal_rule(1),
            body,
        ]
        .spacing(16)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn results_view(&self) -> Element<'_, Message> {
        let popup = self.session.popup().and_then(|popup| match popup {
            Popup::Notes(key) => self
                .session
                .find_book(key)
                .map(|book| ui::popup::notes(&book, self.session.note_buffer(key))),
            Popup::Details(key) => self
                .session
                .find_book(key)
                .map(|book| ui::popup::details(&book)),
        });

        let table = ui::results::view(self.session.books());

        match popup {
            Some(popup) => column![popup, table].spacing(12).into(),
            None => table,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            iced::time::every(FRAME_INTERVAL).map(|_| Message::Tick),
            window::close_requests().map(Message::CloseRequested),
        ])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Write favorites and notes; true if both were saved
fn save_user_data(library: &Library, store: &SharedStore) -> bool {
    let mut saved = true;

    if let Err(e) = library.save_favorites(&store.favorites()) {
        error!("Unable to save favorites: {}", e);
        saved = false;
    }

    if let Err(e) = library.save_notes(&store.saved_notes()) {
        error!("Unable to save notes: {}", e);
        saved = false;
    }

    saved
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter("book_search=info")
        .init();

    let config = AppConfig::default();

    let library = match Library::open(config.data_dir()) {
        Ok(library) => library,
        Err(e) => {
            error!("Error creating data directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = SharedStore::new(library.load_favorites(), library.load_notes());

    let transport = match HttpTransport::new(&config) {
        Ok(transport) => transport,
        Err(e) => {
            error!("Unable to set up the catalog client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let client = CatalogClient::new(Arc::new(transport));

    info!("🎨 Book Search running");

    let app_store = store.clone();
    let poll_interval = config.poll_interval;
    let result = iced::application("Book Search", BookSearch::update, BookSearch::view)
        .subscription(BookSearch::subscription)
        .theme(BookSearch::theme)
        .exit_on_close_request(false)
        .centered()
        .run_with(move || BookSearch::new(app_store, client, poll_interval));

    if let Err(e) = result {
        error!("UI loop failed: {}", e);
    }

    // The window is gone and the worker has returned (or was dropped with the runtime).
    store.request_exit();

    if !save_user_data(&library, &store) {
        return ExitCode::from(2);
    }

    info!("💾 Favorites and notes saved");
    ExitCode::SUCCESS
}

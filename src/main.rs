use iced::keyboard::{self, key, Key, Modifiers};
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text};
use iced::widget::image::Handle;
use iced::{event, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod media;
mod state;
mod ui;

use api::{ApiClient, UploadEvent};
use config::Config;
use error::ApiError;
use media::scan::{expand_paths, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use media::thumbnail::{generate_thumbnail, ThumbnailPixels};
use state::data::{Asset, AssetKind, DeleteReceipt, StatusSummary};
use state::library::Library;
use state::preview::Preview;
use state::toast::Toasts;
use state::upload::{UploadQueue, UploadStep, UploadTask};

/// Main application state
///
/// One value owns everything the window shows; handlers reach it only
/// through `update`.
struct AdManager {
    config: Config,
    client: ApiClient,
    /// Mirror of the server's ads and status line
    library: Library,
    uploads: UploadQueue,
    preview: Preview,
    toasts: Toasts,
    /// Files dropped on the window that have not formed a batch yet
    dropped: Vec<PathBuf>,
    /// A drag is hovering over the window
    hovering: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the drop zone
    PickFiles,
    /// Files picked, or drops expanded, ready to upload
    FilesSelected(Vec<PathBuf>),
    DragHover(bool),
    /// One file of a (possibly multi-file) window drop
    FileDropped(PathBuf),
    /// No more drop events for this gesture
    DropSettled,
    Upload(UploadEvent),
    /// Refresh button or Ctrl/Cmd+R
    Refresh,
    AdsLoaded(Result<Vec<Asset>, ApiError>),
    StatusLoaded(Result<StatusSummary, ApiError>),
    ThumbnailLoaded(String, Result<Handle, String>),
    Preview(String, AssetKind),
    PreviewLoaded(String, Result<Vec<u8>, ApiError>),
    CloseModal,
    DeleteRequested(String),
    DeleteConfirmed(String, bool),
    Deleted(String, Result<DeleteReceipt, ApiError>),
    ToastExpired(u64),
}

impl AdManager {
    /// Build the application from a validated config
    fn with_config(config: Config) -> Result<Self, error::ConfigError> {
        let client = ApiClient::new(config.server_base()?);

        Ok(AdManager {
            config,
            client,
            library: Library::new(),
            uploads: UploadQueue::new(),
            preview: Preview::new(),
            toasts: Toasts::new(),
            dropped: Vec::new(),
            hovering: false,
        })
    }

    /// Create a new instance of the application and kick off the first load
    fn new(config: Config) -> (Self, Task<Message>) {
        // Config::load validated the URL already
        let mut app = match Self::with_config(config) {
            Ok(app) => app,
            Err(e) => {
                tracing::error!("{e}, using defaults");
                Self::with_config(Config::default()).expect("default config is valid")
            }
        };

        let task = app.reload();
        (app, task)
    }

    /// Handle application messages and update state.
    ///
    /// Any toast raised while handling a message gets its dismissal timer here.
    fn update(&mut self, message: Message) -> Task<Message> {
        let first_new_toast = self.toasts.next_id();
        let task = self.handle(message);

        let timers = self
            .toasts
            .issued_since(first_new_toast)
            .into_iter()
            .map(|id| {
                let delay = self.config.toast_duration();
                Task::perform(
                    async move { tokio::time::sleep(delay).await },
                    move |_| Message::ToastExpired(id),
                )
            });

        Task::batch(std::iter::once(task).chain(timers))
    }

    fn handle(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFiles => Task::perform(pick_files(), Message::FilesSelected),

            Message::FilesSelected(files) => match self.uploads.enqueue(files) {
                Some(task) => self.start_upload(task),
                None => Task::none(),
            },

            Message::DragHover(hovering) => {
                self.hovering = hovering;
                Task::none()
            }

            Message::FileDropped(path) => {
                self.hovering = false;
                let first = self.dropped.is_empty();
                self.dropped.push(path);

                if !first {
                    return Task::none();
                }

                // Multi-file drops arrive as a burst of events, wait for the rest
                let settle = self.config.drop_settle();
                Task::perform(
                    async move { tokio::time::sleep(settle).await },
                    |_| Message::DropSettled,
                )
            }

            Message::DropSettled => {
                let dropped = std::mem::take(&mut self.dropped);
                Task::perform(expand_dropped(dropped), Message::FilesSelected)
            }

            Message::Upload(UploadEvent::Progress(percent)) => {
                self.uploads.set_progress(percent);
                Task::none()
            }

            Message::Upload(UploadEvent::Finished(result)) => {
                match self.uploads.finish(result, &mut self.toasts) {
                    UploadStep::Next(task) => self.start_upload(task),
                    UploadStep::BatchComplete => self.reload(),
                }
            }

            Message::Refresh => self.reload(),

            Message::AdsLoaded(result) => {
                let wanted = self.library.ads_loaded(result, &mut self.toasts);
                Task::batch(
                    wanted
                        .into_iter()
                        .map(|(filename, url)| self.fetch_thumbnail(filename, &url)),
                )
            }

            Message::StatusLoaded(result) => {
                self.library.status_loaded(result);
                Task::none()
            }

            Message::ThumbnailLoaded(filename, result) => {
                match result {
                    Ok(handle) => self.library.set_thumbnail(&filename, handle),
                    Err(e) => tracing::warn!("⚠️  Thumbnail for {filename} failed: {e}"),
                }
                Task::none()
            }

            Message::Preview(filename, kind) => {
                let src = match self.client.file_url(&filename) {
                    Ok(src) => src,
                    Err(e) => {
                        self.toasts.error(format!("❌ {e}"));
                        return Task::none();
                    }
                };

                if !self.preview.open(filename.clone(), kind, src.to_string()) {
                    return Task::none();
                }

                let client = self.client.clone();
                Task::perform(async move { client.fetch_file(src).await }, move |result| {
                    Message::PreviewLoaded(filename.clone(), result)
                })
            }

            Message::PreviewLoaded(filename, result) => {
                match result {
                    Ok(bytes) => self.preview.image_loaded(&filename, Handle::from_bytes(bytes)),
                    Err(e) => {
                        tracing::warn!("⚠️  Preview of {filename} failed: {e}");
                        self.preview.image_failed(&filename, e.to_string());
                    }
                }
                Task::none()
            }

            Message::CloseModal => {
                self.preview.close();
                Task::none()
            }

            Message::DeleteRequested(filename) => {
                Task::perform(confirm_delete(filename.clone()), move |confirmed| {
                    Message::DeleteConfirmed(filename.clone(), confirmed)
                })
            }

            Message::DeleteConfirmed(filename, confirmed) => {
                let Some(filename) = Library::confirm_delete(filename, confirmed) else {
                    return Task::none();
                };

                let client = self.client.clone();
                Task::perform(
                    {
                        let filename = filename.clone();
                        async move { client.delete_ad(&filename).await }
                    },
                    move |result| Message::Deleted(filename.clone(), result),
                )
            }

            Message::Deleted(filename, result) => {
                if Library::delete_finished(&filename, result, &mut self.toasts) {
                    self.reload()
                } else {
                    Task::none()
                }
            }

            Message::ToastExpired(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
        }
    }

    /// Full reload of the ad list and the status line
    fn reload(&mut self) -> Task<Message> {
        self.library.begin_reload();

        let ads = {
            let client = self.client.clone();
            Task::perform(async move { client.list_ads().await }, Message::AdsLoaded)
        };
        let status = {
            let client = self.client.clone();
            Task::perform(async move { client.status().await }, Message::StatusLoaded)
        };

        Task::batch([ads, status])
    }

    fn start_upload(&self, task: UploadTask) -> Task<Message> {
        tracing::info!("📤 Uploading {} ({})", task.name, task.path.display());
        Task::run(self.client.upload(task.path), Message::Upload)
    }

    fn fetch_thumbnail(&self, filename: String, url: &str) -> Task<Message> {
        let url = match self.client.resolve(url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("⚠️  Skipping thumbnail for {filename}: {e}");
                return Task::none();
            }
        };

        let client = self.client.clone();
        let size = self.config.thumbnail_size;

        Task::perform(
            async move {
                let bytes = client.fetch_file(url).await.map_err(|e| e.to_string())?;
                generate_thumbnail(bytes, size)
                    .await
                    .map(ThumbnailPixels::into_handle)
            },
            move |result| Message::ThumbnailLoaded(filename.clone(), result),
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let header = row![
            text("Jetson Ad Manager").size(28),
            horizontal_space(),
            text(self.library.status_line()).size(16),
            button("⟳ Refresh")
                .on_press(Message::Refresh)
                .padding(10),
        ]
        .spacing(20)
        .align_y(Alignment::Center);

        let content = column![
            header,
            ui::upload::upload_section(&self.uploads, self.hovering),
            ui::grid::ads_section(&self.library),
        ]
        .spacing(24)
        .padding(32);

        let base: Element<Message> = container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .into();

        let base = ui::modal::with_preview(base, &self.preview);
        ui::toast::with_toasts(base, &self.toasts)
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            keyboard::on_key_press(shortcut),
            event::listen_with(file_drop),
        ])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Escape closes the preview, Ctrl/Cmd+R reloads
fn shortcut(key: Key, modifiers: Modifiers) -> Option<Message> {
    match key.as_ref() {
        Key::Named(key::Named::Escape) => Some(Message::CloseModal),
        Key::Character("r") if modifiers.control() || modifiers.logo() => Some(Message::Refresh),
        _ => None,
    }
}

/// Window-level drag and drop
fn file_drop(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileHovered(_)) => Some(Message::DragHover(true)),
        Event::Window(window::Event::FilesHoveredLeft) => Some(Message::DragHover(false)),
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    }
}

/// Expand dropped folders off the UI thread; a failed scan drops the batch
async fn expand_dropped(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    tokio::task::spawn_blocking(move || expand_paths(paths))
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("⚠️  Scanning dropped files failed: {e}");
            Vec::new()
        })
}

/// Native multi-file picker; cancelling yields an empty selection
async fn pick_files() -> Vec<PathBuf> {
    let media: Vec<&str> = IMAGE_EXTENSIONS
        .iter()
        .chain(VIDEO_EXTENSIONS)
        .copied()
        .collect();

    AsyncFileDialog::new()
        .set_title("Select images or videos to upload")
        .add_filter("Images and videos", media.as_slice())
        .add_filter("All files", &["*"])
        .pick_files()
        .await
        .map(|files| files.iter().map(|file| file.path().to_path_buf()).collect())
        .unwrap_or_default()
}

/// Native yes/no prompt before deleting
async fn confirm_delete(filename: String) -> bool {
    let answer = AsyncMessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Delete ad")
        .set_description(format!("Are you sure you want to delete \"{filename}\"?"))
        .set_buttons(MessageButtons::YesNo)
        .show()
        .await;

    answer == MessageDialogResult::Yes
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ad_manager=info")),
        )
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::error!("❌ {e}");
        Config::default()
    });

    tracing::info!("🎬 Ad Manager starting against {}", config.server_url);

    iced::application("Jetson Ad Manager", AdManager::update, AdManager::view)
        .subscription(AdManager::subscription)
        .theme(AdManager::theme)
        .window_size((1200.0, 800.0))
        .centered()
        .run_with(move || AdManager::new(config))
}

//! Main application struct and run loop.
//!
//! This module provides the [`App`] struct which orchestrates the editor
//! lifecycle: event handling, state updates, background work and rendering.
//!
//! State updates are synchronous. Anything slow (image loads, exports) or
//! touching the outside world (clipboard, browser) is returned from
//! [`App::update`] as an [`Effect`] and carried out by the run loop.

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{Local, NaiveDate, NaiveDateTime};
use dday_config::{Config, ConfigError};
use dday_protocol::{ImageSource, Message, WidgetConfig, WidgetStyle, embed_link};
use dday_render::thumbnail::{Thumbnail, thumbnail};
use dday_render::{AssetLoader, AssetState, ImageAsset, WidgetRender, render};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    EditorState, Focus,
    clipboard::copy_to_clipboard,
    event::{event_to_message, poll_event},
    export::{ExportJob, run_export},
    layout::{
        FORM_HEIGHT, FORM_WIDTH, HEADER_HEIGHT, LINK_PANEL_HEIGHT, MIN_HEIGHT, MIN_WIDTH,
        PREVIEW_WIDTH, STATUS_BAR_HEIGHT, TOAST_HEIGHT,
    },
    state::ImageCommit,
    terminal::AppTerminal,
    toast::Toast,
    widgets::{
        FrameContent, THUMBNAIL_SIZE, render_form, render_help_overlay, render_link_panel,
        render_preview, render_status_bar, render_toast,
    },
};

/// Work requested by an update, performed by the run loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start loading an image for the preview.
    LoadImage(ImageSource),
    /// Write a PNG of the widget.
    Export(ExportJob),
    /// Put text on the clipboard.
    CopyToClipboard(String),
    /// Open a URL in the default browser.
    OpenInBrowser(String),
}

/// Results of background work, fed back into the loop.
#[derive(Debug)]
pub enum Completion {
    ImageLoaded(ImageAsset),
    Exported(Result<PathBuf, String>),
}

/// A decoded frame thumbnail and the inputs it was made from.
#[derive(Debug)]
struct CachedThumbnail {
    source: ImageSource,
    pixelated: bool,
    /// `None` if the image could not be decoded.
    thumbnail: Option<Thumbnail>,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// The editor application.
#[derive(Debug)]
pub struct App {
    state: EditorState,
    config: Config,
    base_url: Url,
    should_quit: bool,
    /// The current image and its load state. The run loop is the only
    /// writer; exports subscribe to it.
    assets: watch::Sender<Option<ImageAsset>>,
    clock: fn() -> NaiveDateTime,
    thumbnail: Option<CachedThumbnail>,
}

impl App {
    /// Creates the editor, starting on `today` with the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the embed base URL cannot
    /// be used for links.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use dday_config::Config;
    /// use dday_tui::App;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    /// let app = App::new(Config::default(), today).unwrap();
    /// assert_eq!(app.state().config().target_date, today);
    /// ```
    pub fn new(config: Config, today: NaiveDate) -> Result<Self, ConfigError> {
        let base_url = config.embed.url()?;
        let mut widget = WidgetConfig::new(today);
        widget.set_style(config.defaults.style);
        widget.set_theme(config.defaults.theme);
        let (assets, _) = watch::channel(None);

        Ok(Self {
            state: EditorState::new(widget),
            config,
            base_url,
            should_quit: false,
            assets,
            clock: local_now,
            thumbnail: None,
        })
    }

    /// Replaces the wall clock used for the preview and exports.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Updates the application state based on a message.
    ///
    /// When the help overlay is visible, messages other than `Quit` only
    /// dismiss it.
    pub fn update(&mut self, msg: Message) -> Option<Effect> {
        if self.state.help_visible {
            match msg {
                Message::Quit => self.should_quit = true,
                Message::ToggleHelp | Message::Escape => self.state.toggle_help(),
                _ => {
                    let _ = self.state.dismiss_help();
                }
            }
            return None;
        }

        match msg {
            Message::Quit => self.should_quit = true,
            Message::ToggleHelp => self.state.toggle_help(),
            Message::Escape => {
                self.state.dismiss_toast();
            }
            Message::FocusNext => self.state.focus_next(),
            Message::FocusPrev => self.state.focus_prev(),
            Message::Increment => self.state.adjust(true),
            Message::Decrement => self.state.adjust(false),
            Message::CursorLeft => self.state.move_cursor(false),
            Message::CursorRight => self.state.move_cursor(true),
            Message::Input { ch } => self.state.input_char(ch),
            Message::Backspace => self.state.backspace(),
            Message::Commit => return self.commit(),
            Message::Export => return self.export(),
            Message::GenerateLink => self.generate_link(),
            Message::CopyLink => return self.link_effect(Effect::CopyToClipboard),
            Message::OpenLink => return self.link_effect(Effect::OpenInBrowser),
        }
        None
    }

    fn commit(&mut self) -> Option<Effect> {
        if self.state.focus != Focus::Image {
            self.state.revert_focused();
            return None;
        }
        match self.state.commit_image() {
            ImageCommit::Cleared => {
                self.assets.send_replace(None);
                self.thumbnail = None;
                None
            }
            ImageCommit::Network(source) => Some(Effect::LoadImage(source)),
            ImageCommit::Local(source) => {
                self.state.show_toast(Toast::warning(
                    "Local images are not included in embed links",
                ));
                Some(Effect::LoadImage(source))
            }
            ImageCommit::Rejected(e) => {
                self.state.show_toast(Toast::error(format!("Invalid image URL: {e}")));
                None
            }
        }
    }

    fn export(&mut self) -> Option<Effect> {
        if !self.state.begin_export() {
            debug!("Export already in flight, ignoring request");
            return None;
        }
        let render = render(self.state.config(), (self.clock)());
        Some(Effect::Export(ExportJob {
            render,
            settings: self.config.export.clone(),
        }))
    }

    fn generate_link(&mut self) {
        let link = embed_link(&self.base_url, self.state.config());
        debug!(url = %link.url, image_omitted = link.image_omitted, "Embed link generated");
        if link.image_omitted {
            self.state.show_toast(Toast::warning(
                "Link generated without the local image",
            ));
        } else {
            self.state.show_toast(Toast::info("Link generated"));
        }
        self.state.set_link(link);
    }

    fn link_effect(&mut self, effect: fn(String) -> Effect) -> Option<Effect> {
        match self.state.link() {
            Some(link) => Some(effect(link.url.clone())),
            None => {
                self.state
                    .show_toast(Toast::warning("Generate a link first (Ctrl+G)"));
                None
            }
        }
    }

    /// Applies the result of background work.
    ///
    /// Image loads for a source that is no longer current are discarded.
    pub fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::ImageLoaded(asset) => {
                let failure = match &asset.state {
                    AssetState::Failed(e) => Some(e.clone()),
                    _ => None,
                };
                let source = asset.source.clone();
                let applied = self.assets.send_if_modified(|current| {
                    if current.as_ref().is_some_and(|c| c.source == asset.source) {
                        *current = Some(asset);
                        true
                    } else {
                        false
                    }
                });
                if !applied {
                    debug!(source = %source.describe(), "Discarding stale image load");
                    return;
                }
                self.thumbnail = None;
                if let Some(e) = failure {
                    self.state
                        .show_toast(Toast::warning(format!("Image failed to load: {e}")));
                }
            }
            Completion::Exported(result) => {
                self.state.finish_export();
                match result {
                    Ok(path) => self
                        .state
                        .show_toast(Toast::info(format!("Exported {}", path.display()))),
                    Err(e) => self
                        .state
                        .show_toast(Toast::error(format!("Export failed: {e}"))),
                }
            }
        }
    }

    /// Carries out an effect, spawning background work where needed.
    fn perform(
        &mut self,
        effect: Effect,
        loader: &AssetLoader,
        completions: &mpsc::UnboundedSender<Completion>,
    ) {
        match effect {
            Effect::LoadImage(source) => {
                self.assets
                    .send_replace(Some(ImageAsset::pending(source.clone())));
                self.thumbnail = None;
                let loader = loader.clone();
                let completions = completions.clone();
                tokio::spawn(async move {
                    let result = loader.load(&source).await;
                    let _ = completions.send(Completion::ImageLoaded(ImageAsset::settled(
                        source, result,
                    )));
                });
            }
            Effect::Export(job) => {
                let assets = self.assets.subscribe();
                let loader = loader.clone();
                let completions = completions.clone();
                tokio::spawn(async move {
                    let result = run_export(job, assets, loader).await.map_err(|e| {
                        warn!(error = %e, "Export failed");
                        e.to_string()
                    });
                    let _ = completions.send(Completion::Exported(result));
                });
            }
            Effect::CopyToClipboard(text) => match copy_to_clipboard(&mut io::stdout(), &text) {
                Ok(()) => self.state.show_toast(Toast::info("Link copied to clipboard")),
                Err(e) => {
                    warn!(error = %e, "Clipboard write failed");
                    self.state
                        .show_toast(Toast::warning(format!("Could not copy link: {e}")));
                }
            },
            Effect::OpenInBrowser(url) => match open::that_detached(&url) {
                Ok(()) => self.state.show_toast(Toast::info("Opened link in browser")),
                Err(e) => {
                    warn!(error = %e, "Could not open browser");
                    self.state
                        .show_toast(Toast::warning(format!("Could not open browser: {e}")));
                }
            },
        }
    }

    /// Renders the current state to the terminal frame.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.render_terminal_too_small(frame, area);
            return;
        }

        let [header, body, link_area, toast_area, status_area] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(FORM_HEIGHT),
            Constraint::Length(LINK_PANEL_HEIGHT),
            Constraint::Length(TOAST_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(area);
        let [form_area, preview_area] =
            Layout::horizontal([Constraint::Length(FORM_WIDTH), Constraint::Min(PREVIEW_WIDTH)])
                .areas(body);

        self.render_header(frame, header);

        let widget = render(self.state.config(), (self.clock)());
        self.refresh_thumbnail(&widget);
        let content = self.frame_content(&widget);

        let buf = frame.buffer_mut();
        render_form(&self.state, form_area, buf);
        render_preview(&widget, content, preview_area, buf);
        render_link_panel(&self.state, link_area, buf);
        render_toast(self.state.toast(), toast_area, buf);
        render_status_bar(&self.state, status_area, buf);

        if self.state.help_visible {
            render_help_overlay(area, buf);
        }
    }

    /// Decodes the frame thumbnail once the current image has loaded.
    fn refresh_thumbnail(&mut self, widget: &WidgetRender) {
        let Some(source) = widget.image_source() else {
            return;
        };
        let pixelated = widget.style == WidgetStyle::Pixel;
        if self
            .thumbnail
            .as_ref()
            .is_some_and(|c| &c.source == source && c.pixelated == pixelated)
        {
            return;
        }

        let decoded = {
            let assets = self.assets.borrow();
            let Some(image) = assets
                .as_ref()
                .filter(|a| &a.source == source)
                .and_then(|a| a.state.loaded())
            else {
                return;
            };
            thumbnail(image, THUMBNAIL_SIZE, THUMBNAIL_SIZE, pixelated)
                .map_err(|e| warn!(source = %source.describe(), error = %e, "Image could not be decoded"))
                .ok()
        };
        self.thumbnail = Some(CachedThumbnail {
            source: source.clone(),
            pixelated,
            thumbnail: decoded,
        });
    }

    fn frame_content(&self, widget: &WidgetRender) -> FrameContent<'_> {
        let Some(source) = widget.image_source() else {
            return FrameContent::Placeholder;
        };
        let settled = self
            .assets
            .borrow()
            .as_ref()
            .is_some_and(|a| a.is_settled_for(source));
        if !settled {
            return FrameContent::Loading;
        }
        let pixelated = widget.style == WidgetStyle::Pixel;
        self.thumbnail
            .as_ref()
            .filter(|c| &c.source == source && c.pixelated == pixelated)
            .and_then(|c| c.thumbnail.as_ref())
            .map_or(FrameContent::Empty, FrameContent::Image)
    }

    /// Renders a message indicating the terminal is too small.
    fn render_terminal_too_small(&self, frame: &mut Frame, area: Rect) {
        let message = format!(
            "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );

        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });

        let vertical_offset = area.height.saturating_sub(2) / 2;
        let centered_area = Rect {
            x: area.x,
            y: area.y + vertical_offset,
            width: area.width,
            height: area.height.saturating_sub(vertical_offset),
        };

        frame.render_widget(paragraph, centered_area);
    }

    /// Renders the header bar with title and help cue.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, help_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(12)]).areas(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "dday",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled("D-Day widget editor", Style::default().fg(Color::White)),
        ]));
        frame.render_widget(title, title_area);

        let help_cue = Paragraph::new(Line::from(vec![
            Span::styled("F1", Style::default().fg(Color::Yellow)),
            Span::styled(" for help", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(help_cue, help_area);
    }

    /// Runs the main application loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail or the image loader
    /// cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::Local;
    /// use dday_config::Config;
    /// use dday_tui::{App, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(Config::default(), Local::now().date_naive())?;
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        let loader = AssetLoader::new(self.config.images.timeout(), self.config.images.max_bytes)?;
        let (completions, mut completed) = mpsc::unbounded_channel();

        if let Some(source) = self.state.config().image.clone() {
            self.perform(Effect::LoadImage(source), &loader, &completions);
        }
        info!("Editor started");

        loop {
            self.state.expire_toast(Instant::now());
            terminal.draw(|frame| self.view(frame))?;

            if let Some(msg) = poll_event()?.as_ref().and_then(event_to_message) {
                if let Some(effect) = self.update(msg) {
                    self.perform(effect, &loader, &completions);
                }
            }

            while let Ok(completion) = completed.try_recv() {
                self.complete(completion);
            }

            if self.should_quit {
                break;
            }
        }

        info!("Editor closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dday_protocol::{LocalImage, Palette, ThemeColor};
    use dday_render::LoadedImage;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::toast::ToastLevel;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 20)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn app() -> App {
        App::new(Config::default(), today())
            .unwrap()
            .with_clock(fixed_now)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.update(Message::Input { ch });
        }
    }

    fn focus_image(app: &mut App) {
        while app.state.focus != Focus::Image {
            app.update(Message::FocusNext);
        }
    }

    fn toast_level(app: &App) -> Option<ToastLevel> {
        app.state.toast().map(|t| t.level)
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn new_applies_configured_defaults() {
        let mut config = Config::default();
        config.defaults.style = WidgetStyle::Pixel;
        config.defaults.theme = ThemeColor::Preset(Palette::Pink);

        let app = App::new(config, today()).unwrap();

        assert_eq!(app.state.config().style, WidgetStyle::Pixel);
        assert_eq!(app.state.config().theme, ThemeColor::Preset(Palette::Pink));
        assert_eq!(app.state.config().target_date, today());
        assert!(!app.should_quit());
    }

    #[test]
    fn new_rejects_unusable_base_url() {
        let mut config = Config::default();
        config.embed.base_url = "file:///tmp/embed".to_string();
        assert!(matches!(
            App::new(config, today()),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn quit_message_sets_should_quit() {
        let mut app = app();
        assert_eq!(app.update(Message::Quit), None);
        assert!(app.should_quit());
    }

    #[test]
    fn help_intercepts_messages() {
        let mut app = app();
        app.update(Message::ToggleHelp);
        assert!(app.state.help_visible);

        app.update(Message::Increment);
        assert!(!app.state.help_visible);
        assert_eq!(app.state.config().target_date, today());

        app.update(Message::ToggleHelp);
        app.update(Message::Escape);
        assert!(!app.state.help_visible);
    }

    #[test]
    fn quit_works_while_help_is_visible() {
        let mut app = app();
        app.update(Message::ToggleHelp);
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn escape_dismisses_toast() {
        let mut app = app();
        app.update(Message::CopyLink);
        assert!(app.state.toast().is_some());
        app.update(Message::Escape);
        assert!(app.state.toast().is_none());
    }

    #[test]
    fn arrows_edit_the_focused_field() {
        let mut app = app();
        app.update(Message::Increment);
        assert_eq!(
            app.state.config().target_date,
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
        );

        app.update(Message::FocusNext);
        app.update(Message::CursorRight);
        assert_eq!(app.state.config().style, WidgetStyle::Dimensional);
    }

    #[test]
    fn commit_on_text_field_reverts_invalid_text() {
        let mut app = app();
        app.update(Message::Backspace);
        assert!(app.state.date_input_pending());

        assert_eq!(app.update(Message::Commit), None);
        assert!(!app.state.date_input_pending());
        assert_eq!(app.state.date_input().value(), "2024-01-15");
    }

    #[test]
    fn committing_an_image_url_loads_it() {
        let mut app = app();
        focus_image(&mut app);
        type_text(&mut app, "https://example.com/cat.png");

        let effect = app.update(Message::Commit);

        let expected = ImageSource::network("https://example.com/cat.png").unwrap();
        assert_eq!(effect, Some(Effect::LoadImage(expected)));
        assert!(app.state.toast().is_none());
    }

    #[test]
    fn committing_a_local_path_warns_about_links() {
        let mut app = app();
        focus_image(&mut app);
        type_text(&mut app, "/tmp/cat.png");

        let effect = app.update(Message::Commit);

        assert_eq!(
            effect,
            Some(Effect::LoadImage(ImageSource::file("/tmp/cat.png")))
        );
        assert_eq!(toast_level(&app), Some(ToastLevel::Warning));
    }

    #[test]
    fn committing_a_bad_url_keeps_the_image() {
        let mut app = app();
        let before = app.state.config().image.clone();
        focus_image(&mut app);
        type_text(&mut app, "https://");

        assert_eq!(app.update(Message::Commit), None);
        assert_eq!(app.state.config().image, before);
        assert_eq!(toast_level(&app), Some(ToastLevel::Error));
    }

    #[test]
    fn clearing_the_image_resets_the_asset() {
        let mut app = app();
        app.assets
            .send_replace(Some(ImageAsset::pending(ImageSource::Local(LocalImage::Bundled))));
        focus_image(&mut app);

        assert_eq!(app.update(Message::Commit), None);
        assert_eq!(app.state.config().image, None);
        assert!(app.assets.borrow().is_none());
    }

    #[test]
    fn export_captures_a_render_once() {
        let mut app = app();

        let Some(Effect::Export(job)) = app.update(Message::Export) else {
            panic!("expected an export effect");
        };
        assert_eq!(job.render.label, "D+5");
        assert_eq!(job.render.caption, "SAT JAN 20");
        assert_eq!(job.settings, app.config.export);
        assert!(app.state.is_exporting());

        assert_eq!(app.update(Message::Export), None);
    }

    #[test]
    fn export_completion_clears_flag_and_reports() {
        let mut app = app();
        let _ = app.update(Message::Export);

        app.complete(Completion::Exported(Ok(PathBuf::from("/tmp/w.png"))));
        assert!(!app.state.is_exporting());
        assert!(app.state.toast().unwrap().message.contains("/tmp/w.png"));

        let _ = app.update(Message::Export);
        app.complete(Completion::Exported(Err("disk full".to_string())));
        assert!(!app.state.is_exporting());
        assert_eq!(toast_level(&app), Some(ToastLevel::Error));
    }

    #[test]
    fn generate_link_uses_base_url() {
        let mut app = app();
        app.update(Message::GenerateLink);

        let link = app.state.link().unwrap();
        assert!(link.url.starts_with("https://dday.example/embed?"));
        // The bundled placeholder is local.
        assert!(link.image_omitted);
        assert_eq!(toast_level(&app), Some(ToastLevel::Warning));
    }

    #[test]
    fn link_actions_need_a_link() {
        let mut app = app();
        assert_eq!(app.update(Message::CopyLink), None);
        assert_eq!(toast_level(&app), Some(ToastLevel::Warning));
        assert_eq!(app.update(Message::OpenLink), None);

        app.update(Message::GenerateLink);
        let url = app.state.link().unwrap().url.clone();
        assert_eq!(
            app.update(Message::CopyLink),
            Some(Effect::CopyToClipboard(url.clone()))
        );
        assert_eq!(app.update(Message::OpenLink), Some(Effect::OpenInBrowser(url)));
    }

    #[test]
    fn stale_image_loads_are_discarded() {
        let mut app = app();
        let current = ImageSource::file("/tmp/new.png");
        app.assets
            .send_replace(Some(ImageAsset::pending(current.clone())));

        app.complete(Completion::ImageLoaded(ImageAsset::settled(
            ImageSource::Local(LocalImage::Bundled),
            Ok(LoadedImage::bundled()),
        )));

        assert_eq!(app.assets.borrow().clone(), Some(ImageAsset::pending(current)));
    }

    #[test]
    fn failed_load_of_current_image_warns() {
        let mut app = app();
        let current = ImageSource::file("/tmp/missing.png");
        app.assets
            .send_replace(Some(ImageAsset::pending(current.clone())));

        app.complete(Completion::ImageLoaded(ImageAsset {
            source: current,
            state: AssetState::Failed("not found".to_string()),
        }));

        assert_eq!(toast_level(&app), Some(ToastLevel::Warning));
        assert!(app.assets.borrow().as_ref().unwrap().state.is_settled());
    }

    #[test]
    fn frame_shows_loading_until_settled() {
        let mut app = app();
        let bundled = ImageSource::Local(LocalImage::Bundled);
        let widget = render(app.state.config(), fixed_now());

        app.assets.send_replace(Some(ImageAsset::pending(bundled.clone())));
        assert_eq!(app.frame_content(&widget), FrameContent::Loading);

        app.complete(Completion::ImageLoaded(ImageAsset::settled(
            bundled,
            Ok(LoadedImage::bundled()),
        )));
        app.refresh_thumbnail(&widget);
        assert!(matches!(app.frame_content(&widget), FrameContent::Image(_)));
    }

    #[test]
    fn view_shows_too_small_message() {
        let mut app = app();
        let content = draw(&mut app, MIN_WIDTH - 1, MIN_HEIGHT);
        assert!(content.contains("Terminal too small"));

        let content = draw(&mut app, MIN_WIDTH, MIN_HEIGHT - 1);
        assert!(content.contains("Terminal too small"));
    }

    #[test]
    fn view_renders_editor_at_minimum_size() {
        let mut app = app();
        let content = draw(&mut app, MIN_WIDTH, MIN_HEIGHT);

        assert!(!content.contains("Terminal too small"));
        assert!(content.contains("D-Day widget editor"));
        assert!(content.contains("D-DAY DATE"));
        assert!(content.contains("Press Ctrl+G"));
        assert!(content.contains("D + 5"));
    }

    #[test]
    fn view_draws_help_on_top() {
        let mut app = app();
        app.update(Message::ToggleHelp);
        let content = draw(&mut app, 100, 30);
        assert!(content.contains("Press any key to close"));
    }
}

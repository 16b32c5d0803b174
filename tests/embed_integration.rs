//! Links generated by the editor decode back to the same widget in the
//! embed host.

use chrono::{FixedOffset, NaiveDate, TimeZone};
use dday_config::Config;
use dday_protocol::link::embed_link_in;
use dday_protocol::{ImageSource, Message, Palette, ThemeColor, WidgetStyle};
use dday_render::AssetLoader;
use dday_tui::{App, Effect, EmbedHost};
use tempfile::TempDir;

fn seoul() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn edited_widget_survives_the_link() {
    let mut app = App::new(Config::default(), day(2024, 12, 1)).unwrap();
    for _ in 0..24 {
        app.update(Message::Increment);
    }
    app.update(Message::FocusNext);
    app.update(Message::CursorRight);
    app.update(Message::CursorRight);
    app.update(Message::FocusNext);
    app.update(Message::Increment);
    app.update(Message::Increment);
    app.update(Message::FocusNext);
    for ch in "https://example.com/tree.png".chars() {
        app.update(Message::Input { ch });
    }
    assert!(matches!(app.update(Message::Commit), Some(Effect::LoadImage(_))));

    let edited = app.state().config().clone();
    assert_eq!(edited.target_date, day(2024, 12, 25));
    assert_eq!(edited.style, WidgetStyle::Pixel);
    assert_eq!(edited.theme, ThemeColor::Preset(Palette::Mint));

    let base = Config::default().embed.url().unwrap();
    let link = embed_link_in(&base, &edited, &seoul());
    assert!(!link.image_omitted);

    let now = seoul().with_ymd_and_hms(2024, 12, 20, 23, 30, 0).unwrap();
    let host = EmbedHost::from_link(&link.url, &now);
    assert_eq!(host.config(), &edited);
    assert_eq!(host.render(now.naive_local()).label, "D-5");
}

#[test]
fn local_images_are_left_out_of_links() {
    let mut app = App::new(Config::default(), day(2024, 12, 1)).unwrap();
    for _ in 0..3 {
        app.update(Message::FocusNext);
    }
    for ch in "/tmp/photo.png".chars() {
        app.update(Message::Input { ch });
    }
    let _ = app.update(Message::Commit);
    app.update(Message::GenerateLink);

    let link = app.state().link().unwrap().clone();
    assert!(link.image_omitted);
    assert!(!link.url.contains("image="));

    let now = seoul().with_ymd_and_hms(2024, 12, 1, 9, 0, 0).unwrap();
    let host = EmbedHost::from_link(&link.url, &now);
    assert_eq!(host.config().image, None);
}

#[test]
fn unusable_image_parameter_is_dropped() {
    let now = seoul().with_ymd_and_hms(2024, 12, 1, 9, 0, 0).unwrap();
    let host = EmbedHost::from_link(
        "https://dday.example/embed?style=flat&image=blob%3Ahttps%3A%2F%2Fx.test%2F1",
        &now,
    );
    assert_eq!(host.config().image, None);
    assert_eq!(host.config().style, WidgetStyle::Flat);

    let with_image = EmbedHost::from_link("image=https%3A%2F%2Fx.test%2Fa.png", &now);
    assert_eq!(
        with_image.config().image,
        Some(ImageSource::network("https://x.test/a.png").unwrap())
    );
}

#[tokio::test]
async fn embed_writes_svg_from_link() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("widget.svg");
    let now = seoul().with_ymd_and_hms(2024, 12, 20, 9, 0, 0).unwrap();
    let host = EmbedHost::from_link("?date=2024-12-25&theme=pink", &now);
    let loader = AssetLoader::new(AssetLoader::DEFAULT_TIMEOUT, AssetLoader::DEFAULT_MAX_BYTES)
        .unwrap();

    host.write_file(&path, now.naive_local(), &loader, 1)
        .await
        .unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("D-5"));
    assert!(svg.contains("FRI DEC 20"));
}

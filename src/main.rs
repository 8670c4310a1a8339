// Width Percent - Percentage breakdowns of base widths with design-token export

#![warn(clippy::all)]
#![windows_subsystem = "windows"]

mod app;
mod columns;
mod export;
mod file_ops;
mod percent;
mod security;
mod settings;
mod theme;
mod types;

use app::WidthPercent;
use iced::{application, Font, Settings, Size};
use theme::{WINDOW_HEIGHT, WINDOW_WIDTH};
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting Width Percent");

    application("Width Percent", WidthPercent::update, WidthPercent::view)
        .theme(WidthPercent::theme)
        .subscription(WidthPercent::subscription)
        .settings(Settings {
            default_font: Font::DEFAULT,
            default_text_size: theme::FONT_MD.into(),
            antialiasing: true,
            ..Settings::default()
        })
        .window_size(Size::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .run_with(WidthPercent::new)
}

// Application state and iced GUI implementation

use crate::columns::ColumnSet;
use crate::export::{package, select_widths, ExportError, ExportPackage, ExportRange};
use crate::file_ops::save_package;
use crate::percent::compute_full;
use crate::security::{can_write_export, validate_prefix};
use crate::settings::{load_settings, save_settings, Settings, SqliteStore};
use crate::theme::{
    COLOR_ERROR, COLOR_INFO, COLOR_MUTED_DARK, COLOR_SUCCESS, DEFAULT_BASE_WIDTH,
    DEFAULT_RANGE_MAX, DEFAULT_RANGE_MIN, FONT_LG, FONT_MD, FONT_SM, FONT_XL,
    MAX_WIDTH_INPUT_LENGTH, NOTIFICATION_DURATION, PERCENT_COLUMN_WIDTH, PRESET_WIDTHS,
    SPACING_LG, SPACING_MD, SPACING_SM, SPACING_XS, TABLE_HEIGHT, VALUE_COLUMN_WIDTH,
};
use crate::types::{BaseWidth, ExportMode, Notifier, PercentEntry, ResultTab, Severity};
use iced::widget::{
    button, column, container, horizontal_rule, horizontal_space, pick_list, row, scrollable,
    text, text_input, Column, Row,
};
use iced::{keyboard, time, Center, Element, Fill, Subscription, Task, Theme};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

pub struct WidthPercent {
    base_width: String,
    columns: ColumnSet<SqliteStore>,
    store: SqliteStore,
    active_tab: ResultTab,
    dark_mode: bool,
    export_open: bool,
    export_mode: ExportMode,
    export_range: ExportRange,
    range_min_input: String,
    range_max_input: String,
    file_prefix: String,
    pending_export: Option<ExportPackage>,
    exporting: bool,
    notification: Option<Notification>,
}

struct Notification {
    message: String,
    severity: Severity,
    shown_at: Instant,
}

// A column in the result table
struct DisplayColumn {
    width: BaseWidth,
    is_current: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    BaseWidthChanged(String),
    PresetSelected(u32),
    SaveCurrent,
    ResetColumns,
    ResetConfirmed(bool),
    RemoveColumn(BaseWidth),
    TabSelected(ResultTab),
    CopyValue(f64),
    ToggleTheme,
    SettingsSaved,
    ToggleExportPanel,
    ExportModeChanged(ExportMode),
    RangeMinChanged(String),
    RangeMaxChanged(String),
    PrefixChanged(String),
    Export,
    DestinationSelected(Option<PathBuf>),
    ExportCompleted(Result<PathBuf, String>),
    NotificationTick,
    KeyboardEvent(keyboard::Key, keyboard::Modifiers),
}

impl Notifier for WidthPercent {
    fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        match severity {
            Severity::Success => info!(%message, "notification"),
            Severity::Error => warn!(%message, "notification"),
        }
        self.notification = Some(Notification {
            message,
            severity,
            shown_at: Instant::now(),
        });
    }
}

impl WidthPercent {
    // Creates new app instance, restores saved columns and settings
    pub fn new() -> (Self, Task<Message>) {
        let store = SqliteStore::default_location();
        info!(path = ?store.path(), "using settings store");
        let settings = load_settings(&store);
        let columns = ColumnSet::restore(store.clone());
        let export_range = ExportRange::default();
        (
            Self {
                base_width: DEFAULT_BASE_WIDTH.to_string(),
                columns,
                store,
                active_tab: ResultTab::All,
                dark_mode: settings.dark_mode,
                export_open: false,
                export_mode: ExportMode::All,
                export_range,
                range_min_input: DEFAULT_RANGE_MIN.to_string(),
                range_max_input: DEFAULT_RANGE_MAX.to_string(),
                file_prefix: String::new(),
                pending_export: None,
                exporting: false,
                notification: None,
            },
            Task::none(),
        )
    }

    // Saves settings asynchronously
    fn save_settings_async(&self) -> Task<Message> {
        let store = self.store.clone();
        let settings = Settings {
            dark_mode: self.dark_mode,
        };
        Task::perform(
            async move {
                save_settings(&store, &settings);
            },
            |()| Message::SettingsSaved,
        )
    }

    fn current_width(&self) -> Option<BaseWidth> {
        BaseWidth::parse(&self.base_width).ok()
    }

    fn export_widths(&self) -> Vec<BaseWidth> {
        select_widths(self.export_mode, self.current_width(), &self.columns)
    }

    fn display_columns(&self) -> Vec<DisplayColumn> {
        let current = self.current_width();
        match self.active_tab {
            ResultTab::All => select_widths(ExportMode::All, current, &self.columns)
                .into_iter()
                .map(|width| DisplayColumn {
                    width,
                    is_current: Some(width) == current && !self.columns.contains(width),
                })
                .collect(),
            ResultTab::Current => current
                .map(|width| DisplayColumn {
                    width,
                    is_current: true,
                })
                .into_iter()
                .collect(),
            ResultTab::Saved => self
                .columns
                .widths()
                .map(|width| DisplayColumn {
                    width,
                    is_current: false,
                })
                .collect(),
        }
    }

    pub fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let keyboard_sub = iced::event::listen_with(|event, _status, _id| {
            if let iced::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) = event
            {
                Some(Message::KeyboardEvent(key, modifiers))
            } else {
                None
            }
        });

        let notification_sub = if self.notification.is_some() {
            time::every(Duration::from_millis(250)).map(|_| Message::NotificationTick)
        } else {
            Subscription::none()
        };

        Subscription::batch([keyboard_sub, notification_sub])
    }

    // Handles all application messages
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::KeyboardEvent(key, modifiers) => {
                match key {
                    keyboard::Key::Character(c) if modifiers.control() && c.as_str() == "s" => {
                        return self.update(Message::SaveCurrent);
                    }
                    keyboard::Key::Character(c) if modifiers.control() && c.as_str() == "e" => {
                        if self.export_open {
                            return self.update(Message::Export);
                        }
                        self.export_open = true;
                    }
                    keyboard::Key::Named(keyboard::key::Named::Escape) => {
                        self.export_open = false;
                    }
                    _ => {}
                }
                Task::none()
            }
            Message::NotificationTick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|n| n.shown_at.elapsed() >= NOTIFICATION_DURATION)
                {
                    self.notification = None;
                }
                Task::none()
            }
            Message::SettingsSaved => Task::none(),
            Message::ToggleTheme => {
                self.dark_mode = !self.dark_mode;
                self.save_settings_async()
            }
            Message::BaseWidthChanged(value) => {
                self.base_width = value.chars().take(MAX_WIDTH_INPUT_LENGTH).collect();
                Task::none()
            }
            Message::PresetSelected(width) => {
                self.base_width = width.to_string();
                Task::none()
            }
            Message::SaveCurrent => {
                match BaseWidth::parse(&self.base_width) {
                    Ok(width) => match self.columns.add(width) {
                        Ok(()) => {
                            self.notify("Current result saved", Severity::Success);
                            self.active_tab = ResultTab::Current;
                        }
                        Err(e) => self.notify(e.to_string(), Severity::Error),
                    },
                    Err(e) => self.notify(e.to_string(), Severity::Error),
                }
                Task::none()
            }
            Message::ResetColumns => {
                if self.columns.is_empty() {
                    return Task::none();
                }
                Task::perform(
                    async {
                        rfd::AsyncMessageDialog::new()
                            .set_title("Reset Saved Columns")
                            .set_description("Remove all saved columns?")
                            .set_buttons(rfd::MessageButtons::YesNo)
                            .show()
                            .await
                            == rfd::MessageDialogResult::Yes
                    },
                    Message::ResetConfirmed,
                )
            }
            Message::ResetConfirmed(confirmed) => {
                if confirmed {
                    self.columns.reset_all();
                    self.notify("All saved columns reset", Severity::Success);
                }
                Task::none()
            }
            Message::RemoveColumn(width) => {
                if self.columns.remove(width) {
                    self.notify(format!("Removed {}px column", width), Severity::Success);
                }
                Task::none()
            }
            Message::TabSelected(tab) => {
                self.active_tab = tab;
                Task::none()
            }
            Message::CopyValue(value) => {
                self.notify(format!("Copied {}", value), Severity::Success);
                iced::clipboard::write(value.to_string())
            }
            Message::ToggleExportPanel => {
                self.export_open = !self.export_open;
                Task::none()
            }
            Message::ExportModeChanged(mode) => {
                self.export_mode = mode;
                Task::none()
            }
            Message::RangeMinChanged(value) => {
                if let Ok(min) = value.trim().parse::<i64>() {
                    self.export_range = self.export_range.with_min(min);
                }
                self.range_min_input = value;
                Task::none()
            }
            Message::RangeMaxChanged(value) => {
                if let Ok(max) = value.trim().parse::<i64>() {
                    self.export_range = self.export_range.with_max(max);
                }
                self.range_max_input = value;
                Task::none()
            }
            Message::PrefixChanged(prefix) => {
                self.file_prefix = prefix;
                Task::none()
            }
            Message::Export => self.start_export(),
            Message::DestinationSelected(path) => {
                let (Some(path), Some(pkg)) = (path, self.pending_export.take()) else {
                    self.exporting = false;
                    return Task::none();
                };
                if !can_write_export(&path) {
                    self.exporting = false;
                    self.notify(
                        format!("Access denied: {}", path.display()),
                        Severity::Error,
                    );
                    return Task::none();
                }
                Task::perform(
                    async move { save_package(pkg, path).await.map_err(|e| format!("{:#}", e)) },
                    Message::ExportCompleted,
                )
            }
            Message::ExportCompleted(result) => {
                self.exporting = false;
                match result {
                    Ok(path) => {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_default();
                        self.notify(format!("Exported {}", name), Severity::Success);
                        self.export_open = false;
                    }
                    Err(e) => {
                        error!(error = %e, "export failed");
                        self.notify("Export failed, please try again", Severity::Error);
                    }
                }
                Task::none()
            }
        }
    }

    // Packages the selected widths and asks where to save them
    fn start_export(&mut self) -> Task<Message> {
        if self.exporting {
            return Task::none();
        }
        self.range_min_input = self.export_range.min().to_string();
        self.range_max_input = self.export_range.max().to_string();

        let widths = self.export_widths();
        if widths.len() > 1 {
            if let Err(e) = validate_prefix(&self.file_prefix) {
                self.notify(e, Severity::Error);
                return Task::none();
            }
        }

        let pkg = match package(&widths, self.export_range, Some(&self.file_prefix)) {
            Ok(pkg) => pkg,
            Err(ExportError::Empty) => {
                self.notify("No data to export", Severity::Error);
                return Task::none();
            }
            Err(e) => {
                self.notify(e.to_string(), Severity::Error);
                return Task::none();
            }
        };

        info!(
            files = pkg.file_count(),
            filename = pkg.filename(),
            "export packaged"
        );
        let filename = pkg.filename().to_string();
        let is_archive = matches!(pkg, ExportPackage::Archive { .. });
        self.pending_export = Some(pkg);
        self.exporting = true;

        Task::perform(
            async move {
                let (filter_name, extension) = if is_archive {
                    ("Zip archive", "zip")
                } else {
                    ("JSON", "json")
                };
                rfd::AsyncFileDialog::new()
                    .set_title("Save Export")
                    .set_file_name(filename)
                    .add_filter(filter_name, &[extension])
                    .save_file()
                    .await
                    .map(|f| f.path().to_path_buf())
            },
            Message::DestinationSelected,
        )
    }

    // Renders main application view
    pub fn view(&self) -> Element<'_, Message> {
        let mut content = column![
            self.view_header(),
            self.view_width_input(),
            self.view_presets(),
        ]
        .spacing(SPACING_MD);

        if self.export_open {
            content = content.push(self.view_export_panel());
        }

        content = content
            .push(self.view_tabs())
            .push(self.view_table())
            .push(self.view_status());

        container(content.padding(SPACING_LG))
            .width(Fill)
            .height(Fill)
            .into()
    }

    fn view_header(&self) -> Element<'_, Message> {
        let theme_label = if self.dark_mode {
            "Light Mode"
        } else {
            "Dark Mode"
        };
        let export_label = if self.export_open {
            "Close Export"
        } else {
            "Export"
        };
        row![
            text("Width Percent").size(FONT_XL),
            horizontal_space(),
            button(export_label)
                .on_press(Message::ToggleExportPanel)
                .style(button::primary),
            button(theme_label)
                .on_press(Message::ToggleTheme)
                .style(button::secondary),
        ]
        .spacing(SPACING_SM)
        .align_y(Center)
        .into()
    }

    fn view_width_input(&self) -> Element<'_, Message> {
        row![
            column![
                text("Base width (px):").size(FONT_SM),
                text_input("1000", &self.base_width)
                    .on_input(Message::BaseWidthChanged)
                    .on_submit(Message::SaveCurrent)
                    .width(250)
            ]
            .spacing(SPACING_SM),
            button(text("Save Current (Ctrl+S)").size(FONT_MD))
                .on_press(Message::SaveCurrent)
                .style(button::success),
            button(text("Reset Saved").size(FONT_MD))
                .on_press(Message::ResetColumns)
                .style(button::danger),
        ]
        .spacing(SPACING_MD)
        .align_y(iced::Alignment::End)
        .into()
    }

    fn view_presets(&self) -> Element<'_, Message> {
        let current = self.current_width().map(BaseWidth::get);
        let presets: Vec<Element<'_, Message>> = PRESET_WIDTHS
            .iter()
            .map(|&width| {
                let btn = button(text(format!("{}px", width)).size(FONT_SM))
                    .on_press(Message::PresetSelected(width));
                if current == Some(f64::from(width)) {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::secondary).into()
                }
            })
            .collect();

        row![
            text("Common widths:").size(FONT_SM),
            Row::with_children(presets).spacing(SPACING_SM)
        ]
        .spacing(SPACING_MD)
        .align_y(Center)
        .into()
    }

    fn view_export_panel(&self) -> Element<'_, Message> {
        let widths = self.export_widths();

        let mut controls = row![
            column![
                text("Export:").size(FONT_SM),
                pick_list(
                    vec![ExportMode::All, ExportMode::Saved],
                    Some(self.export_mode),
                    Message::ExportModeChanged
                )
                .width(180)
            ]
            .spacing(SPACING_SM),
            column![
                text("Min %:").size(FONT_SM),
                text_input("1", &self.range_min_input)
                    .on_input(Message::RangeMinChanged)
                    .width(70)
            ]
            .spacing(SPACING_SM),
            column![
                text("Max %:").size(FONT_SM),
                text_input("100", &self.range_max_input)
                    .on_input(Message::RangeMaxChanged)
                    .width(70)
            ]
            .spacing(SPACING_SM),
        ]
        .spacing(SPACING_LG)
        .align_y(Center);

        // The prefix only names files inside an archive
        if widths.len() > 1 {
            controls = controls.push(
                column![
                    text("File prefix:").size(FONT_SM),
                    text_input("e.g. brand", &self.file_prefix)
                        .on_input(Message::PrefixChanged)
                        .on_submit(Message::Export)
                        .width(200)
                ]
                .spacing(SPACING_SM),
            );
        }

        let export_label = if self.exporting {
            "Exporting..."
        } else {
            "Export (Ctrl+E)"
        };
        controls = controls.push(horizontal_space()).push(
            button(text(export_label).size(FONT_LG))
                .on_press_maybe((!self.exporting).then_some(Message::Export))
                .style(button::success),
        );

        let summary = match widths.len() {
            0 => "Nothing to export".to_string(),
            1 => format!(
                "{}%-{}% of {}px as one JSON file",
                self.export_range.min(),
                self.export_range.max(),
                widths[0]
            ),
            n => format!(
                "{}%-{}% of {} widths as a zip archive",
                self.export_range.min(),
                self.export_range.max(),
                n
            ),
        };

        container(
            column![
                text("Export").size(FONT_LG),
                horizontal_rule(1),
                controls,
                text(summary).size(FONT_SM).color(COLOR_MUTED_DARK),
            ]
            .spacing(SPACING_MD),
        )
        .padding(SPACING_MD)
        .style(container::rounded_box)
        .width(Fill)
        .into()
    }

    fn view_tabs(&self) -> Element<'_, Message> {
        let tabs: Vec<Element<'_, Message>> = [ResultTab::All, ResultTab::Current, ResultTab::Saved]
            .into_iter()
            .map(|tab| {
                let label = match (tab, self.current_width()) {
                    (ResultTab::Current, Some(width)) => format!("{} ({}px)", tab, width),
                    (ResultTab::Saved, _) => format!("{} ({})", tab, self.columns.len()),
                    _ => tab.to_string(),
                };
                let btn = button(text(label).size(FONT_SM)).on_press(Message::TabSelected(tab));
                if self.active_tab == tab {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::secondary).into()
                }
            })
            .collect();

        Row::with_children(tabs).spacing(SPACING_XS).into()
    }

    fn view_table(&self) -> Element<'_, Message> {
        let columns = self.display_columns();
        if columns.is_empty() {
            let hint = match self.active_tab {
                ResultTab::Saved => "No saved columns. Enter a width and click 'Save Current'.",
                _ => "Enter a valid base width to see results.",
            };
            return container(text(hint).size(FONT_SM))
                .padding(SPACING_MD)
                .height(TABLE_HEIGHT)
                .into();
        }

        let tables: Vec<Vec<PercentEntry>> = columns.iter().map(|c| compute_full(c.width)).collect();

        let mut header: Vec<Element<'_, Message>> = vec![text("%")
            .size(FONT_SM)
            .width(PERCENT_COLUMN_WIDTH)
            .into()];
        header.extend(columns.iter().map(|c| self.view_column_header(c)));

        let rows: Vec<Element<'_, Message>> = tables[0]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let mut cells: Vec<Element<'_, Message>> = vec![text(format!("{}%", entry.percent))
                    .size(FONT_SM)
                    .color(COLOR_MUTED_DARK)
                    .width(PERCENT_COLUMN_WIDTH)
                    .into()];
                cells.extend(tables.iter().map(|table| {
                    let value = table[i].value;
                    button(text(value.to_string()).size(FONT_SM))
                        .width(VALUE_COLUMN_WIDTH)
                        .style(button::text)
                        .on_press(Message::CopyValue(value))
                        .into()
                }));
                Row::with_children(cells)
                    .spacing(SPACING_SM)
                    .align_y(Center)
                    .into()
            })
            .collect();

        column![
            Row::with_children(header)
                .spacing(SPACING_SM)
                .align_y(Center),
            horizontal_rule(1),
            scrollable(Column::with_children(rows).spacing(SPACING_XS)).height(TABLE_HEIGHT),
        ]
        .spacing(SPACING_SM)
        .width(Fill)
        .into()
    }

    fn view_column_header(&self, column: &DisplayColumn) -> Element<'_, Message> {
        let label = if column.is_current {
            format!("{}px (current)", column.width)
        } else {
            format!("{}px", column.width)
        };
        let title = text(label)
            .size(FONT_SM)
            .color_maybe(column.is_current.then_some(COLOR_INFO));

        if self.active_tab == ResultTab::Saved {
            row![
                title,
                horizontal_space(),
                button(text("x").size(FONT_SM))
                    .on_press(Message::RemoveColumn(column.width))
                    .style(button::danger),
            ]
            .align_y(Center)
            .width(VALUE_COLUMN_WIDTH)
            .into()
        } else {
            container(title).width(VALUE_COLUMN_WIDTH).into()
        }
    }

    fn view_status(&self) -> Element<'_, Message> {
        let (message, color) = match &self.notification {
            Some(n) => (
                n.message.as_str(),
                match n.severity {
                    Severity::Success => COLOR_SUCCESS,
                    Severity::Error => COLOR_ERROR,
                },
            ),
            None => ("Click a value to copy it", COLOR_MUTED_DARK),
        };
        container(text(message).size(FONT_SM).color(color))
            .padding(SPACING_MD)
            .width(Fill)
            .into()
    }
}

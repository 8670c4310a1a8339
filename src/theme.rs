// Design system tokens for consistent styling

use iced::Color;
use std::time::Duration;

// Font sizes
pub const FONT_SM: f32 = 13.0;
pub const FONT_MD: f32 = 14.0;
pub const FONT_LG: f32 = 16.0;
pub const FONT_XL: f32 = 24.0;

// Spacing
pub const SPACING_XS: u16 = 2;
pub const SPACING_SM: u16 = 5;
pub const SPACING_MD: u16 = 10;
pub const SPACING_LG: u16 = 20;

// Sizes
pub const TABLE_HEIGHT: f32 = 380.0;
pub const PERCENT_COLUMN_WIDTH: f32 = 70.0;
pub const VALUE_COLUMN_WIDTH: f32 = 110.0;

// Colors for dark mode
pub const COLOR_ERROR: Color = Color::from_rgb(1.0, 0.4, 0.4);
pub const COLOR_SUCCESS: Color = Color::from_rgb(0.3, 1.0, 0.5);
pub const COLOR_INFO: Color = Color::from_rgb(0.3, 0.8, 1.0);
pub const COLOR_MUTED_DARK: Color = Color::from_rgb(0.5, 0.5, 0.5);

// Input limits
pub const MAX_WIDTH_INPUT_LENGTH: usize = 32;
pub const MAX_PREFIX_LENGTH: usize = 128;

// Widths and ranges
pub const DEFAULT_BASE_WIDTH: &str = "1000";
pub const PRESET_WIDTHS: [u32; 6] = [900, 1000, 1100, 1200, 1600, 1700];
pub const DEFAULT_RANGE_MIN: u32 = 1;
pub const DEFAULT_RANGE_MAX: u32 = 100;

// Notifications
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

// Window
pub const WINDOW_WIDTH: f32 = 1100.0;
pub const WINDOW_HEIGHT: f32 = 760.0;

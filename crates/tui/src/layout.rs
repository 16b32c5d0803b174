//! Centralized layout measurements for the TUI.
//!
//! This module defines shared constants for layout dimensions used across
//! multiple rendering components.

/// Height of the header bar in rows.
pub const HEADER_HEIGHT: u16 = 3;

/// Width of the form column, borders included.
pub const FORM_WIDTH: u16 = 34;

/// Rows per form field: label, value and hint.
pub const FIELD_HEIGHT: u16 = 3;

/// Height of the form, borders included.
pub const FORM_HEIGHT: u16 = 4 * FIELD_HEIGHT + 2;

/// Height of the link panel, borders included.
pub const LINK_PANEL_HEIGHT: u16 = 5;

/// Height of the toast line.
pub const TOAST_HEIGHT: u16 = 1;

/// Height of the status bar.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the widget card in the preview, in cells.
pub const CARD_WIDTH: u16 = 36;

/// Height of the widget card in the preview, in cells.
pub const CARD_HEIGHT: u16 = 8;

/// Columns the round frame overhangs the card on the left.
pub const AVATAR_OVERHANG: u16 = 4;

/// Width of the image frame in cells.
///
/// Two pixel rows share one cell, so a 12x6 cell frame shows a 12x12
/// pixel thumbnail that looks square on typical terminal fonts.
pub const AVATAR_COLUMNS: u16 = 12;

/// Height of the image frame in cells.
pub const AVATAR_ROWS: u16 = 6;

/// Rows needed to show the card with its shadow.
pub const PREVIEW_HEIGHT: u16 = CARD_HEIGHT + 1;

/// Columns needed to show the card with its overhang and shadow.
pub const PREVIEW_WIDTH: u16 = AVATAR_OVERHANG + CARD_WIDTH + 1;

/// Minimum terminal height for useful rendering.
///
/// Header, the four form fields and the link panel, toast line and status
/// bar must all fit.
pub const MIN_HEIGHT: u16 =
    HEADER_HEIGHT + FORM_HEIGHT + LINK_PANEL_HEIGHT + TOAST_HEIGHT + STATUS_BAR_HEIGHT;

/// Minimum terminal width for useful rendering.
pub const MIN_WIDTH: u16 = FORM_WIDTH + PREVIEW_WIDTH;

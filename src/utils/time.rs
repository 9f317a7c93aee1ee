use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Display format for message timestamps, e.g. `3/14/2026, 9:05:07 PM`.
const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month padding:none]/[day padding:none]/[year], [hour repr:12 padding:none]:[minute]:[second] [period]"
);

/// Format the current local time for display next to a message.
///
/// Falls back to UTC when the local offset cannot be determined.
pub fn display_timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    format_display(now.to_offset(offset))
}

/// Format a specific instant for display.
pub fn format_display(datetime: OffsetDateTime) -> String {
    datetime
        .format(DISPLAY_FORMAT)
        .unwrap_or_else(|_| datetime.to_string())
}

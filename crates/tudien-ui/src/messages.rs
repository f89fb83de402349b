//! User-facing strings

pub const TITLE: &str = "Từ Điển Tiếng Việt";
pub const SUBTITLE: &str = "Tra cứu từ điển tiếng Việt trực tuyến";
pub const EMPTY_STATE: &str = "Nhập từ cần tra cứu vào ô tìm kiếm ở trên.";
pub const LOADING: &str = "Đang tìm...";
pub const SEARCH_ERROR: &str = "Đã xảy ra lỗi khi tìm kiếm. Vui lòng thử lại.";
pub const RETRY_HINT: &str = "Nhập lại từ để thử lại.";
pub const NO_MEANINGS: &str = "Chưa có nghĩa cho mục từ này.";
pub const EXAMPLE_PREFIX: &str = "Ví dụ: ";
pub const TRANSLATIONS: &str = "Bản dịch";
pub const RELATED_WORDS: &str = "Từ liên quan";
pub const SUGGESTIONS: &str = "Gợi ý";

pub fn not_found(term: &str) -> String {
    format!("Không tìm thấy từ \"{term}\" trong từ điển.")
}

pub fn more_pronunciations(count: usize) -> String {
    format!("{count} cách phát âm khác")
}

pub const NO_AUDIO: &str = "Mục từ này không có âm thanh.";
pub const HELP: &str = "Lệnh: <từ> tra cứu | :tab N | :pron N | :related TỪ | :suggest N | :play | :url | :clear | :quit";

pub fn no_such_item(index: usize) -> String {
    format!("Không có mục số {index}.")
}

pub fn unknown_command(input: &str) -> String {
    format!("Lệnh không hợp lệ: {input}")
}

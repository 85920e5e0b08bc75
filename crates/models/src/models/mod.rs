mod category;
mod chapter;
mod entry;
mod history;
mod merged;
mod saved_search;
mod status;
mod track;

pub use self::category::Category;
pub use self::chapter::Chapter;
pub use self::entry::Entry;
pub use self::history::History;
pub use self::merged::MergedReference;
pub use self::saved_search::SavedSearch;
pub use self::status::EntryStatus;
pub use self::track::Track;

/// A user-defined grouping of entries.
///
/// Categories are matched across installs by exact, case-sensitive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Option<i64>,
    pub name: String,
    /// Sort position in the category list
    pub order: i64,
    pub flags: i64,
}
impl Category {
    pub fn new(name: impl Into<String>, order: i64) -> Self {
        Self { id: None, name: name.into(), order, flags: 0 }
    }
}

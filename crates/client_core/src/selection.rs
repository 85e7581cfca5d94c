use shared::domain::CourseCode;

/// Ordered, duplicate-free set of completed courses for one session.
///
/// Codes are not checked against the catalog; an unknown code is the
/// advisory service's to flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseSelection {
    codes: Vec<CourseCode>,
}

impl CourseSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `code` unless present. Returns whether the set changed.
    pub fn add(&mut self, code: CourseCode) -> bool {
        if self.codes.contains(&code) {
            return false;
        }
        self.codes.push(code);
        true
    }

    /// Returns whether the set changed.
    pub fn remove(&mut self, code: &CourseCode) -> bool {
        let before = self.codes.len();
        self.codes.retain(|existing| existing != code);
        self.codes.len() != before
    }

    pub fn contains(&self, code: &CourseCode) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseCode> {
        self.codes.iter()
    }

    pub fn snapshot(&self) -> Vec<CourseCode> {
        self.codes.clone()
    }
}

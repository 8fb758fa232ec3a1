//! Focus enumerations for the two views.

/// Which part of the list view receives keys.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ListFocus {
    Input,
    Tasks,
}

/// Which control of the detail view receives keys.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DetailFocus {
    Notes,
    Toggle,
    Delete,
    Back,
}

impl DetailFocus {
    pub fn next(self) -> Self {
        match self {
            DetailFocus::Notes => DetailFocus::Toggle,
            DetailFocus::Toggle => DetailFocus::Delete,
            DetailFocus::Delete => DetailFocus::Back,
            DetailFocus::Back => DetailFocus::Notes,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DetailFocus::Notes => DetailFocus::Back,
            DetailFocus::Toggle => DetailFocus::Notes,
            DetailFocus::Delete => DetailFocus::Toggle,
            DetailFocus::Back => DetailFocus::Delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle() {
        let mut focus = DetailFocus::Notes;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, DetailFocus::Notes);
        assert_eq!(DetailFocus::Notes.prev(), DetailFocus::Back);
        assert_eq!(DetailFocus::Delete.next().prev(), DetailFocus::Delete);
    }
}

use crate::models::{Book, LentBook, Member};

/// Scrollable state for the read-only books table.
pub(crate) struct BooksScreen {
    pub(crate) books: Vec<Book>,
    pub(crate) selected: usize,
}

impl BooksScreen {
    pub(crate) fn new(books: Vec<Book>) -> Self {
        Self { books, selected: 0 }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = clamped(self.selected, offset, self.books.len());
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.books.len().saturating_sub(1);
    }
}

/// Scrollable state for the read-only members table.
pub(crate) struct MembersScreen {
    pub(crate) members: Vec<Member>,
    pub(crate) selected: usize,
}

impl MembersScreen {
    pub(crate) fn new(members: Vec<Member>) -> Self {
        Self {
            members,
            selected: 0,
        }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = clamped(self.selected, offset, self.members.len());
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.members.len().saturating_sub(1);
    }
}

/// Scrollable state for the lent-books table (the loans join).
pub(crate) struct LoansScreen {
    pub(crate) loans: Vec<LentBook>,
    pub(crate) selected: usize,
}

impl LoansScreen {
    pub(crate) fn new(loans: Vec<LentBook>) -> Self {
        Self { loans, selected: 0 }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = clamped(self.selected, offset, self.loans.len());
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.loans.len().saturating_sub(1);
    }
}

/// Move `selected` by `offset` while staying inside `0..len`.
fn clamped(selected: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = (len - 1) as isize;
    (selected as isize + offset).clamp(0, max) as usize
}

#[cfg(test)]
mod tests {
    use super::clamped;

    #[test]
    fn selection_stays_in_bounds() {
        assert_eq!(clamped(0, -3, 10), 0);
        assert_eq!(clamped(9, 5, 10), 9);
        assert_eq!(clamped(4, 1, 10), 5);
        assert_eq!(clamped(0, 1, 0), 0);
    }
}

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{NewBook, NewMember};

/// Internal representation of the "add book" form fields. Everything stays a
/// string until `parse_inputs` so the user can type freely and get one
/// coherent validation message on submit.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) publisher: String,
    pub(crate) published_year: String,
    pub(crate) rating: String,
    pub(crate) isbn: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Fields available within the book form, in focus order.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Publisher,
    PublishedYear,
    Rating,
    Isbn,
}

impl BookField {
    pub(crate) const ALL: [BookField; 6] = [
        BookField::Title,
        BookField::Author,
        BookField::Publisher,
        BookField::PublishedYear,
        BookField::Rating,
        BookField::Isbn,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Publisher => "Publisher",
            BookField::PublishedYear => "Published Year",
            BookField::Rating => "Rating",
            BookField::Isbn => "ISBN",
        }
    }
}

impl BookForm {
    /// Cycle focus across the six fields.
    pub(crate) fn toggle_field(&mut self) {
        let position = BookField::ALL
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0);
        self.active = BookField::ALL[(position + 1) % BookField::ALL.len()];
    }

    fn value_mut(&mut self, field: BookField) -> &mut String {
        match field {
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Publisher => &mut self.publisher,
            BookField::PublishedYear => &mut self.published_year,
            BookField::Rating => &mut self.rating,
            BookField::Isbn => &mut self.isbn,
        }
    }

    pub(crate) fn value(&self, field: BookField) -> &str {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Publisher => &self.publisher,
            BookField::PublishedYear => &self.published_year,
            BookField::Rating => &self.rating,
            BookField::Isbn => &self.isbn,
        }
    }

    /// Append a character to the active field. The numeric fields only take
    /// what could still parse (digits, plus one dot for the rating).
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        let accepted = match self.active {
            BookField::PublishedYear => ch.is_ascii_digit(),
            BookField::Rating => ch.is_ascii_digit() || (ch == '.' && !self.rating.contains('.')),
            _ => !ch.is_control(),
        };
        if accepted {
            let active = self.active;
            self.value_mut(active).push(ch);
        }
        accepted
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        let active = self.active;
        self.value_mut(active).pop();
    }

    /// Validate the inputs and return a draft ready for persistence. All six
    /// fields are required; year and rating must be numbers and the rating
    /// must land between 1 and 5.
    pub(crate) fn parse_inputs(&self) -> Result<NewBook> {
        for field in BookField::ALL {
            if self.value(field).trim().is_empty() {
                return Err(anyhow!("Please fill in all fields."));
            }
        }

        let published_year = self
            .published_year
            .trim()
            .parse::<i64>()
            .map_err(|_| anyhow!("Published year and rating must be entered as numbers."))?;
        let rating = self
            .rating
            .trim()
            .parse::<f64>()
            .map_err(|_| anyhow!("Published year and rating must be entered as numbers."))?;
        if !(1.0..=5.0).contains(&rating) {
            return Err(anyhow!("Rating must be between 1 - 5."));
        }

        Ok(NewBook {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            publisher: self.publisher.trim().to_string(),
            published_year,
            rating,
            isbn: self.isbn.trim().to_string(),
        })
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        styled_field_line(self.value(field), field.label(), self.active == field)
    }

    /// Character count for the requested field, used for cursor placement.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        self.value(field).chars().count()
    }
}

/// Internal representation of the "register member" form fields.
#[derive(Default, Clone)]
pub(crate) struct MemberForm {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) gender: String,
    pub(crate) state: String,
    pub(crate) member_no: String,
    pub(crate) active: MemberField,
    pub(crate) error: Option<String>,
}

/// Fields available within the member form, in focus order.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum MemberField {
    #[default]
    FirstName,
    LastName,
    Email,
    Gender,
    State,
    MemberNo,
}

impl MemberField {
    pub(crate) const ALL: [MemberField; 6] = [
        MemberField::FirstName,
        MemberField::LastName,
        MemberField::Email,
        MemberField::Gender,
        MemberField::State,
        MemberField::MemberNo,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            MemberField::FirstName => "First Name",
            MemberField::LastName => "Last Name",
            MemberField::Email => "Email",
            MemberField::Gender => "Gender",
            MemberField::State => "State",
            MemberField::MemberNo => "Member No",
        }
    }
}

impl MemberForm {
    pub(crate) fn toggle_field(&mut self) {
        let position = MemberField::ALL
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0);
        self.active = MemberField::ALL[(position + 1) % MemberField::ALL.len()];
    }

    fn value_mut(&mut self, field: MemberField) -> &mut String {
        match field {
            MemberField::FirstName => &mut self.first_name,
            MemberField::LastName => &mut self.last_name,
            MemberField::Email => &mut self.email,
            MemberField::Gender => &mut self.gender,
            MemberField::State => &mut self.state,
            MemberField::MemberNo => &mut self.member_no,
        }
    }

    pub(crate) fn value(&self, field: MemberField) -> &str {
        match field {
            MemberField::FirstName => &self.first_name,
            MemberField::LastName => &self.last_name,
            MemberField::Email => &self.email,
            MemberField::Gender => &self.gender,
            MemberField::State => &self.state,
            MemberField::MemberNo => &self.member_no,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let active = self.active;
        self.value_mut(active).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        let active = self.active;
        self.value_mut(active).pop();
    }

    /// Validate the inputs; every field is required.
    pub(crate) fn parse_inputs(&self) -> Result<NewMember> {
        for field in MemberField::ALL {
            if self.value(field).trim().is_empty() {
                return Err(anyhow!("Please fill in all fields."));
            }
        }

        Ok(NewMember {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            gender: self.gender.trim().to_string(),
            state: self.state.trim().to_string(),
            member_no: self.member_no.trim().to_string(),
        })
    }

    pub(crate) fn build_line(&self, field: MemberField) -> Line<'static> {
        styled_field_line(self.value(field), field.label(), self.active == field)
    }

    pub(crate) fn value_len(&self, field: MemberField) -> usize {
        self.value(field).chars().count()
    }
}

/// Two-field form backing the lend flow: which book goes to which member.
#[derive(Default, Clone)]
pub(crate) struct LendForm {
    pub(crate) title: String,
    pub(crate) member_no: String,
    pub(crate) active: LendField,
    pub(crate) error: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum LendField {
    #[default]
    Title,
    MemberNo,
}

impl LendField {
    pub(crate) fn label(self) -> &'static str {
        match self {
            LendField::Title => "Book Title",
            LendField::MemberNo => "Member No",
        }
    }
}

impl LendForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            LendField::Title => LendField::MemberNo,
            LendField::MemberNo => LendField::Title,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            LendField::Title => self.title.push(ch),
            LendField::MemberNo => self.member_no.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            LendField::Title => {
                self.title.pop();
            }
            LendField::MemberNo => {
                self.member_no.pop();
            }
        }
    }

    pub(crate) fn parse_inputs(&self) -> Result<(String, String)> {
        let title = self.title.trim();
        let member_no = self.member_no.trim();
        if title.is_empty() || member_no.is_empty() {
            return Err(anyhow!("Please fill in all fields."));
        }
        Ok((title.to_string(), member_no.to_string()))
    }

    pub(crate) fn build_line(&self, field: LendField) -> Line<'static> {
        let value = match field {
            LendField::Title => &self.title,
            LendField::MemberNo => &self.member_no,
        };
        styled_field_line(value, field.label(), self.active == field)
    }

    pub(crate) fn value_len(&self, field: LendField) -> usize {
        match field {
            LendField::Title => self.title.chars().count(),
            LendField::MemberNo => self.member_no.chars().count(),
        }
    }
}

/// Single-field prompt reused by the remove, return, and import flows. The
/// meaning of the value lives in `PromptAction` on the mode.
#[derive(Clone)]
pub(crate) struct PromptForm {
    pub(crate) label: &'static str,
    pub(crate) value: String,
    pub(crate) error: Option<String>,
}

impl PromptForm {
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn parse_input(&self) -> Result<String> {
        let value = self.value.trim();
        if value.is_empty() {
            return Err(anyhow!("Please fill in the field."));
        }
        Ok(value.to_string())
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        styled_field_line(&self.value, self.label, true)
    }

    pub(crate) fn value_len(&self) -> usize {
        self.value.chars().count()
    }
}

/// Which operation a single-field prompt is collecting input for.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum PromptAction {
    RemoveBook,
    RemoveMember,
    ReturnBook,
    ImportBooks,
    ImportMembers,
}

impl PromptAction {
    pub(crate) fn dialog_title(self) -> &'static str {
        match self {
            PromptAction::RemoveBook => "Remove Book",
            PromptAction::RemoveMember => "Remove Member",
            PromptAction::ReturnBook => "Return Book",
            PromptAction::ImportBooks => "Import Books (CSV)",
            PromptAction::ImportMembers => "Import Members (CSV)",
        }
    }

    pub(crate) fn field_label(self) -> &'static str {
        match self {
            PromptAction::RemoveBook | PromptAction::ReturnBook => "Book Title",
            PromptAction::RemoveMember => "Member No",
            PromptAction::ImportBooks | PromptAction::ImportMembers => "CSV Path",
        }
    }
}

/// A fully validated mutation waiting on the user's yes/no. Every mutating
/// path funnels through one of these before the service is called.
pub(crate) enum PendingAction {
    AddBook(NewBook),
    RegisterMember(NewMember),
    LendBook { title: String, member_no: String },
    RemoveBook(String),
    RemoveMember(String),
    ReturnBook(String),
    ImportBooks(PathBuf),
    ImportMembers(PathBuf),
}

/// Confirmation dialog state: the pending action plus the summary lines the
/// dialog shows above the Y/N hint.
pub(crate) struct Confirmation {
    pub(crate) action: PendingAction,
    pub(crate) summary: Vec<String>,
}

impl Confirmation {
    pub(crate) fn add_book(book: NewBook) -> Self {
        let summary = vec![
            "Are you sure you want to add this book?".to_string(),
            format!("Title: {}", book.title),
            format!("Author: {}", book.author),
            format!("Publisher: {}", book.publisher),
            format!("Published Year: {}", book.published_year),
            format!("Rating: {}", book.rating),
            format!("ISBN: {}", book.isbn),
        ];
        Self {
            action: PendingAction::AddBook(book),
            summary,
        }
    }

    pub(crate) fn register_member(member: NewMember) -> Self {
        let summary = vec![
            "Are you sure you want to add this member?".to_string(),
            format!("First Name: {}", member.first_name),
            format!("Last Name: {}", member.last_name),
            format!("Email: {}", member.email),
            format!("Gender: {}", member.gender),
            format!("State: {}", member.state),
            format!("Member No: {}", member.member_no),
        ];
        Self {
            action: PendingAction::RegisterMember(member),
            summary,
        }
    }

    pub(crate) fn lend_book(title: String, member_no: String) -> Self {
        let summary = vec![
            "Are you sure you want to lend this book to this member?".to_string(),
            format!("Title: {title}"),
            format!("Member No: {member_no}"),
        ];
        Self {
            action: PendingAction::LendBook { title, member_no },
            summary,
        }
    }

    pub(crate) fn remove_book(title: String) -> Self {
        Self {
            summary: vec![format!("Are you sure you want to remove '{title}'?")],
            action: PendingAction::RemoveBook(title),
        }
    }

    pub(crate) fn remove_member(member_no: String) -> Self {
        Self {
            summary: vec![format!(
                "Are you sure you want to remove member '{member_no}'?"
            )],
            action: PendingAction::RemoveMember(member_no),
        }
    }

    pub(crate) fn return_book(title: String) -> Self {
        Self {
            summary: vec![format!(
                "Are you sure you want to return '{title}' to the library?"
            )],
            action: PendingAction::ReturnBook(title),
        }
    }

    pub(crate) fn import_books(path: PathBuf) -> Self {
        Self {
            summary: vec![format!("Import books from '{}'?", path.display())],
            action: PendingAction::ImportBooks(path),
        }
    }

    pub(crate) fn import_members(path: PathBuf) -> Self {
        Self {
            summary: vec![format!("Import members from '{}'?", path.display())],
            action: PendingAction::ImportMembers(path),
        }
    }

    pub(crate) fn dialog_title(&self) -> &'static str {
        match self.action {
            PendingAction::AddBook(_) => "Confirm New Book",
            PendingAction::RegisterMember(_) => "Confirm New Member",
            PendingAction::LendBook { .. } => "Confirm Lending",
            PendingAction::RemoveBook(_) => "Confirm Removal",
            PendingAction::RemoveMember(_) => "Confirm Removal",
            PendingAction::ReturnBook(_) => "Confirm Return",
            PendingAction::ImportBooks(_) => "Confirm Import",
            PendingAction::ImportMembers(_) => "Confirm Import",
        }
    }
}

/// Shared rendering for a labeled input line: active fields highlight, empty
/// inactive fields show a dimmed placeholder.
fn styled_field_line(value: &str, label: &'static str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        "<required>".to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_book_form() -> BookForm {
        BookForm {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            publisher: "Ace".into(),
            published_year: "1965".into(),
            rating: "4.5".into(),
            isbn: "0441013597".into(),
            ..BookForm::default()
        }
    }

    #[test]
    fn book_form_rejects_out_of_range_rating() {
        let mut form = filled_book_form();
        form.rating = "5.5".into();
        let err = form.parse_inputs().unwrap_err();
        assert!(err.to_string().contains("between 1 - 5"));
    }

    #[test]
    fn book_form_rejects_non_numeric_year() {
        let mut form = filled_book_form();
        form.published_year.clear();
        form.active = BookField::PublishedYear;
        assert!(!form.push_char('x'));
        assert!(form.push_char('1'));
        assert_eq!(form.published_year, "1");
    }

    #[test]
    fn book_form_requires_every_field() {
        let mut form = filled_book_form();
        form.isbn.clear();
        let err = form.parse_inputs().unwrap_err();
        assert!(err.to_string().contains("all fields"));
    }

    #[test]
    fn book_form_parses_trimmed_draft() {
        let mut form = filled_book_form();
        form.title = "  Dune  ".into();
        let book = form.parse_inputs().unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.published_year, 1965);
        assert_eq!(book.rating, 4.5);
    }

    #[test]
    fn rating_accepts_a_single_dot() {
        let mut form = BookForm {
            active: BookField::Rating,
            ..BookForm::default()
        };
        assert!(form.push_char('4'));
        assert!(form.push_char('.'));
        assert!(!form.push_char('.'));
        assert_eq!(form.rating, "4.");
    }

    #[test]
    fn member_form_requires_every_field() {
        let form = MemberForm {
            first_name: "Ada".into(),
            ..MemberForm::default()
        };
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn prompt_form_requires_a_value() {
        let mut form = PromptForm::new("Book Title");
        assert!(form.parse_input().is_err());
        form.push_char('D');
        assert_eq!(form.parse_input().unwrap(), "D");
    }
}

use std::fs;
use std::mem;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use open::that as open_in_browser;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
};
use ratatui::Frame;

use crate::db::data_dir;
use crate::library::{Library, LibraryError};

use super::forms::{
    BookField, BookForm, Confirmation, LendField, LendForm, MemberField, MemberForm,
    PendingAction, PromptAction, PromptForm,
};
use super::helpers::{centered_rect, hint_line, surface_error};
use super::screens::{BooksScreen, LoansScreen, MembersScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// HTML for the about page, materialized under the data directory when the
/// user first asks for it.
const ABOUT_HTML: &str = include_str!("../../assets/about.html");

/// Every action reachable from the main menu, in display order. This mirrors
/// the buttons of the original main window one-to-one.
#[derive(Copy, Clone, PartialEq, Eq)]
enum MenuAction {
    ShowBooks,
    ShowMembers,
    ShowLentBooks,
    AddBook,
    RemoveBook,
    RegisterMember,
    RemoveMember,
    LendBook,
    ReturnBook,
    ImportBooks,
    ImportMembers,
    About,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 13] = [
        MenuAction::ShowBooks,
        MenuAction::ShowMembers,
        MenuAction::ShowLentBooks,
        MenuAction::AddBook,
        MenuAction::RemoveBook,
        MenuAction::RegisterMember,
        MenuAction::RemoveMember,
        MenuAction::LendBook,
        MenuAction::ReturnBook,
        MenuAction::ImportBooks,
        MenuAction::ImportMembers,
        MenuAction::About,
        MenuAction::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuAction::ShowBooks => "Show Books",
            MenuAction::ShowMembers => "Show Members",
            MenuAction::ShowLentBooks => "Show Lent Books",
            MenuAction::AddBook => "Add Book",
            MenuAction::RemoveBook => "Remove Book",
            MenuAction::RegisterMember => "Register Member",
            MenuAction::RemoveMember => "Remove Member",
            MenuAction::LendBook => "Lend Book",
            MenuAction::ReturnBook => "Return Book",
            MenuAction::ImportBooks => "Import Books (CSV)",
            MenuAction::ImportMembers => "Import Members (CSV)",
            MenuAction::About => "About",
            MenuAction::Exit => "Exit",
        }
    }
}

/// High-level navigation states. Keeping this explicit makes it easy to
/// reason about which rendering path runs and what keys should do.
enum Screen {
    Menu,
    Books(BooksScreen),
    Members(MembersScreen),
    Loans(LoansScreen),
}

/// Fine-grained modal states layered over the current screen. Every mutating
/// flow ends in `Confirming` before the service is called.
enum Mode {
    Normal,
    AddingBook(BookForm),
    RegisteringMember(MemberForm),
    Lending(LendForm),
    Prompting {
        action: PromptAction,
        form: PromptForm,
    },
    Confirming(Confirmation),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The library service is
/// the only path to the store; no screen keeps its own connection.
pub struct App {
    library: Library,
    screen: Screen,
    mode: Mode,
    menu_selected: usize,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(library: Library) -> Self {
        Self {
            library,
            screen: Screen::Menu,
            mode: Mode::Normal,
            menu_selected: 0,
            status: None,
        }
    }

    /// Route a key press through the current mode. Returns true when the
    /// application should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_book_form(code, form),
            Mode::RegisteringMember(form) => self.handle_member_form(code, form),
            Mode::Lending(form) => self.handle_lend_form(code, form),
            Mode::Prompting { action, form } => self.handle_prompt(code, action, form),
            Mode::Confirming(confirm) => self.handle_confirm(code, confirm)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Menu => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    *exit = true;
                    Ok(Mode::Normal)
                }
                KeyCode::Up => {
                    self.menu_selected = self.menu_selected.saturating_sub(1);
                    Ok(Mode::Normal)
                }
                KeyCode::Down => {
                    self.menu_selected = (self.menu_selected + 1).min(MenuAction::ALL.len() - 1);
                    Ok(Mode::Normal)
                }
                KeyCode::Home => {
                    self.menu_selected = 0;
                    Ok(Mode::Normal)
                }
                KeyCode::End => {
                    self.menu_selected = MenuAction::ALL.len() - 1;
                    Ok(Mode::Normal)
                }
                KeyCode::Enter => {
                    self.clear_status();
                    self.trigger_menu_action(MenuAction::ALL[self.menu_selected], exit)
                }
                _ => Ok(Mode::Normal),
            },
            Screen::Books(ref mut books) => {
                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc => {
                        self.clear_status();
                        self.screen = Screen::Menu;
                    }
                    KeyCode::Up => books.move_selection(-1),
                    KeyCode::Down => books.move_selection(1),
                    KeyCode::PageUp => books.move_selection(-10),
                    KeyCode::PageDown => books.move_selection(10),
                    KeyCode::Home => books.select_first(),
                    KeyCode::End => books.select_last(),
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::Members(ref mut members) => {
                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc => {
                        self.clear_status();
                        self.screen = Screen::Menu;
                    }
                    KeyCode::Up => members.move_selection(-1),
                    KeyCode::Down => members.move_selection(1),
                    KeyCode::PageUp => members.move_selection(-10),
                    KeyCode::PageDown => members.move_selection(10),
                    KeyCode::Home => members.select_first(),
                    KeyCode::End => members.select_last(),
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::Loans(ref mut loans) => {
                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc => {
                        self.clear_status();
                        self.screen = Screen::Menu;
                    }
                    KeyCode::Up => loans.move_selection(-1),
                    KeyCode::Down => loans.move_selection(1),
                    KeyCode::PageUp => loans.move_selection(-10),
                    KeyCode::PageDown => loans.move_selection(10),
                    KeyCode::Home => loans.select_first(),
                    KeyCode::End => loans.select_last(),
                    _ => {}
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn trigger_menu_action(&mut self, action: MenuAction, exit: &mut bool) -> Result<Mode> {
        match action {
            MenuAction::ShowBooks => {
                let books = self.library.list_books()?;
                if books.is_empty() {
                    self.set_status("There are no books in the system!", StatusKind::Error);
                } else {
                    self.screen = Screen::Books(BooksScreen::new(books));
                }
                Ok(Mode::Normal)
            }
            MenuAction::ShowMembers => {
                let members = self.library.list_members()?;
                if members.is_empty() {
                    self.set_status(
                        "There are no registered members in the system!",
                        StatusKind::Error,
                    );
                } else {
                    self.screen = Screen::Members(MembersScreen::new(members));
                }
                Ok(Mode::Normal)
            }
            MenuAction::ShowLentBooks => {
                let loans = self.library.list_loans()?;
                if loans.is_empty() {
                    self.set_status("There are no lent books at the moment.", StatusKind::Info);
                } else {
                    self.screen = Screen::Loans(LoansScreen::new(loans));
                }
                Ok(Mode::Normal)
            }
            MenuAction::AddBook => Ok(Mode::AddingBook(BookForm::default())),
            MenuAction::RegisterMember => Ok(Mode::RegisteringMember(MemberForm::default())),
            MenuAction::LendBook => Ok(Mode::Lending(LendForm::default())),
            MenuAction::RemoveBook => Ok(prompt_mode(PromptAction::RemoveBook)),
            MenuAction::RemoveMember => Ok(prompt_mode(PromptAction::RemoveMember)),
            MenuAction::ReturnBook => Ok(prompt_mode(PromptAction::ReturnBook)),
            MenuAction::ImportBooks => Ok(prompt_mode(PromptAction::ImportBooks)),
            MenuAction::ImportMembers => Ok(prompt_mode(PromptAction::ImportMembers)),
            MenuAction::About => {
                match self.open_about_page() {
                    Ok(()) => {
                        self.set_status("Opened the about page in your browser.", StatusKind::Info)
                    }
                    Err(err) => self
                        .set_status(format!("Failed to open about page: {err}"), StatusKind::Error),
                }
                Ok(Mode::Normal)
            }
            MenuAction::Exit => {
                *exit = true;
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_book_form(&mut self, code: KeyCode, mut form: BookForm) -> Mode {
        match code {
            KeyCode::Esc => Mode::Normal,
            KeyCode::Tab => {
                form.toggle_field();
                Mode::AddingBook(form)
            }
            KeyCode::Backspace => {
                form.backspace();
                form.error = None;
                Mode::AddingBook(form)
            }
            KeyCode::Enter => match form.parse_inputs() {
                Ok(book) => Mode::Confirming(Confirmation::add_book(book)),
                Err(err) => {
                    form.error = Some(err.to_string());
                    Mode::AddingBook(form)
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
                Mode::AddingBook(form)
            }
            _ => Mode::AddingBook(form),
        }
    }

    fn handle_member_form(&mut self, code: KeyCode, mut form: MemberForm) -> Mode {
        match code {
            KeyCode::Esc => Mode::Normal,
            KeyCode::Tab => {
                form.toggle_field();
                Mode::RegisteringMember(form)
            }
            KeyCode::Backspace => {
                form.backspace();
                form.error = None;
                Mode::RegisteringMember(form)
            }
            KeyCode::Enter => match form.parse_inputs() {
                Ok(member) => Mode::Confirming(Confirmation::register_member(member)),
                Err(err) => {
                    form.error = Some(err.to_string());
                    Mode::RegisteringMember(form)
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
                Mode::RegisteringMember(form)
            }
            _ => Mode::RegisteringMember(form),
        }
    }

    fn handle_lend_form(&mut self, code: KeyCode, mut form: LendForm) -> Mode {
        match code {
            KeyCode::Esc => Mode::Normal,
            KeyCode::Tab => {
                form.toggle_field();
                Mode::Lending(form)
            }
            KeyCode::Backspace => {
                form.backspace();
                form.error = None;
                Mode::Lending(form)
            }
            KeyCode::Enter => match form.parse_inputs() {
                Ok((title, member_no)) => Mode::Confirming(Confirmation::lend_book(title, member_no)),
                Err(err) => {
                    form.error = Some(err.to_string());
                    Mode::Lending(form)
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
                Mode::Lending(form)
            }
            _ => Mode::Lending(form),
        }
    }

    fn handle_prompt(&mut self, code: KeyCode, action: PromptAction, mut form: PromptForm) -> Mode {
        match code {
            KeyCode::Esc => Mode::Normal,
            KeyCode::Backspace => {
                form.backspace();
                form.error = None;
                Mode::Prompting { action, form }
            }
            KeyCode::Enter => match form.parse_input() {
                Ok(value) => {
                    let confirm = match action {
                        PromptAction::RemoveBook => Confirmation::remove_book(value),
                        PromptAction::RemoveMember => Confirmation::remove_member(value),
                        PromptAction::ReturnBook => Confirmation::return_book(value),
                        PromptAction::ImportBooks => {
                            Confirmation::import_books(PathBuf::from(value))
                        }
                        PromptAction::ImportMembers => {
                            Confirmation::import_members(PathBuf::from(value))
                        }
                    };
                    Mode::Confirming(confirm)
                }
                Err(err) => {
                    form.error = Some(err.to_string());
                    Mode::Prompting { action, form }
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
                Mode::Prompting { action, form }
            }
            _ => Mode::Prompting { action, form },
        }
    }

    fn handle_confirm(&mut self, code: KeyCode, confirm: Confirmation) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.execute_action(confirm.action)?;
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Ok(Mode::Normal),
            _ => Ok(Mode::Confirming(confirm)),
        }
    }

    /// Run a confirmed mutation through the library service and translate the
    /// outcome into a footer message. Business-rule failures get the exact
    /// wording of the original dialogs; storage failures surface their cause.
    fn execute_action(&mut self, action: PendingAction) -> Result<()> {
        match action {
            PendingAction::AddBook(book) => match self.library.add_book(&book) {
                Ok(true) => self.set_status(
                    "The book has been added to the system successfully!",
                    StatusKind::Info,
                ),
                Ok(false) => self.set_status(
                    "A book with this ISBN is already in the system; nothing was added.",
                    StatusKind::Info,
                ),
                Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
            },
            PendingAction::RegisterMember(member) => {
                match self.library.register_member(&member) {
                    Ok(true) => self.set_status(
                        "The member has been registered to the system successfully!",
                        StatusKind::Info,
                    ),
                    Ok(false) => self.set_status(
                        "A member with this number is already registered; nothing was added.",
                        StatusKind::Info,
                    ),
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
            }
            PendingAction::RemoveBook(title) => match self.library.remove_book(&title) {
                Ok(()) => self.set_status(
                    "The book has been removed from the system successfully!",
                    StatusKind::Info,
                ),
                Err(LibraryError::UnknownBook(_)) => {
                    self.set_status("The book cannot be found!", StatusKind::Error)
                }
                Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
            },
            PendingAction::RemoveMember(member_no) => {
                match self.library.remove_member(&member_no) {
                    Ok(()) => self.set_status(
                        "The member has been removed from the system successfully!",
                        StatusKind::Info,
                    ),
                    Err(LibraryError::UnknownMember(_)) => {
                        self.set_status("The member cannot be found!", StatusKind::Error)
                    }
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
            }
            PendingAction::LendBook { title, member_no } => {
                match self.library.lend_book(&title, &member_no) {
                    Ok(()) => self.set_status(
                        "The book has been lent to the member successfully!",
                        StatusKind::Info,
                    ),
                    Err(LibraryError::UnknownBook(_)) => {
                        self.set_status("The book cannot be found.", StatusKind::Error)
                    }
                    Err(LibraryError::UnknownMember(_)) => {
                        self.set_status("The member cannot be found.", StatusKind::Error)
                    }
                    Err(LibraryError::AlreadyLent(_)) => self.set_status(
                        "The book is already lent to another member.",
                        StatusKind::Error,
                    ),
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
            }
            PendingAction::ReturnBook(title) => match self.library.return_book(&title) {
                Ok(()) => self.set_status(
                    "The book has been brought back to the library successfully!",
                    StatusKind::Info,
                ),
                Err(LibraryError::NotLent(_)) => {
                    self.set_status("The book is already in the library.", StatusKind::Error)
                }
                Err(LibraryError::UnknownBook(_)) => self.set_status(
                    "The book cannot be found in the library.",
                    StatusKind::Error,
                ),
                Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
            },
            PendingAction::ImportBooks(path) => {
                match self.library.import_books_from_csv(&path) {
                    Ok(summary) => self.set_status(
                        format!(
                            "Imported {} book(s), skipped {} duplicate(s).",
                            summary.added, summary.skipped
                        ),
                        StatusKind::Info,
                    ),
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
            }
            PendingAction::ImportMembers(path) => {
                match self.library.import_members_from_csv(&path) {
                    Ok(summary) => self.set_status(
                        format!(
                            "Imported {} member(s), skipped {} duplicate(s).",
                            summary.added, summary.skipped
                        ),
                        StatusKind::Info,
                    ),
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
            }
        }

        self.refresh_screen()
    }

    /// Reload whichever table screen is open so a mutation made from a modal
    /// shows up immediately.
    fn refresh_screen(&mut self) -> Result<()> {
        match &mut self.screen {
            Screen::Menu => {}
            Screen::Books(books) => {
                let refreshed = self.library.list_books()?;
                if refreshed.is_empty() {
                    self.screen = Screen::Menu;
                } else {
                    books.selected = books.selected.min(refreshed.len() - 1);
                    books.books = refreshed;
                }
            }
            Screen::Members(members) => {
                let refreshed = self.library.list_members()?;
                if refreshed.is_empty() {
                    self.screen = Screen::Menu;
                } else {
                    members.selected = members.selected.min(refreshed.len() - 1);
                    members.members = refreshed;
                }
            }
            Screen::Loans(loans) => {
                let refreshed = self.library.list_loans()?;
                if refreshed.is_empty() {
                    self.screen = Screen::Menu;
                } else {
                    loans.selected = loans.selected.min(refreshed.len() - 1);
                    loans.loans = refreshed;
                }
            }
        }
        Ok(())
    }

    /// Materialize the embedded about page under the data directory and hand
    /// it to the system default browser.
    fn open_about_page(&self) -> Result<()> {
        let path = data_dir()?.join("about.html");
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).context("failed to create data directory")?;
            }
            fs::write(&path, ABOUT_HTML).context("failed to write about page")?;
        }
        open_in_browser(&path).context("failed to launch browser")?;
        Ok(())
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Render the current screen, any modal on top of it, and the footer.
    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(FOOTER_HEIGHT)])
            .split(frame.area());

        match &self.screen {
            Screen::Menu => self.draw_menu(frame, chunks[0]),
            Screen::Books(books) => draw_books_table(frame, chunks[0], books),
            Screen::Members(members) => draw_members_table(frame, chunks[0], members),
            Screen::Loans(loans) => draw_loans_table(frame, chunks[0], loans),
        }

        match &self.mode {
            Mode::Normal => {}
            Mode::AddingBook(form) => draw_book_form(frame, chunks[0], form),
            Mode::RegisteringMember(form) => draw_member_form(frame, chunks[0], form),
            Mode::Lending(form) => draw_lend_form(frame, chunks[0], form),
            Mode::Prompting { action, form } => draw_prompt(frame, chunks[0], *action, form),
            Mode::Confirming(confirm) => draw_confirm(frame, chunks[0], confirm),
        }

        self.draw_footer(frame, chunks[1]);
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let header = Paragraph::new(Line::from(Span::styled(
            "Daisy Library Management",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let items: Vec<ListItem> = MenuAction::ALL
            .iter()
            .map(|action| ListItem::new(action.label()))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Actions"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.menu_selected));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match &self.mode {
            Mode::Normal => match self.screen {
                Screen::Menu => hint_line(&[
                    ("[up/down]", "Navigate"),
                    ("[Enter]", "Select"),
                    ("[q]", "Quit"),
                ]),
                _ => hint_line(&[
                    ("[up/down]", "Scroll"),
                    ("[Esc]", "Back to Menu"),
                    ("[q]", "Quit"),
                ]),
            },
            Mode::Confirming(_) => hint_line(&[("[y]", "Confirm"), ("[n/Esc]", "Cancel")]),
            Mode::Prompting { .. } => {
                hint_line(&[("[Enter]", "Continue"), ("[Esc]", "Cancel")])
            }
            _ => hint_line(&[
                ("[Tab]", "Next Field"),
                ("[Enter]", "Save"),
                ("[Esc]", "Cancel"),
            ]),
        }
    }
}

fn prompt_mode(action: PromptAction) -> Mode {
    Mode::Prompting {
        action,
        form: PromptForm::new(action.field_label()),
    }
}

fn draw_books_table(frame: &mut Frame, area: Rect, screen: &BooksScreen) {
    let header = Row::new(vec![
        "ID",
        "Title",
        "Author",
        "Publisher",
        "Published Year",
        "Rating",
        "ISBN",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = screen
        .books
        .iter()
        .map(|book| {
            Row::new(vec![
                book.id.to_string(),
                book.title.clone(),
                book.author.clone(),
                book.publisher.clone(),
                book.published_year.to_string(),
                format!("{:.1}", book.rating),
                book.isbn.clone(),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(20),
            Constraint::Min(16),
            Constraint::Min(14),
            Constraint::Length(14),
            Constraint::Length(6),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Books"))
    .row_highlight_style(Style::default().fg(Color::Yellow));

    let mut state = TableState::default();
    state.select(Some(screen.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_members_table(frame: &mut Frame, area: Rect, screen: &MembersScreen) {
    let header = Row::new(vec![
        "ID",
        "First Name",
        "Last Name",
        "Email",
        "Gender",
        "State",
        "Member No",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = screen
        .members
        .iter()
        .map(|member| {
            Row::new(vec![
                member.id.to_string(),
                member.first_name.clone(),
                member.last_name.clone(),
                member.email.clone(),
                member.gender.clone(),
                member.state.clone(),
                member.member_no.clone(),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(12),
            Constraint::Min(12),
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(11),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Members"))
    .row_highlight_style(Style::default().fg(Color::Yellow));

    let mut state = TableState::default();
    state.select(Some(screen.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_loans_table(frame: &mut Frame, area: Rect, screen: &LoansScreen) {
    let header = Row::new(vec!["Book Title", "Member First Name", "Member Last Name"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = screen
        .loans
        .iter()
        .map(|loan| {
            Row::new(vec![
                loan.title.clone(),
                loan.first_name.clone(),
                loan.last_name.clone(),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Min(18),
            Constraint::Min(18),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Lent Books"))
    .row_highlight_style(Style::default().fg(Color::Yellow));

    let mut state = TableState::default();
    state.select(Some(screen.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_book_form(frame: &mut Frame, area: Rect, form: &BookForm) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title("New Book Information")
        .borders(Borders::ALL);
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines: Vec<Line> = BookField::ALL
        .iter()
        .map(|field| form.build_line(*field))
        .collect();
    lines.push(Line::from(""));

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter to save, Tab to switch, Esc to cancel",
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);

    let row = BookField::ALL
        .iter()
        .position(|field| *field == form.active)
        .unwrap_or(0);
    let prefix = form.active.label().len() as u16 + 2;
    frame.set_cursor_position((
        inner.x + prefix + form.value_len(form.active) as u16,
        inner.y + row as u16,
    ));
}

fn draw_member_form(frame: &mut Frame, area: Rect, form: &MemberForm) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title("New Member Information")
        .borders(Borders::ALL);
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines: Vec<Line> = MemberField::ALL
        .iter()
        .map(|field| form.build_line(*field))
        .collect();
    lines.push(Line::from(""));

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter to save, Tab to switch, Esc to cancel",
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);

    let row = MemberField::ALL
        .iter()
        .position(|field| *field == form.active)
        .unwrap_or(0);
    let prefix = form.active.label().len() as u16 + 2;
    frame.set_cursor_position((
        inner.x + prefix + form.value_len(form.active) as u16,
        inner.y + row as u16,
    ));
}

fn draw_lend_form(frame: &mut Frame, area: Rect, form: &LendForm) {
    let popup_area = centered_rect(60, 40, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title("Lend Book Information")
        .borders(Borders::ALL);
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines = vec![
        form.build_line(LendField::Title),
        form.build_line(LendField::MemberNo),
        Line::from(""),
    ];

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter to save, Tab to switch, Esc to cancel",
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);

    let row = match form.active {
        LendField::Title => 0,
        LendField::MemberNo => 1,
    };
    let prefix = form.active.label().len() as u16 + 2;
    frame.set_cursor_position((
        inner.x + prefix + form.value_len(form.active) as u16,
        inner.y + row,
    ));
}

fn draw_prompt(frame: &mut Frame, area: Rect, action: PromptAction, form: &PromptForm) {
    let popup_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(action.dialog_title())
        .borders(Borders::ALL);
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines = vec![form.build_line(), Line::from("")];

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter to continue, Esc to cancel",
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);

    let prefix = form.label.len() as u16 + 2;
    frame.set_cursor_position((inner.x + prefix + form.value_len() as u16, inner.y));
}

fn draw_confirm(frame: &mut Frame, area: Rect, confirm: &Confirmation) {
    let popup_area = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(confirm.dialog_title())
        .borders(Borders::ALL);
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines: Vec<Line> = confirm
        .summary
        .iter()
        .map(|line| Line::from(line.clone()))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Y to confirm or N / Esc to cancel.",
        Style::default().fg(Color::Gray),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

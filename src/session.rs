//! Order-editing session.
//!
//! ```text
//! Empty -> Editing -> (Importing | ManualEditing) -> Editing
//! ```
//!
//! The kind may be switched while the session is not mid-operation; every
//! line is converted when it is.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::ProductCatalog;
use crate::error::Notice;
use crate::import::import_rows;
use crate::order::{apply_code, convert, CodeOverrides, Order, OrderKind, OrderLine, OrderSummary};
use crate::prefill::OrderPrefill;
use crate::table::{parse_delimited, Row};
use crate::traits::ProductLookup;

/// Where the session is in its editing cycle.
///
/// Between calls a session is always `Empty` or `Editing`. `Importing` and
/// `ManualEditing` are transient: they hold only while [`OrderSession::import`]
/// or a line edit runs, and each call settles back before returning. They show
/// up in the `debug!` transition logs, never in [`OrderSession::state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Empty,
    Editing,
    /// Transient, see above.
    Importing,
    /// Transient, see above.
    ManualEditing,
}

impl SessionState {
    /// Whether a session can be observed resting in this state.
    pub fn is_settled(self) -> bool {
        matches!(self, SessionState::Empty | SessionState::Editing)
    }
}

/// Snapshot handed to whoever persists or submits the order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDraft {
    pub order: Order,
    pub summary: OrderSummary,
}

/// Editing session over one order and a product lookup.
#[derive(Debug, Clone)]
pub struct OrderSession<L = ProductCatalog> {
    order: Order,
    lookup: L,
    state: SessionState,
}

impl<L: ProductLookup> OrderSession<L> {
    /// Starts an empty session.
    pub fn new(kind: OrderKind, lookup: L) -> Self {
        Self {
            order: Order::new(kind),
            lookup,
            state: SessionState::Empty,
        }
    }

    /// Starts a session with one blank line, like a freshly opened form.
    pub fn with_blank_line(kind: OrderKind, lookup: L) -> Self {
        let mut session = Self::new(kind, lookup);
        session.add_line();
        session
    }

    /// Starts a session with one line built from `prefill`.
    pub fn from_prefill(prefill: &OrderPrefill, lookup: L) -> Self {
        let mut session = Self::new(prefill.kind, lookup);
        let line = prefill.to_line(&session.lookup);
        session.order.lines.push(line);
        session.order.contract = prefill.contract.clone();
        session.settle();
        info!(kind = ?prefill.kind, contract = ?prefill.contract, "order started from prefill");
        session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn kind(&self) -> OrderKind {
        self.order.kind
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.order.lines
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn set_dates(&mut self, created_on: Option<NaiveDate>, needed_by: Option<NaiveDate>) {
        self.order.created_on = created_on;
        self.order.needed_by = needed_by;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.order.notes = notes.into();
    }

    /// Switches between purchase and transfer, converting all lines.
    pub fn switch_kind(&mut self, kind: OrderKind) {
        if self.order.kind == kind {
            return;
        }
        debug!(
            from = ?self.order.kind,
            to = ?kind,
            lines = self.order.lines.len(),
            "switching order kind"
        );
        self.order.set_kind(kind, &self.lookup);
    }

    /// Appends a blank line of the current kind and returns its index.
    pub fn add_line(&mut self) -> usize {
        self.order.lines.push(OrderLine::blank(self.order.kind));
        self.settle();
        self.order.lines.len() - 1
    }

    /// Removes the line at `index`, `None` when out of range.
    pub fn remove_line(&mut self, index: usize) -> Option<OrderLine> {
        if index >= self.order.lines.len() {
            return None;
        }
        let removed = self.order.lines.remove(index);
        self.settle();
        Some(removed)
    }

    /// Applies a manual edit to the line at `index`.
    ///
    /// Returns `false` when there is no such line. The edit cannot change
    /// the line's kind.
    pub fn edit_line<F>(&mut self, index: usize, edit: F) -> bool
    where
        F: FnOnce(&mut OrderLine),
    {
        let Some(line) = self.order.lines.get_mut(index) else {
            return false;
        };
        let kind = line.kind();
        self.state = SessionState::ManualEditing;
        edit(line);
        if line.kind() != kind {
            warn!(index, "edit changed line kind, converting back");
            *line = convert(line, kind, &self.lookup);
        }
        self.settle();
        true
    }

    /// Sets the product code of a line and refreshes the fields it drives.
    pub fn set_code(&mut self, index: usize, code: &str, overrides: &CodeOverrides) -> bool {
        let Some(line) = self.order.lines.get_mut(index) else {
            return false;
        };
        self.state = SessionState::ManualEditing;
        apply_code(line, code, &self.lookup, overrides);
        self.settle();
        true
    }

    /// Replaces every line with the normalised `rows`.
    ///
    /// All-or-nothing: when no row yields a line the current lines are kept
    /// and a notice is returned.
    pub fn import(&mut self, rows: &[Row]) -> Result<usize, Notice> {
        let previous = self.state;
        self.state = SessionState::Importing;
        let lines = import_rows(rows, self.order.kind, &self.lookup);

        if lines.is_empty() {
            warn!(rows = rows.len(), "import produced no lines, keeping current order");
            self.state = previous;
            return Err(Notice::ImportWithoutCode);
        }

        let count = lines.len();
        self.order.lines = lines;
        self.settle();
        Ok(count)
    }

    /// Parses delimited text and imports it, see [`OrderSession::import`].
    pub fn import_text(&mut self, text: &str) -> Result<usize, Notice> {
        let rows = parse_delimited(text);
        self.import(&rows)
    }

    pub fn summary(&self) -> OrderSummary {
        self.order.summary()
    }

    /// Snapshot of the current order for saving as a draft.
    pub fn save_draft(&self) -> OrderDraft {
        let draft = OrderDraft {
            order: self.order.clone(),
            summary: self.summary(),
        };
        info!(kind = ?draft.order.kind, lines = draft.summary.line_count, "draft saved");
        draft
    }

    fn settle(&mut self) {
        let next = if self.order.lines.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Editing
        };
        if next != self.state {
            debug!(from = ?self.state, to = ?next, "session state changed");
        }
        self.state = next;
    }
}

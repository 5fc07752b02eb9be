//! Domain record entity

use chrono::NaiveDate;

/// Lifecycle status of a domain as the billing platform stores it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainStatus {
    Pending,
    PendingRegistration,
    PendingTransfer,
    Active,
    Grace,
    Redemption,
    Expired,
    TransferredAway,
    Cancelled,
    Fraud,
}

impl DomainStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::PendingRegistration => "Pending Registration",
            Self::PendingTransfer => "Pending Transfer",
            Self::Active => "Active",
            Self::Grace => "Grace",
            Self::Redemption => "Redemption",
            Self::Expired => "Expired",
            Self::TransferredAway => "Transferred Away",
            Self::Cancelled => "Cancelled",
            Self::Fraud => "Fraud",
        }
    }

    /// Parse the platform's textual status. Unknown values map to `Pending`
    /// so they are never treated as active.
    pub fn from_str(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Pending Registration" => Self::PendingRegistration,
            "Pending Transfer" => Self::PendingTransfer,
            "Active" => Self::Active,
            "Grace" => Self::Grace,
            "Redemption" => Self::Redemption,
            "Expired" => Self::Expired,
            "Transferred Away" => Self::TransferredAway,
            "Cancelled" => Self::Cancelled,
            "Fraud" => Self::Fraud,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered domain as tracked by the billing platform
#[derive(Debug, Clone, PartialEq)]
pub struct DomainRecord {
    pub id: i32,
    /// Fully qualified domain name, e.g. `example.com`
    pub domain: String,
    /// Registrar module slug, compared case-insensitively
    pub registrar: String,
    pub status: DomainStatus,
    pub next_due_date: Option<NaiveDate>,
    pub next_invoice_date: Option<NaiveDate>,
    /// Append-only admin notes, one entry per line
    pub notes: String,
}

impl DomainRecord {
    pub fn new(
        id: i32,
        domain: impl Into<String>,
        registrar: impl Into<String>,
        status: DomainStatus,
    ) -> Self {
        Self {
            id,
            domain: domain.into(),
            registrar: registrar.into(),
            status,
            next_due_date: None,
            next_invoice_date: None,
            notes: String::new(),
        }
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.next_due_date = Some(due);
        self
    }

    pub fn with_invoice_date(mut self, invoice: NaiveDate) -> Self {
        self.next_invoice_date = Some(invoice);
        self
    }

    /// Registrar slug normalized for comparison
    pub fn registrar_key(&self) -> String {
        normalize(&self.registrar)
    }

    pub fn is_on_registrar(&self, registrar: &str) -> bool {
        self.registrar_key() == normalize(registrar)
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &DomainUpdate) {
        if let Some(registrar) = &update.registrar {
            self.registrar = registrar.clone();
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(due) = update.next_due_date {
            self.next_due_date = Some(due);
        }
        if let Some(invoice) = update.next_invoice_date {
            self.next_invoice_date = Some(invoice);
        }
    }

    /// Append a note line, keeping everything written before it
    pub fn push_note(&mut self, note: &str) {
        self.notes = append_note_text(&self.notes, note);
    }
}

/// Fields an update may change. `None` leaves the field as it is.
///
/// Notes are deliberately absent: they only grow through
/// [`DomainRecordStore::append_note`](super::DomainRecordStore::append_note).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainUpdate {
    pub registrar: Option<String>,
    pub status: Option<DomainStatus>,
    pub next_due_date: Option<NaiveDate>,
    pub next_invoice_date: Option<NaiveDate>,
}

impl DomainUpdate {
    pub fn due_dates(next_due_date: NaiveDate, next_invoice_date: Option<NaiveDate>) -> Self {
        Self {
            next_due_date: Some(next_due_date),
            next_invoice_date,
            ..Self::default()
        }
    }

    pub fn registrar_and_status(registrar: impl Into<String>, status: DomainStatus) -> Self {
        Self {
            registrar: Some(registrar.into()),
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Selection criteria for [`DomainRecordStore::query`](super::DomainRecordStore::query)
#[derive(Debug, Clone, PartialEq)]
pub struct DomainQuery {
    pub status: DomainStatus,
    /// Registrar slug, matched case-insensitively
    pub registrar: String,
    /// Only domains with a due date strictly after this day
    pub due_after: NaiveDate,
    /// Only domains with a due date on or before this day
    pub due_on_or_before: Option<NaiveDate>,
    /// When non-empty, only these domain names (case-insensitive)
    pub allow_list: Vec<String>,
    /// Never these domain names (case-insensitive)
    pub deny_list: Vec<String>,
}

impl DomainQuery {
    /// Evaluate the query against a single record
    pub fn matches(&self, record: &DomainRecord) -> bool {
        if record.status != self.status || !record.is_on_registrar(&self.registrar) {
            return false;
        }

        let Some(due) = record.next_due_date else {
            return false;
        };
        if due <= self.due_after {
            return false;
        }
        if let Some(limit) = self.due_on_or_before {
            if due > limit {
                return false;
            }
        }

        let name = normalize(&record.domain);
        if !self.allow_list.is_empty() && !contains_name(&self.allow_list, &name) {
            return false;
        }
        !contains_name(&self.deny_list, &name)
    }
}

/// Lower-case and trim a registrar slug or domain name
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Case-insensitive membership test for domain name lists
pub fn contains_name(list: &[String], name: &str) -> bool {
    let name = normalize(name);
    list.iter().any(|entry| normalize(entry) == name)
}

/// Join an existing notes blob with a new line, trimming surrounding blanks
pub fn append_note_text(existing: &str, note: &str) -> String {
    format!("{}\n{}", existing, note).trim().to_string()
}

// ── Tests ──────────────────────────────────────────────────────

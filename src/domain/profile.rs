//! Account profile record and its display projection.

const NOT_AVAILABLE: &str = "N/A";
const NOT_SET: &str = "Not set";
const MISSING: &str = "-";

/// Account data as returned by the backend. Every field is display-only;
/// values arrive pre-formatted as text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileRecord {
    pub username: String,
    pub email: String,
    pub account_number: Option<String>,
    pub plan_type: Option<String>,
    pub monthly_fee: Option<String>,
    pub balance: Option<String>,
    pub last_bill_date: Option<String>,
    pub last_bill_amount: Option<String>,
    pub status: Option<String>,
    pub data_usage: Option<String>,
    pub data_limit: Option<String>,
    pub contract_end_date: Option<String>,
    pub payment_method: Option<String>,
    pub auto_pay: bool,
    pub paperless_billing: bool,
}

/// One labelled line of the profile panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    pub label: &'static str,
    pub value: String,
}

impl ProfileRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

impl ProfileRecord {
    /// Projects the record into the rows shown on the profile panel.
    pub fn display_rows(&self) -> Vec<ProfileRow> {
        vec![
            ProfileRow::new("Username", self.username.clone()),
            ProfileRow::new("Email", self.email.clone()),
            ProfileRow::new("Account Number", or_missing(&self.account_number)),
            ProfileRow::new("Plan Type", or_missing(&self.plan_type)),
            ProfileRow::new("Monthly Fee", or_missing(&self.monthly_fee)),
            ProfileRow::new("Balance", or_missing(&self.balance)),
            ProfileRow::new(
                "Last Bill Date",
                or_placeholder(&self.last_bill_date, NOT_AVAILABLE),
            ),
            ProfileRow::new("Last Bill Amount", or_missing(&self.last_bill_amount)),
            ProfileRow::new("Status", or_missing(&self.status)),
            ProfileRow::new(
                "Data Usage",
                format!(
                    "{} / {}",
                    or_missing(&self.data_usage),
                    or_missing(&self.data_limit)
                ),
            ),
            ProfileRow::new(
                "Contract End Date",
                or_placeholder(&self.contract_end_date, NOT_AVAILABLE),
            ),
            ProfileRow::new(
                "Payment Method",
                or_placeholder(&self.payment_method, NOT_SET),
            ),
            ProfileRow::new("Auto Pay", enabled_label(self.auto_pay)),
            ProfileRow::new("Paperless Billing", enabled_label(self.paperless_billing)),
        ]
    }
}

fn or_missing(value: &Option<String>) -> String {
    or_placeholder(value, MISSING)
}

fn or_placeholder(value: &Option<String>, placeholder: &str) -> String {
    value
        .as_deref()
        .filter(|text| !text.is_empty())
        .unwrap_or(placeholder)
        .to_owned()
}

fn enabled_label(flag: bool) -> &'static str {
    if flag {
        "Enabled"
    } else {
        "Disabled"
    }
}

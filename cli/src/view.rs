//! Plain-text rendering of the customers screen.

use std::fmt::Write as _;

use clientes_core::{Customer, CustomerForm, CustomerId, FormMode, Notice, SearchMessage};

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => "-",
    }
}

fn id_or_dash(id: Option<&CustomerId>) -> &str {
    or_dash(id.map(CustomerId::as_str))
}

pub fn render_list(customers: &[Customer]) -> String {
    let mut out = String::from("Customers\n");
    if customers.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }
    for customer in customers {
        let _ = writeln!(out, "  {}", customer.name);
        let _ = writeln!(out, "    Tax ID: {}", customer.tax_id);
        let _ = writeln!(out, "    Email: {}", or_dash(customer.email.as_deref()));
        let _ = writeln!(out, "    Phone: {}", or_dash(customer.phone.as_deref()));
        let _ = writeln!(out, "    ID: {}", id_or_dash(customer.id.as_ref()));
    }
    out
}

/// The single-record card shown under the search box.
pub fn render_card(customer: &Customer) -> String {
    format!(
        "{} (ID {})\n  {} • {} • {}\n",
        customer.name,
        id_or_dash(customer.id.as_ref()),
        customer.tax_id,
        or_dash(customer.email.as_deref()),
        or_dash(customer.phone.as_deref()),
    )
}

pub fn render_search(query: &str, found: Option<&Customer>, message: Option<SearchMessage>) -> String {
    let mut out = format!("Search by ID: {query}\n");
    if let Some(message) = message {
        let _ = writeln!(out, "  {message}");
    }
    if let Some(customer) = found {
        out.push_str(&render_card(customer));
    }
    out
}

pub fn render_form(form: &CustomerForm, mode: &FormMode) -> String {
    let mut out = match mode {
        FormMode::Creating => String::from("Add customer\n"),
        FormMode::Editing(id) => format!("Edit customer (ID {id})\n"),
    };
    let _ = writeln!(out, "  Name: {}", form.name);
    let _ = writeln!(out, "  Tax ID: {}", form.tax_id);
    let _ = writeln!(out, "  Email: {}", form.email);
    let _ = writeln!(out, "  Phone: {}", form.phone);
    out
}

pub fn render_notices(notices: &[Notice]) -> String {
    notices.iter().map(|notice| format!("{notice}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bea() -> Customer {
        Customer {
            id: Some(CustomerId::from(7)),
            name: "Bea".to_string(),
            tax_id: "222".to_string(),
            email: Some(String::new()),
            phone: None,
        }
    }

    #[test]
    fn list_shows_dash_for_missing_contact() {
        let out = render_list(&[bea()]);
        assert!(out.contains("  Bea\n"));
        assert!(out.contains("Tax ID: 222"));
        assert!(out.contains("Email: -"));
        assert!(out.contains("Phone: -"));
        assert!(out.contains("ID: 7"));
    }

    #[test]
    fn row_without_id_shows_dash() {
        let customer = Customer { id: None, ..bea() };
        assert!(render_list(&[customer.clone()]).contains("ID: -\n"));
        assert_eq!(render_card(&customer), "Bea (ID -)\n  222 • - • -\n");
    }

    #[test]
    fn empty_list_says_none() {
        assert_eq!(render_list(&[]), "Customers\n  (none)\n");
    }

    #[test]
    fn card_is_one_summary_line() {
        assert_eq!(render_card(&bea()), "Bea (ID 7)\n  222 • - • -\n");
    }

    #[test]
    fn search_shows_message() {
        let out = render_search("42", None, Some(SearchMessage::NotFound));
        assert_eq!(out, "Search by ID: 42\n  Customer not found.\n");
    }

    #[test]
    fn form_header_follows_mode() {
        let form = CustomerForm::default();
        assert!(render_form(&form, &FormMode::Creating).starts_with("Add customer\n"));
        let editing = FormMode::Editing(CustomerId::from(7));
        assert!(render_form(&form, &editing).starts_with("Edit customer (ID 7)\n"));
    }

    #[test]
    fn notices_one_per_line() {
        let out = render_notices(&[Notice::LoadFailed, Notice::CreateFailed]);
        assert_eq!(out, "Error: Could not load customers\nError: Could not add customer\n");
    }
}

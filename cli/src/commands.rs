//! One-shot subcommands. Each runs one session operation and reports what
//! the screen would have shown.

use clientes_core::{
    ClientConfig, CustomerForm, CustomerId, CustomerSession, DeleteConfirmation, Transport,
};

use crate::view;

pub(crate) const NO_RECORD_ID: &str = "This customer has no ID and cannot be edited.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    fn ok(output: String) -> Self {
        Self {
            exit_code: 0,
            output,
        }
    }

    fn failed(output: String) -> Self {
        Self {
            exit_code: 1,
            output,
        }
    }
}

/// Fields given on the command line for an update; `None` keeps the
/// current value.
#[derive(Debug, Clone, Default)]
pub struct FieldChanges {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl FieldChanges {
    pub fn apply(self, form: &mut CustomerForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(tax_id) = self.tax_id {
            form.tax_id = tax_id;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
        if let Some(phone) = self.phone {
            form.phone = phone;
        }
    }
}

fn with_notices<T: Transport>(session: &mut CustomerSession<T>, mut output: String) -> String {
    output.push_str(&view::render_notices(&session.take_notices()));
    output
}

pub fn list<T: Transport>(session: &mut CustomerSession<T>) -> CommandResult {
    match session.load_customers() {
        Ok(_) => CommandResult::ok(view::render_list(session.customers())),
        Err(_) => CommandResult::failed(with_notices(session, String::new())),
    }
}

pub fn get<T: Transport>(session: &mut CustomerSession<T>, id: &str) -> CommandResult {
    match session.search_for(id) {
        Ok(customer) => CommandResult::ok(view::render_card(&customer)),
        Err(_) => search_failure(session),
    }
}

pub fn create<T: Transport>(session: &mut CustomerSession<T>, form: CustomerForm) -> CommandResult {
    *session.form_mut() = form;
    match session.create() {
        Ok(()) => {
            let output = format!("Customer added.\n\n{}", view::render_list(session.customers()));
            CommandResult::ok(with_notices(session, output))
        }
        Err(_) => CommandResult::failed(with_notices(session, String::new())),
    }
}

/// Load the record, overlay the given fields, and send the full record back.
pub fn update<T: Transport>(
    session: &mut CustomerSession<T>,
    id: &str,
    changes: FieldChanges,
) -> CommandResult {
    let current = match session.search_for(id) {
        Ok(customer) => customer,
        Err(_) => return search_failure(session),
    };
    if session.start_edit(&current).is_err() {
        return CommandResult::failed(format!("{NO_RECORD_ID}\n"));
    }
    changes.apply(session.form_mut());

    match session.update() {
        Ok(()) => {
            let output = format!(
                "Customer {} updated.\n\n{}",
                id.trim(),
                view::render_list(session.customers())
            );
            CommandResult::ok(with_notices(session, output))
        }
        Err(_) => CommandResult::failed(with_notices(session, String::new())),
    }
}

fn search_failure<T: Transport>(session: &CustomerSession<T>) -> CommandResult {
    let message = session
        .search_message()
        .map(|message| format!("{message}\n"))
        .unwrap_or_default();
    CommandResult::failed(message)
}

pub fn delete<T, F>(session: &mut CustomerSession<T>, id: &str, confirm: F) -> CommandResult
where
    T: Transport,
    F: FnOnce(&DeleteConfirmation) -> bool,
{
    let id = CustomerId::new(id.trim());
    if id.as_str().is_empty() {
        return CommandResult::failed("Enter an ID to delete.\n".to_string());
    }
    match session.delete_with(id.clone(), confirm) {
        Ok(true) => CommandResult::ok(with_notices(session, format!("Customer {id} deleted.\n"))),
        Ok(false) => CommandResult::ok("Deletion cancelled.\n".to_string()),
        Err(_) => CommandResult::failed(with_notices(session, String::new())),
    }
}

pub fn config(config: &ClientConfig) -> CommandResult {
    let output = format!(
        "effective config (precedence: flags > env > file > default):\n\
         base_url = {}\n\
         logging.level = {}\n\
         logging.format = {:?}\n",
        config.base_url, config.logging.level, config.logging.format
    );
    CommandResult::ok(output)
}

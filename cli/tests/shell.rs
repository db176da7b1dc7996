//! Drive the shell and the one-shot commands against a live mock server.

mod common;

use clientes_cli::commands::{self, FieldChanges};
use clientes_cli::shell;
use clientes_cli::transport::UreqTransport;
use clientes_core::{CustomerForm, CustomerSession};

use common::{session, start_server};

fn run_shell(session: &mut CustomerSession<UreqTransport>, script: &str) -> String {
    let mut output = Vec::new();
    shell::run(session, script.as_bytes(), &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

fn form(name: &str, tax_id: &str) -> CustomerForm {
    CustomerForm {
        name: name.to_string(),
        tax_id: tax_id.to_string(),
        ..Default::default()
    }
}

#[test]
fn shell_add_search_edit_delete() {
    let addr = start_server();
    let mut session = session(addr);

    let output = run_shell(
        &mut session,
        "name Ana\n\
         cpf 111\n\
         submit\n\
         search 1\n\
         edit\n\
         name Ana Maria\n\
         form\n\
         submit\n\
         delete 1\n\
         y\n\
         quit\n",
    );

    assert!(output.starts_with("Customers\n  (none)\n"), "{output}");
    assert!(output.contains("Customer added."));
    assert!(output.contains("Ana (ID 1)"));
    assert!(output.contains("Edit customer (ID 1)\n  Name: Ana Maria"));
    assert!(output.contains("Customer 1 updated."));
    assert!(output.contains("Confirm deletion: Do you really want to delete this customer? [y/N]"));
    assert!(output.contains("Customer 1 deleted."));

    assert!(session.customers().is_empty());
    assert!(session.found().is_none());
    assert!(!session.is_editing());
}

#[test]
fn shell_local_rejections_and_declined_delete() {
    let addr = start_server();
    let mut session = session(addr);
    commands::create(&mut session, form("Bea", "222"));

    let output = run_shell(
        &mut session,
        "search   \n\
         name Caio\n\
         submit\n\
         search 99\n\
         delete 1\n\
         n\n\
         bogus\n",
    );

    assert!(output.contains("Enter an ID to search."));
    assert!(output.contains("Error: Name and tax ID are required"));
    assert!(output.contains("Customer not found."));
    assert!(output.contains("Deletion cancelled."));
    assert!(output.contains("Unknown command `bogus`"));
    assert_eq!(session.customers().len(), 1);
    assert_eq!(session.form().name, "Caio");
}

#[test]
fn one_shot_commands_round_trip() {
    let addr = start_server();
    let mut session = session(addr);

    let result = commands::create(&mut session, form("Ana", "111"));
    assert_eq!(result.exit_code, 0, "{}", result.output);
    assert!(result.output.contains("Customer added."));

    let result = commands::get(&mut session, "1");
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.output, "Ana (ID 1)\n  111 • - • -\n");

    let changes = FieldChanges {
        email: Some("ana@example.com".to_string()),
        ..Default::default()
    };
    let result = commands::update(&mut session, "1", changes);
    assert_eq!(result.exit_code, 0, "{}", result.output);
    assert!(result.output.contains("Email: ana@example.com"));
    assert!(result.output.contains("Tax ID: 111"));

    let result = commands::update(&mut session, "5", FieldChanges::default());
    assert_eq!(result.exit_code, 1);
    assert_eq!(result.output, "Customer not found.\n");

    let result = commands::delete(&mut session, "1", |_| true);
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.output, "Customer 1 deleted.\n");

    let result = commands::list(&mut session);
    assert_eq!(result.output, "Customers\n  (none)\n");

    let result = commands::delete(&mut session, "1", |_| true);
    assert_eq!(result.exit_code, 1);
    assert_eq!(result.output, "Error: Could not delete customer\n");
}

#[test]
fn create_rejects_blank_tax_id_without_calling_server() {
    // Nothing listens here, so any request would surface as a load notice.
    let mut session = session(common::dead_addr());

    let result = commands::create(&mut session, form("Ana", "   "));
    assert_eq!(result.exit_code, 1);
    assert_eq!(result.output, "Error: Name and tax ID are required\n");
}

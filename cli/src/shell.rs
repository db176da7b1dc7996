//! Interactive, line-oriented customers screen.
//!
//! One command per line. The shell loads the list on start, then every
//! command runs against the same session so search results, edit mode and
//! the form carry over between lines.

use std::io::{self, BufRead, Write};

use clientes_core::{CustomerId, CustomerSession, Transport};

use crate::commands::NO_RECORD_ID;
use crate::view;

const HELP: &str = "\
Commands:
  list                 show the customer list
  refresh              reload the list from the server
  search <id>          look a customer up by ID
  clear                clear the search
  edit [id]            load a listed or found customer into the form
  cancel               leave edit mode and clear the form
  name <text>          set the name field
  taxid <text>         set the tax ID (CPF) field
  email <text>         set the email field
  phone <text>         set the phone field
  form                 show the form
  submit               add the customer, or save changes in edit mode
  delete <id>          delete a customer after confirmation
  show                 redraw the whole screen
  help                 show this help
  quit                 leave
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    TaxId,
    Email,
    Phone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    List,
    Refresh,
    Search(String),
    Clear,
    Edit(Option<String>),
    Cancel,
    Set(Field, String),
    Form,
    Submit,
    Delete(String),
    Show,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "list" | "ls" => Self::List,
            "refresh" => Self::Refresh,
            "search" | "find" => Self::Search(rest.to_string()),
            "clear" => Self::Clear,
            "edit" => Self::Edit(Some(rest.to_string()).filter(|id| !id.is_empty())),
            "cancel" => Self::Cancel,
            "name" => Self::Set(Field::Name, rest.to_string()),
            "taxid" | "tax-id" | "cpf" => Self::Set(Field::TaxId, rest.to_string()),
            "email" => Self::Set(Field::Email, rest.to_string()),
            "phone" => Self::Set(Field::Phone, rest.to_string()),
            "form" => Self::Form,
            "submit" | "save" => Self::Submit,
            "delete" | "rm" => Self::Delete(rest.to_string()),
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("Unknown command `{other}`. Type `help` for the list.")),
        };
        Ok(command)
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Drive `session` from `input` until `quit` or end of input.
pub fn run<T, R, W>(session: &mut CustomerSession<T>, mut input: R, mut output: W) -> io::Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    let _ = session.load_customers();
    write!(output, "{}", view::render_list(session.customers()))?;
    write!(output, "{}", view::render_notices(&session.take_notices()))?;

    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let flow = match ShellCommand::parse(&line) {
            Ok(command) => execute(session, command, &mut input, &mut output)?,
            Err(message) => {
                writeln!(output, "{message}")?;
                Flow::Continue
            }
        };
        write!(output, "{}", view::render_notices(&session.take_notices()))?;

        if let Flow::Quit = flow {
            break;
        }
    }
    Ok(())
}

fn execute<T, R, W>(
    session: &mut CustomerSession<T>,
    command: ShellCommand,
    input: &mut R,
    output: &mut W,
) -> io::Result<Flow>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    match command {
        ShellCommand::Empty => {}
        ShellCommand::List => write!(output, "{}", view::render_list(session.customers()))?,
        ShellCommand::Refresh => {
            writeln!(output, "Refreshing...")?;
            if session.refresh().is_ok() {
                write!(output, "{}", view::render_list(session.customers()))?;
            }
        }
        ShellCommand::Search(query) => {
            let _ = session.search_for(query);
            write_search(session, output)?;
        }
        ShellCommand::Clear => {
            session.clear_search();
            write_search(session, output)?;
        }
        ShellCommand::Edit(id) => {
            let target = match id {
                Some(id) => session.find_cached(&CustomerId::new(id)).cloned(),
                None => session.found().cloned(),
            };
            match target {
                Some(customer) => match session.start_edit(&customer) {
                    Ok(()) => write_form(session, output)?,
                    Err(_) => writeln!(output, "{NO_RECORD_ID}")?,
                },
                None => writeln!(output, "No such customer on screen. Search or list first.")?,
            }
        }
        ShellCommand::Cancel => {
            session.cancel_edit();
            write_form(session, output)?;
        }
        ShellCommand::Set(field, value) => {
            let form = session.form_mut();
            match field {
                Field::Name => form.name = value,
                Field::TaxId => form.tax_id = value,
                Field::Email => form.email = value,
                Field::Phone => form.phone = value,
            }
        }
        ShellCommand::Form => write_form(session, output)?,
        ShellCommand::Submit => {
            let editing = session.mode().editing_id().cloned();
            if session.submit().is_ok() {
                match editing {
                    Some(id) => writeln!(output, "Customer {id} updated.")?,
                    None => writeln!(output, "Customer added.")?,
                }
                write!(output, "{}", view::render_list(session.customers()))?;
            }
        }
        ShellCommand::Delete(id) => {
            if id.is_empty() {
                writeln!(output, "Enter an ID to delete.")?;
                return Ok(Flow::Continue);
            }
            let confirmation = session.request_delete(CustomerId::new(id));
            write!(
                output,
                "{}: {} [y/N] ",
                confirmation.title(),
                confirmation.message()
            )?;
            output.flush()?;

            let mut answer = String::new();
            input.read_line(&mut answer)?;
            if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                if session.confirm_delete().is_ok() {
                    writeln!(output, "Customer {} deleted.", confirmation.id)?;
                    write!(output, "{}", view::render_list(session.customers()))?;
                }
            } else {
                session.cancel_delete();
                writeln!(output, "Deletion cancelled.")?;
            }
        }
        ShellCommand::Show => {
            write!(output, "{}", view::render_list(session.customers()))?;
            write_search(session, output)?;
            write_form(session, output)?;
        }
        ShellCommand::Help => write!(output, "{HELP}")?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn write_search<T: Transport, W: Write>(session: &CustomerSession<T>, output: &mut W) -> io::Result<()> {
    write!(
        output,
        "{}",
        view::render_search(session.search_query(), session.found(), session.search_message())
    )
}

fn write_form<T: Transport, W: Write>(session: &CustomerSession<T>, output: &mut W) -> io::Result<()> {
    write!(output, "{}", view::render_form(session.form(), session.mode()))
}

#[cfg(test)]
mod tests {
    use clientes_core::{CustomerClient, HttpRequest, HttpResponse, TransportError};

    use super::*;

    /// Empty list, and every lookup answers with a record that has no id.
    fn id_less_lookup(req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let body = if req.path.ends_with("/clientes") {
            "[]"
        } else {
            r#"{"nome":"Caio","cpf":"333"}"#
        };
        Ok(HttpResponse::new(200, body))
    }

    #[test]
    fn found_record_without_id_is_not_editable() {
        let mut session = CustomerSession::new(CustomerClient::new("http://api.test"), id_less_lookup);
        let mut output = Vec::new();
        run(&mut session, "search 9\nedit\n".as_bytes(), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Caio (ID -)"), "{output}");
        assert!(output.contains(NO_RECORD_ID));
        assert!(!session.is_editing());
    }

    #[test]
    fn parses_verbs_and_arguments() {
        assert_eq!(ShellCommand::parse("list\n"), Ok(ShellCommand::List));
        assert_eq!(ShellCommand::parse("  search  42 "), Ok(ShellCommand::Search("42".to_string())));
        assert_eq!(ShellCommand::parse("SUBMIT"), Ok(ShellCommand::Submit));
        assert_eq!(ShellCommand::parse(""), Ok(ShellCommand::Empty));
    }

    #[test]
    fn field_values_keep_inner_spaces() {
        assert_eq!(
            ShellCommand::parse("name Ana Maria da Silva"),
            Ok(ShellCommand::Set(Field::Name, "Ana Maria da Silva".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("cpf 123.456.789-09"),
            Ok(ShellCommand::Set(Field::TaxId, "123.456.789-09".to_string()))
        );
    }

    #[test]
    fn setter_without_value_clears_field() {
        assert_eq!(ShellCommand::parse("email"), Ok(ShellCommand::Set(Field::Email, String::new())));
    }

    #[test]
    fn edit_argument_is_optional() {
        assert_eq!(ShellCommand::parse("edit"), Ok(ShellCommand::Edit(None)));
        assert_eq!(ShellCommand::parse("edit 7"), Ok(ShellCommand::Edit(Some("7".to_string()))));
    }

    #[test]
    fn search_without_id_is_still_a_search() {
        assert_eq!(ShellCommand::parse("search"), Ok(ShellCommand::Search(String::new())));
    }

    #[test]
    fn unknown_verb_is_reported() {
        let err = ShellCommand::parse("frobnicate 3").unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}

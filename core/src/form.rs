//! Form state for adding or editing a customer.

use crate::error::ValidationError;
use crate::types::{Customer, CustomerId, CustomerInput};

/// Text fields as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub name: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
}

impl CustomerForm {
    /// Copy a record into the form. Absent optional fields become empty.
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            tax_id: customer.tax_id.clone(),
            email: customer.email.clone().unwrap_or_default(),
            phone: customer.phone.clone().unwrap_or_default(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Name and tax id must be non-blank. Values are otherwise sent as typed.
    pub fn validate(&self) -> Result<CustomerInput, ValidationError> {
        if self.name.trim().is_empty() || self.tax_id.trim().is_empty() {
            return Err(ValidationError::MissingRequiredFields);
        }
        Ok(self.to_input())
    }

    pub fn to_input(&self) -> CustomerInput {
        CustomerInput {
            name: self.name.clone(),
            tax_id: self.tax_id.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Whether the form describes a new record or changes to an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(CustomerId),
}

impl FormMode {
    pub fn editing_id(&self) -> Option<&CustomerId> {
        match self {
            FormMode::Creating => None,
            FormMode::Editing(id) => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, FormMode::Editing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, tax_id: &str) -> CustomerForm {
        CustomerForm {
            name: name.to_string(),
            tax_id: tax_id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        assert_eq!(form("", "111").validate(), Err(ValidationError::MissingRequiredFields));
        assert_eq!(form("Ana", "").validate(), Err(ValidationError::MissingRequiredFields));
        assert_eq!(form("   ", "111").validate(), Err(ValidationError::MissingRequiredFields));
        assert_eq!(form("Ana", "\t").validate(), Err(ValidationError::MissingRequiredFields));
    }

    #[test]
    fn values_are_sent_untrimmed() {
        let input = form(" Ana ", "111").validate().unwrap();
        assert_eq!(input.name, " Ana ");
        assert_eq!(input.email, "");
    }

    #[test]
    fn from_customer_fills_missing_optionals_with_empty_text() {
        let customer = Customer {
            id: Some(CustomerId::from(3)),
            name: "Caio".to_string(),
            tax_id: "333".to_string(),
            email: None,
            phone: Some("9999".to_string()),
        };
        let form = CustomerForm::from_customer(&customer);
        assert_eq!(form.name, "Caio");
        assert_eq!(form.email, "");
        assert_eq!(form.phone, "9999");
    }

    #[test]
    fn clear_resets_every_field() {
        let mut f = form("Ana", "111");
        f.email = "a@x".to_string();
        f.clear();
        assert!(f.is_empty());
    }

    #[test]
    fn mode_reports_editing_id() {
        assert_eq!(FormMode::default().editing_id(), None);
        let mode = FormMode::Editing(CustomerId::from(7));
        assert!(mode.is_editing());
        assert_eq!(mode.editing_id(), Some(&CustomerId::from(7)));
    }
}

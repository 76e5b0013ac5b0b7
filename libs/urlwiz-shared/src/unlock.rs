use serde::Deserialize;
use validator::Validate;

use crate::models::{UnlockRequest, UnlockResponse};
use crate::search_form::Navigation;

pub const CHECKOUT_UNAVAILABLE: &str =
    "We could not start the checkout. Please try again in a moment.";

/// Contact details collected by the unlock dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct UnlockForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

impl UnlockForm {
    pub fn check(&self) -> FieldErrors {
        let Err(errors) = self.validate() else {
            return FieldErrors::default();
        };
        let fields = errors.field_errors();
        let message = |field: &str| {
            fields.get(field).and_then(|errs| {
                errs.first().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {field}"))
                })
            })
        };

        FieldErrors {
            name: message("name"),
            email: message("email"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UnlockState {
    #[default]
    Open,
    Submitting,
    Redirecting(String),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnlockDialog {
    pub state: UnlockState,
    pub form: UnlockForm,
    pub errors: FieldErrors,
}

impl UnlockDialog {
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            UnlockState::Submitting | UnlockState::Redirecting(_)
        )
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            UnlockState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Validates the form and, when it passes, moves to Submitting and returns
    /// the request body. Invalid input leaves field errors behind and yields
    /// nothing, so no request goes out.
    pub fn begin_submit(&mut self, form: UnlockForm) -> Option<UnlockRequest> {
        if self.is_busy() {
            return None;
        }

        self.errors = form.check();
        self.form = form;
        if !self.errors.is_empty() {
            self.state = UnlockState::Open;
            return None;
        }

        self.state = UnlockState::Submitting;
        Some(UnlockRequest {
            name: self.form.name.trim().to_string(),
            email: self.form.email.trim().to_string(),
        })
    }

    /// A reply with a checkout url hands the browser over to it; anything
    /// else keeps the dialog open with a visible error.
    pub fn finish_submit<E>(&mut self, outcome: Result<UnlockResponse, E>) -> Option<Navigation> {
        if self.state != UnlockState::Submitting {
            return None;
        }

        let url = outcome
            .ok()
            .and_then(|response| response.url)
            .filter(|url| !url.trim().is_empty());

        match url {
            Some(url) => {
                self.state = UnlockState::Redirecting(url.clone());
                Some(Navigation::To(url))
            }
            None => {
                self.state = UnlockState::Failed(CHECKOUT_UNAVAILABLE.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str) -> UnlockForm {
        UnlockForm {
            name: "Joe Smith".to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn accepts_plain_address() {
        assert!(form("a@b.com").check().is_empty());
    }

    #[test]
    fn rejects_malformed_address() {
        let errors = form("not-an-email").check();
        assert_eq!(errors.email.as_deref(), Some("Invalid email address"));
        assert_eq!(errors.name, None);
    }

    #[test]
    fn invalid_email_produces_no_request() {
        let mut dialog = UnlockDialog::default();
        assert_eq!(dialog.begin_submit(form("not-an-email")), None);
        assert_eq!(dialog.state, UnlockState::Open);
        assert!(dialog.errors.email.is_some());
        assert_eq!(dialog.form.email, "not-an-email");
    }

    #[test]
    fn checkout_url_redirects() {
        let mut dialog = UnlockDialog::default();
        let request = dialog.begin_submit(form("a@b.com")).unwrap();
        assert_eq!(request.email, "a@b.com");
        assert!(dialog.is_busy());

        let nav = dialog.finish_submit::<()>(Ok(UnlockResponse {
            url: Some("https://checkout.example/x".to_string()),
        }));
        assert_eq!(
            nav,
            Some(Navigation::To("https://checkout.example/x".to_string()))
        );
        assert_eq!(
            dialog.state,
            UnlockState::Redirecting("https://checkout.example/x".to_string())
        );
    }

    #[test]
    fn missing_url_keeps_dialog_open_with_error() {
        let mut dialog = UnlockDialog::default();
        dialog.begin_submit(form("a@b.com")).unwrap();

        assert_eq!(dialog.finish_submit::<()>(Ok(UnlockResponse::default())), None);
        assert_eq!(dialog.error_message(), Some(CHECKOUT_UNAVAILABLE));
        assert!(!dialog.is_busy());
    }

    #[test]
    fn busy_dialog_refuses_resubmission() {
        let mut dialog = UnlockDialog::default();
        assert!(dialog.begin_submit(form("a@b.com")).is_some());
        assert!(dialog.begin_submit(form("a@b.com")).is_none());
    }

    #[test]
    fn failed_dialog_can_retry() {
        let mut dialog = UnlockDialog::default();
        dialog.begin_submit(form("a@b.com")).unwrap();
        dialog.finish_submit::<&str>(Err("timeout"));

        assert!(dialog.begin_submit(form("a@b.com")).is_some());
        assert_eq!(dialog.state, UnlockState::Submitting);
    }
}

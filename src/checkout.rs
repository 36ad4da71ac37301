//! Plan purchase from the landing page.

use std::cell::Cell;
use std::rc::Rc;

use crate::errors::SecureLinkError;
use crate::host::Navigator;
use crate::logger;
use crate::page::Region;
use crate::view::{Fragment, PlanCard};
use crate::Client;

pub const FREE_TRIAL_PLAN_ID: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub id: u32,
    pub name: &'static str,
    pub price_display: &'static str,
}

pub const PLANS: [Plan; 4] = [
    Plan {
        id: FREE_TRIAL_PLAN_ID,
        name: "3 days free",
        price_display: "0 ₽",
    },
    Plan {
        id: 1,
        name: "1 month",
        price_display: "99 ₽",
    },
    Plan {
        id: 2,
        name: "6 months",
        price_display: "499 ₽",
    },
    Plan {
        id: 3,
        name: "12 months",
        price_display: "999 ₽",
    },
];

impl Plan {
    pub fn find(id: u32) -> Option<Plan> {
        PLANS.into_iter().find(|plan| plan.id == id)
    }

    pub fn is_free_trial(&self) -> bool {
        self.id == FREE_TRIAL_PLAN_ID
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The trial was activated; the server's message is shown to the user.
    TrialActivated { message: String },
    /// The browser was sent to the payment provider.
    PaymentStarted { confirmation_url: String },
}

/// Same shape the landing form accepts: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1)
}

/// Releases the pay button when the submit that took it finishes or is dropped.
struct SubmitGuard<'a> {
    submitting: &'a Cell<bool>,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.submitting.set(false);
    }
}

pub struct Checkout {
    client: Client,
    navigator: Rc<dyn Navigator>,
    plans: Rc<dyn Region>,
    status: Rc<dyn Region>,
    selected: Cell<Option<Plan>>,
    free_trial_used: Cell<bool>,
    submitting: Cell<bool>,
}

impl Checkout {
    pub fn new(
        client: Client,
        navigator: Rc<dyn Navigator>,
        plans: Rc<dyn Region>,
        status: Rc<dyn Region>,
    ) -> Self {
        let checkout = Self {
            client,
            navigator,
            plans,
            status,
            selected: Cell::new(None),
            free_trial_used: Cell::new(false),
            submitting: Cell::new(false),
        };
        checkout.render_plans();
        checkout
    }

    pub fn selected(&self) -> Option<Plan> {
        self.selected.get()
    }

    pub fn select(&self, plan_id: u32) -> Result<Plan, SecureLinkError> {
        let plan = Plan::find(plan_id).ok_or(SecureLinkError::UnknownPlan(plan_id))?;

        self.selected.set(Some(plan));
        self.render_plans();
        self.status.render(Fragment::Text(format!(
            "Status: plan \"{}\" selected ({})",
            plan.name, plan.price_display
        )));

        Ok(plan)
    }

    /// Whether an order is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// Activates the free trial or starts a payment for the selected plan.
    ///
    /// Only one order is in flight at a time; a second submit is refused
    /// without touching the status line.
    pub async fn submit(&self, email: &str) -> Result<CheckoutOutcome, SecureLinkError> {
        if self.submitting.get() {
            logger::debug(self.client.debug, "CHECKOUT", "Order already in flight, ignoring submit");
            return Err(SecureLinkError::CheckoutInProgress);
        }
        let email = email.trim();

        let plan = self.selected.get().ok_or(SecureLinkError::NoPlanSelected);
        let plan = plan.and_then(|plan| {
            if !is_valid_email(email) {
                Err(SecureLinkError::InvalidEmail)
            } else if plan.is_free_trial() && self.free_trial_used.get() {
                Err(SecureLinkError::TrialAlreadyUsed)
            } else {
                Ok(plan)
            }
        });
        let plan = match plan {
            Ok(plan) => plan,
            Err(err) => {
                self.status.render(Fragment::Error(err.to_string()));
                return Err(err);
            }
        };

        self.submitting.set(true);
        let _guard = SubmitGuard {
            submitting: &self.submitting,
        };
        self.status
            .render(Fragment::Text("Status: processing order...".to_string()));

        let result = if plan.is_free_trial() {
            self.client
                .free_trial(email)
                .await
                .map(|message| CheckoutOutcome::TrialActivated { message })
        } else {
            self.client
                .create_payment(email, plan.id)
                .await
                .map(|confirmation_url| CheckoutOutcome::PaymentStarted { confirmation_url })
        };

        match &result {
            Ok(CheckoutOutcome::TrialActivated { message }) => {
                self.free_trial_used.set(true);
                self.status.render(Fragment::Text(message.clone()));
            }
            Ok(CheckoutOutcome::PaymentStarted { confirmation_url }) => {
                logger::debug(self.client.debug, "CHECKOUT", "Redirecting to payment");
                self.navigator.navigate(confirmation_url);
            }
            Err(err) => {
                logger::error("CHECKOUT", &format!("Order for plan {} failed: {}", plan.id, err));
                let message = match err {
                    e if e.is_api_rejection() => format!("Error: {}", api_message(e)),
                    SecureLinkError::MissingField(_) => "Error: confirmation URL is missing".to_string(),
                    _ => "Error while processing the order".to_string(),
                };
                self.status.render(Fragment::Error(message));
            }
        }

        result
    }

    fn render_plans(&self) {
        let selected = self.selected.get().map(|plan| plan.id);
        self.plans.render(Fragment::Plans(
            PLANS
                .iter()
                .map(|plan| PlanCard {
                    id: plan.id,
                    name: plan.name.to_string(),
                    price: plan.price_display.to_string(),
                    selected: selected == Some(plan.id),
                })
                .collect(),
        ));
    }
}

fn api_message(err: &SecureLinkError) -> String {
    match err {
        SecureLinkError::BadRequest(message)
        | SecureLinkError::Unauthorized(message)
        | SecureLinkError::Forbidden(message)
        | SecureLinkError::NotFound(message)
        | SecureLinkError::ServerError(_, message) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b@mail.co.uk"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn catalogue() {
        assert!(Plan::find(FREE_TRIAL_PLAN_ID).unwrap().is_free_trial());
        assert_eq!(Plan::find(2).unwrap().price_display, "499 ₽");
        assert_eq!(Plan::find(42), None);
    }
}

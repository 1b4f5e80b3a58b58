use votemap_entities::{id::Id, votee::NewVotee};

use crate::{
    gateways::notify::Notify,
    store::CategoryStore,
    ui::multi_select::{MultiSelect, SelectOption},
    util::validate::Validate as _,
};

pub const INVALID_FORM_MESSAGE: &str =
    "Please fill in all fields and select at least one category.";

/// The values of a valid votee form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteeFormData {
    pub name: String,
    pub message: String,
    pub categories: Vec<Id>,
}

impl From<VoteeFormData> for NewVotee {
    fn from(from: VoteeFormData) -> Self {
        let VoteeFormData {
            name,
            message,
            categories,
        } = from;
        Self {
            name,
            message,
            categories,
        }
    }
}

/// State of the votee submission form.
#[derive(Debug, Default, Clone)]
pub struct VoteForm {
    pub name: String,
    pub message: String,
    pub categories: MultiSelect,
    pub pending: bool,
}

impl VoteForm {
    pub fn new(pending: bool) -> Self {
        Self {
            pending,
            ..Default::default()
        }
    }

    pub const fn submit_label(&self) -> &'static str {
        if self.pending {
            "Saving..."
        } else {
            "Save"
        }
    }

    pub const fn is_submit_enabled(&self) -> bool {
        !self.pending
    }

    /// The trimmed values if they are complete.
    pub fn data(&self) -> Option<VoteeFormData> {
        let data = VoteeFormData {
            name: self.name.trim().to_string(),
            message: self.message.trim().to_string(),
            categories: self.categories.selected().to_vec(),
        };
        NewVotee::from(data.clone()).validate().ok().map(|()| data)
    }

    /// Hands the values to `on_submit` if they are complete.
    ///
    /// Otherwise a single notification is raised. The entered
    /// values are kept in both cases.
    pub fn submit<F>(&self, notify: &dyn Notify, on_submit: F) -> bool
    where
        F: FnOnce(VoteeFormData),
    {
        match self.data() {
            Some(data) => {
                on_submit(data);
                true
            }
            None => {
                notify.error(INVALID_FORM_MESSAGE);
                false
            }
        }
    }

    /// Fetches the selectable categories.
    pub async fn load_categories(&mut self, store: &CategoryStore) {
        let options = category_options(store).await;
        self.categories.set_options(options);
    }
}

/// The categories as selectable options.
///
/// A failure results in an empty list, the store has already
/// notified the user about it.
pub async fn category_options(store: &CategoryStore) -> Vec<SelectOption> {
    match store.fetch_categories().await {
        Ok(categories) => categories.into_iter().map(SelectOption::from).collect(),
        Err(err) => {
            log::warn!("Continue without categories: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::gateways::notify::Notification;

    #[derive(Default)]
    struct Notifications(RefCell<Vec<Notification>>);

    impl Notify for Notifications {
        fn notify(&self, notification: Notification) {
            self.0.borrow_mut().push(notification);
        }
    }

    fn form(name: &str, message: &str, categories: &[&str]) -> VoteForm {
        let mut form = VoteForm {
            name: name.into(),
            message: message.into(),
            ..Default::default()
        };
        for id in categories {
            form.categories.toggle(&Id::from(*id));
        }
        form
    }

    #[test]
    fn submit_complete_form_exactly_once() {
        let notify = Notifications::default();
        let submitted = RefCell::new(Vec::new());
        let form = form("Alice", "Great neighbor", &["c1"]);
        assert!(form.submit(&notify, |data| submitted.borrow_mut().push(data)));
        assert_eq!(
            *submitted.borrow(),
            vec![VoteeFormData {
                name: "Alice".into(),
                message: "Great neighbor".into(),
                categories: vec!["c1".into()],
            }]
        );
        assert!(notify.0.borrow().is_empty());
        assert_eq!(form.name, "Alice");
    }

    #[test]
    fn trim_values() {
        let form = form("  Alice ", "\tGreat neighbor\n", &["c1"]);
        let data = form.data().unwrap();
        assert_eq!(data.name, "Alice");
        assert_eq!(data.message, "Great neighbor");
    }

    #[test]
    fn reject_incomplete_forms_with_one_notification() {
        for form in [
            form("", "Great neighbor", &["c1"]),
            form("Alice", "   ", &["c1"]),
            form("Alice", "Great neighbor", &[]),
        ] {
            let notify = Notifications::default();
            let mut called = false;
            assert!(!form.submit(&notify, |_| called = true));
            assert!(!called);
            assert_eq!(
                *notify.0.borrow(),
                vec![Notification::error(INVALID_FORM_MESSAGE)]
            );
        }
    }

    #[test]
    fn pending_form() {
        let form = VoteForm::new(true);
        assert_eq!(form.submit_label(), "Saving...");
        assert!(!form.is_submit_enabled());
        assert_eq!(VoteForm::new(false).submit_label(), "Save");
    }
}

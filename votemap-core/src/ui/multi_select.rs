use votemap_entities::{category::Category, id::Id};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: Id,
    pub name: String,
}

impl From<Category> for SelectOption {
    fn from(from: Category) -> Self {
        let Category { id, name } = from;
        Self { id, name }
    }
}

/// State of a searchable multi-value selector.
///
/// All mutating methods return the complete list of selected ids
/// if and only if the selection has changed.
#[derive(Debug, Default, Clone)]
pub struct MultiSelect {
    options: Vec<SelectOption>,
    selected: Vec<Id>,
    input: String,
}

impl MultiSelect {
    pub fn new(options: Vec<SelectOption>, selected: Vec<Id>) -> Self {
        let mut unique = Vec::with_capacity(selected.len());
        for id in selected {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self {
            options,
            selected: unique,
            input: String::new(),
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
    }

    pub fn selected(&self) -> &[Id] {
        &self.selected
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Options whose name contains the input, ignoring case.
    pub fn filtered(&self) -> impl Iterator<Item = &SelectOption> {
        let needle = self.input.to_lowercase();
        self.options
            .iter()
            .filter(move |o| o.name.to_lowercase().contains(&needle))
    }

    /// Selected options in the order of selection.
    ///
    /// Ids without a matching option are skipped.
    pub fn badges(&self) -> impl Iterator<Item = &SelectOption> {
        self.selected
            .iter()
            .filter_map(|id| self.options.iter().find(|o| &o.id == id))
    }

    pub fn toggle(&mut self, id: &Id) -> Option<Vec<Id>> {
        if let Some(i) = self.selected.iter().position(|x| x == id) {
            self.selected.remove(i);
        } else {
            self.selected.push(id.clone());
        }
        Some(self.selected.clone())
    }

    pub fn remove(&mut self, id: &Id) -> Option<Vec<Id>> {
        let i = self.selected.iter().position(|x| x == id)?;
        self.selected.remove(i);
        Some(self.selected.clone())
    }

    /// Handles backspace in the search input.
    ///
    /// Removes the last selection if the input is empty.
    pub fn backspace(&mut self) -> Option<Vec<Id>> {
        if !self.input.is_empty() {
            return None;
        }
        self.selected.pop()?;
        Some(self.selected.clone())
    }
}

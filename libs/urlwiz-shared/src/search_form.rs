use crate::models::{CreateSearchRequest, DomainSearchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFormState {
    #[default]
    New,
    Loading,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFormEvent {
    Submit,
    Created(String),
    Failed,
    Edit,
}

/// Where the browser should go after a form settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    To(String),
}

impl Navigation {
    pub fn result_page(uuid: &str) -> Self {
        Navigation::To(format!("/requests/{uuid}"))
    }

    pub fn target(&self) -> &str {
        match self {
            Navigation::To(target) => target,
        }
    }
}

/// Events that do not apply to the current state leave it unchanged.
pub fn transition(state: SearchFormState, event: &SearchFormEvent) -> SearchFormState {
    use SearchFormEvent as E;
    use SearchFormState as S;

    match (state, event) {
        (S::New, E::Submit) => S::Loading,
        (S::Loading, E::Created(_)) => S::Success,
        (S::Loading, E::Failed) => S::New,
        (S::Success, E::Edit) => S::New,
        (state, _) => state,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub state: SearchFormState,
    pub prompt: String,
}

impl SearchForm {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            state: SearchFormState::New,
            prompt: prompt.into(),
        }
    }

    /// Reopens the settled search behind `result` for editing.
    pub fn from_result(result: &DomainSearchResult) -> Self {
        let mut form = Self {
            state: SearchFormState::Success,
            prompt: result.prompt.clone(),
        };
        form.edit();
        form
    }

    pub fn is_editable(&self) -> bool {
        self.state == SearchFormState::New
    }

    pub fn is_busy(&self) -> bool {
        self.state == SearchFormState::Loading
    }

    /// Moves New to Loading and hands back the payload to post.
    /// Returns `None` while a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<CreateSearchRequest> {
        if !self.is_editable() {
            return None;
        }
        self.state = transition(self.state, &SearchFormEvent::Submit);
        Some(CreateSearchRequest {
            prompt: self.prompt.clone(),
        })
    }

    /// Settles a submission. A response carrying a uuid navigates to its
    /// result page; anything else returns the form to New with the prompt
    /// untouched so the user can resubmit.
    pub fn finish_submit<E>(&mut self, outcome: Result<DomainSearchResult, E>) -> Option<Navigation> {
        let uuid = outcome
            .ok()
            .map(|result| result.uuid)
            .filter(|uuid| !uuid.trim().is_empty());

        match uuid {
            Some(uuid) => {
                let navigation = Navigation::result_page(&uuid);
                self.state = transition(self.state, &SearchFormEvent::Created(uuid));
                Some(navigation)
            }
            None => {
                self.state = transition(self.state, &SearchFormEvent::Failed);
                None
            }
        }
    }

    pub fn edit(&mut self) {
        self.state = transition(self.state, &SearchFormEvent::Edit);
    }
}

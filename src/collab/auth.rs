//! Login flow against the portal's single sign-on.
//!
//! The browser itself is behind [`PortalSession`]; [`AuthFlow`] only looks
//! at the URL the browser currently shows and decides the next action.
//! A persisted browser profile may already be logged in, in which case the
//! flow finishes without submitting anything.

use crate::errors::{AppError, AppResult};

pub const DEFAULT_LOGIN_URL: &str = "https://us.prairielearn.com/pl/auth/institution/781/saml/login";
pub const DEFAULT_MAX_WAITS: u32 = 100;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Browser side of the login, implemented by whatever drives the page.
pub trait PortalSession {
    fn open(&mut self, url: &str) -> AppResult<()>;
    fn current_url(&self) -> String;
    fn submit_credentials(&mut self, creds: &Credentials) -> AppResult<()>;
    /// Click "trust this browser" on the second-factor page.
    fn confirm_second_factor(&mut self) -> AppResult<()>;
    /// Block for one bounded wait step (page load, redirect).
    fn wait(&mut self) -> AppResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    SignOn,
    SecondFactor,
    Portal,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Start,
    CredentialsSubmitted,
    SecondFactor,
    Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    SubmitCredentials,
    ConfirmSecondFactor,
    Wait,
    Done,
}

/// Handle proving the session is logged in. Owned by the caller and passed
/// to the extractor; the pipeline never sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedContext {
    pub landing_url: String,
    pub used_second_factor: bool,
}

#[derive(Debug, Clone)]
pub struct AuthFlow {
    pub login_url: String,
    pub sign_on_marker: String,
    pub second_factor_marker: String,
    pub portal_marker: String,
    pub max_waits: u32,
}

impl Default for AuthFlow {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            sign_on_marker: "SAML2".to_string(),
            second_factor_marker: "duo".to_string(),
            portal_marker: "us.prairielearn.com/pl".to_string(),
            max_waits: DEFAULT_MAX_WAITS,
        }
    }
}

impl AuthFlow {
    pub fn classify(&self, url: &str) -> PageKind {
        // second factor first: its URL can embed the portal return address
        if url.contains(&self.second_factor_marker) {
            PageKind::SecondFactor
        } else if url.contains(&self.sign_on_marker) {
            PageKind::SignOn
        } else if url.contains(&self.portal_marker) && !url.contains("/auth/") {
            PageKind::Portal
        } else {
            PageKind::Other
        }
    }

    /// Pure transition function.
    pub fn next(state: AuthState, page: PageKind) -> (AuthState, AuthAction) {
        use AuthAction::*;
        use AuthState::*;

        match (state, page) {
            (Authenticated, _) => (Authenticated, Done),

            (Start, PageKind::Portal) => (Authenticated, Done),
            (Start, PageKind::SignOn) => (CredentialsSubmitted, SubmitCredentials),
            (Start, PageKind::SecondFactor) => (SecondFactor, ConfirmSecondFactor),
            (Start, PageKind::Other) => (Start, Wait),

            (CredentialsSubmitted, PageKind::Portal) => (Authenticated, Done),
            (CredentialsSubmitted, PageKind::SecondFactor) => (SecondFactor, ConfirmSecondFactor),
            (CredentialsSubmitted, _) => (CredentialsSubmitted, Wait),

            (SecondFactor, PageKind::Portal) => (Authenticated, Done),
            (SecondFactor, _) => (SecondFactor, Wait),
        }
    }

    /// Drive `session` until the portal is reached or the wait budget runs out.
    pub fn authenticate<S: PortalSession>(
        &self,
        session: &mut S,
        creds: &Credentials,
    ) -> AppResult<AuthenticatedContext> {
        session.open(&self.login_url)?;

        let mut state = AuthState::Start;
        let mut waits = 0;
        let mut used_second_factor = false;

        loop {
            let url = session.current_url();
            let (next_state, action) = Self::next(state, self.classify(&url));

            match action {
                AuthAction::Done => {
                    return Ok(AuthenticatedContext {
                        landing_url: url,
                        used_second_factor,
                    });
                }
                AuthAction::SubmitCredentials => {
                    if creds.username.is_empty() {
                        return Err(AppError::Auth("no username configured".into()));
                    }
                    session.submit_credentials(creds)?;
                }
                AuthAction::ConfirmSecondFactor => {
                    session.confirm_second_factor()?;
                    used_second_factor = true;
                }
                AuthAction::Wait => {
                    if waits >= self.max_waits {
                        return Err(AppError::AuthTimeout(self.max_waits));
                    }
                    waits += 1;
                    session.wait()?;
                }
            }

            state = next_state;
        }
    }
}

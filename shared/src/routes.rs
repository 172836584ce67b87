//! Client-side pages and the token gate in front of them.

/// A navigable page of the admin app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Home,
    Students,
    Sessions,
}

impl Page {
    pub fn path(self) -> &'static str {
        match self {
            Page::Login => "/login",
            Page::Home => "/",
            Page::Students => "/students",
            Page::Sessions => "/sessions",
        }
    }

    pub fn is_protected(self) -> bool {
        !matches!(self, Page::Login)
    }
}

/// Outcome of checking a page against the stored credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Render(Page),
    RedirectToLogin,
}

impl Access {
    /// A stored token is necessary and sufficient. It is never validated
    /// here; stale tokens surface as failed requests.
    pub fn resolve(page: Page, has_token: bool) -> Access {
        if page.is_protected() && !has_token {
            Access::RedirectToLogin
        } else {
            Access::Render(page)
        }
    }
}

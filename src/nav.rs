//! Navigation highlighting and mobile menu collapse.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::config::ACTIVE_CLASS;
use crate::dom::{MobileMenu, NavLinkElement};

/// Page identifier for a URL path: its final segment, or `home` when that
/// segment is empty (`/`, `/resume/`).
#[must_use]
pub fn current_page<'a>(pathname: &'a str, home: &'a str) -> &'a str {
    match pathname.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => home,
    }
}

/// Page identifier a link points at: its `href` as written, with a leading
/// `./` dropped so `./index.html` and `index.html` agree. Nested, absolute and
/// off-site links keep their full text and never match a bare page name.
///
/// Returns `None` for an empty `href`.
#[must_use]
pub fn link_page(href: &str) -> Option<&str> {
    let page = href.strip_prefix("./").unwrap_or(href);
    (!page.is_empty()).then_some(page)
}

/// Whether a link targeting `link` should be marked for page `current`. An
/// empty `current` stands for `home`.
#[must_use]
pub fn is_active(link: &str, current: &str, home: &str) -> bool {
    let current = if current.is_empty() { home } else { current };
    link == current
}

pub struct Navigation<L, M> {
    links: Vec<L>,
    menu: Option<M>,
    home: String,
}

impl<L: NavLinkElement, M: MobileMenu> Navigation<L, M> {
    pub fn new(links: Vec<L>, menu: Option<M>, home: impl Into<String>) -> Self {
        Self { links, menu, home: home.into() }
    }

    /// Mark the link(s) for `current` active and clear every other link.
    /// Returns how many links were marked.
    pub fn highlight(&self, current: &str) -> usize {
        let mut marked = 0;
        for link in &self.links {
            let href = link.href();
            let matches = href.as_deref().and_then(link_page).is_some_and(|page| is_active(page, current, &self.home));
            if matches {
                link.add_class(ACTIVE_CLASS);
                marked += 1;
            } else {
                link.remove_class(ACTIVE_CLASS);
            }
        }
        if marked == 0 {
            log::debug!("no navigation link matches page '{current}'");
        }
        marked
    }

    /// Highlight using a raw URL path.
    pub fn highlight_path(&self, pathname: &str) -> usize {
        self.highlight(current_page(pathname, &self.home))
    }

    /// Handler for a click on any navigation link: fold the mobile menu away
    /// if it is open.
    pub fn on_link_click(&self) {
        if let Some(menu) = &self.menu {
            if menu.is_expanded() {
                menu.collapse();
            }
        }
    }

    #[must_use]
    pub fn links(&self) -> &[L] {
        &self.links
    }
}

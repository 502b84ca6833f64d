//! Browser bindings and the WASM entry point.
//!
//! ARCHITECTURE
//! ============
//! This is the only module that touches `web_sys`. It implements the handle
//! traits from [`crate::dom`] over real elements, gathers a [`Page`] from the
//! document, runs [`setup`], then attaches event listeners that forward into
//! the initialized features. Listener closures live for the page lifetime and
//! are leaked with `Closure::forget`; the notice close listener is the
//! exception and is owned by its notice.
//!
//! ERROR HANDLING
//! ==============
//! DOM calls that fail are logged and the affected feature is skipped. A page
//! missing some markup still gets every feature whose markup is present.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::config::{
    CONFIG_ELEMENT_ID, INVALID_FEEDBACK_CLASS, MENU_EXPANDED_CLASS, NOTICE_SHOW_CLASS, RevealOptions, SiteConfig,
    VALID_FEEDBACK_CLASS,
};
use crate::dom::{ClassTarget, FieldElement, FormElement, MobileMenu, NavLinkElement, NoticeElement};
use crate::error::SiteError;
use crate::form::{ContactFields, ContactForm, LogSink};
use crate::nav::Navigation;
use crate::reveal::ScrollRevealer;
use crate::timer::{Scheduler, debounced};
use crate::validate::FieldKind;
use crate::{Page, setup};

const NOTICE_CLASSES: &str = "alert alert-success alert-dismissible fade show mt-3";
// No `data-bs-dismiss`: dismissal goes through `Notice` so its timers are cancelled.
const NOTICE_HTML: &str = "<strong>Success!</strong> Your message has been sent. I'll get back to you soon!\
<button type=\"button\" class=\"btn-close\" aria-label=\"Close\"></button>";
const NOTICE_CLOSE_SELECTOR: &str = ".btn-close";

type BrowserForm = ContactForm<DomForm, DomField, GlooScheduler>;

// =============================================================
// Scheduler
// =============================================================

/// `setTimeout`-backed scheduler; dropping the [`Timeout`] clears it.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

// =============================================================
// Element handles
// =============================================================

fn add_class(element: &Element, class: &str) {
    if let Err(e) = element.class_list().add_1(class) {
        log::warn!("classList.add('{class}') failed: {e:?}");
    }
}

fn remove_class(element: &Element, class: &str) {
    if let Err(e) = element.class_list().remove_1(class) {
        log::warn!("classList.remove('{class}') failed: {e:?}");
    }
}

fn scroll_smooth(element: &Element, block: ScrollLogicalPosition) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(block);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Plain element: navigation links and reveal targets.
#[derive(Clone, Debug)]
pub struct DomElement(pub Element);

impl ClassTarget for DomElement {
    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        add_class(&self.0, class);
    }

    fn remove_class(&self, class: &str) {
        remove_class(&self.0, class);
    }
}

impl NavLinkElement for DomElement {
    fn href(&self) -> Option<String> {
        self.0.get_attribute("href")
    }
}

/// Bootstrap navbar: the collapse panel plus the toggler that animates it.
pub struct DomMenu {
    toggler: HtmlElement,
    collapse: Element,
}

impl MobileMenu for DomMenu {
    fn is_expanded(&self) -> bool {
        self.collapse.class_list().contains(MENU_EXPANDED_CLASS)
    }

    fn collapse(&self) {
        self.toggler.click();
    }
}

pub struct DomField(Element);

impl ClassTarget for DomField {
    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        add_class(&self.0, class);
    }

    fn remove_class(&self, class: &str) {
        remove_class(&self.0, class);
    }
}

impl FieldElement for DomField {
    fn value(&self) -> String {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn show_message(&self, message: &str) {
        let Some(document) = self.0.owner_document() else {
            return;
        };
        let div = match document.create_element("div") {
            Ok(div) => div,
            Err(e) => {
                log::warn!("cannot create feedback element: {e:?}");
                return;
            }
        };
        div.set_class_name(INVALID_FEEDBACK_CLASS);
        div.set_text_content(Some(message));
        if let Err(e) = self.0.insert_adjacent_element("afterend", &div) {
            log::warn!("cannot insert feedback element: {e:?}");
        }
    }

    fn clear_message(&self) {
        if let Some(next) = self.0.next_element_sibling() {
            let classes = next.class_list();
            if classes.contains(INVALID_FEEDBACK_CLASS) || classes.contains(VALID_FEEDBACK_CLASS) {
                next.remove();
            }
        }
    }

    fn scroll_into_view(&self) {
        scroll_smooth(&self.0, ScrollLogicalPosition::Center);
    }
}

pub struct DomForm {
    form: HtmlFormElement,
    document: Document,
}

impl FormElement for DomForm {
    type Notice = DomNotice;

    fn reset(&self) {
        self.form.reset();
    }

    fn insert_notice(&self) -> Result<DomNotice, SiteError> {
        let alert = self.document.create_element("div")?;
        alert.set_class_name(NOTICE_CLASSES);
        alert.set_attribute("role", "alert")?;
        alert.set_inner_html(NOTICE_HTML);
        self.form.insert_adjacent_element("afterend", &alert)?;
        let close = alert.query_selector(NOTICE_CLOSE_SELECTOR)?;
        Ok(DomNotice { element: alert, close, close_listener: RefCell::new(None) })
    }
}

pub struct DomNotice {
    element: Element,
    close: Option<Element>,
    close_listener: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl NoticeElement for DomNotice {
    fn begin_fade(&self) {
        remove_class(&self.element, NOTICE_SHOW_CLASS);
    }

    fn remove(&self) {
        // `Element.remove()` on a detached node is a no-op.
        self.element.remove();
    }

    fn scroll_into_view(&self) {
        scroll_smooth(&self.element, ScrollLogicalPosition::Center);
    }

    fn on_close(&self, handler: Box<dyn Fn()>) {
        let Some(close) = &self.close else {
            log::warn!("notice has no close control");
            return;
        };
        let listener = Closure::<dyn FnMut()>::new(move || handler());
        if let Err(e) = close.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref()) {
            log::warn!("cannot attach notice close handler: {e:?}");
            return;
        }
        *self.close_listener.borrow_mut() = Some(listener);
    }
}

// =============================================================
// Page collection
// =============================================================

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, SiteError> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect())
}

fn find_menu(document: &Document, config: &SiteConfig) -> Result<Option<DomMenu>, SiteError> {
    let toggler = document.query_selector(&config.selectors.menu_toggle)?;
    let collapse = document.query_selector(&config.selectors.menu_collapse)?;
    Ok(match (toggler.and_then(|el| el.dyn_ref::<HtmlElement>().cloned()), collapse) {
        (Some(toggler), Some(collapse)) => Some(DomMenu { toggler, collapse }),
        _ => None,
    })
}

fn find_field(document: &Document, id: &str) -> Result<Element, SiteError> {
    document.get_element_by_id(id).ok_or_else(|| SiteError::MissingElement(format!("#{id}")))
}

fn find_contact(
    document: &Document,
    config: &SiteConfig,
) -> Result<Option<(DomForm, ContactFields<DomField>)>, SiteError> {
    let selectors = &config.selectors;
    let Some(form) = document.get_element_by_id(&selectors.contact_form_id) else {
        return Ok(None);
    };
    let form = form
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| SiteError::Dom(format!("#{} is not a <form>", selectors.contact_form_id)))?;
    let fields = ContactFields {
        name: DomField(find_field(document, &selectors.name_field_id)?),
        email: DomField(find_field(document, &selectors.email_field_id)?),
        subject: DomField(find_field(document, &selectors.subject_field_id)?),
        message: DomField(find_field(document, &selectors.message_field_id)?),
    };
    Ok(Some((DomForm { form, document: document.clone() }, fields)))
}

fn current_pathname(document: &Document) -> String {
    let Some(location) = document.location() else {
        log::warn!("document has no location; assuming the home page");
        return String::new();
    };
    match location.pathname() {
        Ok(pathname) => pathname,
        Err(e) => {
            log::warn!("cannot read location pathname, assuming the home page: {e:?}");
            String::new()
        }
    }
}

fn collect_page(
    document: &Document,
    config: &SiteConfig,
) -> Result<Page<DomElement, DomMenu, DomForm, DomField, DomElement>, SiteError> {
    let pathname = current_pathname(document);
    let nav_links = query_all(document, &config.selectors.nav_link)?.into_iter().map(DomElement).collect();
    let menu = find_menu(document, config)?;
    let contact = match find_contact(document, config) {
        Ok(contact) => contact,
        Err(e) => {
            log::warn!("contact form disabled: {e}");
            None
        }
    };
    let reveal_targets = query_all(document, &config.selectors.reveal)?.into_iter().map(DomElement).collect();
    Ok(Page { pathname, nav_links, menu, contact, reveal_targets })
}

// =============================================================
// Event wiring
// =============================================================

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<(), SiteError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire_navigation(navigation: Navigation<DomElement, DomMenu>) -> Result<(), SiteError> {
    let navigation = Rc::new(navigation);
    for link in navigation.links() {
        let navigation = Rc::clone(&navigation);
        listen(&link.0, "click", move |_| navigation.on_link_click())?;
    }
    Ok(())
}

fn wire_contact_form(
    form: BrowserForm,
    elements: Vec<(FieldKind, Element)>,
    target: EventTarget,
) -> Result<(), SiteError> {
    let form = Rc::new(form);
    for (kind, element) in elements {
        let on_blur = Rc::clone(&form);
        listen(&element, "blur", move |_| {
            on_blur.blur(kind);
        })?;
        let on_focus = Rc::clone(&form);
        listen(&element, "focus", move |_| on_focus.focus(kind))?;
    }
    listen(&target, "submit", move |event| {
        event.prevent_default();
        form.submit();
    })
}

fn wire_reveal(revealer: &ScrollRevealer<DomElement>) -> Result<(), SiteError> {
    let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            if let Some(entry) = entry.dyn_ref::<IntersectionObserverEntry>() {
                ScrollRevealer::handle_entry(&DomElement(entry.target()), entry.is_intersecting());
            }
        }
    });
    let init = observer_init(revealer.options());
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for target in revealer.targets() {
        observer.observe(&target.0);
    }
    callback.forget();
    Ok(())
}

fn observer_init(options: RevealOptions) -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin());
    init
}

// =============================================================
// Startup
// =============================================================

fn load_config(document: &Document) -> (SiteConfig, Option<SiteError>) {
    let Some(raw) = document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
        return (SiteConfig::default(), None);
    };
    match SiteConfig::from_json(&raw) {
        Ok(config) => (config, None),
        Err(e) => (SiteConfig::default(), Some(e)),
    }
}

fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("logger already installed: {e}").into());
    }
}

fn run(document: &Document, config: &SiteConfig) -> Result<(), SiteError> {
    let page = collect_page(document, config)?;

    // Keep raw elements for listener registration before the handles move.
    let field_elements = page.contact.as_ref().map(|(form, fields)| {
        let target: EventTarget = form.form.clone().into();
        let elements = vec![
            (FieldKind::Name, fields.name.0.clone()),
            (FieldKind::Email, fields.email.0.clone()),
            (FieldKind::Subject, fields.subject.0.clone()),
            (FieldKind::Message, fields.message.0.clone()),
        ];
        (target, elements)
    });

    let site = setup(page, config, GlooScheduler, Box::new(LogSink));

    if let Err(e) = wire_navigation(site.navigation) {
        log::error!("navigation disabled: {e}");
    }
    if let (Some(form), Some((target, elements))) = (site.contact_form, field_elements) {
        if let Err(e) = wire_contact_form(form, elements, target) {
            log::error!("contact form disabled: {e}");
        }
    }
    if let Some(revealer) = &site.revealer {
        if let Err(e) = wire_reveal(revealer) {
            log::error!("scroll reveal disabled: {e}");
        }
    }
    log::info!("site features ready");
    Ok(())
}

fn run_logged(document: &Document, config: &SiteConfig) {
    if let Err(e) = run(document, config) {
        log::error!("site setup failed: {e}");
    }
}

/// WASM entry point: load config, install logging, and start the features
/// once the DOM is parsed.
#[wasm_bindgen(start)]
pub fn start() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (config, config_error) = load_config(&document);
    init_logging(config.level().unwrap_or(log::Level::Info));
    if let Some(e) = config_error {
        log::warn!("ignoring site config: {e}");
    }

    if document.ready_state() == "loading" {
        let ready_document = document.clone();
        let callback = Closure::once_into_js(move || run_logged(&ready_document, &config));
        if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref()) {
            log::error!("cannot wait for DOMContentLoaded: {e:?}");
        }
    } else {
        run_logged(&document, &config);
    }
}

/// Smoothly scroll the first element matching `selector` to the top of the
/// viewport. Does nothing when no element matches.
#[wasm_bindgen(js_name = scrollToElement)]
pub fn scroll_to_selector(selector: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    match document.query_selector(selector) {
        Ok(Some(element)) => scroll_smooth(&element, ScrollLogicalPosition::Start),
        Ok(None) => {}
        Err(e) => log::warn!("invalid selector '{selector}': {e:?}"),
    }
}

/// Page-script helper: returns a function that runs `func` once, `wait_ms`
/// after the last of a burst of calls. The first argument of that last call is
/// passed through, which covers event handlers.
#[wasm_bindgen]
pub fn debounce(func: js_sys::Function, wait_ms: u32) -> js_sys::Function {
    let handler = debounced(GlooScheduler, wait_ms, move |arg: JsValue| {
        if let Err(e) = func.call1(&JsValue::NULL, &arg) {
            log::error!("debounced function threw: {e:?}");
        }
    });
    Closure::<dyn FnMut(JsValue)>::new(handler).into_js_value().unchecked_into()
}


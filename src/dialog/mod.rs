//! Controlled modal dialog.
//!
//! The caller owns `is_open`; the dialog owns only the effects it installs
//! while open (Escape listener, scroll lock). Effects are held as guards, so
//! closing, dropping the dialog or replacing its props all release them
//! exactly once.

use std::rc::Rc;

use serde::Serialize;

pub mod environment;

use environment::{Document, Key, ListenerGuard, ScrollLockGuard};

const DIALOG_BASE_CLASS: &str = "relative w-full max-w-lg rounded-xl bg-white p-6 shadow-xl";
const FOOTER_BASE_CLASS: &str = "mt-6 flex justify-end gap-3";

/// Callback invoked whenever the dialog asks its owner to close it.
pub type OnClose = Rc<dyn Fn()>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DialogProps {
    pub is_open: bool,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Extra classes merged onto the content panel.
    pub class_name: Option<String>,
}

/// Effects held for the duration of one open period.
struct OpenEffects {
    _escape: ListenerGuard,
    _scroll: ScrollLockGuard,
}

pub struct Dialog {
    props: DialogProps,
    on_close: OnClose,
    effects: Option<OpenEffects>,
}

impl Dialog {
    pub fn new(props: DialogProps, on_close: OnClose) -> Self {
        Self {
            props,
            on_close,
            effects: None,
        }
    }

    pub fn props(&self) -> &DialogProps {
        &self.props
    }

    pub fn is_open(&self) -> bool {
        self.props.is_open
    }

    /// Replaces the props and reconciles effects with the new `is_open`.
    pub fn set_props(&mut self, props: DialogProps, document: &Rc<Document>) {
        self.props = props;
        self.sync(document);
    }

    pub fn set_open(&mut self, is_open: bool, document: &Rc<Document>) {
        self.props.is_open = is_open;
        self.sync(document);
    }

    /// Installs effects on the closed→open edge and releases them on the
    /// open→closed edge. Repeated calls in the same state change nothing.
    pub fn sync(&mut self, document: &Rc<Document>) {
        match (self.props.is_open, self.effects.is_some()) {
            (true, false) => {
                let on_close = Rc::clone(&self.on_close);
                let escape = document.add_key_listener(Rc::new(move |key: &Key| {
                    if *key == Key::Escape {
                        on_close();
                    }
                }));
                let scroll = document.lock_scroll();
                self.effects = Some(OpenEffects {
                    _escape: escape,
                    _scroll: scroll,
                });
            }
            (false, true) => {
                self.effects = None;
            }
            _ => {}
        }
    }

    /// Pointer click on the dimmed area behind the panel.
    pub fn click_backdrop(&self) {
        if self.props.is_open {
            (self.on_close)();
        }
    }

    /// Pointer click on the "X" affordance.
    pub fn click_close(&self) {
        if self.props.is_open {
            (self.on_close)();
        }
    }

    /// Render tree for the dialog, `None` while closed.
    pub fn view<C>(&self, content: C) -> Option<DialogView<C>> {
        if !self.props.is_open {
            return None;
        }
        Some(DialogView {
            title: self.props.title.clone(),
            description: self.props.description.clone(),
            panel_class: merge_classes(DIALOG_BASE_CLASS, self.props.class_name.as_deref()),
            content,
        })
    }
}

/// Rendered dialog: backdrop, panel, header and caller content.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DialogView<C> {
    pub title: Option<String>,
    pub description: Option<String>,
    pub panel_class: String,
    pub content: C,
}

/// Trailing slot for action controls such as Confirm / Cancel.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DialogFooter<A> {
    pub class: String,
    pub actions: Vec<A>,
}

impl<A> DialogFooter<A> {
    pub fn new(class_name: Option<&str>, actions: Vec<A>) -> Self {
        Self {
            class: merge_classes(FOOTER_BASE_CLASS, class_name),
            actions,
        }
    }
}

/// Appends caller classes to a base class list.
pub fn merge_classes(base: &str, extra: Option<&str>) -> String {
    match extra.map(str::trim).filter(|extra| !extra.is_empty()) {
        Some(extra) => format!("{base} {extra}"),
        None => base.to_string(),
    }
}

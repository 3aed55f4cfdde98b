//! Paginated table controller bound to a server-rendered table.
//!
//! DOM contract:
//! - `<table id="{id}">` with a `tbody`
//! - `<ul id="{id}Pagination">` receiving page links (`data-page`)
//! - optional `<select id="{id}_pageSize">`
//! - optional type/date filter inputs (log table only)
//!
//! Rows are re-read from `tbody` on every recompute since push events and
//! server reloads may change them. Only `style.display` of rows and the
//! pagination markup are written.

use super::model::{compute_view, parse_page_link, FilterState, PageState};
use crate::shared::dom_utils::listen;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement};

/// Ids of the filter inputs of the log table variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControls {
    pub type_filter_id: String,
    pub date_filter_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub page_size: usize,
    pub filter: Option<FilterControls>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_size: super::model::DEFAULT_PAGE_SIZE,
            filter: None,
        }
    }
}

struct TableState {
    page: PageState,
    filter: FilterState,
}

struct TableInner {
    table_id: String,
    table: Element,
    pagination: Element,
    page_size_box: Option<Element>,
    filter_inputs: Option<(Element, Element)>,
    state: RefCell<TableState>,
}

#[derive(Clone)]
pub struct TableManager {
    inner: Rc<TableInner>,
}

/// Current value of a `<select>` or `<input>`.
fn control_value(el: &Element) -> String {
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        return select.value();
    }
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    el.get_attribute("value").unwrap_or_default()
}

impl TableManager {
    /// Bind to the table `table_id`.
    ///
    /// Returns `None` when the table or its pagination control is missing:
    /// the page simply does not render that table.
    pub fn attach(document: &Document, table_id: &str, options: TableOptions) -> Option<Self> {
        let Some(table) = document.get_element_by_id(table_id) else {
            log::debug!("table #{} not on this page", table_id);
            return None;
        };
        let Some(pagination) = document.get_element_by_id(&format!("{}Pagination", table_id))
        else {
            log::debug!("table #{} has no pagination control, skipping", table_id);
            return None;
        };
        let page_size_box = document.get_element_by_id(&format!("{}_pageSize", table_id));

        let filter_inputs = options.filter.as_ref().and_then(|ids| {
            let type_input = document.get_element_by_id(&ids.type_filter_id);
            let date_input = document.get_element_by_id(&ids.date_filter_id);
            match (type_input, date_input) {
                (Some(t), Some(d)) => Some((t, d)),
                _ => {
                    log::debug!("filter inputs for #{} not found, filtering disabled", table_id);
                    None
                }
            }
        });

        let filter = filter_inputs
            .as_ref()
            .map(|(t, d)| FilterState::new(&control_value(t), &control_value(d)))
            .unwrap_or_default();

        let manager = Self {
            inner: Rc::new(TableInner {
                table_id: table_id.to_string(),
                table,
                pagination,
                page_size_box,
                filter_inputs,
                state: RefCell::new(TableState {
                    page: PageState::new(options.page_size),
                    filter,
                }),
            }),
        };

        manager.recompute();
        manager.attach_event_listeners();
        log::debug!(
            "table #{} attached, page size {}",
            table_id,
            manager.page_size()
        );
        Some(manager)
    }

    pub fn table_id(&self) -> &str {
        &self.inner.table_id
    }

    pub fn page_size(&self) -> usize {
        self.inner.state.borrow().page.page_size()
    }

    /// Rows of `tbody` with their cell texts, in DOM order.
    fn read_rows(&self) -> (Vec<Element>, Vec<Vec<String>>) {
        let Some(body) = self.inner.table.query_selector("tbody").ok().flatten() else {
            return (Vec::new(), Vec::new());
        };

        let rows = body.children();
        let mut elements = Vec::with_capacity(rows.length() as usize);
        let mut cells = Vec::with_capacity(rows.length() as usize);
        for i in 0..rows.length() {
            let Some(row) = rows.item(i) else { continue };
            let tds = row.children();
            let texts = (0..tds.length())
                .filter_map(|j| tds.item(j))
                .map(|td| td.text_content().unwrap_or_default().trim().to_string())
                .collect();
            elements.push(row);
            cells.push(texts);
        }
        (elements, cells)
    }

    /// Re-sort, re-filter and re-paginate the current rows.
    pub fn recompute(&self) {
        let (elements, cells) = self.read_rows();

        let plan = {
            let mut state = self.inner.state.borrow_mut();
            let TableState { page, filter } = &mut *state;
            compute_view(&cells, page, filter)
        };

        for (row, visible) in elements.iter().zip(&plan.visible) {
            let Some(row) = row.dyn_ref::<HtmlElement>() else { continue };
            let style = row.style();
            let _ = if *visible {
                style.remove_property("display").map(|_| ())
            } else {
                style.set_property("display", "none")
            };
        }

        self.inner.pagination.set_inner_html(&plan.pagination_html());
    }

    /// Page-size selector changed.
    pub fn change_page_size(&self, raw: &str) {
        let accepted = self.inner.state.borrow_mut().page.change_page_size(raw);
        if !accepted {
            log::warn!(
                "ignoring page size {:?} for #{}, keeping {}",
                raw,
                self.inner.table_id,
                self.page_size()
            );
        }
        self.recompute();
    }

    pub fn go_to_page(&self, page: usize) {
        self.inner.state.borrow_mut().page.go_to(page);
        self.recompute();
    }

    pub fn apply_filter(&self, type_filter: &str, date_filter: &str) {
        self.inner.state.borrow_mut().filter = FilterState::new(type_filter, date_filter);
        self.recompute();
    }

    fn attach_event_listeners(&self) {
        if let Some(select) = &self.inner.page_size_box {
            let manager = self.clone();
            listen(select, &format!("#{}", select.id()), "change", move |ev: Event| {
                let raw = ev
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .map(|el| control_value(&el))
                    .unwrap_or_default();
                manager.change_page_size(&raw);
            });
        }

        let manager = self.clone();
        let pagination_label = format!("#{}", self.inner.pagination.id());
        listen(&self.inner.pagination, &pagination_label, "click", move |ev: Event| {
            let Some(link) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if !link.tag_name().eq_ignore_ascii_case("a") {
                return;
            }
            ev.prevent_default();
            match link.get_attribute("data-page").as_deref().and_then(parse_page_link) {
                Some(page) => manager.go_to_page(page),
                None => log::warn!("pagination link without a valid data-page"),
            }
        });

        if let Some((type_input, date_input)) = &self.inner.filter_inputs {
            for input in [type_input, date_input] {
                let manager = self.clone();
                listen(input, &format!("#{}", input.id()), "change", move |_: Event| {
                    manager.refilter_from_inputs()
                });
            }
        }
    }

    fn refilter_from_inputs(&self) {
        let Some((type_input, date_input)) = &self.inner.filter_inputs else {
            return;
        };
        let type_filter = control_value(type_input);
        let date_filter = control_value(date_input);
        self.apply_filter(&type_filter, &date_filter);
    }
}

use super::quote::PositionRow;
use contracts::live::PriceUpdate;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

const POSITION_ROWS: &str = r#"tr[id^="position-"]"#;

fn cell_texts(row: &Element) -> Vec<String> {
    let cells = row.children();
    (0..cells.length())
        .filter_map(|i| cells.item(i))
        .map(|td| td.text_content().unwrap_or_default().trim().to_string())
        .collect()
}

fn field(row: &Element, selector: &str) -> Option<Element> {
    row.query_selector(selector).ok().flatten()
}

/// Patch price, P/L and R/R of every position row quoted in `update`.
///
/// Returns the number of rows touched. Page and filter state of the table are
/// left alone: a tick never changes which rows exist.
pub fn apply_price_update(document: &Document, update: &PriceUpdate) -> usize {
    if update.is_empty() {
        return 0;
    }
    let Ok(rows) = document.query_selector_all(POSITION_ROWS) else {
        return 0;
    };

    let mut touched = 0;
    for i in 0..rows.length() {
        let Some(row) = rows.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(position) = PositionRow::from_cells(cell_texts(&row).as_slice()) else {
            continue;
        };
        let Some(tick) = update.tick_for(&position.symbol) else {
            continue;
        };

        let quote = position.quote(tick);
        if let Some(price) = field(&row, ".current-price") {
            price.set_inner_html(&quote.price_html());
        }
        if let Some(pl) = field(&row, ".position-pl") {
            pl.set_text_content(Some(&quote.profit_text()));
            pl.set_class_name(quote.profit_class());
        }
        if let Some(rr) = field(&row, ".position-rr") {
            rr.set_text_content(Some(&quote.risk_reward_text()));
        }
        touched += 1;
    }

    log::debug!("price update applied to {} position rows", touched);
    touched
}

//! Add-transaction page rendering
//!
//! The category selector is loaded lazily: the page ships a placeholder
//! that fetches `/payment/new/{view}/categories` on load.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use spendweb_config::CurrencyConfig;
use spendweb_core::forms::payment::NOTES_MAX_CHARS;
use spendweb_core::routes::NEW_PAYMENT;
use spendweb_core::{AddPaymentForm, CategoryOptions, Route};
use spendweb_utils::escape_html;
use uuid::Uuid;

use crate::routes::{back_button, close_on_unload, render_messages};
use crate::views::FormView;
use crate::AppState;

/// Add-transaction page - mounts a fresh view
pub async fn page_new_payment(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let view_id = state.views.mount(FormView::Payment(AddPaymentForm::new()));
    log::debug!("Mounted add-transaction view {}", view_id);

    let inner_content = format!(
        r#"{}
        <div class='max-w-lg bg-white rounded-xl shadow-sm p-6'>
            <h2 class='text-2xl font-bold mb-4'>Add Transaction</h2>
            {}
        </div>
        {}"#,
        back_button(),
        render_payment_form(&view_id, &AddPaymentForm::new(), &state.config.currency),
        close_on_unload(&view_id)
    );

    Html(crate::page_response(&headers, Route::NewPayment.title(), NEW_PAYMENT, &inner_content))
}

pub fn render_payment_form(view_id: &Uuid, form: &AddPaymentForm, currency: &CurrencyConfig) -> String {
    format!(
        r#"<form id='payment-form' class='space-y-4' hx-post='/payment/new/{id}/submit' hx-target='this' hx-swap='outerHTML' hx-disabled-elt='find button'>
            <div>
                <label for='payment-category' class='block text-sm font-medium text-gray-700'>Category</label>
                {select}
            </div>
            <div>
                <label for='payment-amount' class='block text-sm font-medium text-gray-700'>Amount</label>
                {amount}
            </div>
            <div>
                <label for='payment-notes' class='block text-sm font-medium text-gray-700'>Notes</label>
                <textarea id='payment-notes' name='notes' rows='3' maxlength='{max_notes}' placeholder='Optional'
                    class='w-full px-3 py-2 border rounded-lg'
                    hx-post='/payment/new/{id}/notes' hx-trigger='input changed' hx-target='#payment-controls' hx-swap='outerHTML'>{notes}</textarea>
            </div>
            {controls}
        </form>"#,
        id = view_id,
        select = render_category_select(view_id, form),
        amount = render_amount_input(view_id, form, currency, false),
        max_notes = NOTES_MAX_CHARS,
        notes = escape_html(form.notes()),
        controls = render_payment_controls(view_id, form, false),
    )
}

/// Category selector in its current load state
pub fn render_category_select(view_id: &Uuid, form: &AddPaymentForm) -> String {
    if !matches!(form.options(), CategoryOptions::Loaded(_)) {
        // Not loaded yet: fetch on load, poll while another request loads
        let trigger = if form.is_loading_categories() { "load delay:500ms" } else { "load" };
        return format!(
            r#"<div id='payment-category' hx-get='/payment/new/{}/categories' hx-trigger='{}' hx-swap='outerHTML'>
                <select disabled class='w-full px-3 py-2 border rounded-lg bg-gray-50'><option>Loading categories...</option></select>
            </div>"#,
            view_id, trigger
        );
    }

    let options: String = form
        .categories()
        .iter()
        .map(|option| {
            let selected = if form.category_id() == Some(option.id) { " selected" } else { "" };
            format!("<option value='{}'{}>{}</option>", option.id, selected, escape_html(&option.name))
        })
        .collect();
    let placeholder_selected = if form.category_id().is_none() { " selected" } else { "" };

    format!(
        r#"<div id='payment-category'>
            <select id='payment-category-select' name='category_id' class='w-full px-3 py-2 border rounded-lg'
                hx-post='/payment/new/{}/category' hx-trigger='change' hx-target='#payment-controls' hx-swap='outerHTML'{}>
                <option value=''{}>Select a category</option>{}
            </select>
        </div>"#,
        view_id,
        if form.selector_disabled() { " disabled" } else { "" },
        placeholder_selected,
        options
    )
}

/// Amount input with the currency prefix; `oob` marks it for an out-of-band swap
pub fn render_amount_input(view_id: &Uuid, form: &AddPaymentForm, currency: &CurrencyConfig, oob: bool) -> String {
    let placeholder = match currency.decimal_places {
        0 => "0".to_string(),
        places => format!("0.{}", "0".repeat(places as usize)),
    };
    format!(
        r#"<div id='payment-amount-field' class='flex items-center border rounded-lg'{}>
            <span class='px-3 text-gray-500'>{}</span>
            <input id='payment-amount' name='amount' type='text' inputmode='decimal' value='{}' placeholder='{}' autocomplete='off'
                class='flex-1 px-3 py-2 rounded-r-lg'
                hx-post='/payment/new/{}/amount' hx-trigger='input changed' hx-target='#payment-controls' hx-swap='outerHTML'>
        </div>"#,
        if oob { " hx-swap-oob='true'" } else { "" },
        escape_html(&currency.symbol),
        escape_html(form.amount()),
        placeholder,
        view_id
    )
}

/// Messages and submit button
pub fn render_payment_controls(view_id: &Uuid, form: &AddPaymentForm, oob: bool) -> String {
    let label = if form.phase().is_pending() { "Adding..." } else { "Add Transaction" };
    format!(
        r#"<div id='payment-controls' data-view='{}'{}>
            {}
            <button type='submit' class='mt-2 w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'{}>{}</button>
        </div>"#,
        view_id,
        if oob { " hx-swap-oob='true'" } else { "" },
        render_messages(form.phase()),
        if form.can_submit() { "" } else { " disabled" },
        label
    )
}

//! Create-category page rendering
//!
//! - page_new_category: mounts a view and renders the full page
//! - render_category_form: the whole form (after a submission)
//! - render_category_controls: messages and submit button (after an edit)

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use spendweb_core::forms::category::CATEGORY_NAME_MAX_CHARS;
use spendweb_core::routes::NEW_CATEGORY;
use spendweb_core::{CreateCategoryForm, Route};
use spendweb_utils::escape_html;
use uuid::Uuid;

use crate::routes::{back_button, close_on_unload, render_messages};
use crate::views::FormView;
use crate::AppState;

/// Create-category page - mounts a fresh view
pub async fn page_new_category(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let view_id = state.views.mount(FormView::Category(CreateCategoryForm::new()));
    log::debug!("Mounted create-category view {}", view_id);

    let inner_content = format!(
        r#"{}
        <div class='max-w-lg bg-white rounded-xl shadow-sm p-6'>
            <h2 class='text-2xl font-bold mb-4'>Create Category</h2>
            {}
        </div>
        {}"#,
        back_button(),
        render_category_form(&view_id, &CreateCategoryForm::new()),
        close_on_unload(&view_id)
    );

    let route = Route::NewCategory;
    Html(crate::page_response(&headers, route.title(), NEW_CATEGORY, &inner_content))
}

pub fn render_category_form(view_id: &Uuid, form: &CreateCategoryForm) -> String {
    format!(
        r#"<form id='category-form' class='space-y-2' hx-post='/category/new/{id}/submit' hx-target='this' hx-swap='outerHTML' hx-disabled-elt='find button'>
            <label for='category-name' class='block text-sm font-medium text-gray-700'>Category name</label>
            <input id='category-name' name='name' type='text' maxlength='{max}' value='{value}' placeholder='e.g. Groceries' autocomplete='off'
                class='w-full px-3 py-2 border rounded-lg'
                hx-post='/category/new/{id}/name' hx-trigger='input changed' hx-target='#category-controls' hx-swap='outerHTML'>
            {controls}
        </form>"#,
        id = view_id,
        max = CATEGORY_NAME_MAX_CHARS,
        value = escape_html(form.name()),
        controls = render_category_controls(view_id, form),
    )
}

pub fn render_category_controls(view_id: &Uuid, form: &CreateCategoryForm) -> String {
    let label = if form.phase().is_pending() { "Creating..." } else { "Create Category" };
    format!(
        r#"<div id='category-controls' data-view='{}'>
            {}
            <button type='submit' class='mt-4 w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'{}>{}</button>
        </div>"#,
        view_id,
        render_messages(form.phase()),
        if form.can_submit() { "" } else { " disabled" },
        label
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_disabled_until_name_entered() {
        let id = Uuid::new_v4();
        let mut form = CreateCategoryForm::new();
        assert!(render_category_controls(&id, &form).contains(" disabled>Create Category"));
        form.set_name("Food");
        assert!(!render_category_controls(&id, &form).contains(" disabled"));
    }

    #[test]
    fn test_name_stays_editable_while_pending() {
        let id = Uuid::new_v4();
        let mut form = CreateCategoryForm::new();
        form.set_name("Food");
        form.begin_submit().unwrap();
        let html = render_category_form(&id, &form);
        assert!(html.contains("hx-swap='outerHTML'>"));
        assert!(html.contains(" disabled>Creating..."));
    }

    #[test]
    fn test_form_escapes_value() {
        let mut form = CreateCategoryForm::new();
        form.set_name("<Rent & 'Bills'>");
        let html = render_category_form(&Uuid::new_v4(), &form);
        assert!(html.contains("value='&lt;Rent &amp; &#39;Bills&#39;&gt;'"));
    }
}

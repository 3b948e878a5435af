//! Sell wizard pages and the fragments HTMX swaps into them

use super::{html_escape, page};
use bazaar_core::validate::counter;
use bazaar_core::{Category, ValidationErrors, CATEGORIES};
use bazaar_suggest::SuggestionPanel;
use bazaar_wizard::{
    CategoryDetails, DetailForm, FieldKind, FieldSpec, PhotoGallery, SellForm, Step,
    SubmissionReceipt, WizardParams, MAX_PHOTOS,
};
use serde_json::json;

/// Page shell with the wizard breadcrumb
pub fn sell_page(step: &Step, content: &str) -> String {
    let mut crumbs = r#"<a href="/sell">Sell</a>"#.to_string();
    if let Some(category) = step.category() {
        crumbs.push_str(&format!(
            r#" / <a href="{}">{}</a>"#,
            html_escape(&WizardParams::with_category(category.name).href()),
            html_escape(category.name)
        ));
    }
    if let Some(subcategory) = step.subcategory() {
        crumbs.push_str(&format!(" / {}", html_escape(subcategory)));
    }
    let body = format!(
        r#"<h1 style="margin-bottom: 4px">Post your ad</h1>
        <div class="crumbs">{crumbs}</div>
        <div id="wizard" data-step="{step}">{content}</div>"#,
        step = step.name(),
    );
    page("Sell", &body)
}

pub fn category_list_html() -> String {
    let items: String = CATEGORIES
        .iter()
        .map(|c| {
            let arrow = if c.has_subcategories() { "›" } else { "" };
            format!(
                r#"<li><a href="{href}"><span>{name}</span><span>{arrow}</span></a></li>"#,
                href = html_escape(&WizardParams::with_category(c.name).href()),
                name = html_escape(c.name),
            )
        })
        .collect();
    format!(
        r#"<div class="panel"><h3>Choose a category</h3><ul class="steps">{items}</ul></div>"#
    )
}

pub fn subcategory_list_html(category: &Category) -> String {
    let items: String = category
        .subcategories()
        .iter()
        .map(|s| {
            let href = WizardParams::with_category(category.name)
                .with_subcategory(*s)
                .href();
            format!(
                r#"<li><a href="{}"><span>{}</span><span>›</span></a></li>"#,
                html_escape(&href),
                html_escape(s)
            )
        })
        .collect();
    format!(
        r#"<div class="panel">
            <h3>{name}</h3>
            <ul class="steps">{items}</ul>
            <p style="margin-top: 12px"><a href="/sell">‹ Change category</a></p>
        </div>"#,
        name = html_escape(category.name),
    )
}

/// Hidden inputs carrying the navigable parameters through a form post
fn params_inputs(params: &WizardParams) -> String {
    let mut out = String::new();
    if let Some(category) = &params.category {
        out.push_str(&format!(
            r#"<input type="hidden" name="category" value="{}">"#,
            html_escape(category)
        ));
    }
    if let Some(subcategory) = &params.subcategory {
        out.push_str(&format!(
            r#"<input type="hidden" name="subcategory" value="{}">"#,
            html_escape(subcategory)
        ));
    }
    if params.details_submitted {
        out.push_str(r#"<input type="hidden" name="details_submitted" value="true">"#);
    }
    out
}

fn select_html(name: &str, options: &[&str], value: &str) -> String {
    let mut out = format!(r#"<select name="{name}" id="f-{name}"><option value="">Select</option>"#);
    for option in options {
        let selected = if *option == value { " selected" } else { "" };
        out.push_str(&format!(
            r#"<option value="{v}"{selected}>{v}</option>"#,
            v = html_escape(option)
        ));
    }
    out.push_str("</select>");
    out
}

/// One labelled control driven by its field spec
pub fn field_html(spec: &FieldSpec, value: &str, error: Option<&str>) -> String {
    let name = spec.name;
    let v = html_escape(value);
    let control = match spec.kind {
        FieldKind::Text { max } => format!(
            r#"<input type="text" name="{name}" id="f-{name}" value="{v}" maxlength="{max}">"#
        ),
        FieldKind::LongText { max } => format!(
            r#"<textarea name="{name}" id="f-{name}" maxlength="{max}">{v}</textarea>"#
        ),
        FieldKind::Choice(_) | FieldKind::State => select_html(name, spec.options(), value),
        FieldKind::Price => format!(
            r#"<div class="prefix"><span>₹</span><input type="text" inputmode="numeric" name="{name}" id="f-{name}" value="{v}"></div>"#
        ),
        FieldKind::Number { .. } | FieldKind::Year => format!(
            r#"<input type="text" inputmode="numeric" name="{name}" id="f-{name}" value="{v}">"#
        ),
        FieldKind::Phone => format!(
            r#"<div class="prefix"><span>+91</span><input type="tel" name="{name}" id="f-{name}" value="{v}" maxlength="14"></div>"#
        ),
    };
    let required = if spec.required { r#" <span class="req">*</span>"# } else { "" };
    let count = spec
        .max_chars()
        .map(|max| format!(r#"<div class="counter">{}</div>"#, counter(value, max)))
        .unwrap_or_default();
    let error = error
        .map(|e| format!(r#"<div class="error">{}</div>"#, html_escape(e)))
        .unwrap_or_default();
    format!(
        r#"<div class="field"><label for="f-{name}">{label}{required}</label>{control}{count}{error}</div>"#,
        label = html_escape(spec.label),
    )
}

fn gallery_button(action: &str, vals: serde_json::Value, label: &str, enabled: bool) -> String {
    format!(
        r##"<button type="button" hx-post="/api/sell/photos/{action}" hx-vals="{vals}" hx-target="#gallery" hx-swap="outerHTML" title="{label}"{disabled}>{label}</button>"##,
        vals = html_escape(&vals.to_string()),
        disabled = if enabled { "" } else { " disabled" },
    )
}

/// Photo grid with cover badge and per-photo actions
pub fn gallery_html(gallery: &PhotoGallery) -> String {
    let cover = gallery.cover_index();
    let last = gallery.len().saturating_sub(1);
    let photos: String = gallery
        .photos()
        .iter()
        .enumerate()
        .map(|(i, photo)| {
            let is_cover = cover == Some(i);
            format!(
                r#"<div class="photo{class}">
                    <img src="{src}" alt="Photo {n}">
                    {tag}
                    <div class="actions">{left}{star}{remove}{right}</div>
                </div>"#,
                class = if is_cover { " cover" } else { "" },
                src = html_escape(&photo.url),
                n = i + 1,
                tag = if is_cover { r#"<span class="tag">Cover</span>"# } else { "" },
                left = gallery_button("reorder", json!({ "from": i, "to": i.saturating_sub(1) }), "‹", i > 0),
                star = gallery_button("cover", json!({ "index": i }), "★", !is_cover),
                remove = gallery_button("remove", json!({ "index": i }), "✕", true),
                right = gallery_button("reorder", json!({ "from": i, "to": i + 1 }), "›", i < last),
            )
        })
        .collect();

    format!(
        r#"<div id="gallery" class="field">
            <label>Photos</label>
            <div class="gallery">{photos}</div>
            <p class="meta">{len} / {max} photos</p>
            <label for="f-photo_urls" style="margin-top: 8px">Add photos (one image URL per line)</label>
            <textarea name="photo_urls" id="f-photo_urls" style="min-height: 60px"{full}></textarea>
        </div>"#,
        len = gallery.len(),
        max = MAX_PHOTOS,
        full = if gallery.remaining() == 0 { " disabled" } else { "" },
    )
}

/// The active category detail form, swapped as a whole on every change
pub fn detail_form_html(params: &WizardParams, form: &DetailForm, errors: &ValidationErrors, back: &str) -> String {
    let fields = form.fields();
    let mut controls = String::new();
    for spec in fields.specs() {
        controls.push_str(&field_html(spec, fields.get(spec.name), errors.get(spec.name)));
        if spec.name == "price" {
            if let Some(gallery) = form.photos() {
                controls.push_str(&gallery_html(gallery));
            }
        }
    }
    let disabled = if form.can_submit() { "" } else { " disabled" };

    format!(
        r##"<form id="detail-form" class="panel" method="post" action="/sell/details"
            hx-post="/api/sell/details" hx-trigger="change" hx-target="#detail-form" hx-swap="outerHTML">
            <h3>Include some details ({kind})</h3>
            {hidden}
            {controls}
            <div style="display: flex; justify-content: space-between; margin-top: 16px">
                <a href="{back}">‹ Back</a>
                <button type="submit"{disabled}>Next</button>
            </div>
        </form>"##,
        kind = form.kind(),
        hidden = params_inputs(params),
        back = html_escape(back),
    )
}

/// Keyword input, swapped when a suggestion is accepted
pub fn keywords_field_html(value: &str, error: Option<&str>) -> String {
    let error = error
        .map(|e| format!(r#"<div class="error">{}</div>"#, html_escape(e)))
        .unwrap_or_default();
    format!(
        r#"<div class="field" id="keywords-field">
            <label for="f-keywords">Keywords <span class="req">*</span></label>
            <input type="text" name="keywords" id="f-keywords" value="{}" placeholder="comma, separated, keywords">
            {error}
        </div>"#,
        html_escape(value)
    )
}

/// Suggest trigger, notice and the keywords on offer
pub fn suggestion_panel_html(panel: &SuggestionPanel) -> String {
    let notice = panel
        .notice()
        .map(|n| {
            format!(
                r##"<div class="notice"><strong>{}</strong>{}
                    <button type="button" class="secondary" hx-post="/api/suggest/dismiss" hx-target="#suggest-panel" hx-swap="outerHTML">Dismiss</button>
                </div>"##,
                html_escape(&n.title),
                html_escape(&n.description)
            )
        })
        .unwrap_or_default();
    let keywords: String = panel
        .keywords()
        .iter()
        .map(|k| {
            format!(
                r##"<button type="button" hx-post="/api/sell/keywords" hx-vals="{vals}" hx-target="#keywords-field" hx-swap="outerHTML">+ {k}</button>"##,
                vals = html_escape(&json!({ "keyword": k }).to_string()),
                k = html_escape(k),
            )
        })
        .collect();
    let offered = if keywords.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="suggestions"><p class="meta">Suggested keywords</p>{keywords}</div>"#)
    };
    let (label, disabled) = if panel.is_busy() {
        ("Suggesting...", " disabled")
    } else {
        ("Suggest keywords", "")
    };

    format!(
        r##"<div id="suggest-panel" class="field">
            <button type="button" class="secondary" hx-post="/api/suggest" hx-include="[name='title'],[name='description']" hx-target="#suggest-panel" hx-swap="outerHTML"{disabled}>{label}</button>
            {notice}
            {offered}
        </div>"##
    )
}

/// Everything the listing step needs to render
pub struct ListingView<'a> {
    pub params: &'a WizardParams,
    pub form: &'a SellForm,
    pub details: Option<&'a CategoryDetails>,
    /// Optional extras, only for categories without a dedicated flow
    pub extras: Option<&'a DetailForm>,
    pub panel: &'a SuggestionPanel,
    pub errors: &'a ValidationErrors,
    pub back: &'a str,
}

fn details_summary(details: &CategoryDetails) -> String {
    let value = serde_json::to_value(details).unwrap_or_default();
    let rows: String = value
        .as_object()
        .map(|fields| {
            fields
                .iter()
                .filter(|(key, _)| key.as_str() != "kind")
                .filter_map(|(key, value)| {
                    let text = match value {
                        serde_json::Value::String(s) => s.clone(),
                        serde_json::Value::Number(n) => n.to_string(),
                        _ => return None,
                    };
                    Some(format!(
                        "<li><span class=\"meta\">{}</span> {}</li>",
                        html_escape(&key.replace('_', " ")),
                        html_escape(&text)
                    ))
                })
                .collect()
        })
        .unwrap_or_default();
    format!(
        r#"<div class="panel"><h3>{} details</h3><ul style="list-style: none">{rows}</ul></div>"#,
        details.kind()
    )
}

pub fn listing_form_html(view: &ListingView<'_>) -> String {
    let form = view.form;
    let errors = view.errors;
    let input = |name: &str, label: &str, kind: &str, value: &str| {
        let error = errors
            .get(name)
            .map(|e| format!(r#"<div class="error">{}</div>"#, html_escape(e)))
            .unwrap_or_default();
        format!(
            r#"<div class="field"><label for="f-{name}">{label} <span class="req">*</span></label>
                <input type="{kind}" name="{name}" id="f-{name}" value="{v}">{error}</div>"#,
            v = html_escape(value)
        )
    };
    let description_error = errors
        .get("description")
        .map(|e| format!(r#"<div class="error">{}</div>"#, html_escape(e)))
        .unwrap_or_default();
    let extras: String = view
        .extras
        .map(|extras| {
            let fields = extras.fields();
            fields
                .specs()
                .iter()
                .map(|spec| field_html(spec, fields.get(spec.name), errors.get(spec.name)))
                .collect()
        })
        .unwrap_or_default();
    let summary = view.details.map(details_summary).unwrap_or_default();

    format!(
        r#"{summary}
        <form class="panel" method="post" action="/sell/submit">
            <h3>Listing details</h3>
            {hidden}
            {title}
            <div class="field"><label for="f-description">Description <span class="req">*</span></label>
                <textarea name="description" id="f-description">{description}</textarea>{description_error}</div>
            {suggest}
            {keywords}
            {price}
            {extras}
            {location}
            {contact}
            <div style="display: flex; justify-content: space-between; margin-top: 16px">
                <a href="{back}">‹ Back</a>
                <button type="submit">Post now</button>
            </div>
        </form>"#,
        hidden = params_inputs(view.params),
        title = input("title", "Title", "text", &form.title),
        description = html_escape(&form.description),
        suggest = suggestion_panel_html(view.panel),
        keywords = keywords_field_html(&form.keywords, errors.get("keywords")),
        price = input("price", "Price (₹)", "text", &form.price),
        location = input("location", "Location", "text", &form.location),
        contact = input("contact", "Contact email", "email", &form.contact),
        back = html_escape(view.back),
    )
}

pub fn submitted_html(receipt: &SubmissionReceipt) -> String {
    let body = format!(
        r#"<div class="success">
            <h1>{title}</h1>
            <p>{message}</p>
            <p class="meta">Reference {id}</p>
            <p style="margin-top: 16px"><a class="btn" href="/">Back to listings</a> <a href="/sell">Post another ad</a></p>
        </div>"#,
        title = html_escape(&receipt.title),
        message = html_escape(&receipt.message),
        id = receipt.listing_id,
    );
    page("Listing Submitted", &body)
}

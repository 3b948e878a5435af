//! Browse grid, listing cards, filter sidebar and the listing detail page

use super::{format_price, html_escape, page, query_escape};
use bazaar_catalog::{ProductQuery, ALL_CATEGORIES};
use bazaar_core::Listing;
use bazaar_favorites::FavoriteStatus;

/// Heart toggle. Works as a plain form post and, with HTMX, swaps itself.
///
/// Before the favorites store is loaded the button is neutral and inert.
pub fn favorite_button(id: &str, status: FavoriteStatus, next: &str) -> String {
    let id = html_escape(id);
    let (class, symbol, label, disabled) = match status {
        FavoriteStatus::Unknown => ("fav-btn pending", "♡", "Favorites loading", " disabled"),
        FavoriteStatus::Favorite => ("fav-btn on", "♥", "Remove from favorites", ""),
        FavoriteStatus::NotFavorite => ("fav-btn", "♡", "Add to favorites", ""),
    };
    format!(
        r#"<form method="post" action="/favorites/{id}/toggle" class="fav-form">
            <input type="hidden" name="next" value="{next}">
            <button type="submit" class="{class}" title="{label}" aria-label="{label}"{disabled}
                hx-post="/api/favorites/{id}/toggle" hx-target="closest form" hx-swap="outerHTML">{symbol}</button>
        </form>"#,
        next = html_escape(next),
    )
}

pub fn product_card(listing: &Listing, status: FavoriteStatus, next: &str) -> String {
    let image = listing
        .cover_image()
        .map(|src| {
            format!(
                r#"<img src="{}" alt="{}" data-hint="{}">"#,
                html_escape(src),
                html_escape(&listing.title),
                html_escape(listing.image_hint(0).unwrap_or_default())
            )
        })
        .unwrap_or_else(|| r#"<img alt="">"#.to_string());

    format!(
        r#"<div class="card">
            {fav}
            <a href="/listings/{id}">{image}</a>
            <div class="card-body">
                <div class="price">{price}</div>
                <a class="title" href="/listings/{id}">{title}</a>
                <div class="meta">{location} · {category}</div>
            </div>
        </div>"#,
        fav = favorite_button(&listing.id, status, next),
        id = query_escape(&listing.id),
        image = image,
        price = format_price(listing.price),
        title = html_escape(&listing.title),
        location = html_escape(&listing.location),
        category = html_escape(&listing.category),
    )
}

/// Card grid, or the empty state when nothing matched
pub fn product_grid(products: &[(&Listing, FavoriteStatus)], next: &str) -> String {
    if products.is_empty() {
        return r#"<div id="products" class="empty">
            <h2>No products found</h2>
            <p>Try a different search term or category.</p>
        </div>"#
            .to_string();
    }

    let cards: String = products
        .iter()
        .map(|(listing, status)| product_card(listing, *status, next))
        .collect();
    format!(r#"<div id="products" class="grid">{cards}</div>"#)
}

/// "All" followed by every catalog category, the active one highlighted
pub fn filter_sidebar(categories: &[String], query: &ProductQuery) -> String {
    let active = query.active_category();
    let text = query.query.as_deref().unwrap_or_default();
    let suffix = if text.is_empty() {
        String::new()
    } else {
        format!("&q={}", query_escape(text))
    };

    let mut links = format!(
        r#"<a href="/?category={all}{suffix}" class="{class}">All</a>"#,
        all = ALL_CATEGORIES,
        class = if active.is_none() { "active" } else { "" },
    );
    for category in categories {
        links.push_str(&format!(
            r#"<a href="/?category={value}{suffix}" class="{class}">{name}</a>"#,
            value = query_escape(category),
            class = if active == Some(category.as_str()) { "active" } else { "" },
            name = html_escape(category),
        ));
    }

    format!(r#"<aside class="filters"><h3>Categories</h3>{links}</aside>"#)
}

pub fn search_bar(query: &ProductQuery) -> String {
    let category = query.active_category().unwrap_or(ALL_CATEGORIES);
    format!(
        r##"<form class="search" method="get" action="/" hx-get="/" hx-target="#products" hx-select="#products" hx-swap="outerHTML" hx-push-url="true">
            <input type="search" name="q" value="{q}" placeholder="Search listings...">
            <input type="hidden" name="category" value="{category}">
            <button type="submit">Search</button>
        </form>"##,
        q = html_escape(query.query.as_deref().unwrap_or_default()),
        category = html_escape(category),
    )
}

pub fn browse_html(
    query: &ProductQuery,
    categories: &[String],
    products: &[(&Listing, FavoriteStatus)],
    next: &str,
) -> String {
    let heading = match query.active_category() {
        Some(category) => html_escape(category),
        None => "Fresh recommendations".to_string(),
    };
    let body = format!(
        r#"<div class="browse">
            {sidebar}
            <section>
                {search}
                <h2 style="margin-bottom: 12px">{heading} <small class="meta">({count})</small></h2>
                {grid}
            </section>
        </div>"#,
        sidebar = filter_sidebar(categories, query),
        search = search_bar(query),
        heading = heading,
        count = products.len(),
        grid = product_grid(products, next),
    );
    page("Browse", &body)
}

pub fn listing_detail_html(listing: &Listing, status: FavoriteStatus) -> String {
    let next = format!("/listings/{}", query_escape(&listing.id));
    let main_image = listing
        .cover_image()
        .map(|src| format!(r#"<img src="{}" alt="{}">"#, html_escape(src), html_escape(&listing.title)))
        .unwrap_or_default();
    let thumbs: String = listing
        .images
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, src)| {
            format!(
                r#"<img src="{}" alt="" data-hint="{}">"#,
                html_escape(src),
                html_escape(listing.image_hint(i).unwrap_or_default())
            )
        })
        .collect();
    let keywords: String = listing
        .keywords
        .iter()
        .map(|k| format!("<span>{}</span>", html_escape(k)))
        .collect();

    let body = format!(
        r#"<div class="crumbs"><a href="/">Home</a> / <a href="/?category={category_q}">{category}</a> / {title}</div>
        <div class="detail">
            <section>
                {main_image}
                <div class="thumbs">{thumbs}</div>
                <div class="panel" style="margin-top: 16px">
                    <h3>Description</h3>
                    <p>{description}</p>
                    <div class="keywords" style="margin-top: 8px">{keywords}</div>
                </div>
            </section>
            <aside>
                <div class="panel" style="position: relative">
                    {fav}
                    <div class="price" style="font-size: 1.6rem; font-weight: 700">{price}</div>
                    <h1 style="font-size: 1.2rem">{title}</h1>
                    <div class="meta">{location}</div>
                </div>
                <div class="panel">
                    <h3>Seller</h3>
                    <p>{seller}</p>
                    <p class="meta">{contact}</p>
                </div>
            </aside>
        </div>"#,
        category_q = query_escape(&listing.category),
        category = html_escape(&listing.category),
        title = html_escape(&listing.title),
        main_image = main_image,
        thumbs = thumbs,
        description = html_escape(&listing.description),
        keywords = keywords,
        fav = favorite_button(&listing.id, status, &next),
        price = format_price(listing.price),
        location = html_escape(&listing.location),
        seller = html_escape(&listing.seller.name),
        contact = html_escape(&listing.seller.contact),
    );
    page(&listing.title, &body)
}

/// Terminal "not found" presentation
pub fn not_found_html(what: &str) -> String {
    let body = format!(
        r#"<div class="empty">
            <h1>Not found</h1>
            <p>Nothing lives at <code>{}</code>. It may have been removed.</p>
            <p style="margin-top: 16px"><a class="btn" href="/">Back to listings</a></p>
        </div>"#,
        html_escape(what)
    );
    page("Not found", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_catalog::Catalog;

    #[test]
    fn test_unknown_status_renders_neutral_button() {
        let html = favorite_button("1", FavoriteStatus::Unknown, "/");
        assert!(html.contains("pending"));
        assert!(html.contains("disabled"));
        assert!(!html.contains("fav-btn on"));
    }

    #[test]
    fn test_empty_grid_message() {
        assert!(product_grid(&[], "/").contains("No products found"));
    }

    #[test]
    fn test_sidebar_marks_active_category() {
        let catalog = Catalog::sample();
        let html = filter_sidebar(&catalog.categories(), &ProductQuery::category("Bikes"));
        assert!(html.contains(r#"<a href="/?category=Bikes" class="active">Bikes</a>"#));
        assert!(html.contains(r#"class="">All</a>"#));
    }

    #[test]
    fn test_detail_escapes_listing_text() {
        let catalog = Catalog::sample();
        let mut listing = catalog.all()[0].clone();
        listing.title = "<script>".into();
        let html = listing_detail_html(&listing, FavoriteStatus::NotFavorite);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}

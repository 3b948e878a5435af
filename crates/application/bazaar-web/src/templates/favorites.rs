use super::catalog::product_grid;
use super::page;
use bazaar_core::Listing;
use bazaar_favorites::FavoriteStatus;

/// `None` while the favorites store has not loaded yet
pub fn favorites_html(favorites: Option<&[&Listing]>) -> String {
    let content = match favorites {
        None => r#"<div class="empty"><p>Loading favorites...</p></div>"#.to_string(),
        Some([]) => r#"<div class="empty">
            <h2>No favorites yet</h2>
            <p>Tap the heart on any listing to keep it here.</p>
            <p style="margin-top: 16px"><a class="btn" href="/">Browse Products</a></p>
        </div>"#
            .to_string(),
        Some(listings) => {
            let products: Vec<(&Listing, FavoriteStatus)> = listings
                .iter()
                .map(|l| (*l, FavoriteStatus::Favorite))
                .collect();
            product_grid(&products, "/favorites")
        }
    };
    page("Favorites", &format!("<h1 style=\"margin-bottom: 16px\">My Favorites</h1>{content}"))
}

//! Built-in sample listings

use bazaar_core::{Listing, Seller};

const PLACEHOLDER: &str = "https://placehold.co/600x400.png";

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    title: &str,
    description: &str,
    price: u64,
    hints: &[&str],
    category: &str,
    location: &str,
    seller: (&str, &str),
    keywords: &[&str],
) -> Listing {
    Listing {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        price,
        images: hints.iter().map(|_| PLACEHOLDER.to_string()).collect(),
        image_hints: hints.iter().map(|h| h.to_string()).collect(),
        category: category.to_string(),
        location: location.to_string(),
        seller: Seller {
            name: seller.0.to_string(),
            contact: seller.1.to_string(),
        },
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// The eight demo listings, ids "1" through "8"
pub fn sample_listings() -> Vec<Listing> {
    vec![
        listing(
            "1",
            "Vintage Leather Sofa",
            "A beautiful and comfortable vintage leather sofa, perfect for any living room. Minor wear and tear consistent with age.",
            35000,
            &["leather sofa", "living room", "vintage furniture"],
            "Furniture",
            "Mumbai, MH",
            ("Jane Doe", "jane.d@example.com"),
            &["sofa", "leather", "vintage", "furniture", "living room"],
        ),
        listing(
            "2",
            "Mountain Bike - Like New",
            "Barely used mountain bike with 21 speeds and front suspension. Great for trails and city riding. Brand: TrailBlazer.",
            25000,
            &["mountain bike", "bicycle outdoor"],
            "Bikes",
            "Bengaluru, KA",
            ("John Smith", "jsmith@example.com"),
            &["bike", "mountain bike", "cycling", "sports", "outdoors"],
        ),
        listing(
            "3",
            "Acoustic Guitar with Case",
            "Yamaha acoustic guitar, great for beginners and intermediate players. Comes with a soft case and a few picks.",
            12000,
            &["acoustic guitar"],
            "Musical Instruments",
            "Pune, MH",
            ("Emily White", "em.white@example.com"),
            &["guitar", "acoustic", "yamaha", "instrument", "music"],
        ),
        listing(
            "4",
            "Professional DSLR Camera",
            "Canon EOS 5D Mark IV in excellent condition. Includes 50mm f/1.8 lens, battery, and charger. Shutter count: 15,000.",
            140000,
            &["dslr camera", "camera lens"],
            "Electronics",
            "Delhi, DL",
            ("Michael Brown", "m.brown@example.com"),
            &["camera", "dslr", "canon", "photography", "electronics"],
        ),
        listing(
            "5",
            "Mid-Century Modern Dresser",
            "Solid wood 6-drawer dresser with classic mid-century lines. A few minor scuffs but otherwise in great shape.",
            28000,
            &["wood dresser"],
            "Furniture",
            "Chennai, TN",
            ("Sarah Green", "sgreen@example.com"),
            &["dresser", "mid-century", "wood", "furniture", "bedroom"],
        ),
        listing(
            "6",
            "Complete Harry Potter Book Set",
            "Full set of 7 Harry Potter books in hardcover. Excellent condition, read once.",
            5000,
            &["books collection"],
            "Books",
            "Kolkata, WB",
            ("David Black", "dblack@example.com"),
            &["books", "harry potter", "reading", "collection", "fantasy"],
        ),
        listing(
            "7",
            "Used iPhone 12 Pro",
            "128GB iPhone 12 Pro, unlocked. Screen is in perfect condition, minor scuffs on the side. Battery health at 88%.",
            40000,
            &["smartphone", "iphone screen"],
            "Electronics",
            "Hyderabad, TS",
            ("Jessica Blue", "j.blue@example.com"),
            &["iphone", "apple", "smartphone", "electronics", "unlocked"],
        ),
        listing(
            "8",
            "Vintage Road Bicycle",
            "Classic Schwinn road bike from the 80s. Restored and rides smoothly. Perfect for a collector or enthusiast.",
            20000,
            &["road bike"],
            "Bikes",
            "Ahmedabad, GJ",
            ("Chris Red", "c.red@example.com"),
            &["bike", "road bike", "schwinn", "vintage", "cycling"],
        ),
    ]
}
